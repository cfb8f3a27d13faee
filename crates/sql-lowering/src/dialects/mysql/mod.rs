//! MySQL Dialect
//!
//! Factories lowering the MySQL parse tree ([`tree`]) into the shared AST.
//!
//! Dialect traits the shared AST keeps visible:
//! - `a.b` is a flat [`ColumnReference`](crate::expressions::ColumnReference)
//!   with `relation = a`, `column = b`
//! - window specs hang off [`FunctionCall::window`](crate::expressions::FunctionCall)
//! - `DIV` is integer division, `^` is bitwise XOR
//! - `FROM DUAL` is only emitted when written

pub mod tree;

mod alter_table;
mod data_type;
mod expression;
mod from_reference;
mod partition;
mod select;
mod table_element;
mod table_options;

pub use alter_table::MySQLAlterTableActionFactory;
pub use data_type::MySQLDataTypeFactory;
pub use expression::MySQLExpressionFactory;
pub use from_reference::MySQLFromReferenceFactory;
pub use partition::MySQLPartitionFactory;
pub use select::MySQLSelectFactory;
pub use table_element::MySQLTableElementFactory;
pub use table_options::MySQLTableOptionsFactory;
