//! Oracle Dialect
//!
//! Factories lowering the Oracle parse tree ([`tree`]) into the shared AST.
//!
//! Dialect traits the shared AST keeps visible:
//! - dotted names are [`RelationReference`](crate::expressions::RelationReference)
//!   chains, so `a.b` is `a -> b` rather than a flat column
//! - `EXCEPT` and `MINUS` both lower to
//!   [`RelationType::Minus`](crate::statements::select::RelationType)
//! - `IS NAN` / `IS INFINITE` become comparisons against a constant
//! - `UNION DISTINCT`, `STRAIGHT_JOIN` and bare `OUTER JOIN` do not exist

pub mod tree;

mod alter_table;
mod data_type;
mod expression;
mod from_reference;
mod partition;
mod select;
mod table_element;
mod table_options;

pub use alter_table::OracleAlterTableActionFactory;
pub use data_type::OracleDataTypeFactory;
pub use expression::OracleExpressionFactory;
pub use from_reference::OracleFromReferenceFactory;
pub use partition::OraclePartitionFactory;
pub use select::OracleSelectFactory;
pub use table_element::OracleTableElementFactory;
pub use table_options::OracleTableOptionsFactory;
