//! Statement-level AST: select bodies, FROM references, DDL elements.

pub mod alter_table;
pub mod data_type;
pub mod from;
pub mod partition;
pub mod select;
pub mod table_element;
pub mod table_options;

pub use alter_table::{AlterColumnBehavior, AlterTableAction, PartitionSplitActions};
pub use data_type::DataType;
pub use from::{FromReference, JoinType, RelationFactor};
pub use partition::{Partition, PartitionBound, PartitionElement, SubPartitionElement};
pub use select::{OrderBy, Projection, SelectBody, SortKey};
pub use table_element::{
    ColumnDefinition, ConstraintState, InLineConstraint, OutOfLineConstraint, OutOfLineIndex,
    TableElement,
};
pub use table_options::TableOptions;
