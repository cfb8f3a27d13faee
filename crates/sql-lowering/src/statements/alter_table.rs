//! ALTER TABLE actions.
//!
//! Each [`AlterTableAction`] is exactly one clause of an ALTER TABLE
//! statement; a statement with several comma-separated clauses lowers to
//! several actions.

use serde::{Deserialize, Serialize};
#[cfg(feature = "bindings")]
use ts_rs::TS;

use super::from::RelationFactor;
use super::partition::{Partition, PartitionElement, SubPartitionElement};
use super::table_element::{
    ColumnDefinition, ColumnGroupElement, ConstraintState, OutOfLineConstraint, OutOfLineIndex,
};
use super::table_options::TableOptions;
use crate::expressions::{ColumnReference, Expression};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "snake_case")]
pub enum AlterTableAction {
    TableOptions(TableOptions),
    RenameTable(RelationFactor),
    /// MySQL `CONVERT TO CHARACTER SET cs [COLLATE c]`
    Charset {
        charset: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        collation: Option<String>,
    },
    Refresh,

    // Columns
    AddColumns(Vec<ColumnDefinition>),
    DropColumns {
        columns: Vec<ColumnReference>,
        /// `CASCADE` or `RESTRICT` as written, only for a single column
        #[serde(default, skip_serializing_if = "Option::is_none")]
        option: Option<String>,
    },
    ModifyColumns(Vec<ColumnDefinition>),
    /// MySQL `CHANGE [COLUMN] old new_definition`
    ChangeColumn {
        from: ColumnReference,
        to: ColumnDefinition,
    },
    RenameColumn {
        from: ColumnReference,
        to: String,
    },
    /// MySQL `ALTER [COLUMN] c SET DEFAULT v | DROP DEFAULT`
    AlterColumnBehavior {
        column: ColumnReference,
        behavior: AlterColumnBehavior,
    },
    DropTableGroup,

    // Indexes
    AddIndex(OutOfLineIndex),
    DropIndex(String),
    AlterIndexVisibility {
        name: String,
        visible: bool,
    },
    /// `ALTER INDEX i PARALLEL n`; `None` is `NOPARALLEL`
    AlterIndexParallel {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parallel: Option<u64>,
    },
    RenameIndex {
        from: String,
        to: String,
    },

    // Constraints
    AddConstraint(OutOfLineConstraint),
    DropConstraint(Vec<String>),
    DropPrimaryKey,
    DropForeignKey(String),
    /// MySQL `ALTER CHECK c [NOT] ENFORCED`, Oracle `MODIFY CONSTRAINT c state`
    ModifyConstraint {
        name: String,
        state: ConstraintState,
    },
    /// Oracle `MODIFY PRIMARY KEY (cols) [state]`
    ModifyPrimaryKey(OutOfLineConstraint),

    // Partitions
    DropPartition {
        names: Vec<String>,
        #[serde(default)]
        sub: bool,
        /// Oracle `UPDATE GLOBAL INDEXES`
        #[serde(default)]
        update_global_indexes: bool,
    },
    TruncatePartition {
        names: Vec<String>,
        #[serde(default)]
        sub: bool,
        #[serde(default)]
        update_global_indexes: bool,
    },
    AddPartition(Vec<PartitionElement>),
    /// Oracle `MODIFY PARTITION p ADD SUBPARTITION ...`
    AddSubPartition {
        partition: RelationFactor,
        elements: Vec<SubPartitionElement>,
    },
    ModifyPartition(Partition),
    ReorganizePartition {
        names: Vec<String>,
        into: Vec<PartitionElement>,
    },
    /// Oracle `SPLIT PARTITION p AT|VALUES (...) INTO (...)`
    SplitPartition {
        partition: RelationFactor,
        actions: PartitionSplitActions,
    },
    ExchangePartition {
        name: String,
        table: RelationFactor,
        /// `WITH VALIDATION` is `Some(true)`, `WITHOUT VALIDATION` is `Some(false)`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        with_validation: Option<bool>,
    },
    RemovePartitioning,
    RenamePartition {
        from: String,
        to: String,
        #[serde(default)]
        sub: bool,
    },

    // Oracle physical
    /// `MOVE COMPRESS ...`, text after the keyword
    MoveCompress(String),
    MoveNoCompress,
    /// `SET INTERVAL (expr)`; `SET INTERVAL ()` clears it
    SetInterval(Option<Expression>),
    EnableAllTriggers,
    DisableAllTriggers,

    // Column store
    AddColumnGroup(Vec<ColumnGroupElement>),
    DropColumnGroup(Vec<ColumnGroupElement>),
}

/// What `ALTER COLUMN` does to the column default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "snake_case")]
pub enum AlterColumnBehavior {
    SetDefault(Expression),
    DropDefault,
}

/// Split point and targets of `SPLIT PARTITION`.
///
/// Exactly one of `list_exprs` / `range_exprs` is set by `VALUES (...)` or
/// `AT (...)`. `intos` may mix full elements with bare partition names
/// ([`PartitionBound::Special`](super::partition::PartitionBound::Special)).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct PartitionSplitActions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_exprs: Option<Vec<Expression>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_exprs: Option<Vec<Expression>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intos: Option<Vec<PartitionElement>>,
}

impl AlterTableAction {
    /// Short clause name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AlterTableAction::TableOptions(_) => "table options",
            AlterTableAction::RenameTable(_) => "rename table",
            AlterTableAction::Charset { .. } => "convert charset",
            AlterTableAction::Refresh => "refresh",
            AlterTableAction::AddColumns(_) => "add columns",
            AlterTableAction::DropColumns { .. } => "drop columns",
            AlterTableAction::ModifyColumns(_) => "modify columns",
            AlterTableAction::ChangeColumn { .. } => "change column",
            AlterTableAction::RenameColumn { .. } => "rename column",
            AlterTableAction::AlterColumnBehavior { .. } => "alter column",
            AlterTableAction::DropTableGroup => "drop tablegroup",
            AlterTableAction::AddIndex(_) => "add index",
            AlterTableAction::DropIndex(_) => "drop index",
            AlterTableAction::AlterIndexVisibility { .. } => "alter index visibility",
            AlterTableAction::AlterIndexParallel { .. } => "alter index parallel",
            AlterTableAction::RenameIndex { .. } => "rename index",
            AlterTableAction::AddConstraint(_) => "add constraint",
            AlterTableAction::DropConstraint(_) => "drop constraint",
            AlterTableAction::DropPrimaryKey => "drop primary key",
            AlterTableAction::DropForeignKey(_) => "drop foreign key",
            AlterTableAction::ModifyConstraint { .. } => "modify constraint",
            AlterTableAction::ModifyPrimaryKey(_) => "modify primary key",
            AlterTableAction::DropPartition { .. } => "drop partition",
            AlterTableAction::TruncatePartition { .. } => "truncate partition",
            AlterTableAction::AddPartition(_) => "add partition",
            AlterTableAction::AddSubPartition { .. } => "add subpartition",
            AlterTableAction::ModifyPartition(_) => "modify partition",
            AlterTableAction::ReorganizePartition { .. } => "reorganize partition",
            AlterTableAction::SplitPartition { .. } => "split partition",
            AlterTableAction::ExchangePartition { .. } => "exchange partition",
            AlterTableAction::RemovePartitioning => "remove partitioning",
            AlterTableAction::RenamePartition { .. } => "rename partition",
            AlterTableAction::MoveCompress(_) => "move compress",
            AlterTableAction::MoveNoCompress => "move nocompress",
            AlterTableAction::SetInterval(_) => "set interval",
            AlterTableAction::EnableAllTriggers => "enable all triggers",
            AlterTableAction::DisableAllTriggers => "disable all triggers",
            AlterTableAction::AddColumnGroup(_) => "add column group",
            AlterTableAction::DropColumnGroup(_) => "drop column group",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_compares_whole_variant() {
        let a = AlterTableAction::DropPartition {
            names: vec!["p1".to_string()],
            sub: false,
            update_global_indexes: false,
        };
        let b = AlterTableAction::TruncatePartition {
            names: vec!["p1".to_string()],
            sub: false,
            update_global_indexes: false,
        };
        assert_ne!(a, b);
        assert_eq!(a.clone(), a);
    }

    #[test]
    fn test_kind_names_clause() {
        assert_eq!(
            AlterTableAction::SetInterval(None).kind(),
            "set interval"
        );
    }
}
