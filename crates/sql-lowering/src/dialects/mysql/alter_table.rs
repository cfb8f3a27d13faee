//! MySQL ALTER TABLE clauses.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::expression::{lower_column_ref, lower_signed_literal};
use super::partition::{lower_element, lower_partition};
use super::table_element::{
    lower_column_definition, lower_column_groups, lower_constraint, lower_index, VISIBILITY,
};
use super::table_options::lower_table_options;
use super::tree;
use crate::dialects::{lookup, number, DialectType, Factory};
use crate::error::Result;
use crate::statements::alter_table::{AlterColumnBehavior, AlterTableAction};
use crate::statements::from::RelationFactor;
use crate::statements::table_element::ConstraintState;

const DIALECT: DialectType = DialectType::MySQL;

#[derive(Clone, Copy)]
enum PartitionVerb {
    Drop,
    Truncate,
}

static PARTITION_VERBS: Lazy<HashMap<&'static str, PartitionVerb>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("DROP", PartitionVerb::Drop);
    m.insert("TRUNCATE", PartitionVerb::Truncate);
    m
});

/// `PARTITION` / `SUBPARTITION`, `true` for the latter
static PARTITION_LEVELS: Lazy<HashMap<&'static str, bool>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("PARTITION", false);
    m.insert("SUBPARTITION", true);
    m
});

pub struct MySQLAlterTableActionFactory;

impl Factory for MySQLAlterTableActionFactory {
    type Node = tree::AlterTableClause;
    type Output = AlterTableAction;

    fn dialect_type(&self) -> DialectType {
        DIALECT
    }

    fn generate(&self, node: &tree::AlterTableClause) -> Result<AlterTableAction> {
        let action = lower_clause(node)?;
        log::debug!("lowered mysql alter table clause: {}", action.kind());
        Ok(action)
    }
}

fn lower_clause(node: &tree::AlterTableClause) -> Result<AlterTableAction> {
    use tree::AlterTableClause as Clause;

    let action = match node {
        Clause::TableOptions(options) => AlterTableAction::TableOptions(lower_table_options(options)?),
        Clause::RenameTable(name) => AlterTableAction::RenameTable(RelationFactor {
            user_variable: name.user_variable.clone(),
            ..RelationFactor::new(name.schema.as_deref(), &name.relation)
        }),
        Clause::ConvertTo { charset, collation } => AlterTableAction::Charset {
            charset: charset.clone(),
            collation: collation.clone(),
        },
        Clause::Refresh => AlterTableAction::Refresh,

        Clause::AddColumn(column) => AlterTableAction::AddColumns(vec![lower_column_definition(column)?]),
        Clause::AddColumns(columns) => AlterTableAction::AddColumns(
            columns
                .iter()
                .map(lower_column_definition)
                .collect::<Result<Vec<_>>>()?,
        ),
        Clause::DropColumn { column, option } => AlterTableAction::DropColumns {
            columns: vec![lower_column_ref(column)],
            option: option.clone(),
        },
        Clause::ModifyColumn(column) => AlterTableAction::ModifyColumns(vec![lower_column_definition(column)?]),
        Clause::ChangeColumn { from, to } => AlterTableAction::ChangeColumn {
            from: lower_column_ref(from),
            to: lower_column_definition(to)?,
        },
        Clause::AlterColumn {
            column,
            set_default,
        } => AlterTableAction::AlterColumnBehavior {
            column: lower_column_ref(column),
            behavior: match set_default {
                Some(value) => AlterColumnBehavior::SetDefault(lower_signed_literal(value)?),
                None => AlterColumnBehavior::DropDefault,
            },
        },
        Clause::RenameColumn { from, to } => AlterTableAction::RenameColumn {
            from: lower_column_ref(from),
            to: to.clone(),
        },
        Clause::DropTableGroup => AlterTableAction::DropTableGroup,

        Clause::AddIndex(index) => AlterTableAction::AddIndex(lower_index(index)?),
        Clause::DropIndex(name) => AlterTableAction::DropIndex(name.clone()),
        Clause::AlterIndexVisibility { name, visibility } => AlterTableAction::AlterIndexVisibility {
            name: name.clone(),
            visible: lookup(&VISIBILITY, DIALECT, "index visibility", visibility)?,
        },
        Clause::AlterIndexParallel { name, parallel } => AlterTableAction::AlterIndexParallel {
            name: name.clone(),
            parallel: parallel
                .as_deref()
                .map(|degree| number(DIALECT, "parallel degree", degree))
                .transpose()?,
        },
        Clause::RenameIndex { from, to } => AlterTableAction::RenameIndex {
            from: from.clone(),
            to: to.clone(),
        },

        Clause::Partition {
            verb,
            keyword,
            names,
        } => {
            let sub = lookup(&PARTITION_LEVELS, DIALECT, "partition level", keyword)?;
            let names = names.clone();
            match lookup(&PARTITION_VERBS, DIALECT, "partition action", verb)? {
                PartitionVerb::Drop => AlterTableAction::DropPartition {
                    names,
                    sub,
                    update_global_indexes: false,
                },
                PartitionVerb::Truncate => AlterTableAction::TruncatePartition {
                    names,
                    sub,
                    update_global_indexes: false,
                },
            }
        }
        Clause::AddPartitions(elements) => AlterTableAction::AddPartition(
            elements.iter().map(lower_element).collect::<Result<Vec<_>>>()?,
        ),
        Clause::ModifyPartition(partition) => AlterTableAction::ModifyPartition(lower_partition(partition)?),
        Clause::ReorganizePartition { names, into } => AlterTableAction::ReorganizePartition {
            names: names.clone(),
            into: into.iter().map(lower_element).collect::<Result<Vec<_>>>()?,
        },
        Clause::RemovePartitioning => AlterTableAction::RemovePartitioning,

        Clause::AddConstraint(constraint) => AlterTableAction::AddConstraint(lower_constraint(constraint)?),
        Clause::DropPrimaryKey => AlterTableAction::DropPrimaryKey,
        Clause::DropForeignKey(name) => AlterTableAction::DropForeignKey(name.clone()),
        Clause::DropConstraints(names) => AlterTableAction::DropConstraint(names.clone()),
        // ALTER CHECK c [NOT] ENFORCED
        Clause::AlterCheck { name, state } => AlterTableAction::ModifyConstraint {
            name: name.clone(),
            state: ConstraintState::enforced(!state.not),
        },

        Clause::AddColumnGroup(groups) => AlterTableAction::AddColumnGroup(lower_column_groups(groups)),
        Clause::DropColumnGroup(groups) => AlterTableAction::DropColumnGroup(lower_column_groups(groups)),
    };
    Ok(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::expressions::{ColumnReference, Expression, Operator};
    use crate::statements::data_type::DataType;
    use crate::statements::table_element::ColumnDefinition;

    fn lower(clause: tree::AlterTableClause) -> AlterTableAction {
        MySQLAlterTableActionFactory.generate(&clause).unwrap()
    }

    #[test]
    fn test_add_column_list() {
        let clause = tree::AlterTableClause::AddColumns(vec![
            tree::ColumnDefinition::new("id", Some(tree::DataType::character("varchar", Some("64")))),
            tree::ColumnDefinition::new("id1", Some(tree::DataType::named("blob", &[]))),
        ]);
        let expected = AlterTableAction::AddColumns(vec![
            ColumnDefinition::new(
                ColumnReference::new(None, None, "id"),
                Some(DataType::character("varchar", Some("64"))),
            ),
            ColumnDefinition::new(
                ColumnReference::new(None, None, "id1"),
                Some(DataType::general("blob", vec![])),
            ),
        ]);
        assert_eq!(lower(clause), expected);
    }

    #[test]
    fn test_alter_column_default() {
        let set = tree::AlterTableClause::AlterColumn {
            column: tree::ColumnRef::new(None, "c"),
            set_default: Some(tree::SignedLiteral::new(Some("-"), tree::Expr::literal("1"))),
        };
        assert_eq!(
            lower(set),
            AlterTableAction::AlterColumnBehavior {
                column: ColumnReference::new(None, None, "c"),
                behavior: AlterColumnBehavior::SetDefault(Expression::unary(
                    Expression::constant("1"),
                    Operator::Sub
                )),
            }
        );

        let drop = tree::AlterTableClause::AlterColumn {
            column: tree::ColumnRef::new(None, "c"),
            set_default: None,
        };
        assert!(matches!(
            lower(drop),
            AlterTableAction::AlterColumnBehavior {
                behavior: AlterColumnBehavior::DropDefault,
                ..
            }
        ));
    }

    #[test]
    fn test_truncate_subpartition() {
        let clause = tree::AlterTableClause::Partition {
            verb: "truncate".to_string(),
            keyword: "SUBPARTITION".to_string(),
            names: vec!["sp0".to_string(), "sp1".to_string()],
        };
        assert_eq!(
            lower(clause),
            AlterTableAction::TruncatePartition {
                names: vec!["sp0".to_string(), "sp1".to_string()],
                sub: true,
                update_global_indexes: false,
            }
        );
    }

    #[test]
    fn test_alter_index_visibility_and_parallel() {
        let visibility = tree::AlterTableClause::AlterIndexVisibility {
            name: "idx".to_string(),
            visibility: "INVISIBLE".to_string(),
        };
        assert_eq!(
            lower(visibility),
            AlterTableAction::AlterIndexVisibility {
                name: "idx".to_string(),
                visible: false,
            }
        );

        let noparallel = tree::AlterTableClause::AlterIndexParallel {
            name: "idx".to_string(),
            parallel: None,
        };
        assert_eq!(
            lower(noparallel),
            AlterTableAction::AlterIndexParallel {
                name: "idx".to_string(),
                parallel: None,
            }
        );
    }

    #[test]
    fn test_alter_check_state() {
        let clause = tree::AlterTableClause::AlterCheck {
            name: "ck".to_string(),
            state: tree::CheckState { not: true },
        };
        assert_eq!(
            lower(clause),
            AlterTableAction::ModifyConstraint {
                name: "ck".to_string(),
                state: ConstraintState::enforced(false),
            }
        );
    }

    #[test]
    fn test_unknown_partition_verb() {
        let clause = tree::AlterTableClause::Partition {
            verb: "COALESCE".to_string(),
            keyword: "PARTITION".to_string(),
            names: vec!["p0".to_string()],
        };
        assert!(matches!(
            MySQLAlterTableActionFactory.generate(&clause).unwrap_err(),
            Error::Unrecognized { rule: "partition action", .. }
        ));
    }
}
