//! Oracle ALTER TABLE clauses.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::expression::{lower_all, lower_column_ref, lower_expr};
use super::partition::{lower_element, lower_partition, lower_split_element, lower_sub_element};
use super::table_element::{
    lower_column_definition, lower_constraint, lower_constraint_state, VISIBILITY,
};
use super::table_options::lower_table_options;
use super::tree;
use crate::dialects::{lookup, phrase, DialectType, Factory};
use crate::error::{Error, Result};
use crate::statements::alter_table::{AlterTableAction, PartitionSplitActions};
use crate::statements::from::RelationFactor;
use crate::statements::table_element::ColumnGroupElement;

const DIALECT: DialectType = DialectType::Oracle;

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

/// `true` for `SUBPARTITION`
static PARTITION_LEVELS: Lazy<HashMap<&'static str, bool>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("PARTITION", false);
    m.insert("SUBPARTITION", true);
    m
});

#[derive(Clone, Copy)]
enum SplitPoint {
    /// `AT (...)` of a range partition
    Range,
    /// `VALUES (...)` of a list partition
    List,
}

static SPLIT_POINTS: Lazy<HashMap<&'static str, SplitPoint>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("AT", SplitPoint::Range);
    m.insert("VALUES", SplitPoint::List);
    m
});

static VALIDATIONS: Lazy<HashMap<&'static str, bool>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("WITH VALIDATION", true);
    m.insert("WITHOUT VALIDATION", false);
    m
});

static TRIGGER_SWITCHES: Lazy<HashMap<&'static str, bool>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("ENABLE", true);
    m.insert("DISABLE", false);
    m
});

pub struct OracleAlterTableActionFactory;

impl Factory for OracleAlterTableActionFactory {
    type Node = tree::AlterTableClause;
    type Output = AlterTableAction;

    fn dialect_type(&self) -> DialectType {
        DIALECT
    }

    fn generate(&self, node: &tree::AlterTableClause) -> Result<AlterTableAction> {
        let action = lower_clause(node)?;
        log::debug!("lowered oracle alter table clause: {}", action.kind());
        Ok(action)
    }
}

fn relation_factor(name: &tree::RelationName) -> RelationFactor {
    RelationFactor {
        user_variable: name.user_variable.clone(),
        reverse_link: name.reverse_link,
        ..RelationFactor::new(name.schema.as_deref(), &name.relation)
    }
}

fn lower_clause(node: &tree::AlterTableClause) -> Result<AlterTableAction> {
    use tree::AlterTableClause as Clause;

    let action = match node {
        Clause::TableOptions(options) => AlterTableAction::TableOptions(lower_table_options(options)?),
        Clause::RenameTable(name) => AlterTableAction::RenameTable(relation_factor(name)),
        Clause::Refresh => AlterTableAction::Refresh,
        // MOVE COMPRESS FOR OLTP -> "FOR OLTP"
        Clause::Move { compress: Some(tokens) } => AlterTableAction::MoveCompress(phrase(tokens)),
        Clause::Move { compress: None } => AlterTableAction::MoveNoCompress,
        Clause::SetInterval(interval) => {
            AlterTableAction::SetInterval(interval.as_ref().map(lower_expr).transpose()?)
        }
        Clause::AllTriggers(switch) => {
            if lookup(&TRIGGER_SWITCHES, DIALECT, "trigger switch", switch)? {
                AlterTableAction::EnableAllTriggers
            } else {
                AlterTableAction::DisableAllTriggers
            }
        }

        Clause::AddColumns(columns) => AlterTableAction::AddColumns(
            columns
                .iter()
                .map(lower_column_definition)
                .collect::<Result<Vec<_>>>()?,
        ),
        Clause::DropColumns { columns, option } => AlterTableAction::DropColumns {
            columns: columns.iter().map(lower_column_ref).collect(),
            option: option.clone(),
        },
        Clause::ModifyColumns(columns) => AlterTableAction::ModifyColumns(
            columns
                .iter()
                .map(lower_column_definition)
                .collect::<Result<Vec<_>>>()?,
        ),
        Clause::RenameColumn { from, to } => AlterTableAction::RenameColumn {
            from: lower_column_ref(from),
            to: to.clone(),
        },
        Clause::DropTableGroup => AlterTableAction::DropTableGroup,

        Clause::AddConstraint(constraint) => AlterTableAction::AddConstraint(lower_constraint(constraint)?),
        Clause::DropConstraint(name) => AlterTableAction::DropConstraint(vec![name.clone()]),
        Clause::DropPrimaryKey => AlterTableAction::DropPrimaryKey,
        Clause::ModifyPrimaryKey { columns, index } => {
            // index options follow the key directly, never behind USING INDEX
            if index.as_ref().map_or(false, |index| index.using_index) {
                return Err(Error::illegal(DIALECT, "MODIFY PRIMARY KEY does not take USING INDEX"));
            }
            AlterTableAction::ModifyPrimaryKey(lower_constraint(&tree::ConstraintDefinition {
                name: None,
                body: tree::ConstraintBody::PrimaryKey {
                    columns: columns.clone(),
                    index: index.clone(),
                },
            })?)
        }
        Clause::ModifyConstraint { name, state } => AlterTableAction::ModifyConstraint {
            name: name.clone(),
            state: lower_constraint_state(state)?,
        },
        Clause::AlterIndexVisibility { name, visibility } => AlterTableAction::AlterIndexVisibility {
            name: name.clone(),
            visible: lookup(&VISIBILITY, DIALECT, "index visibility", visibility)?,
        },

        Clause::Partition {
            verb,
            keyword,
            names,
            update_global_indexes,
        } => {
            let sub = lookup(&PARTITION_LEVELS, DIALECT, "partition level", keyword)?;
            let names = names.clone();
            let update_global_indexes = *update_global_indexes;
            match lookup(&PARTITION_VERBS, DIALECT, "partition action", verb)? {
                PartitionVerb::Drop => AlterTableAction::DropPartition {
                    names,
                    sub,
                    update_global_indexes,
                },
                PartitionVerb::Truncate => AlterTableAction::TruncatePartition {
                    names,
                    sub,
                    update_global_indexes,
                },
            }
        }
        Clause::AddPartitions(elements) => AlterTableAction::AddPartition(
            elements.iter().map(lower_element).collect::<Result<Vec<_>>>()?,
        ),
        Clause::AddSubPartitions { partition, elements } => AlterTableAction::AddSubPartition {
            partition: relation_factor(partition),
            elements: elements.iter().map(lower_sub_element).collect::<Result<Vec<_>>>()?,
        },
        Clause::SplitPartition {
            partition,
            keyword,
            values,
            into,
        } => {
            let values = lower_all(values)?;
            let mut actions = match lookup(&SPLIT_POINTS, DIALECT, "split point", keyword)? {
                SplitPoint::Range => PartitionSplitActions {
                    range_exprs: Some(values),
                    ..Default::default()
                },
                SplitPoint::List => PartitionSplitActions {
                    list_exprs: Some(values),
                    ..Default::default()
                },
            };
            actions.intos = into
                .as_deref()
                .map(|elements| elements.iter().map(lower_split_element).collect::<Result<Vec<_>>>())
                .transpose()?;
            AlterTableAction::SplitPartition {
                partition: relation_factor(partition),
                actions,
            }
        }
        Clause::RenamePartition { keyword, from, to } => AlterTableAction::RenamePartition {
            from: from.clone(),
            to: to.clone(),
            sub: lookup(&PARTITION_LEVELS, DIALECT, "partition level", keyword)?,
        },
        Clause::ModifyPartition(partition) => AlterTableAction::ModifyPartition(lower_partition(partition)?),
        Clause::ExchangePartition {
            name,
            table,
            validation,
        } => AlterTableAction::ExchangePartition {
            name: name.clone(),
            table: relation_factor(table),
            with_validation: if validation.is_empty() {
                None
            } else {
                Some(lookup(&VALIDATIONS, DIALECT, "validation option", &phrase(validation))?)
            },
        },

        Clause::AddColumnGroup(groups) => AlterTableAction::AddColumnGroup(lower_column_groups(groups)),
        Clause::DropColumnGroup(groups) => AlterTableAction::DropColumnGroup(lower_column_groups(groups)),
    };
    Ok(action)
}

fn lower_column_groups(groups: &[tree::ColumnGroupNode]) -> Vec<ColumnGroupElement> {
    groups
        .iter()
        .map(|group| match group {
            tree::ColumnGroupNode::AllColumns => ColumnGroupElement::AllColumns,
            tree::ColumnGroupNode::EachColumn => ColumnGroupElement::EachColumn,
            tree::ColumnGroupNode::Custom { name, columns } => ColumnGroupElement::Custom {
                name: name.clone(),
                columns: columns.clone(),
            },
        })
        .collect()
}
