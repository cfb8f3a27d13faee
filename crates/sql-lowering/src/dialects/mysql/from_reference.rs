//! MySQL FROM-list items and joins.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::expression::{lower_column_ref, lower_expr, lower_json_table};
use super::select::MySQLSelectFactory;
use super::tree;
use crate::dialects::{lookup, phrase, DialectType, Factory};
use crate::error::{Error, Result};
use crate::expressions::Expression;
use crate::statements::from::{
    BraceReference, ExpressionReference, ExternalPartition, FlashbackType, FlashbackUsage,
    FromReference, JoinCondition, JoinReference, JoinType, NameReference, PartitionType,
    PartitionUsage,
};

const DIALECT: DialectType = DialectType::MySQL;

static JOIN_TYPES: Lazy<HashMap<&'static str, JoinType>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("JOIN", JoinType::Join);
    m.insert("INNER JOIN", JoinType::InnerJoin);
    m.insert("CROSS JOIN", JoinType::CrossJoin);
    m.insert("STRAIGHT_JOIN", JoinType::StraightJoin);
    m.insert("LEFT JOIN", JoinType::LeftJoin);
    m.insert("LEFT OUTER JOIN", JoinType::LeftOuterJoin);
    m.insert("RIGHT JOIN", JoinType::RightJoin);
    m.insert("RIGHT OUTER JOIN", JoinType::RightOuterJoin);
    m.insert("FULL JOIN", JoinType::FullJoin);
    m.insert("FULL OUTER JOIN", JoinType::FullOuterJoin);
    m.insert("OUTER JOIN", JoinType::OuterJoin);
    m.insert("NATURAL JOIN", JoinType::NaturalJoin);
    m.insert("NATURAL INNER JOIN", JoinType::NaturalInnerJoin);
    m.insert("NATURAL LEFT JOIN", JoinType::NaturalLeftJoin);
    m.insert("NATURAL LEFT OUTER JOIN", JoinType::NaturalLeftOuterJoin);
    m.insert("NATURAL RIGHT JOIN", JoinType::NaturalRightJoin);
    m.insert("NATURAL RIGHT OUTER JOIN", JoinType::NaturalRightOuterJoin);
    m.insert("NATURAL FULL JOIN", JoinType::NaturalFullJoin);
    m.insert("NATURAL FULL OUTER JOIN", JoinType::NaturalFullOuterJoin);
    m
});

pub struct MySQLFromReferenceFactory;

impl Factory for MySQLFromReferenceFactory {
    type Node = tree::TableReference;
    type Output = FromReference;

    fn dialect_type(&self) -> DialectType {
        DIALECT
    }

    fn generate(&self, node: &tree::TableReference) -> Result<FromReference> {
        log::trace!("lowering mysql table reference");
        lower_reference(node)
    }
}

fn lower_reference(node: &tree::TableReference) -> Result<FromReference> {
    match node {
        tree::TableReference::Table(table) => lower_table(table).map(FromReference::from),
        tree::TableReference::Subquery {
            query,
            alias,
            alias_columns,
            lateral,
            snapshot,
        } => {
            let select = MySQLSelectFactory.generate(query)?;
            let mut reference = ExpressionReference::new(Expression::subquery(select), alias.as_deref());
            reference.alias_columns = alias_columns.clone();
            reference.lateral = *lateral;
            reference.flashback_usage = snapshot.as_ref().map(lower_snapshot).transpose()?;
            Ok(reference.into())
        }
        tree::TableReference::JsonTable { table, alias } => {
            Ok(ExpressionReference::new(lower_json_table(table)?, alias.as_deref()).into())
        }
        tree::TableReference::TableFunction { expr, alias } => {
            Ok(ExpressionReference::new(lower_expr(expr)?, alias.as_deref()).into())
        }
        tree::TableReference::Parens(inner) => lower_reference(inner),
        tree::TableReference::Brace { name, reference } => {
            Ok(FromReference::Brace(Box::new(BraceReference {
                name: name.clone(),
                reference: lower_reference(reference)?,
            })))
        }
        tree::TableReference::Join {
            left,
            join_type,
            right,
            condition,
        } => {
            let written = phrase(join_type);
            let kind = lookup(&JOIN_TYPES, DIALECT, "join type", &written)?;
            if condition.is_some() && (kind.is_natural() || kind == JoinType::CrossJoin) {
                return Err(Error::illegal(DIALECT, format!("{} with a join condition", written)));
            }
            let condition = match condition {
                Some(tree::JoinOn::On(expr)) => Some(JoinCondition::On(lower_expr(expr)?)),
                Some(tree::JoinOn::Using(columns)) => Some(JoinCondition::Using(
                    columns.iter().map(lower_column_ref).collect(),
                )),
                None => None,
            };
            Ok(JoinReference::new(lower_reference(left)?, lower_reference(right)?, kind, condition).into())
        }
    }
}

fn lower_table(table: &tree::TableName) -> Result<NameReference> {
    let mut reference = NameReference::new(
        table.name.schema.as_deref(),
        &table.name.relation,
        table.alias.as_deref(),
    );
    reference.user_variable = table.name.user_variable.clone();
    reference.partition_usage = match &table.partition {
        Some(tree::PartitionUse::Names(names)) => {
            Some(PartitionUsage::names(PartitionType::Partition, names.clone()))
        }
        // PARTITION (k = v) on an external table
        Some(tree::PartitionUse::External(values)) => {
            let mut usage = PartitionUsage::names(PartitionType::Partition, Vec::new());
            usage.external_partitions = values
                .iter()
                .map(|(name, value)| {
                    Ok(ExternalPartition {
                        name: name.clone(),
                        value: lower_expr(value)?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Some(usage)
        }
        None => None,
    };
    reference.flashback_usage = table.snapshot.as_ref().map(lower_snapshot).transpose()?;
    Ok(reference)
}

fn lower_snapshot(value: &tree::Expr) -> Result<FlashbackUsage> {
    Ok(FlashbackUsage {
        kind: FlashbackType::AsOfSnapshot,
        value: lower_expr(value)?,
    })
}
