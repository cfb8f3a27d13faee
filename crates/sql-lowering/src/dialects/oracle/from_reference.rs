//! Oracle FROM-list items: tables with flashback and PIVOT/UNPIVOT, inline
//! views, `TABLE(...)`, `JSON_TABLE(...)` and joins.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::expression::{lower_all, lower_call, lower_column_ref, lower_expr, lower_json_table};
use super::select::OracleSelectFactory;
use super::tree;
use crate::dialects::{lookup, phrase, DialectType, Factory};
use crate::error::{Error, Result};
use crate::expressions::{ColumnReference, Expression};
use crate::statements::from::{
    ExpressionItem, ExpressionReference, FlashbackType, FlashbackUsage, FromReference, FunctionItem, InItem,
    JoinCondition, JoinReference, JoinType, NameReference, PartitionType, PartitionUsage, Pivot, UnPivot,
};

const DIALECT: DialectType = DialectType::Oracle;

static JOIN_TYPES: Lazy<HashMap<&'static str, JoinType>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("JOIN", JoinType::Join);
    m.insert("INNER JOIN", JoinType::InnerJoin);
    m.insert("CROSS JOIN", JoinType::CrossJoin);
    m.insert("LEFT JOIN", JoinType::LeftJoin);
    m.insert("LEFT OUTER JOIN", JoinType::LeftOuterJoin);
    m.insert("RIGHT JOIN", JoinType::RightJoin);
    m.insert("RIGHT OUTER JOIN", JoinType::RightOuterJoin);
    m.insert("FULL JOIN", JoinType::FullJoin);
    m.insert("FULL OUTER JOIN", JoinType::FullOuterJoin);
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

static FLASHBACK_TYPES: Lazy<HashMap<&'static str, FlashbackType>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("AS OF SCN", FlashbackType::AsOfScn);
    m.insert("AS OF TIMESTAMP", FlashbackType::AsOfTimestamp);
    m
});

static PARTITION_TYPES: Lazy<HashMap<&'static str, PartitionType>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("PARTITION", PartitionType::Partition);
    m.insert("SUBPARTITION", PartitionType::SubPartition);
    m
});

/// `true` when nulls are kept
static UNPIVOT_NULLS: Lazy<HashMap<&'static str, bool>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("INCLUDE NULLS", true);
    m.insert("EXCLUDE NULLS", false);
    m
});

pub struct OracleFromReferenceFactory;

impl Factory for OracleFromReferenceFactory {
    type Node = tree::TableReference;
    type Output = FromReference;

    fn dialect_type(&self) -> DialectType {
        DIALECT
    }

    fn generate(&self, node: &tree::TableReference) -> Result<FromReference> {
        log::trace!("lowering oracle table reference");
        lower_reference(node)
    }
}

fn lower_reference(node: &tree::TableReference) -> Result<FromReference> {
    match node {
        tree::TableReference::Table(table) => lower_table(table).map(FromReference::from),
        tree::TableReference::Subquery {
            query,
            alias,
            flashback,
            transpose,
            with_check_option,
        } => {
            let mut select = OracleSelectFactory.generate(query)?;
            select.with_check_option = *with_check_option;
            let mut reference = ExpressionReference::new(Expression::subquery(select), alias.as_deref());
            reference.flashback_usage = flashback.as_ref().map(lower_flashback).transpose()?;
            match transpose {
                Some(tree::Transpose::Pivot(pivot)) => reference.pivot = Some(lower_pivot(pivot)?),
                Some(tree::Transpose::Unpivot(unpivot)) => reference.unpivot = Some(lower_unpivot(unpivot)?),
                None => {}
            }
            Ok(reference.into())
        }
        tree::TableReference::TableFunction { expr, alias } => {
            Ok(ExpressionReference::new(lower_expr(expr)?, alias.as_deref()).into())
        }
        tree::TableReference::JsonTable { table, alias } => {
            Ok(ExpressionReference::new(lower_json_table(table)?, alias.as_deref()).into())
        }
        tree::TableReference::Parens(inner) => lower_reference(inner),
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
        Some(tree::PartitionUse::Names { keyword, names }) => Some(PartitionUsage::names(
            lookup(&PARTITION_TYPES, DIALECT, "partition usage", keyword)?,
            names.clone(),
        )),
        // PARTITION FOR (v1, v2)
        Some(tree::PartitionUse::For { keyword, values }) => Some(PartitionUsage::for_values(
            lookup(&PARTITION_TYPES, DIALECT, "partition usage", keyword)?,
            lower_all(values)?,
        )),
        None => None,
    };
    reference.flashback_usage = table.flashback.as_ref().map(lower_flashback).transpose()?;
    match &table.transpose {
        Some(tree::Transpose::Pivot(pivot)) => reference.pivot = Some(lower_pivot(pivot)?),
        Some(tree::Transpose::Unpivot(unpivot)) => reference.unpivot = Some(lower_unpivot(unpivot)?),
        None => {}
    }
    Ok(reference)
}

fn lower_flashback(flashback: &tree::Flashback) -> Result<FlashbackUsage> {
    Ok(FlashbackUsage {
        kind: lookup(&FLASHBACK_TYPES, DIALECT, "flashback", &phrase(&flashback.kind))?,
        value: lower_expr(&flashback.value)?,
    })
}

fn columns(names: &[String]) -> Vec<ColumnReference> {
    names.iter().map(|n| ColumnReference::new(None, None, n)).collect()
}

fn lower_pivot(pivot: &tree::PivotClause) -> Result<Pivot> {
    let aggregates = pivot
        .aggregates
        .iter()
        .map(|aggregate| {
            Ok(FunctionItem {
                function: lower_call(&aggregate.call)?,
                alias: aggregate.alias.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let in_items = pivot
        .in_items
        .iter()
        .map(|item| {
            Ok(ExpressionItem {
                expression: lower_expr(&item.expr)?,
                alias: item.alias.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Pivot {
        aggregates,
        for_columns: columns(&pivot.for_columns),
        in_items,
        alias: pivot.alias.clone(),
    })
}

fn lower_unpivot(unpivot: &tree::UnpivotClause) -> Result<UnPivot> {
    let include_nulls = if unpivot.nulls.is_empty() {
        false
    } else {
        lookup(&UNPIVOT_NULLS, DIALECT, "unpivot nulls", &phrase(&unpivot.nulls))?
    };
    let in_items = unpivot
        .in_items
        .iter()
        .map(|item| {
            Ok(InItem {
                columns: columns(&item.columns),
                as_expression: item.value.as_ref().map(lower_expr).transpose()?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(UnPivot {
        include_nulls,
        unpivot_columns: columns(&unpivot.columns),
        for_columns: columns(&unpivot.for_columns),
        in_items,
        alias: unpivot.alias.clone(),
    })
}
