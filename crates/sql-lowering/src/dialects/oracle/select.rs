//! Oracle query blocks.
//!
//! Set operations flatten into the [`SelectBody::related_select`] chain the
//! same way as MySQL. Hierarchical clauses sit on the block they were written
//! in. ORDER BY, FETCH and FOR UPDATE after a chain go on its last block.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::expression::{lower_all, lower_column_ref, lower_expr, lower_order_by};
use super::from_reference::OracleFromReferenceFactory;
use super::tree;
use crate::dialects::{lookup, phrase, DialectType, Factory};
use crate::error::Result;
use crate::statements::select::{
    Fetch, FetchAddition, FetchDirection, FetchType, ForUpdate, GroupBy, OrderBy, Projection, RelationType,
    SelectBody, WaitOption, WithTable,
};

const DIALECT: DialectType = DialectType::Oracle;

static SET_TYPES: Lazy<HashMap<&'static str, RelationType>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("UNION", RelationType::Union);
    m.insert("UNION ALL", RelationType::UnionAll);
    m.insert("INTERSECT", RelationType::Intersect);
    m.insert("MINUS", RelationType::Minus);
    // EXCEPT -> MINUS
    m.insert("EXCEPT", RelationType::Minus);
    m
});

static FETCH_DIRECTIONS: Lazy<HashMap<&'static str, FetchDirection>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("FIRST", FetchDirection::First);
    m.insert("NEXT", FetchDirection::Next);
    m
});

static FETCH_ADDITIONS: Lazy<HashMap<&'static str, FetchAddition>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("ONLY", FetchAddition::Only);
    m.insert("WITH TIES", FetchAddition::WithTies);
    m
});

static WAIT_OPTIONS: Lazy<HashMap<&'static str, WaitOption>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("WAIT", WaitOption::Wait);
    m.insert("NOWAIT", WaitOption::Nowait);
    m.insert("SKIP LOCKED", WaitOption::SkipLocked);
    m
});

pub struct OracleSelectFactory;

impl Factory for OracleSelectFactory {
    type Node = tree::SelectStmt;
    type Output = SelectBody;

    fn dialect_type(&self) -> DialectType {
        DIALECT
    }

    fn generate(&self, node: &tree::SelectStmt) -> Result<SelectBody> {
        log::trace!("lowering oracle select");
        lower_select(node)
    }
}

fn lower_select(stmt: &tree::SelectStmt) -> Result<SelectBody> {
    let mut body = lower_query(&stmt.body)?;
    if let Some(with) = &stmt.with {
        body.recursive = with.recursive;
        body.with = with
            .tables
            .iter()
            .map(|cte| {
                let mut table = WithTable::new(cte.name.clone(), lower_select(&cte.query)?);
                table.alias_list = cte.columns.clone();
                Ok(table)
            })
            .collect::<Result<Vec<_>>>()?;
    }

    let last = body.last_mut();
    if let Some(order_by) = &stmt.order_by {
        last.order_by = lower_order_by_clause(order_by)?;
    }
    if let Some(fetch) = &stmt.fetch {
        last.fetch = Some(lower_fetch(fetch)?);
    }
    if let Some(for_update) = &stmt.for_update {
        last.for_update = Some(lower_for_update(for_update)?);
    }
    Ok(body)
}

fn lower_query(query: &tree::QueryExpr) -> Result<SelectBody> {
    match query {
        tree::QueryExpr::Simple(select) => lower_simple(select),
        tree::QueryExpr::Parens(inner) => lower_select(inner),
        tree::QueryExpr::SetOp {
            left,
            set_type,
            right,
        } => {
            let relation = lookup(&SET_TYPES, DIALECT, "set operator", &phrase(set_type))?;
            let mut body = lower_query(left)?;
            body.chain(relation, lower_query(right)?);
            Ok(body)
        }
    }
}

fn lower_simple(select: &tree::SimpleSelect) -> Result<SelectBody> {
    let projections = select
        .projections
        .iter()
        .map(|item| match item {
            tree::SelectItem::Star => Ok(Projection::star()),
            tree::SelectItem::Expr { expr, alias } => {
                Ok(Projection::new(lower_expr(expr)?, alias.as_deref()))
            }
        })
        .collect::<Result<Vec<_>>>()?;
    let froms = select
        .from
        .iter()
        .map(|t| OracleFromReferenceFactory.generate(t))
        .collect::<Result<Vec<_>>>()?;

    let mut body = SelectBody::new(projections, froms);
    if !select.options.is_empty() {
        body.query_options = Some(phrase(&select.options));
    }
    body.r#where = select.r#where.as_ref().map(lower_expr).transpose()?;
    if let Some(hierarchy) = &select.hierarchy {
        body.start_with = hierarchy.start_with.as_ref().map(lower_expr).transpose()?;
        body.connect_by = Some(lower_expr(&hierarchy.connect_by)?);
        body.nocycle = hierarchy.nocycle;
    }
    body.group_by = select
        .group_by
        .iter()
        .map(lower_grouping)
        .collect::<Result<Vec<_>>>()?;
    body.having = select.having.as_ref().map(lower_expr).transpose()?;
    Ok(body)
}

fn lower_grouping(element: &tree::GroupingElement) -> Result<GroupBy> {
    match element {
        tree::GroupingElement::Expr(expr) => Ok(GroupBy::General(lower_expr(expr)?)),
        tree::GroupingElement::GroupingSets(sets) => Ok(GroupBy::GroupingSets(
            sets.iter().map(lower_grouping).collect::<Result<Vec<_>>>()?,
        )),
        tree::GroupingElement::Rollup(items) => Ok(GroupBy::Rollup(lower_all(items)?)),
        tree::GroupingElement::Cube(items) => Ok(GroupBy::Cube(lower_all(items)?)),
    }
}

fn lower_order_by_clause(clause: &tree::OrderByClause) -> Result<Option<OrderBy>> {
    let mut order_by = lower_order_by(&clause.items)?;
    if let Some(order_by) = order_by.as_mut() {
        order_by.siblings = clause.siblings;
    }
    Ok(order_by)
}

/// `OFFSET n ROWS` alone reads as `FETCH FIRST ROWS ONLY`
fn lower_fetch(clause: &tree::FetchClause) -> Result<Fetch> {
    let direction = clause
        .direction
        .as_deref()
        .map(|d| lookup(&FETCH_DIRECTIONS, DIALECT, "fetch direction", d))
        .transpose()?
        .unwrap_or(FetchDirection::First);
    let addition = if clause.addition.is_empty() {
        FetchAddition::Only
    } else {
        lookup(&FETCH_ADDITIONS, DIALECT, "fetch addition", &phrase(&clause.addition))?
    };
    Ok(Fetch {
        fetch: clause.count.as_ref().map(lower_expr).transpose()?,
        direction,
        fetch_type: if clause.percent { FetchType::Percent } else { FetchType::Count },
        addition,
        offset: clause.offset.as_ref().map(lower_expr).transpose()?,
    })
}

fn lower_for_update(clause: &tree::ForUpdateClause) -> Result<ForUpdate> {
    let wait_option = if clause.wait.is_empty() {
        None
    } else {
        Some(lookup(&WAIT_OPTIONS, DIALECT, "wait option", &phrase(&clause.wait))?)
    };
    Ok(ForUpdate {
        columns: clause.columns.iter().map(lower_column_ref).collect(),
        wait_option,
        wait_num: clause.wait_num.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::expressions::{ColumnReference, Expression, Operator};
    use crate::statements::from::{FromReference, NameReference};
    use crate::statements::select::SortKey;

    fn block(label: &str) -> tree::QueryExpr {
        tree::QueryExpr::Simple(Box::new(tree::SimpleSelect {
            projections: vec![tree::SelectItem::expr(tree::Expr::literal(label), None)],
            ..Default::default()
        }))
    }

    fn lowered_block(label: &str) -> SelectBody {
        SelectBody::new(vec![Projection::new(Expression::constant(label), None)], vec![])
    }

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_dual_is_an_ordinary_table() {
        let stmt = tree::SelectStmt::simple(tree::SimpleSelect {
            projections: vec![tree::SelectItem::Star],
            from: vec![tree::TableReference::table("dual", None)],
            ..Default::default()
        });
        let body = OracleSelectFactory.generate(&stmt).unwrap();
        assert_eq!(
            body,
            SelectBody::new(
                vec![Projection::star()],
                vec![FromReference::from(NameReference::new(None, "dual", None))]
            )
        );
    }

    #[test]
    fn test_except_is_minus_and_union_all_chains() {
        let query = tree::QueryExpr::SetOp {
            left: Box::new(tree::QueryExpr::SetOp {
                left: Box::new(block("1")),
                set_type: tokens("union all"),
                right: Box::new(block("2")),
            }),
            set_type: tokens("except"),
            right: Box::new(block("3")),
        };
        let body = OracleSelectFactory.generate(&tree::SelectStmt::new(query)).unwrap();
        let mut expected = lowered_block("1");
        expected.chain(RelationType::UnionAll, lowered_block("2"));
        expected.chain(RelationType::Minus, lowered_block("3"));
        assert_eq!(body, expected);
    }

    #[test]
    fn test_union_distinct_is_not_oracle() {
        let query = tree::QueryExpr::SetOp {
            left: Box::new(block("1")),
            set_type: tokens("UNION DISTINCT"),
            right: Box::new(block("2")),
        };
        assert!(matches!(
            OracleSelectFactory.generate(&tree::SelectStmt::new(query)).unwrap_err(),
            Error::Unrecognized { rule: "set operator", .. }
        ));
    }

    #[test]
    fn test_hierarchical_query() {
        let stmt = tree::SelectStmt::simple(tree::SimpleSelect {
            projections: vec![tree::SelectItem::Star],
            from: vec![tree::TableReference::table("emp", None)],
            hierarchy: Some(tree::Hierarchy {
                start_with: Some(tree::Expr::is(tree::Expr::path(&["mgr"]), false, "NULL")),
                connect_by: tree::Expr::binary(
                    tree::Expr::unary("PRIOR", tree::Expr::path(&["id"])),
                    "=",
                    tree::Expr::path(&["mgr"]),
                ),
                nocycle: true,
            }),
            ..Default::default()
        });
        let body = OracleSelectFactory.generate(&stmt).unwrap();
        assert!(body.nocycle);
        assert_eq!(
            body.start_with,
            Some(Expression::binary(Expression::relation("mgr"), Expression::Null, Operator::Eq))
        );
        assert_eq!(
            body.connect_by,
            Some(Expression::binary(
                Expression::unary(Expression::relation("id"), Operator::Prior),
                Expression::relation("mgr"),
                Operator::Eq
            ))
        );
    }

    #[test]
    fn test_order_siblings_and_fetch_on_last_block() {
        let mut stmt = tree::SelectStmt::new(tree::QueryExpr::SetOp {
            left: Box::new(block("1")),
            set_type: tokens("UNION"),
            right: Box::new(block("2")),
        });
        stmt.order_by = Some(tree::OrderByClause {
            siblings: true,
            items: vec![tree::SortItem::new(tree::Expr::literal("1"), Some("DESC"))],
        });
        stmt.fetch = Some(tree::FetchClause {
            offset: Some(tree::Expr::literal("5")),
            direction: Some("next".to_string()),
            count: Some(tree::Expr::literal("10")),
            percent: true,
            addition: tokens("WITH TIES"),
        });
        let body = OracleSelectFactory.generate(&stmt).unwrap();
        assert!(body.order_by.is_none());
        assert!(body.fetch.is_none());

        let last = body.last();
        let mut order_by = OrderBy::new(vec![SortKey::new(
            Expression::constant("1"),
            Some(crate::statements::select::SortDirection::Desc),
        )]);
        order_by.siblings = true;
        assert_eq!(last.order_by, Some(order_by));
        assert_eq!(
            last.fetch,
            Some(Fetch {
                fetch: Some(Expression::constant("10")),
                direction: FetchDirection::Next,
                fetch_type: FetchType::Percent,
                addition: FetchAddition::WithTies,
                offset: Some(Expression::constant("5")),
            })
        );
    }

    #[test]
    fn test_offset_without_fetch_count() {
        let mut stmt = tree::SelectStmt::simple(tree::SimpleSelect {
            projections: vec![tree::SelectItem::Star],
            ..Default::default()
        });
        stmt.fetch = Some(tree::FetchClause {
            offset: Some(tree::Expr::literal("5")),
            ..Default::default()
        });
        let fetch = OracleSelectFactory.generate(&stmt).unwrap().fetch.unwrap();
        assert_eq!(fetch.fetch, None);
        assert_eq!(fetch.direction, FetchDirection::First);
        assert_eq!(fetch.addition, FetchAddition::Only);
    }

    #[test]
    fn test_grouping_sets_rollup_cube() {
        let a = || tree::Expr::path(&["a"]);
        let stmt = tree::SelectStmt::simple(tree::SimpleSelect {
            projections: vec![tree::SelectItem::Star],
            group_by: vec![
                tree::GroupingElement::Expr(a()),
                tree::GroupingElement::GroupingSets(vec![
                    tree::GroupingElement::Rollup(vec![a()]),
                    tree::GroupingElement::Cube(vec![a()]),
                ]),
            ],
            ..Default::default()
        });
        let body = OracleSelectFactory.generate(&stmt).unwrap();
        assert_eq!(
            body.group_by,
            vec![
                GroupBy::General(Expression::relation("a")),
                GroupBy::GroupingSets(vec![
                    GroupBy::Rollup(vec![Expression::relation("a")]),
                    GroupBy::Cube(vec![Expression::relation("a")]),
                ]),
            ]
        );
    }

    #[test]
    fn test_for_update_of_columns_wait() {
        let mut stmt = tree::SelectStmt::simple(tree::SimpleSelect {
            projections: vec![tree::SelectItem::Star],
            ..Default::default()
        });
        stmt.for_update = Some(tree::ForUpdateClause {
            columns: vec![tree::ColumnRef::new(Some("t"), "c")],
            wait: vec!["WAIT".to_string()],
            wait_num: Some("3".to_string()),
        });
        let for_update = OracleSelectFactory.generate(&stmt).unwrap().for_update.unwrap();
        assert_eq!(for_update.columns, vec![ColumnReference::new(None, Some("t"), "c")]);
        assert_eq!(for_update.wait_option, Some(WaitOption::Wait));
        assert_eq!(for_update.wait_num.as_deref(), Some("3"));
    }

    #[test]
    fn test_with_clause() {
        let inner = tree::SelectStmt::simple(tree::SimpleSelect {
            projections: vec![tree::SelectItem::Star],
            from: vec![tree::TableReference::table("t", None)],
            ..Default::default()
        });
        let mut stmt = inner.clone();
        stmt.with = Some(tree::WithClause {
            recursive: false,
            tables: vec![tree::CommonTableExpr {
                name: "w".to_string(),
                columns: vec!["a".to_string(), "b".to_string()],
                query: inner,
            }],
        });
        let body = OracleSelectFactory.generate(&stmt).unwrap();
        assert!(!body.recursive);
        assert_eq!(body.with[0].alias, "w");
        assert_eq!(body.with[0].alias_list, vec!["a".to_string(), "b".to_string()]);
    }
}
