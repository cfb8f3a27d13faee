//! MySQL query blocks.
//!
//! A set-operation tree `a UNION b EXCEPT c` is flattened into the forward
//! chain of [`SelectBody::related_select`]. ORDER BY, LIMIT and locking
//! clauses written after the chain land on its last block.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::expression::{lower_all, lower_expr, lower_order_by, lower_sort_key, lower_window_spec};
use super::from_reference::MySQLFromReferenceFactory;
use super::tree;
use crate::dialects::{lookup, phrase, DialectType, Factory};
use crate::error::Result;
use crate::expressions::Expression;
use crate::statements::from::{FromReference, NameReference};
use crate::statements::select::{
    ForUpdate, GroupBy, Limit, Projection, RelationType, SelectBody, WaitOption, Window, WithTable,
};

const DIALECT: DialectType = DialectType::MySQL;

static SET_TYPES: Lazy<HashMap<&'static str, RelationType>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("UNION", RelationType::Union);
    m.insert("UNION ALL", RelationType::UnionAll);
    m.insert("UNION DISTINCT", RelationType::UnionDistinct);
    m.insert("UNION UNIQUE", RelationType::UnionUnique);
    m.insert("INTERSECT", RelationType::Intersect);
    m.insert("MINUS", RelationType::Minus);
    // EXCEPT -> MINUS
    m.insert("EXCEPT", RelationType::Minus);
    m
});

static WAIT_OPTIONS: Lazy<HashMap<&'static str, WaitOption>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("WAIT", WaitOption::Wait);
    m.insert("NOWAIT", WaitOption::Nowait);
    m.insert("NO_WAIT", WaitOption::Nowait);
    m.insert("SKIP LOCKED", WaitOption::SkipLocked);
    m
});

pub struct MySQLSelectFactory;

impl Factory for MySQLSelectFactory {
    type Node = tree::SelectStmt;
    type Output = SelectBody;

    fn dialect_type(&self) -> DialectType {
        DIALECT
    }

    fn generate(&self, node: &tree::SelectStmt) -> Result<SelectBody> {
        log::trace!("lowering mysql select");
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
    if let Some(order_by) = lower_order_by(&stmt.order_by)? {
        last.order_by = Some(order_by);
    }
    if let Some(limit) = &stmt.limit {
        last.limit = Some(lower_limit(limit)?);
    }
    if let Some(for_update) = &stmt.for_update {
        last.for_update = Some(lower_for_update(for_update)?);
    }
    if stmt.lock_in_share_mode {
        last.lock_in_share_mode = true;
    }
    Ok(body)
}

fn lower_query(query: &tree::QueryExpr) -> Result<SelectBody> {
    match query {
        tree::QueryExpr::Simple(select) => lower_simple(select),
        tree::QueryExpr::Values(rows) => {
            let rows = rows
                .iter()
                .map(|row| lower_all(row))
                .collect::<Result<Vec<_>>>()?;
            Ok(SelectBody::values(rows))
        }
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

    let froms = match &select.from {
        tree::FromClause::None => Vec::new(),
        tree::FromClause::Dual(keyword) => {
            vec![FromReference::from(NameReference::new(None, keyword, None))]
        }
        tree::FromClause::Tables(tables) => tables
            .iter()
            .map(|t| MySQLFromReferenceFactory.generate(t))
            .collect::<Result<Vec<_>>>()?,
    };

    let mut body = SelectBody::new(projections, froms);
    if !select.options.is_empty() {
        body.query_options = Some(phrase(&select.options));
    }
    body.r#where = select.r#where.as_ref().map(lower_expr).transpose()?;
    body.group_by = select
        .group_by
        .iter()
        .map(|item| lower_sort_key(item).map(GroupBy::SortKey))
        .collect::<Result<Vec<_>>>()?;
    body.with_rollup = select.with_rollup;
    body.having = select.having.as_ref().map(lower_expr).transpose()?;
    body.windows = select
        .windows
        .iter()
        .map(|w| {
            Ok(Window {
                name: w.name.clone(),
                spec: lower_window_spec(&w.spec)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    body.order_by = lower_order_by(&select.order_by)?;
    body.limit = select.limit.as_ref().map(lower_limit).transpose()?;
    Ok(body)
}

fn lower_limit(limit: &tree::LimitClause) -> Result<Limit> {
    let mut lowered = Limit::new(lower_expr(&limit.row_count)?);
    lowered.offset = limit.offset.as_ref().map(lower_expr).transpose()?;
    Ok(lowered)
}

fn lower_for_update(clause: &tree::ForUpdateClause) -> Result<ForUpdate> {
    let wait_option = if clause.wait.is_empty() {
        None
    } else {
        Some(lookup(&WAIT_OPTIONS, DIALECT, "wait option", &phrase(&clause.wait))?)
    };
    Ok(ForUpdate {
        columns: Vec::new(),
        wait_option,
        wait_num: clause.wait_num.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expressions::Operator;
    use crate::statements::select::OrderBy;

    fn block(label: &str) -> tree::QueryExpr {
        tree::QueryExpr::Simple(Box::new(tree::SimpleSelect {
            projections: vec![tree::SelectItem::expr(tree::Expr::literal(label), None)],
            ..Default::default()
        }))
    }

    fn lowered_block(label: &str) -> SelectBody {
        SelectBody::new(vec![Projection::new(Expression::constant(label), None)], vec![])
    }

    #[test]
    fn test_set_chain_flattens_in_source_order() {
        let query = tree::QueryExpr::SetOp {
            left: Box::new(tree::QueryExpr::SetOp {
                left: Box::new(block("1")),
                set_type: vec!["union".to_string(), "all".to_string()],
                right: Box::new(block("2")),
            }),
            set_type: vec!["EXCEPT".to_string()],
            right: Box::new(block("3")),
        };
        let body = MySQLSelectFactory
            .generate(&tree::SelectStmt::new(query))
            .unwrap();

        let mut expected = lowered_block("1");
        expected.chain(RelationType::UnionAll, lowered_block("2"));
        expected.chain(RelationType::Minus, lowered_block("3"));
        assert_eq!(body, expected);
        assert_eq!(body.chain_len(), 3);
    }

    #[test]
    fn test_trailing_clauses_go_on_last_block() {
        let mut stmt = tree::SelectStmt::new(tree::QueryExpr::SetOp {
            left: Box::new(block("1")),
            set_type: vec!["UNION".to_string()],
            right: Box::new(block("2")),
        });
        stmt.order_by = vec![tree::SortItem::new(tree::Expr::literal("1"), None)];
        stmt.limit = Some(tree::LimitClause {
            row_count: tree::Expr::literal("10"),
            offset: None,
        });
        let body = MySQLSelectFactory.generate(&stmt).unwrap();
        assert!(body.order_by.is_none());
        assert!(body.limit.is_none());
        let last = body.last();
        assert_eq!(
            last.order_by,
            Some(OrderBy::new(vec![crate::statements::select::SortKey::new(
                Expression::constant("1"),
                None
            )]))
        );
        assert_eq!(last.limit, Some(Limit::new(Expression::constant("10"))));
    }

    #[test]
    fn test_dual_only_when_written() {
        let mut select = tree::SimpleSelect {
            projections: vec![tree::SelectItem::Star],
            ..Default::default()
        };
        let body = MySQLSelectFactory
            .generate(&tree::SelectStmt::simple(select.clone()))
            .unwrap();
        assert!(body.froms.is_empty());

        select.from = tree::FromClause::Dual("dual".to_string());
        let body = MySQLSelectFactory
            .generate(&tree::SelectStmt::simple(select))
            .unwrap();
        assert_eq!(
            body.froms,
            vec![FromReference::from(NameReference::new(None, "dual", None))]
        );
    }

    #[test]
    fn test_qualified_star_union_distinct() {
        let left = tree::QueryExpr::Simple(Box::new(tree::SimpleSelect {
            projections: vec![tree::SelectItem::expr(tree::Expr::column(Some("col"), "*"), Some("abc"))],
            from: tree::FromClause::Dual("dual".to_string()),
            ..Default::default()
        }));
        let right = tree::QueryExpr::Simple(Box::new(tree::SimpleSelect {
            projections: vec![tree::SelectItem::Star],
            from: tree::FromClause::Dual("dual".to_string()),
            ..Default::default()
        }));
        let stmt = tree::SelectStmt::new(tree::QueryExpr::SetOp {
            left: Box::new(left),
            set_type: vec!["union".to_string(), "distinct".to_string()],
            right: Box::new(right),
        });
        let body = MySQLSelectFactory.generate(&stmt).unwrap();

        let dual = vec![FromReference::from(NameReference::new(None, "dual", None))];
        let mut expected = SelectBody::new(
            vec![Projection::new(Expression::column(None, Some("col"), "*"), Some("abc"))],
            dual.clone(),
        );
        expected.chain(RelationType::UnionDistinct, SelectBody::new(vec![Projection::star()], dual));
        assert_eq!(body, expected);
    }

    #[test]
    fn test_values_rows_keep_default() {
        let stmt = tree::SelectStmt::new(tree::QueryExpr::Values(vec![vec![
            tree::Expr::literal("1"),
            tree::Expr::Default,
        ]]));
        let body = MySQLSelectFactory.generate(&stmt).unwrap();
        assert_eq!(
            body.values,
            vec![vec![Expression::constant("1"), Expression::Default]]
        );
    }

    #[test]
    fn test_with_recursive_and_group_by_rollup() {
        let inner = tree::SimpleSelect {
            options: vec!["SQL_CALC_FOUND_ROWS".to_string(), "DISTINCT".to_string()],
            projections: vec![tree::SelectItem::expr(tree::Expr::column(None, "a"), Some("x"))],
            r#where: Some(tree::Expr::binary(
                tree::Expr::column(None, "a"),
                ">",
                tree::Expr::literal("1"),
            )),
            group_by: vec![tree::SortItem::new(tree::Expr::column(None, "a"), None)],
            with_rollup: true,
            ..Default::default()
        };
        let mut stmt = tree::SelectStmt::simple(inner.clone());
        stmt.with = Some(tree::WithClause {
            recursive: true,
            tables: vec![tree::CommonTableExpr {
                name: "cte".to_string(),
                columns: vec!["c1".to_string()],
                query: tree::SelectStmt::simple(inner),
            }],
        });
        let body = MySQLSelectFactory.generate(&stmt).unwrap();
        assert!(body.recursive);
        assert_eq!(body.with.len(), 1);
        assert_eq!(body.with[0].alias_list, vec!["c1".to_string()]);
        assert_eq!(body.query_options.as_deref(), Some("SQL_CALC_FOUND_ROWS DISTINCT"));
        assert!(body.with_rollup);
        assert_eq!(
            body.r#where,
            Some(Expression::binary(
                Expression::column(None, None, "a"),
                Expression::constant("1"),
                Operator::Gt
            ))
        );
    }

    #[test]
    fn test_for_update_skip_locked() {
        let mut stmt = tree::SelectStmt::simple(tree::SimpleSelect {
            projections: vec![tree::SelectItem::Star],
            ..Default::default()
        });
        stmt.for_update = Some(tree::ForUpdateClause {
            wait: vec!["SKIP".to_string(), "LOCKED".to_string()],
            wait_num: None,
        });
        let body = MySQLSelectFactory.generate(&stmt).unwrap();
        assert_eq!(
            body.for_update.unwrap().wait_option,
            Some(WaitOption::SkipLocked)
        );
    }
}
