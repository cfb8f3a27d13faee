#![allow(dead_code)]
//! Small tree builders shared by the integration tests

use sql_lowering::dialects::{mysql, oracle};
use sql_lowering::expressions::Expression;
use sql_lowering::statements::from::NameReference;
use sql_lowering::statements::select::Projection;
use sql_lowering::{FromReference, SelectBody};

/// Keyword tokens as the grammar hands them over
pub fn tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// `SELECT <label>` for MySQL
pub fn mysql_block(label: &str) -> mysql::tree::QueryExpr {
    mysql::tree::QueryExpr::Simple(Box::new(mysql::tree::SimpleSelect {
        projections: vec![mysql::tree::SelectItem::expr(mysql::tree::Expr::literal(label), None)],
        ..Default::default()
    }))
}

/// `SELECT <label>` for Oracle
pub fn oracle_block(label: &str) -> oracle::tree::QueryExpr {
    oracle::tree::QueryExpr::Simple(Box::new(oracle::tree::SimpleSelect {
        projections: vec![oracle::tree::SelectItem::expr(oracle::tree::Expr::literal(label), None)],
        ..Default::default()
    }))
}

/// The lowered form of both block builders
pub fn lowered_block(label: &str) -> SelectBody {
    SelectBody::new(vec![Projection::new(Expression::constant(label), None)], vec![])
}

pub fn mysql_set_op(left: mysql::tree::QueryExpr, set_type: &str, right: mysql::tree::QueryExpr) -> mysql::tree::QueryExpr {
    mysql::tree::QueryExpr::SetOp {
        left: Box::new(left),
        set_type: tokens(set_type),
        right: Box::new(right),
    }
}

pub fn oracle_set_op(
    left: oracle::tree::QueryExpr,
    set_type: &str,
    right: oracle::tree::QueryExpr,
) -> oracle::tree::QueryExpr {
    oracle::tree::QueryExpr::SetOp {
        left: Box::new(left),
        set_type: tokens(set_type),
        right: Box::new(right),
    }
}

pub fn table(relation: &str) -> FromReference {
    NameReference::new(None, relation, None).into()
}
