//! SQL Lowering - typed parse trees to a dialect-neutral SQL AST
//!
//! This library lowers concrete parse trees of two SQL surface dialects, a
//! MySQL-compatible one and an Oracle-compatible one, into a single AST of
//! expression and statement nodes.
//!
//! # Architecture
//!
//! The library is a family of stateless factories, one per syntactic category
//! per dialect:
//! 1. **Expression** - operators, calls, windows, CASE, JSON options, arrays
//! 2. **Data type** - types in casts, column definitions and JSON `RETURNING`
//! 3. **From reference** - names, joins, flashback, pivot/unpivot
//! 4. **Partition / table element / table options** - DDL building blocks
//! 5. **Alter table action** - one ALTER TABLE clause per call
//! 6. **Select** - query blocks, WITH lists and set-operation chains
//!
//! Every factory implements [`Factory`]. Output nodes compare with deep
//! structural equality and serialize with serde.
//!
//! ```rust
//! use sql_lowering::dialects::mysql::tree;
//! use sql_lowering::dialects::mysql::MySQLExpressionFactory;
//! use sql_lowering::expressions::{Expression, Operator};
//! use sql_lowering::Factory;
//!
//! let node = tree::Expr::binary(tree::Expr::column(Some("a"), "b"), "<>", tree::Expr::literal("1"));
//! let lowered = MySQLExpressionFactory.generate(&node).unwrap();
//! assert_eq!(
//!     lowered,
//!     Expression::binary(Expression::column(None, Some("a"), "b"), Expression::constant("1"), Operator::Ne)
//! );
//! ```

pub mod dialects;
pub mod error;
pub mod expressions;
pub mod statements;

pub use dialects::{DialectType, Factory};
pub use error::{Error, Result};
pub use expressions::{Expression, Operator};
pub use statements::{
    AlterTableAction, DataType, FromReference, Partition, SelectBody, TableElement, TableOptions,
};
