//! Error Handling Tests
//!
//! Rejections must name the dialect and the spelling rule that failed, and
//! must never panic.

use std::str::FromStr;
use std::thread;

use sql_lowering::dialects::mysql::{self, MySQLExpressionFactory, MySQLSelectFactory};
use sql_lowering::dialects::oracle::{self, OracleExpressionFactory, OracleFromReferenceFactory};
use sql_lowering::expressions::{Expression, Operator};
use sql_lowering::{DialectType, Error, Factory, SelectBody};

// ============================================================================
// Dialect Names
// ============================================================================

mod dialect_names {
    use super::*;

    #[test]
    fn test_dialect_aliases() {
        for name in ["mysql", "MySQL", "ob-mysql", "OB_MYSQL"] {
            assert_eq!(DialectType::from_str(name).unwrap(), DialectType::MySQL, "{}", name);
        }
        for name in ["oracle", "Oracle", "ob-oracle", "ob_oracle"] {
            assert_eq!(DialectType::from_str(name).unwrap(), DialectType::Oracle, "{}", name);
        }
    }

    #[test]
    fn test_unknown_dialect() {
        let err = "postgres".parse::<DialectType>().unwrap_err();
        assert!(matches!(err, Error::UnknownDialect(ref name) if name == "postgres"));
        assert_eq!(err.to_string(), "Unknown dialect: postgres");
        assert_eq!(err.dialect(), None);
    }

    #[test]
    fn test_display_round_trips() {
        for dialect in DialectType::all() {
            assert_eq!(dialect.to_string().parse::<DialectType>().unwrap(), *dialect);
        }
    }

    #[test]
    fn test_factories_report_their_dialect() {
        assert_eq!(MySQLExpressionFactory.dialect_type(), DialectType::MySQL);
        assert_eq!(OracleExpressionFactory.dialect_type(), DialectType::Oracle);
    }
}

// ============================================================================
// Rejections
// ============================================================================

mod rejections {
    use super::*;

    #[test]
    fn test_unrecognized_operator_message() {
        let node = mysql::tree::Expr::binary(
            mysql::tree::Expr::column(None, "a"),
            "=>=",
            mysql::tree::Expr::column(None, "b"),
        );
        let err = MySQLExpressionFactory.generate(&node).unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized binary operator in mysql: =>=");
        assert_eq!(err.dialect(), Some(DialectType::MySQL));
    }

    #[test]
    fn test_nested_rejection_surfaces() {
        // the bad operator sits inside a WHERE clause of a subquery
        let inner = mysql::tree::SelectStmt::simple(mysql::tree::SimpleSelect {
            projections: vec![mysql::tree::SelectItem::Star],
            r#where: Some(mysql::tree::Expr::unary("??", mysql::tree::Expr::column(None, "a"))),
            ..Default::default()
        });
        let outer = mysql::tree::SelectStmt::simple(mysql::tree::SimpleSelect {
            projections: vec![mysql::tree::SelectItem::expr(
                mysql::tree::Expr::Subquery(Box::new(inner)),
                Some("x"),
            )],
            ..Default::default()
        });
        let err = MySQLSelectFactory.generate(&outer).unwrap_err();
        assert!(matches!(err, Error::Unrecognized { rule: "unary operator", .. }));
    }

    #[test]
    fn test_illegal_combination_message() {
        let join = oracle::tree::TableReference::join(
            oracle::tree::TableReference::table("a", None),
            "cross join",
            oracle::tree::TableReference::table("b", None),
            Some(oracle::tree::JoinOn::On(oracle::tree::Expr::binary(
                oracle::tree::Expr::path(&["a", "id"]),
                "=",
                oracle::tree::Expr::path(&["b", "id"]),
            ))),
        );
        let err = OracleFromReferenceFactory.generate(&join).unwrap_err();
        assert!(matches!(err, Error::IllegalCombination { dialect: DialectType::Oracle, .. }));
        assert!(err.to_string().starts_with("Illegal combination in oracle: "));
    }

    #[test]
    fn test_rejection_is_case_insensitive_only_on_spelling() {
        let upper = oracle::tree::Expr::binary(
            oracle::tree::Expr::path(&["a"]),
            "MULTISET UNION",
            oracle::tree::Expr::path(&["b"]),
        );
        let lower = oracle::tree::Expr::binary(
            oracle::tree::Expr::path(&["a"]),
            "multiset union",
            oracle::tree::Expr::path(&["b"]),
        );
        assert_eq!(
            OracleExpressionFactory.generate(&upper).unwrap(),
            OracleExpressionFactory.generate(&lower).unwrap()
        );

        let missing = oracle::tree::Expr::binary(
            oracle::tree::Expr::path(&["a"]),
            "multiset",
            oracle::tree::Expr::path(&["b"]),
        );
        assert!(OracleExpressionFactory.generate(&missing).is_err());
    }
}

// ============================================================================
// Serialization
// ============================================================================

mod serialization {
    use super::*;

    #[test]
    fn test_bad_json_is_serialization_error() {
        let err = Expression::from_json("{\"compound\": 1").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error: "));
    }

    #[test]
    fn test_lowered_select_survives_json() {
        let stmt = mysql::tree::SelectStmt::simple(mysql::tree::SimpleSelect {
            projections: vec![mysql::tree::SelectItem::expr(
                mysql::tree::Expr::binary(
                    mysql::tree::Expr::column(Some("t"), "a"),
                    "+",
                    mysql::tree::Expr::literal("1"),
                ),
                Some("x"),
            )],
            from: mysql::tree::FromClause::Tables(vec![mysql::tree::TableReference::table("t", None)]),
            ..Default::default()
        });
        let body = MySQLSelectFactory.generate(&stmt).unwrap();
        let json = body.to_json().unwrap();
        assert_eq!(SelectBody::from_json(&json).unwrap(), body);
    }

    #[test]
    fn test_operator_names_in_json() {
        let json = serde_json::to_string(&Operator::NotBetween).unwrap();
        assert_eq!(json, "\"NOT_BETWEEN\"");
    }
}

// ============================================================================
// Concurrency
// ============================================================================

mod concurrency {
    use super::*;

    #[test]
    fn test_factories_lower_from_many_threads() {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                thread::spawn(move || {
                    let literal = i.to_string();
                    let node = oracle::tree::Expr::binary(
                        oracle::tree::Expr::path(&["a"]),
                        "<>",
                        oracle::tree::Expr::literal(&literal),
                    );
                    OracleExpressionFactory.generate(&node).unwrap()
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let lowered = handle.join().unwrap();
            assert_eq!(
                lowered,
                Expression::binary(
                    Expression::relation("a"),
                    Expression::constant(i.to_string()),
                    Operator::Ne
                )
            );
        }
    }
}
