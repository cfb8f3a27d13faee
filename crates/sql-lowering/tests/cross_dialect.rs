//! Cross-Dialect Tests
//!
//! The same SQL text lowered through each dialect's factories. Where the two
//! dialects mean the same thing the AST must match; where they differ the
//! difference must be the documented one.

mod common;

use common::*;
use sql_lowering::dialects::mysql::{self, MySQLExpressionFactory, MySQLFromReferenceFactory, MySQLSelectFactory};
use sql_lowering::dialects::oracle::{
    self, OracleExpressionFactory, OracleFromReferenceFactory, OracleSelectFactory,
};
use sql_lowering::expressions::{Expression, Operator};
use sql_lowering::statements::from::{JoinReference, JoinType};
use sql_lowering::statements::select::RelationType;
use sql_lowering::{Error, Factory, FromReference};

// ============================================================================
// Names
// ============================================================================

mod names {
    use super::*;

    #[test]
    fn test_dotted_name_shape_differs() {
        let mysql = MySQLExpressionFactory
            .generate(&mysql::tree::Expr::column(Some("a"), "b"))
            .unwrap();
        let oracle = OracleExpressionFactory
            .generate(&oracle::tree::Expr::path(&["a", "b"]))
            .unwrap();

        assert_eq!(mysql, Expression::column(None, Some("a"), "b"));
        assert_eq!(oracle, Expression::relation_chain("a", Expression::relation("b")));
        assert_ne!(mysql, oracle);
    }

    #[test]
    fn test_three_part_name() {
        let mut column = mysql::tree::ColumnRef::new(Some("t"), "c");
        column.schema = Some("s".to_string());
        assert_eq!(
            MySQLExpressionFactory
                .generate(&mysql::tree::Expr::Column(column))
                .unwrap(),
            Expression::column(Some("s"), Some("t"), "c")
        );
        assert_eq!(
            OracleExpressionFactory
                .generate(&oracle::tree::Expr::path(&["s", "t", "c"]))
                .unwrap(),
            Expression::relation_chain(
                "s",
                Expression::relation_chain("t", Expression::relation("c"))
            )
        );
    }
}

// ============================================================================
// Operators
// ============================================================================

mod operators {
    use super::*;

    fn mysql_op(op: &str) -> Operator {
        let node = mysql::tree::Expr::binary(
            mysql::tree::Expr::column(None, "a"),
            op,
            mysql::tree::Expr::column(None, "b"),
        );
        let lowered = MySQLExpressionFactory.generate(&node).unwrap();
        lowered.as_compound().unwrap().operator
    }

    fn oracle_op(op: &str) -> Operator {
        let node = oracle::tree::Expr::binary(
            oracle::tree::Expr::path(&["a"]),
            op,
            oracle::tree::Expr::path(&["b"]),
        );
        let lowered = OracleExpressionFactory.generate(&node).unwrap();
        lowered.as_compound().unwrap().operator
    }

    #[test]
    fn test_shared_spellings_agree() {
        for op in ["=", "!=", "<>", "<", "<=", ">", ">=", "<=>", "+", "-", "*", "/", "AND", "or", "||", "mod"] {
            assert_eq!(mysql_op(op), oracle_op(op), "{}", op);
        }
    }

    #[test]
    fn test_not_equal_synonyms() {
        for op in ["!=", "<>"] {
            assert_eq!(mysql_op(op), Operator::Ne, "mysql {}", op);
        }
        for op in ["!=", "<>", "^=", "! =", "^ =", "< >"] {
            assert_eq!(oracle_op(op), Operator::Ne, "oracle {}", op);
        }
    }

    #[test]
    fn test_double_pipe_is_concatenation() {
        assert_eq!(mysql_op("||"), Operator::Cnnop);
        assert_eq!(oracle_op("||"), Operator::Cnnop);
    }

    #[test]
    fn test_dialect_only_operators() {
        assert_eq!(mysql_op("xor"), Operator::Xor);
        assert_eq!(mysql_op("div"), Operator::IntDiv);
        assert_eq!(oracle_op("**"), Operator::Pow);
        assert_eq!(oracle_op("~="), Operator::NePl);

        let node = oracle::tree::Expr::binary(
            oracle::tree::Expr::path(&["a"]),
            "xor",
            oracle::tree::Expr::path(&["b"]),
        );
        assert!(matches!(
            OracleExpressionFactory.generate(&node).unwrap_err(),
            Error::Unrecognized { rule: "binary operator", .. }
        ));
    }

    #[test]
    fn test_is_tests_become_comparisons() {
        let mysql = MySQLExpressionFactory
            .generate(&mysql::tree::Expr::is(mysql::tree::Expr::column(None, "a"), true, "NULL"))
            .unwrap();
        assert_eq!(
            mysql,
            Expression::binary(Expression::column(None, None, "a"), Expression::Null, Operator::Ne)
        );

        for target in ["NULL", "nan", "INFINITE"] {
            let oracle = OracleExpressionFactory
                .generate(&oracle::tree::Expr::is(oracle::tree::Expr::path(&["a"]), false, target))
                .unwrap();
            assert_eq!(
                oracle,
                Expression::binary(Expression::relation("a"), Expression::Null, Operator::Eq),
                "{}",
                target
            );
        }
    }

    #[test]
    fn test_is_true_is_mysql_only() {
        let mysql = MySQLExpressionFactory
            .generate(&mysql::tree::Expr::is(mysql::tree::Expr::column(None, "a"), false, "true"))
            .unwrap();
        assert_eq!(
            mysql,
            Expression::binary(Expression::column(None, None, "a"), Expression::boolean(true), Operator::Eq)
        );

        let oracle = OracleExpressionFactory
            .generate(&oracle::tree::Expr::is(oracle::tree::Expr::path(&["a"]), false, "TRUE"));
        assert!(matches!(oracle, Err(Error::Unrecognized { rule: "IS target", .. })));
    }
}

// ============================================================================
// Function calls
// ============================================================================

mod functions {
    use super::*;

    #[test]
    fn test_aggregator_lands_in_params_flag() {
        for aggregator in ["DISTINCT", "ALL", "UNIQUE"] {
            let mut mysql = mysql::tree::Call::new("count", vec![mysql::tree::Expr::column(None, "a")]);
            mysql.aggregator = Some(aggregator.to_string());
            let mysql = MySQLExpressionFactory
                .generate(&mysql::tree::Expr::function(mysql::tree::Function::Call(mysql)))
                .unwrap();

            let mut oracle = oracle::tree::Call::new("count", vec![oracle::tree::Expr::path(&["a"])]);
            oracle.aggregator = Some(aggregator.to_string());
            let oracle = OracleExpressionFactory
                .generate(&oracle::tree::Expr::function(oracle::tree::Function::Aggregate(oracle)))
                .unwrap();

            let mysql = mysql.as_function_call().unwrap();
            let oracle = oracle.as_function_call().unwrap();
            assert_eq!(mysql.params_flag.as_deref(), Some(aggregator));
            assert_eq!(mysql.params_flag, oracle.params_flag, "{}", aggregator);
            assert_eq!(mysql.options, oracle.options, "{}", aggregator);
        }
    }
}

// ============================================================================
// Query blocks
// ============================================================================

mod queries {
    use super::*;

    #[test]
    fn test_set_chain_order_matches() {
        let mysql = mysql_set_op(
            mysql_set_op(mysql_block("1"), "UNION ALL", mysql_block("2")),
            "INTERSECT",
            mysql_block("3"),
        );
        let oracle = oracle_set_op(
            oracle_set_op(oracle_block("1"), "union all", oracle_block("2")),
            "intersect",
            oracle_block("3"),
        );

        let mut expected = lowered_block("1");
        expected.chain(RelationType::UnionAll, lowered_block("2"));
        expected.chain(RelationType::Intersect, lowered_block("3"));

        let mysql = MySQLSelectFactory
            .generate(&mysql::tree::SelectStmt::new(mysql))
            .unwrap();
        let oracle = OracleSelectFactory
            .generate(&oracle::tree::SelectStmt::new(oracle))
            .unwrap();
        assert_eq!(mysql, expected);
        assert_eq!(oracle, expected);
        assert_eq!(oracle.chain_len(), 3);
    }

    #[test]
    fn test_except_is_minus_in_both() {
        let mysql = MySQLSelectFactory
            .generate(&mysql::tree::SelectStmt::new(mysql_set_op(
                mysql_block("1"),
                "EXCEPT",
                mysql_block("2"),
            )))
            .unwrap();
        let oracle = OracleSelectFactory
            .generate(&oracle::tree::SelectStmt::new(oracle_set_op(
                oracle_block("1"),
                "EXCEPT",
                oracle_block("2"),
            )))
            .unwrap();
        assert_eq!(mysql, oracle);
        assert_eq!(
            mysql.related_select.as_ref().map(|r| r.relation),
            Some(RelationType::Minus)
        );
    }

    #[test]
    fn test_union_distinct_only_in_mysql() {
        let mysql = MySQLSelectFactory
            .generate(&mysql::tree::SelectStmt::new(mysql_set_op(
                mysql_block("1"),
                "union distinct",
                mysql_block("2"),
            )))
            .unwrap();
        assert_eq!(
            mysql.related_select.as_ref().map(|r| r.relation),
            Some(RelationType::UnionDistinct)
        );

        let oracle = OracleSelectFactory.generate(&oracle::tree::SelectStmt::new(oracle_set_op(
            oracle_block("1"),
            "union distinct",
            oracle_block("2"),
        )));
        assert!(matches!(oracle, Err(Error::Unrecognized { rule: "set operator", .. })));
    }
}

// ============================================================================
// Joins
// ============================================================================

mod joins {
    use super::*;

    #[test]
    fn test_joins_are_left_deep_in_both() {
        let mysql = mysql::tree::TableReference::join(
            mysql::tree::TableReference::join(
                mysql::tree::TableReference::table("a", None),
                "JOIN",
                mysql::tree::TableReference::table("b", None),
                None,
            ),
            "LEFT OUTER JOIN",
            mysql::tree::TableReference::table("c", None),
            None,
        );
        let oracle = oracle::tree::TableReference::join(
            oracle::tree::TableReference::join(
                oracle::tree::TableReference::table("a", None),
                "join",
                oracle::tree::TableReference::table("b", None),
                None,
            ),
            "left outer join",
            oracle::tree::TableReference::table("c", None),
            None,
        );

        let inner = JoinReference::new(table("a"), table("b"), JoinType::Join, None);
        let expected: FromReference =
            JoinReference::new(inner.into(), table("c"), JoinType::LeftOuterJoin, None).into();
        assert_eq!(MySQLFromReferenceFactory.generate(&mysql).unwrap(), expected);
        assert_eq!(OracleFromReferenceFactory.generate(&oracle).unwrap(), expected);
    }

    #[test]
    fn test_join_spellings_shared_by_both() {
        let spellings = [
            ("JOIN", JoinType::Join),
            ("INNER JOIN", JoinType::InnerJoin),
            ("CROSS JOIN", JoinType::CrossJoin),
            ("LEFT JOIN", JoinType::LeftJoin),
            ("RIGHT OUTER JOIN", JoinType::RightOuterJoin),
            ("FULL JOIN", JoinType::FullJoin),
            ("NATURAL JOIN", JoinType::NaturalJoin),
            ("NATURAL FULL OUTER JOIN", JoinType::NaturalFullOuterJoin),
        ];
        for (spelling, kind) in spellings {
            let mysql = MySQLFromReferenceFactory
                .generate(&mysql::tree::TableReference::join(
                    mysql::tree::TableReference::table("a", None),
                    spelling,
                    mysql::tree::TableReference::table("b", None),
                    None,
                ))
                .unwrap();
            let oracle = OracleFromReferenceFactory
                .generate(&oracle::tree::TableReference::join(
                    oracle::tree::TableReference::table("a", None),
                    spelling,
                    oracle::tree::TableReference::table("b", None),
                    None,
                ))
                .unwrap();
            assert_eq!(mysql.as_join().map(|j| j.join_type), Some(kind), "{}", spelling);
            assert_eq!(mysql, oracle, "{}", spelling);
        }
    }

    #[test]
    fn test_natural_join_condition_is_illegal_in_both() {
        let mysql = MySQLFromReferenceFactory.generate(&mysql::tree::TableReference::join(
            mysql::tree::TableReference::table("a", None),
            "NATURAL JOIN",
            mysql::tree::TableReference::table("b", None),
            Some(mysql::tree::JoinOn::Using(vec![mysql::tree::ColumnRef::new(None, "id")])),
        ));
        let oracle = OracleFromReferenceFactory.generate(&oracle::tree::TableReference::join(
            oracle::tree::TableReference::table("a", None),
            "NATURAL JOIN",
            oracle::tree::TableReference::table("b", None),
            Some(oracle::tree::JoinOn::Using(vec![oracle::tree::ColumnRef::new(None, "id")])),
        ));
        assert!(matches!(mysql, Err(Error::IllegalCombination { .. })));
        assert!(matches!(oracle, Err(Error::IllegalCombination { .. })));
    }
}
