//! Fixture-driven lowering tests.
//!
//! Each dialect has a directory under `tests/fixtures/` holding JSON files of
//! parse trees in their serde form. Every case either lowers, lowers to the
//! same AST as its `same_as` tree, or is rejected by the named spelling rule.
//!
//! Run with: cargo test -p sql-lowering --test fixture_cases -- --nocapture

mod common;

use common::{check_case, load_fixtures};
use sql_lowering::DialectType;

fn run_dialect(dialect: DialectType) {
    let files = load_fixtures(&dialect.to_string());
    assert!(!files.is_empty(), "no fixtures for {}", dialect);

    let mut total = 0;
    let mut failures = Vec::new();
    for file in &files {
        assert_eq!(file.dialect, dialect.to_string(), "fixture in wrong directory");
        for case in &file.cases {
            total += 1;
            if let Some(failure) = check_case(dialect, case) {
                failures.push(format!("[{}] {}", file.category, failure));
            }
        }
    }

    println!("{}: {}/{} fixture cases passed", dialect, total - failures.len(), total);
    assert!(
        failures.is_empty(),
        "{} fixture failures:\n{}",
        failures.len(),
        failures.join("\n")
    );
}

#[test]
fn test_mysql_fixtures() {
    run_dialect(DialectType::MySQL);
}

#[test]
fn test_oracle_fixtures() {
    run_dialect(DialectType::Oracle);
}
