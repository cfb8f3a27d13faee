#![allow(dead_code)]
//! JSON tree fixtures and the runner that lowers them

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use sql_lowering::dialects::mysql::{
    MySQLExpressionFactory, MySQLFromReferenceFactory, MySQLSelectFactory, MySQLTableElementFactory,
};
use sql_lowering::dialects::oracle::{
    OracleExpressionFactory, OracleFromReferenceFactory, OracleSelectFactory,
    OracleTableElementFactory,
};
use sql_lowering::{DialectType, Error, Factory, Result};

pub const FIXTURES_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

/// One fixture file: a dialect and a list of cases of one category
#[derive(Debug, Deserialize)]
pub struct FixtureFile {
    pub dialect: String,
    pub category: String,
    pub cases: Vec<FixtureCase>,
}

/// A tree to lower and what to expect from it
#[derive(Debug, Deserialize)]
pub struct FixtureCase {
    pub name: String,
    pub kind: NodeKind,
    /// The parse tree, in the dialect's serde form
    pub tree: Value,
    /// Another tree of the same kind that must lower to the same AST
    #[serde(default)]
    pub same_as: Option<Value>,
    /// Rule name of the expected `Unrecognized` error
    #[serde(default)]
    pub rejects: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Expression,
    Select,
    FromReference,
    TableElement,
}

/// Load every `*.json` file under `tests/fixtures/<dialect>/`, sorted by category.
pub fn load_fixtures(dialect: &str) -> Vec<FixtureFile> {
    let dir = Path::new(FIXTURES_PATH).join(dialect);
    let mut files = Vec::new();
    let entries = fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("cannot read {}: {}", dir.display(), e));
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().map_or(false, |ext| ext == "json") {
            let content = fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("cannot read {}: {}", path.display(), e));
            let fixture: FixtureFile = serde_json::from_str(&content)
                .unwrap_or_else(|e| panic!("cannot parse {}: {}", path.display(), e));
            files.push(fixture);
        }
    }
    files.sort_by(|a, b| a.category.cmp(&b.category));
    files
}

fn run<F>(factory: &F, tree: &Value) -> Result<Value>
where
    F: Factory,
    F::Node: Sized + DeserializeOwned,
    F::Output: Serialize,
{
    let node: F::Node = serde_json::from_value(tree.clone())?;
    let lowered = factory.generate(&node)?;
    Ok(serde_json::to_value(lowered)?)
}

/// Lower a JSON tree with the factory for `dialect` and `kind`, returning the AST as JSON.
pub fn lower_tree(dialect: DialectType, kind: NodeKind, tree: &Value) -> Result<Value> {
    match (dialect, kind) {
        (DialectType::MySQL, NodeKind::Expression) => run(&MySQLExpressionFactory, tree),
        (DialectType::MySQL, NodeKind::Select) => run(&MySQLSelectFactory, tree),
        (DialectType::MySQL, NodeKind::FromReference) => run(&MySQLFromReferenceFactory, tree),
        (DialectType::MySQL, NodeKind::TableElement) => run(&MySQLTableElementFactory, tree),
        (DialectType::Oracle, NodeKind::Expression) => run(&OracleExpressionFactory, tree),
        (DialectType::Oracle, NodeKind::Select) => run(&OracleSelectFactory, tree),
        (DialectType::Oracle, NodeKind::FromReference) => run(&OracleFromReferenceFactory, tree),
        (DialectType::Oracle, NodeKind::TableElement) => run(&OracleTableElementFactory, tree),
    }
}

/// Run one case, returning a failure description when it does not behave as expected.
pub fn check_case(dialect: DialectType, case: &FixtureCase) -> Option<String> {
    let lowered = lower_tree(dialect, case.kind, &case.tree);
    match (&case.rejects, lowered) {
        (Some(rule), Err(Error::Unrecognized { rule: actual, .. })) if actual == rule.as_str() => None,
        (Some(rule), Err(e)) => Some(format!("{}: expected rejection by {}, got {}", case.name, rule, e)),
        (Some(rule), Ok(_)) => Some(format!("{}: expected rejection by {}, but it lowered", case.name, rule)),
        (None, Err(e)) => Some(format!("{}: {}", case.name, e)),
        (None, Ok(ast)) => {
            let other = case.same_as.as_ref()?;
            match lower_tree(dialect, case.kind, other) {
                Ok(expected) if expected == ast => None,
                Ok(expected) => Some(format!("{}: {} != {}", case.name, ast, expected)),
                Err(e) => Some(format!("{}: same_as tree failed: {}", case.name, e)),
            }
        }
    }
}
