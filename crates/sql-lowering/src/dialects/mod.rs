//! Dialect Module
//!
//! Each supported dialect has a typed parse tree (`tree`) and one factory per
//! syntactic category that lowers a tree node into the shared AST.
//!
//! # Supported Dialects
//!
//! | Dialect | Module | Notes |
//! |---|---|---|
//! | MySQL | [`mysql`] | Flat column references, windows embedded in calls |
//! | Oracle | [`oracle`] | Relation chains, `WindowFunction` variant, JSON functions |
//!
//! Keyword and operator positions in the trees carry the text as written.
//! Factories resolve that text through static spelling tables and fail with
//! [`Error::Unrecognized`] on anything the table does not list.

pub mod mysql;
pub mod oracle;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Supported SQL dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectType {
    MySQL,
    Oracle,
}

impl DialectType {
    /// All dialects, in declaration order.
    pub fn all() -> &'static [DialectType] {
        &[DialectType::MySQL, DialectType::Oracle]
    }
}

impl fmt::Display for DialectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialectType::MySQL => write!(f, "mysql"),
            DialectType::Oracle => write!(f, "oracle"),
        }
    }
}

impl FromStr for DialectType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mysql" | "ob-mysql" | "ob_mysql" => Ok(DialectType::MySQL),
            "oracle" | "ob-oracle" | "ob_oracle" => Ok(DialectType::Oracle),
            _ => Err(Error::UnknownDialect(s.to_string())),
        }
    }
}

/// A stateless converter from one tree node kind to one AST node kind.
///
/// Factories are unit structs; `generate` is pure and may be called from any
/// number of threads on disjoint trees.
pub trait Factory {
    type Node: ?Sized;
    type Output;

    /// The dialect whose tree this factory reads
    fn dialect_type(&self) -> DialectType;

    /// Lower `node` into its AST form
    fn generate(&self, node: &Self::Node) -> Result<Self::Output>;
}

/// Resolve a keyword or operator spelling through a static table.
///
/// Spellings are matched case-insensitively; tables are keyed upper-case.
pub(crate) fn lookup<T: Copy>(
    table: &HashMap<&'static str, T>,
    dialect: DialectType,
    rule: &'static str,
    text: &str,
) -> Result<T> {
    let key = text.trim().to_ascii_uppercase();
    table
        .get(key.as_str())
        .copied()
        .ok_or_else(|| Error::unrecognized(dialect, rule, text))
}

/// Join a keyword phrase that arrives as several tokens (`IN BOOLEAN MODE`).
pub(crate) fn phrase(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse numeric text that the AST stores as a number (ids, counts, sizes).
pub(crate) fn number<T: FromStr>(dialect: DialectType, rule: &'static str, text: &str) -> Result<T> {
    text.trim()
        .parse::<T>()
        .map_err(|_| Error::unrecognized(dialect, rule, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_rejects_non_numeric_text() {
        assert_eq!(number::<u32>(DialectType::MySQL, "partition count", " 12 ").unwrap(), 12);
        assert!(number::<u64>(DialectType::MySQL, "block size", "12k").is_err());
    }

    #[test]
    fn test_dialect_round_trips_through_display() {
        for dialect in DialectType::all() {
            let parsed: DialectType = dialect.to_string().parse().unwrap();
            assert_eq!(&parsed, dialect);
        }
    }

    #[test]
    fn test_unknown_dialect_name() {
        let err = "postgres".parse::<DialectType>().unwrap_err();
        assert!(matches!(err, Error::UnknownDialect(ref name) if name == "postgres"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut table = HashMap::new();
        table.insert("XOR", 1u8);
        assert_eq!(lookup(&table, DialectType::MySQL, "operator", "xor").unwrap(), 1);
        assert!(lookup(&table, DialectType::MySQL, "operator", "nand").is_err());
    }

    #[test]
    fn test_phrase_drops_blank_tokens() {
        let tokens = vec!["IN".to_string(), " ".to_string(), "BOOLEAN".to_string(), "MODE".to_string()];
        assert_eq!(phrase(&tokens), "IN BOOLEAN MODE");
    }
}
