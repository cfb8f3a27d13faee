//! Partitioning schemes.
//!
//! A [`Partition`] is either a hash/key scheme, a range/list scheme, or a
//! column-store column list. Element lists and subpartitioning are optional:
//! `PARTITION BY HASH(a) PARTITIONS 4` has a count and no elements, while
//! auto range partitioning has neither.

use serde::{Deserialize, Serialize};
#[cfg(feature = "bindings")]
use ts_rs::TS;

use crate::expressions::{ColumnReference, Expression};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    Hash(HashPartition),
    Key(HashPartition),
    Range(RangePartition),
    List(ListPartition),
    Column(ColumnPartition),
}

impl Partition {
    /// Explicit partition elements, if any were written.
    pub fn elements(&self) -> Option<&[PartitionElement]> {
        match self {
            Partition::Hash(p) | Partition::Key(p) => p.elements.as_deref(),
            Partition::Range(p) => p.elements.as_deref(),
            Partition::List(p) => p.elements.as_deref(),
            Partition::Column(_) => None,
        }
    }

    pub fn sub_option(&self) -> Option<&SubPartitionOption> {
        match self {
            Partition::Hash(p) | Partition::Key(p) => p.sub_option.as_ref(),
            Partition::Range(p) => p.sub_option.as_ref(),
            Partition::List(p) => p.sub_option.as_ref(),
            Partition::Column(_) => None,
        }
    }
}

/// `PARTITION BY HASH|KEY (cols) [SUBPARTITION BY ...] [PARTITIONS n] [(elements)]`
///
/// A KEY scheme may have no columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct HashPartition {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<PartitionElement>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_option: Option<SubPartitionOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partitions_num: Option<u32>,
    /// Scheme-level options written after the element list (Oracle `NOCOMPRESS`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<PartitionOptions>,
}

/// `PARTITION BY RANGE [COLUMNS] (cols) ...`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct RangePartition {
    pub columns: Vec<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<PartitionElement>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_option: Option<SubPartitionOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partitions_num: Option<u32>,
    /// `COLUMNS` keyword was written
    #[serde(default)]
    pub columns_flag: bool,
    /// `PARTITIONS AUTO`
    #[serde(default)]
    pub auto: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_size: Option<Expression>,
    /// Oracle `INTERVAL (expr)`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<PartitionOptions>,
}

/// `PARTITION BY LIST [COLUMNS] (cols) ...`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct ListPartition {
    pub columns: Vec<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<PartitionElement>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_option: Option<SubPartitionOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partitions_num: Option<u32>,
    #[serde(default)]
    pub columns_flag: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<PartitionOptions>,
}

/// `PARTITION BY COLUMN (a, (b, c), d)`; nested groups are flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct ColumnPartition {
    pub columns: Vec<ColumnReference>,
}

/// `SUBPARTITION BY kind (cols) [SUBPARTITION TEMPLATE (...) | SUBPARTITIONS n]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct SubPartitionOption {
    pub columns: Vec<Expression>,
    /// `hash`, `key`, `range`, `range columns`, `list` or `list columns`
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<Vec<SubPartitionElement>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_partition_num: Option<u32>,
}

impl SubPartitionOption {
    pub fn new(columns: Vec<Expression>, kind: impl Into<String>) -> Self {
        Self {
            columns,
            kind: kind.into(),
            templates: None,
            sub_partition_num: None,
        }
    }
}

/// Bound of a partition element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "snake_case")]
pub enum PartitionBound {
    /// Hash/key element, no values
    Hash,
    /// `VALUES LESS THAN (...)`
    Range(Vec<Expression>),
    /// `VALUES [IN] (...)`
    List(Vec<Expression>),
    /// Oracle split target naming only a partition, `INTO (PARTITION p [ID n])`
    Special,
}

/// `PARTITION [schema.]name[@link] bound [options] [(subpartitions)]`
///
/// Oracle lets the name be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct PartitionElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_variable: Option<String>,
    pub bound: PartitionBound,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<PartitionOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_elements: Option<Vec<SubPartitionElement>>,
}

impl PartitionElement {
    pub fn new(name: Option<&str>, bound: PartitionBound) -> Self {
        Self {
            schema: None,
            name: name.map(str::to_string),
            user_variable: None,
            bound,
            options: None,
            sub_elements: None,
        }
    }
}

/// `SUBPARTITION [schema.]name bound [options]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct SubPartitionElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_variable: Option<String>,
    pub bound: PartitionBound,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<PartitionOptions>,
}

impl SubPartitionElement {
    pub fn new(name: &str, bound: PartitionBound) -> Self {
        Self {
            schema: None,
            name: name.to_string(),
            user_variable: None,
            bound,
            options: None,
        }
    }
}

/// Physical options of a partition element. Later options of the same kind
/// override earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct PartitionOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tablespace: Option<String>,
    /// Text after `COMPRESS`, e.g. `for oltp`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compress: Option<String>,
    #[serde(default)]
    pub no_compress: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pct_free: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pct_used: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ini_trans: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_trans: Option<u32>,
    /// `STORAGE (next 12 initial 15)` items as written
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub storage: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elements_of_count_only_scheme_is_none() {
        let partition = Partition::Hash(HashPartition {
            columns: vec![Expression::column(None, None, "a")],
            partitions_num: Some(4),
            ..Default::default()
        });
        assert!(partition.elements().is_none());
        assert!(partition.sub_option().is_none());
    }

    #[test]
    fn test_key_scheme_shares_hash_shape() {
        let key = Partition::Key(HashPartition {
            sub_option: Some(SubPartitionOption::new(
                vec![Expression::column(None, None, "c")],
                "key",
            )),
            ..Default::default()
        });
        assert_eq!(key.sub_option().unwrap().kind, "key");
    }
}
