//! Table options of CREATE/ALTER TABLE.
//!
//! Every option is optional. Options are folded left to right with
//! [`TableOptions::merge`], so a later `COMMENT` replaces an earlier one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
#[cfg(feature = "bindings")]
use ts_rs::TS;

use super::from::RelationFactor;
use crate::expressions::{ColumnReference, Expression};

/// `LOB (col) STORE AS (CHUNK n, ...)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct LobStorageOption {
    pub column: String,
    pub sizes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct TableOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_keys: Option<Vec<ColumnReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_parallel: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_scope: Option<String>,
    /// Locality text, with ` FORCE` appended when written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_info: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progressive_merge_num: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replica_num: Option<u64>,
    /// Oracle `COMPRESS ...`, text after the keyword
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compress: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_compress: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_bloom_filter: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_write: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tablet_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_used_part_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_row_movement: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_row_movement: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pct_free: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pct_used: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ini_trans: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_trans: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tablespace: Option<String>,
    /// Quoted as written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_format_version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    /// Integer or decimal text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_increment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_key_write: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_row_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_increment_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_increment_cache_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_extended_row_id: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// External file format, keys upper-cased
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<BTreeMap<String, Expression>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttls: Option<Vec<Expression>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kv_attributes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_lob_in_row_threshold: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lob_in_row_threshold: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_block_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_properties: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lob_storage: Option<LobStorageOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub micro_index_clustered: Option<bool>,
    /// `OFF`, `IMMEDIATE` or `INTERVAL` as written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_refresh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rows: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rows: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack_keys: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats_auto_recalc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats_persistent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats_sample_pages: Option<String>,
    /// MERGE engine `UNION = (t1, t2)`; empty when written as `UNION = ()`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub union: Option<Vec<RelationFactor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert_method: Option<String>,
}

macro_rules! take_later {
    ($target:ident, $other:ident, $($field:ident),+ $(,)?) => {
        $(
            if $other.$field.is_some() {
                $target.$field = $other.$field;
            }
        )+
    };
}

impl TableOptions {
    /// Fold `other` into `self`; options set in `other` win.
    pub fn merge(&mut self, other: TableOptions) {
        take_later!(
            self,
            other,
            sort_keys,
            parallel,
            no_parallel,
            table_mode,
            duplicate_scope,
            locality,
            expire_info,
            progressive_merge_num,
            block_size,
            table_id,
            replica_num,
            compress,
            no_compress,
            use_bloom_filter,
            primary_zone,
            table_group,
            read_only,
            read_write,
            engine,
            tablet_size,
            max_used_part_id,
            enable_row_movement,
            disable_row_movement,
            pct_free,
            pct_used,
            ini_trans,
            max_trans,
            storage,
            tablespace,
            comment,
            compression,
            storage_format_version,
            row_format,
            charset,
            collation,
            auto_increment,
            delay_key_write,
            avg_row_length,
            checksum,
            auto_increment_mode,
            auto_increment_cache_size,
            enable_extended_row_id,
            location,
            format,
            pattern,
            ttls,
            kv_attributes,
            default_lob_in_row_threshold,
            lob_in_row_threshold,
            key_block_size,
            partition_type,
            external_properties,
            lob_storage,
            micro_index_clustered,
            auto_refresh,
            max_rows,
            min_rows,
            password,
            pack_keys,
            connection,
            data_directory,
            index_directory,
            encryption,
            stats_auto_recalc,
            stats_persistent,
            stats_sample_pages,
            union,
            insert_method,
        );
    }

    /// Whether no option is set.
    pub fn is_empty(&self) -> bool {
        self == &TableOptions::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_later_wins_and_keeps_unset() {
        let mut options = TableOptions {
            comment: Some("'a'".to_string()),
            engine: Some("InnoDB".to_string()),
            ..Default::default()
        };
        options.merge(TableOptions {
            comment: Some("'b'".to_string()),
            ..Default::default()
        });
        assert_eq!(options.comment.as_deref(), Some("'b'"));
        assert_eq!(options.engine.as_deref(), Some("InnoDB"));
    }

    #[test]
    fn test_default_is_empty() {
        assert!(TableOptions::default().is_empty());
        let options = TableOptions {
            no_parallel: Some(true),
            ..Default::default()
        };
        assert!(!options.is_empty());
    }
}
