//! MySQL table options.
//!
//! Each option lowers to a [`TableOptions`] with one field set; the list is
//! folded left to right with [`TableOptions::merge`].

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;

use super::expression::{lower_all, lower_expr, lower_ttl};
use super::tree;
use crate::dialects::{lookup, number, DialectType, Factory};
use crate::error::Result;
use crate::expressions::{ColumnReference, Expression};
use crate::statements::from::RelationFactor;
use crate::statements::table_options::{LobStorageOption, TableOptions};

const DIALECT: DialectType = DialectType::MySQL;

type TextSetter = fn(&mut TableOptions, String);
type IntegerSetter = fn(&mut TableOptions, u64);
type FlagSetter = fn(&mut TableOptions, bool);

/// Options kept as written, quotes included.
static TEXT_OPTIONS: Lazy<HashMap<&'static str, TextSetter>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, TextSetter> = HashMap::new();
    m.insert("TABLE_MODE", |o, v| o.table_mode = Some(v));
    m.insert("DUPLICATE_SCOPE", |o, v| o.duplicate_scope = Some(v));
    m.insert("COMMENT", |o, v| o.comment = Some(v));
    m.insert("COMPRESSION", |o, v| o.compression = Some(v));
    m.insert("ROW_FORMAT", |o, v| o.row_format = Some(v));
    m.insert("CHARSET", |o, v| o.charset = Some(v));
    m.insert("CHARACTER SET", |o, v| o.charset = Some(v));
    m.insert("DEFAULT CHARSET", |o, v| o.charset = Some(v));
    m.insert("DEFAULT CHARACTER SET", |o, v| o.charset = Some(v));
    m.insert("COLLATE", |o, v| o.collation = Some(v));
    m.insert("DEFAULT COLLATE", |o, v| o.collation = Some(v));
    m.insert("PRIMARY_ZONE", |o, v| o.primary_zone = Some(v));
    m.insert("TABLEGROUP", |o, v| o.table_group = Some(v));
    m.insert("ENGINE", |o, v| o.engine = Some(v));
    m.insert("TABLESPACE", |o, v| o.tablespace = Some(v));
    m.insert("AUTO_INCREMENT_MODE", |o, v| o.auto_increment_mode = Some(v));
    m.insert("LOCATION", |o, v| o.location = Some(v));
    m.insert("PATTERN", |o, v| o.pattern = Some(v));
    m.insert("KV_ATTRIBUTES", |o, v| o.kv_attributes = Some(v));
    m.insert("PARTITION_TYPE", |o, v| o.partition_type = Some(v));
    m.insert("PASSWORD", |o, v| o.password = Some(v));
    m.insert("CONNECTION", |o, v| o.connection = Some(v));
    m.insert("DATA DIRECTORY", |o, v| o.data_directory = Some(v));
    m.insert("INDEX DIRECTORY", |o, v| o.index_directory = Some(v));
    m.insert("ENCRYPTION", |o, v| o.encryption = Some(v));
    m.insert("INSERT_METHOD", |o, v| o.insert_method = Some(v));
    m
});

static INTEGER_OPTIONS: Lazy<HashMap<&'static str, IntegerSetter>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, IntegerSetter> = HashMap::new();
    m.insert("PROGRESSIVE_MERGE_NUM", |o, v| o.progressive_merge_num = Some(v));
    m.insert("BLOCK_SIZE", |o, v| o.block_size = Some(v));
    m.insert("TABLE_ID", |o, v| o.table_id = Some(v));
    m.insert("REPLICA_NUM", |o, v| o.replica_num = Some(v));
    m.insert("STORAGE_FORMAT_VERSION", |o, v| o.storage_format_version = Some(v));
    m.insert("TABLET_SIZE", |o, v| o.tablet_size = Some(v));
    m.insert("PCTFREE", |o, v| o.pct_free = Some(v));
    m.insert("MAX_USED_PART_ID", |o, v| o.max_used_part_id = Some(v));
    m.insert("DELAY_KEY_WRITE", |o, v| o.delay_key_write = Some(v));
    m.insert("AVG_ROW_LENGTH", |o, v| o.avg_row_length = Some(v));
    m.insert("CHECKSUM", |o, v| o.checksum = Some(v));
    m.insert("DEFAULT_LOB_INROW_THRESHOLD", |o, v| o.default_lob_in_row_threshold = Some(v));
    m.insert("LOB_INROW_THRESHOLD", |o, v| o.lob_in_row_threshold = Some(v));
    m.insert("KEY_BLOCK_SIZE", |o, v| o.key_block_size = Some(v));
    m.insert("AUTO_INCREMENT_CACHE_SIZE", |o, v| o.auto_increment_cache_size = Some(v));
    m.insert("MIN_ROWS", |o, v| o.min_rows = Some(v));
    m.insert("MAX_ROWS", |o, v| o.max_rows = Some(v));
    m
});

static FLAG_OPTIONS: Lazy<HashMap<&'static str, FlagSetter>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, FlagSetter> = HashMap::new();
    m.insert("USE_BLOOM_FILTER", |o, v| o.use_bloom_filter = Some(v));
    m.insert("ENABLE_EXTENDED_ROWID", |o, v| o.enable_extended_row_id = Some(v));
    m.insert("MICRO_INDEX_CLUSTERED", |o, v| o.micro_index_clustered = Some(v));
    m
});

/// `PACK_KEYS` and the `STATS_*` options take an integer or `DEFAULT`.
static INT_OR_DEFAULT_OPTIONS: Lazy<HashMap<&'static str, TextSetter>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, TextSetter> = HashMap::new();
    m.insert("PACK_KEYS", |o, v| o.pack_keys = Some(v));
    m.insert("STATS_AUTO_RECALC", |o, v| o.stats_auto_recalc = Some(v));
    m.insert("STATS_PERSISTENT", |o, v| o.stats_persistent = Some(v));
    m.insert("STATS_SAMPLE_PAGES", |o, v| o.stats_sample_pages = Some(v));
    m
});

static BOOLS: Lazy<HashMap<&'static str, bool>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("TRUE", true);
    m.insert("FALSE", false);
    m
});

#[derive(Clone, Copy)]
enum ReadMode {
    Only,
    Write,
}

static READ_MODES: Lazy<HashMap<&'static str, ReadMode>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("ONLY", ReadMode::Only);
    m.insert("READ ONLY", ReadMode::Only);
    m.insert("WRITE", ReadMode::Write);
    m.insert("READ WRITE", ReadMode::Write);
    m
});

pub struct MySQLTableOptionsFactory;

impl Factory for MySQLTableOptionsFactory {
    type Node = [tree::TableOption];
    type Output = TableOptions;

    fn dialect_type(&self) -> DialectType {
        DIALECT
    }

    fn generate(&self, node: &[tree::TableOption]) -> Result<TableOptions> {
        log::trace!("lowering {} mysql table options", node.len());
        lower_table_options(node)
    }
}

pub(crate) fn lower_table_options(options: &[tree::TableOption]) -> Result<TableOptions> {
    let mut target = TableOptions::default();
    for option in options {
        target.merge(lower_table_option(option)?);
    }
    Ok(target)
}

fn lower_table_option(option: &tree::TableOption) -> Result<TableOptions> {
    let mut target = TableOptions::default();
    match option {
        tree::TableOption::SortKey(columns) => {
            target.sort_keys = Some(
                columns
                    .iter()
                    .map(|c| ColumnReference::new(None, None, c))
                    .collect(),
            );
        }
        tree::TableOption::Text { key, value } => {
            let set = lookup(&TEXT_OPTIONS, DIALECT, "table option", key)?;
            set(&mut target, value.clone());
        }
        tree::TableOption::Integer { key, value } => {
            let set = lookup(&INTEGER_OPTIONS, DIALECT, "table option", key)?;
            set(&mut target, number(DIALECT, "table option value", value)?);
        }
        tree::TableOption::Flag { key, value } => {
            let set = lookup(&FLAG_OPTIONS, DIALECT, "table option", key)?;
            set(&mut target, lookup(&BOOLS, DIALECT, "boolean", value)?);
        }
        tree::TableOption::IntOrDefault { key, value } => {
            let set = lookup(&INT_OR_DEFAULT_OPTIONS, DIALECT, "table option", key)?;
            set(&mut target, value.clone());
        }
        tree::TableOption::Locality { name, force } => {
            target.locality = Some(if *force {
                format!("{} FORCE", name)
            } else {
                name.clone()
            });
        }
        tree::TableOption::ExpireInfo(expr) => target.expire_info = Some(lower_expr(expr)?),
        tree::TableOption::AutoIncrement(value) => target.auto_increment = Some(value.clone()),
        tree::TableOption::Read(mode) => match lookup(&READ_MODES, DIALECT, "read mode", mode)? {
            ReadMode::Only => target.read_only = Some(true),
            ReadMode::Write => target.read_write = Some(true),
        },
        tree::TableOption::Parallel(None) => target.no_parallel = Some(true),
        tree::TableOption::Parallel(Some(degree)) => {
            target.parallel = Some(number(DIALECT, "parallel degree", degree)?)
        }
        tree::TableOption::Format(entries) => {
            let mut format = BTreeMap::new();
            for entry in entries {
                format.insert(entry.key.to_ascii_uppercase(), lower_format_value(&entry.value)?);
            }
            target.format = Some(format);
        }
        tree::TableOption::Ttl(ttls) => target.ttls = Some(ttls.iter().map(lower_ttl).collect()),
        tree::TableOption::Properties(properties) => {
            target.external_properties = Some(properties.iter().cloned().collect());
        }
        tree::TableOption::LobStorage { column, sizes } => {
            target.lob_storage = Some(LobStorageOption {
                column: column.clone(),
                sizes: sizes.clone(),
            });
        }
        tree::TableOption::AutoRefresh(mode) => target.auto_refresh = Some(mode.clone()),
        // UNION = () is an empty list, not an absent option
        tree::TableOption::Union(tables) => {
            target.union = Some(
                tables
                    .iter()
                    .map(|t| RelationFactor {
                        user_variable: t.user_variable.clone(),
                        ..RelationFactor::new(t.schema.as_deref(), &t.relation)
                    })
                    .collect(),
            );
        }
    }
    Ok(target)
}

fn lower_format_value(value: &tree::FormatValue) -> Result<Expression> {
    match value {
        tree::FormatValue::Text(text)
        | tree::FormatValue::Integer(text)
        | tree::FormatValue::Compression(text) => Ok(Expression::constant(text.clone())),
        tree::FormatValue::Expr(expr) => lower_expr(expr),
        tree::FormatValue::Bool(text) => Ok(Expression::boolean(lookup(&BOOLS, DIALECT, "boolean", text)?)),
        tree::FormatValue::List(items) => Ok(Expression::collection(lower_all(items)?)),
    }
}
