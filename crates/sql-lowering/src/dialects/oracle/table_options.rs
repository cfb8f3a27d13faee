//! Oracle table options, physical attributes included.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;

use super::expression::{lower_all, lower_expr};
use super::tree;
use crate::dialects::{lookup, number, phrase, DialectType, Factory};
use crate::error::Result;
use crate::expressions::{ColumnReference, Expression};
use crate::statements::table_options::{LobStorageOption, TableOptions};

const DIALECT: DialectType = DialectType::Oracle;

type TextSetter = fn(&mut TableOptions, String);
type IntegerSetter = fn(&mut TableOptions, u64);
type FlagSetter = fn(&mut TableOptions, bool);

static TEXT_OPTIONS: Lazy<HashMap<&'static str, TextSetter>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, TextSetter> = HashMap::new();
    m.insert("TABLE_MODE", |o, v| o.table_mode = Some(v));
    m.insert("DUPLICATE_SCOPE", |o, v| o.duplicate_scope = Some(v));
    m.insert("PRIMARY_ZONE", |o, v| o.primary_zone = Some(v));
    m.insert("TABLEGROUP", |o, v| o.table_group = Some(v));
    m.insert("ENGINE", |o, v| o.engine = Some(v));
    m.insert("TABLESPACE", |o, v| o.tablespace = Some(v));
    m.insert("LOCATION", |o, v| o.location = Some(v));
    m.insert("PATTERN", |o, v| o.pattern = Some(v));
    m.insert("PARTITION_TYPE", |o, v| o.partition_type = Some(v));
    m
});

static INTEGER_OPTIONS: Lazy<HashMap<&'static str, IntegerSetter>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, IntegerSetter> = HashMap::new();
    m.insert("PROGRESSIVE_MERGE_NUM", |o, v| o.progressive_merge_num = Some(v));
    m.insert("BLOCK_SIZE", |o, v| o.block_size = Some(v));
    m.insert("TABLE_ID", |o, v| o.table_id = Some(v));
    m.insert("REPLICA_NUM", |o, v| o.replica_num = Some(v));
    m.insert("TABLET_SIZE", |o, v| o.tablet_size = Some(v));
    m.insert("MAX_USED_PART_ID", |o, v| o.max_used_part_id = Some(v));
    m.insert("PCTFREE", |o, v| o.pct_free = Some(v));
    m.insert("PCTUSED", |o, v| o.pct_used = Some(v));
    m.insert("INITRANS", |o, v| o.ini_trans = Some(v));
    m.insert("MAXTRANS", |o, v| o.max_trans = Some(v));
    m
});

static FLAG_OPTIONS: Lazy<HashMap<&'static str, FlagSetter>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, FlagSetter> = HashMap::new();
    m.insert("USE_BLOOM_FILTER", |o, v| o.use_bloom_filter = Some(v));
    m.insert("ENABLE_EXTENDED_ROWID", |o, v| o.enable_extended_row_id = Some(v));
    m.insert("MICRO_INDEX_CLUSTERED", |o, v| o.micro_index_clustered = Some(v));
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

/// `true` enables row movement
static ROW_MOVEMENT: Lazy<HashMap<&'static str, bool>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("ENABLE", true);
    m.insert("ENABLE ROW MOVEMENT", true);
    m.insert("DISABLE", false);
    m.insert("DISABLE ROW MOVEMENT", false);
    m
});

static AUTO_REFRESH: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("OFF", "OFF");
    m.insert("IMMEDIATE", "IMMEDIATE");
    m.insert("INTERVAL", "INTERVAL");
    m
});

pub struct OracleTableOptionsFactory;

impl Factory for OracleTableOptionsFactory {
    type Node = [tree::TableOption];
    type Output = TableOptions;

    fn dialect_type(&self) -> DialectType {
        DIALECT
    }

    fn generate(&self, node: &[tree::TableOption]) -> Result<TableOptions> {
        log::trace!("lowering {} oracle table options", node.len());
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
        tree::TableOption::Locality { name, force } => {
            target.locality = Some(if *force {
                format!("{} FORCE", name)
            } else {
                name.clone()
            });
        }
        tree::TableOption::ExpireInfo(expr) => target.expire_info = Some(lower_expr(expr)?),
        // COMPRESS FOR OLTP -> "FOR OLTP"
        tree::TableOption::Compress(tokens) => target.compress = Some(phrase(tokens)),
        tree::TableOption::NoCompress => target.no_compress = Some(true),
        tree::TableOption::Read(mode) => match lookup(&READ_MODES, DIALECT, "read mode", mode)? {
            ReadMode::Only => target.read_only = Some(true),
            ReadMode::Write => target.read_write = Some(true),
        },
        tree::TableOption::RowMovement(text) => {
            if lookup(&ROW_MOVEMENT, DIALECT, "row movement", text)? {
                target.enable_row_movement = Some(true);
            } else {
                target.disable_row_movement = Some(true);
            }
        }
        tree::TableOption::Parallel(None) => target.no_parallel = Some(true),
        tree::TableOption::Parallel(Some(degree)) => {
            target.parallel = Some(number(DIALECT, "parallel degree", degree)?)
        }
        tree::TableOption::Storage(items) => target.storage = Some(items.clone()),
        tree::TableOption::Format(entries) => {
            let mut format = BTreeMap::new();
            for entry in entries {
                format.insert(entry.key.to_ascii_uppercase(), lower_format_value(&entry.value)?);
            }
            target.format = Some(format);
        }
        tree::TableOption::Properties(properties) => {
            target.external_properties = Some(properties.iter().cloned().collect());
        }
        tree::TableOption::LobStorage { column, sizes } => {
            target.lob_storage = Some(LobStorageOption {
                column: column.clone(),
                sizes: sizes.clone(),
            });
        }
        tree::TableOption::AutoRefresh(mode) => {
            target.auto_refresh = Some(lookup(&AUTO_REFRESH, DIALECT, "auto refresh", mode)?.to_string())
        }
    }
    Ok(target)
}

fn lower_format_value(value: &tree::FormatValue) -> Result<Expression> {
    match value {
        tree::FormatValue::Text(text) => Ok(Expression::constant(text.clone())),
        tree::FormatValue::Expr(expr) => lower_expr(expr),
        tree::FormatValue::Bool(text) => Ok(Expression::boolean(lookup(&BOOLS, DIALECT, "boolean", text)?)),
        tree::FormatValue::List(items) => Ok(Expression::collection(lower_all(items)?)),
    }
}
