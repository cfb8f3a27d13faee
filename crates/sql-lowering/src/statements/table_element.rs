//! Column definitions, indexes and constraints of CREATE/ALTER TABLE.

use serde::{Deserialize, Serialize};
#[cfg(feature = "bindings")]
use ts_rs::TS;

use super::data_type::DataType;
use super::partition::Partition;
use super::select::SortDirection;
use crate::expressions::{ColumnReference, Expression};

/// One element of a table definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "snake_case")]
pub enum TableElement {
    Column(Box<ColumnDefinition>),
    Index(Box<OutOfLineIndex>),
    Constraint(Box<OutOfLineConstraint>),
}

impl TableElement {
    pub fn as_column(&self) -> Option<&ColumnDefinition> {
        match self {
            TableElement::Column(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_index(&self) -> Option<&OutOfLineIndex> {
        match self {
            TableElement::Index(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_constraint(&self) -> Option<&OutOfLineConstraint> {
        match self {
            TableElement::Constraint(c) => Some(c),
            _ => None,
        }
    }
}

impl From<ColumnDefinition> for TableElement {
    fn from(value: ColumnDefinition) -> Self {
        TableElement::Column(Box::new(value))
    }
}

impl From<OutOfLineIndex> for TableElement {
    fn from(value: OutOfLineIndex) -> Self {
        TableElement::Index(Box::new(value))
    }
}

impl From<OutOfLineConstraint> for TableElement {
    fn from(value: OutOfLineConstraint) -> Self {
        TableElement::Constraint(Box::new(value))
    }
}

/// `col [type] [AS (expr) ...] [attributes] [FIRST|BEFORE c|AFTER c]`
///
/// The data type is optional for Oracle `ALTER TABLE ... MODIFY`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct ColumnDefinition {
    pub column: ColumnReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<ColumnAttributes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_option: Option<GenerateOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Oracle `VISIBLE` / `INVISIBLE`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl ColumnDefinition {
    pub fn new(column: ColumnReference, data_type: Option<DataType>) -> Self {
        Self {
            column,
            data_type,
            attributes: None,
            generate_option: None,
            location: None,
            visible: None,
        }
    }
}

/// Attributes written after a column's type.
///
/// Constraints accumulate in source order; every other attribute keeps the
/// last value written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct ColumnAttributes {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<InLineConstraint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orig_default: Option<Expression>,
    #[serde(default)]
    pub auto_increment: bool,
    /// Quoted as written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srid: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_index: Option<Vec<String>>,
}

impl ColumnAttributes {
    /// Fold `other` into `self`, `other` being written later.
    pub fn merge(&mut self, other: ColumnAttributes) {
        self.constraints.extend(other.constraints);
        if other.default.is_some() {
            self.default = other.default;
        }
        if other.orig_default.is_some() {
            self.orig_default = other.orig_default;
        }
        self.auto_increment |= other.auto_increment;
        if other.comment.is_some() {
            self.comment = other.comment;
        }
        if other.on_update.is_some() {
            self.on_update = other.on_update;
        }
        if other.id.is_some() {
            self.id = other.id;
        }
        if other.srid.is_some() {
            self.srid = other.srid;
        }
        if other.collation.is_some() {
            self.collation = other.collation;
        }
        if other.skip_index.is_some() {
            self.skip_index = other.skip_index;
        }
    }
}

/// Constraint attached to a single column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "snake_case")]
pub enum InLineConstraint {
    /// `[CONSTRAINT n] [NOT] NULL | PRIMARY KEY | UNIQUE | KEY [state]`
    Plain {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        nullable: Option<bool>,
        #[serde(default)]
        primary_key: bool,
        #[serde(default)]
        unique: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        state: Option<ConstraintState>,
    },
    /// `[CONSTRAINT n] CHECK (expr) [state]`
    Check {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        check: Expression,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        state: Option<ConstraintState>,
    },
    /// Oracle `[CONSTRAINT n] REFERENCES t (cols) [state]`
    Foreign {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        reference: ForeignReference,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        state: Option<ConstraintState>,
    },
}

impl InLineConstraint {
    pub fn nullable(nullable: bool) -> Self {
        InLineConstraint::Plain {
            name: None,
            nullable: Some(nullable),
            primary_key: false,
            unique: false,
            state: None,
        }
    }

    pub fn primary_key() -> Self {
        InLineConstraint::Plain {
            name: None,
            nullable: None,
            primary_key: true,
            unique: false,
            state: None,
        }
    }

    pub fn unique() -> Self {
        InLineConstraint::Plain {
            name: None,
            nullable: None,
            primary_key: false,
            unique: true,
            state: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenerateType {
    Virtual,
    Stored,
}

/// Oracle identity column sequence option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "snake_case")]
pub enum SequenceOption {
    StartWith(String),
    IncrementBy(String),
    MinValue(String),
    NoMinValue,
    MaxValue(String),
    NoMaxValue,
    Cache(String),
    NoCache,
    Cycle,
    NoCycle,
    Order,
    NoOrder,
}

/// Generated column, `[GENERATED opts] AS (expr) [VIRTUAL|STORED]`.
///
/// Oracle identity columns (`GENERATED ALWAYS AS IDENTITY (...)`) carry
/// sequence options instead of an expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct GenerateOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_options: Option<Vec<SequenceOption>>,
    /// `GENERATED ALWAYS` text as written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_option: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<GenerateType>,
}

impl GenerateOption {
    pub fn expression(expression: Expression) -> Self {
        Self {
            expression: Some(expression),
            sequence_options: None,
            generate_option: None,
            kind: None,
        }
    }

    pub fn identity(options: Option<Vec<SequenceOption>>) -> Self {
        Self {
            expression: None,
            sequence_options: options,
            generate_option: None,
            kind: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    First,
    Before,
    After,
}

/// MySQL column placement, `FIRST`, `BEFORE col` or `AFTER col`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct Location {
    pub kind: LocationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<ColumnReference>,
}

/// Key of an index column list. MySQL gives a column reference, Oracle an
/// expression (plain names lower to a RelationReference).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct SortColumn {
    pub column: Expression,
    /// Key prefix length, `col(13)`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<SortDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

impl SortColumn {
    pub fn new(column: Expression) -> Self {
        Self {
            column,
            length: None,
            direction: None,
            id: None,
        }
    }
}

/// `[SPATIAL|FULLTEXT] INDEX|KEY [name] (cols) [options] [partition] [column groups]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct OutOfLineIndex {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub columns: Vec<SortColumn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<IndexOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition: Option<Partition>,
    #[serde(default)]
    pub spatial: bool,
    #[serde(default)]
    pub fulltext: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_groups: Option<Vec<ColumnGroupElement>>,
}

impl OutOfLineIndex {
    pub fn new(name: Option<&str>, columns: Vec<SortColumn>) -> Self {
        Self {
            name: name.map(str::to_string),
            columns,
            options: None,
            partition: None,
            spatial: false,
            fulltext: false,
            column_groups: None,
        }
    }
}

/// Table-level constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "snake_case")]
pub enum OutOfLineConstraint {
    /// `PRIMARY KEY [name] (cols)` or `UNIQUE [KEY|INDEX] [name] (cols)`
    PrimaryOrUnique {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index_name: Option<String>,
        primary: bool,
        columns: Vec<SortColumn>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        state: Option<ConstraintState>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        column_groups: Option<Vec<ColumnGroupElement>>,
    },
    /// `CHECK (expr) [state]`
    Check {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        check: Expression,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        state: Option<ConstraintState>,
    },
    /// `FOREIGN KEY [index] (cols) REFERENCES ...`
    Foreign {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index_name: Option<String>,
        columns: Vec<SortColumn>,
        reference: ForeignReference,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        state: Option<ConstraintState>,
    },
}

impl OutOfLineConstraint {
    pub fn name(&self) -> Option<&str> {
        match self {
            OutOfLineConstraint::PrimaryOrUnique { name, .. }
            | OutOfLineConstraint::Check { name, .. }
            | OutOfLineConstraint::Foreign { name, .. } => name.as_deref(),
        }
    }

    pub(crate) fn set_name(&mut self, value: Option<String>) {
        match self {
            OutOfLineConstraint::PrimaryOrUnique { name, .. }
            | OutOfLineConstraint::Check { name, .. }
            | OutOfLineConstraint::Foreign { name, .. } => *name = value,
        }
    }

    pub fn is_primary_key(&self) -> bool {
        matches!(
            self,
            OutOfLineConstraint::PrimaryOrUnique { primary: true, .. }
        )
    }

    pub fn is_unique_key(&self) -> bool {
        matches!(
            self,
            OutOfLineConstraint::PrimaryOrUnique { primary: false, .. }
        )
    }

    pub fn state(&self) -> Option<&ConstraintState> {
        match self {
            OutOfLineConstraint::PrimaryOrUnique { state, .. }
            | OutOfLineConstraint::Check { state, .. }
            | OutOfLineConstraint::Foreign { state, .. } => state.as_ref(),
        }
    }
}

/// State clause of a constraint: `[NOT] ENFORCED`, `RELY`, `ENABLE`,
/// `VALIDATE`, `USING INDEX options`, partition of the backing index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct ConstraintState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforced: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rely: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate: Option<bool>,
    #[serde(default)]
    pub using_index_flag: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_options: Option<IndexOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition: Option<Partition>,
}

impl ConstraintState {
    pub fn enforced(enforced: bool) -> Self {
        Self {
            enforced: Some(enforced),
            ..Default::default()
        }
    }
}

/// Index options. Unset options stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct IndexOptions {
    /// `GLOBAL` is `Some(true)`, `LOCAL` is `Some(false)`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub using_btree: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub using_hash: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_parser: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_parallel: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tablespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_table_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_table_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_column_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_used_part_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_row_id: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub storing: Vec<ColumnReference>,
    /// `CTXCAT(...)` columns of a full-text index
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ctxcat: Vec<ColumnReference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub storage: Vec<String>,
}

impl IndexOptions {
    /// Fill unset `USING BTREE|HASH` from an algorithm clause written before
    /// the option list.
    pub fn inherit_algorithm(&mut self, earlier: &IndexOptions) {
        if self.using_btree.is_none() {
            self.using_btree = earlier.using_btree;
        }
        if self.using_hash.is_none() {
            self.using_hash = earlier.using_hash;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OnOption {
    Restrict,
    Cascade,
    SetNull,
    NoAction,
    SetDefault,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchOption {
    Simple,
    Full,
    Partial,
}

/// `REFERENCES [schema.]table[@link] (cols) [MATCH ...] [ON DELETE ...] [ON UPDATE ...]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct ForeignReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub relation: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<ColumnReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_variable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_option: Option<MatchOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<OnOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<OnOption>,
}

/// Column-store group, `WITH COLUMN GROUP (...)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "snake_case")]
pub enum ColumnGroupElement {
    AllColumns,
    EachColumn,
    Custom { name: String, columns: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_merge_keeps_constraint_order_and_last_scalar() {
        let mut first = ColumnAttributes {
            constraints: vec![InLineConstraint::nullable(false)],
            comment: Some("'a'".to_string()),
            ..Default::default()
        };
        first.merge(ColumnAttributes {
            constraints: vec![InLineConstraint::primary_key()],
            comment: Some("'b'".to_string()),
            ..Default::default()
        });
        assert_eq!(
            first.constraints,
            vec![
                InLineConstraint::nullable(false),
                InLineConstraint::primary_key()
            ]
        );
        assert_eq!(first.comment.as_deref(), Some("'b'"));
    }

    #[test]
    fn test_inherit_algorithm_does_not_override() {
        let mut options = IndexOptions {
            using_hash: Some(true),
            ..Default::default()
        };
        options.inherit_algorithm(&IndexOptions {
            using_btree: Some(true),
            using_hash: Some(false),
            ..Default::default()
        });
        assert_eq!(options.using_btree, Some(true));
        assert_eq!(options.using_hash, Some(true));
    }

    #[test]
    fn test_constraint_name_accessors() {
        let mut constraint = OutOfLineConstraint::Check {
            name: None,
            check: Expression::constant("1"),
            state: None,
        };
        constraint.set_name(Some("ck".to_string()));
        assert_eq!(constraint.name(), Some("ck"));
        assert!(!constraint.is_primary_key());
        assert!(!constraint.is_unique_key());
    }
}
