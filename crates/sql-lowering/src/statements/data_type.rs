//! Data types named in column definitions, casts and JSON `RETURNING` clauses.
//!
//! Length, precision and scale keep their source text so `number(10, 02)` is
//! not renormalised.

use serde::{Deserialize, Serialize};
#[cfg(feature = "bindings")]
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DataType {
    /// Any type with a name and optional raw arguments, e.g. `blob`, `bit(8)`, `json`
    General(GeneralDataType),
    Character(CharacterType),
    Number(NumberType),
    Timestamp(TimestampType),
    Interval(IntervalType),
    /// `enum('a','b')` / `set('a','b')`
    Collection(CollectionType),
    /// `int[]`
    Array(ArrayType),
    Vector(VectorType),
}

impl DataType {
    /// The type name as written (`varchar`, `number`, ...).
    pub fn name(&self) -> &str {
        match self {
            DataType::General(t) => &t.name,
            DataType::Character(t) => &t.name,
            DataType::Number(t) => &t.name,
            DataType::Timestamp(_) => "timestamp",
            DataType::Interval(t) => match t {
                IntervalType::YearToMonth { .. } => "interval year to month",
                IntervalType::DayToSecond { .. } => "interval day to second",
            },
            DataType::Collection(t) => &t.name,
            DataType::Array(t) => t.element.name(),
            DataType::Vector(t) => &t.name,
        }
    }

    pub fn general(name: impl Into<String>, args: Vec<String>) -> Self {
        DataType::General(GeneralDataType {
            name: name.into(),
            args,
        })
    }

    pub fn character(name: impl Into<String>, length: Option<&str>) -> Self {
        DataType::Character(CharacterType::new(name, length))
    }

    pub fn number(name: impl Into<String>, precision: Option<&str>, scale: Option<&str>) -> Self {
        DataType::Number(NumberType::new(name, precision, scale))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct GeneralDataType {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct CharacterType {
    /// Multi-word names are space-joined: `national varchar`, `character varying`
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    /// Oracle `BYTE` or `CHAR` length semantics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_option: Option<String>,
    #[serde(default)]
    pub binary: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
}

impl CharacterType {
    pub fn new(name: impl Into<String>, length: Option<&str>) -> Self {
        Self {
            name: name.into(),
            length: length.map(str::to_string),
            length_option: None,
            binary: false,
            charset: None,
            collation: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct NumberType {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
    /// Oracle `number(*, s)`
    #[serde(default)]
    pub star_precision: bool,
    /// `Some(true)` for SIGNED, `Some(false)` for UNSIGNED
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed: Option<bool>,
    #[serde(default)]
    pub zero_fill: bool,
}

impl NumberType {
    pub fn new(name: impl Into<String>, precision: Option<&str>, scale: Option<&str>) -> Self {
        Self {
            name: name.into(),
            precision: precision.map(str::to_string),
            scale: scale.map(str::to_string),
            star_precision: false,
            signed: None,
            zero_fill: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct TimestampType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<String>,
    #[serde(default)]
    pub with_time_zone: bool,
    #[serde(default)]
    pub with_local_time_zone: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "snake_case")]
pub enum IntervalType {
    YearToMonth {
        #[serde(skip_serializing_if = "Option::is_none")]
        year_precision: Option<String>,
    },
    DayToSecond {
        #[serde(skip_serializing_if = "Option::is_none")]
        day_precision: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        second_precision: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct CollectionType {
    pub name: String,
    /// Members as written, quotes included
    pub values: Vec<String>,
    #[serde(default)]
    pub binary: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct ArrayType {
    pub element: Box<DataType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct VectorType {
    pub name: String,
    pub dimension: String,
}
