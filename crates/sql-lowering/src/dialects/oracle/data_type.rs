//! Oracle data types.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::tree;
use crate::dialects::{lookup, phrase, DialectType, Factory};
use crate::error::Result;
use crate::statements::data_type::{CharacterType, DataType, IntervalType, NumberType, TimestampType};

const DIALECT: DialectType = DialectType::Oracle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeZone {
    Plain,
    Local,
}

static TIME_ZONES: Lazy<HashMap<&'static str, TimeZone>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("WITH TIME ZONE", TimeZone::Plain);
    m.insert("WITH LOCAL TIME ZONE", TimeZone::Local);
    m
});

/// `varchar2(10 BYTE)` / `varchar2(10 CHAR)`
static LENGTH_SEMANTICS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("BYTE", "BYTE");
    m.insert("CHAR", "CHAR");
    m
});

pub struct OracleDataTypeFactory;

impl Factory for OracleDataTypeFactory {
    type Node = tree::DataType;
    type Output = DataType;

    fn dialect_type(&self) -> DialectType {
        DIALECT
    }

    fn generate(&self, node: &tree::DataType) -> Result<DataType> {
        log::trace!("lowering oracle data type");
        lower_data_type(node)
    }
}

pub(crate) fn lower_data_type(node: &tree::DataType) -> Result<DataType> {
    match node {
        tree::DataType::Number { name, precision, scale } => {
            // number(*, 2)
            let star = precision.as_deref().map(str::trim) == Some("*");
            let precision = if star { None } else { precision.as_deref() };
            let mut number = NumberType::new(name.clone(), precision, scale.as_deref());
            number.star_precision = star;
            Ok(DataType::Number(number))
        }
        tree::DataType::Character {
            name,
            length,
            length_semantics,
            charset,
            collation,
        } => {
            let mut character = CharacterType::new(phrase(name), length.as_deref());
            character.length_option = length_semantics
                .as_deref()
                .map(|s| lookup(&LENGTH_SEMANTICS, DIALECT, "length semantics", s).map(str::to_string))
                .transpose()?;
            character.charset = charset.clone();
            character.collation = collation.clone();
            Ok(DataType::Character(character))
        }
        tree::DataType::Timestamp { precision, time_zone } => {
            let zone = if time_zone.is_empty() {
                None
            } else {
                Some(lookup(&TIME_ZONES, DIALECT, "time zone", &phrase(time_zone))?)
            };
            Ok(DataType::Timestamp(TimestampType {
                precision: precision.clone(),
                with_time_zone: zone == Some(TimeZone::Plain),
                with_local_time_zone: zone == Some(TimeZone::Local),
            }))
        }
        tree::DataType::IntervalYearToMonth { year_precision } => {
            Ok(DataType::Interval(IntervalType::YearToMonth {
                year_precision: year_precision.clone(),
            }))
        }
        tree::DataType::IntervalDayToSecond {
            day_precision,
            second_precision,
        } => Ok(DataType::Interval(IntervalType::DayToSecond {
            day_precision: day_precision.clone(),
            second_precision: second_precision.clone(),
        })),
        tree::DataType::Named { name, args } => Ok(DataType::general(name.clone(), args.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn lower(node: tree::DataType) -> DataType {
        OracleDataTypeFactory.generate(&node).unwrap()
    }

    #[test]
    fn test_number_star_precision() {
        let mut expected = NumberType::new("number", None, Some("2"));
        expected.star_precision = true;
        assert_eq!(
            lower(tree::DataType::number("number", Some("*"), Some("2"))),
            DataType::Number(expected)
        );
        assert_eq!(
            lower(tree::DataType::number("number", Some("10"), None)),
            DataType::number("number", Some("10"), None)
        );
    }

    #[test]
    fn test_varchar2_char_semantics() {
        let node = tree::DataType::Character {
            name: vec!["varchar2".to_string()],
            length: Some("10".to_string()),
            length_semantics: Some("char".to_string()),
            charset: None,
            collation: None,
        };
        match lower(node) {
            DataType::Character(c) => {
                assert_eq!(c.name, "varchar2");
                assert_eq!(c.length_option.as_deref(), Some("CHAR"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_timestamp_with_local_time_zone() {
        let node = tree::DataType::Timestamp {
            precision: Some("6".to_string()),
            time_zone: ["WITH", "LOCAL", "TIME", "ZONE"].iter().map(|s| s.to_string()).collect(),
        };
        assert_eq!(
            lower(node),
            DataType::Timestamp(TimestampType {
                precision: Some("6".to_string()),
                with_time_zone: false,
                with_local_time_zone: true,
            })
        );
    }

    #[test]
    fn test_interval_day_to_second() {
        let node = tree::DataType::IntervalDayToSecond {
            day_precision: Some("2".to_string()),
            second_precision: None,
        };
        assert_eq!(
            lower(node),
            DataType::Interval(IntervalType::DayToSecond {
                day_precision: Some("2".to_string()),
                second_precision: None,
            })
        );
    }

    #[test]
    fn test_unknown_time_zone_is_rejected() {
        let node = tree::DataType::Timestamp {
            precision: None,
            time_zone: vec!["WITH".to_string(), "ZONE".to_string()],
        };
        assert!(matches!(
            OracleDataTypeFactory.generate(&node).unwrap_err(),
            Error::Unrecognized { rule: "time zone", .. }
        ));
    }
}
