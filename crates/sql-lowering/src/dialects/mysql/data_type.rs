//! MySQL data types.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::tree;
use crate::dialects::{lookup, phrase, DialectType, Factory};
use crate::error::{Error, Result};
use crate::statements::data_type::{
    ArrayType, CharacterType, CollectionType, DataType, NumberType, TimestampType, VectorType,
};

/// `SIGNED` / `UNSIGNED` after a numeric type
static SIGNEDNESS: Lazy<HashMap<&'static str, bool>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("SIGNED", true);
    m.insert("UNSIGNED", false);
    m
});

pub struct MySQLDataTypeFactory;

impl Factory for MySQLDataTypeFactory {
    type Node = tree::DataType;
    type Output = DataType;

    fn dialect_type(&self) -> DialectType {
        DialectType::MySQL
    }

    fn generate(&self, node: &tree::DataType) -> Result<DataType> {
        log::trace!("lowering mysql data type");
        lower_data_type(node)
    }
}

fn lower_data_type(node: &tree::DataType) -> Result<DataType> {
    match node {
        // CAST(x AS UNSIGNED INTEGER)
        tree::DataType::CastInteger(tokens) => Ok(DataType::general(phrase(tokens), Vec::new())),
        tree::DataType::Quoted(name) => Ok(DataType::general(name.clone(), Vec::new())),
        tree::DataType::Array(element) => Ok(DataType::Array(ArrayType {
            element: Box::new(lower_data_type(element)?),
        })),
        tree::DataType::Named { name, args } => Ok(DataType::general(name.clone(), args.clone())),
        tree::DataType::Character {
            name,
            length,
            binary,
            charset,
            collation,
        } => {
            let mut character = CharacterType::new(phrase(name), length.as_deref());
            character.binary = *binary;
            character.charset = charset.clone();
            character.collation = collation.clone();
            Ok(DataType::Character(character))
        }
        tree::DataType::Timestamp { precision } => Ok(DataType::Timestamp(TimestampType {
            precision: precision.clone(),
            with_time_zone: false,
            with_local_time_zone: false,
        })),
        tree::DataType::Number {
            name,
            precision_keyword,
            args,
            signedness,
            zerofill,
        } => {
            if args.len() > 2 {
                return Err(Error::unrecognized(
                    DialectType::MySQL,
                    "numeric precision",
                    args.join(", "),
                ));
            }
            // double PRECISION keeps the keyword in the name
            let name = match precision_keyword {
                Some(keyword) => format!("{} {}", name, keyword),
                None => name.clone(),
            };
            let mut number = NumberType::new(
                name,
                args.first().map(String::as_str),
                args.get(1).map(String::as_str),
            );
            number.signed = signedness
                .as_deref()
                .map(|s| lookup(&SIGNEDNESS, DialectType::MySQL, "signedness", s))
                .transpose()?;
            number.zero_fill = *zerofill;
            Ok(DataType::Number(number))
        }
        tree::DataType::Collection {
            name,
            values,
            binary,
            charset,
            collation,
        } => Ok(DataType::Collection(CollectionType {
            name: name.clone(),
            values: values.clone(),
            binary: *binary,
            charset: charset.clone(),
            collation: collation.clone(),
        })),
        tree::DataType::Vector { name, dimension } => Ok(DataType::Vector(VectorType {
            name: name.clone(),
            dimension: dimension.clone(),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lower(node: tree::DataType) -> DataType {
        MySQLDataTypeFactory.generate(&node).unwrap()
    }

    #[test]
    fn test_unsigned_zerofill_decimal() {
        let node = tree::DataType::Number {
            name: "decimal".to_string(),
            precision_keyword: None,
            args: vec!["10".to_string(), "2".to_string()],
            signedness: Some("unsigned".to_string()),
            zerofill: true,
        };
        let mut expected = NumberType::new("decimal", Some("10"), Some("2"));
        expected.signed = Some(false);
        expected.zero_fill = true;
        assert_eq!(lower(node), DataType::Number(expected));
    }

    #[test]
    fn test_double_precision_name() {
        let node = tree::DataType::Number {
            name: "double".to_string(),
            precision_keyword: Some("PRECISION".to_string()),
            args: vec![],
            signedness: None,
            zerofill: false,
        };
        assert_eq!(lower(node), DataType::number("double PRECISION", None, None));
    }

    #[test]
    fn test_national_varchar_with_charset() {
        let node = tree::DataType::Character {
            name: vec!["national".to_string(), "varchar".to_string()],
            length: Some("64".to_string()),
            binary: true,
            charset: Some("utf8mb4".to_string()),
            collation: None,
        };
        match lower(node) {
            DataType::Character(c) => {
                assert_eq!(c.name, "national varchar");
                assert_eq!(c.length.as_deref(), Some("64"));
                assert!(c.binary);
                assert_eq!(c.charset.as_deref(), Some("utf8mb4"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_cast_integer_and_array() {
        let signed = tree::DataType::CastInteger(vec!["SIGNED".to_string(), "INTEGER".to_string()]);
        assert_eq!(lower(signed), DataType::general("SIGNED INTEGER", vec![]));

        let array = tree::DataType::Array(Box::new(tree::DataType::number("int", &[])));
        assert_eq!(
            lower(array),
            DataType::Array(ArrayType {
                element: Box::new(DataType::number("int", None, None))
            })
        );
    }

    #[test]
    fn test_unknown_signedness_is_rejected() {
        let node = tree::DataType::Number {
            name: "int".to_string(),
            precision_keyword: None,
            args: vec![],
            signedness: Some("UNSIGNEDISH".to_string()),
            zerofill: false,
        };
        let err = MySQLDataTypeFactory.generate(&node).unwrap_err();
        assert!(matches!(err, Error::Unrecognized { rule: "signedness", .. }));
    }
}
