//! FROM-list items.
//!
//! Joins are left-deep: `a JOIN b JOIN c` lowers to
//! `Join(Join(a, b), c)`.

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "bindings")]
use ts_rs::TS;

use crate::expressions::{ColumnReference, Expression, FunctionCall};

/// One item of a FROM list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "snake_case")]
pub enum FromReference {
    Name(Box<NameReference>),
    Expression(Box<ExpressionReference>),
    Join(Box<JoinReference>),
    /// MySQL `{OJ table_reference}`
    Brace(Box<BraceReference>),
}

impl FromReference {
    /// Left-most leaf of a join chain (`self` when not a join).
    pub fn leftmost(&self) -> &FromReference {
        match self {
            FromReference::Join(join) => join.left.leftmost(),
            other => other,
        }
    }

    pub fn as_name(&self) -> Option<&NameReference> {
        match self {
            FromReference::Name(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_join(&self) -> Option<&JoinReference> {
        match self {
            FromReference::Join(join) => Some(join),
            _ => None,
        }
    }
}

impl From<NameReference> for FromReference {
    fn from(value: NameReference) -> Self {
        FromReference::Name(Box::new(value))
    }
}

impl From<ExpressionReference> for FromReference {
    fn from(value: ExpressionReference) -> Self {
        FromReference::Expression(Box::new(value))
    }
}

impl From<JoinReference> for FromReference {
    fn from(value: JoinReference) -> Self {
        FromReference::Join(Box::new(value))
    }
}

/// `[schema.]relation[@link] [PARTITION (...)] [AS OF ...] [alias]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct NameReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub relation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_usage: Option<PartitionUsage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flashback_usage: Option<FlashbackUsage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_variable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot: Option<Pivot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unpivot: Option<UnPivot>,
}

impl NameReference {
    pub fn new(schema: Option<&str>, relation: &str, alias: Option<&str>) -> Self {
        Self {
            schema: schema.map(str::to_string),
            relation: relation.to_string(),
            alias: alias.map(str::to_string),
            ..Default::default()
        }
    }
}

/// A subquery or table function used as a FROM item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct ExpressionReference {
    /// A [`Expression::Select`] or a table function call
    pub target: Expression,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alias_columns: Vec<String>,
    #[serde(default)]
    pub lateral: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flashback_usage: Option<FlashbackUsage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot: Option<Pivot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unpivot: Option<UnPivot>,
}

impl ExpressionReference {
    pub fn new(target: Expression, alias: Option<&str>) -> Self {
        Self {
            target,
            alias: alias.map(str::to_string),
            alias_columns: Vec::new(),
            lateral: false,
            flashback_usage: None,
            pivot: None,
            unpivot: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JoinType {
    Join,
    InnerJoin,
    CrossJoin,
    StraightJoin,
    LeftJoin,
    LeftOuterJoin,
    RightJoin,
    RightOuterJoin,
    FullJoin,
    FullOuterJoin,
    /// Bare `OUTER JOIN`
    OuterJoin,
    NaturalJoin,
    NaturalInnerJoin,
    NaturalLeftJoin,
    NaturalLeftOuterJoin,
    NaturalRightJoin,
    NaturalRightOuterJoin,
    NaturalFullJoin,
    NaturalFullOuterJoin,
}

impl JoinType {
    /// The NATURAL form of an outer join type. Returns `None` for types
    /// that have no natural counterpart.
    pub fn natural(self) -> Option<JoinType> {
        let natural = match self {
            JoinType::Join => JoinType::NaturalJoin,
            JoinType::InnerJoin => JoinType::NaturalInnerJoin,
            JoinType::LeftJoin => JoinType::NaturalLeftJoin,
            JoinType::LeftOuterJoin => JoinType::NaturalLeftOuterJoin,
            JoinType::RightJoin => JoinType::NaturalRightJoin,
            JoinType::RightOuterJoin => JoinType::NaturalRightOuterJoin,
            JoinType::FullJoin => JoinType::NaturalFullJoin,
            JoinType::FullOuterJoin => JoinType::NaturalFullOuterJoin,
            _ => return None,
        };
        Some(natural)
    }

    pub fn is_natural(self) -> bool {
        matches!(
            self,
            JoinType::NaturalJoin
                | JoinType::NaturalInnerJoin
                | JoinType::NaturalLeftJoin
                | JoinType::NaturalLeftOuterJoin
                | JoinType::NaturalRightJoin
                | JoinType::NaturalRightOuterJoin
                | JoinType::NaturalFullJoin
                | JoinType::NaturalFullOuterJoin
        )
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JoinType::Join => "JOIN",
            JoinType::InnerJoin => "INNER JOIN",
            JoinType::CrossJoin => "CROSS JOIN",
            JoinType::StraightJoin => "STRAIGHT_JOIN",
            JoinType::LeftJoin => "LEFT JOIN",
            JoinType::LeftOuterJoin => "LEFT OUTER JOIN",
            JoinType::RightJoin => "RIGHT JOIN",
            JoinType::RightOuterJoin => "RIGHT OUTER JOIN",
            JoinType::FullJoin => "FULL JOIN",
            JoinType::FullOuterJoin => "FULL OUTER JOIN",
            JoinType::OuterJoin => "OUTER JOIN",
            JoinType::NaturalJoin => "NATURAL JOIN",
            JoinType::NaturalInnerJoin => "NATURAL INNER JOIN",
            JoinType::NaturalLeftJoin => "NATURAL LEFT JOIN",
            JoinType::NaturalLeftOuterJoin => "NATURAL LEFT OUTER JOIN",
            JoinType::NaturalRightJoin => "NATURAL RIGHT JOIN",
            JoinType::NaturalRightOuterJoin => "NATURAL RIGHT OUTER JOIN",
            JoinType::NaturalFullJoin => "NATURAL FULL JOIN",
            JoinType::NaturalFullOuterJoin => "NATURAL FULL OUTER JOIN",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "snake_case")]
pub enum JoinCondition {
    On(Expression),
    Using(Vec<ColumnReference>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct JoinReference {
    pub left: FromReference,
    pub right: FromReference,
    pub join_type: JoinType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<JoinCondition>,
}

impl JoinReference {
    pub fn new(
        left: FromReference,
        right: FromReference,
        join_type: JoinType,
        condition: Option<JoinCondition>,
    ) -> Self {
        Self {
            left,
            right,
            join_type,
            condition,
        }
    }
}

/// Bare table name as used by DDL, `[schema.]relation[@link]`
///
/// `reverse_link` marks the Oracle `@!` form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct RelationFactor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub relation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_variable: Option<String>,
    #[serde(default)]
    pub reverse_link: bool,
}

impl RelationFactor {
    pub fn new(schema: Option<&str>, relation: &str) -> Self {
        Self {
            schema: schema.map(str::to_string),
            relation: relation.to_string(),
            ..Default::default()
        }
    }
}

/// `{OJ ...}` escape around a table reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct BraceReference {
    /// `OJ` as written
    pub name: String,
    pub reference: FromReference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartitionType {
    Partition,
    SubPartition,
}

/// External-table partition value, `PARTITION (name = value, ...)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct ExternalPartition {
    pub name: String,
    pub value: Expression,
}

/// `PARTITION (p1, p2)`, `SUBPARTITION FOR (1, 2)` or external partition values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct PartitionUsage {
    pub kind: PartitionType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name_list: Vec<String>,
    /// Key values of the `FOR (...)` form
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub for_values: Vec<Expression>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_partitions: Vec<ExternalPartition>,
}

impl PartitionUsage {
    pub fn names(kind: PartitionType, name_list: Vec<String>) -> Self {
        Self {
            kind,
            name_list,
            for_values: Vec::new(),
            external_partitions: Vec::new(),
        }
    }

    pub fn for_values(kind: PartitionType, values: Vec<Expression>) -> Self {
        Self {
            kind,
            name_list: Vec::new(),
            for_values: values,
            external_partitions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlashbackType {
    AsOfScn,
    AsOfTimestamp,
    AsOfSnapshot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct FlashbackUsage {
    pub kind: FlashbackType,
    pub value: Expression,
}

/// Aggregate of a PIVOT clause with its optional alias
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct FunctionItem {
    pub function: FunctionCall,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// Value of a PIVOT `IN (...)` list with its optional alias
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct ExpressionItem {
    pub expression: Expression,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// `PIVOT (agg [alias], ... FOR cols IN (v [alias], ...)) [alias]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct Pivot {
    pub aggregates: Vec<FunctionItem>,
    pub for_columns: Vec<ColumnReference>,
    pub in_items: Vec<ExpressionItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// Column group of an UNPIVOT `IN (...)` list, `(a, b) AS expr`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct InItem {
    pub columns: Vec<ColumnReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_expression: Option<Expression>,
}

/// `UNPIVOT [INCLUDE|EXCLUDE NULLS] (cols FOR cols IN (...)) [alias]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct UnPivot {
    pub include_nulls: bool,
    pub unpivot_columns: Vec<ColumnReference>,
    pub for_columns: Vec<ColumnReference>,
    pub in_items: Vec<InItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str) -> FromReference {
        NameReference::new(None, name, None).into()
    }

    #[test]
    fn test_leftmost_of_left_deep_chain() {
        let ab = JoinReference::new(table("a"), table("b"), JoinType::Join, None);
        let abc = JoinReference::new(ab.into(), table("c"), JoinType::LeftJoin, None);
        let from: FromReference = abc.into();
        assert_eq!(from.leftmost().as_name().unwrap().relation, "a");
    }

    #[test]
    fn test_natural_join_types() {
        assert_eq!(
            JoinType::FullOuterJoin.natural(),
            Some(JoinType::NaturalFullOuterJoin)
        );
        assert_eq!(JoinType::CrossJoin.natural(), None);
        assert!(JoinType::NaturalInnerJoin.is_natural());
        assert!(!JoinType::StraightJoin.is_natural());
    }

    #[test]
    fn test_join_type_display() {
        assert_eq!(JoinType::NaturalLeftOuterJoin.to_string(), "NATURAL LEFT OUTER JOIN");
    }
}
