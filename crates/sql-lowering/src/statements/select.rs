//! Select bodies and their clauses.
//!
//! A [`SelectBody`] is one query block. Set operations link blocks through
//! [`SelectBody::related_select`], a forward-only chain: `a UNION b MINUS c` is
//! `a -> (UNION, b) -> (MINUS, c)`. Clauses written after the whole chain
//! (ORDER BY, LIMIT, FETCH, FOR UPDATE) are stored on the last block, see
//! [`SelectBody::last_mut`].

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "bindings")]
use ts_rs::TS;

use crate::expressions::{ColumnReference, Expression, WindowSpec};
use crate::statements::from::FromReference;

/// One query block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct SelectBody {
    /// `DISTINCT`, `ALL`, `SQL_CALC_FOUND_ROWS`, ... space-joined as written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_options: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projections: Vec<Projection>,
    /// `VALUES ROW(...), ROW(...)`; never set together with `projections`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Vec<Expression>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub froms: Vec<FromReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#where: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_with: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_by: Option<Expression>,
    #[serde(default)]
    pub nocycle: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<GroupBy>,
    #[serde(default)]
    pub with_rollup: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub having: Option<Expression>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub windows: Vec<Window>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<Limit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch: Option<Fetch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub for_update: Option<ForUpdate>,
    /// MySQL `LOCK IN SHARE MODE`
    #[serde(default)]
    pub lock_in_share_mode: bool,
    /// Oracle `WITH CHECK OPTION` on a FROM subquery
    #[serde(default)]
    pub with_check_option: bool,
    #[serde(default)]
    pub recursive: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub with: Vec<WithTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_select: Option<Box<RelatedSelectBody>>,
}

impl SelectBody {
    /// A projection query block.
    pub fn new(projections: Vec<Projection>, froms: Vec<FromReference>) -> Self {
        Self {
            projections,
            froms,
            ..Default::default()
        }
    }

    /// A `VALUES` row-list block.
    pub fn values(rows: Vec<Vec<Expression>>) -> Self {
        Self {
            values: rows,
            ..Default::default()
        }
    }

    /// The last block of the set-operation chain (`self` when there is none).
    pub fn last(&self) -> &SelectBody {
        match &self.related_select {
            Some(related) => related.select.last(),
            None => self,
        }
    }

    /// Mutable access to the last block of the set-operation chain.
    pub fn last_mut(&mut self) -> &mut SelectBody {
        match self.related_select {
            Some(ref mut related) => related.select.last_mut(),
            None => self,
        }
    }

    /// Append `select` to the end of the chain with the given set operator.
    pub fn chain(&mut self, relation: RelationType, select: SelectBody) {
        self.last_mut().related_select = Some(Box::new(RelatedSelectBody { relation, select }));
    }

    /// Number of blocks in the chain, including this one.
    pub fn chain_len(&self) -> usize {
        1 + self
            .related_select
            .as_ref()
            .map_or(0, |related| related.select.chain_len())
    }

    /// Serialize this select body to JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize a select body from JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One select-list item. `*` is a projection with `star` set and no column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct Projection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_label: Option<String>,
    #[serde(default)]
    pub star: bool,
}

impl Projection {
    pub fn new(column: Expression, column_label: Option<&str>) -> Self {
        Self {
            column: Some(column),
            column_label: column_label.map(str::to_string),
            star: false,
        }
    }

    pub fn star() -> Self {
        Self {
            column: None,
            column_label: None,
            star: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    Union,
    UnionAll,
    UnionDistinct,
    UnionUnique,
    Intersect,
    Minus,
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RelationType::Union => "UNION",
            RelationType::UnionAll => "UNION ALL",
            RelationType::UnionDistinct => "UNION DISTINCT",
            RelationType::UnionUnique => "UNION UNIQUE",
            RelationType::Intersect => "INTERSECT",
            RelationType::Minus => "MINUS",
        };
        f.write_str(s)
    }
}

/// The next link of a set-operation chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct RelatedSelectBody {
    pub relation: RelationType,
    pub select: SelectBody,
}

/// A common table expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct WithTable {
    pub alias: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alias_list: Vec<String>,
    pub select: SelectBody,
}

impl WithTable {
    pub fn new(alias: impl Into<String>, select: SelectBody) -> Self {
        Self {
            alias: alias.into(),
            alias_list: Vec::new(),
            select,
        }
    }
}

/// Named window, `WINDOW w AS (...)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct Window {
    pub name: String,
    pub spec: WindowSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortNullPosition {
    First,
    Last,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct SortKey {
    pub sort: Expression,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<SortDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_position: Option<SortNullPosition>,
}

impl SortKey {
    pub fn new(sort: Expression, direction: Option<SortDirection>) -> Self {
        Self {
            sort,
            direction,
            null_position: None,
        }
    }
}

/// `ORDER [SIBLINGS] BY ...`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct OrderBy {
    #[serde(default)]
    pub siblings: bool,
    pub sort_keys: Vec<SortKey>,
}

impl OrderBy {
    pub fn new(sort_keys: Vec<SortKey>) -> Self {
        Self {
            siblings: false,
            sort_keys,
        }
    }
}

/// One GROUP BY element.
///
/// MySQL items are sort keys (`GROUP BY a DESC`); Oracle items are plain
/// expressions or grouping constructs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    SortKey(SortKey),
    General(Expression),
    GroupingSets(Vec<GroupBy>),
    Rollup(Vec<Expression>),
    Cube(Vec<Expression>),
}

/// MySQL `LIMIT [offset,] count` / `LIMIT count OFFSET offset`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct Limit {
    pub row_count: Expression,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Expression>,
}

impl Limit {
    pub fn new(row_count: Expression) -> Self {
        Self {
            row_count,
            offset: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FetchDirection {
    First,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FetchType {
    Count,
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FetchAddition {
    Only,
    WithTies,
}

/// Oracle `[OFFSET n ROWS] FETCH FIRST|NEXT [n [PERCENT]] ROWS ONLY|WITH TIES`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct Fetch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch: Option<Expression>,
    pub direction: FetchDirection,
    pub fetch_type: FetchType,
    pub addition: FetchAddition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WaitOption {
    Wait,
    Nowait,
    SkipLocked,
}

/// `FOR UPDATE [OF cols] [WAIT n | NOWAIT | SKIP LOCKED]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct ForUpdate {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<ColumnReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_option: Option<WaitOption>,
    /// Seconds after `WAIT`, as written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_num: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(label: &str) -> SelectBody {
        SelectBody::new(
            vec![Projection::new(Expression::constant(label), None)],
            vec![],
        )
    }

    #[test]
    fn test_chain_appends_to_last_block() {
        let mut head = block("1");
        head.chain(RelationType::Union, block("2"));
        head.chain(RelationType::Minus, block("3"));

        assert_eq!(head.chain_len(), 3);
        let second = &head.related_select.as_ref().unwrap().select;
        assert_eq!(
            second.related_select.as_ref().unwrap().relation,
            RelationType::Minus
        );
        assert_eq!(head.last(), &block("3"));
    }

    #[test]
    fn test_last_mut_of_single_block_is_self() {
        let mut body = block("1");
        body.last_mut().limit = Some(Limit::new(Expression::constant("3")));
        assert!(body.limit.is_some());
    }

    #[test]
    fn test_relation_type_display() {
        assert_eq!(RelationType::UnionDistinct.to_string(), "UNION DISTINCT");
    }
}
