//! Expression AST.
//!
//! This module defines the dialect-neutral expression nodes produced by the
//! per-dialect expression factories.
//!
//! # Architecture
//!
//! The central type is [`Expression`], a closed tagged enum with one variant per
//! expression shape. Heap-allocated payloads are boxed to keep the enum small.
//!
//! # Dialect divergence
//!
//! Some constructs that read the same in both dialects lower to different
//! variants, and the model keeps them apart on purpose:
//!
//! | Construct | MySQL factory | Oracle factory |
//! |---|---|---|
//! | `a.b` | [`ColumnReference`] (`relation = a`, `column = b`) | [`RelationReference`] chain `a -> b` |
//! | `f(x) OVER (...)` | [`FunctionCall::window`] | [`Expression::WindowFunction`] |
//!
//! # Literal text
//!
//! [`ConstExpression`] stores the literal exactly as written. Numbers are never
//! parsed, so `-12` lowers to `Compound(Const("12"), None, Sub)` and `1.50`
//! keeps its trailing zero.

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "bindings")]
use ts_rs::TS;

use crate::statements::data_type::DataType;
use crate::statements::select::{OrderBy, SelectBody};

/// Represent any SQL expression as a single, recursive AST node.
///
/// Two expressions built from syntactically identical input compare equal;
/// equality is deep and structural.
///
/// # Constructing Expressions
///
/// ```rust
/// use sql_lowering::expressions::{Expression, Operator};
///
/// let col = Expression::column(None, Some("t"), "id");
/// let one = Expression::constant("1");
/// let cmp = Expression::binary(col, one, Operator::Eq);
/// assert!(matches!(cmp, Expression::Compound(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "bindings", ts(export))]
pub enum Expression {
    // Names
    Column(ColumnReference),
    Relation(Box<RelationReference>),

    // Values
    Const(ConstExpression),
    Bool(BoolValue),
    Null,
    /// The `DEFAULT` keyword in value position
    Default,
    Interval(Box<IntervalExpression>),
    Collection(CollectionExpression),
    Array(ArrayExpression),

    // Operators
    Compound(Box<CompoundExpression>),

    // Calls
    FunctionCall(Box<FunctionCall>),
    WindowFunction(Box<WindowFunction>),
    Access(Box<AccessExpression>),
    ParamWithAssign(Box<ParamWithAssign>),
    FullTextSearch(Box<FullTextSearch>),

    // Control flow
    Case(Box<CaseWhen>),
    BraceBlock(Box<BraceBlock>),

    // JSON
    JsonKeyValue(Box<JsonKeyValue>),
    JsonConstraint(JsonConstraint),

    // Queries
    Select(Box<SelectBody>),
}

impl Expression {
    /// Create a column reference from an optional schema and relation.
    pub fn column(schema: Option<&str>, relation: Option<&str>, column: &str) -> Self {
        Expression::Column(ColumnReference::new(schema, relation, column))
    }

    /// Create a literal whose text is kept verbatim.
    pub fn constant(text: impl Into<String>) -> Self {
        Expression::Const(ConstExpression::new(text))
    }

    /// Create a single-link relation reference (`name`).
    pub fn relation(name: impl Into<String>) -> Self {
        Expression::Relation(Box::new(RelationReference::new(name, None)))
    }

    /// Create a relation reference that continues into `reference` (`name.reference`).
    pub fn relation_chain(name: impl Into<String>, reference: Expression) -> Self {
        Expression::Relation(Box::new(RelationReference::new(name, Some(reference))))
    }

    /// Create a binary compound expression.
    pub fn binary(left: Expression, right: Expression, operator: Operator) -> Self {
        Expression::Compound(Box::new(CompoundExpression {
            left,
            right: Some(right),
            operator,
        }))
    }

    /// Create a unary compound expression. The operand is stored on the left.
    pub fn unary(operand: Expression, operator: Operator) -> Self {
        Expression::Compound(Box::new(CompoundExpression {
            left: operand,
            right: None,
            operator,
        }))
    }

    /// Create a boolean literal.
    pub fn boolean(value: bool) -> Self {
        Expression::Bool(BoolValue { value })
    }

    /// Create a function call expression with no options.
    pub fn function(name: impl Into<String>, params: Vec<FunctionParam>) -> Self {
        Expression::FunctionCall(Box::new(FunctionCall::new(name, params)))
    }

    /// Create a collection of expressions, as written inside `( ... )`.
    pub fn collection(expressions: Vec<Expression>) -> Self {
        Expression::Collection(CollectionExpression { expressions })
    }

    /// Create an array of expressions, as written inside `[ ... ]` or `array( ... )`.
    pub fn array(expressions: Vec<Expression>) -> Self {
        Expression::Array(ArrayExpression { expressions })
    }

    /// Apply access steps to `target`. No steps returns `target` unchanged.
    pub fn access(target: Expression, accesses: Vec<Access>) -> Self {
        if accesses.is_empty() {
            return target;
        }
        Expression::Access(Box::new(AccessExpression { target, accesses }))
    }

    /// Wrap a select body used in expression position.
    pub fn subquery(body: SelectBody) -> Self {
        Expression::Select(Box::new(body))
    }

    /// Check if this is a literal
    pub fn is_const(&self) -> bool {
        matches!(self, Expression::Const(_))
    }

    /// Try to get the literal text
    pub fn as_const(&self) -> Option<&str> {
        match self {
            Expression::Const(c) => Some(&c.text),
            _ => None,
        }
    }

    /// Try to get as a compound expression
    pub fn as_compound(&self) -> Option<&CompoundExpression> {
        match self {
            Expression::Compound(c) => Some(c),
            _ => None,
        }
    }

    /// Try to get as a function call
    pub fn as_function_call(&self) -> Option<&FunctionCall> {
        match self {
            Expression::FunctionCall(f) => Some(f),
            _ => None,
        }
    }

    /// Serialize this expression to JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize an expression from JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<ColumnReference> for Expression {
    fn from(value: ColumnReference) -> Self {
        Expression::Column(value)
    }
}

impl From<ConstExpression> for Expression {
    fn from(value: ConstExpression) -> Self {
        Expression::Const(value)
    }
}

impl From<FunctionCall> for Expression {
    fn from(value: FunctionCall) -> Self {
        Expression::FunctionCall(Box::new(value))
    }
}

impl From<RelationReference> for Expression {
    fn from(value: RelationReference) -> Self {
        Expression::Relation(Box::new(value))
    }
}

impl From<CompoundExpression> for Expression {
    fn from(value: CompoundExpression) -> Self {
        Expression::Compound(Box::new(value))
    }
}

impl From<SelectBody> for Expression {
    fn from(value: SelectBody) -> Self {
        Expression::Select(Box::new(value))
    }
}

/// MySQL-style flat column address `[schema.][relation.]column[@user_variable]`.
///
/// `column` may be `*` for `t.*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct ColumnReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    pub column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_variable: Option<String>,
}

impl ColumnReference {
    pub fn new(schema: Option<&str>, relation: Option<&str>, column: &str) -> Self {
        Self {
            schema: schema.map(str::to_string),
            relation: relation.map(str::to_string),
            column: column.to_string(),
            user_variable: None,
        }
    }

    pub fn with_user_variable(mut self, user_variable: impl Into<String>) -> Self {
        self.user_variable = Some(user_variable.into());
        self
    }
}

/// How a [`RelationReference`] reaches its tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "snake_case")]
pub enum ReferenceOperator {
    /// `a.b`
    Dot,
    /// `a(1)`, table-collection index access
    Paren,
    /// `a[1]`, JSON path step
    Bracket,
}

/// Oracle-style reference chain `name.reference...`.
///
/// The chain may be arbitrarily deep and may end in any expression, which is
/// how `col.first()` keeps its trailing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct RelationReference {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Expression>,
    /// Absent for the usual dot form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_operator: Option<ReferenceOperator>,
    /// Database link suffix, `col@link`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_variable: Option<String>,
}

impl RelationReference {
    pub fn new(name: impl Into<String>, reference: Option<Expression>) -> Self {
        Self {
            name: name.into(),
            reference,
            reference_operator: None,
            user_variable: None,
        }
    }

    /// Continue the chain into `reference`, reached through `operator`.
    /// [`ReferenceOperator::Dot`] is stored as absent.
    pub fn with_reference(mut self, reference: Expression, operator: ReferenceOperator) -> Self {
        self.reference = Some(reference);
        self.reference_operator = match operator {
            ReferenceOperator::Dot => None,
            other => Some(other),
        };
        self
    }

    pub fn with_user_variable(mut self, user_variable: impl Into<String>) -> Self {
        self.user_variable = Some(user_variable.into());
        self
    }

    /// Walk to the last link of the chain.
    pub fn last(&self) -> &RelationReference {
        match &self.reference {
            Some(Expression::Relation(next)) => next.last(),
            _ => self,
        }
    }
}

/// Literal text kept exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct ConstExpression {
    pub text: String,
}

impl ConstExpression {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Build a literal from several source tokens joined by single spaces
    /// (`FORMAT JSON`, `SEPARATOR ','`).
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text = tokens
            .into_iter()
            .map(|t| t.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        Self { text }
    }
}

impl fmt::Display for ConstExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Boolean literal (`TRUE` / `FALSE`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct BoolValue {
    pub value: bool,
}

/// Unary or binary operation. A missing `right` operand means unary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct CompoundExpression {
    pub left: Expression,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Expression>,
    pub operator: Operator,
}

impl CompoundExpression {
    pub fn is_unary(&self) -> bool {
        self.right.is_none()
    }
}

/// Every operator the two dialects can spell.
///
/// Each dialect maps its accepted spellings onto exactly one value; see the
/// operator tables in `dialects::mysql::expression` and
/// `dialects::oracle::expression`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    /// Integer division, MySQL `DIV`
    IntDiv,
    Mod,
    /// Oracle `**`
    Pow,
    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    Tilde,
    ShiftLeft,
    ShiftRight,
    Binary,
    /// `||`
    Cnnop,

    // Comparison
    Eq,
    Ne,
    /// Oracle `~=`
    NePl,
    Gt,
    Ge,
    Lt,
    Le,
    /// `<=>`
    Nseq,

    // Logical
    And,
    Or,
    Xor,
    Not,

    // Predicates
    In,
    NotIn,
    Like,
    NotLike,
    Between,
    NotBetween,
    Regexp,
    NotRegexp,
    Escape,
    MemberOf,
    NotMemberOf,
    SubMultisetOf,
    NotSubMultisetOf,
    IsASet,
    IsNotASet,
    IsEmpty,
    IsNotEmpty,
    Exists,
    Is,
    IsNot,

    // Multiset
    MultisetUnion,
    MultisetUnionAll,
    MultisetUnionDistinct,
    MultisetIntersect,
    MultisetIntersectAll,
    MultisetIntersectDistinct,
    MultisetExcept,
    MultisetExceptAll,
    MultisetExceptDistinct,

    // JSON path
    JsonExtract,
    JsonExtractUnquoted,

    // Assignment
    SetVar,

    // Hierarchical
    Prior,
    ConnectByRoot,

    // Time zone
    AtTimeZone,
    AtLocal,

    /// Path range `1 to 2`
    To,
}

impl Operator {
    /// Canonical spelling of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::IntDiv => "DIV",
            Operator::Mod => "MOD",
            Operator::Pow => "**",
            Operator::BitAnd => "&",
            Operator::BitOr => "|",
            Operator::BitXor => "^",
            Operator::Tilde => "~",
            Operator::ShiftLeft => "<<",
            Operator::ShiftRight => ">>",
            Operator::Binary => "BINARY",
            Operator::Cnnop => "||",
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::NePl => "~=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Nseq => "<=>",
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Xor => "XOR",
            Operator::Not => "NOT",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT LIKE",
            Operator::Between => "BETWEEN",
            Operator::NotBetween => "NOT BETWEEN",
            Operator::Regexp => "REGEXP",
            Operator::NotRegexp => "NOT REGEXP",
            Operator::Escape => "ESCAPE",
            Operator::MemberOf => "MEMBER OF",
            Operator::NotMemberOf => "NOT MEMBER OF",
            Operator::SubMultisetOf => "SUBMULTISET OF",
            Operator::NotSubMultisetOf => "NOT SUBMULTISET OF",
            Operator::IsASet => "IS A SET",
            Operator::IsNotASet => "IS NOT A SET",
            Operator::IsEmpty => "IS EMPTY",
            Operator::IsNotEmpty => "IS NOT EMPTY",
            Operator::Exists => "EXISTS",
            Operator::Is => "IS",
            Operator::IsNot => "IS NOT",
            Operator::MultisetUnion => "MULTISET UNION",
            Operator::MultisetUnionAll => "MULTISET UNION ALL",
            Operator::MultisetUnionDistinct => "MULTISET UNION DISTINCT",
            Operator::MultisetIntersect => "MULTISET INTERSECT",
            Operator::MultisetIntersectAll => "MULTISET INTERSECT ALL",
            Operator::MultisetIntersectDistinct => "MULTISET INTERSECT DISTINCT",
            Operator::MultisetExcept => "MULTISET EXCEPT",
            Operator::MultisetExceptAll => "MULTISET EXCEPT ALL",
            Operator::MultisetExceptDistinct => "MULTISET EXCEPT DISTINCT",
            Operator::JsonExtract => "->",
            Operator::JsonExtractUnquoted => "->>",
            Operator::SetVar => ":=",
            Operator::Prior => "PRIOR",
            Operator::ConnectByRoot => "CONNECT_BY_ROOT",
            Operator::AtTimeZone => "AT TIME ZONE",
            Operator::AtLocal => "AT LOCAL",
            Operator::To => "TO",
        }
    }

    /// Whether the operator is a comparison (`=`, `!=`, `<`, ...).
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Operator::Eq
                | Operator::Ne
                | Operator::NePl
                | Operator::Gt
                | Operator::Ge
                | Operator::Lt
                | Operator::Le
                | Operator::Nseq
        )
    }

    /// The negated form of a predicate operator, if it has one.
    pub fn negated(&self) -> Option<Operator> {
        let op = match self {
            Operator::In => Operator::NotIn,
            Operator::Like => Operator::NotLike,
            Operator::Between => Operator::NotBetween,
            Operator::Regexp => Operator::NotRegexp,
            Operator::MemberOf => Operator::NotMemberOf,
            Operator::SubMultisetOf => Operator::NotSubMultisetOf,
            Operator::IsASet => Operator::IsNotASet,
            Operator::IsEmpty => Operator::IsNotEmpty,
            Operator::Is => Operator::IsNot,
            Operator::Eq => Operator::Ne,
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One argument of a function call with the options written next to it
/// (a `CAST` target type, `FORMAT JSON`, `USING charset`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct FunctionParam {
    pub value: Expression,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FunctionOption>,
}

impl FunctionParam {
    pub fn new(value: Expression) -> Self {
        Self {
            value,
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, option: impl Into<FunctionOption>) -> Self {
        self.options.push(option.into());
        self
    }
}

impl From<Expression> for FunctionParam {
    fn from(value: Expression) -> Self {
        FunctionParam::new(value)
    }
}

/// A trailing option on a call or on one of its parameters, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "snake_case")]
pub enum FunctionOption {
    Expression(Expression),
    DataType(DataType),
    OrderBy(OrderBy),
    JsonOnOption(JsonOnOption),
    JsonConstraint(JsonConstraint),
    /// A nested parameter, e.g. one column of `JSON_TABLE(... COLUMNS (...))`
    Param(Box<FunctionParam>),
}

impl From<Expression> for FunctionOption {
    fn from(value: Expression) -> Self {
        FunctionOption::Expression(value)
    }
}

impl From<ConstExpression> for FunctionOption {
    fn from(value: ConstExpression) -> Self {
        FunctionOption::Expression(Expression::Const(value))
    }
}

impl From<DataType> for FunctionOption {
    fn from(value: DataType) -> Self {
        FunctionOption::DataType(value)
    }
}

impl From<OrderBy> for FunctionOption {
    fn from(value: OrderBy) -> Self {
        FunctionOption::OrderBy(value)
    }
}

impl From<JsonOnOption> for FunctionOption {
    fn from(value: JsonOnOption) -> Self {
        FunctionOption::JsonOnOption(value)
    }
}

impl From<JsonConstraint> for FunctionOption {
    fn from(value: JsonConstraint) -> Self {
        FunctionOption::JsonConstraint(value)
    }
}

impl From<FunctionParam> for FunctionOption {
    fn from(value: FunctionParam) -> Self {
        FunctionOption::Param(Box::new(value))
    }
}

/// Function call: name, ordered params, optional aggregate flag, ordered options.
///
/// `window` is only set by the MySQL factory. The Oracle factory wraps the call
/// in [`WindowFunction`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct FunctionCall {
    pub name: String,
    pub params: Vec<FunctionParam>,
    /// `ALL`, `DISTINCT` or `UNIQUE` as written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params_flag: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FunctionOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<WindowSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep: Option<KeepClause>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub within_group: Option<OrderBy>,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, params: Vec<FunctionParam>) -> Self {
        Self {
            name: name.into(),
            params,
            params_flag: None,
            options: Vec::new(),
            window: None,
            keep: None,
            within_group: None,
        }
    }

    /// Append a trailing option. `None` is ignored so optional clauses can be
    /// passed straight through.
    pub fn add_option<O: Into<FunctionOption>>(&mut self, option: Option<O>) {
        if let Some(option) = option {
            self.options.push(option.into());
        }
    }

    pub fn with_option(mut self, option: impl Into<FunctionOption>) -> Self {
        self.options.push(option.into());
        self
    }

    pub fn with_params_flag(mut self, flag: impl Into<String>) -> Self {
        self.params_flag = Some(flag.into());
        self
    }
}

/// `KEEP (DENSE_RANK FIRST|LAST ORDER BY ...)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct KeepClause {
    /// `FIRST` or `LAST` as written
    pub first_or_last: String,
    pub order_by: OrderBy,
}

/// Oracle window function: a call plus its `OVER (...)` specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct WindowFunction {
    pub function: FunctionCall,
    pub window: WindowSpec,
}

/// An expression followed by attribute, index or path steps:
/// `f(x).attr`, `f(x)(1)(2)`, `a.b[*, 1 to 2]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct AccessExpression {
    pub target: Expression,
    pub accesses: Vec<Access>,
}

/// One step of an [`AccessExpression`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct Access {
    pub operator: ReferenceOperator,
    pub target: Expression,
}

impl Access {
    pub fn new(operator: ReferenceOperator, target: Expression) -> Self {
        Self { operator, target }
    }
}

/// Oracle named argument, `name => value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct ParamWithAssign {
    pub name: String,
    pub value: Expression,
}

/// Search modifier of `MATCH ... AGAINST`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextSearchMode {
    NaturalLanguageMode,
    BooleanMode,
    QueryExpansion,
}

/// MySQL `MATCH (cols) AGAINST ('text' [mode])`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct FullTextSearch {
    pub params: Vec<FunctionParam>,
    pub against: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_mode: Option<TextSearchMode>,
}

/// `CASE [value] WHEN ... THEN ... [ELSE ...] END`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct CaseWhen {
    /// Set for a simple CASE, absent for a searched CASE.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_value: Option<Expression>,
    pub when_clauses: Vec<WhenClause>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_default: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct WhenClause {
    pub when: Expression,
    pub then: Expression,
}

/// Parenthesised list `(a, b, c)`. Elements are bare expressions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct CollectionExpression {
    pub expressions: Vec<Expression>,
}

/// Array literal `[a, b]` or `array(a, b)`; may nest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct ArrayExpression {
    pub expressions: Vec<Expression>,
}

/// `INTERVAL expr unit`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct IntervalExpression {
    pub target: Expression,
    /// Unit as written, e.g. `DAY` or `YEAR_MONTH`
    pub date_type: String,
}

/// ODBC escape `{name expr}`, e.g. `{d '2020-01-01'}` or `{OJ ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct BraceBlock {
    pub name: String,
    pub expression: Expression,
}

/// One `key : value` / `KEY k VALUE v` entry of `JSON_OBJECT`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct JsonKeyValue {
    pub key: Expression,
    pub value: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrictMode {
    Strict,
    Lax,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScalarsMode {
    AllowScalars,
    DisallowScalars,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UniqueMode {
    WithUniqueKeys,
    WithoutUniqueKeys,
}

/// Wrapper clause of `JSON_QUERY` and JSON_TABLE query columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WrapperMode {
    WithoutWrapper,
    WithoutArrayWrapper,
    WithWrapper,
    WithArrayWrapper,
    WithConditionalWrapper,
    WithConditionalArrayWrapper,
    WithUnconditionalWrapper,
    WithUnconditionalArrayWrapper,
}

/// JSON conformance modes. Used as the right operand of `IS [NOT] JSON` and as
/// a function option on JSON functions. Every field left unset stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct JsonConstraint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict_mode: Option<StrictMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scalars_mode: Option<ScalarsMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_mode: Option<UniqueMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrapper_mode: Option<WrapperMode>,
}

/// `ON EMPTY` / `ON ERROR` / `ON NULL` / `ON MISMATCH` responses of JSON functions.
///
/// "Unset" is distinct from any response: a clause that was not written stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct JsonOnOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_empty: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_error: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_null: Option<Expression>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on_mismatches: Vec<OnMismatch>,
}

/// `response ON MISMATCH [(type, ...)]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct OnMismatch {
    pub response: Expression,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mismatch_types: Vec<String>,
}

/// `OVER (...)` specification, or a named window definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct WindowSpec {
    /// Reference to a named window (`OVER w` or `OVER (w ORDER BY x)`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub partition_by: Vec<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<WindowBody>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WindowType {
    Rows,
    Range,
}

/// Frame clause: `ROWS|RANGE begin` or `ROWS|RANGE BETWEEN begin AND end`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct WindowBody {
    pub kind: WindowType,
    pub begin: WindowOffset,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<WindowOffset>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WindowOffsetType {
    CurrentRow,
    Preceding,
    Following,
}

/// A frame bound. `UNBOUNDED` is kept as a literal interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bindings", derive(TS))]
pub struct WindowOffset {
    pub kind: WindowOffsetType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<Expression>,
}

impl WindowOffset {
    pub fn current_row() -> Self {
        Self {
            kind: WindowOffsetType::CurrentRow,
            interval: None,
        }
    }

    pub fn new(kind: WindowOffsetType, interval: Expression) -> Self {
        Self {
            kind,
            interval: Some(interval),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unary_keeps_operand_on_the_left() {
        let expr = Expression::unary(Expression::constant("12"), Operator::Sub);
        let compound = expr.as_compound().expect("compound");
        assert!(compound.is_unary());
        assert_eq!(compound.left.as_const(), Some("12"));
    }

    #[test]
    fn test_negated_predicates() {
        assert_eq!(Operator::Like.negated(), Some(Operator::NotLike));
        assert_eq!(Operator::IsEmpty.negated(), Some(Operator::IsNotEmpty));
        assert_eq!(Operator::Add.negated(), None);
    }

    #[test]
    fn test_relation_chain_last() {
        let chain = RelationReference::new(
            "a",
            Some(Expression::relation_chain("b", Expression::relation("c"))),
        );
        assert_eq!(chain.last().name, "c");
    }

    #[test]
    fn test_const_from_tokens_joins_with_spaces() {
        assert_eq!(
            ConstExpression::from_tokens(["FORMAT", "JSON"]).text,
            "FORMAT JSON"
        );
    }

    #[test]
    fn test_add_option_skips_none() {
        let mut call = FunctionCall::new("f", vec![]);
        call.add_option(None::<ConstExpression>);
        call.add_option(Some(ConstExpression::new("ASCII")));
        assert_eq!(call.options.len(), 1);
    }

    #[test]
    fn test_access_without_steps_is_identity() {
        let target = Expression::relation("a");
        assert_eq!(Expression::access(target.clone(), vec![]), target);
        let stepped = Expression::access(
            target,
            vec![Access::new(ReferenceOperator::Paren, Expression::constant("1"))],
        );
        assert!(matches!(stepped, Expression::Access(_)));
    }

    #[test]
    fn test_json_serialization_is_stable() {
        let expr = Expression::binary(
            Expression::column(None, Some("t"), "a"),
            Expression::Null,
            Operator::Eq,
        );
        let json = expr.to_json().unwrap();
        assert!(json.contains("\"operator\":\"EQ\""));
        assert_eq!(Expression::from_json(&json).unwrap(), expr);
    }
}
