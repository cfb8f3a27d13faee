//! Typed parse tree of the Oracle dialect.
//!
//! Oracle addresses objects through dotted paths that may mix names, calls
//! and subscripts (`pkg.f(x).attr`, `t.c@link`, `arr(1)`), so the tree keeps
//! a path as a list of [`PathStep`]s and leaves the chaining to the factory.
//! Comparison operators may be split by whitespace in the source (`! =`,
//! `< >`) and arrive as token lists.
//!
//! # Building trees
//!
//! ```rust
//! use sql_lowering::dialects::oracle::tree::{Expr, PathStep};
//!
//! // a.b ^= 1
//! let cmp = Expr::binary(Expr::path(&["a", "b"]), "^=", Expr::literal("1"));
//! assert!(matches!(cmp, Expr::Binary { .. }));
//!
//! let call = Expr::call("nvl", vec![Expr::path(&["c"]), Expr::literal("0")]);
//! match call {
//!     Expr::Path(path) => assert!(matches!(path.steps[0], PathStep::Call(_))),
//!     _ => unreachable!(),
//! }
//! ```

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Names
// ---------------------------------------------------------------------------

/// `[schema.][relation.]column`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    pub column: String,
}

impl ColumnRef {
    pub fn new(relation: Option<&str>, column: &str) -> Self {
        Self {
            schema: None,
            relation: relation.map(str::to_string),
            column: column.to_string(),
        }
    }
}

/// `[schema.]relation[@link][!]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub relation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_variable: Option<String>,
    /// Trailing `!` of a reverse database link
    #[serde(default)]
    pub reverse_link: bool,
}

impl RelationName {
    pub fn new(schema: Option<&str>, relation: &str) -> Self {
        Self {
            schema: schema.map(str::to_string),
            relation: relation.to_string(),
            user_variable: None,
            reverse_link: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// Names, calls and subscripts joined by dots
    Path(Path),
    /// Number, string, date, timestamp or interval literal, as written
    Literal(String),
    Null,
    /// `DEFAULT` in value position
    Default,
    /// `:1`, `:name`, `?`, `@v`
    Variable(String),

    /// Prefix operator: `-`, `+`, `NOT`, `PRIOR`, `CONNECT_BY_ROOT`
    Unary {
        op: String,
        operand: Box<Expr>,
    },
    /// Infix operator; tokens as written (`["!", "="]`, `["MULTISET", "UNION", "ALL"]`)
    Binary {
        left: Box<Expr>,
        op: Vec<String>,
        right: Box<Expr>,
    },
    /// `expr IS [NOT] NULL|NAN|INFINITE`
    Is {
        operand: Box<Expr>,
        not: bool,
        target: String,
    },
    /// `expr IS [NOT] JSON [STRICT|LAX] [scalars] [unique keys]`
    IsJson {
        operand: Box<Expr>,
        not: bool,
        #[serde(default)]
        modes: JsonModes,
    },
    In {
        operand: Box<Expr>,
        not: bool,
        list: InList,
    },
    Between {
        operand: Box<Expr>,
        not: bool,
        low: Box<Expr>,
        high: Box<Expr>,
    },
    /// `expr [NOT] LIKE pattern [ESCAPE escape]`
    Like {
        operand: Box<Expr>,
        not: bool,
        pattern: Box<Expr>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        escape: Option<Box<Expr>>,
    },
    /// `expr [NOT] MEMBER [OF] nested_table`
    MemberOf {
        operand: Box<Expr>,
        not: bool,
        target: Box<Expr>,
    },
    /// `nt1 [NOT] SUBMULTISET [OF] nt2`
    SubmultisetOf {
        operand: Box<Expr>,
        not: bool,
        target: Box<Expr>,
    },
    /// `nt IS [NOT] A SET` / `nt IS [NOT] EMPTY`, test tokens as written
    CollectionTest {
        operand: Box<Expr>,
        not: bool,
        test: Vec<String>,
    },
    /// `expr AT TIME ZONE zone`; `AT LOCAL` has no zone
    AtTimeZone {
        operand: Box<Expr>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        zone: Option<Box<Expr>>,
    },
    /// `@v := expr`
    Assign {
        variable: String,
        value: Box<Expr>,
    },

    Exists(Box<SelectStmt>),
    Subquery(Box<SelectStmt>),
    /// `(a, b, c)`
    List(Vec<Expr>),
    /// `MULTISET (select)` / `CURSOR (select)`, keyword as written
    SubqueryCall {
        keyword: String,
        query: Box<SelectStmt>,
    },
    Case(Box<Case>),
    Function(Box<Function>),
}

impl Expr {
    /// Plain dotted name, `a.b.c`
    pub fn path(names: &[&str]) -> Self {
        Expr::Path(Path {
            steps: names.iter().map(|n| PathStep::Name(n.to_string())).collect(),
            user_variable: None,
        })
    }

    pub fn literal(text: &str) -> Self {
        Expr::Literal(text.to_string())
    }

    pub fn binary(left: Expr, op: &str, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op: op.split_whitespace().map(str::to_string).collect(),
            right: Box::new(right),
        }
    }

    pub fn unary(op: &str, operand: Expr) -> Self {
        Expr::Unary {
            op: op.to_string(),
            operand: Box::new(operand),
        }
    }

    pub fn is(operand: Expr, not: bool, target: &str) -> Self {
        Expr::Is {
            operand: Box::new(operand),
            not,
            target: target.to_string(),
        }
    }

    /// `name(args)` as a one-step path
    pub fn call(name: &str, args: Vec<Expr>) -> Self {
        Expr::Path(Path {
            steps: vec![PathStep::Call(Call::new(name, args))],
            user_variable: None,
        })
    }

    pub fn function(function: Function) -> Self {
        Expr::Function(Box::new(function))
    }
}

/// `step.step...[@link]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    pub steps: Vec<PathStep>,
    /// Database link after the last name, `@link`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_variable: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStep {
    Name(String),
    /// `t.*`
    Star,
    Call(Call),
    /// `(i, j)` after a call or a collection name
    Index(Vec<Expr>),
    /// `[1, 2 TO 4, *]` of a JSON path step
    Bracket(Vec<Subscript>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subscript {
    Index(String),
    /// `from TO to`
    Range { from: String, to: String },
    Star,
}

/// Right side of `IN`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InList {
    Exprs(Vec<Expr>),
    Subquery(Box<SelectStmt>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Expr>,
    pub whens: Vec<When>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct When {
    pub when: Expr,
    pub then: Expr,
}

/// `+12`, `-12`, `'abc'`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedLiteral {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign: Option<String>,
    pub value: Expr,
}

impl SignedLiteral {
    pub fn new(sign: Option<&str>, value: Expr) -> Self {
        Self {
            sign: sign.map(str::to_string),
            value,
        }
    }
}

// ---------------------------------------------------------------------------
// Functions
// ---------------------------------------------------------------------------

/// Function forms with their own grammar rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Function {
    /// Aggregate `[pkg.]name([ALL|DISTINCT|UNIQUE] args) [KEEP (...)] [WITHIN GROUP (...)]`
    Aggregate(Call),
    Window(WindowCall),
    /// `CAST(expr AS type)`
    Cast {
        name: String,
        expr: Expr,
        target: DataType,
    },
    /// `TRIM([LEADING|TRAILING|BOTH] [remove] FROM expr)`
    Trim {
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        keywords: Vec<String>,
        expr: Expr,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<Expr>,
    },
    /// `EXTRACT(unit FROM expr)`
    Extract {
        name: String,
        unit: String,
        expr: Expr,
    },
    JsonValue(JsonValue),
    JsonQuery(JsonQuery),
    JsonExists(JsonExists),
    JsonObject(JsonObject),
    JsonArray(JsonArray),
    JsonMergePatch(JsonMergePatch),
}

/// `name([ALL|DISTINCT|UNIQUE] args)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregator: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Arg>,
    /// `KEEP (DENSE_RANK FIRST|LAST ORDER BY ...)`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep: Option<Keep>,
    /// `WITHIN GROUP (ORDER BY ...)`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub within_group: Vec<SortItem>,
}

impl Call {
    pub fn new(name: &str, args: Vec<Expr>) -> Self {
        Self {
            name: name.to_string(),
            aggregator: None,
            args: args.into_iter().map(Arg::Expr).collect(),
            keep: None,
            within_group: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arg {
    Expr(Expr),
    /// `count(*)`
    Star,
    /// `name => value`
    Named { name: String, value: Expr },
    /// `[KEY] k VALUE v` of `JSON_OBJECTAGG`
    KeyValue { key: Expr, value: Expr },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keep {
    pub first_or_last: String,
    pub order_by: Vec<SortItem>,
}

/// `call [FROM FIRST|LAST] [RESPECT|IGNORE NULLS] OVER (...)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowCall {
    pub call: Call,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub from_first_last: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nulls: Vec<String>,
    pub over: WindowSpecNode,
}

/// JSON conformance modes, tokens as written; empty when not written
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonModes {
    /// `STRICT` / `LAX`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<String>,
    /// `ALLOW SCALARS` / `DISALLOW SCALARS`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scalars: Vec<String>,
    /// `WITH UNIQUE KEYS` / `WITHOUT UNIQUE KEYS`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unique: Vec<String>,
    /// `WITH CONDITIONAL ARRAY WRAPPER`, ...
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wrapper: Vec<String>,
}

impl JsonModes {
    pub fn is_empty(&self) -> bool {
        self.strict.is_none() && self.scalars.is_empty() && self.unique.is_empty() && self.wrapper.is_empty()
    }
}

/// Response of an ON EMPTY / ON ERROR / ON NULL / ON MISMATCH clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonResponse {
    /// `ERROR`, as written
    Error(String),
    Null,
    Default(Expr),
    /// `EMPTY [ARRAY|OBJECT]`, `TRUE`, `FALSE`, `ABSENT`, `IGNORE`
    Keyword(Vec<String>),
}

/// `response ON MISMATCH [(MISSING DATA, EXTRA DATA, TYPE ERROR)]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonMismatch {
    pub response: JsonResponse,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
}

/// Ordered ON clauses shared by the JSON functions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonOn {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_empty: Option<JsonResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_error: Option<JsonResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_null: Option<JsonResponse>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on_mismatch: Vec<JsonMismatch>,
}

/// A JSON document argument, `expr [FORMAT JSON]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonArg {
    pub expr: Expr,
    #[serde(default)]
    pub format_json: bool,
}

impl JsonArg {
    pub fn new(expr: Expr) -> Self {
        Self {
            expr,
            format_json: false,
        }
    }
}

/// `JSON_VALUE(doc, path [RETURNING type] [TRUNCATE] [ASCII] [on clauses])`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonValue {
    pub name: String,
    pub doc: JsonArg,
    pub path: Expr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returning: Option<DataType>,
    #[serde(default)]
    pub truncate: bool,
    #[serde(default)]
    pub ascii: bool,
    #[serde(default)]
    pub on: JsonOn,
}

/// `JSON_QUERY(doc, path [RETURNING type] [TRUNCATE] [scalars] [PRETTY] [ASCII] [wrapper] [on clauses])`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonQuery {
    pub name: String,
    pub doc: JsonArg,
    pub path: Expr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returning: Option<DataType>,
    #[serde(default)]
    pub truncate: bool,
    #[serde(default)]
    pub pretty: bool,
    #[serde(default)]
    pub ascii: bool,
    #[serde(default)]
    pub modes: JsonModes,
    #[serde(default)]
    pub on: JsonOn,
}

/// `JSON_EXISTS(doc, path [PASSING expr AS id, ...] [on clauses])`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonExists {
    pub name: String,
    pub doc: JsonArg,
    pub path: Expr,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub passing: Vec<(Expr, String)>,
    #[serde(default)]
    pub on: JsonOn,
}

/// `JSON_OBJECT([KEY] k VALUE v [FORMAT JSON], ... [on null] [RETURNING type] [STRICT] [unique keys])`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonObject {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<JsonEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_null: Option<JsonResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returning: Option<DataType>,
    #[serde(default)]
    pub modes: JsonModes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonEntry {
    pub key: Expr,
    pub value: JsonArg,
}

/// `JSON_ARRAY(expr [FORMAT JSON], ... [on null] [RETURNING type] [STRICT])`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonArray {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<JsonArg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_null: Option<JsonResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returning: Option<DataType>,
    #[serde(default)]
    pub modes: JsonModes,
}

/// `JSON_MERGEPATCH(target, patch [RETURNING type] [PRETTY] [ASCII] [TRUNCATE] [on error])`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonMergePatch {
    pub name: String,
    pub target: Expr,
    pub patch: Expr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returning: Option<DataType>,
    #[serde(default)]
    pub pretty: bool,
    #[serde(default)]
    pub ascii: bool,
    #[serde(default)]
    pub truncate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_error: Option<JsonResponse>,
}

/// `JSON_TABLE(doc, path [on error] [on empty] COLUMNS (...))`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonTable {
    pub name: String,
    pub doc: JsonArg,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Expr>,
    #[serde(default)]
    pub on: JsonOn,
    pub columns: Vec<JsonTableColumn>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonTableColumn {
    /// `name FOR ORDINALITY`
    Ordinality(String),
    /// `name [type] EXISTS [PATH 'p'] [on clauses]`
    Exists {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data_type: Option<DataType>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<Expr>,
        #[serde(default)]
        on: JsonOn,
    },
    /// `name [type] FORMAT JSON [modes] [PATH 'p'] [on clauses]`
    Query {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data_type: Option<DataType>,
        #[serde(default)]
        modes: JsonModes,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<Expr>,
        #[serde(default)]
        on: JsonOn,
    },
    /// `name [type] [TRUNCATE] [PATH 'p'] [on clauses]`
    Value {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data_type: Option<DataType>,
        #[serde(default)]
        truncate: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<Expr>,
        #[serde(default)]
        on: JsonOn,
    },
    /// `NESTED [PATH] 'p' COLUMNS (...)`
    Nested {
        keywords: Vec<String>,
        path: Expr,
        columns: Vec<JsonTableColumn>,
    },
}

// ---------------------------------------------------------------------------
// Windows and ordering
// ---------------------------------------------------------------------------

/// `expr [ASC|DESC] [NULLS FIRST|LAST]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortItem {
    pub expr: Expr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nulls: Vec<String>,
}

impl SortItem {
    pub fn new(expr: Expr, direction: Option<&str>) -> Self {
        Self {
            expr,
            direction: direction.map(str::to_string),
            nulls: Vec::new(),
        }
    }
}

/// `[ORDER [SIBLINGS] BY items]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderByClause {
    #[serde(default)]
    pub siblings: bool,
    pub items: Vec<SortItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSpecNode {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub partition_by: Vec<Expr>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<SortItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<Frame>,
}

/// `ROWS|RANGE bound` or `ROWS|RANGE BETWEEN bound AND bound`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub unit: String,
    pub begin: FrameBound,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<FrameBound>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameBound {
    CurrentRow,
    /// `UNBOUNDED|expr PRECEDING|FOLLOWING`; `None` is `UNBOUNDED`
    Offset {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        offset: Option<Expr>,
        direction: String,
    },
}

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// `number`, `float`, `decimal`, `int`, `binary_double` ...
    Number {
        name: String,
        /// `*` for `number(*, s)`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        precision: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scale: Option<String>,
    },
    /// `char`, `varchar2`, `nchar`, `nvarchar2`, `character varying` ...
    Character {
        name: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        length: Option<String>,
        /// `BYTE` / `CHAR`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        length_semantics: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        charset: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        collation: Option<String>,
    },
    /// `timestamp [(p)] [WITH [LOCAL] TIME ZONE]`
    Timestamp {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        precision: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        time_zone: Vec<String>,
    },
    /// `interval year [(p)] to month`
    IntervalYearToMonth {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        year_precision: Option<String>,
    },
    /// `interval day [(p)] to second [(s)]`
    IntervalDayToSecond {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        day_precision: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        second_precision: Option<String>,
    },
    /// date, blob, clob, raw, json, rowid, urowid, xmltype, user types
    Named {
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<String>,
    },
}

impl DataType {
    pub fn named(name: &str, args: &[&str]) -> Self {
        DataType::Named {
            name: name.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn character(name: &str, length: Option<&str>) -> Self {
        DataType::Character {
            name: name.split_whitespace().map(str::to_string).collect(),
            length: length.map(str::to_string),
            length_semantics: None,
            charset: None,
            collation: None,
        }
    }

    pub fn number(name: &str, precision: Option<&str>, scale: Option<&str>) -> Self {
        DataType::Number {
            name: name.to_string(),
            precision: precision.map(str::to_string),
            scale: scale.map(str::to_string),
        }
    }
}

// ---------------------------------------------------------------------------
// Select
// ---------------------------------------------------------------------------

/// A full query: optional WITH, a query expression and the ORDER BY, FETCH
/// and FOR UPDATE clauses of its last block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectStmt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with: Option<WithClause>,
    pub body: QueryExpr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderByClause>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch: Option<FetchClause>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub for_update: Option<ForUpdateClause>,
}

impl SelectStmt {
    pub fn new(body: QueryExpr) -> Self {
        Self {
            with: None,
            body,
            order_by: None,
            fetch: None,
            for_update: None,
        }
    }

    pub fn simple(select: SimpleSelect) -> Self {
        Self::new(QueryExpr::Simple(Box::new(select)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithClause {
    #[serde(default)]
    pub recursive: bool,
    pub tables: Vec<CommonTableExpr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonTableExpr {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
    pub query: SelectStmt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryExpr {
    Simple(Box<SimpleSelect>),
    /// `( select )`
    Parens(Box<SelectStmt>),
    /// `left UNION [ALL] right`, `INTERSECT`, `MINUS`
    SetOp {
        left: Box<QueryExpr>,
        set_type: Vec<String>,
        right: Box<QueryExpr>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleSelect {
    /// `DISTINCT`, `UNIQUE`, `ALL`, hints
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub projections: Vec<SelectItem>,
    /// `FROM DUAL` is an ordinary table here
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub from: Vec<TableReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#where: Option<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchy: Option<Hierarchy>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<GroupingElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub having: Option<Expr>,
}

/// `[START WITH cond] CONNECT BY [NOCYCLE] cond`, either order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hierarchy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_with: Option<Expr>,
    pub connect_by: Expr,
    #[serde(default)]
    pub nocycle: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingElement {
    Expr(Expr),
    GroupingSets(Vec<GroupingElement>),
    Rollup(Vec<Expr>),
    Cube(Vec<Expr>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectItem {
    Star,
    Expr {
        expr: Expr,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alias: Option<String>,
    },
}

impl SelectItem {
    pub fn expr(expr: Expr, alias: Option<&str>) -> Self {
        SelectItem::Expr {
            expr,
            alias: alias.map(str::to_string),
        }
    }
}

/// `[OFFSET n ROWS] [FETCH FIRST|NEXT [n [PERCENT]] ROWS ONLY|WITH TIES]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchClause {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<Expr>,
    #[serde(default)]
    pub percent: bool,
    /// `ONLY` / `WITH TIES`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addition: Vec<String>,
}

/// `FOR UPDATE [OF cols] [WAIT n | NOWAIT | SKIP LOCKED]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForUpdateClause {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<ColumnRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wait: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_num: Option<String>,
}

// ---------------------------------------------------------------------------
// FROM references
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableReference {
    Table(TableName),
    Subquery {
        query: Box<SelectStmt>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alias: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        flashback: Option<Flashback>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transpose: Option<Transpose>,
        /// `WITH CHECK OPTION`
        #[serde(default)]
        with_check_option: bool,
    },
    /// `TABLE(expr) [alias]`, or a bare collection expression
    TableFunction {
        expr: Expr,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alias: Option<String>,
    },
    JsonTable {
        table: Box<JsonTable>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alias: Option<String>,
    },
    /// `( table_reference )`
    Parens(Box<TableReference>),
    Join {
        left: Box<TableReference>,
        join_type: Vec<String>,
        right: Box<TableReference>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        condition: Option<JoinOn>,
    },
}

impl TableReference {
    pub fn table(name: &str, alias: Option<&str>) -> Self {
        TableReference::Table(TableName::new(RelationName::new(None, name), alias))
    }

    pub fn join(left: TableReference, join_type: &str, right: TableReference, condition: Option<JoinOn>) -> Self {
        TableReference::Join {
            left: Box::new(left),
            join_type: join_type.split_whitespace().map(str::to_string).collect(),
            right: Box::new(right),
            condition,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableName {
    pub name: RelationName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition: Option<PartitionUse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flashback: Option<Flashback>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transpose: Option<Transpose>,
}

impl TableName {
    pub fn new(name: RelationName, alias: Option<&str>) -> Self {
        Self {
            name,
            alias: alias.map(str::to_string),
            partition: None,
            flashback: None,
            transpose: None,
        }
    }
}

/// `PARTITION|SUBPARTITION (names)` or `PARTITION|SUBPARTITION FOR (values)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionUse {
    Names { keyword: String, names: Vec<String> },
    For { keyword: String, values: Vec<Expr> },
}

/// `AS OF SCN|TIMESTAMP expr`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashback {
    pub kind: Vec<String>,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transpose {
    Pivot(PivotClause),
    Unpivot(UnpivotClause),
}

/// `PIVOT (agg [alias], ... FOR cols IN (expr [alias], ...)) [alias]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotClause {
    pub aggregates: Vec<PivotAggregate>,
    pub for_columns: Vec<String>,
    pub in_items: Vec<PivotInItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotAggregate {
    pub call: Call,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotInItem {
    pub expr: Expr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// `UNPIVOT [INCLUDE|EXCLUDE NULLS] (cols FOR cols IN ((cols) [AS expr], ...)) [alias]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnpivotClause {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nulls: Vec<String>,
    pub columns: Vec<String>,
    pub for_columns: Vec<String>,
    pub in_items: Vec<UnpivotInItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnpivotInItem {
    pub columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinOn {
    On(Expr),
    Using(Vec<ColumnRef>),
}

// ---------------------------------------------------------------------------
// Partitioning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionOption {
    Hash(HashScheme),
    Range(RangeScheme),
    List(ListScheme),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashScheme {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<SubPartitionSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<PartitionElementNode>>,
    /// Physical attributes written after the scheme
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<PartitionAttr>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeScheme {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<Expr>,
    /// `INTERVAL (expr)`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<SubPartitionSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<PartitionElementNode>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<PartitionAttr>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListScheme {
    pub columns: Vec<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<SubPartitionSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<PartitionElementNode>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<PartitionAttr>,
}

/// `SUBPARTITION BY kind (cols) [SUBPARTITION TEMPLATE (...) | SUBPARTITIONS n]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubPartitionSpec {
    /// `HASH`, `RANGE`, `LIST`
    pub kind: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<Vec<SubPartitionElementNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<String>,
}

/// `PARTITION [name] bound [attributes] [(subpartitions)]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionElementNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<RelationName>,
    pub bound: BoundNode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<PartitionAttr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subpartitions: Option<Vec<SubPartitionElementNode>>,
}

impl PartitionElementNode {
    pub fn new(name: Option<&str>, bound: BoundNode) -> Self {
        Self {
            name: name.map(|n| RelationName::new(None, n)),
            bound,
            attributes: Vec::new(),
            subpartitions: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubPartitionElementNode {
    pub name: RelationName,
    pub bound: BoundNode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<PartitionAttr>,
}

impl SubPartitionElementNode {
    pub fn new(name: &str, bound: BoundNode) -> Self {
        Self {
            name: RelationName::new(None, name),
            bound,
            attributes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundNode {
    /// Hash element, or a split target naming only a partition
    None,
    /// `VALUES LESS THAN (...)`
    LessThan(Vec<PartitionValue>),
    /// `VALUES (...)`
    Values(Vec<PartitionValue>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionValue {
    Expr(Expr),
    /// `MAXVALUE` as written
    MaxValue(String),
    /// `DEFAULT` as written
    Default(String),
}

/// Physical attribute of a partition or partition element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionAttr {
    Id(String),
    Tablespace(String),
    /// `COMPRESS [tokens]`
    Compress(Vec<String>),
    NoCompress,
    /// `PCTFREE|PCTUSED|INITRANS|MAXTRANS n`
    Physical { key: String, value: String },
    /// `STORAGE (items)`
    Storage(Vec<String>),
}

// ---------------------------------------------------------------------------
// Table elements
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableElement {
    Column(Box<ColumnDefinition>),
    Index(Box<IndexDefinition>),
    Constraint(Box<ConstraintDefinition>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub column: ColumnRef,
    /// Optional for `MODIFY (c NOT NULL)` and virtual columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataType>,
    /// `VISIBLE` / `INVISIBLE`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated: Option<GeneratedColumn>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<ColumnAttribute>,
}

impl ColumnDefinition {
    pub fn new(column: &str, data_type: Option<DataType>) -> Self {
        Self {
            column: ColumnRef::new(None, column),
            data_type,
            visibility: None,
            generated: None,
            attributes: Vec::new(),
        }
    }
}

/// `[GENERATED ALWAYS|BY DEFAULT [ON NULL]] AS (expr) [VIRTUAL]` or
/// `... AS IDENTITY [(sequence options)]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedColumn {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    pub body: GeneratedBody,
    #[serde(default)]
    pub r#virtual: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratedBody {
    Expr(Expr),
    Identity(Option<Vec<SequenceOptionNode>>),
}

/// `START WITH n`, `NOCACHE`, `CYCLE` ...; keyword tokens and optional value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceOptionNode {
    pub keyword: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl SequenceOptionNode {
    pub fn new(keyword: &str, value: Option<&str>) -> Self {
        Self {
            keyword: keyword.split_whitespace().map(str::to_string).collect(),
            value: value.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnAttribute {
    /// `[CONSTRAINT n] [NOT] NULL | PRIMARY KEY | UNIQUE [state]`
    Constraint {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        kind: InlineKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        state: Option<ConstraintStateNode>,
    },
    Default(Expr),
    OrigDefault(DefaultValue),
    Id(String),
    Comment(String),
    SkipIndex(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineKind {
    Null { not: bool },
    PrimaryKey,
    Unique,
    Check(Expr),
    References(ReferencesClause),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultValue {
    /// `CURRENT_TIMESTAMP[(p)]`, `SYSTIMESTAMP` ...
    Now {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        precision: Option<String>,
    },
    Literal(SignedLiteral),
}

/// `[RELY|NORELY] [USING INDEX [options]] [ENABLE|DISABLE] [VALIDATE|NOVALIDATE]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintStateNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rely: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub using_index: Option<IndexState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate: Option<String>,
}

/// Index clause of a primary or unique key: `[USING INDEX] [options] [partition]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexState {
    /// `USING INDEX` written
    #[serde(default)]
    pub using_index: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<IndexOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition: Option<PartitionOption>,
}

/// `[CONSTRAINT n] REFERENCES t [(cols)] [ON DELETE CASCADE|SET NULL]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencesClause {
    pub table: RelationName,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
    /// Action tokens after `ON DELETE`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on_delete: Vec<String>,
}

/// `INDEX [name] (cols) [options] [partition]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub columns: Vec<SortColumnNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<IndexOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition: Option<PartitionOption>,
}

/// Index key expression with optional direction and id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortColumnNode {
    pub expr: Expr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl SortColumnNode {
    pub fn column(name: &str) -> Self {
        Self {
            expr: Expr::path(&[name]),
            direction: None,
            id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexOption {
    /// `GLOBAL` / `LOCAL`
    Scope(String),
    /// `USING BTREE|HASH`
    Using(String),
    Comment(String),
    BlockSize(String),
    DataTableId(String),
    IndexTableId(String),
    VirtualColumnId(String),
    MaxUsedPartId(String),
    Storing(Vec<ColumnRef>),
    WithRowId,
    /// `VISIBLE` / `INVISIBLE`
    Visibility(String),
    /// `NOPARALLEL` is `None`
    Parallel(Option<String>),
    Reverse,
    Tablespace(String),
    Storage(Vec<String>),
}

/// `[CONSTRAINT name] PRIMARY KEY | UNIQUE | FOREIGN KEY | CHECK ...`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub body: ConstraintBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintBody {
    /// `PRIMARY KEY (cols) [index state]`
    PrimaryKey {
        columns: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<IndexState>,
    },
    /// `UNIQUE (cols) [index state]`
    Unique {
        columns: Vec<SortColumnNode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<IndexState>,
    },
    /// `FOREIGN KEY (cols) REFERENCES ... [state]`
    ForeignKey {
        columns: Vec<String>,
        references: ReferencesClause,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        state: Option<ConstraintStateNode>,
    },
    Check {
        expr: Expr,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        state: Option<ConstraintStateNode>,
    },
}

// ---------------------------------------------------------------------------
// Table options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableOption {
    /// `SORTKEY (cols)`
    SortKey(Vec<String>),
    /// Option whose value is kept as text: `COMMENT 'x'`, `TABLESPACE ts`, ...
    Text { key: String, value: String },
    /// Option whose value is an integer: `PCTFREE 10`, `BLOCK_SIZE 16384`, ...
    Integer { key: String, value: String },
    /// Option whose value is `TRUE`/`FALSE`
    Flag { key: String, value: String },
    /// `LOCALITY = name [FORCE]`
    Locality { name: String, force: bool },
    ExpireInfo(Expr),
    /// `COMPRESS [tokens]`
    Compress(Vec<String>),
    NoCompress,
    /// `READ ONLY` / `READ WRITE`
    Read(String),
    /// `ENABLE ROW MOVEMENT` / `DISABLE ROW MOVEMENT`
    RowMovement(String),
    /// `NOPARALLEL` is `None`
    Parallel(Option<String>),
    /// `STORAGE (items)`
    Storage(Vec<String>),
    Format(Vec<FormatEntry>),
    Properties(Vec<(String, String)>),
    LobStorage { column: String, sizes: Vec<String> },
    AutoRefresh(String),
}

impl TableOption {
    pub fn text(key: &str, value: &str) -> Self {
        TableOption::Text {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    pub fn integer(key: &str, value: &str) -> Self {
        TableOption::Integer {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// One `key = value` of `FORMAT = (...)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatEntry {
    pub key: String,
    pub value: FormatValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatValue {
    Text(String),
    Expr(Expr),
    Bool(String),
    List(Vec<Expr>),
}

// ---------------------------------------------------------------------------
// ALTER TABLE
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlterTableClause {
    TableOptions(Vec<TableOption>),
    RenameTable(RelationName),
    Refresh,
    /// `MOVE COMPRESS [tokens]` / `MOVE NOCOMPRESS`
    Move {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        compress: Option<Vec<String>>,
    },
    /// `SET INTERVAL ([expr])`
    SetInterval(Option<Expr>),
    /// `ENABLE|DISABLE ALL TRIGGERS`
    AllTriggers(String),

    /// `ADD c ...` / `ADD (c1 ..., c2 ...)`
    AddColumns(Vec<ColumnDefinition>),
    /// `DROP COLUMN c [CASCADE|RESTRICT]` / `DROP (c1, c2)`
    DropColumns {
        columns: Vec<ColumnRef>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        option: Option<String>,
    },
    /// `MODIFY c ...` / `MODIFY (c1 ..., c2 ...)`
    ModifyColumns(Vec<ColumnDefinition>),
    RenameColumn {
        from: ColumnRef,
        to: String,
    },
    DropTableGroup,

    AddConstraint(ConstraintDefinition),
    /// `DROP CONSTRAINT name`
    DropConstraint(String),
    DropPrimaryKey,
    /// `MODIFY PRIMARY KEY (cols) [index state]`
    ModifyPrimaryKey {
        columns: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<IndexState>,
    },
    /// `MODIFY CONSTRAINT name state`
    ModifyConstraint {
        name: String,
        state: ConstraintStateNode,
    },
    /// `ALTER INDEX i VISIBLE|INVISIBLE`
    AlterIndexVisibility {
        name: String,
        visibility: String,
    },

    /// `DROP|TRUNCATE PARTITION|SUBPARTITION names [UPDATE GLOBAL INDEXES]`
    Partition {
        verb: String,
        keyword: String,
        names: Vec<String>,
        #[serde(default)]
        update_global_indexes: bool,
    },
    AddPartitions(Vec<PartitionElementNode>),
    /// `MODIFY PARTITION p ADD SUBPARTITION ...`
    AddSubPartitions {
        partition: RelationName,
        elements: Vec<SubPartitionElementNode>,
    },
    /// `SPLIT PARTITION p AT|VALUES (...) [INTO (...)]`
    SplitPartition {
        partition: RelationName,
        /// `AT` or `VALUES`
        keyword: String,
        values: Vec<Expr>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        into: Option<Vec<PartitionElementNode>>,
    },
    /// `RENAME PARTITION|SUBPARTITION a TO b`
    RenamePartition {
        keyword: String,
        from: String,
        to: String,
    },
    /// `PARTITION BY ...` on an existing table
    ModifyPartition(PartitionOption),
    /// `EXCHANGE PARTITION p WITH TABLE t [WITH|WITHOUT VALIDATION]`
    ExchangePartition {
        name: String,
        table: RelationName,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        validation: Vec<String>,
    },

    AddColumnGroup(Vec<ColumnGroupNode>),
    DropColumnGroup(Vec<ColumnGroupNode>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnGroupNode {
    AllColumns,
    EachColumn,
    Custom { name: String, columns: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_splits_operator_tokens() {
        match Expr::binary(Expr::path(&["a"]), "< >", Expr::literal("1")) {
            Expr::Binary { op, .. } => assert_eq!(op, vec!["<", ">"]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_path_serializes_steps_in_order() {
        let expr = Expr::path(&["a", "b"]);
        let json = serde_json::to_string(&expr).unwrap();
        assert!(json.starts_with("{\"path\":"));
        let back: Expr = serde_json::from_str(&json).unwrap();
        assert_eq!(back, expr);
    }
}
