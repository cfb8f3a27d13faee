//! Typed parse tree of the MySQL dialect.
//!
//! Nodes mirror the grammar rules the upstream parser accepts. Positions
//! where the grammar allows a choice of keywords or operators keep the text
//! as written (`op: "<>"`, `unit: "DAY"`); the factories resolve that text
//! and reject spellings they do not know.
//!
//! # Building trees
//!
//! ```rust
//! use sql_lowering::dialects::mysql::tree::{Expr, ColumnRef};
//!
//! // a.b <> 1
//! let cmp = Expr::binary(Expr::column(Some("a"), "b"), "<>", Expr::literal("1"));
//! assert!(matches!(cmp, Expr::Binary { .. }));
//! assert_eq!(ColumnRef::new(None, "c").column, "c");
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

/// `[schema.]relation[@user_variable]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub relation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_variable: Option<String>,
}

impl RelationName {
    pub fn new(schema: Option<&str>, relation: &str) -> Self {
        Self {
            schema: schema.map(str::to_string),
            relation: relation.to_string(),
            user_variable: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Column(ColumnRef),
    /// `[schema.]relation.column@var`
    VariableColumn {
        column: ColumnRef,
        user_variable: String,
    },
    /// Number, string, hex, bit or temporal literal, as written
    Literal(String),
    /// Adjacent string literals, `'a' 'b'`
    Strings(Vec<String>),
    Bool(bool),
    Null,
    /// `DEFAULT` in value position
    Default,
    /// `@v`, `@@session.v`
    Variable(String),

    /// Prefix operator: `-`, `+`, `~`, `!`, `NOT`, `BINARY`, `||`
    Unary {
        op: String,
        operand: Box<Expr>,
    },
    /// Infix operator: logical, comparison, arithmetic and bit operators
    Binary {
        left: Box<Expr>,
        op: String,
        right: Box<Expr>,
    },
    /// `expr IS [NOT] TRUE|FALSE|UNKNOWN|NULL`
    Is {
        operand: Box<Expr>,
        not: bool,
        target: String,
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
    Regexp {
        operand: Box<Expr>,
        not: bool,
        pattern: Box<Expr>,
    },
    MemberOf {
        operand: Box<Expr>,
        not: bool,
        target: Box<Expr>,
    },
    /// `@v := expr`
    Assign {
        variable: String,
        value: Box<Expr>,
    },
    /// `col -> 'path'` / `col ->> 'path'`; the path may be several adjacent strings
    JsonPath {
        column: ColumnRef,
        arrow: String,
        path: Vec<String>,
    },

    Exists(Box<SelectStmt>),
    Subquery(Box<SelectStmt>),
    /// `(a, b, c)`
    List(Vec<Expr>),
    /// `ROW(a, b)`, keyword as written
    Row {
        keyword: String,
        items: Vec<Expr>,
    },
    /// `[a, b]`
    Array(Vec<Expr>),
    /// `ANY([a, b])` on the right of a comparison
    AnyArray(Vec<Expr>),
    /// `INTERVAL expr unit` as an operand of `+`/`-`
    Interval {
        value: Box<Expr>,
        unit: String,
    },
    Case(Box<Case>),
    Function(Box<Function>),
    /// `MATCH (cols) AGAINST ('text' [IN BOOLEAN MODE | ...])`
    Match {
        columns: Vec<ColumnRef>,
        against: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        mode: Vec<String>,
    },
    /// `{name expr}`
    Brace {
        name: String,
        expr: Box<Expr>,
    },
}

impl Expr {
    pub fn column(relation: Option<&str>, column: &str) -> Self {
        Expr::Column(ColumnRef::new(relation, column))
    }

    pub fn literal(text: &str) -> Self {
        Expr::Literal(text.to_string())
    }

    pub fn binary(left: Expr, op: &str, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op: op.to_string(),
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

    pub fn call(name: &str, args: Vec<Expr>) -> Self {
        Expr::Function(Box::new(Function::Call(Call::new(name, args))))
    }

    pub fn function(function: Function) -> Self {
        Expr::Function(Box::new(function))
    }
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
    /// `+` or `-` when written
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

/// Function-call forms with their own grammar rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Function {
    Call(Call),
    Window(WindowCall),
    GroupConcat(GroupConcat),
    /// `CAST(expr AS type)`
    Cast {
        name: String,
        expr: Expr,
        target: DataType,
    },
    /// `CONVERT(expr, type)` / `CONVERT(expr USING charset)`
    Convert {
        name: String,
        expr: Expr,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<DataType>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        charset: Option<String>,
    },
    /// `POSITION(needle IN haystack)`
    Position {
        name: String,
        needle: Expr,
        haystack: Expr,
    },
    /// `SUBSTR|SUBSTRING(...)`, name as written
    Substring {
        name: String,
        args: Vec<Expr>,
    },
    /// `TRIM([BOTH|LEADING|TRAILING] [remove] FROM expr)`
    Trim {
        name: String,
        /// Keyword tokens written before the first expression
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        keywords: Vec<String>,
        expr: Expr,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<Expr>,
    },
    /// `GET_FORMAT(DATE|TIME|DATETIME, expr)`
    GetFormat {
        name: String,
        unit: String,
        expr: Expr,
    },
    /// `DATE_ADD|DATE_SUB|ADDDATE|SUBDATE(date, INTERVAL expr unit)`
    DateArith {
        name: String,
        date: Expr,
        interval: Expr,
        unit: String,
    },
    /// `TIMESTAMPDIFF|TIMESTAMPADD(unit, a, b)`
    TimestampArith {
        name: String,
        unit: String,
        args: Vec<Expr>,
    },
    /// `EXTRACT(unit FROM expr)`
    Extract {
        name: String,
        unit: String,
        expr: Expr,
    },
    /// `CHAR(exprs USING charset)`
    Char {
        name: String,
        args: Vec<Expr>,
        charset: String,
    },
    /// `WEIGHT_STRING(expr [AS CHAR|BINARY (n)] [, n...])`
    WeightString {
        name: String,
        expr: Expr,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        weights: Option<WeightCast>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        numbers: Vec<String>,
    },
    JsonValue(JsonValue),
    JsonQuery(JsonQuery),
    /// `NOW([p])`, `SYSDATE`, `CURTIME`, `CURDATE`, `UTC_*` and synonyms
    CurrentTime {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        precision: Option<String>,
    },
}

/// Plain call `[relation.]name([ALL|DISTINCT|UNIQUE] args)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregator: Option<String>,
    pub args: CallArgs,
}

impl Call {
    pub fn new(name: &str, args: Vec<Expr>) -> Self {
        Self {
            relation: None,
            name: name.to_string(),
            aggregator: None,
            args: CallArgs::Exprs(args.into_iter().map(Arg::new).collect()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallArgs {
    /// `count(*)`
    Star,
    Exprs(Vec<Arg>),
    /// `f(col, NULL, -1)`, a column followed by multi-value index parameters
    ColumnParams {
        column: ColumnRef,
        params: Vec<MvtParam>,
    },
}

/// An argument with an optional alias, `json_object(a AS k)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arg {
    pub value: Expr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl Arg {
    pub fn new(value: Expr) -> Self {
        Self { value, alias: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MvtParam {
    Null,
    /// Integer with optional leading minus
    Number {
        negative: bool,
        value: String,
    },
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConcat {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregator: Option<String>,
    pub args: Vec<Expr>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<SortItem>,
    /// Separator literal, quotes included
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
}

/// `name(args) [RESPECT|IGNORE NULLS] [FROM FIRST|LAST] OVER window`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowCall {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregator: Option<String>,
    pub args: CallArgs,
    /// `RESPECT NULLS` / `IGNORE NULLS` tokens
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nulls: Vec<String>,
    /// `FROM FIRST` / `FROM LAST` tokens of `NTH_VALUE`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub from_first_last: Vec<String>,
    /// `GROUP_CONCAT` / `LISTAGG` ordering
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<SortItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    pub over: WindowDef,
}

/// `AS CHAR(n)` / `AS BINARY(n)` of `WEIGHT_STRING`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightCast {
    pub keyword: String,
    pub length: String,
}

/// `JSON_VALUE(doc, path [RETURNING type] [TRUNCATE] [ASCII] [on empty] [on error] [on mismatch])`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonValue {
    pub name: String,
    pub doc: Expr,
    pub path: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returning: Option<DataType>,
    #[serde(default)]
    pub truncate: bool,
    #[serde(default)]
    pub ascii: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_empty: Option<JsonResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_error: Option<JsonResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_mismatch: Option<JsonResponse>,
}

/// `JSON_QUERY(doc, path [RETURNING type] [TRUNCATE] [scalars] [PRETTY] [ASCII]
/// [wrapper] [ASIS] [on empty] [on error] [on mismatch] [MULTIVALUE])`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonQuery {
    pub name: String,
    pub doc: Expr,
    pub path: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returning: Option<DataType>,
    #[serde(default)]
    pub truncate: bool,
    /// `ALLOW SCALARS` / `DISALLOW SCALARS` tokens
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scalars: Vec<String>,
    #[serde(default)]
    pub pretty: bool,
    #[serde(default)]
    pub ascii: bool,
    /// `WITH UNCONDITIONAL ARRAY WRAPPER`, ... tokens
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wrapper: Vec<String>,
    #[serde(default)]
    pub asis: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_empty: Option<JsonResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_error: Option<JsonResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_mismatch: Option<JsonResponse>,
    #[serde(default)]
    pub multivalue: bool,
}

impl JsonQuery {
    pub fn new(name: &str, doc: Expr, path: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            doc,
            path: path.iter().map(|p| p.to_string()).collect(),
            returning: None,
            truncate: false,
            scalars: Vec::new(),
            pretty: false,
            ascii: false,
            wrapper: Vec::new(),
            asis: false,
            on_empty: None,
            on_error: None,
            on_mismatch: None,
            multivalue: false,
        }
    }
}

/// Response of an ON EMPTY / ON ERROR / ON MISMATCH clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonResponse {
    /// `ERROR`, as written
    Error(String),
    Null,
    Default(SignedLiteral),
    /// `EMPTY`, `EMPTY ARRAY`, `EMPTY OBJECT`, as written
    Keyword(Vec<String>),
}

/// `JSON_TABLE(expr, path COLUMNS (...))`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonTable {
    pub name: String,
    pub expr: Expr,
    pub path: Expr,
    pub columns: Vec<JsonTableColumn>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonTableColumn {
    /// `name FOR ORDINALITY`
    Ordinality(String),
    /// `name type [COLLATE c] EXISTS PATH 'p' [on empty] [on error]`
    Exists {
        name: String,
        data_type: DataType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        collation: Option<String>,
        path: Expr,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        on_empty: Option<JsonResponse>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        on_error: Option<JsonResponse>,
    },
    /// `name type [COLLATE c] PATH 'p' [on empty] [on error]`
    Value {
        name: String,
        data_type: DataType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        collation: Option<String>,
        path: Expr,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        on_empty: Option<JsonResponse>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        on_error: Option<JsonResponse>,
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

/// `expr [ASC|DESC]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortItem {
    pub expr: Expr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

impl SortItem {
    pub fn new(expr: Expr, direction: Option<&str>) -> Self {
        Self {
            expr,
            direction: direction.map(str::to_string),
        }
    }
}

/// `OVER w` or `OVER (...)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowDef {
    Named(String),
    Spec(WindowSpecNode),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSpecNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
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
    /// `offset PRECEDING|FOLLOWING`, direction as written
    Offset {
        offset: FrameOffset,
        direction: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameOffset {
    Unbounded(String),
    Expr(Expr),
    Interval { value: Expr, unit: String },
}

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Cast target `SIGNED|UNSIGNED [INTEGER]`
    CastInteger(Vec<String>),
    /// Type name written as a string literal
    Quoted(String),
    /// `type[]`
    Array(Box<DataType>),
    /// binary, geometry, json, bool, roaringbitmap, blob, bit, date, datetime, time, year
    Named {
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<String>,
    },
    /// `[national] char|varchar|text ... [(n)] [BINARY] [CHARSET cs] [COLLATE c]`
    Character {
        name: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        length: Option<String>,
        #[serde(default)]
        binary: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        charset: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        collation: Option<String>,
    },
    Timestamp {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        precision: Option<String>,
    },
    /// Integer, decimal and float types
    Number {
        name: String,
        /// `double PRECISION`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        precision_keyword: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<String>,
        /// `SIGNED` or `UNSIGNED` as written
        #[serde(default, skip_serializing_if = "Option::is_none")]
        signedness: Option<String>,
        #[serde(default)]
        zerofill: bool,
    },
    /// `enum(...)` / `set(...)`
    Collection {
        name: String,
        values: Vec<String>,
        #[serde(default)]
        binary: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        charset: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        collation: Option<String>,
    },
    Vector {
        name: String,
        dimension: String,
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
            binary: false,
            charset: None,
            collation: None,
        }
    }

    pub fn number(name: &str, args: &[&str]) -> Self {
        DataType::Number {
            name: name.to_string(),
            precision_keyword: None,
            args: args.iter().map(|a| a.to_string()).collect(),
            signedness: None,
            zerofill: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Select
// ---------------------------------------------------------------------------

/// A full query: optional WITH, a query expression and trailing clauses
/// that apply to the last block of a set-operation chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectStmt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with: Option<WithClause>,
    pub body: QueryExpr,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<SortItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<LimitClause>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub for_update: Option<ForUpdateClause>,
    #[serde(default)]
    pub lock_in_share_mode: bool,
}

impl SelectStmt {
    pub fn new(body: QueryExpr) -> Self {
        Self {
            with: None,
            body,
            order_by: Vec::new(),
            limit: None,
            for_update: None,
            lock_in_share_mode: false,
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
    /// `VALUES ROW(...), ROW(...)`
    Values(Vec<Vec<Expr>>),
    /// `( select )`
    Parens(Box<SelectStmt>),
    /// `left UNION [ALL|DISTINCT|UNIQUE] right`, `INTERSECT`, `EXCEPT`, `MINUS`
    SetOp {
        left: Box<QueryExpr>,
        set_type: Vec<String>,
        right: Box<QueryExpr>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleSelect {
    /// `DISTINCT`, `SQL_CALC_FOUND_ROWS`, ...
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub projections: Vec<SelectItem>,
    pub from: FromClause,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#where: Option<Expr>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<SortItem>,
    #[serde(default)]
    pub with_rollup: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub having: Option<Expr>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub windows: Vec<NamedWindow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<SortItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<LimitClause>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FromClause {
    #[default]
    None,
    /// `FROM DUAL`, keyword as written
    Dual(String),
    Tables(Vec<TableReference>),
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

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedWindow {
    pub name: String,
    pub spec: WindowSpecNode,
}

/// `LIMIT [offset,] count` or `LIMIT count OFFSET offset`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitClause {
    pub row_count: Expr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Expr>,
}

/// `FOR UPDATE [WAIT n | NOWAIT | SKIP LOCKED]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForUpdateClause {
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
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        alias_columns: Vec<String>,
        #[serde(default)]
        lateral: bool,
        /// `AS OF SNAPSHOT expr`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        snapshot: Option<Expr>,
    },
    JsonTable {
        table: Box<JsonTable>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alias: Option<String>,
    },
    /// `TABLE(expr) [alias]`
    TableFunction {
        expr: Expr,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alias: Option<String>,
    },
    /// `( table_reference )`
    Parens(Box<TableReference>),
    /// `{OJ table_reference}`
    Brace {
        name: String,
        reference: Box<TableReference>,
    },
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
        TableReference::Table(TableName {
            name: RelationName::new(None, name),
            alias: alias.map(str::to_string),
            partition: None,
            snapshot: None,
        })
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
    /// `AS OF SNAPSHOT expr`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionUse {
    /// `PARTITION (p1, p2)`
    Names(Vec<String>),
    /// `PARTITION (k1 = v1, ...)` of an external table
    External(Vec<(String, Expr)>),
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
    /// `PARTITION BY HASH (expr) ...`
    Hash(HashScheme),
    /// `PARTITION BY KEY [(cols)] ...`
    Key(HashScheme),
    Range(RangeScheme),
    List(ListScheme),
    /// `PARTITION BY COLUMN (a, (b, c))`
    Column(Vec<ColumnGroup>),
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
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeScheme {
    /// `COLUMNS` keyword written
    #[serde(default)]
    pub columns_keyword: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<SubPartitionSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<PartitionCount>,
    /// `PARTITION SIZE 'auto'`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<PartitionElementNode>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListScheme {
    #[serde(default)]
    pub columns_keyword: bool,
    pub columns: Vec<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<SubPartitionSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<PartitionElementNode>>,
}

/// `PARTITIONS n` or `PARTITIONS AUTO`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionCount {
    Num(String),
    Auto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnGroup {
    Column(ColumnRef),
    Group(Vec<ColumnGroup>),
}

/// `SUBPARTITION BY kind (cols) [SUBPARTITION TEMPLATE (...) | SUBPARTITIONS n]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubPartitionSpec {
    /// `HASH`, `KEY`, `RANGE [COLUMNS]`, `LIST [COLUMNS]` tokens
    pub kind: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<Vec<SubPartitionElementNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionElementNode {
    pub name: RelationName,
    pub bound: BoundNode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<PartitionAttr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subpartitions: Option<Vec<SubPartitionElementNode>>,
}

impl PartitionElementNode {
    pub fn new(name: &str, bound: BoundNode) -> Self {
        Self {
            name: RelationName::new(None, name),
            bound,
            options: Vec::new(),
            subpartitions: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubPartitionElementNode {
    pub name: RelationName,
    pub bound: BoundNode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<PartitionAttr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundNode {
    /// Hash/key element, no bound written
    None,
    /// `VALUES LESS THAN (...)`
    LessThan(Vec<PartitionValue>),
    /// `VALUES IN (...)`
    In(Vec<PartitionValue>),
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

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionAttr {
    Engine(String),
    Id(String),
    Tablespace(String),
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated: Option<GeneratedColumn>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<ColumnAttribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ColumnLocation>,
}

impl ColumnDefinition {
    pub fn new(column: &str, data_type: Option<DataType>) -> Self {
        Self {
            column: ColumnRef::new(None, column),
            data_type,
            generated: None,
            attributes: Vec::new(),
            location: None,
        }
    }
}

/// `[GENERATED ALWAYS] AS (expr) [VIRTUAL|STORED]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedColumn {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    pub expr: Expr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
}

/// `FIRST`, `BEFORE col`, `AFTER col`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLocation {
    pub keyword: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnAttribute {
    /// `NULL` / `NOT NULL`
    Null { not: bool },
    PrimaryKey,
    Unique,
    /// Bare `KEY`
    Key,
    Check {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        expr: Expr,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        state: Option<CheckState>,
    },
    Default(DefaultValue),
    OrigDefault(DefaultValue),
    AutoIncrement,
    Comment(String),
    OnUpdate(TimestampFunc),
    Id(String),
    Srid(String),
    Collate(String),
    SkipIndex(Vec<String>),
}

/// `[NOT] ENFORCED`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckState {
    pub not: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultValue {
    Now(TimestampFunc),
    Literal(SignedLiteral),
}

/// `CURRENT_TIMESTAMP[(p)]`, `NOW([p])`, `LOCALTIME` ...
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampFunc {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<String>,
}

/// `[SPATIAL|FULLTEXT] INDEX|KEY [name] [USING algo] (cols) [options] [partition] [column groups]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDefinition {
    /// `SPATIAL` or `FULLTEXT` when written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    pub columns: Vec<SortColumnNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<IndexOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition: Option<PartitionOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_groups: Option<Vec<ColumnGroupNode>>,
}

impl IndexDefinition {
    pub fn new(name: Option<&str>, columns: Vec<SortColumnNode>) -> Self {
        Self {
            kind: None,
            name: name.map(str::to_string),
            algorithm: None,
            columns,
            options: Vec::new(),
            partition: None,
            column_groups: None,
        }
    }
}

/// Key of an index: a column with an optional prefix length, or an expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortColumnNode {
    pub key: SortKeyNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl SortColumnNode {
    pub fn column(name: &str) -> Self {
        Self {
            key: SortKeyNode::Column {
                column: ColumnRef::new(None, name),
                length: None,
            },
            direction: None,
            id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKeyNode {
    Column {
        column: ColumnRef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        length: Option<String>,
    },
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexOption {
    /// `GLOBAL` / `LOCAL`
    Scope(String),
    /// `USING BTREE|HASH`
    Using(String),
    Comment(String),
    WithParser(String),
    BlockSize(String),
    DataTableId(String),
    IndexTableId(String),
    VirtualColumnId(String),
    MaxUsedPartId(String),
    /// `STORING (cols)`
    Storing(Vec<ColumnRef>),
    /// `CTXCAT (cols)`
    Ctxcat(Vec<ColumnRef>),
    WithRowId,
    /// `VISIBLE` / `INVISIBLE`
    Visibility(String),
    NoParallel,
    Parallel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnGroupNode {
    AllColumns,
    EachColumn,
    Custom { name: String, columns: Vec<String> },
}

/// `[CONSTRAINT [name]] PRIMARY KEY | UNIQUE | FOREIGN KEY | CHECK ...`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub body: ConstraintBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintBody {
    /// `PRIMARY KEY [name] [USING algo] (cols) [options]`
    PrimaryKey {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        algorithm: Option<String>,
        columns: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        options: Vec<IndexOption>,
    },
    /// `UNIQUE [KEY|INDEX] [name] [USING algo] (cols) [options] [partition] [column groups]`
    Unique {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        algorithm: Option<String>,
        columns: Vec<SortColumnNode>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        options: Vec<IndexOption>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        partition: Option<PartitionOption>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        column_groups: Option<Vec<ColumnGroupNode>>,
    },
    /// `FOREIGN KEY [index] (cols) REFERENCES ...`
    ForeignKey {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index_name: Option<String>,
        columns: Vec<String>,
        references: ReferencesClause,
    },
    Check {
        expr: Expr,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        state: Option<CheckState>,
    },
}

/// `REFERENCES t [(cols)] [MATCH m] [ON DELETE a] [ON UPDATE a]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencesClause {
    pub table: RelationName,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_action: Option<String>,
    /// `(DELETE|UPDATE, action tokens)` in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ReferenceAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceAction {
    /// `DELETE` or `UPDATE`
    pub event: String,
    /// `RESTRICT`, `CASCADE`, `SET NULL`, `NO ACTION`, `SET DEFAULT` tokens
    pub action: Vec<String>,
}

// ---------------------------------------------------------------------------
// Table options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableOption {
    /// `SORTKEY (cols)`
    SortKey(Vec<String>),
    /// Option whose value is kept as text: `COMMENT 'x'`, `ENGINE = InnoDB`, ...
    Text { key: String, value: String },
    /// Option whose value is an integer: `BLOCK_SIZE 16384`, ...
    Integer { key: String, value: String },
    /// Option whose value is `TRUE`/`FALSE`: `USE_BLOOM_FILTER = TRUE`, ...
    Flag { key: String, value: String },
    /// `PACK_KEYS`, `STATS_*`: integer or `DEFAULT`, kept as text
    IntOrDefault { key: String, value: String },
    /// `LOCALITY = name [FORCE]`
    Locality { name: String, force: bool },
    ExpireInfo(Expr),
    /// Integer or decimal text
    AutoIncrement(String),
    /// `READ ONLY` / `READ WRITE`
    Read(String),
    /// `NOPARALLEL` is `None`
    Parallel(Option<String>),
    Format(Vec<FormatEntry>),
    Ttl(Vec<TtlExpr>),
    Properties(Vec<(String, String)>),
    LobStorage { column: String, sizes: Vec<String> },
    /// `AUTO_REFRESH = OFF|IMMEDIATE|INTERVAL`
    AutoRefresh(String),
    /// `UNION = (t1, t2)`
    Union(Vec<RelationName>),
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
    Integer(String),
    Bool(String),
    List(Vec<Expr>),
    Compression(String),
}

/// `col + INTERVAL n unit`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtlExpr {
    pub column: ColumnRef,
    pub value: String,
    pub unit: String,
}

// ---------------------------------------------------------------------------
// ALTER TABLE
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlterTableClause {
    TableOptions(Vec<TableOption>),
    RenameTable(RelationName),
    /// `CONVERT TO CHARACTER SET cs [COLLATE c]`
    ConvertTo {
        charset: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        collation: Option<String>,
    },
    Refresh,
    AddColumn(ColumnDefinition),
    /// `ADD (c1 ..., c2 ...)`
    AddColumns(Vec<ColumnDefinition>),
    DropColumn {
        column: ColumnRef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        option: Option<String>,
    },
    ModifyColumn(ColumnDefinition),
    ChangeColumn {
        from: ColumnRef,
        to: ColumnDefinition,
    },
    /// `ALTER [COLUMN] c SET DEFAULT literal` / `DROP DEFAULT`
    AlterColumn {
        column: ColumnRef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        set_default: Option<SignedLiteral>,
    },
    RenameColumn {
        from: ColumnRef,
        to: String,
    },
    DropTableGroup,
    AddIndex(IndexDefinition),
    DropIndex(String),
    /// `ALTER INDEX i VISIBLE|INVISIBLE`
    AlterIndexVisibility {
        name: String,
        visibility: String,
    },
    /// `ALTER INDEX i PARALLEL n` / `NOPARALLEL`
    AlterIndexParallel {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parallel: Option<String>,
    },
    RenameIndex {
        from: String,
        to: String,
    },
    /// `DROP|TRUNCATE PARTITION|SUBPARTITION names`
    Partition {
        verb: String,
        keyword: String,
        names: Vec<String>,
    },
    AddPartitions(Vec<PartitionElementNode>),
    ModifyPartition(PartitionOption),
    ReorganizePartition {
        names: Vec<String>,
        into: Vec<PartitionElementNode>,
    },
    RemovePartitioning,
    AddConstraint(ConstraintDefinition),
    DropPrimaryKey,
    DropForeignKey(String),
    /// `DROP CONSTRAINT|CHECK name` / `DROP CONSTRAINT (n1, n2)`
    DropConstraints(Vec<String>),
    /// `ALTER CHECK name [NOT] ENFORCED`
    AlterCheck {
        name: String,
        state: CheckState,
    },
    AddColumnGroup(Vec<ColumnGroupNode>),
    DropColumnGroup(Vec<ColumnGroupNode>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_serializes_with_snake_case_tags() {
        let expr = Expr::is(Expr::column(None, "a"), true, "NULL");
        let json = serde_json::to_string(&expr).unwrap();
        assert!(json.starts_with("{\"is\":"));
        let back: Expr = serde_json::from_str(&json).unwrap();
        assert_eq!(back, expr);
    }

    #[test]
    fn test_join_splits_keyword_phrase() {
        let join = TableReference::join(
            TableReference::table("a", None),
            "LEFT OUTER JOIN",
            TableReference::table("b", None),
            None,
        );
        match join {
            TableReference::Join { join_type, .. } => {
                assert_eq!(join_type, vec!["LEFT", "OUTER", "JOIN"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
