//! MySQL expressions.
//!
//! Operators and keywords are resolved through the tables at the top of this
//! file. Column paths stay flat: `a.b` is a [`ColumnReference`] with
//! `relation = a`, and `f(x) OVER (...)` keeps its window on the call.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::data_type::MySQLDataTypeFactory;
use super::select::MySQLSelectFactory;
use super::tree;
use crate::dialects::{lookup, phrase, DialectType, Factory};
use crate::error::{Error, Result};
use crate::expressions::{
    BraceBlock, CaseWhen, ColumnReference, ConstExpression, Expression, FullTextSearch,
    FunctionCall, FunctionOption, FunctionParam, IntervalExpression, JsonConstraint, JsonOnOption,
    OnMismatch, Operator, ScalarsMode, TextSearchMode, WhenClause, WindowBody, WindowOffset,
    WindowOffsetType, WindowSpec, WindowType, WrapperMode,
};
use crate::statements::data_type::DataType;
use crate::statements::select::{OrderBy, SortDirection, SortKey};

const DIALECT: DialectType = DialectType::MySQL;

/// Infix operators of `expr`, `bool_pri` and `bit_expr`
pub(crate) static BINARY_OPERATORS: Lazy<HashMap<&'static str, Operator>> = Lazy::new(|| {
    let mut m = HashMap::new();
    // Logical
    m.insert("AND", Operator::And);
    m.insert("&&", Operator::And);
    m.insert("OR", Operator::Or);
    m.insert("XOR", Operator::Xor);
    // || concatenates
    m.insert("||", Operator::Cnnop);
    // Comparison
    m.insert("=", Operator::Eq);
    m.insert("!=", Operator::Ne);
    m.insert("<>", Operator::Ne);
    m.insert(">", Operator::Gt);
    m.insert(">=", Operator::Ge);
    m.insert("<", Operator::Lt);
    m.insert("<=", Operator::Le);
    m.insert("<=>", Operator::Nseq);
    // Arithmetic
    m.insert("+", Operator::Add);
    m.insert("-", Operator::Sub);
    m.insert("*", Operator::Mul);
    m.insert("/", Operator::Div);
    m.insert("DIV", Operator::IntDiv);
    m.insert("MOD", Operator::Mod);
    m.insert("%", Operator::Mod);
    // Bitwise
    m.insert("&", Operator::BitAnd);
    m.insert("|", Operator::BitOr);
    m.insert("^", Operator::BitXor);
    m.insert("<<", Operator::ShiftLeft);
    m.insert(">>", Operator::ShiftRight);
    m
});

pub(crate) static UNARY_OPERATORS: Lazy<HashMap<&'static str, Operator>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("||", Operator::Cnnop);
    m.insert("BINARY", Operator::Binary);
    m.insert("+", Operator::Add);
    m.insert("-", Operator::Sub);
    m.insert("~", Operator::Tilde);
    m.insert("!", Operator::Not);
    m.insert("NOT", Operator::Not);
    m
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IsTarget {
    True,
    False,
    Unknown,
    Null,
}

static IS_TARGETS: Lazy<HashMap<&'static str, IsTarget>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("TRUE", IsTarget::True);
    m.insert("FALSE", IsTarget::False);
    m.insert("UNKNOWN", IsTarget::Unknown);
    m.insert("NULL", IsTarget::Null);
    m
});

static JSON_ARROWS: Lazy<HashMap<&'static str, Operator>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("->", Operator::JsonExtract);
    m.insert("->>", Operator::JsonExtractUnquoted);
    m
});

static TEXT_SEARCH_MODES: Lazy<HashMap<&'static str, TextSearchMode>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("IN NATURAL LANGUAGE MODE", TextSearchMode::NaturalLanguageMode);
    m.insert("IN BOOLEAN MODE", TextSearchMode::BooleanMode);
    m.insert("WITH QUERY EXPANSION", TextSearchMode::QueryExpansion);
    m.insert(
        "IN NATURAL LANGUAGE MODE WITH QUERY EXPANSION",
        TextSearchMode::QueryExpansion,
    );
    m
});

pub(crate) static SORT_DIRECTIONS: Lazy<HashMap<&'static str, SortDirection>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("ASC", SortDirection::Asc);
    m.insert("DESC", SortDirection::Desc);
    m
});

static FRAME_UNITS: Lazy<HashMap<&'static str, WindowType>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("ROWS", WindowType::Rows);
    m.insert("RANGE", WindowType::Range);
    m
});

static FRAME_DIRECTIONS: Lazy<HashMap<&'static str, WindowOffsetType>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("PRECEDING", WindowOffsetType::Preceding);
    m.insert("FOLLOWING", WindowOffsetType::Following);
    m
});

static SIGNS: Lazy<HashMap<&'static str, Operator>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("+", Operator::Add);
    m.insert("-", Operator::Sub);
    m
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WeightCast {
    Char,
    Binary,
}

static WEIGHT_CASTS: Lazy<HashMap<&'static str, WeightCast>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("CHAR", WeightCast::Char);
    m.insert("CHARACTER", WeightCast::Char);
    m.insert("BINARY", WeightCast::Binary);
    m
});

pub struct MySQLExpressionFactory;

impl Factory for MySQLExpressionFactory {
    type Node = tree::Expr;
    type Output = Expression;

    fn dialect_type(&self) -> DialectType {
        DIALECT
    }

    fn generate(&self, node: &tree::Expr) -> Result<Expression> {
        log::trace!("lowering mysql expression");
        lower_expr(node)
    }
}

pub(crate) fn lower_expr(node: &tree::Expr) -> Result<Expression> {
    match node {
        tree::Expr::Column(column) => Ok(Expression::Column(lower_column_ref(column))),
        // rel.col@var
        tree::Expr::VariableColumn {
            column,
            user_variable,
        } => Ok(Expression::Column(
            lower_column_ref(column).with_user_variable(user_variable.clone()),
        )),
        tree::Expr::Literal(text) => Ok(Expression::constant(text.clone())),
        tree::Expr::Strings(values) => Ok(string_literal(values)),
        tree::Expr::Bool(value) => Ok(Expression::boolean(*value)),
        tree::Expr::Null => Ok(Expression::Null),
        tree::Expr::Default => Ok(Expression::Default),
        tree::Expr::Variable(name) => Ok(Expression::constant(name.clone())),

        tree::Expr::Unary { op, operand } => {
            let operator = lookup(&UNARY_OPERATORS, DIALECT, "unary operator", op)?;
            Ok(Expression::unary(lower_expr(operand)?, operator))
        }
        tree::Expr::Binary { left, op, right } => {
            let operator = lookup(&BINARY_OPERATORS, DIALECT, "binary operator", op)?;
            Ok(Expression::binary(
                lower_expr(left)?,
                lower_expr(right)?,
                operator,
            ))
        }
        // IS [NOT] TRUE|FALSE|UNKNOWN|NULL -> = / !=
        tree::Expr::Is {
            operand,
            not,
            target,
        } => {
            let right = match lookup(&IS_TARGETS, DIALECT, "IS target", target)? {
                IsTarget::True => Expression::boolean(true),
                IsTarget::False => Expression::boolean(false),
                IsTarget::Unknown => Expression::constant(target.trim()),
                IsTarget::Null => Expression::Null,
            };
            let operator = if *not { Operator::Ne } else { Operator::Eq };
            Ok(Expression::binary(lower_expr(operand)?, right, operator))
        }
        tree::Expr::In { operand, not, list } => {
            let right = match list {
                tree::InList::Exprs(items) => Expression::collection(lower_all(items)?),
                tree::InList::Subquery(query) => subquery(query)?,
            };
            Ok(Expression::binary(
                lower_expr(operand)?,
                right,
                predicate(Operator::In, *not)?,
            ))
        }
        // a BETWEEN b AND c -> Compound(a, Compound(b, c, AND), BETWEEN)
        tree::Expr::Between {
            operand,
            not,
            low,
            high,
        } => {
            let range = Expression::binary(lower_expr(low)?, lower_expr(high)?, Operator::And);
            Ok(Expression::binary(
                lower_expr(operand)?,
                range,
                predicate(Operator::Between, *not)?,
            ))
        }
        tree::Expr::Like {
            operand,
            not,
            pattern,
            escape,
        } => {
            let mut right = lower_expr(pattern)?;
            if let Some(escape) = escape {
                right = Expression::binary(right, lower_expr(escape)?, Operator::Escape);
            }
            Ok(Expression::binary(
                lower_expr(operand)?,
                right,
                predicate(Operator::Like, *not)?,
            ))
        }
        tree::Expr::Regexp {
            operand,
            not,
            pattern,
        } => Ok(Expression::binary(
            lower_expr(operand)?,
            lower_expr(pattern)?,
            predicate(Operator::Regexp, *not)?,
        )),
        tree::Expr::MemberOf {
            operand,
            not,
            target,
        } => Ok(Expression::binary(
            lower_expr(operand)?,
            lower_expr(target)?,
            predicate(Operator::MemberOf, *not)?,
        )),
        // @v := expr
        tree::Expr::Assign { variable, value } => Ok(Expression::binary(
            Expression::constant(variable.clone()),
            lower_expr(value)?,
            Operator::SetVar,
        )),
        tree::Expr::JsonPath {
            column,
            arrow,
            path,
        } => {
            let operator = lookup(&JSON_ARROWS, DIALECT, "JSON arrow", arrow)?;
            Ok(Expression::binary(
                Expression::Column(lower_column_ref(column)),
                string_literal(path),
                operator,
            ))
        }

        tree::Expr::Exists(query) => Ok(Expression::unary(subquery(query)?, Operator::Exists)),
        tree::Expr::Subquery(query) => subquery(query),
        tree::Expr::List(items) => Ok(Expression::collection(lower_all(items)?)),
        // ROW(a, b) keeps the keyword as the call name
        tree::Expr::Row { keyword, items } => {
            Ok(Expression::function(keyword.clone(), lower_params(items)?))
        }
        tree::Expr::Array(items) => Ok(Expression::array(lower_all(items)?)),
        // = ANY([a, b]) -> Collection([Array])
        tree::Expr::AnyArray(items) => Ok(Expression::collection(vec![Expression::array(
            lower_all(items)?,
        )])),
        tree::Expr::Interval { value, unit } => Ok(interval(lower_expr(value)?, unit)),
        tree::Expr::Case(case) => lower_case(case),
        tree::Expr::Function(function) => Ok(Expression::from(lower_function(function)?)),
        tree::Expr::Match {
            columns,
            against,
            mode,
        } => {
            let search_mode = if mode.is_empty() {
                None
            } else {
                Some(lookup(
                    &TEXT_SEARCH_MODES,
                    DIALECT,
                    "text search mode",
                    &phrase(mode),
                )?)
            };
            let params = columns
                .iter()
                .map(|c| FunctionParam::new(Expression::Column(lower_column_ref(c))))
                .collect();
            Ok(Expression::FullTextSearch(Box::new(FullTextSearch {
                params,
                against: against.clone(),
                search_mode,
            })))
        }
        tree::Expr::Brace { name, expr } => Ok(Expression::BraceBlock(Box::new(BraceBlock {
            name: name.clone(),
            expression: lower_expr(expr)?,
        }))),
    }
}

pub(crate) fn lower_column_ref(column: &tree::ColumnRef) -> ColumnReference {
    ColumnReference::new(
        column.schema.as_deref(),
        column.relation.as_deref(),
        &column.column,
    )
}

pub(crate) fn lower_all(items: &[tree::Expr]) -> Result<Vec<Expression>> {
    items.iter().map(lower_expr).collect()
}

fn lower_params(items: &[tree::Expr]) -> Result<Vec<FunctionParam>> {
    items
        .iter()
        .map(|e| lower_expr(e).map(FunctionParam::new))
        .collect()
}

/// One string is a constant, adjacent strings are a collection of constants.
pub(crate) fn string_literal(values: &[String]) -> Expression {
    match values {
        [single] => Expression::constant(single.clone()),
        _ => Expression::collection(values.iter().map(|v| Expression::constant(v.clone())).collect()),
    }
}

fn interval(target: Expression, unit: &str) -> Expression {
    Expression::Interval(Box::new(IntervalExpression {
        target,
        date_type: unit.to_string(),
    }))
}

fn subquery(query: &tree::SelectStmt) -> Result<Expression> {
    Ok(Expression::subquery(MySQLSelectFactory.generate(query)?))
}

fn predicate(operator: Operator, not: bool) -> Result<Operator> {
    if !not {
        return Ok(operator);
    }
    operator
        .negated()
        .ok_or_else(|| Error::internal(format!("{} has no negated form", operator)))
}

fn lower_case(case: &tree::Case) -> Result<Expression> {
    let when_clauses = case
        .whens
        .iter()
        .map(|w| {
            Ok(WhenClause {
                when: lower_expr(&w.when)?,
                then: lower_expr(&w.then)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Expression::Case(Box::new(CaseWhen {
        case_value: case.value.as_ref().map(lower_expr).transpose()?,
        when_clauses,
        case_default: case.default.as_ref().map(lower_expr).transpose()?,
    })))
}

/// `+12` / `-12` / `'abc'`. The sign becomes a unary operator on the literal.
pub(crate) fn lower_signed_literal(literal: &tree::SignedLiteral) -> Result<Expression> {
    let value = lower_expr(&literal.value)?;
    match &literal.sign {
        Some(sign) => Ok(Expression::unary(
            value,
            lookup(&SIGNS, DIALECT, "sign", sign)?,
        )),
        None => Ok(value),
    }
}

/// `col + INTERVAL n unit` of a TTL definition
pub(crate) fn lower_ttl(ttl: &tree::TtlExpr) -> Expression {
    Expression::binary(
        Expression::Column(lower_column_ref(&ttl.column)),
        interval(Expression::constant(ttl.value.clone()), &ttl.unit),
        Operator::Add,
    )
}

static SCALARS_MODES: Lazy<HashMap<&'static str, ScalarsMode>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("ALLOW SCALARS", ScalarsMode::AllowScalars);
    m.insert("DISALLOW SCALARS", ScalarsMode::DisallowScalars);
    m
});

static WRAPPER_MODES: Lazy<HashMap<&'static str, WrapperMode>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("WITHOUT WRAPPER", WrapperMode::WithoutWrapper);
    m.insert("WITHOUT ARRAY WRAPPER", WrapperMode::WithoutArrayWrapper);
    m.insert("WITH WRAPPER", WrapperMode::WithWrapper);
    m.insert("WITH ARRAY WRAPPER", WrapperMode::WithArrayWrapper);
    m.insert("WITH CONDITIONAL WRAPPER", WrapperMode::WithConditionalWrapper);
    m.insert("WITH CONDITIONAL ARRAY WRAPPER", WrapperMode::WithConditionalArrayWrapper);
    m.insert("WITH UNCONDITIONAL WRAPPER", WrapperMode::WithUnconditionalWrapper);
    m.insert("WITH UNCONDITIONAL ARRAY WRAPPER", WrapperMode::WithUnconditionalArrayWrapper);
    m
});

// ---------------------------------------------------------------------------
// Functions
// ---------------------------------------------------------------------------

fn lower_function(function: &tree::Function) -> Result<FunctionCall> {
    match function {
        tree::Function::Call(call) => {
            let name = match &call.relation {
                Some(relation) => format!("{}.{}", relation, call.name),
                None => call.name.clone(),
            };
            let mut f = FunctionCall::new(name, lower_call_args(&call.args)?);
            f.params_flag = call.aggregator.clone();
            Ok(f)
        }
        tree::Function::Window(window) => lower_window_call(window),
        tree::Function::GroupConcat(group_concat) => {
            let mut f = FunctionCall::new(group_concat.name.clone(), lower_params(&group_concat.args)?);
            f.params_flag = group_concat.aggregator.clone();
            f.add_option(lower_order_by(&group_concat.order_by)?);
            f.add_option(separator(&group_concat.separator));
            Ok(f)
        }
        tree::Function::Cast { name, expr, target } => {
            let param = FunctionParam::new(lower_expr(expr)?).with_option(lower_data_type(target)?);
            Ok(FunctionCall::new(name.clone(), vec![param]))
        }
        tree::Function::Convert {
            name,
            expr,
            target,
            charset,
        } => {
            let mut param = FunctionParam::new(lower_expr(expr)?);
            if let Some(target) = target {
                param = param.with_option(lower_data_type(target)?);
            }
            if let Some(charset) = charset {
                param = param.with_option(ConstExpression::new(charset.clone()));
            }
            Ok(FunctionCall::new(name.clone(), vec![param]))
        }
        // POSITION(a IN b) -> one param Compound(a, b, IN)
        tree::Function::Position {
            name,
            needle,
            haystack,
        } => {
            let param = Expression::binary(lower_expr(needle)?, lower_expr(haystack)?, Operator::In);
            Ok(FunctionCall::new(name.clone(), vec![FunctionParam::new(param)]))
        }
        tree::Function::Substring { name, args } => {
            Ok(FunctionCall::new(name.clone(), lower_params(args)?))
        }
        tree::Function::Trim {
            name,
            keywords,
            expr,
            from,
        } => {
            let mut param = FunctionParam::new(lower_expr(expr)?);
            if let Some(from) = from {
                param = param.with_option(lower_expr(from)?);
            }
            let mut f = FunctionCall::new(name.clone(), vec![param]);
            for keyword in keywords {
                f.add_option(Some(ConstExpression::new(keyword.clone())));
            }
            Ok(f)
        }
        tree::Function::GetFormat { name, unit, expr } => Ok(FunctionCall::new(
            name.clone(),
            vec![
                FunctionParam::new(Expression::constant(unit.clone())),
                FunctionParam::new(lower_expr(expr)?),
            ],
        )),
        // DATE_ADD(d, INTERVAL e unit)
        tree::Function::DateArith {
            name,
            date,
            interval: value,
            unit,
        } => Ok(FunctionCall::new(
            name.clone(),
            vec![
                FunctionParam::new(lower_expr(date)?),
                FunctionParam::new(interval(lower_expr(value)?, unit)),
            ],
        )),
        tree::Function::TimestampArith { name, unit, args } => {
            let mut params = vec![FunctionParam::new(Expression::constant(unit.clone()))];
            params.extend(lower_params(args)?);
            Ok(FunctionCall::new(name.clone(), params))
        }
        // EXTRACT(unit FROM e) -> Const(unit) with e as its option
        tree::Function::Extract { name, unit, expr } => {
            let param = FunctionParam::new(Expression::constant(unit.clone())).with_option(lower_expr(expr)?);
            Ok(FunctionCall::new(name.clone(), vec![param]))
        }
        tree::Function::Char {
            name,
            args,
            charset,
        } => Ok(FunctionCall::new(name.clone(), lower_params(args)?)
            .with_option(ConstExpression::from_tokens(["USING", charset.as_str()]))),
        tree::Function::WeightString {
            name,
            expr,
            weights,
            numbers,
        } => {
            let mut params = vec![FunctionParam::new(lower_expr(expr)?)];
            params.extend(
                numbers
                    .iter()
                    .map(|n| FunctionParam::new(Expression::constant(n.clone()))),
            );
            if let Some(weights) = weights {
                let cast = match lookup(&WEIGHT_CASTS, DIALECT, "WEIGHT_STRING cast", &weights.keyword)? {
                    WeightCast::Char => {
                        DataType::character(weights.keyword.clone(), Some(weights.length.as_str()))
                    }
                    WeightCast::Binary => {
                        DataType::general(weights.keyword.clone(), vec![weights.length.clone()])
                    }
                };
                if let Some(last) = params.last_mut() {
                    last.options.push(FunctionOption::from(cast));
                }
            }
            Ok(FunctionCall::new(name.clone(), params))
        }
        tree::Function::JsonValue(json_value) => {
            let mut f = FunctionCall::new(
                json_value.name.clone(),
                vec![
                    FunctionParam::new(lower_expr(&json_value.doc)?),
                    FunctionParam::new(string_literal(&json_value.path)),
                ],
            );
            f.add_option(json_value.returning.as_ref().map(lower_data_type).transpose()?);
            flag(&mut f, json_value.truncate, "TRUNCATE");
            flag(&mut f, json_value.ascii, "ASCII");
            f.add_option(json_on_option(
                &json_value.on_empty,
                &json_value.on_error,
                &json_value.on_mismatch,
            )?);
            Ok(f)
        }
        tree::Function::JsonQuery(json_query) => lower_json_query(json_query),
        tree::Function::CurrentTime { name, precision } => {
            let params = precision
                .iter()
                .map(|p| FunctionParam::new(Expression::constant(p.clone())))
                .collect();
            Ok(FunctionCall::new(name.clone(), params))
        }
    }
}

fn lower_call_args(args: &tree::CallArgs) -> Result<Vec<FunctionParam>> {
    match args {
        tree::CallArgs::Star => Ok(vec![FunctionParam::new(Expression::constant("*"))]),
        // json_object(a AS k): the alias rides on the parameter
        tree::CallArgs::Exprs(args) => args
            .iter()
            .map(|arg| {
                let mut param = FunctionParam::new(lower_expr(&arg.value)?);
                if let Some(alias) = &arg.alias {
                    param = param.with_option(ConstExpression::new(alias.clone()));
                }
                Ok(param)
            })
            .collect(),
        tree::CallArgs::ColumnParams { column, params } => {
            let mut lowered = vec![FunctionParam::new(Expression::Column(lower_column_ref(column)))];
            lowered.extend(params.iter().map(|p| FunctionParam::new(lower_mvt_param(p))));
            Ok(lowered)
        }
    }
}

fn lower_mvt_param(param: &tree::MvtParam) -> Expression {
    match param {
        tree::MvtParam::Null => Expression::Null,
        tree::MvtParam::Number { negative, value } => {
            let value = Expression::constant(value.clone());
            if *negative {
                Expression::unary(value, Operator::Sub)
            } else {
                value
            }
        }
        tree::MvtParam::Text(text) => Expression::constant(text.clone()),
    }
}

fn separator(separator: &Option<String>) -> Option<ConstExpression> {
    separator
        .as_deref()
        .map(|s| ConstExpression::from_tokens(["SEPARATOR", s]))
}

fn lower_data_type(data_type: &tree::DataType) -> Result<DataType> {
    MySQLDataTypeFactory.generate(data_type)
}

fn flag(f: &mut FunctionCall, set: bool, keyword: &str) {
    if set {
        f.add_option(Some(ConstExpression::new(keyword)));
    }
}

/// Flags first, then the scalars and wrapper modes, the ON clauses and a
/// trailing `MULTIVALUE`.
fn lower_json_query(json: &tree::JsonQuery) -> Result<FunctionCall> {
    let mut f = FunctionCall::new(
        json.name.clone(),
        vec![
            FunctionParam::new(lower_expr(&json.doc)?),
            FunctionParam::new(string_literal(&json.path)),
        ],
    );
    f.add_option(json.returning.as_ref().map(lower_data_type).transpose()?);
    flag(&mut f, json.truncate, "TRUNCATE");
    flag(&mut f, json.pretty, "PRETTY");
    flag(&mut f, json.ascii, "ASCII");
    flag(&mut f, json.asis, "ASIS");
    f.add_option(json_modes(&json.scalars, &json.wrapper)?);
    f.add_option(json_on_option(&json.on_empty, &json.on_error, &json.on_mismatch)?);
    flag(&mut f, json.multivalue, "MULTIVALUE");
    Ok(f)
}

/// `None` when neither mode was written
fn json_modes(scalars: &[String], wrapper: &[String]) -> Result<Option<JsonConstraint>> {
    if scalars.is_empty() && wrapper.is_empty() {
        return Ok(None);
    }
    let scalars_mode = if scalars.is_empty() {
        None
    } else {
        Some(lookup(&SCALARS_MODES, DIALECT, "JSON scalars mode", &phrase(scalars))?)
    };
    let wrapper_mode = if wrapper.is_empty() {
        None
    } else {
        Some(lookup(&WRAPPER_MODES, DIALECT, "JSON wrapper", &phrase(wrapper))?)
    };
    Ok(Some(JsonConstraint {
        scalars_mode,
        wrapper_mode,
        ..Default::default()
    }))
}

fn json_on_option(
    on_empty: &Option<tree::JsonResponse>,
    on_error: &Option<tree::JsonResponse>,
    on_mismatch: &Option<tree::JsonResponse>,
) -> Result<Option<JsonOnOption>> {
    if on_empty.is_none() && on_error.is_none() && on_mismatch.is_none() {
        return Ok(None);
    }
    let on_mismatches = match on_mismatch {
        Some(response) => vec![OnMismatch {
            response: lower_json_response(response)?,
            mismatch_types: Vec::new(),
        }],
        None => Vec::new(),
    };
    Ok(Some(JsonOnOption {
        on_empty: on_empty.as_ref().map(lower_json_response).transpose()?,
        on_error: on_error.as_ref().map(lower_json_response).transpose()?,
        on_null: None,
        on_mismatches,
    }))
}

fn lower_json_response(response: &tree::JsonResponse) -> Result<Expression> {
    match response {
        tree::JsonResponse::Error(text) => Ok(Expression::constant(text.clone())),
        tree::JsonResponse::Null => Ok(Expression::Null),
        tree::JsonResponse::Default(literal) => lower_signed_literal(literal),
        tree::JsonResponse::Keyword(tokens) => Ok(Expression::constant(phrase(tokens))),
    }
}

/// `JSON_TABLE(expr, path COLUMNS (...))`. Columns become parameter options of
/// the call, in source order.
pub(crate) fn lower_json_table(table: &tree::JsonTable) -> Result<Expression> {
    let mut f = FunctionCall::new(
        table.name.clone(),
        vec![
            FunctionParam::new(lower_expr(&table.expr)?),
            FunctionParam::new(lower_expr(&table.path)?),
        ],
    );
    for column in &table.columns {
        f.options.push(FunctionOption::from(lower_json_table_column(column)?));
    }
    Ok(Expression::from(f))
}

fn lower_json_table_column(column: &tree::JsonTableColumn) -> Result<FunctionParam> {
    match column {
        tree::JsonTableColumn::Ordinality(name) => {
            Ok(FunctionParam::new(Expression::column(None, None, name))
                .with_option(ConstExpression::new("FOR ORDINALITY")))
        }
        tree::JsonTableColumn::Exists {
            name,
            data_type,
            collation,
            path,
            on_empty,
            on_error,
        } => {
            let mut param = FunctionParam::new(Expression::column(None, None, name))
                .with_option(lower_data_type(data_type)?);
            if let Some(collation) = collation {
                param = param.with_option(ConstExpression::new(collation.clone()));
            }
            param = param
                .with_option(ConstExpression::new("EXISTS"))
                .with_option(lower_expr(path)?);
            if let Some(on) = json_on_option(on_empty, on_error, &None)? {
                param = param.with_option(on);
            }
            Ok(param)
        }
        tree::JsonTableColumn::Value {
            name,
            data_type,
            collation,
            path,
            on_empty,
            on_error,
        } => {
            let mut param = FunctionParam::new(Expression::column(None, None, name))
                .with_option(lower_data_type(data_type)?);
            if let Some(collation) = collation {
                param = param.with_option(ConstExpression::new(collation.clone()));
            }
            param = param.with_option(lower_expr(path)?);
            if let Some(on) = json_on_option(on_empty, on_error, &None)? {
                param = param.with_option(on);
            }
            Ok(param)
        }
        // NESTED [PATH] 'p' COLUMNS (...)
        tree::JsonTableColumn::Nested {
            keywords,
            path,
            columns,
        } => {
            let mut param = FunctionParam::new(Expression::Const(ConstExpression::new(phrase(keywords))))
                .with_option(lower_expr(path)?);
            for column in columns {
                param = param.with_option(lower_json_table_column(column)?);
            }
            Ok(param)
        }
    }
}

// ---------------------------------------------------------------------------
// Windows and ordering
// ---------------------------------------------------------------------------

fn lower_window_call(window: &tree::WindowCall) -> Result<FunctionCall> {
    let mut f = FunctionCall::new(window.name.clone(), lower_call_args(&window.args)?);
    f.params_flag = window.aggregator.clone();
    // NTH_VALUE(...) FROM FIRST RESPECT NULLS
    if !window.from_first_last.is_empty() {
        f.add_option(Some(ConstExpression::new(phrase(&window.from_first_last))));
    }
    if !window.nulls.is_empty() {
        f.add_option(Some(ConstExpression::new(phrase(&window.nulls))));
    }
    f.add_option(lower_order_by(&window.order_by)?);
    f.add_option(separator(&window.separator));
    f.window = Some(lower_window_def(&window.over)?);
    Ok(f)
}

fn lower_window_def(over: &tree::WindowDef) -> Result<WindowSpec> {
    match over {
        tree::WindowDef::Named(name) => Ok(WindowSpec {
            name: Some(name.clone()),
            ..Default::default()
        }),
        tree::WindowDef::Spec(spec) => lower_window_spec(spec),
    }
}

pub(crate) fn lower_window_spec(spec: &tree::WindowSpecNode) -> Result<WindowSpec> {
    let body = match &spec.frame {
        Some(frame) => Some(WindowBody {
            kind: lookup(&FRAME_UNITS, DIALECT, "window frame unit", &frame.unit)?,
            begin: lower_frame_bound(&frame.begin)?,
            end: frame.end.as_ref().map(lower_frame_bound).transpose()?,
        }),
        None => None,
    };
    Ok(WindowSpec {
        name: spec.name.clone(),
        partition_by: lower_all(&spec.partition_by)?,
        order_by: lower_order_by(&spec.order_by)?,
        body,
    })
}

fn lower_frame_bound(bound: &tree::FrameBound) -> Result<WindowOffset> {
    match bound {
        tree::FrameBound::CurrentRow => Ok(WindowOffset::current_row()),
        tree::FrameBound::Offset { offset, direction } => {
            let kind = lookup(&FRAME_DIRECTIONS, DIALECT, "window frame direction", direction)?;
            let value = match offset {
                tree::FrameOffset::Unbounded(text) => Expression::constant(text.clone()),
                tree::FrameOffset::Expr(expr) => lower_expr(expr)?,
                tree::FrameOffset::Interval { value, unit } => interval(lower_expr(value)?, unit),
            };
            Ok(WindowOffset::new(kind, value))
        }
    }
}

pub(crate) fn lower_sort_key(item: &tree::SortItem) -> Result<SortKey> {
    let direction = item
        .direction
        .as_deref()
        .map(|d| lookup(&SORT_DIRECTIONS, DIALECT, "sort direction", d))
        .transpose()?;
    Ok(SortKey::new(lower_expr(&item.expr)?, direction))
}

/// `None` when no sort item was written.
pub(crate) fn lower_order_by(items: &[tree::SortItem]) -> Result<Option<OrderBy>> {
    if items.is_empty() {
        return Ok(None);
    }
    let keys = items.iter().map(lower_sort_key).collect::<Result<Vec<_>>>()?;
    Ok(Some(OrderBy::new(keys)))
}
