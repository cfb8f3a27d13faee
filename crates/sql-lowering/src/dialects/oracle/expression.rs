//! Oracle expressions.
//!
//! Dotted names become [`RelationReference`] chains: `a.b.c()` is
//! `a -> b -> c()`, and `t(1)` reaches its index through
//! [`ReferenceOperator::Paren`]. A path that starts with a call or an index
//! instead becomes an [`Expression::Access`] over that head. Comparison
//! operators arrive as token lists so `! =` and `< >` resolve like `!=`.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::data_type::lower_data_type;
use super::select::OracleSelectFactory;
use super::tree;
use crate::dialects::{lookup, phrase, DialectType, Factory};
use crate::error::{Error, Result};
use crate::expressions::{
    Access, CaseWhen, ColumnReference, ConstExpression, Expression, FunctionCall, FunctionParam, JsonConstraint,
    JsonKeyValue, JsonOnOption, KeepClause, OnMismatch, Operator, ParamWithAssign,
    ReferenceOperator, RelationReference, ScalarsMode, StrictMode, UniqueMode, WhenClause,
    WindowBody, WindowFunction, WindowOffset, WindowOffsetType, WindowSpec, WindowType,
    WrapperMode,
};
use crate::statements::select::{OrderBy, SortDirection, SortKey, SortNullPosition};

const DIALECT: DialectType = DialectType::Oracle;

/// Infix operators. Symbolic spellings are keyed without inner spaces.
pub(crate) static BINARY_OPERATORS: Lazy<HashMap<&'static str, Operator>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("AND", Operator::And);
    m.insert("OR", Operator::Or);
    m.insert("||", Operator::Cnnop);
    // Comparison
    m.insert("=", Operator::Eq);
    m.insert("!=", Operator::Ne);
    m.insert("^=", Operator::Ne);
    m.insert("<>", Operator::Ne);
    m.insert("~=", Operator::NePl);
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
    m.insert("**", Operator::Pow);
    m.insert("MOD", Operator::Mod);
    // Nested tables
    m.insert("MULTISET UNION", Operator::MultisetUnion);
    m.insert("MULTISET UNION ALL", Operator::MultisetUnionAll);
    m.insert("MULTISET UNION DISTINCT", Operator::MultisetUnionDistinct);
    m.insert("MULTISET INTERSECT", Operator::MultisetIntersect);
    m.insert("MULTISET INTERSECT ALL", Operator::MultisetIntersectAll);
    m.insert("MULTISET INTERSECT DISTINCT", Operator::MultisetIntersectDistinct);
    m.insert("MULTISET EXCEPT", Operator::MultisetExcept);
    m.insert("MULTISET EXCEPT ALL", Operator::MultisetExceptAll);
    m.insert("MULTISET EXCEPT DISTINCT", Operator::MultisetExceptDistinct);
    m
});

pub(crate) static UNARY_OPERATORS: Lazy<HashMap<&'static str, Operator>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("+", Operator::Add);
    m.insert("-", Operator::Sub);
    m.insert("NOT", Operator::Not);
    m.insert("PRIOR", Operator::Prior);
    m.insert("CONNECT_BY_ROOT", Operator::ConnectByRoot);
    m
});

/// `IS [NOT] x` targets; every one compares against NULL
static IS_TARGETS: Lazy<HashMap<&'static str, ()>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("NULL", ());
    m.insert("NAN", ());
    m.insert("INFINITE", ());
    m.insert("NAN_VALUE", ());
    m.insert("INFINITE_VALUE", ());
    m
});

static COLLECTION_TESTS: Lazy<HashMap<&'static str, Operator>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("A SET", Operator::IsASet);
    m.insert("EMPTY", Operator::IsEmpty);
    m
});

pub(crate) static SORT_DIRECTIONS: Lazy<HashMap<&'static str, SortDirection>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("ASC", SortDirection::Asc);
    m.insert("DESC", SortDirection::Desc);
    m
});

static NULL_POSITIONS: Lazy<HashMap<&'static str, SortNullPosition>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("NULLS FIRST", SortNullPosition::First);
    m.insert("NULLS LAST", SortNullPosition::Last);
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

static STRICT_MODES: Lazy<HashMap<&'static str, StrictMode>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("STRICT", StrictMode::Strict);
    m.insert("LAX", StrictMode::Lax);
    m
});

static SCALARS_MODES: Lazy<HashMap<&'static str, ScalarsMode>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("ALLOW SCALARS", ScalarsMode::AllowScalars);
    m.insert("DISALLOW SCALARS", ScalarsMode::DisallowScalars);
    m
});

static UNIQUE_MODES: Lazy<HashMap<&'static str, UniqueMode>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("WITH UNIQUE KEYS", UniqueMode::WithUniqueKeys);
    // JSON_OBJECT accepts the short form
    m.insert("WITH UNIQUE KEY", UniqueMode::WithUniqueKeys);
    m.insert("WITHOUT UNIQUE KEYS", UniqueMode::WithoutUniqueKeys);
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

/// JSON_EXISTS answers `TRUE ON ERROR` with a boolean
static JSON_BOOLEANS: Lazy<HashMap<&'static str, bool>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("TRUE", true);
    m.insert("FALSE", false);
    m
});

pub struct OracleExpressionFactory;

impl Factory for OracleExpressionFactory {
    type Node = tree::Expr;
    type Output = Expression;

    fn dialect_type(&self) -> DialectType {
        DIALECT
    }

    fn generate(&self, node: &tree::Expr) -> Result<Expression> {
        log::trace!("lowering oracle expression");
        lower_expr(node)
    }
}

pub(crate) fn lower_expr(node: &tree::Expr) -> Result<Expression> {
    match node {
        tree::Expr::Path(path) => lower_path(path),
        tree::Expr::Literal(text) => Ok(Expression::constant(text.clone())),
        tree::Expr::Null => Ok(Expression::Null),
        tree::Expr::Default => Ok(Expression::Default),
        tree::Expr::Variable(name) => Ok(Expression::constant(name.clone())),

        tree::Expr::Unary { op, operand } => {
            let operator = lookup(&UNARY_OPERATORS, DIALECT, "unary operator", op)?;
            Ok(Expression::unary(lower_expr(operand)?, operator))
        }
        tree::Expr::Binary { left, op, right } => {
            let operator = lookup(&BINARY_OPERATORS, DIALECT, "binary operator", &operator_text(op))?;
            Ok(Expression::binary(
                lower_expr(left)?,
                lower_expr(right)?,
                operator,
            ))
        }
        // IS [NOT] NULL|NAN|INFINITE -> = / != NULL
        tree::Expr::Is {
            operand,
            not,
            target,
        } => {
            lookup(&IS_TARGETS, DIALECT, "IS target", target)?;
            let operator = if *not { Operator::Ne } else { Operator::Eq };
            Ok(Expression::binary(lower_expr(operand)?, Expression::Null, operator))
        }
        tree::Expr::IsJson { operand, not, modes } => {
            let constraint = lower_json_modes(modes)?.unwrap_or_default();
            Ok(Expression::binary(
                lower_expr(operand)?,
                Expression::JsonConstraint(constraint),
                predicate(Operator::Is, *not)?,
            ))
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
        tree::Expr::MemberOf {
            operand,
            not,
            target,
        } => Ok(Expression::binary(
            lower_expr(operand)?,
            lower_expr(target)?,
            predicate(Operator::MemberOf, *not)?,
        )),
        tree::Expr::SubmultisetOf {
            operand,
            not,
            target,
        } => Ok(Expression::binary(
            lower_expr(operand)?,
            lower_expr(target)?,
            predicate(Operator::SubMultisetOf, *not)?,
        )),
        // nt IS [NOT] A SET / IS [NOT] EMPTY
        tree::Expr::CollectionTest { operand, not, test } => {
            let operator = lookup(&COLLECTION_TESTS, DIALECT, "collection test", &phrase(test))?;
            Ok(Expression::unary(lower_expr(operand)?, predicate(operator, *not)?))
        }
        tree::Expr::AtTimeZone { operand, zone } => match zone {
            Some(zone) => Ok(Expression::binary(
                lower_expr(operand)?,
                lower_expr(zone)?,
                Operator::AtTimeZone,
            )),
            None => Ok(Expression::unary(lower_expr(operand)?, Operator::AtLocal)),
        },
        tree::Expr::Assign { variable, value } => Ok(Expression::binary(
            Expression::constant(variable.clone()),
            lower_expr(value)?,
            Operator::SetVar,
        )),

        tree::Expr::Exists(query) => Ok(Expression::unary(subquery(query)?, Operator::Exists)),
        tree::Expr::Subquery(query) => subquery(query),
        tree::Expr::List(items) => Ok(Expression::collection(lower_all(items)?)),
        // MULTISET (select) / CURSOR (select)
        tree::Expr::SubqueryCall { keyword, query } => Ok(Expression::function(
            keyword.clone(),
            vec![FunctionParam::new(subquery(query)?)],
        )),
        tree::Expr::Case(case) => lower_case(case),
        tree::Expr::Function(function) => lower_function(function),
    }
}

pub(crate) fn lower_all(items: &[tree::Expr]) -> Result<Vec<Expression>> {
    items.iter().map(lower_expr).collect()
}

/// `! =` -> `!=`, `multiset union all` -> `MULTISET UNION ALL`
fn operator_text(tokens: &[String]) -> String {
    let symbolic = tokens
        .iter()
        .all(|t| !t.chars().any(|c| c.is_alphanumeric() || c == '_'));
    if symbolic {
        tokens.iter().map(|t| t.trim()).collect()
    } else {
        phrase(tokens)
    }
}

fn subquery(query: &tree::SelectStmt) -> Result<Expression> {
    Ok(Expression::subquery(OracleSelectFactory.generate(query)?))
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

pub(crate) fn lower_column_ref(column: &tree::ColumnRef) -> ColumnReference {
    ColumnReference::new(column.schema.as_deref(), column.relation.as_deref(), &column.column)
}

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

// ---------------------------------------------------------------------------
// Object paths
// ---------------------------------------------------------------------------

fn lower_path(path: &tree::Path) -> Result<Expression> {
    // @link belongs to the last plain name of the path
    let link = match &path.user_variable {
        Some(link) => {
            let at = path
                .steps
                .iter()
                .rposition(|step| matches!(step, tree::PathStep::Name(_)))
                .ok_or_else(|| Error::unrecognized(DIALECT, "database link target", link.clone()))?;
            Some((at, link.as_str()))
        }
        None => None,
    };
    lower_steps(&path.steps, 0, link)
}

fn lower_steps(steps: &[tree::PathStep], base: usize, link: Option<(usize, &str)>) -> Result<Expression> {
    let (head, rest) = steps
        .split_first()
        .ok_or_else(|| Error::internal("empty object path"))?;
    match head {
        tree::PathStep::Name(name) => {
            let mut reference = RelationReference::new(name.clone(), None);
            if let Some((at, user_variable)) = link {
                if at == base {
                    reference = reference.with_user_variable(user_variable);
                }
            }
            if let Some(next) = rest.first() {
                let tail = lower_steps(rest, base + 1, link)?;
                reference = reference.with_reference(tail, reference_operator(next));
            }
            Ok(Expression::from(reference))
        }
        // t.*
        tree::PathStep::Star if rest.is_empty() => Ok(Expression::relation("*")),
        tree::PathStep::Star => Err(Error::unrecognized(DIALECT, "object path", "step after *")),
        tree::PathStep::Call(_) | tree::PathStep::Index(_) | tree::PathStep::Bracket(_) => {
            let target = lower_step(head)?;
            let mut accesses = Vec::new();
            for (i, step) in rest.iter().enumerate() {
                match step {
                    tree::PathStep::Index(_) | tree::PathStep::Bracket(_) => {
                        accesses.push(Access::new(reference_operator(step), lower_step(step)?));
                    }
                    // f(x).attr...: the remainder is one dotted tail
                    tree::PathStep::Name(_) | tree::PathStep::Call(_) | tree::PathStep::Star => {
                        let offset = base + 1 + i;
                        accesses.push(Access::new(
                            ReferenceOperator::Dot,
                            lower_steps(&rest[i..], offset, link)?,
                        ));
                        break;
                    }
                }
            }
            Ok(Expression::access(target, accesses))
        }
    }
}

/// A call, index or bracket step on its own
fn lower_step(step: &tree::PathStep) -> Result<Expression> {
    match step {
        tree::PathStep::Call(call) => Ok(Expression::from(lower_call(call)?)),
        tree::PathStep::Index(items) => Ok(Expression::collection(lower_all(items)?)),
        tree::PathStep::Bracket(subscripts) => Ok(Expression::collection(
            subscripts.iter().map(lower_subscript).collect(),
        )),
        tree::PathStep::Name(name) => Ok(Expression::relation(name.clone())),
        tree::PathStep::Star => Ok(Expression::relation("*")),
    }
}

fn reference_operator(step: &tree::PathStep) -> ReferenceOperator {
    match step {
        tree::PathStep::Index(_) => ReferenceOperator::Paren,
        tree::PathStep::Bracket(_) => ReferenceOperator::Bracket,
        tree::PathStep::Name(_) | tree::PathStep::Call(_) | tree::PathStep::Star => ReferenceOperator::Dot,
    }
}

/// `[1 to 3]` -> Compound(1, 3, TO)
fn lower_subscript(subscript: &tree::Subscript) -> Expression {
    match subscript {
        tree::Subscript::Index(text) => Expression::constant(text.clone()),
        tree::Subscript::Range { from, to } => Expression::binary(
            Expression::constant(from.clone()),
            Expression::constant(to.clone()),
            Operator::To,
        ),
        tree::Subscript::Star => Expression::constant("*"),
    }
}

// ---------------------------------------------------------------------------
// Functions
// ---------------------------------------------------------------------------

/// Plain and aggregate calls
pub(crate) fn lower_call(call: &tree::Call) -> Result<FunctionCall> {
    let mut f = FunctionCall::new(call.name.clone(), lower_args(&call.args)?);
    f.params_flag = call.aggregator.as_deref().map(|a| a.trim().to_string());
    f.keep = call
        .keep
        .as_ref()
        .map(|keep| -> Result<KeepClause> {
            Ok(KeepClause {
                first_or_last: keep.first_or_last.clone(),
                order_by: lower_order_by(&keep.order_by)?.unwrap_or_else(|| OrderBy::new(Vec::new())),
            })
        })
        .transpose()?;
    f.within_group = lower_order_by(&call.within_group)?;
    Ok(f)
}

fn lower_args(args: &[tree::Arg]) -> Result<Vec<FunctionParam>> {
    args.iter()
        .map(|arg| {
            let value = match arg {
                tree::Arg::Expr(expr) => lower_expr(expr)?,
                tree::Arg::Star => Expression::constant("*"),
                // f(p => 1)
                tree::Arg::Named { name, value } => Expression::ParamWithAssign(Box::new(ParamWithAssign {
                    name: name.clone(),
                    value: lower_expr(value)?,
                })),
                tree::Arg::KeyValue { key, value } => key_value(key, value)?,
            };
            Ok(FunctionParam::new(value))
        })
        .collect()
}

fn key_value(key: &tree::Expr, value: &tree::Expr) -> Result<Expression> {
    Ok(Expression::JsonKeyValue(Box::new(JsonKeyValue {
        key: lower_expr(key)?,
        value: lower_expr(value)?,
    })))
}

fn lower_function(function: &tree::Function) -> Result<Expression> {
    let call = match function {
        tree::Function::Aggregate(call) => lower_call(call)?,
        tree::Function::Window(window) => return lower_window_call(window),
        tree::Function::Cast { name, expr, target } => {
            let param = FunctionParam::new(lower_expr(expr)?).with_option(lower_data_type(target)?);
            FunctionCall::new(name.clone(), vec![param])
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
            f
        }
        tree::Function::Extract { name, unit, expr } => {
            let param = FunctionParam::new(Expression::constant(unit.clone())).with_option(lower_expr(expr)?);
            FunctionCall::new(name.clone(), vec![param])
        }
        tree::Function::JsonValue(json) => lower_json_value(json)?,
        tree::Function::JsonQuery(json) => lower_json_query(json)?,
        tree::Function::JsonExists(json) => lower_json_exists(json)?,
        tree::Function::JsonObject(json) => lower_json_object(json)?,
        tree::Function::JsonArray(json) => lower_json_array(json)?,
        tree::Function::JsonMergePatch(json) => lower_json_mergepatch(json)?,
    };
    Ok(Expression::from(call))
}

fn flag(f: &mut FunctionCall, set: bool, keyword: &str) {
    if set {
        f.add_option(Some(ConstExpression::new(keyword)));
    }
}

fn lower_returning(returning: &Option<tree::DataType>) -> Result<Option<crate::statements::data_type::DataType>> {
    returning.as_ref().map(lower_data_type).transpose()
}

/// The document argument, with `FORMAT JSON` when written
fn json_doc(arg: &tree::JsonArg) -> Result<FunctionParam> {
    let param = FunctionParam::new(lower_expr(&arg.expr)?);
    if arg.format_json {
        return Ok(param.with_option(ConstExpression::from_tokens(["FORMAT", "JSON"])));
    }
    Ok(param)
}

fn lower_json_value(json: &tree::JsonValue) -> Result<FunctionCall> {
    let mut f = FunctionCall::new(
        json.name.clone(),
        vec![json_doc(&json.doc)?, FunctionParam::new(lower_expr(&json.path)?)],
    );
    f.add_option(lower_returning(&json.returning)?);
    flag(&mut f, json.truncate, "TRUNCATE");
    flag(&mut f, json.ascii, "ASCII");
    f.add_option(lower_json_on(&json.on)?);
    Ok(f)
}

fn lower_json_query(json: &tree::JsonQuery) -> Result<FunctionCall> {
    let mut f = FunctionCall::new(
        json.name.clone(),
        vec![json_doc(&json.doc)?, FunctionParam::new(lower_expr(&json.path)?)],
    );
    f.add_option(lower_returning(&json.returning)?);
    flag(&mut f, json.truncate, "TRUNCATE");
    flag(&mut f, json.pretty, "PRETTY");
    flag(&mut f, json.ascii, "ASCII");
    f.add_option(lower_json_modes(&json.modes)?);
    f.add_option(lower_json_on(&json.on)?);
    Ok(f)
}

fn lower_json_exists(json: &tree::JsonExists) -> Result<FunctionCall> {
    let mut f = FunctionCall::new(
        json.name.clone(),
        vec![json_doc(&json.doc)?, FunctionParam::new(lower_expr(&json.path)?)],
    );
    // PASSING expr AS name
    for (expr, name) in &json.passing {
        f.add_option(Some(
            FunctionParam::new(lower_expr(expr)?).with_option(ConstExpression::new(name.clone())),
        ));
    }
    f.add_option(lower_json_on(&json.on)?);
    Ok(f)
}

fn lower_json_object(json: &tree::JsonObject) -> Result<FunctionCall> {
    let params = json
        .entries
        .iter()
        .map(|entry| {
            let param = FunctionParam::new(key_value(&entry.key, &entry.value.expr)?);
            if entry.value.format_json {
                return Ok(param.with_option(ConstExpression::from_tokens(["FORMAT", "JSON"])));
            }
            Ok(param)
        })
        .collect::<Result<Vec<_>>>()?;
    let mut f = FunctionCall::new(json.name.clone(), params);
    f.add_option(on_null(&json.on_null)?);
    f.add_option(lower_returning(&json.returning)?);
    f.add_option(lower_json_modes(&json.modes)?);
    Ok(f)
}

fn lower_json_array(json: &tree::JsonArray) -> Result<FunctionCall> {
    let params = json.items.iter().map(json_doc).collect::<Result<Vec<_>>>()?;
    let mut f = FunctionCall::new(json.name.clone(), params);
    f.add_option(on_null(&json.on_null)?);
    f.add_option(lower_returning(&json.returning)?);
    f.add_option(lower_json_modes(&json.modes)?);
    Ok(f)
}

fn lower_json_mergepatch(json: &tree::JsonMergePatch) -> Result<FunctionCall> {
    let mut f = FunctionCall::new(
        json.name.clone(),
        vec![
            FunctionParam::new(lower_expr(&json.target)?),
            FunctionParam::new(lower_expr(&json.patch)?),
        ],
    );
    f.add_option(lower_returning(&json.returning)?);
    flag(&mut f, json.truncate, "TRUNCATE");
    flag(&mut f, json.pretty, "PRETTY");
    flag(&mut f, json.ascii, "ASCII");
    f.add_option(
        json.on_error
            .as_ref()
            .map(|response| -> Result<JsonOnOption> {
                Ok(JsonOnOption {
                    on_error: Some(lower_json_response(response)?),
                    ..Default::default()
                })
            })
            .transpose()?,
    );
    Ok(f)
}

fn on_null(response: &Option<tree::JsonResponse>) -> Result<Option<JsonOnOption>> {
    response
        .as_ref()
        .map(|response| {
            Ok(JsonOnOption {
                on_null: Some(lower_json_response(response)?),
                ..Default::default()
            })
        })
        .transpose()
}

/// `None` when no mode was written
pub(crate) fn lower_json_modes(modes: &tree::JsonModes) -> Result<Option<JsonConstraint>> {
    if modes.is_empty() {
        return Ok(None);
    }
    Ok(Some(JsonConstraint {
        strict_mode: modes
            .strict
            .as_deref()
            .map(|s| lookup(&STRICT_MODES, DIALECT, "JSON strict mode", s))
            .transpose()?,
        scalars_mode: optional_phrase(&modes.scalars)
            .map(|s| lookup(&SCALARS_MODES, DIALECT, "JSON scalars mode", &s))
            .transpose()?,
        unique_mode: optional_phrase(&modes.unique)
            .map(|s| lookup(&UNIQUE_MODES, DIALECT, "JSON unique mode", &s))
            .transpose()?,
        wrapper_mode: optional_phrase(&modes.wrapper)
            .map(|s| lookup(&WRAPPER_MODES, DIALECT, "JSON wrapper", &s))
            .transpose()?,
    }))
}

fn optional_phrase(tokens: &[String]) -> Option<String> {
    if tokens.is_empty() {
        None
    } else {
        Some(phrase(tokens))
    }
}

/// `None` when no ON clause was written
pub(crate) fn lower_json_on(on: &tree::JsonOn) -> Result<Option<JsonOnOption>> {
    if on.on_empty.is_none() && on.on_error.is_none() && on.on_null.is_none() && on.on_mismatch.is_empty() {
        return Ok(None);
    }
    let on_mismatches = on
        .on_mismatch
        .iter()
        .map(|mismatch| {
            Ok(OnMismatch {
                response: lower_json_response(&mismatch.response)?,
                mismatch_types: mismatch.types.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Some(JsonOnOption {
        on_empty: on.on_empty.as_ref().map(lower_json_response).transpose()?,
        on_error: on.on_error.as_ref().map(lower_json_response).transpose()?,
        on_null: on.on_null.as_ref().map(lower_json_response).transpose()?,
        on_mismatches,
    }))
}

fn lower_json_response(response: &tree::JsonResponse) -> Result<Expression> {
    match response {
        tree::JsonResponse::Error(text) => Ok(Expression::constant(text.clone())),
        tree::JsonResponse::Null => Ok(Expression::Null),
        tree::JsonResponse::Default(expr) => lower_expr(expr),
        tree::JsonResponse::Keyword(tokens) => {
            let text = phrase(tokens);
            match JSON_BOOLEANS.get(text.to_ascii_uppercase().as_str()) {
                Some(value) => Ok(Expression::boolean(*value)),
                None => Ok(Expression::constant(text)),
            }
        }
    }
}

/// `JSON_TABLE(doc, path ... COLUMNS (...))`. Columns follow the ON clauses
/// as parameter options of the call.
pub(crate) fn lower_json_table(table: &tree::JsonTable) -> Result<Expression> {
    let mut params = vec![json_doc(&table.doc)?];
    if let Some(path) = &table.path {
        params.push(FunctionParam::new(lower_expr(path)?));
    }
    let mut f = FunctionCall::new(table.name.clone(), params);
    f.add_option(lower_json_on(&table.on)?);
    for column in &table.columns {
        f.add_option(Some(lower_json_table_column(column)?));
    }
    Ok(Expression::from(f))
}

fn lower_json_table_column(column: &tree::JsonTableColumn) -> Result<FunctionParam> {
    let named = |name: &str| FunctionParam::new(Expression::column(None, None, name));
    let param = match column {
        tree::JsonTableColumn::Ordinality(name) => {
            named(name).with_option(ConstExpression::from_tokens(["FOR", "ORDINALITY"]))
        }
        tree::JsonTableColumn::Exists {
            name,
            data_type,
            path,
            on,
        } => {
            let mut param = named(name);
            if let Some(data_type) = data_type {
                param = param.with_option(lower_data_type(data_type)?);
            }
            param = param.with_option(ConstExpression::new("EXISTS"));
            with_path_and_on(param, path, on)?
        }
        tree::JsonTableColumn::Query {
            name,
            data_type,
            modes,
            path,
            on,
        } => {
            let mut param = named(name);
            if let Some(data_type) = data_type {
                param = param.with_option(lower_data_type(data_type)?);
            }
            param = param.with_option(ConstExpression::from_tokens(["FORMAT", "JSON"]));
            if let Some(constraint) = lower_json_modes(modes)? {
                param = param.with_option(constraint);
            }
            with_path_and_on(param, path, on)?
        }
        tree::JsonTableColumn::Value {
            name,
            data_type,
            truncate,
            path,
            on,
        } => {
            let mut param = named(name);
            if let Some(data_type) = data_type {
                param = param.with_option(lower_data_type(data_type)?);
            }
            if *truncate {
                param = param.with_option(ConstExpression::new("TRUNCATE"));
            }
            with_path_and_on(param, path, on)?
        }
        tree::JsonTableColumn::Nested {
            keywords,
            path,
            columns,
        } => {
            let mut param = FunctionParam::new(Expression::constant(phrase(keywords))).with_option(lower_expr(path)?);
            for column in columns {
                param = param.with_option(lower_json_table_column(column)?);
            }
            param
        }
    };
    Ok(param)
}

fn with_path_and_on(mut param: FunctionParam, path: &Option<tree::Expr>, on: &tree::JsonOn) -> Result<FunctionParam> {
    if let Some(path) = path {
        param = param.with_option(lower_expr(path)?);
    }
    if let Some(on) = lower_json_on(on)? {
        param = param.with_option(on);
    }
    Ok(param)
}

// ---------------------------------------------------------------------------
// Windows and ordering
// ---------------------------------------------------------------------------

fn lower_window_call(window: &tree::WindowCall) -> Result<Expression> {
    let mut f = lower_call(&window.call)?;
    // NTH_VALUE(...) FROM FIRST IGNORE NULLS
    if !window.from_first_last.is_empty() {
        f.add_option(Some(ConstExpression::new(phrase(&window.from_first_last))));
    }
    if !window.nulls.is_empty() {
        f.add_option(Some(ConstExpression::new(phrase(&window.nulls))));
    }
    Ok(Expression::WindowFunction(Box::new(WindowFunction {
        function: f,
        window: lower_window_spec(&window.over)?,
    })))
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
        name: None,
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
                Some(expr) => lower_expr(expr)?,
                None => Expression::constant("UNBOUNDED"),
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
    let mut key = SortKey::new(lower_expr(&item.expr)?, direction);
    key.null_position = optional_phrase(&item.nulls)
        .map(|nulls| lookup(&NULL_POSITIONS, DIALECT, "null position", &nulls))
        .transpose()?;
    Ok(key)
}

pub(crate) fn lower_order_by(items: &[tree::SortItem]) -> Result<Option<OrderBy>> {
    if items.is_empty() {
        return Ok(None);
    }
    let keys = items.iter().map(lower_sort_key).collect::<Result<Vec<_>>>()?;
    Ok(Some(OrderBy::new(keys)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statements::data_type::DataType;

    fn lower(node: tree::Expr) -> Expression {
        OracleExpressionFactory.generate(&node).unwrap()
    }

    fn name(text: &str) -> tree::Expr {
        tree::Expr::path(&[text])
    }

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_is_null_and_is_not_nan() {
        let node = tree::Expr::call(
            "function",
            vec![
                tree::Expr::is(name("a"), false, "null"),
                tree::Expr::is(name("b"), true, "nan_value"),
            ],
        );
        let expected = Expression::function(
            "function",
            vec![
                FunctionParam::new(Expression::binary(
                    Expression::relation("a"),
                    Expression::Null,
                    Operator::Eq,
                )),
                FunctionParam::new(Expression::binary(
                    Expression::relation("b"),
                    Expression::Null,
                    Operator::Ne,
                )),
            ],
        );
        assert_eq!(lower(node), expected);
    }

    #[test]
    fn test_dotted_name_is_relation_chain() {
        assert_eq!(
            lower(tree::Expr::path(&["a", "b"])),
            Expression::relation_chain("a", Expression::relation("b"))
        );
    }

    #[test]
    fn test_star_after_name() {
        let node = tree::Expr::Path(tree::Path {
            steps: vec![tree::PathStep::Name("col".to_string()), tree::PathStep::Star],
            user_variable: None,
        });
        assert_eq!(
            lower(node),
            Expression::relation_chain("col", Expression::relation("*"))
        );
    }

    #[test]
    fn test_chain_ends_in_call() {
        let node = tree::Expr::Path(tree::Path {
            steps: vec![
                tree::PathStep::Name("a".to_string()),
                tree::PathStep::Name("b".to_string()),
                tree::PathStep::Call(tree::Call::new("first", vec![])),
            ],
            user_variable: None,
        });
        let expected = Expression::relation_chain(
            "a",
            Expression::relation_chain("b", Expression::function("first", vec![])),
        );
        assert_eq!(lower(node), expected);
    }

    #[test]
    fn test_collection_index_uses_paren() {
        let node = tree::Expr::Path(tree::Path {
            steps: vec![
                tree::PathStep::Name("t".to_string()),
                tree::PathStep::Index(vec![tree::Expr::literal("1")]),
            ],
            user_variable: None,
        });
        let expected = RelationReference::new("t", None).with_reference(
            Expression::collection(vec![Expression::constant("1")]),
            ReferenceOperator::Paren,
        );
        assert_eq!(lower(node), Expression::from(expected));
    }

    #[test]
    fn test_call_followed_by_index_and_attribute() {
        // f(x)(1).attr
        let node = tree::Expr::Path(tree::Path {
            steps: vec![
                tree::PathStep::Call(tree::Call::new("f", vec![name("x")])),
                tree::PathStep::Index(vec![tree::Expr::literal("1")]),
                tree::PathStep::Name("attr".to_string()),
            ],
            user_variable: None,
        });
        let call = Expression::function("f", vec![FunctionParam::new(Expression::relation("x"))]);
        let expected = Expression::access(
            call,
            vec![
                Access::new(
                    ReferenceOperator::Paren,
                    Expression::collection(vec![Expression::constant("1")]),
                ),
                Access::new(ReferenceOperator::Dot, Expression::relation("attr")),
            ],
        );
        assert_eq!(lower(node), expected);
    }

    #[test]
    fn test_json_bracket_range() {
        let node = tree::Expr::Path(tree::Path {
            steps: vec![
                tree::PathStep::Name("j".to_string()),
                tree::PathStep::Bracket(vec![
                    tree::Subscript::Star,
                    tree::Subscript::Range {
                        from: "1".to_string(),
                        to: "3".to_string(),
                    },
                ]),
            ],
            user_variable: None,
        });
        let path = Expression::collection(vec![
            Expression::constant("*"),
            Expression::binary(Expression::constant("1"), Expression::constant("3"), Operator::To),
        ]);
        let expected = RelationReference::new("j", None).with_reference(path, ReferenceOperator::Bracket);
        assert_eq!(lower(node), Expression::from(expected));
    }

    #[test]
    fn test_database_link_on_last_name() {
        let node = tree::Expr::Path(tree::Path {
            steps: vec![
                tree::PathStep::Name("t".to_string()),
                tree::PathStep::Name("c".to_string()),
            ],
            user_variable: Some("remote".to_string()),
        });
        let expected = RelationReference::new("t", None).with_reference(
            Expression::from(RelationReference::new("c", None).with_user_variable("remote")),
            ReferenceOperator::Dot,
        );
        assert_eq!(lower(node), Expression::from(expected));
    }

    #[test]
    fn test_split_comparison_tokens() {
        for spelling in ["! =", "^ =", "< >", "!=", "<>", "^="] {
            let node = tree::Expr::binary(name("a"), spelling, name("b"));
            match lower(node) {
                Expression::Compound(compound) => assert_eq!(compound.operator, Operator::Ne, "{}", spelling),
                other => panic!("unexpected {:?}", other),
            }
        }
        let le = tree::Expr::binary(name("a"), "< =", name("b"));
        assert_eq!(lower(le).as_compound().unwrap().operator, Operator::Le);
        let ne_pl = tree::Expr::binary(name("a"), "~=", name("b"));
        assert_eq!(lower(ne_pl).as_compound().unwrap().operator, Operator::NePl);
    }

    #[test]
    fn test_every_binary_spelling_lowers() {
        for spelling in BINARY_OPERATORS.keys() {
            let node = tree::Expr::binary(name("a"), &spelling.to_lowercase(), name("b"));
            assert!(OracleExpressionFactory.generate(&node).is_ok(), "{}", spelling);
        }
    }

    #[test]
    fn test_multiset_union_all() {
        let node = tree::Expr::binary(name("a"), "multiset union all", name("b"));
        assert_eq!(
            lower(node),
            Expression::binary(
                Expression::relation("a"),
                Expression::relation("b"),
                Operator::MultisetUnionAll
            )
        );
    }

    #[test]
    fn test_unknown_operator_is_rejected() {
        let node = tree::Expr::binary(name("a"), "<=>=", name("b"));
        assert!(matches!(
            OracleExpressionFactory.generate(&node).unwrap_err(),
            Error::Unrecognized { rule: "binary operator", .. }
        ));
    }

    #[test]
    fn test_prior_and_connect_by_root() {
        assert_eq!(
            lower(tree::Expr::unary("prior", name("id"))),
            Expression::unary(Expression::relation("id"), Operator::Prior)
        );
        assert_eq!(
            lower(tree::Expr::unary("CONNECT_BY_ROOT", name("id"))),
            Expression::unary(Expression::relation("id"), Operator::ConnectByRoot)
        );
    }

    #[test]
    fn test_collection_predicates() {
        let not_a_set = tree::Expr::CollectionTest {
            operand: Box::new(name("nt")),
            not: true,
            test: tokens("A SET"),
        };
        assert_eq!(
            lower(not_a_set),
            Expression::unary(Expression::relation("nt"), Operator::IsNotASet)
        );

        let submultiset = tree::Expr::SubmultisetOf {
            operand: Box::new(name("a")),
            not: true,
            target: Box::new(name("b")),
        };
        assert_eq!(
            lower(submultiset),
            Expression::binary(
                Expression::relation("a"),
                Expression::relation("b"),
                Operator::NotSubMultisetOf
            )
        );
    }

    #[test]
    fn test_at_time_zone_and_at_local() {
        let zone = tree::Expr::AtTimeZone {
            operand: Box::new(name("ts")),
            zone: Some(Box::new(tree::Expr::literal("'UTC'"))),
        };
        assert_eq!(
            lower(zone),
            Expression::binary(
                Expression::relation("ts"),
                Expression::constant("'UTC'"),
                Operator::AtTimeZone
            )
        );
        let local = tree::Expr::AtTimeZone {
            operand: Box::new(name("ts")),
            zone: None,
        };
        assert_eq!(
            lower(local),
            Expression::unary(Expression::relation("ts"), Operator::AtLocal)
        );
    }

    #[test]
    fn test_is_not_json_strict() {
        let node = tree::Expr::IsJson {
            operand: Box::new(name("doc")),
            not: true,
            modes: tree::JsonModes {
                strict: Some("strict".to_string()),
                unique: tokens("WITH UNIQUE KEYS"),
                ..Default::default()
            },
        };
        let constraint = JsonConstraint {
            strict_mode: Some(StrictMode::Strict),
            unique_mode: Some(UniqueMode::WithUniqueKeys),
            ..Default::default()
        };
        assert_eq!(
            lower(node),
            Expression::binary(
                Expression::relation("doc"),
                Expression::JsonConstraint(constraint),
                Operator::IsNot
            )
        );
    }

    #[test]
    fn test_aggregator_sets_params_flag() {
        let mut call = tree::Call::new("count", vec![name("a")]);
        call.aggregator = Some(" DISTINCT ".to_string());
        let lowered = lower(tree::Expr::function(tree::Function::Aggregate(call)));
        let lowered = lowered.as_function_call().unwrap();
        assert_eq!(lowered.params_flag.as_deref(), Some("DISTINCT"));
        assert!(lowered.options.is_empty());
    }

    #[test]
    fn test_keep_dense_rank_last() {
        let mut call = tree::Call::new("max", vec![name("sal")]);
        call.keep = Some(tree::Keep {
            first_or_last: "LAST".to_string(),
            order_by: vec![tree::SortItem::new(name("hired"), Some("desc"))],
        });
        let lowered = lower(tree::Expr::function(tree::Function::Aggregate(call)));
        let keep = lowered.as_function_call().unwrap().keep.clone().unwrap();
        assert_eq!(keep.first_or_last, "LAST");
        assert_eq!(
            keep.order_by,
            OrderBy::new(vec![SortKey::new(
                Expression::relation("hired"),
                Some(SortDirection::Desc)
            )])
        );
    }

    #[test]
    fn test_window_function_is_distinct_variant() {
        let node = tree::Expr::function(tree::Function::Window(tree::WindowCall {
            call: tree::Call::new("row_number", vec![]),
            from_first_last: vec![],
            nulls: vec![],
            over: tree::WindowSpecNode {
                partition_by: vec![name("dept")],
                order_by: vec![tree::SortItem {
                    expr: name("sal"),
                    direction: None,
                    nulls: tokens("NULLS LAST"),
                }],
                frame: Some(tree::Frame {
                    unit: "range".to_string(),
                    begin: tree::FrameBound::Offset {
                        offset: None,
                        direction: "preceding".to_string(),
                    },
                    end: None,
                }),
            },
        }));
        match lower(node) {
            Expression::WindowFunction(window) => {
                assert_eq!(window.function.name, "row_number");
                assert!(window.function.window.is_none());
                assert_eq!(window.window.partition_by, vec![Expression::relation("dept")]);
                let order_by = window.window.order_by.as_ref().unwrap();
                assert_eq!(order_by.sort_keys[0].null_position, Some(SortNullPosition::Last));
                let body = window.window.body.as_ref().unwrap();
                assert_eq!(body.kind, WindowType::Range);
                assert_eq!(
                    body.begin,
                    WindowOffset::new(WindowOffsetType::Preceding, Expression::constant("UNBOUNDED"))
                );
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_named_argument() {
        let call = tree::Call {
            args: vec![tree::Arg::Named {
                name: "p".to_string(),
                value: tree::Expr::literal("1"),
            }],
            ..tree::Call::new("f", vec![])
        };
        let node = tree::Expr::Path(tree::Path {
            steps: vec![tree::PathStep::Call(call)],
            user_variable: None,
        });
        let expected = Expression::function(
            "f",
            vec![FunctionParam::new(Expression::ParamWithAssign(Box::new(ParamWithAssign {
                name: "p".to_string(),
                value: Expression::constant("1"),
            })))],
        );
        assert_eq!(lower(node), expected);
    }

    #[test]
    fn test_json_query_options_in_order() {
        let node = tree::Expr::function(tree::Function::JsonQuery(tree::JsonQuery {
            name: "json_query".to_string(),
            doc: tree::JsonArg {
                expr: name("doc"),
                format_json: true,
            },
            path: tree::Expr::literal("'$.a'"),
            returning: Some(tree::DataType::character("varchar2", Some("100"))),
            truncate: false,
            pretty: true,
            ascii: false,
            modes: tree::JsonModes {
                wrapper: tokens("WITH CONDITIONAL ARRAY WRAPPER"),
                ..Default::default()
            },
            on: tree::JsonOn {
                on_error: Some(tree::JsonResponse::Keyword(tokens("EMPTY ARRAY"))),
                ..Default::default()
            },
        }));
        let lowered = lower(node);
        let call = lowered.as_function_call().unwrap();
        assert_eq!(
            call.params[0].options,
            vec![crate::expressions::FunctionOption::from(ConstExpression::new("FORMAT JSON"))]
        );
        use crate::expressions::FunctionOption;
        assert_eq!(
            call.options,
            vec![
                FunctionOption::from(DataType::character("varchar2", Some("100"))),
                FunctionOption::from(ConstExpression::new("PRETTY")),
                FunctionOption::from(JsonConstraint {
                    wrapper_mode: Some(WrapperMode::WithConditionalArrayWrapper),
                    ..Default::default()
                }),
                FunctionOption::from(JsonOnOption {
                    on_error: Some(Expression::constant("EMPTY ARRAY")),
                    ..Default::default()
                }),
            ]
        );
    }

    #[test]
    fn test_json_exists_boolean_response() {
        let node = tree::Expr::function(tree::Function::JsonExists(tree::JsonExists {
            name: "json_exists".to_string(),
            doc: tree::JsonArg::new(name("doc")),
            path: tree::Expr::literal("'$.a'"),
            passing: vec![(tree::Expr::literal("1"), "v".to_string())],
            on: tree::JsonOn {
                on_error: Some(tree::JsonResponse::Keyword(tokens("true"))),
                ..Default::default()
            },
        }));
        let lowered = lower(node);
        let call = lowered.as_function_call().unwrap();
        use crate::expressions::FunctionOption;
        assert_eq!(
            call.options,
            vec![
                FunctionOption::from(
                    FunctionParam::new(Expression::constant("1")).with_option(ConstExpression::new("v"))
                ),
                FunctionOption::from(JsonOnOption {
                    on_error: Some(Expression::boolean(true)),
                    ..Default::default()
                }),
            ]
        );
    }

    #[test]
    fn test_json_object_entries() {
        let node = tree::Expr::function(tree::Function::JsonObject(tree::JsonObject {
            name: "json_object".to_string(),
            entries: vec![tree::JsonEntry {
                key: tree::Expr::literal("'k'"),
                value: tree::JsonArg {
                    expr: name("v"),
                    format_json: true,
                },
            }],
            on_null: Some(tree::JsonResponse::Keyword(tokens("ABSENT"))),
            returning: None,
            modes: tree::JsonModes::default(),
        }));
        let lowered = lower(node);
        let call = lowered.as_function_call().unwrap();
        assert!(matches!(call.params[0].value, Expression::JsonKeyValue(_)));
        assert_eq!(call.params[0].options.len(), 1);
        assert_eq!(
            call.options,
            vec![crate::expressions::FunctionOption::from(JsonOnOption {
                on_null: Some(Expression::constant("ABSENT")),
                ..Default::default()
            })]
        );
    }

    #[test]
    fn test_json_table_columns() {
        let table = tree::JsonTable {
            name: "json_table".to_string(),
            doc: tree::JsonArg::new(name("doc")),
            path: Some(tree::Expr::literal("'$[*]'")),
            on: tree::JsonOn::default(),
            columns: vec![
                tree::JsonTableColumn::Ordinality("id".to_string()),
                tree::JsonTableColumn::Query {
                    name: "q".to_string(),
                    data_type: None,
                    modes: tree::JsonModes::default(),
                    path: Some(tree::Expr::literal("'$.q'")),
                    on: tree::JsonOn::default(),
                },
            ],
        };
        let lowered = lower_json_table(&table).unwrap();
        let call = lowered.as_function_call().unwrap();
        assert_eq!(call.params.len(), 2);
        assert_eq!(call.options.len(), 2);
        match &call.options[1] {
            crate::expressions::FunctionOption::Param(query) => {
                assert_eq!(query.value, Expression::column(None, None, "q"));
                assert_eq!(query.options.len(), 2);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_multiset_subquery_call() {
        let select = tree::SelectStmt::simple(tree::SimpleSelect {
            projections: vec![tree::SelectItem::Star],
            from: vec![tree::TableReference::table("dual", None)],
            ..Default::default()
        });
        let node = tree::Expr::SubqueryCall {
            keyword: "MULTISET".to_string(),
            query: Box::new(select),
        };
        let lowered = lower(node);
        let call = lowered.as_function_call().unwrap();
        assert_eq!(call.name, "MULTISET");
        assert!(matches!(call.params[0].value, Expression::Select(_)));
    }
}
