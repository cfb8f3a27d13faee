//! Oracle table elements.
//!
//! Oracle constraints carry a state clause (`RELY`, `USING INDEX ...`,
//! `ENABLE`, `VALIDATE`) that lowers into [`ConstraintState`]. Identity
//! columns lower into a [`GenerateOption`] holding sequence options instead
//! of an expression.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::data_type::lower_data_type;
use super::expression::{lower_column_ref, lower_expr, lower_signed_literal, SORT_DIRECTIONS};
use super::partition::lower_partition;
use super::tree;
use crate::dialects::{lookup, number, phrase, DialectType, Factory};
use crate::error::{Error, Result};
use crate::expressions::{ColumnReference, Expression, FunctionParam};
use crate::statements::table_element::{
    ColumnAttributes, ColumnDefinition, ConstraintState, ForeignReference, GenerateOption,
    GenerateType, InLineConstraint, IndexOptions, OnOption, OutOfLineConstraint, OutOfLineIndex,
    SequenceOption, SortColumn, TableElement,
};

const DIALECT: DialectType = DialectType::Oracle;

#[derive(Clone, Copy)]
enum Algorithm {
    BTree,
    Hash,
}

static ALGORITHMS: Lazy<HashMap<&'static str, Algorithm>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("BTREE", Algorithm::BTree);
    m.insert("HASH", Algorithm::Hash);
    m
});

static SCOPES: Lazy<HashMap<&'static str, bool>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("GLOBAL", true);
    m.insert("LOCAL", false);
    m
});

pub(crate) static VISIBILITY: Lazy<HashMap<&'static str, bool>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("VISIBLE", true);
    m.insert("INVISIBLE", false);
    m
});

/// Only `ON DELETE` exists in Oracle
static ON_DELETE: Lazy<HashMap<&'static str, OnOption>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("CASCADE", OnOption::Cascade);
    m.insert("SET NULL", OnOption::SetNull);
    m
});

static RELY: Lazy<HashMap<&'static str, bool>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("RELY", true);
    m.insert("NORELY", false);
    m
});

static ENABLE: Lazy<HashMap<&'static str, bool>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("ENABLE", true);
    m.insert("DISABLE", false);
    m
});

static VALIDATE: Lazy<HashMap<&'static str, bool>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("VALIDATE", true);
    m.insert("NOVALIDATE", false);
    m
});

#[derive(Clone, Copy)]
enum SequenceKeyword {
    StartWith,
    IncrementBy,
    MinValue,
    NoMinValue,
    MaxValue,
    NoMaxValue,
    Cache,
    NoCache,
    Cycle,
    NoCycle,
    Order,
    NoOrder,
}

static SEQUENCE_KEYWORDS: Lazy<HashMap<&'static str, SequenceKeyword>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("START WITH", SequenceKeyword::StartWith);
    m.insert("INCREMENT BY", SequenceKeyword::IncrementBy);
    m.insert("MINVALUE", SequenceKeyword::MinValue);
    m.insert("NOMINVALUE", SequenceKeyword::NoMinValue);
    m.insert("MAXVALUE", SequenceKeyword::MaxValue);
    m.insert("NOMAXVALUE", SequenceKeyword::NoMaxValue);
    m.insert("CACHE", SequenceKeyword::Cache);
    m.insert("NOCACHE", SequenceKeyword::NoCache);
    m.insert("CYCLE", SequenceKeyword::Cycle);
    m.insert("NOCYCLE", SequenceKeyword::NoCycle);
    m.insert("ORDER", SequenceKeyword::Order);
    m.insert("NOORDER", SequenceKeyword::NoOrder);
    m
});

pub struct OracleTableElementFactory;

impl Factory for OracleTableElementFactory {
    type Node = tree::TableElement;
    type Output = TableElement;

    fn dialect_type(&self) -> DialectType {
        DIALECT
    }

    fn generate(&self, node: &tree::TableElement) -> Result<TableElement> {
        log::trace!("lowering oracle table element");
        match node {
            tree::TableElement::Column(column) => lower_column_definition(column).map(TableElement::from),
            tree::TableElement::Index(index) => lower_index(index).map(TableElement::from),
            tree::TableElement::Constraint(constraint) => lower_constraint(constraint).map(TableElement::from),
        }
    }
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

pub(crate) fn lower_column_definition(node: &tree::ColumnDefinition) -> Result<ColumnDefinition> {
    let data_type = node.data_type.as_ref().map(lower_data_type).transpose()?;
    let mut definition = ColumnDefinition::new(lower_column_ref(&node.column), data_type);
    definition.visible = node
        .visibility
        .as_deref()
        .map(|v| lookup(&VISIBILITY, DIALECT, "column visibility", v))
        .transpose()?;

    if let Some(generated) = &node.generated {
        let mut option = match &generated.body {
            tree::GeneratedBody::Expr(expr) => GenerateOption::expression(lower_expr(expr)?),
            tree::GeneratedBody::Identity(options) => GenerateOption::identity(
                options
                    .as_deref()
                    .map(|options| options.iter().map(lower_sequence_option).collect::<Result<Vec<_>>>())
                    .transpose()?,
            ),
        };
        if !generated.keywords.is_empty() {
            option.generate_option = Some(phrase(&generated.keywords));
        }
        if generated.r#virtual {
            option.kind = Some(GenerateType::Virtual);
        }
        definition.generate_option = Some(option);
    }

    if !node.attributes.is_empty() {
        let mut attributes = ColumnAttributes::default();
        for attribute in &node.attributes {
            attributes.merge(lower_column_attribute(attribute)?);
        }
        definition.attributes = Some(attributes);
    }
    Ok(definition)
}

fn lower_sequence_option(node: &tree::SequenceOptionNode) -> Result<SequenceOption> {
    let keyword = phrase(&node.keyword);
    let value = || {
        node.value
            .clone()
            .ok_or_else(|| Error::unrecognized(DIALECT, "sequence option value", keyword.clone()))
    };
    Ok(match lookup(&SEQUENCE_KEYWORDS, DIALECT, "sequence option", &keyword)? {
        SequenceKeyword::StartWith => SequenceOption::StartWith(value()?),
        SequenceKeyword::IncrementBy => SequenceOption::IncrementBy(value()?),
        SequenceKeyword::MinValue => SequenceOption::MinValue(value()?),
        SequenceKeyword::NoMinValue => SequenceOption::NoMinValue,
        SequenceKeyword::MaxValue => SequenceOption::MaxValue(value()?),
        SequenceKeyword::NoMaxValue => SequenceOption::NoMaxValue,
        SequenceKeyword::Cache => SequenceOption::Cache(value()?),
        SequenceKeyword::NoCache => SequenceOption::NoCache,
        SequenceKeyword::Cycle => SequenceOption::Cycle,
        SequenceKeyword::NoCycle => SequenceOption::NoCycle,
        SequenceKeyword::Order => SequenceOption::Order,
        SequenceKeyword::NoOrder => SequenceOption::NoOrder,
    })
}

fn lower_column_attribute(attribute: &tree::ColumnAttribute) -> Result<ColumnAttributes> {
    let mut attributes = ColumnAttributes::default();
    match attribute {
        tree::ColumnAttribute::Constraint { name, kind, state } => {
            let name = name.clone();
            let state = state.as_ref().map(lower_constraint_state).transpose()?;
            let constraint = match kind {
                tree::InlineKind::Null { not } => InLineConstraint::Plain {
                    name,
                    nullable: Some(!not),
                    primary_key: false,
                    unique: false,
                    state,
                },
                tree::InlineKind::PrimaryKey => InLineConstraint::Plain {
                    name,
                    nullable: None,
                    primary_key: true,
                    unique: false,
                    state,
                },
                tree::InlineKind::Unique => InLineConstraint::Plain {
                    name,
                    nullable: None,
                    primary_key: false,
                    unique: true,
                    state,
                },
                tree::InlineKind::Check(expr) => InLineConstraint::Check {
                    name,
                    check: lower_expr(expr)?,
                    state,
                },
                tree::InlineKind::References(clause) => InLineConstraint::Foreign {
                    name,
                    reference: lower_references(clause)?,
                    state,
                },
            };
            attributes.constraints.push(constraint);
        }
        tree::ColumnAttribute::Default(expr) => attributes.default = Some(lower_expr(expr)?),
        tree::ColumnAttribute::OrigDefault(value) => attributes.orig_default = Some(lower_default(value)?),
        tree::ColumnAttribute::Id(id) => attributes.id = Some(number(DIALECT, "column id", id)?),
        tree::ColumnAttribute::Comment(comment) => attributes.comment = Some(comment.clone()),
        tree::ColumnAttribute::SkipIndex(types) => attributes.skip_index = Some(types.clone()),
    }
    Ok(attributes)
}

fn lower_default(value: &tree::DefaultValue) -> Result<Expression> {
    match value {
        // SYSTIMESTAMP(6) -> FunctionCall("SYSTIMESTAMP", [6])
        tree::DefaultValue::Now { name, precision } => {
            let params = precision
                .iter()
                .map(|p| FunctionParam::new(Expression::constant(p.clone())))
                .collect();
            Ok(Expression::function(name.clone(), params))
        }
        tree::DefaultValue::Literal(literal) => lower_signed_literal(literal),
    }
}

// ---------------------------------------------------------------------------
// Indexes
// ---------------------------------------------------------------------------

pub(crate) fn lower_index(node: &tree::IndexDefinition) -> Result<OutOfLineIndex> {
    let columns = node.columns.iter().map(lower_sort_column).collect::<Result<Vec<_>>>()?;
    let mut index = OutOfLineIndex::new(node.name.as_deref(), columns);
    index.options = lower_index_options(&node.options)?;
    index.partition = node.partition.as_ref().map(lower_partition).transpose()?;
    Ok(index)
}

fn lower_sort_column(node: &tree::SortColumnNode) -> Result<SortColumn> {
    let mut column = SortColumn::new(lower_expr(&node.expr)?);
    column.direction = node
        .direction
        .as_deref()
        .map(|d| lookup(&SORT_DIRECTIONS, DIALECT, "sort direction", d))
        .transpose()?;
    column.id = node
        .id
        .as_deref()
        .map(|id| number(DIALECT, "sort column id", id))
        .transpose()?;
    Ok(column)
}

fn named_column(name: &str) -> SortColumn {
    SortColumn::new(Expression::Column(ColumnReference::new(None, None, name)))
}

pub(crate) fn lower_index_options(options: &[tree::IndexOption]) -> Result<Option<IndexOptions>> {
    if options.is_empty() {
        return Ok(None);
    }
    let mut lowered = IndexOptions::default();
    for option in options {
        match option {
            tree::IndexOption::Scope(scope) => {
                lowered.global = Some(lookup(&SCOPES, DIALECT, "index scope", scope)?)
            }
            tree::IndexOption::Using(algorithm) => {
                match lookup(&ALGORITHMS, DIALECT, "index algorithm", algorithm)? {
                    Algorithm::BTree => lowered.using_btree = Some(true),
                    Algorithm::Hash => lowered.using_hash = Some(true),
                }
            }
            tree::IndexOption::Comment(comment) => lowered.comment = Some(comment.clone()),
            tree::IndexOption::BlockSize(size) => {
                lowered.block_size = Some(number(DIALECT, "block size", size)?)
            }
            tree::IndexOption::DataTableId(id) => {
                lowered.data_table_id = Some(number(DIALECT, "data table id", id)?)
            }
            tree::IndexOption::IndexTableId(id) => {
                lowered.index_table_id = Some(number(DIALECT, "index table id", id)?)
            }
            tree::IndexOption::VirtualColumnId(id) => {
                lowered.virtual_column_id = Some(number(DIALECT, "virtual column id", id)?)
            }
            tree::IndexOption::MaxUsedPartId(id) => {
                lowered.max_used_part_id = Some(number(DIALECT, "max used part id", id)?)
            }
            tree::IndexOption::Storing(columns) => {
                lowered.storing = columns.iter().map(lower_column_ref).collect()
            }
            tree::IndexOption::WithRowId => lowered.with_row_id = Some(true),
            tree::IndexOption::Visibility(visibility) => {
                lowered.visible = Some(lookup(&VISIBILITY, DIALECT, "index visibility", visibility)?)
            }
            tree::IndexOption::Parallel(Some(degree)) => {
                lowered.parallel = Some(number(DIALECT, "parallel degree", degree)?)
            }
            tree::IndexOption::Parallel(None) => lowered.no_parallel = Some(true),
            tree::IndexOption::Reverse => lowered.reverse = Some(true),
            tree::IndexOption::Tablespace(name) => lowered.tablespace = Some(name.clone()),
            tree::IndexOption::Storage(items) => lowered.storage = items.clone(),
        }
    }
    Ok(Some(lowered))
}

/// Index clause of a primary or unique key.
pub(crate) fn lower_index_state(node: &tree::IndexState) -> Result<ConstraintState> {
    Ok(ConstraintState {
        using_index_flag: node.using_index,
        index_options: lower_index_options(&node.options)?,
        partition: node.partition.as_ref().map(lower_partition).transpose()?,
        ..Default::default()
    })
}

// ---------------------------------------------------------------------------
// Constraints
// ---------------------------------------------------------------------------

pub(crate) fn lower_constraint(node: &tree::ConstraintDefinition) -> Result<OutOfLineConstraint> {
    let mut constraint = match &node.body {
        tree::ConstraintBody::PrimaryKey { columns, index } => OutOfLineConstraint::PrimaryOrUnique {
            name: None,
            index_name: None,
            primary: true,
            columns: columns.iter().map(|c| named_column(c)).collect(),
            state: index.as_ref().map(lower_index_state).transpose()?,
            column_groups: None,
        },
        tree::ConstraintBody::Unique { columns, index } => OutOfLineConstraint::PrimaryOrUnique {
            name: None,
            index_name: None,
            primary: false,
            columns: columns.iter().map(lower_sort_column).collect::<Result<Vec<_>>>()?,
            state: index.as_ref().map(lower_index_state).transpose()?,
            column_groups: None,
        },
        tree::ConstraintBody::ForeignKey {
            columns,
            references,
            state,
        } => OutOfLineConstraint::Foreign {
            name: None,
            index_name: None,
            columns: columns.iter().map(|c| named_column(c)).collect(),
            reference: lower_references(references)?,
            state: state.as_ref().map(lower_constraint_state).transpose()?,
        },
        tree::ConstraintBody::Check { expr, state } => OutOfLineConstraint::Check {
            name: None,
            check: lower_expr(expr)?,
            state: state.as_ref().map(lower_constraint_state).transpose()?,
        },
    };
    constraint.set_name(node.name.clone());
    Ok(constraint)
}

/// `[RELY|NORELY] [USING INDEX [options]] [ENABLE|DISABLE] [VALIDATE|NOVALIDATE]`
pub(crate) fn lower_constraint_state(node: &tree::ConstraintStateNode) -> Result<ConstraintState> {
    let mut state = match &node.using_index {
        Some(index) if !index.using_index => {
            return Err(Error::illegal(
                DIALECT,
                "index options in a constraint state require USING INDEX",
            ));
        }
        Some(index) => lower_index_state(index)?,
        None => ConstraintState::default(),
    };
    state.rely = node
        .rely
        .as_deref()
        .map(|r| lookup(&RELY, DIALECT, "rely option", r))
        .transpose()?;
    state.enable = node
        .enable
        .as_deref()
        .map(|e| lookup(&ENABLE, DIALECT, "enable option", e))
        .transpose()?;
    state.validate = node
        .validate
        .as_deref()
        .map(|v| lookup(&VALIDATE, DIALECT, "validate option", v))
        .transpose()?;
    Ok(state)
}

fn lower_references(clause: &tree::ReferencesClause) -> Result<ForeignReference> {
    Ok(ForeignReference {
        schema: clause.table.schema.clone(),
        relation: clause.table.relation.clone(),
        columns: clause
            .columns
            .iter()
            .map(|c| ColumnReference::new(None, None, c))
            .collect(),
        user_variable: clause.table.user_variable.clone(),
        match_option: None,
        on_delete: if clause.on_delete.is_empty() {
            None
        } else {
            Some(lookup(&ON_DELETE, DIALECT, "reference action", &phrase(&clause.on_delete))?)
        },
        on_update: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expressions::Operator;
    use crate::statements::data_type::DataType;
    use crate::statements::select::SortDirection;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn column(def: tree::ColumnDefinition) -> ColumnDefinition {
        match OracleTableElementFactory
            .generate(&tree::TableElement::Column(Box::new(def)))
            .unwrap()
        {
            TableElement::Column(c) => *c,
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_orig_default_negative_literal() {
        let mut def = tree::ColumnDefinition::new("id", Some(tree::DataType::number("number", None, None)));
        def.attributes = vec![tree::ColumnAttribute::OrigDefault(tree::DefaultValue::Literal(
            tree::SignedLiteral::new(Some("-"), tree::Expr::literal("12")),
        ))];
        assert_eq!(
            column(def).attributes.unwrap().orig_default,
            Some(Expression::unary(Expression::constant("12"), Operator::Sub))
        );
    }

    #[test]
    fn test_inline_constraints_keep_name_and_state() {
        let mut def = tree::ColumnDefinition::new("c", Some(tree::DataType::character("varchar2", Some("64"))));
        def.visibility = Some("invisible".to_string());
        def.attributes = vec![
            tree::ColumnAttribute::Constraint {
                name: Some("nn".to_string()),
                kind: tree::InlineKind::Null { not: true },
                state: Some(tree::ConstraintStateNode {
                    rely: Some("RELY".to_string()),
                    enable: Some("DISABLE".to_string()),
                    validate: Some("NOVALIDATE".to_string()),
                    ..Default::default()
                }),
            },
            tree::ColumnAttribute::Default(tree::Expr::literal("'x'")),
            tree::ColumnAttribute::Id(" 16 ".to_string()),
        ];
        let lowered = column(def);
        assert_eq!(lowered.visible, Some(false));

        let attributes = lowered.attributes.unwrap();
        assert_eq!(
            attributes.constraints,
            vec![InLineConstraint::Plain {
                name: Some("nn".to_string()),
                nullable: Some(false),
                primary_key: false,
                unique: false,
                state: Some(ConstraintState {
                    rely: Some(true),
                    enable: Some(false),
                    validate: Some(false),
                    ..Default::default()
                }),
            }]
        );
        assert_eq!(attributes.default, Some(Expression::constant("'x'")));
        assert_eq!(attributes.id, Some(16));
    }

    #[test]
    fn test_inline_references_on_delete() {
        let mut def = tree::ColumnDefinition::new("pid", None);
        def.attributes = vec![tree::ColumnAttribute::Constraint {
            name: None,
            kind: tree::InlineKind::References(tree::ReferencesClause {
                table: tree::RelationName::new(Some("hr"), "parent"),
                columns: vec!["id".to_string()],
                on_delete: words("set null"),
            }),
            state: None,
        }];
        match &column(def).attributes.unwrap().constraints[0] {
            InLineConstraint::Foreign { reference, .. } => {
                assert_eq!(reference.schema.as_deref(), Some("hr"));
                assert_eq!(reference.columns, vec![ColumnReference::new(None, None, "id")]);
                assert_eq!(reference.on_delete, Some(OnOption::SetNull));
                assert_eq!(reference.on_update, None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_identity_column_sequence_options() {
        let mut def = tree::ColumnDefinition::new("id", Some(tree::DataType::number("number", None, None)));
        def.generated = Some(tree::GeneratedColumn {
            keywords: words("GENERATED BY DEFAULT ON NULL"),
            body: tree::GeneratedBody::Identity(Some(vec![
                tree::SequenceOptionNode::new("start with", Some("10")),
                tree::SequenceOptionNode::new("NOCACHE", None),
                tree::SequenceOptionNode::new("CYCLE", None),
            ])),
            r#virtual: false,
        });
        let generate = column(def).generate_option.unwrap();
        assert_eq!(generate.expression, None);
        assert_eq!(generate.generate_option.as_deref(), Some("GENERATED BY DEFAULT ON NULL"));
        assert_eq!(
            generate.sequence_options,
            Some(vec![
                SequenceOption::StartWith("10".to_string()),
                SequenceOption::NoCache,
                SequenceOption::Cycle,
            ])
        );
    }

    #[test]
    fn test_sequence_option_without_value_is_rejected() {
        let node = tree::SequenceOptionNode::new("INCREMENT BY", None);
        assert!(matches!(
            lower_sequence_option(&node).unwrap_err(),
            Error::Unrecognized { rule: "sequence option value", .. }
        ));
    }

    #[test]
    fn test_virtual_column() {
        let mut def = tree::ColumnDefinition::new("total", None);
        def.generated = Some(tree::GeneratedColumn {
            keywords: vec![],
            body: tree::GeneratedBody::Expr(tree::Expr::literal("1")),
            r#virtual: true,
        });
        let lowered = column(def);
        assert_eq!(lowered.data_type, None::<DataType>);
        let generate = lowered.generate_option.unwrap();
        assert_eq!(generate.expression, Some(Expression::constant("1")));
        assert_eq!(generate.kind, Some(GenerateType::Virtual));
        assert_eq!(generate.generate_option, None);
    }

    #[test]
    fn test_index_options() {
        let mut column = tree::SortColumnNode::column("a");
        column.direction = Some("desc".to_string());
        let index = tree::IndexDefinition {
            name: Some("idx".to_string()),
            columns: vec![column],
            options: vec![
                tree::IndexOption::Scope("LOCAL".to_string()),
                tree::IndexOption::Parallel(None),
                tree::IndexOption::Reverse,
                tree::IndexOption::Tablespace("ts".to_string()),
                tree::IndexOption::Using("hash".to_string()),
            ],
            partition: None,
        };
        let lowered = lower_index(&index).unwrap();
        assert_eq!(lowered.columns[0].direction, Some(SortDirection::Desc));
        let options = lowered.options.unwrap();
        assert_eq!(options.global, Some(false));
        assert_eq!(options.no_parallel, Some(true));
        assert_eq!(options.parallel, None);
        assert_eq!(options.reverse, Some(true));
        assert_eq!(options.tablespace.as_deref(), Some("ts"));
        assert_eq!(options.using_hash, Some(true));
    }

    #[test]
    fn test_primary_key_using_index() {
        let node = tree::ConstraintDefinition {
            name: Some("pk".to_string()),
            body: tree::ConstraintBody::PrimaryKey {
                columns: vec!["a".to_string(), "b".to_string()],
                index: Some(tree::IndexState {
                    using_index: true,
                    options: vec![tree::IndexOption::Scope("GLOBAL".to_string())],
                    partition: None,
                }),
            },
        };
        let lowered = lower_constraint(&node).unwrap();
        assert_eq!(lowered.name(), Some("pk"));
        assert!(lowered.is_primary_key());
        match &lowered {
            OutOfLineConstraint::PrimaryOrUnique { columns, .. } => {
                assert_eq!(columns, &vec![named_column("a"), named_column("b")]);
            }
            other => panic!("unexpected {:?}", other),
        }
        let state = lowered.state().unwrap();
        assert!(state.using_index_flag);
        assert_eq!(state.index_options.as_ref().unwrap().global, Some(true));
    }

    #[test]
    fn test_check_constraint_state() {
        let node = tree::ConstraintDefinition {
            name: None,
            body: tree::ConstraintBody::Check {
                expr: tree::Expr::binary(tree::Expr::path(&["a"]), ">", tree::Expr::literal("0")),
                state: Some(tree::ConstraintStateNode {
                    enable: Some("enable".to_string()),
                    validate: Some("validate".to_string()),
                    ..Default::default()
                }),
            },
        };
        let lowered = lower_constraint(&node).unwrap();
        assert_eq!(lowered.name(), None);
        let state = lowered.state().unwrap();
        assert_eq!(state.enable, Some(true));
        assert_eq!(state.validate, Some(true));
        assert_eq!(state.rely, None);
        assert!(!state.using_index_flag);
    }

    #[test]
    fn test_state_index_options_need_using_index() {
        let node = tree::ConstraintStateNode {
            using_index: Some(tree::IndexState {
                using_index: false,
                options: vec![tree::IndexOption::Reverse],
                partition: None,
            }),
            ..Default::default()
        };
        assert!(matches!(
            lower_constraint_state(&node).unwrap_err(),
            Error::IllegalCombination { .. }
        ));
    }

    #[test]
    fn test_unknown_on_delete_action() {
        let clause = tree::ReferencesClause {
            table: tree::RelationName::new(None, "p"),
            columns: vec![],
            on_delete: words("RESTRICT"),
        };
        assert!(matches!(
            lower_references(&clause).unwrap_err(),
            Error::Unrecognized { rule: "reference action", .. }
        ));
    }
}
