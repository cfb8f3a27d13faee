//! MySQL table elements: column definitions, out-of-line indexes and
//! constraints.
//!
//! Column attributes are folded left to right through
//! [`ColumnAttributes::merge`], so constraints keep source order and a
//! repeated scalar attribute keeps its last value.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::data_type::MySQLDataTypeFactory;
use super::expression::{lower_column_ref, lower_expr, lower_signed_literal, SORT_DIRECTIONS};
use super::partition::lower_partition;
use super::tree;
use crate::dialects::{lookup, number, phrase, DialectType, Factory};
use crate::error::{Error, Result};
use crate::expressions::{ColumnReference, Expression, FunctionParam};
use crate::statements::table_element::{
    ColumnAttributes, ColumnDefinition, ColumnGroupElement, ConstraintState, ForeignReference,
    GenerateOption, GenerateType, InLineConstraint, IndexOptions, Location, LocationType,
    MatchOption, OnOption, OutOfLineConstraint, OutOfLineIndex, SortColumn, TableElement,
};

const DIALECT: DialectType = DialectType::MySQL;

static LOCATIONS: Lazy<HashMap<&'static str, LocationType>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("FIRST", LocationType::First);
    m.insert("BEFORE", LocationType::Before);
    m.insert("AFTER", LocationType::After);
    m
});

static GENERATE_TYPES: Lazy<HashMap<&'static str, GenerateType>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("VIRTUAL", GenerateType::Virtual);
    m.insert("STORED", GenerateType::Stored);
    m
});

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

/// `GLOBAL` / `LOCAL` index scope
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

static MATCH_OPTIONS: Lazy<HashMap<&'static str, MatchOption>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("SIMPLE", MatchOption::Simple);
    m.insert("FULL", MatchOption::Full);
    m.insert("PARTIAL", MatchOption::Partial);
    m
});

static ON_OPTIONS: Lazy<HashMap<&'static str, OnOption>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("RESTRICT", OnOption::Restrict);
    m.insert("CASCADE", OnOption::Cascade);
    m.insert("SET NULL", OnOption::SetNull);
    m.insert("NO ACTION", OnOption::NoAction);
    m.insert("SET DEFAULT", OnOption::SetDefault);
    m
});

#[derive(Clone, Copy)]
enum ReferenceEvent {
    Delete,
    Update,
}

static REFERENCE_EVENTS: Lazy<HashMap<&'static str, ReferenceEvent>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("DELETE", ReferenceEvent::Delete);
    m.insert("UPDATE", ReferenceEvent::Update);
    m
});

pub struct MySQLTableElementFactory;

impl Factory for MySQLTableElementFactory {
    type Node = tree::TableElement;
    type Output = TableElement;

    fn dialect_type(&self) -> DialectType {
        DIALECT
    }

    fn generate(&self, node: &tree::TableElement) -> Result<TableElement> {
        log::trace!("lowering mysql table element");
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
    let data_type = node
        .data_type
        .as_ref()
        .map(|t| MySQLDataTypeFactory.generate(t))
        .transpose()?;
    let mut definition = ColumnDefinition::new(lower_column_ref(&node.column), data_type);

    if let Some(generated) = &node.generated {
        let mut option = GenerateOption::expression(lower_expr(&generated.expr)?);
        if !generated.keywords.is_empty() {
            option.generate_option = Some(phrase(&generated.keywords));
        }
        option.kind = generated
            .storage
            .as_deref()
            .map(|s| lookup(&GENERATE_TYPES, DIALECT, "generated column kind", s))
            .transpose()?;
        definition.generate_option = Some(option);
    }

    if !node.attributes.is_empty() {
        let mut attributes = ColumnAttributes::default();
        for attribute in &node.attributes {
            attributes.merge(lower_column_attribute(attribute)?);
        }
        definition.attributes = Some(attributes);
    }

    if let Some(location) = &node.location {
        definition.location = Some(Location {
            kind: lookup(&LOCATIONS, DIALECT, "column location", &location.keyword)?,
            column: location
                .column
                .as_deref()
                .map(|c| ColumnReference::new(None, None, c)),
        });
    }
    Ok(definition)
}

fn lower_column_attribute(attribute: &tree::ColumnAttribute) -> Result<ColumnAttributes> {
    let mut attributes = ColumnAttributes::default();
    match attribute {
        tree::ColumnAttribute::Null { not } => {
            attributes.constraints.push(InLineConstraint::nullable(!not))
        }
        // bare KEY is PRIMARY KEY
        tree::ColumnAttribute::PrimaryKey | tree::ColumnAttribute::Key => {
            attributes.constraints.push(InLineConstraint::primary_key())
        }
        tree::ColumnAttribute::Unique => attributes.constraints.push(InLineConstraint::unique()),
        tree::ColumnAttribute::Check { name, expr, state } => {
            attributes.constraints.push(InLineConstraint::Check {
                name: name.clone(),
                check: lower_expr(expr)?,
                state: state.map(check_state),
            })
        }
        tree::ColumnAttribute::Default(value) => attributes.default = Some(lower_default(value)?),
        tree::ColumnAttribute::OrigDefault(value) => {
            attributes.orig_default = Some(lower_default(value)?)
        }
        tree::ColumnAttribute::AutoIncrement => attributes.auto_increment = true,
        tree::ColumnAttribute::Comment(comment) => attributes.comment = Some(comment.clone()),
        tree::ColumnAttribute::OnUpdate(func) => attributes.on_update = Some(timestamp_func(func)),
        tree::ColumnAttribute::Id(id) => attributes.id = Some(number(DIALECT, "column id", id)?),
        tree::ColumnAttribute::Srid(srid) => attributes.srid = Some(number(DIALECT, "srid", srid)?),
        tree::ColumnAttribute::Collate(collation) => attributes.collation = Some(collation.clone()),
        tree::ColumnAttribute::SkipIndex(types) => attributes.skip_index = Some(types.clone()),
    }
    Ok(attributes)
}

fn check_state(state: tree::CheckState) -> ConstraintState {
    ConstraintState::enforced(!state.not)
}

fn lower_default(value: &tree::DefaultValue) -> Result<Expression> {
    match value {
        tree::DefaultValue::Now(func) => Ok(timestamp_func(func)),
        tree::DefaultValue::Literal(literal) => lower_signed_literal(literal),
    }
}

/// `CURRENT_TIMESTAMP(6)` -> FunctionCall("CURRENT_TIMESTAMP", [6])
fn timestamp_func(func: &tree::TimestampFunc) -> Expression {
    let params = func
        .precision
        .iter()
        .map(|p| FunctionParam::new(Expression::constant(p.clone())))
        .collect();
    Expression::function(func.name.clone(), params)
}

// ---------------------------------------------------------------------------
// Indexes
// ---------------------------------------------------------------------------

pub(crate) fn lower_index(node: &tree::IndexDefinition) -> Result<OutOfLineIndex> {
    let columns = lower_sort_columns(&node.columns)?;
    let mut index = OutOfLineIndex::new(node.name.as_deref(), columns);
    index.options = lower_index_options(node.algorithm.as_deref(), &node.options)?;
    match node.kind.as_deref().map(|k| k.trim().to_ascii_uppercase()) {
        Some(kind) if kind == "SPATIAL" => index.spatial = true,
        Some(kind) if kind == "FULLTEXT" => index.fulltext = true,
        Some(kind) => {
            return Err(Error::unrecognized(DIALECT, "index kind", kind));
        }
        None => {}
    }
    index.partition = node.partition.as_ref().map(lower_partition).transpose()?;
    index.column_groups = node.column_groups.as_deref().map(lower_column_groups);
    Ok(index)
}

fn lower_sort_columns(columns: &[tree::SortColumnNode]) -> Result<Vec<SortColumn>> {
    columns.iter().map(lower_sort_column).collect()
}

fn lower_sort_column(node: &tree::SortColumnNode) -> Result<SortColumn> {
    let mut column = match &node.key {
        tree::SortKeyNode::Column { column, length } => {
            let mut sort = SortColumn::new(Expression::Column(lower_column_ref(column)));
            sort.length = length.clone();
            sort
        }
        tree::SortKeyNode::Expr(expr) => SortColumn::new(lower_expr(expr)?),
    };
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

/// `USING algo` written before the column list and the option list after
/// it. Options written later win; the algorithm fills what they leave unset.
pub(crate) fn lower_index_options(
    algorithm: Option<&str>,
    options: &[tree::IndexOption],
) -> Result<Option<IndexOptions>> {
    if algorithm.is_none() && options.is_empty() {
        return Ok(None);
    }
    let mut earlier = IndexOptions::default();
    if let Some(algorithm) = algorithm {
        set_algorithm(&mut earlier, algorithm)?;
    }
    if options.is_empty() {
        return Ok(Some(earlier));
    }

    let mut lowered = IndexOptions::default();
    for option in options {
        match option {
            tree::IndexOption::Scope(scope) => {
                lowered.global = Some(lookup(&SCOPES, DIALECT, "index scope", scope)?)
            }
            tree::IndexOption::Using(algorithm) => set_algorithm(&mut lowered, algorithm)?,
            tree::IndexOption::Comment(comment) => lowered.comment = Some(comment.clone()),
            tree::IndexOption::WithParser(parser) => lowered.with_parser = Some(parser.clone()),
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
            tree::IndexOption::Ctxcat(columns) => {
                lowered.ctxcat = columns.iter().map(lower_column_ref).collect()
            }
            tree::IndexOption::WithRowId => lowered.with_row_id = Some(true),
            tree::IndexOption::Visibility(visibility) => {
                lowered.visible = Some(lookup(&VISIBILITY, DIALECT, "index visibility", visibility)?)
            }
            tree::IndexOption::NoParallel => lowered.no_parallel = Some(true),
            tree::IndexOption::Parallel(degree) => {
                lowered.parallel = Some(number(DIALECT, "parallel degree", degree)?)
            }
        }
    }
    lowered.inherit_algorithm(&earlier);
    Ok(Some(lowered))
}

fn set_algorithm(options: &mut IndexOptions, algorithm: &str) -> Result<()> {
    match lookup(&ALGORITHMS, DIALECT, "index algorithm", algorithm)? {
        Algorithm::BTree => options.using_btree = Some(true),
        Algorithm::Hash => options.using_hash = Some(true),
    }
    Ok(())
}

pub(crate) fn lower_column_groups(groups: &[tree::ColumnGroupNode]) -> Vec<ColumnGroupElement> {
    groups
        .iter()
        .map(|group| match group {
            tree::ColumnGroupNode::AllColumns => ColumnGroupElement::AllColumns,
            tree::ColumnGroupNode::EachColumn => ColumnGroupElement::EachColumn,
            tree::ColumnGroupNode::Custom { name, columns } => ColumnGroupElement::Custom {
                name: name.clone(),
                columns: columns.clone(),
            },
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Constraints
// ---------------------------------------------------------------------------

pub(crate) fn lower_constraint(node: &tree::ConstraintDefinition) -> Result<OutOfLineConstraint> {
    let mut constraint = match &node.body {
        tree::ConstraintBody::PrimaryKey {
            index_name,
            algorithm,
            columns,
            options,
        } => OutOfLineConstraint::PrimaryOrUnique {
            name: None,
            index_name: index_name.clone(),
            primary: true,
            columns: columns.iter().map(|c| named_column(c)).collect(),
            state: index_state(algorithm.as_deref(), options)?,
            column_groups: None,
        },
        tree::ConstraintBody::Unique {
            index_name,
            algorithm,
            columns,
            options,
            partition,
            column_groups,
        } => {
            let mut state = index_state(algorithm.as_deref(), options)?;
            if let Some(partition) = partition {
                state.get_or_insert_with(ConstraintState::default).partition =
                    Some(lower_partition(partition)?);
            }
            OutOfLineConstraint::PrimaryOrUnique {
                name: None,
                index_name: index_name.clone(),
                primary: false,
                columns: lower_sort_columns(columns)?,
                state,
                column_groups: column_groups.as_deref().map(lower_column_groups),
            }
        }
        tree::ConstraintBody::ForeignKey {
            index_name,
            columns,
            references,
        } => OutOfLineConstraint::Foreign {
            name: None,
            index_name: index_name.clone(),
            columns: columns.iter().map(|c| named_column(c)).collect(),
            reference: lower_references(references)?,
            state: None,
        },
        tree::ConstraintBody::Check { expr, state } => OutOfLineConstraint::Check {
            name: None,
            check: lower_expr(expr)?,
            state: state.map(check_state),
        },
    };
    constraint.set_name(node.name.clone());
    Ok(constraint)
}

fn index_state(algorithm: Option<&str>, options: &[tree::IndexOption]) -> Result<Option<ConstraintState>> {
    Ok(lower_index_options(algorithm, options)?.map(|index_options| ConstraintState {
        index_options: Some(index_options),
        ..Default::default()
    }))
}

fn lower_references(clause: &tree::ReferencesClause) -> Result<ForeignReference> {
    let mut reference = ForeignReference {
        schema: clause.table.schema.clone(),
        relation: clause.table.relation.clone(),
        columns: clause
            .columns
            .iter()
            .map(|c| ColumnReference::new(None, None, c))
            .collect(),
        user_variable: clause.table.user_variable.clone(),
        match_option: clause
            .match_action
            .as_deref()
            .map(|m| lookup(&MATCH_OPTIONS, DIALECT, "match option", m))
            .transpose()?,
        on_delete: None,
        on_update: None,
    };
    for action in &clause.actions {
        let on = lookup(&ON_OPTIONS, DIALECT, "reference action", &phrase(&action.action))?;
        match lookup(&REFERENCE_EVENTS, DIALECT, "reference event", &action.event)? {
            ReferenceEvent::Delete => reference.on_delete = Some(on),
            ReferenceEvent::Update => reference.on_update = Some(on),
        }
    }
    Ok(reference)
}
