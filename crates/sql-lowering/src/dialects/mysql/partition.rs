//! MySQL `PARTITION BY` clauses.

use super::expression::{lower_all, lower_column_ref, lower_expr};
use super::tree;
use crate::dialects::{number, phrase, DialectType, Factory};
use crate::error::Result;
use crate::expressions::{ColumnReference, Expression};
use crate::statements::partition::{
    ColumnPartition, HashPartition, ListPartition, Partition, PartitionBound, PartitionElement,
    PartitionOptions, RangePartition, SubPartitionElement, SubPartitionOption,
};

const DIALECT: DialectType = DialectType::MySQL;

pub struct MySQLPartitionFactory;

impl Factory for MySQLPartitionFactory {
    type Node = tree::PartitionOption;
    type Output = Partition;

    fn dialect_type(&self) -> DialectType {
        DIALECT
    }

    fn generate(&self, node: &tree::PartitionOption) -> Result<Partition> {
        log::trace!("lowering mysql partition option");
        lower_partition(node)
    }
}

pub(crate) fn lower_partition(node: &tree::PartitionOption) -> Result<Partition> {
    match node {
        tree::PartitionOption::Hash(scheme) => lower_hash(scheme).map(Partition::Hash),
        tree::PartitionOption::Key(scheme) => lower_hash(scheme).map(Partition::Key),
        tree::PartitionOption::Range(scheme) => {
            let (partitions_num, auto) = match &scheme.count {
                Some(tree::PartitionCount::Num(n)) => (Some(partitions_num(n)?), false),
                Some(tree::PartitionCount::Auto) => (None, true),
                None => (None, false),
            };
            Ok(Partition::Range(RangePartition {
                columns: lower_all(&scheme.columns)?,
                elements: lower_elements(&scheme.elements)?,
                sub_option: scheme.sub.as_ref().map(lower_sub_option).transpose()?,
                partitions_num,
                columns_flag: scheme.columns_keyword,
                auto,
                // PARTITION SIZE 'auto' keeps its quotes
                partition_size: scheme.size.as_deref().map(Expression::constant),
                interval: None,
                options: None,
            }))
        }
        tree::PartitionOption::List(scheme) => Ok(Partition::List(ListPartition {
            columns: lower_all(&scheme.columns)?,
            elements: lower_elements(&scheme.elements)?,
            sub_option: scheme.sub.as_ref().map(lower_sub_option).transpose()?,
            partitions_num: scheme.count.as_deref().map(partitions_num).transpose()?,
            columns_flag: scheme.columns_keyword,
            options: None,
        })),
        tree::PartitionOption::Column(groups) => {
            let mut columns = Vec::new();
            flatten_groups(groups, &mut columns);
            Ok(Partition::Column(ColumnPartition { columns }))
        }
    }
}

fn lower_hash(scheme: &tree::HashScheme) -> Result<HashPartition> {
    Ok(HashPartition {
        columns: lower_all(&scheme.columns)?,
        elements: lower_elements(&scheme.elements)?,
        sub_option: scheme.sub.as_ref().map(lower_sub_option).transpose()?,
        partitions_num: scheme.count.as_deref().map(partitions_num).transpose()?,
        options: None,
    })
}

fn partitions_num(text: &str) -> Result<u32> {
    number(DIALECT, "partition count", text)
}

fn flatten_groups(groups: &[tree::ColumnGroup], out: &mut Vec<ColumnReference>) {
    for group in groups {
        match group {
            tree::ColumnGroup::Column(column) => out.push(lower_column_ref(column)),
            tree::ColumnGroup::Group(inner) => flatten_groups(inner, out),
        }
    }
}

fn lower_sub_option(sub: &tree::SubPartitionSpec) -> Result<SubPartitionOption> {
    let mut option = SubPartitionOption::new(lower_all(&sub.columns)?, phrase(&sub.kind).to_lowercase());
    option.templates = sub
        .template
        .as_ref()
        .map(|elements| elements.iter().map(lower_sub_element).collect::<Result<Vec<_>>>())
        .transpose()?;
    option.sub_partition_num = sub
        .count
        .as_deref()
        .map(|n| number(DIALECT, "subpartition count", n))
        .transpose()?;
    Ok(option)
}

fn lower_elements(elements: &Option<Vec<tree::PartitionElementNode>>) -> Result<Option<Vec<PartitionElement>>> {
    elements
        .as_ref()
        .map(|elements| elements.iter().map(lower_element).collect())
        .transpose()
}

pub(crate) fn lower_element(element: &tree::PartitionElementNode) -> Result<PartitionElement> {
    let mut lowered = PartitionElement::new(Some(&element.name.relation), lower_bound(&element.bound)?);
    lowered.schema = element.name.schema.clone();
    lowered.user_variable = element.name.user_variable.clone();
    lowered.options = lower_options(&element.options)?;
    lowered.sub_elements = element
        .subpartitions
        .as_ref()
        .map(|subs| subs.iter().map(lower_sub_element).collect::<Result<Vec<_>>>())
        .transpose()?;
    Ok(lowered)
}

fn lower_sub_element(element: &tree::SubPartitionElementNode) -> Result<SubPartitionElement> {
    let mut lowered = SubPartitionElement::new(&element.name.relation, lower_bound(&element.bound)?);
    lowered.schema = element.name.schema.clone();
    lowered.user_variable = element.name.user_variable.clone();
    lowered.options = lower_options(&element.options)?;
    Ok(lowered)
}

fn lower_bound(bound: &tree::BoundNode) -> Result<PartitionBound> {
    Ok(match bound {
        tree::BoundNode::None => PartitionBound::Hash,
        tree::BoundNode::LessThan(values) => PartitionBound::Range(lower_values(values)?),
        tree::BoundNode::In(values) => PartitionBound::List(lower_values(values)?),
    })
}

fn lower_values(values: &[tree::PartitionValue]) -> Result<Vec<Expression>> {
    values
        .iter()
        .map(|value| match value {
            tree::PartitionValue::Expr(expr) => lower_expr(expr),
            // MAXVALUE / DEFAULT as written
            tree::PartitionValue::MaxValue(text) | tree::PartitionValue::Default(text) => {
                Ok(Expression::constant(text.clone()))
            }
        })
        .collect()
}

fn lower_options(attrs: &[tree::PartitionAttr]) -> Result<Option<PartitionOptions>> {
    if attrs.is_empty() {
        return Ok(None);
    }
    let mut options = PartitionOptions::default();
    for attr in attrs {
        match attr {
            tree::PartitionAttr::Engine(engine) => options.engine = Some(engine.clone()),
            tree::PartitionAttr::Id(id) => options.id = Some(number(DIALECT, "partition id", id)?),
            tree::PartitionAttr::Tablespace(name) => options.tablespace = Some(name.clone()),
        }
    }
    Ok(Some(options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn columns(names: &[&str]) -> Vec<tree::Expr> {
        names.iter().map(|n| tree::Expr::column(None, n)).collect()
    }

    #[test]
    fn test_auto_range_partitioning() {
        let node = tree::PartitionOption::Range(tree::RangeScheme {
            columns_keyword: true,
            columns: columns(&["a", "b"]),
            count: Some(tree::PartitionCount::Auto),
            size: Some("'auto'".to_string()),
            ..Default::default()
        });
        let expected = Partition::Range(RangePartition {
            columns: vec![
                Expression::column(None, None, "a"),
                Expression::column(None, None, "b"),
            ],
            columns_flag: true,
            auto: true,
            partition_size: Some(Expression::constant("'auto'")),
            ..Default::default()
        });
        assert_eq!(MySQLPartitionFactory.generate(&node).unwrap(), expected);
    }

    #[test]
    fn test_hash_count_without_elements() {
        let node = tree::PartitionOption::Hash(tree::HashScheme {
            columns: columns(&["id"]),
            count: Some("8".to_string()),
            ..Default::default()
        });
        match MySQLPartitionFactory.generate(&node).unwrap() {
            Partition::Hash(hash) => {
                assert_eq!(hash.partitions_num, Some(8));
                assert!(hash.elements.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_range_elements_with_template() {
        let mut p0 = tree::PartitionElementNode::new(
            "p0",
            tree::BoundNode::LessThan(vec![tree::PartitionValue::Expr(tree::Expr::literal("100"))]),
        );
        p0.options = vec![
            tree::PartitionAttr::Engine("InnoDB".to_string()),
            tree::PartitionAttr::Id("7".to_string()),
        ];
        let p1 = tree::PartitionElementNode::new(
            "p1",
            tree::BoundNode::LessThan(vec![tree::PartitionValue::MaxValue("MAXVALUE".to_string())]),
        );
        let node = tree::PartitionOption::Range(tree::RangeScheme {
            columns: columns(&["c1"]),
            sub: Some(tree::SubPartitionSpec {
                kind: vec!["KEY".to_string()],
                columns: columns(&["c2"]),
                template: Some(vec![tree::SubPartitionElementNode {
                    name: tree::RelationName::new(None, "sp0"),
                    bound: tree::BoundNode::None,
                    options: vec![],
                }]),
                count: None,
            }),
            elements: Some(vec![p0, p1]),
            ..Default::default()
        });

        let lowered = MySQLPartitionFactory.generate(&node).unwrap();
        let sub = lowered.sub_option().unwrap();
        assert_eq!(sub.kind, "key");
        assert_eq!(
            sub.templates,
            Some(vec![SubPartitionElement::new("sp0", PartitionBound::Hash)])
        );

        let elements = lowered.elements().unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(
            elements[0].options,
            Some(PartitionOptions {
                engine: Some("InnoDB".to_string()),
                id: Some(7),
                ..Default::default()
            })
        );
        assert_eq!(
            elements[1].bound,
            PartitionBound::Range(vec![Expression::constant("MAXVALUE")])
        );
    }

    #[test]
    fn test_column_groups_flatten() {
        let node = tree::PartitionOption::Column(vec![
            tree::ColumnGroup::Column(tree::ColumnRef::new(None, "a")),
            tree::ColumnGroup::Group(vec![
                tree::ColumnGroup::Column(tree::ColumnRef::new(None, "b")),
                tree::ColumnGroup::Column(tree::ColumnRef::new(None, "c")),
            ]),
            tree::ColumnGroup::Column(tree::ColumnRef::new(None, "d")),
        ]);
        let expected = Partition::Column(ColumnPartition {
            columns: ["a", "b", "c", "d"]
                .iter()
                .map(|c| ColumnReference::new(None, None, c))
                .collect(),
        });
        assert_eq!(MySQLPartitionFactory.generate(&node).unwrap(), expected);
    }

    #[test]
    fn test_bad_partition_count() {
        let node = tree::PartitionOption::Key(tree::HashScheme {
            count: Some("many".to_string()),
            ..Default::default()
        });
        assert!(matches!(
            MySQLPartitionFactory.generate(&node).unwrap_err(),
            Error::Unrecognized { rule: "partition count", .. }
        ));
    }
}
