//! Oracle `PARTITION BY` clauses, including interval range partitioning and
//! physical attributes on schemes and elements.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::expression::{lower_all, lower_expr};
use super::tree;
use crate::dialects::{lookup, number, phrase, DialectType, Factory};
use crate::error::Result;
use crate::expressions::Expression;
use crate::statements::partition::{
    HashPartition, ListPartition, Partition, PartitionBound, PartitionElement, PartitionOptions,
    RangePartition, SubPartitionElement, SubPartitionOption,
};

const DIALECT: DialectType = DialectType::Oracle;

#[derive(Debug, Clone, Copy)]
enum Physical {
    PctFree,
    PctUsed,
    IniTrans,
    MaxTrans,
}

static PHYSICAL_ATTRIBUTES: Lazy<HashMap<&'static str, Physical>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("PCTFREE", Physical::PctFree);
    m.insert("PCTUSED", Physical::PctUsed);
    m.insert("INITRANS", Physical::IniTrans);
    m.insert("MAXTRANS", Physical::MaxTrans);
    m
});

pub struct OraclePartitionFactory;

impl Factory for OraclePartitionFactory {
    type Node = tree::PartitionOption;
    type Output = Partition;

    fn dialect_type(&self) -> DialectType {
        DIALECT
    }

    fn generate(&self, node: &tree::PartitionOption) -> Result<Partition> {
        log::trace!("lowering oracle partition option");
        lower_partition(node)
    }
}

pub(crate) fn lower_partition(node: &tree::PartitionOption) -> Result<Partition> {
    match node {
        tree::PartitionOption::Hash(scheme) => Ok(Partition::Hash(HashPartition {
            columns: lower_all(&scheme.columns)?,
            elements: lower_elements(&scheme.elements)?,
            sub_option: scheme.sub.as_ref().map(lower_sub_option).transpose()?,
            partitions_num: scheme
                .count
                .as_deref()
                .map(|n| number(DIALECT, "partition count", n))
                .transpose()?,
            options: lower_options(&scheme.attributes)?,
        })),
        tree::PartitionOption::Range(scheme) => Ok(Partition::Range(RangePartition {
            columns: lower_all(&scheme.columns)?,
            elements: lower_elements(&scheme.elements)?,
            sub_option: scheme.sub.as_ref().map(lower_sub_option).transpose()?,
            interval: scheme.interval.as_ref().map(lower_expr).transpose()?,
            options: lower_options(&scheme.attributes)?,
            ..Default::default()
        })),
        tree::PartitionOption::List(scheme) => Ok(Partition::List(ListPartition {
            columns: lower_all(&scheme.columns)?,
            elements: lower_elements(&scheme.elements)?,
            sub_option: scheme.sub.as_ref().map(lower_sub_option).transpose()?,
            options: lower_options(&scheme.attributes)?,
            ..Default::default()
        })),
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
    let mut lowered = PartitionElement::new(
        element.name.as_ref().map(|n| n.relation.as_str()),
        lower_bound(&element.bound)?,
    );
    if let Some(name) = &element.name {
        lowered.schema = name.schema.clone();
        lowered.user_variable = name.user_variable.clone();
    }
    lowered.options = lower_options(&element.attributes)?;
    lowered.sub_elements = element
        .subpartitions
        .as_ref()
        .map(|subs| subs.iter().map(lower_sub_element).collect::<Result<Vec<_>>>())
        .transpose()?;
    Ok(lowered)
}

/// Target of `SPLIT PARTITION ... INTO (...)`. A bare `PARTITION p` is a
/// special bound rather than a hash element.
pub(crate) fn lower_split_element(element: &tree::PartitionElementNode) -> Result<PartitionElement> {
    let mut lowered = lower_element(element)?;
    if lowered.bound == PartitionBound::Hash {
        lowered.bound = PartitionBound::Special;
    }
    Ok(lowered)
}

pub(crate) fn lower_sub_element(element: &tree::SubPartitionElementNode) -> Result<SubPartitionElement> {
    let mut lowered = SubPartitionElement::new(&element.name.relation, lower_bound(&element.bound)?);
    lowered.schema = element.name.schema.clone();
    lowered.user_variable = element.name.user_variable.clone();
    lowered.options = lower_options(&element.attributes)?;
    Ok(lowered)
}

fn lower_bound(bound: &tree::BoundNode) -> Result<PartitionBound> {
    Ok(match bound {
        tree::BoundNode::None => PartitionBound::Hash,
        tree::BoundNode::LessThan(values) => PartitionBound::Range(lower_values(values)?),
        tree::BoundNode::Values(values) => PartitionBound::List(lower_values(values)?),
    })
}

fn lower_values(values: &[tree::PartitionValue]) -> Result<Vec<Expression>> {
    values
        .iter()
        .map(|value| match value {
            tree::PartitionValue::Expr(expr) => lower_expr(expr),
            tree::PartitionValue::MaxValue(text) | tree::PartitionValue::Default(text) => {
                Ok(Expression::constant(text.clone()))
            }
        })
        .collect()
}

/// `None` when no attribute was written; a repeated attribute keeps the last value
pub(crate) fn lower_options(attrs: &[tree::PartitionAttr]) -> Result<Option<PartitionOptions>> {
    if attrs.is_empty() {
        return Ok(None);
    }
    let mut options = PartitionOptions::default();
    for attr in attrs {
        match attr {
            tree::PartitionAttr::Id(id) => options.id = Some(number(DIALECT, "partition id", id)?),
            tree::PartitionAttr::Tablespace(name) => options.tablespace = Some(name.clone()),
            tree::PartitionAttr::Compress(tokens) => {
                options.compress = Some(phrase(tokens));
                options.no_compress = false;
            }
            tree::PartitionAttr::NoCompress => {
                options.compress = None;
                options.no_compress = true;
            }
            tree::PartitionAttr::Physical { key, value } => {
                let value = number(DIALECT, "physical attribute", value)?;
                match lookup(&PHYSICAL_ATTRIBUTES, DIALECT, "physical attribute", key)? {
                    Physical::PctFree => options.pct_free = Some(value),
                    Physical::PctUsed => options.pct_used = Some(value),
                    Physical::IniTrans => options.ini_trans = Some(value),
                    Physical::MaxTrans => options.max_trans = Some(value),
                }
            }
            tree::PartitionAttr::Storage(items) => options.storage = items.clone(),
        }
    }
    Ok(Some(options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn less_than(value: &str) -> tree::BoundNode {
        tree::BoundNode::LessThan(vec![tree::PartitionValue::Expr(tree::Expr::literal(value))])
    }

    #[test]
    fn test_interval_range_partition() {
        let node = tree::PartitionOption::Range(tree::RangeScheme {
            columns: vec![tree::Expr::path(&["created"])],
            interval: Some(tree::Expr::call("numtoyminterval", vec![
                tree::Expr::literal("1"),
                tree::Expr::literal("'MONTH'"),
            ])),
            elements: Some(vec![tree::PartitionElementNode::new(Some("p0"), less_than("100"))]),
            ..Default::default()
        });
        match OraclePartitionFactory.generate(&node).unwrap() {
            Partition::Range(range) => {
                assert_eq!(range.columns, vec![Expression::relation("created")]);
                assert_eq!(
                    range.interval.as_ref().and_then(|i| i.as_function_call()).map(|f| f.name.as_str()),
                    Some("numtoyminterval")
                );
                assert!(!range.auto);
                assert_eq!(range.elements.unwrap()[0].name.as_deref(), Some("p0"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unnamed_list_element_with_attributes() {
        let mut element = tree::PartitionElementNode::new(
            None,
            tree::BoundNode::Values(vec![tree::PartitionValue::Default("DEFAULT".to_string())]),
        );
        element.attributes = vec![
            tree::PartitionAttr::Id("12".to_string()),
            tree::PartitionAttr::Physical {
                key: "pctfree".to_string(),
                value: "10".to_string(),
            },
            tree::PartitionAttr::Storage(vec!["next 12".to_string(), "initial 15".to_string()]),
            tree::PartitionAttr::Compress(vec!["for".to_string(), "oltp".to_string()]),
            tree::PartitionAttr::NoCompress,
        ];
        let node = tree::PartitionOption::List(tree::ListScheme {
            columns: vec![tree::Expr::path(&["region"])],
            elements: Some(vec![element]),
            ..Default::default()
        });
        let lowered = OraclePartitionFactory.generate(&node).unwrap();
        let element = &lowered.elements().unwrap()[0];
        assert_eq!(element.name, None);
        assert_eq!(element.bound, PartitionBound::List(vec![Expression::constant("DEFAULT")]));
        assert_eq!(
            element.options,
            Some(PartitionOptions {
                id: Some(12),
                pct_free: Some(10),
                storage: vec!["next 12".to_string(), "initial 15".to_string()],
                compress: None,
                no_compress: true,
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_hash_partitions_with_scheme_attributes() {
        let node = tree::PartitionOption::Hash(tree::HashScheme {
            columns: vec![tree::Expr::path(&["id"])],
            count: Some("4".to_string()),
            attributes: vec![tree::PartitionAttr::Tablespace("ts1".to_string())],
            ..Default::default()
        });
        match OraclePartitionFactory.generate(&node).unwrap() {
            Partition::Hash(hash) => {
                assert_eq!(hash.partitions_num, Some(4));
                assert_eq!(hash.options.unwrap().tablespace.as_deref(), Some("ts1"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_subpartition_template() {
        let node = tree::PartitionOption::Range(tree::RangeScheme {
            columns: vec![tree::Expr::path(&["a"])],
            sub: Some(tree::SubPartitionSpec {
                kind: vec!["HASH".to_string()],
                columns: vec![tree::Expr::path(&["b"])],
                template: Some(vec![
                    tree::SubPartitionElementNode::new("sp0", tree::BoundNode::None),
                    tree::SubPartitionElementNode::new("sp1", tree::BoundNode::None),
                ]),
                count: None,
            }),
            ..Default::default()
        });
        let lowered = OraclePartitionFactory.generate(&node).unwrap();
        let sub = lowered.sub_option().unwrap();
        assert_eq!(sub.kind, "hash");
        assert_eq!(
            sub.templates,
            Some(vec![
                SubPartitionElement::new("sp0", PartitionBound::Hash),
                SubPartitionElement::new("sp1", PartitionBound::Hash),
            ])
        );
    }

    #[test]
    fn test_split_target_without_bound_is_special() {
        let mut target = tree::PartitionElementNode::new(Some("p9"), tree::BoundNode::None);
        target.attributes = vec![tree::PartitionAttr::Id("9".to_string())];
        let lowered = lower_split_element(&target).unwrap();
        assert_eq!(lowered.bound, PartitionBound::Special);
        assert_eq!(lowered.options.unwrap().id, Some(9));
    }

    #[test]
    fn test_unknown_physical_attribute() {
        let mut element = tree::PartitionElementNode::new(Some("p0"), less_than("1"));
        element.attributes = vec![tree::PartitionAttr::Physical {
            key: "PCTWHATEVER".to_string(),
            value: "1".to_string(),
        }];
        assert!(matches!(
            lower_element(&element).unwrap_err(),
            Error::Unrecognized { rule: "physical attribute", .. }
        ));
    }
}
