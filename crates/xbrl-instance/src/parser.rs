//! Parse a single filing instance.
//!
//! An instance document is scanned once, in document order: direct
//! children of the root whose `id` starts with `"c"` are contexts,
//! children whose `id` starts with `"f"` are facts. Facts carry a
//! `contextRef` back to a context declared earlier in the document.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use roxmltree::{Document, Node};
use tracing::debug;

use xbrl_model::{Axis, AxisKind, Context, Entity, Fact, Period};

use crate::error::{ParseError, Result};

const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// One parsed filing instance.
#[derive(Debug, Clone)]
pub struct Instance {
    /// Contexts in document order. Ids are unique within an instance.
    pub contexts: Vec<Context>,
    /// Facts grouped by context id. Every context id is present, with an
    /// empty list when no fact references it.
    pub facts: BTreeMap<String, Vec<Fact>>,
    /// Taxonomy URL from the instance's `schemaRef` element.
    pub taxonomy_url: String,
}

impl Instance {
    /// Facts attached to one context.
    pub fn facts_for(&self, context_id: &str) -> &[Fact] {
        self.facts
            .get(context_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn fact_count(&self) -> usize {
        self.facts.values().map(Vec::len).sum()
    }
}

/// Parse the instance document at `path`.
pub fn parse(path: &Path) -> Result<Instance> {
    let xml = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let instance = parse_str(&xml)?;
    debug!(
        instance = %path.display(),
        context_count = instance.contexts.len(),
        fact_count = instance.fact_count(),
        taxonomy_url = %instance.taxonomy_url,
        "instance parsed"
    );
    Ok(instance)
}

/// Parse an instance document from an in-memory string.
pub fn parse_str(xml: &str) -> Result<Instance> {
    let document = Document::parse(xml)?;
    let root = document.root_element();

    let taxonomy_url = root
        .children()
        .filter(Node::is_element)
        .find(|node| node.tag_name().name() == "schemaRef")
        .and_then(|node| node.attribute((XLINK_NS, "href")))
        .ok_or(ParseError::MissingSchemaRef)?
        .to_string();

    let mut contexts: Vec<Context> = Vec::new();
    let mut facts: BTreeMap<String, Vec<Fact>> = BTreeMap::new();

    for child in root.children().filter(Node::is_element) {
        let Some(id) = child.attribute("id") else {
            continue;
        };

        if id.starts_with('c') {
            let context = parse_context(id, child)?;
            facts.insert(context.id.clone(), Vec::new());
            contexts.push(context);
        } else if id.starts_with('f') {
            // Valueless facts are discarded before the context lookup,
            // so they never fail on a dangling reference.
            let Some(value) = fact_value(child) else {
                continue;
            };
            let name = child.tag_name().name().to_string();
            let context_id = child
                .attribute("contextRef")
                .ok_or_else(|| ParseError::MissingContextRef {
                    fact_id: id.to_string(),
                })?
                .to_string();
            let list = facts
                .get_mut(&context_id)
                .ok_or_else(|| ParseError::UnknownContext {
                    name: name.clone(),
                    context_id: context_id.clone(),
                })?;
            list.push(Fact {
                name,
                context_id,
                value,
            });
        }
    }

    Ok(Instance {
        contexts,
        facts,
        taxonomy_url,
    })
}

fn fact_value(node: Node<'_, '_>) -> Option<String> {
    let text = node.text()?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn parse_context(id: &str, node: Node<'_, '_>) -> Result<Context> {
    let entity_node = child_element(node, "entity").ok_or(ParseError::MissingElement {
        context_id: id.to_string(),
        element: "entity",
    })?;
    let period_node = child_element(node, "period").ok_or(ParseError::MissingElement {
        context_id: id.to_string(),
        element: "period",
    })?;

    Ok(Context {
        id: id.to_string(),
        entity: parse_entity(id, entity_node)?,
        period: parse_period(id, period_node)?,
    })
}

fn parse_entity(context_id: &str, node: Node<'_, '_>) -> Result<Entity> {
    let identifier = child_element(node, "identifier")
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or(ParseError::MissingElement {
            context_id: context_id.to_string(),
            element: "identifier",
        })?
        .to_string();

    // Dimension members live under the optional segment node.
    let mut dimensions = Vec::new();
    if let Some(segment) = child_element(node, "segment") {
        for member in segment.children().filter(Node::is_element) {
            if let Some(axis) = parse_axis(context_id, member)? {
                dimensions.push(axis);
            }
        }
    }

    Ok(Entity {
        identifier,
        dimensions,
    })
}

fn parse_axis(context_id: &str, node: Node<'_, '_>) -> Result<Option<Axis>> {
    let kind = match node.tag_name().name() {
        "explicitMember" => AxisKind::Explicit,
        "typedMember" => AxisKind::Typed,
        _ => return Ok(None),
    };

    let dimension = node
        .attribute("dimension")
        .ok_or_else(|| ParseError::MissingDimension {
            context_id: context_id.to_string(),
        })?;
    let name = strip_prefix(dimension).to_string();

    let value = match kind {
        // An explicit member's value is the element text.
        AxisKind::Explicit => node.text().map(str::trim).unwrap_or_default().to_string(),
        // A typed member carries its value in a single child element.
        AxisKind::Typed => node
            .children()
            .find(Node::is_element)
            .and_then(|child| child.text())
            .map(str::trim)
            .ok_or_else(|| ParseError::MissingTypedValue {
                context_id: context_id.to_string(),
                dimension: name.clone(),
            })?
            .to_string(),
    };

    Ok(Some(Axis { name, value, kind }))
}

fn parse_period(context_id: &str, node: Node<'_, '_>) -> Result<Period> {
    if let Some(instant) = child_element(node, "instant") {
        return Ok(Period::instant(parse_date(context_id, instant)?));
    }

    let start = child_element(node, "startDate").ok_or(ParseError::MissingElement {
        context_id: context_id.to_string(),
        element: "startDate",
    })?;
    let end = child_element(node, "endDate").ok_or(ParseError::MissingElement {
        context_id: context_id.to_string(),
        element: "endDate",
    })?;
    Ok(Period::duration(
        parse_date(context_id, start)?,
        parse_date(context_id, end)?,
    ))
}

fn parse_date(context_id: &str, node: Node<'_, '_>) -> Result<NaiveDate> {
    let text = node.text().map(str::trim).unwrap_or_default();
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|source| ParseError::InvalidDate {
        context_id: context_id.to_string(),
        value: text.to_string(),
        source,
    })
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .filter(Node::is_element)
        .find(|child| child.tag_name().name() == name)
}

fn strip_prefix(name: &str) -> &str {
    match name.split_once(':') {
        Some((_, local)) => local,
        None => name,
    }
}
