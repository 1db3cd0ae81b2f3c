//! roxmltree-based readers for the two document families.
//!
//! Shared attribute/child helpers live here; the per-document readers walk
//! each element's children in a single pass and build the typed model with
//! structured errors naming the offending element and attribute.

pub(crate) mod part;
pub(crate) mod sketch;

pub(crate) use crate::{FritzingError, Result};
use roxmltree::Node;

pub(crate) fn required_attr(
    node: &Node,
    attr: &'static str,
    element: &'static str,
) -> Result<String> {
    node.attribute(attr)
        .map(str::to_string)
        .ok_or(FritzingError::MissingAttribute { element, attr })
}

pub(crate) fn optional_attr(node: &Node, attr: &str) -> Option<String> {
    node.attribute(attr).map(str::to_string)
}

pub(crate) fn optional_f64(node: &Node, attr: &str) -> Result<Option<f64>> {
    node.attribute(attr)
        .map(|s| {
            s.parse().map_err(|_| {
                FritzingError::InvalidAttribute(format!("invalid number '{s}' for {attr}"))
            })
        })
        .transpose()
}

/// Numeric attribute that defaults rather than errors when absent
/// (geometry coordinates, transform entries).
pub(crate) fn f64_or(node: &Node, attr: &str, default: f64) -> Result<f64> {
    Ok(optional_f64(node, attr)?.unwrap_or(default))
}

pub(crate) fn optional_i64(node: &Node, attr: &str) -> Result<Option<i64>> {
    node.attribute(attr)
        .map(|s| {
            s.parse().map_err(|_| {
                FritzingError::InvalidAttribute(format!("invalid integer '{s}' for {attr}"))
            })
        })
        .transpose()
}

/// Boolean encoded as `"1"`/`"0"`. The encoding is per-field by format
/// convention, never a generic truthiness coercion.
pub(crate) fn optional_bool01(node: &Node, attr: &str) -> Result<Option<bool>> {
    match node.attribute(attr) {
        None => Ok(None),
        Some("1") => Ok(Some(true)),
        Some("0") => Ok(Some(false)),
        Some(other) => Err(FritzingError::InvalidAttribute(format!(
            "expected \"1\" or \"0\" for {attr}, got '{other}'"
        ))),
    }
}

/// Boolean encoded as `"true"`/`"false"`.
pub(crate) fn optional_booltf(node: &Node, attr: &str) -> Result<Option<bool>> {
    match node.attribute(attr) {
        None => Ok(None),
        Some("true") => Ok(Some(true)),
        Some("false") => Ok(Some(false)),
        Some(other) => Err(FritzingError::InvalidAttribute(format!(
            "expected \"true\" or \"false\" for {attr}, got '{other}'"
        ))),
    }
}

pub(crate) fn child<'a, 'i>(node: &Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

pub(crate) fn children<'a, 'i>(
    node: &Node<'a, 'i>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'i>> + 'a {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

/// Text content of a named child element. An element that exists but holds
/// no text yields `Some("")` so presence survives the round trip; a missing
/// element yields `None`.
pub(crate) fn child_text(node: &Node, name: &str) -> Option<String> {
    child(node, name).map(|n| element_text(&n))
}

/// Text is kept verbatim, whitespace included; the writers emit text inline
/// so a value survives `parse(serialize(..))` byte for byte.
pub(crate) fn element_text(node: &Node) -> String {
    node.text().unwrap_or("").to_string()
}

/// Checks the document root is `<module>` and returns it.
pub(crate) fn module_root<'a, 'i>(doc: &'a roxmltree::Document<'i>) -> Result<Node<'a, 'i>> {
    let root = doc.root_element();
    if root.tag_name().name() != "module" {
        return Err(FritzingError::UnexpectedRoot {
            expected: "module",
            found: root.tag_name().name().to_string(),
        });
    }
    Ok(root)
}
