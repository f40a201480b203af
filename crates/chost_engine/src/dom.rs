//! In-place edits on a parsed `scraper::Html` through its `ego_tree` arena.
//!
//! Lookups collect `NodeId`s first so the tree is free to be borrowed mutably.

use ego_tree::NodeId;
use scraper::node::{Node, Text};
use scraper::{ElementRef, Html, Selector};

/// Ids of every element under `scope` matching `selector`, in document order.
pub(crate) fn select_ids(doc: &Html, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
    doc.tree
        .get(scope)
        .and_then(ElementRef::wrap)
        .map(|root| root.select(selector).map(|el| el.id()).collect())
        .unwrap_or_default()
}

pub(crate) fn first_in_document(doc: &Html, selector: &Selector) -> Option<NodeId> {
    doc.select(selector).next().map(|el| el.id())
}

pub(crate) fn element(doc: &Html, id: NodeId) -> Option<ElementRef<'_>> {
    doc.tree.get(id).and_then(ElementRef::wrap)
}

pub(crate) fn text_of(doc: &Html, id: NodeId) -> String {
    element(doc, id)
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default()
}

/// A fresh attribute-less element node, taken from a parsed one-element fragment.
fn blank_element(tag: &str) -> Option<Node> {
    let fragment = Html::parse_fragment(&format!("<{tag}></{tag}>"));
    let selector = Selector::parse(tag).ok()?;
    let element = fragment.select(&selector).next()?;
    Some(Node::Element(element.value().clone()))
}

/// Puts a new detached `<tag>` into the arena and returns its id.
pub(crate) fn create_element(doc: &mut Html, tag: &str) -> Option<NodeId> {
    let node = blank_element(tag)?;
    Some(doc.tree.orphan(node).id())
}

pub(crate) fn append_text(doc: &mut Html, parent: NodeId, text: &str) {
    if let Some(mut node) = doc.tree.get_mut(parent) {
        node.append(Node::Text(Text {
            text: tendril::StrTendril::from_slice(text),
        }));
    }
}

/// Moves every child of `from` to the end of `to`, keeping their order.
pub(crate) fn move_children(doc: &mut Html, from: NodeId, to: NodeId) {
    if let Some(mut target) = doc.tree.get_mut(to) {
        target.reparent_from_id_append(from);
    }
}

/// Swaps `old` for the detached node `new` at the same position.
pub(crate) fn replace(doc: &mut Html, old: NodeId, new: NodeId) {
    if let Some(mut node) = doc.tree.get_mut(old) {
        if node.parent().is_none() {
            return;
        }
        node.insert_id_before(new);
        node.detach();
    }
}

pub(crate) fn remove(doc: &mut Html, id: NodeId) {
    if let Some(mut node) = doc.tree.get_mut(id) {
        node.detach();
    }
}
