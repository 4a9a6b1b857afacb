//! Topological resolution of linked fragments into compiled templates

use std::collections::VecDeque;

use indexmap::IndexMap;

use crate::engine::TreeTemplate;

use super::error::TreeError;
use super::registry::{self, Fragment};
use super::{graph, Tree};

/// Resolve fragments against a root template, producing a compiled tree.
///
/// Fragments with no extends header clone the root; the rest clone their
/// parent's compiled template once it exists, so a parent always compiles
/// before its children and siblings never observe each other's overrides.
/// A ready queue seeded and replenished in input order makes the resolution
/// order deterministic, though any topological order would yield the same
/// tree.
pub fn resolve<T: TreeTemplate>(
    fragments: impl IntoIterator<Item = Fragment>,
    root: &T,
) -> Result<Tree<T>, TreeError> {
    let mut nodes = registry::build(fragments, root.name())?;
    graph::link(&mut nodes)?;

    let mut children: IndexMap<String, Vec<String>> = IndexMap::new();
    let mut ready = VecDeque::new();
    for node in nodes.values() {
        match &node.parent {
            Some(parent) => children
                .entry(parent.clone())
                .or_default()
                .push(node.name.clone()),
            None => ready.push_back(node.name.clone()),
        }
    }

    let mut compiled: IndexMap<String, T> = IndexMap::new();
    while let Some(name) = ready.pop_front() {
        let node = &nodes[&name];
        let base = match &node.parent {
            Some(parent) => &compiled[parent.as_str()],
            None => root,
        };

        let mut template = base.clone();
        template.rename(node.name.clone());
        if let Err(source) = template.extend(&node.content) {
            return Err(TreeError::Parse { name: node.name.clone(), source });
        }

        compiled.insert(node.name.clone(), template);
        if let Some(next) = children.get(&name) {
            ready.extend(next.iter().cloned());
        }
    }

    // Whatever the queue never reached sits on a cycle or downstream of one
    if compiled.len() != nodes.len() {
        let mut names: Vec<String> = nodes
            .keys()
            .filter(|name| !compiled.contains_key(name.as_str()))
            .cloned()
            .collect();
        names.sort();
        return Err(TreeError::Cycle { names });
    }

    Ok(Tree::new(compiled))
}
