//! Inheritance-aware template loading
//!
//! Fragments are independent template sources that may declare a parent with
//! a leading `{{/* extends name */}}` header. Resolution links fragments into
//! a forest, compiles parents before children by cloning the parent's
//! compiled template and extending the clone with the child's content, and
//! returns a read-only [`Tree`] mapping every fragment name to its compiled
//! template. A child therefore inherits every block its ancestors define and
//! may override any of them, and siblings never observe each other's
//! overrides.
//!
//! Resolution is a synchronous, in-memory batch: it either produces a
//! complete tree or fails with the first error, never a partial result. A
//! finished tree is immutable and safe to render from concurrently. Do not
//! feed the same root template into two resolutions running at once; give
//! each run its own root (cheap via [`TemplateBuilder`]) or run them in
//! sequence.
//!
//! [`TemplateBuilder`]: crate::engine::TemplateBuilder

mod error;
mod graph;
mod registry;
mod resolver;

pub use error::TreeError;
pub use graph::EXTENDS_TAG;
pub use registry::Fragment;
pub use resolver::resolve;

use std::io::Write;

use indexmap::IndexMap;
use serde::Serialize;

use crate::engine::{HtmlTemplate, TemplateBuilder, TextTemplate, TreeTemplate};

/// Compiled templates indexed by fragment name. Read-only once built.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    templates: IndexMap<String, T>,
}

/// A tree of plain-text templates
pub type TextTree = Tree<TextTemplate>;

/// A tree of HTML templates
pub type HtmlTree = Tree<HtmlTemplate>;

impl<T: TreeTemplate> Tree<T> {
    pub(crate) fn new(templates: IndexMap<String, T>) -> Self {
        Self { templates }
    }

    /// Look up a compiled template by fragment name.
    pub fn get(&self, name: &str) -> Result<&T, TreeError> {
        self.templates
            .get(name)
            .ok_or_else(|| TreeError::NotFound { name: name.to_string() })
    }

    /// Render the named template with `data` into `writer`.
    ///
    /// Pass `&()` for templates that take no data. Errors from one render
    /// leave the tree untouched for every other name.
    pub fn render<D: Serialize>(
        &self,
        name: &str,
        data: &D,
        writer: &mut dyn Write,
    ) -> Result<(), TreeError> {
        let template = self.get(name)?;
        let value = serde_json::to_value(data)?;
        template.render(&value, writer)?;
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Fragment names in resolution order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(|name| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Parse fragments into a tree of plain-text templates. With no `root`, a
/// fresh default-named root with no helpers is used.
pub fn parse_text(
    fragments: impl IntoIterator<Item = Fragment>,
    root: Option<TextTemplate>,
) -> Result<TextTree, TreeError> {
    let root = root.unwrap_or_else(|| TemplateBuilder::new().text());
    resolver::resolve(fragments, &root)
}

/// Parse fragments into a tree of HTML templates. With no `root`, a fresh
/// default-named root with no helpers is used.
pub fn parse_html(
    fragments: impl IntoIterator<Item = Fragment>,
    root: Option<HtmlTemplate>,
) -> Result<HtmlTree, TreeError> {
    let root = root.unwrap_or_else(|| TemplateBuilder::new().html());
    resolver::resolve(fragments, &root)
}
