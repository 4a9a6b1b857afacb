//! Template dialects and the capability the resolver drives them through
//!
//! Two compiled-template types exist: [`TextTemplate`] substitutes values
//! verbatim, [`HtmlTemplate`] escapes them for markup. Both speak the same
//! source syntax:
//!
//! ```text
//! {{/* a comment; no runtime effect */}}
//! {{ . }}                      the whole render datum
//! {{ .user.name }}             a key path into the render datum
//! {{ shout .word "!" }}        a helper invocation
//! {{ block "body" }}default{{ end }}    define a block and render it here
//! {{ define "body" }}override{{ end }}  define or override a block
//! ```
//!
//! The inheritance resolver only ever sees the [`TreeTemplate`] trait and
//! never branches on which dialect it is driving.

mod ast;
mod html;
mod lexer;
mod parser;
mod template;
mod text;

pub use html::HtmlTemplate;
pub use template::Helper;
pub use text::TextTemplate;

use std::io::Write;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ParseError, RenderError};

use template::Core;

/// Name given to a root template when the caller does not pick one.
///
/// The brackets keep it from colliding with real fragment names; fragments
/// using the active root's name are rejected during resolution.
pub const DEFAULT_ROOT_NAME: &str = "[template-tree:root]";

/// The operations the inheritance resolver needs from a compiled template.
///
/// `Clone` must produce an independent copy sharing no mutable state with the
/// original, including the block table and helper bindings; `extend` mutates
/// only the receiver, never the template it was cloned from.
pub trait TreeTemplate: Clone {
    /// The template's identity.
    fn name(&self) -> &str;

    /// Re-label the template. The resolver renames each clone after the
    /// fragment it is compiling, so artifacts carry their own names.
    fn rename(&mut self, name: impl Into<String>);

    /// Parse `content` into the template, adding or overriding its blocks.
    fn extend(&mut self, content: &str) -> Result<(), ParseError>;

    /// Execute the template against `data`, writing output to `writer`.
    fn render(&self, data: &Value, writer: &mut dyn Write) -> Result<(), RenderError>;
}

/// Builds root templates: an optional name, helper bindings, then a dialect.
///
/// ```text
/// let root = TemplateBuilder::new()
///     .name("site")
///     .helper("shout", |args| { ... })
///     .text();
/// ```
#[derive(Default, Clone)]
pub struct TemplateBuilder {
    name: Option<String>,
    helpers: IndexMap<String, Helper>,
}

impl TemplateBuilder {
    /// Create a builder with no name and no helpers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the root template instead of using [`DEFAULT_ROOT_NAME`].
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Register a helper callable from template actions. Helpers are inherited
    /// by every template that extends this root.
    pub fn helper<F>(mut self, name: impl Into<String>, helper: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.helpers.insert(name.into(), Arc::new(helper));
        self
    }

    /// Finish as a plain-text root template.
    pub fn text(self) -> TextTemplate {
        TextTemplate::from_core(self.core())
    }

    /// Finish as an HTML root template.
    pub fn html(self) -> HtmlTemplate {
        HtmlTemplate::from_core(self.core())
    }

    fn core(self) -> Core {
        let name = self.name.unwrap_or_else(|| DEFAULT_ROOT_NAME.to_string());
        Core::new(name, self.helpers)
    }
}
