//! HTML template dialect
//!
//! Identical to the plain dialect except substituted values are escaped so
//! they cannot inject markup. Literal template text is written through
//! unchanged.

use std::io::Write;

use serde_json::Value;

use crate::error::{ParseError, RenderError};

use super::template::Core;
use super::TreeTemplate;

/// A compiled template that escapes substituted values for HTML.
#[derive(Debug, Clone)]
pub struct HtmlTemplate {
    core: Core,
}

impl HtmlTemplate {
    pub(crate) fn from_core(core: Core) -> Self {
        Self { core }
    }
}

impl TreeTemplate for HtmlTemplate {
    fn name(&self) -> &str {
        self.core.name()
    }

    fn rename(&mut self, name: impl Into<String>) {
        self.core.rename(name.into());
    }

    fn extend(&mut self, content: &str) -> Result<(), ParseError> {
        self.core.extend(content)
    }

    fn render(&self, data: &Value, writer: &mut dyn Write) -> Result<(), RenderError> {
        self.core.render(data, writer, write_escaped)
    }
}

fn write_escaped(writer: &mut dyn Write, value: &str) -> std::io::Result<()> {
    let mut rest = value;
    while let Some(pos) = rest.find(&['&', '<', '>', '"', '\''][..]) {
        writer.write_all(rest[..pos].as_bytes())?;
        let replacement = match rest.as_bytes()[pos] {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            _ => "&#39;",
        };
        writer.write_all(replacement.as_bytes())?;
        rest = &rest[pos + 1..];
    }
    writer.write_all(rest.as_bytes())
}
