//! Plain-text template dialect

use std::io::Write;

use serde_json::Value;

use crate::error::{ParseError, RenderError};

use super::template::Core;
use super::TreeTemplate;

/// A compiled template that substitutes values without escaping.
#[derive(Debug, Clone)]
pub struct TextTemplate {
    core: Core,
}

impl TextTemplate {
    pub(crate) fn from_core(core: Core) -> Self {
        Self { core }
    }
}

impl TreeTemplate for TextTemplate {
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
        self.core.render(data, writer, write_raw)
    }
}

fn write_raw(writer: &mut dyn Write, value: &str) -> std::io::Result<()> {
    writer.write_all(value.as_bytes())
}
