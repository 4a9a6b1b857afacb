//! Shared compiled-template core
//!
//! Both dialects wrap a [`Core`]: a name, a body program, a block table, and
//! helper bindings. Cloning a core yields an independent copy; extending it
//! parses new content in, merging block definitions and replacing the body
//! only when the new content has top-level material of its own.

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ParseError, RenderError};

use super::ast::{Expr, Program, Step};
use super::parser;

/// Helper function callable from actions as `{{ name arg ... }}`
pub type Helper = Arc<dyn Fn(&[Value]) -> Result<Value, String> + Send + Sync>;

/// Escape applied to substituted values; literal text bypasses it
pub(crate) type Escape = fn(&mut dyn Write, &str) -> std::io::Result<()>;

/// Guard against self-referential block tables
const MAX_BLOCK_DEPTH: usize = 100;

#[derive(Clone)]
pub(crate) struct Core {
    name: String,
    body: Program,
    blocks: IndexMap<String, Program>,
    helpers: IndexMap<String, Helper>,
}

impl Core {
    pub fn new(name: String, helpers: IndexMap<String, Helper>) -> Self {
        Self {
            name,
            body: Program::new(),
            blocks: IndexMap::new(),
            helpers,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: String) {
        self.name = name;
    }

    /// Parse `content` into this template. Block definitions merge into the
    /// block table (last definition wins); the body is replaced only when the
    /// new content's top level is more than whitespace and comments.
    pub fn extend(&mut self, content: &str) -> Result<(), ParseError> {
        let parsed = parser::parse(content)?;
        for (name, program) in parsed.blocks {
            self.blocks.insert(name, program);
        }
        if parsed.has_body {
            self.body = parsed.body;
        }
        Ok(())
    }

    pub fn render(
        &self,
        data: &Value,
        writer: &mut dyn Write,
        escape: Escape,
    ) -> Result<(), RenderError> {
        self.render_program(&self.body, data, writer, escape, 0)
    }

    fn render_program(
        &self,
        program: &Program,
        data: &Value,
        writer: &mut dyn Write,
        escape: Escape,
        depth: usize,
    ) -> Result<(), RenderError> {
        if depth > MAX_BLOCK_DEPTH {
            return Err(RenderError::RecursionLimit { name: self.name.clone() });
        }
        for step in program {
            match step {
                Step::Text(text) => writer.write_all(text.as_bytes())?,
                Step::Expr(expr) => {
                    let value = self.eval(expr, data)?;
                    escape(writer, &stringify(&value))?;
                }
                Step::Block(name) => {
                    let block = self.blocks.get(name).ok_or_else(|| {
                        RenderError::UndefinedBlock { name: name.clone() }
                    })?;
                    self.render_program(block, data, writer, escape, depth + 1)?;
                }
            }
        }
        Ok(())
    }

    fn eval(&self, expr: &Expr, data: &Value) -> Result<Value, RenderError> {
        match expr {
            Expr::This => Ok(data.clone()),
            Expr::Path(path) => lookup(data, path).cloned().ok_or_else(|| {
                RenderError::UndefinedValue { path: format!(".{}", path.join(".")) }
            }),
            Expr::Str(s) => Ok(Value::String(s.clone())),
            Expr::Num(n) => Ok(Value::from(*n)),
            Expr::Call { name, args } => {
                let helper = self
                    .helpers
                    .get(name)
                    .ok_or_else(|| RenderError::UnknownHelper { name: name.clone() })?;
                let values = args
                    .iter()
                    .map(|arg| self.eval(arg, data))
                    .collect::<Result<Vec<_>, _>>()?;
                helper(&values).map_err(|message| RenderError::Helper {
                    name: name.clone(),
                    message,
                })
            }
        }
    }
}

impl fmt::Debug for Core {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Core")
            .field("name", &self.name)
            .field("body", &self.body)
            .field("blocks", &self.blocks.keys().collect::<Vec<_>>())
            .field("helpers", &self.helpers.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn lookup<'a>(data: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut current = data;
    for key in path {
        current = current.get(key.as_str())?;
    }
    Some(current)
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
