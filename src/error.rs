//! Error types for template parsing and rendering

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Errors produced while compiling template content
#[derive(Error, Debug)]
pub enum ParseError {
    /// A `{{/* ... */}}` comment with no closing delimiter
    #[error("unterminated comment at {span:?}")]
    UnclosedComment { span: Span },

    /// A `{{ ... }}` action with no closing delimiter
    #[error("unterminated action at {span:?}")]
    UnclosedAction { span: Span },

    /// A block or define opened but never closed with `end`
    #[error("block {name:?} is never closed")]
    UnclosedBlock { name: String, span: Span },

    /// An `end` action with no open block
    #[error("unexpected end at {span:?}")]
    UnexpectedEnd { span: Span },

    /// An action with no content between the delimiters
    #[error("empty action at {span:?}")]
    EmptyAction { span: Span },

    /// An action whose token sequence does not form a valid statement
    #[error("invalid action at {span:?}: {message}")]
    InvalidAction { span: Span, message: String },

    /// A character sequence the lexer does not recognize
    #[error("unrecognized token at {span:?}")]
    InvalidToken { span: Span },
}

impl ParseError {
    /// Source location of the error
    pub fn span(&self) -> &Span {
        match self {
            ParseError::UnclosedComment { span }
            | ParseError::UnclosedAction { span }
            | ParseError::UnclosedBlock { span, .. }
            | ParseError::UnexpectedEnd { span }
            | ParseError::EmptyAction { span }
            | ParseError::InvalidAction { span, .. }
            | ParseError::InvalidToken { span } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let span = self.span().clone();
        let message = self.to_string();

        let mut buf = Vec::new();
        Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(&message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }
}

/// Errors produced while executing a compiled template
#[derive(Error, Debug)]
pub enum RenderError {
    /// A block reference with no definition in the block table
    #[error("undefined block {name:?}")]
    UndefinedBlock { name: String },

    /// A key path that does not exist in the render data
    #[error("no value at {path:?}")]
    UndefinedValue { path: String },

    /// A helper invocation with no matching binding
    #[error("unknown helper {name:?}")]
    UnknownHelper { name: String },

    /// A helper binding that returned an error
    #[error("helper {name:?} failed: {message}")]
    Helper { name: String, message: String },

    /// Block references nested past the depth limit
    #[error("block recursion limit exceeded while rendering {name:?}")]
    RecursionLimit { name: String },

    /// The output writer failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
