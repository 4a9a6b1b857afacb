//! Lexer for template source using logos
//!
//! Template source is split into top-level segments (literal text, comments,
//! actions) by [`scan`], then the interior of each action is tokenized with a
//! logos lexer by [`lex_action`].

use logos::Logos;

use crate::error::{ParseError, Span};

const COMMENT_OPEN: &str = "{{/*";
const COMMENT_CLOSE: &str = "*/}}";
const ACTION_OPEN: &str = "{{";
const ACTION_CLOSE: &str = "}}";

/// Tokens inside a `{{ ... }}` action
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub(crate) enum Token {
    #[token("block")]
    Block,
    #[token("define")]
    Define,
    #[token("end")]
    End,

    #[token(".")]
    Dot,

    // Identifiers must come after keywords
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| unescape(lex.slice()))]
    Str(String),

    #[regex(r"-?[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Num(f64),
}

/// A top-level piece of template source
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Segment {
    /// Literal text between actions, written through unchanged
    Text(String),
    /// Interior of a `{{/* ... */}}` comment
    Comment(String),
    /// Interior of a `{{ ... }}` action, with the interior's span
    Action(String, Span),
}

/// Split source into text, comment, and action segments.
pub(crate) fn scan(source: &str) -> Result<Vec<Segment>, ParseError> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = source[cursor..].find(ACTION_OPEN) {
        let open = cursor + offset;
        if open > cursor {
            segments.push(Segment::Text(source[cursor..open].to_string()));
        }

        if source[open..].starts_with(COMMENT_OPEN) {
            let start = open + COMMENT_OPEN.len();
            let close = source[start..].find(COMMENT_CLOSE).ok_or_else(|| {
                ParseError::UnclosedComment { span: open..source.len() }
            })?;
            segments.push(Segment::Comment(source[start..start + close].to_string()));
            cursor = start + close + COMMENT_CLOSE.len();
        } else {
            let start = open + ACTION_OPEN.len();
            let close = source[start..].find(ACTION_CLOSE).ok_or_else(|| {
                ParseError::UnclosedAction { span: open..source.len() }
            })?;
            segments.push(Segment::Action(
                source[start..start + close].to_string(),
                start..start + close,
            ));
            cursor = start + close + ACTION_CLOSE.len();
        }
    }

    if cursor < source.len() {
        segments.push(Segment::Text(source[cursor..].to_string()));
    }
    Ok(segments)
}

/// Tokenize an action interior. `offset` is the interior's position in the
/// full source, so returned spans point into the original text.
pub(crate) fn lex_action(interior: &str, offset: usize) -> Result<Vec<(Token, Span)>, ParseError> {
    let mut tokens = Vec::new();
    for (token, span) in Token::lexer(interior).spanned() {
        let span = span.start + offset..span.end + offset;
        match token {
            Ok(token) => tokens.push((token, span)),
            Err(()) => return Err(ParseError::InvalidToken { span }),
        }
    }
    Ok(tokens)
}

fn unescape(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(ch);
        }
    }
    out
}
