//! Parser for template source
//!
//! Turns scanned segments into a [`ParsedSource`]: the top-level body program
//! plus every `block`/`define` body, with nesting tracked by a frame stack.

use crate::error::{ParseError, Span};

use super::ast::{Expr, ParsedSource, Program, Step};
use super::lexer::{lex_action, scan, Segment, Token};

#[derive(Debug, Clone, Copy, PartialEq)]
enum BlockKind {
    /// `{{ block "name" }}`: defines and renders in place
    Block,
    /// `{{ define "name" }}`: defines only
    Define,
}

/// An open `block`/`define` whose `end` has not been seen yet
struct OpenBlock {
    name: String,
    kind: BlockKind,
    span: Span,
    steps: Program,
}

enum Action {
    Open { name: String, kind: BlockKind },
    End,
    Expr(Expr),
}

/// Parse template source into a body program and block table.
pub(crate) fn parse(source: &str) -> Result<ParsedSource, ParseError> {
    let mut parsed = ParsedSource::default();
    let mut stack: Vec<OpenBlock> = Vec::new();

    for segment in scan(source)? {
        match segment {
            Segment::Text(text) => {
                let significant = !text.trim().is_empty();
                match stack.last_mut() {
                    Some(open) => open.steps.push(Step::Text(text)),
                    None => {
                        parsed.has_body |= significant;
                        parsed.body.push(Step::Text(text));
                    }
                }
            }
            // Comments carry no runtime effect
            Segment::Comment(_) => {}
            Segment::Action(interior, span) => {
                let tokens = lex_action(&interior, span.start)?;
                match parse_action(&tokens, &span)? {
                    Action::Open { name, kind } => {
                        stack.push(OpenBlock { name, kind, span, steps: Vec::new() });
                    }
                    Action::End => {
                        let open = stack
                            .pop()
                            .ok_or(ParseError::UnexpectedEnd { span: span.clone() })?;
                        parsed.blocks.push((open.name.clone(), open.steps));
                        if open.kind == BlockKind::Block {
                            let step = Step::Block(open.name);
                            match stack.last_mut() {
                                Some(outer) => outer.steps.push(step),
                                None => {
                                    parsed.has_body = true;
                                    parsed.body.push(step);
                                }
                            }
                        }
                    }
                    Action::Expr(expr) => {
                        let step = Step::Expr(expr);
                        match stack.last_mut() {
                            Some(open) => open.steps.push(step),
                            None => {
                                parsed.has_body = true;
                                parsed.body.push(step);
                            }
                        }
                    }
                }
            }
        }
    }

    if let Some(open) = stack.pop() {
        return Err(ParseError::UnclosedBlock { name: open.name, span: open.span });
    }
    Ok(parsed)
}

fn parse_action(tokens: &[(Token, Span)], span: &Span) -> Result<Action, ParseError> {
    match tokens.first() {
        None => Err(ParseError::EmptyAction { span: span.clone() }),
        Some((Token::Block, _)) | Some((Token::Define, _)) => {
            let kind = match &tokens[0].0 {
                Token::Block => BlockKind::Block,
                _ => BlockKind::Define,
            };
            match tokens {
                [_, (Token::Str(name), _)] => Ok(Action::Open { name: name.clone(), kind }),
                _ => Err(ParseError::InvalidAction {
                    span: span.clone(),
                    message: "expected a quoted block name".to_string(),
                }),
            }
        }
        Some((Token::End, _)) => {
            if tokens.len() == 1 {
                Ok(Action::End)
            } else {
                Err(ParseError::InvalidAction {
                    span: span.clone(),
                    message: "end takes no arguments".to_string(),
                })
            }
        }
        _ => parse_expr(tokens, span).map(Action::Expr),
    }
}

fn parse_expr(tokens: &[(Token, Span)], span: &Span) -> Result<Expr, ParseError> {
    match tokens.first() {
        Some((Token::Ident(name), _)) => {
            let mut i = 1;
            let mut args = Vec::new();
            while i < tokens.len() {
                args.push(parse_primary(tokens, &mut i, span)?);
            }
            Ok(Expr::Call { name: name.clone(), args })
        }
        _ => {
            let mut i = 0;
            let expr = parse_primary(tokens, &mut i, span)?;
            if i < tokens.len() {
                return Err(ParseError::InvalidAction {
                    span: span.clone(),
                    message: "unexpected tokens after expression".to_string(),
                });
            }
            Ok(expr)
        }
    }
}

fn parse_primary(tokens: &[(Token, Span)], i: &mut usize, span: &Span) -> Result<Expr, ParseError> {
    match tokens.get(*i) {
        Some((Token::Dot, _)) => {
            *i += 1;
            let mut path = Vec::new();
            if let Some((Token::Ident(first), _)) = tokens.get(*i) {
                path.push(first.clone());
                *i += 1;
                while matches!(tokens.get(*i), Some((Token::Dot, _))) {
                    match tokens.get(*i + 1) {
                        Some((Token::Ident(seg), _)) => {
                            path.push(seg.clone());
                            *i += 2;
                        }
                        _ => {
                            return Err(ParseError::InvalidAction {
                                span: span.clone(),
                                message: "expected a field name after '.'".to_string(),
                            })
                        }
                    }
                }
            }
            if path.is_empty() {
                Ok(Expr::This)
            } else {
                Ok(Expr::Path(path))
            }
        }
        Some((Token::Str(s), _)) => {
            *i += 1;
            Ok(Expr::Str(s.clone()))
        }
        Some((Token::Num(n), _)) => {
            *i += 1;
            Ok(Expr::Num(*n))
        }
        _ => Err(ParseError::InvalidAction {
            span: span.clone(),
            message: "expected a value, key path, or helper invocation".to_string(),
        }),
    }
}
