//! Links fragments to their declared parents
//!
//! A fragment declares its parent with a comment header at the very start of
//! its content:
//!
//! ```text
//! {{/* extends base.tmpl */}}
//! ```
//!
//! The comment is ordinary template syntax, so it survives compilation as a
//! no-op. Content not starting with a comment, or starting with a comment
//! whose first word is not the extends tag, declares no parent. Callers that
//! want leading whitespace tolerated must trim it themselves.

use indexmap::IndexMap;

use super::error::TreeError;
use super::registry::Node;

/// Tag word that marks a leading comment as an inheritance declaration.
pub const EXTENDS_TAG: &str = "extends";

const COMMENT_OPEN: &str = "{{/*";
const COMMENT_CLOSE: &str = "*/}}";

/// Outcome of inspecting a fragment's content for an extends header
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Header<'a> {
    /// No parent declared
    None,
    /// A well-formed header naming the parent
    Extends(&'a str),
    /// An extends-tagged comment that is unterminated or names nothing
    Malformed,
}

/// Resolve each node's extends header against the working set, recording the
/// parent relation. Fails on malformed headers and on parents absent from the
/// set.
pub(crate) fn link(nodes: &mut IndexMap<String, Node>) -> Result<(), TreeError> {
    let mut parents = Vec::new();
    for node in nodes.values() {
        match parse_header(&node.content) {
            Header::None => {}
            Header::Malformed => {
                return Err(TreeError::MalformedHeader { name: node.name.clone() });
            }
            Header::Extends(parent) => {
                if !nodes.contains_key(parent) {
                    return Err(TreeError::UnknownParent {
                        child: node.name.clone(),
                        parent: parent.to_string(),
                    });
                }
                parents.push((node.name.clone(), parent.to_string()));
            }
        }
    }
    for (child, parent) in parents {
        if let Some(node) = nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
    }
    Ok(())
}

/// Inspect content for a leading extends header. The header must start at the
/// first byte.
pub(crate) fn parse_header(content: &str) -> Header<'_> {
    let Some(rest) = content.strip_prefix(COMMENT_OPEN) else {
        return Header::None;
    };
    let Some(close) = rest.find(COMMENT_CLOSE) else {
        // An unterminated comment is only this component's problem when it
        // carries the extends tag; otherwise the compiler reports it.
        if rest.trim_start().starts_with(EXTENDS_TAG) {
            return Header::Malformed;
        }
        return Header::None;
    };

    let interior = rest[..close].trim();
    let Some(arg) = interior.strip_prefix(EXTENDS_TAG) else {
        return Header::None;
    };
    if !arg.is_empty() && !arg.starts_with(char::is_whitespace) {
        // A longer word that merely begins with the tag
        return Header::None;
    }

    let parent = arg.trim();
    if parent.is_empty() {
        Header::Malformed
    } else {
        Header::Extends(parent)
    }
}
