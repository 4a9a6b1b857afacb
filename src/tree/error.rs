//! Errors produced while resolving fragment inheritance

use thiserror::Error;

use crate::error::{ParseError, RenderError};

/// Errors from resolving fragments into a tree, or from tree operations.
///
/// Every resolution-time variant aborts the whole run; no partial tree is
/// exposed. `NotFound`, `Render`, and `Data` are per-call rendering failures
/// and leave the tree valid for other names.
#[derive(Error, Debug)]
pub enum TreeError {
    /// Two fragments share a name
    #[error("duplicate template name {name:?}")]
    DuplicateName { name: String },

    /// A fragment uses the root template's name
    #[error("template name {name:?} is reserved for the root template")]
    ReservedName { name: String },

    /// An extends header is present but unusable
    #[error("template {name:?} has a malformed extends header")]
    MalformedHeader { name: String },

    /// A fragment extends a name absent from the fragment set
    #[error("template {child:?} extends unknown template {parent:?}")]
    UnknownParent { child: String, parent: String },

    /// Fragments whose parent references form a loop, plus everything
    /// depending on them
    #[error("inheritance cycle in templates [{}]", quote_names(.names))]
    Cycle { names: Vec<String> },

    /// A fragment's content was rejected by the template compiler
    #[error("template {name:?}: {source}")]
    Parse {
        /// The fragment whose content failed to parse
        name: String,
        #[source]
        source: ParseError,
    },

    /// Render requested for a name the tree does not contain
    #[error("no template {name:?}")]
    NotFound { name: String },

    /// The template failed while rendering
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The render data could not be serialized
    #[error("render data is not serializable: {0}")]
    Data(#[from] serde_json::Error),
}

fn quote_names(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("{name:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}
