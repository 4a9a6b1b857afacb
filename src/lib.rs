//! template-tree - inheritance for independently-authored template fragments
//!
//! A fragment is a named template source. A fragment that starts with the
//! header comment `{{/* extends parent-name */}}` inherits every block the
//! parent defines and may override any of them; fragments without a header
//! inherit from a caller-supplied (or default) root template. Resolution
//! orders fragments parent-first, compiles each by cloning its parent's
//! compiled template and parsing the fragment's own content into the clone,
//! and returns a read-only [`Tree`] that renders by name.
//!
//! Two dialects exist, selected when building the root: [`TextTemplate`]
//! substitutes values verbatim, [`HtmlTemplate`] escapes them for markup.
//!
//! # Example
//!
//! ```rust
//! use template_tree::{parse_text, Fragment};
//!
//! let fragments = vec![
//!     Fragment::new(
//!         "base.tmpl",
//!         "Header\n{{ block \"body\" }}Body{{ end }}\nFooter",
//!     ),
//!     Fragment::new(
//!         "a.tmpl",
//!         "{{/* extends base.tmpl */}}{{ define \"body\" }}Body A{{ end }}",
//!     ),
//! ];
//!
//! let tree = parse_text(fragments, None).unwrap();
//!
//! let mut out = Vec::new();
//! tree.render("a.tmpl", &(), &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "Header\nBody A\nFooter");
//! ```

pub mod engine;
pub mod error;
pub mod tree;

pub use engine::{
    HtmlTemplate, TemplateBuilder, TextTemplate, TreeTemplate, DEFAULT_ROOT_NAME,
};
pub use error::{ParseError, RenderError, Span};
pub use tree::{
    parse_html, parse_text, resolve, Fragment, HtmlTree, TextTree, Tree, TreeError, EXTENDS_TAG,
};
