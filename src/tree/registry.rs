//! Fragment intake and the working set of unresolved nodes

use indexmap::IndexMap;

use super::error::TreeError;

/// A single named, unparsed template source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Identifies the fragment; children name it in their extends header and
    /// callers name it when rendering
    pub name: String,
    /// Unparsed template source
    pub content: String,
}

impl Fragment {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// One fragment in the working set, with its declared parent once linked
#[derive(Debug)]
pub(crate) struct Node {
    pub name: String,
    pub content: String,
    pub parent: Option<String>,
}

/// Index the fragment sequence by name, preserving input order. Rejects
/// duplicate names and names that would shadow the root template.
pub(crate) fn build(
    fragments: impl IntoIterator<Item = Fragment>,
    root_name: &str,
) -> Result<IndexMap<String, Node>, TreeError> {
    let mut nodes = IndexMap::new();
    for fragment in fragments {
        if fragment.name == root_name {
            return Err(TreeError::ReservedName { name: fragment.name });
        }
        let node = Node {
            name: fragment.name.clone(),
            content: fragment.content,
            parent: None,
        };
        if nodes.insert(fragment.name.clone(), node).is_some() {
            return Err(TreeError::DuplicateName { name: fragment.name });
        }
    }
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_preserves_input_order() {
        let nodes = build(
            vec![
                Fragment::new("b.tmpl", ""),
                Fragment::new("a.tmpl", ""),
                Fragment::new("c.tmpl", ""),
            ],
            "[root]",
        )
        .unwrap();
        let names: Vec<_> = nodes.keys().cloned().collect();
        assert_eq!(names, vec!["b.tmpl", "a.tmpl", "c.tmpl"]);
    }

    #[test]
    fn test_build_rejects_duplicates() {
        let err = build(
            vec![Fragment::new("a.tmpl", "one"), Fragment::new("a.tmpl", "two")],
            "[root]",
        )
        .unwrap_err();
        assert!(matches!(err, TreeError::DuplicateName { name } if name == "a.tmpl"));
    }

    #[test]
    fn test_build_rejects_root_name() {
        let err = build(vec![Fragment::new("[root]", "")], "[root]").unwrap_err();
        assert!(matches!(err, TreeError::ReservedName { name } if name == "[root]"));
    }
}
