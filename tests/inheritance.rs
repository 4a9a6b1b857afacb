//! Integration tests for fragment resolution and rendering: inheritance,
//! block overrides, helper bindings, and dialect behavior.

use pretty_assertions::assert_eq;
use serde::Serialize;
use serde_json::{json, Value};

use template_tree::{
    parse_html, parse_text, Fragment, TemplateBuilder, TextTree, Tree, TreeTemplate,
};

fn render<T: TreeTemplate>(tree: &Tree<T>, name: &str) -> String {
    render_with(tree, name, &())
}

fn render_with<T: TreeTemplate, D: Serialize>(tree: &Tree<T>, name: &str, data: &D) -> String {
    let mut out = Vec::new();
    tree.render(name, data, &mut out)
        .unwrap_or_else(|e| panic!("error rendering {name:?}: {e}"));
    String::from_utf8(out).unwrap()
}

fn base_a_b() -> Vec<Fragment> {
    vec![
        Fragment::new(
            "base.tmpl",
            "Header\n{{ block \"body\" }}Body{{ end }}\nFooter",
        ),
        Fragment::new(
            "a.tmpl",
            "{{/* extends base.tmpl */}}\n{{ define \"body\" }}Body A{{ end }}",
        ),
        Fragment::new(
            "b.tmpl",
            "{{/* extends base.tmpl */}}\n{{ define \"body\" }}Body B{{ end }}",
        ),
    ]
}

#[test]
fn test_tree_has_one_entry_per_fragment() {
    let tree = parse_text(base_a_b(), None).unwrap();
    assert_eq!(tree.len(), 3);
    for name in ["base.tmpl", "a.tmpl", "b.tmpl"] {
        assert!(tree.contains(name), "{name} missing from tree");
    }
}

#[test]
fn test_base_renders_defaults() {
    let tree = parse_text(base_a_b(), None).unwrap();
    assert_eq!(render(&tree, "base.tmpl"), "Header\nBody\nFooter");
}

#[test]
fn test_children_override_block() {
    let tree = parse_text(base_a_b(), None).unwrap();
    assert_eq!(render(&tree, "a.tmpl"), "Header\nBody A\nFooter");
    assert_eq!(render(&tree, "b.tmpl"), "Header\nBody B\nFooter");
}

#[test]
fn test_sibling_overrides_are_independent() {
    // Resolve with the children in both orders; neither sibling may leak its
    // override into the other or back into the base.
    let mut reversed = base_a_b();
    reversed.swap(1, 2);
    for fragments in [base_a_b(), reversed] {
        let tree = parse_text(fragments, None).unwrap();
        assert_eq!(render(&tree, "a.tmpl"), "Header\nBody A\nFooter");
        assert_eq!(render(&tree, "b.tmpl"), "Header\nBody B\nFooter");
        assert_eq!(render(&tree, "base.tmpl"), "Header\nBody\nFooter");
    }
}

#[test]
fn test_multilevel_inheritance() {
    let fragments = vec![
        Fragment::new(
            "base.tmpl",
            "{{ block \"title\" }}Base{{ end }}|{{ block \"body\" }}Empty{{ end }}",
        ),
        Fragment::new(
            "middle.tmpl",
            "{{/* extends base.tmpl */}}\n{{ define \"body\" }}Middle{{ end }}",
        ),
        Fragment::new(
            "leaf.tmpl",
            "{{/* extends middle.tmpl */}}\n{{ define \"title\" }}Leaf{{ end }}",
        ),
    ];
    let tree = parse_text(fragments, None).unwrap();
    assert_eq!(render(&tree, "base.tmpl"), "Base|Empty");
    assert_eq!(render(&tree, "middle.tmpl"), "Base|Middle");
    // The leaf overrides the grandparent's title and keeps the parent's body
    assert_eq!(render(&tree, "leaf.tmpl"), "Leaf|Middle");
}

#[test]
fn test_declaration_order_does_not_matter() {
    let fragments = vec![
        Fragment::new(
            "leaf.tmpl",
            "{{/* extends base.tmpl */}}{{ define \"body\" }}Leaf{{ end }}",
        ),
        Fragment::new("base.tmpl", "{{ block \"body\" }}Base{{ end }}"),
    ];
    let tree = parse_text(fragments, None).unwrap();
    assert_eq!(render(&tree, "leaf.tmpl"), "Leaf");
}

#[test]
fn test_helpers_inherited_from_root() {
    let root = TemplateBuilder::new()
        .helper("value", |_args| Ok(Value::String("Test Value".to_string())))
        .text();
    let fragments = vec![
        Fragment::new("base.tmpl", "Base\n{{ block \"body\" }}Child{{ end }}"),
        Fragment::new(
            "funcs.tmpl",
            "{{/* extends base.tmpl */}}{{ define \"body\" }}{{ value }}{{ end }}",
        ),
    ];
    let tree = parse_text(fragments, Some(root)).unwrap();
    assert_eq!(render(&tree, "funcs.tmpl"), "Base\nTest Value");
}

#[test]
fn test_helper_arguments() {
    let root = TemplateBuilder::new()
        .helper("join", |args| {
            let parts: Vec<String> = args
                .iter()
                .map(|v| v.as_str().map(str::to_string).ok_or("expected strings"))
                .collect::<Result<_, _>>()
                .map_err(str::to_string)?;
            Ok(Value::String(parts.join("-")))
        })
        .text();
    let fragments = vec![Fragment::new("t.tmpl", "{{ join .a .b \"z\" }}")];
    let tree = parse_text(fragments, Some(root)).unwrap();
    assert_eq!(
        render_with(&tree, "t.tmpl", &json!({"a": "x", "b": "y"})),
        "x-y-z"
    );
}

#[derive(Serialize)]
struct Page {
    title: String,
    user: User,
}

#[derive(Serialize)]
struct User {
    name: String,
}

#[test]
fn test_render_struct_data() {
    let fragments = vec![
        Fragment::new(
            "base.tmpl",
            "{{ .title }}: {{ block \"body\" }}{{ end }}",
        ),
        Fragment::new(
            "hello.tmpl",
            "{{/* extends base.tmpl */}}{{ define \"body\" }}hi {{ .user.name }}{{ end }}",
        ),
    ];
    let tree = parse_text(fragments, None).unwrap();
    let data = Page {
        title: "Welcome".to_string(),
        user: User { name: "ada".to_string() },
    };
    assert_eq!(render_with(&tree, "hello.tmpl", &data), "Welcome: hi ada");
}

#[test]
fn test_html_escapes_substitutions_only() {
    let fragments = vec![
        Fragment::new("base.tmpl", "<ul>{{ block \"item\" }}{{ end }}</ul>"),
        Fragment::new(
            "page.tmpl",
            "{{/* extends base.tmpl */}}{{ define \"item\" }}<li>{{ .label }}</li>{{ end }}",
        ),
    ];
    let tree = parse_html(fragments, None).unwrap();
    assert_eq!(
        render_with(&tree, "page.tmpl", &json!({"label": "a<b & c"})),
        "<ul><li>a&lt;b &amp; c</li></ul>"
    );
}

#[test]
fn test_text_does_not_escape() {
    let fragments = vec![Fragment::new("t.tmpl", "{{ .label }}")];
    let tree = parse_text(fragments, None).unwrap();
    assert_eq!(
        render_with(&tree, "t.tmpl", &json!({"label": "a<b & c"})),
        "a<b & c"
    );
}

#[test]
fn test_idempotent_resolution() {
    let first = parse_text(base_a_b(), None).unwrap();
    let second = parse_text(base_a_b(), None).unwrap();
    for name in ["base.tmpl", "a.tmpl", "b.tmpl"] {
        assert_eq!(render(&first, name), render(&second, name));
    }
}

#[test]
fn test_names_in_deterministic_order() {
    let order = |tree: &TextTree| tree.names().map(str::to_string).collect::<Vec<_>>();
    let first = parse_text(base_a_b(), None).unwrap();
    let second = parse_text(base_a_b(), None).unwrap();
    assert_eq!(order(&first), order(&second));
    assert_eq!(order(&first), vec!["base.tmpl", "a.tmpl", "b.tmpl"]);
}

#[test]
fn test_path_style_names() {
    let fragments = vec![
        Fragment::new("layouts/base.tmpl", "[{{ block \"c\" }}{{ end }}]"),
        Fragment::new(
            "pages/index.tmpl",
            "{{/* extends layouts/base.tmpl */}}{{ define \"c\" }}index{{ end }}",
        ),
    ];
    let tree = parse_text(fragments, None).unwrap();
    assert_eq!(render(&tree, "pages/index.tmpl"), "[index]");
}
