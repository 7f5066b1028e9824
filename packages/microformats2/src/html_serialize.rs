//! Re-serializes a subtree back to HTML text while rewriting descendant `href`/`src`
//! attributes to absolute URLs. `scraper`'s tree is read-only — there is no way to
//! mutate an attribute in place and ask it to re-render — so `e-*` extraction needs its
//! own small writer instead of delegating to [`scraper::ElementRef::inner_html`].

use ego_tree::NodeRef;
use scraper::{ElementRef, Node};
use url::Url;

/// Tags that never have a closing tag or children, per the HTML5 "void elements" list.
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Attributes that carry a URL and so are rewritten to absolute form during
/// serialization.
const URL_ATTRS: [&str; 2] = ["href", "src"];

/// Serializes `element`'s children (not `element` itself) to HTML text: element
/// children are fully re-rendered with `href`/`src` absolutised against `base`; text
/// children are emitted raw (not re-escaped, matching how they appear in the source).
pub fn serialize_children_absolutized(element: ElementRef, base: &Url) -> String {
    let mut out = String::new();
    for child in element.children() {
        serialize_node(child, base, &mut out);
    }
    out
}

fn serialize_node(node: NodeRef<Node>, base: &Url, out: &mut String) {
    match node.value() {
        Node::Element(_) => {
            let el = ElementRef::wrap(node).expect("Node::Element always wraps to ElementRef");
            serialize_element(el, base, out);
        }
        Node::Text(text) => out.push_str(text),
        // Comments, doctypes, processing instructions contribute nothing to the
        // extracted `html`/`value` pair.
        _ => {}
    }
}

fn serialize_element(el: ElementRef, base: &Url, out: &mut String) {
    let value = el.value();
    let name = value.name();

    out.push('<');
    out.push_str(name);
    for (attr_name, attr_value) in value.attrs() {
        out.push(' ');
        out.push_str(attr_name);
        out.push_str("=\"");
        if URL_ATTRS.contains(&attr_name) {
            out.push_str(&escape_attr(&resolve(base, attr_value)));
        } else {
            out.push_str(&escape_attr(attr_value));
        }
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&name) {
        return;
    }

    for child in el.children() {
        serialize_node(child, base, out);
    }

    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// Resolves `raw` against `base`, falling back to the original string if it isn't a
/// valid relative or absolute URL (malformed `href`/`src` values are left as-is rather
/// than dropped, since this is serialization, not extraction).
fn resolve(base: &Url, raw: &str) -> String {
    base.join(raw).map(|u| u.to_string()).unwrap_or_else(|_| raw.to_string())
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;").replace('<', "&lt;").replace('>', "&gt;")
}
