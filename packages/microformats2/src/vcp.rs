//! The value-class pattern: authors can mark descendants `value`/`value-title` to
//! override the default text-extraction rules with whatever fragments they choose.

use scraper::ElementRef;

/// Depth-first collection of VCP fragments under `element`. An empty result means no
/// `value`/`value-title` marker was found anywhere in the subtree, which callers treat
/// as "VCP did not apply" rather than "VCP produced an empty string".
pub fn collect_fragments(element: ElementRef) -> Vec<String> {
    let mut fragments = Vec::new();
    walk(element, &mut fragments);
    fragments
}

fn walk(element: ElementRef, fragments: &mut Vec<String>) {
    for child in element.children() {
        let Some(child_element) = ElementRef::wrap(child) else {
            continue;
        };
        let class_attr = child_element.value().attr("class").unwrap_or("");
        let has_value_title = class_attr.split_whitespace().any(|w| w == "value-title");
        let has_value = class_attr.split_whitespace().any(|w| w == "value");

        if has_value_title {
            fragments.push(child_element.value().attr("title").unwrap_or("").to_string());
        } else if has_value {
            fragments.push(child_element.inner_html());
        } else {
            walk(child_element, fragments);
        }
    }
}
