//! Derives implied `name`, `photo`, `url` properties from an h-item's element shape,
//! for items that declare none of their own. Each probe is checked by the analyzer only
//! when the corresponding property is still absent after the subtree has been walked.

use scraper::ElementRef;
use url::Url;

use crate::tokenizer;

fn is_h_item(element: &ElementRef) -> bool {
    !tokenizer::tokenize(element).h.is_empty()
}

/// The element's sole element child (text nodes ignored), if it has exactly one and
/// that child doesn't itself carry an `h-*` class.
fn single_non_h_child<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    let mut element_children = element.children().filter_map(ElementRef::wrap);
    let only = element_children.next()?;
    if element_children.next().is_some() {
        return None;
    }
    if is_h_item(&only) {
        return None;
    }
    Some(only)
}

fn single_non_h_grandchild<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    let child = single_non_h_child(element)?;
    single_non_h_child(&child)
}

fn attr(element: &ElementRef, name: &str) -> Option<String> {
    element.value().attr(name).map(str::to_string)
}

fn nonempty_attr(element: &ElementRef, name: &str) -> Option<String> {
    attr(element, name).filter(|s| !s.is_empty())
}

/// §4.5 implied name. The caller is responsible for the "skip entirely if the item has
/// any `p-*`/`e-*` property" rule and for only applying the result when `p-name` is
/// still absent; this just runs the probe chain.
pub fn implied_name(element: &ElementRef) -> Option<String> {
    let tag = element.value().name();

    if tag == "img" || tag == "area" {
        return Some(attr(element, "alt").unwrap_or_default());
    }
    if tag == "abbr" {
        return Some(attr(element, "title").unwrap_or_default());
    }

    if let Some(child) = single_non_h_child(element) {
        let child_tag = child.value().name();
        if child_tag == "img" || child_tag == "area" {
            if let Some(alt) = nonempty_attr(&child, "alt") {
                return Some(alt);
            }
        } else if child_tag == "abbr" {
            if let Some(title) = nonempty_attr(&child, "title") {
                return Some(title);
            }
        }
    }

    if let Some(grandchild) = single_non_h_grandchild(element) {
        let grandchild_tag = grandchild.value().name();
        if grandchild_tag == "img" || grandchild_tag == "area" {
            if let Some(alt) = nonempty_attr(&grandchild, "alt") {
                return Some(alt);
            }
        } else if grandchild_tag == "abbr" {
            if let Some(title) = nonempty_attr(&grandchild, "title") {
                return Some(title);
            }
        }
    }

    Some(element.text().collect::<String>().trim().to_string())
}

/// §4.5 implied photo. Returns the resolved absolute URL, if the probe chain finds one.
pub fn implied_photo(element: &ElementRef, base: &Url) -> Option<String> {
    let tag = element.value().name();

    if tag == "img" {
        if let Some(src) = nonempty_attr(element, "src") {
            return resolve(base, &src);
        }
    }
    if tag == "object" {
        if let Some(data) = nonempty_attr(element, "data") {
            return resolve(base, &data);
        }
    }

    if let Some(child) = single_non_h_child(element) {
        let (child_tag, probe_attr) = match child.value().name() {
            "img" => ("img", "src"),
            "object" => ("object", "data"),
            _ => ("", ""),
        };
        if !child_tag.is_empty() {
            if let Some(raw) = nonempty_attr(&child, probe_attr) {
                return resolve(base, &raw);
            }
        }
    }

    if let Some(grandchild) = single_non_h_grandchild(element) {
        let (gc_tag, probe_attr) = match grandchild.value().name() {
            "img" => ("img", "src"),
            "object" => ("object", "data"),
            _ => ("", ""),
        };
        if !gc_tag.is_empty() {
            if let Some(raw) = nonempty_attr(&grandchild, probe_attr) {
                return resolve(base, &raw);
            }
        }
    }

    None
}

/// §4.5 implied url. Returns the resolved absolute URL, if the probe chain finds one.
pub fn implied_url(element: &ElementRef, base: &Url) -> Option<String> {
    let tag = element.value().name();

    if tag == "a" || tag == "area" {
        if let Some(href) = nonempty_attr(element, "href") {
            return resolve(base, &href);
        }
    }

    if let Some(child) = single_non_h_child(element) {
        let child_tag = child.value().name();
        if child_tag == "a" || child_tag == "area" {
            if let Some(href) = nonempty_attr(&child, "href") {
                return resolve(base, &href);
            }
        }
    }

    if let Some(grandchild) = single_non_h_grandchild(element) {
        let grandchild_tag = grandchild.value().name();
        if grandchild_tag == "a" || grandchild_tag == "area" {
            if let Some(href) = nonempty_attr(&grandchild, "href") {
                return resolve(base, &href);
            }
        }
    }

    None
}

fn resolve(base: &Url, raw: &str) -> Option<String> {
    base.join(raw).ok().map(|u| u.to_string())
}
