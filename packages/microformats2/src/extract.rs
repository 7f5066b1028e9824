//! The four prefix-specific value extractors (`p`, `u`, `e`, `dt`). Each takes the
//! element that carried the class token and returns what gets appended to the owning
//! item's property list.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use scraper::ElementRef;
use url::Url;

use crate::html_serialize;
use crate::vcp;
use crate::PropertyValue;

fn trimmed_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn first_attr<'a>(element: &ElementRef<'a>, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| element.value().attr(name))
}

fn resolve(base: &Url, raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    base.join(raw).ok().map(|u| u.to_string())
}

/// §4.3 `p-extractor`.
pub fn extract_p(element: ElementRef) -> String {
    let vcp_fragments = vcp::collect_fragments(element);
    if !vcp_fragments.is_empty() {
        return vcp_fragments.concat();
    }
    if let Some(attr) = first_attr(&element, &["title", "value", "alt"]) {
        if !attr.is_empty() {
            return attr.to_string();
        }
    }
    trimmed_text(element)
}

/// §4.3 `u-extractor`.
pub fn extract_u(element: ElementRef, base: &Url) -> String {
    let tag = element.value().name();
    let direct_attr = match tag {
        "a" | "area" | "link" => first_attr(&element, &["href"]),
        "img" | "audio" => first_attr(&element, &["src"]),
        "video" => first_attr(&element, &["src", "poster"]),
        "object" => first_attr(&element, &["data"]),
        _ => None,
    };
    if let Some(raw) = direct_attr {
        if let Some(resolved) = resolve(base, raw) {
            return resolved;
        }
    }

    let vcp_fragments = vcp::collect_fragments(element);
    if !vcp_fragments.is_empty() {
        return vcp_fragments.concat();
    }

    let unlikely_attr = match tag {
        "abbr" => first_attr(&element, &["title"]),
        "data" | "input" => first_attr(&element, &["value"]),
        _ => None,
    };
    if let Some(raw) = unlikely_attr {
        if let Some(resolved) = resolve(base, raw) {
            return resolved;
        }
    }

    trimmed_text(element)
}

/// §4.3 `e-extractor`.
pub fn extract_e(element: ElementRef, base: &Url) -> PropertyValue {
    let html = html_serialize::serialize_children_absolutized(element, base)
        .trim_end_matches(' ')
        .to_string();
    let value = trimmed_text(element);
    PropertyValue::Struct { html, value }
}

/// §4.3 `dt-extractor`. Returns `None` when no candidate string parses as ISO-8601, in
/// which case the caller skips the property entirely rather than storing a raw string.
pub fn extract_dt(element: ElementRef) -> Option<String> {
    let vcp_fragments = vcp::collect_fragments(element);
    let candidate = if !vcp_fragments.is_empty() {
        vcp_fragments.concat()
    } else if let Some(attr) = first_attr(&element, &["datetime", "title", "value"]) {
        attr.to_string()
    } else {
        trimmed_text(element)
    };

    parse_datetime(&candidate)
}

/// Tries a descending-specificity chain of ISO-8601-family formats, returning the
/// canonical `YYYY-MM-DD HH:MM:SS` form. A date with no time component is taken to mean
/// midnight.
fn parse_datetime(candidate: &str) -> Option<String> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(candidate) {
        return Some(dt.naive_utc().format("%Y-%m-%d %H:%M:%S").to_string());
    }

    const DATETIME_FORMATS: [&str; 4] =
        ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(candidate, format) {
            return Some(dt.format("%Y-%m-%d %H:%M:%S").to_string());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(candidate, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0).unwrap().format("%Y-%m-%d %H:%M:%S").to_string());
    }

    None
}
