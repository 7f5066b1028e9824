//! The recursive tree walk (§4.2) that discovers items, extracts their properties, and
//! assembles the [`Document`]. This is the one place all of the other modules meet.

use scraper::{ElementRef, Html};
use url::Url;

use crate::{extract, implied, tokenizer, Document, Item, ItemId, PropertyValue};

const DEFAULT_BASE: &str = "http://example.com/";

impl Document {
    /// Parses `html` into a [`Document`], using `url_context` (or
    /// `http://example.com/` if none is given) as the starting base URL. A `<base
    /// href>` in the document, if present, overrides it once before the walk begins.
    pub fn parse(html: &str, url_context: Option<Url>) -> Document {
        let parsed = Html::parse_document(html);
        let mut base = url_context.unwrap_or_else(|| {
            Url::parse(DEFAULT_BASE).expect("DEFAULT_BASE is a valid absolute URL")
        });

        if let Some(base_href) = find_base_href(&parsed) {
            if let Ok(resolved) = base.join(&base_href) {
                base = resolved;
            }
        }

        let mut document = Document::default();
        analyze(&mut document, parsed.root_element(), None, &base);
        document
    }
}

fn find_base_href(parsed: &Html) -> Option<String> {
    parsed.root_element().descendants().find_map(|node| {
        let element = ElementRef::wrap(node)?;
        if element.value().name() != "base" {
            return None;
        }
        element.value().attr("href").map(str::to_string)
    })
}

/// §4.2: the recursive analyzer. `current_item` is the innermost enclosing h-item, if
/// any.
fn analyze(document: &mut Document, element: ElementRef, current_item: Option<ItemId>, base: &Url) {
    let tokens = tokenizer::tokenize(&element);

    let new_item = if !tokens.h.is_empty() {
        let item = Item::new(tokens.h.clone(), current_item);
        let id = document.push_item(item);
        if current_item.is_none() {
            document.top_level_items.push(id);
        }
        Some(id)
    } else {
        None
    };

    // Step 4: property extraction against the enclosing item.
    if let Some(current) = current_item {
        if new_item.is_none() {
            if !tokens.p.is_empty() {
                let value = extract::extract_p(element);
                for suffix in &tokens.p {
                    append_property(document, current, "p", suffix, PropertyValue::String(value.clone()));
                }
            }
            if !tokens.u.is_empty() {
                let value = extract::extract_u(element, base);
                for suffix in &tokens.u {
                    append_property(document, current, "u", suffix, PropertyValue::String(value.clone()));
                }
            }
        }
        if !tokens.e.is_empty() {
            let value = extract::extract_e(element, base);
            for suffix in &tokens.e {
                append_property(document, current, "e", suffix, value.clone());
            }
        }
        if !tokens.dt.is_empty() {
            if let Some(value) = extract::extract_dt(element) {
                for suffix in &tokens.dt {
                    append_property(document, current, "dt", suffix, PropertyValue::String(value.clone()));
                }
            }
        }
    }

    // Step 5: recurse.
    let child_context = new_item.or(current_item);
    for child in element.children().filter_map(ElementRef::wrap) {
        analyze(document, child, child_context, base);
    }

    // Step 6: post-process the freshly-created item.
    if let Some(id) = new_item {
        apply_implied_properties(document, id, &element, base);
        assign_value(document, id, &tokens);
    }

    // Step 7: attach the freshly-created item to its enclosing context.
    if let (Some(id), Some(current)) = (new_item, current_item) {
        if let Some(suffix) = tokens.p.first() {
            append_property(document, current, "p", suffix, PropertyValue::Item(id));
        } else if let Some(suffix) = tokens.u.first() {
            append_property(document, current, "u", suffix, PropertyValue::Item(id));
        } else {
            document.item_mut(current).children.push(id);
        }
    }
}

fn append_property(document: &mut Document, item: ItemId, prefix: &str, suffix: &str, value: PropertyValue) {
    document
        .item_mut(item)
        .properties
        .entry(format!("{prefix}-{suffix}"))
        .or_default()
        .push(value);
}

fn has_any_property_with_prefix(item: &Item, prefix: &str) -> bool {
    let needle = format!("{prefix}-");
    item.properties.keys().any(|k| k.starts_with(&needle))
}

fn apply_implied_properties(document: &mut Document, id: ItemId, element: &ElementRef, base: &Url) {
    let item = document.item(id);
    let skip_name =
        has_any_property_with_prefix(item, "p") || has_any_property_with_prefix(item, "e");
    if !skip_name && item.get_properties("name").is_empty() {
        if let Some(name) = implied::implied_name(element) {
            if !name.is_empty() {
                document
                    .item_mut(id)
                    .properties
                    .entry("p-name".to_string())
                    .or_default()
                    .push(PropertyValue::String(name));
            }
        }
    }

    let item = document.item(id);
    if item.get_properties("photo").is_empty() {
        if let Some(photo) = implied::implied_photo(element, base) {
            document
                .item_mut(id)
                .properties
                .entry("u-photo".to_string())
                .or_default()
                .push(PropertyValue::String(photo));
        }
    }

    let item = document.item(id);
    if item.get_properties("url").is_empty() {
        if let Some(url) = implied::implied_url(element, base) {
            document
                .item_mut(id)
                .properties
                .entry("u-url".to_string())
                .or_default()
                .push(PropertyValue::String(url));
        }
    }
}

fn assign_value(document: &mut Document, id: ItemId, tokens: &tokenizer::ClassTokens) {
    let item = document.item(id);
    let value = if !tokens.p.is_empty() {
        item.get_properties("name").first().and_then(PropertyValue::as_string).map(str::to_string)
    } else if !tokens.u.is_empty() {
        item.get_properties("url").first().and_then(PropertyValue::as_string).map(str::to_string)
    } else {
        None
    };
    document.item_mut(id).value = value;
}
