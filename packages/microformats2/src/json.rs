//! The canonical Microformats2 JSON shape (§4.8), and the conversions between it and
//! the arena-based [`Document`]/[`Item`] model. Kept as a separate wire-shape
//! (`RawDocument`/`RawItem`/`RawPropertyValue`) rather than deriving `Serialize` on the
//! model types directly, the same way the teacher keeps its `Node` tree and its
//! `Attributes` wire format apart.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::{Document, Item, ItemId, PropertyValue};

#[derive(Debug, Serialize, Deserialize)]
struct RawDocument {
    items: Vec<RawItem>,
    #[serde(default)]
    rels: IndexMap<String, Vec<String>>,
    #[serde(rename = "rel-urls", default)]
    rel_urls: IndexMap<String, IndexMap<String, String>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawItem {
    #[serde(rename = "type")]
    types: Vec<String>,
    #[serde(default)]
    properties: IndexMap<String, Vec<RawPropertyValue>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    value: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    children: Vec<RawItem>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum RawPropertyValue {
    String(String),
    Struct { html: String, value: String },
    Item(Box<RawItem>),
}

/// The internal property-key prefixes, longest first so `"dt-"` isn't mistaken for a
/// `"d"` prefix.
const KEY_PREFIXES: [&str; 4] = ["dt-", "p-", "u-", "e-"];

/// Unprefixed property names that, by MF2 convention, are `u-*` (URL-valued) rather
/// than `p-*` when their internal prefix can't be read off the JSON value's shape the
/// way `e-*` can (see [`reconstruct_key`]).
const WELL_KNOWN_U_NAMES: [&str; 4] = ["url", "photo", "logo", "audio"];

/// Strips whichever of [`KEY_PREFIXES`] `key` carries, for emission in the canonical
/// JSON shape (§4.8), which stores property names unprefixed.
fn unprefix_key(key: &str) -> &str {
    KEY_PREFIXES.iter().find_map(|prefix| key.strip_prefix(prefix)).unwrap_or(key)
}

/// Re-derives an internal prefixed key (`"p-name"`, `"u-url"`, …) from a bare JSON
/// property name and a representative value for it. The canonical JSON shape doesn't
/// record which prefix a property originally had, so this is a best-effort convention
/// rather than a lossless inverse of [`unprefix_key`]: `e-*` is recovered exactly
/// (struct-shaped values only ever come from `e-*`), `u-*` is recovered for a fixed list
/// of well-known URL-valued names, and everything else defaults to `p-*`. Because
/// [`Item::get_properties`] searches `p-`/`u-`/`e-`/`dt-` by unprefixed name regardless
/// of which one actually matches, a wrong guess here doesn't break lookups or the JSON
/// round trip — only the choice of internal prefix for property names the JSON doesn't
/// disambiguate (e.g. a `dt-*` property looks no different from a `p-*` one once its
/// value is a plain string).
fn reconstruct_key(key: &str, first_value: Option<&RawPropertyValue>) -> String {
    if matches!(first_value, Some(RawPropertyValue::Struct { .. })) {
        format!("e-{key}")
    } else if WELL_KNOWN_U_NAMES.contains(&key) {
        format!("u-{key}")
    } else {
        format!("p-{key}")
    }
}

fn item_to_raw(document: &Document, id: ItemId) -> RawItem {
    let item = document.item(id);
    RawItem {
        types: item.types.iter().map(|t| format!("h-{t}")).collect(),
        properties: item
            .properties
            .iter()
            .map(|(key, values)| {
                (
                    unprefix_key(key).to_string(),
                    values.iter().map(|v| property_value_to_raw(document, v)).collect(),
                )
            })
            .collect(),
        value: item.value.clone(),
        children: item.children.iter().map(|&child_id| item_to_raw(document, child_id)).collect(),
    }
}

fn property_value_to_raw(document: &Document, value: &PropertyValue) -> RawPropertyValue {
    match value {
        PropertyValue::String(s) => RawPropertyValue::String(s.clone()),
        PropertyValue::Struct { html, value } => {
            RawPropertyValue::Struct { html: html.clone(), value: value.clone() }
        }
        PropertyValue::Item(id) => RawPropertyValue::Item(Box::new(item_to_raw(document, *id))),
    }
}

fn hydrate_item(document: &mut Document, raw: RawItem, parent: Option<ItemId>) -> Result<ItemId, ParseError> {
    let types: Vec<String> =
        raw.types.iter().map(|t| t.strip_prefix("h-").unwrap_or(t).to_string()).collect();
    if types.is_empty() {
        return Err(ParseError::MissingTypes);
    }

    let mut item = Item::new(types, parent);
    item.value = raw.value;
    let id = document.push_item(item);

    let mut properties = IndexMap::new();
    for (key, raw_values) in raw.properties {
        let prefixed_key = reconstruct_key(&key, raw_values.first());
        let mut values = Vec::with_capacity(raw_values.len());
        for raw_value in raw_values {
            values.push(hydrate_property_value(document, raw_value, id)?);
        }
        properties.insert(prefixed_key, values);
    }
    document.item_mut(id).properties = properties;

    let mut children = Vec::with_capacity(raw.children.len());
    for raw_child in raw.children {
        children.push(hydrate_item(document, raw_child, Some(id))?);
    }
    document.item_mut(id).children = children;

    Ok(id)
}

fn hydrate_property_value(
    document: &mut Document,
    raw: RawPropertyValue,
    parent: ItemId,
) -> Result<PropertyValue, ParseError> {
    match raw {
        RawPropertyValue::String(s) => Ok(PropertyValue::String(s)),
        RawPropertyValue::Struct { html, value } => Ok(PropertyValue::Struct { html, value }),
        RawPropertyValue::Item(boxed) => {
            let id = hydrate_item(document, *boxed, Some(parent))?;
            Ok(PropertyValue::Item(id))
        }
    }
}

impl Document {
    /// Serializes this document to the canonical Microformats2 JSON shape (§4.8),
    /// pretty-printed.
    pub fn as_json(&self) -> String {
        let raw = RawDocument {
            items: self.top_level_items.iter().map(|&id| item_to_raw(self, id)).collect(),
            rels: self.rels.clone(),
            rel_urls: self.rel_urls.clone(),
        };
        serde_json::to_string_pretty(&raw).expect("RawDocument only holds serializable data")
    }

    /// [`Self::as_json`], decoded back into a [`serde_json::Value`] — a convenience for
    /// callers that want to inspect the shape programmatically rather than as text.
    pub fn as_raw_data(&self) -> serde_json::Value {
        serde_json::from_str(&self.as_json()).expect("as_json() always produces valid JSON")
    }

    /// Reconstructs a [`Document`] from its canonical JSON form (the inverse of
    /// [`Self::as_json`]). Parent back-references are not restored (`Item::parent` is
    /// `None` for every reconstructed item); nothing in the public query surface reads
    /// it, so this is lossless for everything this crate actually uses.
    pub fn new_from_json(json: &str) -> Result<Document, ParseError> {
        let raw: RawDocument = serde_json::from_str(json)?;
        let mut document = Document::default();
        document.rels = raw.rels;
        document.rel_urls = raw.rel_urls;
        for raw_item in raw.items {
            let id = hydrate_item(&mut document, raw_item, None)?;
            document.top_level_items.push(id);
        }
        Ok(document)
    }
}
