//! A parser and in-memory data model for [Microformats2][mf2], the convention for
//! embedding semantic metadata in HTML through class names on arbitrary elements.
//!
//! This crate walks a parsed HTML tree (via [`scraper`]), recognises the `h-*`, `p-*`,
//! `u-*`, `e-*` and `dt-*` class tokens, and builds a [`Document`] of nested [`Item`]s.
//! The result serialises losslessly to the canonical Microformats2 JSON shape and back.
//!
//! This does *not* implement `rel`/`rel-urls` extraction beyond empty placeholders, does
//! not recover from malformed HTML beyond what the underlying parser provides, and does
//! not parse MF1, the predecessor convention.
//!
//! [mf2]: https://microformats.org/wiki/microformats2

/// Errors that can occur while reconstructing a document from JSON.
pub mod error;

mod analyzer;
mod extract;
mod html_serialize;
mod implied;
mod json;
mod query;
mod tokenizer;
mod vcp;

#[cfg(test)]
mod tests;

use indexmap::IndexMap;
use url::Url;

/// The index of an [`Item`] within a [`Document`]'s arena. Stable for the lifetime of the
/// document; never reused once assigned.
///
/// Items reference each other (as children, as property values, as parents) by this id
/// rather than by owning one another directly, because a single item is legitimately
/// reachable from three places at once: its parent's `children` or `properties`, the
/// document's flat `items` list, and (if top-level) `top_level_items`. An arena avoids
/// needing `Rc`/`RefCell` or unsafe code to give every item a place to live.
pub type ItemId = usize;

/// A single `h-*` microformat instance.
#[derive(Debug, Clone)]
pub struct Item {
    /// The item's types, stripped of their `h-` prefix (e.g. `"entry"`, `"card"`).
    /// Always non-empty: an `Item` is only ever created for an element that carried at
    /// least one `h-*` class.
    pub types: Vec<String>,
    /// Properties keyed by their prefixed name (`"p-name"`, `"u-url"`, `"e-content"`,
    /// `"dt-published"`), each holding an ordered, possibly-multi-valued sequence.
    pub properties: IndexMap<String, Vec<PropertyValue>>,
    /// Nested `h-*` items found under this item that were *not* consumed as the value of
    /// one of its properties.
    pub children: Vec<ItemId>,
    /// The item enclosing this one, if any. A non-owning relation: `None` for a
    /// top-level item, `Some` otherwise. Not read by the analyzer itself (which threads
    /// the current item through recursion directly); kept for callers that want to walk
    /// upward from a deeply nested item.
    pub parent: Option<ItemId>,
    /// The "value" of this item under the value-class pattern (§4.2 step 6): the
    /// implied or explicit `name` if the item's element carried a `p-*` class, the `url`
    /// if it carried a `u-*` class, or unset otherwise.
    pub value: Option<String>,
}

impl Item {
    pub(crate) fn new(types: Vec<String>, parent: Option<ItemId>) -> Self {
        Self {
            types,
            properties: IndexMap::new(),
            children: Vec::new(),
            parent,
            value: None,
        }
    }

}

/// One property value. Microformats2 properties are a sum of plain strings (both plain
/// text and URL-resolved strings are represented as [`PropertyValue::String`]; the
/// distinction is in which prefix produced them, not in the stored shape), embedded-HTML
/// structs (`e-*` only), and nested items.
#[derive(Debug, Clone)]
pub enum PropertyValue {
    /// Plain text, or a URL already resolved against the document's base.
    String(String),
    /// An `e-*` property's embedded content: `html` with descendant `href`/`src`
    /// attributes absolutised, and `value` as its plain-text rendering.
    Struct { html: String, value: String },
    /// A nested `h-*` item consumed as this property's value (e.g. an `h-card` under a
    /// `p-author`), rather than appearing in its enclosing item's `children`.
    Item(ItemId),
}

impl PropertyValue {
    /// The plain-string form of this value, used wherever the spec calls for "the
    /// string form" of a property (e.g. implied `value` assignment, §4.2 step 6).
    /// Items and structs have no string form.
    pub(crate) fn as_string(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            PropertyValue::Struct { .. } | PropertyValue::Item(_) => None,
        }
    }
}

/// A parsed Microformats2 document: every `h-*` item discovered in the source HTML, plus
/// the (currently unpopulated, see [`Self::rels`]) `rel`/`rel-urls` maps from the
/// canonical JSON shape.
#[derive(Debug, Clone)]
pub struct Document {
    /// Items with no enclosing `h-*` item, in document order.
    pub top_level_items: Vec<ItemId>,
    /// Every item at any depth, in discovery (pre-order) order. A superset of
    /// `top_level_items` and their descendants (children and property-value items).
    pub items: Vec<ItemId>,
    /// Relation name to the URLs found under `rel="<name>"`. Always empty: this crate
    /// treats `rel`/`rel-urls` extraction as a pass-through stub (see crate docs), kept
    /// here only so the JSON shape matches the canonical one.
    pub rels: IndexMap<String, Vec<String>>,
    /// URL to whatever metadata was found about it via `rel`. Always empty, for the same
    /// reason as [`Self::rels`].
    pub rel_urls: IndexMap<String, IndexMap<String, String>>,
    arena: Vec<Item>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            top_level_items: Vec::new(),
            items: Vec::new(),
            rels: IndexMap::new(),
            rel_urls: IndexMap::new(),
            arena: Vec::new(),
        }
    }
}

impl Document {
    /// Looks up an item by id. Ids are only ever handed out by this document (as
    /// `ItemId`s in `children`, `properties`, `items`, `top_level_items`), so this never
    /// panics for an id actually obtained from it.
    pub fn item(&self, id: ItemId) -> &Item {
        &self.arena[id]
    }

    pub(crate) fn item_mut(&mut self, id: ItemId) -> &mut Item {
        &mut self.arena[id]
    }

    /// Inserts a newly-created item into the arena and records it in the flat discovery
    /// list, returning its id. Does *not* add it to `top_level_items`; callers do that
    /// themselves when there is no enclosing item.
    pub(crate) fn push_item(&mut self, item: Item) -> ItemId {
        let id = self.arena.len();
        self.arena.push(item);
        self.items.push(id);
        id
    }

    /// Returns the first item (in document order) whose types contain `type_query`,
    /// which may be given with or without its `h-` prefix.
    pub fn get_first(&self, type_query: &str) -> Option<&Item> {
        self.items
            .iter()
            .map(|&id| self.item(id))
            .find(|item| item.has_type(type_query))
    }

    /// Returns every item (at any depth, in document order) whose types contain
    /// `type_query`, which may be given with or without its `h-` prefix.
    pub fn get_all(&self, type_query: &str) -> Vec<&Item> {
        self.items
            .iter()
            .map(|&id| self.item(id))
            .filter(|item| item.has_type(type_query))
            .collect()
    }
}

/// Parses an HTML document into its Microformats2 [`Document`].
///
/// `url_context` is the base URL used to resolve relative URLs; if the document contains
/// a `<base href>` element, that takes over once, before analysis begins. If no context
/// is given, `http://example.com/` is used, matching the reference test suite's default.
pub fn parse(html: &str, url_context: Option<Url>) -> Document {
    Document::parse(html, url_context)
}
