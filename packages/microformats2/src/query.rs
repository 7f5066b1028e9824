//! Read-only lookups over an already-parsed [`Document`]: type queries, property access,
//! and descendant walks. Kept separate from the type definitions in `lib.rs` so that file
//! stays a map of the data model, not its behaviour.

use crate::{Document, Item, ItemId, PropertyValue};

impl Item {
    /// Returns whether this item carries the given type, after stripping an optional
    /// leading `h-` from the query (so `"card"` and `"h-card"` are equivalent).
    pub fn has_type(&self, type_query: &str) -> bool {
        let query = type_query.strip_prefix("h-").unwrap_or(type_query);
        self.types.iter().any(|t| t == query)
    }

    /// Returns the sequence of values stored under the property matching `key`, which
    /// may be given with or without its prefix (`"name"` and `"p-name"` both match a
    /// `p-name` property). Prefixes are searched in the order `p`, `u`, `e`, `dt`,
    /// returning the first that has an entry; the Microformats2 implementations this
    /// crate tracks don't specify an order, so this one is ours to document.
    ///
    /// Returns an empty slice, never panics, when nothing matches.
    pub fn get_properties(&self, key: &str) -> &[PropertyValue] {
        const PREFIXES: [&str; 4] = ["p", "u", "e", "dt"];

        let unprefixed = PREFIXES
            .iter()
            .find_map(|prefix| key.strip_prefix(&format!("{prefix}-")))
            .unwrap_or(key);

        for prefix in PREFIXES {
            let prefixed = format!("{prefix}-{unprefixed}");
            if let Some(values) = self.properties.get(&prefixed) {
                return values;
            }
        }
        &[]
    }

    /// Returns the first value stored under `key` (see [`Self::get_properties`]), if
    /// any. If more than one value is present, a warning is logged (non-fatally: the
    /// first value is still returned) since callers using this accessor are implicitly
    /// assuming a single value.
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        let values = self.get_properties(key);
        if values.len() > 1 {
            log::warn!(
                "get_property(\"{key}\") called on a property with {} values, returning only the first",
                values.len()
            );
        }
        values.first()
    }

    /// Iterates over this item's own `children`, in document order, not descending into
    /// property values. Requires the owning [`Document`] to resolve child ids.
    pub fn all_descendants<'doc>(&self, doc: &'doc Document) -> Vec<&'doc Item> {
        let mut out = Vec::new();
        let mut stack: Vec<ItemId> = self.children.clone();
        stack.reverse();
        while let Some(id) = stack.pop() {
            let item = doc.item(id);
            out.push(item);
            stack.extend(item.children.iter().rev());
        }
        out
    }
}
