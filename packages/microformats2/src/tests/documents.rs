use super::*;
use url::Url;

fn parse(html: &str) -> Document {
    crate::parse(html, Some(Url::parse("http://ex.com/").unwrap()))
}

#[test]
fn items_list_is_a_superset_of_top_level_items() {
    let document = parse(
        r#"<div class="h-feed">
             <div class="h-entry"><span class="p-author h-card">Bob</span></div>
             <div class="h-entry">no author</div>
           </div>"#,
    );
    assert!(document.top_level_items.iter().all(|id| document.items.contains(id)));
    // The h-card nested under p-author is reachable only through `items`, not
    // `top_level_items`, since it was consumed as a property value rather than left as
    // a child.
    assert!(document.items.len() > document.top_level_items.len());
}

#[test]
fn discovery_order_is_pre_order() {
    let document = parse(
        r#"<div class="h-entry" id="outer">
             <span class="h-card" id="inner">Bob</span>
           </div>
           <div class="h-entry" id="second">Second</div>"#,
    );
    let type_sequence: Vec<&str> =
        document.items.iter().map(|&id| document.item(id).types[0].as_str()).collect();
    assert_eq!(type_sequence, vec!["entry", "card", "entry"]);
}

#[test]
fn every_item_has_a_nonempty_type_list() {
    let document = parse(
        r#"<div class="h-card h-x-custom">
             <span class="p-author h-card">Nested</span>
           </div>"#,
    );
    for &id in &document.items {
        assert!(!document.item(id).types.is_empty());
    }
}

#[test]
fn resolved_urls_are_always_absolute() {
    let document = parse(
        r#"<div class="h-entry">
             <a class="u-url" href="/p/1">Permalink</a>
             <div class="e-content">See <a href="/about">about</a></div>
           </div>"#,
    );
    let entry = document.get_first("entry").unwrap();
    match entry.get_property("url") {
        Some(PropertyValue::String(s)) => assert!(Url::parse(s).is_ok()),
        other => panic!("unexpected {other:?}"),
    }
    match entry.get_property("content") {
        Some(PropertyValue::Struct { html, .. }) => assert!(html.contains("http://ex.com/about")),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn get_first_is_prefix_insensitive() {
    let document = parse(r#"<div class="h-entry">Text</div>"#);
    let a = document.get_first("entry");
    let b = document.get_first("h-entry");
    assert!(a.is_some() && b.is_some());
}

#[test]
fn implied_name_is_skipped_exactly_when_a_p_or_e_property_exists() {
    let with_p = parse(r#"<div class="h-card"><span class="p-nickname">Al</span><img alt="ignored"></div>"#);
    let item = with_p.get_first("card").unwrap();
    // The explicit p-nickname blocks implied name from running at all, so no
    // `p-name` property is added even though nothing named "name" exists otherwise.
    assert!(item.get_properties("name").is_empty());

    let without_p = parse(r#"<div class="h-card"><img alt="Alice"></div>"#);
    let item = without_p.get_first("card").unwrap();
    match item.get_property("name") {
        Some(PropertyValue::String(s)) => assert_eq!(s, "Alice"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn multiple_top_level_items_in_document_order() {
    let document = parse(
        r#"<span class="h-card">Alice</span><span class="h-card">Bob</span>"#,
    );
    assert_eq!(document.top_level_items.len(), 2);
    let names: Vec<_> = document
        .top_level_items
        .iter()
        .map(|&id| document.item(id).get_property("name").cloned())
        .collect();
    let as_strings: Vec<_> = names
        .iter()
        .map(|v| match v {
            Some(PropertyValue::String(s)) => s.as_str(),
            _ => panic!("expected string"),
        })
        .collect();
    assert_eq!(as_strings, vec!["Alice", "Bob"]);
}

#[test]
fn feed_of_entries_with_mixed_authorship() {
    let document = parse(
        r#"<div class="h-feed">
             <h1 class="p-name">A Feed</h1>
             <div class="h-entry">
               <h2 class="p-name">First post</h2>
               <span class="p-author h-card">
                 <span class="p-name">Writer</span>
                 <a class="u-url" href="/writer">profile</a>
               </span>
             </div>
             <div class="h-entry">
               <h2 class="p-name">Second post</h2>
             </div>
           </div>"#,
    );

    let feed = document.get_first("feed").unwrap();
    match feed.get_property("name") {
        Some(PropertyValue::String(s)) => assert_eq!(s, "A Feed"),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(feed.children.len(), 2);

    let first_entry = document.item(feed.children[0]);
    match first_entry.get_property("author") {
        Some(PropertyValue::Item(author_id)) => {
            let author = document.item(*author_id);
            match author.get_property("url") {
                Some(PropertyValue::String(s)) => assert_eq!(s, "http://ex.com/writer"),
                other => panic!("unexpected {other:?}"),
            }
        }
        other => panic!("unexpected {other:?}"),
    }

    let second_entry = document.item(feed.children[1]);
    assert!(second_entry.get_properties("author").is_empty());
}
