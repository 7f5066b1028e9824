use super::*;
use crate::tokenizer::{tokenize, ClassTokens};
use scraper::{ElementRef, Html};

fn tokens_for(html: &str) -> ClassTokens {
    let doc = Html::parse_fragment(html);
    let element = doc.root_element().first_child().unwrap();
    tokenize(&ElementRef::wrap(element).unwrap())
}

#[test]
fn tokenizes_all_prefixes() {
    let t = tokens_for(r#"<div class="h-entry p-name u-url e-content dt-published">x</div>"#);
    assert_eq!(t.h, vec!["entry"]);
    assert_eq!(t.p, vec!["name"]);
    assert_eq!(t.u, vec!["url"]);
    assert_eq!(t.e, vec!["content"]);
    assert_eq!(t.dt, vec!["published"]);
}

#[test]
fn preserves_duplicates_and_order() {
    let t = tokens_for(r#"<div class="p-name p-nickname p-name">x</div>"#);
    assert_eq!(t.p, vec!["name", "nickname", "name"]);
}

#[test]
fn ignores_non_mf2_classes() {
    let t = tokens_for(r#"<div class="container fancy-border">x</div>"#);
    assert!(t.h.is_empty() && t.p.is_empty() && t.u.is_empty() && t.e.is_empty() && t.dt.is_empty());
}

#[test]
fn missing_class_attribute_is_empty() {
    let t = tokens_for(r#"<div>x</div>"#);
    assert!(t.h.is_empty());
}

#[test]
fn hyphenated_suffix() {
    let t = tokens_for(r#"<div class="p-street-address">x</div>"#);
    assert_eq!(t.p, vec!["street-address"]);
}

#[test]
fn dt_not_confused_with_d_prefix() {
    let t = tokens_for(r#"<time class="dt-published">x</time>"#);
    assert_eq!(t.dt, vec!["published"]);
    assert!(t.h.is_empty());
}
