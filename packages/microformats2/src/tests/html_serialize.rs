use super::*;
use crate::html_serialize::serialize_children_absolutized;
use scraper::{ElementRef, Html};
use url::Url;

fn serialize(html: &str, base: &str) -> String {
    let doc = Html::parse_fragment(html);
    let root = doc.root_element().first_child().unwrap();
    let element = ElementRef::wrap(root).unwrap();
    serialize_children_absolutized(element, &Url::parse(base).unwrap())
}

#[test]
fn rewrites_href_to_absolute() {
    let out = serialize(r#"<div>Hi <a href="/x">x</a></div>"#, "http://ex.com/");
    assert_eq!(out, r#"Hi <a href="http://ex.com/x">x</a>"#);
}

#[test]
fn leaves_already_absolute_urls_unchanged() {
    let out = serialize(r#"<div><a href="http://other.com/y">y</a></div>"#, "http://ex.com/");
    assert_eq!(out, r#"<a href="http://other.com/y">y</a>"#);
}

#[test]
fn void_element_has_no_closing_tag() {
    let out = serialize(r#"<div><img src="/p.png"></div>"#, "http://ex.com/");
    assert_eq!(out, r#"<img src="http://ex.com/p.png">"#);
}

#[test]
fn non_url_attributes_are_untouched() {
    let out = serialize(r#"<div><span class="foo">hi</span></div>"#, "http://ex.com/");
    assert_eq!(out, r#"<span class="foo">hi</span>"#);
}

#[test]
fn nested_elements_all_rewritten() {
    let out = serialize(
        r#"<div><p><a href="/a">a</a> and <a href="/b">b</a></p></div>"#,
        "http://ex.com/",
    );
    assert_eq!(out, r#"<p><a href="http://ex.com/a">a</a> and <a href="http://ex.com/b">b</a></p>"#);
}
