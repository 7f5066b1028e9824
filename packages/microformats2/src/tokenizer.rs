//! Scans an element's `class` attribute for Microformats2 tokens and buckets them by
//! prefix. No regex engine: classes are whitespace-separated by the HTML spec, so a
//! split followed by a prefix match is the whole grammar.

use scraper::ElementRef;

/// The five prefixes Microformats2 assigns meaning to.
const PREFIXES: [&str; 5] = ["h", "e", "u", "dt", "p"];

/// The MF2 class tokens found on one element, grouped by prefix, each sequence in
/// left-to-right order with duplicates preserved.
#[derive(Debug, Clone, Default)]
pub struct ClassTokens {
    pub h: Vec<String>,
    pub e: Vec<String>,
    pub u: Vec<String>,
    pub dt: Vec<String>,
    pub p: Vec<String>,
}

impl ClassTokens {
    fn push(&mut self, prefix: &str, suffix: String) {
        match prefix {
            "h" => self.h.push(suffix),
            "e" => self.e.push(suffix),
            "u" => self.u.push(suffix),
            "dt" => self.dt.push(suffix),
            "p" => self.p.push(suffix),
            _ => unreachable!("push() only called with a member of PREFIXES"),
        }
    }
}

/// Tokenizes the `class` attribute of `element`. An absent attribute yields all-empty
/// sequences, never an error.
pub fn tokenize(element: &ElementRef) -> ClassTokens {
    let mut tokens = ClassTokens::default();
    let Some(class_attr) = element.value().attr("class") else {
        return tokens;
    };

    for word in class_attr.split_whitespace() {
        if let Some((prefix, suffix)) = match_token(word) {
            tokens.push(prefix, suffix.to_string());
        }
    }

    tokens
}

/// Matches a single whitespace-bounded word against `(h|e|u|dt|p)-([a-z]+(-[a-z]+)*)`,
/// returning the matched prefix and its suffix. Longer prefixes (`dt`) are tried before
/// their single-letter overlaps would otherwise steal a match.
fn match_token(word: &str) -> Option<(&'static str, &str)> {
    let mut by_length = PREFIXES;
    by_length.sort_by_key(|p| std::cmp::Reverse(p.len()));

    for prefix in by_length {
        if let Some(rest) = word.strip_prefix(prefix).and_then(|r| r.strip_prefix('-')) {
            if is_suffix(rest) {
                let canonical = PREFIXES.iter().find(|&&p| p == prefix).copied().unwrap();
                return Some((canonical, rest));
            }
        }
    }
    None
}

/// `[a-z]+(-[a-z]+)*`: one or more lowercase-letter groups joined by single hyphens.
fn is_suffix(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    s.split('-').all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_lowercase()))
}
