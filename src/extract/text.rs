//! Text extraction
//!
//! Walks the content tree in pre-order and emits one normalized fragment per
//! element: the element's full text content (its own text plus that of every
//! visible descendant). Fragments shorter than two characters are dropped.

use scraper::{ElementRef, Html, Selector};

/// Shortest fragment, in characters, worth keeping
pub const MIN_FRAGMENT_CHARS: usize = 2;

/// Elements whose text is never visible
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extracts text fragments starting at the document body
///
/// Falls back to the root element for documents without a body.
pub fn extract_text(document: &Html) -> Vec<String> {
    let root = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element());

    let mut fragments = Vec::new();
    collect_fragments(root, &mut fragments);
    fragments
}

/// Extracts the normalized page title, or an empty string
pub fn extract_title(document: &Html) -> String {
    Selector::parse("title")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .map(|element| normalize_text(&element.text().collect::<String>()))
        .unwrap_or_default()
}

/// Normalizes a raw text run
///
/// Tabs become spaces, runs of whitespace collapse to a single space, and the
/// result is trimmed. Applying it twice yields the same string.
pub fn normalize_text(raw: &str) -> String {
    raw.replace('\t', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn collect_fragments(element: ElementRef<'_>, fragments: &mut Vec<String>) {
    if is_hidden(element) {
        return;
    }

    let text = normalize_text(&visible_text(element));
    if text.chars().count() >= MIN_FRAGMENT_CHARS {
        fragments.push(text);
    }

    for child in element.children().filter_map(ElementRef::wrap) {
        collect_fragments(child, fragments);
    }
}

fn is_hidden(element: ElementRef<'_>) -> bool {
    HIDDEN_ELEMENTS.contains(&element.value().name())
}

/// Concatenates the text of an element, skipping hidden subtrees
fn visible_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    push_visible_text(element, &mut text);
    text
}

fn push_visible_text(element: ElementRef<'_>, text: &mut String) {
    for child in element.children() {
        if let Some(run) = child.value().as_text() {
            text.push_str(run);
        } else if let Some(child) = ElementRef::wrap(child) {
            if !is_hidden(child) {
                push_visible_text(child, text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragments(html: &str) -> Vec<String> {
        extract_text(&Html::parse_document(html))
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  hello\t\tworld \n again  "), "hello world again");
        assert_eq!(normalize_text("\t\t"), "");
        assert_eq!(normalize_text("a\u{a0}\u{a0}b"), "a b");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "  Tabs\tand   spaces\n\n",
            "already normal",
            "\u{2003}em\u{2003}space",
            "",
        ];
        for sample in samples {
            let once = normalize_text(sample);
            assert_eq!(normalize_text(&once), once);
        }
    }

    #[test]
    fn test_pre_order_with_full_text_content() {
        let html = r#"<html><body><div><h1>Title</h1><p>Para <b>bold</b></p></div></body></html>"#;
        assert_eq!(
            fragments(html),
            vec![
                "TitlePara bold".to_string(),
                "TitlePara bold".to_string(),
                "Title".to_string(),
                "Para bold".to_string(),
                "bold".to_string(),
            ]
        );
    }

    #[test]
    fn test_short_and_empty_fragments_dropped() {
        let html = r#"<html><body><span>x</span><span>   </span><span>ok</span></body></html>"#;
        assert_eq!(fragments(html), vec!["x ok".to_string(), "ok".to_string()]);
    }

    #[test]
    fn test_tabs_are_normalized() {
        let html = "<html><body><p>\tone\ttwo\t</p></body></html>";
        assert_eq!(fragments(html), vec!["one two".to_string(), "one two".to_string()]);
    }

    #[test]
    fn test_hidden_elements_skipped() {
        let html = r#"<html><body><script>var x = 1;</script><p>Shown</p><style>p{}</style></body></html>"#;
        assert_eq!(fragments(html), vec!["Shown".to_string(), "Shown".to_string()]);
    }

    #[test]
    fn test_empty_body() {
        assert!(fragments("<html><body></body></html>").is_empty());
    }

    #[test]
    fn test_fragments_never_empty() {
        let html = r#"<html><body><div> <p> </p> <p>a</p> </div><ul><li>Item one</li></ul></body></html>"#;
        for fragment in fragments(html) {
            assert!(fragment.chars().count() >= MIN_FRAGMENT_CHARS);
            assert_eq!(normalize_text(&fragment), fragment);
        }
    }

    #[test]
    fn test_extract_title() {
        let html = "<html><head><title>  My \n Page </title></head><body></body></html>";
        assert_eq!(extract_title(&Html::parse_document(html)), "My Page");
        assert_eq!(extract_title(&Html::parse_document("<p>none</p>")), "");
    }
}
