use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Collapse every whitespace run to a single space and trim both ends.
pub fn clean_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract a normalized `(title, body)` pair from raw markup.
///
/// Body text comes from the first `<article>` (every `p`/`div` beneath it),
/// else the first `<main>` (same), else every `<p>` in the document. Empty or
/// unusable markup yields two empty strings.
pub fn extract_title_and_body(html: &str) -> (String, String) {
    if html.trim().is_empty() {
        return (String::new(), String::new());
    }

    let document = Html::parse_document(html);
    let title = extract_title(&document);
    let body = extract_body(&document);
    debug!(
        "Extracted title ({} chars) and body ({} chars)",
        title.len(),
        body.len()
    );
    (title, body)
}

fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .map(|el| clean_whitespace(&el.text().collect::<String>()))
        .unwrap_or_default()
}

fn extract_body(document: &Html) -> String {
    let texts = if let Some(article) = first_element(document, "article") {
        block_texts(article, "p, div")
    } else if let Some(main) = first_element(document, "main") {
        block_texts(main, "p, div")
    } else if let Ok(selector) = Selector::parse("p") {
        document.select(&selector).map(element_text).collect()
    } else {
        Vec::new()
    };

    clean_whitespace(&texts.join(" "))
}

fn first_element<'a>(document: &'a Html, tag: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(tag).ok()?;
    document.select(&selector).next()
}

/// Text of every descendant matching `selector`. Nested blocks contribute their
/// text once per matching ancestor.
fn block_texts(scope: ElementRef<'_>, selector: &str) -> Vec<String> {
    match Selector::parse(selector) {
        Ok(sel) => scope.select(&sel).map(element_text).collect(),
        Err(_) => Vec::new(),
    }
}

/// Text nodes of an element, each trimmed, empties dropped, joined by spaces.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_whitespace() {
        assert_eq!(clean_whitespace("  This   is \n\n\t some   text \n "), "This is some text");
        assert_eq!(clean_whitespace(""), "");
    }

    #[test]
    fn clean_whitespace_is_idempotent() {
        let once = clean_whitespace(" a\tb \r\n c  ");
        assert_eq!(clean_whitespace(&once), once);
    }

    #[test]
    fn prefers_article_over_main_and_paragraphs() {
        let html = r#"<html><head><title>  My
            Page </title></head><body>
            <p>Outside paragraph.</p>
            <main><p>Main text.</p></main>
            <article><p>First   para.</p><div>Second block.</div></article>
        </body></html>"#;
        let (title, body) = extract_title_and_body(html);
        assert_eq!(title, "My Page");
        assert_eq!(body, "First para. Second block.");
    }

    #[test]
    fn falls_back_to_main() {
        let html = "<html><body><p>Outside.</p><main><div>Inside main.</div></main></body></html>";
        let (_, body) = extract_title_and_body(html);
        assert_eq!(body, "Inside main.");
    }

    #[test]
    fn falls_back_to_all_paragraphs() {
        let html = "<html><body><p>One.</p><section><p>Two <b>bold</b>.</p></section></body></html>";
        let (title, body) = extract_title_and_body(html);
        assert_eq!(title, "");
        assert_eq!(body, "One. Two bold .");
    }

    #[test]
    fn nested_blocks_repeat_text() {
        let html = "<article><div><p>Nested.</p></div></article>";
        let (_, body) = extract_title_and_body(html);
        assert_eq!(body, "Nested. Nested.");
    }

    #[test]
    fn empty_and_malformed_input_never_fails() {
        assert_eq!(extract_title_and_body(""), (String::new(), String::new()));
        assert_eq!(extract_title_and_body("   \n"), (String::new(), String::new()));
        let (title, body) = extract_title_and_body("<<<>>><p><div></title>");
        assert!(title.is_empty());
        assert!(body.is_empty());
        let (_, body) = extract_title_and_body("plain text without tags");
        assert_eq!(body, "");
    }
}
