//! Generic page metadata extraction.
//!
//! Pulls a `{title, description}` pair out of fetched HTML by walking the
//! usual meta-tag cascades. Extraction never fails: the caller's URL
//! hostname is the title of last resort.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::parse::Document;

/// Metadata extracted from a single page.
///
/// Invariant: `title` is non-empty by the time [`extract_metadata`]
/// returns. `description` may legitimately be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Document {
    /// Extract title with priority fallback:
    /// 1. Open Graph `og:title`
    /// 2. Twitter `twitter:title`
    /// 3. `<title>` element
    /// 4. First `<h1>` element
    pub fn extract_title(&self) -> Option<String> {
        if let Some(title) = self.meta_content("og:title") {
            return Some(title);
        }

        if let Some(title) = self.meta_content("twitter:title") {
            return Some(title);
        }

        if let Some(title) = self.title() {
            let title = clean_text(&title);
            if !title.is_empty() {
                return Some(title);
            }
        }

        self.first_text("h1").map(|t| clean_text(&t)).filter(|t| !t.is_empty())
    }

    /// Extract description with priority fallback:
    /// 1. Open Graph `og:description`
    /// 2. Twitter `twitter:description`
    /// 3. Meta `description`
    pub fn extract_description(&self) -> Option<String> {
        if let Some(desc) = self.meta_content("og:description") {
            return Some(desc);
        }

        if let Some(desc) = self.meta_content("twitter:description") {
            return Some(desc);
        }

        self.meta_content("description")
    }
}

/// Extract metadata from fetched HTML.
///
/// The `url` the HTML came from supplies the hostname used as the final
/// title fallback, so the returned title is always non-empty.
pub fn extract_metadata(html: &str, url: &Url) -> PageMetadata {
    let doc = Document::parse(html);

    let title = doc
        .extract_title()
        .unwrap_or_else(|| url.host_str().unwrap_or("bookmark").to_string());
    let description = doc.extract_description().map(|d| clean_text(&d)).filter(|d| !d.is_empty());

    PageMetadata { title, description }
}

/// Collapse runs of whitespace (titles often span multiple source lines).
pub(crate) fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML_WITH_META: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <title>Element Title</title>
            <meta property="og:title" content="OG Title">
            <meta property="og:description" content="OG Description">
            <meta name="twitter:title" content="Twitter Title">
            <meta name="description" content="Plain description">
        </head>
        <body>
            <h1>Main Heading</h1>
        </body>
        </html>
    "#;

    const HTML_BARE: &str = r#"
        <!DOCTYPE html>
        <html>
        <head><meta charset="UTF-8"></head>
        <body>
            <h1>
                Heading
                Only
            </h1>
        </body>
        </html>
    "#;

    fn example_url() -> Url {
        Url::parse("https://example.com/post").unwrap()
    }

    #[test]
    fn test_og_title_wins() {
        let meta = extract_metadata(HTML_WITH_META, &example_url());
        assert_eq!(meta.title, "OG Title");
        assert_eq!(meta.description, Some("OG Description".to_string()));
    }

    #[test]
    fn test_twitter_title_before_element() {
        let html = r#"
            <html><head>
                <title>Element Title</title>
                <meta name="twitter:title" content="Twitter Title">
            </head><body></body></html>
        "#;
        let meta = extract_metadata(html, &example_url());
        assert_eq!(meta.title, "Twitter Title");
    }

    #[test]
    fn test_title_element_fallback() {
        let html = "<html><head><title>  Just a\n  Title  </title></head><body></body></html>";
        let meta = extract_metadata(html, &example_url());
        assert_eq!(meta.title, "Just a Title");
        assert_eq!(meta.description, None);
    }

    #[test]
    fn test_h1_fallback_collapses_whitespace() {
        let meta = extract_metadata(HTML_BARE, &example_url());
        assert_eq!(meta.title, "Heading Only");
    }

    #[test]
    fn test_hostname_last_resort() {
        let meta = extract_metadata("<html><body><p>nothing here</p></body></html>", &example_url());
        assert_eq!(meta.title, "example.com");
    }

    #[test]
    fn test_description_meta_fallback() {
        let html = r#"
            <html><head>
                <title>T</title>
                <meta name="description" content="Plain description">
            </head><body></body></html>
        "#;
        let meta = extract_metadata(html, &example_url());
        assert_eq!(meta.description, Some("Plain description".to_string()));
    }

    #[test]
    fn test_empty_description_dropped() {
        let html = r#"
            <html><head>
                <title>T</title>
                <meta name="description" content="   ">
            </head><body></body></html>
        "#;
        let meta = extract_metadata(html, &example_url());
        assert_eq!(meta.description, None);
    }
}
