//! HTML parsing helpers.
//!
//! This module provides the [`Document`] and [`Element`] types, a thin
//! layer over `scraper` for querying pages with CSS selectors. Metadata
//! extraction (`og:` tags and friends) lives in [`crate::metadata`].

use scraper::{Html, Selector};

use crate::{Result, StashError};

/// A parsed HTML document.
///
/// # Example
///
/// ```rust
/// use linkstash_core::parse::Document;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html);
/// assert_eq!(doc.title(), Some("Test".to_string()));
/// ```
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string. Malformed markup is recovered the same
    /// way a browser would; this never fails.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`StashError::HtmlParse`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| StashError::HtmlParse(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Gets the content of the `<title>` element, if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }

    /// Gets a meta tag's `content` by its `name=` or `property=` attribute.
    ///
    /// Open Graph tags use `property=`, Twitter Cards and standard meta
    /// tags use `name=`; both spellings appear in the wild for either, so
    /// both are checked.
    pub fn meta_content(&self, attr: &str) -> Option<String> {
        for query in [format!("meta[name=\"{}\"]", attr), format!("meta[property=\"{}\"]", attr)] {
            if let Ok(elements) = self.select(&query)
                && let Some(el) = elements.first()
                && let Some(content) = el.attr("content")
            {
                let content = content.trim();
                if !content.is_empty() {
                    return Some(content.to_string());
                }
            }
        }

        None
    }

    /// Gets the trimmed text of the first element matching `selector`,
    /// skipping empty matches.
    pub fn first_text(&self, selector: &str) -> Option<String> {
        let elements = self.select(selector).ok()?;
        elements.iter().map(Element::text).map(|t| t.trim().to_string()).find(|t| !t.is_empty())
    }
}

/// A wrapper around scraper's `ElementRef`.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute, or `None` if absent.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <title>Test Page</title>
            <meta property="og:title" content="OG Title">
            <meta name="description" content="A plain description">
        </head>
        <body>
            <h1>Heading</h1>
            <p class="content">Paragraph 1</p>
            <p class="content">Paragraph 2</p>
            <a href="https://example.com">Link</a>
        </body>
        </html>
    "#;

    #[test]
    fn test_parse_document() {
        let doc = Document::parse(SAMPLE_HTML);
        assert_eq!(doc.title(), Some("Test Page".to_string()));
    }

    #[test]
    fn test_select_elements() {
        let doc = Document::parse(SAMPLE_HTML);
        let elements = doc.select("p.content").unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].text(), "Paragraph 1");
        assert_eq!(elements[1].text(), "Paragraph 2");
    }

    #[test]
    fn test_element_attributes() {
        let doc = Document::parse(SAMPLE_HTML);
        let elements = doc.select("a").unwrap();

        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].attr("href"), Some("https://example.com"));
    }

    #[test]
    fn test_meta_content_by_property() {
        let doc = Document::parse(SAMPLE_HTML);
        assert_eq!(doc.meta_content("og:title"), Some("OG Title".to_string()));
    }

    #[test]
    fn test_meta_content_by_name() {
        let doc = Document::parse(SAMPLE_HTML);
        assert_eq!(doc.meta_content("description"), Some("A plain description".to_string()));
    }

    #[test]
    fn test_meta_content_missing() {
        let doc = Document::parse(SAMPLE_HTML);
        assert_eq!(doc.meta_content("twitter:title"), None);
    }

    #[test]
    fn test_first_text_skips_empty() {
        let html = "<div><h1>  </h1><h1>Real Heading</h1></div>";
        let doc = Document::parse(html);
        assert_eq!(doc.first_text("h1"), Some("Real Heading".to_string()));
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse(SAMPLE_HTML);
        let result = doc.select("[[invalid");
        assert!(matches!(result, Err(StashError::HtmlParse(_))));
    }
}
