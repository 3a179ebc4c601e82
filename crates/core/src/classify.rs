//! LLM classification with layered fallbacks.
//!
//! The classifier asks a completion endpoint to place a page into a
//! closed category taxonomy with 1-3 tags. Every failure mode degrades
//! instead of surfacing: unparseable JSON falls back to a substring
//! category search plus heuristic tags, a failed request falls back to
//! the heuristic entirely, and an empty tag set is patched with a
//! generic tag so the 1..=3 invariant always holds.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::heuristic::{heuristic_category, heuristic_tags};
use crate::llm::LlmClient;
use crate::{Result, StashError};

/// The closed category taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Technology,
    Design,
    Business,
    Productivity,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Technology,
        Category::Design,
        Category::Business,
        Category::Productivity,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technology => "Technology",
            Category::Design => "Design",
            Category::Business => "Business",
            Category::Productivity => "Productivity",
            Category::Other => "Other",
        }
    }

    /// Case-insensitive exact-name lookup.
    pub fn parse(name: &str) -> Option<Category> {
        let name = name.trim();
        Category::ALL.into_iter().find(|c| c.as_str().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final classification: one category, 1 to 3 normalized tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub category: Category,
    pub tags: Vec<String>,
}

/// The JSON shape the LLM is instructed to return.
#[derive(Debug, Deserialize)]
pub struct LlmReply {
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

const SYSTEM_PROMPT: &str = "You are a bookmarking assistant that classifies web pages. \
Respond with strict JSON only, no prose and no markdown fences.";

const FALLBACK_TAG: &str = "bookmark";

fn build_prompt(title: &str, description: &str, hostname: &str) -> String {
    format!(
        "Classify this web page into exactly one category and 1-3 tags.\n\
         \n\
         Title: {title}\n\
         Description: {description}\n\
         Site: {hostname}\n\
         \n\
         Categories (pick exactly one): Technology, Design, Business, Productivity, Other\n\
         \n\
         Tag rules:\n\
         - 1 to 3 tags\n\
         - prefer broad, general topics over narrow ones\n\
         - lowercase, hyphenate multi-word tags (e.g. \"machine-learning\")\n\
         - no generic filler words such as \"article\", \"blog\", \"website\", \"page\"\n\
         \n\
         Respond with JSON in exactly this shape:\n\
         {{\"category\": \"Technology\", \"tags\": [\"rust\", \"web\"]}}"
    )
}

/// Classifier over an optional LLM client.
///
/// Constructed with `None` (no API key) it is a pure keyword classifier;
/// callers that require the LLM check [`Classifier::has_llm`] first.
pub struct Classifier {
    llm: Option<LlmClient>,
}

impl Classifier {
    pub fn new(llm: Option<LlmClient>) -> Self {
        Self { llm }
    }

    /// Build from the environment; silently heuristic-only without a key.
    pub fn from_env() -> Self {
        Self::new(LlmClient::from_env().ok())
    }

    pub fn has_llm(&self) -> bool {
        self.llm.is_some()
    }

    /// Classify a page. Infallible: every failure mode degrades to the
    /// keyword heuristic.
    pub async fn classify(&self, title: &str, description: &str, hostname: &str) -> Classification {
        let Some(llm) = &self.llm else {
            return heuristic_classification(title, description);
        };

        let prompt = build_prompt(title, description, hostname);
        match llm.complete(SYSTEM_PROMPT, &prompt).await {
            Ok(raw) => match parse_llm_reply(&raw) {
                Ok(reply) => finalize(reply, title, description),
                Err(e) => {
                    warn!(error = %e, "LLM reply unparseable, rescuing category from raw text");
                    let category =
                        rescue_category(&raw).unwrap_or_else(|| heuristic_category(title, description));
                    Classification {
                        category,
                        tags: normalize_tags(heuristic_tags(title, description)),
                    }
                }
            },
            Err(e) => {
                warn!(error = %e, "LLM request failed, using keyword heuristic");
                heuristic_classification(title, description)
            }
        }
    }
}

fn heuristic_classification(title: &str, description: &str) -> Classification {
    Classification {
        category: heuristic_category(title, description),
        tags: normalize_tags(heuristic_tags(title, description)),
    }
}

/// Parse a raw LLM reply: strip markdown fences, then strict JSON.
pub fn parse_llm_reply(raw: &str) -> Result<LlmReply> {
    let stripped = strip_code_fences(raw);
    serde_json::from_str(stripped).map_err(|e| StashError::LlmParse(e.to_string()))
}

/// Models love wrapping JSON in ```json fences despite instructions.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Substring search for a literal category name in otherwise unusable
/// LLM output, in taxonomy order.
fn rescue_category(raw: &str) -> Option<Category> {
    let lower = raw.to_lowercase();
    Category::ALL.into_iter().find(|c| lower.contains(&c.as_str().to_lowercase()))
}

/// Turn a parsed reply into a final classification, patching whatever
/// the model got wrong.
fn finalize(reply: LlmReply, title: &str, description: &str) -> Classification {
    let category = Category::parse(&reply.category)
        .or_else(|| rescue_category(&reply.category))
        .unwrap_or_else(|| heuristic_category(title, description));

    let tags = if reply.tags.is_empty() {
        heuristic_tags(title, description)
    } else {
        reply.tags
    };

    debug!(category = %category, tag_count = tags.len(), "classification finalized");

    Classification { category, tags: normalize_tags(tags) }
}

/// Normalize tags: lowercase, whitespace to hyphens, drop empties, cap
/// at 3, patch an empty set with the generic fallback tag.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = tags
        .iter()
        .map(|t| t.trim().to_lowercase().split_whitespace().collect::<Vec<_>>().join("-"))
        .filter(|t| !t.is_empty())
        .collect();

    out.truncate(3);

    if out.is_empty() {
        out.push(FALLBACK_TAG.to_string());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
        assert_eq!(Category::parse("technology"), Some(Category::Technology));
        assert_eq!(Category::parse("Cooking"), None);
    }

    #[test]
    fn test_category_serializes_to_name() {
        let json = serde_json::to_string(&Category::Technology).unwrap();
        assert_eq!(json, "\"Technology\"");
    }

    #[test]
    fn test_parse_fenced_reply() {
        let raw = "```json\n{\"category\":\"Technology\",\"tags\":[\"react\",\"frontend\"]}\n```";
        let reply = parse_llm_reply(raw).unwrap();
        assert_eq!(reply.category, "Technology");
        assert_eq!(reply.tags, vec!["react", "frontend"]);
    }

    #[test]
    fn test_parse_bare_fences() {
        let raw = "```\n{\"category\":\"Design\",\"tags\":[\"figma\"]}\n```";
        let reply = parse_llm_reply(raw).unwrap();
        assert_eq!(reply.category, "Design");
    }

    #[test]
    fn test_parse_plain_json() {
        let reply = parse_llm_reply("{\"category\":\"Other\",\"tags\":[]}").unwrap();
        assert_eq!(reply.category, "Other");
        assert!(reply.tags.is_empty());
    }

    #[test]
    fn test_parse_prose_fails() {
        assert!(matches!(
            parse_llm_reply("Sure! I'd classify this as Technology."),
            Err(StashError::LlmParse(_))
        ));
    }

    #[test]
    fn test_rescue_category_from_prose() {
        assert_eq!(
            rescue_category("I think this page is about Design, mostly."),
            Some(Category::Design)
        );
        assert_eq!(rescue_category("no category here"), None);
    }

    #[test]
    fn test_finalize_patches_unknown_category() {
        let reply = LlmReply { category: "Cooking".to_string(), tags: vec!["recipes".to_string()] };
        let result = finalize(reply, "Sourdough at home", "");
        assert_eq!(result.category, Category::Other);
        assert_eq!(result.tags, vec!["recipes"]);
    }

    #[test]
    fn test_finalize_regenerates_missing_tags() {
        let reply = LlmReply { category: "Technology".to_string(), tags: vec![] };
        let result = finalize(reply, "Building a Kubernetes Operator in Go", "");
        assert_eq!(result.category, Category::Technology);
        assert!(result.tags.contains(&"kubernetes".to_string()));
    }

    #[test]
    fn test_normalize_lowercases_and_hyphenates() {
        let tags = normalize_tags(vec!["Machine  Learning".to_string(), " Rust ".to_string()]);
        assert_eq!(tags, vec!["machine-learning", "rust"]);
    }

    #[test]
    fn test_normalize_caps_at_three() {
        let tags = normalize_tags(vec![
            "a1".to_string(),
            "b2".to_string(),
            "c3".to_string(),
            "d4".to_string(),
        ]);
        assert_eq!(tags.len(), 3);
    }

    #[test]
    fn test_normalize_patches_empty_with_bookmark() {
        assert_eq!(normalize_tags(vec![]), vec!["bookmark"]);
        assert_eq!(normalize_tags(vec!["   ".to_string()]), vec!["bookmark"]);
    }

    #[tokio::test]
    async fn test_keyless_classifier_is_heuristic() {
        let classifier = Classifier::new(None);
        let result = classifier
            .classify("Building a Kubernetes Operator in Go", "", "example.com")
            .await;
        assert_eq!(result.category, Category::Technology);
        assert!(result.tags.contains(&"kubernetes".to_string()));
        assert!(result.tags.len() >= 1 && result.tags.len() <= 3);
    }
}
