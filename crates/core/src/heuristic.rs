//! Keyword-based fallback classifier.
//!
//! When the LLM is unreachable or answers garbage, tags and category come
//! from these static keyword tables instead. The tables are data: ordered
//! groups of `(pattern, tag)` rules compiled once at startup, matched with
//! word boundaries against the lowercased title+description text.
//!
//! Within a group only the FIRST matching rule fires, so a keyword-dense
//! title yields at most one tag per topic group.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::classify::Category;

/// One keyword rule: a literal pattern and the tag it produces.
struct TagRule {
    pattern: &'static str,
    tag: &'static str,
}

macro_rules! rule {
    ($pattern:literal => $tag:literal) => {
        TagRule { pattern: $pattern, tag: $tag }
    };
}

/// Topic groups in priority order: languages/frameworks, AI/ML,
/// cloud/devops, design, business, learning/productivity.
const TAG_GROUPS: &[&[TagRule]] = &[
    &[
        rule!("typescript" => "typescript"),
        rule!("javascript" => "javascript"),
        rule!("rust" => "rust"),
        rule!("python" => "python"),
        rule!("react" => "react"),
        rule!("vue" => "vue"),
        rule!("svelte" => "svelte"),
        rule!("node" => "nodejs"),
        rule!("django" => "django"),
        rule!("rails" => "rails"),
        rule!("kotlin" => "kotlin"),
        rule!("swift" => "swift"),
        rule!("java" => "java"),
        rule!("go" => "go"),
    ],
    &[
        rule!("machine learning" => "machine-learning"),
        rule!("deep learning" => "machine-learning"),
        rule!("artificial intelligence" => "ai"),
        rule!("llm" => "llm"),
        rule!("gpt" => "llm"),
        rule!("openai" => "ai"),
        rule!("ai" => "ai"),
    ],
    &[
        rule!("kubernetes" => "kubernetes"),
        rule!("docker" => "docker"),
        rule!("terraform" => "terraform"),
        rule!("aws" => "aws"),
        rule!("azure" => "azure"),
        rule!("serverless" => "serverless"),
        rule!("devops" => "devops"),
        rule!("cloud" => "cloud"),
    ],
    &[
        rule!("figma" => "figma"),
        rule!("design system" => "design-system"),
        rule!("typography" => "typography"),
        rule!("accessibility" => "accessibility"),
        rule!("ux" => "ux"),
        rule!("ui" => "ui"),
        rule!("design" => "design"),
    ],
    &[
        rule!("startup" => "startup"),
        rule!("saas" => "saas"),
        rule!("marketing" => "marketing"),
        rule!("finance" => "finance"),
        rule!("sales" => "sales"),
        rule!("business" => "business"),
    ],
    &[
        rule!("tutorial" => "tutorial"),
        rule!("course" => "learning"),
        rule!("productivity" => "productivity"),
        rule!("workflow" => "workflow"),
        rule!("note-taking" => "notes"),
        rule!("learning" => "learning"),
    ],
];

/// Category keyword lists, tested in priority order. First group with any
/// match wins; no match means `Other`.
const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (
        Category::Technology,
        &[
            "programming", "software", "code", "coding", "developer", "engineering", "api",
            "framework", "database", "linux", "web", "rust", "python", "javascript", "typescript",
            "kubernetes", "docker", "cloud", "ai", "machine learning", "llm", "data",
        ],
    ),
    (
        Category::Design,
        &["design", "figma", "typography", "ux", "ui", "illustration", "branding"],
    ),
    (
        Category::Business,
        &["startup", "business", "marketing", "finance", "sales", "saas", "investment", "economy"],
    ),
    (
        Category::Productivity,
        &["productivity", "workflow", "habit", "note-taking", "time management", "learning", "tutorial", "course"],
    ),
];

/// Words too generic to be worth a tag when falling back to title words.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "that", "this", "from", "your", "have", "what", "when", "where",
    "will", "how", "why", "are", "was", "were", "been", "into", "about", "over", "under", "their",
    "them", "they", "these", "those", "using", "based", "more", "most", "some", "such", "only",
    "very", "just", "like", "make", "made", "makes", "building", "introduction", "guide",
    "complete", "everything",
];

static COMPILED_TAG_GROUPS: Lazy<Vec<Vec<(Regex, &'static str)>>> = Lazy::new(|| {
    TAG_GROUPS
        .iter()
        .map(|group| group.iter().map(|r| (word_pattern(r.pattern), r.tag)).collect())
        .collect()
});

static COMPILED_CATEGORY_RULES: Lazy<Vec<(Category, Vec<Regex>)>> = Lazy::new(|| {
    CATEGORY_RULES
        .iter()
        .map(|(category, keywords)| (*category, keywords.iter().map(|k| word_pattern(k)).collect()))
        .collect()
});

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[\w'-]+\b").unwrap());

fn word_pattern(keyword: &str) -> Regex {
    Regex::new(&format!(r"\b{}\b", regex::escape(keyword))).unwrap()
}

/// Derive up to 3 tags from title+description text.
///
/// Each topic group contributes at most its first matching rule. If no
/// group matches at all, up to 2 "meaningful" title words stand in.
pub fn heuristic_tags(title: &str, description: &str) -> Vec<String> {
    let text = format!("{} {}", title, description).to_lowercase();

    let mut tags = Vec::new();
    for group in COMPILED_TAG_GROUPS.iter() {
        for (pattern, tag) in group {
            if pattern.is_match(&text) {
                tags.push((*tag).to_string());
                break;
            }
        }
    }
    tags.truncate(3);

    if tags.is_empty() {
        tags = meaningful_words(title);
    }

    tags
}

/// Independent category heuristic over the same text.
pub fn heuristic_category(title: &str, description: &str) -> Category {
    let text = format!("{} {}", title, description).to_lowercase();

    for (category, patterns) in COMPILED_CATEGORY_RULES.iter() {
        if patterns.iter().any(|p| p.is_match(&text)) {
            return *category;
        }
    }

    Category::Other
}

/// Up to 2 title words with length strictly between 3 and 15, stopwords
/// excluded.
fn meaningful_words(title: &str) -> Vec<String> {
    let lower = title.to_lowercase();
    WORD.find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|w| w.len() > 3 && w.len() < 15 && !STOPWORDS.contains(w))
        .take(2)
        .map(|w| w.to_string())
        .collect()
}
