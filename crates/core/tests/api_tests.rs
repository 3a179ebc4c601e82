//! Library API integration tests
use linkstash_core::*;

const ARTICLE_HTML: &str = r#"
    <!DOCTYPE html>
    <html lang="en">
    <head>
        <meta charset="UTF-8">
        <title>Element Title</title>
        <meta property="og:title" content="Building a Kubernetes Operator in Go">
        <meta property="og:description" content="A walkthrough of controller-runtime internals.">
    </head>
    <body><h1>Ignored</h1></body>
    </html>
"#;

#[test]
fn test_extract_metadata_api() {
    let url = url::Url::parse("https://blog.example.com/k8s-operator").unwrap();
    let meta = extract_metadata(ARTICLE_HTML, &url);

    assert_eq!(meta.title, "Building a Kubernetes Operator in Go");
    assert!(meta.description.unwrap().contains("controller-runtime"));
}

#[tokio::test]
async fn test_extract_and_classify_without_llm() {
    let url = url::Url::parse("https://blog.example.com/k8s-operator").unwrap();
    let meta = extract_metadata(ARTICLE_HTML, &url);

    let classifier = Classifier::new(None);
    let result = classifier
        .classify(&meta.title, meta.description.as_deref().unwrap_or(""), "blog.example.com")
        .await;

    assert_eq!(result.category, Category::Technology);
    assert!(result.tags.contains(&"kubernetes".to_string()));
    assert!(result.tags.len() >= 1 && result.tags.len() <= 3);
}

#[tokio::test]
async fn test_classification_feeds_vocabulary_once() {
    let store = MemoryVocabulary::new();
    let classifier = Classifier::new(None);

    for _ in 0..2 {
        let result = classifier.classify("Figma component libraries", "", "example.com").await;
        sync_vocabulary(&store, result.category.as_str(), &result.tags).await;
    }

    let categories = store.categories().await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Design");

    let tags = store.tags().await.unwrap();
    let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
    let unique: std::collections::HashSet<&str> = names.iter().copied().collect();
    assert_eq!(names.len(), unique.len());
}

#[test]
fn test_parsed_llm_reply_shapes() {
    let fenced = "```json\n{\"category\":\"Technology\",\"tags\":[\"react\",\"frontend\"]}\n```";
    let reply = parse_llm_reply(fenced).unwrap();
    assert_eq!(reply.category, "Technology");
    assert_eq!(reply.tags, vec!["react", "frontend"]);
}
