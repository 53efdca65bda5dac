use scraper::{Html, Selector};
use serde_json::Value;

pub(crate) struct ArticleMetadata {
    pub headline: Option<String>,
    pub body: Option<String>,
}

/// Walks every JSON-LD script in the document and returns the first
/// headline/articleBody pair found, including inside @graph arrays.
pub(crate) fn extract_article(document: &Html) -> Option<ArticleMetadata> {
    let selector = Selector::parse("script[type='application/ld+json']").ok()?;

    for script in document.select(&selector) {
        let raw = script.text().collect::<String>();
        let Ok(json) = serde_json::from_str::<Value>(raw.trim()) else {
            continue;
        };
        if let Some(metadata) = walk(&json) {
            return Some(metadata);
        }
    }
    None
}

fn walk(value: &Value) -> Option<ArticleMetadata> {
    match value {
        Value::Object(obj) => {
            let headline = obj
                .get("headline")
                .and_then(Value::as_str)
                .map(|s| s.trim().to_string());
            let body = obj
                .get("articleBody")
                .and_then(Value::as_str)
                .map(|s| s.trim().to_string());
            if headline.is_some() || body.is_some() {
                return Some(ArticleMetadata { headline, body });
            }
            if let Some(graph) = obj.get("@graph") {
                return walk(graph);
            }
            None
        }
        Value::Array(items) => items.iter().find_map(walk),
        _ => None,
    }
}
