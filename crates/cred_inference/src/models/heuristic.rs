use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use cred_core::{AnalysisInput, AnalysisModel, AnalysisResult, Error, Result, SentimentClassifier};

use crate::heuristics::{self, SENTIMENT_PREFIX_CHARS};

/// Deterministic rule-based engine. The classifier is injected by the owning
/// session and reused across calls; when it fails the sentiment rule is
/// skipped and the remaining rules still run.
pub struct HeuristicEngine {
    classifier: Option<Arc<dyn SentimentClassifier>>,
}

impl fmt::Debug for HeuristicEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeuristicEngine")
            .field("classifier", &self.classifier.as_ref().map(|_| "<dyn SentimentClassifier>"))
            .finish()
    }
}

impl HeuristicEngine {
    pub fn new(classifier: Option<Arc<dyn SentimentClassifier>>) -> Self {
        Self { classifier }
    }
}

#[async_trait]
impl AnalysisModel for HeuristicEngine {
    fn name(&self) -> &str {
        "heuristic"
    }

    async fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResult> {
        let text = input.text().ok_or_else(|| {
            Error::InvalidInput(
                "articleText is required for heuristic analysis; extract the URL first"
                    .to_string(),
            )
        })?;

        let sentiment = match &self.classifier {
            Some(classifier) => {
                let prefix: String = text.chars().take(SENTIMENT_PREFIX_CHARS).collect();
                match classifier.classify(&prefix).await {
                    Ok(sentiment) => Some(sentiment),
                    Err(e) => {
                        tracing::warn!("sentiment classifier unavailable, skipping check: {}", e);
                        None
                    }
                }
            }
            None => None,
        };

        heuristics::analyze_text(text, sentiment.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cred_core::{Sentiment, SentimentLabel};

    struct FailingClassifier;

    #[async_trait]
    impl SentimentClassifier for FailingClassifier {
        async fn classify(&self, _text: &str) -> Result<Sentiment> {
            Err(Error::ClassifierUnavailable("model not loaded".to_string()))
        }
    }

    struct AngryClassifier;

    #[async_trait]
    impl SentimentClassifier for AngryClassifier {
        async fn classify(&self, _text: &str) -> Result<Sentiment> {
            Ok(Sentiment {
                label: SentimentLabel::Negative,
                score: 0.97,
            })
        }
    }

    #[tokio::test]
    async fn test_classifier_failure_is_recovered() {
        let engine = HeuristicEngine::new(Some(Arc::new(FailingClassifier)));
        let input = AnalysisInput::from_text("The town opened a new library on Main Street.");
        let result = engine.analyze(&input).await.unwrap();
        // Only the short-length penalty applies when the sentiment check is skipped.
        assert_eq!(result.credibility_score, 40);
    }

    #[tokio::test]
    async fn test_injected_classifier_feeds_the_sentiment_rule() {
        let engine = HeuristicEngine::new(Some(Arc::new(AngryClassifier)));
        let input = AnalysisInput::from_text("The town opened a new library on Main Street.");
        let result = engine.analyze(&input).await.unwrap();
        assert_eq!(result.credibility_score, 20);
        assert!(result.explanation.contains("Highly emotional"));
    }

    #[tokio::test]
    async fn test_url_only_input_is_rejected() {
        let engine = HeuristicEngine::new(None);
        let input = AnalysisInput::from_url("https://example.com/story");
        assert!(matches!(
            engine.analyze(&input).await,
            Err(Error::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_idempotent_across_calls() {
        let engine = HeuristicEngine::new(Some(Arc::new(AngryClassifier)));
        let input = AnalysisInput::from_text(
            "According to a study, the bridge repairs finished two months early.",
        );
        let first = engine.analyze(&input).await.unwrap();
        let second = engine.analyze(&input).await.unwrap();
        assert_eq!(first, second);
    }
}
