use async_trait::async_trait;
use cred_core::{Error, Result, Sentiment, SentimentClassifier, SentimentLabel};

const NEGATIVE_WORDS: &[&str] = &[
    "outrage", "disaster", "horrible", "terrible", "catastrophe", "fraud", "corrupt", "scandal",
    "fear", "hate", "destroy", "crisis", "shameful", "disgrace", "evil", "lies", "attack",
    "threat", "panic", "doom", "collapse", "dangerous",
];

const POSITIVE_WORDS: &[&str] = &[
    "progress", "improve", "success", "breakthrough", "benefit", "hope", "support", "growth",
    "recovery", "achievement", "win", "advance", "promising", "healthy", "strong", "safe",
];

/// Word-list sentiment classifier. Deterministic and entirely local, so the
/// heuristic engine always has a classifier available without network access.
#[derive(Debug, Clone, Default)]
pub struct LexiconClassifier;

impl LexiconClassifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SentimentClassifier for LexiconClassifier {
    async fn classify(&self, text: &str) -> Result<Sentiment> {
        if text.trim().is_empty() {
            return Err(Error::ClassifierUnavailable(
                "no text to classify".to_string(),
            ));
        }

        let lowered = text.to_lowercase();
        let mut negative = 0usize;
        let mut positive = 0usize;
        for word in lowered.split_whitespace() {
            let word = word.trim_matches(|c: char| !c.is_alphanumeric());
            if NEGATIVE_WORDS.contains(&word) {
                negative += 1;
            } else if POSITIVE_WORDS.contains(&word) {
                positive += 1;
            }
        }

        let total = negative + positive;
        if total == 0 {
            // Nothing emotionally loaded either way.
            return Ok(Sentiment {
                label: SentimentLabel::Positive,
                score: 0.5,
            });
        }

        let (label, dominant) = if negative > positive {
            (SentimentLabel::Negative, negative)
        } else {
            (SentimentLabel::Positive, positive)
        };
        Ok(Sentiment {
            label,
            score: dominant as f32 / total as f32,
        })
    }
}
