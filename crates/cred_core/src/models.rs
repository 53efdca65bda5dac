use async_trait::async_trait;

use crate::types::{AnalysisInput, AnalysisResult, Sentiment};
use crate::Result;

/// An analysis engine: heuristic rules or a remote gateway, behind one
/// contract. Engines are stateless and safe to share across requests.
#[async_trait]
pub trait AnalysisModel: Send + Sync {
    /// Short engine name, for logs and CLI selection
    fn name(&self) -> &str;

    /// Produce a fresh analysis for the given input
    async fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResult>;
}

/// Sentiment capability injected into the heuristic engine. Created once by
/// the owning session and reused; a failure here is recoverable (the caller
/// skips the sentiment check).
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Sentiment>;
}
