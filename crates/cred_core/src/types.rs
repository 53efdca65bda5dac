use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Analysis request as it arrives on the wire: article text, a URL, or both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_url: Option<String>,
}

impl AnalysisInput {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            article_text: Some(text.into()),
            article_url: None,
        }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            article_text: None,
            article_url: Some(url.into()),
        }
    }

    /// The article text, if present and not blank.
    pub fn text(&self) -> Option<&str> {
        self.article_text
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }

    /// The article URL, if present and not blank.
    pub fn url(&self) -> Option<&str> {
        self.article_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
    }

    /// At least one of text/url must be non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.text().is_none() && self.url().is_none() {
            return Err(Error::InvalidInput(
                "Either articleText or articleUrl is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Determination {
    Credible,
    Questionable,
    Fake,
}

impl Determination {
    /// Fixed score thresholds: >= 61 credible, 31..=60 questionable, <= 30 fake.
    pub fn from_score(score: u8) -> Self {
        match score {
            61.. => Determination::Credible,
            31..=60 => Determination::Questionable,
            0..=30 => Determination::Fake,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Determination::Credible => "credible",
            Determination::Questionable => "questionable",
            Determination::Fake => "fake",
        }
    }
}

impl fmt::Display for Determination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One complete analysis. Immutable once produced; a fresh value is built for
/// every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub credibility_score: u8,
    pub determination: Determination,
    pub summary: String,
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentLabel::Positive => f.write_str("positive"),
            SentimentLabel::Negative => f.write_str("negative"),
        }
    }
}

/// Classifier verdict: a label plus a confidence in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    pub score: f32,
}
