use cred_core::{AnalysisResult, Determination, Error, Result, Sentiment, SentimentLabel};

/// Every analysis starts from a neutral baseline; rules add or subtract
/// independent deltas before the final clamp to [0, 100].
pub const BASELINE_SCORE: i32 = 50;

/// Classifier input is bounded to this many characters.
pub const SENTIMENT_PREFIX_CHARS: usize = 512;

const CITATION_MARKERS: &[&str] = &["source:", "according to", "study", "research", "report"];

const CLICKBAIT_PHRASES: &[&str] = &[
    "you won't believe",
    "shocking",
    "doctors hate",
    "one weird trick",
    "what happens next",
];

/// Outcome of the rule pass, before it is rendered into an `AnalysisResult`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub score: u8,
    pub flags: Vec<String>,
    pub positives: Vec<String>,
    pub sentiment: Option<Sentiment>,
    pub cites_sources: bool,
    pub word_count: usize,
}

impl ScoreBreakdown {
    pub fn determination(&self) -> Determination {
        Determination::from_score(self.score)
    }
}

/// Run the fixed rule set over `text`. Deterministic and side-effect free:
/// identical text and sentiment always produce an identical breakdown.
///
/// Empty or whitespace-only text is rejected; sentiment is optional and a
/// missing classifier simply skips that one rule.
pub fn score_text(text: &str, sentiment: Option<&Sentiment>) -> Result<ScoreBreakdown> {
    if text.trim().is_empty() {
        return Err(Error::InvalidInput(
            "article text is empty; nothing to analyze".to_string(),
        ));
    }

    let mut score = BASELINE_SCORE;
    let mut flags = Vec::new();
    let mut positives = Vec::new();

    if let Some(s) = sentiment {
        if s.label == SentimentLabel::Negative && s.score > 0.9 {
            score -= 20;
            flags.push("Highly emotional or negative language detected".to_string());
        }
    }

    let total_chars = text.chars().count();
    let uppercase = text.chars().filter(|c| c.is_uppercase()).count();
    if uppercase as f64 / total_chars as f64 > 0.3 {
        score -= 15;
        flags.push("Excessive use of capital letters".to_string());
    }

    if text.matches('!').count() > 5 {
        score -= 10;
        flags.push("Excessive use of exclamation marks".to_string());
    }

    let lowered = text.to_lowercase();
    let cites_sources = CITATION_MARKERS.iter().any(|m| lowered.contains(m));
    if cites_sources {
        score += 15;
        positives.push("Contains references to sources or research".to_string());
    } else {
        // No delta attached to this one, it only shows up in the explanation.
        flags.push("No clear citations or source references found".to_string());
    }

    // Lengths in 200..=500 deliberately contribute nothing.
    if total_chars < 200 {
        score -= 10;
        flags.push("Article is very short, which limits verifiable detail".to_string());
    } else if total_chars > 500 {
        score += 10;
        positives.push("Substantial content with adequate detail".to_string());
    }

    if CLICKBAIT_PHRASES.iter().any(|p| lowered.contains(p)) {
        score -= 20;
        flags.push("Contains clickbait-style language".to_string());
    }

    Ok(ScoreBreakdown {
        score: score.clamp(0, 100) as u8,
        flags,
        positives,
        sentiment: sentiment.cloned(),
        cites_sources,
        word_count: text.split_whitespace().count(),
    })
}

pub fn compose_summary(breakdown: &ScoreBreakdown) -> String {
    let flag_level = match breakdown.flags.len() {
        0 => "no",
        1 | 2 => "some",
        _ => "multiple",
    };
    let citations = if breakdown.cites_sources {
        "references sources"
    } else {
        "cites no clear sources"
    };
    let tone = match &breakdown.sentiment {
        Some(s) => format!(" The overall tone reads {}.", s.label),
        None => String::new(),
    };
    format!(
        "This {}-word article looks {} based on heuristic checks: it {} and raised {} red flags.{}",
        breakdown.word_count,
        breakdown.determination(),
        citations,
        flag_level,
        tone
    )
}

pub fn compose_explanation(breakdown: &ScoreBreakdown) -> String {
    let mut out = String::new();

    if !breakdown.flags.is_empty() {
        out.push_str("Red flags:\n");
        for flag in &breakdown.flags {
            out.push_str("- ");
            out.push_str(flag);
            out.push('\n');
        }
    }

    if !breakdown.positives.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("Credibility indicators:\n");
        for positive in &breakdown.positives {
            out.push_str("- ");
            out.push_str(positive);
            out.push('\n');
        }
    }

    if let Some(s) = &breakdown.sentiment {
        out.push('\n');
        out.push_str(&format!(
            "Sentiment: {} (confidence {:.2})\n",
            s.label, s.score
        ));
    }

    out.push('\n');
    out.push_str(recommendation(breakdown.determination()));
    out
}

fn recommendation(determination: Determination) -> &'static str {
    match determination {
        Determination::Credible => {
            "This article shows signs of credible reporting; still verify key claims against additional sources."
        }
        Determination::Questionable => {
            "Treat this article with caution and cross-check its claims against established outlets before trusting or sharing it."
        }
        Determination::Fake => {
            "This article shows strong signs of unreliable content; do not share it without independent verification."
        }
    }
}

/// Full heuristic analysis: rule pass plus rendered summary and explanation.
pub fn analyze_text(text: &str, sentiment: Option<&Sentiment>) -> Result<AnalysisResult> {
    let breakdown = score_text(text, sentiment)?;
    tracing::debug!(
        score = breakdown.score,
        flags = breakdown.flags.len(),
        "heuristic scoring complete"
    );
    Ok(AnalysisResult {
        credibility_score: breakdown.score,
        determination: breakdown.determination(),
        summary: compose_summary(&breakdown),
        explanation: compose_explanation(&breakdown),
    })
}
