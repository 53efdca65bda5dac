use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use cred_core::{
    AnalysisInput, AnalysisModel, AnalysisResult, Determination, Error, Result,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const SYSTEM_PROMPT: &str = "You are an expert fact-checker and misinformation analyst helping students identify fake news.

Your task is to analyze news articles and provide:
1. A credibility score (0-100) where:
   - 0-30: Likely fake/unreliable
   - 31-60: Questionable/mixed credibility
   - 61-100: Likely credible

2. A determination: \"credible\", \"questionable\", or \"fake\"

3. A concise summary (2-3 sentences) of what the article claims

4. An educational explanation listing specific red flags or credibility indicators found in the article

Consider these factors:
- Sensational or clickbait language
- Lack of sources or citations
- Emotional manipulation tactics
- Verifiable facts vs opinions
- Author credibility and publication source
- Consistency with known facts
- Use of logical fallacies

Be educational and help students understand WHY something is unreliable.";

const ANALYSIS_TOOL_NAME: &str = "provide_analysis";

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct FunctionSpec {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Serialize)]
struct ToolSpec {
    #[serde(rename = "type")]
    kind: String,
    function: FunctionSpec,
}

#[derive(Serialize)]
struct ToolChoiceFunction {
    name: String,
}

#[derive(Serialize)]
struct ToolChoice {
    #[serde(rename = "type")]
    kind: String,
    function: ToolChoiceFunction,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    tools: Vec<ToolSpec>,
    tool_choice: ToolChoice,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    #[serde(default)]
    tool_calls: Vec<ToolCall>,
}

#[derive(Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Deserialize)]
struct FunctionCall {
    arguments: String,
}

#[derive(Deserialize)]
struct RawAnalysis {
    #[serde(rename = "credibilityScore")]
    credibility_score: f64,
    determination: String,
    summary: String,
    explanation: String,
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model_name: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://ai.gateway.lovable.dev/v1".to_string(),
            model_name: "google/gemini-2.5-flash".to_string(),
        }
    }
}

/// Remote engine: one chat-completions call with a forced `provide_analysis`
/// tool, decoded into the typed result. No retries; each analysis is a single
/// attempt.
pub struct GatewayEngine {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    model_name: String,
}

impl fmt::Debug for GatewayEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayEngine")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl GatewayEngine {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let api_key = config.api_key.ok_or_else(|| {
            Error::Unauthenticated("gateway API key is required".to_string())
        })?;
        Ok(Self {
            client: Arc::new(Client::new()),
            api_key,
            base_url: config.base_url,
            model_name: config.model_name,
        })
    }

    fn build_request(&self, input: &AnalysisInput) -> Result<ChatRequest> {
        let content = match (input.text(), input.url()) {
            (Some(text), _) => text.to_string(),
            (None, Some(url)) => format!("Analyze this article from: {}", url),
            (None, None) => {
                return Err(Error::InvalidInput(
                    "Either articleText or articleUrl is required".to_string(),
                ))
            }
        };

        Ok(ChatRequest {
            model: self.model_name.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content,
                },
            ],
            tools: vec![ToolSpec {
                kind: "function".to_string(),
                function: FunctionSpec {
                    name: ANALYSIS_TOOL_NAME.to_string(),
                    description: "Return the fake news analysis results".to_string(),
                    parameters: serde_json::json!({
                        "type": "object",
                        "properties": {
                            "credibilityScore": {
                                "type": "number",
                                "description": "Score from 0-100 indicating credibility"
                            },
                            "determination": {
                                "type": "string",
                                "enum": ["credible", "questionable", "fake"],
                                "description": "Overall determination of article credibility"
                            },
                            "summary": {
                                "type": "string",
                                "description": "Brief 2-3 sentence summary of the article"
                            },
                            "explanation": {
                                "type": "string",
                                "description": "Educational explanation of red flags or credibility indicators"
                            }
                        },
                        "required": ["credibilityScore", "determination", "summary", "explanation"],
                        "additionalProperties": false
                    }),
                },
            }],
            tool_choice: ToolChoice {
                kind: "function".to_string(),
                function: ToolChoiceFunction {
                    name: ANALYSIS_TOOL_NAME.to_string(),
                },
            },
        })
    }
}

/// Map an unsuccessful upstream status to the error taxonomy.
fn error_for_status(status: u16, body: &str) -> Error {
    match status {
        429 => Error::RateLimited,
        402 => Error::QuotaExhausted,
        401 | 403 => Error::Unauthenticated(format!("gateway rejected credentials ({})", status)),
        _ => Error::Backend(format!("gateway returned {}: {}", status, body)),
    }
}

/// Pull the forced tool call out of the reply and validate its arguments.
/// Anything missing or out of shape is a malformed upstream response; partial
/// data never propagates.
fn decode_response(response: ChatResponse) -> Result<AnalysisResult> {
    let arguments = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.tool_calls.into_iter().next())
        .map(|call| call.function.arguments)
        .ok_or_else(|| {
            Error::MalformedUpstreamResponse("no tool call in response".to_string())
        })?;
    validate_analysis(&arguments)
}

fn validate_analysis(arguments: &str) -> Result<AnalysisResult> {
    let raw: RawAnalysis = serde_json::from_str(arguments).map_err(|e| {
        Error::MalformedUpstreamResponse(format!("invalid {} arguments: {}", ANALYSIS_TOOL_NAME, e))
    })?;

    if !raw.credibility_score.is_finite()
        || !(0.0..=100.0).contains(&raw.credibility_score)
    {
        return Err(Error::MalformedUpstreamResponse(format!(
            "credibilityScore out of range: {}",
            raw.credibility_score
        )));
    }
    let credibility_score = raw.credibility_score.round() as u8;

    let determination = match raw.determination.as_str() {
        "credible" => Determination::Credible,
        "questionable" => Determination::Questionable,
        "fake" => Determination::Fake,
        other => {
            return Err(Error::MalformedUpstreamResponse(format!(
                "unknown determination: {:?}",
                other
            )))
        }
    };

    Ok(AnalysisResult {
        credibility_score,
        determination,
        summary: raw.summary,
        explanation: raw.explanation,
    })
}

#[async_trait]
impl AnalysisModel for GatewayEngine {
    fn name(&self) -> &str {
        "gateway"
    }

    async fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResult> {
        let request = self.build_request(input)?;
        tracing::info!(model = %self.model_name, "Calling analysis gateway");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Gateway error: {} {}", status, body);
            return Err(error_for_status(status.as_u16(), &body));
        }

        let payload: ChatResponse = response.json().await.map_err(|e| {
            Error::MalformedUpstreamResponse(format!("gateway reply was not valid JSON: {}", e))
        })?;
        let analysis = decode_response(payload)?;
        tracing::info!("Analysis complete: {}", analysis.determination);
        Ok(analysis)
    }
}
