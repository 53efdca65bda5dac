use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cred_core::{AnalysisInput, Error};
use serde_json::json;

use crate::AppState;

pub async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

pub async fn analyze_article(
    State(state): State<Arc<AppState>>,
    Json(input): Json<AnalysisInput>,
) -> Response {
    if input.validate().is_err() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Either articleText or articleUrl is required",
        );
    }

    let input = match resolve_input(&state, input).await {
        Ok(input) => input,
        Err(e) => return error_for(&e),
    };

    match state.model.analyze(&input).await {
        Ok(result) => {
            tracing::info!("Analysis complete: {}", result.determination);
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(e) => {
            tracing::error!("Analysis failed: {}", e);
            error_for(&e)
        }
    }
}

/// The heuristic engine scores text, so URL-only requests are fetched and
/// extracted first. The gateway engine forwards the URL prompt upstream
/// unchanged, as the original service did.
async fn resolve_input(state: &AppState, input: AnalysisInput) -> cred_core::Result<AnalysisInput> {
    if input.text().is_some() || state.model.name() != "heuristic" {
        return Ok(input);
    }
    let url = match input.url() {
        Some(url) => url,
        None => return Ok(input),
    };

    let article = cred_extract::fetch_article(url).await?;
    tracing::info!("Extracted {} chars from {}", article.text.len(), url);
    Ok(AnalysisInput {
        article_text: Some(article.text),
        article_url: input.article_url.clone(),
    })
}

fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::InvalidInput(_) | Error::Extraction(_) => StatusCode::BAD_REQUEST,
        Error::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        Error::QuotaExhausted => StatusCode::PAYMENT_REQUIRED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_for(err: &Error) -> Response {
    error_response(status_for(err), &err.to_string())
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"error": message}))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&Error::InvalidInput("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&Error::Extraction("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_for(&Error::RateLimited), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(status_for(&Error::QuotaExhausted), StatusCode::PAYMENT_REQUIRED);
        assert_eq!(
            status_for(&Error::Unauthenticated("no key".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&Error::MalformedUpstreamResponse("bad".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
