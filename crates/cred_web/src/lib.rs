use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use cred_core::Result;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/analyze", post(handlers::analyze_article))
        .route("/api/health", get(handlers::health))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    let app = create_app(state);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("🌐 Listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::AppState;
    pub use cred_core::{AnalysisInput, AnalysisResult, Error, Result};
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use cred_core::{
        AnalysisInput, AnalysisModel, AnalysisResult, Determination, Error,
    };
    use tower::util::ServiceExt;

    struct FixedModel;

    #[async_trait]
    impl AnalysisModel for FixedModel {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn analyze(&self, _input: &AnalysisInput) -> cred_core::Result<AnalysisResult> {
            Ok(AnalysisResult {
                credibility_score: 72,
                determination: Determination::Credible,
                summary: "summary".to_string(),
                explanation: "explanation".to_string(),
            })
        }
    }

    struct FailingModel(fn() -> Error);

    #[async_trait]
    impl AnalysisModel for FailingModel {
        fn name(&self) -> &str {
            "failing"
        }

        async fn analyze(&self, _input: &AnalysisInput) -> cred_core::Result<AnalysisResult> {
            Err((self.0)())
        }
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_success_shape() {
        let app = create_app(AppState::new(Arc::new(FixedModel)));
        let response = app
            .oneshot(post_json(r#"{"articleText": "some article text"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["credibilityScore"], 72);
        assert_eq!(json["determination"], "credible");
        assert_eq!(json["summary"], "summary");
        assert_eq!(json["explanation"], "explanation");
    }

    #[tokio::test]
    async fn test_missing_input_is_400() {
        let app = create_app(AppState::new(Arc::new(FixedModel)));
        let response = app.oneshot(post_json("{}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Either articleText or articleUrl is required");
    }

    #[tokio::test]
    async fn test_blank_fields_are_400() {
        let app = create_app(AppState::new(Arc::new(FixedModel)));
        let response = app
            .oneshot(post_json(r#"{"articleText": "  ", "articleUrl": ""}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_429() {
        let app = create_app(AppState::new(Arc::new(FailingModel(|| Error::RateLimited))));
        let response = app
            .oneshot(post_json(r#"{"articleText": "text"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Rate limit exceeded. Please try again later.");
    }

    #[tokio::test]
    async fn test_quota_maps_to_402() {
        let app = create_app(AppState::new(Arc::new(FailingModel(
            || Error::QuotaExhausted,
        ))));
        let response = app
            .oneshot(post_json(r#"{"articleText": "text"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    }

    #[tokio::test]
    async fn test_backend_failure_maps_to_500() {
        let app = create_app(AppState::new(Arc::new(FailingModel(|| {
            Error::MalformedUpstreamResponse("no tool call".to_string())
        }))));
        let response = app
            .oneshot(post_json(r#"{"articleText": "text"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_health_route() {
        let app = create_app(AppState::new(Arc::new(FixedModel)));
        let request = Request::builder()
            .method("GET")
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_heuristic_end_to_end_through_router() {
        let model = cred_inference::create_model(
            "heuristic",
            cred_inference::GatewayConfig::default(),
            None,
        )
        .unwrap();
        let app = create_app(AppState::new(model));
        let response = app
            .oneshot(post_json(
                r#"{"articleText": "The town opened a new library on Main Street."}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["credibilityScore"], 40);
        assert_eq!(json["determination"], "questionable");
    }
}
