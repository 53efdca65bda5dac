use std::sync::Arc;

use cred_core::{AnalysisModel, Error, Result, SentimentClassifier};

pub mod gateway;
pub mod heuristic;

pub use gateway::{GatewayConfig, GatewayEngine};
pub use heuristic::HeuristicEngine;

use crate::sentiment::LexiconClassifier;

/// Build an engine by name. The heuristic engine gets the built-in lexicon
/// classifier unless the caller injects its own.
pub fn create_model(
    name: &str,
    config: GatewayConfig,
    classifier: Option<Arc<dyn SentimentClassifier>>,
) -> Result<Arc<dyn AnalysisModel>> {
    match name {
        "heuristic" => {
            let classifier = classifier
                .unwrap_or_else(|| Arc::new(LexiconClassifier::new()) as Arc<dyn SentimentClassifier>);
            Ok(Arc::new(HeuristicEngine::new(Some(classifier))))
        }
        "gateway" => Ok(Arc::new(GatewayEngine::new(config)?)),
        other => Err(Error::InvalidInput(format!(
            "Unknown engine: {}. Available engines: heuristic, gateway",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_heuristic_model() {
        let model = create_model("heuristic", GatewayConfig::default(), None).unwrap();
        assert_eq!(model.name(), "heuristic");
    }

    #[test]
    fn test_create_gateway_model_requires_key() {
        assert!(create_model("gateway", GatewayConfig::default(), None).is_err());

        let config = GatewayConfig {
            api_key: Some("test-key".to_string()),
            ..GatewayConfig::default()
        };
        let model = create_model("gateway", config, None).unwrap();
        assert_eq!(model.name(), "gateway");
    }

    #[test]
    fn test_unknown_model_name() {
        assert!(matches!(
            create_model("oracle", GatewayConfig::default(), None),
            Err(Error::InvalidInput(_))
        ));
    }
}
