pub mod heuristics;
pub mod models;
pub mod sentiment;

pub use models::{create_model, GatewayConfig, GatewayEngine, HeuristicEngine};
pub use sentiment::LexiconClassifier;

pub mod prelude {
    pub use crate::models::{create_model, GatewayConfig};
    pub use crate::sentiment::LexiconClassifier;
    pub use cred_core::{AnalysisInput, AnalysisModel, AnalysisResult, Error, Result};
}
