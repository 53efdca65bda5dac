pub mod error;
pub mod models;
pub mod types;

pub use error::Error;
pub use models::{AnalysisModel, SentimentClassifier};
pub use types::{AnalysisInput, AnalysisResult, Determination, Sentiment, SentimentLabel};

pub type Result<T> = std::result::Result<T, Error>;
