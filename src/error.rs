//! Error handling for the job scout application

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobScoutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Job board request error: {0}")]
    JobBoard(#[from] reqwest::Error),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Similarity model error: {0}")]
    SimilarityModel(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Proposal rendering error: {0}")]
    ProposalRendering(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, JobScoutError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for JobScoutError {
    fn from(err: anyhow::Error) -> Self {
        JobScoutError::AnalysisFailed(err.to_string())
    }
}

/// Convert askama template errors to our custom error type
impl From<askama::Error> for JobScoutError {
    fn from(err: askama::Error) -> Self {
        JobScoutError::ProposalRendering(err.to_string())
    }
}
