use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid distribution: {reason}")]
    InvalidDistribution { reason: String },

    #[error("Invalid parameters: {reason}")]
    InvalidParams { reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SimError {
    pub fn invalid_distribution(reason: impl Into<String>) -> Self {
        Self::InvalidDistribution { reason: reason.into() }
    }

    pub fn invalid_params(reason: impl Into<String>) -> Self {
        Self::InvalidParams { reason: reason.into() }
    }
}

pub type SimResult<T> = Result<T, SimError>;
