use thiserror::Error;
use crate::models::Dimension;

/// Conditions that stop a single target from being sized
///
/// These never abort a whole request; the recommender turns them into
/// per-target skip reasons.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SizingError {
    #[error("not enough data: no {dimension} measurement available")]
    InsufficientData { dimension: &'static str },

    #[error("malformed size chart: {0}")]
    MalformedInput(String),
}

impl SizingError {
    pub fn insufficient(dimension: Dimension) -> Self {
        SizingError::InsufficientData {
            dimension: dimension.as_str(),
        }
    }
}
