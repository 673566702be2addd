// Errors surfaced by the dashboard use cases
use thiserror::Error;

use crate::domain::filter::Dimension;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("failed to load dataset: {0}")]
    DatasetUnavailable(String),
    #[error("failed to load dataset: row {row} is malformed: {reason}")]
    MalformedDataset { row: usize, reason: String },
    #[error("invalid value '{value}' for filter '{dimension}'")]
    InvalidFilter { dimension: Dimension, value: String },
    #[error("invalid pagination: {0}")]
    InvalidPage(String),
    #[error("failed to encode response: {0}")]
    Encoding(String),
}

impl DashboardError {
    /// Whether the failure came from loading the dataset rather than the request.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            DashboardError::DatasetUnavailable(_) | DashboardError::MalformedDataset { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = DashboardError::InvalidFilter {
            dimension: Dimension::Year,
            value: "twenty".to_string(),
        };
        assert_eq!(err.to_string(), "invalid value 'twenty' for filter 'year'");
        assert!(!err.is_load_failure());

        let err = DashboardError::MalformedDataset { row: 3, reason: "salary -1 is negative".to_string() };
        assert!(err.to_string().starts_with("failed to load dataset"));
        assert!(err.is_load_failure());
    }
}
