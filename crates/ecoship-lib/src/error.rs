use thiserror::Error;

use crate::catalog::TierId;

/// Convenient result alias for the ecoship library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when request input is rejected before any computation runs.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Raised when a lane lacks the distance or cost data required for a calculation.
    #[error("invalid lane data for {lane}: {message}")]
    LaneData { lane: String, message: String },

    /// Raised when a single tier could not be quoted. The pipeline logs and skips these.
    #[error("quote computation failed for {tier}: {message}")]
    TierComputation { tier: TierId, message: String },

    /// Raised when every tier failed for a request.
    #[error("no quotes could be produced for {origin} to {destination}")]
    NoQuotesProduced { origin: String, destination: String },

    /// Raised when the lane catalog holds no lanes, so neither lookup nor fallback is possible.
    #[error("lane catalog is empty")]
    EmptyLaneCatalog,

    /// Raised when the tier catalog holds no tiers.
    #[error("tier catalog is empty")]
    EmptyTierCatalog,

    /// Raised when reference data fails validation during load.
    #[error("invalid catalog data: {message}")]
    CatalogValidation { message: String },

    /// Raised when the same city pair appears twice in a lane table.
    #[error("duplicate lane encountered: {key}")]
    DuplicateLane { key: String },

    /// Raised when a tier name could not be matched to a known tier.
    #[error("unknown tier: {name}{}", format_suggestions(.suggestions))]
    UnknownTier {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when scoring weights do not sum to one.
    #[error("scoring weights must sum to 1.0, got cost={cost} carbon={carbon}")]
    InvalidWeights { cost: f64, carbon: f64 },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON catalog parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for CSV lane table parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Build an [`Error::InvalidInput`] from any message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tier_lists_single_suggestion() {
        let err = Error::UnknownTier {
            name: "grund".to_string(),
            suggestions: vec!["ground".to_string()],
        };
        assert_eq!(err.to_string(), "unknown tier: grund. Did you mean 'ground'?");
    }

    #[test]
    fn unknown_tier_lists_many_suggestions() {
        let err = Error::UnknownTier {
            name: "next".to_string(),
            suggestions: vec!["next-day-air".to_string(), "next-day-air-saver".to_string()],
        };
        assert!(err
            .to_string()
            .ends_with("Did you mean one of: 'next-day-air', 'next-day-air-saver'?"));
    }

    #[test]
    fn tier_computation_names_the_tier() {
        let err = Error::TierComputation {
            tier: TierId::Ground,
            message: "boom".to_string(),
        };
        assert!(err.to_string().contains("UPS_GROUND"));
    }
}
