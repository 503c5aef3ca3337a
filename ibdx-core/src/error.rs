//! Error types for IBDx data generation and lookup

use crate::types::EntityKind;

/// Result type for IBDx core operations
pub type Result<T> = std::result::Result<T, IbdxError>;

/// Errors that can occur while building or querying session tables
#[derive(Debug, thiserror::Error)]
pub enum IbdxError {
    /// Entity is absent from a closed catalogue (no lazy generation for this kind)
    #[error("{kind} {name} not found in dataset")]
    LookupMiss {
        kind: EntityKind,
        name: String,
        suggestions: Vec<String>,
    },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Invalid context schema: {0}")]
    InvalidSchema(String),
}

impl IbdxError {
    pub fn lookup_miss<S: Into<String>>(kind: EntityKind, name: S, suggestions: Vec<String>) -> Self {
        Self::LookupMiss {
            kind,
            name: name.into(),
            suggestions,
        }
    }

    /// True for misses that should be shown as an inline warning rather than a failure
    pub fn is_lookup_miss(&self) -> bool {
        matches!(self, Self::LookupMiss { .. })
    }

    /// User-facing status line, e.g. for the not-found banner of a chart container
    pub fn status_line(&self) -> String {
        match self {
            Self::LookupMiss { kind, name, suggestions } if !suggestions.is_empty() => format!(
                "{} {} not found in dataset. Try one of these: {}",
                kind,
                name,
                suggestions.join(", ")
            ),
            Self::LookupMiss { kind, name, .. } => {
                format!("{} {} not found in dataset. Please try another {}.", kind, name, kind.noun())
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_miss_status_line() {
        let err = IbdxError::lookup_miss(EntityKind::Target, "ZZZFAKE", vec!["TNF".into(), "IL6".into()]);
        assert!(err.is_lookup_miss());
        assert_eq!(err.to_string(), "Target ZZZFAKE not found in dataset");
        assert_eq!(
            err.status_line(),
            "Target ZZZFAKE not found in dataset. Try one of these: TNF, IL6"
        );
    }

    #[test]
    fn test_lookup_miss_without_suggestions() {
        let err = IbdxError::lookup_miss(EntityKind::Pathway, "nope", Vec::new());
        assert!(err.status_line().ends_with("Please try another pathway."));
    }

    #[test]
    fn test_other_errors_are_not_misses() {
        let err = IbdxError::InvalidQuery("empty gene name".into());
        assert!(!err.is_lookup_miss());
        assert_eq!(err.status_line(), "Invalid query: empty gene name");
    }
}
