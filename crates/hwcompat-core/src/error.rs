//! Error taxonomy for the compatibility engine.
//!
//! Only input contract violations are errors. A device the rules do not
//! recognise is an unsupported device, never an error.

/// Compatibility engine errors.
#[derive(Debug, thiserror::Error)]
pub enum CompatError {
    #[error("missing required field '{field}' in {location}")]
    MissingField { location: String, field: String },

    #[error("missing required category: {category}")]
    MissingCategory { category: String },

    #[error("invalid hardware profile: {0}")]
    InvalidProfile(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CompatError {
    pub(crate) fn missing_field(location: impl Into<String>, field: &str) -> Self {
        CompatError::MissingField {
            location: location.into(),
            field: field.to_string(),
        }
    }

    pub(crate) fn missing_category(category: &str) -> Self {
        CompatError::MissingCategory {
            category: category.to_string(),
        }
    }
}

/// Result type for compatibility engine operations.
pub type Result<T> = std::result::Result<T, CompatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let err = CompatError::missing_field("CPU", "Processor Name");
        assert_eq!(
            err.to_string(),
            "missing required field 'Processor Name' in CPU"
        );
    }

    #[test]
    fn test_missing_category_display() {
        let err = CompatError::missing_category("Motherboard");
        assert!(err.to_string().contains("Motherboard"));
    }

    #[test]
    fn test_serialization_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CompatError = json_err.into();
        assert!(err.to_string().starts_with("serialization error"));
    }
}
