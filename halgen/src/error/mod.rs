//! Error types and error handling

use thiserror::Error;

/// Generator error type
#[derive(Debug, Error)]
pub enum HalgenError {
    /// The class definition declares no `__init__` constructor
    #[error("Class '{class}' has no constructor (`__init__`); cannot generate from it")]
    MissingConstructor {
        /// Name of the offending class
        class: String,
    },

    /// A member specification could not be parsed
    #[error("Invalid member specification: '{spec}': {reason}")]
    InvalidMember {
        /// The raw specification
        spec: String,
        /// Why it was rejected
        reason: String,
    },

    /// A class name is empty or not an identifier
    #[error("Invalid class name: '{0}'")]
    InvalidClassName(String),

    /// A diagnostic was raised while building the class spec in strict mode
    #[error("Strict mode: {0}")]
    Strict(#[from] crate::proxy::SpecDiagnostic),

    /// Template failed to parse or register
    #[error("Template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    /// Template failed to render
    #[error("Render error: {0}")]
    Render(#[from] Box<handlebars::RenderError>),

    /// JSON serialization or parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization error
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// I/O error while reading a class description or template
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<handlebars::TemplateError> for HalgenError {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::Template(Box::new(err))
    }
}

impl From<handlebars::RenderError> for HalgenError {
    fn from(err: handlebars::RenderError) -> Self {
        Self::Render(Box::new(err))
    }
}

impl From<figment::Error> for HalgenError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, HalgenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_constructor_message() {
        let err = HalgenError::MissingConstructor {
            class: "Stage".to_string(),
        };
        assert!(err.to_string().contains("Stage"));
        assert!(err.to_string().contains("__init__"));
    }

    #[test]
    fn test_invalid_member_message() {
        let err = HalgenError::InvalidMember {
            spec: "1abc".to_string(),
            reason: "not an identifier".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid member specification: '1abc': not an identifier"
        );
    }
}
