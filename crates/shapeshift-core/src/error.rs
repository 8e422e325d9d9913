//! Error types for the Shapeshift core library
//!
//! This module defines the error handling system for Shapeshift, using thiserror
//! for the error definitions and anyhow for wrapped causes coming from user code
//! (accessors, factories, configuration sources).

use thiserror::Error;

/// Main error type for Shapeshift operations
#[derive(Error, Debug)]
pub enum Error {
    /// A field named in a mapping customization is not declared by the shape
    #[error("Field not found: {message}")]
    FieldNotFound {
        field: String,
        message: String,
    },

    /// Malformed builder call or meaningless type pair
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        message: String,
    },

    /// A property pair cannot be mapped automatically
    #[error("Property access error: {message}")]
    PropertyAccess {
        origin: String,
        target: String,
        property: String,
        message: String,
    },

    /// Reading or writing a resolved accessor failed during a map call
    #[error("Access property error: {message}")]
    AccessProperty {
        origin_property: String,
        target_property: String,
        message: String,
        #[source]
        source: anyhow::Error,
    },

    /// The target shape could not be instantiated
    #[error("Create instance error: {message}")]
    CreateInstance {
        shape: String,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// A transmuter is already registered for the ordered type pair
    #[error("Duplicate transmuter: {message}")]
    DuplicateTransmuter {
        origin: String,
        target: String,
        message: String,
    },

    /// Engine configuration could not be loaded
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A type-erased value did not have the type its transmuter promised
    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for mistakes in the mapping configuration itself (bad field names,
    /// identical origin and target shapes, unset converters).
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::FieldNotFound { .. } | Error::InvalidArgument { .. })
    }

    /// True for errors raised while computing the property pairs of a mapper
    pub fn is_property_access(&self) -> bool {
        matches!(self, Error::PropertyAccess { .. })
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::FieldNotFound {
            field: "nickname".to_string(),
            message: "field nickname is not declared by Dest".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Field not found: field nickname is not declared by Dest"
        );
    }

    #[test]
    fn test_configuration_classification() {
        assert!(Error::invalid_argument("same shape").is_configuration());
        assert!(!Error::internal("boom").is_configuration());

        let err = Error::PropertyAccess {
            origin: "A".to_string(),
            target: "B".to_string(),
            property: "x".to_string(),
            message: "no match".to_string(),
        };
        assert!(err.is_property_access());
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_access_property_keeps_source() {
        use std::error::Error as _;

        let err = Error::AccessProperty {
            origin_property: "a".to_string(),
            target_property: "b".to_string(),
            message: "cannot write".to_string(),
            source: anyhow::anyhow!("value mismatch"),
        };
        assert!(err.source().is_some());
    }
}
