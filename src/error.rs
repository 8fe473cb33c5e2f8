//! Error types for CourseKit

use crate::component::{ComponentId, ComponentType};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    #[error("Component not found: {0}")]
    NotFound(ComponentId),
    #[error("Index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Invalid component type: {0}")]
    InvalidType(String),
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
    #[error("Type mismatch: component is {found}, patch targets {expected}")]
    TypeMismatch {
        expected: ComponentType,
        found: ComponentType,
    },
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for BuilderError {
    fn from(err: std::io::Error) -> Self {
        BuilderError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BuilderError {
    fn from(err: serde_json::Error) -> Self {
        BuilderError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for BuilderError {
    fn from(err: toml::de::Error) -> Self {
        BuilderError::Config(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, BuilderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = BuilderError::NotFound(ComponentId::from("component-1"));
        assert_eq!(err.to_string(), "Component not found: component-1");

        let err = BuilderError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "Index 4 out of range for 2 items");

        let err = BuilderError::TypeMismatch {
            expected: ComponentType::Quiz,
            found: ComponentType::Text,
        };
        assert_eq!(
            err.to_string(),
            "Type mismatch: component is text, patch targets quiz"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: BuilderError = io.into();
        assert!(matches!(err, BuilderError::Io(msg) if msg.contains("missing")));
    }
}
