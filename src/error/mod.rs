//! Error types for conversion and property-map operations.

use crate::value::{TypeDescriptor, Value};

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Result type for property-map operations
pub type MappingResult<T> = Result<T, MappingError>;

/// The single error kind a converter surfaces: the value could not be
/// coerced to the requested type and no default was configured.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("no value supplied and no default configured for target {target}")]
    MissingValue { target: TypeDescriptor },

    #[error("cannot convert {input:?} to {target}")]
    Unparseable {
        target: TypeDescriptor,
        input: String,
        cause: Option<anyhow::Error>,
    },

    #[error("value {input} is outside the {target} range [{min}, {max}]")]
    OutOfRange {
        target: TypeDescriptor,
        input: String,
        min: String,
        max: String,
    },

    #[error("{converter} converter cannot produce target {target}")]
    UnsupportedTarget {
        target: TypeDescriptor,
        converter: &'static str,
    },

    #[error("cannot convert an empty array to {target}")]
    EmptyArray { target: TypeDescriptor },

    #[error("invalid format pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("value of kind {input} is not assignable to {target}")]
    NotAssignable {
        target: TypeDescriptor,
        input: String,
    },
}

impl ConversionError {
    pub fn missing_value(target: TypeDescriptor) -> Self {
        Self::MissingValue { target }
    }

    pub fn unparseable(target: TypeDescriptor, input: &Value) -> Self {
        Self::Unparseable {
            target,
            input: input.display_string(),
            cause: None,
        }
    }

    pub fn unparseable_text(target: TypeDescriptor, input: &str) -> Self {
        Self::Unparseable {
            target,
            input: input.to_string(),
            cause: None,
        }
    }

    /// Attach the underlying parse/format cause.
    pub fn with_cause(mut self, source: anyhow::Error) -> Self {
        if let Self::Unparseable { cause, .. } = &mut self {
            *cause = Some(source);
        }
        self
    }

    pub fn out_of_range(
        target: TypeDescriptor,
        input: impl ToString,
        min: impl ToString,
        max: impl ToString,
    ) -> Self {
        Self::OutOfRange {
            target,
            input: input.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    pub fn unsupported_target(target: TypeDescriptor, converter: &'static str) -> Self {
        Self::UnsupportedTarget { target, converter }
    }

    pub fn invalid_pattern(pattern: &str, message: impl ToString) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            message: message.to_string(),
        }
    }

    pub fn not_assignable(target: TypeDescriptor, value: &Value) -> Self {
        Self::NotAssignable {
            target,
            input: value
                .kind()
                .map(|k| k.name().to_string())
                .unwrap_or_else(|| "null".to_string()),
        }
    }

    /// The target type the failed conversion was attempting to produce.
    pub fn target(&self) -> TypeDescriptor {
        match self {
            Self::MissingValue { target }
            | Self::Unparseable { target, .. }
            | Self::OutOfRange { target, .. }
            | Self::UnsupportedTarget { target, .. }
            | Self::EmptyArray { target }
            | Self::NotAssignable { target, .. } => *target,
            Self::InvalidPattern { .. } => TypeDescriptor::Scalar(crate::value::TypeKind::String),
        }
    }
}

/// Structural misuse of a property map, distinct from a bad value.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("key {key:?} is not part of this mapping's fixed structure")]
    UnknownKey { key: String },

    #[error("property {key:?} has no read accessor")]
    NotReadable { key: String },

    #[error("property {key:?} has no write accessor")]
    NotWritable { key: String },

    #[error("{operation} is not supported: the key set of a property map is fixed")]
    Unsupported { operation: &'static str },

    #[error("record type {type_name:?} does not support duplication")]
    CloneUnsupported { type_name: &'static str },

    #[error("failed to coerce value for property {key:?}")]
    Coercion {
        key: String,
        #[source]
        source: ConversionError,
    },
}

impl MappingError {
    pub fn unknown_key(key: &str) -> Self {
        Self::UnknownKey { key: key.to_string() }
    }

    pub fn not_readable(key: &str) -> Self {
        Self::NotReadable { key: key.to_string() }
    }

    pub fn not_writable(key: &str) -> Self {
        Self::NotWritable { key: key.to_string() }
    }

    pub fn coercion(key: &str, source: ConversionError) -> Self {
        Self::Coercion {
            key: key.to_string(),
            source,
        }
    }
}
