//! Error types for typed parameter access.
//!
//! Responsibilities:
//! - Define one variant per validation/conversion failure of [`crate::Params`].
//! - Preserve the offending key and raw value for diagnostics.
//! - Keep the underlying parser error attached as the error source.
//!
//! Does NOT handle:
//! - HTTP request classification failures (see `source::form::FormError`).
//!
//! Invariants:
//! - Every variant names the parameter key it was raised for.
//! - Library errors are never swallowed: where a conversion crate reports a
//!   typed error, it is carried via `#[source]`.

use thiserror::Error;

/// Errors that can occur while converting a raw parameter value.
#[derive(Error, Debug)]
pub enum AccessError {
    /// Both the raw value and the caller-supplied default were empty.
    #[error("empty URL value for key `{key}`")]
    EmptyUrl { key: String },

    #[error("invalid URL value `{value}` for key `{key}`")]
    InvalidUrl {
        key: String,
        value: String,
        #[source]
        source: url::ParseError,
    },

    /// Both the raw value and the caller-supplied default were empty.
    #[error("empty UUID value for key `{key}`")]
    EmptyUuid { key: String },

    /// The value did not match 32 lowercase hex digits after normalization.
    #[error("invalid UUID value `{value}` for key `{key}`")]
    InvalidUuid { key: String, value: String },

    /// Both the raw value and the caller-supplied default were empty.
    #[error("empty GUID value for key `{key}`")]
    EmptyGuid { key: String },

    /// The value did not match the dashed 8-4-4-4-12 hex form after
    /// normalization.
    #[error("invalid GUID value `{value}` for key `{key}`")]
    InvalidGuid { key: String, value: String },

    /// The value was not a plain base-10 unsigned 64-bit integer.
    ///
    /// The parser error is absent only when the input was rejected before
    /// parsing (an explicit sign, which `u64::from_str` would tolerate).
    #[error("invalid unsigned integer `{value}` for key `{key}`")]
    InvalidUint {
        key: String,
        value: String,
        #[source]
        source: Option<std::num::ParseIntError>,
    },

    /// Both the raw value and the caller-supplied default were empty.
    #[error("empty timezone value for key `{key}`")]
    EmptyTimezone { key: String },

    /// The value did not resolve to a known IANA timezone identifier.
    #[error("invalid timezone `{value}` for key `{key}`: {message}")]
    InvalidTimezone {
        key: String,
        value: String,
        message: String,
    },

    #[error("invalid duration `{value}` for key `{key}`")]
    InvalidDuration {
        key: String,
        value: String,
        #[source]
        source: humantime::DurationError,
    },

    #[error("invalid RFC 3339 timestamp `{value}` for key `{key}`")]
    InvalidTimestamp {
        key: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid JSON value for key `{key}`")]
    InvalidJson {
        key: String,
        value: String,
        #[source]
        source: serde_json::Error,
    },
}

impl AccessError {
    /// The parameter key the error was raised for.
    pub fn key(&self) -> &str {
        match self {
            Self::EmptyUrl { key }
            | Self::InvalidUrl { key, .. }
            | Self::EmptyUuid { key }
            | Self::InvalidUuid { key, .. }
            | Self::EmptyGuid { key }
            | Self::InvalidGuid { key, .. }
            | Self::InvalidUint { key, .. }
            | Self::EmptyTimezone { key }
            | Self::InvalidTimezone { key, .. }
            | Self::InvalidDuration { key, .. }
            | Self::InvalidTimestamp { key, .. }
            | Self::InvalidJson { key, .. } => key,
        }
    }

    /// The rejected raw value, where the failure was about a concrete value
    /// rather than an absent one.
    pub fn rejected_value(&self) -> Option<&str> {
        match self {
            Self::InvalidUrl { value, .. }
            | Self::InvalidUuid { value, .. }
            | Self::InvalidGuid { value, .. }
            | Self::InvalidUint { value, .. }
            | Self::InvalidTimezone { value, .. }
            | Self::InvalidDuration { value, .. }
            | Self::InvalidTimestamp { value, .. }
            | Self::InvalidJson { value, .. } => Some(value),
            Self::EmptyUrl { .. }
            | Self::EmptyUuid { .. }
            | Self::EmptyGuid { .. }
            | Self::EmptyTimezone { .. } => None,
        }
    }
}
