//! Typed parameter access over any source.
//!
//! Responsibilities:
//! - Convert a source's raw strings into validated, typed values.
//! - Substitute caller-supplied defaults when a value is absent.
//! - Normalize values where the type defines a canonical form (UUID
//!   lowercase, GUID uppercase, URL without trailing slash).
//!
//! Does NOT handle:
//! - Key normalization or storage (delegated to the wrapped source).
//!
//! Invariants:
//! - All conversion happens above the source boundary; sources only ever
//!   exchange strings.
//! - Defaults are trusted as already valid and are not re-validated, except
//!   for the normalization the type's contract promises on every return.
//! - A validation failure is always returned to the caller; the only local
//!   recovery is default substitution on an empty raw value.

use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::AccessError;
use crate::source::{MutSource, Source};

/// Tokens recognized as `true`, compared case-insensitively.
const TRUTHY: [&str; 7] = ["1", "t", "true", "y", "yes", "д", "да"];

/// Typed accessor over one parameter source.
///
/// Holds precompiled UUID/GUID validators; otherwise stateless. Every
/// method reads through the wrapped source on each call.
pub struct Params<S> {
    source: S,
    uuid: Regex,
    guid: Regex,
}

impl<S: Source> Params<S> {
    /// Wrap `source` with the typed-access layer.
    pub fn new(source: S) -> Self {
        Self {
            source,
            uuid: Regex::new(r"^[0-9a-f]{32}$").expect("valid UUID pattern"),
            guid: Regex::new(
                r"^[0-9A-F]{8}-[0-9A-F]{4}-[0-9A-F]{4}-[0-9A-F]{4}-[0-9A-F]{12}$",
            )
            .expect("valid GUID pattern"),
        }
    }

    /// The wrapped source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Raw first value for `key`, exactly as the source returns it.
    pub fn raw(&self, key: &str) -> String {
        self.source.get(key)
    }

    /// Raw value list for `key`, exactly as the source returns it.
    pub fn raw_array(&self, key: &str) -> Option<Vec<String>> {
        self.source.get_array(key)
    }

    /// Boolean value of `key`, or `default` when the value is absent.
    ///
    /// The trimmed value is matched case-insensitively against the truthy
    /// tokens `1`, `t`, `true`, `y`, `yes`, `д`, `да`; any other non-empty
    /// value is `false`.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        let raw = self.source.get(key).to_lowercase();
        if raw.is_empty() {
            return default;
        }
        TRUTHY.contains(&raw.as_str())
    }

    /// String value of `key`, or `default` when the value is absent.
    pub fn get_string(&self, key: &str, default: &str) -> String {
        let raw = self.source.get(key);
        if raw.is_empty() {
            return default.to_string();
        }
        raw
    }

    /// Validated URL for `key`, with any trailing `/` stripped.
    ///
    /// An absent value falls back to `default` (normalized the same way);
    /// when both are empty the key is reported as [`AccessError::EmptyUrl`].
    pub fn get_url(&self, key: &str, default: &str) -> Result<String, AccessError> {
        let raw = self.source.get(key);

        if raw.is_empty() {
            if default.is_empty() {
                return Err(AccessError::EmptyUrl {
                    key: key.to_string(),
                });
            }
            return Ok(default.trim_end_matches('/').to_string());
        }

        if let Err(e) = url::Url::parse(&raw) {
            return Err(AccessError::InvalidUrl {
                key: key.to_string(),
                value: raw,
                source: e,
            });
        }

        Ok(raw.trim_end_matches('/').to_string())
    }

    /// Validated dashless UUID for `key`, normalized to lowercase.
    ///
    /// The value must be exactly 32 hex digits after lowercasing. An absent
    /// value falls back to `default` (also lowercased); when both are empty
    /// the key is reported as [`AccessError::EmptyUuid`].
    pub fn get_uuid(&self, key: &str, default: &str) -> Result<String, AccessError> {
        let raw = self.source.get(key).to_lowercase();

        if raw.is_empty() {
            if default.is_empty() {
                return Err(AccessError::EmptyUuid {
                    key: key.to_string(),
                });
            }
            return Ok(default.to_lowercase());
        }

        if !self.uuid.is_match(&raw) {
            return Err(AccessError::InvalidUuid {
                key: key.to_string(),
                value: raw,
            });
        }

        Ok(raw)
    }

    /// Validated dashed GUID for `key`, normalized to uppercase.
    ///
    /// The value must match the 8-4-4-4-12 hex form after uppercasing. An
    /// absent value falls back to `default` (also uppercased); when both
    /// are empty the key is reported as [`AccessError::EmptyGuid`].
    pub fn get_guid(&self, key: &str, default: &str) -> Result<String, AccessError> {
        let raw = self.source.get(key).to_uppercase();

        if raw.is_empty() {
            if default.is_empty() {
                return Err(AccessError::EmptyGuid {
                    key: key.to_string(),
                });
            }
            return Ok(default.to_uppercase());
        }

        if !self.guid.is_match(&raw) {
            return Err(AccessError::InvalidGuid {
                key: key.to_string(),
                value: raw,
            });
        }

        Ok(raw)
    }

    /// Unsigned 64-bit integer for `key`, or `default` when absent.
    ///
    /// Only plain base-10 digits are accepted: an explicit sign or a
    /// fractional part is [`AccessError::InvalidUint`], and the default is
    /// not substituted for an invalid value.
    pub fn get_uint(&self, key: &str, default: u64) -> Result<u64, AccessError> {
        let raw = self.source.get(key);

        if raw.is_empty() {
            return Ok(default);
        }

        // `u64::from_str` tolerates a leading `+`, the contract does not.
        if raw.starts_with('+') {
            return Err(AccessError::InvalidUint {
                key: key.to_string(),
                value: raw,
                source: None,
            });
        }

        raw.parse::<u64>().map_err(|e| AccessError::InvalidUint {
            key: key.to_string(),
            value: raw,
            source: Some(e),
        })
    }

    /// IANA timezone for `key`.
    ///
    /// An absent value substitutes `default` as the raw identifier before
    /// lookup; when both are empty the key is reported as
    /// [`AccessError::EmptyTimezone`].
    pub fn get_timezone(&self, key: &str, default: &str) -> Result<Tz, AccessError> {
        let mut raw = self.source.get(key);

        if raw.is_empty() {
            if default.is_empty() {
                return Err(AccessError::EmptyTimezone {
                    key: key.to_string(),
                });
            }
            raw = default.to_string();
        }

        raw.parse::<Tz>().map_err(|e| AccessError::InvalidTimezone {
            key: key.to_string(),
            message: e.to_string(),
            value: raw,
        })
    }

    /// Duration for `key` (e.g. `60s`, `1h 30m`), or `default` when absent.
    pub fn get_duration(&self, key: &str, default: Duration) -> Result<Duration, AccessError> {
        let raw = self.source.get(key).to_lowercase();

        if raw.is_empty() {
            return Ok(default);
        }

        humantime::parse_duration(&raw).map_err(|e| AccessError::InvalidDuration {
            key: key.to_string(),
            value: raw,
            source: e,
        })
    }

    /// RFC 3339 timestamp for `key`, or `default` when absent.
    pub fn get_timestamp(
        &self,
        key: &str,
        default: DateTime<FixedOffset>,
    ) -> Result<DateTime<FixedOffset>, AccessError> {
        let raw = self.source.get(key).to_uppercase();

        if raw.is_empty() {
            return Ok(default);
        }

        DateTime::parse_from_rfc3339(&raw).map_err(|e| AccessError::InvalidTimestamp {
            key: key.to_string(),
            value: raw,
            source: e,
        })
    }

    /// String list for `key`, or `default` when the source has no values.
    ///
    /// Delegates entirely to the source's list lookup: a scalar value
    /// yields a one-element list, and any present result is returned as-is.
    pub fn get_strings(&self, key: &str, default: &[String]) -> Vec<String> {
        self.source
            .get_array(key)
            .unwrap_or_else(|| default.to_vec())
    }

    /// Decode the JSON value of `key` into `T`.
    ///
    /// The raw value, or `default` when the raw value is empty, must decode
    /// into the caller's target shape; a failure is
    /// [`AccessError::InvalidJson`].
    pub fn get_json<T: DeserializeOwned>(
        &self,
        key: &str,
        default: &str,
    ) -> Result<T, AccessError> {
        let raw = self.source.get(key);
        let js = if raw.is_empty() { default } else { raw.as_str() };

        serde_json::from_str(js).map_err(|e| AccessError::InvalidJson {
            key: key.to_string(),
            value: js.to_string(),
            source: e,
        })
    }
}

impl<S: MutSource> Params<S> {
    /// Store `value` under `key` in the wrapped source, unvalidated.
    pub fn set(&self, key: &str, value: &str) {
        self.source.set(key, value);
    }

    /// Remove every value under `key` from the wrapped source.
    pub fn del(&self, key: &str) {
        self.source.del(key);
    }
}
