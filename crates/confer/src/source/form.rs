//! HTTP form-data parameter source.
//!
//! Responsibilities:
//! - Parse an inbound request's query string and urlencoded body into a
//!   multi-valued parameter map.
//! - Classify malformed requests into human-readable defect categories and
//!   reject them at construction; no source is produced for bad input.
//!
//! Does NOT handle:
//! - Transport concerns (reading the request off a socket).
//! - Multipart bodies or any content type other than
//!   `application/x-www-form-urlencoded`.
//!
//! Invariants:
//! - A `FormSource` is request-scoped: it is deliberately not `Sync`, so the
//!   type system pins it to a single logical request handler.
//! - Construction failures are reported once; callers must not retry with
//!   the same input.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use super::{MutSource, Source};
use crate::constants::MAX_FORM_BYTES;

/// Defect category of a rejected HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormDefect {
    /// A percent escape in the query string or body was malformed.
    InvalidEscape,
    /// The request method expects a form body and none was supplied.
    MissingBody,
    /// The body exceeds [`MAX_FORM_BYTES`].
    BodyTooLarge,
    /// The `Content-Type` header names something other than
    /// `application/x-www-form-urlencoded`.
    UnsupportedContentType,
    /// The body could not be interpreted as form data at all.
    MalformedBody,
}

impl fmt::Display for FormDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detail = match self {
            Self::InvalidEscape => "malformed URL escaping",
            Self::MissingBody => "missing request body",
            Self::BodyTooLarge => "request body too large",
            Self::UnsupportedContentType => "unsupported `Content-Type` header",
            Self::MalformedBody => "request body damaged or malformed",
        };
        f.write_str(detail)
    }
}

/// An inbound HTTP request could not be turned into a [`FormSource`].
///
/// Carries the request path and headers for diagnostics; the defect
/// category explains what was wrong in human-readable terms.
#[derive(Error, Debug)]
#[error("invalid HTTP request ({defect}) at `{path}`")]
pub struct FormError {
    pub defect: FormDefect,
    pub path: String,
    pub headers: Vec<(String, String)>,
}

/// The pieces of an inbound HTTP request that form parsing needs.
pub struct RawRequest<'a> {
    /// Request method, e.g. `GET` or `POST` (case-insensitive).
    pub method: &'a str,
    /// Request target: the path with an optional `?query` part.
    pub target: &'a str,
    /// Request headers as received.
    pub headers: &'a [(&'a str, &'a str)],
    /// Request body, if one was received.
    pub body: Option<&'a [u8]>,
}

impl RawRequest<'_> {
    fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or(self.target)
    }

    fn query(&self) -> Option<&str> {
        self.target.split_once('?').map(|(_, q)| q)
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| *v)
    }

    fn expects_body(&self) -> bool {
        matches!(
            self.method.to_ascii_uppercase().as_str(),
            "POST" | "PUT" | "PATCH"
        )
    }

    fn reject(&self, defect: FormDefect) -> FormError {
        tracing::debug!(%defect, path = self.path(), "rejected inbound form request");
        FormError {
            defect,
            path: self.path().to_string(),
            headers: self
                .headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Multi-valued parameter source over one request's form data.
///
/// Values come from the query string first, then from the urlencoded body.
/// The interior map is request-scoped and unsynchronized (`RefCell`), which
/// keeps the type out of multi-threaded use by construction.
#[derive(Debug)]
pub struct FormSource {
    values: RefCell<HashMap<String, Vec<String>>>,
}

impl FormSource {
    /// Parse `request` into a form source.
    ///
    /// # Errors
    ///
    /// Returns a [`FormError`] naming the defect category when the request
    /// cannot be parsed: malformed percent escaping, a missing or oversized
    /// body, an unsupported `Content-Type`, or a body that is not valid
    /// form data.
    pub fn from_request(request: &RawRequest<'_>) -> Result<Self, FormError> {
        let mut values: HashMap<String, Vec<String>> = HashMap::new();

        if request.expects_body() {
            let Some(body) = request.body else {
                return Err(request.reject(FormDefect::MissingBody));
            };
            if body.len() > MAX_FORM_BYTES {
                return Err(request.reject(FormDefect::BodyTooLarge));
            }

            // An absent Content-Type is treated as urlencoded, anything
            // else names a payload this source cannot represent.
            let essence = request
                .header("content-type")
                .map(|ct| {
                    ct.split(';')
                        .next()
                        .unwrap_or(ct)
                        .trim()
                        .to_ascii_lowercase()
                })
                .unwrap_or_default();
            if !essence.is_empty() && essence != "application/x-www-form-urlencoded" {
                return Err(request.reject(FormDefect::UnsupportedContentType));
            }

            let body = std::str::from_utf8(body)
                .map_err(|_| request.reject(FormDefect::MalformedBody))?;
            parse_pairs(body, &mut values).map_err(|defect| {
                request.reject(match defect {
                    DecodeDefect::Escape => FormDefect::InvalidEscape,
                    DecodeDefect::Encoding => FormDefect::MalformedBody,
                })
            })?;
        }

        if let Some(query) = request.query() {
            parse_pairs(query, &mut values)
                .map_err(|_| request.reject(FormDefect::InvalidEscape))?;
        }

        Ok(Self {
            values: RefCell::new(values),
        })
    }
}

impl Source for FormSource {
    fn get(&self, key: &str) -> String {
        self.values
            .borrow()
            .get(key)
            .and_then(|list| list.first())
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    fn get_array(&self, key: &str) -> Option<Vec<String>> {
        self.values
            .borrow()
            .get(key)
            .map(|list| list.iter().map(|v| v.trim().to_string()).collect())
    }
}

impl MutSource for FormSource {
    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
    }

    fn del(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

enum DecodeDefect {
    Escape,
    Encoding,
}

/// Split a `k=v&k2=v2` component list and decode each side strictly.
fn parse_pairs(
    raw: &str,
    values: &mut HashMap<String, Vec<String>>,
) -> Result<(), DecodeDefect> {
    for pair in raw.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode_component(key)?;
        let value = decode_component(value)?;
        values.entry(key).or_default().push(value);
    }
    Ok(())
}

/// Strict `application/x-www-form-urlencoded` component decoding.
///
/// `+` decodes to a space; `%XX` requires exactly two hex digits. A
/// truncated or non-hex escape is a [`DecodeDefect::Escape`], a decoded
/// byte sequence that is not UTF-8 is a [`DecodeDefect::Encoding`].
fn decode_component(raw: &str) -> Result<String, DecodeDefect> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hi = bytes.get(i + 1).copied().and_then(hex_digit);
                let lo = bytes.get(i + 2).copied().and_then(hex_digit);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => out.push(hi << 4 | lo),
                    _ => return Err(DecodeDefect::Escape),
                }
                i += 3;
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8(out).map_err(|_| DecodeDefect::Encoding)
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
