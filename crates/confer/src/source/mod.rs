//! Parameter source backends.
//!
//! Responsibilities:
//! - Define the [`Source`] read contract and the [`MutSource`] write
//!   extension shared by every backend.
//! - Host the concrete backends: process environment, in-memory map,
//!   HTTP form data, and read-only JSON documents.
//!
//! Invariants:
//! - Key normalization is internal to each source; callers always use the
//!   logical key.
//! - Returned scalars are trimmed of surrounding whitespace, except for the
//!   JSON backend where whitespace inside document values is significant.
//! - Read-only backends implement only [`Source`]; mutating one is a type
//!   error, not a runtime fault.

mod env;
mod form;
mod json;
mod mem;

pub use env::EnvSource;
pub use form::{FormDefect, FormError, FormSource, RawRequest};
pub use json::JsonSource;
pub use mem::MemSource;

/// Read access to a named, possibly multi-valued, string-keyed store.
pub trait Source {
    /// The first value stored under `key`, normalized and trimmed, or an
    /// empty string when the key is absent.
    fn get(&self, key: &str) -> String;

    /// Every value stored under `key`, in order, or `None` when the key is
    /// absent. A single-valued source returns a one-element list.
    fn get_array(&self, key: &str) -> Option<Vec<String>>;
}

/// Write access for sources that are mutable over their lifetime.
pub trait MutSource: Source {
    /// Store `value` under `key`, normalizing both as the backend requires.
    /// Multi-valued backends append; single-valued backends replace.
    fn set(&self, key: &str, value: &str);

    /// Remove every value stored under `key`.
    fn del(&self, key: &str);
}
