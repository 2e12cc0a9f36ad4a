//! Typed access to named parameters from interchangeable backends.
//!
//! This crate provides a uniform way to read configuration and argument
//! values that may come from the process environment, an HTTP request's
//! form data, a JSON document, or a plain in-memory map. Backends implement
//! the [`Source`] contract (plus [`MutSource`] when they are writable), and
//! [`Params`] layers default substitution, format validation, and type
//! conversion on top of any of them.

mod constants;
pub mod error;
pub mod params;
pub mod path;
pub mod source;

pub use error::AccessError;
pub use params::Params;
pub use source::{
    EnvSource, FormDefect, FormError, FormSource, JsonSource, MemSource, MutSource, RawRequest,
    Source,
};
