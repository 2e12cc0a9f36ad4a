//! Centralized constants for the confer crate.

/// Maximum accepted size of an HTTP form body in bytes (10 MiB).
pub const MAX_FORM_BYTES: usize = 10 << 20;

/// Initial capacity of the leaf buffer used by path queries.
///
/// Most documents queried through a source produce only a handful of
/// leaves, so a small buffer avoids reallocation without wasting memory.
pub const INITIAL_LEAF_CAPACITY: usize = 16;
