//! Read-only JSON document parameter source.

use serde_json::Value;

use super::Source;
use crate::path;

/// Parameter source over an immutable JSON document, addressed with the
/// dotted-path grammar of [`crate::path`].
///
/// The document is parsed once at construction and never changes, so the
/// source is trivially safe for any number of concurrent readers. There is
/// no mutation API: this type implements [`Source`] but not
/// [`super::MutSource`], which makes an attempted write a compile error
/// instead of a runtime fault.
pub struct JsonSource {
    doc: Option<Value>,
}

impl JsonSource {
    /// Parse `bytes` as a JSON document.
    ///
    /// Malformed input does not fail construction: the source comes up with
    /// an always-absent document and every lookup returns nothing, which is
    /// indistinguishable from querying paths that do not exist. A warning
    /// is logged so the condition is visible in diagnostics.
    pub fn new(bytes: &[u8]) -> Self {
        let doc = match serde_json::from_slice(bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, "malformed JSON document, all lookups will be absent");
                None
            }
        };
        Self { doc }
    }

    /// Wrap an already-parsed document.
    pub fn from_value(value: Value) -> Self {
        Self { doc: Some(value) }
    }
}

impl Source for JsonSource {
    fn get(&self, key: &str) -> String {
        self.doc
            .as_ref()
            .map(|doc| path::first_leaf(doc, key))
            .unwrap_or_default()
    }

    fn get_array(&self, key: &str) -> Option<Vec<String>> {
        let leaves = path::query(self.doc.as_ref()?, key);
        if leaves.is_empty() { None } else { Some(leaves) }
    }
}
