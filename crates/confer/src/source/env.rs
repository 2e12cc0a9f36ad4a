//! Process-environment parameter source.

use super::{MutSource, Source};

/// Parameter source backed by the process environment.
///
/// Constructed with a namespace prefix; every logical key is normalized to
/// `PREFIX_UPPERCASED_KEY` before touching the environment, so independent
/// components can share the process without colliding.
///
/// Mutation goes through the process-global environment. Concurrent
/// mutation and reads across the process are unordered relative to each
/// other unless the platform's environment primitive says otherwise;
/// callers own any coordination beyond that.
pub struct EnvSource {
    prefix: String,
}

impl EnvSource {
    /// Create a source namespaced under `prefix` (uppercased).
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: format!("{}_", prefix.to_uppercase()),
        }
    }

    fn var_name(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key.to_uppercase())
    }
}

impl Source for EnvSource {
    fn get(&self, key: &str) -> String {
        std::env::var(self.var_name(key))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    fn get_array(&self, key: &str) -> Option<Vec<String>> {
        std::env::var(self.var_name(key))
            .ok()
            .map(|v| vec![v.trim().to_string()])
    }
}

impl MutSource for EnvSource {
    fn set(&self, key: &str, value: &str) {
        // SAFETY: mutating the process environment is process-global and
        // unsynchronized with other threads reading it through non-Rust
        // APIs. This source's contract passes that platform-level race
        // surface through to the caller.
        unsafe { std::env::set_var(self.var_name(key), value) }
    }

    fn del(&self, key: &str) {
        // SAFETY: see `set`.
        unsafe { std::env::remove_var(self.var_name(key)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Source;
    use serial_test::serial;

    #[test]
    #[serial]
    fn keys_are_prefixed_and_uppercased() {
        let source = EnvSource::new("confer_test");
        temp_env::with_vars([("CONFER_TEST_SOME_KEY", Some(" padded "))], || {
            assert_eq!(source.get("some_key"), "padded");
            assert_eq!(source.get("SOME_KEY"), "padded");
            assert_eq!(
                source.get_array("some_key"),
                Some(vec!["padded".to_string()])
            );
        });
    }

    #[test]
    #[serial]
    fn absent_variable_reads_as_empty() {
        let source = EnvSource::new("confer_test");
        assert_eq!(source.get("never_set"), "");
        assert_eq!(source.get_array("never_set"), None);
    }

    #[test]
    #[serial]
    fn empty_variable_is_present_for_get_array() {
        let source = EnvSource::new("confer_test");
        temp_env::with_vars([("CONFER_TEST_BLANK", Some(""))], || {
            assert_eq!(source.get("blank"), "");
            assert_eq!(source.get_array("blank"), Some(vec![String::new()]));
        });
    }
}
