//! Property-based tests for value normalization and flattening.
//!
//! These verify with randomized inputs that normalization is idempotent
//! (validating an already-validated value changes nothing) and that the
//! path engine never conflates absence with an empty string.

use confer::{JsonSource, MemSource, Params, Source};
use proptest::prelude::*;

const NAME: &str = "prop_value";

fn params() -> Params<MemSource> {
    Params::new(MemSource::new(4))
}

/// Strategy for 32-digit hex strings of mixed case.
fn uuid_strategy() -> impl Strategy<Value = String> {
    "[0-9a-fA-F]{32}"
}

/// Strategy for dashed 8-4-4-4-12 hex strings of mixed case.
fn guid_strategy() -> impl Strategy<Value = String> {
    "[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}"
}

/// Strategy for well-formed URLs with an optional trailing slash.
fn url_strategy() -> impl Strategy<Value = String> {
    ("[a-z]{3,8}", "(example\\.com|internal\\.local)", any::<bool>()).prop_map(
        |(host, domain, slash)| {
            let mut url = format!("https://{host}.{domain}/path");
            if slash {
                url.push('/');
            }
            url
        },
    )
}

proptest! {
    #[test]
    fn uuid_validation_is_idempotent_after_lowercasing(raw in uuid_strategy()) {
        let p = params();
        p.set(NAME, &raw);

        let normalized = p.get_uuid(NAME, "").unwrap();
        prop_assert_eq!(&normalized, &raw.to_lowercase());

        p.set(NAME, &normalized);
        prop_assert_eq!(p.get_uuid(NAME, "").unwrap(), normalized);
    }

    #[test]
    fn guid_validation_is_idempotent_after_uppercasing(raw in guid_strategy()) {
        let p = params();
        p.set(NAME, &raw);

        let normalized = p.get_guid(NAME, "").unwrap();
        prop_assert_eq!(&normalized, &raw.to_uppercase());

        p.set(NAME, &normalized);
        prop_assert_eq!(p.get_guid(NAME, "").unwrap(), normalized);
    }

    #[test]
    fn url_normalization_is_idempotent(raw in url_strategy()) {
        let p = params();
        p.set(NAME, &raw);

        let normalized = p.get_url(NAME, "").unwrap();
        prop_assert!(!normalized.ends_with('/'));

        p.set(NAME, &normalized);
        prop_assert_eq!(p.get_url(NAME, "").unwrap(), normalized);
    }

    #[test]
    fn uint_round_trips_all_values(value in any::<u64>()) {
        let p = params();
        p.set(NAME, &value.to_string());
        prop_assert_eq!(p.get_uint(NAME, 0).unwrap(), value);
    }

    #[test]
    fn absent_keys_return_the_exact_default(default in "[a-zA-Z0-9 ]{0,24}") {
        let p = params();
        prop_assert_eq!(p.get_string(NAME, &default), default);
    }

    /// A JSON array of strings flattens to exactly those strings: empties
    /// survive, nothing is invented, nothing is dropped.
    #[test]
    fn flatten_preserves_present_empty_strings(values in prop::collection::vec("[a-z ]{0,8}", 0..8)) {
        let doc = serde_json::json!({ "list": values.clone() });
        let source = JsonSource::from_value(doc);

        let expected = if values.is_empty() { None } else { Some(values.clone()) };
        prop_assert_eq!(source.get_array("list"), expected);
        prop_assert_eq!(source.get_array("missing"), None);
    }
}
