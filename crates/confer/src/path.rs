//! Dotted-path queries over a JSON document.
//!
//! Responsibilities:
//! - Resolve a dotted path into the JSON leaves it addresses.
//! - Flatten nested arrays into an ordered sequence of leaf strings.
//! - Support the object-iteration forms (`P.$`, `P.@`, `P.$.Q`).
//!
//! Does NOT handle:
//! - Reading the document from anywhere (see `source::json`).
//! - Type conversion of leaf strings (see `params`).
//!
//! Invariants:
//! - Paths are parsed on every query; nothing is cached.
//! - An absent node contributes no leaf; a present empty string contributes
//!   an empty-string leaf. The two outcomes are never conflated.
//! - Leaf order is document order: array index order, then object key
//!   insertion order (`serde_json` is built with `preserve_order`).

use serde_json::Value;

use crate::constants::INITIAL_LEAF_CAPACITY;

/// Infix separator for the object-iteration form `P.$.Q`.
const OBJECT_ITERATE: &str = ".$.";

/// Suffix selecting every value of an object, `P.$`.
const VALUES_SUFFIX: &str = ".$";

/// Suffix selecting every key of an object, `P.@`.
const KEYS_SUFFIX: &str = ".@";

/// Array segment selecting all elements (or, as a final segment, the
/// element count).
const ALL_ELEMENTS: &str = "#";

/// Resolve `path` against `doc` and return every addressed leaf, flattened,
/// in document order.
///
/// The path forms are checked in a fixed precedence order:
///
/// 1. `P.$`: every value of the object at `P`, each flattened recursively.
/// 2. `P.@`: every key of the object at `P`, as leaves.
/// 3. `P.$.Q`: for every value of the object at `P`, the leaves of the
///    sub-path `Q` resolved against that value (full grammar, recursively).
/// 4. Plain dotted path: bare names select object fields, numeric segments
///    select array indices, `#` selects all elements of an array.
///
/// The suffix and infix forms only operate on objects; applied to anything
/// else they contribute no leaves.
pub fn query(doc: &Value, path: &str) -> Vec<String> {
    let mut leaves = Vec::with_capacity(INITIAL_LEAF_CAPACITY);
    collect(doc, path, &mut leaves);
    leaves
}

/// The first leaf of the plain-path resolution of `path`, or an empty
/// string when the path addresses nothing.
///
/// Always single-valued: a path that would produce many leaves under
/// [`query`] yields only the first one here.
pub fn first_leaf(doc: &Value, path: &str) -> String {
    let mut leaves = Vec::with_capacity(1);
    resolve_plain(doc, &segments(path), &mut leaves);
    leaves.into_iter().next().unwrap_or_default()
}

fn collect(doc: &Value, path: &str, out: &mut Vec<String>) {
    if let Some(head) = path.strip_suffix(VALUES_SUFFIX) {
        if let Some(Value::Object(map)) = resolve_node(doc, &segments(head)) {
            for value in map.values() {
                flatten(value, out);
            }
        }
        return;
    }

    if let Some(head) = path.strip_suffix(KEYS_SUFFIX) {
        if let Some(Value::Object(map)) = resolve_node(doc, &segments(head)) {
            for key in map.keys() {
                out.push(key.clone());
            }
        }
        return;
    }

    if let Some((head, rest)) = path.split_once(OBJECT_ITERATE) {
        if let Some(Value::Object(map)) = resolve_node(doc, &segments(head)) {
            for value in map.values() {
                collect(value, rest, out);
            }
        }
        return;
    }

    resolve_plain(doc, &segments(path), out);
}

fn segments(path: &str) -> Vec<&str> {
    path.split('.').collect()
}

/// Plain dotted-path resolution, flattening every matched node into `out`.
///
/// A trailing `#` on an array contributes the element count as a single
/// leaf; a non-final `#` fans out over the elements.
fn resolve_plain(node: &Value, segments: &[&str], out: &mut Vec<String>) {
    let Some((&segment, rest)) = segments.split_first() else {
        flatten(node, out);
        return;
    };

    match node {
        Value::Object(map) => {
            if let Some(child) = map.get(segment) {
                resolve_plain(child, rest, out);
            }
        }
        Value::Array(items) if segment == ALL_ELEMENTS => {
            if rest.is_empty() {
                out.push(items.len().to_string());
            } else {
                for item in items {
                    resolve_plain(item, rest, out);
                }
            }
        }
        Value::Array(items) => {
            if let Some(child) = segment.parse::<usize>().ok().and_then(|i| items.get(i)) {
                resolve_plain(child, rest, out);
            }
        }
        _ => {}
    }
}

/// Resolve a plain path to the first matching node, without flattening.
///
/// Used to locate the object operand of the `P.$`, `P.@`, and `P.$.Q`
/// forms.
fn resolve_node<'a>(node: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    let Some((&segment, rest)) = segments.split_first() else {
        return Some(node);
    };

    match node {
        Value::Object(map) => resolve_node(map.get(segment)?, rest),
        Value::Array(items) if segment == ALL_ELEMENTS => {
            items.iter().find_map(|item| resolve_node(item, rest))
        }
        Value::Array(items) => {
            resolve_node(items.get(segment.parse::<usize>().ok()?)?, rest)
        }
        _ => None,
    }
}

/// Turn a JSON node into leaf strings: arrays unroll recursively to
/// unbounded depth, every other node contributes exactly one leaf.
///
/// Leaf representations: strings verbatim, numbers in canonical decimal
/// form, booleans as `true`/`false`, `null` as the empty string, objects as
/// their compact JSON serialization.
pub fn flatten(node: &Value, out: &mut Vec<String>) {
    match node {
        Value::Array(items) => {
            for item in items {
                flatten(item, out);
            }
        }
        Value::Null => out.push(String::new()),
        Value::Bool(b) => out.push(b.to_string()),
        Value::Number(n) => out.push(n.to_string()),
        Value::String(s) => out.push(s.clone()),
        Value::Object(_) => out.push(node.to_string()),
    }
}
