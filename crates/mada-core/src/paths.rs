// ── Data-path resolution ──
//
// The manifest declares where each entity's value lives in the status
// document as an ordered key sequence, e.g. ["soil", "moisture"]. This
// module is the single place that walks those paths.

use serde_json::{Map, Value};

/// Resolve `path` against a status document.
///
/// Walks one key at a time. Returns `None` -- never an error -- when the
/// path is shorter than two keys (the manifest's minimum for a usable
/// definition), when an intermediate value is not an object, when a key
/// is absent, or when the walk terminates at an empty object (the device
/// emits `{}` for sections it has no data for). A type mismatch is
/// indistinguishable from a missing key: both mean "value unavailable".
///
/// Pure and deterministic: same inputs, same output, no mutation.
pub fn resolve<'a>(root: &'a Map<String, Value>, path: &[String]) -> Option<&'a Value> {
    if path.len() < 2 {
        return None;
    }

    let (first, rest) = path.split_first()?;
    let mut current = root.get(first)?;

    for key in rest {
        current = current.as_object()?.get(key)?;
    }

    // An empty container at the end of the path carries no value either.
    if current.as_object().is_some_and(Map::is_empty) {
        return None;
    }

    Some(current)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Map<String, Value> {
        let Value::Object(map) = json!({
            "soil": { "moisture": 42, "temp": 21.5 },
            "pump": { "on": true, "pwm": 180, "stats": {}, "nested": { "deep": "x" } },
            "name": "mada",
            "empty": {}
        }) else {
            unreachable!()
        };
        map
    }

    fn path(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| (*k).to_owned()).collect()
    }

    #[test]
    fn resolves_two_level_path() {
        let doc = doc();
        assert_eq!(resolve(&doc, &path(&["soil", "moisture"])), Some(&json!(42)));
        assert_eq!(resolve(&doc, &path(&["pump", "on"])), Some(&json!(true)));
    }

    #[test]
    fn resolves_deeper_path() {
        let doc = doc();
        assert_eq!(
            resolve(&doc, &path(&["pump", "nested", "deep"])),
            Some(&json!("x"))
        );
    }

    #[test]
    fn short_path_is_unavailable() {
        let doc = doc();
        assert_eq!(resolve(&doc, &[]), None);
        assert_eq!(resolve(&doc, &path(&["soil"])), None);
    }

    #[test]
    fn missing_key_is_unavailable() {
        let doc = doc();
        assert_eq!(resolve(&doc, &path(&["soil", "missing"])), None);
        assert_eq!(resolve(&doc, &path(&["nope", "missing"])), None);
        assert_eq!(resolve(&doc, &path(&["empty", "anything"])), None);
    }

    #[test]
    fn empty_terminal_container_is_unavailable() {
        let doc = doc();
        assert_eq!(resolve(&doc, &path(&["pump", "stats"])), None);
    }

    #[test]
    fn scalar_in_the_middle_is_unavailable() {
        let doc = doc();
        // "name" is a string; indexing into it behaves like a missing key.
        assert_eq!(resolve(&doc, &path(&["name", "x"])), None);
        assert_eq!(resolve(&doc, &path(&["soil", "moisture", "deeper"])), None);
    }

    #[test]
    fn deterministic_and_non_mutating() {
        let doc = doc();
        let before = doc.clone();
        let p = path(&["soil", "moisture"]);

        let a = resolve(&doc, &p).cloned();
        let b = resolve(&doc, &p).cloned();

        assert_eq!(a, b);
        assert_eq!(doc, before);
    }
}
