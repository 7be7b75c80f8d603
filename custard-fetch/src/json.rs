//! Helpers for loosely-shaped vendor JSON.

use std::collections::VecDeque;

use serde_json::Value;

/// Default depth bound for [`find_location_like`].
pub const DEFAULT_MAX_DEPTH: usize = 6;

/// Minimum number of key groups an object needs to count as a location.
pub const LOCATION_SCORE_THRESHOLD: usize = 3;

const ID_KEYS: &[&str] = &["slug", "id", "storeId", "store_id", "number"];
const STREET_KEYS: &[&str] = &["street", "address", "address1"];
const CITY_KEYS: &[&str] = &["city"];
const STATE_KEYS: &[&str] = &["state", "region"];
const POSTAL_KEYS: &[&str] = &["postalCode", "zip", "zipCode", "zip_code"];

/// Follows object keys from `value`.
pub fn at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |node, key| node.get(key))
}

/// Non-blank trimmed string at `path`.
pub fn str_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    at(value, path)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Number at `path`, accepting numeric strings.
pub fn f64_at(value: &Value, path: &[&str]) -> Option<f64> {
    at(value, path).and_then(value_as_f64)
}

/// Reads a number or a numeric string.
pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn has_any(object: &serde_json::Map<String, Value>, keys: &[&str]) -> bool {
    keys.iter()
        .any(|k| object.get(*k).is_some_and(|v| !v.is_null()))
}

/// Number of location key groups present on `object`.
pub fn location_score(object: &serde_json::Map<String, Value>) -> usize {
    [ID_KEYS, STREET_KEYS, CITY_KEYS, STATE_KEYS, POSTAL_KEYS]
        .iter()
        .filter(|keys| has_any(object, keys))
        .count()
}

/// Breadth-first, depth-bounded search for objects that look like store
/// locations.
///
/// An object qualifies when it scores at least
/// [`LOCATION_SCORE_THRESHOLD`] key groups and has both an id and a city.
/// Matches are returned in visit order; a match's children are not visited.
pub fn find_location_like(value: &Value, max_depth: usize) -> Vec<&Value> {
    let mut found = Vec::new();
    let mut queue = VecDeque::from([(value, 0usize)]);

    while let Some((node, depth)) = queue.pop_front() {
        let children: Box<dyn Iterator<Item = &Value>> = match node {
            Value::Object(object) => {
                if location_score(object) >= LOCATION_SCORE_THRESHOLD
                    && has_any(object, ID_KEYS)
                    && has_any(object, CITY_KEYS)
                {
                    found.push(node);
                    continue;
                }
                Box::new(object.values())
            }
            Value::Array(items) => Box::new(items.iter()),
            _ => continue,
        };

        if depth < max_depth {
            queue.extend(children.map(|child| (child, depth + 1)));
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paths() {
        let v = json!({"a": {"b": {"c": " x ", "n": "4.5"}}});
        assert_eq!(str_at(&v, &["a", "b", "c"]), Some("x"));
        assert_eq!(f64_at(&v, &["a", "b", "n"]), Some(4.5));
        assert!(at(&v, &["a", "missing"]).is_none());
    }

    #[test]
    fn test_find_location_like_nested() {
        let v = json!({
            "result": {
                "meta": {"count": 2},
                "stores": [
                    {"slug": "madison-wi-mineral-point-rd", "city": "Madison", "state": "WI", "street": "1 Main"},
                    {"id": 7, "city": "Verona", "zip": "53593"},
                    {"name": "not a store", "city": "Nowhere"}
                ]
            }
        });
        let found = find_location_like(&v, DEFAULT_MAX_DEPTH);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0]["slug"], "madison-wi-mineral-point-rd");
        assert_eq!(found[1]["id"], 7);
    }

    #[test]
    fn test_find_location_like_requires_city() {
        let v = json!([{"id": 1, "street": "x", "state": "WI", "zip": "53000"}]);
        assert!(find_location_like(&v, DEFAULT_MAX_DEPTH).is_empty());
    }

    #[test]
    fn test_depth_bound() {
        let v = json!({"a": {"b": {"c": {"id": 1, "city": "Wales", "state": "WI"}}}});
        assert!(find_location_like(&v, 2).is_empty());
        assert_eq!(find_location_like(&v, 3).len(), 1);
    }
}
