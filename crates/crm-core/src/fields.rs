//! Free-form field maps used for create and update payloads.
//!
//! Payloads arrive as JSON objects. Keys managed by the store (`_id`,
//! `createdAt`, `updatedAt`) are never taken from a payload.

use serde_json::{Map, Value};

/// A JSON object of record fields.
pub type Fields = Map<String, Value>;

/// Wire name of the identifier field.
pub const ID_KEY: &str = "_id";
/// Wire name of the creation timestamp.
pub const CREATED_AT_KEY: &str = "createdAt";
/// Wire name of the modification timestamp.
pub const UPDATED_AT_KEY: &str = "updatedAt";

/// Keys that callers can never set.
pub const MANAGED_KEYS: [&str; 3] = [ID_KEY, CREATED_AT_KEY, UPDATED_AT_KEY];

/// Returns `true` if `key` is assigned by the store.
pub fn is_managed(key: &str) -> bool {
    MANAGED_KEYS.contains(&key)
}

/// Prepares a create payload: drops managed keys and `null` values.
pub fn sanitize(fields: Fields) -> Fields {
    fields
        .into_iter()
        .filter(|(k, v)| !is_managed(k) && !v.is_null())
        .collect()
}

/// Merges a partial update onto `base`.
///
/// Supplied keys overwrite, `null` removes the key, managed keys are ignored.
/// An object merges into an existing object key by key, so a patch of
/// `{"relatedTo": {"id": "b"}}` keeps the stored `relatedTo.type`.
pub fn merge_patch(base: &mut Fields, patch: Fields) {
    for (key, value) in patch {
        if is_managed(&key) {
            continue;
        }
        merge_value(base, key, value);
    }
}

fn merge_value(base: &mut Fields, key: String, value: Value) {
    match value {
        Value::Null => {
            base.remove(&key);
        }
        Value::Object(nested) => match base.get_mut(&key) {
            Some(Value::Object(existing)) => {
                for (k, v) in nested {
                    merge_value(existing, k, v);
                }
            }
            _ => {
                base.insert(key, Value::Object(nested));
            }
        },
        value => {
            base.insert(key, value);
        }
    }
}

/// Looks up a value by dotted path (`relatedTo.type`).
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, segment| current.get(segment))
}

/// Converts a JSON value into an object map, if it is one.
pub fn into_fields(value: Value) -> Option<Fields> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn obj(v: Value) -> Fields {
        into_fields(v).unwrap()
    }

    #[test]
    fn sanitize_drops_managed_and_null() {
        let f = sanitize(obj(json!({
            "_id": "x",
            "createdAt": "2020-01-01",
            "title": "Call",
            "description": null
        })));
        assert_eq!(Value::Object(f), json!({"title": "Call"}));
    }

    #[test]
    fn merge_overwrites_and_clears() {
        let mut base = obj(json!({"_id": "a", "title": "Old", "description": "d"}));
        merge_patch(
            &mut base,
            obj(json!({"_id": "b", "title": "New", "description": null, "status": "Review"})),
        );
        assert_eq!(
            Value::Object(base),
            json!({"_id": "a", "title": "New", "status": "Review"})
        );
    }

    #[test]
    fn merge_descends_into_objects() {
        let mut base = obj(json!({
            "title": "t",
            "relatedTo": {"type": "Lead", "id": "a"}
        }));
        merge_patch(&mut base, obj(json!({"relatedTo": {"id": "b"}})));
        assert_eq!(base["relatedTo"], json!({"type": "Lead", "id": "b"}));

        merge_patch(&mut base, obj(json!({"relatedTo": {"id": null}})));
        assert_eq!(base["relatedTo"], json!({"type": "Lead"}));

        merge_patch(&mut base, obj(json!({"team": ["x"]})));
        merge_patch(&mut base, obj(json!({"team": ["y"]})));
        assert_eq!(base["team"], json!(["y"]));
    }

    #[test]
    fn lookup_dotted_path() {
        let v = json!({"relatedTo": {"type": "Lead", "id": "1"}});
        assert_eq!(lookup(&v, "relatedTo.type"), Some(&json!("Lead")));
        assert_eq!(lookup(&v, "relatedTo.missing"), None);
        assert_eq!(lookup(&v, "title"), None);
    }
}
