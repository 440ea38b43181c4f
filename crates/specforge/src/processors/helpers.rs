//! Shared YAML value builders used across processor modules.

use serde_yaml_ng::{Mapping, Value};

/// Media type assumed when a body has a type but declares none.
pub const DEFAULT_MEDIA_TYPE: &str = "application/json";

/// Shorthand for `Value::String`.
pub fn val_s(s: &str) -> Value {
    Value::String(s.to_string())
}

/// Build a mapping from `(key, value)` pairs, keeping order.
pub fn mapping<I>(entries: I) -> Value
where
    I: IntoIterator<Item = (&'static str, Value)>,
{
    let mut map = Mapping::new();
    for (key, value) in entries {
        map.insert(val_s(key), value);
    }
    Value::Mapping(map)
}

/// `{ $ref: <reference> }` schema.
pub fn schema_ref(reference: &str) -> Value {
    mapping([("$ref", val_s(reference))])
}

/// OpenAPI 3 `content` object carrying `schema` under every media type.
///
/// Falls back to [`DEFAULT_MEDIA_TYPE`] when `media_types` is empty.
pub fn content_with_schema(media_types: &[String], schema: &Value) -> Value {
    let mut content = Mapping::new();
    if media_types.is_empty() {
        content.insert(
            val_s(DEFAULT_MEDIA_TYPE),
            mapping([("schema", schema.clone())]),
        );
    }
    for media_type in media_types {
        content.insert(
            val_s(media_type),
            mapping([("schema", schema.clone())]),
        );
    }
    Value::Mapping(content)
}

/// Copy every key of a mapping `source` into `target`, keeping existing keys.
pub fn merge_missing(target: &mut Mapping, source: &Value) {
    let Some(source) = source.as_mapping() else {
        return;
    };
    for (key, value) in source {
        if !target.contains_key(key) {
            target.insert(key.clone(), value.clone());
        }
    }
}

/// Default description for a status code when none was declared.
pub fn status_description(status: &str) -> &'static str {
    match status {
        "200" | "201" | "202" | "203" | "204" | "206" => "Success",
        "301" | "302" | "303" | "307" | "308" => "Redirect",
        "304" => "Not Modified",
        "400" => "Bad Request",
        "401" => "Unauthorized",
        "403" => "Forbidden",
        "404" => "Not Found",
        "409" => "Conflict",
        "422" => "Unprocessable Entity",
        "500" => "Server Error",
        _ => "Response",
    }
}
