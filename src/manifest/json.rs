//! Narrowing helpers over `serde_json::Value`

use serde_json::Value;

/// JavaScript-style truthiness: null, false, 0, NaN and "" are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `value[key]` when `value` is an object and the key is present
pub fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.as_object().and_then(|map| map.get(key))
}

/// `value[key]` as an array
pub fn array_field<'a>(value: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    field(value, key).and_then(Value::as_array)
}

/// `value[key]` as a non-empty string
pub fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    field(value, key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// String elements of an array, in order; other elements are dropped
pub fn strings(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_owned)
        .collect()
}
