//! Error body shared by every backend endpoint.

use serde::Deserialize;
use serde_json::Value;

/// Failure body returned by the backend: `{"detail": ...}`.
///
/// `detail` is normally a string. Request validation failures carry a list
/// of `{"loc", "msg", "type"}` items instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorDetail {
    /// Raw `detail` value.
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorDetail {
    /// Returns the display-ready message, or `None` when the detail is
    /// missing, `null`, empty, or of an unrecognized shape.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Array(items) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            _ => None,
        }
    }
}

/// Extracts the detail message from a raw failure body.
///
/// Bodies that are empty or not a JSON object yield `None`.
#[must_use]
pub fn detail_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorDetail>(body)
        .ok()
        .and_then(|detail| detail.message())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail() {
        assert_eq!(
            detail_message(br#"{"detail":"unreachable"}"#).as_deref(),
            Some("unreachable")
        );
    }

    #[test]
    fn missing_or_null_detail() {
        assert_eq!(detail_message(br#"{"error":"boom"}"#), None);
        assert_eq!(detail_message(br#"{"detail":null}"#), None);
    }

    #[test]
    fn empty_detail_counts_as_missing() {
        assert_eq!(detail_message(br#"{"detail":""}"#), None);
    }

    #[test]
    fn empty_or_non_json_body() {
        assert_eq!(detail_message(b""), None);
        assert_eq!(detail_message(b"<html>Bad Gateway</html>"), None);
        assert_eq!(detail_message(b"[1,2,3]"), None);
    }

    #[test]
    fn validation_items_are_joined() {
        let body = br#"{"detail":[
            {"loc":["body","port"],"msg":"value is not a valid integer","type":"type_error"},
            {"loc":["body","broker"],"msg":"field required","type":"value_error"}
        ]}"#;
        assert_eq!(
            detail_message(body).as_deref(),
            Some("value is not a valid integer; field required")
        );
    }

    #[test]
    fn unrecognized_detail_shape() {
        assert_eq!(detail_message(br#"{"detail":{"code":7}}"#), None);
        assert_eq!(detail_message(br#"{"detail":[]}"#), None);
    }
}
