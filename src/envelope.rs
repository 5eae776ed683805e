//! Normalizes the API's response envelopes.
//!
//! Endpoints answer in several shapes: a bare array or object,
//! `{success, data}`, `{success, <resource key>}` (for example
//! `{success, reviews}`), or a paginated `{data: {items, totalPages}}`.
//! Everything downstream of this module only ever sees `Result<T, ClientError>`.

use crate::error::{ClientError, FALLBACK_MESSAGE};
use leptos::logging::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Keys that wrap a page of results inside `data`.
const PAGE_KEYS: &[&str] = &["items", "docs", "results"];

/// One page of an infinite-scroll list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: Option<u32>,
}

/// Message for a failed response: the body's `message`, then `error`, then the
/// fallback. Non-JSON bodies (proxy error pages and the like) get the fallback.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| message_of(&value))
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}

fn message_of(value: &Value) -> Option<String> {
    ["message", "error"].iter().find_map(|key| match value.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        // `error: {message: ...}`
        Some(Value::Object(inner)) => inner
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    })
}

/// Checks status and the `success` flag, returning the decoded body.
fn checked(status: u16, body: &str) -> Result<Value, ClientError> {
    if !(200..300).contains(&status) {
        return Err(ClientError::Server {
            status,
            message: error_message(body),
        });
    }
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    let value: Value = serde_json::from_str(body).map_err(|e| {
        warn!("[API] Unparseable response body: {}", e);
        ClientError::Unexpected(e.to_string())
    })?;
    if value.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(ClientError::Server {
            status,
            message: message_of(&value).unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
        });
    }
    Ok(value)
}

/// Picks the payload out of an envelope: `data`, then the resource keys, then
/// the body itself.
fn payload(value: Value, keys: &[&str]) -> Value {
    let Value::Object(mut map) = value else {
        return value;
    };
    if let Some(data) = map.remove("data") {
        return data;
    }
    for key in keys {
        if let Some(found) = map.remove(*key) {
            return found;
        }
    }
    Value::Object(map)
}

fn list_value(value: Value, keys: &[&str]) -> Option<Value> {
    match payload(value, keys) {
        list @ Value::Array(_) => Some(list),
        Value::Object(mut inner) => PAGE_KEYS
            .iter()
            .chain(keys.iter())
            .find_map(|key| match inner.remove(*key) {
                Some(list @ Value::Array(_)) => Some(list),
                _ => None,
            }),
        Value::Null => Some(Value::Array(Vec::new())),
        _ => None,
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|e| {
        warn!("[API] Response did not match the expected shape: {}", e);
        ClientError::Unexpected(e.to_string())
    })
}

pub fn parse_list<T: DeserializeOwned>(status: u16, body: &str, keys: &[&str]) -> Result<Vec<T>, ClientError> {
    let value = checked(status, body)?;
    match list_value(value, keys) {
        Some(list) => decode(list),
        None => Err(ClientError::Unexpected("response did not contain a list".into())),
    }
}

pub fn parse_page<T: DeserializeOwned>(status: u16, body: &str, keys: &[&str]) -> Result<Page<T>, ClientError> {
    let value = checked(status, body)?;
    let total_pages = total_pages_of(&value);
    let items = match list_value(value, keys) {
        Some(list) => decode(list)?,
        None => return Err(ClientError::Unexpected("response did not contain a list".into())),
    };
    Ok(Page { items, total_pages })
}

fn total_pages_of(value: &Value) -> Option<u32> {
    let read = |v: &Value| {
        v.get("totalPages")
            .or_else(|| v.get("pages"))
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
    };
    read(value).or_else(|| value.get("data").and_then(read))
}

pub fn parse_one<T: DeserializeOwned>(status: u16, body: &str, keys: &[&str]) -> Result<T, ClientError> {
    let value = checked(status, body)?;
    decode(payload(value, keys))
}

/// For endpoints whose success body carries nothing we need.
pub fn parse_ack(status: u16, body: &str) -> Result<(), ClientError> {
    checked(status, body).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Row {
        #[serde(rename = "_id")]
        id: String,
    }

    #[test]
    fn list_shapes_normalize_to_the_same_vec() {
        let expected = vec![Row { id: "a".into() }, Row { id: "b".into() }];
        let bodies = [
            r#"[{"_id":"a"},{"_id":"b"}]"#,
            r#"{"success":true,"data":[{"_id":"a"},{"_id":"b"}]}"#,
            r#"{"success":true,"reviews":[{"_id":"a"},{"_id":"b"}]}"#,
            r#"{"success":true,"data":{"items":[{"_id":"a"},{"_id":"b"}],"totalPages":3}}"#,
        ];
        for body in bodies {
            let rows: Vec<Row> = parse_list(200, body, &["reviews"]).unwrap();
            assert_eq!(rows, expected, "body: {body}");
        }
    }

    #[test]
    fn single_entity_under_data_or_key() {
        let a: Row = parse_one(201, r#"{"success":true,"data":{"_id":"x"}}"#, &[]).unwrap();
        let b: Row = parse_one(201, r#"{"success":true,"review":{"_id":"x"}}"#, &["review"]).unwrap();
        let c: Row = parse_one(200, r#"{"_id":"x"}"#, &[]).unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn success_false_passes_message_through() {
        let err = parse_list::<Row>(200, r#"{"success":false,"message":"Vendor is blocked"}"#, &[]).unwrap_err();
        assert_eq!(
            err,
            ClientError::Server {
                status: 200,
                message: "Vendor is blocked".into()
            }
        );
    }

    #[test]
    fn error_status_prefers_message_then_error_then_fallback() {
        assert_eq!(error_message(r#"{"message":"Not found"}"#), "Not found");
        assert_eq!(error_message(r#"{"error":"Duplicate key"}"#), "Duplicate key");
        assert_eq!(error_message(r#"{"error":{"message":"Bad id"}}"#), "Bad id");
        assert_eq!(error_message(r#"{"success":false}"#), FALLBACK_MESSAGE);
        assert_eq!(error_message(""), FALLBACK_MESSAGE);
        assert_eq!(error_message("Bad Gateway"), FALLBACK_MESSAGE);
        assert_eq!(
            error_message("<html><body><h1>502 Bad Gateway</h1></body></html>"),
            FALLBACK_MESSAGE
        );

        let err = parse_list::<Row>(502, "<html>Bad Gateway</html>", &[]).unwrap_err();
        assert_eq!(err.banner_message(), FALLBACK_MESSAGE);

        let err = parse_ack(404, r#"{"success":false,"message":"Review not found"}"#).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.banner_message(), "Review not found");
    }

    #[test]
    fn garbage_body_is_unexpected() {
        let err = parse_list::<Row>(200, "<html>oops</html>", &[]).unwrap_err();
        assert!(matches!(err, ClientError::Unexpected(_)));
        assert_eq!(err.banner_message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn page_reads_total_pages() {
        let page: Page<Row> = parse_page(
            200,
            r#"{"success":true,"data":{"items":[{"_id":"a"}],"totalPages":4}}"#,
            &[],
        )
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages, Some(4));

        let bare: Page<Row> = parse_page(200, r#"[{"_id":"a"}]"#, &[]).unwrap();
        assert_eq!(bare.total_pages, None);
    }
}
