//! Decoding of API responses into typed results.
//!
//! The server answers every call with JSON. A body that is not JSON at all means the
//! request never reached the API (proxy error page, empty body from the host), which
//! is reported as a connection failure. A JSON body with a non-2xx status carries
//! the server's own message in its `error` field.

use serde::de::DeserializeOwned;

use crate::domain::StockboardError;

/// Decodes a response body for the given HTTP status.
///
/// # Errors
///
/// - [`StockboardError::Network`] when the body is not JSON
/// - [`StockboardError::Api`] for non-2xx statuses
/// - [`StockboardError::Decode`] when a successful body has the wrong shape
///
/// # Examples
///
/// ```
/// use stockboard::api::response::decode;
/// use stockboard::domain::{DashboardSummary, StockboardError};
///
/// let body = r#"{"error": "Quantidade inválida"}"#.as_bytes();
/// let err = decode::<DashboardSummary>(400, body).unwrap_err();
/// assert!(matches!(err, StockboardError::Api { status: 400, .. }));
/// assert_eq!(err.to_string(), "Quantidade inválida");
/// ```
pub fn decode<T: DeserializeOwned>(status: u16, body: &[u8]) -> crate::Result<T> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(|e| {
        let text = String::from_utf8_lossy(body).trim().to_string();
        if text.is_empty() {
            StockboardError::Network(e.to_string())
        } else {
            StockboardError::Network(text)
        }
    })?;

    if !(200..300).contains(&status) {
        let message = value
            .get("error")
            .and_then(serde_json::Value::as_str)
            .map_or_else(|| format!("HTTP {status}"), str::to_string);
        return Err(StockboardError::Api { status, message });
    }

    serde_json::from_value(value).map_err(|e| StockboardError::Decode(e.to_string()))
}

/// Like [`decode`] for calls whose successful body is not needed.
///
/// # Errors
///
/// Same as [`decode`], except that any JSON shape is accepted on success.
pub fn decode_ack(status: u16, body: &[u8]) -> crate::Result<()> {
    decode::<serde_json::Value>(status, body).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DashboardSummary, ProductPage};

    #[test]
    fn success_body_decodes() {
        let body = br#"{"total_produtos": 2, "produtos_ok": 1, "produtos_baixo_estoque": 1, "produtos_esgotados": 0}"#;

        let summary: DashboardSummary = decode(200, body).unwrap();

        assert_eq!(summary.total_produtos, 2);
        assert_eq!(summary.produtos_baixo, 1);
    }

    #[test]
    fn error_field_is_reported_verbatim() {
        let body = br#"{"error": "could not convert string to float: None"}"#;

        let err = decode::<serde_json::Value>(400, body).unwrap_err();

        assert_eq!(err.to_string(), "could not convert string to float: None");
    }

    #[test]
    fn error_status_without_message_uses_status_text() {
        let err = decode::<serde_json::Value>(500, b"{}").unwrap_err();

        assert!(matches!(err, StockboardError::Api { status: 500, ref message } if message == "HTTP 500"));
    }

    #[test]
    fn non_json_body_is_a_network_failure() {
        let html = decode::<serde_json::Value>(502, b"<html>Bad Gateway</html>").unwrap_err();
        let empty = decode::<serde_json::Value>(0, b"").unwrap_err();

        assert!(matches!(html, StockboardError::Network(ref m) if m.contains("Bad Gateway")));
        assert!(matches!(empty, StockboardError::Network(_)));
    }

    #[test]
    fn wrong_shape_is_a_decode_failure() {
        let err = decode::<ProductPage>(200, br#"{"items": []}"#).unwrap_err();

        assert!(matches!(err, StockboardError::Decode(_)));
    }

    #[test]
    fn ack_accepts_any_success_body() {
        assert!(decode_ack(201, br#"{"id": 1}"#).is_ok());

        let missing = decode_ack(404, r#"{"error": "Produto não encontrado"}"#.as_bytes()).unwrap_err();
        assert_eq!(missing.to_string(), "Produto não encontrado");
    }
}
