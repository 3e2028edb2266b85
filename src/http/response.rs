//! HTTP response building module
//!
//! Builders for the JSON responses the service emits, decoupled from the
//! prediction business logic. Builder failures fall back to a plain
//! response instead of panicking.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Build a JSON response from any serializable body
pub fn build_json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(body) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return build_fallback(
                StatusCode::INTERNAL_SERVER_ERROR,
                r#"{"detail":"Internal server error"}"#,
            );
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_u16(), &e);
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// Build an error response with the `{"detail": ...}` wire shape
pub fn build_error_response(status: StatusCode, detail: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "detail": detail });
    build_json_response(status, &body)
}

/// Build 400 Bad Request response
pub fn build_400_response(detail: &str) -> Response<Full<Bytes>> {
    build_error_response(StatusCode::BAD_REQUEST, detail)
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_error_response(StatusCode::NOT_FOUND, "Not Found")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    let body = r#"{"detail":"Method Not Allowed"}"#;
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", "application/json")
        .header("Allow", "GET, POST, OPTIONS")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error(405, &e);
            Response::new(Full::new(Bytes::from(body)))
        })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    build_error_response(StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large")
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", "GET, POST, OPTIONS");

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error(204, &e);
        Response::new(Full::new(Bytes::new()))
    })
}

fn build_fallback(status: StatusCode, body: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from(body))))
}

/// Log response build error
fn log_build_error(status: u16, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
