//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method
//! validation, route matching, and access logging.

use crate::config::AppState;
use crate::handler::predict;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    // 1. Check body size before reading anything
    let mut response = if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        resp
    } else {
        // 2. Dispatch on method and path
        route_request(req, &state, &method, &path).await
    };

    // 3. Identify the server in every response
    if let Ok(server_name) = state.config.http.server_name.parse() {
        response.headers_mut().insert("Server", server_name);
    }

    // 4. Access log
    if state.access_log_enabled() {
        let mut entry = AccessLogEntry::new(
            remote_addr.ip().to_string(),
            method.to_string(),
            path.clone(),
        );
        entry.status = response.status().as_u16();
        entry.body_bytes = usize::try_from(response.body().size_hint().exact().unwrap_or(0))
            .unwrap_or(usize::MAX);
        entry.user_agent = user_agent;
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on method, path and configuration
async fn route_request(
    req: Request<hyper::body::Incoming>,
    state: &Arc<AppState>,
    method: &Method,
    path: &str,
) -> Response<Full<Bytes>> {
    let health = &state.config.routes.health;
    match (method, path) {
        (&Method::GET, "/") => home_response(),
        (&Method::GET, p) if health.enabled && p == health.path => health_response(),
        (&Method::POST, "/predict") => predict::handle_predict(req, state).await,
        (&Method::OPTIONS, _) => http::build_options_response(state.config.http.enable_cors),
        // Known paths with the wrong method
        (_, "/" | "/predict") => method_not_allowed(method, path),
        (m, p) if health.enabled && p == health.path => method_not_allowed(m, p),
        _ => http::build_404_response(),
    }
}

/// Service banner for the root path
fn home_response() -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "message": "Road accidents prediction API is running"
    });
    http::build_json_response(StatusCode::OK, &body)
}

/// Liveness probe
fn health_response() -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "status": "ok" });
    http::build_json_response(StatusCode::OK, &body)
}

fn method_not_allowed(method: &Method, path: &str) -> Response<Full<Bytes>> {
    logger::log_warning(&format!("Method not allowed: {method} {path}"));
    http::build_405_response()
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}
