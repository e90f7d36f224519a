//! `/api/*` forwarding to the REST backend
//!
//! The browser talks to its own origin so the session cookie stays
//! first-party; this router relays those calls to `API_UPSTREAM_URL`.

use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::{Path, RawQuery, State},
    http::{HeaderMap, HeaderName, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::any,
};
use serde::Serialize;
use std::sync::Arc;

use super::config::Config;

/// Request headers relayed to the backend
const FORWARDED_REQUEST_HEADERS: [HeaderName; 4] = [
    header::ACCEPT,
    header::AUTHORIZATION,
    header::CONTENT_TYPE,
    header::COOKIE,
];

/// Response headers relayed back to the browser
const FORWARDED_RESPONSE_HEADERS: [HeaderName; 3] =
    [header::CONTENT_TYPE, header::SET_COOKIE, header::LOCATION];

#[derive(Clone)]
pub struct ProxyState {
    upstream: Option<String>,
    client: reqwest::Client,
}

impl ProxyState {
    pub fn new(config: &Config) -> Self {
        Self {
            upstream: config.api_upstream_url.clone(),
            client: reqwest::Client::new(),
        }
    }
}

/// Error body in the shape the frontend reads (`message`)
#[derive(Serialize)]
struct ProxyError {
    message: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ProxyError {
            message: message.into(),
        }),
    )
        .into_response()
}

/// Create the API proxy router
pub fn api_proxy_router(config: &Config) -> Router {
    Router::new()
        .route("/api/{*path}", any(proxy_handler))
        .with_state(Arc::new(ProxyState::new(config)))
}

/// Build the backend URL for `/api/{path}?{query}`
pub fn upstream_url(base: &str, path: &str, query: Option<&str>) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    match query.filter(|q| !q.is_empty()) {
        Some(q) => format!("{}/api/{}?{}", base, path, q),
        None => format!("{}/api/{}", base, path),
    }
}

async fn proxy_handler(
    State(state): State<Arc<ProxyState>>,
    method: Method,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    forward(&state, method, &path, query.as_deref(), &headers, body).await
}

pub async fn forward(
    state: &ProxyState,
    method: Method,
    path: &str,
    query: Option<&str>,
    headers: &HeaderMap,
    body: Bytes,
) -> Response {
    let Some(base) = state.upstream.as_deref() else {
        tracing::warn!("API request to /api/{} but API_UPSTREAM_URL is not set", path);
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "The API backend is not configured",
        );
    };

    let url = upstream_url(base, path, query);
    tracing::debug!("proxy {} {}", method, url);

    let mut request = state.client.request(method.clone(), &url);
    for name in FORWARDED_REQUEST_HEADERS.iter() {
        for value in headers.get_all(name) {
            request = request.header(name, value);
        }
    }
    if !body.is_empty() {
        request = request.body(body);
    }

    let upstream = match request.send().await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::error!("Failed to reach API backend at {}: {}", url, e);
            return error_response(StatusCode::BAD_GATEWAY, "Could not reach the API backend");
        }
    };

    let status = upstream.status();
    if status.is_server_error() {
        tracing::warn!("API backend answered {} for {} {}", status, method, url);
    }

    let mut response_headers = HeaderMap::new();
    for name in FORWARDED_RESPONSE_HEADERS.iter() {
        for value in upstream.headers().get_all(name) {
            response_headers.append(name.clone(), value.clone());
        }
    }

    match upstream.bytes().await {
        Ok(bytes) => {
            let mut response = Response::new(Body::from(bytes));
            *response.status_mut() = status;
            *response.headers_mut() = response_headers;
            response
        }
        Err(e) => {
            tracing::error!("Failed to read API backend response: {}", e);
            error_response(
                StatusCode::BAD_GATEWAY,
                "The API backend sent an unreadable response",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_url() {
        assert_eq!(
            upstream_url("http://backend:8080/", "events/12", None),
            "http://backend:8080/api/events/12"
        );
        assert_eq!(
            upstream_url("http://backend:8080", "/events", Some("unitId=3")),
            "http://backend:8080/api/events?unitId=3"
        );
        assert_eq!(
            upstream_url("http://backend:8080", "auth/me", Some("")),
            "http://backend:8080/api/auth/me"
        );
    }

    #[tokio::test]
    async fn test_forward_without_upstream_is_503() {
        let config = Config {
            api_upstream_url: None,
            log_filter: "info".to_string(),
        };
        let state = ProxyState::new(&config);

        let response = forward(
            &state,
            Method::GET,
            "events",
            None,
            &HeaderMap::new(),
            Bytes::new(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
