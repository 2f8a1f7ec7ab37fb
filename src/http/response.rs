//! HTTP response building module
//!
//! Provides builders for the status codes the action endpoint produces.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::config::HttpConfig;
use crate::logger;

/// Methods accepted on an action path
pub const ACTION_METHODS: &str = "POST, OPTIONS";
/// Methods accepted on the health path
pub const HEALTH_METHODS: &str = "GET, HEAD";

/// Build 200 response carrying an encoded action result
pub fn build_json_response(body: Vec<u8>, http_config: &HttpConfig) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .header("Server", &http_config.server_name);

    if http_config.enable_cors {
        builder = builder.header("Access-Control-Allow-Origin", "*");
    }

    builder.body(Full::new(Bytes::from(body))).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build a plain-text error response: the message followed by a newline
pub fn build_error_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("X-Content-Type-Options", "nosniff")
        .body(Full::new(Bytes::from(format!("{message}\n"))))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::from(message.to_string())))
        })
}

/// Build 400 response in the shape GraphQL engines expect from actions
pub fn build_action_error_response(message: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "message": message });
    Response::builder()
        .status(StatusCode::BAD_REQUEST)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap_or_else(|e| {
            log_build_error("400", &e);
            Response::new(Full::new(Bytes::from(message.to_string())))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_error_response(StatusCode::NOT_FOUND, "404 page not found")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(allow: &'static str) -> Response<Full<Bytes>> {
    let mut response = build_error_response(StatusCode::METHOD_NOT_ALLOWED, "405 method not allowed");
    response
        .headers_mut()
        .insert("Allow", hyper::header::HeaderValue::from_static(allow));
    response
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    build_error_response(StatusCode::PAYLOAD_TOO_LARGE, "413 payload too large")
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", ACTION_METHODS);

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", ACTION_METHODS)
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build health check response
pub fn build_health_response(is_head: bool) -> Response<Full<Bytes>> {
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from_static(br#"{"status":"ok"}"#)
    };
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .header("Cache-Control", "no-cache, no-store")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("health", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

fn log_build_error(kind: &str, err: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {kind} response: {err}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn http_config(enable_cors: bool) -> HttpConfig {
        HttpConfig {
            server_name: "test".to_string(),
            enable_cors,
            max_body_size: 1024,
        }
    }

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_json_response() {
        let response = build_json_response(br#"{"accessToken":""}"#.to_vec(), &http_config(false));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "application/json");
        assert_eq!(response.headers()["server"], "test");
        assert!(response.headers().get("access-control-allow-origin").is_none());
        assert_eq!(body_string(response).await, r#"{"accessToken":""}"#);
    }

    #[test]
    fn test_json_response_cors() {
        let response = build_json_response(b"{}".to_vec(), &http_config(true));
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn test_error_response_is_plain_text_with_newline() {
        let response = build_error_response(StatusCode::BAD_REQUEST, "EOF while parsing");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["content-type"], "text/plain; charset=utf-8");
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        assert_eq!(body_string(response).await, "EOF while parsing\n");
    }

    #[tokio::test]
    async fn test_action_error_response() {
        let response = build_action_error_response("user exists");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(response).await, r#"{"message":"user exists"}"#);
    }

    #[test]
    fn test_405_lists_allowed_methods() {
        let response = build_405_response(ACTION_METHODS);
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()["allow"], "POST, OPTIONS");

        let response = build_405_response(HEALTH_METHODS);
        assert_eq!(response.headers()["allow"], "GET, HEAD");
    }

    #[test]
    fn test_options_response() {
        let response = build_options_response(false);
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.headers().get("access-control-allow-methods").is_none());

        let response = build_options_response(true);
        assert_eq!(response.headers()["access-control-allow-methods"], "POST, OPTIONS");
    }

    #[tokio::test]
    async fn test_health_response() {
        assert_eq!(body_string(build_health_response(false)).await, r#"{"status":"ok"}"#);
        assert!(body_string(build_health_response(true)).await.is_empty());
    }
}
