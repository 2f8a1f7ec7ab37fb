//! Request handler module
//!
//! Routes each request to the health probe or to a mounted action and
//! writes the access log line.

mod action;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Error type every request body must convert into
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Validate Content-Length header against max body size
/// Returns Some(413 response) if too large, None otherwise
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get(hyper::header::CONTENT_LENGTH)?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_warning(&format!(
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

/// Route the request; returns the response and the action name, if one ran
async fn route_request<B>(
    req: Request<B>,
    state: &AppState,
) -> (Response<Full<Bytes>>, Option<&'static str>)
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let path = req.uri().path();

    // 1. Health probe
    let health = &state.config.health;
    if health.enabled && path == health.liveness_path {
        let response = match *req.method() {
            Method::GET => http::build_health_response(false),
            Method::HEAD => http::build_health_response(true),
            _ => http::build_405_response(http::HEALTH_METHODS),
        };
        return (response, None);
    }

    // 2. Actions (exact match)
    let Some(handler) = state.actions.resolve(path) else {
        return (http::build_404_response(), None);
    };
    let name = handler.name();

    match *req.method() {
        Method::POST => {}
        Method::OPTIONS => {
            return (
                http::build_options_response(state.config.http.enable_cors),
                Some(name),
            );
        }
        ref method => {
            logger::log_warning(&format!("Method not allowed: {method} {path}"));
            return (http::build_405_response(http::ACTION_METHODS), Some(name));
        }
    }

    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return (resp, Some(name));
    }

    let response = action::serve_action(req.into_body(), handler.as_ref(), state).await;
    (response, Some(name))
}

pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let started = Instant::now();
    let access_log = state.access_log_enabled();

    let entry = access_log.then(|| {
        let mut entry = AccessLogEntry::new(
            remote_addr.ip().to_string(),
            req.method().to_string(),
            req.uri().path().to_string(),
        );
        entry.http_version = format_version(req.version()).to_string();
        entry.user_agent = req
            .headers()
            .get(hyper::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        entry
    });

    let (response, action) = route_request(req, &state).await;

    if let Some(mut entry) = entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.action = action.map(ToString::to_string);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn format_version(version: hyper::Version) -> &'static str {
    if version == hyper::Version::HTTP_10 {
        "1.0"
    } else if version == hyper::Version::HTTP_2 {
        "2"
    } else {
        "1.1"
    }
}
