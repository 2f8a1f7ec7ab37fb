// Action request pipeline: collect body -> decode -> execute -> encode

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::Response;

use super::BoxError;
use crate::action::ActionHandler;
use crate::config::AppState;
use crate::error::ActionError;
use crate::http;
use crate::logger;

pub async fn serve_action<B>(
    body: B,
    handler: &dyn ActionHandler,
    state: &AppState,
) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    match run_action(body, handler, state).await {
        Ok(encoded) => http::build_json_response(encoded, &state.config.http),
        Err(err) => {
            logger::log_action_failed(handler.name(), &err);
            error_response(&err)
        }
    }
}

async fn run_action<B>(
    body: B,
    handler: &dyn ActionHandler,
    state: &AppState,
) -> Result<Vec<u8>, ActionError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let bytes = read_body(body, state.config.http.max_body_size).await?;
    handler.call(&bytes, state.config.action.payload)
}

/// Collect the whole body, failing once it grows past `max_body_size`
async fn read_body<B>(body: B, max_body_size: u64) -> Result<Bytes, ActionError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            Err(ActionError::PayloadTooLarge { max: max_body_size })
        }
        Err(e) => Err(ActionError::BodyRead(e.to_string())),
    }
}

fn error_response(err: &ActionError) -> Response<Full<Bytes>> {
    match err {
        ActionError::PayloadTooLarge { .. } => http::build_413_response(),
        ActionError::Rejected(message) => http::build_action_error_response(message),
        other => http::build_error_response(other.status(), &other.to_string()),
    }
}
