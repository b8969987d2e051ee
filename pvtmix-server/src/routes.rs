use std::sync::Arc;

use pvtmix_core::Component;
use pvtmix_correlations::{ComputationError, PvtInput, PvtOutput};
use serde_json::json;
use tracing::{info, warn};
use warp::{
    Filter, Rejection, Reply,
    http::StatusCode,
    hyper::body::Bytes,
    reply::{self, Response},
};

use crate::dto::{ErrorDetail, PvtRequest, PvtResponse, ValidationDetail, parse_request};

/// Largest request body accepted by `POST /pvt`.
pub const MAX_BODY_BYTES: u64 = 16 * 1024;

/// Builds the HTTP routes around a mixture-properties component.
///
/// - `POST /pvt` computes mixture properties from a [`PvtRequest`]
/// - `GET /pvt/example` returns a valid example request
/// - `GET /health` reports liveness
pub fn routes<C>(component: C) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone
where
    C: Component<Input = PvtInput, Output = PvtOutput, Error = ComputationError>
        + Send
        + Sync
        + 'static,
{
    let component = Arc::new(component);

    let pvt = warp::path("pvt")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::bytes())
        .map(move |body: Bytes| handle_pvt(component.as_ref(), &body));

    let example = warp::path!("pvt" / "example")
        .and(warp::get())
        .map(|| reply::json(&PvtRequest::default()));

    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| reply::json(&json!({ "status": "ok" })));

    pvt.or(example)
        .or(health)
        .with(warp::trace::request())
}

fn handle_pvt<C>(component: &C, body: &[u8]) -> Response
where
    C: Component<Input = PvtInput, Output = PvtOutput, Error = ComputationError>,
{
    let raw = match parse_request(body) {
        Ok(raw) => raw,
        Err(detail) => {
            info!(
                invalid_fields = detail.detail.len(),
                "rejected malformed request body"
            );
            return unprocessable(&detail);
        }
    };

    let input = match PvtInput::validate_all(raw) {
        Ok(input) => input,
        Err(errors) => {
            info!(invalid_fields = errors.len(), "rejected invalid request");
            return unprocessable(&ValidationDetail::from_validation_errors(&raw, &errors));
        }
    };

    match component.call(input) {
        Ok(output) => reply::json(&PvtResponse::from(output)).into_response(),
        Err(error) => {
            warn!(
                %error,
                quantity = error.quantity(),
                "mixture property computation failed"
            );
            reply::with_status(
                reply::json(&ErrorDetail {
                    detail: error.to_string(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
            .into_response()
        }
    }
}

fn unprocessable(detail: &ValidationDetail) -> Response {
    reply::with_status(reply::json(detail), StatusCode::UNPROCESSABLE_ENTITY).into_response()
}
