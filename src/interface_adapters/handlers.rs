use crate::interface_adapters::protocol::{
    ErrorResponse, InvocationContext, InvocationEvent, InvocationResponse,
};
use crate::interface_adapters::state::AppState;
use crate::use_cases::probe::ProbeUseCase;
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use tracing::{Instrument, info_span, warn};
use uuid::Uuid;

// Header carrying the platform-assigned request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// Handler for a single probe invocation.
pub async fn invoke(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<InvocationResponse>, (StatusCode, Json<ErrorResponse>)> {
    let event = parse_event(&body)?;
    let context = InvocationContext {
        request_id: request_id_from(&headers),
    };

    let use_case = ProbeUseCase {
        connector: state.connector.clone(),
        sink: state.sink.clone(),
        clock: state.clock.clone(),
    };

    let span = info_span!("invocation", request_id = %context.request_id);
    let response = use_case.execute(event, context).instrument(span).await;

    Ok(Json(response))
}

// An empty body is the same as `{}`.
fn parse_event(body: &[u8]) -> Result<InvocationEvent, (StatusCode, Json<ErrorResponse>)> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(InvocationEvent::default());
    }

    serde_json::from_slice(body).map_err(|err| {
        warn!(error = %err, "rejected invocation event");
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "invalid event payload".to_string(),
            }),
        )
    })
}

// Use the caller's platform id when present, otherwise assign one.
fn request_id_from(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
