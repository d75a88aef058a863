use crate::interface_adapters::handlers::invoke;
use crate::interface_adapters::state::AppState;
use axum::{Router, routing::post};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/invoke", post(invoke))
        .with_state(state)
}
