use axum::response::Response;
use serde::Serialize;

use crate::utils::response::success;

pub mod events;

pub use events::{
    create_event, delete_event, get_event, list_events, replace_event, update_event,
    update_event_status,
};

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "agenda-api",
    };

    success(payload, "Health check successful")
}
