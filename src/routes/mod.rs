use axum::{
    routing::{get, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::create_cors_layer;
use crate::handlers::{
    create_event, delete_event, get_event, health_check, list_events, replace_event,
    update_event, update_event_status,
};
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    let cors = create_cors_layer(state.config.cors_allowed_origins.as_deref());

    Router::new()
        .route("/health", get(health_check))
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/:id",
            get(get_event)
                .put(replace_event)
                .patch(update_event)
                .delete(delete_event),
        )
        .route("/events/status/:id", put(update_event_status))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
