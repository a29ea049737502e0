use axum::extract::State;
use axum::response::Response;
use serde::{Deserialize, Serialize};

use crate::models::{EventPatch, EventStatus, NewEvent};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::{EventId, JsonBody};
use crate::utils::response::{created, empty_success, success};

/// Body of `POST /events` and `PUT /events/:id`.
///
/// Fields are optional at the parsing stage so that a missing field is
/// reported as a validation error naming it.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
}

impl EventPayload {
    pub fn into_new_event(self) -> Result<NewEvent, AppError> {
        let fields = [
            ("title", &self.title),
            ("description", &self.description),
            ("start", &self.start),
            ("end", &self.end),
            ("location", &self.location),
            ("status", &self.status),
        ];
        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(AppError::validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(NewEvent {
            status: parse_status(self.status.unwrap_or_default())?,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            start: self.start.unwrap_or_default(),
            end: self.end.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
        })
    }
}

/// Body of `PATCH /events/:id`. Omitted fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventPatchPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
}

impl EventPatchPayload {
    pub fn into_patch(self) -> Result<EventPatch, AppError> {
        Ok(EventPatch {
            status: self.status.map(parse_status).transpose()?,
            title: self.title,
            description: self.description,
            start: self.start,
            end: self.end,
            location: self.location,
        })
    }
}

/// Body of `PUT /events/status/:id`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusPayload {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreatedEvent {
    id: i64,
}

#[derive(Debug, Serialize)]
struct StatusChange {
    id: i64,
    status: EventStatus,
}

fn parse_status(raw: String) -> Result<EventStatus, AppError> {
    raw.parse::<EventStatus>()
        .map_err(|e| AppError::validation(e.to_string()))
}

pub async fn list_events(State(state): State<AppState>) -> Result<Response, AppError> {
    let events = state.events.list_all().await?;
    Ok(success(events, "Events retrieved successfully"))
}

pub async fn create_event(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<EventPayload>,
) -> Result<Response, AppError> {
    let event = payload.into_new_event()?;
    let id = state.events.create(&event).await?;
    Ok(created(CreatedEvent { id }, "Event created successfully"))
}

pub async fn get_event(
    State(state): State<AppState>,
    EventId(id): EventId,
) -> Result<Response, AppError> {
    let event = state.events.get_by_id(id).await?;
    Ok(success(event, "Event retrieved successfully"))
}

pub async fn replace_event(
    State(state): State<AppState>,
    EventId(id): EventId,
    JsonBody(payload): JsonBody<EventPayload>,
) -> Result<Response, AppError> {
    let event = payload.into_new_event()?;
    state.events.replace(id, &event).await?;
    Ok(empty_success("Event updated successfully"))
}

pub async fn update_event(
    State(state): State<AppState>,
    EventId(id): EventId,
    JsonBody(payload): JsonBody<EventPatchPayload>,
) -> Result<Response, AppError> {
    let patch = payload.into_patch()?;
    state.events.update_partial(id, &patch).await?;
    Ok(empty_success("Event updated successfully"))
}

pub async fn update_event_status(
    State(state): State<AppState>,
    EventId(id): EventId,
    JsonBody(payload): JsonBody<StatusPayload>,
) -> Result<Response, AppError> {
    let status = payload.status.map(parse_status).transpose()?;
    let event = state.events.update_status(id, status).await?;
    let change = StatusChange {
        id: event.id,
        status: event.status,
    };
    Ok(success(change, "Event status updated successfully"))
}

pub async fn delete_event(
    State(state): State<AppState>,
    EventId(id): EventId,
) -> Result<Response, AppError> {
    state.events.delete(id).await?;
    Ok(empty_success("Event deleted successfully"))
}
