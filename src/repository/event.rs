use crate::db::Store;
use crate::models::{Event, EventPatch, EventStatus, NewEvent};

use super::EventError;

const LIST_EVENTS: &str = r#"
    SELECT id, title, description, start_at, end_at, location, status
    FROM events
    ORDER BY id
"#;

const GET_EVENT: &str = r#"
    SELECT id, title, description, start_at, end_at, location, status
    FROM events
    WHERE id = ?1
"#;

const INSERT_EVENT: &str = r#"
    INSERT INTO events (title, description, start_at, end_at, location, status)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

const REPLACE_EVENT: &str = r#"
    UPDATE events
    SET title = ?1, description = ?2, start_at = ?3, end_at = ?4, location = ?5, status = ?6
    WHERE id = ?7
"#;

const PATCH_EVENT: &str = r#"
    UPDATE events
    SET title = COALESCE(?1, title),
        description = COALESCE(?2, description),
        start_at = COALESCE(?3, start_at),
        end_at = COALESCE(?4, end_at),
        location = COALESCE(?5, location),
        status = COALESCE(?6, status)
    WHERE id = ?7
"#;

const UPDATE_STATUS: &str = "UPDATE events SET status = ?1 WHERE id = ?2";

const DELETE_EVENT: &str = "DELETE FROM events WHERE id = ?1";

/// CRUD and status operations on the event table.
///
/// Each call opens its own connection and releases it before returning.
/// Writes are single statements, so a rejected write leaves the row untouched.
#[derive(Debug, Clone)]
pub struct EventRepository {
    store: Store,
}

impl EventRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub async fn list_all(&self) -> Result<Vec<Event>, EventError> {
        let mut conn = self.store.connect().await?;
        let events = sqlx::query_as::<_, Event>(LIST_EVENTS)
            .fetch_all(&mut conn)
            .await?;

        Ok(events)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Event, EventError> {
        let mut conn = self.store.connect().await?;
        sqlx::query_as::<_, Event>(GET_EVENT)
            .bind(id)
            .fetch_optional(&mut conn)
            .await?
            .ok_or(EventError::NotFound(id))
    }

    /// Inserts a new event and returns its id.
    pub async fn create(&self, event: &NewEvent) -> Result<i64, EventError> {
        let mut conn = self.store.connect().await?;
        let result = sqlx::query(INSERT_EVENT)
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.start)
            .bind(&event.end)
            .bind(&event.location)
            .bind(event.status)
            .execute(&mut conn)
            .await
            .map_err(|e| EventError::from_write(e, "Failed to create event"))?;

        let id = result.last_insert_rowid();
        tracing::info!(event_id = id, "Event created");
        Ok(id)
    }

    /// Overwrites every column of an existing event.
    pub async fn replace(&self, id: i64, event: &NewEvent) -> Result<(), EventError> {
        let mut conn = self.store.connect().await?;
        let result = sqlx::query(REPLACE_EVENT)
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.start)
            .bind(&event.end)
            .bind(&event.location)
            .bind(event.status)
            .bind(id)
            .execute(&mut conn)
            .await
            .map_err(|e| EventError::from_write(e, "Failed to update event"))?;

        if result.rows_affected() == 0 {
            return Err(EventError::NotFound(id));
        }

        tracing::info!(event_id = id, "Event replaced");
        Ok(())
    }

    /// Overwrites only the columns present in `patch`.
    pub async fn update_partial(&self, id: i64, patch: &EventPatch) -> Result<(), EventError> {
        let mut conn = self.store.connect().await?;
        let result = sqlx::query(PATCH_EVENT)
            .bind(patch.title.as_deref())
            .bind(patch.description.as_deref())
            .bind(patch.start.as_deref())
            .bind(patch.end.as_deref())
            .bind(patch.location.as_deref())
            .bind(patch.status)
            .bind(id)
            .execute(&mut conn)
            .await
            .map_err(|e| EventError::from_write(e, "Failed to update event"))?;

        if result.rows_affected() == 0 {
            return Err(EventError::NotFound(id));
        }

        tracing::info!(event_id = id, "Event updated");
        Ok(())
    }

    /// Sets the status of an event and returns the event as read back
    /// afterwards. The read is a separate round trip from the write.
    pub async fn update_status(
        &self,
        id: i64,
        status: Option<EventStatus>,
    ) -> Result<Event, EventError> {
        let status = status.ok_or_else(|| EventError::validation("Field 'status' is required"))?;

        {
            let mut conn = self.store.connect().await?;
            let result = sqlx::query(UPDATE_STATUS)
                .bind(status)
                .bind(id)
                .execute(&mut conn)
                .await
                .map_err(|e| EventError::from_write(e, "Failed to update event status"))?;

            if result.rows_affected() == 0 {
                return Err(EventError::NotFound(id));
            }
        }

        tracing::info!(event_id = id, status = %status, "Event status updated");
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), EventError> {
        let mut conn = self.store.connect().await?;
        let result = sqlx::query(DELETE_EVENT)
            .bind(id)
            .execute(&mut conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(EventError::NotFound(id));
        }

        tracing::info!(event_id = id, "Event deleted");
        Ok(())
    }
}
