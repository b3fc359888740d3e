//! Event endpoints

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get},
};
use serde::Deserialize;

use moncal_core::event::{Event, NewEvent};
use moncal_core::grouping::CalendarDay;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/{id}", delete(delete_event))
        .route("/days", get(list_days))
}

/// GET /events - Flat event list for the session user
async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, AppError> {
    let mut controller = state.controller();
    controller.reload().await?;

    let events: Vec<Event> = controller
        .days()
        .iter()
        .flat_map(|d| d.events.iter().cloned())
        .collect();

    Ok(Json(events))
}

/// GET /days - Events grouped into per-day buckets
async fn list_days(State(state): State<AppState>) -> Result<Json<Vec<CalendarDay>>, AppError> {
    let mut controller = state.controller();
    controller.reload().await?;

    Ok(Json(controller.days().to_vec()))
}

/// Request body for creating an event
#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub time: String,
    pub datetime: String,
}

/// POST /events - Create a new event
async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<Json<Event>, AppError> {
    let mut controller = state.controller();

    let created = controller
        .add_event(NewEvent::new(req.name, req.time, req.datetime))
        .await?;

    Ok(Json(created))
}

/// DELETE /events/:id - Delete an event
async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut controller = state.controller();
    controller.delete_event(&event_id).await?;

    Ok(Json(serde_json::json!({ "deleted": event_id })))
}
