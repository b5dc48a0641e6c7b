//! Event endpoints

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use calfeed_core::EventRecord;
use calfeed_core::select::{MonthGroup, Selection, group_by_month, next_upcoming, on_date, parse_day, upcoming};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events))
        .route("/events/months", get(list_months))
        .route("/events/next", get(next_event))
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Query parameters for filtering events
#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    pub month: Option<String>,
    pub year: Option<i32>,
    pub date: Option<String>,
    #[serde(default)]
    pub upcoming: bool,
}

/// GET /events - Events from the feed, optionally filtered
async fn list_events(
    State(state): State<AppState>,
    query: Result<Query<EventsQuery>, QueryRejection>,
) -> Result<Json<Vec<EventRecord>>, AppError> {
    let Query(query) = query?;
    let selection = Selection::from_args(
        query.month.as_deref(),
        query.year,
        query.date.as_deref(),
        query.upcoming,
        today(),
    )?;

    let events = state.load_events().await?;
    Ok(Json(selection.apply(&events)))
}

/// GET /events/months - Upcoming events grouped by month
async fn list_months(State(state): State<AppState>) -> Result<Json<Vec<MonthGroup>>, AppError> {
    let events = state.load_events().await?;
    Ok(Json(group_by_month(&upcoming(&events, today()))))
}

#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub date: Option<String>,
}

/// GET /events/next - The event on `date`, or the next upcoming one
async fn next_event(
    State(state): State<AppState>,
    query: Result<Query<NextQuery>, QueryRejection>,
) -> Result<Json<EventRecord>, AppError> {
    let Query(query) = query?;
    let date = query.date.as_deref().map(parse_day).transpose()?;

    let events = state.load_events().await?;
    let event = match date {
        Some(date) => on_date(&events, date),
        None => next_upcoming(&events, today()),
    };

    event
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found("Event not found"))
}
