//! Month grid endpoint

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use moncal_core::grid::{GridCell, MonthView, month_grid};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/grid", get(get_grid))
}

#[derive(Deserialize)]
pub struct GridQuery {
    /// Month to display (YYYY-MM); defaults to the current month
    pub month: Option<String>,
    /// Date to mark as selected (YYYY-MM-DD)
    pub selected: Option<String>,
}

/// GET /grid?month=YYYY-MM&selected=YYYY-MM-DD - Month grid cells
async fn get_grid(
    State(state): State<AppState>,
    Query(query): Query<GridQuery>,
) -> Result<Json<Vec<GridCell>>, AppError> {
    let today = Local::now().date_naive();

    let view = match &query.month {
        Some(s) => MonthView::new(parse_month(s)?),
        None => MonthView::new(today),
    };

    let selected = query
        .selected
        .as_deref()
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|_| anyhow::anyhow!("Invalid selected date '{}'. Expected YYYY-MM-DD", s))
        })
        .transpose()?;

    let mut controller = state.controller();
    controller.reload().await?;

    Ok(Json(month_grid(&view, today, selected, controller.days())))
}

fn parse_month(s: &str) -> Result<NaiveDate, anyhow::Error> {
    NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid month '{}'. Expected YYYY-MM", s))
}
