use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::AppError;
use crate::handlers::current_session::CurrentSession;
use crate::models::TimeUnit;
use crate::services::generator::generate_synthetic_events;
use crate::services::locations::unique_locations;
use crate::services::views::{render_view, visible_views, View, ViewData, ViewRequest};
use crate::state::AppState;

/// Splits a comma separated query value, dropping blank entries.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn render(current: &CurrentSession, request: ViewRequest) -> Result<Json<ViewData>, AppError> {
    debug!(
        username = %current.session.username,
        view = ?request.view(),
        "rendering view"
    );
    let data = render_view(current.session.role, &current.events, &request)?;
    Ok(Json(data))
}

#[derive(Serialize)]
pub struct ViewEntry {
    pub id: View,
    pub label: &'static str,
}

pub async fn get_views(current: CurrentSession) -> Json<Vec<ViewEntry>> {
    let views = visible_views(current.session.role)
        .iter()
        .map(|view| ViewEntry {
            id: *view,
            label: view.label(),
        })
        .collect();

    Json(views)
}

pub async fn get_countries(current: CurrentSession) -> Json<Vec<&'static str>> {
    Json(unique_locations(&current.events))
}

#[derive(Serialize)]
pub struct DatasetInfo {
    pub events: usize,
}

pub async fn refresh_dataset(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Json<DatasetInfo>, AppError> {
    let events = generate_synthetic_events(state.config.sample_size);
    let size = events.len();
    if !state.sessions.replace_events(&current.token, events) {
        return Err(AppError::Unauthorized);
    }

    info!(username = %current.session.username, events = size, "regenerated dataset");
    Ok(Json(DatasetInfo { events: size }))
}

#[derive(Deserialize)]
pub struct GeoParams {
    continents: Option<String>,
}

pub async fn get_geo_distribution(
    current: CurrentSession,
    Query(params): Query<GeoParams>,
) -> Result<Json<ViewData>, AppError> {
    let continents = match params.continents {
        Some(continents) => split_list(&continents),
        None => vec!["Europe".to_string()],
    };

    render(&current, ViewRequest::Geo { continents })
}

#[derive(Deserialize)]
pub struct TimeParams {
    #[serde(default)]
    unit: TimeUnit,
}

pub async fn get_time_distribution(
    current: CurrentSession,
    Query(params): Query<TimeParams>,
) -> Result<Json<ViewData>, AppError> {
    render(&current, ViewRequest::Time { unit: params.unit })
}

#[derive(Deserialize)]
pub struct AgeParams {
    countries: Option<String>,
}

pub async fn get_age_distribution(
    current: CurrentSession,
    Query(params): Query<AgeParams>,
) -> Result<Json<ViewData>, AppError> {
    let countries = match params.countries {
        Some(countries) => split_list(&countries),
        None => unique_locations(&current.events)
            .first()
            .map(|country| vec![country.to_string()])
            .unwrap_or_default(),
    };

    render(&current, ViewRequest::Age { countries })
}

pub async fn get_summary(current: CurrentSession) -> Result<Json<ViewData>, AppError> {
    render(&current, ViewRequest::Summary)
}

pub async fn get_marketing(current: CurrentSession) -> Result<Json<ViewData>, AppError> {
    render(&current, ViewRequest::Marketing)
}

pub async fn get_anomalies(current: CurrentSession) -> Result<Json<ViewData>, AppError> {
    render(&current, ViewRequest::Anomalies)
}
