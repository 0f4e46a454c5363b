use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::handlers::analytics_handlers::{
    get_age_distribution, get_anomalies, get_countries, get_geo_distribution, get_marketing,
    get_summary, get_time_distribution, get_views, refresh_dataset,
};
use crate::handlers::auth_handlers::{get_session, login, logout};
use crate::handlers::dashboard_handlers::{asset, health, index};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = create_cors_layer(&state.config);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/assets/:name", get(asset))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/session", get(get_session))
        .route("/api/views", get(get_views))
        .route("/api/countries", get(get_countries))
        .route("/api/dataset/refresh", post(refresh_dataset))
        .route("/api/charts/geo", get(get_geo_distribution))
        .route("/api/charts/time", get(get_time_distribution))
        .route("/api/charts/age", get(get_age_distribution))
        .route("/api/charts/summary", get(get_summary))
        .route("/api/charts/marketing", get(get_marketing))
        .route("/api/charts/anomalies", get(get_anomalies))
        .with_state(state)
        .layer(cors)
}

fn create_cors_layer(config: &Config) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(config.frontend_origin.clone())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}
