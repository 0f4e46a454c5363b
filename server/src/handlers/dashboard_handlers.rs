use axum::{
    extract::{Path, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::models::Role;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");

const SVG: &str = "image/svg+xml";

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(INDEX_HTML.replace("{{FEEDBACK_URL}}", &state.config.feedback_url))
}

/// Header logo shown next to the role badge.
pub fn logo_for(role: Role) -> &'static str {
    match role {
        Role::Admin => include_str!("../../static/logo_admin.svg"),
        Role::User => include_str!("../../static/logo_user.svg"),
    }
}

pub async fn asset(Path(name): Path<String>) -> Response {
    let logo = match name.as_str() {
        "logo_admin.svg" => logo_for(Role::Admin),
        "logo_user.svg" => logo_for(Role::User),
        _ => return StatusCode::NOT_FOUND.into_response(),
    };

    ([(CONTENT_TYPE, SVG)], logo).into_response()
}

pub async fn health() -> &'static str {
    "ok"
}
