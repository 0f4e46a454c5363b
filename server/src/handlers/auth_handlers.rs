use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::db::users::authenticate;
use crate::error::AppError;
use crate::handlers::current_session::{expired_session_cookie, session_cookie, MaybeSession};
use crate::models::{Role, Session, UiState};
use crate::services::generator::generate_synthetic_events;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct LoginResponse {
    pub username: String,
    pub role: Role,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

pub async fn login(
    State(state): State<AppState>,
    MaybeSession(previous): MaybeSession,
    Json(form): Json<LoginForm>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(username), Some(password)) = (non_empty(form.username), non_empty(form.password))
    else {
        return Err(AppError::MissingCredentials);
    };

    let Some(role) = authenticate(&state.config.users_file, &username, &password).await? else {
        warn!(username = %username, "rejected login");
        return Err(AppError::InvalidCredentials);
    };

    if let Some(previous) = previous {
        state.sessions.remove(&previous.token);
        info!(username = %previous.session.username, "replaced previous session");
    }

    let events = generate_synthetic_events(state.config.sample_size);
    let session = Session {
        username: username.clone(),
        role,
    };
    let token = state.sessions.create(session, events);
    info!(
        username = %username,
        role = %role,
        active_sessions = state.sessions.len(),
        "logged in"
    );

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&token))]),
        Json(LoginResponse { username, role }),
    ))
}

pub async fn logout(
    State(state): State<AppState>,
    MaybeSession(current): MaybeSession,
) -> impl IntoResponse {
    if let Some(current) = current {
        state.sessions.remove(&current.token);
        info!(username = %current.session.username, "logged out");
    }

    (
        AppendHeaders([(SET_COOKIE, expired_session_cookie())]),
        Json(UiState::LoggedOut),
    )
}

pub async fn get_session(MaybeSession(current): MaybeSession) -> Json<UiState> {
    Json(UiState::from(current.as_ref().map(|current| &current.session)))
}
