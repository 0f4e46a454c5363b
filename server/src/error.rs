use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::db::users::CredentialStoreError;
use crate::services::views::ViewError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Username and password are required.")]
    MissingCredentials,

    #[error("Invalid credentials. Try again.")]
    InvalidCredentials,

    #[error("Not logged in.")]
    Unauthorized,

    #[error(transparent)]
    View(#[from] ViewError),

    #[error(transparent)]
    CredentialStore(#[from] CredentialStoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingCredentials => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::View(ViewError::Forbidden { .. }) => StatusCode::FORBIDDEN,
            AppError::CredentialStore(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (status, self.to_string()).into_response()
    }
}
