use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("admin"),
            Role::User => f.write_str("user"),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub role: Role,
}

/// What the dashboard page should show.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum UiState {
    LoggedOut,
    LoggedIn { username: String, role: Role },
}

impl From<Option<&Session>> for UiState {
    fn from(session: Option<&Session>) -> Self {
        match session {
            Some(session) => UiState::LoggedIn {
                username: session.username.clone(),
                role: session.role,
            },
            None => UiState::LoggedOut,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ui_state_serializes_with_tag() {
        let logged_in = UiState::from(Some(&Session {
            username: "admin".into(),
            role: Role::Admin,
        }));
        assert_eq!(
            serde_json::to_value(&logged_in).unwrap(),
            serde_json::json!({ "state": "logged_in", "username": "admin", "role": "admin" })
        );
        assert_eq!(
            serde_json::to_value(UiState::from(None::<&Session>)).unwrap(),
            serde_json::json!({ "state": "logged_out" })
        );
    }
}
