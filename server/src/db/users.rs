use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::models::Role;

/// One entry of the credential file. Passwords are kept and compared in
/// plaintext; swap in salted-hash verification before any real deployment.
#[derive(Deserialize, Debug, Clone)]
pub struct UserRecord {
    pub password: String,
    pub role: Role,
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialStoreError {
    #[error("failed to read credential store {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed credential store {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub async fn load_users(path: &Path) -> Result<HashMap<String, UserRecord>, CredentialStoreError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CredentialStoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_str(&contents).map_err(|source| CredentialStoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads the credential file afresh and returns the user's role when the
/// password matches. Unknown users and wrong passwords both yield `None`.
pub async fn authenticate(
    path: &Path,
    username: &str,
    password: &str,
) -> Result<Option<Role>, CredentialStoreError> {
    let users = load_users(path).await?;

    Ok(users
        .get(username)
        .filter(|user| user.password == password)
        .map(|user| user.role))
}
