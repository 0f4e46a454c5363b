use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Error};
use axum::http::HeaderValue;
use dotenv::dotenv;

const DEFAULT_FEEDBACK_URL: &str = "https://forms.office.com/Pages/ResponsePage.aspx?id=dykp7lh79E2BOFDQ3n0o2FXvAWPKJcJIkLt78GHgXp5UOUEwMldMOFdLNjNGVFJTTldUVTZTTE5WNC4u";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_address: String,
    pub frontend_origin: HeaderValue,
    pub users_file: PathBuf,
    pub sample_size: usize,
    pub session_ttl: Duration,
    pub feedback_url: String,
}

pub fn load_config() -> Result<Config, Error> {
    dotenv().ok();

    config_from(|key| env::var(key).ok())
}

/// Builds the config from any key lookup, falling back to defaults for
/// unset keys.
pub fn config_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, Error> {
    let server_address = lookup("SERVER_ADDRESS").unwrap_or_else(|| "0.0.0.0:8000".to_string());
    let frontend_url =
        lookup("FRONTEND_URL").unwrap_or_else(|| "http://localhost:5173".to_string());
    let users_file = lookup("USERS_FILE").unwrap_or_else(|| "users.json".to_string());
    let feedback_url = lookup("FEEDBACK_URL").unwrap_or_else(|| DEFAULT_FEEDBACK_URL.to_string());

    let frontend_origin = frontend_url
        .parse::<HeaderValue>()
        .with_context(|| format!("FRONTEND_URL is not a valid origin: {frontend_url}"))?;

    let sample_size = match lookup("SAMPLE_SIZE") {
        Some(value) => value
            .parse::<usize>()
            .with_context(|| format!("SAMPLE_SIZE must be a positive integer, got {value:?}"))?,
        None => 1000,
    };
    if sample_size == 0 {
        bail!("SAMPLE_SIZE must be a positive integer, got 0");
    }

    let session_ttl_secs = match lookup("SESSION_TTL_SECS") {
        Some(value) => value
            .parse::<u64>()
            .with_context(|| format!("SESSION_TTL_SECS must be a number of seconds, got {value:?}"))?,
        None => 8 * 60 * 60,
    };

    Ok(Config {
        server_address,
        frontend_origin,
        users_file: PathBuf::from(users_file),
        sample_size,
        session_ttl: Duration::from_secs(session_ttl_secs),
        feedback_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(lookup_in(&[])).unwrap();

        assert_eq!(config.server_address, "0.0.0.0:8000");
        assert_eq!(config.frontend_origin, "http://localhost:5173");
        assert_eq!(config.users_file, PathBuf::from("users.json"));
        assert_eq!(config.sample_size, 1000);
        assert_eq!(config.session_ttl, Duration::from_secs(28_800));
        assert_eq!(config.feedback_url, DEFAULT_FEEDBACK_URL);
    }

    #[test]
    fn values_are_read_from_lookup() {
        let config = config_from(lookup_in(&[
            ("SERVER_ADDRESS", "127.0.0.1:9000"),
            ("USERS_FILE", "/etc/dashboard/users.json"),
            ("SAMPLE_SIZE", "250"),
            ("SESSION_TTL_SECS", "60"),
        ]))
        .unwrap();

        assert_eq!(config.server_address, "127.0.0.1:9000");
        assert_eq!(config.users_file, PathBuf::from("/etc/dashboard/users.json"));
        assert_eq!(config.sample_size, 250);
        assert_eq!(config.session_ttl, Duration::from_secs(60));
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        assert!(config_from(lookup_in(&[("SAMPLE_SIZE", "0")])).is_err());
        assert!(config_from(lookup_in(&[("SAMPLE_SIZE", "many")])).is_err());
        assert!(config_from(lookup_in(&[("SESSION_TTL_SECS", "-1")])).is_err());
    }
}
