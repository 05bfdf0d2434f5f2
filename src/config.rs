//! Application configuration loaded from environment variables.
//!
//! - `PEERDESK_API_BASE_URL` — base URL of the platform's admin REST API (required)
//! - `PEERDESK_API_TOKEN` — bearer token sent on every request (required, may
//!   be populated from the keychain, see [`crate::credentials`])
//! - `PEERDESK_CA_CERT` — optional PEM bundle; when set only these roots are trusted
//! - `PEERDESK_STATS_PATH` — path of the statistics endpoint (default `admin-stats`)
//! - `PEERDESK_LOG_FILE` — log destination (default `peerdesk.log`)

use std::path::PathBuf;

use url::Url;
use zeroize::Zeroizing;

/// Default path of the administrator statistics endpoint.
pub const DEFAULT_STATS_PATH: &str = "admin-stats";

/// Default log file; the terminal itself belongs to the TUI.
pub const DEFAULT_LOG_FILE: &str = "peerdesk.log";

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub log_file: PathBuf,
}

/// Settings for the admin REST API.
#[derive(Debug)]
pub struct ApiConfig {
    /// Base URL, always ending in `/` so relative joins keep its path.
    pub base_url: Url,
    pub token: Zeroizing<String>,
    pub ca_cert: Option<PathBuf>,
    pub stats_path: String,
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`PeerdeskError::Config`](crate::PeerdeskError::Config) if the
/// base URL or token is missing, or the base URL cannot be parsed.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let raw_url = non_empty_var("PEERDESK_API_BASE_URL").ok_or_else(|| {
        crate::PeerdeskError::Config("PEERDESK_API_BASE_URL is not set".to_string())
    })?;
    let base_url = parse_base_url(&raw_url)?;

    let token = non_empty_var("PEERDESK_API_TOKEN").ok_or_else(|| {
        crate::PeerdeskError::Config(
            "PEERDESK_API_TOKEN is not set and no token is stored in the keychain".to_string(),
        )
    })?;

    let stats_path = non_empty_var("PEERDESK_STATS_PATH")
        .map(|p| p.trim_start_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_STATS_PATH.to_string());

    let log_file = non_empty_var("PEERDESK_LOG_FILE")
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string())
        .into();

    Ok(AppConfig {
        api: ApiConfig {
            base_url,
            token: Zeroizing::new(token),
            ca_cert: non_empty_var("PEERDESK_CA_CERT").map(PathBuf::from),
            stats_path,
        },
        log_file,
    })
}

/// Parses the base URL, appending a trailing slash when missing.
///
/// `Url::join` replaces the last path segment unless the base ends in `/`,
/// so `https://host/api` would otherwise resolve `bids/pending` to
/// `https://host/bids/pending`.
pub fn parse_base_url(raw: &str) -> crate::Result<Url> {
    let mut url = Url::parse(raw)
        .map_err(|e| crate::PeerdeskError::Config(format!("invalid base url {raw:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(crate::PeerdeskError::Config(format!(
            "base url {raw:?} cannot carry a path"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
