//! Configuration management for the cloud music courier.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. It provides a centralized way to
//! manage application configuration including catalog endpoints, session
//! credentials, quality tier, result-list sizing and download locations.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Compiled application defaults
//!
//! Every value is fixed for the process lifetime with one exception: the
//! catalog account id, which is persisted by a successful playback-scoped
//! login probe and read back by the cloud match call.

use dotenv;
use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

/// Catalog API deployment answering from outside the mainland network.
pub const API_URL_OVERSEAS: &str = "https://netease-cloud-music-api-gamma-five.vercel.app";

/// Catalog API deployment answering from inside the mainland network.
pub const API_URL_DOMESTIC: &str = "https://163api.qijieya.cn";

/// Public unauthenticated resolver used when direct resolution is denied.
pub const FALLBACK_API_URL_DEFAULT: &str = "https://api.paugram.com/netease";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AccountFile {
    uid: u64,
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `songferry/.env`. This allows users to store
/// configuration securely without hardcoding sensitive values.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/songferry/.env`
/// - macOS: `~/Library/Application Support/songferry/.env`
/// - Windows: `%LOCALAPPDATA%/songferry/.env`
///
/// # Returns
///
/// Returns `Ok(())` whether or not a `.env` file exists (all settings have
/// defaults), or an error string if the parent directory cannot be created.
///
/// # Example
///
/// ```
/// use songferry::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("songferry/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    // Unlike credentials-required tools, every songferry setting has a
    // default, so a missing .env is not an error.
    let _ = dotenv::from_path(path);
    Ok(())
}

/// Returns the operator-configured catalog API base URL, if any.
///
/// Retrieves the `CATALOG_API_URL` environment variable. When set, this
/// self-hosted URL overrides the region-based endpoint selection entirely.
///
/// # Example
///
/// ```
/// if let Some(url) = config::catalog_api_url() {
///     // region logic is skipped
/// }
/// ```
pub fn catalog_api_url() -> Option<String> {
    env::var("CATALOG_API_URL").ok().filter(|v| !v.is_empty())
}

/// Returns the playback-scoped session credential, if configured.
///
/// Retrieves the `CATALOG_COOKIE` environment variable, a cookie string for
/// the account used to resolve direct playback URLs. Absence of the value
/// downgrades deliveries to the public fallback resolver; it is never an
/// error.
pub fn catalog_cookie() -> Option<String> {
    env::var("CATALOG_COOKIE").ok().filter(|v| !v.is_empty())
}

/// Returns the library-scoped session credential, if configured.
///
/// Retrieves the `CLOUD_COOKIE` environment variable, a cookie string for
/// the account owning the personal cloud library. Used for library listing,
/// uploads and the upload match call, and for resolving URLs of
/// library-origin tracks.
pub fn cloud_cookie() -> Option<String> {
    env::var("CLOUD_COOKIE").ok().filter(|v| !v.is_empty())
}

/// Returns the requested stream quality tier.
///
/// Retrieves the `CATALOG_LEVEL` environment variable. Known tiers are
/// `standard`, `higher`, `exhigh`, `lossless`, `hires`, `jyeffect`, `sky`
/// and `jymaster`; the catalog silently serves the best tier the account is
/// entitled to at or below the requested one.
///
/// # Default
///
/// `exhigh`
pub fn catalog_level() -> String {
    env::var("CATALOG_LEVEL").unwrap_or_else(|_| "exhigh".to_string())
}

/// Returns the maximum number of entries in a merged search result list.
///
/// Retrieves the `MAX_LIST_SIZE` environment variable. Personal-library
/// matches and catalog results together never exceed this count.
///
/// # Default
///
/// `10`
pub fn max_list_size() -> usize {
    env::var("MAX_LIST_SIZE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10)
}

/// Returns whether the personal cloud library participates in searches.
///
/// Retrieves the `CLOUD_ENABLED` environment variable. When disabled,
/// searches go to the catalog only and library-scoped commands refuse to
/// run.
///
/// # Default
///
/// `true`
pub fn cloud_enabled() -> bool {
    env::var("CLOUD_ENABLED")
        .map(|v| v != "false" && v != "0")
        .unwrap_or(true)
}

/// Returns whether the public fallback resolver may be consulted.
///
/// Retrieves the `FALLBACK_ENABLED` environment variable. When disabled, a
/// denied or failed direct resolution fails the delivery instead of
/// degrading to the low-fidelity public source.
///
/// # Default
///
/// `true`
pub fn fallback_enabled() -> bool {
    env::var("FALLBACK_ENABLED")
        .map(|v| v != "false" && v != "0")
        .unwrap_or(true)
}

/// Returns the base URL of the public fallback resolver.
///
/// Retrieves the `FALLBACK_API_URL` environment variable.
///
/// # Default
///
/// [`FALLBACK_API_URL_DEFAULT`]
pub fn fallback_api_url() -> String {
    env::var("FALLBACK_API_URL").unwrap_or_else(|_| FALLBACK_API_URL_DEFAULT.to_string())
}

/// Returns the base directory for downloaded audio files.
///
/// Retrieves the `DOWNLOAD_DIR` environment variable. Each requester gets a
/// subdirectory underneath this path.
///
/// # Default
///
/// `songferry/downloads` inside the local data directory.
pub fn download_dir() -> PathBuf {
    match env::var("DOWNLOAD_DIR") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push("songferry/downloads");
            path
        }
    }
}

/// Returns the seconds to wait for an externally produced file to stabilize.
///
/// Retrieves the `FILE_WAIT_TIMEOUT` environment variable, consumed by the
/// file-readiness watcher before uploads.
///
/// # Default
///
/// `120`
pub fn file_wait_timeout() -> u64 {
    env::var("FILE_WAIT_TIMEOUT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(120)
}

/// Persists the catalog account id resolved by a playback-scoped login probe.
///
/// The id is written to `songferry/cache/account.json` and read back by the
/// cloud match call after uploads. Only the playback credential writes this
/// file; library-scoped probes never do.
pub async fn persist_account_uid(uid: u64) -> Result<(), String> {
    let path = account_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    let json =
        serde_json::to_string_pretty(&AccountFile { uid }).map_err(|e| e.to_string())?;
    async_fs::write(path, json).await.map_err(|e| e.to_string())
}

/// Returns the persisted catalog account id, if a probe has stored one.
pub async fn account_uid() -> Option<u64> {
    let content = async_fs::read_to_string(account_path()).await.ok()?;
    let account: AccountFile = serde_json::from_str(&content).ok()?;
    Some(account.uid)
}

fn account_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("songferry/cache/account.json");
    path
}
