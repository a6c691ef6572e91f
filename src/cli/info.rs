use chrono::DateTime;

use crate::{
    catalog, config, info,
    management::{LibraryManager, RegionManager},
    types::CredentialKind,
};

pub async fn info(region: bool, credentials: bool, library: bool) {
    let all = !(region || credentials || library);

    if region || all {
        match config::catalog_api_url() {
            Some(url) => info!("Catalog API: {} (operator override)", url),
            None => {
                let overseas = match RegionManager::load().await {
                    Ok(manager) => manager.is_overseas(),
                    Err(_) => true,
                };
                info!(
                    "Region: {}",
                    if overseas { "overseas" } else { "domestic" }
                );
                info!("Catalog API: {}", RegionManager::resolve_base_url().await);
            }
        }
    }

    if credentials || all {
        let playback = catalog::status::check_login(CredentialKind::Playback).await;
        let library_cred = catalog::status::check_login(CredentialKind::Library).await;
        info!(
            "Playback credential: {}",
            if playback { "valid" } else { "missing or expired" }
        );
        info!(
            "Library credential: {}",
            if library_cred { "valid" } else { "missing or expired" }
        );
    }

    if library || all {
        if !config::cloud_enabled() {
            info!("Cloud library: disabled");
            return;
        }

        match LibraryManager::load().await {
            Ok(lib) => {
                let fetched = DateTime::from_timestamp(lib.fetched_at(), 0)
                    .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                info!(
                    "Cloud library snapshot: {} tracks (fetched {})",
                    lib.count(),
                    fetched
                );
            }
            Err(_) => info!("Cloud library snapshot: not fetched yet"),
        }
    }
}
