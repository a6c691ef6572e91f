use std::{path::PathBuf, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    catalog, config, delivery, info, management::LibraryManager, success, utils, warning,
};

pub async fn cloud_list() {
    if !config::cloud_enabled() {
        warning!("Personal cloud library is disabled");
        return;
    }

    let library = LibraryManager::load_or_refresh().await;
    if library.count() == 0 {
        info!("Cloud library is empty");
        return;
    }

    let table = Table::new(utils::track_table_rows(library.tracks()));
    println!("{}", table);
    info!("{} tracks in the cloud library", library.count());
}

pub async fn cloud_refresh() {
    if !config::cloud_enabled() {
        warning!("Personal cloud library is disabled");
        return;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching cloud library...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let library = LibraryManager::refresh().await;
    pb.finish_and_clear();

    success!("Cloud library refreshed, {} tracks", library.count());
}

pub async fn cloud_clear() {
    match LibraryManager::clear().await {
        Ok(()) => success!("Cloud library snapshot cleared, the next search re-fetches it"),
        Err(e) => warning!("Cannot clear the library snapshot: {:?}", e),
    }
}

pub async fn cloud_upload(path: PathBuf, match_id: Option<u64>) {
    if !config::cloud_enabled() {
        warning!("Personal cloud library is disabled");
        return;
    }

    // reject malformed names before any network call
    let Some((artist, title)) = utils::parse_upload_filename(&path) else {
        warning!(
            "Filename must follow 'artist - title.ext' so the upload can be tagged and matched"
        );
        return;
    };

    info!("Waiting for {} to finish writing...", path.display());
    if !delivery::watch::await_stable(&path, config::file_wait_timeout()).await {
        warning!(
            "File never stabilized within {}s, upload aborted: {}",
            config::file_wait_timeout(),
            path.display()
        );
        return;
    }

    // link the upload to its catalog counterpart when one can be found
    let linked = match match_id {
        Some(id) => Some(id),
        None => {
            let query = format!("{} {}", artist, title);
            catalog::search::search_songs(&query, 1)
                .await
                .first()
                .map(|t| t.id)
        }
    };

    match delivery::upload::upload_with_retry(&path, linked).await {
        Ok(()) => success!("Uploaded {} - {} to the cloud library", artist, title),
        Err(e) => warning!("{}", e),
    }
}
