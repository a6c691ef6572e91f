use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    catalog, config, info,
    management::{LibraryManager, SessionManager},
    types::Track,
    utils, warning,
};

pub async fn search(conversation: &str, keyword: &str) {
    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Searching for '{}'...", keyword));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    // personal library first, then let the catalog fill the remaining slots
    let library_matches: Vec<Track> = if config::cloud_enabled() {
        LibraryManager::load_or_refresh().await.filter(keyword)
    } else {
        Vec::new()
    };

    let max = config::max_list_size();
    let remaining = max.saturating_sub(library_matches.len());
    let catalog_tracks = if remaining > 0 {
        catalog::search::search_songs(keyword, remaining).await
    } else {
        Vec::new()
    };

    if library_matches.is_empty() && catalog_tracks.is_empty() {
        pb.finish_and_clear();
        // nothing found anywhere: report and leave any previous session of
        // this conversation untouched
        warning!("No tracks found for '{}'", keyword);
        return;
    }

    let mut merged = utils::merge_results(library_matches, catalog_tracks, max);

    // one batch detail lookup corrects whatever the rough sources got wrong
    let ids: Vec<u64> = merged.iter().map(|t| t.id).collect();
    let details = catalog::song::get_details(&ids).await;
    for track in merged.iter_mut() {
        if let Some(detail) = details.get(&track.id) {
            if !detail.name.is_empty() {
                track.title = detail.name.clone();
            }
            if !detail.artists.is_empty() {
                track.artist = utils::artists_label(&detail.artists);
            }
            track.cover_url = catalog::song::cover_from(detail);
            if !track.is_cloud() && detail.duration_ms > 0 {
                track.duration = utils::format_duration(detail.duration_ms);
            }
        }
    }

    let session = SessionManager::new(conversation, merged.clone());
    if let Err(e) = session.persist().await {
        warning!("Cannot store search session: {:?}", e);
    }

    pb.finish_and_clear();

    let table = Table::new(utils::track_table_rows(&merged));
    println!("{}", table);
    info!(
        "Play an entry with: songferry play <n> --chat {}",
        conversation
    );
}
