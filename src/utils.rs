use std::{future::Future, path::Path, time::Duration};

use rand::Rng;
use tokio::time::sleep;

use crate::types::{ArtistRef, Track, TrackTableRow, WikiResponse};

pub fn artists_label(artists: &[ArtistRef]) -> String {
    if artists.is_empty() {
        return "Unknown".to_string();
    }
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    cleaned.trim().to_string()
}

pub fn parse_upload_filename(path: &Path) -> Option<(String, String)> {
    let stem = path.file_stem()?.to_str()?;
    let (artist, title) = stem.split_once(" - ")?;
    let artist = artist.trim();
    let title = title.trim();
    if artist.is_empty() || title.is_empty() {
        return None;
    }
    Some((artist.to_string(), title.to_string()))
}

pub fn format_duration(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

pub fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1}MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1}KB", bytes as f64 / 1024.0)
    } else {
        format!("{}B", bytes)
    }
}

pub fn quality_label(br: u64, level: Option<&str>) -> String {
    let mut label = if br > 0 {
        format!("{}kbps", br / 1000)
    } else {
        level.unwrap_or("unknown").to_string()
    };
    // the master tier ships as 192kHz/24bit files many players reject
    if level == Some("jymaster") {
        label.push_str(" (master tape, needs Hi-Res capable playback)");
    }
    label
}

pub fn matches_keyword(track: &Track, keyword: &str) -> bool {
    let keyword = keyword.to_lowercase();
    track.title.to_lowercase().contains(&keyword) || track.artist.to_lowercase().contains(&keyword)
}

pub fn merge_results(library: Vec<Track>, catalog: Vec<Track>, max: usize) -> Vec<Track> {
    let mut merged: Vec<Track> = library.into_iter().take(max).collect();
    let remaining = max.saturating_sub(merged.len());
    merged.extend(catalog.into_iter().take(remaining));
    merged
}

pub fn extract_wiki_tags(wiki: &WikiResponse) -> Vec<String> {
    let Some(data) = &wiki.data else {
        return Vec::new();
    };
    data.blocks
        .iter()
        .flat_map(|block| block.creatives.iter())
        .filter_map(|creative| {
            creative
                .ui_element
                .as_ref()
                .and_then(|ui| ui.main_title.as_ref())
                .and_then(|t| t.title.clone())
        })
        .filter(|title| !title.is_empty())
        .take(3)
        .collect()
}

pub fn track_table_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            pos: i + 1,
            title: t.title.clone(),
            artist: t.artist.clone(),
            duration: t.duration.clone(),
        })
        .collect()
}

pub async fn with_retry<T, E, F, Fut>(attempts: u32, base_delay_ms: u64, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0;
    let mut delay = base_delay_ms;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if attempt >= attempts {
                    return Err(e);
                }
                let jitter = rand::rng().random_range(0..=delay / 2);
                sleep(Duration::from_millis(delay + jitter)).await;
                delay *= 2;
            }
        }
    }
}
