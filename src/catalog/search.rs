use reqwest::Client;

use crate::{
    management::RegionManager,
    types::{SearchResponse, Track},
    utils, warning,
};

/// Searches the catalog by keyword.
///
/// Issues the catalog's keyword search and maps the hits into display-ready
/// [`Track`] values. Search results carry rough metadata only; callers that
/// need authoritative titles, artists or cover art follow up with a batch
/// detail lookup ([`crate::catalog::song::get_details`]).
///
/// # Arguments
///
/// * `keyword` - Free-form search text (title, artist, or both)
/// * `limit` - Maximum number of hits to request
///
/// # Returns
///
/// The matching tracks, or an empty list on any transport or decode
/// failure. This function never fails the calling command; a caller that
/// ends up with no candidates from any source owns the "not found" message.
///
/// # Example
///
/// ```
/// let tracks = search_songs("勇气", 5).await;
/// for t in &tracks {
///     println!("{} - {}", t.artist, t.title);
/// }
/// ```
pub async fn search_songs(keyword: &str, limit: usize) -> Vec<Track> {
    match try_search(keyword, limit).await {
        Ok(tracks) => tracks,
        Err(e) => {
            warning!("Catalog search failed for '{}': {}", keyword, e);
            Vec::new()
        }
    }
}

async fn try_search(keyword: &str, limit: usize) -> Result<Vec<Track>, reqwest::Error> {
    let api_url = format!(
        "{base}/search",
        base = RegionManager::resolve_base_url().await
    );

    let client = Client::new();
    let response = client
        .get(&api_url)
        .query(&[("keywords", keyword), ("limit", &limit.to_string())])
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<SearchResponse>().await?;

    let songs = json.result.map(|r| r.songs).unwrap_or_default();
    let tracks = songs
        .into_iter()
        .map(|song| Track {
            id: song.id,
            title: song.name,
            artist: utils::artists_label(&song.artists),
            duration: utils::format_duration(song.duration),
            cover_url: None,
        })
        .collect();

    Ok(tracks)
}
