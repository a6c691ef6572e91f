use std::collections::HashMap;

use reqwest::Client;

use crate::{
    management::RegionManager,
    types::{DetailResponse, DetailSong, SongUrlData, SongUrlResponse, WikiResponse},
    utils, warning,
};

/// Image id of the service's default placeholder cover. Detail payloads for
/// tracks without real art point at this image; it is mapped to the
/// "no cover" marker instead of being shown as a generic gray square.
pub const DEFAULT_COVER_ID: &str = "109951165566379710";

/// Retrieves authoritative metadata for a batch of songs in one request.
///
/// Fetches title, artist and cover information for every id at once, which
/// the search pipeline uses to correct entries coming from the rough search
/// payload and from the personal library.
///
/// # Arguments
///
/// * `ids` - Song ids collected from every source of the current merge
///
/// # Returns
///
/// A map from song id to its detail record. Ids unknown to the catalog are
/// simply absent. Transport or decode failure yields an empty map: detail
/// correction is an improvement pass, never a reason to fail a search.
///
/// # Example
///
/// ```
/// let details = get_details(&[347230, 347231]).await;
/// if let Some(d) = details.get(&347230) {
///     println!("{}", d.name);
/// }
/// ```
pub async fn get_details(ids: &[u64]) -> HashMap<u64, DetailSong> {
    if ids.is_empty() {
        return HashMap::new();
    }

    match try_get_details(ids).await {
        Ok(details) => details,
        Err(e) => {
            warning!("Song detail lookup failed: {}", e);
            HashMap::new()
        }
    }
}

async fn try_get_details(ids: &[u64]) -> Result<HashMap<u64, DetailSong>, reqwest::Error> {
    let id_list = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");

    let api_url = format!(
        "{base}/song/detail?ids={ids}",
        base = RegionManager::resolve_base_url().await,
        ids = id_list
    );

    let client = Client::new();
    let response = client.get(&api_url).send().await?.error_for_status()?;
    let json = response.json::<DetailResponse>().await?;

    Ok(json.songs.into_iter().map(|song| (song.id, song)).collect())
}

/// Maps a detail record's album art to the cover marker used by [`Track`].
///
/// Returns `None` both when the payload carries no art and when it carries
/// the known default placeholder image.
///
/// [`Track`]: crate::types::Track
pub fn cover_from(song: &DetailSong) -> Option<String> {
    song.album
        .as_ref()
        .and_then(|album| album.pic_url.clone())
        .filter(|url| !url.is_empty() && !url.contains(DEFAULT_COVER_ID))
}

/// Retrieves up to three descriptive wiki labels for a song.
///
/// The wiki payload is deeply nested and frequently shallower than
/// documented; extraction skips whatever is missing and returns however
/// many labels survive, possibly none.
pub async fn get_wiki_tags(id: u64) -> Vec<String> {
    match try_get_wiki(id).await {
        Ok(wiki) => utils::extract_wiki_tags(&wiki),
        Err(e) => {
            warning!("Wiki lookup failed for song {}: {}", id, e);
            Vec::new()
        }
    }
}

async fn try_get_wiki(id: u64) -> Result<WikiResponse, reqwest::Error> {
    let api_url = format!(
        "{base}/song/wiki/summary?id={id}",
        base = RegionManager::resolve_base_url().await,
        id = id
    );

    let client = Client::new();
    let response = client.get(&api_url).send().await?.error_for_status()?;
    response.json::<WikiResponse>().await
}

/// Resolves a direct playback URL at the requested quality tier.
///
/// Issues the credentialed URL resolution call. The catalog silently serves
/// the best tier the account is entitled to at or below the requested one;
/// the returned record carries the actual bitrate, size and tier.
///
/// # Arguments
///
/// * `id` - Song id to resolve
/// * `level` - Requested quality tier (see `config::catalog_level`)
/// * `cookie` - Session credential matching the track's origin
///
/// # Returns
///
/// `Some` only when the service returned a non-empty URL; `None` covers
/// transport failures, empty payloads and null URLs alike, and routes the
/// delivery to the fallback resolver.
pub async fn get_song_url(id: u64, level: &str, cookie: &str) -> Option<SongUrlData> {
    match try_get_song_url(id, level, cookie).await {
        Ok(json) => json
            .data
            .into_iter()
            .find(|d| d.id == id)
            .filter(|d| d.url.as_deref().is_some_and(|u| !u.is_empty())),
        Err(e) => {
            warning!("URL resolution failed for song {}: {}", id, e);
            None
        }
    }
}

async fn try_get_song_url(
    id: u64,
    level: &str,
    cookie: &str,
) -> Result<SongUrlResponse, reqwest::Error> {
    let api_url = format!(
        "{base}/song/url/v1?id={id}&level={level}",
        base = RegionManager::resolve_base_url().await,
        id = id,
        level = level
    );

    let client = Client::new();
    let response = client
        .get(&api_url)
        .header("Cookie", cookie)
        .send()
        .await?
        .error_for_status()?;

    response.json::<SongUrlResponse>().await
}
