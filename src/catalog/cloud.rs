use std::path::Path;

use reqwest::{
    Client,
    multipart::{Form, Part},
};

use crate::{
    catalog::song,
    config,
    management::RegionManager,
    types::{CLOUD_DURATION, CloudItem, CloudListResponse, CloudMatchResponse, CloudUploadResponse, Track},
    utils, warning,
};

const PAGE_SIZE: u64 = 200;

/// Fetches the entire personal cloud library, page by page.
///
/// Returns every stored track with the `"cloud"` duration marker, or an
/// empty list when no library credential is configured. A page failure ends
/// the fetch with whatever was collected so far; the snapshot is a cache,
/// not a source of truth.
pub async fn fetch_library() -> Vec<Track> {
    let Some(cookie) = config::cloud_cookie() else {
        warning!("CLOUD_COOKIE not configured, personal library unavailable");
        return Vec::new();
    };

    let mut tracks: Vec<Track> = Vec::new();
    let mut offset: u64 = 0;

    loop {
        let page = match try_fetch_page(&cookie, PAGE_SIZE, offset).await {
            Ok(page) => page,
            Err(e) => {
                warning!("Cloud library fetch failed at offset {}: {}", offset, e);
                break;
            }
        };

        let fetched = page.data.len() as u64;
        tracks.extend(page.data.into_iter().map(cloud_track));

        if !page.has_more || fetched == 0 {
            break;
        }
        offset += fetched;
    }

    tracks
}

async fn try_fetch_page(
    cookie: &str,
    limit: u64,
    offset: u64,
) -> Result<CloudListResponse, reqwest::Error> {
    let api_url = format!(
        "{base}/user/cloud?limit={limit}&offset={offset}",
        base = RegionManager::resolve_base_url().await,
        limit = limit,
        offset = offset
    );

    let client = Client::new();
    let response = client
        .get(&api_url)
        .header("Cookie", cookie)
        .send()
        .await?
        .error_for_status()?;

    response.json::<CloudListResponse>().await
}

fn cloud_track(item: CloudItem) -> Track {
    match item.simple_song {
        Some(ref simple) if !simple.name.is_empty() => Track {
            id: simple.id,
            title: simple.name.clone(),
            artist: if simple.artists.is_empty() {
                fallback_artist(&item.artist)
            } else {
                utils::artists_label(&simple.artists)
            },
            duration: CLOUD_DURATION.to_string(),
            cover_url: song::cover_from(simple),
        },
        _ => Track {
            id: item.song_id,
            title: item.song_name,
            artist: fallback_artist(&item.artist),
            duration: CLOUD_DURATION.to_string(),
            cover_url: None,
        },
    }
}

fn fallback_artist(artist: &str) -> String {
    if artist.is_empty() {
        "Unknown".to_string()
    } else {
        artist.to_string()
    }
}

/// Uploads an audio file into the personal cloud library.
///
/// # Returns
///
/// On success, the library-assigned song id when the response carries one
/// (`Ok(None)` means the file is stored but no id came back, so the
/// follow-up match call is skipped). Errors are returned to the caller,
/// which wraps this function in the shared retry primitive.
pub async fn upload_song(path: &Path) -> Result<Option<u64>, String> {
    let Some(cookie) = config::cloud_cookie() else {
        return Err("CLOUD_COOKIE not configured, cannot upload".to_string());
    };

    let bytes = async_fs::read(path).await.map_err(|e| e.to_string())?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.mp3")
        .to_string();

    let api_url = format!(
        "{base}/cloud",
        base = RegionManager::resolve_base_url().await
    );

    let form = Form::new().part("songFile", Part::bytes(bytes).file_name(file_name));

    let client = Client::new();
    let response = client
        .post(&api_url)
        .header("Cookie", cookie)
        .multipart(form)
        .send()
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?;

    let json = response
        .json::<CloudUploadResponse>()
        .await
        .map_err(|e| e.to_string())?;

    if json.code != 200 {
        return Err(format!("upload rejected with code {}", json.code));
    }

    Ok(json
        .private_cloud
        .and_then(|pc| pc.simple_song)
        .map(|song| song.id))
}

/// Links a freshly uploaded personal copy to its catalog counterpart.
///
/// Best-effort from the caller's point of view: the file is already safely
/// stored when this runs, so a failure here is logged, never retried.
pub async fn match_song(uid: u64, sid: u64, asid: u64) -> Result<(), String> {
    let Some(cookie) = config::cloud_cookie() else {
        return Err("CLOUD_COOKIE not configured".to_string());
    };

    let api_url = format!(
        "{base}/cloud/match?uid={uid}&sid={sid}&asid={asid}",
        base = RegionManager::resolve_base_url().await,
        uid = uid,
        sid = sid,
        asid = asid
    );

    let client = Client::new();
    let response = client
        .get(&api_url)
        .header("Cookie", cookie)
        .send()
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?;

    let json = response
        .json::<CloudMatchResponse>()
        .await
        .map_err(|e| e.to_string())?;

    if json.code != 200 {
        return Err(format!("match rejected with code {}", json.code));
    }

    Ok(())
}
