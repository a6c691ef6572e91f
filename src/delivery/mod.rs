//! # Delivery Module
//!
//! This module turns a resolved track into an audio file in the requester's
//! hands. Each delivery is one strictly sequential pass through the stages
//!
//! ```text
//! RESOLVE_URL -> (entitled ? DIRECT : FALLBACK) -> ANNOUNCE
//!             -> DOWNLOAD -> DELIVER -> CLEANUP
//! ```
//!
//! with every stage returning a discriminated result instead of relying on
//! nested rejection propagation. No two stages of the same delivery ever
//! run concurrently, and nothing here is shared across deliveries: the
//! resolved source, quality label, file suffix and local path all live in a
//! per-attempt value.
//!
//! ## Source selection
//!
//! Direct resolution requires a live credential (probed fresh on every
//! attempt, see [`crate::catalog::status`]) matching the track's origin:
//! library-origin tracks always use the library credential, catalog tracks
//! the playback credential. A failed probe or a null URL routes to the
//! public fallback resolver, which yields lower-confidence audio but never
//! aborts the attempt by itself; an empty fallback URL surfaces as a clean
//! download failure logged with the attempted title.
//!
//! ## Channels
//!
//! The host delivery channel is abstracted behind [`Messenger`]. The
//! richest channel (structured music card) is tried first; any card
//! failure, including the recognized unsupported-format error some host
//! runtimes raise, falls back silently to a voice clip and then to raw file
//! transfer. Intermediate channel failures are never reported to the
//! requester, only a final exhaustion is. The downloaded file is removed
//! after delivery regardless of which channel succeeded.
//!
//! ## Submodules
//!
//! - [`watch`] - confirms an asynchronously produced file has stopped
//!   growing before it is consumed
//! - [`upload`] - transactional retry of cloud-library uploads plus the
//!   best-effort catalog match

pub mod upload;
pub mod watch;

use std::path::{Path, PathBuf};

use reqwest::Client;
use tokio::io::AsyncWriteExt;

use crate::{
    Res, catalog, config,
    types::{CredentialKind, SongCard, Track},
    utils, warning,
};

#[derive(Debug)]
pub enum ChannelError {
    /// The host runtime recognizes the payload kind but cannot render it.
    /// A recognized, expected error; the orchestrator falls through to the
    /// next channel without reporting anything.
    Unsupported,
    Failed(String),
}

#[derive(Debug)]
pub enum DeliveryError {
    /// Neither direct nor fallback resolution produced a usable URL.
    NoSource(String),
    Download(String),
    /// Every delivery channel was exhausted.
    Channel(String),
    Io(std::io::Error),
}

impl From<std::io::Error> for DeliveryError {
    fn from(err: std::io::Error) -> Self {
        DeliveryError::Io(err)
    }
}

/// Seam to the host delivery channel. The core only needs each method to
/// report success or failure; rendering is the host's business.
pub trait Messenger {
    async fn send_text(&self, text: &str) -> Result<(), ChannelError>;
    async fn send_card(&self, card: &SongCard) -> Result<(), ChannelError>;
    async fn send_voice(&self, path: &Path) -> Result<(), ChannelError>;
    async fn send_file(&self, path: &Path) -> Result<(), ChannelError>;
}

/// Where one delivery gets its audio from.
#[derive(Debug, Clone)]
pub enum ResolvedSource {
    Direct {
        url: String,
        quality: String,
        size: u64,
        kind: Option<String>,
    },
    Fallback {
        url: String,
        quality: String,
    },
}

impl ResolvedSource {
    pub fn url(&self) -> &str {
        match self {
            ResolvedSource::Direct { url, .. } => url,
            ResolvedSource::Fallback { url, .. } => url,
        }
    }

    pub fn quality(&self) -> &str {
        match self {
            ResolvedSource::Direct { quality, .. } => quality,
            ResolvedSource::Fallback { quality, .. } => quality,
        }
    }

    pub fn size_bytes(&self) -> u64 {
        match self {
            ResolvedSource::Direct { size, .. } => *size,
            ResolvedSource::Fallback { .. } => 0,
        }
    }
}

/// State scoped to a single delivery. The file suffix lives here, not in
/// process-wide state, so concurrent deliveries cannot cross-contaminate
/// each other's names.
pub struct DeliveryAttempt {
    pub track: Track,
    pub source: ResolvedSource,
    pub file_ext: String,
    pub local_path: Option<PathBuf>,
}

impl DeliveryAttempt {
    fn new(track: Track, source: ResolvedSource) -> Self {
        let file_ext = file_extension(&source);
        Self {
            track,
            source,
            file_ext,
            local_path: None,
        }
    }
}

/// Runs one full delivery for `track` on behalf of `requester`.
///
/// See the module documentation for the stage sequence. Failures are scoped
/// to this one attempt; the caller owns the user-visible failure message.
pub async fn deliver<M: Messenger>(
    track: &Track,
    requester: &str,
    messenger: &M,
) -> Result<(), DeliveryError> {
    let source = resolve_source(track).await;
    let mut attempt = DeliveryAttempt::new(track.clone(), source);

    let tags = announce(&attempt, messenger).await;

    download(&mut attempt, requester).await?;
    let local_path = attempt
        .local_path
        .clone()
        .ok_or_else(|| DeliveryError::Download("download left no file".to_string()))?;

    let card = SongCard {
        title: attempt.track.title.clone(),
        artist: attempt.track.artist.clone(),
        cover_url: attempt.track.cover_url.clone(),
        quality: attempt.source.quality().to_string(),
        size_bytes: attempt.source.size_bytes(),
        tags,
        file: local_path.clone(),
    };
    let sent = send_with_fallback(&card, messenger).await;

    // CLEANUP runs whether or not a channel succeeded
    if let Err(e) = async_fs::remove_file(&local_path).await {
        warning!("Cannot remove {}: {}", local_path.display(), e);
    }

    sent
}

/// RESOLVE_URL stage. Never fails: a dead end is represented as a fallback
/// source with an empty URL and surfaces at the download stage.
///
/// Exposed so hosts can pre-resolve a source (for example to show the
/// quality label before committing to a download).
pub async fn resolve_source(track: &Track) -> ResolvedSource {
    // library-origin is authoritative: a cloud track that also exists in
    // the catalog still resolves with the library credential
    let kind = if track.is_cloud() {
        CredentialKind::Library
    } else {
        CredentialKind::Playback
    };
    let cookie = match kind {
        CredentialKind::Playback => config::catalog_cookie(),
        CredentialKind::Library => config::cloud_cookie(),
    };

    if catalog::status::check_login(kind).await {
        if let Some(cookie) = cookie {
            if let Some(data) =
                catalog::song::get_song_url(track.id, &config::catalog_level(), &cookie).await
            {
                if let Some(url) = data.url.clone().filter(|u| !u.is_empty()) {
                    return ResolvedSource::Direct {
                        url,
                        quality: utils::quality_label(data.br, data.level.as_deref()),
                        size: data.size,
                        kind: data.kind,
                    };
                }
            }
        }
    }

    let fb = catalog::fallback::resolve(&track.artist, &track.title).await;
    ResolvedSource::Fallback {
        url: fb.url,
        quality: fb.quality,
    }
}

/// ANNOUNCE stage. One-shot metadata summary; best-effort, a channel
/// failure here never aborts the delivery. Returns the wiki tags so the
/// later card reuses them without a second lookup.
async fn announce<M: Messenger>(attempt: &DeliveryAttempt, messenger: &M) -> Vec<String> {
    let tags = catalog::song::get_wiki_tags(attempt.track.id).await;

    let mut summary = format!(
        "{} - {} [{}]",
        attempt.track.artist,
        attempt.track.title,
        attempt.source.quality()
    );
    if attempt.source.size_bytes() > 0 {
        summary.push_str(&format!(" {}", utils::format_size(attempt.source.size_bytes())));
    }
    if !tags.is_empty() {
        summary.push_str(&format!("\n{}", tags.join(" / ")));
    }

    if let Err(e) = messenger.send_text(&summary).await {
        warning!("Cannot announce delivery: {:?}", e);
    }

    tags
}

/// DOWNLOAD stage. Streams the resolved URL into the requester's directory;
/// on failure no partial file stays referenced by the attempt.
async fn download(attempt: &mut DeliveryAttempt, requester: &str) -> Result<(), DeliveryError> {
    let url = attempt.source.url().to_string();
    if url.is_empty() {
        warning!("No playable source found for {}", attempt.track.title);
        return Err(DeliveryError::NoSource(attempt.track.title.clone()));
    }

    let dir = config::download_dir().join(utils::sanitize_filename(requester));
    async_fs::create_dir_all(&dir).await?;

    let file_name = format!(
        "{stem}.{ext}",
        stem = utils::sanitize_filename(&format!(
            "{}-{}",
            attempt.track.artist, attempt.track.title
        )),
        ext = attempt.file_ext
    );
    let path = dir.join(file_name);

    match try_download(&url, &path).await {
        Ok(()) => {
            attempt.local_path = Some(path);
            Ok(())
        }
        Err(e) => {
            let _ = async_fs::remove_file(&path).await;
            warning!("Download failed for {}: {}", attempt.track.title, e);
            Err(DeliveryError::Download(e.to_string()))
        }
    }
}

async fn try_download(url: &str, path: &Path) -> Res<()> {
    let client = Client::new();
    let mut response = client.get(url).send().await?.error_for_status()?;

    let mut file = tokio::fs::File::create(path).await?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(())
}

/// DELIVER stage. Card first, then voice clip, then raw file. Intermediate
/// failures stay silent; only the caller reports a final exhaustion.
pub async fn send_with_fallback<M: Messenger>(
    card: &SongCard,
    messenger: &M,
) -> Result<(), DeliveryError> {
    if messenger.send_card(card).await.is_ok() {
        return Ok(());
    }

    if messenger.send_voice(&card.file).await.is_ok() {
        return Ok(());
    }

    messenger
        .send_file(&card.file)
        .await
        .map_err(|e| DeliveryError::Channel(format!("{:?}", e)))
}

fn file_extension(source: &ResolvedSource) -> String {
    if let ResolvedSource::Direct {
        kind: Some(kind), ..
    } = source
    {
        if !kind.is_empty() {
            return kind.to_lowercase();
        }
    }

    // fall back to whatever the URL path carries
    let path = source.url().split(['?', '#']).next().unwrap_or_default();
    match path.rsplit_once('.') {
        Some((_, ext))
            if !ext.is_empty() && ext.len() <= 4 && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            ext.to_lowercase()
        }
        _ => "mp3".to_string(),
    }
}
