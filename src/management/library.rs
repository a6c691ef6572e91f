use std::path::PathBuf;

use chrono::Utc;

use crate::{
    catalog,
    management::CacheError,
    types::{LibrarySnapshot, Track},
    utils, warning,
};

/// Session-lived snapshot of the user's personal cloud library.
///
/// The snapshot is rebuilt fully by [`LibraryManager::refresh`] (first use or
/// explicit refresh) and invalidated wholesale by [`LibraryManager::clear`];
/// it is never diffed incrementally against the remote source.
pub struct LibraryManager {
    snapshot: LibrarySnapshot,
}

impl LibraryManager {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            snapshot: LibrarySnapshot {
                fetched_at: Utc::now().timestamp(),
                tracks,
            },
        }
    }

    pub async fn load() -> Result<Self, CacheError> {
        let path = Self::cache_path();
        let content = async_fs::read_to_string(&path).await?;
        let snapshot: LibrarySnapshot = serde_json::from_str(&content)?;
        Ok(Self { snapshot })
    }

    pub async fn persist(&self) -> Result<(), CacheError> {
        let path = Self::cache_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.snapshot)?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    /// Loads the cached snapshot, fetching from the remote library when the
    /// cache is missing or empty.
    pub async fn load_or_refresh() -> Self {
        match Self::load().await {
            Ok(manager) if !manager.snapshot.tracks.is_empty() => manager,
            _ => Self::refresh().await,
        }
    }

    /// Rebuilds the snapshot from the remote cloud library and persists it.
    pub async fn refresh() -> Self {
        let tracks = catalog::cloud::fetch_library().await;
        let manager = Self::new(tracks);
        if let Err(e) = manager.persist().await {
            warning!("Cannot persist library snapshot: {:?}", e);
        }
        manager
    }

    /// Drops the persisted snapshot; the next access re-fetches in full.
    pub async fn clear() -> Result<(), CacheError> {
        let path = Self::cache_path();
        async_fs::remove_file(path).await?;
        Ok(())
    }

    /// Returns the library tracks matching the keyword on title or artist.
    pub fn filter(&self, keyword: &str) -> Vec<Track> {
        self.snapshot
            .tracks
            .iter()
            .filter(|track| utils::matches_keyword(track, keyword))
            .cloned()
            .collect()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.snapshot.tracks
    }

    pub fn count(&self) -> usize {
        self.snapshot.tracks.len()
    }

    pub fn fetched_at(&self) -> i64 {
        self.snapshot.fetched_at
    }

    fn cache_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("songferry/cache/cloud-library.json");
        path
    }
}
