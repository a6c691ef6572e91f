use std::path::PathBuf;

use crate::{management::CacheError, types::Track, utils};

/// Per-conversation cache of the most recent merged search result.
///
/// A later "play item N" command resolves against this list, so the stored
/// order must match what was displayed. Sessions are replaced wholesale on
/// every new search and never expire; two near-simultaneous searches in the
/// same conversation race and the later write wins.
pub struct SessionManager {
    conversation: String,
    tracks: Vec<Track>,
}

impl SessionManager {
    pub fn new(conversation: &str, tracks: Vec<Track>) -> Self {
        Self {
            conversation: conversation.to_string(),
            tracks,
        }
    }

    pub async fn load(conversation: &str) -> Result<Self, CacheError> {
        let path = Self::session_path(conversation);
        let content = async_fs::read_to_string(&path).await?;
        let tracks: Vec<Track> = serde_json::from_str(&content)?;
        Ok(Self {
            conversation: conversation.to_string(),
            tracks,
        })
    }

    pub async fn persist(&self) -> Result<(), CacheError> {
        let path = Self::session_path(&self.conversation);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.tracks)?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    /// Returns the track at the given 1-based display position.
    pub fn resolve(&self, ordinal: usize) -> Option<&Track> {
        if ordinal == 0 {
            return None;
        }
        self.tracks.get(ordinal - 1)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    fn session_path(conversation: &str) -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(format!(
            "songferry/sessions/{conversation}.json",
            conversation = utils::sanitize_filename(conversation)
        ));
        path
    }
}
