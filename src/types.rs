use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Duration label marking a personal-library-origin track.
pub const CLOUD_DURATION: &str = "cloud";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: u64,
    pub title: String,
    pub artist: String,
    pub duration: String,
    pub cover_url: Option<String>,
}

impl Track {
    pub fn is_cloud(&self) -> bool {
        self.duration == CLOUD_DURATION
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    Playback,
    Library,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub pos: usize,
    pub title: String,
    pub artist: String,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionFlag {
    pub is_overseas: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibrarySnapshot {
    pub fetched_at: i64,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone)]
pub struct SongCard {
    pub title: String,
    pub artist: String,
    pub cover_url: Option<String>,
    pub quality: String,
    pub size_bytes: u64,
    pub tags: Vec<String>,
    pub file: std::path::PathBuf,
}

// --- catalog search (`/search`) ---

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub result: Option<SearchResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub songs: Vec<SearchSong>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSong {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub duration: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

// --- song detail (`/song/detail`) ---

#[derive(Debug, Clone, Deserialize)]
pub struct DetailResponse {
    #[serde(default)]
    pub songs: Vec<DetailSong>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetailSong {
    pub id: u64,
    pub name: String,
    #[serde(rename = "ar", default)]
    pub artists: Vec<ArtistRef>,
    #[serde(rename = "al")]
    pub album: Option<AlbumRef>,
    #[serde(rename = "dt", default)]
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumRef {
    #[serde(rename = "picUrl")]
    pub pic_url: Option<String>,
}

// --- playback URL (`/song/url/v1`) ---

#[derive(Debug, Clone, Deserialize)]
pub struct SongUrlResponse {
    #[serde(default)]
    pub data: Vec<SongUrlData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SongUrlData {
    pub id: u64,
    pub url: Option<String>,
    #[serde(default)]
    pub br: u64,
    #[serde(default)]
    pub size: u64,
    pub level: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

// --- login status (`/login/status`) ---

#[derive(Debug, Clone, Deserialize)]
pub struct LoginStatusResponse {
    pub data: Option<LoginStatusData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginStatusData {
    pub profile: Option<Profile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub nickname: Option<String>,
}

// --- personal cloud library (`/user/cloud`, `/cloud`, `/cloud/match`) ---

#[derive(Debug, Clone, Deserialize)]
pub struct CloudListResponse {
    #[serde(default)]
    pub data: Vec<CloudItem>,
    #[serde(rename = "hasMore", default)]
    pub has_more: bool,
    pub count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloudItem {
    #[serde(rename = "songId")]
    pub song_id: u64,
    #[serde(rename = "songName", default)]
    pub song_name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(rename = "simpleSong")]
    pub simple_song: Option<DetailSong>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloudUploadResponse {
    pub code: i64,
    #[serde(rename = "privateCloud")]
    pub private_cloud: Option<PrivateCloud>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrivateCloud {
    #[serde(rename = "simpleSong")]
    pub simple_song: Option<DetailSong>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloudMatchResponse {
    pub code: i64,
}

// --- song wiki (`/song/wiki/summary`) ---

#[derive(Debug, Clone, Deserialize)]
pub struct WikiResponse {
    pub data: Option<WikiData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WikiData {
    #[serde(default)]
    pub blocks: Vec<WikiBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WikiBlock {
    #[serde(default)]
    pub creatives: Vec<WikiCreative>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WikiCreative {
    #[serde(rename = "uiElement")]
    pub ui_element: Option<WikiUiElement>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WikiUiElement {
    #[serde(rename = "mainTitle")]
    pub main_title: Option<WikiTitle>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WikiTitle {
    pub title: Option<String>,
}

// --- public fallback resolver ---

#[derive(Debug, Clone, Deserialize)]
pub struct FallbackResponse {
    #[serde(alias = "url")]
    pub music_url: Option<String>,
    pub quality: Option<String>,
    pub id: Option<u64>,
    pub pay: Option<String>,
}
