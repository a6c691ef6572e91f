use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use songferry::delivery::{
    ChannelError, DeliveryError, Messenger, ResolvedSource, deliver, resolve_source,
    send_with_fallback,
};
use songferry::types::{SongCard, Track};

fn create_test_track(id: u64, title: &str, artist: &str) -> Track {
    Track {
        id,
        title: title.to_string(),
        artist: artist.to_string(),
        duration: "03:45".to_string(),
        cover_url: None,
    }
}

fn create_test_card(file: PathBuf) -> SongCard {
    SongCard {
        title: "Song".to_string(),
        artist: "Artist".to_string(),
        cover_url: None,
        quality: "320kbps".to_string(),
        size_bytes: 1024,
        tags: Vec::new(),
        file,
    }
}

// Messenger double recording the channel order and failing on demand
struct RecordingMessenger {
    calls: Mutex<Vec<&'static str>>,
    card_error: Option<fn() -> ChannelError>,
    voice_error: Option<fn() -> ChannelError>,
    file_error: Option<fn() -> ChannelError>,
}

impl RecordingMessenger {
    fn new(
        card_error: Option<fn() -> ChannelError>,
        voice_error: Option<fn() -> ChannelError>,
        file_error: Option<fn() -> ChannelError>,
    ) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            card_error,
            voice_error,
            file_error,
        }
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str, error: &Option<fn() -> ChannelError>) -> Result<(), ChannelError> {
        self.calls.lock().unwrap().push(call);
        match error {
            Some(make) => Err(make()),
            None => Ok(()),
        }
    }
}

impl Messenger for RecordingMessenger {
    async fn send_text(&self, _text: &str) -> Result<(), ChannelError> {
        self.record("text", &None)
    }

    async fn send_card(&self, _card: &SongCard) -> Result<(), ChannelError> {
        self.record("card", &self.card_error)
    }

    async fn send_voice(&self, _path: &Path) -> Result<(), ChannelError> {
        self.record("voice", &self.voice_error)
    }

    async fn send_file(&self, _path: &Path) -> Result<(), ChannelError> {
        self.record("file", &self.file_error)
    }
}

#[tokio::test]
async fn test_card_success_uses_no_fallback() {
    let messenger = RecordingMessenger::new(None, None, None);
    let card = create_test_card(PathBuf::from("/tmp/none"));

    let result = send_with_fallback(&card, &messenger).await;

    assert!(result.is_ok());
    assert_eq!(messenger.calls(), vec!["card"]);
}

#[tokio::test]
async fn test_unsupported_card_falls_back_to_raw_transfer() {
    // the host rejects cards and voice clips; raw file transfer succeeds
    let messenger = RecordingMessenger::new(
        Some(|| ChannelError::Unsupported),
        Some(|| ChannelError::Unsupported),
        None,
    );
    let card = create_test_card(PathBuf::from("/tmp/none"));

    let result = send_with_fallback(&card, &messenger).await;

    assert!(result.is_ok());
    assert_eq!(messenger.calls(), vec!["card", "voice", "file"]);
}

#[tokio::test]
async fn test_channel_exhaustion_is_an_error() {
    let messenger = RecordingMessenger::new(
        Some(|| ChannelError::Failed("card send failed".to_string())),
        Some(|| ChannelError::Unsupported),
        Some(|| ChannelError::Failed("file send failed".to_string())),
    );
    let card = create_test_card(PathBuf::from("/tmp/none"));

    let result = send_with_fallback(&card, &messenger).await;

    assert!(matches!(result, Err(DeliveryError::Channel(_))));
    assert_eq!(messenger.calls(), vec!["card", "voice", "file"]);
}

#[tokio::test]
async fn test_fallback_law_without_credentials_or_resolver() {
    // No credentials and no fallback resolver: resolution must still route
    // through the fallback path and hand an empty URL to the download
    // stage, which fails cleanly before any channel is tried.
    unsafe {
        std::env::set_var("CATALOG_API_URL", "http://127.0.0.1:9");
        std::env::remove_var("CATALOG_COOKIE");
        std::env::remove_var("CLOUD_COOKIE");
        std::env::set_var("FALLBACK_ENABLED", "false");
    }

    let track = create_test_track(42, "勇气", "梁静茹");

    let source = resolve_source(&track).await;
    assert!(matches!(source, ResolvedSource::Fallback { .. }));
    assert!(source.url().is_empty());
    assert_eq!(source.size_bytes(), 0);

    let messenger = RecordingMessenger::new(None, None, None);
    let result = deliver(&track, "tester", &messenger).await;

    assert!(matches!(result, Err(DeliveryError::NoSource(_))));
    // the announcement went out, but no audio channel was attempted
    assert_eq!(messenger.calls(), vec!["text"]);
}
