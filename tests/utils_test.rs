use std::path::Path;

use songferry::types::{ArtistRef, CLOUD_DURATION, Track};
use songferry::utils::*;

// Helper function to create a test track
fn create_test_track(id: u64, title: &str, artist: &str, duration: &str) -> Track {
    Track {
        id,
        title: title.to_string(),
        artist: artist.to_string(),
        duration: duration.to_string(),
        cover_url: None,
    }
}

fn create_cloud_track(id: u64, title: &str, artist: &str) -> Track {
    create_test_track(id, title, artist, CLOUD_DURATION)
}

#[test]
fn test_sanitize_filename() {
    // Path separators and reserved characters become underscores
    assert_eq!(sanitize_filename("AC/DC: Back?"), "AC_DC_ Back_");
    assert_eq!(sanitize_filename("a\\b*c\"d<e>f|g"), "a_b_c_d_e_f_g");

    // Control characters are replaced as well
    assert_eq!(sanitize_filename("tab\there"), "tab_here");

    // Surrounding whitespace is trimmed, inner content is kept
    assert_eq!(sanitize_filename("  周杰伦-晴天  "), "周杰伦-晴天");
}

#[test]
fn test_parse_upload_filename_valid() {
    let parsed = parse_upload_filename(Path::new("/tmp/in/Faye Wong - 红豆.flac"));
    assert_eq!(
        parsed,
        Some(("Faye Wong".to_string(), "红豆".to_string()))
    );

    // Extra whitespace around the separator halves is trimmed
    let parsed = parse_upload_filename(Path::new("Eagles -  Hotel California .mp3"));
    assert_eq!(
        parsed,
        Some(("Eagles".to_string(), "Hotel California".to_string()))
    );
}

#[test]
fn test_parse_upload_filename_rejects_bad_names() {
    // No "artist - title" separator at all
    assert_eq!(parse_upload_filename(Path::new("track01.mp3")), None);

    // A plain dash without spaces is not the separator
    assert_eq!(parse_upload_filename(Path::new("artist-title.mp3")), None);

    // Empty halves are rejected
    assert_eq!(parse_upload_filename(Path::new(" - title.mp3")), None);
    assert_eq!(parse_upload_filename(Path::new("artist - .mp3")), None);
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(0), "00:00");
    assert_eq!(format_duration(59_999), "00:59");
    assert_eq!(format_duration(60_000), "01:00");
    assert_eq!(format_duration(254_000), "04:14");
}

#[test]
fn test_format_size() {
    assert_eq!(format_size(512), "512B");
    assert_eq!(format_size(2_048), "2.0KB");
    assert_eq!(format_size(3_670_016), "3.5MB");
}

#[test]
fn test_quality_label_numeric() {
    assert_eq!(quality_label(320_000, Some("exhigh")), "320kbps");
    assert_eq!(quality_label(999_000, Some("lossless")), "999kbps");
}

#[test]
fn test_quality_label_master_tier_caveat() {
    let label = quality_label(1_411_000, Some("jymaster"));
    assert!(label.starts_with("1411kbps"));
    assert!(label.contains("master tape"));

    // Other tiers never carry the caveat
    assert!(!quality_label(1_411_000, Some("lossless")).contains("master tape"));
}

#[test]
fn test_quality_label_without_bitrate() {
    // No bitrate known: fall back to the tier name itself
    assert_eq!(quality_label(0, Some("standard")), "standard");
    assert_eq!(quality_label(0, None), "unknown");
}

#[test]
fn test_artists_label() {
    let artists = vec![
        ArtistRef {
            name: "G.E.M.".to_string(),
        },
        ArtistRef {
            name: "林俊杰".to_string(),
        },
    ];
    assert_eq!(artists_label(&artists), "G.E.M./林俊杰");

    assert_eq!(artists_label(&[]), "Unknown");
}

#[test]
fn test_matches_keyword() {
    let track = create_test_track(1, "晴天", "周杰伦", "04:29");

    // Substring on title or artist matches
    assert!(matches_keyword(&track, "晴"));
    assert!(matches_keyword(&track, "周杰伦"));

    // Case-insensitive for latin text
    let track = create_test_track(2, "Hotel California", "Eagles", "06:30");
    assert!(matches_keyword(&track, "hotel"));
    assert!(matches_keyword(&track, "EAGLES"));

    assert!(!matches_keyword(&track, "Beatles"));
}

#[test]
fn test_merge_results_orders_library_first() {
    let library = vec![create_cloud_track(1, "Song A", "X")];
    let catalog = vec![
        create_test_track(2, "Song B", "Y", "03:00"),
        create_test_track(3, "Song C", "Z", "03:30"),
    ];

    let merged = merge_results(library, catalog, 5);

    assert_eq!(merged.len(), 3);
    assert_eq!(merged[0].id, 1); // library match precedes catalog hits
    assert_eq!(merged[1].id, 2);
    assert_eq!(merged[2].id, 3);
}

#[test]
fn test_merge_results_never_exceeds_max() {
    let library = vec![
        create_cloud_track(1, "A", "X"),
        create_cloud_track(2, "B", "X"),
    ];
    let catalog = vec![
        create_test_track(3, "C", "Y", "03:00"),
        create_test_track(4, "D", "Y", "03:00"),
        create_test_track(5, "E", "Y", "03:00"),
    ];

    let merged = merge_results(library, catalog, 3);

    assert_eq!(merged.len(), 3);
    assert_eq!(merged[0].id, 1);
    assert_eq!(merged[1].id, 2);
    assert_eq!(merged[2].id, 3); // catalog fills the single remaining slot
}

#[test]
fn test_merge_results_floors_at_max_when_library_overflows() {
    let library = vec![
        create_cloud_track(1, "A", "X"),
        create_cloud_track(2, "B", "X"),
        create_cloud_track(3, "C", "X"),
    ];
    let catalog = vec![create_test_track(4, "D", "Y", "03:00")];

    let merged = merge_results(library, catalog, 2);

    // library matches alone exceed the cap: catalog contributes nothing
    assert_eq!(merged.len(), 2);
    assert!(merged.iter().all(|t| t.duration == CLOUD_DURATION));
}

#[test]
fn test_track_table_rows_are_one_based() {
    let tracks = vec![
        create_test_track(10, "First", "A", "03:00"),
        create_test_track(20, "Second", "B", "04:00"),
    ];

    let rows = track_table_rows(&tracks);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].pos, 1);
    assert_eq!(rows[1].pos, 2);
    assert_eq!(rows[1].title, "Second");
}

#[tokio::test]
async fn test_with_retry_succeeds_after_transient_failures() {
    use std::sync::atomic::{AtomicU32, Ordering};

    let attempts = AtomicU32::new(0);
    let result: Result<u32, String> = with_retry(3, 1, || {
        let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
        async move {
            if n < 3 {
                Err(format!("transient {}", n))
            } else {
                Ok(n)
            }
        }
    })
    .await;

    assert_eq!(result, Ok(3));
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_with_retry_gives_up_after_attempts() {
    use std::sync::atomic::{AtomicU32, Ordering};

    let attempts = AtomicU32::new(0);
    let result: Result<u32, String> = with_retry(3, 1, || {
        attempts.fetch_add(1, Ordering::SeqCst);
        async { Err("permanent".to_string()) }
    })
    .await;

    assert_eq!(result, Err("permanent".to_string()));
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}
