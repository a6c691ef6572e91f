use std::{fs, io::Write, path::PathBuf, time::Duration};

use songferry::delivery::watch::{POLL_INTERVAL_MS, await_stable};

// Helper producing a unique scratch path per test
fn scratch_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("songferry-watch-{}-{}", std::process::id(), name));
    path
}

#[tokio::test]
async fn test_stable_file_is_ready_within_two_polls() {
    let path = scratch_path("stable");
    fs::write(&path, b"complete audio payload").unwrap();

    let start = std::time::Instant::now();
    let ready = await_stable(&path, 5).await;

    assert!(ready);
    // one observation records the size, the second confirms it
    assert!(start.elapsed() >= Duration::from_millis(2 * POLL_INTERVAL_MS));
    assert!(start.elapsed() < Duration::from_secs(5));

    fs::remove_file(&path).unwrap();
}

#[tokio::test]
async fn test_missing_file_times_out() {
    let path = scratch_path("missing");

    let start = std::time::Instant::now();
    let ready = await_stable(&path, 1).await;

    assert!(!ready);
    // exactly timeout / poll-interval attempts before giving up
    assert!(start.elapsed() >= Duration::from_millis(2 * POLL_INTERVAL_MS));
}

#[tokio::test]
async fn test_empty_file_never_counts_as_ready() {
    let path = scratch_path("empty");
    fs::write(&path, b"").unwrap();

    // size stays at zero: equal observations are not enough
    assert!(!await_stable(&path, 1).await);

    fs::remove_file(&path).unwrap();
}

#[tokio::test]
async fn test_growing_file_becomes_ready_after_writer_stops() {
    let path = scratch_path("growing");
    fs::write(&path, b"first chunk").unwrap();

    let writer_path = path.clone();
    let writer = tokio::spawn(async move {
        for _ in 0..3 {
            tokio::time::sleep(Duration::from_millis(600)).await;
            let mut file = fs::OpenOptions::new()
                .append(true)
                .open(&writer_path)
                .unwrap();
            file.write_all(b"more data").unwrap();
        }
        // writer stops here; the file must stabilize shortly after
    });

    let ready = await_stable(&path, 10).await;
    writer.await.unwrap();

    assert!(ready);
    let final_size = fs::metadata(&path).unwrap().len();
    assert_eq!(final_size, ("first chunk".len() + 3 * "more data".len()) as u64);

    fs::remove_file(&path).unwrap();
}
