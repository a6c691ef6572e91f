use std::path::Path;

use crate::{catalog, config, management::LibraryManager, success, utils, warning};

const UPLOAD_ATTEMPTS: u32 = 3;
const UPLOAD_BACKOFF_MS: u64 = 2000;

/// Uploads a stabilized audio file into the personal cloud library.
///
/// The upload itself runs under the shared retry-with-backoff primitive.
/// After a successful upload the new personal copy is linked to its catalog
/// counterpart with a best-effort match call: the file is already safely
/// stored at that point, so a match failure is logged and never retried,
/// and never turns the upload into a failure. Any success path also forces
/// a library snapshot refresh so the next search sees the new track
/// immediately.
///
/// The local file is removed whether the upload succeeds or exhausts its
/// retries.
pub async fn upload_with_retry(path: &Path, linked_catalog_id: Option<u64>) -> Result<(), String> {
    let result = utils::with_retry(UPLOAD_ATTEMPTS, UPLOAD_BACKOFF_MS, || {
        catalog::cloud::upload_song(path)
    })
    .await;

    let outcome = match result {
        Ok(assigned_id) => {
            match (assigned_id, linked_catalog_id) {
                (Some(sid), Some(asid)) => match config::account_uid().await {
                    Some(uid) => match catalog::cloud::match_song(uid, sid, asid).await {
                        Ok(()) => success!("Upload matched to catalog track {}", asid),
                        Err(e) => {
                            warning!("Upload stored, but match to catalog track {} failed: {}", asid, e)
                        }
                    },
                    None => warning!("No account id on file, skipping catalog match"),
                },
                (None, Some(asid)) => {
                    warning!("Upload response carried no song id, skipping match to {}", asid)
                }
                _ => {}
            }

            LibraryManager::refresh().await;
            Ok(())
        }
        Err(e) => Err(format!(
            "Upload failed after {} attempts: {}",
            UPLOAD_ATTEMPTS, e
        )),
    };

    if let Err(e) = async_fs::remove_file(path).await {
        warning!("Cannot remove {}: {}", path.display(), e);
    }

    outcome
}
