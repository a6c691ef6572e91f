use reqwest::Client;

use crate::{
    config,
    management::RegionManager,
    types::{CredentialKind, LoginStatusResponse, Profile},
    warning,
};

/// Probes the liveness of a session credential.
///
/// Issues the catalog's login-status call with the selected credential.
/// Success is defined as the response carrying a non-empty profile payload;
/// an unset credential, a transport failure, a malformed payload or an
/// anonymous profile all yield `false`, which silently downgrades the
/// delivery to the fallback resolver rather than surfacing an error.
///
/// Probe results are intentionally not cached: every quality decision
/// re-probes, trading one extra request for immediate reaction to revoked
/// or expired accounts.
///
/// # Side effect
///
/// A successful probe of the playback credential persists the resolved
/// account id for reuse by the cloud match call. Library-scoped probes
/// never persist it.
pub async fn check_login(kind: CredentialKind) -> bool {
    let cookie = match kind {
        CredentialKind::Playback => config::catalog_cookie(),
        CredentialKind::Library => config::cloud_cookie(),
    };
    let Some(cookie) = cookie else {
        return false;
    };

    match try_login_status(&cookie).await {
        Ok(Some(profile)) => {
            if kind == CredentialKind::Playback {
                if let Err(e) = config::persist_account_uid(profile.user_id).await {
                    warning!("Cannot persist account id: {}", e);
                }
            }
            true
        }
        Ok(None) => false,
        Err(e) => {
            warning!("Login status probe failed: {}", e);
            false
        }
    }
}

async fn try_login_status(cookie: &str) -> Result<Option<Profile>, reqwest::Error> {
    let api_url = format!(
        "{base}/login/status",
        base = RegionManager::resolve_base_url().await
    );

    let client = Client::new();
    let response = client
        .get(&api_url)
        .header("Cookie", cookie)
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<LoginStatusResponse>().await?;
    Ok(json.data.and_then(|d| d.profile))
}
