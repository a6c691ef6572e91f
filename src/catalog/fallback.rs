use reqwest::Client;

use crate::{config, types::FallbackResponse, warning};

/// Outcome of a public resolver query. The URL may be empty; the resolver
/// never fails a delivery on its own, a dead end only surfaces later at the
/// download stage.
#[derive(Debug, Clone)]
pub struct FallbackResolution {
    pub url: String,
    pub quality: String,
}

/// Resolves a playback URL through the public unauthenticated resolver.
///
/// Queried with `"artist title"` when direct resolution is denied or comes
/// back empty. The result is lower-confidence audio with a non-numeric
/// quality label. Transport failures and empty payloads both produce an
/// empty URL rather than an error.
pub async fn resolve(artist: &str, title: &str) -> FallbackResolution {
    let query = format!("{} {}", artist, title);

    if !config::fallback_enabled() {
        return FallbackResolution {
            url: String::new(),
            quality: "standard".to_string(),
        };
    }

    match try_resolve(&query).await {
        Ok(json) => FallbackResolution {
            url: json.music_url.unwrap_or_default(),
            quality: json.quality.unwrap_or_else(|| "standard".to_string()),
        },
        Err(e) => {
            warning!("Fallback resolver failed for '{}': {}", query, e);
            FallbackResolution {
                url: String::new(),
                quality: "standard".to_string(),
            }
        }
    }
}

async fn try_resolve(query: &str) -> Result<FallbackResponse, reqwest::Error> {
    let client = Client::new();
    let response = client
        .get(config::fallback_api_url())
        .query(&[("q", query)])
        .send()
        .await?
        .error_for_status()?;

    response.json::<FallbackResponse>().await
}
