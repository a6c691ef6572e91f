use std::path::PathBuf;

use crate::{config, management::CacheError, types::RegionFlag, warning};

pub struct RegionManager {
    flag: RegionFlag,
}

impl RegionManager {
    pub fn new(is_overseas: bool) -> Self {
        Self {
            flag: RegionFlag { is_overseas },
        }
    }

    /// Resolves the catalog API base URL for this deployment.
    ///
    /// An operator-configured `CATALOG_API_URL` always wins. Otherwise the
    /// persisted region flag selects between the overseas and domestic
    /// deployments. The first resolution with no persisted flag treats the
    /// deployment as overseas and persists that decision; the flag is a
    /// static choice, never probed from the network. The international
    /// endpoint answers from anywhere, the domestic one does not, so the
    /// default fails safe even on mainland installs.
    pub async fn resolve_base_url() -> String {
        if let Some(url) = config::catalog_api_url() {
            return url.trim_end_matches('/').to_string();
        }

        let flag = match Self::load().await {
            Ok(manager) => manager.flag,
            Err(_) => {
                let manager = Self::new(true);
                if let Err(e) = manager.persist().await {
                    warning!("Cannot persist region flag: {:?}", e);
                }
                manager.flag
            }
        };

        if flag.is_overseas {
            config::API_URL_OVERSEAS.to_string()
        } else {
            config::API_URL_DOMESTIC.to_string()
        }
    }

    pub async fn load() -> Result<Self, CacheError> {
        let path = Self::cache_path();
        let content = async_fs::read_to_string(&path).await?;
        let flag: RegionFlag = serde_json::from_str(&content)?;
        Ok(Self { flag })
    }

    pub async fn persist(&self) -> Result<(), CacheError> {
        let path = Self::cache_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.flag)?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    pub fn is_overseas(&self) -> bool {
        self.flag.is_overseas
    }

    fn cache_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("songferry/cache/region.json");
        path
    }
}
