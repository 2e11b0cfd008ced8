use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde_json::Value;

/// File-based archive of raw provider payloads. The last archived payload
/// doubles as a fallback when the provider is unreachable.
pub struct Cache {
    raw_dir: PathBuf,
}

impl Cache {
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let raw_dir = cache_dir.as_ref().join("raw");
        fs::create_dir_all(&raw_dir).context("Failed to create raw cache directory")?;

        Ok(Self { raw_dir })
    }

    /// Save a raw API payload to cache
    pub fn save_raw(&self, key: &str, data: &Value) -> Result<()> {
        let file_path = self.build_path(key);
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&file_path, json).context("Failed to write cache file")?;

        info!("Saved raw payload to cache: {}", file_path.display());
        Ok(())
    }

    /// Load a raw API payload from cache, None when never saved
    pub fn load_raw(&self, key: &str) -> Result<Option<Value>> {
        let file_path = self.build_path(key);
        if !file_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&file_path).context("Failed to read cache file")?;
        let data = serde_json::from_str(&json).with_context(|| {
            format!(
                "Failed to parse JSON from {:?}. First 200 chars: {}",
                file_path,
                &json[..json.len().min(200)]
            )
        })?;

        info!("Loaded raw payload from cache: {}", file_path.display());
        Ok(Some(data))
    }

    fn build_path(&self, key: &str) -> PathBuf {
        self.raw_dir.join(format!("{}.json", key))
    }
}
