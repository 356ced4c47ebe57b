//! File-backed durable key-value storage.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context;

use stockroom_filters::StateStorage;

/// Durable key-value storage mapping each key to a JSON file.
///
/// Two keys and a handful of kilobytes live here; plain files under the app
/// data directory cover that without a database.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Store files under an explicit directory (tests, custom setups).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolve `{app_data_dir}/stockroom` with a home-directory fallback.
    pub fn in_app_data() -> anyhow::Result<Self> {
        let base = dirs::data_dir()
            .or_else(|| {
                dirs::home_dir().map(|mut home| {
                    home.push(".local");
                    home.push("share");
                    home
                })
            })
            .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

        let mut dir = base;
        dir.push("stockroom");
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create state directory at {dir:?}"))?;

        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are well-known constants; the mapping still defends against
        // path separators sneaking into a file name.
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl StateStorage for JsonFileStorage {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => {
                Err(err).with_context(|| format!("failed to read state file for key {key}"))
            }
        }
    }

    fn write(&self, key: &str, payload: &str) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create state directory at {:?}", self.dir))?;
        let path = self.path_for(key);
        fs::write(&path, payload)
            .with_context(|| format!("failed to write state file at {path:?}"))
    }
}
