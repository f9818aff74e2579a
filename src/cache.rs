//! Local preference file.
//!
//! Preferences are a flat string map stored as TOML under `.cache/`. Reads
//! that fail leave the store empty; writes report their error to the caller,
//! which logs it and carries on.

use anyhow::{Context, Result};
use neonfolio_core::visual_mode::PreferenceStore;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CACHE_DIR: &str = ".cache";

pub fn prefs_path() -> PathBuf {
    Path::new(CACHE_DIR).join("prefs.toml")
}

#[derive(Debug)]
pub struct PrefsFile {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl PrefsFile {
    pub fn open(path: PathBuf) -> Self {
        let values = match fs::read_to_string(&path) {
            Ok(data) => toml::from_str(&data).unwrap_or_else(|err| {
                warn!(path = %path.display(), "Ignoring unreadable preferences: {err}");
                BTreeMap::new()
            }),
            Err(err) => {
                debug!(path = %path.display(), "No stored preferences: {err}");
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let contents = toml::to_string(&self.values).context("serializing preferences")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("writing {}", self.path.display()))
    }
}

impl PreferenceStore for PrefsFile {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_none() {
            return Ok(());
        }
        self.flush()
    }
}
