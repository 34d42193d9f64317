// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Keyed JSON records on the local filesystem.
//!
//! Each key maps to `<data_dir>/<key>.json`. Writes go through an
//! in-memory record cache first, so the cache is authoritative for the
//! session even when the disk write fails; reads prefer the cache and
//! fall back to disk. A record that fails to parse is treated as absent,
//! never as a fatal error.

use crate::error::AppError;
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Local key-value storage for serialized records.
#[derive(Clone)]
pub struct JsonFileStorage {
    /// `None` in in-memory mode
    data_dir: Option<PathBuf>,
    cache: Arc<DashMap<String, serde_json::Value>>,
}

impl JsonFileStorage {
    /// Open (creating if needed) a storage directory.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, AppError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)
            .map_err(|e| AppError::Storage(format!("Failed to create {:?}: {}", data_dir, e)))?;

        tracing::info!(dir = %data_dir.display(), "Opened storage directory");

        Ok(Self {
            data_dir: Some(data_dir),
            cache: Arc::new(DashMap::new()),
        })
    }

    /// Storage with no durable medium, for tests and ephemeral runs.
    pub fn new_in_memory() -> Self {
        Self {
            data_dir: None,
            cache: Arc::new(DashMap::new()),
        }
    }

    fn record_path(&self, key: &str) -> Option<PathBuf> {
        self.data_dir.as_ref().map(|dir| dir.join(format!("{}.json", key)))
    }

    /// Read and deserialize a record. Absent and malformed records both
    /// come back as `None`; a malformed record is logged.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if let Some(value) = self.cache.get(key) {
            return match serde_json::from_value(value.clone()) {
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    tracing::warn!(key, error = %e, "Cached record failed to decode, treating as absent");
                    None
                }
            };
        }

        let path = self.record_path(key)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read record, treating as absent");
                return None;
            }
        };

        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) => {
                let decoded = serde_json::from_value(value.clone());
                self.cache.insert(key.to_string(), value);
                match decoded {
                    Ok(decoded) => Some(decoded),
                    Err(e) => {
                        tracing::warn!(key, error = %e, "Record has incompatible shape, treating as absent");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "Record is corrupted, treating as absent");
                None
            }
        }
    }

    /// Serialize and store a record, write-through. The cache always
    /// takes the new value; the returned error only reports the durable
    /// write, which callers may treat as best-effort.
    pub fn set<T: Serialize>(&self, key: &str, record: &T) -> Result<(), AppError> {
        let value = serde_json::to_value(record)
            .map_err(|e| AppError::Storage(format!("Failed to serialize {}: {}", key, e)))?;
        self.cache.insert(key.to_string(), value.clone());

        let Some(path) = self.record_path(key) else {
            return Ok(());
        };

        // Write to a sibling temp file and rename so a crash mid-write
        // can never leave a half-written record behind.
        let tmp = path.with_extension("json.tmp");
        let serialized = serde_json::to_string_pretty(&value)
            .map_err(|e| AppError::Storage(format!("Failed to serialize {}: {}", key, e)))?;
        fs::write(&tmp, serialized)
            .map_err(|e| AppError::Storage(format!("Failed to write {:?}: {}", tmp, e)))?;
        fs::rename(&tmp, &path)
            .map_err(|e| AppError::Storage(format!("Failed to replace {:?}: {}", path, e)))?;

        Ok(())
    }

    /// Delete a record. Deleting an absent record is not an error.
    pub fn remove(&self, key: &str) -> Result<(), AppError> {
        self.cache.remove(key);

        let Some(path) = self.record_path(key) else {
            return Ok(());
        };

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to remove {:?}: {}",
                path, e
            ))),
        }
    }
}
