//! File-backed feed store.
//!
//! Layout: `{data_dir}/holiday_data.json` (the artifact — the raw feed
//! payload for one year) plus `{data_dir}/meta.json` (sidecar: fetched year,
//! day count, content hash, fetch time).
//!
//! Writes are atomic from a reader's viewpoint: the artifact is written to a
//! uniquely-named temp file and renamed into place, so a concurrent load
//! either sees the full previous artifact or the full new one, never a mix.
//! There is at most one artifact at a time; a new year's save overwrites it.

use crate::calendar::HolidayDataset;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

const ARTIFACT_FILE: &str = "holiday_data.json";
const META_FILE: &str = "meta.json";

/// Distinguishes temp files written by concurrent savers.
static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Error reading or writing the cached artifact.
///
/// Callers must treat any variant on the load path as "no usable cache" and
/// fall through to a fresh fetch rather than surfacing it to the end user.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no cached artifact at {path}")]
    Missing { path: PathBuf },

    #[error("artifact I/O error: {0}")]
    Io(String),

    #[error("artifact is corrupt: {0}")]
    Corrupt(String),
}

/// Metadata sidecar written alongside the artifact.
///
/// `fetched_year` is the primary freshness signal; the artifact's mtime is
/// only consulted when the sidecar is absent or unreadable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMeta {
    pub fetched_year: i32,
    pub day_count: usize,
    pub data_hash: String,
    pub cached_at: chrono::NaiveDateTime,
}

/// The file-backed feed store.
pub struct FeedStore {
    data_dir: PathBuf,
}

impl FeedStore {
    /// Open a store rooted at `data_dir`, creating the directory if absent.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .map_err(|e| StoreError::Io(format!("failed to create data dir: {e}")))?;
        Ok(Self { data_dir })
    }

    /// Root directory of the store.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn artifact_path(&self) -> PathBuf {
        self.data_dir.join(ARTIFACT_FILE)
    }

    fn meta_path(&self) -> PathBuf {
        self.data_dir.join(META_FILE)
    }

    /// Persist a dataset, overwriting any existing artifact.
    ///
    /// The sidecar is written after the artifact; a crash between the two
    /// leaves a valid artifact whose year is still recoverable from mtime.
    pub fn save(&self, dataset: &HolidayDataset, fetched_year: i32) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(dataset)
            .map_err(|e| StoreError::Io(format!("artifact serialization: {e}")))?;

        self.write_atomic(&self.artifact_path(), &bytes)?;

        let meta = StoreMeta {
            fetched_year,
            day_count: dataset.len(),
            data_hash: blake3::hash(&bytes).to_hex().to_string(),
            cached_at: chrono::Local::now().naive_local(),
        };
        let meta_json = serde_json::to_vec_pretty(&meta)
            .map_err(|e| StoreError::Io(format!("meta serialization: {e}")))?;
        self.write_atomic(&self.meta_path(), &meta_json)?;

        Ok(())
    }

    /// Load the cached dataset, validating its structure.
    pub fn load(&self) -> Result<HolidayDataset, StoreError> {
        let path = self.artifact_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::Missing { path });
            }
            Err(e) => return Err(StoreError::Io(format!("read artifact: {e}"))),
        };

        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    /// The calendar year the artifact was fetched for, if one exists.
    ///
    /// Sidecar first; artifacts without a usable sidecar fall back to the
    /// file's modification time.
    pub fn artifact_year(&self) -> Option<i32> {
        if let Some(meta) = self.meta() {
            return Some(meta.fetched_year);
        }
        self.artifact_mtime_year()
    }

    /// Read the metadata sidecar, if present and parseable.
    pub fn meta(&self) -> Option<StoreMeta> {
        let content = fs::read_to_string(self.meta_path()).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn artifact_mtime_year(&self) -> Option<i32> {
        let modified = fs::metadata(self.artifact_path()).ok()?.modified().ok()?;
        let local: chrono::DateTime<chrono::Local> = modified.into();
        Some(local.year())
    }

    /// Write bytes to a uniquely-named temp file, then rename into place.
    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        let id = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp_path = path.with_extension(format!("json.{}.{id}.tmp", std::process::id()));

        fs::write(&tmp_path, bytes).map_err(|e| StoreError::Io(format!("write temp: {e}")))?;

        fs::rename(&tmp_path, path).map_err(|e| {
            // Clean up temp file on rename failure
            let _ = fs::remove_file(&tmp_path);
            StoreError::Io(format!("atomic rename failed: {e}"))
        })
    }
}
