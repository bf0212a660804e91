//! Persistence for heat and mood history
//!
//! Both stores are traits so the engine can run against JSON files, memory,
//! or a store that always fails. JSON formats:
//! - heat: `{"heat": 0.42}`
//! - history: array of records, append-only

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::types::HistoryRecord;

/// Where the heat level lives between requests
pub trait ThermalStore: Send + Sync {
    /// `None` when nothing has been saved yet
    fn load(&self) -> Result<Option<f64>, StoreError>;
    fn save(&self, heat: f64) -> Result<(), StoreError>;
}

/// Append-only log of past turns
pub trait HistoryStore: Send + Sync {
    fn append(&self, record: HistoryRecord) -> Result<(), StoreError>;
    /// Last `n` records, oldest first
    fn recent(&self, n: usize) -> Result<Vec<HistoryRecord>, StoreError>;
    fn all(&self) -> Result<Vec<HistoryRecord>, StoreError>;
    /// Remove every record; returns the backup location if one was written
    fn clear(&self) -> Result<Option<PathBuf>, StoreError>;
}

fn tail(mut records: Vec<HistoryRecord>, n: usize) -> Vec<HistoryRecord> {
    let skip = records.len().saturating_sub(n);
    records.drain(..skip);
    records
}

/// `<stem>_<tag>_<YYYYmmdd_HHMMSS>.json` next to `path`
fn sibling_backup_path(path: &Path, tag: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("store");
    let ts = chrono::Local::now().format("%Y%m%d_%H%M%S");
    path.with_file_name(format!("{}_{}_{}.json", stem, tag, ts))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}

// =============================================================================
// JSON FILES
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct HeatFile {
    heat: f64,
}

/// Heat level in a small JSON file
#[derive(Debug, Clone)]
pub struct JsonThermalStore {
    path: PathBuf,
}

impl JsonThermalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThermalStore for JsonThermalStore {
    fn load(&self) -> Result<Option<f64>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.path)?;
        let file: HeatFile = serde_json::from_str(&json).map_err(|e| StoreError::Corrupted {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        if !file.heat.is_finite() || !(0.0..=1.0).contains(&file.heat) {
            return Err(StoreError::Corrupted {
                path: self.path.display().to_string(),
                reason: format!("heat {} outside [0, 1]", file.heat),
            });
        }
        Ok(Some(file.heat))
    }

    fn save(&self, heat: f64) -> Result<(), StoreError> {
        write_json(&self.path, &HeatFile { heat })
    }
}

/// Mood history as a JSON array on disk
#[derive(Debug)]
pub struct JsonHistoryStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read everything; a corrupted file is moved aside and treated as empty
    fn read_all(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let json = std::fs::read_to_string(&self.path)?;
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str(&json) {
            Ok(records) => Ok(records),
            Err(e) => {
                let backup = sibling_backup_path(&self.path, "corrupted");
                std::fs::rename(&self.path, &backup)?;
                warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    error = %e,
                    "history file corrupted, starting fresh"
                );
                Ok(Vec::new())
            }
        }
    }
}

impl HistoryStore for JsonHistoryStore {
    fn append(&self, record: HistoryRecord) -> Result<(), StoreError> {
        let _guard = self.lock.lock();
        let mut records = self.read_all()?;
        records.push(record);
        write_json(&self.path, &records)?;
        debug!(entries = records.len(), "history appended");
        Ok(())
    }

    fn recent(&self, n: usize) -> Result<Vec<HistoryRecord>, StoreError> {
        let _guard = self.lock.lock();
        Ok(tail(self.read_all()?, n))
    }

    fn all(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        let _guard = self.lock.lock();
        self.read_all()
    }

    fn clear(&self) -> Result<Option<PathBuf>, StoreError> {
        let _guard = self.lock.lock();
        let backup = if self.path.exists() {
            let backup = sibling_backup_path(&self.path, "backup");
            std::fs::copy(&self.path, &backup)?;
            Some(backup)
        } else {
            None
        };
        write_json(&self.path, &Vec::<HistoryRecord>::new())?;
        Ok(backup)
    }
}

// =============================================================================
// IN MEMORY
// =============================================================================

/// Heat that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryThermalStore {
    heat: Mutex<Option<f64>>,
}

impl MemoryThermalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_heat(heat: f64) -> Self {
        Self {
            heat: Mutex::new(Some(heat)),
        }
    }
}

impl ThermalStore for MemoryThermalStore {
    fn load(&self) -> Result<Option<f64>, StoreError> {
        Ok(*self.heat.lock())
    }

    fn save(&self, heat: f64) -> Result<(), StoreError> {
        *self.heat.lock() = Some(heat);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    records: Mutex<Vec<HistoryRecord>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<HistoryRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn append(&self, record: HistoryRecord) -> Result<(), StoreError> {
        self.records.lock().push(record);
        Ok(())
    }

    fn recent(&self, n: usize) -> Result<Vec<HistoryRecord>, StoreError> {
        Ok(tail(self.records.lock().clone(), n))
    }

    fn all(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        Ok(self.records.lock().clone())
    }

    fn clear(&self) -> Result<Option<PathBuf>, StoreError> {
        self.records.lock().clear();
        Ok(None)
    }
}

/// Every call fails, like a read-only or missing volume
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

fn unavailable() -> StoreError {
    StoreError::Io(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "store unavailable",
    ))
}

impl ThermalStore for UnavailableStore {
    fn load(&self) -> Result<Option<f64>, StoreError> {
        Err(unavailable())
    }

    fn save(&self, _heat: f64) -> Result<(), StoreError> {
        Err(unavailable())
    }
}

impl HistoryStore for UnavailableStore {
    fn append(&self, _record: HistoryRecord) -> Result<(), StoreError> {
        Err(unavailable())
    }

    fn recent(&self, _n: usize) -> Result<Vec<HistoryRecord>, StoreError> {
        Err(unavailable())
    }

    fn all(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        Err(unavailable())
    }

    fn clear(&self) -> Result<Option<PathBuf>, StoreError> {
        Err(unavailable())
    }
}

// =============================================================================
// TESTS
// =============================================================================
