//! Stats store for the progress record.
//!
//! A single JSON file, read whole and replaced whole. Assumes one writer:
//! the tool is a foreground, single-invocation program and the file is
//! not locked.

use crate::error::StatsError;
use crate::progress::ProgressRecord;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Environment override for the stats file location
pub const STATS_FILE_ENV: &str = "BREATHE_STATS_FILE";

/// File name used beside the executable
const STATS_FILE_NAME: &str = "breathe-stats.json";

/// File name used inside the data directory
const DATA_DIR_FILE_NAME: &str = "stats.json";

/// Scratch file used to test whether a directory accepts writes
const WRITE_CHECK_NAME: &str = ".breathe-write-check";

/// Non-empty `$BREATHE_STATS_FILE`, if set
pub fn env_override() -> Option<PathBuf> {
    non_empty_path(std::env::var_os(STATS_FILE_ENV))
}

fn non_empty_path(value: Option<OsString>) -> Option<PathBuf> {
    value
        .filter(|v| !v.to_string_lossy().trim().is_empty())
        .map(PathBuf::from)
}

/// Pick the stats file location from the candidates, in priority order:
///
/// 1. an explicit override
/// 2. breathe-stats.json beside the executable, if the file already
///    exists or the directory is writable
/// 3. <data dir>/breathe/stats.json
pub fn locate(
    explicit: Option<PathBuf>,
    exe_dir: Option<&Path>,
    data_dir: Option<&Path>,
) -> Result<PathBuf, StatsError> {
    if let Some(path) = explicit {
        return Ok(path);
    }

    if let Some(dir) = exe_dir {
        let path = dir.join(STATS_FILE_NAME);
        if path.is_file() || is_writable(dir) {
            return Ok(path);
        }
        tracing::debug!(dir = %dir.display(), "executable directory is not writable");
    }

    data_dir
        .map(|dir| dir.join("breathe").join(DATA_DIR_FILE_NAME))
        .ok_or(StatsError::NoStorageLocation)
}

fn is_writable(dir: &Path) -> bool {
    let check = dir.join(WRITE_CHECK_NAME);
    match fs::OpenOptions::new().write(true).create_new(true).open(&check) {
        Ok(_) => {
            let _ = fs::remove_file(&check);
            true
        }
        Err(e) => e.kind() == ErrorKind::AlreadyExists,
    }
}

/// Stats store backed by one JSON file
#[derive(Debug, Clone)]
pub struct StatsStore {
    path: PathBuf,
}

impl StatsStore {
    /// Store at an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location, see [`locate`]
    pub fn default_location() -> Result<Self, StatsError> {
        let exe = std::env::current_exe().ok();
        let exe_dir = exe.as_deref().and_then(Path::parent);
        let data_dir = dirs::data_local_dir();
        locate(env_override(), exe_dir, data_dir.as_deref()).map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record.
    ///
    /// A missing, empty, or unparseable file yields the default record.
    /// Only real read failures (permissions, a directory in the way) are errors.
    pub fn load(&self) -> Result<ProgressRecord, StatsError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no stats file yet");
                return Ok(ProgressRecord::default());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(ProgressRecord::default());
        }

        let mut record = match serde_json::from_str::<ProgressRecord>(&content) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "stats file is corrupt, starting from defaults"
                );
                return Ok(ProgressRecord::default());
            }
        };

        record.refresh_rank();
        Ok(record)
    }

    /// Persist the record, replacing the file.
    ///
    /// Writes a sibling temp file first and renames it over the target, so
    /// a failed write never leaves a truncated stats file behind. The temp
    /// file is removed if either step fails.
    pub fn save(&self, record: &ProgressRecord) -> Result<(), StatsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(record)?;
        let temp_path = self.path.with_extension("json.tmp");

        let written =
            fs::write(&temp_path, content).and_then(|()| fs::rename(&temp_path, &self.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        tracing::debug!(path = %self.path.display(), "stats saved");
        Ok(())
    }

    /// Delete the stats file. Returns true if a file was removed.
    pub fn reset(&self) -> Result<bool, StatsError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let store = StatsStore::new(dir.path().join("stats.json"));
        assert_eq!(store.load().unwrap(), ProgressRecord::default());
    }

    #[test]
    fn test_empty_file_is_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, "  \n").unwrap();
        assert_eq!(StatsStore::new(path).load().unwrap(), ProgressRecord::default());
    }

    #[test]
    fn test_corrupt_file_is_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, "{ totalBreaths: oops").unwrap();
        assert_eq!(StatsStore::new(path).load().unwrap(), ProgressRecord::default());
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempdir().unwrap();
        let store = StatsStore::new(dir.path().join("nested").join("stats.json"));

        let record = ProgressRecord {
            total_breaths: 1000,
            streak: 12,
            last_date: NaiveDate::from_ymd_opt(2024, 2, 29),
            rank: "Zen Seeker".to_string(),
            icon: "🪷".to_string(),
        };
        store.save(&record).unwrap();

        assert_eq!(store.load().unwrap(), record);
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_load_recomputes_stale_rank() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(
            &path,
            r#"{"totalBreaths":300,"streak":2,"lastDate":"2024-01-01","rank":"Breath Legend","icon":"x"}"#,
        )
        .unwrap();

        let record = StatsStore::new(path).load().unwrap();
        assert_eq!(record.rank, "Mindful Apprentice");
        assert_eq!(record.icon, "🍃");
    }

    #[test]
    fn test_reset() {
        let dir = tempdir().unwrap();
        let store = StatsStore::new(dir.path().join("stats.json"));
        store.save(&ProgressRecord::default()).unwrap();

        assert!(store.reset().unwrap());
        assert!(!store.path().exists());
        assert!(!store.reset().unwrap());
    }

    #[test]
    fn test_read_error_is_reported() {
        // A directory where the file should be
        let dir = tempdir().unwrap();
        let store = StatsStore::new(dir.path());
        assert!(store.load().is_err());
    }

    #[test]
    fn test_failed_save_removes_temp_file() {
        // Rename fails: the target is a directory
        let dir = tempdir().unwrap();
        let target = dir.path().join("stats.json");
        fs::create_dir(&target).unwrap();
        let store = StatsStore::new(&target);

        assert!(store.save(&ProgressRecord::default()).is_err());
        assert!(!target.with_extension("json.tmp").exists());
        assert!(target.is_dir());
    }

    #[test]
    fn test_locate_prefers_explicit_path() {
        let dir = tempdir().unwrap();
        let explicit = dir.path().join("mine.json");
        let path = locate(Some(explicit.clone()), Some(dir.path()), Some(dir.path())).unwrap();
        assert_eq!(path, explicit);
    }

    #[test]
    fn test_locate_beside_executable() {
        let exe_dir = tempdir().unwrap();
        let data_dir = tempdir().unwrap();
        let path = locate(None, Some(exe_dir.path()), Some(data_dir.path())).unwrap();
        assert_eq!(path, exe_dir.path().join("breathe-stats.json"));
        // The writability check cleans up after itself
        assert!(!exe_dir.path().join(WRITE_CHECK_NAME).exists());
        assert!(!path.exists());
    }

    #[test]
    fn test_locate_falls_back_to_data_dir() {
        let data_dir = tempdir().unwrap();
        let missing = data_dir.path().join("no-such-dir");

        let path = locate(None, Some(missing.as_path()), Some(data_dir.path())).unwrap();
        assert_eq!(path, data_dir.path().join("breathe").join("stats.json"));

        let path = locate(None, None, Some(data_dir.path())).unwrap();
        assert_eq!(path, data_dir.path().join("breathe").join("stats.json"));
    }

    #[test]
    fn test_locate_without_candidates() {
        assert!(matches!(
            locate(None, None, None),
            Err(StatsError::NoStorageLocation)
        ));
    }

    #[test]
    fn test_default_location_is_beside_executable() {
        if env_override().is_some() {
            return;
        }
        let exe = std::env::current_exe().unwrap();
        let store = StatsStore::default_location().unwrap();
        assert_eq!(store.path(), exe.parent().unwrap().join("breathe-stats.json"));
    }

    #[test]
    fn test_empty_env_value_is_no_override() {
        assert_eq!(non_empty_path(None), None);
        assert_eq!(non_empty_path(Some(OsString::from(""))), None);
        assert_eq!(non_empty_path(Some(OsString::from("  "))), None);
        assert_eq!(
            non_empty_path(Some(OsString::from("/tmp/s.json"))),
            Some(PathBuf::from("/tmp/s.json"))
        );
    }
}
