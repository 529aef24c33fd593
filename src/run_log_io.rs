//! Run-log save/load (JSON).

use std::path::Path;

use crate::types::RunLog;

/// Default filename for a run log under a run directory.
pub const RUN_LOG_FILENAME: &str = "run.log.json";

/// Saves a run log to `path` as pretty JSON, creating parent directories
/// if needed.
pub fn save_run_log(path: &Path, log: &RunLog) -> Result<(), std::io::Error> {
  let json = serde_json::to_string_pretty(log)
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::write(path, json)
}

/// Loads a run log from `path`. Returns an error if the file is missing or
/// invalid JSON.
pub fn load_run_log(path: &Path) -> Result<RunLog, std::io::Error> {
  let bytes = std::fs::read(path)?;
  serde_json::from_slice(&bytes)
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}
