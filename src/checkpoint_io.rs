//! Checkpoint save/load for durable suspension (JSON).

use std::path::Path;

use tracing::instrument;

use crate::types::Checkpoint;

/// Default filename for a checkpoint under a run directory.
pub const CHECKPOINT_FILENAME: &str = "checkpoint.json";

/// Saves a checkpoint to `path` as JSON.
#[instrument(level = "trace", skip(path, checkpoint))]
pub fn save_checkpoint(path: &Path, checkpoint: &Checkpoint) -> Result<(), std::io::Error> {
  let json = serde_json::to_string_pretty(checkpoint)
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::write(path, json)
}

/// Loads a checkpoint from `path`. Returns an error if the file is missing
/// or invalid JSON.
#[instrument(level = "trace", skip(path))]
pub fn load_checkpoint(path: &Path) -> Result<Checkpoint, std::io::Error> {
  let bytes = std::fs::read(path)?;
  serde_json::from_slice(&bytes)
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}
