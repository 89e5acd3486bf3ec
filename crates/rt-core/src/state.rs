//! Persisted alert arming state.
//!
//! Within a process the arming state lives in the engine. A one-shot CLI
//! invocation exits after each append, so the state is written to a small
//! JSON file beside the ledger and re-seeded on the next start, keeping the
//! once-per-run guarantee across processes. The file is derived data;
//! deleting it resets arming and never touches the ledger.

use crate::alert::AlertState;
use chrono::{DateTime, Utc};
use rt_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Schema version of the persisted state file.
pub const STATE_SCHEMA_VERSION: &str = "1.0.0";

const STATE_FILE_NAME: &str = "alert_state.json";

/// Versioned envelope around the persisted arming state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedAlertState {
    pub schema_version: String,
    pub updated_at: DateTime<Utc>,
    pub state: AlertState,
}

/// The state file that belongs to a ledger: `alert_state.json` beside it.
pub fn state_path_for(ledger_path: &Path) -> PathBuf {
    ledger_path.with_file_name(STATE_FILE_NAME)
}

/// Load arming state; a missing file is an empty state.
pub fn load_state(path: &Path) -> Result<AlertState> {
    if !path.exists() {
        return Ok(AlertState::default());
    }
    let content = std::fs::read_to_string(path)?;
    let envelope: PersistedAlertState =
        serde_json::from_str(&content).map_err(|e| Error::StateCorrupted {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    if envelope.schema_version != STATE_SCHEMA_VERSION {
        return Err(Error::StateCorrupted {
            path: path.display().to_string(),
            reason: format!("unsupported schema version {}", envelope.schema_version),
        });
    }
    Ok(envelope.state)
}

/// Persist arming state atomically: write a sibling temp file, then rename.
pub fn save_state(path: &Path, state: &AlertState) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let envelope = PersistedAlertState {
        schema_version: STATE_SCHEMA_VERSION.to_string(),
        updated_at: Utc::now(),
        state: state.clone(),
    };
    let content = serde_json::to_vec_pretty(&envelope)?;

    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(STATE_FILE_NAME);
    let tmp_path = path.with_file_name(format!("{}.tmp.{}", file_name, std::process::id()));
    {
        use std::io::Write;
        let mut file = std::fs::File::create(&tmp_path)?;
        file.write_all(&content)?;
        let _ = file.sync_all();
    }
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}
