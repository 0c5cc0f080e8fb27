// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! State file serialization and export.
//!
//! The state file is JSON and is overwritten in place at every checkpoint.
//! The same record can be exported as JSON or YAML to a chosen path.

use crate::models::state::PersistedState;
use anyhow::{Context, Result};
use std::path::Path;

/// Read the state file. A missing file means there is no saved state yet.
pub fn read_state(path: &Path) -> Result<Option<PersistedState>> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
    };
    let state = serde_json::from_str(&json)
        .with_context(|| format!("Malformed state file {}", path.display()))?;
    Ok(Some(state))
}

/// Overwrite the state file with the given record.
pub fn write_state(state: &PersistedState, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    log::debug!("Saved {} entries to {}", state.entries.len(), path.display());
    Ok(())
}

/// Export state to YAML format.
pub fn export_yaml(state: &PersistedState, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(state)?;
    std::fs::write(path, yaml).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Export state to JSON format.
pub fn export_json(state: &PersistedState, path: &Path) -> Result<()> {
    write_state(state, path)
}
