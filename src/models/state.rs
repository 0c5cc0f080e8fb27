// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Persisted state records.
//!
//! The state file is a JSON array with one object per entry, in list order.

use super::color::HexColor;
use serde::{Deserialize, Serialize};

/// Position written when an entry never had one.
pub const UNSET_POSITION: [f64; 2] = [0.5, 0.5];

/// One entry as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedEntry {
    pub text: String,
    /// Whether the pin is shown.
    pub checked: bool,
    pub color: HexColor,
    #[serde(default)]
    pub rel_pos: Option<[f64; 2]>,
    #[serde(default)]
    pub last_pos: Option<[f64; 2]>,
}

/// The complete ordered entry list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersistedState {
    pub entries: Vec<PersistedEntry>,
}

impl PersistedState {
    pub fn new(entries: Vec<PersistedEntry>) -> Self {
        Self { entries }
    }
}
