// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for map entries, pins and the persisted state.

pub mod color;
pub mod entry;
pub mod pin;
pub mod state;
