// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for the map image and the state file.

pub mod media;
pub mod serialization;
