// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the pin map.

pub mod canvas;
pub mod color_dialog;
pub mod entry_list;
