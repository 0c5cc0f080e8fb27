// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Map entries.
//!
//! An entry is one named marker in the list panel. Its durable position is
//! the relative one; the absolute position is a cache that follows the
//! canvas size.

use super::color::HexColor;
use super::pin::{Pin, Point};

/// Stable identity of an entry for the lifetime of the process.
///
/// Labels may repeat, so every lookup goes through the id instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub(crate) u64);

/// One named marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub(crate) id: EntryId,
    pub text: String,
    pub visible: bool,
    pub color: HexColor,
    /// Fraction of the canvas width/height, each in [0, 1].
    pub relative_position: Option<Point>,
    /// Last known canvas coordinates.
    pub last_position: Option<Point>,
    /// Rendered marker, if any.
    pub pin: Option<Pin>,
}

impl Entry {
    pub(crate) fn new(id: EntryId, text: String, visible: bool, color: HexColor) -> Self {
        Self {
            id,
            text,
            visible,
            color,
            relative_position: None,
            last_position: None,
            pin: None,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn is_rendered(&self) -> bool {
        self.pin.is_some()
    }
}
