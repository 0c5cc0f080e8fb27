// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pin geometry.
//!
//! A pin is the rendered marker of an entry: a small downward triangle
//! whose centroid sits on the marked location. Positions are canvas
//! coordinates in points, with the origin at the canvas top-left.

use super::color::HexColor;
use crate::util::geometry;

/// Smallest canvas extent (either axis) considered laid out.
pub const MIN_CANVAS_EXTENT: f64 = 10.0;

/// A 2D point, in canvas points or as a fraction of the canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for [f64; 2] {
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}

/// Current size of the map canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether the canvas has been laid out with a usable size.
    pub fn is_valid(&self) -> bool {
        self.width >= MIN_CANVAS_EXTENT && self.height >= MIN_CANVAS_EXTENT
    }
}

/// A rendered marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    vertices: [Point; 3],
    pub fill: HexColor,
}

impl Pin {
    /// Build a pin whose centroid is `center`.
    pub fn new(center: Point, fill: HexColor) -> Self {
        Self {
            vertices: geometry::pin_vertices(center),
            fill,
        }
    }

    pub fn vertices(&self) -> &[Point; 3] {
        &self.vertices
    }

    /// Center of mass of the rendered triangle.
    pub fn centroid(&self) -> Point {
        geometry::centroid(&self.vertices)
    }

    /// Shift every vertex by (dx, dy).
    pub fn translate(&mut self, dx: f64, dy: f64) {
        for vertex in &mut self.vertices {
            *vertex = vertex.offset(dx, dy);
        }
    }

    /// Rebuild the geometry around a new centroid.
    pub fn move_to(&mut self, center: Point) {
        self.vertices = geometry::pin_vertices(center);
    }

    pub fn contains(&self, point: Point) -> bool {
        geometry::triangle_contains(&self.vertices, point)
    }
}
