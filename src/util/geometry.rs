// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides coordinate transformations between canvas points
//! and normalized coordinates, plus the pin triangle math.

use crate::models::pin::{CanvasSize, Point};

/// Half of the pin's top edge.
pub const PIN_HALF_WIDTH: f64 = 7.0;

/// Pin height from top edge to tip.
pub const PIN_HEIGHT: f64 = 30.0;

/// Convert canvas coordinates to normalized coordinates (0.0 to 1.0).
pub fn normalize_coordinates(point: Point, size: CanvasSize) -> Point {
    Point {
        x: point.x / size.width,
        y: point.y / size.height,
    }
}

/// Convert normalized coordinates to canvas coordinates.
pub fn denormalize_coordinates(point: Point, size: CanvasSize) -> Point {
    Point {
        x: point.x * size.width,
        y: point.y * size.height,
    }
}

/// Clamp a normalized point into the unit square.
pub fn clamp_unit(point: Point) -> Point {
    Point::new(point.x.clamp(0.0, 1.0), point.y.clamp(0.0, 1.0))
}

/// Clamp a canvas point inside the canvas bounds.
pub fn clamp_to_canvas(point: Point, size: CanvasSize) -> Point {
    Point::new(
        point.x.clamp(0.0, size.width.max(0.0)),
        point.y.clamp(0.0, size.height.max(0.0)),
    )
}

/// Vertices of a downward-pointing pin whose centroid is `center`.
///
/// The top edge sits a third of the height above the center and the tip
/// two thirds below it.
pub fn pin_vertices(center: Point) -> [Point; 3] {
    let top = center.y - PIN_HEIGHT / 3.0;
    [
        Point::new(center.x, center.y + PIN_HEIGHT * 2.0 / 3.0),
        Point::new(center.x - PIN_HALF_WIDTH, top),
        Point::new(center.x + PIN_HALF_WIDTH, top),
    ]
}

pub fn centroid(vertices: &[Point; 3]) -> Point {
    Point::new(
        vertices.iter().map(|v| v.x).sum::<f64>() / 3.0,
        vertices.iter().map(|v| v.y).sum::<f64>() / 3.0,
    )
}

/// Point-in-triangle test; points on an edge count as inside.
pub fn triangle_contains(vertices: &[Point; 3], p: Point) -> bool {
    let [a, b, c] = *vertices;
    let cross = |o: Point, u: Point, v: Point| (u.x - o.x) * (v.y - o.y) - (u.y - o.y) * (v.x - o.x);

    let d1 = cross(a, b, p);
    let d2 = cross(b, c, p);
    let d3 = cross(c, a, p);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_denormalize_roundtrip() {
        let size = CanvasSize::new(1920.0, 1080.0);
        let pixel = Point::new(960.0, 540.0);

        let normalized = normalize_coordinates(pixel, size);
        let denorm = denormalize_coordinates(normalized, size);

        assert!((denorm.x - pixel.x).abs() < 0.0001);
        assert!((denorm.y - pixel.y).abs() < 0.0001);
    }

    #[test]
    fn test_normalize_corners() {
        let size = CanvasSize::new(1920.0, 1080.0);

        // Top-left corner
        let tl = normalize_coordinates(Point::new(0.0, 0.0), size);
        assert_eq!(tl.x, 0.0);
        assert_eq!(tl.y, 0.0);

        // Bottom-right corner
        let br = normalize_coordinates(Point::new(1920.0, 1080.0), size);
        assert_eq!(br.x, 1.0);
        assert_eq!(br.y, 1.0);
    }

    #[test]
    fn test_pin_vertices_centroid() {
        let center = Point::new(123.5, 77.25);
        let c = centroid(&pin_vertices(center));
        assert!((c.x - center.x).abs() < 1e-9);
        assert!((c.y - center.y).abs() < 1e-9);
    }

    #[test]
    fn test_triangle_contains() {
        let vertices = pin_vertices(Point::new(100.0, 100.0));
        assert!(triangle_contains(&vertices, Point::new(100.0, 100.0)));
        assert!(triangle_contains(&vertices, Point::new(100.0, 115.0)));
        assert!(!triangle_contains(&vertices, Point::new(100.0, 125.0)));
        assert!(!triangle_contains(&vertices, Point::new(110.0, 100.0)));
    }

    #[test]
    fn test_clamping() {
        let size = CanvasSize::new(100.0, 50.0);
        assert_eq!(clamp_to_canvas(Point::new(-5.0, 80.0), size), Point::new(0.0, 50.0));
        assert_eq!(clamp_unit(Point::new(1.5, -0.2)), Point::new(1.0, 0.0));
    }
}
