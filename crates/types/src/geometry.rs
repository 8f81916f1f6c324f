//! Geometry for outside-interaction detection.
//!
//! The render layer reports where the widget lives; the engine only needs to
//! answer "is this pointer inside the widget?".

use serde::{Deserialize, Serialize};

/// A point in the render surface's coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle. The left/top edges are inclusive and the
/// right/bottom edges exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.x + self.width && point.y >= self.y && point.y < self.y + self.height
    }
}

/// The area owned by one widget instance: the input field plus, while open,
/// the results surface.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetRegion {
    rects: Vec<Rect>,
}

impl WidgetRegion {
    pub fn new(rects: impl IntoIterator<Item = Rect>) -> Self {
        Self {
            rects: rects.into_iter().collect(),
        }
    }

    /// Region made of the input field and an optional dropdown area.
    pub fn from_parts(input: Rect, dropdown: Option<Rect>) -> Self {
        Self::new(std::iter::once(input).chain(dropdown))
    }

    pub fn contains(&self, point: Point) -> bool {
        self.rects.iter().any(|rect| rect.contains(point))
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

/// A document-level pointer interaction (a click or tap).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub position: Point,
}

impl PointerEvent {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges_are_half_open() {
        let rect = Rect::new(10.0, 10.0, 100.0, 20.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(109.9, 29.9)));
        assert!(!rect.contains(Point::new(110.0, 15.0)));
        assert!(!rect.contains(Point::new(50.0, 30.0)));
    }

    #[test]
    fn region_includes_dropdown_area() {
        let input = Rect::new(0.0, 0.0, 200.0, 45.0);
        let dropdown = Rect::new(0.0, 45.0, 200.0, 300.0);
        let region = WidgetRegion::from_parts(input, Some(dropdown));
        assert!(region.contains(Point::new(20.0, 20.0)));
        assert!(region.contains(Point::new(20.0, 200.0)));
        assert!(!region.contains(Point::new(250.0, 20.0)));
    }

    #[test]
    fn empty_region_contains_nothing() {
        let region = WidgetRegion::default();
        assert!(region.is_empty());
        assert!(!region.contains(Point::new(0.0, 0.0)));
    }
}
