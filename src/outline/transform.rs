/// Design-unit to device-pixel mapping.
///
/// Font space is y-up, the drawing surface is y-down; every point,
/// on-curve or control, goes through `map_point` so the flip is never
/// applied to one kind and skipped for another.

use super::Point;
use crate::error::{RenderError, RenderResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    scale: f32,
    anchor: Point,
}

impl Transform {
    /// Pixels per design unit for the requested size.
    pub fn scale_for(font_size_px: f32, units_per_em: u16) -> RenderResult<f32> {
        if units_per_em == 0 {
            return Err(RenderError::ZeroUnitsPerEm);
        }
        if !font_size_px.is_finite() || font_size_px < 0.0 {
            return Err(RenderError::InvalidFontSize(font_size_px));
        }
        Ok(font_size_px / units_per_em as f32)
    }

    /// `anchor` is where the glyph origin (baseline, left edge) lands in device space.
    pub fn new(font_size_px: f32, units_per_em: u16, anchor: Point) -> RenderResult<Self> {
        let scale = Self::scale_for(font_size_px, units_per_em)?;
        Ok(Self::from_scale(scale, anchor))
    }

    pub fn from_scale(scale: f32, anchor: Point) -> Self {
        Self { scale, anchor }
    }

    /// Same scale, different origin.
    pub fn anchored_at(&self, anchor: Point) -> Self {
        Self {
            scale: self.scale,
            anchor,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn map_x(&self, x: f32) -> f32 {
        self.anchor.x + x * self.scale
    }

    pub fn map_y(&self, y: f32) -> f32 {
        self.anchor.y - y * self.scale
    }

    pub fn map_point(&self, p: Point) -> Point {
        Point::new(self.map_x(p.x), self.map_y(p.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point_eq(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_scale_for() {
        assert_eq!(Transform::scale_for(20.0, 1000), Ok(0.02));
        assert_eq!(
            Transform::scale_for(20.0, 0),
            Err(RenderError::ZeroUnitsPerEm)
        );
        assert!(matches!(
            Transform::scale_for(f32::NAN, 1000),
            Err(RenderError::InvalidFontSize(_))
        ));
        assert_eq!(
            Transform::scale_for(-1.0, 1000),
            Err(RenderError::InvalidFontSize(-1.0))
        );
    }

    #[test]
    fn test_origin_maps_to_anchor() {
        let anchor = Point::new(12.5, 40.0);
        let t = Transform::new(32.0, 2048, anchor).unwrap();
        assert_eq!(t.map_point(Point::zero()), anchor);
    }

    #[test]
    fn test_flip() {
        let t = Transform::new(20.0, 1000, Point::new(0.0, 15.0)).unwrap();
        let low = t.map_point(Point::new(100.0, 0.0));
        let high = t.map_point(Point::new(100.0, 500.0));
        assert!(high.y < low.y);
        assert_eq!(low.x, high.x);
    }

    #[test]
    fn test_affine() {
        let t = Transform::new(20.0, 1000, Point::new(3.0, 15.0)).unwrap();
        let a = Point::new(100.0, -40.0);
        let b = Point::new(-250.0, 600.0);
        let origin = t.map_point(Point::zero());
        // f(a + b) - f(0) == (f(a) - f(0)) + (f(b) - f(0))
        let lhs = t.map_point(a + b) - origin;
        let rhs = (t.map_point(a) - origin) + (t.map_point(b) - origin);
        assert_point_eq(lhs, rhs);
    }

    #[test]
    fn test_example_points() {
        let t = Transform::new(20.0, 1000, Point::new(0.0, 15.0)).unwrap();
        assert_point_eq(t.map_point(Point::new(0.0, 0.0)), Point::new(0.0, 15.0));
        assert_point_eq(t.map_point(Point::new(500.0, 0.0)), Point::new(10.0, 15.0));
        assert_point_eq(t.map_point(Point::new(500.0, 500.0)), Point::new(10.0, 5.0));
    }

    #[test]
    fn test_anchored_at_keeps_scale() {
        let t = Transform::from_scale(0.5, Point::zero());
        let moved = t.anchored_at(Point::new(10.0, 10.0));
        assert_eq!(moved.scale(), 0.5);
        assert_eq!(moved.map_point(Point::new(2.0, 2.0)), Point::new(11.0, 9.0));
    }
}
