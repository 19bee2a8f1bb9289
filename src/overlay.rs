/// Diagnostic reference geometry for a glyph: metric lines and ink bounds.

use crate::outline::{transform::Transform, BoundingBox, FontMetrics, GlyphOutline, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Baseline,
    Ascender,
    Descender,
    CapitalHeight,
    BoundsTop,
    BoundsBottom,
    BoundsLeft,
    BoundsRight,
}

impl OverlayKind {
    pub fn is_bounds(&self) -> bool {
        matches!(
            self,
            OverlayKind::BoundsTop
                | OverlayKind::BoundsBottom
                | OverlayKind::BoundsLeft
                | OverlayKind::BoundsRight
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLine {
    pub kind: OverlayKind,
    pub from: Point,
    pub to: Point,
}

/// Device-space rectangle, y-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl DeviceRect {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Device-space span covered by reference lines: horizontal lines run
/// `left..right`, vertical lines run `top..bottom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayExtent {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl OverlayExtent {
    /// The glyph's advance box from descender to ascender, grown to
    /// contain its ink when it has any.
    pub fn for_glyph(glyph: &GlyphOutline, metrics: &FontMetrics, transform: &Transform) -> Self {
        let mut x_min = 0.0f32;
        let mut x_max = glyph.advance_width as f32;
        let mut y_min = metrics.descender as f32;
        let mut y_max = metrics.ascender as f32;
        if let Some(bbox) = &glyph.bbox {
            x_min = x_min.min(bbox.x_min as f32);
            x_max = x_max.max(bbox.x_max as f32);
            y_min = y_min.min(bbox.y_min as f32);
            y_max = y_max.max(bbox.y_max as f32);
        }
        Self {
            left: transform.map_x(x_min),
            right: transform.map_x(x_max),
            top: transform.map_y(y_max),
            bottom: transform.map_y(y_min),
        }
    }
}

fn horizontal(kind: OverlayKind, y: f32, transform: &Transform, extent: &OverlayExtent) -> OverlayLine {
    let y = transform.map_y(y);
    OverlayLine {
        kind,
        from: Point::new(extent.left, y),
        to: Point::new(extent.right, y),
    }
}

fn vertical(kind: OverlayKind, x: f32, transform: &Transform, extent: &OverlayExtent) -> OverlayLine {
    let x = transform.map_x(x);
    OverlayLine {
        kind,
        from: Point::new(x, extent.top),
        to: Point::new(x, extent.bottom),
    }
}

/// Reference lines for `metrics`, plus the four ink-bound lines when `bbox` is present.
pub fn metric_overlay(
    metrics: &FontMetrics,
    bbox: Option<&BoundingBox>,
    transform: &Transform,
    extent: &OverlayExtent,
) -> Vec<OverlayLine> {
    let mut lines = vec![
        horizontal(OverlayKind::Baseline, 0.0, transform, extent),
        horizontal(OverlayKind::Ascender, metrics.ascender as f32, transform, extent),
        horizontal(OverlayKind::Descender, metrics.descender as f32, transform, extent),
        horizontal(OverlayKind::CapitalHeight, metrics.capital_height as f32, transform, extent),
    ];

    if let Some(bbox) = bbox {
        lines.push(horizontal(OverlayKind::BoundsTop, bbox.y_max as f32, transform, extent));
        lines.push(horizontal(OverlayKind::BoundsBottom, bbox.y_min as f32, transform, extent));
        lines.push(vertical(OverlayKind::BoundsLeft, bbox.x_min as f32, transform, extent));
        lines.push(vertical(OverlayKind::BoundsRight, bbox.x_max as f32, transform, extent));
    }

    lines
}

pub fn bounds_rect(bbox: &BoundingBox, transform: &Transform) -> DeviceRect {
    DeviceRect {
        left: transform.map_x(bbox.x_min as f32),
        top: transform.map_y(bbox.y_max as f32),
        right: transform.map_x(bbox.x_max as f32),
        bottom: transform.map_y(bbox.y_min as f32),
    }
}
