/// Glyph Outline Model
///
/// Design-unit drawing instructions as produced by the font engine,
/// the glyph outline that carries them, and the font-wide metrics
/// used to place outlines on a drawing surface.

pub mod compiler;
pub mod svg;
pub mod transform;

use wasm_bindgen::prelude::*;

use crate::error::{RenderError, RenderResult};

// ========== Points ==========

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add<Point> for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Self::Output {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub<Point> for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Self::Output {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Point {
    type Output = Point;

    fn mul(self, rhs: f32) -> Self::Output {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

// ========== Instructions ==========

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawInstruction {
    MoveTo(Point),
    LineTo(Point),
    /// Control point, end point.
    QuadTo(Point, Point),
    /// First control point, second control point, end point.
    CurveTo(Point, Point, Point),
    Close,
}

impl DrawInstruction {
    pub fn tag(&self) -> DrawInstructionTag {
        match self {
            DrawInstruction::MoveTo(_) => DrawInstructionTag::MoveTo,
            DrawInstruction::LineTo(_) => DrawInstructionTag::LineTo,
            DrawInstruction::QuadTo(..) => DrawInstructionTag::QuadTo,
            DrawInstruction::CurveTo(..) => DrawInstructionTag::CurveTo,
            DrawInstruction::Close => DrawInstructionTag::Close,
        }
    }
}

/// Numeric tag of the wire form shared with JS.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawInstructionTag {
    MoveTo = 0,
    LineTo = 1,
    QuadTo = 2,
    CurveTo = 3,
    Close = 4,
}

impl DrawInstructionTag {
    pub fn from_u32(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(DrawInstructionTag::MoveTo),
            1 => Some(DrawInstructionTag::LineTo),
            2 => Some(DrawInstructionTag::QuadTo),
            3 => Some(DrawInstructionTag::CurveTo),
            4 => Some(DrawInstructionTag::Close),
            _ => None,
        }
    }
}

/// Wire record: end point in `point`, controls in `control1`/`control2`,
/// unused slots zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawDrawInstruction {
    pub tag: u32,
    pub point: Point,
    pub control1: Point,
    pub control2: Point,
}

impl RawDrawInstruction {
    pub fn decode(&self) -> RenderResult<DrawInstruction> {
        let tag = DrawInstructionTag::from_u32(self.tag)
            .ok_or(RenderError::UnknownInstructionTag(self.tag))?;
        Ok(match tag {
            DrawInstructionTag::MoveTo => DrawInstruction::MoveTo(self.point),
            DrawInstructionTag::LineTo => DrawInstruction::LineTo(self.point),
            DrawInstructionTag::QuadTo => DrawInstruction::QuadTo(self.control1, self.point),
            DrawInstructionTag::CurveTo => {
                DrawInstruction::CurveTo(self.control1, self.control2, self.point)
            }
            DrawInstructionTag::Close => DrawInstruction::Close,
        })
    }
}

impl From<&DrawInstruction> for RawDrawInstruction {
    fn from(inst: &DrawInstruction) -> Self {
        let (point, control1, control2) = match *inst {
            DrawInstruction::MoveTo(p) | DrawInstruction::LineTo(p) => {
                (p, Point::zero(), Point::zero())
            }
            DrawInstruction::QuadTo(c, p) => (p, c, Point::zero()),
            DrawInstruction::CurveTo(c1, c2, p) => (p, c1, c2),
            DrawInstruction::Close => (Point::zero(), Point::zero(), Point::zero()),
        };
        Self {
            tag: inst.tag() as u32,
            point,
            control1,
            control2,
        }
    }
}

/// Decode a full wire sequence; the first unknown tag rejects the whole outline.
pub fn decode_instructions(raw: &[RawDrawInstruction]) -> RenderResult<Vec<DrawInstruction>> {
    raw.iter().map(RawDrawInstruction::decode).collect()
}

// ========== Glyph Types ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x_min: i16,
    pub x_max: i16,
    pub y_min: i16,
    pub y_max: i16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlyphOutline {
    pub instructions: Vec<DrawInstruction>,
    /// Design units the cursor moves after this glyph.
    pub advance_width: u16,
    pub left_side_bearing: Option<i16>,
    /// Tight ink bounds; `None` for empty glyphs such as space.
    pub bbox: Option<BoundingBox>,
}

impl GlyphOutline {
    pub fn new(instructions: Vec<DrawInstruction>, advance_width: u16) -> Self {
        Self {
            instructions,
            advance_width,
            left_side_bearing: None,
            bbox: None,
        }
    }

    /// An outline with no ink, only an advance.
    pub fn empty(advance_width: u16) -> Self {
        Self::new(Vec::new(), advance_width)
    }

    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

// ========== Font Metrics ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    pub units_per_em: u16,
    pub ascender: i16,
    pub descender: i16,
    pub capital_height: i16,
}

impl FontMetrics {
    /// Device height of one line, ascender to descender.
    pub fn line_height(&self, scale: f32) -> f32 {
        (self.ascender as f32 - self.descender as f32) * scale
    }

    /// Device distance from a line's top to its baseline.
    pub fn baseline_offset(&self, scale: f32) -> f32 {
        self.ascender as f32 * scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_tags() {
        let raw = RawDrawInstruction {
            tag: DrawInstructionTag::CurveTo as u32,
            point: Point::new(5.0, 6.0),
            control1: Point::new(1.0, 2.0),
            control2: Point::new(3.0, 4.0),
        };
        assert_eq!(
            raw.decode(),
            Ok(DrawInstruction::CurveTo(
                Point::new(1.0, 2.0),
                Point::new(3.0, 4.0),
                Point::new(5.0, 6.0)
            ))
        );

        let quad = RawDrawInstruction {
            tag: 2,
            point: Point::new(8.0, 9.0),
            control1: Point::new(7.0, 7.5),
            control2: Point::zero(),
        };
        assert_eq!(
            quad.decode(),
            Ok(DrawInstruction::QuadTo(Point::new(7.0, 7.5), Point::new(8.0, 9.0)))
        );
    }

    #[test]
    fn test_decode_unknown_tag() {
        let raw = RawDrawInstruction {
            tag: 7,
            point: Point::zero(),
            control1: Point::zero(),
            control2: Point::zero(),
        };
        assert_eq!(raw.decode(), Err(RenderError::UnknownInstructionTag(7)));
    }

    #[test]
    fn test_decode_rejects_whole_sequence() {
        let good = RawDrawInstruction::from(&DrawInstruction::MoveTo(Point::new(1.0, 1.0)));
        let bad = RawDrawInstruction { tag: 42, ..good };
        let close = RawDrawInstruction::from(&DrawInstruction::Close);
        assert_eq!(
            decode_instructions(&[good, bad, close]),
            Err(RenderError::UnknownInstructionTag(42))
        );
    }

    #[test]
    fn test_wire_form_matches_tag() {
        let inst = DrawInstruction::QuadTo(Point::new(1.0, 2.0), Point::new(3.0, 4.0));
        let raw = RawDrawInstruction::from(&inst);
        assert_eq!(raw.tag, 2);
        assert_eq!(raw.point, Point::new(3.0, 4.0));
        assert_eq!(raw.control1, Point::new(1.0, 2.0));
        assert_eq!(raw.control2, Point::zero());
    }

    #[test]
    fn test_line_height() {
        let metrics = FontMetrics {
            units_per_em: 1000,
            ascender: 750,
            descender: -250,
            capital_height: 700,
        };
        assert!((metrics.line_height(0.02) - 20.0).abs() < 1e-5);
        assert!((metrics.baseline_offset(0.02) - 15.0).abs() < 1e-5);
    }
}
