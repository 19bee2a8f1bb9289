/// Outline Path Compiler
///
/// Walks a glyph's instructions and emits one surface operation per
/// instruction, in order, with every point mapped to device space.

use super::transform::Transform;
use super::{decode_instructions, DrawInstruction, Point, RawDrawInstruction};
use crate::error::RenderResult;

/// A vector drawing surface that accumulates a path.
pub trait PathSurface {
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn quadratic_curve_to(&mut self, c: Point, p: Point);
    fn cubic_curve_to(&mut self, c1: Point, c2: Point, p: Point);
    fn close_path(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);
}

/// Emit `instructions` onto `surface`. Returns the number of operations emitted.
pub fn compile_instructions<S: PathSurface + ?Sized>(
    instructions: &[DrawInstruction],
    transform: &Transform,
    surface: &mut S,
) -> usize {
    for inst in instructions {
        match *inst {
            DrawInstruction::MoveTo(p) => surface.move_to(transform.map_point(p)),
            DrawInstruction::LineTo(p) => surface.line_to(transform.map_point(p)),
            DrawInstruction::QuadTo(c, p) => {
                surface.quadratic_curve_to(transform.map_point(c), transform.map_point(p))
            }
            DrawInstruction::CurveTo(c1, c2, p) => surface.cubic_curve_to(
                transform.map_point(c1),
                transform.map_point(c2),
                transform.map_point(p),
            ),
            DrawInstruction::Close => surface.close_path(),
        }
    }
    instructions.len()
}

/// Decode a wire sequence, then compile it. Nothing is emitted if any tag is unknown.
pub fn compile_raw<S: PathSurface + ?Sized>(
    raw: &[RawDrawInstruction],
    transform: &Transform,
    surface: &mut S,
) -> RenderResult<usize> {
    let instructions = decode_instructions(raw)?;
    Ok(compile_instructions(&instructions, transform, surface))
}

// ========== Recording Surface ==========

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CurveTo(Point, Point, Point),
    Close,
    Fill,
    Stroke,
}

/// Keeps every operation it receives, in device space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSurface {
    pub ops: Vec<PathOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl PathSurface for RecordingSurface {
    fn move_to(&mut self, p: Point) {
        self.ops.push(PathOp::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.ops.push(PathOp::LineTo(p));
    }

    fn quadratic_curve_to(&mut self, c: Point, p: Point) {
        self.ops.push(PathOp::QuadTo(c, p));
    }

    fn cubic_curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.ops.push(PathOp::CurveTo(c1, c2, p));
    }

    fn close_path(&mut self) {
        self.ops.push(PathOp::Close);
    }

    fn fill(&mut self) {
        self.ops.push(PathOp::Fill);
    }

    fn stroke(&mut self) {
        self.ops.push(PathOp::Stroke);
    }
}
