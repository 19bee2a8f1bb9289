use owned_ttf_parser as ttf;

use crate::outline::{DrawInstruction, Point};

/// Collects a glyph outline as design-unit instructions.
pub struct InstructionOutlineBuilder {
    pub instructions: Vec<DrawInstruction>,
}

impl InstructionOutlineBuilder {
    pub fn new() -> Self {
        Self {
            instructions: Vec::new(),
        }
    }
}

impl ttf::OutlineBuilder for InstructionOutlineBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.instructions.push(DrawInstruction::MoveTo(Point::new(x, y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.instructions.push(DrawInstruction::LineTo(Point::new(x, y)));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.instructions
            .push(DrawInstruction::QuadTo(Point::new(x1, y1), Point::new(x, y)));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.instructions.push(DrawInstruction::CurveTo(
            Point::new(x1, y1),
            Point::new(x2, y2),
            Point::new(x, y),
        ));
    }

    fn close(&mut self) {
        self.instructions.push(DrawInstruction::Close);
    }
}
