/// SVG path data surface.

use std::fmt::{self, Write};

use super::compiler::PathSurface;
use super::Point;

/// Builds the `d` attribute of an SVG `<path>`. Fill and stroke are
/// properties of the element, not the data, so they emit nothing.
#[derive(Debug, Clone, Default)]
pub struct SvgPathSurface {
    data: String,
    precision: Option<usize>,
}

impl SvgPathSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print coordinates with a fixed number of digits after the decimal point.
    pub fn with_precision(precision: usize) -> Self {
        Self {
            data: String::new(),
            precision: Some(precision),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.data
    }

    pub fn into_string(self) -> String {
        self.data
    }

    fn push_command(&mut self, cmd: char, points: &[Point]) {
        if !self.data.is_empty() {
            self.data.push(' ');
        }
        self.data.push(cmd);
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                self.data.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = match self.precision {
                Some(prec) => write!(self.data, "{:.*},{:.*}", prec, p.x, prec, p.y),
                None => write!(self.data, "{},{}", p.x, p.y),
            };
        }
    }
}

impl PathSurface for SvgPathSurface {
    fn move_to(&mut self, p: Point) {
        self.push_command('M', &[p]);
    }

    fn line_to(&mut self, p: Point) {
        self.push_command('L', &[p]);
    }

    fn quadratic_curve_to(&mut self, c: Point, p: Point) {
        self.push_command('Q', &[c, p]);
    }

    fn cubic_curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.push_command('C', &[c1, c2, p]);
    }

    fn close_path(&mut self) {
        self.push_command('Z', &[]);
    }

    fn fill(&mut self) {}

    fn stroke(&mut self) {}
}

impl fmt::Display for SvgPathSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}
