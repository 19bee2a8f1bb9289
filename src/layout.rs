/// Text run layout: places one outline per character along a line,
/// wrapping greedily to a configured width.

use log::debug;

use crate::error::RenderResult;
use crate::font::{FontEngine, FontHandle};
use crate::outline::{
    compiler::{compile_instructions, PathSurface},
    transform::Transform,
    FontMetrics, GlyphOutline, Point,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Requested em size in device pixels.
    pub font_size: f32,
    /// Line width in device pixels; `None` means lines never wrap.
    pub wrap_width: Option<f32>,
}

impl LayoutConfig {
    pub fn new(font_size: f32) -> Self {
        Self {
            font_size,
            wrap_width: None,
        }
    }

    /// Zero, negative, NaN and infinite widths all disable wrapping.
    pub fn with_wrap_width(mut self, wrap_width: Option<f32>) -> Self {
        self.wrap_width = wrap_width.filter(|w| w.is_finite() && *w > 0.0);
        self
    }
}

/// Pen position within a single layout pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutCursor {
    /// Horizontal offset within the current line.
    pub left: f32,
    /// Vertical offset accumulated by wraps.
    pub top: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPlacement {
    /// Index of the glyph in the run.
    pub index: usize,
    /// Zero-based line number.
    pub line: usize,
    /// Device position of the glyph origin (baseline, left edge).
    pub anchor: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub placements: Vec<GlyphPlacement>,
    /// Cursor after the last glyph.
    pub cursor: LayoutCursor,
    pub line_count: usize,
    pub scale: f32,
}

impl TextLayout {
    /// Device extent of the run: widest line and total height of all lines.
    pub fn bounds(&self, glyphs: &[GlyphOutline], line_height: f32) -> (f32, f32) {
        let mut width: f32 = 0.0;
        for (placement, glyph) in self.placements.iter().zip(glyphs) {
            let right = placement.anchor.x + glyph.advance_width as f32 * self.scale;
            width = width.max(right);
        }
        (width, self.line_count as f32 * line_height)
    }
}

/// Position every glyph without drawing anything.
pub fn layout_glyphs(
    glyphs: &[GlyphOutline],
    metrics: &FontMetrics,
    config: &LayoutConfig,
) -> RenderResult<TextLayout> {
    run_layout(glyphs, metrics, config, |_, _| {})
}

/// Position every glyph and compile it onto `surface` as one path.
/// Filling and stroking are left to the caller.
pub fn draw_glyphs<S: PathSurface + ?Sized>(
    glyphs: &[GlyphOutline],
    metrics: &FontMetrics,
    config: &LayoutConfig,
    surface: &mut S,
) -> RenderResult<TextLayout> {
    run_layout(glyphs, metrics, config, |glyph, transform| {
        compile_instructions(&glyph.instructions, transform, surface);
    })
}

/// Fetch outlines for `text` from `engine` and draw them onto `surface`.
pub fn draw_text<E: FontEngine + ?Sized, S: PathSurface + ?Sized>(
    engine: &E,
    handle: FontHandle,
    text: &str,
    config: &LayoutConfig,
    surface: &mut S,
) -> RenderResult<TextLayout> {
    let metrics = engine.metrics(handle)?;
    let glyphs = engine.render_string(handle, text)?;
    draw_glyphs(&glyphs, &metrics, config, surface)
}

fn run_layout<F>(
    glyphs: &[GlyphOutline],
    metrics: &FontMetrics,
    config: &LayoutConfig,
    mut emit: F,
) -> RenderResult<TextLayout>
where
    F: FnMut(&GlyphOutline, &Transform),
{
    let base = Transform::new(config.font_size, metrics.units_per_em, Point::zero())?;
    let scale = base.scale();
    let line_height = metrics.line_height(scale);
    let baseline = metrics.baseline_offset(scale);

    let mut cursor = LayoutCursor::default();
    let mut line = 0;
    let mut placements = Vec::with_capacity(glyphs.len());

    for (index, glyph) in glyphs.iter().enumerate() {
        if let Some(wrap_width) = config.wrap_width {
            if cursor.left >= wrap_width {
                debug!(
                    "Wrapping before glyph {} at left={} (wrap width {})",
                    index, cursor.left, wrap_width
                );
                cursor.left = 0.0;
                cursor.top += line_height;
                line += 1;
            }
        }

        let anchor = Point::new(cursor.left, cursor.top + baseline);
        emit(glyph, &base.anchored_at(anchor));
        placements.push(GlyphPlacement {
            index,
            line,
            anchor,
        });

        cursor.left += glyph.advance_width as f32 * scale;
    }

    Ok(TextLayout {
        placements,
        cursor,
        line_count: if glyphs.is_empty() { 0 } else { line + 1 },
        scale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use crate::outline::compiler::{PathOp, RecordingSurface};
    use crate::outline::DrawInstruction;

    fn metrics() -> FontMetrics {
        FontMetrics {
            units_per_em: 1000,
            ascender: 750,
            descender: -250,
            capital_height: 700,
        }
    }

    fn square(advance: u16) -> GlyphOutline {
        GlyphOutline::new(
            vec![
                DrawInstruction::MoveTo(Point::new(0.0, 0.0)),
                DrawInstruction::LineTo(Point::new(500.0, 0.0)),
                DrawInstruction::LineTo(Point::new(500.0, 500.0)),
                DrawInstruction::Close,
            ],
            advance,
        )
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_advance_accumulation() {
        let glyphs = vec![square(500), square(520), square(480)];
        let layout = layout_glyphs(&glyphs, &metrics(), &LayoutConfig::new(20.0)).unwrap();

        let lefts: Vec<f32> = layout.placements.iter().map(|p| p.anchor.x).collect();
        assert!(approx(lefts[0], 0.0));
        assert!(approx(lefts[1], 10.0));
        assert!(approx(lefts[2], 20.4));
        assert!(layout.placements.iter().all(|p| approx(p.anchor.y, 15.0)));
        assert!(approx(layout.cursor.left, 30.0));
        assert_eq!(layout.line_count, 1);
    }

    #[test]
    fn test_wrap_example() {
        let glyphs = vec![square(500), square(520), square(500)];
        let config = LayoutConfig::new(20.0).with_wrap_width(Some(15.0));
        let layout = layout_glyphs(&glyphs, &metrics(), &config).unwrap();

        // 0 and 10 are both below 15, so the first two share a line.
        assert_eq!(layout.placements[1].line, 0);
        let third = layout.placements[2];
        assert_eq!(third.line, 1);
        assert!(approx(third.anchor.x, 0.0));
        // top 20 plus baseline 15
        assert!(approx(third.anchor.y, 35.0));
        assert!(approx(layout.cursor.top, 20.0));
        assert_eq!(layout.line_count, 2);
    }

    #[test]
    fn test_wrap_at_exact_width() {
        let glyphs = vec![square(500), square(500)];
        let config = LayoutConfig::new(20.0).with_wrap_width(Some(10.0));
        let layout = layout_glyphs(&glyphs, &metrics(), &config).unwrap();
        assert_eq!(layout.placements[1].line, 1);
        assert!(approx(layout.placements[1].anchor.x, 0.0));
    }

    #[test]
    fn test_wide_glyph_keeps_own_line() {
        let glyphs = vec![square(2000), square(2000)];
        let config = LayoutConfig::new(20.0).with_wrap_width(Some(15.0));
        let layout = layout_glyphs(&glyphs, &metrics(), &config).unwrap();
        // The first glyph is 40px wide and still drawn at the line start.
        assert!(approx(layout.placements[0].anchor.x, 0.0));
        assert_eq!(layout.placements[0].line, 0);
        assert!(approx(layout.placements[1].anchor.x, 0.0));
        assert_eq!(layout.placements[1].line, 1);
    }

    #[test]
    fn test_wrap_disabled_values() {
        for width in [None, Some(0.0), Some(-5.0), Some(f32::INFINITY), Some(f32::NAN)] {
            let config = LayoutConfig::new(20.0).with_wrap_width(width);
            assert_eq!(config.wrap_width, None);
        }
        assert_eq!(
            LayoutConfig::new(20.0).with_wrap_width(Some(12.0)).wrap_width,
            Some(12.0)
        );
    }

    #[test]
    fn test_empty_glyph_advances_without_ops() {
        let glyphs = vec![GlyphOutline::empty(250)];
        let mut surface = RecordingSurface::new();
        let layout = draw_glyphs(&glyphs, &metrics(), &LayoutConfig::new(20.0), &mut surface)
            .unwrap();
        assert!(surface.is_empty());
        assert!(approx(layout.cursor.left, 5.0));
        assert_eq!(layout.cursor.top, 0.0);
    }

    #[test]
    fn test_draw_second_glyph_offset() {
        let glyphs = vec![square(500), square(520)];
        let mut surface = RecordingSurface::new();
        draw_glyphs(&glyphs, &metrics(), &LayoutConfig::new(20.0), &mut surface).unwrap();

        assert_eq!(surface.len(), 8);
        assert_eq!(surface.ops[4], PathOp::MoveTo(Point::new(10.0, 15.0)));
        assert_eq!(surface.ops[5], PathOp::LineTo(Point::new(20.0, 15.0)));
        assert_eq!(surface.ops[7], PathOp::Close);
    }

    #[test]
    fn test_idempotent() {
        let glyphs = vec![square(500), GlyphOutline::empty(300), square(520), square(500)];
        let config = LayoutConfig::new(20.0).with_wrap_width(Some(15.0));

        let mut first = RecordingSurface::new();
        let mut second = RecordingSurface::new();
        let a = draw_glyphs(&glyphs, &metrics(), &config, &mut first).unwrap();
        let b = draw_glyphs(&glyphs, &metrics(), &config, &mut second).unwrap();
        assert_eq!(first, second);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_upm_aborts() {
        let mut bad = metrics();
        bad.units_per_em = 0;
        let mut surface = RecordingSurface::new();
        let result = draw_glyphs(&[square(500)], &bad, &LayoutConfig::new(20.0), &mut surface);
        assert_eq!(result, Err(RenderError::ZeroUnitsPerEm));
        assert!(surface.is_empty());
    }

    #[test]
    fn test_empty_run() {
        let layout = layout_glyphs(&[], &metrics(), &LayoutConfig::new(20.0)).unwrap();
        assert!(layout.placements.is_empty());
        assert_eq!(layout.line_count, 0);
        assert_eq!(layout.cursor, LayoutCursor::default());
    }

    #[test]
    fn test_bounds() {
        let glyphs = vec![square(500), square(520), square(500)];
        let config = LayoutConfig::new(20.0).with_wrap_width(Some(15.0));
        let layout = layout_glyphs(&glyphs, &metrics(), &config).unwrap();
        let (width, height) = layout.bounds(&glyphs, metrics().line_height(layout.scale));
        assert!(approx(width, 20.4));
        assert!(approx(height, 40.0));
    }
}
