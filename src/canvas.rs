use log::warn;
use web_sys::CanvasRenderingContext2d;

use crate::error::RenderResult;
use crate::font::{FontEngine, FontHandle};
use crate::layout::{draw_text, LayoutConfig, TextLayout};
use crate::outline::{
    compiler::{compile_instructions, PathSurface},
    transform::Transform,
    GlyphOutline, Point,
};
use crate::overlay::{DeviceRect, OverlayKind, OverlayLine};

const COLOR_AXIS: &str = "#e0e0e0";
const COLOR_METRIC: &str = "#ebcc34";
const COLOR_BOUNDS: &str = "#05a3ff";

impl PathSurface for CanvasRenderingContext2d {
    fn move_to(&mut self, p: Point) {
        CanvasRenderingContext2d::move_to(self, p.x as f64, p.y as f64);
    }

    fn line_to(&mut self, p: Point) {
        CanvasRenderingContext2d::line_to(self, p.x as f64, p.y as f64);
    }

    fn quadratic_curve_to(&mut self, c: Point, p: Point) {
        CanvasRenderingContext2d::quadratic_curve_to(
            self,
            c.x as f64,
            c.y as f64,
            p.x as f64,
            p.y as f64,
        );
    }

    fn cubic_curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.bezier_curve_to(
            c1.x as f64,
            c1.y as f64,
            c2.x as f64,
            c2.y as f64,
            p.x as f64,
            p.y as f64,
        );
    }

    fn close_path(&mut self) {
        CanvasRenderingContext2d::close_path(self);
    }

    fn fill(&mut self) {
        CanvasRenderingContext2d::fill(self);
    }

    fn stroke(&mut self) {
        CanvasRenderingContext2d::stroke(self);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub fill: String,
    pub stroke: Option<String>,
    pub line_width: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            fill: "#808080".to_string(),
            stroke: Some("black".to_string()),
            line_width: 1.0,
        }
    }
}

pub fn overlay_color(kind: OverlayKind) -> &'static str {
    match kind {
        OverlayKind::Baseline => COLOR_AXIS,
        OverlayKind::Ascender | OverlayKind::Descender | OverlayKind::CapitalHeight => {
            COLOR_METRIC
        }
        _ => COLOR_BOUNDS,
    }
}

/// Lay out `text` as a single path, then fill and stroke it once.
pub fn draw_text_run<E: FontEngine + ?Sized>(
    ctx: &CanvasRenderingContext2d,
    engine: &E,
    handle: FontHandle,
    text: &str,
    config: &LayoutConfig,
    style: &TextStyle,
) -> RenderResult<TextLayout> {
    // web-sys methods take &self, so a clone of the handle is the surface.
    let mut surface = ctx.clone();
    surface.begin_path();
    let layout = draw_text(engine, handle, text, config, &mut surface).map_err(|err| {
        warn!("Text run of {} chars not drawn: {}", text.chars().count(), err);
        err
    })?;

    paint_path(&mut surface, style);
    Ok(layout)
}

/// Compile one glyph outline as its own path and paint it.
pub fn draw_glyph(
    ctx: &CanvasRenderingContext2d,
    glyph: &GlyphOutline,
    transform: &Transform,
    style: &TextStyle,
) {
    let mut surface = ctx.clone();
    surface.begin_path();
    compile_instructions(&glyph.instructions, transform, &mut surface);
    paint_path(&mut surface, style);
}

fn paint_path(ctx: &mut CanvasRenderingContext2d, style: &TextStyle) {
    ctx.set_fill_style_str(&style.fill);
    PathSurface::fill(ctx);
    if let Some(stroke) = &style.stroke {
        ctx.set_stroke_style_str(stroke);
        ctx.set_line_width(style.line_width);
        PathSurface::stroke(ctx);
    }
}

pub fn draw_overlay(ctx: &CanvasRenderingContext2d, lines: &[OverlayLine]) {
    ctx.save();
    ctx.set_line_width(1.0);
    for line in lines {
        ctx.begin_path();
        ctx.set_stroke_style_str(overlay_color(line.kind));
        ctx.move_to(line.from.x as f64, line.from.y as f64);
        ctx.line_to(line.to.x as f64, line.to.y as f64);
        ctx.stroke();
    }
    ctx.restore();
}

/// Outline the glyph's ink rectangle.
pub fn draw_bounds_rect(ctx: &CanvasRenderingContext2d, rect: &DeviceRect) {
    ctx.save();
    ctx.set_line_width(1.0);
    ctx.set_stroke_style_str(COLOR_BOUNDS);
    ctx.stroke_rect(
        rect.left as f64,
        rect.top as f64,
        rect.width() as f64,
        rect.height() as f64,
    );
    ctx.restore();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_colors() {
        assert_eq!(overlay_color(OverlayKind::Baseline), COLOR_AXIS);
        assert_eq!(overlay_color(OverlayKind::CapitalHeight), COLOR_METRIC);
        assert_eq!(overlay_color(OverlayKind::BoundsLeft), COLOR_BOUNDS);
    }

    #[test]
    fn test_default_style() {
        let style = TextStyle::default();
        assert_eq!(style.fill, "#808080");
        assert_eq!(style.stroke.as_deref(), Some("black"));
    }
}
