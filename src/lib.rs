pub mod canvas;
pub mod error;
pub mod font;
pub mod js_api;
pub mod layout;
pub mod outline;
pub mod overlay;
pub mod utils;

use js_api::{commands_from_js, JsBridgeTextOps, ToJsValue};
use utils::{init_logging, set_panic_hook};
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

use canvas::{draw_bounds_rect, draw_glyph, draw_overlay, draw_text_run, TextStyle};
use error::RenderError;
use font::{with_font_manager, with_font_manager_mut, FontEngine, FontHandle};
use layout::{draw_glyphs, draw_text as layout_draw_text, LayoutConfig};
use outline::{
    compiler::{compile_raw, RecordingSurface},
    svg::SvgPathSurface,
    transform::Transform,
    Point,
};
use overlay::{bounds_rect, metric_overlay, OverlayExtent};

fn layout_config(font_size: f32, wrap_width: Option<f32>) -> LayoutConfig {
    LayoutConfig::new(font_size).with_wrap_width(wrap_width)
}

#[wasm_bindgen]
pub fn fm_create(font_data: Vec<u8>) -> Result<FontHandle, JsValue> {
    Ok(with_font_manager_mut(|manager| manager.create_font_handle(font_data))?)
}

#[wasm_bindgen]
pub fn fm_dispose(handle: FontHandle) -> Result<(), JsValue> {
    Ok(with_font_manager_mut(|manager| manager.dispose(handle))?)
}

#[wasm_bindgen]
pub fn fm_metrics(handle: FontHandle) -> Result<JsValue, JsValue> {
    let metrics = with_font_manager(|manager| manager.metrics(handle))?;
    Ok(metrics.to_js_value())
}

#[wasm_bindgen]
pub fn fm_render_char(handle: FontHandle, ch: char) -> Result<JsValue, JsValue> {
    let glyph = with_font_manager(|manager| manager.render_char(handle, ch))?;
    Ok(glyph.to_js_value())
}

#[wasm_bindgen]
pub fn fm_render_string(handle: FontHandle, text: &str) -> Result<JsValue, JsValue> {
    let glyphs = with_font_manager(|manager| manager.render_string(handle, text))?;
    Ok(glyphs.to_js_value())
}

/// Compile an outline object (as returned by `fm_render_char`) into device
/// path ops, scaled for `handle`'s em square and anchored at the given point.
#[wasm_bindgen]
pub fn fm_compile_outline(
    handle: FontHandle,
    outline: JsValue,
    font_size: f32,
    anchor_x: f32,
    anchor_y: f32,
) -> Result<JsValue, JsValue> {
    let metrics = with_font_manager(|manager| manager.metrics(handle))?;
    let transform = Transform::new(
        font_size,
        metrics.units_per_em,
        Point::new(anchor_x, anchor_y),
    )?;

    let raw = commands_from_js(&outline);
    let mut surface = RecordingSurface::new();
    compile_raw(&raw, &transform, &mut surface)?;
    Ok(surface.ops.to_js_value())
}

#[wasm_bindgen]
pub fn layout_text_ops(
    handle: FontHandle,
    text: &str,
    font_size: f32,
    wrap_width: Option<f32>,
) -> Result<JsValue, JsValue> {
    let config = layout_config(font_size, wrap_width);
    let (metrics, glyphs) = with_font_manager(|manager| {
        Ok::<_, RenderError>((manager.metrics(handle)?, manager.render_string(handle, text)?))
    })?;

    let mut surface = RecordingSurface::new();
    let layout = draw_glyphs(&glyphs, &metrics, &config, &mut surface)?;
    let (width, height) = layout.bounds(&glyphs, metrics.line_height(layout.scale));
    Ok(JsBridgeTextOps {
        ops: surface.ops,
        layout,
        width,
        height,
    }
    .to_js_value())
}

#[wasm_bindgen]
pub fn text_to_svg_path(
    handle: FontHandle,
    text: &str,
    font_size: f32,
    wrap_width: Option<f32>,
) -> Result<String, JsValue> {
    let config = layout_config(font_size, wrap_width);
    let mut surface = SvgPathSurface::new();
    with_font_manager(|manager| layout_draw_text(manager, handle, text, &config, &mut surface))?;
    Ok(surface.into_string())
}

#[wasm_bindgen]
pub fn draw_text(
    ctx: &CanvasRenderingContext2d,
    handle: FontHandle,
    text: &str,
    font_size: f32,
    wrap_width: Option<f32>,
) -> Result<(), JsValue> {
    let config = layout_config(font_size, wrap_width);
    let style = TextStyle::default();
    with_font_manager(|manager| draw_text_run(ctx, manager, handle, text, &config, &style))?;
    Ok(())
}

/// Draw a single glyph with its metric lines and ink bounds, glyph origin at
/// (`origin_x`, `origin_y`) in device space.
#[wasm_bindgen]
pub fn draw_glyph_inspector(
    ctx: &CanvasRenderingContext2d,
    handle: FontHandle,
    ch: char,
    font_size: f32,
    origin_x: f32,
    origin_y: f32,
) -> Result<(), JsValue> {
    let (metrics, glyph) = with_font_manager(|manager| {
        Ok::<_, RenderError>((manager.metrics(handle)?, manager.render_char(handle, ch)?))
    })?;
    let transform = Transform::new(
        font_size,
        metrics.units_per_em,
        Point::new(origin_x, origin_y),
    )?;

    let extent = OverlayExtent::for_glyph(&glyph, &metrics, &transform);
    draw_overlay(ctx, &metric_overlay(&metrics, glyph.bbox.as_ref(), &transform, &extent));
    if let Some(bbox) = &glyph.bbox {
        draw_bounds_rect(ctx, &bounds_rect(bbox, &transform));
    }

    if glyph.is_empty() {
        console_warn!("Glyph for {:?} has no outline", ch);
        return Ok(());
    }

    draw_glyph(ctx, &glyph, &transform, &TextStyle::default());
    Ok(())
}

#[wasm_bindgen(start)]
pub fn main() {
    set_panic_hook();
    init_logging();
}
