mod builder;

use std::cell::RefCell;

use fxhash::FxHashMap;
use log::debug;
use owned_ttf_parser::{self as ttf, AsFaceRef};

pub use builder::InstructionOutlineBuilder;

use crate::error::{RenderError, RenderResult};
use crate::outline::{BoundingBox, FontMetrics, GlyphOutline};

pub type FontHandle = u32;

/// Source of glyph outlines and font metrics, addressed by handle.
pub trait FontEngine {
    fn metrics(&self, handle: FontHandle) -> RenderResult<FontMetrics>;

    /// Outline of `ch` in design units.
    fn render_char(&self, handle: FontHandle, ch: char) -> RenderResult<GlyphOutline>;

    /// One outline per char, in order.
    fn render_string(&self, handle: FontHandle, text: &str) -> RenderResult<Vec<GlyphOutline>> {
        text.chars().map(|ch| self.render_char(handle, ch)).collect()
    }
}

struct LoadedFont {
    face: ttf::OwnedFace,
    metrics: FontMetrics,
}

/// Registry of parsed TrueType/OpenType faces.
pub struct FontManager {
    fonts: FxHashMap<FontHandle, LoadedFont>,
    font_counter: FontHandle,
}

impl FontManager {
    pub fn new() -> FontManager {
        FontManager {
            fonts: FxHashMap::default(),
            font_counter: 0,
        }
    }

    /// Parse face 0 of `data` and return a handle to it. Metrics are read once here.
    pub fn create_font_handle(&mut self, data: Vec<u8>) -> RenderResult<FontHandle> {
        let face = ttf::OwnedFace::from_vec(data, 0)
            .map_err(|e| RenderError::FontParse(e.to_string()))?;
        let metrics = read_metrics(face.as_face_ref());

        self.font_counter += 1;
        let handle = self.font_counter;
        debug!(
            "Font {} loaded: upm={} asc={} desc={} cap={}",
            handle,
            metrics.units_per_em,
            metrics.ascender,
            metrics.descender,
            metrics.capital_height
        );
        self.fonts.insert(handle, LoadedFont { face, metrics });
        Ok(handle)
    }

    pub fn dispose(&mut self, handle: FontHandle) -> RenderResult<()> {
        match self.fonts.remove(&handle) {
            Some(_) => {
                debug!("Font {} disposed", handle);
                Ok(())
            }
            None => Err(RenderError::InvalidFontHandle(handle)),
        }
    }

    fn get(&self, handle: FontHandle) -> RenderResult<&LoadedFont> {
        self.fonts
            .get(&handle)
            .ok_or(RenderError::InvalidFontHandle(handle))
    }
}

impl Default for FontManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FontEngine for FontManager {
    fn metrics(&self, handle: FontHandle) -> RenderResult<FontMetrics> {
        Ok(self.get(handle)?.metrics)
    }

    fn render_char(&self, handle: FontHandle, ch: char) -> RenderResult<GlyphOutline> {
        let face = self.get(handle)?.face.as_face_ref();

        // Unmapped chars draw the .notdef glyph.
        let glyph_id = face.glyph_index(ch).unwrap_or(ttf::GlyphId(0));

        let mut builder = InstructionOutlineBuilder::new();
        let bbox = face.outline_glyph(glyph_id, &mut builder).map(|rect| BoundingBox {
            x_min: rect.x_min,
            x_max: rect.x_max,
            y_min: rect.y_min,
            y_max: rect.y_max,
        });

        Ok(GlyphOutline {
            instructions: builder.instructions,
            advance_width: face.glyph_hor_advance(glyph_id).unwrap_or(0),
            left_side_bearing: face.glyph_hor_side_bearing(glyph_id),
            bbox,
        })
    }
}

fn read_metrics(face: &ttf::Face) -> FontMetrics {
    FontMetrics {
        units_per_em: face.units_per_em(),
        ascender: face.ascender(),
        descender: face.descender(),
        capital_height: face
            .capital_height()
            .or_else(|| capital_height_from_outline(face))
            .unwrap_or_else(|| face.ascender()),
    }
}

/// Top of the ink of 'H', for fonts whose `OS/2` table predates cap height.
fn capital_height_from_outline(face: &ttf::Face) -> Option<i16> {
    let glyph_id = face.glyph_index('H')?;
    face.glyph_bounding_box(glyph_id).map(|rect| rect.y_max)
}

thread_local! {
    pub static FONT_MANAGER: RefCell<FontManager> = RefCell::new(FontManager::new());
}

pub fn with_font_manager<F, R>(f: F) -> R
where
    F: FnOnce(&FontManager) -> R,
{
    FONT_MANAGER.with(|manager| f(&manager.borrow()))
}

pub fn with_font_manager_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut FontManager) -> R,
{
    FONT_MANAGER.with_borrow_mut(|manager| f(manager))
}
