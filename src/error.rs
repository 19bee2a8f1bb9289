use std::fmt;

use wasm_bindgen::JsValue;

use crate::font::FontHandle;

#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The handle was never created or has been disposed.
    InvalidFontHandle(FontHandle),
    /// A wire instruction carried a tag outside the five known kinds.
    UnknownInstructionTag(u32),
    /// The font reports an em square of zero design units.
    ZeroUnitsPerEm,
    /// Font size is negative, NaN or infinite.
    InvalidFontSize(f32),
    /// The font data could not be parsed.
    FontParse(String),
}

pub type RenderResult<T> = Result<T, RenderError>;

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::InvalidFontHandle(handle) => {
                write!(f, "invalid font handle {}", handle)
            }
            RenderError::UnknownInstructionTag(tag) => {
                write!(f, "unknown draw instruction tag {}", tag)
            }
            RenderError::ZeroUnitsPerEm => write!(f, "font reports zero units per em"),
            RenderError::InvalidFontSize(size) => write!(f, "invalid font size {}", size),
            RenderError::FontParse(msg) => write!(f, "failed to parse font: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<RenderError> for JsValue {
    fn from(err: RenderError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            RenderError::InvalidFontHandle(3).to_string(),
            "invalid font handle 3"
        );
        assert_eq!(
            RenderError::UnknownInstructionTag(9).to_string(),
            "unknown draw instruction tag 9"
        );
        assert_eq!(
            RenderError::ZeroUnitsPerEm.to_string(),
            "font reports zero units per em"
        );
    }
}
