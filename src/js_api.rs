use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::{
    layout::TextLayout,
    outline::{compiler::PathOp, BoundingBox, FontMetrics, GlyphOutline, Point, RawDrawInstruction},
};

pub fn safe_string(s: &str) -> String {
    String::from_utf8_lossy(s.as_bytes()).into_owned()
}

pub fn safe_js_string(s: &str) -> JsValue {
    JsValue::from_str(&safe_string(s))
}

pub trait JsSerializable {
    fn to_js_object(&self) -> js_sys::Object;
}

pub trait JsUtils {
    fn str_set(&self, key: &str, value: &JsValue);
}

impl JsSerializable for js_sys::Map {
    fn to_js_object(&self) -> js_sys::Object {
        // Every key is set through `str_set`, so entries are always valid.
        Object::from_entries(self).unwrap_or_else(|_| Object::new())
    }
}

impl JsUtils for js_sys::Map {
    fn str_set(&self, key: &str, value: &JsValue) {
        self.set(&safe_js_string(key), value);
    }
}

pub trait ToJsValue {
    fn to_js_value(&self) -> JsValue;
}

impl ToJsValue for String {
    fn to_js_value(&self) -> JsValue {
        safe_js_string(self)
    }
}

impl ToJsValue for u16 {
    fn to_js_value(&self) -> JsValue {
        JsValue::from_f64(*self as f64)
    }
}

impl ToJsValue for i16 {
    fn to_js_value(&self) -> JsValue {
        JsValue::from_f64(*self as f64)
    }
}

impl ToJsValue for u32 {
    fn to_js_value(&self) -> JsValue {
        JsValue::from_f64(*self as f64)
    }
}

impl ToJsValue for usize {
    fn to_js_value(&self) -> JsValue {
        JsValue::from_f64(*self as f64)
    }
}

impl ToJsValue for f32 {
    fn to_js_value(&self) -> JsValue {
        JsValue::from_f64(*self as f64)
    }
}

impl<T: ToJsValue> ToJsValue for Option<T> {
    fn to_js_value(&self) -> JsValue {
        match self {
            Some(value) => value.to_js_value(),
            None => JsValue::NULL,
        }
    }
}

impl<T: ToJsValue> ToJsValue for Vec<T> {
    fn to_js_value(&self) -> JsValue {
        let array = Array::new();
        for item in self {
            array.push(&item.to_js_value());
        }
        array.into()
    }
}

impl ToJsValue for Point {
    fn to_js_value(&self) -> JsValue {
        let map = js_sys::Map::new();
        map.str_set("x", &self.x.to_js_value());
        map.str_set("y", &self.y.to_js_value());
        map.to_js_object().into()
    }
}

impl ToJsValue for RawDrawInstruction {
    fn to_js_value(&self) -> JsValue {
        let map = js_sys::Map::new();
        map.str_set("tag", &self.tag.to_js_value());
        map.str_set("point", &self.point.to_js_value());
        map.str_set("control1", &self.control1.to_js_value());
        map.str_set("control2", &self.control2.to_js_value());
        map.to_js_object().into()
    }
}

impl ToJsValue for BoundingBox {
    fn to_js_value(&self) -> JsValue {
        let map = js_sys::Map::new();
        map.str_set("x_min", &self.x_min.to_js_value());
        map.str_set("x_max", &self.x_max.to_js_value());
        map.str_set("y_min", &self.y_min.to_js_value());
        map.str_set("y_max", &self.y_max.to_js_value());
        map.to_js_object().into()
    }
}

impl ToJsValue for GlyphOutline {
    fn to_js_value(&self) -> JsValue {
        let commands: Vec<RawDrawInstruction> =
            self.instructions.iter().map(RawDrawInstruction::from).collect();

        let map = js_sys::Map::new();
        map.str_set("commands", &commands.to_js_value());
        map.str_set("advance_width", &self.advance_width.to_js_value());
        map.str_set("lsb", &self.left_side_bearing.to_js_value());
        map.str_set("bbox", &self.bbox.to_js_value());
        map.to_js_object().into()
    }
}

impl ToJsValue for FontMetrics {
    fn to_js_value(&self) -> JsValue {
        let map = js_sys::Map::new();
        map.str_set("units_per_em", &self.units_per_em.to_js_value());
        map.str_set("ascender", &self.ascender.to_js_value());
        map.str_set("descender", &self.descender.to_js_value());
        map.str_set("capital_height", &self.capital_height.to_js_value());
        map.to_js_object().into()
    }
}

impl ToJsValue for PathOp {
    fn to_js_value(&self) -> JsValue {
        let map = js_sys::Map::new();
        let (op, points): (&str, Vec<Point>) = match *self {
            PathOp::MoveTo(p) => ("moveTo", vec![p]),
            PathOp::LineTo(p) => ("lineTo", vec![p]),
            PathOp::QuadTo(c, p) => ("quadraticCurveTo", vec![c, p]),
            PathOp::CurveTo(c1, c2, p) => ("bezierCurveTo", vec![c1, c2, p]),
            PathOp::Close => ("closePath", vec![]),
            PathOp::Fill => ("fill", vec![]),
            PathOp::Stroke => ("stroke", vec![]),
        };
        map.str_set("op", &safe_js_string(op));
        map.str_set("points", &points.to_js_value());
        map.to_js_object().into()
    }
}

/// Path ops of a laid-out run together with where the cursor ended up.
pub struct JsBridgeTextOps {
    pub ops: Vec<PathOp>,
    pub layout: TextLayout,
    pub width: f32,
    pub height: f32,
}

impl ToJsValue for JsBridgeTextOps {
    fn to_js_value(&self) -> JsValue {
        let map = js_sys::Map::new();
        map.str_set("ops", &self.ops.to_js_value());
        map.str_set("lineCount", &self.layout.line_count.to_js_value());
        map.str_set("cursorLeft", &self.layout.cursor.left.to_js_value());
        map.str_set("cursorTop", &self.layout.cursor.top.to_js_value());
        map.str_set("width", &self.width.to_js_value());
        map.str_set("height", &self.height.to_js_value());
        map.to_js_object().into()
    }
}

fn get_number(value: &JsValue, key: &str) -> Option<f64> {
    Reflect::get(value, &safe_js_string(key))
        .ok()
        .and_then(|v| v.as_f64())
}

fn point_from_js(value: &JsValue, key: &str) -> Point {
    match Reflect::get(value, &safe_js_string(key)) {
        Ok(point) if point.is_object() => Point::new(
            get_number(&point, "x").unwrap_or(0.0) as f32,
            get_number(&point, "y").unwrap_or(0.0) as f32,
        ),
        _ => Point::zero(),
    }
}

/// Read the `commands` array of a JS outline object into wire records.
/// Missing points read as zero; a missing or non-integral tag is kept as an
/// out-of-range value so decoding rejects it.
pub fn commands_from_js(outline: &JsValue) -> Vec<RawDrawInstruction> {
    let commands = match Reflect::get(outline, &safe_js_string("commands")) {
        Ok(commands) if Array::is_array(&commands) => Array::from(&commands),
        _ => return Vec::new(),
    };

    commands
        .iter()
        .map(|command| {
            let tag = match get_number(&command, "tag") {
                Some(tag) if tag >= 0.0 && tag <= u32::MAX as f64 && tag.fract() == 0.0 => {
                    tag as u32
                }
                _ => u32::MAX,
            };
            RawDrawInstruction {
                tag,
                point: point_from_js(&command, "point"),
                control1: point_from_js(&command, "control1"),
                control2: point_from_js(&command, "control2"),
            }
        })
        .collect()
}
