// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use svgtypes::{Length, LengthUnit as Unit};

use crate::numbers;
use crate::tree::Node;

/// Recognized attributes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) enum AId {
    Cx,
    Cy,
    D,
    Fill,
    FillOpacity,
    FillRule,
    Height,
    Opacity,
    Points,
    R,
    Rx,
    Ry,
    Stroke,
    StrokeDasharray,
    StrokeLinecap,
    StrokeLinejoin,
    StrokeMiterlimit,
    StrokeOpacity,
    StrokeWidth,
    Width,
    X,
    X1,
    X2,
    Y,
    Y1,
    Y2,
}

impl AId {
    pub fn from_str(text: &str) -> Option<Self> {
        let aid = match text {
            "cx" => AId::Cx,
            "cy" => AId::Cy,
            "d" => AId::D,
            "fill" => AId::Fill,
            "fill-opacity" => AId::FillOpacity,
            "fill-rule" => AId::FillRule,
            "height" => AId::Height,
            "opacity" => AId::Opacity,
            "points" => AId::Points,
            "r" => AId::R,
            "rx" => AId::Rx,
            "ry" => AId::Ry,
            "stroke" => AId::Stroke,
            "stroke-dasharray" => AId::StrokeDasharray,
            "stroke-linecap" => AId::StrokeLinecap,
            "stroke-linejoin" => AId::StrokeLinejoin,
            "stroke-miterlimit" => AId::StrokeMiterlimit,
            "stroke-opacity" => AId::StrokeOpacity,
            "stroke-width" => AId::StrokeWidth,
            "width" => AId::Width,
            "x" => AId::X,
            "x1" => AId::X1,
            "x2" => AId::X2,
            "y" => AId::Y,
            "y1" => AId::Y1,
            "y2" => AId::Y2,
            _ => return None,
        };

        Some(aid)
    }

    pub fn to_str(self) -> &'static str {
        match self {
            AId::Cx => "cx",
            AId::Cy => "cy",
            AId::D => "d",
            AId::Fill => "fill",
            AId::FillOpacity => "fill-opacity",
            AId::FillRule => "fill-rule",
            AId::Height => "height",
            AId::Opacity => "opacity",
            AId::Points => "points",
            AId::R => "r",
            AId::Rx => "rx",
            AId::Ry => "ry",
            AId::Stroke => "stroke",
            AId::StrokeDasharray => "stroke-dasharray",
            AId::StrokeLinecap => "stroke-linecap",
            AId::StrokeLinejoin => "stroke-linejoin",
            AId::StrokeMiterlimit => "stroke-miterlimit",
            AId::StrokeOpacity => "stroke-opacity",
            AId::StrokeWidth => "stroke-width",
            AId::Width => "width",
            AId::X => "x",
            AId::X1 => "x1",
            AId::X2 => "x2",
            AId::Y => "y",
            AId::Y1 => "y1",
            AId::Y2 => "y2",
        }
    }

    /// Returns a style command code for style attributes.
    pub fn style_code(self) -> Option<char> {
        let code = match self {
            AId::Fill => 'F',
            AId::FillOpacity => 'f',
            AId::FillRule => 'r',
            AId::Stroke => 'L',
            AId::StrokeOpacity => 'l',
            AId::StrokeWidth => 'w',
            AId::StrokeLinecap => 'c',
            AId::StrokeLinejoin => 'j',
            AId::StrokeMiterlimit => 'm',
            AId::Opacity => 'a',
            AId::StrokeDasharray => 'd',
            _ => return None,
        };

        Some(code)
    }

    pub fn converter(self) -> Converter {
        match self {
            AId::Cx
            | AId::Cy
            | AId::Height
            | AId::R
            | AId::Rx
            | AId::Ry
            | AId::Width
            | AId::X
            | AId::X1
            | AId::X2
            | AId::Y
            | AId::Y1
            | AId::Y2 => Converter::Unit(0.0),
            AId::D | AId::Points => Converter::PathData,
            AId::Fill => Converter::Paint("black"),
            AId::Stroke => Converter::Paint("none"),
            AId::FillOpacity | AId::StrokeOpacity | AId::Opacity => Converter::Number(1.0),
            AId::StrokeWidth => Converter::Unit(1.0),
            AId::StrokeMiterlimit => Converter::Number(4.0),
            AId::FillRule => Converter::Enum("nonzero", &[("nonzero", "1"), ("evenodd", "0")]),
            AId::StrokeLinecap => {
                Converter::Enum("butt", &[("butt", "b"), ("round", "r"), ("square", "s")])
            }
            AId::StrokeLinejoin => {
                Converter::Enum("miter", &[("miter", "m"), ("round", "r"), ("bevel", "b")])
            }
            AId::StrokeDasharray => Converter::UnitList,
        }
    }
}

/// A converted attribute value.
#[derive(Clone, PartialEq, Debug)]
pub(crate) enum Value {
    Number(f64),
    List(Vec<f64>),
    Text(String),
}

impl Value {
    pub fn write(&self, decimals: u8, out: &mut String) {
        match self {
            Value::Number(n) => numbers::write_number(*n, decimals, out),
            Value::List(list) => {
                for (i, n) in list.iter().enumerate() {
                    if i != 0 {
                        out.push(',');
                    }
                    numbers::write_number(*n, decimals, out);
                }
            }
            Value::Text(s) => out.push_str(s),
        }
    }
}

/// An attribute value converter.
///
/// Each converter knows the attribute's default value. An absent attribute
/// resolves to it, and a value equal to it is suppressed.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Converter {
    /// A length with an optional absolute unit.
    Unit(f64),
    /// A plain number.
    Number(f64),
    /// A keyword mapped to a short code.
    Enum(&'static str, &'static [(&'static str, &'static str)]),
    /// A color, a `none` or a link to a paint server.
    Paint(&'static str),
    /// A list of lengths or `none`.
    UnitList,
    /// Path data and points. Never suppressed.
    PathData,
}

impl Converter {
    /// Converts a raw attribute value.
    ///
    /// Returns `None` when the value is equal to the default one
    /// or cannot be represented at all.
    pub fn convert(&self, value: Option<&str>) -> Option<Value> {
        match *self {
            Converter::Unit(def) => {
                let n = value.map(parse_unit).unwrap_or(def);
                suppress_number(n, def)
            }
            Converter::Number(def) => {
                let n = value.map(parse_number).unwrap_or(def);
                suppress_number(n, def)
            }
            Converter::Enum(def, map) => {
                let value = value.unwrap_or(def).trim();
                if value == def {
                    return None;
                }

                match map.iter().find(|(name, _)| *name == value) {
                    Some((_, code)) => Some(Value::Text(code.to_string())),
                    None => {
                        log::warn!("Unknown keyword: '{}'. Skipped.", value);
                        None
                    }
                }
            }
            Converter::Paint(def) => {
                let paint = convert_paint(value.unwrap_or(def))?;
                if Some(&paint) == convert_paint(def).as_ref() {
                    None
                } else {
                    Some(Value::Text(paint))
                }
            }
            Converter::UnitList => {
                let value = value.unwrap_or("none").trim();
                if value == "none" {
                    return None;
                }

                let list: Vec<_> = split_list(value).map(parse_unit).collect();
                if list.is_empty() {
                    None
                } else {
                    Some(Value::List(list))
                }
            }
            Converter::PathData => Some(Value::Text(normalize_list(value.unwrap_or_default()))),
        }
    }
}

fn suppress_number(n: f64, def: f64) -> Option<Value> {
    if n == def {
        None
    } else {
        Some(Value::Number(n))
    }
}

/// Parses a length and converts it into pixels.
///
/// Relative units cannot be resolved here, so they produce NaN,
/// just like a malformed value.
pub(crate) fn parse_unit(text: &str) -> f64 {
    let length = match Length::from_str(text.trim()) {
        Ok(v) => v,
        Err(_) => {
            log::warn!("Failed to parse a length: '{}'.", text);
            return f64::NAN;
        }
    };

    let n = length.number;
    match length.unit {
        Unit::None | Unit::Px => n,
        Unit::Pt => n * 1.25,
        Unit::Pc => n * 15.0,
        Unit::Mm => n * 3.543307,
        Unit::Cm => n * 35.43307,
        Unit::In => n * 90.0,
        Unit::Em | Unit::Ex | Unit::Percent => {
            log::warn!("Relative units are not supported: '{}'.", text);
            f64::NAN
        }
    }
}

/// Parses a number.
///
/// A malformed value produces NaN.
pub(crate) fn parse_number(text: &str) -> f64 {
    match svgtypes::Number::from_str(text.trim()) {
        Ok(n) => n.0,
        Err(_) => {
            log::warn!("Failed to parse a number: '{}'.", text);
            f64::NAN
        }
    }
}

/// Resolves a paint into a color hex code, `-` for `none` or `#id` for links.
pub(crate) fn convert_paint(text: &str) -> Option<String> {
    match svgtypes::Paint::from_str(text.trim()) {
        Ok(svgtypes::Paint::None) => Some("-".to_string()),
        Ok(svgtypes::Paint::Color(c)) => Some(color_to_hex(c)),
        Ok(svgtypes::Paint::FuncIRI(link, _)) => Some(format!("#{}", link)),
        Ok(_) => {
            log::warn!("Unsupported paint: '{}'. Skipped.", text);
            None
        }
        Err(_) => {
            log::warn!("Failed to parse a paint: '{}'. Skipped.", text);
            None
        }
    }
}

/// Resolves a color into a hex code.
pub(crate) fn convert_color(text: &str) -> Option<String> {
    match svgtypes::Color::from_str(text.trim()) {
        Ok(c) => Some(color_to_hex(c)),
        Err(_) => {
            log::warn!("Failed to parse a color: '{}'.", text);
            None
        }
    }
}

fn color_to_hex(c: svgtypes::Color) -> String {
    format!("{:02x}{:02x}{:02x}", c.red, c.green, c.blue)
}

/// Collapses each run of whitespaces and commas into a single comma.
pub(crate) fn normalize_list(text: &str) -> String {
    let mut s = String::with_capacity(text.len());
    for item in split_list(text) {
        if !s.is_empty() {
            s.push(',');
        }
        s.push_str(item);
    }

    s
}

fn split_list(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == ',' || c.is_ascii_whitespace())
        .filter(|s| !s.is_empty())
}

/// Resolves a geometry attribute into pixels.
///
/// Unlike style attributes, geometry is never suppressed.
pub(crate) fn length(node: &Node, aid: AId) -> f64 {
    match (node.attribute(aid.to_str()), aid.converter()) {
        (Some(value), _) => parse_unit(value),
        (None, Converter::Unit(def)) => def,
        (None, _) => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(aid: AId, value: Option<&str>) -> Option<Value> {
        aid.converter().convert(value)
    }

    fn text(s: &str) -> Option<Value> {
        Some(Value::Text(s.to_string()))
    }

    #[test]
    fn units() {
        assert_eq!(parse_unit("10"), 10.0);
        assert_eq!(parse_unit("10px"), 10.0);
        assert_eq!(parse_unit("2pt"), 2.5);
        assert_eq!(parse_unit("1pc"), 15.0);
        assert_eq!(parse_unit("1in"), 90.0);
        assert_eq!(parse_unit("2mm"), 2.0 * 3.543307);
        assert_eq!(parse_unit("1cm"), 35.43307);
        assert!(parse_unit("50%").is_nan());
        assert!(parse_unit("abc").is_nan());
    }

    #[test]
    fn unit_default_suppression() {
        assert_eq!(convert(AId::StrokeWidth, Some("1")), None);
        assert_eq!(convert(AId::StrokeWidth, None), None);
        assert_eq!(convert(AId::StrokeWidth, Some("2")), Some(Value::Number(2.0)));
        assert_eq!(convert(AId::X, Some("0")), None);
    }

    #[test]
    fn numbers() {
        assert_eq!(convert(AId::Opacity, Some("1")), None);
        assert_eq!(convert(AId::Opacity, Some("0.5")), Some(Value::Number(0.5)));
        assert_eq!(convert(AId::StrokeMiterlimit, Some("4")), None);
        assert!(matches!(
            convert(AId::FillOpacity, Some("x")),
            Some(Value::Number(n)) if n.is_nan()
        ));
    }

    #[test]
    fn enums() {
        assert_eq!(convert(AId::FillRule, Some("nonzero")), None);
        assert_eq!(convert(AId::FillRule, Some("evenodd")), text("0"));
        assert_eq!(convert(AId::StrokeLinecap, Some("round")), text("r"));
        assert_eq!(convert(AId::StrokeLinecap, Some("butt")), None);
        assert_eq!(convert(AId::StrokeLinejoin, Some("bevel")), text("b"));
        assert_eq!(convert(AId::StrokeLinejoin, Some("unknown")), None);
    }

    #[test]
    fn paints() {
        assert_eq!(convert(AId::Fill, Some("#ff0000")), text("ff0000"));
        assert_eq!(convert(AId::Fill, Some("red")), text("ff0000"));
        assert_eq!(convert(AId::Fill, Some("#0f0")), text("00ff00"));
        assert_eq!(convert(AId::Fill, Some("rgb(0, 0, 255)")), text("0000ff"));
        assert_eq!(convert(AId::Fill, Some("black")), None);
        assert_eq!(convert(AId::Fill, Some("none")), text("-"));
        assert_eq!(convert(AId::Fill, Some("url(#grad1)")), text("#grad1"));
        assert_eq!(convert(AId::Stroke, Some("none")), None);
        assert_eq!(convert(AId::Stroke, Some("black")), text("000000"));
        assert_eq!(convert(AId::Fill, Some("qwe")), None);
    }

    #[test]
    fn dash_array() {
        assert_eq!(convert(AId::StrokeDasharray, Some("none")), None);
        assert_eq!(convert(AId::StrokeDasharray, None), None);
        assert_eq!(
            convert(AId::StrokeDasharray, Some("5, 3 2")),
            Some(Value::List(vec![5.0, 3.0, 2.0]))
        );

        let mut s = String::new();
        convert(AId::StrokeDasharray, Some("1in 2.3333"))
            .unwrap()
            .write(2, &mut s);
        assert_eq!(s, "90,2.33");
    }

    #[test]
    fn path_data() {
        assert_eq!(
            convert(AId::D, Some("M 10 20 L 30  40\n Z")),
            text("M,10,20,L,30,40,Z")
        );
        assert_eq!(convert(AId::Points, Some(" 0,0 10, 10 ")), text("0,0,10,10"));
        assert_eq!(convert(AId::D, None), text(""));
    }

    #[test]
    fn geometry_is_not_suppressed() {
        let node = Node::new("rect").with_attribute("x", "0").with_attribute("width", "1cm");
        assert_eq!(length(&node, AId::X), 0.0);
        assert_eq!(length(&node, AId::Y), 0.0);
        assert_eq!(length(&node, AId::Width), 35.43307);
    }

    #[test]
    fn names_round_trip() {
        for name in ["fill", "stroke-dasharray", "x2", "points"] {
            assert_eq!(AId::from_str(name).unwrap().to_str(), name);
        }
        assert_eq!(AId::from_str("transform"), None);
    }

    #[test]
    fn style_codes() {
        assert_eq!(AId::Fill.style_code(), Some('F'));
        assert_eq!(AId::Stroke.style_code(), Some('L'));
        assert_eq!(AId::StrokeDasharray.style_code(), Some('d'));
        assert_eq!(AId::Width.style_code(), None);
    }
}
