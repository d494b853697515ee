// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::attributes::{self, AId, Converter};
use crate::tree::Node;
use crate::{numbers, paint_server, Options, Pattern};

/// Elements with a dedicated command.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum ShapeKind {
    Rect,
    Circle,
    Ellipse,
    Line,
    Polyline,
    Polygon,
    Path,
    LinearGradient,
    Pattern,
}

/// How a shape is encoded.
#[derive(Clone, Copy)]
pub(crate) enum Encoding {
    /// A command code followed by comma-separated attribute values.
    Attributes(&'static [AId]),
    /// A dedicated encoder.
    Custom(fn(&Node, &Options) -> Shape),
}

/// An encoded shape.
#[derive(Clone, PartialEq, Debug)]
pub(crate) enum Shape {
    Command(String),
    Pattern(Pattern),
}

impl ShapeKind {
    pub fn from_tag(name: &str) -> Option<Self> {
        let kind = match name {
            "rect" => ShapeKind::Rect,
            "circle" => ShapeKind::Circle,
            "ellipse" => ShapeKind::Ellipse,
            "line" => ShapeKind::Line,
            "polyline" => ShapeKind::Polyline,
            "polygon" => ShapeKind::Polygon,
            "path" => ShapeKind::Path,
            "linearGradient" => ShapeKind::LinearGradient,
            "pattern" => ShapeKind::Pattern,
            _ => return None,
        };

        Some(kind)
    }

    pub fn code(self) -> &'static str {
        match self {
            ShapeKind::Rect => "$r",
            ShapeKind::Circle => "$c",
            ShapeKind::Ellipse => "$e",
            ShapeKind::Line => "$l",
            ShapeKind::Polyline => "$s",
            ShapeKind::Polygon => "$g",
            ShapeKind::Path => "$p",
            ShapeKind::LinearGradient => "R",
            ShapeKind::Pattern => "P",
        }
    }

    pub fn encoding(self) -> Encoding {
        match self {
            ShapeKind::Rect => Encoding::Custom(encode_rect),
            ShapeKind::Circle => Encoding::Attributes(&[AId::Cx, AId::Cy, AId::R]),
            ShapeKind::Ellipse => Encoding::Attributes(&[AId::Cx, AId::Cy, AId::Rx, AId::Ry]),
            ShapeKind::Line => Encoding::Attributes(&[AId::X1, AId::Y1, AId::X2, AId::Y2]),
            ShapeKind::Polyline | ShapeKind::Polygon => Encoding::Attributes(&[AId::Points]),
            ShapeKind::Path => Encoding::Attributes(&[AId::D]),
            ShapeKind::LinearGradient => Encoding::Custom(paint_server::encode_linear_gradient),
            ShapeKind::Pattern => Encoding::Custom(paint_server::encode_pattern),
        }
    }
}

pub(crate) fn encode(node: &Node, kind: ShapeKind, opt: &Options) -> Shape {
    match kind.encoding() {
        Encoding::Attributes(aids) => {
            let mut s = String::from(kind.code());
            write_attributes(node, aids, opt.decimals, &mut s);
            Shape::Command(s)
        }
        Encoding::Custom(f) => f(node, opt),
    }
}

fn write_attributes(node: &Node, aids: &[AId], decimals: u8, out: &mut String) {
    for (i, aid) in aids.iter().enumerate() {
        if i != 0 {
            out.push(',');
        }

        match aid.converter() {
            Converter::PathData => {
                let value = node.attribute(aid.to_str()).unwrap_or_default();
                out.push_str(&attributes::normalize_list(value));
            }
            _ => numbers::write_number(attributes::length(node, *aid), decimals, out),
        }
    }
}

fn encode_rect(node: &Node, opt: &Options) -> Shape {
    let mut s = String::from(ShapeKind::Rect.code());
    write_attributes(node, &[AId::X, AId::Y, AId::Width, AId::Height], opt.decimals, &mut s);

    let (rx, ry) = resolve_rx_ry(node);
    if rx != 0.0 && ry != 0.0 {
        s.push(',');
        numbers::write_number(rx, opt.decimals, &mut s);

        if rx != ry {
            s.push(',');
            numbers::write_number(ry, opt.decimals, &mut s);
        }
    }

    Shape::Command(s)
}

fn resolve_rx_ry(node: &Node) -> (f64, f64) {
    let rx_opt = node.attribute("rx").map(attributes::parse_unit);
    let ry_opt = node.attribute("ry").map(attributes::parse_unit);

    let (rx, ry) = match (rx_opt, ry_opt) {
        (None,     None)     => (0.0, 0.0),
        (Some(rx), None)     => (rx, rx),
        (None,     Some(ry)) => (ry, ry),
        (Some(rx), Some(ry)) => (rx, ry),
    };

    // Malformed radii are treated as zero.
    let fix = |n: f64| if n.is_nan() { 0.0 } else { n };
    (fix(rx), fix(ry))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_node(node: Node) -> String {
        let kind = ShapeKind::from_tag(node.tag_name()).unwrap();
        match encode(&node, kind, &Options::default()) {
            Shape::Command(s) => s,
            Shape::Pattern(_) => panic!("unexpected pattern"),
        }
    }

    macro_rules! test {
        ($name:ident, $tag:expr, [$($attr:expr => $value:expr),*], $result:expr) => {
            #[test]
            fn $name() {
                let node = Node::new($tag)$(.with_attribute($attr, $value))*;
                assert_eq!(encode_node(node), $result);
            }
        };
    }

    test!(rect_simple, "rect",
        ["x" => "10", "y" => "10", "width" => "100", "height" => "50"],
        "$r10,10,100,50");

    test!(rect_defaults, "rect",
        ["width" => "100", "height" => "50"],
        "$r0,0,100,50");

    test!(rect_units, "rect",
        ["x" => "1in", "width" => "2.123456", "height" => "10pt"],
        "$r90,0,2.12,12.5");

    test!(rect_equal_radii, "rect",
        ["width" => "10", "height" => "10", "rx" => "5", "ry" => "5"],
        "$r0,0,10,10,5");

    test!(rect_rx_only, "rect",
        ["width" => "10", "height" => "10", "rx" => "5"],
        "$r0,0,10,10,5");

    test!(rect_ry_only, "rect",
        ["width" => "10", "height" => "10", "ry" => "3"],
        "$r0,0,10,10,3");

    test!(rect_different_radii, "rect",
        ["width" => "10", "height" => "10", "rx" => "5", "ry" => "2"],
        "$r0,0,10,10,5,2");

    test!(rect_zero_radii, "rect",
        ["width" => "10", "height" => "10", "rx" => "0", "ry" => "0"],
        "$r0,0,10,10");

    test!(rect_one_zero_radius, "rect",
        ["width" => "10", "height" => "10", "rx" => "5", "ry" => "0"],
        "$r0,0,10,10");

    test!(rect_invalid_radius, "rect",
        ["width" => "10", "height" => "10", "rx" => "qwe"],
        "$r0,0,10,10");

    test!(rect_invalid_width, "rect",
        ["width" => "qwe", "height" => "10"],
        "$r0,0,NaN,10");

    test!(circle, "circle",
        ["cx" => "5", "cy" => "6.666", "r" => "3"],
        "$c5,6.67,3");

    test!(ellipse, "ellipse",
        ["cx" => "5", "cy" => "6", "rx" => "3", "ry" => "2"],
        "$e5,6,3,2");

    test!(line, "line",
        ["x1" => "1", "y1" => "2", "x2" => "3"],
        "$l1,2,3,0");

    test!(polyline, "polyline",
        ["points" => "0,0 10,10  20,0"],
        "$s0,0,10,10,20,0");

    test!(polygon, "polygon",
        ["points" => "0 0 10 10 20 0"],
        "$g0,0,10,10,20,0");

    test!(path, "path",
        ["d" => "M 10 20 L 30 40 Z"],
        "$pM,10,20,L,30,40,Z");

    test!(path_without_data, "path",
        [],
        "$p");

    #[test]
    fn unknown_tags() {
        assert_eq!(ShapeKind::from_tag("g"), None);
        assert_eq!(ShapeKind::from_tag("svg"), None);
        assert_eq!(ShapeKind::from_tag("radialGradient"), None);
    }

    #[test]
    fn custom_precision() {
        let node = Node::new("circle").with_attribute("r", "1.23456");
        let opt = Options {
            decimals: 3,
            ..Options::default()
        };
        assert_eq!(
            encode(&node, ShapeKind::Circle, &opt),
            Shape::Command("$c0,0,1.235".to_string())
        );
    }
}
