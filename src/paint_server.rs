// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use svgtypes::{Length, LengthUnit as Unit};

use crate::attributes::{self, AId};
use crate::converter::{self, SubtreeRoot};
use crate::shapes::{Shape, ShapeKind};
use crate::tree::Node;
use crate::{numbers, Options, Pattern};

/// Encodes a `linearGradient` as `R<x1>,<y1>,<x2>,<y2>,<units> <offset>,<color>[,<opacity>] ...`.
pub(crate) fn encode_linear_gradient(node: &Node, opt: &Options) -> Shape {
    let mut s = String::from(ShapeKind::LinearGradient.code());

    let coords = [(AId::X1, 0.0), (AId::Y1, 0.0), (AId::X2, 1.0), (AId::Y2, 0.0)];
    for (aid, def) in coords {
        numbers::write_number(convert_coordinate(node, aid, def), opt.decimals, &mut s);
        s.push(',');
    }

    let units = match node.attribute("gradientUnits") {
        Some("userSpaceOnUse") => '0',
        _ => '1',
    };
    s.push(units);

    for stop in node.children() {
        if !stop.has_tag_name("stop") {
            if !stop.is_text() {
                log::warn!("Invalid gradient child: '{}'.", stop.tag_name());
            }

            continue;
        }

        s.push(' ');
        write_stop(stop, opt.decimals, &mut s);
    }

    Shape::Command(s)
}

fn convert_coordinate(node: &Node, aid: AId, def: f64) -> f64 {
    match node.attribute(aid.to_str()) {
        Some(value) => match Length::from_str(value.trim()) {
            Ok(Length { number, unit: Unit::Percent }) => number / 100.0,
            _ => attributes::parse_unit(value),
        },
        None => def,
    }
}

fn write_stop(stop: &Node, decimals: u8, out: &mut String) {
    // `offset` can be either a number or a percentage.
    let offset = match stop.attribute("offset") {
        Some(value) => match Length::from_str(value.trim()) {
            Ok(Length { number, unit: Unit::Percent }) => number / 100.0,
            Ok(Length { number, unit: Unit::None }) => number,
            _ => attributes::parse_number(value),
        },
        None => 0.0,
    };

    let color = stop
        .attribute("stop-color")
        .and_then(attributes::convert_color)
        .unwrap_or_else(|| "000000".to_string());

    let opacity = stop
        .attribute("stop-opacity")
        .map(attributes::parse_number)
        .unwrap_or(1.0);

    numbers::write_number(offset, decimals, out);
    out.push(',');
    out.push_str(&color);

    if opacity != 1.0 {
        out.push(',');
        numbers::write_number(opacity, decimals, out);
    }
}

/// Converts a `pattern` content as a standalone document.
///
/// The pattern element itself acts as a container, and its styles are
/// not shared with the parent document.
pub(crate) fn encode_pattern(node: &Node, opt: &Options) -> Shape {
    let subtree = converter::convert_subtree(node, SubtreeRoot::Container, opt);
    Shape::Pattern(Pattern {
        nodes: subtree.nodes,
        repeat: "repeat".to_string(),
        styles: subtree.styles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutputNode;

    fn gradient(node: &Node) -> String {
        match encode_linear_gradient(node, &Options::default()) {
            Shape::Command(s) => s,
            Shape::Pattern(_) => panic!("unexpected pattern"),
        }
    }

    fn stop(offset: &str, color: &str) -> Node {
        Node::new("stop")
            .with_attribute("offset", offset)
            .with_attribute("stop-color", color)
    }

    #[test]
    fn gradient_defaults() {
        assert_eq!(gradient(&Node::new("linearGradient")), "R0,0,1,0,1");
    }

    #[test]
    fn gradient_with_stops() {
        let node = Node::new("linearGradient")
            .with_attribute("x2", "0")
            .with_attribute("y2", "100%")
            .with_child(stop("0", "red"))
            .with_child(stop("50%", "#00ff00").with_attribute("stop-opacity", "0.5"))
            .with_child(stop("1", "blue").with_attribute("stop-opacity", "1"));

        assert_eq!(gradient(&node), "R0,0,0,1,1 0,ff0000 0.5,00ff00,0.5 1,0000ff");
    }

    #[test]
    fn gradient_user_space() {
        let node = Node::new("linearGradient")
            .with_attribute("gradientUnits", "userSpaceOnUse")
            .with_attribute("x1", "10")
            .with_attribute("x2", "110")
            .with_child(Node::new("stop"));

        assert_eq!(gradient(&node), "R10,0,110,0,0 0,000000");
    }

    #[test]
    fn gradient_units_flag() {
        let units = |value: &str| {
            gradient(&Node::new("linearGradient").with_attribute("gradientUnits", value))
        };

        assert_eq!(units("userSpaceOnUse"), "R0,0,1,0,0");
        assert_eq!(units("objectBoundingBox"), "R0,0,1,0,1");
        assert_eq!(units("invalid"), "R0,0,1,0,1");
    }

    #[test]
    fn gradient_skips_invalid_children() {
        let node = Node::new("linearGradient")
            .with_child(Node::new("rect"))
            .with_child(Node::new_text("text"))
            .with_child(stop("33.333%", "white"));

        assert_eq!(gradient(&node), "R0,0,1,0,1 0.33,ffffff");
    }

    #[test]
    fn pattern_is_an_island() {
        let node = Node::new("pattern")
            .with_attribute("id", "p1")
            .with_attribute("fill", "red")
            .with_child(Node::new("circle").with_attribute("r", "5").with_attribute("fill", "blue"))
            .with_child(Node::new("circle").with_attribute("r", "2"));

        let pattern = match encode_pattern(&node, &Options::default()) {
            Shape::Pattern(p) => p,
            Shape::Command(_) => panic!("unexpected command"),
        };

        assert_eq!(pattern.repeat, "repeat");
        assert_eq!(pattern.styles, vec!["Fff0000", "F0000ff"]);
        assert_eq!(
            pattern.nodes,
            vec![OutputNode {
                cmds: Some("$S1$c0,0,5$c0,0,2".to_string()),
                ..OutputNode::default()
            }]
        );
    }
}
