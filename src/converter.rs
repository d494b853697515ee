// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use indexmap::IndexMap;

use crate::document::{FORMAT_TAG, FORMAT_VERSION};
use crate::shapes::{self, Shape, ShapeKind};
use crate::style::StyleSheet;
use crate::tree::Node;
use crate::{Definition, Document, Error, Options, OutputNode, Transform};

const STYLE_CMD: &str = "$S";

/// Converts a tree into a document.
///
/// The last `defs` child of the `root` is converted into the `defs` map.
/// Everything else is converted into nodes.
pub fn convert(root: &Node, opt: &Options) -> Document {
    let defs_idx = root.children().iter().rposition(|n| n.has_tag_name("defs"));

    let subtree = convert_subtree(root, SubtreeRoot::Node { excluded: defs_idx }, opt);
    let defs = defs_idx.map(|idx| convert_defs(&root.children()[idx], opt));

    log::debug!(
        "Converted: {} styles, {} definitions.",
        subtree.styles.len(),
        defs.as_ref().map(|d| d.len()).unwrap_or(0)
    );

    Document {
        version: FORMAT_VERSION,
        format: FORMAT_TAG.to_string(),
        styles: subtree.styles,
        defs,
        nodes: subtree.nodes,
    }
}

/// Parses a string and converts it into a document.
pub fn convert_str(text: &str, opt: &Options) -> Result<Document, Error> {
    let root = Node::from_str(text)?;
    Ok(convert(&root, opt))
}

/// How the root of a converted subtree is treated.
#[derive(Clone, Copy, Debug)]
pub(crate) enum SubtreeRoot {
    /// The root is converted like any other node.
    ///
    /// A child with the `excluded` index is skipped.
    Node { excluded: Option<usize> },
    /// Only root's children are converted.
    Container,
}

/// A converted subtree with its own styles table.
#[derive(Debug)]
pub(crate) struct Subtree {
    pub styles: Vec<String>,
    pub nodes: Vec<OutputNode>,
}

/// Converts a subtree as a standalone document.
///
/// Styles are collected from the whole subtree, including skipped nodes.
pub(crate) fn convert_subtree(root: &Node, mode: SubtreeRoot, opt: &Options) -> Subtree {
    let mut state = State {
        opt,
        styles: StyleSheet::collect(root, opt.decimals),
        position: 0,
    };

    let nodes = match mode {
        SubtreeRoot::Node { excluded } => state.convert_node(root, excluded).into_iter().collect(),
        SubtreeRoot::Container => {
            state.position += 1;
            state.convert_children(root, None)
        }
    };

    Subtree {
        styles: state.styles.into_table(),
        nodes,
    }
}

struct State<'a> {
    opt: &'a Options,
    styles: StyleSheet,
    /// Pre-order position of the next node.
    position: usize,
}

impl State<'_> {
    fn skip(&mut self, node: &Node) {
        self.position += node.descendants().count();
    }

    fn convert_node(&mut self, node: &Node, excluded: Option<usize>) -> Option<OutputNode> {
        let kind = ShapeKind::from_tag(node.tag_name());

        // A pattern is used only via a link from `defs`.
        if kind == Some(ShapeKind::Pattern) {
            log::warn!("A 'pattern' outside of 'defs' is not supported. Skipped.");
            self.skip(node);
            return None;
        }

        let style_idx = self.styles.index(self.position);
        self.position += 1;

        let mut cmds = String::new();
        if let Some(idx) = style_idx {
            cmds.push_str(STYLE_CMD);
            cmds.push_str(&idx.to_string());
        }

        if let Some(kind) = kind {
            if let Shape::Command(cmd) = shapes::encode(node, kind, self.opt) {
                cmds.push_str(&cmd);
            }
        }

        let mut out = OutputNode {
            id: node.attribute("id").map(ToString::to_string),
            ..OutputNode::default()
        };

        if let Some(value) = node.attribute("transform") {
            out.t = Transform::from_str(value).to_params(self.opt.decimals);
        }

        if !cmds.is_empty() {
            out.cmds = Some(cmds);
        }

        out.nodes = self.convert_children(node, excluded);

        if out.is_empty() {
            None
        } else {
            Some(out)
        }
    }

    fn convert_children(&mut self, parent: &Node, excluded: Option<usize>) -> Vec<OutputNode> {
        let mut nodes = Vec::new();
        for (idx, child) in parent.children().iter().enumerate() {
            if excluded == Some(idx) {
                self.skip(child);
                continue;
            }

            if let Some(node) = self.convert_node(child, None) {
                nodes.push(node);
            }
        }

        if self.opt.merge_commands {
            merge_commands(&mut nodes);
        }

        nodes
    }
}

/// Merges each run of adjacent commands-only nodes into the first node of the run.
fn merge_commands(nodes: &mut Vec<OutputNode>) {
    let mut merged: Vec<OutputNode> = Vec::with_capacity(nodes.len());
    for node in nodes.drain(..) {
        if let Some(prev) = merged.last_mut() {
            if prev.is_commands_only() && node.is_commands_only() {
                if let (Some(prev_cmds), Some(cmds)) = (prev.cmds.as_mut(), node.cmds) {
                    prev_cmds.push_str(&cmds);
                }

                continue;
            }
        }

        merged.push(node);
    }

    *nodes = merged;
}

fn convert_defs(defs: &Node, opt: &Options) -> IndexMap<String, Definition> {
    let mut map = IndexMap::new();
    for child in defs.children() {
        let id = match child.attribute("id") {
            Some(id) => id,
            None => continue,
        };

        let kind = match ShapeKind::from_tag(child.tag_name()) {
            Some(kind) => kind,
            None => {
                log::warn!("'{}' in 'defs' is not supported. Skipped.", child.tag_name());
                continue;
            }
        };

        let def = match shapes::encode(child, kind, opt) {
            Shape::Command(cmd) => Definition::Command(cmd),
            Shape::Pattern(pattern) => Definition::Pattern(pattern),
        };

        map.insert(id.to_string(), def);
    }

    map
}
