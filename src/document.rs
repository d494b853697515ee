// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use indexmap::IndexMap;
use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;

use crate::numbers;

/// The format version.
pub const FORMAT_VERSION: f64 = 0.6;

/// The format tag.
pub const FORMAT_TAG: &str = "bvg";

/// A converted document.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Document {
    /// The format version.
    pub version: f64,

    /// The format tag.
    pub format: String,

    /// Deduplicated styles.
    ///
    /// Referenced from the `$S<index>` command.
    pub styles: Vec<String>,

    /// Definitions by ID.
    ///
    /// `None` when the source document doesn't have a `defs` element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defs: Option<IndexMap<String, Definition>>,

    /// Top-level nodes.
    pub nodes: Vec<OutputNode>,
}

impl Document {
    /// Serializes the document into a compact JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// An output node.
#[derive(Clone, PartialEq, Default, Debug, Serialize)]
pub struct OutputNode {
    /// Element's ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Decomposed transform parameters without the trailing default ones.
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "serialize_numbers")]
    pub t: Vec<f64>,

    /// Encoded commands.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmds: Option<String>,

    /// Children.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<OutputNode>,
}

impl OutputNode {
    /// Checks that node contains only commands.
    ///
    /// Such nodes can be merged with each other.
    #[inline]
    pub fn is_commands_only(&self) -> bool {
        self.cmds.is_some() && self.id.is_none() && self.t.is_empty() && self.nodes.is_empty()
    }

    /// Checks that node doesn't carry any data.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.cmds.is_none() && self.nodes.is_empty()
    }
}

/// A definition.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(untagged)]
pub enum Definition {
    /// An encoded command, like a shape or a gradient.
    Command(String),
    /// A pattern.
    Pattern(Pattern),
}

/// A pattern definition.
///
/// Patterns have their own styles table.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Pattern {
    /// Pattern's content.
    pub nodes: Vec<OutputNode>,

    /// Repeat mode. Always `repeat`.
    pub repeat: String,

    /// Pattern's own deduplicated styles.
    pub styles: Vec<String>,
}

// Integral numbers are written without a fractional part, like in JavaScript.
fn serialize_numbers<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(values.len()))?;
    for n in values {
        if numbers::is_safe_integer(*n) {
            seq.serialize_element(&(*n as i64))?;
        } else {
            seq.serialize_element(n)?;
        }
    }
    seq.end()
}
