// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;

use crate::attributes::AId;
use crate::tree::Node;

/// Deduplicated styles of a subtree.
///
/// Style indices are stored per node in the pre-order of the walked subtree,
/// so the input tree stays untouched.
#[derive(Default, Debug)]
pub(crate) struct StyleSheet {
    table: Vec<String>,
    lookup: HashMap<String, usize>,
    indices: Vec<Option<usize>>,
}

impl StyleSheet {
    /// Collects styles of the `root` and all its descendants.
    pub fn collect(root: &Node, decimals: u8) -> Self {
        let mut sheet = StyleSheet::default();
        for node in root.descendants() {
            let index = style_key(node, decimals).map(|key| sheet.intern(key));
            sheet.indices.push(index);
        }

        sheet
    }

    fn intern(&mut self, key: String) -> usize {
        if let Some(index) = self.lookup.get(&key) {
            return *index;
        }

        let index = self.table.len();
        self.table.push(key.clone());
        self.lookup.insert(key, index);
        index
    }

    /// Returns a style index of a node with the specified pre-order position.
    #[inline]
    pub fn index(&self, position: usize) -> Option<usize> {
        self.indices.get(position).copied().flatten()
    }

    #[inline]
    pub fn into_table(self) -> Vec<String> {
        self.table
    }
}

/// Builds a canonical style key of a node.
///
/// The key is a space-separated, sorted list of `<code><value>` tokens.
/// Returns `None` when the node doesn't have any non-default style attribute.
pub(crate) fn style_key(node: &Node, decimals: u8) -> Option<String> {
    let mut tokens = Vec::new();
    for attr in node.attributes() {
        let aid = match AId::from_str(&attr.name) {
            Some(v) => v,
            None => continue,
        };

        let code = match aid.style_code() {
            Some(v) => v,
            None => continue,
        };

        if let Some(value) = aid.converter().convert(Some(&attr.value)) {
            let mut token = String::new();
            token.push(code);
            value.write(decimals, &mut token);
            tokens.push(token);
        }
    }

    if tokens.is_empty() {
        return None;
    }

    tokens.sort();
    Some(tokens.join(" "))
}
