// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Conversion options.
#[derive(Clone, Debug)]
pub struct Options {
    /// Set the numeric precision.
    ///
    /// A number is rounded to this amount of fractional digits only
    /// when the rounded form is shorter than the shortest one.
    /// So `10` stays `10` and never becomes `10.00`.
    ///
    /// Affects style values, shape commands and transforms.
    ///
    /// Default: 2
    pub decimals: u8,

    /// Merge adjacent sibling nodes that contain only commands.
    ///
    /// Merged nodes can no longer be addressed individually.
    ///
    /// Default: true
    pub merge_commands: bool,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            decimals: 2,
            merge_commands: true,
        }
    }
}
