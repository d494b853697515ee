// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`svg2bvg` converts an [SVG] document into a compact BVG document.

## Format

A BVG document contains:

- `styles` - a list of unique styles.
  Each style is a sorted, space-separated list of `<code><value>` tokens,
  like `F-` or `Fff0000 L0000ff w2`.
- `defs` - gradients, patterns and shapes by ID.
- `nodes` - a tree of nodes. Each node can have an `id`, a decomposed transform `t`
  and a `cmds` string.

A `cmds` string is a sequence of commands:

- `$S<index>` - use a style from the `styles` list.
- `$r`, `$c`, `$e`, `$l`, `$s`, `$g`, `$p` - rect, circle, ellipse, line,
  polyline, polygon and path, followed by comma-separated values.

A transform is stored as `[tx, ty, scaleX, scaleY, rotation, pivotX, pivotY, skewX, skewY]`
without the trailing default values.

## Example

```
let svg = "<svg xmlns='http://www.w3.org/2000/svg'>
    <rect x='10' y='10' width='100' height='50' fill='#ff0000'/>
</svg>";

let doc = svg2bvg::convert_str(svg, &svg2bvg::Options::default()).unwrap();
assert_eq!(doc.styles, vec!["Fff0000"]);
assert_eq!(doc.nodes[0].nodes[0].cmds.as_deref(), Some("$S0$r10,10,100,50"));
```

## Limitations

- Only absolute units are supported. Relative units produce NaN.
- CSS support is limited to the `style` attribute.
- The conversion is one-way.

[SVG]: https://en.wikipedia.org/wiki/Scalable_Vector_Graphics
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod attributes;
mod converter;
mod document;
mod error;
mod numbers;
mod options;
mod paint_server;
mod shapes;
mod style;
mod transform;
mod tree;

pub use crate::converter::{convert, convert_str};
pub use crate::document::{Definition, Document, OutputNode, Pattern, FORMAT_TAG, FORMAT_VERSION};
pub use crate::error::Error;
pub use crate::options::Options;
pub use crate::transform::Transform;
pub use crate::tree::{Attribute, Descendants, Node, TEXT_TAG_NAME};

pub use roxmltree;
pub use svgtypes;
