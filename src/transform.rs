// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::f64::consts::FRAC_PI_4;

use svgtypes::{TransformListParser, TransformListToken as Token};

use crate::numbers;

/// Parameters of the identity transform in the output order.
const DEFAULTS: [f64; 9] = [0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0];

/// A decomposed transform.
///
/// Angles are in radians.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Transform {
    /// Translation along the X axis.
    pub tx: f64,
    /// Translation along the Y axis.
    pub ty: f64,
    /// Scale along the X axis.
    pub sx: f64,
    /// Scale along the Y axis.
    pub sy: f64,
    /// Rotation around the pivot.
    pub rotation: f64,
    /// Rotation pivot X.
    pub pivot_x: f64,
    /// Rotation pivot Y.
    pub pivot_y: f64,
    /// Skew along the X axis.
    pub skew_x: f64,
    /// Skew along the Y axis.
    pub skew_y: f64,
}

impl Default for Transform {
    #[inline]
    fn default() -> Self {
        Transform {
            tx: 0.0,
            ty: 0.0,
            sx: 1.0,
            sy: 1.0,
            rotation: 0.0,
            pivot_x: 0.0,
            pivot_y: 0.0,
            skew_x: 0.0,
            skew_y: 0.0,
        }
    }
}

impl Transform {
    /// Decomposes an `a b c d e f` affine matrix.
    ///
    /// When both skew angles are equal, they are collapsed into a rotation.
    ///
    /// The result is undefined (contains NaN) for degenerate matrices,
    /// like the ones with `a = b = 0` or `c = d = 0`.
    pub fn from_matrix(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        let mut skew_x = (-c / d).atan();
        let mut skew_y = (b / a).atan();

        let sy = if skew_x > -FRAC_PI_4 && skew_x < FRAC_PI_4 {
            d / skew_x.cos()
        } else {
            -c / skew_x.sin()
        };

        let sx = if skew_y > -FRAC_PI_4 && skew_y < FRAC_PI_4 {
            a / skew_y.cos()
        } else {
            b / skew_y.sin()
        };

        let mut rotation = 0.0;
        if skew_x == skew_y {
            rotation = skew_x;
            skew_x = 0.0;
            skew_y = 0.0;
        }

        Transform {
            tx: e,
            ty: f,
            sx,
            sy,
            rotation,
            pivot_x: 0.0,
            pivot_y: 0.0,
            skew_x,
            skew_y,
        }
    }

    /// Parses a `transform` attribute value.
    ///
    /// A `matrix` takes precedence over all other operations.
    /// Otherwise, each operation sets its own slots and the last one of a kind wins.
    ///
    /// Parsing stops at the first malformed operation.
    pub fn from_str(text: &str) -> Self {
        let mut tokens = Vec::new();
        for token in TransformListParser::from(text) {
            match token {
                Ok(token) => tokens.push(token),
                Err(e) => {
                    log::warn!("Failed to parse a transform '{}' cause {}.", text, e);
                    break;
                }
            }
        }

        Transform::from_tokens(&tokens)
    }

    fn from_tokens(tokens: &[Token]) -> Self {
        let matrix = tokens.iter().rev().find_map(|t| match *t {
            Token::Matrix { a, b, c, d, e, f } => Some(Transform::from_matrix(a, b, c, d, e, f)),
            _ => None,
        });

        if let Some(ts) = matrix {
            return ts;
        }

        let mut ts = Transform::default();
        let mut i = 0;
        while i < tokens.len() {
            // `rotate(a cx cy)` is reported as `translate(cx cy) rotate(a) translate(-cx -cy)`.
            if let [Token::Translate { tx: cx, ty: cy }, Token::Rotate { angle }, Token::Translate { tx, ty }, ..] =
                tokens[i..]
            {
                if tx == -cx && ty == -cy {
                    ts.rotation = angle.to_radians();
                    ts.pivot_x = cx;
                    ts.pivot_y = cy;
                    i += 3;
                    continue;
                }
            }

            match tokens[i] {
                Token::Translate { tx, ty } => {
                    ts.tx = tx;
                    ts.ty = ty;
                }
                Token::Scale { sx, sy } => {
                    ts.sx = sx;
                    ts.sy = sy;
                }
                Token::Rotate { angle } => {
                    ts.rotation = angle.to_radians();
                    ts.pivot_x = 0.0;
                    ts.pivot_y = 0.0;
                }
                Token::SkewX { angle } => ts.skew_x = angle.to_radians(),
                Token::SkewY { angle } => ts.skew_y = angle.to_radians(),
                Token::Matrix { .. } => {}
            }

            i += 1;
        }

        ts
    }

    /// Returns all parameters in the output order.
    #[inline]
    pub fn to_array(&self) -> [f64; 9] {
        [
            self.tx,
            self.ty,
            self.sx,
            self.sy,
            self.rotation,
            self.pivot_x,
            self.pivot_y,
            self.skew_x,
            self.skew_y,
        ]
    }

    /// Returns rounded parameters without the trailing default ones.
    ///
    /// The identity transform produces an empty list.
    pub fn to_params(&self, decimals: u8) -> Vec<f64> {
        let mut params: Vec<_> = self
            .to_array()
            .iter()
            .map(|n| numbers::trim_precision(*n, decimals))
            .collect();

        while let Some(last) = params.last() {
            if *last == DEFAULTS[params.len() - 1] {
                params.pop();
            } else {
                break;
            }
        }

        params
    }
}
