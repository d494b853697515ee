// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Numbers formatting.
//!
//! All numbers in the output are printed the same way a JavaScript runtime
//! prints them, so `10` and not `10.0`.

/// Rounds a number to `decimals` fractional digits.
///
/// The rounded value is used only when its fixed-point representation is
/// strictly shorter than the shortest representation of the original number.
/// Otherwise the number is returned as is.
///
/// NaN and infinities are returned unchanged.
pub(crate) fn trim_precision(n: f64, decimals: u8) -> f64 {
    if !n.is_finite() {
        return n;
    }

    let mut buf = ryu_js::Buffer::new();
    let raw_len = format_js(n, &mut buf).len();
    let fixed = format!("{:.*}", decimals as usize, n);
    if fixed.len() < raw_len {
        fixed.parse().unwrap_or(n)
    } else {
        n
    }
}

/// Rounds a number with [`trim_precision`] and appends it to `out`.
pub(crate) fn write_number(n: f64, decimals: u8, out: &mut String) {
    let mut buf = ryu_js::Buffer::new();
    out.push_str(format_js(trim_precision(n, decimals), &mut buf));
}

/// Formats a number like JavaScript's `String(n)`.
fn format_js(mut n: f64, buf: &mut ryu_js::Buffer) -> &str {
    if n.is_nan() {
        return "NaN";
    }

    if n.is_infinite() {
        return if n.is_sign_positive() { "Infinity" } else { "-Infinity" };
    }

    // JavaScript prints -0 as 0.
    if n == 0.0 {
        n = 0.0;
    }

    buf.format_finite(n)
}

/// Checks that a number is an integer that can be stored in `i64` without loss.
pub(crate) fn is_safe_integer(n: f64) -> bool {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_number(n: f64) -> String {
        let mut buf = ryu_js::Buffer::new();
        format_js(n, &mut buf).to_string()
    }

    #[test]
    fn integers_are_not_padded() {
        assert_eq!(trim_precision(10.0, 2), 10.0);
        assert_eq!(format_number(trim_precision(10.0, 2)), "10");
        assert_eq!(format_number(trim_precision(-250.0, 2)), "-250");
    }

    #[test]
    fn long_fractions_are_rounded() {
        assert_eq!(trim_precision(3.14159, 2), 3.14);
        assert_eq!(trim_precision(0.333333, 2), 0.33);
        assert_eq!(trim_precision(2.999, 2), 3.0);
    }

    #[test]
    fn short_fractions_are_kept() {
        assert_eq!(trim_precision(0.5, 2), 0.5);
        assert_eq!(format_number(trim_precision(0.5, 2)), "0.5");
        assert_eq!(trim_precision(1.25, 2), 1.25);
    }

    #[test]
    fn custom_precision() {
        assert_eq!(trim_precision(3.14159, 3), 3.142);
        assert_eq!(trim_precision(3.14159, 0), 3.0);
    }

    #[test]
    fn trimming_is_idempotent() {
        for n in [0.0, 1.0, 15.0, 1.5, 3.14159, -7.777, 1e-7, 123456.789] {
            let once = trim_precision(n, 2);
            let twice = trim_precision(once, 2);
            assert_eq!(format_number(once), format_number(twice));
        }
    }

    #[test]
    fn never_longer_than_raw() {
        for n in [0.0, 1.0, 0.1, 1.5, 3.14159, 100.0, 0.001] {
            assert!(format_number(trim_precision(n, 2)).len() <= format_number(n).len());
        }
    }

    #[test]
    fn special_values() {
        assert!(trim_precision(f64::NAN, 2).is_nan());
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(trim_precision(-0.001, 2)), "0");
    }

    #[test]
    fn write_into_buffer() {
        let mut s = String::from("$c");
        write_number(10.0, 2, &mut s);
        s.push(',');
        write_number(1.23456, 2, &mut s);
        assert_eq!(s, "$c10,1.23");
    }

    #[test]
    fn safe_integers() {
        assert!(is_safe_integer(5.0));
        assert!(is_safe_integer(-5.0));
        assert!(!is_safe_integer(5.5));
        assert!(!is_safe_integer(f64::NAN));
        assert!(!is_safe_integer(1e300));
    }
}
