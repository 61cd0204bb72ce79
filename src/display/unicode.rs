//! Unicode formatting utilities
use std::ops::Range;

use crate::value::Value;

/// The typographic minus sign, `U+2212`.
pub const MINUS: char = '\u{2212}';

/// Format a non-negative number with at most `precision` decimals, trimming trailing zeros.
///
/// Values inside `fixed_range` are written in positional notation, everything
/// else in scientific notation (`1.5e7`).
///
/// # Example
/// ```
/// # use slicefit::display::unicode::float;
/// assert_eq!(float(2.5, Some(1e-3..1e6), 4), "2.5");
/// assert_eq!(float(1.0 / 3.0, Some(1e-3..1e6), 4), "0.3333");
/// assert_eq!(float(12_345_678.0, Some(1e-3..1e6), 4), "1.2346e7");
/// assert_eq!(float(0.000_25, Some(1e-3..1e6), 4), "2.5e-4");
/// ```
pub fn float<T: Value>(n: T, fixed_range: Option<Range<T>>, precision: usize) -> String {
    match fixed_range {
        Some(range) if range.contains(&n) => trim_decimals(&format!("{n:.precision$}")).to_string(),
        _ => {
            let s = format!("{n:.precision$e}");
            match s.split_once('e') {
                Some((mantissa, exponent)) => format!("{}e{exponent}", trim_decimals(mantissa)),
                None => s,
            }
        }
    }
}

/// Strips trailing zeros after a decimal point, and the point itself if nothing is left.
fn trim_decimals(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Convert a string into a superscript string, ignoring invalid characters
///
/// ```
/// # use slicefit::display::unicode::superscript;
/// assert_eq!(superscript("12"), "¹²");
/// assert_eq!(superscript("-3"), "⁻³");
/// ```
pub fn superscript(s: &str) -> String {
    s.chars().filter_map(to_superscript).collect()
}

fn to_superscript(c: char) -> Option<char> {
    match c {
        '0' => Some('⁰'),
        '1' => Some('¹'),
        '2' => Some('²'),
        '3' => Some('³'),
        '4' => Some('⁴'),
        '5' => Some('⁵'),
        '6' => Some('⁶'),
        '7' => Some('⁷'),
        '8' => Some('⁸'),
        '9' => Some('⁹'),
        '+' => Some('⁺'),
        '-' => Some('⁻'),
        '(' => Some('⁽'),
        ')' => Some('⁾'),
        _ => None,
    }
}
