//! Number and indent formatting shared by the writer and materials.

use config::constants::{INDENT_WIDTH, MAX_INDENT};

/// Formats `value` with at most `precision` decimals, trimming trailing
/// zeros. Values within `zero_tolerance` of zero are written as `0`.
pub(crate) fn number(value: f64, precision: usize, zero_tolerance: f64) -> String {
    if value.abs() < zero_tolerance {
        return "0".to_string();
    }
    let mut text = format!("{value:.precision$}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text.remove(0);
    }
    text
}

/// Leading spaces for an indent level, clamped to [`MAX_INDENT`].
pub(crate) fn pad(level: usize) -> String {
    " ".repeat(level.min(MAX_INDENT) * INDENT_WIDTH)
}
