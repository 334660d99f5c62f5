//! Small text helpers shared by the reply and audit formatters.

/// Plural suffix for a count: `"s"` unless the count is exactly one.
#[must_use]
pub const fn plural_suffix(count: u64) -> &'static str {
    if count == 1 { "" } else { "s" }
}

/// Capitalised boolean, the way staff-facing replies have always shown it.
#[must_use]
pub const fn bool_label(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Renders a stored float without losing precision.
///
/// Fractional values print as stored (`1.5`, `76.9`); integral values keep one
/// decimal place (`5.0`) so they are never mistaken for truncated integers.
#[must_use]
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Signed bonus, e.g. `+5`, `-12`, `+0`.
#[must_use]
pub fn signed(value: i32) -> String {
    format!("{value:+}")
}
