//! Number formatting for advisory text and reports

/// Format a reading the way the analysis form echoes it back.
///
/// Whole numbers print without a fractional part (`45`, `-3`); anything else
/// uses the shortest representation that round-trips (`12.5`, `0.1`).
pub fn format_reading(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // Covers -0.0
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e21 {
        return format!("{:.0}", value);
    }
    format!("{}", value)
}

/// One decimal place, used for pH and percentages.
///
/// An exact tie between two tenths rounds away from zero (`5.25` -> `5.3`),
/// unlike `{:.1}` which picks the even digit. Only a fractional part of
/// `.25` or `.75` can be an exact tie in binary.
pub fn format_one_decimal(value: f64) -> String {
    let frac = value.fract().abs();
    if frac == 0.25 || frac == 0.75 {
        let rounded = ((value.abs() * 10.0 + 0.5).floor() / 10.0).copysign(value);
        return format!("{:.1}", rounded);
    }
    format!("{:.1}", value)
}
