//! Number formatting for report tables.

/// Absent values render as a dash.
pub const ABSENT: &str = "—";

/// Fixed-point with `decimals` digits, or [`ABSENT`].
pub fn fixed(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => ABSENT.to_string(),
    }
}

/// Scientific notation with three significant decimals.
pub fn sci(value: f64) -> String {
    format!("{:.3e}", value)
}

/// Volume in µL, switching to scientific notation for very small amounts.
pub fn volume_ul(value: f64) -> String {
    if value != 0.0 && value.abs() < 0.01 {
        format!("{} µL", sci(value))
    } else {
        format!("{:.2} µL", value)
    }
}
