/// Width of rule and section-header lines in the rendered report.
pub const RULE_WIDTH: usize = 80;

/// A full-width `====` rule line.
pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// A `--<title>----` header padded with dashes to the full rule width.
/// Titles longer than the width are emitted unpadded.
pub fn section_header(title: &str) -> String {
    let padding = RULE_WIDTH.saturating_sub(title.chars().count() + 2);
    format!("--{title}{}", "-".repeat(padding))
}

/// Renders a millisecond duration as comma-separated units, largest first.
///
/// Days, hours, and minutes appear only when nonzero; the seconds component
/// is always present with exactly three millisecond digits, so even
/// sub-second durations produce visible output. Fractional milliseconds
/// truncate toward zero.
pub fn elapsed(milliseconds: f64) -> String {
    let mut remaining = milliseconds as u64;
    let millis = remaining % 1000;
    remaining /= 1000;
    let seconds = remaining % 60;
    remaining /= 60;
    let minutes = remaining % 60;
    remaining /= 60;
    let hours = remaining % 24;
    let days = remaining / 24;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days} days"));
    }
    if hours > 0 {
        parts.push(format!("{hours} hours"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes} minutes"));
    }
    parts.push(format!("{seconds}.{millis:03} seconds"));
    parts.join(", ")
}
