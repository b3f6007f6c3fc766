//! Report formatting helpers for terminal output
//!
//! Charts in the reports are drawn as text: horizontal bars, percentages
//! and ruled headers.

/// Format a percentage with precision that suits its size
pub fn format_percentage(pct: f64) -> String {
    if pct > 0.0 && pct < 0.1 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Horizontal bar, `value / max_value` of `width` cells filled
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Progress bar capped at 100%, with a marker when the value overflows
pub fn format_progress(percentage: f64, width: usize) -> String {
    let bar = format_bar(percentage.min(100.0), 100.0, width);
    if percentage > 100.0 {
        format!("{}!", bar)
    } else {
        bar
    }
}

/// Title line followed by a rule of the same width
pub fn format_title(title: &str, width: usize) -> String {
    format!("{}\n{}\n", title, double_separator(width))
}

/// Single-line rule
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Double-line rule
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}
