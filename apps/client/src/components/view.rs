//! Plain-text rendering helpers shared by the component views.

use std::fmt::Write;

/// Score shown as a whole percentage: `round(score * 100)`.
pub fn percent(score: f64) -> i64 {
    (score * 100.0).round() as i64
}

pub fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
}

pub fn subheading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "-".repeat(title.chars().count()));
}

pub fn error_banner(out: &mut String, message: &str) {
    let _ = writeln!(out, "[error] {message}");
}

pub fn success_banner(out: &mut String, message: &str) {
    let _ = writeln!(out, "[ok] {message}");
}

/// A button label; disabled buttons are rendered in parentheses.
pub fn button(out: &mut String, label: &str, enabled: bool) {
    if enabled {
        let _ = writeln!(out, "[ {label} ]");
    } else {
        let _ = writeln!(out, "( {label} )");
    }
}

/// A selector line listing every option with the current one marked.
pub fn selector<T: PartialEq + Copy>(
    out: &mut String,
    label: &str,
    options: &[T],
    current: T,
    option_label: fn(&T) -> &'static str,
) {
    let rendered: Vec<String> = options
        .iter()
        .map(|opt| {
            if *opt == current {
                format!("<{}>", option_label(opt))
            } else {
                option_label(opt).to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "{label}: {}", rendered.join(" | "));
}
