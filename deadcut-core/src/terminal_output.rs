//! Simple terminal output functions for deadcut-core.
//!
//! Every line goes through the `log` facade so the CLI's logger decides where
//! it ends up; these helpers only shape the text into the section/status
//! hierarchy the run output uses.

use console::style;
use log::{error, info, warn};
use owo_colors::OwoColorize;

const STATUS_LABEL_WIDTH: usize = 15;

/// Check if color should be used (respects NO_COLOR environment variable)
fn should_use_color() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// Print a section header (Level 1 - Main sections with cyan color)
pub fn print_section(title: &str) {
    info!("");
    if should_use_color() {
        info!("===== {} =====", title.to_uppercase().cyan().bold());
    } else {
        info!("===== {} =====", title.to_uppercase());
    }
    info!("");
}

/// Print a processing step (Level 2 - Subsections with 2 spaces indentation and bold)
pub fn print_processing(message: &str) {
    if should_use_color() {
        info!("  » {}", style(message).bold());
    } else {
        info!("  » {message}");
    }
}

/// Print a status line (Level 4 - Primary info with 6 spaces indentation)
pub fn print_status(label: &str, value: &str, highlight: bool) {
    if should_use_color() && highlight {
        info!("{}", status_line(label, &style(value).bold().to_string()));
    } else {
        info!("{}", status_line(label, value));
    }
}

/// Print a success message (Level 2 - Success with 2 spaces indentation and green color)
pub fn print_success(message: &str) {
    if should_use_color() {
        info!("  ✓ {}", message.green());
    } else {
        info!("  ✓ {message}");
    }
}

/// Print a sub-item (Level 3 - Operations with 4 spaces indentation)
pub fn print_sub_item(message: &str) {
    info!("    {message}");
}

/// Print a warning that does not stop the run
pub fn print_warning(message: &str) {
    if should_use_color() {
        warn!("  ! {}", message.yellow());
    } else {
        warn!("  ! {message}");
    }
}

/// Print an error with optional context
pub fn print_error(title: &str, message: &str, suggestion: Option<&str>) {
    if should_use_color() {
        error!("  ✗ {}: {}", title.red().bold(), message);
    } else {
        error!("  ✗ {title}: {message}");
    }
    if let Some(hint) = suggestion {
        error!("    {hint}");
    }
}

fn status_line(label: &str, value: &str) -> String {
    let padding = STATUS_LABEL_WIDTH.saturating_sub(label.len()).max(1);
    format!("      {}:{} {}", label, " ".repeat(padding), value)
}
