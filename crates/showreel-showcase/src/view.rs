#![forbid(unsafe_code)]

//! Text rendering of the display payload.
//!
//! Layout, in order: current-feature block (title, heading, bullets), the
//! entry rail with the active marker, the progress bar, and the
//! auto-advance indicator while the driver runs.

use showreel_core::RenderModel;
use unicode_width::UnicodeWidthStr;

const PROGRESS_CELLS: usize = 24;

/// Render the payload as display lines.
#[must_use]
pub fn render_lines(model: &RenderModel<'_>) -> Vec<String> {
    let mut lines = Vec::new();

    let pin = if model.pinned { " [pinned]" } else { "" };
    lines.push(format!(
        "{} {}{pin}",
        model.current.title(),
        model.current.heading()
    ));
    for point in model.current.description() {
        lines.push(format!("  • {point}"));
    }
    lines.push(String::new());

    let rail_width = model
        .items
        .iter()
        .map(|item| item.entry.heading().width())
        .max()
        .unwrap_or(0);
    for item in &model.items {
        let marker = if item.is_active { '▸' } else { ' ' };
        lines.push(format!(
            "{marker} FEATURE {}  {}",
            item.entry.id(),
            pad(item.entry.heading(), rail_width)
        ));
    }
    lines.push(String::new());

    lines.push(format!(
        "Progress [{}] {} of {}",
        progress_bar(model.progress),
        model.position,
        model.count
    ));
    if model.auto_advancing {
        lines.push("Auto-advancing features...".to_string());
    }
    lines
}

fn progress_bar(progress: f64) -> String {
    let filled = (progress * PROGRESS_CELLS as f64).round() as usize;
    let filled = filled.min(PROGRESS_CELLS);
    let mut bar = String::with_capacity(PROGRESS_CELLS * 3);
    for _ in 0..filled {
        bar.push('█');
    }
    for _ in filled..PROGRESS_CELLS {
        bar.push('░');
    }
    bar
}

fn pad(text: &str, width: usize) -> String {
    let current = text.width();
    let mut out = String::from(text);
    for _ in current..width {
        out.push(' ');
    }
    out
}
