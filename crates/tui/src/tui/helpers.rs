use std::cmp::min;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::model::TaskStatus;

pub const BG_BASE: Color = Color::Rgb(14, 17, 23);
pub const BG_PANEL: Color = Color::Rgb(22, 26, 34);
pub const BG_ACCENT: Color = Color::Rgb(32, 37, 47);
pub const FG_ACCENT: Color = Color::Rgb(120, 161, 255);

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = min(width, area.width);
    let h = min(height, area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

pub fn inset_rect(area: Rect, padding: u16) -> Rect {
    if area.width == 0 || area.height == 0 {
        return area;
    }
    let px = padding.min(area.width / 2);
    let py = padding.min(area.height / 2);
    Rect {
        x: area.x + px,
        y: area.y + py,
        width: area.width.saturating_sub(px * 2),
        height: area.height.saturating_sub(py * 2),
    }
}

/// Top-right slot for a toast of `text_width` columns, one row below the
/// top edge. `None` when the area is too small to hold any of it.
pub fn toast_rect(area: Rect, text_width: u16) -> Option<Rect> {
    let width = text_width.saturating_add(6).min(area.width);
    let height = area.height.saturating_sub(1).min(3);
    if width == 0 || height == 0 {
        return None;
    }
    Some(Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + 1,
        width,
        height,
    })
}

pub fn accent_title(text: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text.to_owned(),
        Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD),
    )])
}

pub fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::ToDo => Color::Cyan,
        TaskStatus::InProgress => Color::Yellow,
        TaskStatus::Done => Color::Green,
    }
}

pub fn build_help_lines() -> Vec<(&'static str, &'static str)> {
    vec![
        ("j / k or ↓ / ↑", "Move selection"),
        ("Home / End", "First / last row on the page"),
        ("[ / ] or PgUp / PgDn", "Previous / next page"),
        ("p", "Cycle page size (10/20/50/100)"),
        ("a", "Toggle the new task form"),
        ("e", "Edit the title of the selected task"),
        ("s / Enter", "Edit the status of the selected task"),
        ("x / Delete", "Delete the selected task"),
        ("/", "Search title and description"),
        ("f", "Cycle the status filter"),
        ("c", "Clear search and status filter"),
        ("o", "Dismiss the notification"),
        ("h", "Toggle this help overlay"),
        ("q / Ctrl+C", "Quit"),
        ("Esc", "Cancel/close overlays"),
    ]
}
