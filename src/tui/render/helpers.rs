use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::model::task::MAX_PROGRESS;
use crate::util::unicode;

/// Label and fill for a progress bar `width` cells wide.
///
/// The label ("42%") is centered over the whole bar; the second value is how
/// many leading cells are filled.
pub(super) fn progress_bar(progress: u8, width: usize) -> (String, usize) {
    let progress = progress.min(MAX_PROGRESS) as usize;
    let label = unicode::center_to_width(&format!("{}%", progress), width);
    let filled = progress * width / MAX_PROGRESS as usize;
    (label, filled)
}

/// A slider rail with the knob placed by `progress`
pub(super) fn slider_track(progress: u8, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let knob = progress.min(MAX_PROGRESS) as usize * (width - 1) / MAX_PROGRESS as usize;
    let mut track = String::with_capacity(width * 3);
    for i in 0..width {
        track.push(match i.cmp(&knob) {
            std::cmp::Ordering::Less => '\u{2501}',
            std::cmp::Ordering::Equal => '\u{25CF}',
            std::cmp::Ordering::Greater => '\u{2500}',
        });
    }
    track
}

/// Create a centered rectangle within `area`
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
