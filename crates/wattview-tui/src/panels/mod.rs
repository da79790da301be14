//! Panel implementations. Each panel is a [`Panel`] rendered into one
//! quadrant of the dashboard.

mod daterange;
mod result;
mod servers;
mod vms;

use ratatui::layout::Rect;
use ratatui::widgets::{Block, BorderType, Borders};

use crate::panel::Panel;
use crate::theme;

pub use daterange::DateRangePanel;
pub use result::ResultPanel;
pub use servers::ServersPanel;
pub use vms::VmsPanel;

/// Create all four panels in focus-cycle order.
pub fn create_panels() -> Vec<Box<dyn Panel>> {
    vec![
        Box::new(ServersPanel::new()),
        Box::new(VmsPanel::new()),
        Box::new(DateRangePanel::new()),
        Box::new(ResultPanel::new()),
    ]
}

/// Standard panel frame: rounded border, focus-aware border color.
/// Returns the inner drawing area.
pub(crate) fn panel_block(
    frame: &mut ratatui::Frame,
    area: Rect,
    title: &str,
    focused: bool,
) -> Rect {
    let block = Block::default()
        .title(format!(" {title} "))
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            theme::border_focused()
        } else {
            theme::border_default()
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Standard loading line with an animated throbber.
pub(crate) fn render_loading(
    frame: &mut ratatui::Frame,
    area: Rect,
    label: &str,
    throbber_state: &throbber_widgets_tui::ThrobberState,
) {
    let throbber = throbber_widgets_tui::Throbber::default()
        .label(label)
        .throbber_style(ratatui::style::Style::default().fg(theme::AMBER));
    frame.render_stateful_widget(throbber, area, &mut throbber_state.clone());
}

/// Checkbox marker for list rows.
pub(crate) fn checkbox(selected: bool) -> &'static str {
    if selected { "[x]" } else { "[ ]" }
}
