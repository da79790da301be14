//! Result panel — pure rendering of the energy outcome.
//!
//! Four faces: nothing yet, computing, a report, or a fetch error. A
//! failed submit keeps the previous report in state but shows the error
//! until the next attempt.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::action::Action;
use crate::panel::{Panel, PanelId};
use crate::state::{DashboardState, LoadState};
use crate::theme;

use super::{panel_block, render_loading};

pub struct ResultPanel {
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl ResultPanel {
    pub fn new() -> Self {
        Self {
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }
}

impl Panel for ResultPanel {
    fn id(&self) -> PanelId {
        PanelId::Result
    }

    fn tick(&mut self) {
        self.throbber_state.calc_next();
    }

    fn handle_key_event(
        &mut self,
        key: KeyEvent,
        _state: &DashboardState,
    ) -> Result<Option<Action>> {
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Enter) => Ok(Some(Action::Submit)),
            _ => Ok(None),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, state: &DashboardState, focused: bool) {
        let inner = panel_block(frame, area, "Energy Consumption", focused);

        match &state.result_load {
            LoadState::Loading => {
                render_loading(frame, inner, "Computing...", &self.throbber_state);
                return;
            }
            LoadState::Error(msg) => {
                frame.render_widget(
                    Paragraph::new(Line::from(Span::styled(msg.clone(), theme::error_text()))),
                    inner,
                );
                return;
            }
            LoadState::Idle | LoadState::Loaded => {}
        }

        let line = match &state.result {
            Some(report) if !report.is_null() => Line::from(vec![
                Span::styled("Total Consumption: ", theme::row()),
                Span::styled(report.display_value(), theme::value_text()),
                Span::styled(" kWh", theme::row()),
            ]),
            _ => Line::from(Span::styled("No data available", theme::muted())),
        };

        frame.render_widget(Paragraph::new(line), inner);
    }
}
