//! Servers panel — checkbox list with incremental name filter and an
//! explicit commit step.
//!
//! Toggling checkboxes only stages servers; pressing Enter commits the
//! staged set and triggers the VM inventory fetch for exactly that set.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use wattview_core::Server;

use crate::action::Action;
use crate::panel::{Panel, PanelId};
use crate::state::{DashboardState, LoadState};
use crate::theme;

use super::{checkbox, panel_block, render_loading};

pub struct ServersPanel {
    cursor: usize,
    filter: String,
    /// Typing goes into the filter while true.
    filter_active: bool,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl ServersPanel {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            filter: String::new(),
            filter_active: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    /// Servers passing the current name filter, in backend order.
    fn visible<'a>(&self, state: &'a DashboardState) -> Vec<&'a Server> {
        let needle = self.filter.to_lowercase();
        state
            .servers
            .iter()
            .filter(|s| needle.is_empty() || s.name.to_lowercase().contains(&needle))
            .collect()
    }

    fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let next = (self.cursor as isize + delta).clamp(0, len as isize - 1);
        self.cursor = next as usize;
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.filter.clear();
                self.filter_active = false;
            }
            KeyCode::Enter => self.filter_active = false,
            KeyCode::Backspace => {
                self.filter.pop();
            }
            KeyCode::Char(c) => {
                self.filter.push(c);
                self.cursor = 0;
            }
            _ => {}
        }
        None
    }
}

impl Panel for ServersPanel {
    fn id(&self) -> PanelId {
        PanelId::Servers
    }

    fn wants_text_input(&self) -> bool {
        self.filter_active
    }

    fn tick(&mut self) {
        self.throbber_state.calc_next();
    }

    fn handle_key_event(
        &mut self,
        key: KeyEvent,
        state: &DashboardState,
    ) -> Result<Option<Action>> {
        if self.filter_active {
            return Ok(self.handle_filter_key(key));
        }

        let visible = self.visible(state);
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                self.move_cursor(1, visible.len());
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.move_cursor(-1, visible.len());
            }
            (KeyModifiers::NONE, KeyCode::Char('g')) => self.cursor = 0,
            (KeyModifiers::SHIFT, KeyCode::Char('G')) => {
                self.cursor = visible.len().saturating_sub(1);
            }
            (KeyModifiers::NONE, KeyCode::Char(' ')) => {
                if let Some(server) = visible.get(self.cursor) {
                    return Ok(Some(Action::ToggleServer(server.id)));
                }
            }
            (KeyModifiers::NONE, KeyCode::Enter) => {
                return Ok(Some(Action::CommitServers));
            }
            (KeyModifiers::NONE, KeyCode::Char('/')) => self.filter_active = true,
            (KeyModifiers::NONE, KeyCode::Char('r')) => {
                return Ok(Some(Action::RefreshServers));
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, state: &DashboardState, focused: bool) {
        let staged = state.selection.staged_count();
        let title = if staged > 0 {
            format!("Servers ({staged} staged)")
        } else {
            "Servers".to_owned()
        };
        let inner = panel_block(frame, area, &title, focused);

        match &state.servers_load {
            LoadState::Loading => {
                render_loading(frame, inner, "Fetching servers...", &self.throbber_state);
                return;
            }
            LoadState::Error(msg) => {
                let lines = vec![
                    Line::from(Span::styled(msg.as_str(), theme::error_text())),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled("r ", theme::key_hint_key()),
                        Span::styled("retry", theme::key_hint()),
                    ]),
                ];
                frame.render_widget(Paragraph::new(lines), inner);
                return;
            }
            LoadState::Idle | LoadState::Loaded => {}
        }

        let layout = Layout::vertical([
            Constraint::Length(1), // filter line
            Constraint::Min(1),    // list
            Constraint::Length(1), // hints
        ])
        .split(inner);

        let filter_line = if self.filter_active || !self.filter.is_empty() {
            let caret = if self.filter_active { "▏" } else { "" };
            Line::from(vec![
                Span::styled("/", theme::key_hint_key()),
                Span::styled(format!("{}{caret}", self.filter), theme::row()),
            ])
        } else {
            Line::from(Span::styled("/ to filter", theme::muted()))
        };
        frame.render_widget(Paragraph::new(filter_line), layout[0]);

        let visible = self.visible(state);
        if visible.is_empty() {
            let text = if state.servers.is_empty() {
                "No servers"
            } else {
                "No servers match the filter"
            };
            frame.render_widget(Paragraph::new(text).style(theme::muted()), layout[1]);
        } else {
            let rows: Vec<Line> = visible
                .iter()
                .enumerate()
                .skip(scroll_offset(self.cursor, layout[1].height))
                .map(|(i, server)| {
                    let is_staged = state.selection.is_staged(server.id);
                    let marker_style = if is_staged {
                        theme::checked()
                    } else {
                        theme::muted()
                    };
                    let row_style = if focused && i == self.cursor {
                        theme::row_selected()
                    } else {
                        theme::row()
                    };
                    Line::from(vec![
                        Span::styled(format!(" {} ", checkbox(is_staged)), marker_style),
                        Span::styled(format!("{}  {}", server.name, server.ip), row_style),
                    ])
                })
                .collect();
            frame.render_widget(Paragraph::new(rows), layout[1]);
        }

        let hints = Line::from(vec![
            Span::styled(" Space ", theme::key_hint_key()),
            Span::styled("toggle  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("fetch VMs", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);
    }
}

/// First visible row index so the cursor stays on screen.
fn scroll_offset(cursor: usize, viewport_rows: u16) -> usize {
    let rows = viewport_rows.max(1) as usize;
    cursor.saturating_sub(rows - 1)
}
