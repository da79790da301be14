//! Date-range panel — two editable wall-clock fields with inline
//! validation and the local-offset note.
//!
//! Values stay raw strings until submission; this panel never parses
//! them. Validation messages come from the last submit attempt via
//! [`DashboardState::validation`].

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use wattview_core::DateField;

use crate::action::Action;
use crate::panel::{Panel, PanelId};
use crate::state::DashboardState;
use crate::theme;

use super::panel_block;

const PLACEHOLDER: &str = "YYYY-MM-DDTHH:MM";

pub struct DateRangePanel {
    active: DateField,
    editing: bool,
}

impl DateRangePanel {
    pub fn new() -> Self {
        Self {
            active: DateField::Start,
            editing: false,
        }
    }

    fn other_field(&self) -> DateField {
        match self.active {
            DateField::Start => DateField::End,
            DateField::End => DateField::Start,
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent, state: &DashboardState) -> Option<Action> {
        let current = state.date_range.get(self.active);
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.editing = false;
                None
            }
            KeyCode::Backspace => {
                let mut value = current.to_owned();
                value.pop();
                Some(Action::SetDateField(self.active, value))
            }
            // Only the characters a datetime-local string can contain.
            KeyCode::Char(c) if c.is_ascii_digit() || matches!(c, '-' | ':' | 'T') => {
                let mut value = current.to_owned();
                value.push(c);
                Some(Action::SetDateField(self.active, value))
            }
            _ => None,
        }
    }

    fn render_field(
        &self,
        lines: &mut Vec<Line<'static>>,
        state: &DashboardState,
        field: DateField,
        focused: bool,
    ) {
        let is_active = focused && self.active == field;
        let marker = if is_active { "▸ " } else { "  " };

        lines.push(Line::from(vec![
            Span::styled(marker, theme::key_hint_key()),
            Span::styled(
                format!("{}:", field.label()),
                if is_active {
                    theme::title_style()
                } else {
                    theme::row()
                },
            ),
        ]));

        let value = state.date_range.get(field);
        let value_line = if value.is_empty() && !(is_active && self.editing) {
            Span::styled(format!("    {PLACEHOLDER}"), theme::muted())
        } else {
            let caret = if is_active && self.editing { "▏" } else { "" };
            Span::styled(format!("    {value}{caret}"), theme::row())
        };
        lines.push(Line::from(value_line));

        if let Some(message) = state.validation.get(&field) {
            lines.push(Line::from(Span::styled(
                format!("    {message}"),
                theme::error_text(),
            )));
        }
        lines.push(Line::from(""));
    }
}

impl Panel for DateRangePanel {
    fn id(&self) -> PanelId {
        PanelId::DateRange
    }

    fn wants_text_input(&self) -> bool {
        self.editing
    }

    fn handle_key_event(
        &mut self,
        key: KeyEvent,
        state: &DashboardState,
    ) -> Result<Option<Action>> {
        if self.editing {
            return Ok(self.handle_edit_key(key, state));
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('j' | 'k') | KeyCode::Down | KeyCode::Up) => {
                self.active = self.other_field();
            }
            (KeyModifiers::NONE, KeyCode::Enter | KeyCode::Char('e' | 'i')) => {
                self.editing = true;
            }
            (KeyModifiers::NONE, KeyCode::Char('c')) => {
                return Ok(Some(Action::SetDateField(self.active, String::new())));
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, state: &DashboardState, focused: bool) {
        let inner = panel_block(frame, area, "Date Range", focused);

        let mut lines = Vec::new();
        self.render_field(&mut lines, state, DateField::Start, focused);
        self.render_field(&mut lines, state, DateField::End, focused);

        lines.push(Line::from(vec![
            Span::styled("Times are local (", theme::muted()),
            Span::styled(state.zone_label.clone(), theme::row()),
            Span::styled("), converted to UTC on submit", theme::muted()),
        ]));
        lines.push(Line::from(vec![
            Span::styled(" Enter ", theme::key_hint_key()),
            Span::styled("edit  ", theme::key_hint()),
            Span::styled("j/k ", theme::key_hint_key()),
            Span::styled("switch field  ", theme::key_hint()),
            Span::styled("c ", theme::key_hint_key()),
            Span::styled("clear", theme::key_hint()),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
