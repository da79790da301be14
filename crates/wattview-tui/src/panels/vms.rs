//! VMs panel — inventory grouped by server, one checkbox per VM.
//!
//! Rows mirror the current [`VmInventory`]; the cursor moves over VM
//! rows only. Inventory entries that did not resolve to a committed
//! server are rendered but not selectable, so selection can never be
//! built on a server that was not fetched.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use wattview_core::{ServerId, VmRecord};

use crate::action::Action;
use crate::panel::{Panel, PanelId};
use crate::state::{DashboardState, LoadState};
use crate::theme;

use super::{checkbox, panel_block, render_loading};

/// A selectable VM row: its owning server and the record itself.
struct VmRow<'a> {
    server: ServerId,
    vm: &'a VmRecord,
}

pub struct VmsPanel {
    cursor: usize,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl VmsPanel {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    /// Flat list of selectable VM rows across all resolved entries.
    fn selectable<'a>(state: &'a DashboardState) -> Vec<VmRow<'a>> {
        state
            .inventory
            .entries()
            .iter()
            .filter_map(|entry| entry.server_id.map(|id| (id, entry)))
            .flat_map(|(id, entry)| entry.vms.iter().map(move |vm| VmRow { server: id, vm }))
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
}

impl Panel for VmsPanel {
    fn id(&self) -> PanelId {
        PanelId::Vms
    }

    fn tick(&mut self) {
        self.throbber_state.calc_next();
    }

    fn handle_key_event(
        &mut self,
        key: KeyEvent,
        state: &DashboardState,
    ) -> Result<Option<Action>> {
        let rows = Self::selectable(state);
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                self.move_cursor(1, rows.len());
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.move_cursor(-1, rows.len());
            }
            (KeyModifiers::NONE, KeyCode::Char('g')) => self.cursor = 0,
            (KeyModifiers::SHIFT, KeyCode::Char('G')) => {
                self.cursor = rows.len().saturating_sub(1);
            }
            (KeyModifiers::NONE, KeyCode::Char(' ')) => {
                if let Some(row) = rows.get(self.cursor) {
                    let checked = !state.vm_selection.is_selected(row.server, &row.vm.ip);
                    return Ok(Some(Action::ToggleVm {
                        server: row.server,
                        vm: row.vm.clone(),
                        checked,
                    }));
                }
            }
            // Refetch the inventory for the committed set.
            (KeyModifiers::NONE, KeyCode::Char('r')) => {
                return Ok(Some(Action::CommitServers));
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, state: &DashboardState, focused: bool) {
        let selected = state.vm_selection.vm_count();
        let title = if selected > 0 {
            format!("VMs ({selected} selected)")
        } else {
            "VMs".to_owned()
        };
        let inner = panel_block(frame, area, &title, focused);

        match &state.inventory_load {
            LoadState::Loading => {
                render_loading(frame, inner, "Fetching VMs...", &self.throbber_state);
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
            LoadState::Idle => {
                let hint = "Stage servers and press Enter to load their VMs";
                frame.render_widget(Paragraph::new(hint).style(theme::muted()), inner);
                return;
            }
            LoadState::Loaded => {}
        }

        if state.inventory.is_empty() {
            frame.render_widget(
                Paragraph::new("No VMs available").style(theme::muted()),
                inner,
            );
            return;
        }

        let layout = Layout::vertical([
            Constraint::Min(1),    // grouped list
            Constraint::Length(1), // hints
        ])
        .split(inner);

        let mut lines = Vec::new();
        let mut row_idx = 0usize;
        for entry in state.inventory.entries() {
            match entry.server_id {
                Some(server_id) => {
                    lines.push(Line::from(Span::styled(
                        entry.wire_key.clone(),
                        theme::group_header(),
                    )));
                    if entry.vms.is_empty() {
                        lines.push(Line::from(Span::styled(
                            "  No VMs available",
                            theme::muted(),
                        )));
                    }
                    for vm in &entry.vms {
                        let is_selected = state.vm_selection.is_selected(server_id, &vm.ip);
                        let marker_style = if is_selected {
                            theme::checked()
                        } else {
                            theme::muted()
                        };
                        let row_style = if focused && row_idx == self.cursor {
                            theme::row_selected()
                        } else {
                            theme::row()
                        };
                        lines.push(Line::from(vec![
                            Span::styled(format!("  {} ", checkbox(is_selected)), marker_style),
                            Span::styled(format!("{} ({})", vm.name, vm.ip), row_style),
                        ]));
                        row_idx += 1;
                    }
                }
                None => {
                    // Wire key the backend returned for a server we never
                    // committed — display-only.
                    lines.push(Line::from(Span::styled(
                        format!("{} (not committed)", entry.wire_key),
                        theme::muted(),
                    )));
                }
            }
        }

        frame.render_widget(Paragraph::new(lines), layout[0]);

        let hints = Line::from(vec![
            Span::styled(" Space ", theme::key_hint_key()),
            Span::styled("toggle VM", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[1]);
    }
}
