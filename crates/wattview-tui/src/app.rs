//! Application core — event loop, panel focus, action dispatch.
//!
//! One screen, four panels. All cross-panel state lives in
//! [`DashboardState`]; panels mutate it exclusively through actions
//! processed here, and every fetch completion is fenced against the
//! latest issued generation before it may touch state.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use wattview_api::ApiClient;
use wattview_core::{FetchKind, FetchSeq, VmInventory, build_request};

use crate::action::Action;
use crate::event::{Event, EventReader};
use crate::panel::{Panel, PanelId};
use crate::panels::create_panels;
use crate::state::{DashboardState, LoadState};
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App {
    client: Arc<ApiClient>,
    state: DashboardState,
    seq: FetchSeq,
    /// All panels, in focus-cycle order.
    panels: Vec<Box<dyn Panel>>,
    focus: PanelId,
    help_visible: bool,
    running: bool,
    /// Action sender — panels and fetch tasks dispatch through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(client: ApiClient) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            client: Arc::new(client),
            state: DashboardState::new(),
            seq: FetchSeq::new(),
            panels: create_panels(),
            focus: PanelId::default(),
            help_visible: false,
            running: true,
            action_tx,
            action_rx,
        }
    }

    /// Run the main event loop. This is the heart of the TUI.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("dashboard event loop started");

        // Kick off the initial server-list fetch on mount.
        self.action_tx.send(Action::RefreshServers)?;

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                let is_render = matches!(action, Action::Render);
                self.process_action(action)?;

                if is_render {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("dashboard event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// panel-specific keys are delegated to the focused panel.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Ctrl-C always quits, even mid-edit.
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        // While a panel is capturing text, every key goes to it.
        let state = &self.state;
        if self
            .panels
            .iter()
            .any(|p| p.id() == self.focus && p.wants_text_input())
        {
            let focus = self.focus;
            if let Some(panel) = self.panels.iter_mut().find(|p| p.id() == focus) {
                return panel.handle_key_event(key, state);
            }
        }

        // Global keybindings
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            (KeyModifiers::NONE, KeyCode::Tab) => return Ok(Some(Action::FocusNext)),
            (KeyModifiers::SHIFT, KeyCode::BackTab) => return Ok(Some(Action::FocusPrev)),
            (KeyModifiers::SHIFT, KeyCode::Char('S')) => return Ok(Some(Action::Submit)),
            _ => {}
        }

        // Delegate to the focused panel. The shared-state borrow has to
        // be taken apart from the panel borrow.
        let focus = self.focus;
        let state = &self.state;
        if let Some(panel) = self.panels.iter_mut().find(|p| p.id() == focus) {
            return panel.handle_key_event(key, state);
        }
        Ok(None)
    }

    /// Process a single action — the one place state is mutated.
    fn process_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,
            Action::Render | Action::Resize(..) => {}
            Action::Tick => {
                for panel in &mut self.panels {
                    panel.tick();
                }
            }

            // ── Navigation ────────────────────────────────────────
            Action::FocusNext => self.focus = self.focus.next(),
            Action::FocusPrev => self.focus = self.focus.prev(),
            Action::ToggleHelp => self.help_visible = !self.help_visible,

            // ── Server selection ──────────────────────────────────
            Action::RefreshServers => {
                let generation = self.seq.next(FetchKind::Servers);
                self.state.servers_load = LoadState::Loading;
                crate::fetch::spawn_list_servers(
                    Arc::clone(&self.client),
                    generation,
                    self.action_tx.clone(),
                );
            }
            Action::ToggleServer(id) => {
                self.state.selection.toggle(id);
            }
            Action::CommitServers => {
                self.state.selection.commit();
                let committed = self.state.selection.resolve_committed(&self.state.servers);
                let generation = self.seq.next(FetchKind::Vms);
                self.state.inventory_load = LoadState::Loading;
                self.state.vm_selection.clear();
                crate::fetch::spawn_list_vms(
                    Arc::clone(&self.client),
                    committed,
                    generation,
                    self.action_tx.clone(),
                );
            }

            // ── VM selection ──────────────────────────────────────
            Action::ToggleVm {
                server,
                vm,
                checked,
            } => {
                self.state.vm_selection.toggle(server, vm, checked);
            }

            // ── Date range ────────────────────────────────────────
            Action::SetDateField(field, value) => {
                self.state.date_range.set(field, value);
            }

            // ── Submission ────────────────────────────────────────
            Action::Submit => self.submit(),

            // ── Fetch completions ─────────────────────────────────
            Action::ServersFetched(generation, result) => {
                if !self.seq.is_current(FetchKind::Servers, generation) {
                    debug!(?generation, "dropping stale server-list response");
                    return Ok(());
                }
                match result {
                    Ok(servers) => {
                        info!(count = servers.len(), "server list loaded");
                        self.state.replace_servers(servers);
                    }
                    Err(message) => {
                        warn!(%message, "server list fetch failed");
                        self.state.servers_load = LoadState::Error(message);
                    }
                }
            }
            Action::VmsFetched(generation, result) => {
                if !self.seq.is_current(FetchKind::Vms, generation) {
                    debug!(?generation, "dropping stale VM inventory response");
                    return Ok(());
                }
                match result {
                    Ok(listing) => {
                        let committed =
                            self.state.selection.resolve_committed(&self.state.servers);
                        let inventory = VmInventory::from_listing(listing, &committed);
                        info!(entries = inventory.entries().len(), "VM inventory loaded");
                        self.state.replace_inventory(inventory);
                    }
                    Err(message) => {
                        warn!(%message, "VM inventory fetch failed");
                        self.state.inventory_load = LoadState::Error(message);
                    }
                }
            }
            Action::EnergyFetched(generation, result) => {
                if !self.seq.is_current(FetchKind::Energy, generation) {
                    debug!(?generation, "dropping stale energy response");
                    return Ok(());
                }
                match result {
                    Ok(report) => {
                        info!("energy report loaded");
                        self.state.result = Some(report);
                        self.state.result_load = LoadState::Loaded;
                    }
                    Err(message) => {
                        warn!(%message, "energy request failed");
                        self.state.result_load = LoadState::Error(message);
                    }
                }
            }
        }

        Ok(())
    }

    /// Validate, convert, and fire the energy request. Validation
    /// failures never reach the network.
    fn submit(&mut self) {
        self.state.validation.clear();

        match build_request(
            &self.state.vm_selection,
            &self.state.inventory,
            &self.state.date_range,
            &Local,
        ) {
            Ok(request) => {
                let generation = self.seq.next(FetchKind::Energy);
                self.state.result_load = LoadState::Loading;
                crate::fetch::spawn_compute_energy(
                    Arc::clone(&self.client),
                    request,
                    generation,
                    self.action_tx.clone(),
                );
            }
            Err(errors) => {
                debug!(count = errors.len(), "submit blocked by validation");
                self.state.validation = errors;
                self.focus = PanelId::DateRange;
            }
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Length(1), // title bar
            Constraint::Min(1),    // panels
            Constraint::Length(1), // status bar
        ])
        .split(area);

        self.render_title(frame, layout[0]);
        self.render_panels(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let title = Line::from(Span::styled(
            " Energy Consumption Dashboard",
            theme::title_style(),
        ));
        frame.render_widget(Paragraph::new(title), area);
    }

    /// 2×2 grid: servers / VMs on top, date range / result below.
    fn render_panels(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        let top = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);
        let bottom = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        let areas = [top[0], top[1], bottom[0], bottom[1]];
        for (panel, target) in self.panels.iter().zip(areas) {
            panel.render(frame, target, &self.state, panel.id() == self.focus);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let vm_count = self.state.vm_selection.vm_count();
        let summary = Span::styled(
            format!(" {} VM(s) selected", vm_count),
            Style::default().fg(theme::SKY),
        );
        let hints = Span::styled(
            " │ Tab panels  S submit  ? help  q quit",
            theme::key_hint(),
        );

        frame.render_widget(Paragraph::new(Line::from(vec![summary, hints])), area);
    }

    /// Render the help overlay centered on screen.
    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_width = 52u16.min(area.width.saturating_sub(4));
        let help_height = 16u16.min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let rows = [
            ("Tab / Shift+Tab", "Cycle panel focus"),
            ("j/k ↑/↓", "Move cursor / switch field"),
            ("Space", "Toggle checkbox"),
            ("Enter", "Commit servers / edit field"),
            ("/", "Filter servers"),
            ("r", "Refetch panel data"),
            ("S", "Submit energy request"),
            ("?", "This help"),
            ("q", "Quit"),
        ];

        let mut lines = vec![Line::from("")];
        for (keys, what) in rows {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<16}"), theme::key_hint_key()),
                Span::styled(what, theme::key_hint()),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "                Esc or ? to close",
            theme::key_hint(),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
