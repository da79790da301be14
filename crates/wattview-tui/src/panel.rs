//! Panel trait and panel identifier enum.
//!
//! The dashboard is one screen with four focusable panels. Unlike a
//! multi-screen app, panels do not own cross-panel data — they render
//! from the shared [`DashboardState`] and mutate it only by returning
//! actions.

use std::fmt;

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::action::Action;
use crate::state::DashboardState;

/// Identifies each dashboard panel, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelId {
    #[default]
    Servers,
    Vms,
    DateRange,
    Result,
}

impl PanelId {
    /// All panels in focus-cycle order.
    pub const ALL: [PanelId; 4] = [Self::Servers, Self::Vms, Self::DateRange, Self::Result];

    /// Next panel in Tab order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&p| p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous panel in Tab order (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&p| p == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Servers => "Servers",
            Self::Vms => "VMs",
            Self::DateRange => "Date Range",
            Self::Result => "Energy Consumption",
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One dashboard panel.
///
/// Panels keep only view-local state (cursor position, edit buffers);
/// everything cross-panel lives in [`DashboardState`].
pub trait Panel: Send {
    fn id(&self) -> PanelId;

    /// Handle a key event while this panel is focused. Return an Action
    /// to dispatch, or None if the key was not consumed.
    fn handle_key_event(
        &mut self,
        _key: KeyEvent,
        _state: &DashboardState,
    ) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Whether this panel is currently capturing text input. While
    /// true, global single-letter keybindings are suspended so typing
    /// reaches the panel.
    fn wants_text_input(&self) -> bool {
        false
    }

    /// Advance spinner / animation state (4 Hz).
    fn tick(&mut self) {}

    /// Render into the provided frame area.
    fn render(&self, frame: &mut Frame, area: Rect, state: &DashboardState, focused: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycle_wraps_both_ways() {
        assert_eq!(PanelId::Servers.next(), PanelId::Vms);
        assert_eq!(PanelId::Result.next(), PanelId::Servers);
        assert_eq!(PanelId::Servers.prev(), PanelId::Result);
    }

    #[test]
    fn next_then_prev_is_identity() {
        for id in PanelId::ALL {
            assert_eq!(id.next().prev(), id);
        }
    }
}
