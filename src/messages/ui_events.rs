//! UI events - what the viewer turns key presses into

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::models::Role;

/// Viewer tabs
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ViewerTab {
    #[default]
    Listings,
    Sell,
    Buy,
    Verify,
    Arbitrate,
    Accounts,
}

impl ViewerTab {
    pub const ALL: [ViewerTab; 6] = [
        ViewerTab::Listings,
        ViewerTab::Sell,
        ViewerTab::Buy,
        ViewerTab::Verify,
        ViewerTab::Arbitrate,
        ViewerTab::Accounts,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ViewerTab::Listings => " 1:Listings ",
            ViewerTab::Sell => " 2:Selling ",
            ViewerTab::Buy => " 3:Buying ",
            ViewerTab::Verify => " 4:Verifying ",
            ViewerTab::Arbitrate => " 5:Arbitrating ",
            ViewerTab::Accounts => " 6:Accounts ",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ViewerTab::Listings => 0,
            ViewerTab::Sell => 1,
            ViewerTab::Buy => 2,
            ViewerTab::Verify => 3,
            ViewerTab::Arbitrate => 4,
            ViewerTab::Accounts => 5,
        }
    }

    pub fn next(&self) -> ViewerTab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> ViewerTab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// The transaction view shown on this tab, if any
    pub fn role(&self) -> Option<Role> {
        match self {
            ViewerTab::Sell => Some(Role::Seller),
            ViewerTab::Buy => Some(Role::Buyer),
            ViewerTab::Verify => Some(Role::Verifier),
            ViewerTab::Arbitrate => Some(Role::Arbitrator),
            ViewerTab::Listings | ViewerTab::Accounts => None,
        }
    }
}

/// Events generated from user input in the viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SwitchTab(ViewerTab),
    NextTab,
    PrevTab,
    ScrollUp,
    ScrollDown,

    // Sent on to the store as mutations
    CycleAccount,
    Reload,

    ToggleHelp,
    CloseHelp,
    Quit,
}

/// Convert a key event to a UiEvent
pub fn key_to_ui_event(key: KeyEvent, show_help: bool) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match key.code {
        KeyCode::Char(c @ '1'..='6') => {
            let index = c as usize - '1' as usize;
            Some(UiEvent::SwitchTab(ViewerTab::ALL[index]))
        }
        KeyCode::Tab | KeyCode::Right => Some(UiEvent::NextTab),
        KeyCode::BackTab | KeyCode::Left => Some(UiEvent::PrevTab),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::ScrollDown),
        KeyCode::Char('a') => Some(UiEvent::CycleAccount),
        KeyCode::Char('r') => Some(UiEvent::Reload),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Quit),
        _ => None,
    }
}
