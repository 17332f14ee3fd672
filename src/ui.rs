//! Viewer helpers: local view state and widget builders.
//!
//! The viewer only reads [`StateSnapshot`]s; anything that changes market
//! state leaves here as a [`Mutation`] for the store actor.

use ratatui::{prelude::*, widgets::*};

use crate::messages::ui_events::{UiEvent, ViewerTab};
use crate::app::views::roles_of;
use crate::messages::{Mutation, StateSnapshot};
use crate::models::{Account, Listing, Transaction};

/// What the viewer should do after handling an event
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerAction {
    /// Nothing beyond redrawing
    Redraw,
    /// Forward a mutation to the store
    Mutate(Mutation),
    /// Reset the store and replay the seed file
    Reload,
    Quit,
}

/// UI-only state, never stored in the market state
#[derive(Debug, Clone, Default)]
pub struct ViewerState {
    pub tab: ViewerTab,
    pub scroll: usize,
    pub show_help: bool,
}

impl ViewerState {
    pub fn handle(&mut self, event: UiEvent, snapshot: &StateSnapshot) -> ViewerAction {
        match event {
            UiEvent::SwitchTab(tab) => self.set_tab(tab),
            UiEvent::NextTab => self.set_tab(self.tab.next()),
            UiEvent::PrevTab => self.set_tab(self.tab.prev()),
            UiEvent::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            UiEvent::ScrollDown => {
                let rows = row_count(self.tab, snapshot);
                if self.scroll + 1 < rows {
                    self.scroll += 1;
                }
            }
            UiEvent::CycleAccount => {
                return match next_account(snapshot) {
                    Some(address) => ViewerAction::Mutate(Mutation::SetActiveAccount(address)),
                    None => ViewerAction::Redraw,
                };
            }
            UiEvent::Reload => {
                self.scroll = 0;
                return ViewerAction::Reload;
            }
            UiEvent::ToggleHelp => self.show_help = !self.show_help,
            UiEvent::CloseHelp => self.show_help = false,
            UiEvent::Quit => return ViewerAction::Quit,
        }
        ViewerAction::Redraw
    }

    fn set_tab(&mut self, tab: ViewerTab) {
        if tab != self.tab {
            self.tab = tab;
            self.scroll = 0;
        }
    }
}

/// Address that follows the active one in `accounts`, wrapping around.
/// Starts from the first account when none is active.
pub fn next_account(snapshot: &StateSnapshot) -> Option<String> {
    let accounts = &snapshot.accounts;
    if accounts.is_empty() {
        return None;
    }
    let next = match accounts.iter().position(|a| a.address == snapshot.account) {
        Some(i) => (i + 1) % accounts.len(),
        None => 0,
    };
    Some(accounts[next].address.clone())
}

/// Number of rows the given tab shows
pub fn row_count(tab: ViewerTab, snapshot: &StateSnapshot) -> usize {
    match tab {
        ViewerTab::Listings => snapshot.datalist.len(),
        ViewerTab::Accounts => snapshot.accounts.len(),
        _ => tab.role().map(|role| snapshot.view(role).len()).unwrap_or(0),
    }
}

/// Shorten long hex addresses to `0x1234…abcd`
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 14 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}

/// Renders tabs
pub fn render_tabs<'a>(selected: ViewerTab) -> Tabs<'a> {
    let titles: Vec<Line> = ViewerTab::ALL.iter().map(|t| Line::from(t.title())).collect();

    Tabs::new(titles)
        .select(selected.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Transaction state color
pub fn state_color(state: &str) -> Color {
    match state.to_ascii_lowercase().as_str() {
        "" => Color::DarkGray,
        "created" => Color::Cyan,
        "voted" | "buying" => Color::Yellow,
        "readyfordownload" => Color::Green,
        "closed" => Color::Gray,
        s if s.contains("arbitrat") => Color::Magenta,
        _ => Color::White,
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "-"
    }
}

fn titled_block(title: String, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
}

/// Listings table
pub fn listing_table(listings: &[Listing], scroll: usize) -> Table<'static> {
    let header = Row::new(vec!["pID", "Title", "Price", "Seller", "Verify", "Proofs"])
        .style(Style::default().fg(Color::Cyan).bold());

    let rows: Vec<Row> = listings
        .iter()
        .skip(scroll)
        .map(|l| {
            Row::new(vec![
                Cell::from(l.pid.clone()),
                Cell::from(l.title.clone()),
                Cell::from(l.price.to_string()).style(Style::default().fg(Color::Yellow)),
                Cell::from(short_address(&l.seller)),
                Cell::from(flag(l.support_verify)),
                Cell::from(l.proof_data_extensions.len().to_string()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Min(20),
        Constraint::Length(8),
        Constraint::Length(14),
        Constraint::Length(6),
        Constraint::Length(6),
    ];

    Table::new(rows, widths)
        .header(header)
        .block(titled_block(format!(" Listings ({}) ", listings.len()), true))
}

/// Every role `viewer` holds in `tx`, e.g. "seller+buyer"
pub fn role_label(tx: &Transaction, viewer: &str) -> String {
    roles_of(tx, viewer)
        .iter()
        .map(|role| role.as_str())
        .collect::<Vec<_>>()
        .join("+")
}

/// Transaction table for one role view
pub fn transaction_table(title: &str, txs: &[Transaction], viewer: &str, scroll: usize) -> Table<'static> {
    let header = Row::new(vec!["tID", "Title", "Price", "Seller", "Buyer", "State", "Verify", "Result", "As"])
        .style(Style::default().fg(Color::Cyan).bold());

    let rows: Vec<Row> = txs
        .iter()
        .skip(scroll)
        .map(|t| {
            Row::new(vec![
                Cell::from(t.tid.clone()),
                Cell::from(t.title.clone()),
                Cell::from(t.price.to_string()).style(Style::default().fg(Color::Yellow)),
                Cell::from(short_address(&t.seller)),
                Cell::from(short_address(&t.buyer)),
                Cell::from(t.state.clone()).style(Style::default().fg(state_color(&t.state))),
                Cell::from(flag(t.start_verify)),
                Cell::from(t.arbitrate_result.clone()),
                Cell::from(role_label(t, viewer)).style(Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Min(16),
        Constraint::Length(8),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(18),
        Constraint::Length(6),
        Constraint::Length(10),
        Constraint::Length(18),
    ];

    Table::new(rows, widths)
        .header(header)
        .block(titled_block(format!(" {} ({}) ", title, txs.len()), true))
}

/// Accounts table; the active account is highlighted
pub fn account_table(accounts: &[Account], active: &str, scroll: usize) -> Table<'static> {
    let header = Row::new(vec!["Address", "Nickname", "From block", "Verifier"])
        .style(Style::default().fg(Color::Cyan).bold());

    let rows: Vec<Row> = accounts
        .iter()
        .skip(scroll)
        .map(|a| {
            let style = if a.address == active {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(a.address.clone()),
                Cell::from(a.nickname.clone()),
                Cell::from(a.from_block.to_string()),
                Cell::from(flag(a.is_verifier)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(42),
        Constraint::Length(20),
        Constraint::Length(12),
        Constraint::Length(8),
    ];

    Table::new(rows, widths)
        .header(header)
        .block(titled_block(format!(" Accounts ({}) ", accounts.len()), true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppState;

    fn snapshot_with_accounts(active: &str) -> StateSnapshot {
        let mut state = AppState::new();
        state.apply(Mutation::SetAccounts(vec![Account::new("A", "alice"), Account::new("B", "bob")]));
        state.apply(Mutation::SetActiveAccount(active.into()));
        state.snapshot()
    }

    #[test]
    fn test_next_account_wraps() {
        assert_eq!(next_account(&snapshot_with_accounts("")), Some("A".to_string()));
        assert_eq!(next_account(&snapshot_with_accounts("A")), Some("B".to_string()));
        assert_eq!(next_account(&snapshot_with_accounts("B")), Some("A".to_string()));
        assert_eq!(next_account(&AppState::new().snapshot()), None);
    }

    #[test]
    fn test_cycle_account_becomes_mutation() {
        let mut viewer = ViewerState::default();
        let action = viewer.handle(UiEvent::CycleAccount, &snapshot_with_accounts("A"));
        assert_eq!(action, ViewerAction::Mutate(Mutation::SetActiveAccount("B".into())));
    }

    #[test]
    fn test_scroll_bounded_by_rows() {
        let mut viewer = ViewerState::default();
        let snapshot = snapshot_with_accounts("A");
        viewer.handle(UiEvent::SwitchTab(ViewerTab::Accounts), &snapshot);
        for _ in 0..5 {
            viewer.handle(UiEvent::ScrollDown, &snapshot);
        }
        assert_eq!(viewer.scroll, 1);

        viewer.handle(UiEvent::NextTab, &snapshot);
        assert_eq!(viewer.tab, ViewerTab::Listings);
        assert_eq!(viewer.scroll, 0);
    }

    #[test]
    fn test_role_label() {
        let mut tx = Transaction::for_listing("t1", &Listing::new("p1", "Data", "A"), "A");
        tx.arbitrator = "R".into();
        assert_eq!(role_label(&tx, "A"), "seller+buyer");
        assert_eq!(role_label(&tx, "R"), "arbitrator");
        assert_eq!(role_label(&tx, "X"), "");
    }

    #[test]
    fn test_short_address() {
        assert_eq!(short_address("0xA"), "0xA");
        assert_eq!(
            short_address("0x52c3a8d1b2e4f5061728394a5b6c7d8e9f0a1b2c"),
            "0x52c3…1b2c"
        );
    }
}
