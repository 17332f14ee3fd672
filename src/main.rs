//! Scry Market viewer - terminal view over the market state
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering of snapshots
//! - Store Layer - actor owning the store, applying mutations in order
//! - Seed collaborator - replays a mutation file in place of chain sync

use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use scry_market_state::app::{AppState, Store, StoreActor, StoreHandle};
use scry_market_state::config::Config;
use scry_market_state::constants::{APP_NAME, APP_VERSION, DEFAULT_LOG_FILE};
use scry_market_state::messages::ui_events::{key_to_ui_event, ViewerTab};
use scry_market_state::messages::{Mutation, StateSnapshot};
use scry_market_state::models::BalanceSlot;
use scry_market_state::seed::load_seed;
use scry_market_state::ui::{
    account_table, listing_table, render_tabs, short_address, transaction_table, ViewerAction,
    ViewerState,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?.with_args(std::env::args().skip(1));

    // Initialize logging to file
    let log_dir = config.log_file.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let log_name = config.log_file.file_name().map(|n| n.to_os_string()).unwrap_or_else(|| DEFAULT_LOG_FILE.into());
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(version = APP_VERSION, seed = ?config.seed_file, "Starting viewer");

    // Build the store before the terminal takes over so seed errors are readable
    let mut store = Store::new(AppState::with_placeholder(config.nickname_placeholder.clone()));
    if let Some(seed) = &config.seed_file {
        store.replay(load_seed(seed)?);
    }

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Spawn store actor
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<StateSnapshot>();
    let (handle, cmd_rx) = StoreActor::channel();
    let actor = tokio::spawn(StoreActor::new(store, render_tx).run(cmd_rx));

    let result = run_ui_loop(&mut terminal, &handle, &mut render_rx, &config).await;

    handle.shutdown();
    let store = actor.await?;
    tracing::info!(version = store.version(), "Viewer stopped");

    result
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    handle: &StoreHandle,
    render_rx: &mut mpsc::UnboundedReceiver<StateSnapshot>,
    config: &Config,
) -> anyhow::Result<()> {
    let mut snapshot = StateSnapshot::default();
    let mut viewer = ViewerState::default();
    let mut status = String::new();

    loop {
        // Draw with current snapshot
        terminal.draw(|f| draw_ui(f, &snapshot, &viewer, &status))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, viewer.show_help) {
                    match viewer.handle(event, &snapshot) {
                        ViewerAction::Redraw => {}
                        ViewerAction::Mutate(mutation) => {
                            handle.apply(mutation);
                        }
                        ViewerAction::Reload => status = reload(handle, config),
                        ViewerAction::Quit => break,
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(next) = render_rx.try_recv() {
            snapshot = next;
        }
    }

    Ok(())
}

/// Reset the store and replay the configured seed file
fn reload(handle: &StoreHandle, config: &Config) -> String {
    let Some(seed) = &config.seed_file else {
        return String::from("No seed file configured");
    };

    match load_seed(seed) {
        Ok(mutations) => {
            let count = mutations.len();
            handle.apply(Mutation::Reset);
            for mutation in mutations {
                handle.apply(mutation);
            }
            format!("Reloaded {count} mutations from {}", seed.display())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Reload failed");
            format!("Reload failed: {e}")
        }
    }
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, snapshot: &StateSnapshot, viewer: &ViewerState, status: &str) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Account + balances
            Constraint::Length(1), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header(f, snapshot, main_chunks[0]);
    f.render_widget(render_tabs(viewer.tab), main_chunks[1]);
    draw_content(f, snapshot, viewer, main_chunks[2]);
    draw_status_bar(f, snapshot, status, main_chunks[3]);

    if viewer.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_header(f: &mut Frame, snapshot: &StateSnapshot, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let account = if snapshot.account.is_empty() {
        Span::styled("no account selected", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(short_address(&snapshot.account), Style::default().fg(Color::Yellow).bold())
    };
    let who = Paragraph::new(vec![
        Line::from(vec![Span::raw("Account:  "), account]),
        Line::from(vec![Span::raw("Nickname: "), Span::raw(snapshot.nickname.clone())]),
    ])
    .block(Block::default().borders(Borders::ALL).title(format!(" {APP_NAME} ")));
    f.render_widget(who, chunks[0]);

    let balance_lines: Vec<Line> = [BalanceSlot::Primary, BalanceSlot::Token]
        .iter()
        .map(|slot| {
            let balance = snapshot.balance.get(*slot);
            let color = if balance.is_loaded() { Color::Green } else { Color::DarkGray };
            Line::from(vec![
                Span::raw(format!("{:<6}", slot.label())),
                Span::styled(balance.balance.clone(), Style::default().fg(color)),
                Span::styled(format!("  @ {}", balance.time), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();
    let balances = Paragraph::new(balance_lines)
        .block(Block::default().borders(Borders::ALL).title(" Balances "));
    f.render_widget(balances, chunks[1]);
}

fn draw_content(f: &mut Frame, snapshot: &StateSnapshot, viewer: &ViewerState, area: Rect) {
    match viewer.tab {
        ViewerTab::Listings => {
            f.render_widget(listing_table(&snapshot.datalist, viewer.scroll), area);
        }
        ViewerTab::Accounts => {
            f.render_widget(account_table(&snapshot.accounts, &snapshot.account, viewer.scroll), area);
        }
        tab => {
            if let Some(role) = tab.role() {
                let title = tab.title().trim();
                f.render_widget(transaction_table(title, snapshot.view(role), &snapshot.account, viewer.scroll), area);
            }
        }
    }
}

fn draw_status_bar(f: &mut Frame, snapshot: &StateSnapshot, status: &str, area: Rect) {
    let text = if status.is_empty() {
        format!(" v{} | 1-6:tab | a:account | r:reload | ?:help | q:quit ", snapshot.version)
    } else {
        format!(" v{} | {} ", snapshot.version, status)
    };

    let bar = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = r#"
 SCRY MARKET - Keyboard Shortcuts

 NAVIGATION
   1-6                Jump to tab
   Tab / Shift+Tab    Next / previous tab
   ↑ / ↓              Scroll rows

 STATE
   a                  Switch active account
   r                  Reload seed file

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
