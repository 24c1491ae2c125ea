//! entry-column: a terminal feed reader built around a virtualized,
//! date-grouped entry column.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌──────────┐  PollMsg   ┌──────────┐  draw()  ┌──────────────────┐
//! │  poll.rs │ ─────────► │  app.rs  │ ───────► │ ui.rs + list/    │
//! │ (thread) │ ◄───────── │ (state)  │          │ (windowed render)│
//! └──────────┘  refetch   └──────────┘          └──────────────────┘
//!                              ▲
//!                              │ handle_key_event()
//!                    ┌───────────────────────┐
//!                    │ input.rs → shortcuts  │
//!                    └───────────────────────┘
//! ```
//!
//! * **`source/`**: the `DataSource` trait and the RSS implementation.
//! * **`store`**: entries by id; the list resolves ids through it.
//! * **`list/`**: the entry list widget: windowing, date groups, empty state.
//! * **`shortcuts`**: navigation and column commands.
//! * **`config`** / **`cli`**: settings from `config.json` and flags.

mod app;
mod cli;
mod config;
mod input;
mod list;
mod logging;
mod poll;
mod shortcuts;
mod source;
mod store;
mod ui;
mod view;

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, info};

use app::App;
use cli::Cli;
use config::Config;
use source::{DataSource, RssSource};

/// Restores the terminal on drop, including during unwinding.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Restore the terminal before the panic message is printed, so it is
/// readable.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        error!(%info, "panic");
        original_hook(info);
    }));
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    let log_path = cli.log_file.clone().unwrap_or_else(config::default_log_path);
    let _log_guard = logging::init(&log_path)?;
    info!(feeds = config.feeds.len(), view = %config.view, "starting");

    install_panic_hook();

    let sources: Vec<Box<dyn DataSource>> = config
        .feeds
        .iter()
        .map(|f| Box::new(RssSource::new(&f.url, f.display_label())) as Box<dyn DataSource>)
        .collect();
    let poller = poll::spawn(sources, config.poll_interval());

    let mut guard = TerminalGuard::new()?;
    let mut app = App::new(&config);

    // ~10 fps: drain poll messages, render, then wait up to one tick for input.
    let tick_rate = Duration::from_millis(100);

    loop {
        while let Ok(msg) = poller.rx.try_recv() {
            app.handle_poll(msg);
        }

        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key, || poller.refetch());
            }
        }

        if app.quit {
            break;
        }
    }

    info!("exiting");
    Ok(())
}
