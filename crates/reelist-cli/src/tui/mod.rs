//! Interactive browser: search on top, results on the left, the watched
//! list (or the detail panel while a selection is open) on the right.
//!
//! The event loop is synchronous and owns the terminal; catalog fetches
//! are spawned on the tokio runtime and deliver their outcome back over
//! an mpsc channel, tagged with the slot generation that issued them.

mod app;
mod ui;

use std::io;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use color_eyre::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use reelist_catalog::OmdbClient;
use reelist_core::WatchlistManager;

pub use app::{BrowseApp, FetchMessage};

pub async fn run(
    catalog: OmdbClient,
    watchlist: WatchlistManager,
    initial_query: Option<String>,
) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let runtime = tokio::runtime::Handle::current();

    let mut app = BrowseApp::new(catalog, watchlist, runtime, tx);
    if let Some(query) = initial_query {
        app.set_query(query);
    }

    // The loop blocks on terminal events, so it runs off the async
    // executor threads.
    tokio::task::spawn_blocking(move || run_terminal(app, rx)).await?
}

fn run_terminal(mut app: BrowseApp, rx: Receiver<FetchMessage>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut app, &mut terminal, rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    app: &mut BrowseApp,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    rx: Receiver<FetchMessage>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll with a timeout so fetch completions repaint promptly.
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        while let Ok(message) = rx.try_recv() {
            app.apply_message(message);
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
