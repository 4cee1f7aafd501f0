//! documind TUI - interactive semantic search front end.

mod app;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use documind_core::DocumindConfig;
use documind_embed::OnnxEmbedder;
use documind_index::Retriever;
use documind_store::Artifacts;

use crate::app::{App, Control};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = DocumindConfig::load_default()?;

    // Load the retrieval stack once, before touching the terminal, so
    // startup errors print normally instead of inside the UI.
    let artifacts = Artifacts::load(
        &config.data.embeddings_path(),
        &config.data.sidecar_path(),
    )?;
    let embedder = Arc::new(OnnxEmbedder::new(&config.embedding)?);
    let retriever = Retriever::new(artifacts, embedder)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let app = App::new(retriever, runtime, &config.search);

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, app);
    restore_terminal(&mut terminal)?;
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App<OnnxEmbedder>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick_rate = Duration::from_millis(100);
    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if app.handle_key(key) == Control::Quit {
                    break;
                }
            }
        }
    }
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), Box<dyn std::error::Error>> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
