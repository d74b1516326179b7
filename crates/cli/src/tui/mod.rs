mod app;
mod ui;

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

pub use app::App;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Run the interactive dashboard until the user quits.
/// The terminal is restored even when drawing or input handling fails.
pub fn run_dashboard(mut app: App) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(terminal: &mut Term, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if app.should_quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                handle_key_event(app, key);
            }
        }
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    use KeyCode::*;

    match key.code {
        Char('q') | Esc => app.should_quit = true,

        // Start date
        Char('[') => app.move_start(-1),
        Char(']') => app.move_start(1),

        // End date
        Char('{') => app.move_end(-1),
        Char('}') => app.move_end(1),

        // Whole window
        Left => app.shift_window(-1),
        Right => app.shift_window(1),
        PageUp => app.page(false),
        PageDown => app.page(true),

        Char('r') => app.reset_range(),
        Tab | BackTab => app.toggle_metric(),

        _ => {}
    }
}
