pub mod app;
pub mod ui;

use std::io;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use crate::error::Result;
use crate::store::Store;
use app::{App, Focus, InputMode};
use ui::ui;

pub fn run_tui(store: Store) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store);
    info!("event=tui_start status=ok roles={}", app.store.roles().len());

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!("event=tui_exit status=error error={}", err);
    }
    res.map_err(Into::into)
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let Event::Key(key) = event::read()? else { continue };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match app.input_mode {
            InputMode::Normal => {
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Tab => { app.toggle_focus(); continue; }
                    KeyCode::Esc => { app.cancel(); continue; }
                    KeyCode::Char('[') => { app.previous_week(); continue; }
                    KeyCode::Char(']') => { app.next_week(); continue; }
                    KeyCode::Char('.') => { app.go_to_today(); continue; }
                    _ => {}
                }
                match app.focus {
                    Focus::Sidebar => match key.code {
                        KeyCode::Down | KeyCode::Char('j') => app.next(),
                        KeyCode::Up | KeyCode::Char('k') => app.previous(),
                        KeyCode::Enter => app.toggle_expansion(),
                        KeyCode::Char(' ') => app.toggle_selected(),
                        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
                        KeyCode::Char('a') => app.start_add_role(),
                        KeyCode::Char('g') => app.start_add_goal(),
                        KeyCode::Char('t') => app.start_add_task(),
                        KeyCode::Char('s') => app.start_schedule(),
                        KeyCode::Char('u') => app.unschedule_selected(),
                        KeyCode::Char('m') => app.start_drag(),
                        _ => {}
                    },
                    Focus::Calendar => match key.code {
                        KeyCode::Left | KeyCode::Char('h') => app.move_cursor(-1, 0),
                        KeyCode::Right | KeyCode::Char('l') => app.move_cursor(1, 0),
                        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(0, -1),
                        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(0, 1),
                        KeyCode::Enter => app.drop_at_cursor(),
                        KeyCode::Char('x') => app.unschedule_at_cursor(),
                        _ => {}
                    },
                }
            }
            InputMode::Editing | InputMode::Adding => match key.code {
                KeyCode::Enter => app.handle_input(),
                KeyCode::Esc => app.cancel(),
                KeyCode::Char(c) => {
                    app.input_buffer.push(c);
                }
                KeyCode::Backspace => {
                    app.input_buffer.pop();
                }
                _ => {}
            },
        }
    }
}
