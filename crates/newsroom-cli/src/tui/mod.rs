//! Newsroom TUI
//!
//! Terminal front page for the newsroom.
//!
//! ## Views
//!
//! - 1: Home (headline article and latest newsletters)
//! - 2: Articles (search, tag filter, read, delete)
//! - 3: Newsletters (archive, subscribe)
//! - 4: Editor (write articles and issues, export/import)
//!
//! ## Navigation
//!
//! - j/k or ↑/↓: Move selection up/down
//! - Enter: Open / expand / edit
//! - Esc: Close or clear
//! - ?: Help
//! - q: Quit

mod app;
mod ui;

use std::fs::File;
use std::io::stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing::info;

use newsroom_core::{Config, FileStore, KeyValueStore, Newsroom, RenderPolicy};

use app::{App, InputMode, View};

use crate::editor;

/// Run the TUI application
pub fn run(config: Config) -> Result<()> {
    init_tui_logging(&config);

    let mut newsroom = Newsroom::open(FileStore::from_config(&config), crate::today());
    let mut app = App::new(&newsroom, config.subscribe_email.clone());
    let policy = config.render_policy();

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_app(&mut terminal, &mut app, &mut newsroom, policy);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_app<B: Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    newsroom: &mut Newsroom<S>,
    policy: RenderPolicy,
) -> Result<()> {
    loop {
        app.check_status_timeout();
        terminal.draw(|frame| ui::draw(frame, app, policy))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        // Only handle key press events (not release)
        if key.kind != KeyEventKind::Press {
            continue;
        }

        // If error modal is showing, any key dismisses it
        if app.has_error() {
            app.clear_error();
            continue;
        }

        // If help is showing, any key dismisses it
        if app.show_help {
            app.show_help = false;
            continue;
        }

        match app.input_mode {
            InputMode::Normal => {
                if handle_normal_mode(app, newsroom, key.code, key.modifiers) {
                    edit_content(terminal, app)?;
                }
            }
            InputMode::Search => handle_search_mode(app, key.code),
            InputMode::Field => handle_text_input(app, key.code, |app| app.commit_field()),
            InputMode::ImportPath => handle_text_input(app, key.code, |app| app.import(newsroom)),
            InputMode::ConfirmDelete => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(newsroom),
                _ => app.cancel_delete(),
            },
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle key events in normal mode
///
/// Returns true when the content field should be opened in $EDITOR.
fn handle_normal_mode<S: KeyValueStore>(
    app: &mut App,
    newsroom: &mut Newsroom<S>,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> bool {
    // Keys shared by every view
    match code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return false;
        }
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return false;
        }
        KeyCode::Char('?') => {
            app.toggle_help();
            return false;
        }
        KeyCode::Char('1') => {
            app.navigate(View::Home);
            return false;
        }
        KeyCode::Char('2') => {
            app.navigate(View::Articles);
            return false;
        }
        KeyCode::Char('3') => {
            app.navigate(View::Newsletters);
            return false;
        }
        KeyCode::Char('4') => {
            app.navigate(View::Editor);
            return false;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
            return false;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down();
            return false;
        }
        _ => {}
    }

    match app.view {
        View::Home => match code {
            KeyCode::Char('a') => app.navigate(View::Articles),
            KeyCode::Char('n') => app.navigate(View::Newsletters),
            _ => {}
        },

        View::Articles if app.detail_open => match code {
            KeyCode::Esc | KeyCode::Enter => app.close_detail(),
            KeyCode::Char('d') => app.request_delete(),
            _ => {}
        },
        View::Articles => match code {
            KeyCode::Char('/') => app.enter_search_mode(),
            KeyCode::Char('t') => app.cycle_tag(),
            KeyCode::Enter => app.open_detail(),
            KeyCode::Char('d') => app.request_delete(),
            KeyCode::Esc => {
                app.query = Default::default();
                app.apply_query();
            }
            _ => {}
        },

        View::Newsletters => match code {
            KeyCode::Enter | KeyCode::Char(' ') => app.toggle_newsletter(),
            KeyCode::Char('s') => {
                let link = app.subscribe_link();
                info!("Opening subscription link");
                match open::that(&link) {
                    Ok(()) => {
                        let message = format!("Opened mail client for {}", app.subscribe_email);
                        app.set_status(message);
                    }
                    Err(e) => app.set_error(format!("Could not open mail client: {}", e)),
                }
            }
            _ => {}
        },

        View::Editor => match code {
            KeyCode::Enter => {
                if app.current_field().is_multiline() {
                    return true;
                }
                app.begin_field_edit();
            }
            KeyCode::Backspace if app.current_field() == app::Field::Tags => {
                app.remove_last_tag();
            }
            KeyCode::Tab | KeyCode::BackTab => app.toggle_form(),
            KeyCode::Char('s') => app.submit(newsroom),
            KeyCode::Char('r') => {
                app.reset_form();
                app.set_status("Form cleared");
            }
            KeyCode::Char('x') => app.export(newsroom, std::path::Path::new(".")),
            KeyCode::Char('i') => app.enter_import_mode(),
            _ => {}
        },
    }

    false
}

/// Handle key events while typing a search query
fn handle_search_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => {
            app.cancel_input();
            app.clear_search();
        }
        // Keep the filter applied
        KeyCode::Enter => {
            app.input.clear();
            app.input_cursor = 0;
            app.input_mode = InputMode::Normal;
        }
        other => edit_input(app, other),
    }
}

/// Handle key events for a single-line input that is committed with Enter
fn handle_text_input(app: &mut App, code: KeyCode, commit: impl FnOnce(&mut App)) {
    match code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Enter => commit(app),
        other => edit_input(app, other),
    }
}

fn edit_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char(c) => app.insert_char(c),
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        _ => {}
    }
}

/// Leave the TUI, edit the form body in $EDITOR, and come back
fn edit_content<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(cursor::Show)?;

    let edited = editor::edit_text(app.content());

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    terminal.clear()?;

    match edited {
        Ok(content) => {
            app.set_content(content.trim_end().to_string());
            app.set_status("Content updated");
        }
        Err(e) => app.set_error(format!("Editor failed: {:#}", e)),
    }
    Ok(())
}

/// Initialize logging for TUI mode
///
/// Only logs when NEWSROOM_LOG is set, and always to a file so the
/// terminal stays clean.
fn init_tui_logging(config: &Config) {
    if std::env::var(crate::LOG_ENV).is_err() {
        return;
    }

    let log_path = config.log_path();
    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    crate::init_logging(Some(log_file));
    info!("TUI logging initialized to {:?}", log_path);
}
