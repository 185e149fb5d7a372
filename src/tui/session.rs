use std::io;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use uuid::Uuid;
use when4meet::{
    app::{AppState, Mode, SaveStatus},
    event::Event,
    input::{command_mode, mouse, normal_mode, visual_mode},
    storage::{Config, SqliteStore, StoreError},
    ui::{
        grid_view::{fit_scroll, screen_layout},
        theme::Theme,
    },
};

use crate::tui::presentation::ui;

/// Raw mode, alternate screen and mouse capture for as long as it lives.
/// Dropping it hands the terminal back, whichever way the session ends.
struct TerminalGuard;

impl TerminalGuard {
    fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture) {
            tracing::warn!("Restoring terminal failed: {}", e);
        }
        if let Err(e) = disable_raw_mode() {
            tracing::warn!("Leaving raw mode failed: {}", e);
        }
    }
}

fn to_io(e: StoreError) -> io::Error {
    io::Error::other(e.to_string())
}

pub fn run_tui(config: Config, user: Option<String>, event_id: Option<Uuid>) -> Result<(), io::Error> {
    let store = SqliteStore::open(&config.storage.database_path).map_err(to_io)?;

    let user_name = user.unwrap_or_else(|| config.participant.name.clone());
    let user = store.find_or_create_user(&user_name).map_err(to_io)?;

    let Some(event) = select_event(&store, event_id).map_err(to_io)? else {
        eprintln!("No event to open. Create one with: when4meet --create NAME YYYY-MM-DD ...");
        return Ok(());
    };
    store.join_event(&event.id, user.id).map_err(to_io)?;
    tracing::info!("{} opened event {} ({})", user.name, event.name, event.id);

    let theme = Theme::get_by_name(&config.ui.theme);
    let mut app = AppState::new(event, user, &config.grid).with_theme(theme);
    app.participants = store.event_participants(&app.event.id).map_err(to_io)?;
    if let Err(e) = app.load_from_store(&store) {
        tracing::error!("Loading availability failed: {}", e);
        app.save_status = SaveStatus::Error(format!("Load failed: {}", e));
    }

    let guard = TerminalGuard::acquire()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &store);

    terminal.show_cursor()?;
    drop(guard);

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }
    if app.save_status == SaveStatus::Unsaved {
        println!("Quit with unsaved changes.");
    }

    Ok(())
}

fn select_event(store: &SqliteStore, event_id: Option<Uuid>) -> Result<Option<Event>, StoreError> {
    match event_id {
        Some(id) => store.load_event(&id),
        None => Ok(store.list_events()?.into_iter().next()),
    }
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    store: &SqliteStore,
) -> io::Result<()> {
    loop {
        let layout = screen_layout(terminal.size()?);
        let geometry = fit_scroll(app, layout.grid);

        terminal.draw(|f| ui(f, app))?;

        match event::read()? {
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key(key.code, app, store) {
                    return Ok(());
                }
            }
            TermEvent::Mouse(mouse_event) => mouse::handle_mouse(mouse_event, &geometry, app),
            _ => {}
        }
    }
}

/// Returns true when the session should end.
fn handle_key(code: KeyCode, app: &mut AppState, store: &SqliteStore) -> bool {
    if app.show_help {
        handle_help_keys(code, app);
        return false;
    }

    match app.mode {
        Mode::Normal => {
            app.message = None;
            match code {
                KeyCode::Char('q') => return true,
                KeyCode::Char('s') => {
                    submit(app, store);
                }
                _ => normal_mode::handle_key(code, app),
            }
        }
        Mode::Visual => visual_mode::handle_key(code, app),
        Mode::Command => return handle_command_mode(code, app, store),
    }
    false
}

fn submit(app: &mut AppState, store: &SqliteStore) -> bool {
    match app.submit(store) {
        Ok(weeks) => {
            app.message = Some(format!("Saved {} week(s)", weeks));
            true
        }
        Err(_) => false,
    }
}

fn handle_help_keys(code: KeyCode, app: &mut AppState) {
    match code {
        KeyCode::Char('j') => {
            app.help_scroll = app.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') => {
            app.help_scroll = app.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll = 0;
        }
        _ => {}
    }
}

fn handle_command_mode(code: KeyCode, app: &mut AppState, store: &SqliteStore) -> bool {
    match code {
        KeyCode::Enter => {
            let command_text = std::mem::take(&mut app.command_buffer);
            app.mode = Mode::Normal;

            match command_mode::parse_command(&command_text) {
                command_mode::Command::Quit => return true,
                command_mode::Command::Write => {
                    submit(app, store);
                }
                command_mode::Command::WriteQuit => {
                    if submit(app, store) {
                        return true;
                    }
                }
                command_mode::Command::Page(page) => app.set_page(page),
                command_mode::Command::Tool(tool) => app.set_tool(tool),
                command_mode::Command::Clear => app.clear_all(),
                command_mode::Command::Theme(theme_name) => {
                    let themes = Theme::available_themes();
                    if themes.contains(&theme_name.to_lowercase().as_str()) {
                        app.theme = Theme::get_by_name(&theme_name);
                    } else {
                        app.message = Some(format!(
                            "Unknown theme '{}'. Available: {}",
                            theme_name,
                            themes.join(", ")
                        ));
                    }
                }
                command_mode::Command::Help => {
                    app.show_help = !app.show_help;
                }
                command_mode::Command::Error(message) => {
                    app.message = Some(message);
                }
            }
            false
        }
        KeyCode::Esc => {
            app.command_buffer.clear();
            app.mode = Mode::Normal;
            false
        }
        KeyCode::Backspace => {
            app.command_buffer.pop();
            if app.command_buffer.is_empty() {
                app.mode = Mode::Normal;
            }
            false
        }
        KeyCode::Char(c) => {
            app.command_buffer.push(c);
            false
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use when4meet::{Availability, event::User};

    fn create_app() -> AppState {
        let dates = (13..=22)
            .map(|d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap())
            .collect();
        let user = User { id: 1, name: "ana".to_string() };
        AppState::new(Event::new("Planning", dates), user, &Config::default().grid)
    }

    fn type_command(app: &mut AppState, store: &SqliteStore, text: &str) -> bool {
        let mut quit = handle_key(KeyCode::Char(':'), app, store);
        for c in text.chars() {
            quit = handle_key(KeyCode::Char(c), app, store);
        }
        quit || handle_key(KeyCode::Enter, app, store)
    }

    #[test]
    fn s_submits_and_reports() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut app = create_app();
        handle_key(KeyCode::Char(' '), &mut app, &store);
        assert_eq!(app.save_status, SaveStatus::Unsaved);

        handle_key(KeyCode::Char('s'), &mut app, &store);

        assert_eq!(app.save_status, SaveStatus::Saved);
        assert_eq!(app.message.as_deref(), Some("Saved 2 week(s)"));
    }

    #[test]
    fn q_ends_session() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut app = create_app();

        assert!(handle_key(KeyCode::Char('q'), &mut app, &store));
    }

    #[test]
    fn q_in_visual_mode_does_not_quit() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut app = create_app();
        handle_key(KeyCode::Char('v'), &mut app, &store);

        assert!(!handle_key(KeyCode::Char('q'), &mut app, &store));
        assert_eq!(app.mode, Mode::Visual);
    }

    #[test]
    fn page_command_moves_to_page() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut app = create_app();

        let quit = type_command(&mut app, &store, "page 2");

        assert!(!quit);
        assert_eq!(app.page.current_page(), 1);
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.command_buffer.is_empty());
    }

    #[test]
    fn tool_command_switches_tool() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut app = create_app();

        type_command(&mut app, &store, "tool ifneeded");
        handle_key(KeyCode::Char(' '), &mut app, &store);

        assert_eq!(app.event_count(Availability::IfNeeded), 1);
    }

    #[test]
    fn write_quit_saves_then_quits() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut app = create_app();
        handle_key(KeyCode::Char(' '), &mut app, &store);

        assert!(type_command(&mut app, &store, "wq"));
        assert_eq!(app.save_status, SaveStatus::Saved);
    }

    #[test]
    fn unknown_command_leaves_message() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut app = create_app();

        type_command(&mut app, &store, "frobnicate");

        assert_eq!(app.message.as_deref(), Some("Unknown command: frobnicate"));
    }

    #[test]
    fn theme_command_switches_known_theme() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut app = create_app();

        type_command(&mut app, &store, "theme Nord");

        assert_eq!(app.theme, Theme::nord());
        assert_eq!(app.message, None);
    }

    #[test]
    fn unknown_theme_lists_available_ones() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut app = create_app();

        type_command(&mut app, &store, "theme solarized");

        assert_eq!(app.theme, Theme::default_theme());
        assert_eq!(
            app.message.as_deref(),
            Some("Unknown theme 'solarized'. Available: default, gruvbox, nord, dracula")
        );
    }

    #[test]
    fn backspace_past_colon_leaves_command_mode() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut app = create_app();
        handle_key(KeyCode::Char(':'), &mut app, &store);

        handle_key(KeyCode::Backspace, &mut app, &store);

        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut app = create_app();
        handle_key(KeyCode::Char('?'), &mut app, &store);

        assert!(!handle_key(KeyCode::Char('q'), &mut app, &store));
        assert!(!app.show_help);
    }
}
