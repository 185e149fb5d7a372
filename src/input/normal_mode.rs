use crossterm::event::KeyCode;

use crate::app::{AppState, Mode};
use crate::grid::Tool;

pub fn handle_key(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Char('h') | KeyCode::Left => state.move_cursor(-1, 0),
        KeyCode::Char('l') | KeyCode::Right => state.move_cursor(1, 0),
        KeyCode::Char('j') | KeyCode::Down => state.move_cursor(0, 1),
        KeyCode::Char('k') | KeyCode::Up => state.move_cursor(0, -1),
        KeyCode::Char('J') => state.move_cursor(0, 2),
        KeyCode::Char('K') => state.move_cursor(0, -2),
        KeyCode::Char('0') => jump_to_first_time(state),
        KeyCode::Char('$') => jump_to_last_time(state),
        KeyCode::Char(' ') | KeyCode::Enter => state.toggle_at_cursor(),
        KeyCode::Char('v') => state.begin_visual(),
        KeyCode::Char('1') => state.set_tool(Tool::Available),
        KeyCode::Char('2') => state.set_tool(Tool::IfNeeded),
        KeyCode::Tab => state.toggle_tool(),
        KeyCode::Char('[') => state.previous_page(),
        KeyCode::Char(']') => state.next_page(),
        KeyCode::Char('C') => state.clear_all(),
        KeyCode::Char(':') => enter_command_mode(state),
        KeyCode::Char('?') => show_help(state),
        _ => {}
    }
}

fn jump_to_first_time(state: &mut AppState) {
    let rows = state.page.height() as isize;
    state.move_cursor(0, -rows);
}

fn jump_to_last_time(state: &mut AppState) {
    let rows = state.page.height() as isize;
    state.move_cursor(0, rows);
}

fn enter_command_mode(state: &mut AppState) {
    state.release();
    state.mode = Mode::Command;
    state.command_buffer = String::from(":");
}

fn show_help(state: &mut AppState) {
    state.release();
    state.show_help = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::Availability;
    use crate::event::{Event, User};
    use crate::grid::GridPosition;
    use crate::storage::config::Config;
    use chrono::NaiveDate;

    fn create_app() -> AppState {
        let dates = (13..=22)
            .map(|d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap())
            .collect();
        let user = User {
            id: 1,
            name: "ana".to_string(),
        };
        AppState::new(Event::new("Planning", dates), user, &Config::default().grid)
    }

    #[test]
    fn hjkl_moves_cursor() {
        let mut app = create_app();

        handle_key(KeyCode::Char('l'), &mut app);
        handle_key(KeyCode::Char('j'), &mut app);
        handle_key(KeyCode::Char('j'), &mut app);
        handle_key(KeyCode::Char('k'), &mut app);

        assert_eq!(app.cursor, GridPosition::new(1, 1));

        handle_key(KeyCode::Char('h'), &mut app);
        assert_eq!(app.cursor, GridPosition::new(0, 1));
    }

    #[test]
    fn dollar_and_zero_jump_within_column() {
        let mut app = create_app();

        handle_key(KeyCode::Char('$'), &mut app);
        assert_eq!(app.cursor, GridPosition::new(0, 47));

        handle_key(KeyCode::Char('0'), &mut app);
        assert_eq!(app.cursor, GridPosition::new(0, 0));
    }

    #[test]
    fn space_toggles_slot_under_cursor() {
        let mut app = create_app();

        handle_key(KeyCode::Char(' '), &mut app);

        assert_eq!(app.event_count(Availability::Available), 1);
    }

    #[test]
    fn number_keys_pick_tool() {
        let mut app = create_app();

        handle_key(KeyCode::Char('2'), &mut app);
        assert_eq!(app.engine.tool(), Tool::IfNeeded);

        handle_key(KeyCode::Char('1'), &mut app);
        assert_eq!(app.engine.tool(), Tool::Available);
    }

    #[test]
    fn tab_toggles_tool() {
        let mut app = create_app();

        handle_key(KeyCode::Tab, &mut app);

        assert_eq!(app.engine.tool(), Tool::IfNeeded);
    }

    #[test]
    fn v_enters_visual_mode_with_active_drag() {
        let mut app = create_app();

        handle_key(KeyCode::Char('v'), &mut app);

        assert_eq!(app.mode, Mode::Visual);
        assert!(app.engine.is_dragging());
    }

    #[test]
    fn brackets_change_page() {
        let mut app = create_app();

        handle_key(KeyCode::Char(']'), &mut app);
        assert_eq!(app.page.current_page(), 1);

        handle_key(KeyCode::Char('['), &mut app);
        assert_eq!(app.page.current_page(), 0);
    }

    #[test]
    fn colon_enters_command_mode() {
        let mut app = create_app();

        handle_key(KeyCode::Char(':'), &mut app);

        assert_eq!(app.mode, Mode::Command);
        assert_eq!(app.command_buffer, ":");
    }

    #[test]
    fn colon_commits_pending_mouse_drag() {
        let mut app = create_app();
        app.press_at(GridPosition::new(0, 0));
        app.drag_to(GridPosition::new(1, 1));

        handle_key(KeyCode::Char(':'), &mut app);

        assert!(!app.engine.is_dragging());
        assert_eq!(app.event_count(Availability::Available), 4);
        assert_eq!(app.mode, Mode::Command);
    }

    #[test]
    fn question_mark_commits_pending_mouse_drag() {
        let mut app = create_app();
        app.press_at(GridPosition::new(2, 3));

        handle_key(KeyCode::Char('?'), &mut app);

        assert!(!app.engine.is_dragging());
        assert_eq!(app.event_count(Availability::Available), 1);
        assert!(app.show_help);
    }

    #[test]
    fn question_mark_shows_help() {
        let mut app = create_app();

        handle_key(KeyCode::Char('?'), &mut app);

        assert!(app.show_help);
    }
}
