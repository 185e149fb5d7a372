use crossterm::event::KeyCode;

use crate::app::AppState;

/// Keyboard drag: movement extends the rectangle, and any of `v`, `Enter`,
/// `Space` or `Esc` ends it. Ending always commits.
pub fn handle_key(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Char('h') | KeyCode::Left => state.move_cursor(-1, 0),
        KeyCode::Char('l') | KeyCode::Right => state.move_cursor(1, 0),
        KeyCode::Char('j') | KeyCode::Down => state.move_cursor(0, 1),
        KeyCode::Char('k') | KeyCode::Up => state.move_cursor(0, -1),
        KeyCode::Char('J') => state.move_cursor(0, 2),
        KeyCode::Char('K') => state.move_cursor(0, -2),
        KeyCode::Char('v') | KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Esc => {
            state.release();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Mode;
    use crate::availability::Availability;
    use crate::event::{Event, User};
    use crate::grid::SelectionRect;
    use crate::storage::config::Config;
    use chrono::NaiveDate;

    fn setup_visual_state() -> AppState {
        let dates = (13..=19)
            .map(|d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap())
            .collect();
        let user = User {
            id: 1,
            name: "ana".to_string(),
        };
        let mut state = AppState::new(Event::new("Planning", dates), user, &Config::default().grid);
        state.move_cursor(1, 4);
        state.begin_visual();
        state
    }

    #[test]
    fn movement_extends_preview() {
        let mut state = setup_visual_state();

        handle_key(KeyCode::Char('l'), &mut state);
        handle_key(KeyCode::Char('j'), &mut state);
        handle_key(KeyCode::Char('j'), &mut state);

        assert_eq!(state.engine.preview(), Some(SelectionRect { dates: 1..=2, times: 4..=6 }));
        assert!(state.sheet.is_empty());
    }

    #[test]
    fn preview_can_extend_up_and_left() {
        let mut state = setup_visual_state();

        handle_key(KeyCode::Char('h'), &mut state);
        handle_key(KeyCode::Char('K'), &mut state);

        assert_eq!(state.engine.preview(), Some(SelectionRect { dates: 0..=1, times: 2..=4 }));
    }

    #[test]
    fn enter_commits_and_returns_to_normal() {
        let mut state = setup_visual_state();
        handle_key(KeyCode::Char('l'), &mut state);

        handle_key(KeyCode::Enter, &mut state);

        assert_eq!(state.mode, Mode::Normal);
        assert!(!state.engine.is_dragging());
        assert_eq!(state.event_count(Availability::Available), 2);
    }

    #[test]
    fn esc_also_commits() {
        let mut state = setup_visual_state();
        handle_key(KeyCode::Char('j'), &mut state);

        handle_key(KeyCode::Esc, &mut state);

        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.event_count(Availability::Available), 2);
    }
}
