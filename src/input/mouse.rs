use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::app::{AppState, Mode};
use crate::ui::grid_view::GridGeometry;

const WHEEL_ROWS: isize = 3;

/// Routes a terminal mouse event to the selection engine. A left release
/// ends the drag wherever it lands, on or off the grid.
pub fn handle_mouse(event: MouseEvent, geometry: &GridGeometry, state: &mut AppState) {
    if event.kind == MouseEventKind::Up(MouseButton::Left) {
        state.release();
        return;
    }
    if state.mode == Mode::Command || state.show_help {
        return;
    }

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(position) = geometry.position_at(event.column, event.row) {
                state.press_at(position);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(position) = geometry.position_at(event.column, event.row) {
                state.drag_to(position);
            }
        }
        MouseEventKind::ScrollDown if !state.engine.is_dragging() => {
            state.move_cursor(0, WHEEL_ROWS);
        }
        MouseEventKind::ScrollUp if !state.engine.is_dragging() => {
            state.move_cursor(0, -WHEEL_ROWS);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::Availability;
    use crate::event::{Event, User};
    use crate::grid::GridPosition;
    use crate::storage::config::Config;
    use chrono::NaiveDate;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;

    fn create_app() -> AppState {
        let dates = (13..=19)
            .map(|d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap())
            .collect();
        let user = User {
            id: 1,
            name: "ana".to_string(),
        };
        AppState::new(Event::new("Planning", dates), user, &Config::default().grid)
    }

    // cells are 10 wide starting at column 10, rows start at 5
    fn geometry() -> GridGeometry {
        GridGeometry::new(Rect::new(0, 3, 81, 22), 7, 48, 0)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn press_drag_release_selects_rectangle() {
        let mut app = create_app();
        let geometry = geometry();

        handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 12, 5), &geometry, &mut app);
        handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 25, 6), &geometry, &mut app);
        handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 35, 7), &geometry, &mut app);
        handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 35, 7), &geometry, &mut app);

        assert!(!app.engine.is_dragging());
        assert_eq!(app.event_count(Availability::Available), 9);
    }

    #[test]
    fn release_off_grid_still_commits() {
        let mut app = create_app();
        let geometry = geometry();

        handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 12, 5), &geometry, &mut app);
        handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 22, 5), &geometry, &mut app);
        handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 2, 1), &geometry, &mut app);
        handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 2, 1), &geometry, &mut app);

        assert!(!app.engine.is_dragging());
        assert_eq!(app.event_count(Availability::Available), 2);
    }

    #[test]
    fn press_off_grid_starts_nothing() {
        let mut app = create_app();

        handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 3, 10), &geometry(), &mut app);

        assert!(!app.engine.is_dragging());
    }

    #[test]
    fn click_on_selected_cell_deselects_it() {
        let mut app = create_app();
        let geometry = geometry();
        let click = |app: &mut AppState| {
            handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 40, 9), &geometry, app);
            handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 40, 9), &geometry, app);
        };

        click(&mut app);
        assert_eq!(app.event_count(Availability::Available), 1);

        click(&mut app);
        assert!(app.sheet.is_empty());
    }

    #[test]
    fn right_button_is_ignored() {
        let mut app = create_app();

        handle_mouse(mouse(MouseEventKind::Down(MouseButton::Right), 12, 5), &geometry(), &mut app);

        assert!(!app.engine.is_dragging());
    }

    #[test]
    fn wheel_moves_cursor_when_idle() {
        let mut app = create_app();

        handle_mouse(mouse(MouseEventKind::ScrollDown, 12, 5), &geometry(), &mut app);

        assert_eq!(app.cursor, GridPosition::new(0, 3));
    }

    #[test]
    fn release_commits_after_command_mode_entered_mid_drag() {
        let mut app = create_app();
        let geometry = geometry();

        handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 12, 5), &geometry, &mut app);
        handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 25, 6), &geometry, &mut app);
        app.mode = Mode::Command;
        handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 25, 6), &geometry, &mut app);

        assert!(!app.engine.is_dragging());
        assert_eq!(app.event_count(Availability::Available), 4);
    }

    #[test]
    fn release_commits_while_help_is_open() {
        let mut app = create_app();
        let geometry = geometry();

        handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 12, 5), &geometry, &mut app);
        app.show_help = true;
        handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 12, 5), &geometry, &mut app);

        assert!(!app.engine.is_dragging());
        assert_eq!(app.event_count(Availability::Available), 1);
    }

    #[test]
    fn mouse_is_ignored_while_typing_a_command() {
        let mut app = create_app();
        app.mode = Mode::Command;

        handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 12, 5), &geometry(), &mut app);

        assert!(!app.engine.is_dragging());
    }
}
