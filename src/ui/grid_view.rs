use chrono::NaiveDate;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::AppState;
use crate::availability::Availability;
use crate::grid::GridPosition;

pub const TIME_LABEL_WIDTH: u16 = 9;
pub const HEADER_HEIGHT: u16 = 1;
pub const SIDEBAR_WIDTH: u16 = 32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenLayout {
    pub title: Rect,
    pub grid: Rect,
    pub sidebar: Rect,
    pub status: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(SIDEBAR_WIDTH)])
        .split(rows[1]);

    ScreenLayout {
        title: rows[0],
        grid: columns[0],
        sidebar: columns[1],
        status: rows[2],
    }
}

/// Where each grid cell lands on screen, for drawing and for mouse hits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    inner: Rect,
    columns: usize,
    total_rows: usize,
    first_row: usize,
    cell_width: u16,
}

impl GridGeometry {
    /// `area` includes the one-cell border drawn around the grid.
    pub fn new(area: Rect, columns: usize, total_rows: usize, first_row: usize) -> Self {
        let inner = Rect {
            x: area.x.saturating_add(1),
            y: area.y.saturating_add(1),
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };
        let cell_width = if columns == 0 {
            1
        } else {
            (inner.width.saturating_sub(TIME_LABEL_WIDTH) / columns as u16).max(1)
        };
        Self {
            inner,
            columns,
            total_rows,
            first_row,
            cell_width,
        }
    }

    pub fn cell_width(&self) -> u16 {
        self.cell_width
    }

    pub fn first_row(&self) -> usize {
        self.first_row
    }

    pub fn visible_rows(&self) -> usize {
        (self.inner.height.saturating_sub(HEADER_HEIGHT) as usize)
            .min(self.total_rows.saturating_sub(self.first_row))
    }

    pub fn position_at(&self, column: u16, row: u16) -> Option<GridPosition> {
        let cells_x = self.inner.x + TIME_LABEL_WIDTH;
        let cells_y = self.inner.y + HEADER_HEIGHT;
        if column < cells_x || row < cells_y {
            return None;
        }

        let date_index = ((column - cells_x) / self.cell_width) as usize;
        let visible_row = (row - cells_y) as usize;
        if date_index >= self.columns || visible_row >= self.visible_rows() {
            return None;
        }

        Some(GridPosition::new(date_index, self.first_row + visible_row))
    }

    pub fn cell_rect(&self, position: GridPosition) -> Option<Rect> {
        if position.date_index >= self.columns
            || position.time_index < self.first_row
            || position.time_index >= self.first_row + self.visible_rows()
        {
            return None;
        }
        Some(Rect {
            x: self.inner.x + TIME_LABEL_WIDTH + position.date_index as u16 * self.cell_width,
            y: self.inner.y + HEADER_HEIGHT + (position.time_index - self.first_row) as u16,
            width: self.cell_width,
            height: 1,
        })
    }
}

/// First visible row after scrolling just enough to keep `cursor_row` on screen.
pub fn scroll_to_show(cursor_row: usize, first_row: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        return cursor_row;
    }
    if cursor_row < first_row {
        cursor_row
    } else if cursor_row >= first_row + visible_rows {
        cursor_row + 1 - visible_rows
    } else {
        first_row
    }
}

/// Rows of cells that fit in a bordered grid area.
pub fn row_capacity(area: Rect) -> usize {
    area.height.saturating_sub(2 + HEADER_HEIGHT) as usize
}

/// Updates the stored scroll offset so the cursor stays visible and no
/// blank rows trail the last time, then returns the geometry to draw and
/// hit-test with.
pub fn fit_scroll(state: &mut AppState, area: Rect) -> GridGeometry {
    let capacity = row_capacity(area);
    let total = state.page.height();
    let max_first = total.saturating_sub(capacity);
    let first_row = scroll_to_show(state.cursor.time_index, state.grid_scroll.min(max_first), capacity);
    state.grid_scroll = first_row.min(max_first);
    GridGeometry::new(area, state.page.width(), total, state.grid_scroll)
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub columns: Vec<DateColumn>,
    pub rows: Vec<TimeRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateColumn {
    pub date: NaiveDate,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeRow {
    pub label: String,
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub position: GridPosition,
    pub level: Availability,
    pub in_preview: bool,
    pub is_cursor: bool,
}

pub fn calculate_layout(state: &AppState, first_row: usize, visible_rows: usize) -> GridLayout {
    let preview = state.engine.preview();
    let labels = state.page.times().labels();
    let last_row = (first_row + visible_rows).min(labels.len());

    let columns = state
        .page
        .dates()
        .iter()
        .map(|date| DateColumn {
            date: *date,
            label: date.format("%a %b %-d").to_string(),
        })
        .collect();

    let rows = (first_row.min(last_row)..last_row)
        .map(|time_index| TimeRow {
            label: labels[time_index].clone(),
            cells: (0..state.page.width())
                .map(|date_index| {
                    let position = GridPosition::new(date_index, time_index);
                    CellView {
                        position,
                        level: state.display_level(position),
                        in_preview: preview.as_ref().is_some_and(|rect| rect.contains(position)),
                        is_cursor: position == state.cursor,
                    }
                })
                .collect(),
        })
        .collect();

    GridLayout { columns, rows }
}
