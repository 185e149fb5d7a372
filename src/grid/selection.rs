use std::ops::RangeInclusive;

use crate::availability::{Availability, AvailabilitySheet};
use crate::grid::page::{GridPage, GridPosition};

/// Which level a drag paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Available,
    IfNeeded,
}

impl Tool {
    pub fn level(self) -> Availability {
        match self {
            Tool::Available => Availability::Available,
            Tool::IfNeeded => Availability::IfNeeded,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Tool::Available => Tool::IfNeeded,
            Tool::IfNeeded => Tool::Available,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::Available => "Available",
            Tool::IfNeeded => "If Needed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Select,
    Deselect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        start: GridPosition,
        current: GridPosition,
        mode: DragMode,
        tool: Tool,
    },
}

/// Inclusive rectangle of grid positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRect {
    pub dates: RangeInclusive<usize>,
    pub times: RangeInclusive<usize>,
}

impl SelectionRect {
    /// Rectangle with `a` and `b` as opposite corners, whichever way round.
    pub fn spanning(a: GridPosition, b: GridPosition) -> Self {
        Self {
            dates: a.date_index.min(b.date_index)..=a.date_index.max(b.date_index),
            times: a.time_index.min(b.time_index)..=a.time_index.max(b.time_index),
        }
    }

    pub fn contains(&self, position: GridPosition) -> bool {
        self.dates.contains(&position.date_index) && self.times.contains(&position.time_index)
    }

    pub fn positions(&self) -> impl Iterator<Item = GridPosition> + '_ {
        self.dates
            .clone()
            .flat_map(move |d| self.times.clone().map(move |t| GridPosition::new(d, t)))
    }

    /// Number of cells; never zero since both corners are included.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        (self.dates.end() - self.dates.start() + 1) * (self.times.end() - self.times.start() + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub rect: SelectionRect,
    pub mode: DragMode,
    pub tool: Tool,
    pub changed: usize,
}

/// Turns pointer presses, moves and releases over the grid into changes to
/// an [`AvailabilitySheet`].
///
/// The tool is captured when the drag starts, so switching tools mid-drag
/// only affects the next drag. Deselecting clears a slot only if it holds the
/// captured tool's level.
#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    tool: Tool,
    state: DragState,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn pointer_down(&mut self, position: GridPosition, page: &GridPage, sheet: &AvailabilitySheet) {
        let slot = page.slot_at(position);
        let mode = if sheet.get(&slot) == self.tool.level() {
            DragMode::Deselect
        } else {
            DragMode::Select
        };

        tracing::trace!("Drag started at {:?} ({:?} {:?})", position, mode, self.tool);

        self.state = DragState::Dragging {
            start: position,
            current: position,
            mode,
            tool: self.tool,
        };
    }

    pub fn pointer_enter(&mut self, position: GridPosition, page: &GridPage) {
        if let DragState::Dragging { current, .. } = &mut self.state {
            assert!(
                page.contains(position),
                "grid position {:?} outside page of {}x{}",
                position,
                page.width(),
                page.height()
            );
            *current = position;
        }
    }

    /// Commits the active drag, if any, and returns to idle.
    pub fn pointer_up(&mut self, page: &GridPage, sheet: &mut AvailabilitySheet) -> Option<CommitSummary> {
        let DragState::Dragging {
            start,
            current,
            mode,
            tool,
        } = std::mem::take(&mut self.state)
        else {
            return None;
        };

        let rect = SelectionRect::spanning(start, current);
        let mut changed = 0;

        for position in rect.positions() {
            let slot = page.slot_at(position);
            let next = match mode {
                DragMode::Select => tool.level(),
                DragMode::Deselect if sheet.get(&slot) == tool.level() => Availability::Unavailable,
                DragMode::Deselect => continue,
            };
            if sheet.set(slot, next) {
                changed += 1;
            }
        }

        tracing::debug!(
            "Committed {:?} of {:?} over dates {:?} times {:?}: {} slots changed",
            mode,
            tool,
            rect.dates,
            rect.times,
            changed
        );

        Some(CommitSummary {
            rect,
            mode,
            tool,
            changed,
        })
    }

    pub fn preview(&self) -> Option<SelectionRect> {
        match self.state {
            DragState::Dragging { start, current, .. } => Some(SelectionRect::spanning(start, current)),
            DragState::Idle => None,
        }
    }

    /// Level a cell should be drawn with, taking the live preview into account.
    pub fn preview_level(&self, position: GridPosition, committed: Availability) -> Availability {
        let DragState::Dragging {
            start,
            current,
            mode,
            tool,
        } = self.state
        else {
            return committed;
        };

        if !SelectionRect::spanning(start, current).contains(position) {
            return committed;
        }

        match mode {
            DragMode::Select => tool.level(),
            DragMode::Deselect if committed == tool.level() => Availability::Unavailable,
            DragMode::Deselect => committed,
        }
    }
}
