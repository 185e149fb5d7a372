use ratatui::{
    Frame,
    layout::Alignment,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use when4meet::{
    app::{AppState, Mode, SaveStatus},
    ui::grid_view::screen_layout,
};

use crate::tui::{dialogs, grid, sidebar};

pub fn ui(f: &mut Frame, app: &AppState) {
    let layout = screen_layout(f.size());

    let title_text = format!("when4meet - {} - {:?} Mode", app.event.name, app.mode);
    let title = Paragraph::new(title_text)
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.title);

    grid::render(f, app, layout.grid);
    sidebar::render(f, app, layout.sidebar);

    let (status_text, status_color) = if matches!(app.mode, Mode::Command) {
        (app.command_buffer.to_string(), app.theme.command_mode)
    } else {
        let save = match &app.save_status {
            SaveStatus::Saved => "Saved".to_string(),
            SaveStatus::Unsaved => "Unsaved changes ('s' to save)".to_string(),
            SaveStatus::Error(message) => message.clone(),
        };
        let color = match app.save_status {
            SaveStatus::Error(_) => app.theme.error,
            _ => app.theme.status_bar,
        };
        let text = match &app.message {
            Some(message) => format!("{} | {}", message, save),
            None => format!("{} | Press 'q' to quit, '?' for help", save),
        };
        (text, color)
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(if matches!(app.mode, Mode::Command) { Alignment::Left } else { Alignment::Center })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, layout.status);

    if app.show_help {
        dialogs::help::render(f, app);
    }
}
