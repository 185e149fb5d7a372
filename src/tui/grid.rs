use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use when4meet::{
    app::AppState,
    ui::grid_view::{self, GridGeometry, TIME_LABEL_WIDTH},
};

pub fn render(f: &mut Frame, app: &AppState, area: Rect) {
    let geometry = GridGeometry::new(area, app.page.width(), app.page.height(), app.grid_scroll);
    let layout = grid_view::calculate_layout(app, geometry.first_row(), geometry.visible_rows());
    let width = geometry.cell_width() as usize;
    let label_width = TIME_LABEL_WIDTH as usize;

    let mut header_spans = vec![Span::raw(" ".repeat(label_width))];
    for column in &layout.columns {
        header_spans.push(Span::styled(
            format!("{:^width$.width$}", column.label, width = width),
            Style::default().fg(app.theme.date_header).add_modifier(Modifier::BOLD),
        ));
    }

    let mut lines = vec![Line::from(header_spans)];

    for row in &layout.rows {
        let mut spans = vec![Span::styled(
            format!("{:>w$} ", row.label, w = label_width - 1),
            Style::default().fg(app.theme.time_label),
        )];

        for cell in &row.cells {
            let fill = if cell.is_cursor {
                format!("{:^width$}", "◆", width = width)
            } else if cell.in_preview {
                "░".repeat(width)
            } else {
                " ".repeat(width)
            };

            let mut style = Style::default().bg(app.theme.level_color(cell.level));
            style = if cell.is_cursor {
                style.fg(app.theme.cursor).add_modifier(Modifier::BOLD)
            } else {
                style.fg(app.theme.preview)
            };

            spans.push(Span::styled(fill, style));
        }

        lines.push(Line::from(spans));
    }

    let title = format!(
        " {} ({}/{}) ",
        app.page.week_label(),
        app.page.current_page() + 1,
        app.page.page_count()
    );
    let content = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(content, area);
}
