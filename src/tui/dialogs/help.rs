use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use when4meet::app::AppState;

pub fn render(f: &mut Frame, app: &AppState) {
    let area = f.size();
    let help_width = 60.min(area.width);
    let help_height = 23.min(area.height);
    let x = (area.width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = ratatui::layout::Rect {
        x,
        y,
        width: help_width,
        height: help_height,
    };

    f.render_widget(Clear, help_area);

    let help_text = vec![
        Line::from(vec![Span::styled("when4meet Help", Style::default().fg(app.theme.help_title).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![Span::styled("Mouse:", Style::default().fg(app.theme.help_section))]),
        Line::from("  click    - Toggle one slot"),
        Line::from("  drag     - Paint a rectangle; starting on a slot"),
        Line::from("             already at the tool's level erases"),
        Line::from("  wheel    - Scroll through the day"),
        Line::from(""),
        Line::from(vec![Span::styled("Navigation:", Style::default().fg(app.theme.help_section))]),
        Line::from("  h/l      - Previous/next day"),
        Line::from("  j/k      - Next/previous time slot"),
        Line::from("  J/K      - Move two slots (one hour)"),
        Line::from("  0/$      - First/last time of the day"),
        Line::from("  [ / ]    - Previous/next week"),
        Line::from(""),
        Line::from(vec![Span::styled("Selecting:", Style::default().fg(app.theme.help_section))]),
        Line::from("  Space    - Toggle slot under cursor"),
        Line::from("  v        - Start a rectangle at the cursor;"),
        Line::from("             move, then v/Enter/Esc to apply"),
        Line::from("  1 / 2    - Available / If Needed tool"),
        Line::from("  Tab      - Switch tool"),
        Line::from("  C        - Clear every slot of this event"),
        Line::from("  s        - Save"),
        Line::from(""),
        Line::from(vec![Span::styled("Commands:", Style::default().fg(app.theme.help_section))]),
        Line::from("  :w       - Save"),
        Line::from("  :q       - Quit"),
        Line::from("  :wq      - Save and quit"),
        Line::from("  :page    - Jump to week (:page 2)"),
        Line::from("  :tool    - Pick tool (:tool ifneeded)"),
        Line::from("  :clear   - Clear every slot of this event"),
        Line::from("  :theme   - Change theme (:theme gruvbox)"),
        Line::from("  :help    - Show this help"),
        Line::from(""),
    ];

    let visible_lines = help_height.saturating_sub(3) as usize;
    let total_lines = help_text.len();
    let max_scroll = total_lines.saturating_sub(visible_lines);
    let scroll = app.help_scroll.min(max_scroll);

    let scrolled_text: Vec<Line> = help_text
        .into_iter()
        .skip(scroll)
        .take(visible_lines)
        .collect();

    let help_paragraph = Paragraph::new(scrolled_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!(" Help (j/k to scroll, q to close) [{}/{}] ", scroll + 1, total_lines))
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(help_paragraph, help_area);
}
