use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use when4meet::{
    app::AppState,
    availability::Availability,
    grid::Tool,
};

fn tool_line(app: &AppState, tool: Tool, key: char) -> Line<'static> {
    let marker = if app.engine.tool() == tool { "[x]" } else { "[ ]" };
    Line::from(vec![
        Span::raw(format!(" {} ", marker)),
        Span::styled("  ", Style::default().bg(app.theme.level_color(tool.level()))),
        Span::raw(format!(" {} ({})", tool.label(), key)),
    ])
}

pub fn render(f: &mut Frame, app: &AppState, area: Rect) {
    let heading = Style::default().fg(app.theme.help_section).add_modifier(Modifier::BOLD);

    let span = match (app.event.dates.first(), app.event.dates.last()) {
        (Some(first), Some(last)) if first != last => {
            format!("{} - {}", first.format("%b %-d"), last.format("%b %-d, %Y"))
        }
        (Some(first), _) => first.format("%b %-d, %Y").to_string(),
        _ => "No dates".to_string(),
    };

    let mut lines = vec![
        Line::from(Span::styled(
            app.event.name.clone(),
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )),
        Line::from(span),
        Line::from(""),
        Line::from(format!("Participant: {}", app.user.name)),
        Line::from(format!(
            "Cursor: {}",
            app.cursor_slot().map(|slot| slot.key()).unwrap_or_default()
        )),
        Line::from(""),
        Line::from(Span::styled("Tool", heading)),
        tool_line(app, Tool::Available, '1'),
        tool_line(app, Tool::IfNeeded, '2'),
        Line::from(""),
        Line::from(Span::styled("Selected", heading)),
        Line::from(format!(
            " {} available blocks",
            app.event_count(Availability::Available)
        )),
        Line::from(format!(
            " {} if-needed blocks",
            app.event_count(Availability::IfNeeded)
        )),
        Line::from(""),
        Line::from(Span::styled("Week", heading)),
        Line::from(format!(" {}", app.page.week_label())),
        Line::from(" [ previous   ] next"),
        Line::from(""),
        Line::from(" s save   C clear all"),
        Line::from(""),
        Line::from(Span::styled(format!("Participants ({})", app.participants.len()), heading)),
    ];
    lines.extend(app.participants.iter().map(|user| Line::from(format!(" {}", user.name))));

    let sidebar = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(sidebar, area);
}
