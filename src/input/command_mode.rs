use crate::grid::Tool;

#[derive(Debug, PartialEq)]
pub enum Command {
    Quit,
    Write,
    WriteQuit,
    Page(usize),
    Tool(Tool),
    Clear,
    Theme(String),
    Help,
    Error(String),
}

pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();

    let Some(command_text) = trimmed.strip_prefix(':') else {
        return Command::Error("Commands must start with ':'".to_string());
    };

    let parts: Vec<&str> = command_text.split_whitespace().collect();

    if parts.is_empty() {
        return Command::Error("Empty command".to_string());
    }

    match parts[0] {
        "q" | "quit" => Command::Quit,
        "w" | "write" => Command::Write,
        "wq" | "x" => Command::WriteQuit,
        "clear" => Command::Clear,
        "help" => Command::Help,
        "page" => match parts.get(1).map(|p| p.parse::<usize>()) {
            None => Command::Error("page requires a page number".to_string()),
            Some(Ok(n)) if n >= 1 => Command::Page(n - 1),
            Some(_) => Command::Error(format!("Invalid page number: {}", parts[1])),
        },
        "tool" => match parts.get(1).map(|t| t.to_lowercase()) {
            None => Command::Error("tool requires 'available' or 'ifneeded'".to_string()),
            Some(t) if t == "available" || t == "a" => Command::Tool(Tool::Available),
            Some(t) if t == "ifneeded" || t == "if-needed" || t == "i" => Command::Tool(Tool::IfNeeded),
            Some(t) => Command::Error(format!("Unknown tool: {}", t)),
        },
        "theme" => {
            if parts.len() < 2 {
                Command::Error("theme requires a theme name".to_string())
            } else {
                Command::Theme(parts[1].to_string())
            }
        }
        _ => Command::Error(format!("Unknown command: {}", parts[0])),
    }
}
