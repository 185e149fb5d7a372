use ratatui::style::Color;

use crate::availability::Availability;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub title: Color,
    pub available: Color,
    pub if_needed: Color,
    pub unavailable: Color,
    pub cursor: Color,
    pub preview: Color,
    pub date_header: Color,
    pub time_label: Color,
    pub status_bar: Color,
    pub help_title: Color,
    pub help_section: Color,
    pub command_mode: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            title: Color::Cyan,
            available: Color::Rgb(16, 185, 129),
            if_needed: Color::Rgb(245, 158, 11),
            unavailable: Color::Rgb(31, 41, 55),
            cursor: Color::White,
            preview: Color::Blue,
            date_header: Color::Yellow,
            time_label: Color::Gray,
            status_bar: Color::White,
            help_title: Color::Cyan,
            help_section: Color::Yellow,
            command_mode: Color::White,
            error: Color::Red,
            success: Color::Green,
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            title: Color::Rgb(251, 184, 108),
            available: Color::Rgb(184, 187, 38),
            if_needed: Color::Rgb(250, 189, 47),
            unavailable: Color::Rgb(60, 56, 54),
            cursor: Color::Rgb(235, 219, 178),
            preview: Color::Rgb(131, 165, 152),
            date_header: Color::Rgb(254, 128, 25),
            time_label: Color::Rgb(146, 131, 116),
            status_bar: Color::Rgb(235, 219, 178),
            help_title: Color::Rgb(251, 184, 108),
            help_section: Color::Rgb(254, 128, 25),
            command_mode: Color::Rgb(235, 219, 178),
            error: Color::Rgb(251, 73, 52),
            success: Color::Rgb(184, 187, 38),
        }
    }

    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            title: Color::Rgb(136, 192, 208),
            available: Color::Rgb(163, 190, 140),
            if_needed: Color::Rgb(235, 203, 139),
            unavailable: Color::Rgb(59, 66, 82),
            cursor: Color::Rgb(236, 239, 244),
            preview: Color::Rgb(129, 161, 193),
            date_header: Color::Rgb(235, 203, 139),
            time_label: Color::Rgb(76, 86, 106),
            status_bar: Color::Rgb(216, 222, 233),
            help_title: Color::Rgb(136, 192, 208),
            help_section: Color::Rgb(235, 203, 139),
            command_mode: Color::Rgb(216, 222, 233),
            error: Color::Rgb(191, 97, 106),
            success: Color::Rgb(163, 190, 140),
        }
    }

    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            title: Color::Rgb(139, 233, 253),
            available: Color::Rgb(80, 250, 123),
            if_needed: Color::Rgb(255, 184, 108),
            unavailable: Color::Rgb(68, 71, 90),
            cursor: Color::Rgb(248, 248, 242),
            preview: Color::Rgb(189, 147, 249),
            date_header: Color::Rgb(241, 250, 140),
            time_label: Color::Rgb(98, 114, 164),
            status_bar: Color::Rgb(248, 248, 242),
            help_title: Color::Rgb(139, 233, 253),
            help_section: Color::Rgb(241, 250, 140),
            command_mode: Color::Rgb(248, 248, 242),
            error: Color::Rgb(255, 85, 85),
            success: Color::Rgb(80, 250, 123),
        }
    }

    pub fn get_by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            "dracula" => Self::dracula(),
            _ => Self::default_theme(),
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "gruvbox", "nord", "dracula"]
    }

    pub fn level_color(&self, level: Availability) -> Color {
        match level {
            Availability::Available => self.available,
            Availability::IfNeeded => self.if_needed,
            Availability::Unavailable => self.unavailable,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
