use ratatui::style::Color;

use crate::engine::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub shadow: Color,
    /// Contribution levels 0..=4.
    pub levels: [Color; 5],
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                bg: Color::Rgb(0x0d, 0x11, 0x17),
                fg: Color::Rgb(0xe6, 0xed, 0xf3),
                muted: Color::Rgb(0x7d, 0x85, 0x90),
                accent: Color::Rgb(0x2f, 0x81, 0xf7),
                border: Color::Rgb(0x30, 0x36, 0x3d),
                shadow: Color::Rgb(0x01, 0x04, 0x09),
                levels: [
                    Color::Rgb(0x16, 0x1b, 0x22),
                    Color::Rgb(0x0e, 0x44, 0x29),
                    Color::Rgb(0x00, 0x6d, 0x32),
                    Color::Rgb(0x26, 0xa6, 0x41),
                    Color::Rgb(0x39, 0xd3, 0x53),
                ],
            },
            Theme::Light => Self {
                bg: Color::Rgb(0xff, 0xff, 0xff),
                fg: Color::Rgb(0x1f, 0x23, 0x28),
                muted: Color::Rgb(0x65, 0x6d, 0x76),
                accent: Color::Rgb(0x09, 0x69, 0xda),
                border: Color::Rgb(0xd0, 0xd7, 0xde),
                shadow: Color::Rgb(0x8c, 0x95, 0x9f),
                levels: [
                    Color::Rgb(0xeb, 0xed, 0xf0),
                    Color::Rgb(0x9b, 0xe9, 0xa8),
                    Color::Rgb(0x40, 0xc4, 0x63),
                    Color::Rgb(0x30, 0xa1, 0x4e),
                    Color::Rgb(0x21, 0x6e, 0x39),
                ],
            },
        }
    }

    pub fn level(&self, level: u8) -> Color {
        self.levels[(level as usize).min(self.levels.len() - 1)]
    }
}

/// Badge color for a language key (see `feed::types::lang_key`).
pub fn lang_color(key: &str) -> Color {
    match key {
        "dart" => Color::Rgb(0x00, 0xb4, 0xab),
        "javascript" => Color::Rgb(0xf1, 0xe0, 0x5a),
        "typescript" => Color::Rgb(0x31, 0x78, 0xc6),
        "html" => Color::Rgb(0xe3, 0x4c, 0x26),
        "css" => Color::Rgb(0x56, 0x3d, 0x7c),
        "python" => Color::Rgb(0x35, 0x72, 0xa5),
        "rust" => Color::Rgb(0xde, 0xa5, 0x84),
        "java" => Color::Rgb(0xb0, 0x72, 0x19),
        "kotlin" => Color::Rgb(0xa9, 0x7b, 0xff),
        "swift" => Color::Rgb(0xf0, 0x51, 0x38),
        "go" => Color::Rgb(0x00, 0xad, 0xd8),
        "c" => Color::Rgb(0x55, 0x55, 0x55),
        "shell" => Color::Rgb(0x89, 0xe0, 0x51),
        _ => Color::Rgb(0x8b, 0x94, 0x9e),
    }
}
