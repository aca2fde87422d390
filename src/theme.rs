use ratatui::style::Color;

/// Colour scheme for the terminal views. Lives outside the quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn text(self) -> Color {
        match self {
            Theme::Light => Color::Black,
            Theme::Dark => Color::White,
        }
    }

    pub fn muted(self) -> Color {
        match self {
            Theme::Light => Color::Gray,
            Theme::Dark => Color::DarkGray,
        }
    }

    pub fn accent(self) -> Color {
        match self {
            Theme::Light => Color::Blue,
            Theme::Dark => Color::Cyan,
        }
    }

    pub fn correct(self) -> Color {
        Color::Green
    }

    pub fn incorrect(self) -> Color {
        Color::Red
    }
}
