// src/theme.rs
use ratatui::style::{Color, Modifier, Style};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Default,
    Dark,
    Retro,
}

/// Styles a theme hands to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub header: Style,
    pub row: Style,
    pub row_alt: Style,
    pub row_new: Style,
    pub badge: Style,
    pub selected: Style,
    pub border: Style,
    pub footer: Style,
    pub overlay: Style,
    pub link: Style,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Default, Theme::Dark, Theme::Retro];

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Dark => "dark",
            Theme::Retro => "retro",
        }
    }

    pub fn from_name(name: &str) -> Option<Theme> {
        Theme::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Class applied to the document root, e.g. `theme-dark`.
    pub fn class_name(&self) -> String {
        format!("theme-{}", self.name())
    }

    pub fn next(&self) -> Theme {
        match self {
            Theme::Default => Theme::Dark,
            Theme::Dark => Theme::Retro,
            Theme::Retro => Theme::Default,
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Default => Palette {
                header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                row: Style::default().fg(Color::White),
                row_alt: Style::default().fg(Color::Gray),
                row_new: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                badge: Style::default().fg(Color::Black).bg(Color::Yellow),
                selected: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                border: Style::default().fg(Color::White),
                footer: Style::default().fg(Color::DarkGray),
                overlay: Style::default().fg(Color::White),
                link: Style::default().fg(Color::LightBlue).add_modifier(Modifier::UNDERLINED),
            },
            Theme::Dark => Palette {
                header: Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD),
                row: Style::default().fg(Color::Gray).bg(Color::Black),
                row_alt: Style::default().fg(Color::Gray).bg(Color::Rgb(28, 28, 28)),
                row_new: Style::default().fg(Color::LightGreen).bg(Color::Black),
                badge: Style::default().fg(Color::Black).bg(Color::LightGreen),
                selected: Style::default().fg(Color::Black).bg(Color::LightMagenta),
                border: Style::default().fg(Color::DarkGray),
                footer: Style::default().fg(Color::DarkGray),
                overlay: Style::default().fg(Color::Gray).bg(Color::Black),
                link: Style::default().fg(Color::LightCyan).add_modifier(Modifier::UNDERLINED),
            },
            Theme::Retro => Palette {
                header: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                row: Style::default().fg(Color::Green),
                row_alt: Style::default().fg(Color::LightGreen),
                row_new: Style::default().fg(Color::LightYellow),
                badge: Style::default().fg(Color::Black).bg(Color::LightYellow),
                selected: Style::default().add_modifier(Modifier::REVERSED),
                border: Style::default().fg(Color::Green),
                footer: Style::default().fg(Color::Green),
                overlay: Style::default().fg(Color::Green).bg(Color::Black),
                link: Style::default().fg(Color::LightYellow),
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_names() {
        assert_eq!(Theme::Default.class_name(), "theme-default");
        assert_eq!(Theme::Dark.class_name(), "theme-dark");
        assert_eq!(Theme::Retro.class_name(), "theme-retro");
    }

    #[test]
    fn test_from_name_round_trips() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_name(theme.name()), Some(theme));
        }
        assert_eq!(Theme::from_name("solarized"), None);
    }

    #[test]
    fn test_themes_differ_in_row_styling() {
        assert_ne!(Theme::Default.palette().row, Theme::Dark.palette().row);
        assert_ne!(Theme::Dark.palette().row, Theme::Retro.palette().row);
    }
}
