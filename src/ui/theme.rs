//! RosterIQ colors and the styles built from them

use ratatui::style::{Color, Modifier, Style};

use crate::models::RankCategory;

const VIOLET: Color = Color::Rgb(0x8A, 0x5C, 0xF6);
const SKY: Color = Color::Rgb(0x00, 0xC6, 0xFF);
const GREEN: Color = Color::Rgb(0x22, 0xC5, 0x5E);
const AMBER: Color = Color::Rgb(0xF5, 0x9E, 0x0B);
const RED: Color = Color::Rgb(0xEF, 0x44, 0x44);
const SLATE: Color = Color::Rgb(0x9C, 0xA3, 0xAF);

/// Archetype slice colors, cycled by position
pub const ARCHETYPE_PALETTE: [Color; 5] = [
    VIOLET,
    Color::Rgb(0xFF, 0xFF, 0xFF),
    Color::Rgb(0xFF, 0x5C, 0x97),
    Color::Rgb(0xFF, 0x7A, 0x59),
    Color::Rgb(0x82, 0xCA, 0x9D),
];

/// Player card accents: red, yellow, green, blue
pub const CARD_PALETTE: [Color; 4] = [
    Color::Rgb(0xFF, 0x4E, 0x50),
    Color::Rgb(0xFF, 0xD2, 0x00),
    Color::Rgb(0x00, 0xB0, 0x9B),
    Color::Rgb(0x00, 0xC6, 0xFF),
];

#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,
    pub fg_bright: Color,
    pub accent: Color,

    // Rank and threshold signals
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub pending: Color,

    /// Benchmark side of the success comparison bars
    pub benchmark: Color,
    /// Candidate side of the success comparison bars
    pub player: Color,

    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
    pub highlight: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Settings name lookup; anything but "light" is the dark theme
    pub fn by_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("light") {
            Self::light()
        } else {
            Self::dark()
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            fg_dim: Color::DarkGray,
            fg_bright: Color::White,
            accent: Color::Cyan,
            success: GREEN,
            warning: AMBER,
            error: RED,
            pending: SLATE,
            benchmark: VIOLET,
            player: SKY,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            selection: Color::Blue,
            highlight: Color::Yellow,
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            fg_dim: Color::DarkGray,
            fg_bright: Color::Black,
            accent: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            pending: Color::Gray,
            benchmark: Color::Magenta,
            player: Color::Blue,
            border: Color::Gray,
            border_focused: Color::Blue,
            selection: Color::LightBlue,
            highlight: Color::Yellow,
        }
    }

    fn fg_style(color: Color) -> Style {
        Style::default().fg(color)
    }

    pub fn normal(&self) -> Style {
        Self::fg_style(self.fg).bg(self.bg)
    }

    pub fn dim(&self) -> Style {
        Self::fg_style(self.fg_dim)
    }

    pub fn bright(&self) -> Style {
        Self::fg_style(self.fg_bright).add_modifier(Modifier::BOLD)
    }

    pub fn accent(&self) -> Style {
        Self::fg_style(self.accent)
    }

    pub fn header(&self) -> Style {
        self.accent().add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        Self::fg_style(self.success)
    }

    pub fn warning(&self) -> Style {
        Self::fg_style(self.warning)
    }

    pub fn error(&self) -> Style {
        Self::fg_style(self.error)
    }

    /// Highlighted table row
    pub fn selected(&self) -> Style {
        Self::fg_style(self.fg_bright).bg(self.selection)
    }

    pub fn highlight(&self) -> Style {
        Self::fg_style(self.highlight).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Self::fg_style(self.border)
    }

    pub fn border_focused(&self) -> Style {
        Self::fg_style(self.border_focused)
    }

    pub fn tab_active(&self) -> Style {
        self.header()
    }

    pub fn tab_inactive(&self) -> Style {
        self.dim()
    }

    pub fn rank_style(&self, category: RankCategory) -> Style {
        Self::fg_style(match category {
            RankCategory::Pending => self.pending,
            RankCategory::Top => self.success,
            RankCategory::Mid => self.warning,
            RankCategory::Bottom => self.error,
        })
    }

    /// Green when a threshold is met, red otherwise
    pub fn threshold_style(&self, met: bool) -> Style {
        if met {
            self.success()
        } else {
            self.error()
        }
    }

    pub fn archetype_color(&self, index: usize) -> Color {
        ARCHETYPE_PALETTE[index % ARCHETYPE_PALETTE.len()]
    }

    pub fn card_color(&self, index: usize) -> Color {
        CARD_PALETTE[index % CARD_PALETTE.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_categories_map_to_signal_colors() {
        let theme = Theme::dark();
        assert_eq!(theme.rank_style(RankCategory::Top).fg, Some(GREEN));
        assert_eq!(theme.rank_style(RankCategory::Mid).fg, Some(AMBER));
        assert_eq!(theme.rank_style(RankCategory::Bottom).fg, Some(RED));
        assert_eq!(theme.rank_style(RankCategory::Pending).fg, Some(SLATE));
    }

    #[test]
    fn archetype_colors_cycle() {
        let theme = Theme::default();
        assert_eq!(theme.archetype_color(0), VIOLET);
        assert_eq!(theme.archetype_color(5), VIOLET);
        assert_eq!(theme.card_color(4), theme.card_color(0));
    }

    #[test]
    fn unknown_theme_name_is_dark() {
        assert_eq!(Theme::by_name("LIGHT").bg, Color::White);
        assert_eq!(Theme::by_name("solarized").bg, Color::Reset);
    }
}
