//! Key binding overlay

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::config::KeyBindings;
use crate::ui::theme::Theme;

pub struct HelpSection {
    pub title: &'static str,
    pub entries: Vec<(String, &'static str)>,
}

/// Sections are generated from the active bindings so remapped keys show up
pub fn sections(keys: &KeyBindings) -> Vec<HelpSection> {
    vec![
        HelpSection {
            title: "Navigation",
            entries: vec![
                (format!("1-4, {}", keys.next_tab.label()), "Switch tabs"),
                ("↑/↓, j/k".to_string(), "Move selection"),
                (
                    format!("{}/{}", keys.prev_page.label(), keys.next_page.label()),
                    "Previous/next page",
                ),
                (keys.activate.label(), "Open selected row"),
            ],
        },
        HelpSection {
            title: "Tables",
            entries: vec![
                (keys.filter.label(), "Search"),
                (keys.cycle_scope.label(), "Cycle search column"),
                (keys.clear_filter.label(), "Clear search"),
                (
                    format!("{} {}", keys.header_left.label(), keys.header_right.label()),
                    "Move header cursor",
                ),
                (keys.sort.label(), "Sort by header"),
                (keys.page_size.label(), "Rows per page"),
                (keys.next_grid.label(), "Next table (Breakdown)"),
                (keys.refresh.label(), "Reload"),
            ],
        },
        HelpSection {
            title: "Assistant",
            entries: vec![(keys.compose.label(), "Type a message")],
        },
    ]
}

pub struct HelpOverlay {
    sections: Vec<HelpSection>,
}

impl HelpOverlay {
    pub fn new(keys: &KeyBindings) -> Self {
        Self {
            sections: sections(keys),
        }
    }

    fn lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = vec![Line::raw("")];
        for section in &self.sections {
            lines.push(Line::from(Span::styled(format!("  {}:", section.title), theme.header())));
            for (combo, what) in &section.entries {
                lines.push(Line::from(vec![
                    Span::styled(format!("    {:<14}", combo), theme.accent()),
                    Span::styled(what.to_string(), theme.normal()),
                ]));
            }
            lines.push(Line::raw(""));
        }
        lines.push(Line::from(Span::styled("  Press any key to close", theme.dim())));
        lines
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        frame.render_widget(Clear, area);
        let block = Block::default()
            .title(" RosterIQ Keyboard Shortcuts ")
            .borders(Borders::ALL)
            .border_style(theme.border_focused())
            .style(theme.normal());
        frame.render_widget(Paragraph::new(self.lines(theme)).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeyBind;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn lists_grid_keys() {
        let overlay = HelpOverlay::new(&KeyBindings::default());
        let text = text(&overlay.lines(&Theme::default()));
        assert!(text.contains("Sort by header"));
        assert!(text.contains("Rows per page"));
        assert!(text.contains("Assistant:"));
    }

    #[test]
    fn follows_remapped_keys() {
        let mut keys = KeyBindings::default();
        keys.sort = KeyBind::new(KeyCode::Char('o'), KeyModifiers::NONE);
        let tables = sections(&keys).into_iter().find(|s| s.title == "Tables");
        let sort = tables.and_then(|s| s.entries.into_iter().find(|(_, what)| *what == "Sort by header"));
        assert_eq!(sort.map(|(combo, _)| combo), Some(keys.sort.label()));
    }
}
