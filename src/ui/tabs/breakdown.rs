//! Breakdown tab: benchmark, displayed player and candidate side by side

use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::app::state::AppState;
use crate::config::KeyBindings;
use crate::grid::{Grid, GridConfig, NoNavigation, Record, ViewportBus};
use crate::models::{BreakdownGroup, BreakdownSource};
use crate::ui::layout::BreakdownLayout;
use crate::ui::theme::Theme;
use crate::ui::widgets::GridTable;

struct Section {
    group: BreakdownGroup,
    table: GridTable<Record>,
}

pub struct BreakdownTab {
    sections: Vec<Section>,
    focused: usize,
    title: Option<String>,
    status: Option<String>,
    revision: Option<u64>,
}

impl BreakdownTab {
    pub fn new(mut config: GridConfig, viewport: &ViewportBus) -> Self {
        config.show_search = false;
        config.show_index = false;
        config.left_aligned = 1;

        let sections = BreakdownGroup::ALL
            .iter()
            .map(|&group| {
                let mut grid = Grid::new(group.context(), Vec::new(), config.clone()).with_navigator(NoNavigation);
                grid.attach_viewport(viewport.subscribe());
                Section {
                    group,
                    table: GridTable::new(group.title(), grid),
                }
            })
            .collect();

        Self {
            sections,
            focused: 0,
            title: None,
            status: None,
            revision: None,
        }
    }

    /// Update cached data from state (call before render)
    pub async fn update_cache(&mut self, state: &Arc<AppState>) {
        let breakdown = state.breakdown.read().await;
        if self.revision == Some(breakdown.revision) {
            return;
        }
        self.revision = Some(breakdown.revision);
        self.title = breakdown.title();
        self.status = breakdown.stats.status();

        let source = BreakdownSource {
            compute: breakdown.compute.as_deref(),
            display_player: breakdown.display_player.as_ref().map(|p| p.player_name.as_str()),
            comparison: breakdown.stats.loaded(),
            comparison_player: breakdown.comparison_player.as_deref(),
        };

        for section in &mut self.sections {
            let table = source.table(section.group);
            section.table.grid_mut().set_columns(table.columns);
            section.table.set_rows(table.rows);
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(title) = &self.title else {
            let hint = Paragraph::new("Select a candidate on the Rankings tab to compare against the benchmark.")
                .style(theme.dim())
                .wrap(Wrap { trim: true });
            frame.render_widget(hint, area);
            return;
        };

        let layout = BreakdownLayout::new(area, self.sections.len() as u32);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(title.clone(), theme.bright()))),
            layout.title,
        );

        let status = match &self.status {
            Some(status) if status.starts_with("Error") => Span::styled(status.clone(), theme.error()),
            Some(status) => Span::styled(status.clone(), theme.dim()),
            None => Span::styled("w = next table  s = sort", theme.dim()),
        };
        frame.render_widget(Paragraph::new(Line::from(status)), layout.status);

        for (i, (section, area)) in self.sections.iter_mut().zip(layout.sections).enumerate() {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(4), Constraint::Length(1)])
                .split(area);
            section.table.render(frame, chunks[0], theme, i == self.focused);
            frame.render_widget(
                Paragraph::new(format!(" {}", section.group.note())).style(theme.dim()),
                chunks[1],
            );
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, keys: &KeyBindings) -> bool {
        if keys.next_grid.matches_event(&key) {
            self.focused = (self.focused + 1) % self.sections.len().max(1);
            return true;
        }
        match self.sections.get_mut(self.focused) {
            Some(section) => section.table.handle_key(key, keys),
            None => false,
        }
    }

    pub fn handle_click(&mut self, x: u16, y: u16) -> bool {
        for (i, section) in self.sections.iter_mut().enumerate() {
            if section.table.handle_click(x, y) {
                self.focused = i;
                return true;
            }
        }
        false
    }
}
