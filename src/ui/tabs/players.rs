//! Players tab: "Top Transfers" cards above the searchable player list

use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::actions::{Router, RANKINGS_CONTEXT};
use crate::app::state::AppState;
use crate::config::KeyBindings;
use crate::grid::{Grid, GridConfig, ViewportSubscription};
use crate::models::TransferPlayer;
use crate::ui::layout::PlayersLayout;
use crate::ui::theme::Theme;
use crate::ui::widgets::GridTable;
use crate::utils::height;

/// Cards shown in the strip when the screen is wide enough
const TOP_TRANSFERS: usize = 6;

pub struct PlayersTab {
    table: GridTable<TransferPlayer>,
    /// Leading store rows featured as cards
    top: Vec<TransferPlayer>,
    status: Option<String>,
    revision: Option<u64>,
}

impl PlayersTab {
    pub fn new(config: GridConfig, router: Router, viewport: ViewportSubscription) -> Self {
        let mut grid = Grid::new(RANKINGS_CONTEXT, TransferPlayer::columns(), config).with_navigator(router);
        grid.attach_viewport(viewport);
        Self {
            table: GridTable::new("Player Search", grid),
            top: Vec::new(),
            status: None,
            revision: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.table.is_editing()
    }

    /// Update cached data from state (call before render)
    pub async fn update_cache(&mut self, state: &Arc<AppState>) {
        let players = state.players.read().await;
        if self.revision == Some(players.revision) {
            return;
        }
        self.revision = Some(players.revision);
        self.status = players.data.status();

        // Keep the old rows visible while a reload is in flight
        if players.data.is_loading() {
            return;
        }
        let rows = players
            .data
            .loaded()
            .map(|rows| rows.as_ref().clone())
            .unwrap_or_default();
        drop(players);
        self.top = rows.iter().take(TOP_TRANSFERS).cloned().collect();
        self.table.set_rows(rows);
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let layout = PlayersLayout::new(area, self.status.is_some(), self.top.len());

        if let (Some(status), Some(status_area)) = (&self.status, layout.status) {
            let style = if status.starts_with("Error") { theme.error() } else { theme.dim() };
            frame.render_widget(Paragraph::new(format!(" {}", status)).style(style), status_area);
        }

        if let Some(heading) = layout.heading {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(" Top Transfers", theme.header()))),
                heading,
            );
        }
        for (i, (player, card_area)) in self.top.iter().zip(layout.cards.iter()).enumerate() {
            render_card(frame, *card_area, player, theme.card_color(i), theme);
        }

        self.table.render(frame, layout.grid, theme, true);
    }

    pub fn handle_key(&mut self, key: KeyEvent, keys: &KeyBindings) -> bool {
        self.table.handle_key(key, keys)
    }

    pub fn handle_click(&mut self, x: u16, y: u16) -> bool {
        self.table.handle_click(x, y)
    }
}

/// Name, class and height, then team and position
fn render_card(frame: &mut Frame, area: Rect, player: &TransferPlayer, color: Color, theme: &Theme) {
    let mut class = player.class_name();
    if let Some(inches) = player.height_inches {
        class.push_str(&format!(" · {}", height(inches)));
    }
    let card = Paragraph::new(vec![
        Line::from(Span::styled(player.player_name.clone(), theme.bright())),
        Line::from(Span::styled(class, theme.dim())),
        Line::from(vec![
            Span::styled(player.team_name.clone(), Style::default().fg(color)),
            Span::styled(format!(" · {}", player.position), theme.normal()),
        ]),
    ])
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(color)));
    frame.render_widget(card, area);
}
