//! Bottom status line: loaded players, ranked player, compute service

use ratatui::text::{Line, Span};

use crate::app::state::AppState;
use crate::ui::theme::Theme;

const SEPARATOR: &str = " │ ";

/// What the status line shows, captured without waiting on locks
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StatusSummary {
    pub players: Option<usize>,
    pub ranking: Option<String>,
    pub api: String,
    pub busy: bool,
}

impl StatusSummary {
    /// Uses `try_read` so drawing never blocks on the state manager;
    /// a contended lock shows as unknown for one frame
    pub fn capture(state: &AppState) -> Self {
        let (players, players_busy) = state
            .players
            .try_read()
            .map(|p| (p.data.loaded().map(|rows| rows.len()), p.data.is_loading()))
            .unwrap_or((None, false));
        let (ranking, ranking_busy) = state
            .rankings
            .try_read()
            .map(|r| (r.player.as_ref().map(|p| p.player_name.clone()), r.data.is_loading()))
            .unwrap_or((None, false));

        Self {
            players,
            ranking,
            api: state.client.base_url().to_string(),
            busy: players_busy || ranking_busy,
        }
    }

    pub fn line(&self, theme: &Theme) -> Line<'static> {
        let players = self.players.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string());
        let ranking = self.ranking.clone().unwrap_or_else(|| "-".to_string());

        let mut spans = vec![
            Span::styled("RosterIQ", theme.accent()),
            Span::raw(SEPARATOR),
            Span::raw("Players: "),
            Span::styled(players, theme.normal()),
            Span::raw(SEPARATOR),
            Span::raw("Ranking: "),
            Span::styled(ranking, theme.normal()),
            Span::raw(SEPARATOR),
            Span::raw("API: "),
            Span::styled(self.api.clone(), theme.dim()),
        ];
        if self.busy {
            spans.push(Span::raw(SEPARATOR));
            spans.push(Span::styled("loading", theme.warning()));
        }
        spans.push(Span::raw(SEPARATOR));
        spans.push(Span::styled("?=help q=quit", theme.dim()));
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ComputeClient;
    use crate::app::state::LoadState;
    use crate::db::RowStore;
    use crate::models::player::tests::sample;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::broadcast;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[tokio::test]
    async fn captures_counts_and_ranked_player() {
        let store = RowStore::open(":memory:").unwrap();
        let client = ComputeClient::new("http://127.0.0.1:8000", Duration::from_secs(1)).unwrap();
        let (ui_tx, _) = broadcast::channel(4);
        let state = AppState::new(store, client, ui_tx, Duration::from_millis(10));
        {
            let mut players = state.players.write().await;
            players.data = LoadState::Loaded(Arc::new(vec![sample("A", "X", None), sample("B", "Y", None)]));
        }
        {
            let mut rankings = state.rankings.write().await;
            rankings.player = Some(sample("Caleb Love", "Arizona", None));
            rankings.data = LoadState::Loading;
        }

        let summary = StatusSummary::capture(&state);
        assert_eq!(summary.players, Some(2));
        assert_eq!(summary.ranking.as_deref(), Some("Caleb Love"));
        assert!(summary.busy);

        let line = text(&summary.line(&Theme::default()));
        assert!(line.contains("Players: 2"));
        assert!(line.contains("Ranking: Caleb Love"));
        assert!(line.contains("http://127.0.0.1:8000/"));
        assert!(line.contains("loading"));
    }

    #[test]
    fn unknown_values_render_as_dash() {
        let line = text(&StatusSummary::default().line(&Theme::default()));
        assert!(line.contains("Players: -"));
        assert!(line.contains("Ranking: -"));
        assert!(!line.contains("loading"));
    }
}
