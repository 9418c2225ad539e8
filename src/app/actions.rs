//! Screens, routes and the navigator handed to grids

use tokio::sync::mpsc;

use crate::app::state::AppMessage;
use crate::grid::Navigator;
use crate::models::{CompositeScore, TransferPlayer};

/// Context tag of the player search grid; activating a row opens rankings
pub const RANKINGS_CONTEXT: &str = "rankings";
/// Context tag of the composite score grid; activating a row opens the breakdown
pub const BREAKDOWN_CONTEXT: &str = "breakdown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Players = 0,
    Rankings = 1,
    Breakdown = 2,
    Assistant = 3,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Players => "Players",
            Self::Rankings => "Rankings",
            Self::Breakdown => "Breakdown",
            Self::Assistant => "Assistant",
        }
    }

    pub fn all() -> &'static [Screen] {
        &[Self::Players, Self::Rankings, Self::Breakdown, Self::Assistant]
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Navigation request produced by a row activation
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// Rank replacement candidates for this player's roster spot
    Rankings(TransferPlayer),
    /// Compare a candidate against the benchmark and the displayed player
    Breakdown {
        player_name: String,
        prev_team_name: String,
    },
}

/// Translates row activations into routes for the state manager
#[derive(Clone)]
pub struct Router {
    tx: mpsc::Sender<AppMessage>,
}

impl Router {
    pub fn new(tx: mpsc::Sender<AppMessage>) -> Self {
        Self { tx }
    }

    fn push(&self, route: Route) {
        tracing::debug!("Navigating to {:?}", route);
        if let Err(e) = self.tx.try_send(AppMessage::Navigate(route)) {
            tracing::warn!("Dropped navigation request: {}", e);
        }
    }
}

impl Navigator<TransferPlayer> for Router {
    fn navigate(&mut self, context: &str, row: &TransferPlayer) {
        match context {
            RANKINGS_CONTEXT => self.push(Route::Rankings(row.clone())),
            other => tracing::trace!("No route for player row in {}", other),
        }
    }
}

impl Navigator<CompositeScore> for Router {
    fn navigate(&mut self, context: &str, row: &CompositeScore) {
        match context {
            BREAKDOWN_CONTEXT => self.push(Route::Breakdown {
                player_name: row.player_name.clone(),
                prev_team_name: row.prev_team_name.clone(),
            }),
            other => tracing::trace!("No route for score row in {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> TransferPlayer {
        TransferPlayer {
            season_year: 2024,
            player_name: "Caleb Love".into(),
            player_id: 99,
            player_year: 4,
            team_name: "Arizona".into(),
            position: "G".into(),
            height_inches: Some(76),
        }
    }

    #[test]
    fn player_rows_route_to_rankings() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut router = Router::new(tx);
        router.navigate(RANKINGS_CONTEXT, &player());

        match rx.try_recv() {
            Ok(AppMessage::Navigate(Route::Rankings(p))) => assert_eq!(p.player_id, 99),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn score_rows_route_to_breakdown() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut router = Router::new(tx);
        let score = CompositeScore {
            player_name: "RJ Luis".into(),
            prev_team_name: "St. John's".into(),
            ..Default::default()
        };
        router.navigate(BREAKDOWN_CONTEXT, &score);

        match rx.try_recv() {
            Ok(AppMessage::Navigate(Route::Breakdown { player_name, prev_team_name })) => {
                assert_eq!(player_name, "RJ Luis");
                assert_eq!(prev_team_name, "St. John's");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unknown_context_is_ignored() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut router = Router::new(tx);
        router.navigate("fit", &player());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn screens_are_ordered() {
        let titles: Vec<_> = Screen::all().iter().map(|s| s.title()).collect();
        assert_eq!(titles, vec!["Players", "Rankings", "Breakdown", "Assistant"]);
        assert_eq!(Screen::Assistant.index(), 3);
    }
}
