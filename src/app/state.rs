//! Application state management

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, RwLock};

use crate::api::{ComputeClient, ComputeTarget, PlayerStatsTarget};
use crate::app::actions::{Route, Screen};
use crate::db::RowStore;
use crate::models::chat::MOCK_REPLY;
use crate::models::{ChatLog, HistComputeResponse, HistPlayerStatsResponse, TransferPlayer};

/// Messages for state updates
#[derive(Debug)]
pub enum AppMessage {
    // Row store
    LoadPlayers,
    PlayersLoaded(Result<Vec<TransferPlayer>, String>),

    // Navigation
    Navigate(Route),
    RankingsLoaded {
        target: ComputeTarget,
        result: Result<HistComputeResponse, String>,
    },
    BreakdownLoaded {
        target: PlayerStatsTarget,
        result: Result<HistPlayerStatsResponse, String>,
    },

    // Assistant
    SendChat(String),
    ChatReply(String),
}

/// UI update signals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdateSignal {
    PlayersUpdated,
    RankingsUpdated,
    BreakdownUpdated,
    ChatUpdated,
    SwitchScreen(Screen),
}

/// Progress of one upstream fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Status line shown outside the grid, if any
    pub fn status(&self) -> Option<String> {
        match self {
            Self::Idle => None,
            Self::Loading => Some("Loading...".to_string()),
            Self::Loaded(_) => None,
            Self::Failed(e) => Some(format!("Error: {}", e)),
        }
    }
}

#[derive(Debug, Default)]
pub struct PlayersView {
    pub data: LoadState<Arc<Vec<TransferPlayer>>>,
    pub revision: u64,
}

/// Candidate ranking for one replaced player
#[derive(Debug, Default)]
pub struct RankingsView {
    pub player: Option<TransferPlayer>,
    pub data: LoadState<Arc<HistComputeResponse>>,
    pub revision: u64,
}

impl RankingsView {
    pub fn target(&self) -> Option<ComputeTarget> {
        self.player.as_ref().map(compute_target)
    }
}

/// Benchmark / displayed player / comparison player tables
#[derive(Debug, Default)]
pub struct BreakdownView {
    pub display_player: Option<TransferPlayer>,
    pub comparison_player: Option<String>,
    pub comparison_team: Option<String>,
    pub compute: Option<Arc<HistComputeResponse>>,
    pub stats: LoadState<HistPlayerStatsResponse>,
    pub revision: u64,
}

impl BreakdownView {
    pub fn target(&self) -> Option<PlayerStatsTarget> {
        let display = self.display_player.as_ref()?;
        Some(PlayerStatsTarget {
            player_name: self.comparison_player.clone()?,
            prev_team_name: self.comparison_team.clone()?,
            season_year: display.season_year,
        })
    }

    /// "Display vs Comparison" title
    pub fn title(&self) -> Option<String> {
        let display = self.display_player.as_ref()?;
        let comparison = self.comparison_player.as_ref()?;
        Some(format!("{} vs {}", display.player_name, comparison))
    }
}

#[derive(Debug, Default)]
pub struct ChatView {
    pub log: ChatLog,
    pub revision: u64,
}

pub fn compute_target(player: &TransferPlayer) -> ComputeTarget {
    ComputeTarget {
        team_name: player.team_name.clone(),
        season_year: player.season_year,
        player_id: player.player_id,
    }
}

/// Central application state
pub struct AppState {
    pub players: RwLock<PlayersView>,
    pub rankings: RwLock<RankingsView>,
    pub breakdown: RwLock<BreakdownView>,
    pub chat: RwLock<ChatView>,
    pub store: Arc<RowStore>,
    pub client: ComputeClient,
    pub ui_update_tx: broadcast::Sender<UiUpdateSignal>,

    // Configuration
    pub assistant_delay: Duration,
}

impl AppState {
    pub fn new(
        store: RowStore,
        client: ComputeClient,
        ui_update_tx: broadcast::Sender<UiUpdateSignal>,
        assistant_delay: Duration,
    ) -> Self {
        Self {
            players: RwLock::new(PlayersView::default()),
            rankings: RwLock::new(RankingsView::default()),
            breakdown: RwLock::new(BreakdownView::default()),
            chat: RwLock::new(ChatView::default()),
            store: Arc::new(store),
            client,
            ui_update_tx,
            assistant_delay,
        }
    }

    fn spawn_players_load(&self, tx: &mpsc::Sender<AppMessage>) {
        let store = self.store.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = tokio::task::spawn_blocking(move || store.fetch_home_page())
                .await
                .map_err(|e| e.to_string())
                .and_then(|r| r.map_err(|e| e.to_string()));
            let _ = tx.send(AppMessage::PlayersLoaded(result)).await;
        });
    }

    fn spawn_rankings_load(&self, target: ComputeTarget, tx: &mpsc::Sender<AppMessage>) {
        let client = self.client.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = client.hist_compute(&target).await.map_err(|e| e.to_string());
            let _ = tx.send(AppMessage::RankingsLoaded { target, result }).await;
        });
    }

    fn spawn_breakdown_load(&self, target: PlayerStatsTarget, tx: &mpsc::Sender<AppMessage>) {
        let client = self.client.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = client.hist_player_stats(&target).await.map_err(|e| e.to_string());
            let _ = tx.send(AppMessage::BreakdownLoaded { target, result }).await;
        });
    }

    fn spawn_chat_reply(&self, tx: &mpsc::Sender<AppMessage>) {
        let delay = self.assistant_delay;
        let tx = tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(AppMessage::ChatReply(MOCK_REPLY.to_string())).await;
        });
    }
}

/// Run the state manager task.
///
/// `tx` feeds loader results back into the same queue.
pub async fn run_state_manager(
    state: Arc<AppState>,
    mut rx: mpsc::Receiver<AppMessage>,
    tx: mpsc::Sender<AppMessage>,
    ui_update_tx: broadcast::Sender<UiUpdateSignal>,
) {
    tracing::info!("State manager started");

    while let Some(msg) = rx.recv().await {
        match msg {
            AppMessage::LoadPlayers => {
                let mut players = state.players.write().await;
                players.data = LoadState::Loading;
                players.revision += 1;
                drop(players);
                state.spawn_players_load(&tx);
                let _ = ui_update_tx.send(UiUpdateSignal::PlayersUpdated);
            }

            AppMessage::PlayersLoaded(result) => {
                let mut players = state.players.write().await;
                players.data = match result {
                    Ok(rows) => {
                        tracing::info!("Loaded {} players", rows.len());
                        LoadState::Loaded(Arc::new(rows))
                    }
                    Err(e) => {
                        tracing::error!("Failed to load players: {}", e);
                        LoadState::Failed(e)
                    }
                };
                players.revision += 1;
                drop(players);
                let _ = ui_update_tx.send(UiUpdateSignal::PlayersUpdated);
            }

            AppMessage::Navigate(Route::Rankings(player)) => {
                tracing::info!(
                    "Ranking replacements for {} ({} {})",
                    player.player_name,
                    player.team_name,
                    player.season_year
                );
                let target = compute_target(&player);
                let mut rankings = state.rankings.write().await;
                rankings.player = Some(player);
                rankings.data = LoadState::Loading;
                rankings.revision += 1;
                drop(rankings);

                state.spawn_rankings_load(target, &tx);
                let _ = ui_update_tx.send(UiUpdateSignal::RankingsUpdated);
                let _ = ui_update_tx.send(UiUpdateSignal::SwitchScreen(Screen::Rankings));
            }

            AppMessage::RankingsLoaded { target, result } => {
                let mut rankings = state.rankings.write().await;
                if rankings.target().as_ref() != Some(&target) {
                    tracing::debug!("Discarding stale rankings for {:?}", target);
                    continue;
                }
                rankings.data = match result {
                    Ok(resp) => LoadState::Loaded(Arc::new(resp)),
                    Err(e) => {
                        tracing::error!("Failed to fetch rankings: {}", e);
                        LoadState::Failed(e)
                    }
                };
                rankings.revision += 1;
                drop(rankings);
                let _ = ui_update_tx.send(UiUpdateSignal::RankingsUpdated);
            }

            AppMessage::Navigate(Route::Breakdown {
                player_name,
                prev_team_name,
            }) => {
                let rankings = state.rankings.read().await;
                let Some(display) = rankings.player.clone() else {
                    tracing::warn!("Breakdown requested without a ranked player");
                    continue;
                };
                let compute = rankings.data.loaded().cloned();
                drop(rankings);

                let mut breakdown = state.breakdown.write().await;
                breakdown.display_player = Some(display);
                breakdown.comparison_player = Some(player_name);
                breakdown.comparison_team = Some(prev_team_name);
                breakdown.compute = compute;
                breakdown.stats = LoadState::Loading;
                breakdown.revision += 1;
                let target = breakdown.target();
                drop(breakdown);

                if let Some(target) = target {
                    state.spawn_breakdown_load(target, &tx);
                }
                let _ = ui_update_tx.send(UiUpdateSignal::BreakdownUpdated);
                let _ = ui_update_tx.send(UiUpdateSignal::SwitchScreen(Screen::Breakdown));
            }

            AppMessage::BreakdownLoaded { target, result } => {
                let mut breakdown = state.breakdown.write().await;
                if breakdown.target().as_ref() != Some(&target) {
                    tracing::debug!("Discarding stale player stats for {:?}", target);
                    continue;
                }
                breakdown.stats = match result {
                    Ok(resp) => LoadState::Loaded(resp),
                    Err(e) => {
                        tracing::error!("Failed to fetch player stats: {}", e);
                        LoadState::Failed(e)
                    }
                };
                breakdown.revision += 1;
                drop(breakdown);
                let _ = ui_update_tx.send(UiUpdateSignal::BreakdownUpdated);
            }

            AppMessage::SendChat(text) => {
                let mut chat = state.chat.write().await;
                if chat.log.submit(&text).is_none() {
                    continue;
                }
                chat.revision += 1;
                drop(chat);
                state.spawn_chat_reply(&tx);
                let _ = ui_update_tx.send(UiUpdateSignal::ChatUpdated);
            }

            AppMessage::ChatReply(reply) => {
                let mut chat = state.chat.write().await;
                chat.log.reply(reply);
                chat.revision += 1;
                drop(chat);
                let _ = ui_update_tx.send(UiUpdateSignal::ChatUpdated);
            }
        }
    }

    tracing::info!("State manager stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Harness {
        state: Arc<AppState>,
        tx: mpsc::Sender<AppMessage>,
        signals: broadcast::Receiver<UiUpdateSignal>,
    }

    fn harness() -> Harness {
        let store = RowStore::open(":memory:").expect("store");
        // Nothing listens on the discard port, so fetches fail fast
        let client = ComputeClient::new("http://127.0.0.1:9", Duration::from_secs(2)).expect("client");
        let (ui_tx, signals) = broadcast::channel(64);
        let state = Arc::new(AppState::new(store, client, ui_tx.clone(), Duration::from_millis(10)));
        let (tx, rx) = mpsc::channel(64);
        tokio::spawn(run_state_manager(state.clone(), rx, tx.clone(), ui_tx));
        Harness { state, tx, signals }
    }

    impl Harness {
        async fn wait_for(&mut self, wanted: UiUpdateSignal) {
            let wait = async {
                loop {
                    match self.signals.recv().await {
                        Ok(signal) if signal == wanted => break,
                        Ok(_) => continue,
                        Err(e) => panic!("signal channel closed: {}", e),
                    }
                }
            };
            tokio::time::timeout(Duration::from_secs(5), wait)
                .await
                .expect("timed out waiting for signal");
        }
    }

    fn player(id: i64) -> TransferPlayer {
        TransferPlayer {
            season_year: 2024,
            player_name: format!("Player {}", id),
            player_id: id,
            player_year: 1,
            team_name: "Saint Marys".into(),
            position: "C".into(),
            height_inches: Some(84),
        }
    }

    #[tokio::test]
    async fn loads_players_from_store() {
        let mut h = harness();
        h.state.store.insert_player(&player(1)).expect("insert");
        h.tx.send(AppMessage::LoadPlayers).await.expect("send");

        h.wait_for(UiUpdateSignal::PlayersUpdated).await;
        h.wait_for(UiUpdateSignal::PlayersUpdated).await;

        let players = h.state.players.read().await;
        assert_eq!(players.data.loaded().map(|p| p.len()), Some(1));
        assert_eq!(players.revision, 2);
    }

    #[tokio::test]
    async fn navigation_switches_screen_and_surfaces_failure() {
        let mut h = harness();
        h.tx.send(AppMessage::Navigate(Route::Rankings(player(5)))).await.expect("send");
        h.wait_for(UiUpdateSignal::SwitchScreen(Screen::Rankings)).await;
        h.wait_for(UiUpdateSignal::RankingsUpdated).await;

        let rankings = h.state.rankings.read().await;
        assert_eq!(rankings.player.as_ref().map(|p| p.player_id), Some(5));
        assert!(matches!(rankings.data, LoadState::Failed(_)));
    }

    #[tokio::test]
    async fn stale_rankings_are_discarded() {
        let mut h = harness();
        h.tx.send(AppMessage::RankingsLoaded {
            target: compute_target(&player(1)),
            result: Ok(HistComputeResponse::default()),
        })
        .await
        .expect("send");
        // Messages are handled in order; once the chat update lands the stale one is done
        h.tx.send(AppMessage::SendChat("ping".into())).await.expect("send");
        h.wait_for(UiUpdateSignal::ChatUpdated).await;

        let rankings = h.state.rankings.read().await;
        assert_eq!(rankings.data, LoadState::Idle);
        assert_eq!(rankings.revision, 0);
    }

    #[tokio::test]
    async fn breakdown_takes_display_player_from_rankings() {
        let mut h = harness();
        h.tx.send(AppMessage::Navigate(Route::Breakdown {
            player_name: "RJ Luis".into(),
            prev_team_name: "St. Johns".into(),
        }))
        .await
        .expect("send");
        // Ignored: nothing ranked yet
        h.tx.send(AppMessage::Navigate(Route::Rankings(player(3)))).await.expect("send");
        h.wait_for(UiUpdateSignal::SwitchScreen(Screen::Rankings)).await;
        assert!(h.state.breakdown.read().await.display_player.is_none());

        h.tx.send(AppMessage::Navigate(Route::Breakdown {
            player_name: "RJ Luis".into(),
            prev_team_name: "St. Johns".into(),
        }))
        .await
        .expect("send");
        h.wait_for(UiUpdateSignal::SwitchScreen(Screen::Breakdown)).await;

        let breakdown = h.state.breakdown.read().await;
        assert_eq!(breakdown.title().as_deref(), Some("Player 3 vs RJ Luis"));
        assert_eq!(breakdown.target().map(|t| t.season_year), Some(2024));
    }

    #[tokio::test]
    async fn chat_reply_arrives_after_delay() {
        let mut h = harness();
        h.tx.send(AppMessage::SendChat("   ".into())).await.expect("send");
        h.tx.send(AppMessage::SendChat("fast pace wing".into())).await.expect("send");
        h.wait_for(UiUpdateSignal::ChatUpdated).await;
        assert_eq!(h.state.chat.read().await.log.messages()[1].content, "fast pace wing");

        h.wait_for(UiUpdateSignal::ChatUpdated).await;
        let chat = h.state.chat.read().await;
        assert!(!chat.log.is_pending());
        assert_eq!(chat.log.messages().len(), 3);
        assert_eq!(chat.log.messages()[2].content, MOCK_REPLY);
    }
}
