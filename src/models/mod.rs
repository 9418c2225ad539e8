pub mod archetype;
pub mod breakdown;
pub mod chat;
pub mod compute;
pub mod player;
pub mod rank;

pub use archetype::ArchetypeSplit;
pub use breakdown::{BreakdownGroup, BreakdownSource};
pub use chat::{ChatLog, ChatMessage, ChatRole};
pub use compute::{CompositeScore, HistComputeResponse, HistPlayerStatsResponse, SuccStats};
pub use player::TransferPlayer;
pub use rank::{RankCategory, RankSummary};
