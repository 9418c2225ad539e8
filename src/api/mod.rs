pub mod client;
pub mod error;

pub use client::{ComputeClient, ComputeTarget, PlayerStatsTarget};
