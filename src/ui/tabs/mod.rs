pub mod assistant;
pub mod breakdown;
pub mod players;
pub mod rankings;
