pub mod format;

pub use format::{fixed, height, percent, ratio_percent, round_to, truncate};
