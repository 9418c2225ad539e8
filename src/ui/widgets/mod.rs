pub mod help;
pub mod searchbar;
pub mod statusbar;
pub mod table;

pub use help::HelpOverlay;
pub use statusbar::StatusSummary;
pub use table::GridTable;
