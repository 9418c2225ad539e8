pub mod keybinds;
pub mod settings;

pub use keybinds::{KeyBind, KeyBindings};
pub use settings::Settings;
