pub mod app;
pub mod layout;
pub mod tabs;
pub mod theme;
pub mod widgets;
