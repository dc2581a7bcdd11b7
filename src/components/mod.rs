pub mod file_viewer;
pub mod hud;
pub mod network_view;
pub mod terminal;
