pub mod buffer;
pub mod catalog;
pub mod config;
pub mod host;
pub mod palette;
pub mod render;
pub mod terminal_host;
pub mod theme;
