//! UI layer for desktop GUI: app shell, panels, and widgets.

pub mod app;
pub mod panels;
pub mod widgets;

pub use app::DesktopGuiApp;
