//! UI layer for the desktop GUI: catalog window, breed table and detail dialog.

pub mod app;

pub use app::DesktopGuiApp;
