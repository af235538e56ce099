//! Platform-specific helpers.
//!
//! - [`clipboard`] - copying queries out and pasting them in
//! - [`paths`] - configuration and data file locations

pub mod clipboard;
pub mod paths;

pub use clipboard::ClipboardManager;
