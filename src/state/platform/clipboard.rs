//! Cross-platform clipboard access for copying queries and pasting them in.
//!
//! On Linux the external tools are tried first, in order:
//! 1. `wl-copy` / `wl-paste` (Wayland)
//! 2. `xclip` (X11)
//! 3. `xsel` (X11 alternative)
//!
//! and `arboard` is the fallback. Content copied through an external tool
//! survives the process exiting, which an `arboard` handle does not on X11.
//! macOS and Windows use `arboard` directly.

use thiserror::Error;

// ============================================================================
// Error Type
// ============================================================================

/// Error type for clipboard operations.
#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    /// Clipboard is not available on this system.
    #[error("Clipboard not available")]
    NotAvailable,
    /// Failed to copy text to clipboard.
    #[error("Failed to copy: {0}")]
    CopyFailed(String),
    /// Failed to read from clipboard.
    #[error("Failed to read: {0}")]
    ReadFailed(String),
    /// The clipboard holds no text.
    #[error("Clipboard is empty")]
    Empty,
}

/// Result type for clipboard operations.
pub type ClipboardResult<T> = Result<T, ClipboardError>;

#[cfg(target_os = "linux")]
const COPY_TOOLS: [(&str, &[&str]); 3] = [
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

#[cfg(target_os = "linux")]
const PASTE_TOOLS: [(&str, &[&str]); 3] = [
    ("wl-paste", &["--no-newline"]),
    ("xclip", &["-selection", "clipboard", "-o"]),
    ("xsel", &["--clipboard", "--output"]),
];

// ============================================================================
// Clipboard Manager
// ============================================================================

/// Clipboard access that prefers external tools on Linux.
#[derive(Debug)]
pub struct ClipboardManager {
    prefer_external_tools: bool,
}

impl Default for ClipboardManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            prefer_external_tools: true,
        }
    }

    /// Creates a clipboard manager that only uses the arboard crate.
    #[cfg(test)]
    #[must_use]
    pub fn arboard_only() -> Self {
        Self {
            prefer_external_tools: false,
        }
    }

    /// Copies text to the clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard is not available or the copy fails.
    pub fn copy_text(&self, text: &str) -> ClipboardResult<()> {
        #[cfg(target_os = "linux")]
        if self.prefer_external_tools
            && COPY_TOOLS
                .iter()
                .any(|(tool, args)| copy_with(tool, args, text))
        {
            return Ok(());
        }

        let mut clipboard = arboard::Clipboard::new().map_err(|_| ClipboardError::NotAvailable)?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::CopyFailed(e.to_string()))
    }

    /// Reads text from the clipboard, trimmed of surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ClipboardError::Empty` if there is no text, or another error
    /// if the clipboard cannot be read.
    pub fn read_text(&self) -> ClipboardResult<String> {
        #[cfg(target_os = "linux")]
        if self.prefer_external_tools
            && let Some(text) = PASTE_TOOLS.iter().find_map(|(tool, args)| paste_with(tool, args))
        {
            return non_empty(&text);
        }

        let mut clipboard = arboard::Clipboard::new().map_err(|_| ClipboardError::NotAvailable)?;
        let text = clipboard
            .get_text()
            .map_err(|e| ClipboardError::ReadFailed(e.to_string()))?;
        non_empty(&text)
    }
}

fn non_empty(text: &str) -> ClipboardResult<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(ClipboardError::Empty)
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(target_os = "linux")]
fn copy_with(tool: &str, args: &[&str], text: &str) -> bool {
    use std::io::Write;
    use std::process::{Command, Stdio};

    let Ok(mut child) = Command::new(tool)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    else {
        return false;
    };

    let Some(mut stdin) = child.stdin.take() else {
        return false;
    };

    if stdin.write_all(text.as_bytes()).is_err() {
        return false;
    }

    drop(stdin);

    child.wait().map(|s| s.success()).unwrap_or(false)
}

#[cfg(target_os = "linux")]
fn paste_with(tool: &str, args: &[&str]) -> Option<String> {
    use std::process::{Command, Stdio};

    let output = Command::new(tool)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout).ok()
}

// ============================================================================
// Tests
// ============================================================================
