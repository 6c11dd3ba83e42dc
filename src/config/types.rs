//! Configuration type definitions.

use crate::clipboard::DEFAULT_TIMEOUT_MS;
use serde::{Deserialize, Serialize};

/// Clipboard delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipboardConfig {
    /// Time budget in milliseconds for every external clipboard tool (valid range: 100 - 60000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Disk-save fallback settings.
///
/// Used when the clipboard is unavailable and the image should be kept on disk instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for saved images; `~` is expanded
    #[serde(default = "default_save_directory")]
    pub save_directory: String,

    /// Filename template without extension (chrono format specifiers, e.g. `%Y-%m-%d`)
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// Save the image to disk when the clipboard copy fails
    #[serde(default = "default_fallback_to_file")]
    pub fallback_to_file: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            save_directory: default_save_directory(),
            filename_template: default_filename_template(),
            fallback_to_file: default_fallback_to_file(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_save_directory() -> String {
    "~/Pictures/pngclip".to_string()
}

fn default_filename_template() -> String {
    "pngclip_%Y-%m-%d_%H%M%S".to_string()
}

fn default_fallback_to_file() -> bool {
    true
}
