//! Clipboard image delivery for pngclip.
//!
//! This module copies a PNG to the system clipboard by driving external tools:
//! - Linux: `wl-copy` (Wayland), then `xclip` / `xsel` (X11)
//! - macOS: `osascript`
//! - Windows and WSL: `powershell.exe`, with `wslpath` translation under WSL
//!
//! Every invocation is bounded by one timeout and killed when it overruns.

pub mod dependencies;
pub mod host;
pub mod locator;
pub mod providers;
pub mod runner;
pub mod types;


use std::ffi::OsStr;
use std::path::Path;
use std::time::Duration;

pub use dependencies::ClipboardDependencies;
pub use host::{HostEnv, Platform};
pub use providers::Provider;
pub use types::{ClipboardError, CopyResult, DEFAULT_TIMEOUT_MS, ErrorKind};

/// Entry point for copying images to the clipboard.
///
/// Owns the executable cache, so lookups are shared across every copy made through the
/// same instance.
#[derive(Clone, Default)]
pub struct Clipboard {
    deps: ClipboardDependencies,
}

impl Clipboard {
    /// Clipboard for the running host with the given timeout.
    pub fn new(timeout: Duration) -> Self {
        Self {
            deps: ClipboardDependencies::default().with_timeout(timeout),
        }
    }

    /// Clipboard with custom dependencies (useful for testing).
    pub fn with_dependencies(deps: ClipboardDependencies) -> Self {
        Self { deps }
    }

    pub fn dependencies(&self) -> &ClipboardDependencies {
        &self.deps
    }

    /// The provider that would handle a copy right now, if any.
    pub fn active_provider(&self) -> Option<Provider> {
        Provider::ALL
            .into_iter()
            .find(|provider| provider.is_available(&self.deps))
    }

    pub fn provider_name(&self) -> Option<&'static str> {
        self.active_provider()
            .map(|provider| provider.name(&self.deps))
    }

    /// Copy the PNG at `image_path` to the clipboard.
    pub async fn copy_image(&self, image_path: &Path) -> CopyResult {
        let Some(provider) = self.active_provider() else {
            log::warn!("No clipboard provider matches {:?}", self.deps.host);
            return Err(ClipboardError::NoProvider);
        };

        log::info!(
            "Copying {} to clipboard via {}",
            image_path.display(),
            provider.name(&self.deps)
        );
        provider.copy_image(&self.deps, image_path).await
    }

    /// Copy PNG bytes to the clipboard.
    ///
    /// The bytes are staged in a private temporary directory under `filename` and removed
    /// once the copy finishes.
    pub async fn copy_png(&self, image_data: &[u8], filename: &str) -> CopyResult {
        log::debug!(
            "Staging {} ({} bytes) for clipboard copy",
            filename,
            image_data.len()
        );
        let staging = tempfile::Builder::new().prefix("pngclip-").tempdir()?;
        let name = Path::new(filename)
            .file_name()
            .unwrap_or_else(|| OsStr::new("image.png"));
        let image_path = staging.path().join(name);
        tokio::fs::write(&image_path, image_data).await?;

        let result = self.copy_image(&image_path).await;
        if let Err(e) = staging.close() {
            log::debug!("Failed to remove staging directory: {}", e);
        }
        result
    }
}
