//! Per-platform clipboard strategies.

use std::path::Path;

use super::{dependencies::ClipboardDependencies, host::Platform, types::CopyResult};

mod linux;
mod macos;
mod windows;

pub use linux::{ImageInput, LINUX_TOOLS, Tool};

/// A platform clipboard strategy. At most one is available on any host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Linux,
    MacOs,
    Windows,
}

impl Provider {
    /// Selection order. The availability checks are mutually exclusive, so the order only
    /// matters for how many checks run.
    pub const ALL: [Provider; 3] = [Provider::Linux, Provider::MacOs, Provider::Windows];

    pub fn name(self, deps: &ClipboardDependencies) -> &'static str {
        match self {
            Self::Linux => "Linux",
            Self::MacOs => "macOS (osascript)",
            Self::Windows if deps.host.is_wsl() => "Windows (via WSL)",
            Self::Windows => "Windows",
        }
    }

    /// Whether this strategy fits the host. Reads only the host snapshot and, for Linux,
    /// the executable locator.
    pub fn is_available(self, deps: &ClipboardDependencies) -> bool {
        let host = &deps.host;
        match self {
            Self::Linux => {
                host.platform == Platform::Linux
                    && !host.is_wsl()
                    && LINUX_TOOLS
                        .iter()
                        .any(|tool| deps.locator.exists(tool.command))
            }
            Self::MacOs => host.platform == Platform::MacOs,
            Self::Windows => host.platform == Platform::Windows || host.is_wsl(),
        }
    }

    pub async fn copy_image(self, deps: &ClipboardDependencies, image_path: &Path) -> CopyResult {
        match self {
            Self::Linux => linux::copy_image(deps, image_path).await,
            Self::MacOs => macos::copy_image(deps, image_path).await,
            Self::Windows => windows::copy_image(deps, image_path).await,
        }
    }
}
