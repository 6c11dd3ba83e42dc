//! Snapshot of the host platform and the environment variables that drive provider selection.

use std::env;
use std::ffi::OsString;

/// Environment variable set by WSL inside every Linux distribution it runs.
pub const WSL_DISTRO_ENV: &str = "WSL_DISTRO_NAME";

/// Operating system family as far as clipboard delivery is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
    Other,
}

impl Platform {
    /// Platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            Self::Linux
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Other
        }
    }

    pub(crate) fn path_separator(self) -> char {
        match self {
            Self::Windows => ';',
            _ => ':',
        }
    }

    pub(crate) fn executable_suffixes(self) -> &'static [&'static str] {
        match self {
            Self::Windows => &[".exe", ".cmd", ".bat", ".com", ""],
            _ => &[""],
        }
    }
}

/// Everything provider selection reads from the running process.
///
/// Built once from the real process with [`HostEnv::detect`], or by hand in tests to
/// simulate another host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnv {
    pub platform: Platform,
    /// Value of `WSL_DISTRO_NAME`, if set and non-empty.
    pub wsl_distro: Option<String>,
    /// Raw search path (`PATH`).
    pub search_path: Option<OsString>,
}

impl HostEnv {
    pub fn detect() -> Self {
        let wsl_distro = env::var(WSL_DISTRO_ENV).ok().filter(|name| !name.is_empty());
        let host = Self {
            platform: Platform::current(),
            wsl_distro,
            search_path: env::var_os("PATH"),
        };
        log::debug!(
            "Detected host: platform={:?}, wsl={:?}",
            host.platform,
            host.wsl_distro
        );
        host
    }

    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            wsl_distro: None,
            search_path: None,
        }
    }

    pub fn with_wsl(mut self, distro: impl Into<String>) -> Self {
        self.wsl_distro = Some(distro.into());
        self
    }

    pub fn with_search_path(mut self, path: impl Into<OsString>) -> Self {
        self.search_path = Some(path.into());
        self
    }

    /// True for a Linux process inside WSL. The distro variable means nothing elsewhere.
    pub fn is_wsl(&self) -> bool {
        self.platform == Platform::Linux && self.wsl_distro.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_uses_semicolon_and_suffixes() {
        assert_eq!(Platform::Windows.path_separator(), ';');
        assert_eq!(
            Platform::Windows.executable_suffixes(),
            &[".exe", ".cmd", ".bat", ".com", ""]
        );
        assert_eq!(Platform::Linux.path_separator(), ':');
        assert_eq!(Platform::MacOs.executable_suffixes(), &[""]);
    }

    #[test]
    fn builder_sets_wsl() {
        let host = HostEnv::new(Platform::Linux).with_wsl("Ubuntu");
        assert!(host.is_wsl());
        assert!(!HostEnv::new(Platform::Linux).is_wsl());
        assert!(!HostEnv::new(Platform::MacOs).with_wsl("Ubuntu").is_wsl());
        assert!(!HostEnv::new(Platform::Windows).with_wsl("Ubuntu").is_wsl());
    }
}
