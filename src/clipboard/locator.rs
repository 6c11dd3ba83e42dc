//! Executable lookup on the search path, memoized per command name.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::host::Platform;

/// Finds executables on a search path and remembers the answer.
///
/// The search path is assumed stable for the locator's lifetime, so a cached entry is
/// never refreshed. Both hits and misses are cached.
#[derive(Debug)]
pub struct ExecutableLocator {
    platform: Platform,
    directories: Vec<PathBuf>,
    cache: Mutex<HashMap<String, Option<PathBuf>>>,
}

impl ExecutableLocator {
    pub fn new(platform: Platform, search_path: Option<&OsStr>) -> Self {
        let directories = search_path
            .map(|raw| split_search_path(raw, platform.path_separator()))
            .unwrap_or_default();

        Self {
            platform,
            directories,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Full path of `command`, or `None` when no search-path entry holds it.
    pub fn locate(&self, command: &str) -> Option<PathBuf> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(hit) = cache.get(command) {
            return hit.clone();
        }

        let found = self.search(command);
        match &found {
            Some(path) => log::debug!("Located {} at {}", command, path.display()),
            None => log::debug!("{} not found on search path", command),
        }
        cache.insert(command.to_string(), found.clone());
        found
    }

    pub fn exists(&self, command: &str) -> bool {
        self.locate(command).is_some()
    }

    /// Forget every cached lookup.
    pub fn clear(&self) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn search(&self, command: &str) -> Option<PathBuf> {
        let suffixes = self.platform.executable_suffixes();
        self.directories.iter().find_map(|dir| {
            suffixes
                .iter()
                .map(|suffix| dir.join(format!("{command}{suffix}")))
                .find(|candidate| is_executable(candidate))
        })
    }
}

#[cfg(unix)]
fn split_search_path(raw: &OsStr, separator: char) -> Vec<PathBuf> {
    use std::os::unix::ffi::OsStrExt;

    let separator = separator as u8;
    raw.as_bytes()
        .split(|byte| *byte == separator)
        .filter(|entry| !entry.is_empty())
        .map(|entry| PathBuf::from(OsStr::from_bytes(entry)))
        .collect()
}

#[cfg(not(unix))]
fn split_search_path(raw: &OsStr, separator: char) -> Vec<PathBuf> {
    if raw.to_str().is_none() {
        log::warn!("Search path is not valid Unicode; some entries may not match");
    }
    raw.to_string_lossy()
        .split(separator)
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from)
        .collect()
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
}
