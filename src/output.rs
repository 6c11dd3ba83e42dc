//! Saving images to disk when the clipboard is unavailable.

use crate::config::OutputConfig;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to save image to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),
}

/// PNG filename for the current local time, from a chrono format `template`.
pub fn generate_filename(template: &str) -> String {
    format!("{}.png", Local::now().format(template))
}

/// Ensure the save directory exists, creating it if necessary.
///
/// Returns the canonicalized path to the directory.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, OutputError> {
    if !directory.exists() {
        log::info!("Creating output directory: {}", directory.display());
        fs::create_dir_all(directory).map_err(|source| OutputError::Write {
            path: directory.to_path_buf(),
            source,
        })?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Save PNG bytes into the configured directory.
///
/// `filename` is used as-is when given (only its final component); otherwise one is
/// generated from the configured template.
pub fn save_image(
    image_data: &[u8],
    config: &OutputConfig,
    filename: Option<&str>,
) -> Result<PathBuf, OutputError> {
    let directory = ensure_directory_exists(&expand_tilde(&config.save_directory))?;

    let filename = match filename {
        Some(name) => Path::new(name)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| OutputError::InvalidFilename(name.to_string()))?,
        None => generate_filename(&config.filename_template),
    };
    let file_path = directory.join(&filename);

    log::info!(
        "Saving image to: {} ({} bytes)",
        file_path.display(),
        image_data.len()
    );

    let write_error = |source: std::io::Error| OutputError::Write {
        path: file_path.clone(),
        source,
    };
    fs::write(&file_path, image_data).map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&file_path, Permissions::from_mode(0o600)).map_err(write_error)?;
    }

    log::info!("Image saved: {}", file_path.display());
    Ok(file_path)
}

/// Resolve a leading `~` in the configured save directory against the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_for(dir: &Path) -> OutputConfig {
        OutputConfig {
            save_directory: dir.to_string_lossy().into_owned(),
            ..OutputConfig::default()
        }
    }

    #[test]
    fn generated_names_are_png_with_expanded_date() {
        let filename = generate_filename("wrapped_%Y%m%d");
        assert!(filename.starts_with("wrapped_"));
        assert!(filename.ends_with(".png"));
        assert_eq!(filename.len(), "wrapped_YYYYMMDD.png".len());
    }

    #[test]
    fn save_directory_tilde_resolves_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/Pictures/pngclip"), home.join("Pictures/pngclip"));
            assert_eq!(expand_tilde("~"), home);
        }
        assert_eq!(expand_tilde("~other/img"), PathBuf::from("~other/img"));
        assert_eq!(expand_tilde("/var/tmp"), PathBuf::from("/var/tmp"));
    }

    #[test]
    fn saves_with_given_filename_in_nested_dir() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("a/b");
        let path = save_image(b"png", &config_for(&target), Some("wrapped.png")).unwrap();

        assert_eq!(path.file_name().unwrap(), "wrapped.png");
        assert_eq!(fs::read(&path).unwrap(), b"png");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn filename_is_reduced_to_final_component() {
        let temp = TempDir::new().unwrap();
        let path =
            save_image(b"png", &config_for(temp.path()), Some("../../escape.png")).unwrap();
        assert_eq!(path.parent().unwrap(), temp.path().canonicalize().unwrap());
    }

    #[test]
    fn generated_filename_uses_template() {
        let temp = TempDir::new().unwrap();
        let path = save_image(b"png", &config_for(temp.path()), None).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("pngclip_"), "{name}");
        assert!(name.ends_with(".png"));
    }
}
