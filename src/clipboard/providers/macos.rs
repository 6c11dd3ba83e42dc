use std::path::Path;

use crate::clipboard::{
    dependencies::ClipboardDependencies,
    runner::CommandSpec,
    types::{ClipboardError, CopyResult},
};

/// AppleScript that reads the file and tags the clipboard content as PNG (`«class PNGf»`).
fn applescript(image_path: &Path) -> String {
    let escaped = image_path
        .to_string_lossy()
        .replace('\\', "\\\\")
        .replace('"', "\\\"");
    format!("set the clipboard to (read POSIX file \"{escaped}\" as «class PNGf»)")
}

pub(super) async fn copy_image(deps: &ClipboardDependencies, image_path: &Path) -> CopyResult {
    let spec = CommandSpec::new("osascript").args(["-e".to_string(), applescript(image_path)]);
    let output = deps.runner.run(&spec, deps.timeout).await?;

    if output.success() {
        log::info!("Copied image to clipboard via osascript");
        Ok(())
    } else {
        Err(ClipboardError::from_exit("osascript", "osascript", &output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_targets_png_class() {
        let script = applescript(Path::new("/tmp/img.png"));
        assert_eq!(
            script,
            "set the clipboard to (read POSIX file \"/tmp/img.png\" as «class PNGf»)"
        );
    }

    #[test]
    fn script_escapes_quotes() {
        let script = applescript(Path::new("/tmp/a\"b.png"));
        assert!(script.contains("\"/tmp/a\\\"b.png\""));
    }
}
