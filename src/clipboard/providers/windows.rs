//! Windows clipboard delivery through PowerShell and System.Windows.Forms, natively or
//! from inside WSL.

use std::path::Path;

use crate::clipboard::{
    dependencies::ClipboardDependencies,
    runner::CommandSpec,
    types::{ClipboardError, CopyResult},
};

/// Translate a Linux path to the Windows view of it, e.g.
/// `/tmp/image.png` -> `\\wsl$\Ubuntu\tmp\image.png`.
async fn to_windows_path(
    deps: &ClipboardDependencies,
    wsl_path: &Path,
) -> Result<String, ClipboardError> {
    let spec = CommandSpec::new("wslpath").arg("-w").arg(wsl_path.as_os_str());
    let output = deps
        .runner
        .run(&spec, deps.timeout)
        .await
        .map_err(|e| ClipboardError::PathTranslation(e.to_string()))?;

    if !output.success() {
        let reason = ClipboardError::from_exit("wslpath", "wslpath", &output);
        return Err(ClipboardError::PathTranslation(reason.to_string()));
    }
    if output.stdout.is_empty() {
        return Err(ClipboardError::PathTranslation(
            "wslpath returned an empty path".to_string(),
        ));
    }

    Ok(output.stdout)
}

fn powershell_script(windows_path: &str) -> String {
    let escaped = windows_path.replace('\\', "\\\\");
    format!(
        r#"Add-Type -AssemblyName System.Windows.Forms
Add-Type -AssemblyName System.Drawing
try {{
  $img = [System.Drawing.Image]::FromFile("{escaped}")
  [System.Windows.Forms.Clipboard]::SetImage($img)
  $img.Dispose()
  exit 0
}} catch {{
  Write-Error $_.Exception.Message
  exit 1
}}"#
    )
}

pub(super) async fn copy_image(deps: &ClipboardDependencies, image_path: &Path) -> CopyResult {
    let windows_path = if deps.host.is_wsl() {
        let translated = to_windows_path(deps, image_path).await?;
        log::debug!("Translated {} to {}", image_path.display(), translated);
        translated
    } else {
        image_path.to_string_lossy().into_owned()
    };

    let spec = CommandSpec::new("powershell.exe").args([
        "-NoProfile".to_string(),
        "-NonInteractive".to_string(),
        "-Command".to_string(),
        powershell_script(&windows_path),
    ]);
    let output = deps.runner.run(&spec, deps.timeout).await?;

    if output.success() {
        log::info!("Copied image to clipboard via PowerShell");
        Ok(())
    } else {
        Err(ClipboardError::from_exit(
            "powershell.exe",
            "PowerShell",
            &output,
        ))
    }
}
