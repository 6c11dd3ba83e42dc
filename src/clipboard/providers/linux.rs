//! Wayland and X11 clipboard delivery through `wl-copy`, `xclip` and `xsel`.

use std::ffi::OsString;
use std::path::Path;

use crate::clipboard::{
    dependencies::ClipboardDependencies,
    runner::{CommandSpec, StdinSource},
    types::{ClipboardError, CopyResult, ToolAttempt},
};

/// How a tool receives the PNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageInput {
    /// Bytes streamed on standard input.
    Stdin,
    /// Path passed on the command line.
    Argument,
}

/// One candidate in the Linux fallback chain.
#[derive(Debug, Clone, Copy)]
pub struct Tool {
    pub command: &'static str,
    /// Human-readable name used in diagnostics.
    pub name: &'static str,
    pub input: ImageInput,
    args: fn(&Path) -> Vec<OsString>,
}

impl Tool {
    pub fn args(&self, image_path: &Path) -> Vec<OsString> {
        (self.args)(image_path)
    }

    fn command_spec(&self, image_path: &Path) -> CommandSpec {
        let stdin = match self.input {
            ImageInput::Stdin => StdinSource::File(image_path.to_path_buf()),
            ImageInput::Argument => StdinSource::Null,
        };
        CommandSpec::new(self.command)
            .args(self.args(image_path))
            .stdin(stdin)
    }
}

/// Native Wayland first, then the X11 tools.
pub const LINUX_TOOLS: [Tool; 3] = [
    Tool {
        command: "wl-copy",
        name: "wl-copy (Wayland)",
        input: ImageInput::Stdin,
        args: |_| vec!["--type".into(), "image/png".into()],
    },
    Tool {
        command: "xclip",
        name: "xclip (X11)",
        input: ImageInput::Argument,
        args: |path| {
            vec![
                "-selection".into(),
                "clipboard".into(),
                "-t".into(),
                "image/png".into(),
                "-i".into(),
                path.as_os_str().to_os_string(),
            ]
        },
    },
    Tool {
        command: "xsel",
        name: "xsel (X11)",
        input: ImageInput::Stdin,
        args: |_| {
            vec![
                "--clipboard".into(),
                "--input".into(),
                "--type".into(),
                "image/png".into(),
            ]
        },
    },
];

pub(super) async fn copy_image(deps: &ClipboardDependencies, image_path: &Path) -> CopyResult {
    let mut attempts = Vec::new();

    for tool in &LINUX_TOOLS {
        if !deps.locator.exists(tool.command) {
            continue;
        }

        log::debug!("Trying {} for {}", tool.name, image_path.display());
        match try_tool(deps, tool, image_path).await {
            Ok(()) => {
                log::info!("Copied image to clipboard via {}", tool.name);
                return Ok(());
            }
            Err(error) => {
                log::warn!("{} failed: {}", tool.name, error);
                attempts.push(ToolAttempt {
                    tool: tool.name,
                    error,
                });
            }
        }
    }

    if attempts.is_empty() {
        return Err(ClipboardError::NoToolFound);
    }
    Err(ClipboardError::AllToolsFailed { attempts })
}

async fn try_tool(deps: &ClipboardDependencies, tool: &Tool, image_path: &Path) -> CopyResult {
    let spec = tool.command_spec(image_path);
    let output = deps.runner.run(&spec, deps.timeout).await?;
    if output.success() {
        Ok(())
    } else {
        Err(ClipboardError::from_exit(tool.command, tool.command, &output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn chain_order_is_wayland_then_x11() {
        let commands: Vec<_> = LINUX_TOOLS.iter().map(|tool| tool.command).collect();
        assert_eq!(commands, ["wl-copy", "xclip", "xsel"]);
    }

    #[test]
    fn xclip_takes_path_argument() {
        let path = PathBuf::from("/tmp/img.png");
        let spec = LINUX_TOOLS[1].command_spec(&path);
        assert_eq!(
            spec.argv(),
            ["xclip", "-selection", "clipboard", "-t", "image/png", "-i", "/tmp/img.png"]
        );
        assert_eq!(spec.stdin, StdinSource::Null);
    }

    #[test]
    fn stdin_tools_stream_the_file() {
        let path = PathBuf::from("/tmp/img.png");
        for tool in [&LINUX_TOOLS[0], &LINUX_TOOLS[2]] {
            let spec = tool.command_spec(&path);
            assert_eq!(spec.stdin, StdinSource::File(path.clone()));
            assert!(!spec.argv().iter().any(|arg| arg == "/tmp/img.png"));
        }
    }
}
