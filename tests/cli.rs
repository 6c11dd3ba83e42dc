use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pngclip_cmd() -> Command {
    Command::cargo_bin("pngclip").expect("binary exists")
}

#[test]
fn pngclip_help_prints_usage() {
    pngclip_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Copy PNG images to the system clipboard",
        ));
}

#[test]
fn image_is_required_without_detect() {
    pngclip_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "required arguments were not provided",
        ));
}

#[test]
fn missing_image_is_reported() {
    let temp = TempDir::new().unwrap();
    pngclip_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg(temp.path().join("missing.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[cfg(target_os = "linux")]
mod linux_without_tools {
    use super::*;

    fn bare_cmd(temp: &TempDir) -> Command {
        let mut cmd = pngclip_cmd();
        cmd.env("XDG_CONFIG_HOME", temp.path())
            .env("PATH", temp.path().join("empty-bin"))
            .env_remove("WSL_DISTRO_NAME");
        cmd
    }

    fn write_image(temp: &TempDir) -> std::path::PathBuf {
        let image = temp.path().join("stats.png");
        std::fs::write(&image, b"\x89PNG\r\n\x1a\n").unwrap();
        image
    }

    #[test]
    fn detect_fails_when_no_tool_is_installed() {
        let temp = TempDir::new().unwrap();
        bare_cmd(&temp)
            .arg("--detect")
            .assert()
            .failure()
            .stderr(predicate::str::contains("No clipboard provider available"));
    }

    #[test]
    fn clipboard_failure_falls_back_to_disk() {
        let temp = TempDir::new().unwrap();
        let image = write_image(&temp);
        let save_dir = temp.path().join("saved");

        bare_cmd(&temp)
            .arg(&image)
            .arg("--save-dir")
            .arg(&save_dir)
            .assert()
            .success()
            .stdout(predicate::str::contains("Saved image to"))
            .stderr(predicate::str::contains("Clipboard unavailable"));

        assert!(save_dir.join("stats.png").is_file());
    }

    #[test]
    fn zero_timeout_override_is_clamped() {
        let temp = TempDir::new().unwrap();
        let image = write_image(&temp);
        let bin = temp.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let xclip = bin.join("xclip");
        std::fs::write(&xclip, "#!/bin/sh\nexit 0\n").unwrap();
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&xclip, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        bare_cmd(&temp)
            .env("PATH", &bin)
            .arg(&image)
            .args(["--no-save", "-t", "0"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Copied"))
            .stderr(predicate::str::contains("clamping to 100-60000 range"));
    }

    #[test]
    fn no_save_turns_clipboard_failure_into_error() {
        let temp = TempDir::new().unwrap();
        let image = write_image(&temp);

        bare_cmd(&temp)
            .arg(&image)
            .arg("--no-save")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Clipboard unavailable"));
    }
}
