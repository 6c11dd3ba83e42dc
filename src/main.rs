use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{ArgAction, Parser};
use pngclip::{Clipboard, Config, output};

#[derive(Parser, Debug)]
#[command(name = "pngclip")]
#[command(version, about = "Copy PNG images to the system clipboard")]
struct Cli {
    /// PNG image to copy
    #[arg(value_name = "IMAGE", required_unless_present = "detect")]
    image: Option<PathBuf>,

    /// Timeout in milliseconds for each clipboard tool (overrides config)
    #[arg(long, short = 't', value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Directory to save the image in when the clipboard is unavailable (overrides config)
    #[arg(long, short = 's', value_name = "DIR", conflicts_with = "no_save")]
    save_dir: Option<PathBuf>,

    /// Never fall back to saving the image on disk
    #[arg(long, action = ArgAction::SetTrue)]
    no_save: bool,

    /// Print the clipboard provider for this environment and exit
    #[arg(long, action = ArgAction::SetTrue)]
    detect: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = Config::load()?;
    if let Some(timeout_ms) = cli.timeout_ms {
        config.clipboard.timeout_ms = timeout_ms;
    }
    if let Some(dir) = &cli.save_dir {
        config.output.save_directory = dir.to_string_lossy().into_owned();
    }
    if cli.no_save {
        config.output.fallback_to_file = false;
    }
    config.validate_and_clamp();

    let clipboard = Clipboard::new(config.timeout());

    if cli.detect {
        match clipboard.provider_name() {
            Some(name) => {
                println!("Clipboard provider: {name}");
                return Ok(());
            }
            None => bail!("No clipboard provider available for this environment"),
        }
    }

    let Some(image) = cli.image else {
        bail!("No image given");
    };
    if !image.is_file() {
        bail!("Image {} does not exist", image.display());
    }
    let image = image
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", image.display()))?;

    match clipboard.copy_image(&image).await {
        Ok(()) => {
            log::info!("Automatically copied image to clipboard!");
            println!("Copied {} to clipboard", image.display());
            Ok(())
        }
        Err(e) => {
            log::warn!("Clipboard unavailable: {}", e);
            if !config.output.fallback_to_file {
                bail!("Clipboard unavailable: {e}");
            }

            log::info!("Saving the image to disk instead.");
            let image_data = std::fs::read(&image)
                .with_context(|| format!("Failed to read {}", image.display()))?;
            let filename = image.file_name().map(|name| name.to_string_lossy().into_owned());
            let saved = output::save_image(&image_data, &config.output, filename.as_deref())?;
            println!("Saved image to {}", saved.display());
            Ok(())
        }
    }
}
