// Renders the application icon set

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};

use videoburst::icon;

#[derive(Parser)]
#[command(name = "make-icon", version, about = "Render the VideoBurst application icon")]
struct Cli {
    /// Iconset directory to write
    #[arg(short, long, default_value = "app.iconset")]
    output: PathBuf,

    /// Package the iconset into an .icns file with iconutil (macOS)
    #[arg(long)]
    icns: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    let written = icon::write_iconset(&cli.output)?;
    info!("Created {} icon images in {:?}", written.len(), cli.output);

    if cli.icns {
        let icns = icon::package_icns(&cli.output)?;
        std::fs::remove_dir_all(&cli.output)?;
        info!("Created {:?}", icns);
    }

    Ok(())
}
