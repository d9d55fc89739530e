use clap::Parser;
use img_webp::{check_image_dir, default_image_dir, detect_codec, ConsoleSink, SweepConfig, Sweeper};
use shared_utils::logging::{init_logging, LogConfig};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "img-webp")]
#[command(version, about = "Generate or refresh a WebP copy of every JPEG/PNG in the image directory", long_about = None)]
struct Cli {
    /// Image directory (default: <install dir>/../data/images)
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Mirror info-level logs to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let image_dir = match cli.dir {
        Some(dir) => dir,
        None => default_image_dir()?,
    };
    // an unusable directory exits 1 before the log file is opened
    check_image_dir(&image_dir)?;

    let console_level = if cli.verbose { Level::INFO } else { Level::WARN };
    if let Err(e) = init_logging("img_webp", LogConfig::default().with_console_level(console_level))
    {
        eprintln!("⚠️ Logging disabled: {:#}", e);
    }

    let codec = detect_codec();
    tracing::info!(codec = codec.name(), dir = %image_dir.display(), "Starting sweep");

    let mut sink = ConsoleSink::stdout();
    Sweeper::new(SweepConfig::new(image_dir), &*codec).run(&mut sink)?;

    Ok(())
}
