use clap::Parser;
use std::path::PathBuf;
use tradejournal::platform::NativeStorage;
use tradejournal::{App, init_logging};

#[derive(Parser, Debug)]
#[command(name = "tradejournal")]
#[command(about = "A terminal trading journal for funded futures accounts")]
struct Args {
    /// Path to the data directory (default: ~/.tradejournal/)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Never contact the coach narrative service
    #[arg(long)]
    offline: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(NativeStorage::default_path);

    init_logging(&data_dir, &args.log_level)?;

    let mut app = App::with_data_dir(data_dir, args.offline);

    ratatui::run(|terminal| app.run(terminal))?;

    tracing::info!("Application shutting down");

    Ok(())
}
