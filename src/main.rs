use clap::Parser;
use eventspot::core::catalogue::Catalogue;
use eventspot::core::config::{self, CliOverrides, EventSpotConfig};
use eventspot::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "eventspot", about = "Browse and search upcoming events")]
struct Args {
    /// Startup delay before the events are shown, in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Directory that image locators are resolved against
    #[arg(long, value_name = "DIR")]
    asset_dir: Option<PathBuf>,

    /// Log file path
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

impl From<Args> for CliOverrides {
    fn from(args: Args) -> Self {
        Self {
            loading_delay_ms: args.delay_ms,
            asset_dir: args.asset_dir,
            log_level: args.log_level,
            log_file: args.log_file,
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let cli = CliOverrides::from(Args::parse());

    // Loading only reports what happened; it's logged once the logger is up
    let (file_config, load_result) = match config::load_config() {
        Ok((c, status)) => (c, Ok(status)),
        Err(e) => (EventSpotConfig::default(), Err(e)),
    };

    // Initialize file logger; the terminal belongs to the UI
    let (log_level, log_path) = config::resolve_logging(&file_config, &cli);
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&log_path) {
        let _ = WriteLogger::init(log_level, log_config, log_file);
    }

    match load_result {
        Ok(status) => status.log(),
        Err(e) => log::warn!("Ignoring config file: {}", e),
    }
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "EventSpot starting up (delay {}ms, asset dir {:?})",
        resolved.loading_delay.as_millis(),
        resolved.asset_dir
    );

    tui::run(resolved, Catalogue::builtin())
}
