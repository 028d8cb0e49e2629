use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use shelf::api::HttpLibraryClient;
use shelf::core::config;

#[derive(Parser)]
#[command(name = "shelf", about = "Terminal client for a book-tracking service")]
struct Args {
    /// Service address (overrides BOOKTRACKER_API_URL and the config file)
    #[arg(long)]
    api_url: Option<String>,

    /// Where to write the log
    #[arg(long, default_value = "shelf.log")]
    log_file: PathBuf,

    /// Log verbosity (off, error, warn, info, debug, trace)
    #[arg(long, default_value_t = LevelFilter::Debug)]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // File logger only; the terminal belongs to the UI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Ignoring config file: {}", e);
            config::ShelfConfig::default()
        }
    };
    let resolved = config::resolve(&file_config, args.api_url.as_deref());
    log::info!("Shelf starting up against {}", resolved.base_url);

    let client = HttpLibraryClient::new(&resolved.base_url, resolved.request_timeout)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    shelf::tui::run(&resolved, Arc::new(client))
}
