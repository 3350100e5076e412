use std::fs::File;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use chatline::core::RequestController;
use chatline::core::config::{self, ResolvedConfig};
use chatline::transport::HttpTransport;
use chatline::{oneshot, tui};
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "chatline", about = "Terminal client for a question-answering chat backend")]
struct Args {
    /// Backend base URL (requests go to <BASE_URL>/api/chat)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Ask a single question, print the transcript and exit
    #[arg(short, long)]
    query: Option<String>,

    /// Log file path
    #[arg(long, default_value = "chatline.log")]
    log_file: String,

    /// Log level (error, warn, info, debug, trace, off)
    #[arg(long, default_value = "debug")]
    log_level: String,
}

fn init_logging(args: &Args) {
    let level = LevelFilter::from_str(&args.log_level).unwrap_or(LevelFilter::Debug);
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
}

fn resolve_config(args: &Args) -> ResolvedConfig {
    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}, using defaults", e);
        config::ChatlineConfig::default()
    });
    config::resolve(&file_config, args.base_url.as_deref())
}

#[tokio::main]
async fn main() -> std::io::Result<ExitCode> {
    let args = Args::parse();
    dotenv::dotenv().ok();
    init_logging(&args);

    let config = resolve_config(&args);
    log::info!("chatline starting up against {}", config.base_url);

    let transport = Arc::new(HttpTransport::new(&config.base_url));
    let mut controller = RequestController::new(transport);

    if let Some(query) = args.query.as_deref() {
        let (transcript, answered) = oneshot::ask(&mut controller, query).await;
        print!("{transcript}");
        return Ok(if answered {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    tui::run(controller, config)?;
    Ok(ExitCode::SUCCESS)
}
