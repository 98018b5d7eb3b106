use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod config;
mod errors;
mod models;
mod server;
mod services;
mod utils;

use config::ReaderConfig;

#[derive(Parser, Debug)]
#[command(name = "readpage-server")]
#[command(about = "MCP server that reads web pages and returns their text")]
#[command(version)]
struct Args {
    /// Custom User-Agent string to use for requests
    #[arg(long)]
    user_agent: Option<String>,

    /// Ignore robots.txt restrictions
    #[arg(long)]
    ignore_robots_txt: bool,

    /// Proxy URL to use for requests (e.g., http://proxy:8080)
    #[arg(long)]
    proxy_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging only if LOG_LEVEL environment variable is set.
    // Logs go to stderr so stdout stays clean for the MCP transport.
    if let Ok(log_level) = std::env::var("LOG_LEVEL") {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
            )
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .init();

        tracing::info!("Starting readpage MCP server with log level: {}", log_level);
    }

    let args = Args::parse();

    if let Some(ref user_agent) = args.user_agent {
        tracing::info!("Using custom user agent: {}", user_agent);
    }

    if args.ignore_robots_txt {
        tracing::info!("Ignoring robots.txt restrictions");
    }

    if let Some(ref proxy) = args.proxy_url {
        tracing::info!("Using proxy: {}", proxy);
    }

    let config = ReaderConfig {
        custom_user_agent: args.user_agent,
        ignore_robots_txt: args.ignore_robots_txt,
        proxy_url: args.proxy_url,
        request_timeout: Duration::from_secs(args.timeout_secs),
    };

    // Run the MCP server
    if let Err(e) = server::run(config).await {
        tracing::error!("Failed to run MCP server: {}", e);
        return Err(e);
    }

    Ok(())
}
