use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::IpAddr;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod html;
mod server;
mod session;
mod store;
mod types;
mod views;

use config::ServerConfig;

#[derive(Parser, Debug)]
#[command(name = "scadenzario")]
#[command(about = "Track homework assignments and their due dates from a local web dashboard")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Address to bind (overrides SCADENZARIO_HOST)
    #[arg(long, global = true)]
    host: Option<IpAddr>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the web server (default)
    Serve {
        /// Port to listen on (overrides SCADENZARIO_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level))
        .add_directive("hyper=warn".parse().unwrap())
        .add_directive("tower_http=warn".parse().unwrap());

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_max_level(Level::TRACE)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(&args.log_level);

    let port = match args.command {
        // Default to serve if no command specified
        None => None,
        Some(Commands::Serve { port }) => port,
    };

    let config = ServerConfig::from_env()?.with_overrides(args.host, port);
    server::serve(config).await
}
