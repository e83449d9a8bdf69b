mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use vatlens_extraction::{GeminiModel, InvoiceExtractor};
use vatlens_gateway::{GatewayState, start_server};

use config::Config;

#[derive(Parser)]
#[command(name = "vatlens")]
#[command(about = "VatLens: VAT invoice extraction gateway")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the VatLens gateway server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show current gateway status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            match client
                .get(format!("http://localhost:{}/api/health", config.port))
                .send()
                .await
            {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    println!("VatLens is not running on port {}", config.port);
                }
            }
        }
    }

    Ok(())
}

async fn run_server(config: Config) -> Result<()> {
    let Some(api_key) = config.gemini_api_key.clone() else {
        error!("Gemini API key is missing. Aborting startup.");
        bail!("GEMINI_API_KEY not provided");
    };

    info!(
        model = %config.model,
        bind = %config.bind_address,
        port = config.port,
        "Starting VatLens gateway"
    );

    let model = GeminiModel::new(api_key).with_model(config.model.clone());
    let extractor = Arc::new(InvoiceExtractor::new(Arc::new(model)));
    let state = GatewayState { extractor };

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port).parse()?;
    start_server(addr, state).await
}
