//! Kiosk devserver CLI
//!
//! ```bash
//! kiosk-devserver serve                              # In-memory server on port 3000
//! kiosk-devserver serve --data-dir ./data            # Persist records and images
//! kiosk-devserver seed --data-dir ./data             # Write demo records
//! ```

use clap::{Parser, Subcommand};
use kiosk_devserver::{seed, start_server, RecordStore, ServerConfig, DEFAULT_PORT};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kiosk-devserver")]
#[command(about = "Local development server for the kiosk catalogue API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Directory for the snapshot and uploaded images (in-memory if omitted)
        #[arg(short, long, env = "KIOSK_DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// Origin used in image URLs (default: http://localhost:<port>)
        #[arg(long, env = "KIOSK_PUBLIC_URL")]
        public_url: Option<String>,
    },

    /// Write demo records into an empty data directory
    Seed {
        /// Directory for the snapshot and images
        #[arg(short, long, env = "KIOSK_DATA_DIR")]
        data_dir: PathBuf,

        /// Origin used in image URLs
        #[arg(long, env = "KIOSK_PUBLIC_URL", default_value = "http://localhost:3000")]
        public_url: String,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kiosk_devserver=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { port, data_dir, public_url } => {
            cmd_serve(ServerConfig { port, data_dir, public_url }).await
        }
        Commands::Seed { data_dir, public_url } => cmd_seed(data_dir, &public_url),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    start_server(config).await?;
    Ok(())
}

fn cmd_seed(data_dir: PathBuf, public_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = RecordStore::open(&data_dir)?;

    if seed(&mut store, public_url)? {
        let counts = store.counts();
        tracing::info!(
            data_dir = %data_dir.display(),
            master = counts.master,
            info = counts.info,
            offers = counts.offers,
            "demo records written"
        );
    } else {
        tracing::warn!(data_dir = %data_dir.display(), "store already has records, nothing seeded");
    }

    Ok(())
}
