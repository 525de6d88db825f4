use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod import;

#[derive(Debug, Parser)]
#[command(name = "varimg")]
#[command(about = "Shopify variant image metafield importer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Upload images from a CSV and attach them to variant metafields
    Import {
        /// Path to the CSV file (columns: handle, sku, plus image URL columns)
        csv: PathBuf,

        /// Metafield namespace to write
        #[arg(long, default_value = "custom")]
        namespace: String,

        /// Metafield key to write
        #[arg(long, default_value = "variant_images")]
        key: String,

        /// Resolve variants and report planned uploads without uploading or
        /// mutating anything
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = varimg_core::load_app_config_from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Import {
            csv,
            namespace,
            key,
            dry_run,
        } => import::run_import(&config, &csv, &namespace, &key, dry_run).await,
    }
}
