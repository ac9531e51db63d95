use anyhow::Result;
use catalog_cli::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing, so env-backed flags see values from .env.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    catalog_telemetry::init_telemetry(cli.log_format, "catalog")?;

    catalog_cli::run(cli).await
}
