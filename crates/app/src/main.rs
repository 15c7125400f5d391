use app::{AppConfig, Cli, telemetry};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.log_format)?;
    let config = AppConfig::from_cli(cli)?;
    app::run(config).await
}
