use clap::Parser;
use mcpanel_cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    mcpanel_cli::run_main(cli).await
}
