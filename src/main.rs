use clap::Parser;
use norruva_dpp::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::DigitalLink(args) => cli::link::run(args).await,
    }
}
