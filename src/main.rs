// Rowdesk - Terminal browser and editor for typed CSV records
use clap::Parser;
use rowdesk::cli::{args::Args, commands::execute_command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // The diagnostic itself is the first line on stderr
    execute_command(args).await?;

    Ok(())
}
