//! Binary for the work-board bot.

use anyhow::Result;
use clap::Parser;
use work_bot::{check_catalog, load_config, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::CheckCatalog { file } => {
            println!("{}", check_catalog(file)?);
            Ok(())
        }
    }
}
