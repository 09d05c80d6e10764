mod cli;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, init_logging, Cli};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let filename = command::fetch(&cli).await?;
    println!("File saved to `{}`", filename);

    Ok(())
}
