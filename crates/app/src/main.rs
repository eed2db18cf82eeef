//! ShopSmart command line client

use std::process;

mod cli;

#[tokio::main]
pub async fn main() {
    let cli = cli::Cli::load();

    if let Err(error) = cli.run().await {
        eprintln!("{error}");
        process::exit(1);
    }
}
