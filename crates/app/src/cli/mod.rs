use clap::{Parser, Subcommand};
use shopsmart_app::{
    config::ClientConfig, context::AppContext, domain::notices::Notice, observability,
};

mod cart;
mod reviews;
mod session;

#[derive(Debug, Parser)]
#[command(name = "shopsmart", about = "ShopSmart command line client", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: ClientConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Store API tokens for later commands
    Login(session::LoginArgs),

    /// Forget stored API tokens
    Logout,

    /// Product and shop reviews
    Reviews(reviews::ReviewsCommand),

    /// The signed-in user's cart
    Cart(cart::CartCommand),
}

impl Cli {
    /// Parse arguments after loading `.env`, if present.
    pub(crate) fn load() -> Self {
        _ = dotenvy::dotenv();

        Self::parse()
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init(&self.config.logging).map_err(|error| error.to_string())?;

        let ctx = AppContext::from_config(&self.config.api)
            .map_err(|error| format!("failed to initialise client: {error}"))?;

        match self.command {
            Commands::Login(args) => session::login(&ctx, args).await,
            Commands::Logout => session::logout(&ctx).await,
            Commands::Reviews(command) => reviews::run(&ctx, command).await,
            Commands::Cart(command) => cart::run(&ctx, command).await,
        }
    }
}

/// Print informational notices; errors reach the user through the returned error.
fn print_notices(notices: Vec<Notice>) {
    for notice in notices.into_iter().filter(|notice| !notice.is_error()) {
        println!("{notice}");
    }
}
