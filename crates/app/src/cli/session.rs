use clap::Args;
use shopsmart_app::{auth::Credentials, context::AppContext};

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Access token issued by the ShopSmart backend
    #[arg(long, env = "SHOPSMART_ACCESS_TOKEN", hide_env_values = true)]
    access: String,

    /// Refresh token used to renew the access token
    #[arg(long, env = "SHOPSMART_REFRESH_TOKEN", hide_env_values = true)]
    refresh: Option<String>,
}

pub(crate) async fn login(ctx: &AppContext, args: LoginArgs) -> Result<(), String> {
    if args.access.trim().is_empty() {
        return Err("access token cannot be empty".to_string());
    }

    ctx.credentials
        .save(&Credentials::new(args.access, args.refresh))
        .await
        .map_err(|error| format!("failed to store credentials: {error}"))?;

    println!("credentials stored");

    Ok(())
}

pub(crate) async fn logout(ctx: &AppContext) -> Result<(), String> {
    ctx.credentials
        .clear()
        .await
        .map_err(|error| format!("failed to clear credentials: {error}"))?;

    println!("credentials cleared");

    Ok(())
}
