use clap::Args;
use lemon_app::{
    auth::{AuthService, OpenBaoClient, PgAuthService},
    database::Db,
    domain::users::{PgUsersService, UsersService},
};

use crate::cli::{DatabaseArgs, OpenBaoArgs};

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[command(flatten)]
    openbao: OpenBaoArgs,

    /// User whose tokens should be listed
    #[arg(long)]
    username: String,
}

pub(crate) async fn run(args: ListTokensArgs) -> Result<(), String> {
    let pool = args.database.connect().await?;

    let user = PgUsersService::new(Db::new(pool.clone()))
        .find_user_by_username(&args.username)
        .await
        .map_err(|error| format!("failed to find user: {error}"))?;

    let tokens = PgAuthService::new(pool, OpenBaoClient::from(args.openbao))
        .list_api_tokens(user.uuid)
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    if tokens.is_empty() {
        println!("no tokens found for {}", user.username);
        return Ok(());
    }

    let display_or = |value: Option<jiff::Timestamp>, fallback: &str| {
        value.map_or_else(|| fallback.to_string(), |value| value.to_string())
    };

    for token in tokens {
        println!("token_uuid: {}", token.uuid);
        println!("token_version: {}", token.version.as_i16());
        println!("created_at: {}", token.created_at);
        println!("last_used_at: {}", display_or(token.last_used_at, "never"));
        println!("expires_at: {}", display_or(token.expires_at, "none"));
        println!("revoked_at: {}", display_or(token.revoked_at, "active"));
        println!();
    }

    Ok(())
}
