use clap::Args;
use jiff::Timestamp;
use lemon_app::{
    auth::{AuthService, OpenBaoClient, PgAuthService},
    database::Db,
    domain::users::{PgUsersService, UsersService},
};

use crate::cli::{DatabaseArgs, OpenBaoArgs};

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[command(flatten)]
    openbao: OpenBaoArgs,

    /// User that should own the token
    #[arg(long)]
    username: String,

    /// Optional token expiration timestamp (RFC 3339)
    #[arg(long)]
    token_expires_at: Option<Timestamp>,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    if let Some(expires_at) = args.token_expires_at
        && expires_at <= Timestamp::now()
    {
        return Err("token-expires-at must be in the future".to_string());
    }

    let pool = args.database.connect().await?;

    let user = PgUsersService::new(Db::new(pool.clone()))
        .find_user_by_username(&args.username)
        .await
        .map_err(|error| format!("failed to find user: {error}"))?;

    let service = PgAuthService::new(pool, OpenBaoClient::from(args.openbao));

    let issued = service
        .issue_api_token(user.uuid, args.token_expires_at)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("username: {}", user.username);
    println!("token_version: {}", issued.metadata.version.as_i16());
    println!("token_created_at: {}", issued.metadata.created_at);
    if let Some(expires_at) = issued.metadata.expires_at {
        println!("token_expires_at: {expires_at}");
    }
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
