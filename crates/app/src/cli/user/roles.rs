use clap::Args;
use lemon_app::domain::users::{PgUsersService, UsersService, records::Role};

use crate::cli::{DatabaseArgs, format_roles, parse_role};

#[derive(Debug, Args)]
pub(crate) struct RoleArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[arg(long)]
    username: String,

    /// `manager` or `delivery-crew`
    #[arg(long, value_parser = parse_role)]
    role: Role,
}

pub(crate) async fn grant(args: RoleArgs) -> Result<(), String> {
    let service = PgUsersService::new(args.database.db().await?);

    let user = service
        .assign_role(&args.username, args.role)
        .await
        .map_err(|error| format!("failed to grant role: {error}"))?;

    println!("username: {}", user.username);
    println!("roles: {}", format_roles(&user.roles));

    Ok(())
}

pub(crate) async fn revoke(args: RoleArgs) -> Result<(), String> {
    let service = PgUsersService::new(args.database.db().await?);

    let user = service
        .find_user_by_username(&args.username)
        .await
        .map_err(|error| format!("failed to find user: {error}"))?;

    let user = service
        .remove_role(user.uuid, args.role)
        .await
        .map_err(|error| format!("failed to revoke role: {error}"))?;

    println!("username: {}", user.username);
    println!("roles: {}", format_roles(&user.roles));

    Ok(())
}
