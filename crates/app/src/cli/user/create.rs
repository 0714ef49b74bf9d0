use clap::Args;
use lemon_app::domain::users::{
    PgUsersService, UsersService,
    data::NewUser,
    records::{Role, UserUuid},
};

use crate::cli::{DatabaseArgs, format_roles, parse_role};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Unique username (case-insensitive)
    #[arg(long)]
    username: String,

    /// Contact email address
    #[arg(long, default_value = "")]
    email: String,

    /// Staff group to join; repeat for several. Users without one are customers.
    #[arg(long = "role", value_parser = parse_role)]
    roles: Vec<Role>,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let service = PgUsersService::new(args.database.db().await?);

    let user = service
        .create_user(NewUser {
            uuid: UserUuid::new(),
            username: args.username,
            email: args.email,
            roles: args.roles.into_iter().collect(),
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("username: {}", user.username);
    println!("roles: {}", format_roles(&user.roles));

    Ok(())
}
