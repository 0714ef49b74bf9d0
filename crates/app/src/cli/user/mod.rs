use clap::{Args, Subcommand};

mod create;
mod roles;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    /// Create a user
    Create(create::CreateUserArgs),

    /// Add a user to a staff group
    Grant(roles::RoleArgs),

    /// Remove a user from a staff group
    Revoke(roles::RoleArgs),
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::Create(args) => create::run(args).await,
        UserSubcommand::Grant(args) => roles::grant(args).await,
        UserSubcommand::Revoke(args) => roles::revoke(args).await,
    }
}
