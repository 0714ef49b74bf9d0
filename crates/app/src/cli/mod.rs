use clap::{Args, Parser, Subcommand};
use lemon_app::{
    auth::{OpenBaoClient, OpenBaoConfig},
    database::{self, Db},
    domain::users::records::Role,
};
use sqlx::PgPool;

mod db;
mod token;
mod user;

#[derive(Debug, Parser)]
#[command(name = "lemon-app", about = "Little Lemon administration", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    User(user::UserCommand),
    Token(token::TokenCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::User(command) => user::run(command).await,
            Commands::Token(command) => token::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<PgPool, String> {
        database::connect(&self.database_url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))
    }

    pub(crate) async fn db(&self) -> Result<Db, String> {
        self.connect().await.map(Db::new)
    }
}

#[derive(Debug, Args)]
pub(crate) struct OpenBaoArgs {
    /// OpenBao server address
    #[arg(long, env = "OPENBAO_ADDR")]
    openbao_addr: String,

    /// OpenBao authentication token
    #[arg(long, env = "OPENBAO_TOKEN", hide_env_values = true)]
    openbao_token: String,

    /// OpenBao Transit key name
    #[arg(long, env = "OPENBAO_TRANSIT_KEY")]
    openbao_transit_key: String,
}

impl From<OpenBaoArgs> for OpenBaoClient {
    fn from(args: OpenBaoArgs) -> Self {
        OpenBaoClient::new(OpenBaoConfig {
            addr: args.openbao_addr,
            token: args.openbao_token,
            transit_key: args.openbao_transit_key,
        })
    }
}

/// Parse a group slug such as `manager` or `delivery-crew`.
pub(crate) fn parse_role(value: &str) -> Result<Role, String> {
    Role::from_slug(value).ok_or_else(|| {
        let known: Vec<_> = Role::ALL.iter().map(|role| role.slug()).collect();

        format!("unknown role `{value}`; expected one of: {}", known.join(", "))
    })
}

pub(crate) fn format_roles(roles: &[Role]) -> String {
    if roles.is_empty() {
        return "customer".to_string();
    }

    roles
        .iter()
        .map(|role| role.slug())
        .collect::<Vec<_>>()
        .join(",")
}
