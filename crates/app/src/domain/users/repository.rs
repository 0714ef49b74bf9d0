//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::users::{
    data::NewUser,
    records::{Role, Roles, UserRecord, UserUuid},
};

const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const FIND_USER_BY_USERNAME_SQL: &str = include_str!("sql/find_user_by_username.sql");
const LIST_USERS_IN_ROLE_SQL: &str = include_str!("sql/list_users_in_role.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const ADD_USER_ROLE_SQL: &str = include_str!("sql/add_user_role.sql");
const REMOVE_USER_ROLE_SQL: &str = include_str!("sql/remove_user_role.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(uuid)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_user_by_username(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        username: &str,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(FIND_USER_BY_USERNAME_SQL)
            .bind(username)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_users_in_role(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        role: Role,
    ) -> Result<Vec<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(LIST_USERS_IN_ROLE_SQL)
            .bind(role.as_str())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUser,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_USER_SQL)
            .bind(user.uuid)
            .bind(user.username.trim())
            .bind(&user.email)
            .execute(&mut **tx)
            .await?;

        for role in &user.roles {
            self.add_role(tx, user.uuid, *role).await?;
        }

        Ok(())
    }

    pub(crate) async fn add_role(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        role: Role,
    ) -> Result<(), sqlx::Error> {
        query(ADD_USER_ROLE_SQL)
            .bind(user)
            .bind(role.as_str())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn remove_role(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        role: Role,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REMOVE_USER_ROLE_SQL)
            .bind(user)
            .bind(role.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

/// Parse the aggregated `roles` column.
pub(crate) fn try_get_roles(row: &PgRow, col: &str) -> Result<Roles, sqlx::Error> {
    let names: Vec<String> = row.try_get(col)?;

    names
        .iter()
        .map(|name| name.parse::<Role>())
        .collect::<Result<Roles, _>>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: col.to_string(),
            source: Box::new(e),
        })
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            roles: try_get_roles(row, "roles")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
