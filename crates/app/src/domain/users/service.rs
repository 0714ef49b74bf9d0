//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::users::{
        data::NewUser,
        errors::UsersServiceError,
        records::{Role, UserRecord, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        if user.username.trim().is_empty() {
            return Err(UsersServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        self.repository.create_user(&mut tx, &user).await?;

        let created = self.repository.get_user(&mut tx, user.uuid).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_user(&self, uuid: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .find_user_by_username(&mut tx, username.trim())
            .await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn list_users_in_role(&self, role: Role) -> Result<Vec<UserRecord>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let users = self.repository.list_users_in_role(&mut tx, role).await?;

        tx.commit().await?;

        Ok(users)
    }

    async fn assign_role(&self, username: &str, role: Role) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .find_user_by_username(&mut tx, username.trim())
            .await?;

        self.repository.add_role(&mut tx, user.uuid, role).await?;

        let updated = self.repository.get_user(&mut tx, user.uuid).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn remove_role(&self, user: UserUuid, role: Role) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository.remove_role(&mut tx, user, role).await?;

        let updated = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Create a user, optionally placing them in staff groups.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve a single user with their roles.
    async fn get_user(&self, uuid: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Look a user up by username, ignoring case.
    async fn find_user_by_username(&self, username: &str) -> Result<UserRecord, UsersServiceError>;

    /// All members of the given staff group, ordered by username.
    async fn list_users_in_role(&self, role: Role) -> Result<Vec<UserRecord>, UsersServiceError>;

    /// Add the named user to a staff group. Adding an existing member is a no-op.
    async fn assign_role(&self, username: &str, role: Role) -> Result<UserRecord, UsersServiceError>;

    /// Remove a user from a staff group. Removing a non-member is a no-op.
    async fn remove_role(&self, user: UserUuid, role: Role) -> Result<UserRecord, UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::{
        domain::users::records::Roles,
        test::{TestContext, helpers::create_user},
    };

    use super::*;

    #[tokio::test]
    async fn create_user_returns_user_with_roles() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = UserUuid::new();

        let user = ctx
            .users
            .create_user(NewUser {
                uuid,
                username: "adrian".to_string(),
                email: "adrian@littlelemon.test".to_string(),
                roles: smallvec![Role::Manager],
            })
            .await?;

        assert_eq!(user.uuid, uuid);
        assert_eq!(user.username, "adrian");
        assert!(user.has_role(Role::Manager));
        assert!(!user.is_customer());

        Ok(())
    }

    #[tokio::test]
    async fn create_user_duplicate_username_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        create_user(&ctx, "mario", &[]).await?;

        let result = ctx
            .users
            .create_user(NewUser {
                uuid: UserUuid::new(),
                username: "Mario".to_string(),
                email: String::new(),
                roles: Roles::new(),
            })
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_user_blank_username_returns_missing_required_data() {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .create_user(NewUser {
                uuid: UserUuid::new(),
                username: "   ".to_string(),
                email: String::new(),
                roles: Roles::new(),
            })
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_user_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.get_user(UserUuid::new()).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn find_user_by_username_ignores_case() -> TestResult {
        let ctx = TestContext::new().await;
        let created = create_user(&ctx, "Tilly", &[]).await?;

        let found = ctx.users.find_user_by_username("tilly").await?;

        assert_eq!(found.uuid, created.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn assign_role_adds_user_to_group_once() -> TestResult {
        let ctx = TestContext::new().await;
        create_user(&ctx, "jimmy", &[]).await?;

        ctx.users.assign_role("jimmy", Role::DeliveryCrew).await?;
        let user = ctx.users.assign_role("jimmy", Role::DeliveryCrew).await?;

        assert_eq!(user.roles.as_slice(), &[Role::DeliveryCrew]);

        let crew = ctx.users.list_users_in_role(Role::DeliveryCrew).await?;

        assert_eq!(crew.len(), 1);
        assert_eq!(crew[0].username, "jimmy");

        Ok(())
    }

    #[tokio::test]
    async fn assign_role_unknown_username_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.assign_role("nobody", Role::Manager).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn remove_role_leaves_other_roles() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "sam", &[Role::Manager, Role::DeliveryCrew]).await?;

        let updated = ctx.users.remove_role(user.uuid, Role::Manager).await?;

        assert_eq!(updated.roles.as_slice(), &[Role::DeliveryCrew]);
        assert!(ctx.users.list_users_in_role(Role::Manager).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn remove_role_for_non_member_is_a_no_op() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "luigi", &[]).await?;

        let updated = ctx.users.remove_role(user.uuid, Role::Manager).await?;

        assert!(updated.is_customer());

        Ok(())
    }

    #[tokio::test]
    async fn list_users_in_role_includes_all_roles_of_members() -> TestResult {
        let ctx = TestContext::new().await;
        create_user(&ctx, "both", &[Role::Manager, Role::DeliveryCrew]).await?;
        create_user(&ctx, "customer", &[]).await?;

        let managers = ctx.users.list_users_in_role(Role::Manager).await?;

        assert_eq!(managers.len(), 1);
        assert!(managers[0].has_role(Role::DeliveryCrew));

        Ok(())
    }
}
