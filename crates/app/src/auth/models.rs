//! Auth data models.

use jiff::Timestamp;

use crate::{
    auth::ApiTokenVersion,
    domain::users::records::{Role, Roles, UserUuid},
    uuids::TypedUuid,
};

/// API Token UUID
pub type ApiTokenUuid = TypedUuid<ApiTokenMetadata>;

/// API token data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveApiToken {
    /// User that owns this API token.
    pub user_uuid: UserUuid,

    pub version: ApiTokenVersion,

    /// OpenBao HMAC verifier for the token secret material.
    pub token_hash: String,
}

/// API token metadata persisted in storage.
#[derive(Debug, Clone)]
pub struct ApiTokenMetadata {
    pub uuid: ApiTokenUuid,
    pub user_uuid: UserUuid,
    pub version: ApiTokenVersion,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

/// New API token persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewApiToken {
    pub uuid: ApiTokenUuid,
    pub user_uuid: UserUuid,
    pub version: ApiTokenVersion,
    pub token_hash: String,
    pub expires_at: Option<Timestamp>,
}

/// API token issuance result with one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub token: String,
    pub metadata: ApiTokenMetadata,
}

/// The user behind a verified bearer token, with their current roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub uuid: UserUuid,
    pub username: String,
    pub roles: Roles,
}

impl AuthenticatedUser {
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    #[must_use]
    pub fn is_manager(&self) -> bool {
        self.has_role(Role::Manager)
    }

    #[must_use]
    pub fn is_delivery_crew(&self) -> bool {
        self.has_role(Role::DeliveryCrew)
    }

    /// Users without any staff role are customers.
    #[must_use]
    pub fn is_customer(&self) -> bool {
        self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;

    #[test]
    fn staff_roles_are_not_customers() {
        let user = AuthenticatedUser {
            uuid: UserUuid::new(),
            username: "crew".to_string(),
            roles: smallvec![Role::DeliveryCrew],
        };

        assert!(user.is_delivery_crew());
        assert!(!user.is_manager());
        assert!(!user.is_customer());
    }

    #[test]
    fn no_roles_means_customer() {
        let user = AuthenticatedUser {
            uuid: UserUuid::new(),
            username: "guest".to_string(),
            roles: Roles::new(),
        };

        assert!(user.is_customer());
    }
}
