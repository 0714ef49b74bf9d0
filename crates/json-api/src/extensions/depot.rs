//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use lemon_app::auth::AuthenticatedUser;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_authenticated_user(&mut self, user: AuthenticatedUser);

    /// The user resolved by the auth middleware.
    fn authenticated_user_or_401(&self) -> Result<AuthenticatedUser, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_authenticated_user(&mut self, user: AuthenticatedUser) {
        self.inject(user);
    }

    fn authenticated_user_or_401(&self) -> Result<AuthenticatedUser, StatusError> {
        self.obtain::<AuthenticatedUser>()
            .cloned()
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }
}

#[cfg(test)]
mod tests {
    use lemon_app::domain::users::records::{Role, UserUuid};
    use smallvec::smallvec;

    use super::*;

    #[test]
    fn test_missing_user_is_unauthorized() {
        let depot = Depot::new();

        let error = depot.authenticated_user_or_401().err();

        assert_eq!(error.map(|e| e.code), Some(salvo::http::StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn test_inserted_user_round_trips() {
        let user = AuthenticatedUser {
            uuid: UserUuid::new(),
            username: "mario".to_string(),
            roles: smallvec![Role::Manager],
        };

        let mut depot = Depot::new();

        depot.insert_authenticated_user(user.clone());

        assert_eq!(depot.authenticated_user_or_401().ok(), Some(user));
    }
}
