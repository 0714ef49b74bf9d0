//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tracing::{debug, warn};

use crate::{
    auth::{
        ApiTokenMetadata, ApiTokenSecret, ApiTokenUuid, ApiTokenVersion, AuthServiceError,
        AuthenticatedUser, IssuedApiToken, ParsedApiToken, models::NewApiToken,
        openbao::OpenBaoClient, repository::PgAuthRepository,
    },
    domain::users::records::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    openbao: OpenBaoClient,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, openbao: OpenBaoClient) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
            openbao,
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn issue_api_token(
        &self,
        user: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token = ParsedApiToken {
            token_uuid: ApiTokenUuid::new(),
            version: ApiTokenVersion::V1,
            secret: ApiTokenSecret::generate(),
        };

        let token_hash = self.openbao.hmac(&token.verifier_input(user)).await?;

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token.token_uuid,
                user_uuid: user,
                version: token.version,
                token_hash,
                expires_at,
            })
            .await?;

        Ok(IssuedApiToken {
            token: token.to_string(),
            metadata,
        })
    }

    async fn list_api_tokens(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        Ok(self.repository.list_api_tokens(user).await?)
    }

    async fn revoke_api_token(&self, token: ApiTokenUuid) -> Result<bool, AuthServiceError> {
        Ok(self.repository.revoke_api_token(token).await?.is_some())
    }

    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        let parsed: ParsedApiToken = bearer_token.parse().map_err(|error| {
            debug!(%error, "rejecting malformed bearer token");
            AuthServiceError::NotFound
        })?;

        let token = self
            .repository
            .find_active_api_token(parsed.token_uuid, parsed.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let valid = self
            .openbao
            .verify(&parsed.verifier_input(token.user_uuid), &token.token_hash)
            .await?;

        if !valid {
            return Err(AuthServiceError::NotFound);
        }

        if let Err(error) = self.repository.touch_api_token(parsed.token_uuid).await {
            warn!(%error, token = %parsed.token_uuid, "failed to record api token use");
        }

        self.repository
            .find_authenticated_user(token.user_uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Issue a new API token for `user`. The raw token is only ever returned here.
    async fn issue_api_token(
        &self,
        user: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError>;

    /// All tokens belonging to `user`, newest first.
    async fn list_api_tokens(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError>;

    /// Revoke a token. Returns `true` if the token was active.
    async fn revoke_api_token(&self, token: ApiTokenUuid) -> Result<bool, AuthServiceError>;

    /// Resolve a bearer token to the user it belongs to.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError>;
}
