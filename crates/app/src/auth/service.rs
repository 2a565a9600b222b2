//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    auth::{
        errors::AuthServiceError,
        models::{AuthedUser, IssuedApiToken},
        repository::PgAuthRepository,
        token::{format_api_token, generate_api_token_secret, hash_api_token},
    },
    database::Db,
    domain::users::models::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    // The raw token never reaches the log stream.
    #[tracing::instrument(name = "auth.service.authenticate", skip_all, err)]
    async fn authenticate(&self, token: &str) -> Result<AuthedUser, AuthServiceError> {
        let token_hash = hash_api_token(token);

        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .find_user_by_token_hash(&mut tx, &token_hash)
            .await?;

        tx.commit().await?;

        Ok(user)
    }

    #[tracing::instrument(
        name = "auth.service.issue_token",
        skip(self),
        fields(user_uuid = %user),
        err
    )]
    async fn issue_token(&self, user: UserUuid) -> Result<IssuedApiToken, AuthServiceError> {
        let secret = generate_api_token_secret();
        let token = format_api_token(&secret);
        let token_hash = hash_api_token(&token);
        let token_uuid = Uuid::now_v7();

        let mut tx = self.db.begin().await?;

        self.repository
            .insert_api_token(&mut tx, token_uuid, user, &token_hash)
            .await?;

        tx.commit().await?;

        Ok(IssuedApiToken {
            uuid: token_uuid,
            user_uuid: user,
            token,
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolves a raw bearer token to the user it was minted for.
    async fn authenticate(&self, token: &str) -> Result<AuthedUser, AuthServiceError>;

    /// Mints a token for a user. The raw token is returned exactly once;
    /// only its hash is stored.
    async fn issue_token(&self, user: UserUuid) -> Result<IssuedApiToken, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn issued_token_authenticates_its_user() -> TestResult {
        let ctx = TestContext::new().await;

        let issued = ctx.auth.issue_token(ctx.user_uuid).await?;

        let user = ctx.auth.authenticate(&issued.token).await?;

        assert_eq!(user.uuid, ctx.user_uuid);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.authenticate("pn_deadbeef").await;

        assert!(
            matches!(result, Err(AuthServiceError::UnknownToken)),
            "expected UnknownToken, got {result:?}"
        );
    }

    #[tokio::test]
    async fn token_for_unknown_user_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.issue_token(UserUuid::new()).await;

        assert!(
            matches!(result, Err(AuthServiceError::UnknownUser)),
            "expected UnknownUser, got {result:?}"
        );
    }

    #[tokio::test]
    async fn two_tokens_for_one_user_both_work() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx.auth.issue_token(ctx.user_uuid).await?;
        let second = ctx.auth.issue_token(ctx.user_uuid).await?;

        assert_ne!(first.token, second.token);

        assert_eq!(ctx.auth.authenticate(&first.token).await?.uuid, ctx.user_uuid);
        assert_eq!(ctx.auth.authenticate(&second.token).await?.uuid, ctx.user_uuid);

        Ok(())
    }
}
