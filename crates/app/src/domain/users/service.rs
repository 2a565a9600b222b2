//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::users::{
        errors::UsersServiceError,
        models::{NewUser, User, UserUuid},
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
    async fn list_users(&self) -> Result<Vec<User>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let users = self.repository.list_users(&mut tx).await?;

        tx.commit().await?;

        Ok(users)
    }

    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError> {
        // Emails are stored lowercase; the column CHECK enforces it.
        let email = user.email.trim().to_lowercase();

        if email.is_empty() || !email.contains('@') {
            return Err(UsersServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_user(&mut tx, &user, &email).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_user(&mut tx, user).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Retrieves all users, newest first.
    async fn list_users(&self) -> Result<Vec<User>, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError>;

    /// Creates a user. The email is normalised to lowercase.
    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError>;

    /// Deletes a user with the given UUID. Their tokens and orders go with
    /// them (FK cascade).
    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn create_user_lowercases_email() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .users
            .create_user(NewUser::customer("Mona", "Mona@Example.COM", "555-0100"))
            .await?;

        assert_eq!(user.email, "mona@example.com");
        assert!(!user.is_admin);

        Ok(())
    }

    #[tokio::test]
    async fn create_user_rejects_malformed_email() {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .create_user(NewUser::customer("No Email", "not-an-email", "555-0101"))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users
            .create_user(NewUser::customer("First", "dup@example.com", "555-0102"))
            .await?;

        let result = ctx
            .users
            .create_user(NewUser::customer("Second", "DUP@example.com", "555-0103"))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
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
    async fn delete_user_makes_them_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .users
            .create_user(NewUser::customer("Gone", "gone@example.com", "555-0104"))
            .await?;

        ctx.users.delete_user(user.uuid).await?;

        let result = ctx.users.get_user(user.uuid).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }
}
