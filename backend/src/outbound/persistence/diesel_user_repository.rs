//! PostgreSQL-backed identity store reads.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{EmailAddress, StoredCredentials, User, UserId};

use super::error_mapping::StoreFault;
use super::models::UserRow;
use super::pool::DbPool;
use super::schema::users;

fn repository_error(error: impl Into<StoreFault>) -> UserRepositoryError {
    let fault: StoreFault = error.into();
    fault.into()
}

/// Diesel-backed implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find_row_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserRow>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(repository_error)?;
        let email: &str = email.as_ref();
        users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(repository_error)
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(repository_error)?;
        let row = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(repository_error)?;
        row.map(User::try_from).transpose().map_err(repository_error)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        self.find_row_by_email(email)
            .await?
            .map(User::try_from)
            .transpose()
            .map_err(repository_error)
    }

    async fn find_credentials(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredCredentials>, UserRepositoryError> {
        self.find_row_by_email(email)
            .await?
            .map(UserRow::into_credentials)
            .transpose()
            .map_err(repository_error)
    }
}
