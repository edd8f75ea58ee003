//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{account::Account, session::Session};
use crate::domain::repository::{
    AccountRepository, SessionRepository, StoreError, StoreResult,
};
use crate::domain::value_object::{
    account_id::AccountId, email::Email, password::PasswordDigest, session_token::TokenHash,
};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// SQLSTATE 23505: unique constraint violated
fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

fn map_insert_error(err: sqlx::Error) -> StoreError {
    if is_unique_violation(&err) {
        StoreError::AlreadyExists
    } else {
        StoreError::Database(err)
    }
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for PgAuthRepository {
    async fn insert(&self, account: &Account) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                email,
                password_hash,
                created_at
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(account.email.as_str())
        .bind(account.password.as_phc_string())
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> StoreResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                email,
                password_hash,
                created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAuthRepository {
    async fn insert(&self, session: &Session) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (
                token_hash,
                account_id,
                account_email,
                created_at,
                expires_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(session.token_hash.as_bytes().as_slice())
        .bind(session.account_id.as_uuid())
        .bind(session.account_email.as_str())
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    async fn find(&self, token_hash: &TokenHash) -> StoreResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                token_hash,
                account_id,
                account_email,
                created_at,
                expires_at
            FROM auth_sessions
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash.as_bytes().as_slice())
        .fetch_optional(&self.pool)
        .await?;

        row.map(SessionRow::into_session).transpose()
    }

    async fn delete(&self, token_hash: &TokenHash) -> StoreResult<bool> {
        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE token_hash = $1")
            .bind(token_hash.as_bytes().as_slice())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::debug!(sessions_deleted = deleted, "Deleted expired auth sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> StoreResult<Account> {
        let password = PasswordDigest::from_phc_string(self.password_hash)
            .map_err(|e| StoreError::Corrupt(format!("Invalid password_hash: {}", e)))?;

        Ok(Account {
            id: AccountId::from_uuid(self.account_id),
            email: Email::from_db(self.email),
            password,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    token_hash: Vec<u8>,
    account_id: Uuid,
    account_email: String,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl SessionRow {
    fn into_session(self) -> StoreResult<Session> {
        let token_hash: [u8; 32] = self.token_hash.try_into().map_err(|bytes: Vec<u8>| {
            StoreError::Corrupt(format!("token_hash has {} bytes, expected 32", bytes.len()))
        })?;

        Ok(Session {
            token_hash: TokenHash::from_bytes(token_hash),
            account_id: AccountId::from_uuid(self.account_id),
            account_email: Email::from_db(self.account_email),
            created_at: self.created_at,
            expires_at: self.expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use platform::password::{ClearTextPassword, HashParams};

    use super::*;

    #[test]
    fn test_non_database_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
        assert!(matches!(
            map_insert_error(sqlx::Error::RowNotFound),
            StoreError::Database(_)
        ));
    }

    #[test]
    fn test_account_row_conversion() {
        let hash = ClearTextPassword::new("longpassword".to_string())
            .unwrap()
            .hash(None, &HashParams::for_tests())
            .unwrap();
        let row = AccountRow {
            account_id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            password_hash: hash.as_phc_string().to_string(),
            created_at: Utc::now(),
        };
        let id = row.account_id;

        let account = row.into_account().unwrap();
        assert_eq!(account.id.into_uuid(), id);
        assert_eq!(account.email.as_str(), "a@b.com");
    }

    #[test]
    fn test_account_row_with_bad_hash_is_corrupt() {
        let row = AccountRow {
            account_id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            password_hash: "plaintext".to_string(),
            created_at: Utc::now(),
        };
        assert!(matches!(row.into_account(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_session_row_conversion() {
        let row = SessionRow {
            token_hash: vec![7; 32],
            account_id: Uuid::new_v4(),
            account_email: "a@b.com".to_string(),
            created_at: Utc::now(),
            expires_at: None,
        };
        let session = row.into_session().unwrap();
        assert_eq!(session.token_hash.as_bytes(), &[7; 32]);
        assert!(session.expires_at.is_none());
    }

    #[test]
    fn test_session_row_with_short_hash_is_corrupt() {
        let row = SessionRow {
            token_hash: vec![1; 16],
            account_id: Uuid::new_v4(),
            account_email: "a@b.com".to_string(),
            created_at: Utc::now(),
            expires_at: None,
        };
        assert!(matches!(row.into_session(), Err(StoreError::Corrupt(_))));
    }
}
