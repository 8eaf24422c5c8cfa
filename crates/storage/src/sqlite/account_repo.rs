use academy_core::model::UserId;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::{SqliteRepository, conn, ser};
use crate::repository::{AccountRecord, AccountRepository, StorageError};

#[async_trait::async_trait]
impl AccountRepository for SqliteRepository {
    async fn insert_account(&self, account: &AccountRecord) -> Result<(), StorageError> {
        let result = sqlx::query(
            r"
            INSERT INTO accounts (uid, email, password_hash, display_name, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(account.uid.as_str())
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.display_name.as_deref())
        .bind(account.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StorageError::Conflict)
            }
            Err(e) => Err(conn(e)),
        }
    }

    async fn find_account_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountRecord>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT uid, email, password_hash, display_name, created_at
            FROM accounts WHERE email = ?1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(account_from_row).transpose()
    }
}

fn account_from_row(row: &SqliteRow) -> Result<AccountRecord, StorageError> {
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(ser)?;
    Ok(AccountRecord {
        uid: UserId::new(row.try_get::<String, _>("uid").map_err(ser)?),
        email: row.try_get("email").map_err(ser)?,
        password_hash: row.try_get("password_hash").map_err(ser)?,
        display_name: row.try_get("display_name").map_err(ser)?,
        created_at,
    })
}
