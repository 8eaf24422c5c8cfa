use academy_core::model::UserId;
use chrono::Utc;
use serde_json::{Map, Value};
use sqlx::Row;

use super::{SqliteRepository, conn, ser};
use crate::document::{DocumentPatch, StudentDocument};
use crate::repository::{StorageError, StoredStudent, StudentStore};

fn decode_document(raw: &str) -> Result<StudentDocument, StorageError> {
    let value: Value = serde_json::from_str(raw).map_err(ser)?;
    StudentDocument::from_value(value)
}

#[async_trait::async_trait]
impl StudentStore for SqliteRepository {
    async fn read(&self, uid: &UserId) -> Result<Option<StudentDocument>, StorageError> {
        let raw: Option<String> =
            sqlx::query_scalar("SELECT document FROM students WHERE uid = ?1")
                .bind(uid.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(conn)?;

        raw.as_deref().map(decode_document).transpose()
    }

    async fn write(&self, uid: &UserId, patch: DocumentPatch) -> Result<(), StorageError> {
        // Merge in Rust rather than with json_patch(), which recurses into
        // nested objects and drops null members.
        let mut tx = self.pool.begin().await.map_err(conn)?;

        let existing: Option<String> =
            sqlx::query_scalar("SELECT document FROM students WHERE uid = ?1")
                .bind(uid.as_str())
                .fetch_optional(&mut *tx)
                .await
                .map_err(conn)?;

        let mut fields = match existing {
            Some(raw) => match serde_json::from_str::<Value>(&raw).map_err(ser)? {
                Value::Object(fields) => fields,
                _ => return Err(ser("stored student document is not an object")),
            },
            None => Map::new(),
        };
        patch.apply_to(&mut fields);
        let encoded = serde_json::to_string(&Value::Object(fields)).map_err(ser)?;

        sqlx::query(
            r"
            INSERT INTO students (uid, document, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(uid) DO UPDATE SET
                document = excluded.document,
                updated_at = excluded.updated_at
            ",
        )
        .bind(uid.as_str())
        .bind(encoded)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(conn)?;

        tx.commit().await.map_err(conn)?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<StoredStudent>, StorageError> {
        let rows = sqlx::query("SELECT uid, document FROM students ORDER BY uid ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;

        let mut students = Vec::with_capacity(rows.len());
        for row in rows {
            let uid: String = row.try_get("uid").map_err(ser)?;
            let raw: String = row.try_get("document").map_err(ser)?;
            match decode_document(&raw) {
                Ok(document) => students.push(StoredStudent {
                    uid: UserId::new(uid),
                    document,
                }),
                Err(err) => {
                    tracing::warn!(%uid, error = %err, "skipping undecodable student document");
                }
            }
        }
        Ok(students)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn listing_skips_rows_that_are_not_documents() {
        let repo =
            SqliteRepository::connect("sqlite:file:memdb_students_corrupt?mode=memory&cache=shared")
                .await
                .unwrap();
        repo.migrate().await.unwrap();

        repo.write(
            &UserId::new("b"),
            DocumentPatch::new().set("name", &"Berry").unwrap(),
        )
        .await
        .unwrap();
        for (uid, raw) in [("a", "[1, 2, 3]"), ("c", "not json")] {
            sqlx::query("INSERT INTO students (uid, document, updated_at) VALUES (?1, ?2, ?3)")
                .bind(uid)
                .bind(raw)
                .bind(Utc::now())
                .execute(&repo.pool)
                .await
                .unwrap();
        }

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].uid, UserId::new("b"));
        assert_eq!(all[0].document.name, "Berry");
    }
}
