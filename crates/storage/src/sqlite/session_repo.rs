use chrono::{DateTime, Utc};
use quiz_core::model::{QuizSession, SessionId};
use sqlx::Row;

use super::SqliteSessionStore;
use super::mapping::{
    decode_session, encode_session, millis_to_datetime, ser, version_from_i64, version_to_i64,
};
use crate::repository::{SessionStore, StorageError, StoredSession};

fn conn(e: sqlx::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait::async_trait]
impl SessionStore for SqliteSessionStore {
    async fn load(
        &self,
        id: SessionId,
        now: DateTime<Utc>,
    ) -> Result<Option<StoredSession>, StorageError> {
        let Some(row) = sqlx::query(
            r"
                SELECT payload, version, expires_at_ms
                FROM quiz_sessions
                WHERE id = ?1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?
        else {
            return Ok(None);
        };

        let version = version_from_i64(row.try_get::<i64, _>("version").map_err(ser)?)?;
        let expires_at_ms: i64 = row.try_get("expires_at_ms").map_err(ser)?;
        if expires_at_ms <= now.timestamp_millis() {
            sqlx::query("DELETE FROM quiz_sessions WHERE id = ?1 AND version = ?2")
                .bind(id.to_string())
                .bind(version_to_i64(version)?)
                .execute(&self.pool)
                .await
                .map_err(conn)?;
            return Ok(None);
        }

        let session = decode_session(&row)?;
        Ok(Some(StoredSession {
            session,
            version,
            expires_at: millis_to_datetime(expires_at_ms)?,
        }))
    }

    async fn insert(
        &self,
        id: SessionId,
        session: &QuizSession,
        expires_at: DateTime<Utc>,
    ) -> Result<u64, StorageError> {
        let res = sqlx::query(
            r"
                INSERT INTO quiz_sessions (id, payload, version, expires_at_ms, updated_at)
                VALUES (?1, ?2, 0, ?3, ?4)
                ON CONFLICT(id) DO NOTHING
            ",
        )
        .bind(id.to_string())
        .bind(encode_session(session)?)
        .bind(expires_at.timestamp_millis())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::Conflict);
        }
        Ok(0)
    }

    async fn update(
        &self,
        id: SessionId,
        session: &QuizSession,
        expected_version: u64,
        expires_at: DateTime<Utc>,
    ) -> Result<u64, StorageError> {
        let res = sqlx::query(
            r"
                UPDATE quiz_sessions
                SET payload = ?1,
                    version = version + 1,
                    expires_at_ms = ?2,
                    updated_at = ?3
                WHERE id = ?4 AND version = ?5
            ",
        )
        .bind(encode_session(session)?)
        .bind(expires_at.timestamp_millis())
        .bind(Utc::now())
        .bind(id.to_string())
        .bind(version_to_i64(expected_version)?)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::Conflict);
        }
        Ok(expected_version + 1)
    }

    async fn remove_version(
        &self,
        id: SessionId,
        expected_version: u64,
    ) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM quiz_sessions WHERE id = ?1 AND version = ?2")
            .bind(id.to_string())
            .bind(version_to_i64(expected_version)?)
            .execute(&self.pool)
            .await
            .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::Conflict);
        }
        Ok(())
    }

    async fn remove(&self, id: SessionId) -> Result<bool, StorageError> {
        let res = sqlx::query("DELETE FROM quiz_sessions WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(res.rows_affected() > 0)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, StorageError> {
        let res = sqlx::query("DELETE FROM quiz_sessions WHERE expires_at_ms <= ?1")
            .bind(now.timestamp_millis())
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(res.rows_affected())
    }
}
