use chrono::{DateTime, Utc};
use quiz_core::model::QuizSession;
use sqlx::Row;

use crate::repository::{QuizSessionRecord, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn version_to_i64(v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization("version overflow".into()))
}

pub(crate) fn version_from_i64(v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid version: {v}")))
}

pub(crate) fn millis_to_datetime(ms: i64) -> Result<DateTime<Utc>, StorageError> {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .ok_or_else(|| StorageError::Serialization(format!("invalid timestamp: {ms}")))
}

pub(crate) fn encode_session(session: &QuizSession) -> Result<String, StorageError> {
    serde_json::to_string(&QuizSessionRecord::from_session(session)).map_err(ser)
}

/// Decodes the `payload` column and re-validates the session invariants.
pub(crate) fn decode_session(row: &sqlx::sqlite::SqliteRow) -> Result<QuizSession, StorageError> {
    let payload: String = row.try_get("payload").map_err(ser)?;
    let record: QuizSessionRecord = serde_json::from_str(&payload).map_err(ser)?;
    Ok(record.into_session()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_round_trip() {
        let now = quiz_core::time::fixed_now();
        assert_eq!(millis_to_datetime(now.timestamp_millis()).unwrap(), now);
    }

    #[test]
    fn negative_version_is_rejected() {
        assert!(version_from_i64(-1).is_err());
        assert_eq!(version_from_i64(3).unwrap(), 3);
    }
}
