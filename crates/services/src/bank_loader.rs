use std::path::Path;

use quiz_core::QuestionBank;

use crate::error::BankLoadError;

/// Read and validate a JSON question bank from disk.
///
/// # Errors
///
/// Returns `BankLoadError::Io` if the file cannot be read and
/// `BankLoadError::Invalid` if it is malformed, empty, or holds an invalid question.
pub fn load_bank(path: &Path) -> Result<QuestionBank, BankLoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| BankLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let bank = QuestionBank::from_json(&raw).map_err(|source| BankLoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), questions = bank.len(), "loaded question bank");
    Ok(bank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("quiz-bank-{}-{name}.json", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_valid_file() {
        let path = write_temp(
            "valid",
            r#"[{"question": "Q", "options": ["A", "B"], "answer": "A"}]"#,
        );
        let bank = load_bank(&path).unwrap();
        assert_eq!(bank.len(), 1);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_bank(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, BankLoadError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn malformed_file_is_invalid() {
        let path = write_temp("malformed", "[{");
        assert!(matches!(load_bank(&path), Err(BankLoadError::Invalid { .. })));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn empty_file_is_invalid() {
        let path = write_temp("empty", "[]");
        assert!(matches!(load_bank(&path), Err(BankLoadError::Invalid { .. })));
        std::fs::remove_file(path).ok();
    }
}
