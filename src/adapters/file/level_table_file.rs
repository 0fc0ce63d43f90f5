//! Level table loading.

use std::path::Path;
use tokio::fs;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::loyalty::LevelTable;

/// Loads the cashback level table from a YAML list, or returns the built-in
/// table when no path is configured.
///
/// ```yaml
/// - { level: 1, name: Start, percent: 3, min_spend: 0 }
/// - { level: 2, name: Silver, percent: 5, min_spend: 1000000 }
/// ```
///
/// # Errors
///
/// - `InvalidLevelTable` if the file cannot be read or fails validation
pub async fn load_level_table(path: Option<&Path>) -> Result<LevelTable, DomainError> {
    let Some(path) = path else {
        tracing::debug!("No level table configured, using built-in table");
        return Ok(LevelTable::standard().clone());
    };

    let content = fs::read_to_string(path).await.map_err(|e| {
        DomainError::new(
            ErrorCode::InvalidLevelTable,
            format!("Failed to read level table: {}", e),
        )
        .with_detail("path", path.display().to_string())
    })?;

    let table: LevelTable = serde_yaml::from_str(&content).map_err(|e| {
        DomainError::new(
            ErrorCode::InvalidLevelTable,
            format!("Invalid level table: {}", e),
        )
        .with_detail("path", path.display().to_string())
    })?;

    tracing::info!(path = %path.display(), levels = table.len(), "Loaded level table");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::MinorUnits;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn yaml_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn no_path_gives_built_in_table() {
        let table = load_level_table(None).await.unwrap();

        assert_eq!(&table, LevelTable::standard());
    }

    #[tokio::test]
    async fn loads_and_sorts_valid_table() {
        let file = yaml_file(
            r#"
- { level: 2, name: Silver, percent: 5, min_spend: 1000 }
- { level: 1, name: Start, percent: 3, min_spend: 0 }
- { level: 3, name: Gold, percent: 7, min_spend: 5000 }
"#,
        );

        let table = load_level_table(Some(file.path())).await.unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.levels()[0].min_spend, MinorUnits::ZERO);
        assert_eq!(table.top().level, 3);
    }

    #[tokio::test]
    async fn table_without_zero_threshold_is_rejected() {
        let file = yaml_file("- { level: 1, name: Start, percent: 3, min_spend: 100 }\n");

        let err = load_level_table(Some(file.path())).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidLevelTable);
    }

    #[tokio::test]
    async fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("levels.yaml");

        let err = load_level_table(Some(&path)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidLevelTable);
        assert!(err.details.contains_key("path"));
    }
}
