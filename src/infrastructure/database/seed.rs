//! One-time dataset seeding from CSV.
//!
//! On first startup, if the record table is empty and a seed file is found,
//! every parseable row is bulk-inserted in one transaction. A missing seed
//! file leaves the store empty and is not an error.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::domain::{DomainError, DomainResult, RecordRepositoryInterface};
use crate::ingest;

/// Development-time fallback next to the source tree.
const DEV_SEED_PATH: &str = "data/heart.csv";

/// Resolve the seed CSV location: explicit config override first, then the
/// conventional data-dir path, then the development fallback.
pub fn locate_seed_csv(configured: Option<&Path>) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(path) = configured {
        candidates.push(path.to_path_buf());
    }
    if let Some(data_dir) = dirs_next::data_dir() {
        candidates.push(data_dir.join("cardiodesk").join("heart.csv"));
    }
    candidates.push(PathBuf::from(DEV_SEED_PATH));

    for candidate in candidates {
        debug!("Looking for seed CSV at {}", candidate.display());
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

/// Seed the record table from the given CSV if the table is empty. Returns
/// the number of inserted rows (0 when already seeded, when no path was
/// resolved, or when the file has vanished since resolution).
pub async fn seed_if_empty(
    records: &dyn RecordRepositoryInterface,
    seed_path: Option<&Path>,
) -> DomainResult<u64> {
    if records.count_records().await? > 0 {
        debug!("Record table already populated, skipping seed");
        return Ok(0);
    }

    let Some(path) = seed_path.filter(|p| p.is_file()) else {
        info!("No seed CSV found, starting with an empty dataset");
        return Ok(0);
    };

    info!("Seeding dataset from {}", path.display());
    let text = std::fs::read_to_string(path)
        .map_err(|e| DomainError::Validation(format!("Failed to read seed CSV: {}", e)))?;

    let outcome = ingest::parse_records(&text);
    if outcome.skipped > 0 {
        warn!("Seed CSV: skipped {} malformed rows", outcome.skipped);
    }

    let inserted = records.insert_records(outcome.records).await?;
    info!("Seeded {} records", inserted);
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::SeaOrmRecordRepository;

    async fn repo() -> SeaOrmRecordRepository {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmRecordRepository::new(db)
    }

    fn write_seed(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("heart.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", ingest::CSV_HEADER).unwrap();
        writeln!(file, "40,F,ATA,140,289,0,Normal,172,N,0.0,Up,0").unwrap();
        writeln!(file, "54,M,ASY,150,365,0,Normal,134,N,1.0,Flat,1").unwrap();
        writeln!(file, "not,a,valid,row").unwrap();
        path
    }

    #[tokio::test]
    async fn seeds_once_and_is_idempotent() {
        let repo = repo().await;
        let dir = tempfile::tempdir().unwrap();
        let path = write_seed(&dir);

        let first = seed_if_empty(&repo, Some(&path)).await.unwrap();
        assert_eq!(first, 2);

        let second = seed_if_empty(&repo, Some(&path)).await.unwrap();
        assert_eq!(second, 0);
        assert_eq!(repo.count_records().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn missing_seed_file_leaves_store_empty() {
        let repo = repo().await;
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope").join("heart.csv");

        assert_eq!(seed_if_empty(&repo, Some(&missing)).await.unwrap(), 0);
        assert_eq!(seed_if_empty(&repo, None).await.unwrap(), 0);
        assert_eq!(repo.count_records().await.unwrap(), 0);
    }

    #[test]
    fn locate_prefers_the_configured_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_seed(&dir);
        assert_eq!(locate_seed_csv(Some(&path)), Some(path));
    }
}
