//! Catalog database bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open catalog files (or in-memory stores) ready for product reads/writes.
//! - Bring the product schema up to the latest embedded migration.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - A catalog written by a newer build is refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failures raised while opening or migrating a catalog database.
#[derive(Debug)]
pub enum DbError {
    /// The catalog file could not be opened or created.
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },
    /// Statement failure after the connection exists.
    Sqlite(rusqlite::Error),
    /// The file carries a schema version this build does not know.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "cannot open catalog at {}: {source}", path.display())
            }
            Self::Sqlite(err) => write!(f, "catalog database error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "catalog schema v{db_version} was written by a newer shopfront build \
                 (this build migrates up to v{latest_supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;
    use std::error::Error;
    use std::path::PathBuf;

    #[test]
    fn open_failure_names_the_catalog_path() {
        let err = DbError::Open {
            path: PathBuf::from("/missing/dir/products.db"),
            source: rusqlite::Error::InvalidQuery,
        };

        assert!(err
            .to_string()
            .starts_with("cannot open catalog at /missing/dir/products.db: "));
        assert!(err.source().is_some());
    }

    #[test]
    fn newer_schema_reports_both_versions_without_source() {
        let err = DbError::UnsupportedSchemaVersion {
            db_version: 7,
            latest_supported: 2,
        };

        assert_eq!(
            err.to_string(),
            "catalog schema v7 was written by a newer shopfront build (this build migrates up to v2)"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn statement_failures_convert_from_rusqlite() {
        let err = DbError::from(rusqlite::Error::QueryReturnedNoRows);

        assert!(matches!(err, DbError::Sqlite(_)));
        assert!(err.to_string().starts_with("catalog database error: "));
    }
}
