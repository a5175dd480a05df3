//! Command implementations.

pub mod analyze;
pub mod config;
pub mod groups;
pub mod show;
pub mod stats;

pub use self::analyze::execute_analyze;
pub use self::config::execute_config;
pub use self::groups::execute_groups;
pub use self::show::execute_show;
pub use self::stats::execute_stats;

use crate::error::{CliError, Result};
use hazmix_store::SqliteStore;
use std::path::Path;

/// Open the reference database.
///
/// Opening a missing path with SQLite would silently create an empty
/// database, so a missing file is reported instead.
pub fn open_store(path: &Path) -> Result<SqliteStore> {
    if !path.exists() {
        return Err(CliError::NotFound(format!(
            "reference database {} (set database.path or pass --database)",
            path.display()
        )));
    }
    tracing::debug!(path = %path.display(), "opening reference database");
    Ok(SqliteStore::new(path)?)
}
