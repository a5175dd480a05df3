//! Groups command implementation.

use super::open_store;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use hazmix_domain::traits::ChemicalDirectory;

/// Execute the groups command.
pub async fn execute_groups(config: &Config, formatter: &Formatter) -> Result<()> {
    let store = open_store(&config.database_path()?)?;
    let groups = store.list_groups()?;

    println!("{}", formatter.format_groups(&groups)?);
    Ok(())
}
