//! Stats command implementation.

use super::open_store;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use hazmix_domain::traits::ChemicalDirectory;

/// Execute the stats command.
pub async fn execute_stats(config: &Config, formatter: &Formatter) -> Result<()> {
    let store = open_store(&config.database_path()?)?;
    let stats = store.statistics()?;

    println!("{}", formatter.format_stats(&stats)?);
    Ok(())
}
