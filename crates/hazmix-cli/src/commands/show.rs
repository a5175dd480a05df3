//! Show command implementation.

use super::open_store;
use crate::cli::ShowArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use hazmix_domain::traits::{ChemicalDirectory, ReferenceStore};
use hazmix_domain::{Chemical, ChemicalId, ReactiveGroup, SpecialHazard};
use hazmix_store::SqliteStore;
use serde::Serialize;

/// Everything the reference database knows about one chemical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChemicalDetail {
    /// The chemical record
    pub chemical: Chemical,
    /// CAS registry numbers
    pub cas_numbers: Vec<String>,
    /// UN/NA numbers
    pub un_numbers: Vec<String>,
    /// Reactive group memberships
    pub groups: Vec<ReactiveGroup>,
    /// Special hazards found in the record's notes
    pub special_hazards: Vec<SpecialHazard>,
}

/// Execute the show command.
pub async fn execute_show(args: ShowArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let store = open_store(&config.database_path()?)?;
    let detail = load_detail(&store, args.chemical)?;

    println!("{}", formatter.format_chemical(&detail)?);
    Ok(())
}

/// Collect the detail view of a chemical.
pub fn load_detail(store: &SqliteStore, id: ChemicalId) -> Result<ChemicalDetail> {
    let chemical = store
        .chemical(id)?
        .ok_or_else(|| CliError::NotFound(format!("chemical {}", id)))?;

    Ok(ChemicalDetail {
        special_hazards: chemical.special_hazard_kinds(),
        cas_numbers: store.cas_numbers(id)?,
        un_numbers: store.un_numbers(id)?,
        groups: store.groups_of(id)?,
        chemical,
    })
}
