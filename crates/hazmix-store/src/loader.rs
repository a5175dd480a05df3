//! Write access for building reference databases
//!
//! The engine never writes. These methods exist for import tooling and for
//! assembling fixtures in tests.

use crate::{SqliteStore, StoreError, WATER_CHEMICAL_KEY};
use hazmix_domain::{Chemical, ChemicalId, CompatibilityRule, GroupId, GroupPair, HazardCategory, ReactiveGroup};
use rusqlite::params;
use tracing::debug;

impl SqliteStore {
    /// Insert or replace a chemical record
    pub fn insert_chemical(&self, chemical: &Chemical) -> Result<(), StoreError> {
        self.conn()?.execute(
            "INSERT OR REPLACE INTO chemicals (id, name, formulas, special_hazards)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                chemical.id.value(),
                chemical.name,
                chemical.formula,
                chemical.special_hazards,
            ],
        )?;
        Ok(())
    }

    /// Insert or replace a reactive group
    pub fn insert_group(&self, group: &ReactiveGroup) -> Result<(), StoreError> {
        self.conn()?.execute(
            "INSERT OR REPLACE INTO reacts (id, name, description, special_handling)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                group.id.value(),
                group.name,
                group.description,
                group.special_handling,
            ],
        )?;
        Ok(())
    }

    /// Insert or replace hazard category metadata
    pub fn insert_hazard_category(&self, category: &HazardCategory) -> Result<(), StoreError> {
        self.conn()?.execute(
            "INSERT OR REPLACE INTO hazard_categories (id, name, short_phrase) VALUES (?1, ?2, ?3)",
            params![category.id.value(), category.name, category.short_phrase],
        )?;
        Ok(())
    }

    /// Assign a chemical to a reactive group
    pub fn assign_group(&self, chemical: ChemicalId, group: GroupId) -> Result<(), StoreError> {
        self.conn()?.execute(
            "INSERT OR IGNORE INTO mm_chemical_react (chem_id, react_id) VALUES (?1, ?2)",
            params![chemical.value(), group.value()],
        )?;
        Ok(())
    }

    /// Store the rule for an unordered group pair
    ///
    /// The pair is normalized before writing, and any previous rule for the
    /// pair (in either column order) is replaced together with its hazard
    /// links.
    pub fn insert_rule(&self, a: GroupId, b: GroupId, rule: &CompatibilityRule) -> Result<(), StoreError> {
        let pair = GroupPair::new(a, b);
        let (low, high) = (pair.low().value(), pair.high().value());

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            "DELETE FROM reactivity
             WHERE (react1 = ?1 AND react2 = ?2) OR (react1 = ?2 AND react2 = ?1)",
            params![low, high],
        )?;
        tx.execute(
            "DELETE FROM mm_reactivity_hazard
             WHERE (react1 = ?1 AND react2 = ?2) OR (react1 = ?2 AND react2 = ?1)",
            params![low, high],
        )?;
        tx.execute(
            "INSERT INTO reactivity (react1, react2, pair_compatibility, gas_products, hazards_documentation)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![low, high, rule.level.as_str(), rule.gas_products, rule.documentation],
        )?;
        for hazard in &rule.hazard_categories {
            tx.execute(
                "INSERT INTO mm_reactivity_hazard (react1, react2, hazard_id) VALUES (?1, ?2, ?3)",
                params![low, high, hazard.value()],
            )?;
        }

        tx.commit()?;
        debug!("Stored {} rule for pair {}", rule.level, pair);
        Ok(())
    }

    /// Record which chemical represents water
    pub fn set_water_chemical(&self, chemical: ChemicalId) -> Result<(), StoreError> {
        self.conn()?.execute(
            "INSERT OR REPLACE INTO reference_settings (key, value) VALUES (?1, ?2)",
            params![WATER_CHEMICAL_KEY, chemical.value().to_string()],
        )?;
        Ok(())
    }

    /// Append a CAS registry number to a chemical
    pub fn add_cas_number(&self, chemical: ChemicalId, cas: &str) -> Result<(), StoreError> {
        self.conn()?.execute(
            "INSERT INTO chemical_cas (chem_id, cas_id, sort)
             VALUES (?1, ?2, (SELECT COUNT(*) FROM chemical_cas WHERE chem_id = ?1))",
            params![chemical.value(), cas],
        )?;
        Ok(())
    }

    /// Append a UN/NA number to a chemical
    pub fn add_un_number(&self, chemical: ChemicalId, un: &str) -> Result<(), StoreError> {
        self.conn()?.execute(
            "INSERT INTO chemical_unna (chem_id, unna_id, sort)
             VALUES (?1, ?2, (SELECT COUNT(*) FROM chemical_unna WHERE chem_id = ?1))",
            params![chemical.value(), un],
        )?;
        Ok(())
    }

    /// Run a batch of raw SQL against the store
    ///
    /// For bulk imports of exported reference data.
    pub fn load_sql(&self, sql: &str) -> Result<(), StoreError> {
        self.conn()?.execute_batch(sql)?;
        Ok(())
    }
}
