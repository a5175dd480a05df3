//! hazmix Storage Layer
//!
//! Implements the `ReferenceStore` and `ChemicalDirectory` traits on top of
//! the SQLite reference database.
//!
//! # Architecture
//!
//! - SQLite for the reference tables (chemicals, groups, memberships, rules)
//! - A single connection behind a mutex, so one store can serve many
//!   concurrent lookups from the engine's worker threads
//! - [`CachedStore`] as an optional read-through cache for hot lookups
//!
//! # Examples
//!
//! ```no_run
//! use hazmix_store::SqliteStore;
//!
//! let store = SqliteStore::new("chemicals.db").unwrap();
//! // Store is now ready for lookups
//! ```

#![warn(missing_docs)]

mod cache;
mod loader;

pub use cache::CachedStore;

use hazmix_domain::traits::{ChemicalDirectory, ReferenceStats, ReferenceStore};
use hazmix_domain::{
    Chemical, ChemicalId, CompatibilityLevel, CompatibilityRule, GroupId, GroupPair,
    HazardCategory, HazardCategoryId, HazardKind, ReactiveGroup,
};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::debug;

/// Settings key naming the chemical that represents water
pub const WATER_CHEMICAL_KEY: &str = "water_chemical_id";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A required store-defined mapping is missing
    #[error("Not configured: {0}")]
    NotConfigured(String),

    /// The connection mutex was poisoned by a panicking reader
    #[error("Store connection poisoned")]
    Poisoned,
}

/// SQLite-based implementation of the reference accessors
///
/// # Thread Safety
///
/// The connection is guarded by a mutex, so the store is `Send + Sync` and
/// can be shared through an `Arc`. Lookups are serialized on the connection.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing). The
    /// schema is applied if missing and the hazard category table is seeded
    /// with the canonical categories.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hazmix_store::SqliteStore;
    ///
    /// let store = SqliteStore::new(":memory:").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        debug!("Opening reference store at {}", path.as_ref().display());
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        let conn = self.conn()?;
        conn.execute_batch(schema)?;

        let mut stmt = conn.prepare(
            "INSERT OR IGNORE INTO hazard_categories (id, name, short_phrase) VALUES (?1, ?2, ?3)",
        )?;
        for kind in HazardKind::ALL {
            stmt.execute(params![kind.id().value(), kind.name(), kind.short_phrase()])?;
        }

        Ok(())
    }

    /// Lock the connection
    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Read the level column of a rule row
    ///
    /// NULL and the legacy "no data" code mean the row carries no verdict.
    fn parse_level(raw: Option<String>) -> Result<Option<CompatibilityLevel>, StoreError> {
        let Some(raw) = raw else {
            return Ok(None);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n") {
            return Ok(None);
        }
        CompatibilityLevel::parse(trimmed)
            .map(Some)
            .ok_or_else(|| StoreError::InvalidData(format!("Unknown compatibility level: {}", raw)))
    }

    fn row_to_group(row: &rusqlite::Row<'_>) -> rusqlite::Result<ReactiveGroup> {
        Ok(ReactiveGroup {
            id: GroupId::new(row.get(0)?),
            name: row.get(1)?,
            description: row.get(2)?,
            special_handling: row.get(3)?,
        })
    }

    fn chemical_exists(conn: &Connection, id: ChemicalId) -> Result<bool, StoreError> {
        let exists = conn
            .query_row(
                "SELECT 1 FROM chemicals WHERE id = ?1",
                params![id.value()],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        Ok(exists)
    }

    fn memberships(conn: &Connection, id: ChemicalId) -> Result<BTreeSet<GroupId>, StoreError> {
        let mut stmt = conn.prepare("SELECT react_id FROM mm_chemical_react WHERE chem_id = ?1")?;
        let groups = stmt
            .query_map(params![id.value()], |row| row.get::<_, u32>(0))?
            .map(|r| r.map(GroupId::new))
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(groups)
    }

    fn identifiers(&self, sql: &str, id: ChemicalId) -> Result<Vec<String>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let values = stmt
            .query_map(params![id.value()], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(values)
    }

    fn count(conn: &Connection, sql: &str) -> Result<usize, StoreError> {
        let n: i64 = conn.query_row(sql, [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

impl ReferenceStore for SqliteStore {
    type Error = StoreError;

    fn groups_for_chemical(&self, id: ChemicalId) -> Result<Option<BTreeSet<GroupId>>, Self::Error> {
        let conn = self.conn()?;
        let groups = Self::memberships(&conn, id)?;

        // A membership row is proof of existence even without a chemicals row
        if !groups.is_empty() || Self::chemical_exists(&conn, id)? {
            Ok(Some(groups))
        } else {
            Ok(None)
        }
    }

    fn groups_for_water(&self) -> Result<BTreeSet<GroupId>, Self::Error> {
        let raw: Option<String> = self
            .conn()?
            .query_row(
                "SELECT value FROM reference_settings WHERE key = ?1",
                params![WATER_CHEMICAL_KEY],
                |row| row.get(0),
            )
            .optional()?;

        let raw = raw.ok_or_else(|| {
            StoreError::NotConfigured(format!("{} is not set", WATER_CHEMICAL_KEY))
        })?;
        let water: ChemicalId = raw.parse().map_err(|e| {
            StoreError::InvalidData(format!("{}: {}", WATER_CHEMICAL_KEY, e))
        })?;

        self.groups_for_chemical(water)?.ok_or_else(|| {
            StoreError::NotConfigured(format!("water chemical {} is not in the store", water))
        })
    }

    fn rule(&self, a: GroupId, b: GroupId) -> Result<Option<CompatibilityRule>, Self::Error> {
        let pair = GroupPair::new(a, b);
        let conn = self.conn()?;

        let row = conn
            .query_row(
                "SELECT pair_compatibility, gas_products, hazards_documentation
                 FROM reactivity
                 WHERE (react1 = ?1 AND react2 = ?2) OR (react1 = ?2 AND react2 = ?1)
                 ORDER BY react1
                 LIMIT 1",
                params![pair.low().value(), pair.high().value()],
                |row| {
                    Ok((
                        row.get::<_, Option<String>>(0)?,
                        row.get::<_, Option<String>>(1)?,
                        row.get::<_, Option<String>>(2)?,
                    ))
                },
            )
            .optional()?;

        let Some((level, gas_products, documentation)) = row else {
            return Ok(None);
        };
        let Some(level) = Self::parse_level(level)? else {
            return Ok(None);
        };

        let mut stmt = conn.prepare(
            "SELECT DISTINCT hazard_id FROM mm_reactivity_hazard
             WHERE (react1 = ?1 AND react2 = ?2) OR (react1 = ?2 AND react2 = ?1)",
        )?;
        let hazard_categories = stmt
            .query_map(params![pair.low().value(), pair.high().value()], |row| {
                row.get::<_, u32>(0)
            })?
            .map(|r| r.map(HazardCategoryId::new))
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(Some(CompatibilityRule {
            level,
            gas_products: gas_products.unwrap_or_default(),
            documentation: documentation.unwrap_or_default(),
            hazard_categories,
        }))
    }

    fn hazard_category(&self, id: HazardCategoryId) -> Result<Option<HazardCategory>, Self::Error> {
        let category = self
            .conn()?
            .query_row(
                "SELECT id, name, short_phrase FROM hazard_categories WHERE id = ?1",
                params![id.value()],
                |row| {
                    Ok(HazardCategory {
                        id: HazardCategoryId::new(row.get(0)?),
                        name: row.get(1)?,
                        short_phrase: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(category)
    }

    fn reactive_group(&self, id: GroupId) -> Result<Option<ReactiveGroup>, Self::Error> {
        let group = self
            .conn()?
            .query_row(
                "SELECT id, name, description, special_handling FROM reacts WHERE id = ?1",
                params![id.value()],
                Self::row_to_group,
            )
            .optional()?;
        Ok(group)
    }

    fn chemical(&self, id: ChemicalId) -> Result<Option<Chemical>, Self::Error> {
        let chemical = self
            .conn()?
            .query_row(
                "SELECT id, name, formulas, special_hazards FROM chemicals WHERE id = ?1",
                params![id.value()],
                |row| {
                    Ok(Chemical {
                        id: ChemicalId::new(row.get(0)?),
                        name: row.get(1)?,
                        formula: row.get(2)?,
                        special_hazards: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(chemical)
    }
}

impl ChemicalDirectory for SqliteStore {
    type Error = StoreError;

    fn cas_numbers(&self, id: ChemicalId) -> Result<Vec<String>, Self::Error> {
        self.identifiers(
            "SELECT cas_id FROM chemical_cas WHERE chem_id = ?1 ORDER BY sort, cas_id",
            id,
        )
    }

    fn un_numbers(&self, id: ChemicalId) -> Result<Vec<String>, Self::Error> {
        self.identifiers(
            "SELECT unna_id FROM chemical_unna WHERE chem_id = ?1 ORDER BY sort, unna_id",
            id,
        )
    }

    fn list_groups(&self) -> Result<Vec<ReactiveGroup>, Self::Error> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, description, special_handling FROM reacts ORDER BY id",
        )?;
        let groups = stmt
            .query_map([], Self::row_to_group)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(groups)
    }

    fn groups_of(&self, id: ChemicalId) -> Result<Vec<ReactiveGroup>, Self::Error> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT rg.id, rg.name, rg.description, rg.special_handling
             FROM reacts rg
             JOIN mm_chemical_react crg ON rg.id = crg.react_id
             WHERE crg.chem_id = ?1
             ORDER BY rg.id",
        )?;
        let groups = stmt
            .query_map(params![id.value()], Self::row_to_group)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(groups)
    }

    fn statistics(&self) -> Result<ReferenceStats, Self::Error> {
        let conn = self.conn()?;
        Ok(ReferenceStats {
            total_chemicals: Self::count(&conn, "SELECT COUNT(*) FROM chemicals")?,
            total_groups: Self::count(&conn, "SELECT COUNT(*) FROM reacts")?,
            total_rules: Self::count(&conn, "SELECT COUNT(*) FROM reactivity")?,
            dangerous_rules: Self::count(
                &conn,
                "SELECT COUNT(*) FROM reactivity
                 WHERE lower(pair_compatibility) IN ('dangerous', 'incompatible', 'i')",
            )?,
        })
    }
}
