//! hazmix Reactivity Engine
//!
//! Predicts the hazards of combining chemicals by cross-referencing their
//! reactive groups against a pairwise compatibility rule table.
//!
//! ## Key Concepts
//!
//! - **Resolution**: chemicals, explicit groups and optionally water become a
//!   set of reactive groups
//! - **Evaluation**: every unordered pair of distinct groups, plus self-pairs
//!   that have a rule, is looked up and turned into a [`PairResult`]
//! - **Aggregation**: pair severities roll up into counts, critical pairs and
//!   one overall [`Assessment`](hazmix_domain::Assessment)
//!
//! A pair without a rule is `unknown`, never `none`, so missing data can not
//! produce a `COMPATIBLE` verdict.
//!
//! ## Architecture
//!
//! - Validation runs before any store access
//! - Store calls run on tokio's blocking pool, bounded by a semaphore and a
//!   per-call timeout; the whole request runs inside a scaled budget
//! - Resolution, pair generation, evaluation and aggregation are separate,
//!   individually testable steps
//!
//! # Examples
//!
//! ```no_run
//! use hazmix_engine::{AnalysisRequest, EngineConfig, ReactivityEngine};
//! use hazmix_store::SqliteStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = ReactivityEngine::new(SqliteStore::new("chemicals.db")?, EngineConfig::default());
//! let result = engine
//!     .analyze(AnalysisRequest::new([8, 10]).with_water())
//!     .await?;
//!
//! for pair in &result.critical_pairs {
//!     println!("{} + {}: {}", pair.group_a, pair.group_b, pair.level);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod aggregator;
mod config;
mod engine;
mod error;
pub mod evaluator;
mod lookup;
pub mod report;
pub mod resolver;
mod types;
pub mod validator;

pub use config::EngineConfig;
pub use engine::ReactivityEngine;
pub use error::{AnalysisError, ConfigError, ErrorResponse};
pub use lookup::LookupRunner;
pub use types::{
    AnalysisRequest, AnalysisResult, GroupOrigin, PairResult, ResolvedGroup, Summary,
};
