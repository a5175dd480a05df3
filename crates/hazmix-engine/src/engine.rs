//! The orchestrating engine
//!
//! validate → resolve → candidate pairs → parallel rule lookups → evaluate →
//! aggregate → format. Only the lookups touch the store, and each one goes
//! through the [`LookupRunner`].

use crate::evaluator::{candidate_pairs, evaluate_pair};
use crate::lookup::LookupRunner;
use crate::resolver::{resolve, ResolvedGroups};
use crate::types::{AnalysisRequest, AnalysisResult, PairResult};
use crate::validator::{validate_request, ValidatedRequest};
use crate::{aggregator, report, AnalysisError, EngineConfig};
use hazmix_domain::traits::ReferenceStore;
use hazmix_domain::HazardCategory;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Predicts the hazards of combining chemicals
///
/// Holds the store behind an `Arc`; an engine can serve concurrent requests,
/// which share nothing but the store and the lookup pool.
///
/// # Examples
///
/// ```no_run
/// use hazmix_engine::{AnalysisRequest, EngineConfig, ReactivityEngine};
/// use hazmix_store::SqliteStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = SqliteStore::new("chemicals.db")?;
/// let engine = ReactivityEngine::new(store, EngineConfig::default());
///
/// let result = engine.analyze(AnalysisRequest::new([8, 10])).await?;
/// println!("{}", result.summary.overall_assessment);
/// # Ok(())
/// # }
/// ```
pub struct ReactivityEngine<S> {
    runner: LookupRunner<S>,
    config: EngineConfig,
}

impl<S> ReactivityEngine<S>
where
    S: ReferenceStore + Send + Sync + 'static,
    S::Error: Display,
{
    /// Create an engine owning the store
    pub fn new(store: S, config: EngineConfig) -> Self {
        Self::with_shared_store(Arc::new(store), config)
    }

    /// Create an engine over a store shared with other components
    pub fn with_shared_store(store: Arc<S>, config: EngineConfig) -> Self {
        let runner = LookupRunner::new(store, config.worker_count(), config.store_timeout());
        Self { runner, config }
    }

    /// The engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<S> {
        self.runner.store()
    }

    /// Analyze a mixture
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for malformed or out-of-bounds requests
    /// - `UnknownChemical` for ids the store does not know
    /// - `StoreUnavailable` when the store fails or the request budget runs out
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let started = Instant::now();
        let validated = validate_request(&request, &self.config)?;
        let budget = self.config.request_budget(validated.input_count());

        info!(
            "Analyzing {} chemical(s), {} explicit group(s), water: {}",
            validated.chemicals.len(),
            validated.explicit_groups.len(),
            validated.include_water
        );

        let result = timeout(budget, self.run(validated.clone()))
            .await
            .map_err(|_| {
                AnalysisError::StoreUnavailable(format!(
                    "analysis exceeded its {}ms budget",
                    budget.as_millis()
                ))
            })??;

        info!(
            target: "hazmix::audit",
            chemicals = ?validated.chemicals,
            explicit_groups = ?validated.explicit_groups,
            include_water = validated.include_water,
            groups = result.resolved_groups.len(),
            pairs = result.summary.total_pairs,
            assessment = %result.summary.overall_assessment,
            incomplete_data = result.summary.incomplete_data,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "analysis completed"
        );

        Ok(result)
    }

    async fn run(&self, validated: ValidatedRequest) -> Result<AnalysisResult, AnalysisError> {
        let resolved = self
            .runner
            .call("group resolution", move |store| resolve(store, &validated))
            .await?;

        if resolved.groups.len() < self.config.min_groups {
            return Err(AnalysisError::InvalidInput(format!(
                "inputs resolve to {} distinct reactive group(s), at least {} required",
                resolved.groups.len(),
                self.config.min_groups
            )));
        }

        let pairs = self.evaluate_pairs(&resolved).await?;
        let rollup = self.load_rollup(&pairs).await?;

        Ok(report::build_result(&resolved, pairs, rollup))
    }

    /// Look up every candidate pair in parallel and evaluate the results
    async fn evaluate_pairs(
        &self,
        resolved: &ResolvedGroups,
    ) -> Result<Vec<PairResult>, AnalysisError> {
        let candidates = candidate_pairs(&resolved.group_ids());
        debug!("Evaluating {} candidate pair(s)", candidates.len());

        let mut lookups = JoinSet::new();
        for pair in candidates {
            let runner = self.runner.clone();
            lookups.spawn(async move {
                let rule = runner
                    .call("rule lookup", move |store| {
                        store
                            .rule(pair.low(), pair.high())
                            .map_err(|e| AnalysisError::store("rule lookup", e))
                    })
                    .await?;
                Ok::<_, AnalysisError>((pair, rule))
            });
        }

        let mut pairs = Vec::new();
        while let Some(joined) = lookups.join_next().await {
            let (pair, rule) = joined.map_err(|e| {
                AnalysisError::StoreUnavailable(format!("rule lookup task failed: {}", e))
            })??;
            if let Some(result) = evaluate_pair(pair, rule, resolved, self.config.infer_hazards) {
                pairs.push(result);
            }
        }
        Ok(pairs)
    }

    /// Fetch metadata for the hazard categories of pairs at caution or above
    async fn load_rollup(&self, pairs: &[PairResult]) -> Result<Vec<HazardCategory>, AnalysisError> {
        let ids = aggregator::hazard_rollup(pairs);
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.runner
            .call("hazard category lookup", move |store| {
                let mut categories = Vec::with_capacity(ids.len());
                for id in ids {
                    match store
                        .hazard_category(id)
                        .map_err(|e| AnalysisError::store("hazard category lookup", e))?
                    {
                        Some(category) => categories.push(category),
                        None => warn!("Hazard category {} is not in the store", id),
                    }
                }
                Ok(categories)
            })
            .await
    }
}
