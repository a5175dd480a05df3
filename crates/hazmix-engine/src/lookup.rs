//! Bounded, time-limited execution of blocking store calls

use crate::AnalysisError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::warn;

/// Runs store calls on the blocking pool
///
/// At most `workers` calls run at once, and each one must finish within the
/// store timeout. Cloning shares the store and the permit pool.
pub struct LookupRunner<S> {
    store: Arc<S>,
    permits: Arc<Semaphore>,
    timeout: Duration,
}

impl<S> Clone for LookupRunner<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            permits: Arc::clone(&self.permits),
            timeout: self.timeout,
        }
    }
}

impl<S> LookupRunner<S>
where
    S: Send + Sync + 'static,
{
    /// Create a runner over a shared store
    pub fn new(store: Arc<S>, workers: usize, timeout: Duration) -> Self {
        Self {
            store,
            permits: Arc::new(Semaphore::new(workers.max(1))),
            timeout,
        }
    }

    /// The shared store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Run `f` against the store
    ///
    /// A timeout or a panicking call becomes `StoreUnavailable`. The permit is
    /// held by the blocking task, so a call that outlives its timeout still
    /// counts against the pool until it returns.
    pub async fn call<T, F>(&self, what: &'static str, f: F) -> Result<T, AnalysisError>
    where
        F: FnOnce(&S) -> Result<T, AnalysisError> + Send + 'static,
        T: Send + 'static,
    {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| AnalysisError::StoreUnavailable("lookup pool closed".to_string()))?;
        let store = Arc::clone(&self.store);

        let task = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            f(&store)
        });

        match timeout(self.timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(AnalysisError::StoreUnavailable(format!(
                "{} task failed: {}",
                what, e
            ))),
            Err(_) => {
                warn!("{} exceeded {}ms", what, self.timeout.as_millis());
                Err(AnalysisError::StoreUnavailable(format!(
                    "{} timed out after {}ms",
                    what,
                    self.timeout.as_millis()
                )))
            }
        }
    }
}
