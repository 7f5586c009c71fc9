//! Long-lived recommender with atomic snapshot swaps.

use crate::config::RecommenderConfig;
use crate::datasource::Datasource;
use crate::error::{EngineError, RecommendError};
use crate::history::RecommendationHistory;
use crate::recommend::{explain, IndexStats, Snapshot};
use crate::types::{EmployeeId, SkillProfiles, SkillRecommendation};
use parking_lot::{Mutex, RwLock};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Recommendation engine serving queries from the current [`Snapshot`].
///
/// Rebuilds produce a complete new snapshot before it is published; a
/// failed rebuild leaves the previous one in place. Queries that already
/// hold a snapshot keep reading it while a new one is swapped in.
pub struct SkillRecommender {
    datasource: Box<dyn Datasource>,
    profiles: RwLock<Arc<SkillProfiles>>,
    snapshot: RwLock<Arc<Snapshot>>,
    staged: Mutex<Option<RecommenderConfig>>,
    rebuild: Mutex<()>,
    history: RecommendationHistory,
}

impl std::fmt::Debug for SkillRecommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillRecommender")
            .field("stats", &self.stats())
            .field("staged", &self.staged.lock().is_some())
            .finish_non_exhaustive()
    }
}

fn fetch(datasource: &dyn Datasource) -> Result<SkillProfiles, EngineError> {
    let started = Instant::now();
    info!(target: "skillrec::engine", "Fetching skill data");
    let profiles = datasource.skills_by_user().map_err(EngineError::Datasource)?;
    debug!(
        target: "skillrec::engine",
        employees = profiles.len(),
        without_data = profiles.values().filter(|p| p.is_none()).count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Fetched skill data"
    );
    Ok(profiles)
}

impl SkillRecommender {
    /// Fetch profiles and build the first snapshot.
    pub fn new(
        datasource: impl Datasource + 'static,
        config: RecommenderConfig,
    ) -> Result<Self, EngineError> {
        let datasource: Box<dyn Datasource> = Box::new(datasource);
        let profiles = fetch(datasource.as_ref())?;
        let snapshot = Snapshot::build(&profiles, config)?;
        Ok(Self {
            datasource,
            profiles: RwLock::new(Arc::new(profiles)),
            snapshot: RwLock::new(Arc::new(snapshot)),
            staged: Mutex::new(None),
            rebuild: Mutex::new(()),
            history: RecommendationHistory::new(),
        })
    }

    /// The snapshot currently serving queries.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot.read())
    }

    /// Configuration of the current snapshot.
    pub fn config(&self) -> RecommenderConfig {
        self.snapshot().config().clone()
    }

    /// Index figures of the current snapshot.
    pub fn stats(&self) -> IndexStats {
        self.snapshot().stats()
    }

    /// Recommendation history shared by all queries.
    pub fn history(&self) -> &RecommendationHistory {
        &self.history
    }

    /// Build and swap in a snapshot under the rebuild lock.
    ///
    /// `None` profiles reuse the cached ones; a `None` config keeps the one
    /// of the snapshot in service when the lock is taken.
    fn publish(
        &self,
        profiles: Option<SkillProfiles>,
        config: Option<RecommenderConfig>,
    ) -> Result<(), EngineError> {
        let _guard = self.rebuild.lock();
        let config = config.unwrap_or_else(|| self.config());
        let cached;
        let source: &SkillProfiles = match &profiles {
            Some(fresh) => fresh,
            None => {
                cached = Arc::clone(&self.profiles.read());
                &cached
            }
        };
        let snapshot = Snapshot::build(source, config)?;
        if let Some(fresh) = profiles {
            *self.profiles.write() = Arc::new(fresh);
        }
        *self.snapshot.write() = Arc::new(snapshot);
        Ok(())
    }

    /// Rebuild from the cached profiles with a new configuration.
    pub fn reconfigure(&self, config: RecommenderConfig) -> Result<(), EngineError> {
        info!(target: "skillrec::engine", "Reconfiguring recommender");
        self.publish(None, Some(config)).inspect_err(|err| {
            warn!(
                target: "skillrec::engine",
                error = %err,
                "Reconfiguration failed, keeping previous snapshot"
            );
        })
    }

    /// Re-fetch profiles and rebuild with the current configuration.
    pub fn refresh(&self) -> Result<(), EngineError> {
        info!(target: "skillrec::engine", "Refreshing skill data");
        let result = fetch(self.datasource.as_ref())
            .and_then(|profiles| self.publish(Some(profiles), None));
        result.inspect_err(|err| {
            warn!(
                target: "skillrec::engine",
                error = %err,
                "Refresh failed, keeping previous snapshot"
            );
        })
    }

    /// Hold a configuration until [`apply_staged`](Self::apply_staged).
    ///
    /// The staged value is validated now but queries keep using the
    /// current snapshot.
    pub fn stage_config(&self, config: RecommenderConfig) -> Result<(), EngineError> {
        config.validate()?;
        *self.staged.lock() = Some(config);
        Ok(())
    }

    /// Configuration waiting to be applied, if any.
    pub fn staged_config(&self) -> Option<RecommenderConfig> {
        self.staged.lock().clone()
    }

    /// Rebuild with the staged configuration.
    ///
    /// The staged value is consumed only when the rebuild succeeds, and only
    /// if it was not replaced by another [`stage_config`](Self::stage_config)
    /// while the rebuild ran.
    pub fn apply_staged(&self) -> Result<(), EngineError> {
        let config = self.staged.lock().clone().ok_or(EngineError::NothingStaged)?;
        self.reconfigure(config.clone())?;
        self.release_staged(&config);
        Ok(())
    }

    fn release_staged(&self, applied: &RecommenderConfig) {
        let mut staged = self.staged.lock();
        if staged.as_ref() == Some(applied) {
            *staged = None;
        } else if staged.is_some() {
            debug!(
                target: "skillrec::engine",
                "Staged configuration changed during rebuild, keeping it staged"
            );
        }
    }

    /// Recommend new skills, excluding the employee's history.
    pub fn recommend(
        &self,
        employee_id: EmployeeId,
        nb_recommendations: usize,
        nb_most_similar: usize,
    ) -> Result<SkillRecommendation, RecommendError> {
        self.recommend_ignoring(
            employee_id,
            nb_recommendations,
            nb_most_similar,
            std::iter::empty::<&str>(),
        )
    }

    /// Recommend new skills, excluding history and `ignored_skills`.
    pub fn recommend_ignoring<I, S>(
        &self,
        employee_id: EmployeeId,
        nb_recommendations: usize,
        nb_most_similar: usize,
        ignored_skills: I,
    ) -> Result<SkillRecommendation, RecommendError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut excluded: HashSet<String> = self.history.get_or_empty(employee_id);
        excluded.extend(ignored_skills.into_iter().map(|s| s.as_ref().to_string()));
        self.snapshot()
            .recommend(employee_id, nb_recommendations, nb_most_similar, &excluded)
    }

    /// Recommended skill names, or nothing when the employee has no data.
    pub fn recommendations_for(&self, employee_id: EmployeeId, limit: usize) -> Vec<String> {
        match self.recommend(employee_id, limit, 0) {
            Ok(rec) => rec.recommendation_list,
            Err(err) => {
                debug!(target: "skillrec::engine", employee_id, reason = %err, "Skipping employee");
                Vec::new()
            }
        }
    }

    /// Skills the employee already has.
    pub fn known_skills(&self, employee_id: EmployeeId) -> Vec<String> {
        self.snapshot().known_skills(employee_id)
    }

    /// Exclude a skill from the employee's future recommendations.
    pub fn record(&self, employee_id: EmployeeId, skill: impl Into<String>) {
        self.history.record(employee_id, skill);
    }

    /// Forget all recorded recommendations.
    pub fn clear_history(&self) {
        self.history.clear();
    }

    /// One-line explanation of a recommendation.
    pub fn explain(&self, recommendation: &SkillRecommendation) -> String {
        explain(recommendation)
    }
}
