//! Batch job runner.
//!
//! Processes work units one at a time so large selections survive
//! interrupted processing windows: every unit is an independent
//! load → access check → execute step, safe to repeat on retry. Progress
//! is broadcast through a watch channel after every unit; mutation is
//! notification, subscribers never poll.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use trawl_core::{Actor, Diagnostic};

use crate::access::access_denied_message;
use crate::batch::{BatchJob, UnitStatus};
use crate::registry::ActionRegistry;
use crate::storage::{resolve_key, Storage};

/// Progress snapshot broadcast after every unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobProgress {
    /// Units processed so far, successfully or not.
    pub processed: usize,
    /// Units that failed.
    pub failed: usize,
    /// Total units in the job.
    pub total: usize,
}

/// Summary of a drained job.
#[derive(Debug)]
pub struct JobReport {
    /// Units whose action executed.
    pub applied: usize,
    /// One diagnostic per failed unit.
    pub diagnostics: Vec<Diagnostic>,
}

/// Processes a batch job unit by unit.
///
/// The runner owns the job for its lifetime; at most one runner processes
/// a given job at a time. A runner built over a partially processed job
/// resumes at the first pending unit, so hosts can persist the job
/// between windows via [`into_job`](Self::into_job) and build a fresh
/// runner later.
pub struct JobRunner {
    job: BatchJob,
    registry: Arc<ActionRegistry>,
    storage: Arc<dyn Storage>,
    actor: Actor,
    tx: watch::Sender<JobProgress>,
    rx: watch::Receiver<JobProgress>,
}

impl JobRunner {
    /// Create a runner over a job, resuming from prior progress if the
    /// job was partially processed.
    pub fn new(
        job: BatchJob,
        registry: Arc<ActionRegistry>,
        storage: Arc<dyn Storage>,
        actor: Actor,
    ) -> Self {
        let (tx, rx) = watch::channel(snapshot(&job));
        Self {
            job,
            registry,
            storage,
            actor,
            tx,
            rx,
        }
    }

    /// Subscribe to progress updates.
    ///
    /// Returns a receiver notified after every processed unit. Clone it
    /// for multiple subscribers.
    pub fn subscribe(&self) -> watch::Receiver<JobProgress> {
        self.rx.clone()
    }

    /// The job in its current state.
    pub fn job(&self) -> &BatchJob {
        &self.job
    }

    /// Current progress snapshot.
    pub fn progress(&self) -> JobProgress {
        *self.rx.borrow()
    }

    /// Process the next pending unit.
    ///
    /// Returns the unit's new status, or `None` when no pending units
    /// remain. Broadcasts progress after the unit settles.
    pub fn step(&mut self) -> Option<UnitStatus> {
        let index = self.job.next_pending()?;
        let status = self.run_unit(index);
        self.job.units[index].status = status.clone();

        let progress = snapshot(&self.job);
        let _ = self.tx.send(progress);
        tracing::debug!(
            "Job {}: processed unit {}/{}",
            self.job.id,
            progress.processed,
            progress.total
        );
        Some(status)
    }

    /// Drain every pending unit and summarize the job.
    pub fn run_to_completion(&mut self) -> JobReport {
        while self.step().is_some() {}

        let applied = self
            .job
            .units
            .iter()
            .filter(|unit| unit.status == UnitStatus::Done)
            .count();
        let diagnostics = self
            .job
            .units
            .iter()
            .filter_map(|unit| match &unit.status {
                UnitStatus::Failed { message } => Some(Diagnostic::error(message.clone())),
                _ => None,
            })
            .collect();
        JobReport {
            applied,
            diagnostics,
        }
    }

    /// Hand the job back, e.g. to persist it between processing windows.
    pub fn into_job(self) -> BatchJob {
        self.job
    }

    /// Load, check access, execute for a single unit.
    fn run_unit(&self, index: usize) -> UnitStatus {
        let unit = &self.job.units[index];

        if unit.actor_id != self.actor.id {
            return UnitStatus::Failed {
                message: format!(
                    "unit recorded for actor '{}', runner is '{}'",
                    unit.actor_id, self.actor.id
                ),
            };
        }

        let Some(action) = self.registry.get(&unit.action_id) else {
            return UnitStatus::Failed {
                message: format!("unknown action '{}'", unit.action_id),
            };
        };

        let Some(item) = resolve_key(self.storage.as_ref(), &unit.key) else {
            return UnitStatus::Failed {
                message: format!("Selected item {} no longer exists.", unit.key.id),
            };
        };

        if !action.access(&item, &self.actor) {
            return UnitStatus::Failed {
                message: access_denied_message(action.as_ref(), &item),
            };
        }

        match action.execute(std::slice::from_ref(&item)) {
            Ok(()) => UnitStatus::Done,
            Err(err) => {
                tracing::error!(
                    "Action '{}' failed on item {}: {}",
                    action.id(),
                    item.id,
                    err
                );
                UnitStatus::Failed {
                    message: err.to_string(),
                }
            }
        }
    }
}

fn snapshot(job: &BatchJob) -> JobProgress {
    let failed = job
        .units
        .iter()
        .filter(|unit| matches!(unit.status, UnitStatus::Failed { .. }))
        .count();
    JobProgress {
        processed: job.processed(),
        failed,
        total: job.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use trawl_core::{
        ActionError, Actor, Item, SelectionKey, SelectionRequest, SelectionScope,
    };

    use crate::action::BulkAction;
    use crate::batch::build_batch_job;
    use crate::listing::Listing;
    use crate::storage::Storage;

    struct CountingAction {
        denied: Vec<String>,
        fail_on: Option<String>,
        executed: Mutex<Vec<String>>,
    }

    impl CountingAction {
        fn arc() -> Arc<Self> {
            Arc::new(Self {
                denied: Vec::new(),
                fail_on: None,
                executed: Mutex::new(Vec::new()),
            })
        }

        fn denying(denied: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                denied: denied.iter().map(|id| id.to_string()).collect(),
                fail_on: None,
                executed: Mutex::new(Vec::new()),
            })
        }

        fn failing_on(id: &str) -> Arc<Self> {
            Arc::new(Self {
                denied: Vec::new(),
                fail_on: Some(id.to_string()),
                executed: Mutex::new(Vec::new()),
            })
        }

        fn executed(&self) -> Vec<String> {
            self.executed.lock().unwrap().clone()
        }
    }

    impl BulkAction for CountingAction {
        fn id(&self) -> &str {
            "publish"
        }
        fn label(&self) -> &str {
            "Publish"
        }
        fn resource_type(&self) -> &str {
            "node"
        }
        fn access(&self, item: &Item, _actor: &Actor) -> bool {
            !self.denied.contains(&item.id)
        }
        fn execute(&self, items: &[Item]) -> Result<(), ActionError> {
            // Batched mode hands over exactly one item per call.
            assert_eq!(items.len(), 1);
            if self.fail_on.as_deref() == Some(items[0].id.as_str()) {
                return Err(ActionError::new("simulated fault"));
            }
            self.executed.lock().unwrap().push(items[0].id.clone());
            Ok(())
        }
    }

    struct MapStorage {
        items: HashMap<String, Item>,
    }

    impl MapStorage {
        fn with_items(ids: &[&str]) -> Arc<Self> {
            let items = ids
                .iter()
                .map(|id| {
                    (
                        id.to_string(),
                        Item::new(*id, format!("Item {id}"), "en", "node"),
                    )
                })
                .collect();
            Arc::new(Self { items })
        }
    }

    impl Storage for MapStorage {
        fn load(&self, id: &str, _locale: &str) -> Option<Item> {
            self.items.get(id).cloned()
        }
        fn load_revision(&self, _revision: &str, _locale: &str) -> Option<Item> {
            None
        }
    }

    struct EmptyListing;

    impl Listing for EmptyListing {
        fn resource_type(&self) -> &str {
            "node"
        }
        fn current_page(&self) -> Vec<Item> {
            Vec::new()
        }
        fn rerun_unpaginated(&self) -> Vec<Item> {
            Vec::new()
        }
        fn total_count(&self) -> usize {
            0
        }
        fn page_size(&self) -> usize {
            0
        }
    }

    fn actor() -> Actor {
        Actor::new("10", "editor")
    }

    fn job_for(action: &dyn BulkAction, ids: &[&str]) -> BatchJob {
        let tokens: Vec<String> = ids.iter().map(|id| format!("en-{id}")).collect();
        let request =
            SelectionRequest::new(action.id(), tokens, SelectionScope::CurrentPage);
        let keys: Vec<SelectionKey> = ids
            .iter()
            .map(|id| SelectionKey::new("en", *id))
            .collect();
        build_batch_job(&request, &keys, &EmptyListing, action, &actor())
    }

    fn runner_for(action: Arc<CountingAction>, storage: Arc<MapStorage>, ids: &[&str]) -> JobRunner {
        let registry = Arc::new(ActionRegistry::new());
        registry.register(action.clone()).unwrap();
        let job = job_for(action.as_ref(), ids);
        JobRunner::new(job, registry, storage, actor())
    }

    #[test]
    fn test_run_to_completion_applies_every_unit() {
        let action = CountingAction::arc();
        let storage = MapStorage::with_items(&["1", "2", "3"]);
        let mut runner = runner_for(action.clone(), storage, &["1", "2", "3"]);

        let report = runner.run_to_completion();

        assert_eq!(report.applied, 3);
        assert!(report.diagnostics.is_empty());
        assert_eq!(action.executed(), vec!["1", "2", "3"]);
        assert!(runner.job().is_complete());
    }

    #[test]
    fn test_missing_item_fails_unit_and_job_continues() {
        let action = CountingAction::arc();
        let storage = MapStorage::with_items(&["2"]);
        let mut runner = runner_for(action.clone(), storage, &["1", "2"]);

        let report = runner.run_to_completion();

        assert_eq!(report.applied, 1);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report.diagnostics[0].message.contains("no longer exists"));
        assert_eq!(action.executed(), vec!["2"]);

        let progress = runner.progress();
        assert_eq!(
            progress,
            JobProgress {
                processed: 2,
                failed: 1,
                total: 2
            }
        );
    }

    #[test]
    fn test_access_denied_fails_unit_without_executing() {
        let action = CountingAction::denying(&["1"]);
        let storage = MapStorage::with_items(&["1", "2"]);
        let mut runner = runner_for(action.clone(), storage, &["1", "2"]);

        let report = runner.run_to_completion();

        assert_eq!(report.applied, 1);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report.diagnostics[0]
            .message
            .starts_with("No access to execute"));
        assert_eq!(action.executed(), vec!["2"]);
    }

    #[test]
    fn test_action_fault_is_isolated_to_its_unit() {
        let action = CountingAction::failing_on("2");
        let storage = MapStorage::with_items(&["1", "2", "3"]);
        let mut runner = runner_for(action.clone(), storage, &["1", "2", "3"]);

        let report = runner.run_to_completion();

        assert_eq!(report.applied, 2);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].message, "simulated fault");
        assert_eq!(action.executed(), vec!["1", "3"]);
    }

    #[test]
    fn test_step_broadcasts_progress_per_unit() {
        let action = CountingAction::arc();
        let storage = MapStorage::with_items(&["1", "2"]);
        let mut runner = runner_for(action, storage, &["1", "2"]);
        let rx = runner.subscribe();

        assert_eq!(*rx.borrow(), JobProgress { processed: 0, failed: 0, total: 2 });

        assert_eq!(runner.step(), Some(UnitStatus::Done));
        assert_eq!(*rx.borrow(), JobProgress { processed: 1, failed: 0, total: 2 });

        assert_eq!(runner.step(), Some(UnitStatus::Done));
        assert_eq!(runner.step(), None);
        assert_eq!(*rx.borrow(), JobProgress { processed: 2, failed: 0, total: 2 });
    }

    #[test]
    fn test_resume_skips_already_processed_units() {
        let action = CountingAction::arc();
        let storage = MapStorage::with_items(&["1", "2"]);
        let mut first = runner_for(action.clone(), storage.clone(), &["1", "2"]);

        // First window processes one unit, then the host persists the job.
        first.step();
        let job = first.into_job();
        assert_eq!(job.processed(), 1);

        let registry = Arc::new(ActionRegistry::new());
        registry.register(action.clone()).unwrap();
        let mut second = JobRunner::new(job, registry, storage, actor());

        assert_eq!(second.progress().processed, 1);
        let report = second.run_to_completion();

        // Only the remaining unit ran in the second window.
        assert_eq!(report.applied, 2);
        assert_eq!(action.executed(), vec!["1", "2"]);
    }

    #[test]
    fn test_unit_for_other_actor_fails() {
        let action = CountingAction::arc();
        let storage = MapStorage::with_items(&["1"]);
        let registry = Arc::new(ActionRegistry::new());
        registry.register(action.clone()).unwrap();
        let job = job_for(action.as_ref(), &["1"]);

        let other = Actor::new("99", "intruder");
        let mut runner = JobRunner::new(job, registry, storage, other);
        let report = runner.run_to_completion();

        assert_eq!(report.applied, 0);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(action.executed().is_empty());
    }
}
