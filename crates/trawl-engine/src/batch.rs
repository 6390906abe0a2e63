//! Batch jobs and the job builder.

use serde::{Deserialize, Serialize};

use trawl_core::{Actor, SelectionKey, SelectionRequest, SelectionScope};

use crate::action::BulkAction;
use crate::listing::Listing;

/// Processing state of one work unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum UnitStatus {
    /// Not processed yet.
    Pending,
    /// The action executed for this unit.
    Done,
    /// The unit failed; the job continues with the rest.
    Failed { message: String },
}

/// One item/action pair, processed independently by the runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkUnit {
    /// Action to apply.
    pub action_id: String,

    /// Key of the item to apply it to.
    pub key: SelectionKey,

    /// Actor the unit was recorded for.
    pub actor_id: String,

    /// Processing state, owned by the runner.
    pub status: UnitStatus,
}

impl WorkUnit {
    fn new(action_id: &str, key: SelectionKey, actor_id: &str) -> Self {
        Self {
            action_id: action_id.to_string(),
            key,
            actor_id: actor_id.to_string(),
            status: UnitStatus::Pending,
        }
    }
}

/// An ordered, resumable sequence of work units.
///
/// Built once by [`build_batch_job`]; after that, mutated only by the one
/// runner that owns it, unit by unit. Serializable so hosts can persist a
/// partially processed job between processing windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchJob {
    /// Unique job id.
    pub id: String,

    /// Human-readable title for progress surfaces.
    pub title: String,

    /// Work units, execution order.
    pub units: Vec<WorkUnit>,
}

impl BatchJob {
    /// Total number of units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the job has no units at all.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Index of the first pending unit, if any.
    pub fn next_pending(&self) -> Option<usize> {
        self.units
            .iter()
            .position(|unit| unit.status == UnitStatus::Pending)
    }

    /// Number of units already processed, successfully or not.
    pub fn processed(&self) -> usize {
        self.units
            .iter()
            .filter(|unit| unit.status != UnitStatus::Pending)
            .count()
    }

    /// Whether every unit has been processed.
    pub fn is_complete(&self) -> bool {
        self.next_pending().is_none()
    }
}

/// Convert a selection into a batch job.
///
/// Current-page scope takes one unit per decoded key, submission order.
/// All-pages scope supersedes the submitted keys entirely: the listing is
/// re-run with pagination removed and a key is derived afresh from every
/// returned row, so the job covers the whole result set regardless of
/// what was displayed or ticked.
pub fn build_batch_job(
    request: &SelectionRequest,
    keys: &[SelectionKey],
    listing: &dyn Listing,
    action: &dyn BulkAction,
    actor: &Actor,
) -> BatchJob {
    let units: Vec<WorkUnit> = match request.scope {
        SelectionScope::CurrentPage => keys
            .iter()
            .map(|key| WorkUnit::new(action.id(), key.clone(), &actor.id))
            .collect(),
        SelectionScope::AllPages => {
            let use_revision = listing.uses_revisions();
            listing
                .rerun_unpaginated()
                .into_iter()
                .map(|row| WorkUnit::new(action.id(), row.selection_key(use_revision), &actor.id))
                .collect()
        }
    };

    let job = BatchJob {
        id: uuid::Uuid::new_v4().to_string(),
        title: format!("Apply action {} to selected items", action.label()),
        units,
    };
    tracing::info!("Built batch job {} with {} units", job.id, job.len());
    job
}
