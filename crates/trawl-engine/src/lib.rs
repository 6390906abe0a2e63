//! Bulk Operations Engine
//!
//! The engine applies a chosen action to a selection captured from a
//! paginated listing:
//! - Action registry and catalog (direct vs. configurable variants)
//! - Per-item access filtering
//! - Batch job building and resumable unit-by-unit execution
//! - Synchronous submission
//!
//! ## Submission flow
//!
//! ```text
//! SelectionRequest
//!        │
//!        ▼
//! ┌──────────────────┐
//! │ validate          │  empty selection rejected before
//! │ (any keys?)       │  anything is resolved or loaded
//! └────────┬─────────┘
//!          │
//!          ▼
//! decode tokens ──▶ diagnostics for malformed keys
//!          │
//!          ▼
//! catalog.resolve(action_id)
//!     ┌────┴───────────────┐
//!     │                    │
//!     ▼                    ▼
//! Configurable          Direct
//!     │             ┌─────┴──────┐
//!     ▼             ▼            ▼
//! stash selection   batching     synchronous
//! + redirect to     BatchJob     load → access filter → execute
//! configure route      │               │
//!                      ▼               ▼
//!                  JobRunner      redirect │ message
//! ```

mod access;
mod action;
mod batch;
mod catalog;
mod engine;
mod listing;
mod registry;
mod runner;
mod storage;
mod store;

pub use access::{filter_by_access, AccessDecision, Rejection};
pub use action::BulkAction;
pub use batch::{build_batch_job, BatchJob, UnitStatus, WorkUnit};
pub use catalog::{ActionCatalog, ActionChoice, CONFIGURABLE_PREFIX};
pub use engine::{BulkEngine, Submitted, CONFIGURE_ROUTE};
pub use listing::Listing;
pub use registry::{ActionRegistry, RegistryError};
pub use runner::{JobProgress, JobReport, JobRunner};
pub use storage::{resolve_key, Storage};
pub use store::{MemoryParameterStore, ParameterPayload, ParameterStore};
