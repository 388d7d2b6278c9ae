//! Multi-model answer reconciliation
//!
//! # Modes
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  Ensemble (default)                                              │
//! │    workers in parallel → tally → agreement? ─ yes → done         │
//! │                                        └─ no → judge → done      │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  Weighted                                                        │
//! │    workers in parallel → penalize confused answers               │
//! │      → consensus / primary / secondary / fallback / single       │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  Failover                                                        │
//! │    one model at a time → first success                           │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is pure; running the models is the application
//! layer's job.

pub mod ensemble;
pub mod mode;
pub mod phase;
pub mod resolution;
pub mod roster;
pub mod rule;
pub mod vote;
pub mod weighted;

pub use ensemble::{
    MIN_AGREEING_WORKERS, WorkerVerdict, decide_workers, most_confident, resolve_split,
    tally_results,
};
pub use mode::{ReconcileMode, VotingStrategy};
pub use phase::Phase;
pub use resolution::{Resolution, ResolutionMethod};
pub use roster::ModelRoster;
pub use rule::QuorumRule;
pub use vote::{ModelResult, TallyEntry, VoteTally};
pub use weighted::{
    UNRELIABLE_CONFIDENCE_CAP, UNRELIABLE_LETTER_COUNT, WeightedVote, reconcile_weighted,
};
