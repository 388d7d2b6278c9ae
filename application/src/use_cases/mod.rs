//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod answer_question;
pub mod error;
pub mod invoke_model;
pub mod reconcile;
pub mod run_ensemble;
pub mod run_failover;
pub mod run_weighted;
pub(crate) mod shared;

pub use shared::ReconcileInput;
