//! `matcheck-recon` — baseline-to-downstream materials reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded records, returns per-record match
//! outcomes plus summary counters. No file paths or presentation dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod evaluate;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod similarity;
pub mod summary;

pub use config::ReconcileConfig;
pub use engine::run;
pub use error::ReconcileError;
pub use model::{MatchOutcome, ReconcileInput, ReconcileResult, Record};
