//! Output Generation
//!
//! Per-step state records, run logging, and JSON/CSV export.

pub mod log;
pub mod schemas;

pub use log::{capture_step, RunLog};
pub use schemas::*;
