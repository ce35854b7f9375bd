//! srctrack - Source Code Tracker
//!
//! srctrack keeps a running tally of where your code comes from. You declare
//! a just-edited or just-pasted block as manually written, copied or
//! AI-generated, and per-category character counts accumulate for display
//! as percentages.
//!
//! ## Input Methods
//!
//! 1. **CLI**: `srctrack declare` counts a file (or stdin, or an explicit
//!    `--chars` value) and records it under the chosen category.
//!
//! 2. **IDE extensions**: `srctrack serve` runs a local HTTP endpoint that
//!    editors POST selection declarations to.

pub mod config;
pub mod server;
pub mod stats;

pub use stats::{CodeStats, SourceKind, StatsManager};
