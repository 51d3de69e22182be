//! Evaluation cycle: fetch histories, generate signals, store them.

pub mod context;
pub mod pipeline;

pub use context::JobContext;
pub use pipeline::{CycleReport, EvaluationCycle, SkippedInstrument};
