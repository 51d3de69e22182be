//! Signal generation: indicator snapshot, strategy selection, confidence
//! scoring and price levels.

pub mod decision;
pub mod engine;
pub mod scoring;
pub mod snapshot;
pub mod summary;

pub use decision::StopLossTakeProfit;
pub use engine::{SignalGenerator, SignalOutcome, MIN_BARS};
pub use scoring::calculate_confidence;
pub use snapshot::build_snapshot;
pub use summary::summarize;
