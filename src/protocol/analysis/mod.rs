//! Log analysis on top of decoded candump records: PGN filtering and a
//! per-address traffic summary.
pub mod filter;
pub mod summary;

pub use filter::{PgnFilter, PgnSet};
pub use summary::TrafficSummary;
