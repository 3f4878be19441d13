//! J1939 identifier handling and the tooling built on it: candump logs,
//! PGN filtering, traffic summaries and live bus capture.
pub mod analysis;
pub mod candump;
pub mod transport;
