//! `j1939-id` library: SAE J1939 CAN identifier codec for `no_std`
//! environments, plus the tooling built on top of it (candump log decoding,
//! PGN filtering, traffic summaries and live capture from an async adapter).
#![no_std]
//==================================================================================
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;
//==================================================================================
/// Domain errors (identifier decoding and mutation, candump parsing, analysis
/// configuration).
pub mod error;
/// Bit-level helpers shared by the identifier codec.
pub mod infra;
/// J1939 transport (frames, identifiers, adapters) and candump tooling.
pub mod protocol;
//==================================================================================
