//! Codec building blocks (bit-range access on identifier words).
pub mod bits;
