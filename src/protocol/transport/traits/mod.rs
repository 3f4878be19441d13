//! Abstraction traits used by the bus streamer (CAN adapter and clock).
pub mod can_bus;
pub mod clock;
