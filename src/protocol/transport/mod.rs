//! Transport layer: CAN frame representation, 11/29-bit identifier codec,
//! adapter traits and live capture.

pub mod can_frame;
pub mod can_id;
pub mod stream;
pub mod traits;
