//! Time source used to stamp frames received from a live bus.

/// Reception clock, in seconds.
///
/// Desktop implementations usually return seconds since the Unix epoch, as
/// `candump -l` does; embedded ones may count from boot.
pub trait Clock {
    fn now(&mut self) -> f64;
}
