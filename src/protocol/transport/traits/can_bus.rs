//! Minimal abstraction for an asynchronous CAN adapter. Allows the streamer to
//! plug into various implementations (embedded HAL, SocketCAN, PCAN, virtual
//! bus, etc.).
use core::convert::Infallible;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Receiver;
use futures_util::Future;

/// Contract to receive CAN frames asynchronously.
pub trait CanBus {
    /// Frame type produced by the driver.
    type Frame: embedded_can::Frame;
    type Error: core::fmt::Debug;
    /// Retrieve the next available frame. Asynchronously waits until data arrives.
    fn recv<'a>(&'a mut self) -> impl Future<Output = Result<Self::Frame, Self::Error>> + 'a;
}

/// Frames pushed into an [`embassy_sync::channel::Channel`] by a driver task
/// or an interrupt handler. The channel never closes, so reception never fails.
impl<'ch, M, F, const N: usize> CanBus for Receiver<'ch, M, F, N>
where
    M: RawMutex,
    F: embedded_can::Frame,
{
    type Frame = F;
    type Error = Infallible;

    fn recv<'a>(&'a mut self) -> impl Future<Output = Result<F, Infallible>> + 'a {
        async move { Ok(self.receive().await) }
    }
}
