//! Live capture: frames received from a CAN adapter rendered as candump
//! records, one per frame, in reception order.
//!
//! ```rust,ignore
//! let mut stream = CandumpStream::new(bus, clock, StreamConfig::default());
//! loop {
//!     match stream.next_record().await {
//!         Ok(record) => println!("{record}"),
//!         Err(err) => break,
//!     }
//! }
//! println!("msgs seen: {}", stream.frames_seen());
//! ```
use alloc::string::String;

use futures_util::stream::Stream;

use crate::protocol::candump::{CandumpRecord, DEFAULT_CHANNEL};
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::traits::{can_bus::CanBus, clock::Clock};

//==================================================================================STREAM_CONFIG
#[derive(Clone, Debug, PartialEq, Eq)]
/// Streamer settings.
pub struct StreamConfig {
    /// Channel name written in every record.
    pub channel: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            channel: String::from(DEFAULT_CHANNEL),
        }
    }
}

impl StreamConfig {
    pub fn with_channel(channel: &str) -> Self {
        Self {
            channel: String::from(channel),
        }
    }
}

//==================================================================================CANDUMP_STREAM
/// Receives frames from a [`CanBus`] and stamps them with a [`Clock`].
pub struct CandumpStream<B, C> {
    bus: B,
    clock: C,
    config: StreamConfig,
    frames_seen: usize,
}

impl<B: CanBus, C: Clock> CandumpStream<B, C> {
    pub fn new(bus: B, clock: C, config: StreamConfig) -> Self {
        Self {
            bus,
            clock,
            config,
            frames_seen: 0,
        }
    }

    /// Number of frames received so far.
    pub fn frames_seen(&self) -> usize {
        self.frames_seen
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Give the adapter and the clock back, e.g. to shut the adapter down.
    pub fn into_parts(self) -> (B, C) {
        (self.bus, self.clock)
    }

    /// Wait for the next frame and convert it.
    ///
    /// The timestamp is taken when the frame is handed over by the adapter.
    pub async fn next_record(&mut self) -> Result<CandumpRecord, B::Error> {
        let frame = self.bus.recv().await?;
        let timestamp = self.clock.now();
        self.frames_seen += 1;

        let frame = CanFrame::from_frame(&frame);
        #[cfg(feature = "defmt")]
        defmt::trace!("Frame {} received ({} seen)", frame.id, self.frames_seen);

        Ok(CandumpRecord::from_frame(
            timestamp,
            &self.config.channel,
            &frame,
        ))
    }

    /// Endless stream of records; it ends right after yielding the first
    /// adapter error.
    pub fn into_stream(self) -> impl Stream<Item = Result<CandumpRecord, B::Error>> {
        futures_util::stream::unfold(Some(self), |state| async move {
            let mut stream = state?;
            match stream.next_record().await {
                Ok(record) => Some((Ok(record), Some(stream))),
                Err(err) => Some((Err(err), None)),
            }
        })
    }
}
