//! In-memory representation of a classical CAN frame carrying a J1939 identifier.
use alloc::string::String;
use core::fmt::Write;

use crate::protocol::transport::can_id::Identifier;

/// Largest classical CAN payload.
pub const MAX_DATA_LEN: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Frame as read from the bus or from a log.
pub struct CanFrame {
    /// 11- or 29-bit arbitration identifier.
    pub id: Identifier,
    /// Payload buffer. Only the first `len` bytes are meaningful.
    pub data: [u8; MAX_DATA_LEN],
    /// Number of valid payload bytes (Data Length Code, 0 to 8).
    pub len: usize,
    /// Remote transmission request: no payload, `len` is the requested DLC.
    pub remote: bool,
}

impl CanFrame {
    /// Data frame; `None` when the payload exceeds eight bytes.
    pub fn new(id: impl Into<Identifier>, payload: &[u8]) -> Option<Self> {
        if payload.len() > MAX_DATA_LEN {
            return None;
        }
        let mut data = [0u8; MAX_DATA_LEN];
        data[..payload.len()].copy_from_slice(payload);
        Some(Self {
            id: id.into(),
            data,
            len: payload.len(),
            remote: false,
        })
    }

    /// Copy any `embedded-can` frame, keeping its identifier format.
    pub fn from_frame<F: embedded_can::Frame>(frame: &F) -> Self {
        let mut data = [0u8; MAX_DATA_LEN];
        let payload = frame.data();
        let copied = payload.len().min(MAX_DATA_LEN);
        data[..copied].copy_from_slice(&payload[..copied]);
        Self {
            id: frame.id().into(),
            data,
            len: if frame.is_remote_frame() {
                frame.dlc().min(MAX_DATA_LEN)
            } else {
                copied
            },
            remote: frame.is_remote_frame(),
        }
    }

    /// Populated payload bytes (empty for remote frames).
    #[inline]
    pub fn data(&self) -> &[u8] {
        if self.remote {
            &[]
        } else {
            &self.data[..self.len]
        }
    }

    #[inline]
    pub fn dlc(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_remote(&self) -> bool {
        self.remote
    }

    /// Payload in candump notation: lowercase hex pairs, or `R` for a remote
    /// frame.
    pub fn payload_hex(&self) -> String {
        if self.remote {
            return String::from("R");
        }
        let mut text = String::with_capacity(self.len * 2);
        for byte in self.data() {
            // Writing into a String cannot fail.
            let _ = write!(text, "{byte:02x}");
        }
        text
    }
}
