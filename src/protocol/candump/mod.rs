//! candump log lines (`candump -l` / `candump -L` output).
//!
//! ```text
//! (1610000.123456) can0 18FEF100#0102030405060708
//!  \_ timestamp _/ \ch/ \_ id _/ \___ payload ___/
//! ```
//!
//! The payload text is kept as written; only the identifier is decoded.
use alloc::string::String;
use core::fmt;

use crate::error::CandumpError;
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::can_id::Identifier;

#[cfg(feature = "std")]
pub mod reader;

/// Channel used when a frame source does not name its interface.
pub const DEFAULT_CHANNEL: &str = "can";

//==================================================================================CANDUMP_RECORD
#[derive(Clone, Debug, PartialEq)]
/// One decoded candump line.
pub struct CandumpRecord {
    /// Reception time in seconds.
    pub timestamp: f64,
    /// Interface name (`can0`, `vcan0`, ...).
    pub channel: String,
    pub id: Identifier,
    /// Payload hex digits exactly as logged.
    pub data: String,
}

impl CandumpRecord {
    /// Decode a line such as `(1610000.123456) can0 18FEF100#0102030405060708`.
    pub fn parse_line(line: &str) -> Result<Self, CandumpError> {
        let mut parts = line.split_ascii_whitespace();

        let timestamp = parts
            .next()
            .ok_or(CandumpError::MissingField { field: "timestamp" })?;
        let timestamp = strip_outer_brackets(timestamp, '(', ')')
            .parse::<f64>()
            .map_err(|_| CandumpError::InvalidTimestamp)?;

        let channel = parts
            .next()
            .ok_or(CandumpError::MissingField { field: "channel" })?;
        let frame = parts
            .next()
            .ok_or(CandumpError::MissingField { field: "frame" })?;
        if parts.next().is_some() {
            return Err(CandumpError::UnexpectedField);
        }

        let (id, data) = frame
            .split_once('#')
            .ok_or(CandumpError::MissingSeparator)?;

        Ok(Self {
            timestamp,
            channel: String::from(channel),
            id: Identifier::from_hex(id)?,
            data: String::from(data),
        })
    }

    /// Record for a frame received from a live bus.
    pub fn from_frame(timestamp: f64, channel: &str, frame: &CanFrame) -> Self {
        Self {
            timestamp,
            channel: String::from(channel),
            id: frame.id,
            data: frame.payload_hex(),
        }
    }

    /// `ID#DATA` part of the line, the unit reported by filters and summaries.
    pub fn frame_text(&self) -> String {
        alloc::format!("{}#{}", self.id, self.data)
    }
}

impl fmt::Display for CandumpRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.6}) {} {}#{}",
            self.timestamp, self.channel, self.id, self.data
        )
    }
}

impl core::str::FromStr for CandumpRecord {
    type Err = CandumpError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        Self::parse_line(line)
    }
}

fn strip_outer_brackets(field: &str, first: char, last: char) -> &str {
    let field = field.strip_prefix(first).unwrap_or(field);
    field.strip_suffix(last).unwrap_or(field)
}
