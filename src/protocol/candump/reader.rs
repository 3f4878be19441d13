//! Line-oriented candump reader over any [`BufRead`] source.
//!
//! Logs copied between machines are not always valid UTF-8; lines are decoded
//! lossily so a stray byte in a comment or channel name does not abort the
//! whole file.
use std::io::BufRead;
use std::string::String;
use std::vec::Vec;

use crate::error::ReadError;
use crate::protocol::candump::CandumpRecord;

/// Iterator yielding one item per non-blank line.
pub struct CandumpReader<R: BufRead> {
    reader: R,
    line: usize,
    buffer: Vec<u8>,
}

impl<R: BufRead> CandumpReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buffer: Vec::new(),
        }
    }

    /// Number of lines consumed so far, blank ones included.
    pub fn line_number(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for CandumpReader<R> {
    type Item = Result<CandumpRecord, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(err) => return Some(Err(ReadError::Io(err))),
            }
            self.line += 1;

            let text = String::from_utf8_lossy(&self.buffer);
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            return Some(
                CandumpRecord::parse_line(text).map_err(|error| ReadError::Line {
                    line: self.line,
                    error,
                }),
            );
        }
    }
}

/// Read a whole log, stopping at the first line that cannot be decoded.
pub fn read_log<R: BufRead>(reader: R) -> Result<Vec<CandumpRecord>, ReadError> {
    CandumpReader::new(reader).collect()
}
