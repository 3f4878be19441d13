//! Traffic breakdown of a log: messages grouped by source address,
//! destination address and PGN, plus the NAME (address claim) messages seen
//! per source.
//!
//! ```text
//! sa ─┬─ da ─┬─ pgn ── [ "ID#DATA", ... ]
//!     │      └─ pgn ── [ ... ]
//!     └─ da ── ...
//! ```
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;

use crate::protocol::analysis::filter::PgnSet;
use crate::protocol::candump::CandumpRecord;
use crate::protocol::transport::can_id::{Identifier, NAME_PGN};

/// Messages per PGN.
pub type ByPgn = BTreeMap<u32, Vec<String>>;
/// Messages per destination address, then PGN.
pub type ByDestination = BTreeMap<u8, ByPgn>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Grouped view over a set of candump records.
pub struct TrafficSummary {
    by_source: BTreeMap<u8, ByDestination>,
    standard: BTreeMap<u8, Vec<String>>,
    names: BTreeMap<u8, Vec<String>>,
    messages: usize,
}

impl TrafficSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summarize every record of an iterator.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<CandumpRecord>,
    {
        let mut summary = Self::new();
        for record in records {
            summary.add(Borrow::<CandumpRecord>::borrow(&record));
        }
        summary
    }

    /// Account for one record.
    ///
    /// CEFF records are filed under `sa → da → pgn`; CBFF records, which have
    /// neither destination nor PGN, are filed under their source address only.
    pub fn add(&mut self, record: &CandumpRecord) {
        self.messages += 1;
        let text = record.frame_text();
        match record.id {
            Identifier::Extended(id) => {
                if id.pgn() == NAME_PGN {
                    self.names.entry(id.sa()).or_default().push(text.clone());
                }
                self.by_source
                    .entry(id.sa())
                    .or_default()
                    .entry(id.da())
                    .or_default()
                    .entry(id.pgn())
                    .or_default()
                    .push(text);
            }
            Identifier::Standard(id) => {
                self.standard.entry(id.sa()).or_default().push(text);
            }
        }
    }

    /// Total number of records added.
    pub fn message_count(&self) -> usize {
        self.messages
    }

    /// CEFF messages grouped by source, destination and PGN.
    pub fn by_source(&self) -> &BTreeMap<u8, ByDestination> {
        &self.by_source
    }

    /// Messages exchanged from `sa` to `da` with the given PGN.
    pub fn messages(&self, sa: u8, da: u8, pgn: u32) -> &[String] {
        self.by_source
            .get(&sa)
            .and_then(|by_da| by_da.get(&da))
            .and_then(|by_pgn| by_pgn.get(&pgn))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// CBFF messages grouped by source address.
    pub fn standard(&self) -> &BTreeMap<u8, Vec<String>> {
        &self.standard
    }

    /// Address claim (NAME) messages grouped by source address.
    pub fn names(&self) -> &BTreeMap<u8, Vec<String>> {
        &self.names
    }

    /// Render the breakdown; messages whose PGN is in `interest` are listed
    /// below their count.
    pub fn write_report<W: fmt::Write>(&self, out: &mut W, interest: &PgnSet) -> fmt::Result {
        writeln!(out, "NAME messages seen by src address:")?;
        for (sa, messages) in &self.names {
            writeln!(out, "{sa}:")?;
            for message in messages {
                writeln!(out, "    {message}")?;
            }
        }
        writeln!(out)?;

        writeln!(out, "Breakdown of messages in log")?;
        writeln!(out, "src\tda\tpgn\tmsg_count")?;
        writeln!(out, "=================================")?;
        for (sa, by_da) in &self.by_source {
            writeln!(out, "{sa}")?;
            writeln!(out, "|-------|")?;
            for (da, by_pgn) in by_da {
                writeln!(out, "\t{da}\n\t |")?;
                for (pgn, messages) in by_pgn {
                    writeln!(out, "\t |--- {pgn}\n\t |\t|---- {}", messages.len())?;
                    if interest.contains(*pgn) {
                        for message in messages {
                            writeln!(out, "\t |\t\t{message}")?;
                        }
                    }
                }
            }
        }

        if !self.standard.is_empty() {
            writeln!(out)?;
            writeln!(out, "CBFF messages by src address")?;
            writeln!(out, "src\tmsg_count")?;
            writeln!(out, "=================================")?;
            for (sa, messages) in &self.standard {
                writeln!(out, "{sa}\t{}", messages.len())?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for TrafficSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_report(f, &PgnSet::new())
    }
}
