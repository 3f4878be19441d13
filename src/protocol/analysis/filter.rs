//! Select records whose PGN belongs to a list of interest.
use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::borrow::Borrow;

use crate::error::AnalysisError;
use crate::protocol::candump::CandumpRecord;
use crate::protocol::transport::can_id::PGN_MAX;

//==================================================================================PGN_SET
#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// PGNs of interest.
pub struct PgnSet(BTreeSet<u32>);

impl PgnSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse decimal PGN tokens as typed on a command line (`"60928"`).
    /// Blank tokens, as left by an empty answer or doubled separators, are
    /// skipped.
    pub fn from_decimal_strs<I, S>(tokens: I) -> Result<Self, AnalysisError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .filter(|token| !token.as_ref().trim().is_empty())
            .map(|token| {
                let token = token.as_ref().trim();
                token
                    .parse::<u32>()
                    .ok()
                    .filter(|pgn| *pgn <= PGN_MAX)
                    .ok_or_else(|| AnalysisError::InvalidPgnToken {
                        token: token.to_string(),
                    })
            })
            .collect()
    }

    pub fn insert(&mut self, pgn: u32) -> bool {
        self.0.insert(pgn)
    }

    pub fn contains(&self, pgn: u32) -> bool {
        self.0.contains(&pgn)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the record is a CEFF frame carrying one of the PGNs.
    /// CBFF records have no PGN and never match.
    pub fn matches(&self, record: &CandumpRecord) -> bool {
        record.id.pgn().is_ok_and(|pgn| self.contains(pgn))
    }
}

impl FromIterator<u32> for PgnSet {
    fn from_iter<T: IntoIterator<Item = u32>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

//==================================================================================PGN_FILTER
/// Iterator adapter keeping only the records matching a [`PgnSet`].
pub struct PgnFilter<I> {
    interest: PgnSet,
    records: I,
}

impl<I> PgnFilter<I>
where
    I: Iterator,
    I::Item: Borrow<CandumpRecord>,
{
    pub fn new(interest: PgnSet, records: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            interest,
            records: records.into_iter(),
        }
    }

    /// Matching records as `ID#DATA` lines.
    pub fn lines(self) -> impl Iterator<Item = String> {
        self.map(|record| Borrow::<CandumpRecord>::borrow(&record).frame_text())
    }
}

impl<I> Iterator for PgnFilter<I>
where
    I: Iterator,
    I::Item: Borrow<CandumpRecord>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let interest = &self.interest;
        self.records
            .by_ref()
            .find(|record| interest.matches(Borrow::<CandumpRecord>::borrow(record)))
    }
}

/// Collect the `ID#DATA` lines of every record whose PGN is in `interest`.
pub fn filter_lines<'a>(
    interest: &PgnSet,
    records: impl IntoIterator<Item = &'a CandumpRecord>,
) -> Vec<String> {
    records
        .into_iter()
        .filter(|record| interest.matches(record))
        .map(CandumpRecord::frame_text)
        .collect()
}

//==================================================================================FILTER_CONFIG
/// Configuration file of the PGN filter tool.
///
/// ```json
/// { "path": "logs/candump.log", "pgns": ["60928", "65265"] }
/// ```
#[cfg(feature = "serde")]
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct FilterConfig {
    /// Log file to read.
    pub path: String,
    /// Decimal PGNs of interest.
    pub pgns: Vec<String>,
}

#[cfg(feature = "serde")]
impl FilterConfig {
    pub fn pgn_set(&self) -> Result<PgnSet, AnalysisError> {
        PgnSet::from_decimal_strs(&self.pgns)
    }
}

//==================================================================================TESTS
#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<CandumpRecord> {
        [
            "(1.0) can0 18EEFF1C#0102030405060708",
            "(2.0) can0 0CF00401#FFFF",
            "(3.0) can0 123#00",
            "(4.0) can0 18EA2300#00EE00",
            "(5.0) can0 18EEFF2D#0807060504030201",
        ]
        .iter()
        .map(|line| CandumpRecord::parse_line(line).unwrap())
        .collect()
    }

    #[test]
    /// Decimal tokens parse, anything else is reported.
    fn test_pgn_set_parsing() {
        let set = PgnSet::from_decimal_strs(["60928", " 61444 "]).unwrap();
        assert!(set.contains(60928));
        assert!(set.contains(61444));
        assert_eq!(set.len(), 2);

        assert_eq!(
            PgnSet::from_decimal_strs(["60928", "0xEE00"]).unwrap_err(),
            AnalysisError::InvalidPgnToken {
                token: "0xEE00".to_string()
            }
        );
        assert!(PgnSet::from_decimal_strs(["16777216"]).is_err());
    }

    #[test]
    /// Blank tokens are ignored instead of failing the whole list.
    fn test_pgn_set_skips_blank_tokens() {
        let set = PgnSet::from_decimal_strs([""]).unwrap();
        assert!(set.is_empty());

        let set = PgnSet::from_decimal_strs("60928  61444 ".split(' ')).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(61444));
    }

    #[test]
    /// Only CEFF records with a PGN of interest pass.
    fn test_filter_records() {
        let records = records();
        let interest: PgnSet = [60928].into_iter().collect();
        let lines: Vec<String> = PgnFilter::new(interest, &records).lines().collect();
        assert_eq!(
            lines,
            ["18EEFF1C#0102030405060708", "18EEFF2D#0807060504030201"]
        );
    }

    #[test]
    /// Owned records flow through the adapter as well.
    fn test_filter_owned_records() {
        let interest: PgnSet = [0xEA00].into_iter().collect();
        let matched: Vec<CandumpRecord> = PgnFilter::new(interest, records()).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].timestamp, 4.0);
    }

    #[test]
    /// Empty interest list keeps nothing.
    fn test_filter_lines_helper() {
        let records = records();
        assert!(filter_lines(&PgnSet::new(), &records).is_empty());
        let interest: PgnSet = [61444].into_iter().collect();
        assert_eq!(filter_lines(&interest, &records), ["0CF00401#FFFF"]);
    }
}
