#![cfg(feature = "std")]
//! End-to-end processing of a candump log: read, filter, summarize.
use j1939_id::error::{CandumpError, ReadError};
use j1939_id::protocol::analysis::{filter::filter_lines, PgnFilter, PgnSet, TrafficSummary};
use j1939_id::protocol::candump::reader::{read_log, CandumpReader};
use j1939_id::protocol::transport::can_id::NAME_PGN;

const LOG: &str = "\
(1610000000.000000) can0 18EEFF1C#A00F000000C00120
(1610000000.010000) can0 18EAFF00#00EE00
(1610000000.020000) can0 0CF00400#FFFF7DFFFFFFFFFF
(1610000000.030000) can0 0CF00400#FFFF7EFFFFFFFFFF

(1610000000.040000) can0 18FEF100#F7FFFF00FFFFFFFF
(1610000000.050000) can0 18EEFF00#0102030405060708
(1610000000.060000) can0 1CECFF00#20120003FFCAFE00
(1610000000.070000) can0 0CF00400#FFFF7FFFFFFFFFFF
(1610000000.080000) can0 100#DEAD
";

#[test]
/// Blank lines are skipped and every other line yields a record.
fn log_reads_every_record() {
    let records = read_log(LOG.as_bytes()).unwrap();
    assert_eq!(records.len(), 9);
    assert_eq!(records[0].timestamp, 1610000000.0);
    assert_eq!(records[8].id.to_hex(), "0100");
}

#[test]
/// Filtering on NAME and EEC1 keeps the matching lines in log order.
fn filter_log_by_pgn() {
    let records = read_log(LOG.as_bytes()).unwrap();
    let interest = PgnSet::from_decimal_strs(["60928", "61444"]).unwrap();

    let lines = filter_lines(&interest, &records);
    assert_eq!(
        lines,
        [
            "18EEFF1C#A00F000000C00120",
            "0CF00400#FFFF7DFFFFFFFFFF",
            "0CF00400#FFFF7EFFFFFFFFFF",
            "18EEFF00#0102030405060708",
            "0CF00400#FFFF7FFFFFFFFFFF",
        ]
    );

    let streamed: Vec<String> = PgnFilter::new(
        interest,
        CandumpReader::new(LOG.as_bytes()).map(Result::unwrap),
    )
    .lines()
    .collect();
    assert_eq!(streamed, lines);
}

#[test]
/// Summary groups by source, destination and PGN and lists NAME claims.
fn summarize_log() {
    let records = read_log(LOG.as_bytes()).unwrap();
    let summary = TrafficSummary::from_records(&records);

    assert_eq!(summary.message_count(), 9);
    assert_eq!(summary.messages(0x00, 0xFF, 61444).len(), 3);
    assert_eq!(summary.messages(0x00, 0xFF, 0xEA00).len(), 1);
    assert_eq!(summary.messages(0x00, 0xFF, 0xEC00).len(), 1);
    assert_eq!(summary.names().len(), 2);
    assert_eq!(summary.names()[&0x00], ["18EEFF00#0102030405060708"]);
    assert_eq!(summary.standard()[&0x00].len(), 1);

    let mut report = String::new();
    let interest: PgnSet = [NAME_PGN].into_iter().collect();
    summary.write_report(&mut report, &interest).unwrap();
    assert!(report.starts_with("NAME messages seen by src address:\n0:\n"));
    assert!(report.contains("\t |--- 61444\n\t |\t|---- 3\n"));
    assert!(report.contains("\t |\t\t18EEFF1C#A00F000000C00120\n"));
}

#[test]
/// A broken line stops the read and names its position.
fn broken_line_is_reported() {
    let log = "(1.0) can0 18EEFF1C#00\n(2.0) can0 18EEFF1C\n";
    match read_log(log.as_bytes()) {
        Err(ReadError::Line { line, error }) => {
            assert_eq!(line, 2);
            assert_eq!(error, CandumpError::MissingSeparator);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
