//! # PGN report
//!
//! Read a candump log, print the lines carrying the PGNs given on the command
//! line, then the per-source traffic breakdown.
//!
//! ```bash
//! cargo run --example pgn_report -- candump.log 60928 61444
//! ```

use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use j1939_id::protocol::analysis::{filter::filter_lines, PgnSet, TrafficSummary};
use j1939_id::protocol::candump::reader::read_log;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: pgn_report <candump.log> [pgn ...]");
        return ExitCode::FAILURE;
    };

    let interest = match PgnSet::from_decimal_strs(args) {
        Ok(set) => set,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let records = match File::open(&path)
        .map_err(Into::into)
        .and_then(|file| read_log(BufReader::new(file)))
    {
        Ok(records) => records,
        Err(err) => {
            eprintln!("{path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    if !interest.is_empty() {
        for line in filter_lines(&interest, &records) {
            println!("{line}");
        }
        println!();
    }

    let summary = TrafficSummary::from_records(&records);
    let mut report = String::new();
    if let Err(err) = summary.write_report(&mut report, &interest) {
        eprintln!("report: {err}");
        return ExitCode::FAILURE;
    }
    print!("{report}");
    println!("msgs seen: {}", summary.message_count());
    ExitCode::SUCCESS
}
