//! # Quickstart Example
//!
//! Minimal tour of j1939-id:
//! - Decode a 29-bit identifier from candump text
//! - Build one from its parts and retarget it
//! - Work with an 11-bit identifier
//!
//! ```bash
//! cargo run --example quickstart
//! ```

use j1939_id::protocol::transport::can_id::{DestinationWrite, ExtendedIdentifier, Identifier};

fn main() {
    println!("=== j1939-id Quickstart ===\n");

    // ======================================================================
    // 1. Decode an identifier read from a log
    // ======================================================================
    println!("1. Decoding 18EEFF1C");

    let id: Identifier = "18EEFF1C".parse().expect("valid identifier");
    println!("   {}", id.summary_line());
    println!("   Binary: {}", id.to_binary_string());
    for (field, value) in id.as_map() {
        println!("   {field:>9}: {value}");
    }
    println!();

    // ======================================================================
    // 2. Build a request for the address claim and retarget it
    // ======================================================================
    println!("2. Building a Request (PGN 59904) from 0x80 to 0x23");

    let mut request = ExtendedIdentifier::builder(59904, 0x80)
        .priority(6)
        .destination(0x23)
        .build()
        .expect("valid request identifier");
    println!("   Identifier: {:08X}", request.raw());

    match request.set_da(0xFF) {
        DestinationWrite::Applied => println!("   Now broadcast: {:08X}\n", request.raw()),
        DestinationWrite::PgnAltered { previous, current } => {
            println!("   PGN changed from {previous} to {current}\n")
        }
    }

    // ======================================================================
    // 3. 11-bit identifiers only carry a priority and a source address
    // ======================================================================
    println!("3. Classical identifier 0x123");

    let classic = Identifier::from_hex("123").expect("valid identifier");
    println!("   {}", classic.summary_line());
    match classic.pgn() {
        Ok(pgn) => println!("   PGN: {pgn}"),
        Err(err) => println!("   No PGN: {err}"),
    }
}
