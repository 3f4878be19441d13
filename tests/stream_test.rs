mod helpers {
    include!("helpers/mod.rs");
}

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::Channel;
use futures_util::stream::StreamExt;
use helpers::{frame, MockCanBus, StepClock};
use j1939_id::protocol::candump::CandumpRecord;
use j1939_id::protocol::transport::stream::{CandumpStream, StreamConfig};
use tokio::time::{timeout, Duration};

#[tokio::test]
/// Frames come out in reception order with the configured channel name.
async fn stream_renders_frames_in_order() {
    let (tx, bus) = MockCanBus::create();
    let clock = StepClock {
        next: 1_700_000_000.0,
        step: 0.25,
    };
    let mut stream = CandumpStream::new(bus, clock, StreamConfig::with_channel("can0"));

    tx.send(frame(0x18EEFF1C, &[1, 2, 3, 4, 5, 6, 7, 8])).unwrap();
    tx.send(frame(0x123, &[0xAB])).unwrap();

    let first = stream.next_record().await.unwrap();
    assert_eq!(
        first.to_string(),
        "(1700000000.000000) can0 18EEFF1C#0102030405060708"
    );
    let second = stream.next_record().await.unwrap();
    assert_eq!(second.to_string(), "(1700000000.250000) can0 0123#ab");
    assert_eq!(stream.frames_seen(), 2);

    drop(tx);
    assert!(stream.next_record().await.is_err());
    assert_eq!(stream.frames_seen(), 2);
}

#[tokio::test]
/// Streamed lines parse back to identical records.
async fn streamed_lines_parse_back() {
    let (tx, bus) = MockCanBus::create();
    let clock = StepClock {
        next: 12.5,
        step: 1.0,
    };
    let mut stream = CandumpStream::new(bus, clock, StreamConfig::default());
    tx.send(frame(0x0CF00401, &[0xFF, 0x00])).unwrap();

    let record = stream.next_record().await.unwrap();
    assert_eq!(record.channel, "can");
    let parsed = CandumpRecord::parse_line(&record.to_string()).unwrap();
    assert_eq!(parsed, record);
    assert_eq!(parsed.id.pgn().unwrap(), 61444);
}

#[tokio::test]
/// The `Stream` adapter ends right after the first adapter error.
async fn stream_adapter_stops_on_error() {
    let (tx, bus) = MockCanBus::create();
    let clock = StepClock {
        next: 0.0,
        step: 0.5,
    };
    for raw in [0x18FEF100, 0x18FEF200, 0x18FEF300] {
        tx.send(frame(raw, &[])).unwrap();
    }
    drop(tx);

    let items: Vec<_> = CandumpStream::new(bus, clock, StreamConfig::default())
        .into_stream()
        .collect()
        .await;

    assert_eq!(items.len(), 4);
    let lines: Vec<String> = items[..3]
        .iter()
        .map(|item| item.as_ref().unwrap().frame_text())
        .collect();
    assert_eq!(lines, ["18FEF100#", "18FEF200#", "18FEF300#"]);
    assert_eq!(items[3], Err(()));
}

#[tokio::test]
/// Reception waits for the driver without busy looping.
async fn stream_waits_for_frames() {
    let (tx, bus) = MockCanBus::create();
    let clock = StepClock {
        next: 0.0,
        step: 1.0,
    };
    let mut stream = CandumpStream::new(bus, clock, StreamConfig::default());

    assert!(timeout(Duration::from_millis(50), stream.next_record())
        .await
        .is_err());

    tx.send(frame(0x7FF, &[])).unwrap();
    let record = timeout(Duration::from_millis(50), stream.next_record())
        .await
        .expect("frame must be delivered")
        .unwrap();
    assert_eq!(record.frame_text(), "07FF#");
}

#[tokio::test]
/// An embassy channel receiver is a valid adapter.
async fn embassy_channel_as_bus() {
    let channel: Channel<NoopRawMutex, helpers::TestFrame, 4> = Channel::new();
    channel.try_send(frame(0x18EA2300, &[0x00, 0xEE, 0x00])).unwrap();

    let clock = StepClock {
        next: 3.0,
        step: 1.0,
    };
    let mut stream = CandumpStream::new(channel.receiver(), clock, StreamConfig::default());
    let record = stream.next_record().await.unwrap();
    assert_eq!(record.to_string(), "(3.000000) can 18EA2300#00ee00");
    assert_eq!(record.id.da().unwrap(), 0x23);
}
