/// Test doubles to simulate a CAN adapter and a reception clock during
/// integration tests.
use embedded_can::{Frame, Id};
use j1939_id::protocol::transport::traits::{can_bus::CanBus, clock::Clock};
use tokio::sync::mpsc;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Frame type handed out by the mock driver.
pub struct TestFrame {
    id: Id,
    data: [u8; 8],
    dlc: usize,
    remote: bool,
}

impl Frame for TestFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        let mut buf = [0u8; 8];
        buf.get_mut(..data.len())?.copy_from_slice(data);
        Some(Self {
            id: id.into(),
            data: buf,
            dlc: data.len(),
            remote: false,
        })
    }

    fn new_remote(id: impl Into<Id>, dlc: usize) -> Option<Self> {
        (dlc <= 8).then(|| Self {
            id: id.into(),
            data: [0; 8],
            dlc,
            remote: true,
        })
    }

    fn is_extended(&self) -> bool {
        matches!(self.id, Id::Extended(_))
    }

    fn is_remote_frame(&self) -> bool {
        self.remote
    }

    fn id(&self) -> Id {
        self.id
    }

    fn dlc(&self) -> usize {
        self.dlc
    }

    fn data(&self) -> &[u8] {
        if self.remote {
            &[]
        } else {
            &self.data[..self.dlc]
        }
    }
}

#[allow(dead_code)]
/// Build a data frame from a raw identifier (`> 0x7FF` means 29-bit).
pub fn frame(raw: u32, data: &[u8]) -> TestFrame {
    let id = if raw > 0x7FF {
        Id::Extended(embedded_can::ExtendedId::new(raw).expect("29-bit identifier"))
    } else {
        Id::Standard(embedded_can::StandardId::new(raw as u16).expect("11-bit identifier"))
    };
    TestFrame::new(id, data).expect("payload fits a classical frame")
}

/// In-memory adapter reproducing the `CanBus` trait behavior. Reception fails
/// once every sender has been dropped.
pub struct MockCanBus {
    rx: mpsc::UnboundedReceiver<TestFrame>,
}

#[allow(dead_code)]
impl MockCanBus {
    /// Construct the adapter together with the handle used to inject frames.
    pub fn create() -> (mpsc::UnboundedSender<TestFrame>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }
}

impl CanBus for MockCanBus {
    type Frame = TestFrame;
    type Error = ();

    async fn recv(&mut self) -> Result<TestFrame, Self::Error> {
        self.rx.recv().await.ok_or(())
    }
}

#[allow(dead_code)]
/// Clock advancing by a fixed step on every reading.
pub struct StepClock {
    pub next: f64,
    pub step: f64,
}

impl Clock for StepClock {
    fn now(&mut self) -> f64 {
        let now = self.next;
        self.next += self.step;
        now
    }
}
