use crate::error::{BoardError, Result};
use tokio::sync::broadcast;

/// State values published by a [`BoardMonitor`](crate::BoardMonitor)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// Board reachability, published on every state poll regardless of change
    Online(bool),

    /// Most recent dart of a non-duplicate snapshot
    Throw {
        /// Score of the dart
        score: u32,
        /// Whether the dart hit a triple segment and passes the threshold
        is_triple: bool,
    },

    /// A 3-dart visit was completed
    VisitComplete {
        /// Total score of the visit
        score: u32,
    },

    /// Board manager version, empty when the version fetch failed
    BoardVersion(String),

    /// Camera configuration as a JSON string, one event per camera slot
    CameraConfig {
        /// Camera slot (0, 1 or 2)
        slot: u8,
        /// Camera parameters serialized as JSON
        json: String,
    },
}

/// Receiver for board events
pub struct EventReceiver {
    rx: broadcast::Receiver<BoardEvent>,
}

impl EventReceiver {
    pub(crate) fn new(rx: broadcast::Receiver<BoardEvent>) -> Self {
        Self { rx }
    }

    /// Receive the next board event
    ///
    /// Returns [`BoardError::MonitorStopped`] once the monitor has been
    /// stopped and all buffered events were drained.
    pub async fn recv(&mut self) -> Result<BoardEvent> {
        self.rx.recv().await.map_err(|e| match e {
            broadcast::error::RecvError::Closed => BoardError::MonitorStopped,
            broadcast::error::RecvError::Lagged(n) => {
                BoardError::ChannelError(format!("Lagged by {} events", n))
            }
        })
    }

    /// Try to receive a board event without blocking
    ///
    /// Returns `Ok(None)` if no event is available.
    pub fn try_recv(&mut self) -> Result<Option<BoardEvent>> {
        match self.rx.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(broadcast::error::TryRecvError::Empty) => Ok(None),
            Err(broadcast::error::TryRecvError::Closed) => Err(BoardError::MonitorStopped),
            Err(broadcast::error::TryRecvError::Lagged(n)) => {
                Err(BoardError::ChannelError(format!("Lagged by {} events", n)))
            }
        }
    }
}
