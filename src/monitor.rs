use crate::client::BoardClient;
use crate::config::{MonitorConfig, METADATA_INTERVAL};
use crate::error::{BoardError, Result};
use crate::events::{BoardEvent, EventReceiver};
use crate::tracker::VisitTracker;
use crate::types::parse_throws;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;

/// Monitor for an Autodarts board
///
/// Owns two background loops: a fast state poll that drives the
/// [`VisitTracker`] and a slow metadata poll for the board manager version
/// and camera configuration. Derived values are published as
/// [`BoardEvent`]s to all subscribers.
///
/// # Example
///
/// ```no_run
/// use autodarts_board::{BoardEvent, BoardMonitor, MonitorConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut monitor = BoardMonitor::new(MonitorConfig::new());
///     let mut events = monitor.subscribe();
///     monitor.start()?;
///
///     while let Ok(event) = events.recv().await {
///         if let BoardEvent::VisitComplete { score } = event {
///             println!("Visit: {}", score);
///         }
///     }
///
///     monitor.stop().await;
///     Ok(())
/// }
/// ```
pub struct BoardMonitor {
    config: MonitorConfig,
    event_tx: broadcast::Sender<BoardEvent>,
    stop_tx: Option<broadcast::Sender<()>>,
    state_handle: Option<tokio::task::JoinHandle<()>>,
    metadata_handle: Option<tokio::task::JoinHandle<()>>,
}

impl BoardMonitor {
    /// Create a monitor with the given configuration
    pub fn new(config: MonitorConfig) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self {
            config,
            event_tx,
            stop_tx: None,
            state_handle: None,
            metadata_handle: None,
        }
    }

    /// Subscribe to board events
    ///
    /// Multiple subscriptions can be active simultaneously. Subscribing
    /// before [`start`](Self::start) guarantees no events are missed.
    pub fn subscribe(&self) -> EventReceiver {
        EventReceiver::new(self.event_tx.subscribe())
    }

    /// Start the polling loops
    ///
    /// If the monitor is already running it keeps running; call
    /// [`stop`](Self::stop) first to restart with fresh state.
    pub fn start(&mut self) -> Result<()> {
        if self.stop_tx.is_some() {
            return Ok(());
        }

        let client = BoardClient::new(&self.config.host, self.config.port)?;
        let (stop_tx, _) = broadcast::channel(1);

        tracing::info!(
            "Monitoring board at {}:{} every {:?}",
            self.config.host,
            self.config.port,
            self.config.interval
        );

        self.state_handle = Some(tokio::spawn(state_loop(
            client.clone(),
            self.config.clone(),
            self.event_tx.clone(),
            stop_tx.subscribe(),
        )));
        self.metadata_handle = Some(tokio::spawn(metadata_loop(
            client,
            self.event_tx.clone(),
            stop_tx.subscribe(),
        )));
        self.stop_tx = Some(stop_tx);

        Ok(())
    }

    /// Stop the polling loops
    ///
    /// Cancels both timers; any in-flight request is aborted. No other
    /// cleanup is needed, the monitor keeps no state across runs.
    pub async fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        for handle in [self.state_handle.take(), self.metadata_handle.take()]
            .into_iter()
            .flatten()
        {
            let _ = tokio::time::timeout(Duration::from_millis(500), handle).await;
        }
    }
}

/// Fast loop: poll `/api/state` and feed the tracker
///
/// One task drives the interval and awaits each tick's fetch and
/// processing before the next tick, so ticks never overlap and the
/// edge-triggered visit completion cannot race.
async fn state_loop(
    client: BoardClient,
    config: MonitorConfig,
    event_tx: broadcast::Sender<BoardEvent>,
    mut stop_rx: broadcast::Receiver<()>,
) {
    let mut tracker = VisitTracker::new(config.triple_min_score);
    let mut offline = false;

    let mut ticker = tokio::time::interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = stop_rx.recv() => {
                tracing::info!("State polling stopped");
                break;
            }
            _ = ticker.tick() => {
                poll_state_once(&client, &mut tracker, &mut offline, &event_tx).await;
            }
        }
    }
}

async fn poll_state_once(
    client: &BoardClient,
    tracker: &mut VisitTracker,
    offline: &mut bool,
    event_tx: &broadcast::Sender<BoardEvent>,
) {
    match client.state().await {
        Ok(state) => {
            *offline = false;
            let _ = event_tx.send(BoardEvent::Online(true));

            let throws = match parse_throws(&state) {
                Some(throws) => throws,
                // Missing or malformed throws is no new information
                None => return,
            };

            if let Some(update) = tracker.process(&throws) {
                let _ = event_tx.send(BoardEvent::Throw {
                    score: update.score,
                    is_triple: update.is_triple,
                });
                if let Some(score) = update.visit_total {
                    let _ = event_tx.send(BoardEvent::VisitComplete { score });
                }
            }
        }
        Err(error @ BoardError::Payload { .. }) => {
            // Board was reachable, the response was broken
            *offline = false;
            let _ = event_tx.send(BoardEvent::Online(true));
            tracing::warn!("Board API error: {}", error);
        }
        Err(error) => {
            if !*offline {
                tracing::warn!("Board not reachable: {}", error);
                *offline = true;
            }
            let _ = event_tx.send(BoardEvent::Online(false));
        }
    }
}

/// Slow loop: board manager version and camera configuration
async fn metadata_loop(
    client: BoardClient,
    event_tx: broadcast::Sender<BoardEvent>,
    mut stop_rx: broadcast::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(METADATA_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = stop_rx.recv() => {
                tracing::info!("Metadata polling stopped");
                break;
            }
            _ = ticker.tick() => {
                poll_metadata_once(&client, &event_tx).await;
            }
        }
    }
}

async fn poll_metadata_once(client: &BoardClient, event_tx: &broadcast::Sender<BoardEvent>) {
    match client.version().await {
        Ok(version) => {
            let _ = event_tx.send(BoardEvent::BoardVersion(version));
        }
        Err(error) => {
            tracing::warn!("Version API not reachable: {}", error);
            // Reset so a stale version is never shown
            let _ = event_tx.send(BoardEvent::BoardVersion(String::new()));
        }
    }

    match client.camera_config().await {
        Ok(info) => match info.to_state_json() {
            Ok(json) => {
                for slot in 0..3u8 {
                    let _ = event_tx.send(BoardEvent::CameraConfig {
                        slot,
                        json: json.clone(),
                    });
                }
            }
            Err(error) => {
                tracing::warn!("Failed to serialize camera config: {}", error);
            }
        },
        Err(error) => {
            tracing::warn!("Config API not reachable: {}", error);
        }
    }
}
