//! Rust library for monitoring Autodarts dartboard devices
//!
//! This library polls an Autodarts board manager's local HTTP API and turns
//! raw segment data into discrete scoring events for home-automation
//! consumers. It supports:
//!
//! - Per-dart score and triple-hit detection
//! - Exactly one total per completed 3-dart visit
//! - Deduplication of unchanged poll snapshots
//! - Board reachability reporting with bounded request timeouts
//! - Board manager version and camera configuration on a slow timer
//!
//! # Quick Start
//!
//! ```no_run
//! use autodarts_board::{BoardEvent, BoardMonitor, MonitorConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MonitorConfig::new()
//!         .with_host("127.0.0.1")
//!         .with_port(3180);
//!
//!     let mut monitor = BoardMonitor::new(config);
//!     let mut events = monitor.subscribe();
//!     monitor.start()?;
//!
//!     while let Ok(event) = events.recv().await {
//!         match event {
//!             BoardEvent::Throw { score, is_triple } => {
//!                 println!("Dart: {} (triple: {})", score, is_triple);
//!             }
//!             BoardEvent::VisitComplete { score } => {
//!                 println!("Visit complete: {}", score);
//!             }
//!             BoardEvent::Online(online) => {
//!                 println!("Board online: {}", online);
//!             }
//!             _ => {}
//!         }
//!     }
//!
//!     monitor.stop().await;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized into several layers:
//!
//! - **Monitor**: Long-lived scheduler owning the state and metadata polls
//! - **Tracker**: Throw/visit detection state machine with snapshot dedup
//! - **Client**: Bounded-time HTTP access to the board's local API
//! - **Events**: Published state values and subscription handling
//! - **Types**: Domain types and payload parsing

mod client;
mod config;
mod error;
mod events;
mod monitor;
mod tracker;
mod types;

// Public exports
pub use client::BoardClient;
pub use config::{MonitorConfig, HTTP_TIMEOUT, METADATA_INTERVAL};
pub use error::{BoardError, Result};
pub use events::{BoardEvent, EventReceiver};
pub use monitor::BoardMonitor;
pub use tracker::{Signature, ThrowUpdate, VisitTracker};
pub use types::{parse_throws, CameraInfo, Dart, Segment};
