//! Print board events to the console.
//!
//! Usage: `cargo run --example watch [host] [port]`

use autodarts_board::{BoardEvent, BoardMonitor, MonitorConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "127.0.0.1".to_string());
    let port: u16 = match args.next() {
        Some(port) => port.parse()?,
        None => 3180,
    };

    let config = MonitorConfig::new().with_host(host).with_port(port);
    let mut monitor = BoardMonitor::new(config);
    let mut events = monitor.subscribe();
    monitor.start()?;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = events.recv() => match event? {
                BoardEvent::Throw { score, is_triple } => {
                    println!("Dart: {score}{}", if is_triple { " (triple!)" } else { "" });
                }
                BoardEvent::VisitComplete { score } => {
                    println!("Visit complete: {score}");
                }
                BoardEvent::Online(online) => {
                    tracing::debug!("Board online: {online}");
                }
                BoardEvent::BoardVersion(version) => {
                    println!("Board manager version: {version}");
                }
                BoardEvent::CameraConfig { slot, json } => {
                    println!("Camera {slot}: {json}");
                }
            },
        }
    }

    monitor.stop().await;
    Ok(())
}
