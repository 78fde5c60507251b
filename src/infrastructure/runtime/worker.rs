//! Async worker - runs in Tokio runtime and serves data requests

use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use anyhow::Result;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::infrastructure::runtime::bridge::{RuntimeCommand, RuntimeEvent, WorkerConfig};

/// Run the async worker loop
pub async fn run_async_worker(
    config: WorkerConfig,
    cmd_rx: Receiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) -> Result<()> {
    // Command polling cadence; the std receiver cannot be awaited
    let mut poll_interval = interval(Duration::from_millis(25));

    loop {
        poll_interval.tick().await;

        // Process commands (non-blocking)
        loop {
            let cmd = match cmd_rx.try_recv() {
                Ok(cmd) => cmd,
                Err(std::sync::mpsc::TryRecvError::Empty) => break,
                // TUI side is gone
                Err(std::sync::mpsc::TryRecvError::Disconnected) => return Ok(()),
            };

            match cmd {
                RuntimeCommand::Shutdown => {
                    debug!("runtime worker shutting down");
                    return Ok(());
                }

                RuntimeCommand::FetchOrders => {
                    let evt_tx = evt_tx.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(config.fetch_delay).await;
                        let event = match (config.source)() {
                            Ok(orders) => {
                                info!(count = orders.len(), "orders loaded");
                                RuntimeEvent::OrdersLoaded { orders }
                            }
                            Err(err) => {
                                warn!(error = %err, "orders fetch failed");
                                RuntimeEvent::OrdersFailed {
                                    message: format!("{:#}", err),
                                }
                            }
                        };
                        let _ = evt_tx.send(event);
                    });
                }

                RuntimeCommand::ReloadDashboard => {
                    let evt_tx = evt_tx.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(config.fetch_delay).await;
                        let _ = evt_tx.send(RuntimeEvent::ReloadFinished);
                    });
                }
            }
        }
    }
}
