//! Runtime bridge - connects sync TUI thread with async Tokio runtime
//!
//! The TUI thread never blocks on data loading; it sends commands and
//! polls for events once per tick.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use tokio::runtime::Runtime;
use tracing::error;

use crate::domain::{sample_orders, Order};
use crate::infrastructure::runtime::worker::run_async_worker;

/// Simulated network latency of the orders endpoint
pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_secs(1);

/// Where the worker gets orders from
pub type OrderSource = fn() -> anyhow::Result<Vec<Order>>;

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone)]
pub enum RuntimeCommand {
    /// Load the orders table
    FetchOrders,
    /// Dashboard reload after a date range change
    ReloadDashboard,
    /// Shutdown the worker
    Shutdown,
}

/// Events sent from the async worker to the TUI
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeEvent {
    OrdersLoaded { orders: Vec<Order> },
    OrdersFailed { message: String },
    ReloadFinished,
    /// Error occurred
    Error { message: String },
}

#[derive(Debug, Clone, Copy)]
pub struct WorkerConfig {
    pub fetch_delay: Duration,
    pub source: OrderSource,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            fetch_delay: DEFAULT_FETCH_DELAY,
            source: sample_source,
        }
    }
}

fn sample_source() -> anyhow::Result<Vec<Order>> {
    Ok(sample_orders())
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: Sender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_config(WorkerConfig::default())
    }

    pub fn with_config(config: WorkerConfig) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();

        // Spawn the worker thread with its own Tokio runtime
        thread::Builder::new()
            .name("camarai-runtime".to_string())
            .spawn(move || {
                let rt = match Runtime::new() {
                    Ok(rt) => rt,
                    Err(err) => {
                        error!(error = %err, "failed to create tokio runtime");
                        let _ = evt_tx.send(RuntimeEvent::Error {
                            message: format!("Tareas en segundo plano no disponibles: {err}"),
                        });
                        return;
                    }
                };
                rt.block_on(async {
                    if let Err(err) = run_async_worker(config, cmd_rx, evt_tx.clone()).await {
                        let _ = evt_tx.send(RuntimeEvent::Error {
                            message: format!("Las tareas en segundo plano se detuvieron: {:#}", err),
                        });
                    }
                });
            })?;

        Ok(Self { cmd_tx, evt_rx })
    }

    /// Send a command to the async worker
    pub fn send(&self, cmd: RuntimeCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("Canal de tareas en segundo plano cerrado"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }

    /// Block up to `timeout` for the next event
    pub fn recv_timeout(&self, timeout: Duration) -> Option<RuntimeEvent> {
        self.evt_rx.recv_timeout(timeout).ok()
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        // Try to send shutdown command
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}
