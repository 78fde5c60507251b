//! Runtime infrastructure - Tokio runtime bridge for async operations

mod bridge;
mod worker;

pub use bridge::{
    OrderSource, RuntimeBridge, RuntimeCommand, RuntimeEvent, WorkerConfig, DEFAULT_FETCH_DELAY,
};
pub use worker::run_async_worker;
