#![forbid(unsafe_code)]
//! memwatch-exec: the monitoring loop.
//!
//! A `Monitor` waits on a periodic timer and a cancellation token. Each tick
//! samples live allocation; at or above the threshold it forces a collection,
//! captures a heap profile, and hands it to the sink. Ticks never overlap and
//! cancellation always wins over a ready tick.
//!
//! Run it in place (`Monitor::run`, `Monitor::run_blocking`,
//! `Monitor::run_until_signal`) or in the background (`Monitor::spawn`).

pub mod error;
pub mod handle;
pub mod metrics;
pub mod monitor;
pub mod outcome;
pub mod signal;

pub use error::{MonitorError, Result};
pub use handle::MonitorHandle;
pub use monitor::{ErrorObserver, Monitor, MonitorState};
pub use outcome::{MonitorSummary, TickOutcome};
pub use tokio_util::sync::CancellationToken;
