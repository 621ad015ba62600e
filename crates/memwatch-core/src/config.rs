//! Monitor and sink configuration that downstream crates can
//! serialize/deserialize.
//!
//! `MonitorConfig` is immutable once built; the only way to get one with
//! non-default values is through `MonitorConfigBuilder::build`, `from_env`,
//! or deserialization, all of which validate.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default allocation threshold: 5 MiB.
pub const DEFAULT_THRESHOLD_BYTES: u64 = 5 * 1024 * 1024;

/// Default poll interval: 10 seconds.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Longest accepted poll interval: one year.
pub const MAX_POLL_INTERVAL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Default upper bound on a single sink write.
pub const DEFAULT_SINK_TIMEOUT: Duration = Duration::from_secs(30);

/// Default directory for the filesystem sink.
pub const DEFAULT_SINK_DIR: &str = "/tmp/memwatch-profiles";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MonitorConfigRepr", into = "MonitorConfigRepr")]
pub struct MonitorConfig {
    threshold_bytes: u64,
    poll_interval: Duration,
    sink_timeout: Option<Duration>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            threshold_bytes: DEFAULT_THRESHOLD_BYTES,
            poll_interval: DEFAULT_POLL_INTERVAL,
            sink_timeout: Some(DEFAULT_SINK_TIMEOUT),
        }
    }
}

impl MonitorConfig {
    pub fn builder() -> MonitorConfigBuilder {
        MonitorConfigBuilder::default()
    }

    /// Allocation (bytes) at or above which a tick captures a profile.
    pub fn threshold_bytes(&self) -> u64 {
        self.threshold_bytes
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Upper bound on one sink write; `None` waits indefinitely.
    pub fn sink_timeout(&self) -> Option<Duration> {
        self.sink_timeout
    }

    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `MEMWATCH_THRESHOLD_BYTES`: allocation threshold in bytes
    /// - `MEMWATCH_POLL_INTERVAL_MS`: poll interval in milliseconds
    /// - `MEMWATCH_SINK_TIMEOUT_MS`: sink write bound in milliseconds (`0` disables it)
    ///
    /// Values that fail to parse are ignored. The result is validated, so a
    /// `MEMWATCH_POLL_INTERVAL_MS=0` is an error rather than a busy loop.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut builder = Self::builder();

        if let Some(s) = lookup("MEMWATCH_THRESHOLD_BYTES") {
            if let Ok(v) = s.trim().parse::<u64>() {
                builder = builder.threshold_bytes(v);
            }
        }

        if let Some(s) = lookup("MEMWATCH_POLL_INTERVAL_MS") {
            if let Ok(v) = s.trim().parse::<u64>() {
                builder = builder.poll_interval(Duration::from_millis(v));
            }
        }

        if let Some(s) = lookup("MEMWATCH_SINK_TIMEOUT_MS") {
            if let Ok(v) = s.trim().parse::<u64>() {
                let timeout = (v > 0).then(|| Duration::from_millis(v));
                builder = builder.sink_timeout(timeout);
            }
        }

        builder.build()
    }
}

/// Builder for [`MonitorConfig`]. Starts from the defaults.
#[derive(Debug, Clone)]
pub struct MonitorConfigBuilder {
    threshold_bytes: u64,
    poll_interval: Duration,
    sink_timeout: Option<Duration>,
}

impl Default for MonitorConfigBuilder {
    fn default() -> Self {
        let d = MonitorConfig::default();
        Self {
            threshold_bytes: d.threshold_bytes,
            poll_interval: d.poll_interval,
            sink_timeout: d.sink_timeout,
        }
    }
}

impl MonitorConfigBuilder {
    /// Any value is accepted; zero makes every tick capture.
    pub fn threshold_bytes(mut self, bytes: u64) -> Self {
        self.threshold_bytes = bytes;
        self
    }

    /// Must be non-zero and at most [`MAX_POLL_INTERVAL`]; checked by
    /// [`build`](Self::build).
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn sink_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.sink_timeout = timeout;
        self
    }

    pub fn build(self) -> Result<MonitorConfig> {
        validate_poll_interval(self.poll_interval)?;
        validate_sink_timeout(self.sink_timeout)?;
        Ok(MonitorConfig {
            threshold_bytes: self.threshold_bytes,
            poll_interval: self.poll_interval,
            sink_timeout: self.sink_timeout,
        })
    }
}

fn validate_poll_interval(interval: Duration) -> Result<()> {
    if interval.is_zero() {
        Err(Error::Config("poll interval must be greater than 0".into()))
    } else if interval > MAX_POLL_INTERVAL {
        Err(Error::Config(format!(
            "poll interval {interval:?} exceeds the maximum of {MAX_POLL_INTERVAL:?}"
        )))
    } else {
        Ok(())
    }
}

fn validate_sink_timeout(timeout: Option<Duration>) -> Result<()> {
    match timeout {
        Some(t) if t.is_zero() => Err(Error::Config(
            "sink timeout must be greater than 0 (use None to disable)".into(),
        )),
        _ => Ok(()),
    }
}

/// Serialized form; converted through the builder so deserialized configs are
/// validated too.
#[derive(Serialize, Deserialize)]
struct MonitorConfigRepr {
    threshold_bytes: u64,
    poll_interval_ms: u64,
    #[serde(default)]
    sink_timeout_ms: Option<u64>,
}

impl TryFrom<MonitorConfigRepr> for MonitorConfig {
    type Error = Error;

    fn try_from(repr: MonitorConfigRepr) -> Result<Self> {
        MonitorConfig::builder()
            .threshold_bytes(repr.threshold_bytes)
            .poll_interval(Duration::from_millis(repr.poll_interval_ms))
            .sink_timeout(repr.sink_timeout_ms.map(Duration::from_millis))
            .build()
    }
}

impl From<MonitorConfig> for MonitorConfigRepr {
    fn from(cfg: MonitorConfig) -> Self {
        Self {
            threshold_bytes: cfg.threshold_bytes,
            poll_interval_ms: u64::try_from(cfg.poll_interval.as_millis()).unwrap_or(u64::MAX),
            sink_timeout_ms: cfg
                .sink_timeout
                .map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX)),
        }
    }
}

/// Where emitted profiles go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Directory for the filesystem sink (used when `uri` is unset).
    pub dir: String,

    /// Optional fully-qualified sink URI (e.g. `file:///var/lib/profiles`).
    pub uri: Option<String>,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            dir: DEFAULT_SINK_DIR.to_string(),
            uri: None,
        }
    }
}

impl SinkConfig {
    pub fn scheme(&self) -> Option<&str> {
        self.uri
            .as_deref()
            .filter(|uri| uri.contains("://"))
            .and_then(|uri| uri.split("://").next())
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    /// Create a sink config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `MEMWATCH_SINK_DIR`: directory for the filesystem sink
    /// - `MEMWATCH_SINK_URI`: sink URI, takes precedence over the directory
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(s) = lookup("MEMWATCH_SINK_DIR") {
            cfg.dir = s;
        }

        if let Some(s) = lookup("MEMWATCH_SINK_URI").filter(|s| !s.trim().is_empty()) {
            cfg.uri = Some(s);
        }

        cfg
    }
}
