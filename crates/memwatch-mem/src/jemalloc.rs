//! jemalloc-backed runtime (feature: `jemalloc`).
//!
//! Requires jemalloc to be the global allocator and heap profiling to be
//! enabled at startup, e.g. `malloc_conf = "prof:true,prof_active:true"`.
//! Without profiling, `dump_profile` returns `Error::Capture` and the monitor
//! skips the tick.

use memwatch_core::error::{Error, Result};
use memwatch_core::HeapRuntime;
use tikv_jemalloc_ctl::{epoch, stats};

#[derive(Debug, Default, Clone, Copy)]
pub struct JemallocRuntime;

impl JemallocRuntime {
    pub fn new() -> Self {
        Self
    }
}

impl HeapRuntime for JemallocRuntime {
    fn allocated_bytes(&self) -> u64 {
        // jemalloc caches statistics until the epoch is advanced.
        if let Err(_e) = epoch::advance() {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_e, "jemalloc epoch advance failed");
        }
        match stats::allocated::read() {
            Ok(bytes) => bytes as u64,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_e, "reading jemalloc stats.allocated failed");
                0
            }
        }
    }

    fn collect(&self) {
        if let Err(_e) = epoch::advance() {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_e, "jemalloc epoch advance failed");
        }
    }

    /// Must not be called from inside an async task: the profiler handle is
    /// guarded by a tokio mutex and is taken with `blocking_lock`.
    fn dump_profile(&self) -> Result<Vec<u8>> {
        let ctl = jemalloc_pprof::PROF_CTL
            .as_ref()
            .ok_or_else(|| Error::Capture("jemalloc profiling is not enabled".into()))?;
        let mut ctl = ctl.blocking_lock();
        if !ctl.activated() {
            return Err(Error::Capture("jemalloc profiling is not active".into()));
        }
        ctl.dump_pprof().map_err(|e| Error::Capture(e.to_string()))
    }
}
