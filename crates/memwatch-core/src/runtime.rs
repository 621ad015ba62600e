//! Abstract heap-runtime interface.
//!
//! The concrete implementations live in `memwatch-mem`. We keep only the trait
//! here so the monitor can be driven by a scripted runtime in tests.

use crate::error::Result;

/// Platform primitives the monitor consumes on every tick.
pub trait HeapRuntime: Send + Sync {
    /// Bytes of heap currently allocated and not yet freed.
    fn allocated_bytes(&self) -> u64;

    /// Force a collection/refresh pass so the next dump reflects live memory.
    ///
    /// Allocators without a collector treat this as a statistics refresh.
    fn collect(&self);

    /// Serialize a heap profile of the current process into a byte buffer.
    fn dump_profile(&self) -> Result<Vec<u8>>;
}

impl<R: HeapRuntime + ?Sized> HeapRuntime for std::sync::Arc<R> {
    fn allocated_bytes(&self) -> u64 {
        (**self).allocated_bytes()
    }

    fn collect(&self) {
        (**self).collect();
    }

    fn dump_profile(&self) -> Result<Vec<u8>> {
        (**self).dump_profile()
    }
}
