//! Counting global allocator.
//!
//! Wraps another `GlobalAlloc` and keeps live/cumulative counters. Counters
//! use relaxed atomics: readings are advisory and may lag a concurrent
//! allocation by one update.
//!
//! ```ignore
//! use std::alloc::System;
//! use memwatch_mem::TrackingAllocator;
//!
//! #[global_allocator]
//! static ALLOC: TrackingAllocator<System> = TrackingAllocator::new(System);
//! ```

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Point-in-time copy of the allocator counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeapStats {
    /// Bytes currently allocated and not freed.
    pub live_bytes: u64,
    /// Allocations currently outstanding.
    pub live_objects: u64,
    /// Allocations made since start (reallocs count as one).
    pub total_allocs: u64,
    /// Bytes requested since start.
    pub total_bytes: u64,
}

pub struct TrackingAllocator<A = System> {
    inner: A,
    live_bytes: AtomicUsize,
    live_objects: AtomicUsize,
    total_allocs: AtomicUsize,
    total_bytes: AtomicUsize,
}

impl<A> TrackingAllocator<A> {
    pub const fn new(inner: A) -> Self {
        Self {
            inner,
            live_bytes: AtomicUsize::new(0),
            live_objects: AtomicUsize::new(0),
            total_allocs: AtomicUsize::new(0),
            total_bytes: AtomicUsize::new(0),
        }
    }

    pub fn allocated_bytes(&self) -> u64 {
        self.live_bytes.load(Ordering::Relaxed) as u64
    }

    pub fn stats(&self) -> HeapStats {
        HeapStats {
            live_bytes: self.live_bytes.load(Ordering::Relaxed) as u64,
            live_objects: self.live_objects.load(Ordering::Relaxed) as u64,
            total_allocs: self.total_allocs.load(Ordering::Relaxed) as u64,
            total_bytes: self.total_bytes.load(Ordering::Relaxed) as u64,
        }
    }

    fn record_alloc(&self, size: usize) {
        self.live_bytes.fetch_add(size, Ordering::Relaxed);
        self.live_objects.fetch_add(1, Ordering::Relaxed);
        self.total_allocs.fetch_add(1, Ordering::Relaxed);
        self.total_bytes.fetch_add(size, Ordering::Relaxed);
    }

    fn record_dealloc(&self, size: usize) {
        self.live_bytes.fetch_sub(size, Ordering::Relaxed);
        self.live_objects.fetch_sub(1, Ordering::Relaxed);
    }

    fn record_realloc(&self, old_size: usize, new_size: usize) {
        // Object count is unchanged; only the byte delta moves.
        if new_size >= old_size {
            self.live_bytes.fetch_add(new_size - old_size, Ordering::Relaxed);
        } else {
            self.live_bytes.fetch_sub(old_size - new_size, Ordering::Relaxed);
        }
        self.total_allocs.fetch_add(1, Ordering::Relaxed);
        self.total_bytes.fetch_add(new_size, Ordering::Relaxed);
    }
}

// SAFETY: every method forwards to `inner` with the caller's arguments
// unchanged; the counters never touch the returned memory.
#[allow(unsafe_code)]
unsafe impl<A: GlobalAlloc> GlobalAlloc for TrackingAllocator<A> {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = self.inner.alloc(layout);
        if !ptr.is_null() {
            self.record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = self.inner.alloc_zeroed(layout);
        if !ptr.is_null() {
            self.record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        self.inner.dealloc(ptr, layout);
        self.record_dealloc(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = self.inner.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            self.record_realloc(layout.size(), new_size);
        }
        new_ptr
    }
}
