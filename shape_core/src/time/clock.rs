use std::sync::atomic::Ordering;
use std::sync::Arc;

use atomic_float::AtomicF64;
use shape_schema::Milliseconds;

/// Wall clock in milliseconds, published by the host loop and read by the round.
#[derive(Debug, Clone)]
pub struct HostClock {
    source: Arc<AtomicF64>,
}

impl HostClock {
    pub fn new(source: Arc<AtomicF64>) -> Self {
        Self { source }
    }

    pub fn starting_at(now_ms: Milliseconds) -> Self {
        Self::new(Arc::new(AtomicF64::new(now_ms)))
    }

    pub fn now_ms(&self) -> Milliseconds {
        self.source.load(Ordering::Acquire)
    }

    pub fn set(&self, now_ms: Milliseconds) {
        self.source.store(now_ms, Ordering::Release);
    }

    pub fn advance(&self, delta_ms: Milliseconds) {
        self.source.fetch_add(delta_ms, Ordering::AcqRel);
    }

    pub fn source(&self) -> Arc<AtomicF64> {
        self.source.clone()
    }
}
