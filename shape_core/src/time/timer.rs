use std::sync::Arc;

use parking_lot::Mutex;
use shape_schema::Milliseconds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Countdown,
    ElapsedPoll,
    DrawBudget,
}

/// Host-side timer service. Callbacks come back through `Round::on_timer`.
pub trait Scheduler {
    fn schedule(&mut self, kind: TimerKind, period_ms: Milliseconds, repeating: bool) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiredTimer {
    pub handle: TimerHandle,
    pub kind: TimerKind,
    pub due_ms: Milliseconds,
}

#[derive(Debug, Clone)]
struct PendingTimer {
    handle: TimerHandle,
    kind: TimerKind,
    due_ms: Milliseconds,
    period_ms: Milliseconds,
    repeating: bool,
}

#[derive(Debug, Default)]
struct Inner {
    now_ms: Milliseconds,
    next_id: u64,
    timers: Vec<PendingTimer>,
}

/// Deterministic scheduler driven by explicit time steps. Clones share state,
/// so a driver can keep one clone while the round owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<Inner>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> Milliseconds {
        self.inner.lock().now_ms
    }

    pub fn active_count(&self) -> usize {
        self.inner.lock().timers.len()
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.inner.lock().timers.iter().any(|t| t.handle == handle)
    }

    /// Pops the earliest timer due at or before `until_ms`, rescheduling it if
    /// repeating. Time moves to its due instant. Ties fire in schedule order.
    pub fn pop_due(&self, until_ms: Milliseconds) -> Option<FiredTimer> {
        let mut inner = self.inner.lock();

        let idx = inner
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.handle.cmp(&b.handle)))
            .map(|(i, _)| i)?;

        let fired = {
            let timer = &inner.timers[idx];
            FiredTimer {
                handle: timer.handle,
                kind: timer.kind,
                due_ms: timer.due_ms,
            }
        };
        inner.now_ms = inner.now_ms.max(fired.due_ms);

        if inner.timers[idx].repeating {
            let timer = &mut inner.timers[idx];
            timer.due_ms += timer.period_ms;
        } else {
            inner.timers.remove(idx);
        }

        Some(fired)
    }

    /// Moves time forward once every due timer has been popped.
    pub fn set_now(&self, now_ms: Milliseconds) {
        let mut inner = self.inner.lock();
        inner.now_ms = inner.now_ms.max(now_ms);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, kind: TimerKind, period_ms: Milliseconds, repeating: bool) -> TimerHandle {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let handle = TimerHandle(inner.next_id);
        let due_ms = inner.now_ms + period_ms;
        inner.timers.push(PendingTimer {
            handle,
            kind,
            due_ms,
            period_ms,
            repeating,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.inner.lock().timers.retain(|t| t.handle != handle);
    }
}
