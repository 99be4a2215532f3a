//! One-shot deferred timers with cancellation.
//!
//! Handles are never reused, so cancelling or firing a stale handle is a
//! harmless no-op.

/// Identifies one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Pending<E> {
    handle: TimerHandle,
    remaining: f32,
    event: E,
}

/// A small queue of one-shot timers advanced by an explicit clock.
#[derive(Debug, Clone)]
pub struct DeferredTimers<E> {
    next_id: u64,
    pending: Vec<Pending<E>>,
}

impl<E> Default for DeferredTimers<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<E: Clone> DeferredTimers<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` to fire once after `delay` seconds.
    pub fn schedule_once(&mut self, delay: f32, event: E) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            handle,
            remaining: delay.max(0.0),
            event,
        });
        handle
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() != before
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    /// Seconds until `handle` fires, if it is still pending.
    pub fn remaining(&self, handle: TimerHandle) -> Option<f32> {
        self.pending
            .iter()
            .find(|p| p.handle == handle)
            .map(|p| p.remaining)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Advance the clock and return every timer that came due, earliest first.
    /// Timers due at the same instant fire in scheduling order.
    pub fn advance(&mut self, dt: f32) -> Vec<(TimerHandle, E)> {
        let mut due = Vec::new();
        self.pending.retain_mut(|p| {
            p.remaining -= dt;
            if p.remaining <= 0.0 {
                due.push(p.clone());
                false
            } else {
                true
            }
        });

        due.sort_by(|a, b| {
            a.remaining
                .total_cmp(&b.remaining)
                .then(a.handle.0.cmp(&b.handle.0))
        });
        due.into_iter().map(|p| (p.handle, p.event)).collect()
    }
}
