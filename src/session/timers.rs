//! Cooperative timer queue driven by elapsed milliseconds.
//!
//! Nothing fires on its own: the owner calls [`Timers::advance`] from its
//! frame/tick loop and handles the returned events in due order. Timers
//! scheduled while handling those events count from the end of the advance,
//! so callers tick in small steps.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer<K> {
    id: TimerId,
    kind: K,
    due_ms: u64,
    interval_ms: Option<u64>,
    remaining_fires: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct Timers<K> {
    now_ms: u64,
    next_id: u64,
    timers: Vec<Timer<K>>,
}

impl<K> Default for Timers<K> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            timers: Vec::new(),
        }
    }
}

impl<K: Clone> Timers<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds advanced so far.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Fire `kind` once after `delay_ms`.
    pub fn after(&mut self, delay_ms: u64, kind: K) -> TimerId {
        self.push(delay_ms, kind, None, Some(1))
    }

    /// Fire `kind` every `interval_ms`, `times` times in total (forever when
    /// `None`). An interval of 0 is treated as 1ms.
    pub fn every(&mut self, interval_ms: u64, kind: K, times: Option<u32>) -> TimerId {
        let interval_ms = interval_ms.max(1);
        self.push(interval_ms, kind, Some(interval_ms), times)
    }

    /// Returns false if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Drop every timer whose kind matches.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&K) -> bool) {
        self.timers.retain(|t| !pred(&t.kind));
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    /// Move the clock forward and return every event that came due, earliest
    /// first (ties in scheduling order).
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<K> {
        let target = self.now_ms.saturating_add(elapsed_ms);
        let mut fired = Vec::new();

        while let Some(index) = self.next_due(target) {
            let timer = &mut self.timers[index];
            self.now_ms = timer.due_ms;
            fired.push(timer.kind.clone());

            let remaining = timer.remaining_fires.map(|n| n.saturating_sub(1));
            match (timer.interval_ms, remaining) {
                (Some(interval), None) => timer.due_ms += interval,
                (Some(interval), Some(n)) if n > 0 => {
                    timer.due_ms += interval;
                    timer.remaining_fires = Some(n);
                }
                _ => {
                    self.timers.remove(index);
                }
            }
        }

        self.now_ms = target;
        fired
    }

    fn push(&mut self, delay_ms: u64, kind: K, interval_ms: Option<u64>, times: Option<u32>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        if times == Some(0) {
            return id;
        }
        self.timers.push(Timer {
            id,
            kind,
            due_ms: self.now_ms.saturating_add(delay_ms),
            interval_ms,
            remaining_fires: times,
        });
        id
    }

    fn next_due(&self, target: u64) -> Option<usize> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= target)
            .min_by_key(|(_, t)| (t.due_ms, t.id.0))
            .map(|(i, _)| i)
    }
}
