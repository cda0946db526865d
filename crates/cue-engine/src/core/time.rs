/// Handle to a scheduled action, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u32);

#[derive(Debug, Clone)]
struct Scheduled<A> {
    id: TimerId,
    at: f64,
    action: A,
}

/// A manual clock plus a queue of deferred actions, in milliseconds.
///
/// Actions fire at or after their scheduled time, never before. Actions due
/// at the same time fire in the order they were scheduled. Every pending
/// action can be cancelled, individually or all at once.
#[derive(Debug)]
pub struct Timeline<A> {
    now: f64,
    /// Sorted by (at, id).
    pending: Vec<Scheduled<A>>,
    next_id: u32,
}

impl<A> Timeline<A> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            pending: Vec::new(),
            next_id: 0,
        }
    }

    /// Current clock value.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedule an action at an absolute time. Times in the past are
    /// clamped to now, so the action fires on the next advance.
    pub fn schedule_at(&mut self, at: f64, action: A) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let at = if at.is_nan() { self.now } else { at.max(self.now) };
        let idx = self.pending.partition_point(|s| s.at <= at);
        self.pending.insert(idx, Scheduled { id, at, action });
        id
    }

    /// Schedule an action `delay` ms from now.
    pub fn schedule_in(&mut self, delay: f64, action: A) -> TimerId {
        self.schedule_at(self.now + delay, action)
    }

    /// Cancel one pending action. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.pending.iter().position(|s| s.id == id) {
            Some(idx) => {
                self.pending.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Cancel every pending action. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    /// Cancel everything and rewind the clock to zero.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.now = 0.0;
    }

    /// Advance the clock and return every action now due, in firing order.
    pub fn advance(&mut self, dt: f64) -> Vec<A> {
        if dt > 0.0 {
            self.now += dt;
        }
        let due = self.pending.partition_point(|s| s.at <= self.now);
        self.pending.drain(..due).map(|s| s.action).collect()
    }

    /// Fire everything still pending, in order, moving the clock to the
    /// last scheduled time.
    pub fn flush(&mut self) -> Vec<A> {
        if let Some(last) = self.pending.last() {
            self.now = self.now.max(last.at);
        }
        self.pending.drain(..).map(|s| s.action).collect()
    }

    /// Time of the next pending action.
    pub fn next_due(&self) -> Option<f64> {
        self.pending.first().map(|s| s.at)
    }

    /// Iterate pending actions with their scheduled times, in firing order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &A)> {
        self.pending.iter().map(|s| (s.at, &s.action))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<A> Default for Timeline<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_at_or_after_schedule() {
        let mut tl = Timeline::new();
        tl.schedule_at(10.0, "a");
        assert!(tl.advance(9.9).is_empty());
        assert_eq!(tl.advance(0.1), vec!["a"]);
        assert!(tl.is_empty());
    }

    #[test]
    fn fires_in_time_order_regardless_of_insertion() {
        let mut tl = Timeline::new();
        tl.schedule_at(30.0, 3);
        tl.schedule_at(10.0, 1);
        tl.schedule_at(20.0, 2);
        assert_eq!(tl.advance(100.0), vec![1, 2, 3]);
    }

    #[test]
    fn ties_fire_in_insertion_order() {
        let mut tl = Timeline::new();
        tl.schedule_at(5.0, "first");
        tl.schedule_at(5.0, "second");
        tl.schedule_at(5.0, "third");
        assert_eq!(tl.advance(5.0), vec!["first", "second", "third"]);
    }

    #[test]
    fn cancel_single_and_all() {
        let mut tl = Timeline::new();
        let a = tl.schedule_at(1.0, 'a');
        tl.schedule_at(2.0, 'b');
        tl.schedule_at(3.0, 'c');
        assert!(tl.cancel(a));
        assert!(!tl.cancel(a));
        assert_eq!(tl.cancel_all(), 2);
        assert!(tl.advance(10.0).is_empty());
    }

    #[test]
    fn past_times_fire_next_advance() {
        let mut tl = Timeline::new();
        tl.advance(50.0);
        tl.schedule_at(10.0, ());
        assert_eq!(tl.next_due(), Some(50.0));
        assert_eq!(tl.advance(0.0).len(), 1);
    }

    #[test]
    fn schedule_in_is_relative() {
        let mut tl = Timeline::new();
        tl.advance(100.0);
        tl.schedule_in(5.0, ());
        assert_eq!(tl.next_due(), Some(105.0));
    }

    #[test]
    fn flush_fires_everything_in_order() {
        let mut tl = Timeline::new();
        tl.schedule_at(400.0, 'z');
        tl.schedule_at(12.5, 'a');
        assert_eq!(tl.flush(), vec!['a', 'z']);
        assert_eq!(tl.now(), 400.0);
    }

    #[test]
    fn reset_rewinds() {
        let mut tl = Timeline::new();
        tl.schedule_at(1.0, ());
        tl.advance(0.5);
        tl.reset();
        assert_eq!(tl.now(), 0.0);
        assert!(tl.is_empty());
    }
}
