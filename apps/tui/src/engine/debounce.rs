use std::time::{Duration, Instant};

/// Quiet period before a slider drag turns into a scatter refresh.
pub const SCATTER_DEBOUNCE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
struct Pending<T> {
    deadline: Instant,
    args: T,
}

/// Trailing-edge debouncer driven by the event loop clock.
///
/// Each `call` replaces whatever was pending and restarts the wait, so only
/// the last call in a busy window fires, with that call's arguments. The
/// pending timer is plain state polled from the loop, not a thread.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub const fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    pub fn call(&mut self, now: Instant, args: T) {
        self.pending = Some(Pending {
            deadline: now + self.wait,
            args,
        });
    }

    /// Hands back the pending arguments once their deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.pending.as_ref()?.deadline > now {
            return None;
        }
        self.pending.take().map(|pending| pending.args)
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.args)
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(start: Instant, millis: u64) -> Instant {
        start + Duration::from_millis(millis)
    }

    #[test]
    fn burst_fires_once_with_last_arguments() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(SCATTER_DEBOUNCE);

        for (offset, value) in [(0, 3), (50, 5), (100, 7), (150, 9)] {
            debouncer.call(at(start, offset), value);
            assert_eq!(debouncer.poll(at(start, offset)), None);
        }

        assert_eq!(debouncer.poll(at(start, 399)), None);
        assert_eq!(debouncer.poll(at(start, 400)), Some(9));
        assert_eq!(debouncer.poll(at(start, 1_000)), None);
    }

    #[test]
    fn separate_windows_fire_separately() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));

        debouncer.call(start, "first");
        assert_eq!(debouncer.poll(at(start, 100)), Some("first"));

        debouncer.call(at(start, 300), "second");
        assert_eq!(debouncer.deadline(), Some(at(start, 400)));
        assert_eq!(debouncer.poll(at(start, 450)), Some("second"));
    }

    #[test]
    fn cancel_drops_the_pending_call() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(SCATTER_DEBOUNCE);

        debouncer.call(start, 1);
        assert_eq!(debouncer.cancel(), Some(1));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(at(start, 500)), None);
    }
}
