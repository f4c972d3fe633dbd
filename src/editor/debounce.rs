//! Cancel-and-reschedule timer for autosave

use std::future::{pending, Future};
use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// A single resettable deadline.
///
/// Every [`schedule`](Debouncer::schedule) pushes the deadline out by the
/// full delay, so a burst of calls fires once, `delay` after the last one.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    /// (Re)arm the timer
    pub fn schedule(&mut self) {
        self.deadline = Some(Instant::now() + self.delay);
    }

    /// Disarm the timer; returns whether it was armed
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether the deadline has been reached
    pub fn is_due(&self) -> bool {
        self.deadline.map_or(false, |d| d <= Instant::now())
    }

    /// Disarm and return true if the deadline has been reached
    pub fn take_due(&mut self) -> bool {
        if self.is_due() {
            self.deadline = None;
            true
        } else {
            false
        }
    }

    /// A future that completes at the current deadline, or never when the
    /// timer is not armed. It does not borrow the debouncer, so it can sit in
    /// a `select!` next to handlers that reschedule.
    pub fn wait(&self) -> impl Future<Output = ()> + Send + 'static {
        let deadline = self.deadline;
        async move {
            match deadline {
                Some(deadline) => sleep_until(deadline).await,
                None => pending::<()>().await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_pushes_deadline() {
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        assert!(!debouncer.is_pending());

        debouncer.schedule();
        advance(Duration::from_millis(60)).await;
        debouncer.schedule();
        advance(Duration::from_millis(60)).await;
        assert!(!debouncer.is_due());

        advance(Duration::from_millis(40)).await;
        assert!(debouncer.take_due());
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_completes_at_deadline() {
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        debouncer.schedule();
        let start = Instant::now();
        debouncer.wait().await;
        assert!(Instant::now() - start >= Duration::from_millis(100));
        assert!(debouncer.is_due());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        assert!(!debouncer.cancel());
        debouncer.schedule();
        assert!(debouncer.cancel());
        advance(Duration::from_millis(200)).await;
        assert!(!debouncer.take_due());
    }
}
