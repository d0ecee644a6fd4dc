//! Pauses between the halves of a paired down/up action.

use ::std::{thread, time::Duration};

/// Something which blocks the calling thread for a while, such as the pause
/// between pressing and releasing a key.
pub trait Delay {
    /// Blocks until the delay has passed.
    fn wait(&self);
}

impl Delay for Duration {
    fn wait(&self) {
        if !self.is_zero() {
            thread::sleep(*self);
        }
    }
}

impl<F> Delay for F
where
    F: Fn(),
{
    fn wait(&self) {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::std::{cell::Cell, time::Instant};

    #[test]
    fn test_duration_sleeps() {
        let start = Instant::now();
        Duration::from_millis(5).wait();
        assert!(start.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn test_closure_is_called() {
        let calls = Cell::new(0);
        let delay = || calls.set(calls.get() + 1);
        delay.wait();
        delay.wait();
        assert_eq!(calls.get(), 2);
    }
}
