use std::time::{Duration, Instant};

/// Stopwatch started on construction.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Timer {
    pub curr: Instant,
}

impl Default for Timer {
    fn default() -> Self {
        Self { curr: Instant::now() }
    }
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the timer was created.
    #[inline(always)]
    pub fn stop(&self) -> Duration {
        self.curr.elapsed()
    }
}

#[test]
fn test_timer_measures_elapsed_time() {
    use std::thread;

    let timer = Timer::new();
    thread::sleep(Duration::from_millis(20));
    let first = timer.stop();
    let second = timer.stop();

    assert!(first >= Duration::from_millis(20));
    assert!(second >= first);
}
