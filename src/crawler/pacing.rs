//! Politeness pacing between comment page requests
//!
//! The crawler waits a randomized interval before every request so it
//! does not hammer the remote service. Pacing is a best-effort courtesy,
//! not a correctness mechanism, so it sits behind the [`Pacer`] trait and
//! tests inject [`NoPacer`] to run the retrieval loop without wall-clock
//! waiting.

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// Strategy for pausing between page requests
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Wait before the next request is issued
    async fn pause(&self);
}

/// Pacer that sleeps a uniform random duration from a configured interval
pub struct RandomPacer {
    min: Duration,
    max: Duration,
}

impl RandomPacer {
    /// Create a pacer over `[min, max]`
    ///
    /// An inverted interval is treated as the fixed delay `min`.
    #[must_use]
    pub fn new(min: Duration, max: Duration) -> Self {
        let max = max.max(min);
        Self { min, max }
    }

    /// Draw one delay from the interval
    fn draw(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let mut rng = rand::thread_rng();
        rng.gen_range(self.min..=self.max)
    }
}

impl Default for RandomPacer {
    /// The reference interval: 2-5 seconds
    fn default() -> Self {
        Self::new(Duration::from_secs(2), Duration::from_secs(5))
    }
}

#[async_trait]
impl Pacer for RandomPacer {
    async fn pause(&self) {
        let delay = self.draw();
        tracing::debug!(delay_ms = %delay.as_millis(), "Politeness delay before next page");
        tokio::time::sleep(delay).await;
    }
}

/// Pacer that never waits; used by tests and offline runs
pub struct NoPacer;

#[async_trait]
impl Pacer for NoPacer {
    async fn pause(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_stays_in_interval() {
        let pacer = RandomPacer::new(Duration::from_millis(10), Duration::from_millis(50));
        for _ in 0..100 {
            let d = pacer.draw();
            assert!(d >= Duration::from_millis(10));
            assert!(d <= Duration::from_millis(50));
        }
    }

    #[test]
    fn test_degenerate_interval_is_fixed() {
        let pacer = RandomPacer::new(Duration::from_millis(30), Duration::from_millis(30));
        assert_eq!(pacer.draw(), Duration::from_millis(30));
    }

    #[test]
    fn test_inverted_interval_clamps() {
        let pacer = RandomPacer::new(Duration::from_millis(50), Duration::from_millis(10));
        assert_eq!(pacer.draw(), Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_no_pacer_returns_immediately() {
        let start = std::time::Instant::now();
        NoPacer.pause().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
