use std::time::Duration;

/// Exponential backoff for derivation step re-attempts.
///
/// The delay doubles with each consecutive failed attempt and saturates at
/// the configured maximum, so a long outage never pushes re-attempts out
/// further than the cap.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ExponentialBackoff {
    /// The base delay, applied before the first re-attempt is doubled.
    min: Duration,
    /// The ceiling for the delay.
    max: Duration,
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self { min: Duration::from_millis(50), max: Duration::from_secs(10) }
    }
}

impl ExponentialBackoff {
    /// Returns the delay before the next re-attempt, given the number of
    /// consecutive failed attempts so far.
    pub(crate) fn duration(&self, attempts: u32) -> Duration {
        let factor = 1u32.checked_shl(attempts).unwrap_or(u32::MAX);
        self.min.saturating_mul(factor).min(self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_double_until_the_cap() {
        let backoff = ExponentialBackoff::default();

        assert_eq!(backoff.duration(1), Duration::from_millis(100));
        assert_eq!(backoff.duration(2), Duration::from_millis(200));
        assert_eq!(backoff.duration(3), Duration::from_millis(400));
        assert_eq!(backoff.duration(7), Duration::from_millis(6_400));
        assert_eq!(backoff.duration(8), Duration::from_secs(10));
    }

    #[test]
    fn delays_are_monotonic_and_bounded() {
        let backoff = ExponentialBackoff::default();

        let mut previous = Duration::ZERO;
        for attempts in 1..100 {
            let delay = backoff.duration(attempts);
            assert!(delay >= previous, "delay shrank at attempt {attempts}");
            assert!(delay <= Duration::from_secs(10), "delay above cap at attempt {attempts}");
            previous = delay;
        }

        assert_eq!(backoff.duration(99), Duration::from_secs(10));
    }
}
