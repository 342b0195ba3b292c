//! Grace-period policy.
//!
//! Absence of either the start time or the duration counts as expired, so a
//! disabled or half-written expiry configuration always falls back to
//! prompting for the secret.

use std::time::Duration;

use crate::clock::Timestamp;

/// Whether the grace period that started at `start` has lapsed by `now`.
///
/// Returns `true` when either input is absent, when `now - start >= duration`,
/// or when `now` is earlier than `start` (clock rolled back).
pub fn is_expired(now: Timestamp, start: Option<Timestamp>, duration: Option<Duration>) -> bool {
    let (Some(start), Some(duration)) = (start, duration) else {
        return true;
    };
    let elapsed = now.secs_since(start);
    if !elapsed.is_finite() || elapsed < 0.0 {
        return true;
    }
    elapsed >= duration.as_secs_f64()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(secs: f64) -> Timestamp {
        Timestamp(secs)
    }

    fn d(secs: u64) -> Option<Duration> {
        Some(Duration::from_secs(secs))
    }

    #[test]
    fn absent_start_is_expired() {
        assert!(is_expired(t(0.0), None, d(30)));
        assert!(is_expired(t(1e9), None, d(0)));
    }

    #[test]
    fn absent_duration_is_expired() {
        assert!(is_expired(t(100.0), Some(t(100.0)), None));
        assert!(is_expired(t(100.0), None, None));
    }

    #[test]
    fn within_window_not_expired() {
        assert!(!is_expired(t(120.0), Some(t(100.0)), d(30)));
        assert!(!is_expired(t(100.0), Some(t(100.0)), d(30)));
    }

    #[test]
    fn boundary_is_expired() {
        assert!(is_expired(t(130.0), Some(t(100.0)), d(30)));
        assert!(is_expired(t(135.0), Some(t(100.0)), d(30)));
    }

    #[test]
    fn zero_duration_always_expired() {
        assert!(is_expired(t(100.0), Some(t(100.0)), d(0)));
    }

    #[test]
    fn monotonic_over_elapsed_time() {
        let start = t(1_000.0);
        let dur = Duration::from_millis(7_500);
        let mut seen_expired = false;
        for step in 0..200 {
            let now = t(1_000.0 + step as f64 * 0.1);
            let expired = is_expired(now, Some(start), Some(dur));
            assert_eq!(expired, now.secs_since(start) >= dur.as_secs_f64());
            if seen_expired {
                assert!(expired, "expiry must not revert at step {step}");
            }
            seen_expired |= expired;
        }
        assert!(seen_expired);
    }

    #[test]
    fn clock_rollback_is_expired() {
        assert!(is_expired(t(90.0), Some(t(100.0)), d(30)));
    }

    #[test]
    fn non_finite_elapsed_is_expired() {
        assert!(is_expired(t(f64::NAN), Some(t(100.0)), d(30)));
    }
}
