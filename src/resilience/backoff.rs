//! Exponential backoff without jitter.

use std::time::Duration;

/// Delay to wait after the failed attempt with index `attempt` (0-based).
///
/// `base * 2^attempt`, saturating instead of overflowing.
pub fn backoff_delay(attempt: u32, base: Duration) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}
