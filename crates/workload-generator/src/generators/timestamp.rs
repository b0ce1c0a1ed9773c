//! Timestamp generators relative to a caller-supplied `now`.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Seconds in a day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Days in the expiry window.
pub const EXPIRY_WINDOW_DAYS: i64 = 365;

/// A timestamp up to one day after `now` (second granularity).
pub fn within_day_after<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::seconds(rng.gen_range(0..SECONDS_PER_DAY))
}

/// A timestamp a whole number of days (under a year) after `start`.
pub fn expiry_after<R: Rng + ?Sized>(rng: &mut R, start: DateTime<Utc>) -> DateTime<Utc> {
    start + Duration::days(rng.gen_range(0..EXPIRY_WINDOW_DAYS))
}

/// A timestamp up to `max_hours` hours before `now`.
pub fn hours_before<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
    max_hours: i64,
) -> DateTime<Utc> {
    now - Duration::hours(rng.gen_range(0..max_hours))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn anchor() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_within_day_after() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let ts = within_day_after(&mut rng, anchor());
            assert!(ts >= anchor());
            assert!(ts < anchor() + Duration::days(1));
        }
    }

    #[test]
    fn test_expiry_after() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let ts = expiry_after(&mut rng, anchor());
            assert!(ts >= anchor());
            assert!(ts < anchor() + Duration::days(EXPIRY_WINDOW_DAYS));
        }
    }

    #[test]
    fn test_hours_before() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let ts = hours_before(&mut rng, anchor(), 10_000);
            assert!(ts <= anchor());
            assert!(ts > anchor() - Duration::hours(10_000));
        }
    }
}
