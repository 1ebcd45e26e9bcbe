use chrono::{DateTime, Duration, Local, LocalResult, NaiveDate, NaiveTime, TimeZone};

/// Midnight of the given date in the local timezone. A DST jump can make
/// midnight skipped or doubled; the earliest valid instant wins.
pub fn local_midnight(date: NaiveDate) -> DateTime<Local> {
    match Local.from_local_datetime(&date.and_time(NaiveTime::MIN)) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => Local.from_utc_datetime(&date.and_time(NaiveTime::MIN)),
    }
}

/// Half-open [midnight, next midnight) window containing `now`.
pub fn day_bounds(now: DateTime<Local>) -> (DateTime<Local>, DateTime<Local>) {
    let start = local_midnight(now.date_naive());
    let end = local_midnight(now.date_naive() + Duration::days(1));
    (start, end)
}

/// Milliseconds until the quota resets at the next local midnight.
pub fn millis_until_reset(now: DateTime<Local>) -> i64 {
    let (_, end) = day_bounds(now);
    (end - now).num_milliseconds().max(1)
}

pub fn remaining(limit: i64, used: i64) -> i64 {
    (limit - used).max(0)
}

#[cfg(test)]
mod test {
    use super::*;

    fn midday() -> DateTime<Local> {
        local_midnight(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()) + Duration::hours(12)
    }

    #[test]
    fn remaining_never_negative() {
        assert_eq!(remaining(3, 0), 3);
        assert_eq!(remaining(3, 2), 1);
        assert_eq!(remaining(3, 3), 0);
        assert_eq!(remaining(3, 5), 0);
    }

    #[test]
    fn day_bounds_contain_now() {
        let now = Local::now();
        let (start, end) = day_bounds(now);
        assert!(start <= now);
        assert!(now < end);
    }

    #[test]
    fn day_spans_24_hours() {
        let (start, end) = day_bounds(midday());
        assert_eq!(end - start, Duration::days(1));
    }

    #[test]
    fn reset_is_at_most_a_day_away() {
        let m = millis_until_reset(Local::now());
        assert!(m > 0);
        assert!(m <= 86_400_000);
    }

    #[test]
    fn reset_from_midday() {
        assert_eq!(millis_until_reset(midday()), 43_200_000);
    }
}
