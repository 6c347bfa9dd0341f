use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use super::types::{Frequency, Schedule};

/// How far ahead the weekday scan looks. Two full weeks always contain
/// every weekday at least once.
const WEEKDAY_SCAN_DAYS: i64 = 14;

/// Compute when the next instance of a schedule falls due.
///
/// Daily, monthly and plain weekly schedules step forward from `anchor` by
/// `interval` units until the result is no longer before `now`; an anchor
/// already at or after `now` is returned unchanged. Catch-up jumps straight
/// to the right step, so a distant anchor costs no more than a recent one.
///
/// Weekly schedules with specific weekdays scan forward from `now`
/// (exclusive) and return the first matching day. That branch does not use
/// `interval`: every listed weekday fires.
pub fn next_due_date(schedule: &Schedule, anchor: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if schedule.frequency == Frequency::Weekly && !schedule.weekdays.is_empty() {
        return next_matching_weekday(schedule, anchor, now);
    }
    if anchor >= now {
        return anchor;
    }

    let interval = i64::from(schedule.interval);
    let caught_up = match schedule.frequency {
        Frequency::Daily => catch_up_by(anchor, now, Duration::days(interval)),
        Frequency::Weekly => catch_up_by(anchor, now, Duration::weeks(interval)),
        Frequency::Monthly => catch_up_by_months(anchor, now, interval),
    };
    caught_up.unwrap_or_else(|| {
        log::warn!("Recurrence stepping from {anchor} left the supported date range, using {now}");
        now
    })
}

/// First `anchor + k * step` (k >= 0) that is not before `now`.
fn catch_up_by(anchor: DateTime<Utc>, now: DateTime<Utc>, step: Duration) -> Option<DateTime<Utc>> {
    // Whole seconds round the gap down, so the jump never passes `now`.
    let steps = (now - anchor).num_seconds() / step.num_seconds();
    let mut next = anchor.checked_add_signed(Duration::seconds(steps * step.num_seconds()))?;
    while next < now {
        next = next.checked_add_signed(step)?;
    }
    Some(next)
}

/// Monthly counterpart of [`catch_up_by`], matching repeated [`add_months`].
///
/// A day past the 28th can spill into the following month, which moves the
/// day for every later step. Those steps are walked one at a time until the
/// day fits every month the schedule lands on; from there a single jump
/// gives the same date as stepping.
fn catch_up_by_months(anchor: DateTime<Utc>, now: DateTime<Utc>, interval: i64) -> Option<DateTime<Utc>> {
    let mut next = anchor;
    while next < now && !day_fits_every_target(next, interval) {
        next = add_months(next, interval)?;
    }
    if next >= now {
        return Some(next);
    }

    let steps = (month_index(now) - month_index(next)).div_euclid(interval);
    next = add_months(next, steps * interval)?;
    while next < now {
        next = add_months(next, interval)?;
    }
    Some(next)
}

fn month_index(at: DateTime<Utc>) -> i64 {
    i64::from(at.year()) * 12 + i64::from(at.month0())
}

/// Whether stepping by `interval` months from `from` can never overflow the
/// day of month. Target months repeat with a period of at most twelve steps.
fn day_fits_every_target(from: DateTime<Utc>, interval: i64) -> bool {
    let day = from.day();
    if day <= 28 {
        return true;
    }
    let month0 = i64::from(from.month0());
    (1..=12).all(|k| shortest_month((month0 + k * interval).rem_euclid(12)) >= day)
}

/// Fewest days the zero-based month can have in any year.
fn shortest_month(month0: i64) -> u32 {
    match month0 {
        1 => 28,
        3 | 5 | 8 | 10 => 30,
        _ => 31,
    }
}

fn next_matching_weekday(schedule: &Schedule, anchor: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let mut candidate = now;
    for _ in 0..WEEKDAY_SCAN_DAYS {
        candidate += Duration::days(1);
        if schedule.weekdays.contains(&candidate.weekday()) {
            return candidate;
        }
    }
    anchor + Duration::days(i64::from(schedule.interval) * 7)
}

/// Calendar month addition that normalizes day overflow instead of clamping:
/// January 31 plus one month is March 3 (March 2 in a leap year).
/// Time of day is kept.
pub fn add_months(from: DateTime<Utc>, months: i64) -> Option<DateTime<Utc>> {
    let naive = from.naive_utc();
    let date = naive.date();

    let total = i64::from(date.year()) * 12 + i64::from(date.month0()) + months;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;

    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let target = first.checked_add_signed(Duration::days(i64::from(date.day()) - 1))?;
    Some(target.and_time(naive.time()).and_utc())
}
