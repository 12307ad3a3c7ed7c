use chrono::{DateTime, Duration, Local, LocalResult, NaiveTime, TimeZone};

use crate::dish::Dish;

/// A dish enriched with its computed timeline. Derived fresh from current
/// inputs on every recomputation; never mutated incrementally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledDish {
    pub id: String,
    pub name: String,
    pub prep_minutes: u32,
    pub cook_minutes: u32,
    pub total_minutes: u32,
    pub start_at: DateTime<Local>,
    pub end_at: DateTime<Local>,
}

/// Compute the backward schedule against the current wall clock.
pub fn compute(serve_time: &str, dishes: &[Dish]) -> Vec<ScheduledDish> {
    compute_with_now(serve_time, dishes, Local::now())
}

/// Compute the backward schedule: resolve the serve time against `now`'s
/// local calendar date, then start each dish `prep + cook` minutes earlier
/// so everything finishes at the serve instant.
///
/// Total over its domain: malformed inputs are coerced, never rejected.
/// Dishes with a blank name or no cook time are excluded (prep-only entries
/// never appear in the timeline).
pub fn compute_with_now(serve_time: &str, dishes: &[Dish], now: DateTime<Local>) -> Vec<ScheduledDish> {
    let serve = resolve_serve_instant(serve_time, now);

    let mut scheduled: Vec<ScheduledDish> = dishes
        .iter()
        .filter(|d| !d.name.trim().is_empty() && d.cook_minutes > 0)
        .map(|d| {
            // Totals saturate; compute never fails, even on absurd durations.
            let total = d.prep_minutes.saturating_add(d.cook_minutes);
            ScheduledDish {
                id: d.id.clone(),
                name: d.name.clone(),
                prep_minutes: d.prep_minutes,
                cook_minutes: d.cook_minutes,
                total_minutes: total,
                start_at: serve - Duration::minutes(i64::from(total)),
                end_at: serve,
            }
        })
        .collect();

    // sort_by_key is stable, so equal start instants keep entry order.
    scheduled.sort_by_key(|s| s.start_at);
    scheduled
}

/// Resolve a `HH:MM` serve time against `now`'s local date. Empty input
/// defaults to 18:00; a non-numeric component falls back to 0; out-of-range
/// components are clamped to a valid time-of-day.
pub fn resolve_serve_instant(serve_time: &str, now: DateTime<Local>) -> DateTime<Local> {
    let time = parse_serve_time(serve_time);
    let naive = now.date_naive().and_time(time);
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(first, _second) => first,
        // DST gap at the serve time; degrade rather than fail.
        LocalResult::None => now,
    }
}

fn parse_serve_time(raw: &str) -> NaiveTime {
    let trimmed = raw.trim();
    let source = if trimmed.is_empty() { "18:00" } else { trimmed };

    let mut parts = source.splitn(2, ':');
    let hour = parse_component(parts.next());
    let minute = parse_component(parts.next());
    // Clamped values always form a valid time; the fallback is unreachable.
    NaiveTime::from_hms_opt(hour.min(23), minute.min(59), 0).unwrap_or_default()
}

fn parse_component(part: Option<&str>) -> u32 {
    part.and_then(|p| p.trim().parse::<u32>().ok()).unwrap_or(0)
}

/// `HH:MM` display form of a schedule instant.
pub fn fmt_clock(at: DateTime<Local>) -> String {
    at.format("%H:%M").to_string()
}
