use std::collections::HashMap;

use chrono::{DateTime, Duration, Local};

use crate::schedule::ScheduledDish;
use crate::timer::cue::CueSequence;

/// Countdown display sentinel once a dish's start instant has passed.
pub const GO_SENTINEL: &str = "Go!";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DishPhase {
    Pending,
    Started,
}

#[derive(Debug, Clone)]
pub struct DishTimer {
    pub id: String,
    pub name: String,
    pub total_minutes: u32,
    pub start_at: DateTime<Local>,
    pub end_at: DateTime<Local>,
    pub phase: DishPhase,
}

/// One-shot notification for a dish whose start instant was crossed by a
/// tick. Emitted exactly once per dish per timer set.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StartEvent {
    #[allow(dead_code)]
    pub id: String,
    pub name: String,
    pub total_minutes: u32,
}

#[derive(Debug, Default)]
pub struct TickOutcome {
    /// Start events fired this tick, in schedule order.
    pub started: Vec<StartEvent>,
    /// True when an audible cue is due this tick.
    pub cue_pulse: bool,
}

/// Owns the full per-dish timer set for one schedule: countdown displays,
/// the pending/started phase per dish, the alarm banner, and the single
/// in-progress cue run. The only supported transition between schedules is
/// cancel-all-then-rebuild; no timer from a superseded set survives.
#[derive(Debug, Default)]
pub struct TimerManager {
    timers: Vec<DishTimer>,
    countdowns: HashMap<String, String>,
    banner: Option<String>,
    cue: CueSequence,
    enabled: bool,
}

impl TimerManager {
    pub fn new(schedule: &[ScheduledDish], enabled: bool, now: DateTime<Local>) -> Self {
        let mut manager = Self::default();
        manager.rebuild(schedule, enabled, now);
        manager
    }

    /// Tear down every outstanding timer, the banner, and any cue run, then
    /// install a fresh set for `schedule`. A dish whose start instant has
    /// already passed enters `Started` immediately with no start event, so a
    /// rebuild never re-alarms for old crossings.
    pub fn rebuild(&mut self, schedule: &[ScheduledDish], enabled: bool, now: DateTime<Local>) {
        self.timers.clear();
        self.countdowns.clear();
        self.banner = None;
        self.cue.stop();
        self.enabled = enabled;
        if !enabled {
            return;
        }

        for dish in schedule {
            let phase = if dish.start_at <= now {
                DishPhase::Started
            } else {
                DishPhase::Pending
            };
            let display = match phase {
                DishPhase::Started => GO_SENTINEL.to_string(),
                DishPhase::Pending => format_countdown(dish.start_at - now),
            };
            self.countdowns.insert(dish.id.clone(), display);
            self.timers.push(DishTimer {
                id: dish.id.clone(),
                name: dish.name.clone(),
                total_minutes: dish.total_minutes,
                start_at: dish.start_at,
                end_at: dish.end_at,
                phase,
            });
        }
    }

    /// Advance every timer to `now`. Pending dishes whose start instant has
    /// been reached transition to `Started` (once), emit a start event, and
    /// flip their display to the sentinel; the rest get their countdown
    /// recomputed. Any start event replaces the banner and restarts the cue
    /// run from the beginning.
    pub fn tick(&mut self, now: DateTime<Local>) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if !self.enabled {
            return outcome;
        }

        for timer in &mut self.timers {
            if timer.phase == DishPhase::Started {
                continue;
            }
            if now >= timer.start_at {
                timer.phase = DishPhase::Started;
                self.countdowns
                    .insert(timer.id.clone(), GO_SENTINEL.to_string());
                outcome.started.push(StartEvent {
                    id: timer.id.clone(),
                    name: timer.name.clone(),
                    total_minutes: timer.total_minutes,
                });
            } else {
                self.countdowns
                    .insert(timer.id.clone(), format_countdown(timer.start_at - now));
            }
        }

        if let Some(event) = outcome.started.last() {
            self.banner = Some(format!("Start: {} ({} min)", event.name, event.total_minutes));
            self.cue.start(now);
        }
        outcome.cue_pulse = self.cue.tick(now);
        outcome
    }

    /// User cancel: stop the cue run and dismiss the banner.
    pub fn silence(&mut self) {
        self.cue.stop();
        self.banner = None;
    }

    pub fn countdown(&self, dish_id: &str) -> Option<&str> {
        self.countdowns.get(dish_id).map(String::as_str)
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn timers(&self) -> &[DishTimer] {
        &self.timers
    }

    /// Number of live countdown timers (dishes still waiting to start).
    pub fn pending_count(&self) -> usize {
        self.timers
            .iter()
            .filter(|t| t.phase == DishPhase::Pending)
            .count()
    }

    pub fn all_started(&self) -> bool {
        self.timers.iter().all(|t| t.phase == DishPhase::Started)
    }

    pub fn cue_active(&self) -> bool {
        self.cue.is_active()
    }
}

/// Remaining time as zero-padded `mm:ss`, clamped non-negative. Minutes are
/// not wrapped at an hour.
pub fn format_countdown(remaining: Duration) -> String {
    let secs = remaining.num_seconds().max(0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
