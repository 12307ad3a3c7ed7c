use chrono::{DateTime, Duration, Local};

/// Interval between audible cues within a run.
pub const CUE_REPEAT_MS: i64 = 800;
/// Total length of a cue run before it drains on its own.
pub const CUE_TOTAL_MS: i64 = 10_000;

/// A bounded, repeating alarm-cue run: an immediate cue, then one per repeat
/// slot until the run expires or is stopped. At most one run is live at a
/// time; starting a new run cancels any in-progress one.
#[derive(Debug, Default)]
pub struct CueSequence {
    run: Option<CueRun>,
}

#[derive(Debug)]
struct CueRun {
    ends_at: DateTime<Local>,
    last_slot: Option<i64>,
}

impl CueSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a fresh run, replacing any in-progress one. The first `tick`
    /// after this cues immediately.
    pub fn start(&mut self, now: DateTime<Local>) {
        self.run = Some(CueRun {
            ends_at: now + Duration::milliseconds(CUE_TOTAL_MS),
            last_slot: None,
        });
    }

    /// Stop the run. No cue fires after this.
    pub fn stop(&mut self) {
        self.run = None;
    }

    pub fn is_active(&self) -> bool {
        self.run.is_some()
    }

    /// Advance the run; returns true when an audible cue is due this tick.
    /// Cues are de-duplicated per repeat slot so the caller may tick faster
    /// than the repeat interval.
    pub fn tick(&mut self, now: DateTime<Local>) -> bool {
        let Some(run) = &mut self.run else {
            return false;
        };
        if now >= run.ends_at {
            self.run = None;
            return false;
        }
        let slot = now.timestamp_millis().div_euclid(CUE_REPEAT_MS);
        if run.last_slot != Some(slot) {
            run.last_slot = Some(slot);
            true
        } else {
            false
        }
    }
}
