use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use chrono::Local;

use crate::chime;
use crate::schedule::{ScheduledDish, fmt_clock};
use crate::timer::manager::TimerManager;

/// Tick cadence for the live loop. Well under the 1-second display
/// granularity, so countdown updates and cue pulses land on time even
/// though instants are wall-clock reads with no drift correction.
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Drive the live countdown/alarm loop until every dish has started and the
/// alarm cue has drained. Pressing Enter silences an in-progress alarm.
pub fn run_live(schedule: &[ScheduledDish], alarms_enabled: bool) -> Result<()> {
    if schedule.is_empty() {
        println!("Add at least one dish with a cook time to see your timeline.");
        return Ok(());
    }
    if !alarms_enabled {
        println!("Alarms are disabled (--no-alarms); nothing to watch.");
        return Ok(());
    }

    let mut manager = TimerManager::new(schedule, true, Local::now());
    let silence_requests = spawn_silence_listener();
    let mut start_log: Vec<String> = Vec::new();

    loop {
        let now = Local::now();
        if silence_requests.try_recv().is_ok() {
            manager.silence();
        }
        let outcome = manager.tick(now);
        for event in &outcome.started {
            start_log.push(format!(
                "{}  started {} ({} min)",
                fmt_clock(now),
                event.name,
                event.total_minutes
            ));
        }
        render(&manager, &start_log)?;
        if outcome.cue_pulse {
            // Failure here is absorbed; the banner still shows the start.
            let _ = chime::ring();
        }
        if manager.all_started() && !manager.cue_active() {
            println!(
                "\nAll dishes started. Serve at {}.",
                fmt_clock(schedule[0].end_at)
            );
            return Ok(());
        }
        thread::sleep(TICK_INTERVAL);
    }
}

/// Forward a unit per line read from stdin; the loop treats each as a
/// silence request. The thread parks on stdin and dies with the process.
fn spawn_silence_listener() -> Receiver<()> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            if line.is_err() || tx.send(()).is_err() {
                break;
            }
        }
    });
    rx
}

fn render(manager: &TimerManager, start_log: &[String]) -> Result<()> {
    let timers = manager.timers();
    let mut out = io::stdout().lock();
    // Home + clear; plain ANSI keeps the loop dependency-free.
    write!(out, "\x1b[2J\x1b[1;1H")?;
    if let Some(first) = timers.first() {
        writeln!(out, "HotDish — serve at {}", fmt_clock(first.end_at))?;
        writeln!(out)?;
    }
    for timer in timers {
        let countdown = manager.countdown(&timer.id).unwrap_or("--:--");
        writeln!(
            out,
            "  {:<28} start {}  total {:>3} min  [{}]",
            timer.name,
            fmt_clock(timer.start_at),
            timer.total_minutes,
            countdown
        )?;
    }
    if !start_log.is_empty() {
        writeln!(out)?;
        for line in start_log {
            writeln!(out, "  {line}")?;
        }
    }
    if let Some(banner) = manager.banner() {
        writeln!(out, "\n  >>> {banner}  (Enter to silence)")?;
    }
    writeln!(
        out,
        "\n{} dish(es) still pending. Ctrl-C to quit.",
        manager.pending_count()
    )?;
    out.flush()?;
    Ok(())
}
