use std::io::{self, Write};

/// Sound the terminal bell twice (the audible start cue). Best-effort:
/// returns whether the cue was written, and absorbs every failure so a
/// missing or broken output device can never disturb the countdown loop.
pub fn ring() -> bool {
    attempt_ring(&mut io::stdout()).is_ok()
}

fn attempt_ring(out: &mut impl Write) -> io::Result<()> {
    out.write_all(b"\x07\x07")?;
    out.flush()
}
