use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub const DEMO_PRO_VAR: &str = "HOTDISH_DEMO_PRO";
const MARKER_FILE: &str = "pro";

/// Whether paid-tier features are unlocked for this invocation. Checked once
/// per session and treated as an immutable input afterwards:
/// - `HOTDISH_DEMO_PRO=true`/`1` (demo override), or
/// - the `--demo-pro` flag, or
/// - the activation marker next to the plan store (written by `activate`).
pub fn pro_enabled(demo_flag: bool, store_path: &Path) -> bool {
    if demo_flag || env_demo_enabled() {
        return true;
    }
    marker_path(store_path).exists()
}

/// Mark this machine as Pro; the analog of landing on the post-payment
/// success page.
pub fn activate(store_path: &Path) -> Result<PathBuf> {
    let marker = marker_path(store_path);
    if let Some(parent) = marker.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("unable to create {}", parent.display()))?;
    }
    fs::write(&marker, "1\n").with_context(|| format!("unable to write {}", marker.display()))?;
    Ok(marker)
}

fn env_demo_enabled() -> bool {
    std::env::var(DEMO_PRO_VAR)
        .map(|v| {
            let v = v.trim().to_ascii_lowercase();
            v == "true" || v == "1"
        })
        .unwrap_or(false)
}

fn marker_path(store_path: &Path) -> PathBuf {
    match store_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(MARKER_FILE),
        _ => PathBuf::from(MARKER_FILE),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn demo_flag_unlocks_without_marker() {
        let dir = tempdir().expect("tempdir");
        let store = dir.path().join("plans.json");
        assert!(pro_enabled(true, &store));
    }

    #[test]
    fn activation_marker_unlocks() {
        let dir = tempdir().expect("tempdir");
        let store = dir.path().join("plans.json");
        assert!(!pro_enabled(false, &store));

        let marker = activate(&store).expect("activate");
        assert!(marker.exists());
        assert!(pro_enabled(false, &store));
    }
}
