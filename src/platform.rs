//! Where the drying tracker keeps its state on disk.
//!
//! The directory is picked from a fallback chain so the tracker still works
//! when `$HOME` is read-only (CI runners, sandboxes).

use crate::config::{APP_DIR, StateConfig};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Lock file and state file of one state directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePaths {
    pub lock: PathBuf,
    pub state: PathBuf,
}

impl StatePaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            lock: dir.join("state.lock"),
            state: dir.join("state.json"),
        }
    }

    pub fn resolve(config: &StateConfig) -> Result<Self> {
        let dir = state_dir(config.state_dir_override.as_deref())?;
        Ok(Self::in_dir(&dir))
    }
}

/// Pick the state directory.
///
/// Priority order:
/// 1. Explicit override
/// 2. `~/.timecode`
/// 3. Platform data directory (XDG on Linux, AppData on Windows)
/// 4. `.timecode` in the working directory
pub fn state_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        ensure_writable(dir)?;
        return Ok(dir.to_path_buf());
    }

    let candidates = [
        home::home_dir().map(|home| home.join(APP_DIR)),
        dirs::data_local_dir().map(|data| data.join("timecode")),
    ];

    for dir in candidates.into_iter().flatten() {
        match ensure_writable(&dir) {
            Ok(()) => return Ok(dir),
            Err(e) => log::warn!("{:#}. Trying fallback locations.", e),
        }
    }

    let dir = PathBuf::from(APP_DIR);
    ensure_writable(&dir).context(
        "Cannot create state directory in any location. \
         Check file permissions or set state.state_dir_override in config.",
    )?;
    Ok(dir)
}

/// Create `dir` if needed and check that a file can be written into it.
pub fn ensure_writable(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let test_file = dir.join(".write_test");
    fs::write(&test_file, b"test")
        .with_context(|| format!("Directory {} is not writable", dir.display()))?;
    // Antivirus on Windows may still hold the test file open
    let _ = fs::remove_file(&test_file);

    Ok(())
}
