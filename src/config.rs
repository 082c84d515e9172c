//! Runtime settings for the `gridworld` binary, taken from the environment.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

pub const PUZZLES_VAR: &str = "GRIDWORLD_PUZZLES";
pub const QUIET_VAR: &str = "GRIDWORLD_QUIET";
pub const MAX_STEPS_VAR: &str = "GRIDWORLD_MAX_STEPS";
pub const DEFAULT_PUZZLES_DIR: &str = "puzzles";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory puzzle file names are resolved against.
    pub puzzles_dir: PathBuf,
    /// Replace the per-step trace with a spinner.
    pub quiet: bool,
    /// Give up after this many dequeues.
    pub max_steps: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            puzzles_dir: PathBuf::from(DEFAULT_PUZZLES_DIR),
            quiet: false,
            max_steps: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(dir) = lookup(PUZZLES_VAR).filter(|dir| !dir.is_empty()) {
            config.puzzles_dir = dir.into();
        }
        if let Some(quiet) = lookup(QUIET_VAR) {
            config.quiet = match quiet.trim() {
                "" | "0" => false,
                "1" => true,
                v => bail!("Invalid {QUIET_VAR}: {v:?}, expecting 0 or 1"),
            };
        }
        if let Some(max_steps) = lookup(MAX_STEPS_VAR) {
            let max_steps = max_steps
                .trim()
                .parse::<usize>()
                .with_context(|| format!("Invalid {MAX_STEPS_VAR}: {max_steps:?}"))?;
            config.max_steps = Some(max_steps);
        }
        Ok(config)
    }
}
