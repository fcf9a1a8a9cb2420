//! Environment configuration and its merge with command-line flags.

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::cli::Cli;
use crate::paths;

pub const WORKSPACE_ENV: &str = "REDREC_WORKSPACE";
pub const RECORDER_ENV: &str = "REDREC_RECORDER";
pub const LOG_ENV: &str = "REDREC_LOG";
pub const DEFAULT_RECORDER: &str = "asciinema";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    pub home: Option<PathBuf>,
    pub workspace: Option<PathBuf>,
    pub recorder: Option<String>,
    pub log_filter: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            home: env_string_opt("HOME").map(PathBuf::from),
            workspace: env_string_opt(WORKSPACE_ENV).map(PathBuf::from),
            recorder: env_string_opt(RECORDER_ENV),
            log_filter: env_string_opt(LOG_ENV),
        }
    }
}

/// Effective settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub workspace: PathBuf,
    pub recorder: String,
}

impl Settings {
    /// Flags win over the environment, which wins over defaults.
    pub fn resolve(cli: &Cli, env: &EnvConfig) -> Result<Self> {
        let workspace = match (&cli.workspace, &env.workspace, &env.home) {
            (Some(dir), _, _) | (None, Some(dir), _) => dir.clone(),
            (None, None, Some(home)) => paths::default_workspace(home),
            (None, None, None) => {
                bail!("HOME is not set; pass --workspace or set {WORKSPACE_ENV}")
            }
        };

        let recorder = cli
            .recorder
            .clone()
            .filter(|program| !program.trim().is_empty())
            .or_else(|| env.recorder.clone())
            .unwrap_or_else(|| DEFAULT_RECORDER.to_string());

        Ok(Self {
            workspace,
            recorder,
        })
    }
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}
