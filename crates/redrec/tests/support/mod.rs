#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock};

use clap::Parser;
use redrec::app::OperationPicker;
use redrec::cli::Cli;
use redrec::config::EnvConfig;
use redrec_tui::{SelectError, Selection};
use tempfile::TempDir;

/// Serializes script creation and process spawning. A script still open for
/// writing in one thread while another forks fails with `ETXTBSY`.
pub fn spawn_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    match LOCK.get_or_init(|| Mutex::new(())).lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir should be created"),
        }
    }

    pub fn workspace(&self) -> PathBuf {
        self.dir.path().join("workspace")
    }

    pub fn registry(&self) -> PathBuf {
        self.workspace().join("operations")
    }

    pub fn seed_registry(&self, names: &[&str]) {
        fs::create_dir_all(self.workspace()).expect("workspace created");
        let mut content = String::new();
        for name in names {
            content.push_str(name);
            content.push('\n');
        }
        fs::write(self.registry(), content).expect("registry written");
    }

    pub fn registry_contents(&self) -> String {
        fs::read_to_string(self.registry()).unwrap_or_default()
    }

    /// A recorder that writes its argv, one per line, into the output file
    /// and exits with `exit_code`.
    pub fn fake_recorder(&self, exit_code: i32) -> PathBuf {
        self.script(
            &format!("fake-rec-{exit_code}"),
            &format!("#!/bin/sh\nprintf '%s\\n' \"$@\" > \"$4\"\nexit {exit_code}\n"),
        )
    }

    pub fn script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        {
            let mut file = File::create(&path).expect("script created");
            file.write_all(body.as_bytes()).expect("script written");
            file.sync_all().expect("script synced");
        }
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("script mode set");
        path
    }

    pub fn cli(&self, recorder: &Path, args: &[&str]) -> Cli {
        let workspace = self.workspace();
        let mut argv = vec![
            "redrec".to_string(),
            "--workspace".to_string(),
            workspace.to_string_lossy().into_owned(),
            "--recorder".to_string(),
            recorder.to_string_lossy().into_owned(),
        ];
        argv.extend(args.iter().map(|arg| arg.to_string()));
        Cli::try_parse_from(argv).expect("parse")
    }
}

pub fn no_env() -> EnvConfig {
    EnvConfig::default()
}

/// Picker double that records what it was offered.
pub struct PickerSpy {
    answer: Option<Selection>,
    pub offered: Vec<Vec<String>>,
}

impl PickerSpy {
    pub fn answering(answer: Selection) -> Self {
        Self {
            answer: Some(answer),
            offered: Vec::new(),
        }
    }

    /// Fails the test if it is ever consulted.
    pub fn unused() -> Self {
        Self {
            answer: None,
            offered: Vec::new(),
        }
    }
}

impl OperationPicker for PickerSpy {
    fn pick(&mut self, operations: Vec<String>) -> Result<Selection, SelectError> {
        self.offered.push(operations);
        Ok(self
            .answer
            .clone()
            .expect("picker must not be consulted in this flow"))
    }
}
