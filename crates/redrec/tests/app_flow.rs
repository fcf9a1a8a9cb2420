mod support;

use std::fs;
use std::path::Path;

use operation_store::OperationStore;
use pretty_assertions::assert_eq;
use redrec::app::{self, resolve_operation, OperationRequest, Outcome, NO_OPERATIONS_MESSAGE};
use redrec::recorder::RecorderError;
use redrec_tui::Selection;
use support::{no_env, spawn_lock, PickerSpy, Sandbox};

fn recorded(outcome: Outcome) -> (String, std::path::PathBuf) {
    match outcome {
        Outcome::Recorded { operation, path } => (operation, path),
        Outcome::Cancelled => panic!("expected a recording"),
    }
}

fn recorder_args(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("fake recorder wrote its arguments")
        .lines()
        .map(str::to_string)
        .collect()
}

fn assert_recording_name(path: &Path) {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .expect("utf-8 file name");
    assert!(name.starts_with("session_"), "{name}");
    assert!(name.ends_with(".cast"), "{name}");
    // session_YYYYMMDD_HHMMSS.cast
    assert_eq!(name.len(), "session_20240101_000000.cast".len(), "{name}");
}

#[test]
fn explicit_operation_is_registered_and_recorded() {
    let _lock = spawn_lock();
    let sandbox = Sandbox::new();
    let recorder = sandbox.fake_recorder(0);
    let cli = sandbox.cli(&recorder, &["ls -la", "recon"]);

    let outcome = app::run(&cli, &no_env(), &mut PickerSpy::unused()).expect("run");
    let (operation, path) = recorded(outcome);

    assert_eq!(operation, "recon");
    assert_eq!(path.parent(), Some(sandbox.workspace().join("recon").as_path()));
    assert_recording_name(&path);
    assert_eq!(sandbox.registry_contents(), "recon\n");
    assert_eq!(
        recorder_args(&path),
        vec![
            "rec".to_string(),
            "-c".to_string(),
            "ls -la".to_string(),
            path.to_string_lossy().into_owned(),
        ]
    );
}

#[test]
fn default_operation_is_the_last_registered() {
    let _lock = spawn_lock();
    let sandbox = Sandbox::new();
    sandbox.seed_registry(&["recon", "exploit"]);
    let recorder = sandbox.fake_recorder(0);

    let outcome =
        app::run(&sandbox.cli(&recorder, &["bash"]), &no_env(), &mut PickerSpy::unused())
            .expect("run");

    let (operation, _) = recorded(outcome);
    assert_eq!(operation, "exploit");
    assert_eq!(sandbox.registry_contents(), "recon\nexploit\n");
}

#[test]
fn empty_registry_falls_back_to_currentoperation() {
    let _lock = spawn_lock();
    let sandbox = Sandbox::new();
    let recorder = sandbox.fake_recorder(0);

    let outcome =
        app::run(&sandbox.cli(&recorder, &["bash"]), &no_env(), &mut PickerSpy::unused())
            .expect("run");

    let (operation, path) = recorded(outcome);
    assert_eq!(operation, "currentoperation");
    assert!(path.starts_with(sandbox.workspace().join("currentoperation")));
    assert_eq!(sandbox.registry_contents(), "currentoperation\n");
}

#[test]
fn select_offers_registry_in_order_and_records_choice() {
    let _lock = spawn_lock();
    let sandbox = Sandbox::new();
    sandbox.seed_registry(&["alpha", "beta", "gamma"]);
    let recorder = sandbox.fake_recorder(0);
    let mut picker = PickerSpy::answering(Selection::Confirmed("beta".to_string()));

    let outcome =
        app::run(&sandbox.cli(&recorder, &["bash", "-s"]), &no_env(), &mut picker).expect("run");

    assert_eq!(picker.offered, vec![vec!["alpha", "beta", "gamma"]]);
    let (operation, _) = recorded(outcome);
    assert_eq!(operation, "beta");
    assert_eq!(sandbox.registry_contents(), "alpha\nbeta\ngamma\n");
}

#[test]
fn cancelled_selection_records_nothing() {
    let _lock = spawn_lock();
    let sandbox = Sandbox::new();
    sandbox.seed_registry(&["alpha"]);
    let recorder = sandbox.fake_recorder(0);
    let mut picker = PickerSpy::answering(Selection::Cancelled);

    let outcome =
        app::run(&sandbox.cli(&recorder, &["bash", "-s"]), &no_env(), &mut picker).expect("run");

    assert_eq!(outcome, Outcome::Cancelled);
    assert_eq!(sandbox.registry_contents(), "alpha\n");
    assert!(!sandbox.workspace().join("alpha").exists());
}

#[test]
fn select_with_empty_registry_fails_without_picker() {
    let _lock = spawn_lock();
    let sandbox = Sandbox::new();
    let recorder = sandbox.fake_recorder(0);

    let err = app::run(
        &sandbox.cli(&recorder, &["bash", "--select"]),
        &no_env(),
        &mut PickerSpy::unused(),
    )
    .expect_err("nothing to select");

    assert_eq!(format!("{err:#}"), NO_OPERATIONS_MESSAGE);
    assert_eq!(sandbox.registry_contents(), "");
}

#[test]
fn missing_recorder_is_reported_before_anything_else() {
    let sandbox = Sandbox::new();
    let missing = sandbox.dir.path().join("no-such-recorder");
    let cli = sandbox.cli(&missing, &["bash", "recon"]);

    let err = app::run(&cli, &no_env(), &mut PickerSpy::unused()).expect_err("not installed");

    assert_eq!(
        format!("{err:#}"),
        format!("{} is not installed.", missing.display())
    );
    assert!(!sandbox.workspace().exists(), "workspace must not be touched");
}

#[test]
fn recorder_failure_keeps_the_registration() {
    let _lock = spawn_lock();
    let sandbox = Sandbox::new();
    let recorder = sandbox.fake_recorder(3);

    let err = app::run(
        &sandbox.cli(&recorder, &["bash", "recon"]),
        &no_env(),
        &mut PickerSpy::unused(),
    )
    .expect_err("recorder exits 3");

    assert!(matches!(
        err.downcast_ref::<RecorderError>(),
        Some(RecorderError::Failed { code: 3 })
    ));
    assert_eq!(format!("{err:#}"), "Recording failed with exit code 3");
    assert_eq!(sandbox.registry_contents(), "recon\n");
}

#[test]
fn recorder_killed_by_signal_is_reported() {
    let _lock = spawn_lock();
    let sandbox = Sandbox::new();
    let recorder = sandbox.script("self-kill", "#!/bin/sh\nkill -TERM $$\n");

    let err = app::run(
        &sandbox.cli(&recorder, &["bash", "recon"]),
        &no_env(),
        &mut PickerSpy::unused(),
    )
    .expect_err("recorder killed");

    assert!(matches!(
        err.downcast_ref::<RecorderError>(),
        Some(RecorderError::Signaled { signal: 15 })
    ));
}

#[test]
fn repeated_recordings_register_once() {
    let _lock = spawn_lock();
    let sandbox = Sandbox::new();
    let recorder = sandbox.fake_recorder(0);

    for _ in 0..2 {
        app::run(
            &sandbox.cli(&recorder, &["bash", "recon"]),
            &no_env(),
            &mut PickerSpy::unused(),
        )
        .expect("run");
    }

    assert_eq!(sandbox.registry_contents(), "recon\n");
}

#[test]
fn resolution_does_not_touch_the_registry_for_named_operations() {
    let sandbox = Sandbox::new();
    let store = OperationStore::in_workspace(&sandbox.workspace());

    let resolved = resolve_operation(
        &OperationRequest::Named("recon".to_string()),
        &store,
        &mut PickerSpy::unused(),
    )
    .expect("resolve");

    assert_eq!(resolved.as_deref(), Some("recon"));
    assert!(!store.path().exists());
}
