//! Integration test: session files → training table → model → live verification.

use keyprint::{
    config::{AppConfig, PathsConfig},
    dataset::{read_live_rows, FeatureTable, Label, LabelMap, Orchestrator, LABEL_COLUMN},
    error::{DatasetError, ModelError, VerifyError},
    features::FeatureVector,
    model::{load_classifier, CentroidModel, Classifier},
    verify::VerificationEngine,
};
use std::path::{Path, PathBuf};

struct Always(Label);

impl Classifier for Always {
    fn predict(&self, _features: &FeatureVector) -> Result<Label, ModelError> {
        Ok(self.0)
    }

    fn kind(&self) -> &'static str {
        "always"
    }
}

fn paths_in(dir: &Path) -> PathsConfig {
    PathsConfig {
        sessions_dir: dir.join("sessions"),
        train_table: dir.join("train.csv"),
        live_features: dir.join("live_features.csv"),
        label_map: dir.join("labels.json"),
        model: dir.join("model.json"),
    }
}

/// Keylogger rows for a user typing `strokes` keys with the given hold and gap.
fn session_csv(hold: f64, gap: f64, strokes: usize) -> String {
    let mut out = String::new();
    let mut t = 1_700_000_000.0;
    for i in 0..strokes {
        let key = ["'a'", "'s'", "'d'", "'f'"][i % 4];
        out.push_str(&format!("{},{},True\n", key, t));
        out.push_str(&format!("{},{},False\n", key, t + hold));
        t += hold + gap;
    }
    out
}

fn write_session(dir: &Path, name: &str, body: &str) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn config_load_default() {
    let c = AppConfig::load(Path::new("nonexistent.json"));
    assert_eq!(c.paths.train_table, PathBuf::from("train.csv"));
    assert_eq!(c.paths.live_features, PathBuf::from("live_features.csv"));
    assert_eq!(c.training.target_column, LABEL_COLUMN);
}

#[test]
fn directory_labels_follow_first_seen_order() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = paths_in(tmp.path());
    let sessions = &paths.sessions_dir;
    write_session(sessions, "kl_bob_001.csv", &session_csv(0.1, 0.2, 6));
    write_session(sessions, "kl_alice_001.csv", &session_csv(0.08, 0.15, 6));
    write_session(sessions, "kl_bob_002.csv", &session_csv(0.1, 0.21, 6));
    write_session(sessions, "kl_carol_001.csv", &session_csv(0.2, 0.4, 6));
    write_session(sessions, "notes.txt", "ignored");

    let mut orchestrator = Orchestrator::new(paths.clone());
    let table = orchestrator.extract_directory(sessions).unwrap();

    // files sorted by name: alice_001, bob_001, bob_002, carol_001
    assert_eq!(table.len(), 4);
    let labels = orchestrator.labels();
    assert_eq!(labels.len(), 3);
    assert_eq!(labels.get("alice"), Some(Label(0)));
    assert_eq!(labels.get("bob"), Some(Label(1)));
    assert_eq!(labels.get("carol"), Some(Label(2)));
    let row_labels: Vec<u32> = table.rows().iter().map(|r| r.label.0).collect();
    assert_eq!(row_labels, vec![0, 1, 1, 2]);

    let reloaded = FeatureTable::read_csv(&paths.train_table).unwrap();
    assert_eq!(reloaded, table);
    assert_eq!(LabelMap::load(&paths.label_map).unwrap(), *labels);
}

#[test]
fn unparseable_session_is_surfaced() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = paths_in(tmp.path());
    write_session(&paths.sessions_dir, "kl_bob_001.csv", "'a',yesterday,True\n'a',2.0,False\n");

    let mut orchestrator = Orchestrator::new(paths.clone());
    let err = orchestrator.extract_directory(&paths.sessions_dir).unwrap_err();
    assert!(matches!(err, DatasetError::Read { .. }));
    assert!(!paths.train_table.exists());
}

#[test]
fn session_name_without_username_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = paths_in(tmp.path());
    write_session(&paths.sessions_dir, "session.csv", &session_csv(0.1, 0.2, 3));

    let mut orchestrator = Orchestrator::new(paths.clone());
    let err = orchestrator.extract_directory(&paths.sessions_dir).unwrap_err();
    assert!(matches!(err, DatasetError::InvalidSessionName(_)));
}

#[test]
fn verify_against_fixed_letter_map() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = paths_in(tmp.path());
    let live = tmp.path().join("live");
    let c = write_session(&live, "live_C_001.csv", &session_csv(0.1, 0.2, 5));
    let d = write_session(&live, "live_D_001.csv", &session_csv(0.1, 0.2, 5));

    let orchestrator = Orchestrator::new(paths.clone());
    let engine = VerificationEngine::with_letter_labels(Box::new(Always(Label(2))));

    let verdict = engine.verify(&orchestrator, &c).unwrap();
    assert!(verdict.matched);
    assert_eq!(verdict.username, "C");
    assert_eq!(verdict.expected, Label(2));
    assert_eq!(verdict.predicted, Label(2));

    assert!(!engine.is_match(&orchestrator, &d).unwrap());

    let rows = read_live_rows(&paths.live_features).unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn verify_unknown_username() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = paths_in(tmp.path());
    let z = write_session(tmp.path(), "live_Z_001.csv", &session_csv(0.1, 0.2, 5));

    let orchestrator = Orchestrator::new(paths);
    let engine = VerificationEngine::with_letter_labels(Box::new(Always(Label(0))));
    let err = engine.verify(&orchestrator, &z).unwrap_err();
    assert!(matches!(
        err,
        VerifyError::Dataset(DatasetError::UnknownUsername(ref u)) if u == "Z"
    ));
}

#[test]
fn train_then_verify_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = paths_in(tmp.path());
    // letters seen in A, B order so training labels line up with the fixed map
    write_session(&paths.sessions_dir, "kl_A_001.csv", &session_csv(0.05, 0.10, 20));
    write_session(&paths.sessions_dir, "kl_A_002.csv", &session_csv(0.055, 0.11, 20));
    write_session(&paths.sessions_dir, "kl_B_001.csv", &session_csv(0.20, 0.50, 20));
    write_session(&paths.sessions_dir, "kl_B_002.csv", &session_csv(0.21, 0.52, 20));

    let mut orchestrator = Orchestrator::new(paths.clone());
    let table = orchestrator.extract_directory(&paths.sessions_dir).unwrap();
    CentroidModel::train(&table, LABEL_COLUMN)
        .unwrap()
        .save(&paths.model)
        .unwrap();

    let engine = VerificationEngine::with_letter_labels(load_classifier(&paths.model).unwrap());
    let live = tmp.path().join("live");
    let a = write_session(&live, "live_A_009.csv", &session_csv(0.052, 0.105, 15));
    let b = write_session(&live, "live_B_009.csv", &session_csv(0.052, 0.105, 15));

    assert!(engine.is_match(&orchestrator, &a).unwrap());
    assert!(!engine.is_match(&orchestrator, &b).unwrap());
}

#[test]
fn missing_model_is_unavailable() {
    let err = load_classifier(Path::new("does-not-exist.onnx")).err().unwrap();
    assert!(matches!(err, ModelError::ClassifierUnavailable { .. }));
}
