//! Shared test helpers for the linkstate crate integration tests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use log::Level;
use serde_json::Value;

use linkstate::adapters::DirTrash;
use linkstate::logging::{AuditSink, FactsEmitter};
use linkstate::{Config, LinkState};

/// A simple in-memory emitter to capture facts during tests.
#[derive(Clone, Default, Debug)]
pub struct TestEmitter {
    pub events: Arc<Mutex<Vec<(String, String, String, Value)>>>,
}

impl FactsEmitter for TestEmitter {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value) {
        self.events
            .lock()
            .unwrap()
            .push((subsystem.into(), event.into(), decision.into(), fields));
    }
}

impl TestEmitter {
    /// Fields of every captured fact whose `stage` is `stage`.
    pub fn stage(&self, stage: &str) -> Vec<Value> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, _, _, f)| f.get("stage") == Some(&Value::from(stage)))
            .map(|(_, _, _, f)| f.clone())
            .collect()
    }
}

/// Captures audit lines.
#[derive(Clone, Default)]
pub struct TestAudit {
    pub lines: Arc<Mutex<Vec<(Level, String)>>>,
}

impl AuditSink for TestAudit {
    fn log(&self, level: Level, msg: &str) {
        self.lines.lock().unwrap().push((level, msg.to_string()));
    }
}

pub struct Env {
    pub td: tempfile::TempDir,
    pub api: LinkState<TestEmitter, TestAudit>,
    pub facts: TestEmitter,
    pub audit: TestAudit,
}

impl Env {
    pub fn path(&self, rel: &str) -> PathBuf {
        self.td.path().join(rel)
    }

    pub fn trash(&self) -> DirTrash {
        DirTrash::new(self.td.path().join(".trash"))
    }

    pub fn trash_len(&self) -> usize {
        self.trash().entries().unwrap().len()
    }
}

/// Engine whose holding area lives inside the temp root, so renames stay on
/// one filesystem.
pub fn setup() -> Env {
    let td = tempfile::tempdir().expect("tempdir");
    let facts = TestEmitter::default();
    let audit = TestAudit::default();
    let cfg = Config::default().with_trash_dir(td.path().join(".trash"));
    let api = LinkState::new(facts.clone(), audit.clone(), cfg);
    Env {
        td,
        api,
        facts,
        audit,
    }
}

/// What lstat sees at a path, compared across before/after.
#[derive(Debug, PartialEq, Eq)]
pub enum Shape {
    Missing,
    Link(PathBuf),
    File(Vec<u8>),
    Dir(Vec<String>),
}

pub fn shape(path: &Path) -> Shape {
    let Ok(md) = std::fs::symlink_metadata(path) else {
        return Shape::Missing;
    };
    if md.file_type().is_symlink() {
        Shape::Link(std::fs::read_link(path).unwrap())
    } else if md.is_dir() {
        let mut names: Vec<String> = std::fs::read_dir(path)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        Shape::Dir(names)
    } else {
        Shape::File(std::fs::read(path).unwrap())
    }
}
