//! Applying a do list and then its undo list restores what was probed.
use std::os::unix::fs::symlink;
use std::path::Path;

use linkstate::{ApplyMode, LinkPolicy, Status};

use crate::common::{setup, shape, Env, Shape};

fn roundtrip(env: &Env, path: &Path, target: &str) {
    let before = shape(path);
    let out = env
        .api
        .ensure(path, target, LinkPolicy::force(), ApplyMode::Commit);
    assert_eq!(out.status, Status::Applied, "{}", out.message);
    assert_eq!(shape(path), Shape::Link(target.into()));

    let undo = out.undo_actions.expect("undo list");
    let back = env.api.undo(&undo, ApplyMode::Commit);
    assert_eq!(back.status, Status::Applied, "{}", back.message);
    assert_eq!(shape(path), before);
}

#[test]
fn absent_path() {
    let env = setup();
    roundtrip(&env, &env.path("app"), "/opt/app");
}

#[test]
fn symlink_repoint() {
    let env = setup();
    let link = env.path("app");
    symlink("/old", &link).unwrap();
    roundtrip(&env, &link, "/new");
}

#[test]
fn regular_file() {
    let env = setup();
    let file = env.path("notes");
    std::fs::write(&file, b"original").unwrap();
    roundtrip(&env, &file, "/etc/notes");
    assert_eq!(env.trash_len(), 0);
}

#[test]
fn directory() {
    let env = setup();
    let dir = env.path("config");
    std::fs::create_dir_all(dir.join("nested")).unwrap();
    std::fs::write(dir.join("nested/file"), b"1").unwrap();
    roundtrip(&env, &dir, "/etc/config");
    assert_eq!(std::fs::read(dir.join("nested/file")).unwrap(), b"1");
}

#[test]
fn undo_result_redoes() {
    let env = setup();
    let file = env.path("notes");
    std::fs::write(&file, b"original").unwrap();

    let out = env
        .api
        .ensure(&file, "/etc/notes", LinkPolicy::force(), ApplyMode::Commit);
    let back = env
        .api
        .undo(out.undo_actions.as_ref().unwrap(), ApplyMode::Commit);
    assert_eq!(shape(&file), Shape::File(b"original".to_vec()));

    let redo = env
        .api
        .undo(back.undo_actions.as_ref().unwrap(), ApplyMode::Commit);
    assert_eq!(redo.status, Status::Applied);
    assert_eq!(shape(&file), Shape::Link("/etc/notes".into()));
    assert_eq!(env.trash_len(), 1);
}

#[test]
fn undo_lists_survive_serialization() {
    let env = setup();
    let file = env.path("notes");
    std::fs::write(&file, b"original").unwrap();

    let out = env
        .api
        .ensure(&file, "/etc/notes", LinkPolicy::force(), ApplyMode::Commit);
    let stored = serde_json::to_string(&out).unwrap();
    let loaded: linkstate::Outcome = serde_json::from_str(&stored).unwrap();
    assert_eq!(loaded, out);

    let back = env
        .api
        .undo(loaded.undo_actions.as_ref().unwrap(), ApplyMode::Commit);
    assert_eq!(back.status, Status::Applied);
    assert_eq!(shape(&file), Shape::File(b"original".to_vec()));
}
