use std::os::unix::fs::symlink;

use linkstate::logging::TS_ZERO;
use linkstate::{ApplyMode, LinkPolicy, Status};
use serde_json::Value;

use crate::common::{setup, shape, Shape};

#[test]
fn dry_run_reports_would_be_lists_without_mutation() {
    let env = setup();
    let dir = env.path("config");
    std::fs::create_dir(&dir).unwrap();

    let out = env.api.ensure(
        &dir,
        "/etc/config",
        LinkPolicy::force(),
        ApplyMode::DryRun,
    );
    assert_eq!(out.status, Status::Applied);
    assert!(out.message.starts_with("dry run"));
    assert_eq!(out.do_actions.as_ref().map(Vec::len), Some(2));
    assert_eq!(shape(&dir), Shape::Dir(vec![]));
    assert_eq!(env.trash_len(), 0);
}

#[test]
fn dry_run_sees_earlier_steps() {
    let env = setup();
    let link = env.path("app");
    symlink("/old", &link).unwrap();

    // Repoint dry run: the link step is still reported after the removal step.
    let out = env
        .api
        .ensure(&link, "/new", LinkPolicy::default(), ApplyMode::DryRun);
    assert_eq!(out.status, Status::Applied);
    assert_eq!(out.do_actions.as_ref().map(Vec::len), Some(2));

    // Undoing a repoint in a dry run does not trip over the link it would remove.
    let outcome = env
        .api
        .ensure(&link, "/new", LinkPolicy::default(), ApplyMode::Commit);
    let preview = env
        .api
        .undo(outcome.undo_actions.as_ref().unwrap(), ApplyMode::DryRun);
    assert_eq!(preview.status, Status::Applied);
    assert_eq!(shape(&link), Shape::Link("/new".into()));
}

#[test]
fn dry_run_facts_have_zero_timestamps() {
    let env = setup();
    let link = env.path("app");
    env.api
        .ensure(&link, "/opt/app", LinkPolicy::default(), ApplyMode::DryRun);

    let results = env.facts.stage("apply.result");
    assert_eq!(results.len(), 1);
    for f in results {
        assert_eq!(f["ts"], Value::from(TS_ZERO));
        assert_eq!(f["dry_run"], Value::from(true));
    }
    assert_eq!(shape(&link), Shape::Missing);
}
