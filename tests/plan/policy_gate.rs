use std::os::unix::fs::symlink;

use linkstate::{LinkPolicy, Status, BLOCK_CREATE, BLOCK_REPLACE_DIR, BLOCK_REPLACE_FILE};

use crate::common::{setup, shape, Shape};

#[test]
fn regular_file_without_replace_file_is_refused() {
    let env = setup();
    let link = env.path("notes");
    std::fs::write(&link, b"precious").unwrap();

    let out = env
        .api
        .ensure(&link, "/etc/notes", LinkPolicy::default(), linkstate::ApplyMode::Commit);
    assert_eq!(out.status, Status::PreconditionFailed);
    assert!(out.message.contains(BLOCK_REPLACE_FILE));
    assert_eq!(shape(&link), Shape::File(b"precious".to_vec()));
    assert_eq!(env.trash_len(), 0);
}

#[test]
fn directory_without_replace_dir_is_refused() {
    let env = setup();
    let dir = env.path("config");
    std::fs::create_dir(&dir).unwrap();
    std::fs::write(dir.join("a"), b"1").unwrap();

    let out = env.api.ensure(
        &dir,
        "/etc/config",
        LinkPolicy::default().with_replace_file(true),
        linkstate::ApplyMode::Commit,
    );
    assert_eq!(out.code(), 412);
    assert!(out.message.contains(BLOCK_REPLACE_DIR));
    assert_eq!(shape(&dir), Shape::Dir(vec!["a".into()]));
}

#[test]
fn conservative_policy_only_creates() {
    let env = setup();
    let link = env.path("app");
    symlink("/old", &link).unwrap();
    let out = env
        .api
        .evaluate_and_plan(&link, "/new", LinkPolicy::conservative());
    assert_eq!(out.status, Status::PreconditionFailed);
    assert_eq!(shape(&link), Shape::Link("/old".into()));

    let mut no_create = LinkPolicy::force();
    no_create.create = false;
    let out = env
        .api
        .evaluate_and_plan(env.path("fresh"), "/new", no_create);
    assert!(out.message.contains(BLOCK_CREATE));
}

#[test]
fn refused_outcomes_carry_no_lists() {
    let env = setup();
    let link = env.path("notes");
    std::fs::write(&link, b"x").unwrap();
    let out = env
        .api
        .evaluate_and_plan(&link, "/etc/notes", LinkPolicy::default());
    assert!(out.status.is_client_error());
    assert!(out.do_actions.is_none() && out.undo_actions.is_none());
}
