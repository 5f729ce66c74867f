use linkstate::{ApplyMode, LinkPolicy, Status};

use crate::common::{setup, shape, Shape};

#[test]
fn relative_symlink_path_is_rejected_before_probing() {
    let env = setup();
    let out = env
        .api
        .evaluate_and_plan("dotfiles/vimrc", "/etc/foo", LinkPolicy::default());
    assert_eq!(out.status, Status::BadRequest);

    let out = env
        .api
        .ensure("dotfiles/vimrc", "/etc/foo", LinkPolicy::default(), ApplyMode::Commit);
    assert_eq!(out.code(), 400);
}

#[test]
fn empty_target_is_rejected() {
    let env = setup();
    let link = env.path("app");
    assert_eq!(
        env.api.evaluate_and_plan(&link, "", LinkPolicy::default()).status,
        Status::BadRequest
    );
    assert_eq!(shape(&link), Shape::Missing);
}

#[test]
fn absolute_path_with_parent_segments_is_folded() {
    let env = setup();
    std::fs::create_dir(env.path("a")).unwrap();
    let dotted = format!("{}/a/../b", env.td.path().display());

    let out = env
        .api
        .ensure(&dotted, "/etc/foo", LinkPolicy::default(), ApplyMode::Commit);
    assert_eq!(out.status, Status::Applied);
    assert_eq!(shape(&env.path("b")), Shape::Link("/etc/foo".into()));
    assert_eq!(shape(&env.path("a/b")), Shape::Missing);
}

#[test]
fn relative_target_is_stored_verbatim() {
    let env = setup();
    let link = env.path("app");
    let out = env
        .api
        .ensure(&link, "../shared/app", LinkPolicy::default(), ApplyMode::Commit);
    assert_eq!(out.status, Status::Applied);
    assert_eq!(shape(&link), Shape::Link("../shared/app".into()));
}

#[test]
fn removal_of_relative_path_is_rejected() {
    let env = setup();
    assert_eq!(
        env.api.remove("app", None, ApplyMode::Commit).status,
        Status::BadRequest
    );
}
