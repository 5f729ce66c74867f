use std::os::unix::fs::symlink;
use std::path::Path;

use linkstate::{ApplyMode, LinkPolicy, Status};

use crate::common::{setup, shape, Shape};

// Dotfile managers commonly sit under a symlinked directory such as a
// redirected `~/.config`.
#[test]
fn ensure_and_remove_through_a_symlinked_directory() {
    let env = setup();
    std::fs::create_dir(env.path("real")).unwrap();
    symlink(env.path("real"), env.path("alias")).unwrap();
    let link = env.path("alias/app");

    let out = env
        .api
        .ensure(&link, "/opt/app", LinkPolicy::default(), ApplyMode::Commit);
    assert_eq!(out.status, Status::Applied);
    assert_eq!(shape(&env.path("real/app")), Shape::Link("/opt/app".into()));

    let again = env
        .api
        .ensure(&link, "/opt/app", LinkPolicy::default(), ApplyMode::Commit);
    assert_eq!(again.status, Status::NotModified);

    let gone = env
        .api
        .remove(&link, Some(Path::new("/opt/app")), ApplyMode::Commit);
    assert_eq!(gone.status, Status::Applied);
    assert_eq!(shape(&env.path("real/app")), Shape::Missing);
    assert_eq!(shape(&env.path("alias")), Shape::Link(env.path("real")));
}

#[test]
fn displaced_file_under_a_symlinked_directory_is_restored_by_undo() {
    let env = setup();
    std::fs::create_dir(env.path("real")).unwrap();
    symlink(env.path("real"), env.path("alias")).unwrap();
    std::fs::write(env.path("real/notes"), b"mine").unwrap();
    let link = env.path("alias/notes");

    let out = env
        .api
        .ensure(&link, "/etc/notes", LinkPolicy::force(), ApplyMode::Commit);
    assert_eq!(out.status, Status::Applied);
    assert_eq!(shape(&env.path("real/notes")), Shape::Link("/etc/notes".into()));
    assert_eq!(env.trash_len(), 1);

    let back = env.api.undo(&out.undo_actions.unwrap(), ApplyMode::Commit);
    assert_eq!(back.status, Status::Applied);
    assert_eq!(shape(&env.path("real/notes")), Shape::File(b"mine".to_vec()));
    assert_eq!(shape(&env.path("alias")), Shape::Link(env.path("real")));
}
