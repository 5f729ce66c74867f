use linkstate::{Action, ApplyMode, LinkPolicy, Status};

use crate::common::{setup, shape, Shape};

#[test]
fn file_is_moved_to_trash_not_deleted() {
    let env = setup();
    let link = env.path("notes");
    std::fs::write(&link, b"mine").unwrap();

    let out = env.api.ensure(
        &link,
        "/etc/notes",
        LinkPolicy::default().with_replace_file(true),
        ApplyMode::Commit,
    );
    assert_eq!(out.status, Status::Applied);
    assert_eq!(shape(&link), Shape::Link("/etc/notes".into()));

    let tokens = env.trash().entries().unwrap();
    assert_eq!(tokens.len(), 1);
    let held = env.trash().path_of(&tokens[0]).unwrap();
    assert_eq!(std::fs::read(held).unwrap(), b"mine");

    // The returned undo list names the entry that was produced.
    let undo = out.undo_actions.unwrap();
    assert_eq!(
        undo.last(),
        Some(&Action::Untrash {
            token: Some(tokens[0].clone()),
            path: linkstate::types::LinkPath::new(&link).unwrap(),
        })
    );
}

#[test]
fn directory_is_moved_whole() {
    let env = setup();
    let dir = env.path("config");
    std::fs::create_dir_all(dir.join("sub")).unwrap();
    std::fs::write(dir.join("sub/inner"), b"1").unwrap();

    let out = env.api.ensure(
        &dir,
        "/etc/config",
        LinkPolicy::default().with_replace_dir(true),
        ApplyMode::Commit,
    );
    assert_eq!(out.status, Status::Applied);
    assert_eq!(shape(&dir), Shape::Link("/etc/config".into()));

    let tokens = env.trash().entries().unwrap();
    let held = env.trash().path_of(&tokens[0]).unwrap();
    assert_eq!(std::fs::read(held.join("sub/inner")).unwrap(), b"1");
}

#[test]
fn default_holding_area_comes_from_config() {
    let td = tempfile::tempdir().unwrap();
    let bin = td.path().join("holding");
    let api = linkstate::LinkState::new(
        crate::common::TestEmitter::default(),
        crate::common::TestAudit::default(),
        linkstate::Config::default().with_trash_dir(&bin),
    );
    let link = td.path().join("notes");
    std::fs::write(&link, b"x").unwrap();

    let out = api.ensure(&link, "/etc/notes", LinkPolicy::force(), ApplyMode::Commit);
    assert_eq!(out.status, Status::Applied);
    assert_eq!(std::fs::read_dir(&bin).unwrap().count(), 1);
}

#[test]
fn custom_trash_backend_is_used() {
    let td = tempfile::tempdir().unwrap();
    let custom = td.path().join("custom");
    let api = linkstate::LinkState::new(
        crate::common::TestEmitter::default(),
        crate::common::TestAudit::default(),
        linkstate::Config::default().with_trash_dir(td.path().join("unused")),
    )
    .with_trash(Box::new(linkstate::adapters::DirTrash::new(&custom)));
    let link = td.path().join("notes");
    std::fs::write(&link, b"x").unwrap();

    api.ensure(&link, "/etc/notes", LinkPolicy::force(), ApplyMode::Commit);
    assert_eq!(std::fs::read_dir(&custom).unwrap().count(), 1);
    assert!(!td.path().join("unused").exists());
}

#[test]
fn cross_filesystem_trash_copies_then_undo_restores() {
    let td = tempfile::tempdir().unwrap();
    let api = linkstate::LinkState::new(
        crate::common::TestEmitter::default(),
        crate::common::TestAudit::default(),
        linkstate::Config::default(),
    )
    .with_trash(Box::new(
        linkstate::adapters::DirTrash::new(td.path().join("bin")).with_force_exdev(true),
    ));
    let dir = td.path().join("config");
    std::fs::create_dir_all(dir.join("sub")).unwrap();
    std::fs::write(dir.join("sub/inner"), b"1").unwrap();

    let out = api.ensure(&dir, "/etc/config", LinkPolicy::force(), ApplyMode::Commit);
    assert_eq!(out.status, Status::Applied);
    assert_eq!(shape(&dir), Shape::Link("/etc/config".into()));
    assert_eq!(std::fs::read_dir(td.path().join("bin")).unwrap().count(), 1);

    let back = api.undo(&out.undo_actions.unwrap(), ApplyMode::Commit);
    assert_eq!(back.status, Status::Applied);
    assert_eq!(std::fs::read(dir.join("sub/inner")).unwrap(), b"1");
    assert_eq!(std::fs::read_dir(td.path().join("bin")).unwrap().count(), 0);
}
