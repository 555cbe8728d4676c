mod common;

use fs_nodes::{Create, Directory, DirectoryOptions, Error, File, FsNode, Node, NodeKind};

use common::{basenames, dir_node, file_node, write_tree};

#[test]
fn create_without_recursive_needs_existing_parent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir_node(dir.path(), "a/b");

    let err = nested
        .create(&DirectoryOptions::default())
        .expect_err("missing parent");
    match err {
        Error::InvalidTarget { .. } => {}
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!dir.path().join("a").exists());

    nested.create(&DirectoryOptions::recursive()).expect("mkdir -p");
    assert!(nested.exists());
    assert!(nested.is_dir());
}

#[test]
fn recursive_create_is_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir_node(dir.path(), "x/y/z");
    nested.create(&DirectoryOptions::recursive()).expect("first");
    nested.create(&DirectoryOptions::recursive()).expect("second");
    assert!(nested.is_dir());
}

#[test]
fn non_recursive_create_of_existing_directory_is_node_exists() {
    let dir = tempfile::tempdir().expect("tempdir");
    let existing = Directory::new(dir.path());

    let err = existing
        .create(&DirectoryOptions::default())
        .expect_err("exists");
    assert_eq!(err.code(), "node_exists");
    assert_eq!(err.legacy_code(), 8);
}

#[test]
fn create_over_a_file_is_node_exists_even_when_recursive() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_tree(dir.path(), &[("plain", "x")]);

    let err = dir_node(dir.path(), "plain")
        .create(&DirectoryOptions::recursive())
        .expect_err("file in the way");
    assert_eq!(err.code(), "node_exists");
}

#[test]
#[cfg(unix)]
fn create_applies_requested_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().expect("tempdir");
    let private = dir_node(dir.path(), "private");
    private
        .create(&DirectoryOptions {
            recursive: false,
            mode: 0o700,
        })
        .expect("mkdir");
    let mode = std::fs::metadata(private.pathname())
        .expect("metadata")
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o700);
}

#[test]
#[cfg(unix)]
fn create_under_unwritable_parent_is_permission_denied() {
    if common::skip_when_root("create_under_unwritable_parent_is_permission_denied") {
        return;
    }

    let dir = tempfile::tempdir().expect("tempdir");
    let locked = dir.path().join("locked");
    std::fs::create_dir(&locked).expect("mkdir");
    let _guard = common::PermissionRestoreGuard::set(&locked, 0o555);

    let err = Directory::new(locked.join("child"))
        .create(&DirectoryOptions::recursive())
        .expect_err("parent not writable");
    assert_eq!(err.code(), "permission_denied");
}

#[test]
fn delete_removes_every_descendant() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_tree(
        dir.path(),
        &[
            ("tree/a.txt", "a"),
            ("tree/sub/b.txt", "b"),
            ("tree/sub/deeper/c.txt", "c"),
            ("tree/empty/.keep", ""),
        ],
    );
    let tree = dir_node(dir.path(), "tree");
    let descendants = [
        "tree/a.txt",
        "tree/sub",
        "tree/sub/b.txt",
        "tree/sub/deeper/c.txt",
        "tree/empty",
    ];

    assert!(tree.is_deletable());
    tree.delete().expect("delete");

    assert!(!tree.exists());
    for rel in descendants {
        assert!(!dir.path().join(rel).exists(), "{rel} still exists");
    }
}

#[test]
fn delete_missing_directory_is_no_such_node() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = dir_node(dir.path(), "missing")
        .delete()
        .expect_err("missing");
    assert_eq!(err.code(), "no_such_node");
}

#[test]
#[cfg(unix)]
fn delete_keeps_links_targets() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_tree(dir.path(), &[("outside/keep.txt", "k"), ("tree/a.txt", "a")]);
    std::os::unix::fs::symlink(dir.path().join("outside"), dir.path().join("tree/to_outside"))
        .expect("symlink");

    dir_node(dir.path(), "tree").delete().expect("delete");

    assert!(!dir.path().join("tree").exists());
    assert!(dir.path().join("outside/keep.txt").exists());
}

#[test]
#[cfg(unix)]
fn undeletable_descendant_blocks_whole_delete() {
    if common::skip_when_root("undeletable_descendant_blocks_whole_delete") {
        return;
    }

    let dir = tempfile::tempdir().expect("tempdir");
    write_tree(dir.path(), &[("tree/a.txt", "a"), ("tree/sub/b.txt", "b")]);
    let sub = dir.path().join("tree/sub");
    let _guard = common::PermissionRestoreGuard::set(&sub, 0o555);

    let tree = dir_node(dir.path(), "tree");
    assert!(!tree.is_deletable());
    let err = tree.delete().expect_err("blocked");
    assert_eq!(err.code(), "permission_denied");
    assert!(dir.path().join("tree/a.txt").exists());
    assert!(sub.join("b.txt").exists());
}

#[test]
fn children_lists_typed_entries_without_dot_entries() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_tree(dir.path(), &[("a.txt", "a"), ("sub/b.txt", "b")]);

    let mut children = Directory::new(dir.path()).children().expect("children");
    children.sort_by(|a, b| a.pathname().cmp(b.pathname()));

    assert_eq!(basenames(&children), vec!["a.txt", "sub"]);
    assert_eq!(children[0].kind(), NodeKind::File);
    assert_eq!(children[1].kind(), NodeKind::Directory);
}

#[test]
fn children_of_missing_directory_is_no_such_node() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = dir_node(dir.path(), "missing")
        .children()
        .expect_err("missing");
    match err {
        Error::NoSuchNode { op, .. } => assert_eq!(op, "retrieve children of"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
#[cfg(unix)]
fn children_of_unreadable_directory_is_permission_denied() {
    if common::skip_when_root("children_of_unreadable_directory_is_permission_denied") {
        return;
    }

    let dir = tempfile::tempdir().expect("tempdir");
    let blocked = dir.path().join("blocked");
    std::fs::create_dir(&blocked).expect("mkdir");
    let _guard = common::PermissionRestoreGuard::set(&blocked, 0o300);

    let err = Directory::new(&blocked).children().expect_err("unreadable");
    assert_eq!(err.code(), "permission_denied");
}

#[test]
fn children_by_file_extension_keeps_directory_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_tree(dir.path(), &[("a.txt", ""), ("b.md", ""), ("c.txt", "")]);
    let parent = Directory::new(dir.path());

    let expected = parent
        .children()
        .expect("children")
        .into_iter()
        .filter(|node| node.extension().as_deref() == Some("txt"))
        .collect::<Vec<_>>();
    let matched = parent
        .children_by_file_extension(["txt"])
        .expect("filtered");

    assert_eq!(matched, expected);
    let mut names = basenames(&matched);
    names.sort();
    assert_eq!(names, vec!["a.txt", "c.txt"]);
}

#[test]
fn children_by_file_extension_is_case_sensitive() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_tree(dir.path(), &[("A.TXT", ""), ("b.txt", "")]);

    let matched = Directory::new(dir.path())
        .children_by_file_extension(vec!["txt".to_string()])
        .expect("filtered");
    assert_eq!(basenames(&matched), vec!["b.txt"]);
}

#[test]
fn children_filtered_uses_predicate_on_node() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_tree(dir.path(), &[("a.txt", ""), ("sub/b.txt", "")]);

    let dirs = Directory::new(dir.path())
        .children_filtered(|node| node.kind() == NodeKind::Directory)
        .expect("filtered");
    assert_eq!(basenames(&dirs), vec!["sub"]);
}

#[test]
fn each_listing_sees_current_contents() {
    let dir = tempfile::tempdir().expect("tempdir");
    let parent = Directory::new(dir.path());
    assert!(parent.children().expect("empty").is_empty());

    write_tree(dir.path(), &[("late.txt", "")]);
    assert_eq!(basenames(&parent.children().expect("after write")), vec!["late.txt"]);
}

#[test]
fn child_prefers_on_disk_type() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_tree(dir.path(), &[("sub/a.txt", "")]);
    let parent = Directory::new(dir.path());

    let sub = parent
        .child("sub", Some(NodeKind::File))
        .expect("child");
    assert_eq!(sub.kind(), NodeKind::Directory);

    let nested = parent.child("sub/a.txt", None).expect("nested child");
    assert_eq!(nested.kind(), NodeKind::File);

    let fresh = parent
        .child("fresh", Some(NodeKind::Directory))
        .expect("new child");
    assert!(matches!(fresh, Node::Directory(_)));
    assert!(!fresh.exists());
}

#[test]
fn missing_child_without_type_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = Directory::new(dir.path())
        .child("fresh", None)
        .expect_err("kind required");
    assert_eq!(err.code(), "missing_child_type");
}

#[test]
fn is_parent_of_node_covers_transitive_children_only() {
    let top = Directory::new("/srv/data");

    assert!(top.is_parent_of_node(&File::new("/srv/data/a.txt")));
    assert!(top.is_parent_of_node(&Directory::new("/srv/data/x/y/z")));
    assert!(!top.is_parent_of_node(&Directory::new("/srv/data")));
    assert!(!top.is_parent_of_node(&Directory::new("/srv")));
    assert!(!top.is_parent_of_node(&Directory::new("/")));
    assert!(!top.is_parent_of_node(&File::new("/srv/database/a.txt")));
}

#[test]
fn move_into_existing_directory_lands_under_basename() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_tree(dir.path(), &[("src/a.txt", "a")]);
    std::fs::create_dir(dir.path().join("dst")).expect("mkdir");
    let src = dir_node(dir.path(), "src");
    let dst = Node::from(dir_node(dir.path(), "dst"));

    let moved = src.move_to(&dst).expect("move");

    assert_eq!(moved.kind(), NodeKind::Directory);
    assert_eq!(moved.pathname(), dir.path().join("dst/src"));
    assert!(moved.exists());
    assert!(file_node(dir.path(), "dst/src/a.txt").exists());
    assert!(!src.exists());
}

#[test]
fn move_to_missing_directory_renames() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_tree(dir.path(), &[("old/a.txt", "a")]);
    let target = Node::from(dir_node(dir.path(), "new"));

    let moved = dir_node(dir.path(), "old").move_to(&target).expect("rename");

    assert_eq!(moved, target);
    assert!(file_node(dir.path(), "new/a.txt").exists());
    assert!(!dir.path().join("old").exists());
}

#[test]
fn move_to_non_directory_target_is_invalid() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_tree(dir.path(), &[("src/a.txt", "a"), ("plain.txt", "p")]);

    let err = dir_node(dir.path(), "src")
        .move_to(&Node::from(file_node(dir.path(), "plain.txt")))
        .expect_err("file target");
    assert_eq!(err.code(), "invalid_target");
    assert!(dir.path().join("src/a.txt").exists());
}

#[test]
fn move_into_own_descendant_is_invalid_and_touches_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_tree(dir.path(), &[("src/inner/a.txt", "a")]);
    let src = dir_node(dir.path(), "src");

    for target in ["src/inner", "src/inner/not_yet", "src"] {
        let err = src
            .move_to(&Node::from(dir_node(dir.path(), target)))
            .expect_err("descendant target");
        match err {
            Error::InvalidTarget { .. } => {}
            other => panic!("unexpected error for {target}: {other:?}"),
        }
    }
    assert!(dir.path().join("src/inner/a.txt").exists());
    assert!(!dir.path().join("src/inner/not_yet").exists());
}

#[test]
fn move_missing_source_is_no_such_node() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir(dir.path().join("dst")).expect("mkdir");

    let err = dir_node(dir.path(), "ghost")
        .move_to(&Node::from(dir_node(dir.path(), "dst")))
        .expect_err("missing source");
    assert_eq!(err.code(), "no_such_node");
}

#[test]
fn move_to_target_with_missing_parent_is_no_such_node() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_tree(dir.path(), &[("src/a.txt", "a")]);

    let err = dir_node(dir.path(), "src")
        .move_to(&Node::from(dir_node(dir.path(), "nowhere/dst")))
        .expect_err("missing parent");
    assert_eq!(err.code(), "no_such_node");
    assert!(dir.path().join("src/a.txt").exists());
}

#[test]
#[cfg(unix)]
fn move_into_unwritable_directory_is_permission_denied() {
    if common::skip_when_root("move_into_unwritable_directory_is_permission_denied") {
        return;
    }

    let dir = tempfile::tempdir().expect("tempdir");
    write_tree(dir.path(), &[("src/a.txt", "a")]);
    let locked = dir.path().join("locked");
    std::fs::create_dir(&locked).expect("mkdir");
    let _guard = common::PermissionRestoreGuard::set(&locked, 0o555);

    let err = dir_node(dir.path(), "src")
        .move_to(&Node::from(Directory::new(&locked)))
        .expect_err("unwritable target");
    assert_eq!(err.code(), "permission_denied");
    assert!(dir.path().join("src/a.txt").exists());
}
