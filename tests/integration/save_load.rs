use infinite::{Depth, ErrorKind, Node};
use std::fs;
use tempfile::TempDir;

fn build_tree(db: &std::path::Path) {
    let mut root = Node::new_root(infinite::Connection::os(db));
    root.set_value("root").unwrap();
    let users = root.new_child("users").unwrap();
    users.new_child("alice").unwrap().set_value("Alice").unwrap();
    users.new_child("bob").unwrap().set_value(vec![0u8; 700]).unwrap();
    root.new_child("empty").unwrap();
    root.save().unwrap();
}

#[test]
fn save_of_loaded_tree_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("db");
    build_tree(&db);

    let first = Node::load_os(&db).unwrap();
    first.save().unwrap();
    let second = Node::load_os(&db).unwrap();

    assert_eq!(second.value().unwrap(), b"root");
    assert_eq!(second.keys().unwrap(), vec!["empty", "users"]);
    let users = second.child("users").unwrap();
    assert_eq!(users.keys().unwrap(), vec!["alice", "bob"]);
    assert_eq!(users.child("alice").unwrap().value().unwrap(), b"Alice");
    assert_eq!(
        users.child("bob").unwrap().value().unwrap(),
        vec![0u8; 700].as_slice()
    );
}

#[test]
fn depth_limited_load_marks_levels() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("db");
    build_tree(&db);

    let root = Node::load_os_depth(&db, Depth::Limited(2)).unwrap();
    assert!(root.is_loaded());
    let users = root.child("users").unwrap();
    assert!(users.is_loaded());
    for (_, user) in users.children().unwrap() {
        assert!(!user.is_loaded());
        assert_eq!(user.value().unwrap_err().kind(), ErrorKind::NotLoaded);
    }
}

#[test]
fn saving_partial_tree_is_refused() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("db");
    build_tree(&db);

    let mut root = Node::load_os_depth(&db, Depth::Limited(1)).unwrap();
    root.set_value("changed").unwrap();
    assert_eq!(root.save().unwrap_err().kind(), ErrorKind::NotLoaded);

    // The on-disk tree is untouched.
    assert!(db.join("users").join("alice").is_dir());
    let reloaded = Node::load_os(&db).unwrap();
    assert_eq!(reloaded.value().unwrap(), b"root");
}

#[test]
fn save_removes_dropped_children() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("db");
    build_tree(&db);

    let users = Node::load_os(db.join("users")).unwrap();
    let mut fresh = Node::new_root(users.connection().clone());
    fresh.new_child("carol").unwrap();
    fresh.save().unwrap();

    assert!(!db.join("users").join("alice").exists());
    assert!(db.join("users").join("carol").is_dir());
    assert!(fs::read_dir(db.join("users").join("carol")).unwrap().next().is_none());
}
