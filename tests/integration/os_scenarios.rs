use infinite::{Codec, Depth, ErrorKind, Node};
use std::fs;
use tempfile::TempDir;

fn names_in(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    names
}

#[test]
fn load_hand_built_database() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("db");
    fs::create_dir_all(db.join("user")).unwrap();
    fs::File::create(db.join("SGVsbG8h.0")).unwrap();
    fs::File::create(db.join("user").join("QWxpY2U=.0")).unwrap();

    let root = Node::load_os(&db).unwrap();
    assert_eq!(root.value().unwrap(), b"Hello!");
    assert_eq!(root.child("user").unwrap().value().unwrap(), b"Alice");
}

#[test]
fn new_child_on_empty_root_saves_empty_directory() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("db");
    fs::create_dir(&db).unwrap();

    let mut root = Node::load_os(&db).unwrap();
    root.new_child("foo").unwrap();
    root.save().unwrap();

    assert_eq!(names_in(&db), vec!["foo".to_string()]);
    assert!(db.join("foo").is_dir());
    assert!(names_in(&db.join("foo")).is_empty());
}

#[test]
fn saved_files_are_empty_and_bounded() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("db");

    let value: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();
    let mut root = Node::load_os_depth(&db, Depth::Limited(0)).unwrap();
    assert!(!root.is_loaded());
    root = Node::new_root(root.connection().clone());
    root.set_value(value.clone()).unwrap();
    root.save().unwrap();

    let names = names_in(&db);
    assert!(names.len() > 1);
    for name in &names {
        assert!(name.len() <= 255, "{} is too long", name);
        assert_eq!(fs::metadata(db.join(name)).unwrap().len(), 0);
    }

    let reloaded = Node::load_os(&db).unwrap();
    assert_eq!(reloaded.value().unwrap(), value.as_slice());
    assert_eq!(infinite::value::decode(&names).unwrap(), value);
    assert_eq!(Codec::default().encode(&value).unwrap().len(), names.len());
}

#[test]
fn corrupt_chunk_set_fails_load() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("db");
    fs::create_dir(&db).unwrap();
    fs::File::create(db.join("QQ==.1")).unwrap();
    fs::File::create(db.join("Qg==.2")).unwrap();

    let err = Node::load_os(&db).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
}

#[test]
fn stray_file_fails_load() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("db");
    fs::create_dir(&db).unwrap();
    fs::File::create(db.join("README")).unwrap();

    let err = Node::load_os(&db).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
}

#[test]
fn missing_database_is_io_error() {
    let temp = TempDir::new().unwrap();
    let err = Node::load_os(temp.path().join("nope")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}
