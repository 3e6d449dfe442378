use butler_core::{FileStorage, Task, TaskList, TaskStore};
use chrono::NaiveDate;
use std::fs;

#[test]
fn missing_file_loads_empty_and_creates_parent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("butler.txt");
    let storage = FileStorage::new(&path);
    assert_eq!(storage.path(), path.as_path());

    let tasks = storage.load();

    assert!(tasks.is_empty());
    assert!(path.parent().unwrap().is_dir());
    assert!(!path.exists());
}

#[test]
fn empty_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("butler.txt");
    fs::write(&path, "").unwrap();

    assert!(FileStorage::new(&path).load().is_empty());
}

#[test]
fn unknown_tag_line_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("butler.txt");
    fs::write(&path, "T|0|read book\nZ|0|not a task\n").unwrap();

    let tasks = FileStorage::new(&path).load();

    assert_eq!(tasks.size(), 1);
    assert_eq!(tasks.get(0).description(), "read book");
}

#[test]
fn corrupt_lines_do_not_stop_loading() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("butler.txt");
    fs::write(
        &path,
        "D|0|broken\n\nT|1|kept one\nD|0|bad date|2019-13-01\n  E | 0 | kept two | 2019-12-02T14:00 | 2019-12-02T16:00  \nT\n",
    )
    .unwrap();

    let tasks = FileStorage::new(&path).load();

    let names: Vec<_> = tasks.all().iter().map(Task::description).collect();
    assert_eq!(names, ["kept one", "kept two"]);
    assert!(tasks.get(0).is_done());
}

#[test]
fn save_overwrites_with_full_list_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("butler.txt");
    let storage = FileStorage::new(&path);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "T|0|stale line one\nT|0|stale line two\nT|0|stale line three\n").unwrap();

    let mut tasks = TaskList::new();
    tasks.add(Task::todo("read book").unwrap());
    tasks.add(
        Task::deadline("return book", NaiveDate::from_ymd_opt(2019, 10, 15).unwrap()).unwrap(),
    );
    storage.save(&tasks).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "T|0|read book\nD|0|return book|2019-10-15\n"
    );
    assert_eq!(storage.load(), tasks);
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("butler.txt");
    let storage = FileStorage::new(&path);

    storage.save(&TaskList::new()).unwrap();

    let entries: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(entries, [std::ffi::OsString::from("butler.txt")]);
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn save_failure_is_reported_to_caller() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    let storage = FileStorage::new(blocker.join("butler.txt"));

    assert!(storage.save(&TaskList::new()).is_err());
    assert!(storage.try_load().is_err());
    assert!(storage.load().is_empty());
}
