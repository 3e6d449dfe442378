use butler_core::{Task, TaskList};

fn todos(names: &[&str]) -> TaskList {
    let mut list = TaskList::new();
    for name in names {
        list.add(Task::todo(*name).unwrap());
    }
    list
}

#[test]
fn add_preserves_insertion_order() {
    let list = todos(&["alpha", "beta", "gamma"]);
    assert_eq!(list.size(), 3);
    let names: Vec<_> = list.all().iter().map(Task::description).collect();
    assert_eq!(names, ["alpha", "beta", "gamma"]);
}

#[test]
fn remove_shifts_later_tasks_down() {
    let mut list = todos(&["first", "second", "third", "fourth"]);

    let removed = list.remove(1);

    assert_eq!(removed.description(), "second");
    assert_eq!(list.size(), 3);
    assert_eq!(list.get(0).description(), "first");
    assert_eq!(list.get(1).description(), "third");
    assert_eq!(list.get(2).description(), "fourth");
}

#[test]
fn size_tracks_adds_and_removes() {
    let mut list = TaskList::new();
    assert!(list.is_empty());
    list.add(Task::todo("a").unwrap());
    list.add(Task::todo("b").unwrap());
    assert_eq!(list.size(), 2);
    list.remove(0);
    assert_eq!(list.size(), 1);
}

#[test]
fn get_mut_edits_the_owned_task() {
    let mut list = todos(&["unique"]);
    list.get_mut(0).mark();
    assert!(list.get(0).is_done());
    assert!(list.get(0).to_string().contains("[X]"));
}

#[test]
fn find_is_case_sensitive_and_ordered() {
    let list = todos(&["read book", "Book club", "return book", "laundry"]);

    let hits: Vec<_> = list
        .find_by_description_contains("book")
        .into_iter()
        .map(Task::description)
        .collect();
    assert_eq!(hits, ["read book", "return book"]);

    assert!(list.find_by_description_contains("missing").is_empty());
}
