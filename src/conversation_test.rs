use super::*;
use crate::types::Role;
use std::sync::Arc;

#[test]
fn new_store_is_empty() {
    let store = ConversationStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert!(store.all().is_empty());
    assert_eq!(store.last(), None);
}

#[test]
fn append_preserves_insertion_order() {
    let store = ConversationStore::new();
    assert_eq!(store.append(Message::user("one")), 1);
    assert_eq!(store.append(Message::agent("two")), 2);
    assert_eq!(store.append(Message::user("three")), 3);

    let contents: Vec<_> = store.all().iter().map(|m| m.content().to_owned()).collect();
    assert_eq!(contents, ["one", "two", "three"]);
    assert_eq!(store.last().unwrap().role(), Role::User);
}

#[test]
fn snapshot_is_unaffected_by_later_appends() {
    let store = ConversationStore::new();
    store.append(Message::user("hello"));
    let snapshot = store.all();
    store.append(Message::agent("hi"));
    assert_eq!(snapshot.len(), 1);
    assert_eq!(store.len(), 2);
}

#[test]
fn since_returns_tail_and_tolerates_out_of_range() {
    let store = ConversationStore::new();
    store.append(Message::user("a"));
    store.append(Message::agent("b"));
    assert_eq!(store.since(1), vec![Message::agent("b")]);
    assert!(store.since(2).is_empty());
    assert!(store.since(10).is_empty());
}

#[test]
fn concurrent_readers_see_whole_messages() {
    let store = Arc::new(ConversationStore::new());
    let writer = {
        let store = Arc::clone(&store);
        std::thread::spawn(move || {
            for i in 0..200 {
                store.append(Message::user(format!("message {i}")));
            }
        })
    };

    let mut last_len = 0;
    while last_len < 200 {
        let snapshot = store.all();
        assert!(snapshot.len() >= last_len);
        for (i, msg) in snapshot.iter().enumerate() {
            assert_eq!(msg.content(), format!("message {i}"));
        }
        last_len = snapshot.len();
    }
    writer.join().unwrap();
}
