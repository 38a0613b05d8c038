use nebula_store::InMemoryStore;
use nebula_theatre::{ConditionalError, Coordinator, ReadOutcome, Theatre, TheatreDraft};
use std::sync::{Arc, Barrier};
use std::thread;

const WRITERS: u32 = 16;

fn draft(capacity: u32) -> TheatreDraft {
    let mut d = TheatreDraft::named("Grand Cinema");
    d.capacity = Some(capacity);
    d
}

#[test]
fn test_racing_replaces_with_same_if_match_admit_one() {
    let coordinator = Arc::new(Coordinator::new(InMemoryStore::<Theatre>::new()));
    let created = coordinator.create(draft(0)).unwrap();
    let id = created.theatre.id;
    let barrier = Arc::new(Barrier::new(WRITERS as usize));

    let handles: Vec<_> = (1..=WRITERS)
        .map(|n| {
            let coordinator = Arc::clone(&coordinator);
            let barrier = Arc::clone(&barrier);
            let etag = created.etag.to_string();
            thread::spawn(move || {
                barrier.wait();
                coordinator.replace(id, draft(n), Some(etag.as_str()))
            })
        })
        .collect();

    let mut winners = Vec::new();
    let mut conflicts = 0;
    for handle in handles {
        match handle.join().unwrap() {
            Ok(versioned) => winners.push(versioned),
            Err(ConditionalError::PreconditionFailed) => conflicts += 1,
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    assert_eq!(winners.len(), 1);
    assert_eq!(conflicts, WRITERS - 1);

    match coordinator.read(id, None).unwrap() {
        ReadOutcome::Fresh(current) => assert_eq!(current, winners[0]),
        other => panic!("expected Fresh, got {:?}", other),
    }
}

#[test]
fn test_racing_delete_and_replace_never_resurrect() {
    for _ in 0..50 {
        let coordinator = Arc::new(Coordinator::new(InMemoryStore::<Theatre>::new()));
        let created = coordinator.create(draft(0)).unwrap();
        let id = created.theatre.id;
        let etag = created.etag.to_string();

        let deleter = {
            let coordinator = Arc::clone(&coordinator);
            let etag = etag.clone();
            thread::spawn(move || coordinator.delete(id, Some(etag.as_str())).is_ok())
        };
        let replacer = {
            let coordinator = Arc::clone(&coordinator);
            thread::spawn(move || coordinator.replace(id, draft(1), Some(etag.as_str())).is_ok())
        };

        let deleted = deleter.join().unwrap();
        let replaced = replacer.join().unwrap();

        // Both guard on the same version, so exactly one can apply.
        assert!(deleted ^ replaced);
        assert_eq!(coordinator.store().is_empty(), deleted);
    }
}
