//! Readers racing a publisher must always see a document and index from the
//! same upload.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use syllabus_core::{
    CourseMetadata, ReferenceSet, Syllabus, SyllabusDocument, SyllabusStore, TopicMap, Unit,
};

fn syllabus(code: &str, co_count: usize) -> Syllabus {
    let units = (1..=co_count)
        .map(|n| {
            let mut topics = TopicMap::new();
            topics.insert(format!("{code} topic {n}"), vec![format!("Item {n}")]);
            Unit {
                unit_id: format!("UNIT-{n}"),
                title: format!("{code} unit {n}"),
                periods: 9,
                topics,
                course_outcome: Some(format!("CO{n}")),
            }
        })
        .collect::<Vec<_>>();

    Syllabus::new(SyllabusDocument {
        metadata: CourseMetadata {
            course_code: Some(code.to_string()),
            ..CourseMetadata::default()
        },
        total_units: units.len(),
        unit_periods: Some(9),
        units,
        total_periods: None,
        assessment: None,
        references: ReferenceSet::default(),
        correlation_table: None,
    })
}

#[test]
fn snapshots_are_never_torn() {
    let store = Arc::new(SyllabusStore::new());
    store.publish(syllabus("AAA", 2));
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                while !done.load(Ordering::Relaxed) {
                    let snapshot = store.current().unwrap();
                    let code = snapshot.document().metadata.course_code.clone().unwrap();
                    assert_eq!(snapshot.index().len(), snapshot.document().units.len());
                    for entry in snapshot.index().iter() {
                        assert!(entry.unit_title.starts_with(&code));
                        assert!(entry.topic_text.starts_with(&code));
                    }
                }
            })
        })
        .collect();

    for round in 0..200 {
        if round % 2 == 0 {
            store.publish(syllabus("BBB", 5));
        } else {
            store.publish(syllabus("AAA", 2));
        }
    }
    done.store(true, Ordering::Relaxed);

    for reader in readers {
        reader.join().unwrap();
    }
}
