mod common;

use common::{groceries_and_work, note};
use pocketnote_core::filter_notes;

#[test]
fn scenario_queries_select_expected_notes() {
    let (groceries, work) = groceries_and_work();
    let notes = vec![groceries.clone(), work.clone()];

    let hits = filter_notes(&notes, "mi");
    assert_eq!(hits, vec![&groceries]);

    let hits = filter_notes(&notes, "notes");
    assert_eq!(hits, vec![&work]);

    let hits = filter_notes(&notes, "");
    assert_eq!(hits, vec![&groceries, &work]);
}

#[test]
fn filter_returns_exactly_matching_notes_in_input_order() {
    let notes = vec![
        note("Alpha", "first"),
        note("beta", "contains ALPHA too"),
        note("gamma", "nothing"),
        note("", "alphabet"),
    ];
    let queries = ["alpha", "ALP", "a", "zzz", "first", "T"];

    for query in queries {
        let needle = query.to_lowercase();
        let expected: Vec<_> = notes
            .iter()
            .filter(|n| {
                n.title.to_lowercase().contains(&needle)
                    || n.content.to_lowercase().contains(&needle)
            })
            .collect();
        assert_eq!(filter_notes(&notes, query), expected, "query {query:?}");
    }
}

#[test]
fn filter_does_not_mutate_input() {
    let notes = vec![note("One", "1"), note("Two", "2")];
    let before = notes.clone();
    let _ = filter_notes(&notes, "one");
    assert_eq!(notes, before);
}

#[test]
fn empty_collection_yields_empty_result() {
    assert!(filter_notes(&[], "anything").is_empty());
    assert!(filter_notes(&[], "").is_empty());
}
