mod common;

use stepwise::{Error, Event, Suite, World};

use self::common::{re, Collect};

fn suite() -> Suite<Collect> {
    Suite::new()
        .with_writer(Collect::default())
        .given(re("^a passing step$"), |_: &mut World, _| ())
        .then(re("^it passes$"), |_: &mut World, _| ())
}

#[tokio::test]
async fn directory_expands_to_feature_files_only() {
    let out = suite().run(["tests/features/suite"]).await;

    let completed = out.completed();
    assert_eq!(completed.len(), 2, "{completed:?}");
    assert!(completed[0].ends_with("first.feature"));
    assert!(completed[1].ends_with("second.feature"));
    assert_eq!(out.summaries(), [("One", true), ("Two", true)]);
}

#[tokio::test]
async fn missing_document_is_reported() {
    let out = suite()
        .run(["tests/features/missing.feature", "tests/features/suite/first.feature"])
        .await;

    assert!(matches!(
        &out.0[0],
        Event::Error { feature, error: Error::Fetch(_), .. } if feature.is_empty(),
    ));
    assert_eq!(out.summaries(), [("One", true)]);
    assert!(matches!(out.0.last(), Some(Event::Finished)));
}

#[tokio::test]
async fn seeded_random_order_is_reproducible() {
    let paths = [
        "tests/features/suite/first.feature",
        "tests/features/suite/second.feature",
        "tests/features/calculator.feature",
        "tests/features/outline.feature",
        "tests/features/tagged.feature",
    ];

    let first = suite().with_seed(11).run_in_random_order(paths).await;
    let second = suite().with_seed(11).run_in_random_order(paths).await;

    assert_eq!(first.completed(), second.completed());
    let mut sorted = first.completed();
    sorted.sort_unstable();
    let mut expected = paths.to_vec();
    expected.sort_unstable();
    assert_eq!(sorted, expected);
}
