//! Lives in its own test binary, so no other test spawns threads while the
//! count is taken.

#![cfg(target_os = "linux")]

mod common;

use std::{fmt::Write as _, fs, time::Duration};

use futures::FutureExt as _;
use stepwise::{source, Suite, World};

use self::common::{re, Collect};

fn threads() -> usize {
    fs::read_dir("/proc/self/task").unwrap().count()
}

fn document(steps: usize) -> String {
    (0..steps).fold(
        "Feature: Quick\n  Scenario: Many steps\n    Given a quick step\n"
            .to_owned(),
        |mut doc, _| {
            writeln!(doc, "    And a quick step").unwrap();
            doc
        },
    )
}

async fn run(steps: usize) -> Collect {
    Suite::new()
        .with_writer(Collect::default())
        .with_source(source::Memory::new().with("quick.feature", document(steps)))
        .with_timeout(Duration::from_secs(60))
        .given_async(re("^a quick step$"), |_: &mut World, _| {
            futures::future::ready(()).boxed_local()
        })
        .run(["quick.feature"])
        .await
}

#[tokio::test]
async fn completed_async_steps_release_their_deadlines() {
    let warm_up = run(1).await;
    assert_eq!(warm_up.summaries(), [("Many steps", true)]);
    let before = threads();

    let out = run(200).await;
    let after = threads();

    assert_eq!(out.summaries(), [("Many steps", true)]);
    assert!(
        after <= before + 1,
        "threads grew from {before} to {after} after 201 async steps",
    );
}
