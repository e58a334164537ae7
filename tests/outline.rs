mod common;

use stepwise::{step::Args, Suite, World};

use self::common::{numeric, total, Collect};

#[tokio::test]
async fn every_example_row_runs_against_a_fresh_world() {
    let out = Suite::new()
        .with_writer(Collect::default())
        .given(
            numeric("^there are {} cucumbers$"),
            |w: &mut World, args: Args| -> anyhow::Result<()> {
                anyhow::ensure!(!w.contains("total"), "world leaked from a previous row");
                _ = w.insert("total", args.number(0)?);
                Ok(())
            },
        )
        .when(
            numeric("^I eat {} cucumbers$"),
            |w: &mut World, args: Args| -> anyhow::Result<()> {
                _ = w.insert("total", total(w) - args.number(0)?);
                Ok(())
            },
        )
        .then(
            numeric("^I should have {} cucumbers$"),
            |w: &mut World, args: Args| -> anyhow::Result<()> {
                let expected = args.number(0)?;
                anyhow::ensure!(
                    total(w) == expected,
                    "expected {expected}, got {}",
                    total(w),
                );
                Ok(())
            },
        )
        .run(["tests/features/outline.feature"])
        .await;

    assert_eq!(
        out.summaries(),
        [("Eating", true), ("Eating", true), ("Eating", false)],
    );

    let errors = out.errors();
    assert_eq!(errors.len(), 1, "{errors:#?}");
    assert_eq!(errors[0].0, "I should have \"1\" cucumbers");
    assert!(errors[0].1.to_string().contains("expected 1, got 0"));
}
