// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Default scenario executor.

use std::panic::{self, AssertUnwindSafe};

use futures::FutureExt as _;
use tracing::Instrument as _;

use crate::{
    future,
    scenario::{substitute, Row},
    step::{self, Implementation},
    Error, Event, Keywords, Role, Scenario, World, Writer,
};

use super::Config;

/// Result of a single scenario row.
#[derive(Clone, Debug)]
pub struct RowOutcome {
    /// Title of the scenario.
    pub title: String,

    /// Whether every line of the row succeeded.
    pub passed: bool,

    /// Every failure of the row, in source order.
    pub errors: Vec<Error>,
}

/// Default scenario executor.
///
/// Expands a [`Scenario`] into one execution per table row, substitutes the
/// row into `<token>` placeholders and runs every line against a fresh
/// [`World`], reporting [`Event`]s to a [`Writer`].
#[derive(Clone, Debug, Default)]
pub struct Basic {
    /// Step definitions to match lines against.
    steps: step::Collection,

    /// Vocabulary of `<token>` placeholders.
    keywords: Keywords,

    /// Configuration of this [`Basic`] executor.
    config: Config,
}

impl Basic {
    /// Creates a new [`Basic`] executor.
    #[must_use]
    pub const fn new(
        steps: step::Collection,
        keywords: Keywords,
        config: Config,
    ) -> Self {
        Self {
            steps,
            keywords,
            config,
        }
    }

    /// Returns the step definitions of this [`Basic`] executor.
    #[must_use]
    pub const fn steps(&self) -> &step::Collection {
        &self.steps
    }

    /// Returns the [`Config`] of this [`Basic`] executor.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the given [`Scenario`], reporting into the `writer`.
    ///
    /// # Events
    ///
    /// - Nothing for an excluded [`Scenario`].
    /// - [`Event::Error`] per grammar error, followed by a failed
    ///   [`Event::Summary`] if the [`Scenario`] has a title. Such a
    ///   [`Scenario`] is not executed.
    /// - [`Event::Information`] for a record without a scenario title.
    /// - Otherwise, [`Event::Error`] per failed line and an [`Event::Summary`]
    ///   per row.
    pub async fn run<Wr>(
        &self,
        scenario: &Scenario,
        writer: &mut Wr,
    ) -> Vec<RowOutcome>
    where
        Wr: Writer + ?Sized,
    {
        let feature = scenario.feature_title.as_str();

        if let Some(tag) = scenario.excluded_by() {
            tracing::debug!(
                scenario = scenario.scenario_title.as_deref(),
                "excluded by `@{tag}`",
            );
            return Vec::new();
        }

        if scenario.has_errors() {
            for err in &scenario.errors {
                writer
                    .handle_event(Event::error(feature, err.line.trim(), err.clone()))
                    .await;
            }
            let Some(title) = scenario.scenario_title.as_deref() else {
                return Vec::new();
            };
            writer.handle_event(Event::summary(feature, title, false)).await;
            return vec![RowOutcome {
                title: title.to_owned(),
                passed: false,
                errors: scenario.errors.iter().cloned().map(Error::from).collect(),
            }];
        }

        let Some(title) = scenario.scenario_title.as_deref() else {
            writer
                .handle_event(Event::information(format!(
                    "Feature `{feature}` has no scenario to run",
                )))
                .await;
            return Vec::new();
        };

        let mut outcomes = Vec::with_capacity(scenario.row_count());
        for (index, row) in scenario.rows().enumerate() {
            let span = tracing::debug_span!("row", scenario = title, index);
            let errors = self
                .run_row(scenario, &row, writer)
                .instrument(span)
                .await;

            let passed = errors.is_empty();
            writer.handle_event(Event::summary(feature, title, passed)).await;
            outcomes.push(RowOutcome {
                title: title.to_owned(),
                passed,
                errors,
            });
        }
        outcomes
    }

    /// Runs every line of the [`Scenario`] with the given [`Row`] substituted,
    /// against a fresh [`World`].
    ///
    /// A failed line doesn't stop the following ones.
    async fn run_row<Wr>(
        &self,
        scenario: &Scenario,
        row: &Row,
        writer: &mut Wr,
    ) -> Vec<Error>
    where
        Wr: Writer + ?Sized,
    {
        let mut world = World::new();
        let mut errors = Vec::new();

        for (role, line) in scenario.steps() {
            let condition = substitute(line, row, &self.keywords);
            match self.run_step(&condition, role, &mut world).await {
                Ok(()) => tracing::debug!(%condition, "passed"),
                Err(e) => {
                    tracing::debug!(%condition, "failed: {e}");
                    writer
                        .handle_event(Event::error(
                            scenario.feature_title.as_str(),
                            &*condition,
                            e.clone(),
                        ))
                        .await;
                    errors.push(e);
                }
            }
        }
        errors
    }

    /// Matches the `condition` and invokes the matched implementation.
    ///
    /// # Errors
    ///
    /// If nothing matches the `condition`, or the implementation fails,
    /// panics or times out.
    async fn run_step(
        &self,
        condition: &str,
        role: Role,
        world: &mut World,
    ) -> Result<(), Error> {
        let execution = self
            .steps
            .find(condition, role)?
            .ok_or_else(|| step::Unmatched::new(condition, role))?;
        let (implementation, args) = execution.into_parts();

        let outcome = match implementation {
            Implementation::Sync(f) => {
                panic::catch_unwind(AssertUnwindSafe(|| f(world, args)))
            }
            Implementation::Async(f) => {
                let fut = AssertUnwindSafe(async move { f(world, args).await })
                    .catch_unwind();
                match self.config.timeout {
                    Some(limit) => future::timeout(limit, fut).await?,
                    None => fut.await,
                }
            }
        };

        outcome
            .map_err(|info| step::Failed::from_panic(&*info))?
            .map_err(step::Failed::from)?;
        Ok(())
    }
}
