// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Writer`]-wrapper for collecting a summary of execution.

use async_trait::async_trait;
use derive_more::Deref;

use crate::{cli, writer::Arbitrary, Event, Writer};

/// Scenario rows statistics.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// Number of passed scenario rows.
    pub passed: usize,

    /// Number of failed scenario rows.
    pub failed: usize,
}

impl Stats {
    /// Returns the total number of scenario rows.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.passed + self.failed
    }
}

/// Wrapper for a [`Writer`] implementation for outputting a summary (number
/// of documents, scenario rows and errors) of execution.
///
/// The summary is output via [`Arbitrary::write()`] once [`Event::Finished`]
/// is received.
#[derive(Clone, Debug, Deref)]
pub struct Summarized<Wr> {
    /// Original [`Writer`] to summarize output of.
    #[deref]
    writer: Wr,

    /// Number of completed documents.
    pub documents: usize,

    /// Scenario rows [`Stats`].
    pub scenarios: Stats,

    /// Number of reported errors, grammar and document ones included.
    pub errors: usize,
}

impl<Wr> Summarized<Wr> {
    /// Wraps the given [`Writer`] into a new [`Summarized`] one.
    #[must_use]
    pub const fn new(writer: Wr) -> Self {
        Self {
            writer,
            documents: 0,
            scenarios: Stats {
                passed: 0,
                failed: 0,
            },
            errors: 0,
        }
    }

    /// Indicates whether there have been failed scenario rows or any errors.
    #[must_use]
    pub const fn execution_has_failed(&self) -> bool {
        self.scenarios.failed > 0 || self.errors > 0
    }

    /// Unwraps this [`Summarized`] into the original [`Writer`].
    #[must_use]
    pub fn into_inner(self) -> Wr {
        self.writer
    }

    /// Renders the collected summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "[Summary]\n\
             {} document{}\n\
             {} scenario{} ({} passed, {} failed)\n\
             {} error{}",
            self.documents,
            plural(self.documents),
            self.scenarios.total(),
            plural(self.scenarios.total()),
            self.scenarios.passed,
            self.scenarios.failed,
            self.errors,
            plural(self.errors),
        )
    }

    /// Keeps track of the given [`Event`].
    fn count(&mut self, ev: &Event) {
        match ev {
            Event::Summary { passed: true, .. } => self.scenarios.passed += 1,
            Event::Summary { passed: false, .. } => self.scenarios.failed += 1,
            Event::Error { .. } => self.errors += 1,
            Event::Complete { .. } => self.documents += 1,
            Event::Information(_) | Event::Finished => {}
        }
    }
}

/// Returns the plural suffix for the given `n`.
const fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

#[async_trait(?Send)]
impl<Wr: Writer + Arbitrary> Writer for Summarized<Wr> {
    async fn handle_event(&mut self, ev: Event) {
        self.count(&ev);
        let finished = matches!(ev, Event::Finished);

        self.writer.handle_event(ev).await;

        if finished {
            let summary = self.summary();
            self.writer.write(summary).await;
        }
    }

    fn apply_cli(&mut self, opts: &cli::Opts) {
        self.writer.apply_cli(opts);
    }
}

#[async_trait(?Send)]
impl<Wr: Writer + Arbitrary> Arbitrary for Summarized<Wr> {
    async fn write(&mut self, val: String) {
        self.writer.write(val).await;
    }
}

#[cfg(test)]
mod tests {
    use super::{Stats, Summarized};
    use crate::{
        source,
        writer::{out::WritableString, Basic, Coloring, Ext as _},
        Event, Writer as _,
    };

    #[tokio::test]
    async fn counts_and_prints_summary() {
        let mut w = Basic::new(WritableString::default(), Coloring::Never)
            .summarized();

        w.handle_event(Event::summary("Calc", "Add", true)).await;
        w.handle_event(Event::summary("Calc", "Sub", false)).await;
        w.handle_event(Event::error(
            "",
            "missing.feature",
            source::Error::NotFound {
                path: "missing.feature".into(),
            },
        ))
        .await;
        w.handle_event(Event::complete("calc.feature")).await;
        w.handle_event(Event::complete("missing.feature")).await;
        w.handle_event(Event::Finished).await;

        assert_eq!(w.scenarios, Stats { passed: 1, failed: 1 });
        assert_eq!(w.errors, 1);
        assert_eq!(w.documents, 2);
        assert!(w.execution_has_failed());
        assert!(w.output().0.ends_with(
            "[Summary]\n2 documents\n2 scenarios (1 passed, 1 failed)\n1 error\n",
        ));
    }

    #[test]
    fn nothing_reported_is_not_a_failure() {
        let w = Summarized::new(());

        assert!(!w.execution_has_failed());
        assert_eq!(w.summary(), "[Summary]\n0 documents\n0 scenarios (0 passed, 0 failed)\n0 errors");
    }
}
