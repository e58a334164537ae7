// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Default [`Writer`] implementation.

use std::io;

use async_trait::async_trait;

use crate::{
    cli,
    writer::{
        out::{indent, Coloring, Styles, WriteStrExt as _},
        Arbitrary,
    },
    Error, Event, Writer,
};

/// Default [`Writer`] implementation outputting to an [`io::Write`]
/// implementor, [`io::Stdout`] by default.
///
/// Renders a header per feature, a `✔`/`✘` line per scenario row and every
/// error below its scenario.
#[derive(Debug)]
pub struct Basic<Out: io::Write = io::Stdout> {
    /// [`io::Write`] implementor to write the output into.
    output: Out,

    /// [`Styles`] for terminal output.
    styles: Styles,

    /// Title of the feature whose header was output last.
    current_feature: Option<String>,
}

impl Basic {
    /// Creates a new [`Basic`] [`Writer`] outputting to [`io::Stdout`].
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout(), Coloring::Auto)
    }
}

impl Default for Basic {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<Out: io::Write> Basic<Out> {
    /// Creates a new [`Basic`] [`Writer`] outputting to the given `output`.
    #[must_use]
    pub fn new(output: Out, color: Coloring) -> Self {
        let mut styles = Styles::new();
        styles.apply_coloring(color);
        Self {
            output,
            styles,
            current_feature: None,
        }
    }

    /// Returns the underlying output.
    #[must_use]
    pub const fn output(&self) -> &Out {
        &self.output
    }

    /// Applies the given [`Coloring`] to further output.
    pub fn apply_coloring(&mut self, color: Coloring) {
        self.styles.apply_coloring(color);
    }

    /// Outputs the header of the given `feature`, unless it's already the
    /// current one.
    fn feature(&mut self, feature: &str) -> io::Result<()> {
        if self.current_feature.as_deref() == Some(feature) {
            return Ok(());
        }
        self.current_feature = Some(feature.to_owned());
        let header = self.styles.header(format!("Feature: {feature}"));
        self.output.write_line(self.styles.bold(header))
    }

    /// Outputs a scenario row's result.
    fn summary(
        &mut self,
        feature: &str,
        scenario: &str,
        passed: bool,
    ) -> io::Result<()> {
        self.feature(feature)?;
        let line = if passed {
            self.styles.ok(format!("  ✔  Scenario: {scenario}"))
        } else {
            self.styles.err(format!("  ✘  Scenario: {scenario}"))
        };
        self.output.write_line(line)
    }

    /// Outputs a failed line along with its [`Error`].
    fn error(
        &mut self,
        feature: &str,
        condition: &str,
        error: &Error,
    ) -> io::Result<()> {
        if !feature.is_empty() {
            self.feature(feature)?;
        }
        let text = format!("  ✘  {condition}\n{}", indent(&error.to_string(), 6));
        self.output.write_line(self.styles.err(text))
    }

    /// Dispatches the given [`Event`] to its output routine.
    fn output_event(&mut self, ev: &Event) -> io::Result<()> {
        match ev {
            Event::Summary {
                feature,
                scenario,
                passed,
            } => self.summary(feature, scenario, *passed),
            Event::Error {
                feature,
                condition,
                error,
            } => self.error(feature, condition, error),
            Event::Information(msg) => {
                self.output.write_line(self.styles.info(format!("  {msg}")))
            }
            Event::Complete { .. } => {
                self.current_feature = None;
                Ok(())
            }
            Event::Finished => self.output.flush(),
        }
    }
}

#[async_trait(?Send)]
impl<Out: io::Write> Writer for Basic<Out> {
    async fn handle_event(&mut self, ev: Event) {
        if let Err(e) = self.output_event(&ev) {
            tracing::error!("failed to write into terminal: {e}");
        }
    }

    fn apply_cli(&mut self, opts: &cli::Opts) {
        self.apply_coloring(opts.color);
    }
}

#[async_trait(?Send)]
impl<Out: io::Write> Arbitrary for Basic<Out> {
    async fn write(&mut self, val: String) {
        if let Err(e) = self.output.write_line(val) {
            tracing::error!("failed to write into terminal: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Basic;
    use crate::{
        step,
        writer::{
            out::{Coloring, WritableString},
            Arbitrary as _,
        },
        Event, Writer as _,
    };

    #[tokio::test]
    async fn renders_features_and_scenarios() {
        let mut w = Basic::new(WritableString::default(), Coloring::Never);

        w.handle_event(Event::summary("Calc", "Add", true)).await;
        w.handle_event(Event::summary("Calc", "Sub", false)).await;
        w.handle_event(Event::error(
            "Calc",
            "I press \"x\"",
            step::Unmatched::new("I press \"x\"", step::Role::WHEN),
        ))
        .await;
        w.handle_event(Event::information("Feature `Empty` has no scenario"))
            .await;
        w.handle_event(Event::complete("calc.feature")).await;
        w.handle_event(Event::summary("Calc", "Again", true)).await;
        w.write("done".into()).await;

        let out = &w.output().0;
        assert!(out.starts_with("Feature: Calc\n  ✔  Scenario: Add\n  ✘  Scenario: Sub\n"), "{out}");
        assert!(out.contains("  ✘  I press \"x\"\n      No step definition found"), "{out}");
        assert!(out.contains("  Feature `Empty` has no scenario\n"), "{out}");
        assert_eq!(out.matches("Feature: Calc").count(), 2, "{out}");
        assert!(out.ends_with("done\n"), "{out}");
    }
}
