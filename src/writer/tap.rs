// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [TAP] [`Writer`] implementation.
//!
//! [TAP]: https://testanything.org/tap-version-13-specification.html

use std::{borrow::Cow, io};

use async_trait::async_trait;

use crate::{
    writer::{out::WriteStrExt as _, Arbitrary},
    Event, Writer,
};

/// [`Writer`] rendering scenario rows as [TAP] test points.
///
/// Every [`Event::Summary`] becomes an `ok`/`not ok` line, everything else is
/// rendered as `#` diagnostics, and the `1..N` plan closes the output on
/// [`Event::Finished`].
///
/// [TAP]: https://testanything.org/tap-version-13-specification.html
#[derive(Debug)]
pub struct Tap<Out: io::Write = io::Stdout> {
    /// [`io::Write`] implementor to write the output into.
    output: Out,

    /// Number of test points output so far.
    points: usize,

    /// Whether the version line was output.
    started: bool,
}

impl Tap {
    /// Creates a new [`Tap`] [`Writer`] outputting to [`io::Stdout`].
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl Default for Tap {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<Out: io::Write> Tap<Out> {
    /// Creates a new [`Tap`] [`Writer`] outputting to the given `output`.
    #[must_use]
    pub const fn new(output: Out) -> Self {
        Self {
            output,
            points: 0,
            started: false,
        }
    }

    /// Returns the underlying output.
    #[must_use]
    pub const fn output(&self) -> &Out {
        &self.output
    }

    /// Outputs the given `text` as `#` diagnostic lines.
    fn diagnostic(&mut self, text: &str) -> io::Result<()> {
        for line in text.lines() {
            self.output.write_line(format!("# {line}").trim_end())?;
        }
        Ok(())
    }

    /// Dispatches the given [`Event`] to its output routine.
    fn output_event(&mut self, ev: &Event) -> io::Result<()> {
        if !self.started {
            self.started = true;
            self.output.write_line("TAP version 13")?;
        }

        match ev {
            Event::Summary {
                feature,
                scenario,
                passed,
            } => {
                self.points += 1;
                let status = if *passed { "ok" } else { "not ok" };
                self.output.write_line(format!(
                    "{status} {} - {}: {}",
                    self.points,
                    escape(feature),
                    escape(scenario),
                ))
            }
            Event::Error {
                feature,
                condition,
                error,
            } => {
                let header = if feature.is_empty() {
                    condition.clone()
                } else {
                    format!("{feature}: {condition}")
                };
                self.diagnostic(&header)?;
                self.diagnostic(&error.to_string())
            }
            Event::Information(msg) => self.diagnostic(msg),
            Event::Complete { .. } => Ok(()),
            Event::Finished => {
                self.output.write_line(format!("1..{}", self.points))?;
                self.output.flush()
            }
        }
    }
}

/// Escapes `#` and `\` in a test point description, so a title isn't read as
/// a directive.
fn escape(text: &str) -> Cow<'_, str> {
    if text.contains(|c: char| matches!(c, '#' | '\\')) {
        Cow::Owned(text.replace('\\', r"\\").replace('#', r"\#"))
    } else {
        Cow::Borrowed(text)
    }
}

#[async_trait(?Send)]
impl<Out: io::Write> Writer for Tap<Out> {
    async fn handle_event(&mut self, ev: Event) {
        if let Err(e) = self.output_event(&ev) {
            tracing::error!("failed to write TAP output: {e}");
        }
    }
}

#[async_trait(?Send)]
impl<Out: io::Write> Arbitrary for Tap<Out> {
    async fn write(&mut self, val: String) {
        if let Err(e) = self.diagnostic(&val) {
            tracing::error!("failed to write TAP output: {e}");
        }
    }
}
