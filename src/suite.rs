// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Top-level [`Suite`] executor.

use std::time::Duration;

use futures::future::LocalBoxFuture;
use rand::{rngs::StdRng, Rng as _, SeedableRng as _};
use regex::Regex;
use tracing::Instrument as _;

use crate::{
    cli, logging, parser, runner,
    source::{self, Source},
    step::{self, Args, Implementation, IntoOutcome},
    writer::{self, Ext as _, Summarized},
    Event, Keywords, Role, World, Writer,
};

/// Top-level executor: registration surface for step definitions, and the
/// driver running specification documents through the parser and the
/// [`runner::Basic`] executor.
///
/// Documents run strictly one after another, in the supplied order or in a
/// randomized one computed once up front.
///
/// By default, documents are read from the filesystem with [`source::Fs`],
/// and the output is a [`Summarized`] [`writer::Console`].
#[derive(Debug)]
pub struct Suite<Wr = Summarized<writer::Console>, Src = source::Fs> {
    /// Registered step definitions.
    steps: step::Collection,

    /// Parser of documents.
    parser: parser::Basic,

    /// Configuration of the run.
    config: runner::Config,

    /// [`Writer`] to report [`Event`]s into.
    writer: Wr,

    /// [`Source`] of documents.
    source: Src,
}

impl Default for Suite {
    fn default() -> Self {
        Self {
            steps: step::Collection::new(),
            parser: parser::Basic::new(Keywords::new()),
            config: runner::Config::default(),
            writer: writer::Console::default().summarized(),
            source: source::Fs,
        }
    }
}

impl Suite {
    /// Creates a default [`Suite`] executor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<Wr, Src> Suite<Wr, Src> {
    /// Replaces the [`Writer`].
    #[must_use]
    pub fn with_writer<NewWr: Writer>(self, writer: NewWr) -> Suite<NewWr, Src> {
        let Self {
            steps,
            parser,
            config,
            source,
            ..
        } = self;
        Suite {
            steps,
            parser,
            config,
            writer,
            source,
        }
    }

    /// Replaces the [`Source`] of documents.
    #[must_use]
    pub fn with_source<NewSrc: Source>(self, source: NewSrc) -> Suite<Wr, NewSrc> {
        let Self {
            steps,
            parser,
            config,
            writer,
            ..
        } = self;
        Suite {
            steps,
            parser,
            config,
            writer,
            source,
        }
    }

    /// Limits the time every asynchronous step is allowed to take.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Makes the randomized order of [`Suite::run_in_random_order()`]
    /// reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Excludes scenarios carrying any of the given `tags` from execution.
    ///
    /// Excluded scenarios are parsed, but produce no [`Event`]s at all.
    #[must_use]
    pub fn exclude_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.parser = self.parser.exclude_tags(tags);
        self
    }

    /// Returns the [`runner::Config`] of this [`Suite`].
    #[must_use]
    pub const fn config(&self) -> &runner::Config {
        &self.config
    }

    /// Returns the [`Writer`] of this [`Suite`].
    #[must_use]
    pub const fn writer(&self) -> &Wr {
        &self.writer
    }

    /// Replaces the [`step::Collection`] of definitions.
    #[must_use]
    pub fn steps(mut self, steps: step::Collection) -> Self {
        self.steps = steps;
        self
    }

    /// Inserts a step definition restricted to the given [`Role`].
    ///
    /// Definitions are matched in registration order, and the first matching
    /// one wins: a broad pattern registered first shadows narrower ones
    /// registered after it.
    #[must_use]
    pub fn step_with(
        mut self,
        role: Role,
        regex: Regex,
        implementation: Implementation,
    ) -> Self {
        self.steps = self.steps.with(role, regex, implementation);
        self
    }

    /// Inserts a step definition matching lines of any [`Role`].
    #[must_use]
    pub fn step<F, O>(self, regex: Regex, step: F) -> Self
    where
        F: Fn(&mut World, Args) -> O + 'static,
        O: IntoOutcome,
    {
        self.step_with(Role::ANY, regex, Implementation::sync(step))
    }

    /// Inserts a `Given` step definition.
    #[must_use]
    pub fn given<F, O>(self, regex: Regex, step: F) -> Self
    where
        F: Fn(&mut World, Args) -> O + 'static,
        O: IntoOutcome,
    {
        self.step_with(Role::GIVEN, regex, Implementation::sync(step))
    }

    /// Inserts a `When` step definition.
    #[must_use]
    pub fn when<F, O>(self, regex: Regex, step: F) -> Self
    where
        F: Fn(&mut World, Args) -> O + 'static,
        O: IntoOutcome,
    {
        self.step_with(Role::WHEN, regex, Implementation::sync(step))
    }

    /// Inserts a `Then` step definition.
    #[must_use]
    pub fn then<F, O>(self, regex: Regex, step: F) -> Self
    where
        F: Fn(&mut World, Args) -> O + 'static,
        O: IntoOutcome,
    {
        self.step_with(Role::THEN, regex, Implementation::sync(step))
    }

    /// Inserts an asynchronous step definition matching lines of any
    /// [`Role`].
    ///
    /// The line completes once the returned [`Future`] resolves.
    ///
    /// [`Future`]: std::future::Future
    #[must_use]
    pub fn step_async<F, O>(self, regex: Regex, step: F) -> Self
    where
        F: for<'w> Fn(&'w mut World, Args) -> LocalBoxFuture<'w, O> + 'static,
        O: IntoOutcome + 'static,
    {
        self.step_with(Role::ANY, regex, Implementation::r#async(step))
    }

    /// Inserts an asynchronous `Given` step definition.
    #[must_use]
    pub fn given_async<F, O>(self, regex: Regex, step: F) -> Self
    where
        F: for<'w> Fn(&'w mut World, Args) -> LocalBoxFuture<'w, O> + 'static,
        O: IntoOutcome + 'static,
    {
        self.step_with(Role::GIVEN, regex, Implementation::r#async(step))
    }

    /// Inserts an asynchronous `When` step definition.
    #[must_use]
    pub fn when_async<F, O>(self, regex: Regex, step: F) -> Self
    where
        F: for<'w> Fn(&'w mut World, Args) -> LocalBoxFuture<'w, O> + 'static,
        O: IntoOutcome + 'static,
    {
        self.step_with(Role::WHEN, regex, Implementation::r#async(step))
    }

    /// Inserts an asynchronous `Then` step definition.
    #[must_use]
    pub fn then_async<F, O>(self, regex: Regex, step: F) -> Self
    where
        F: for<'w> Fn(&'w mut World, Args) -> LocalBoxFuture<'w, O> + 'static,
        O: IntoOutcome + 'static,
    {
        self.step_with(Role::THEN, regex, Implementation::r#async(step))
    }
}

impl<Wr: Writer, Src: Source> Suite<Wr, Src> {
    /// Applies the given [`cli::Opts`]: excluded tags are merged with the
    /// already excluded ones, everything else overrides.
    #[must_use]
    pub fn with_cli(mut self, opts: cli::Opts) -> Self {
        if let Some(level) = opts.log_level {
            if !logging::init(level) {
                tracing::debug!("global tracing subscriber is already set");
            }
        }

        self.parser = self.parser.exclude_tags(&opts.exclude_tags);
        self.config.random |= opts.random;
        self.config.seed = opts.seed.or(self.config.seed);
        self.config.timeout = opts.timeout.or(self.config.timeout);
        self.writer.apply_cli(&opts);
        self
    }

    /// Applies [`cli::Opts`] parsed from the process arguments.
    ///
    /// Unparseable arguments are logged and ignored.
    #[must_use]
    pub fn with_default_cli(self) -> Self {
        use cli::Parser as _;

        match cli::Opts::try_parse() {
            Ok(opts) => self.with_cli(opts),
            Err(e) => {
                tracing::warn!("ignoring command line arguments: {e}");
                self
            }
        }
    }

    /// Runs the documents at the given `paths`, returning the [`Writer`] once
    /// every document has completed.
    ///
    /// Directory paths are expanded by the [`Source`] first.
    pub async fn run<I, P>(self, paths: I) -> Wr
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let Self {
            steps,
            parser,
            config,
            mut writer,
            source,
        } = self;

        let mut documents = Vec::new();
        for path in paths {
            let path = path.as_ref();
            match source.expand(path) {
                Ok(found) => documents.extend(found),
                Err(e) => {
                    writer.handle_event(Event::error("", path, e)).await;
                    writer.handle_event(Event::complete(path)).await;
                }
            }
        }
        if config.random {
            documents = shuffle(documents, config.seed);
        }
        tracing::debug!(?documents, "running");

        let runner = runner::Basic::new(steps, parser.keywords().clone(), config);
        for document in &documents {
            let span = tracing::info_span!("document", path = %document);
            run_document(&source, &parser, &runner, document, &mut writer)
                .instrument(span)
                .await;
        }

        writer.handle_event(Event::Finished).await;
        writer
    }

    /// Runs the documents at the given `paths` in a randomized order.
    ///
    /// The order is computed once up front, by repeated uniform removal from
    /// the pending documents. See [`Suite::with_seed()`] for reproducing it.
    pub async fn run_in_random_order<I, P>(mut self, paths: I) -> Wr
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        self.config.random = true;
        self.run(paths).await
    }
}

impl<W, Src> Suite<Summarized<W>, Src>
where
    W: Writer + writer::Arbitrary,
    Src: Source,
{
    /// Runs the documents at the given `paths`, like [`Suite::run()`] does.
    ///
    /// # Panics
    ///
    /// If any scenario row failed, or any error was reported.
    pub async fn run_and_exit<I, P>(self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let writer = self.run(paths).await;
        if writer.execution_has_failed() {
            let failed = writer.scenarios.failed;
            let errors = writer.errors;
            panic!(
                "{failed} scenario{} failed, {errors} error{}",
                (failed != 1).then_some("s").unwrap_or_default(),
                (errors != 1).then_some("s").unwrap_or_default(),
            );
        }
    }
}

/// Fetches, parses and runs a single document.
///
/// # Events
///
/// Always ends with [`Event::Complete`], even if fetching failed.
async fn run_document<Src, Wr>(
    source: &Src,
    parser: &parser::Basic,
    runner: &runner::Basic,
    document: &str,
    writer: &mut Wr,
) where
    Src: Source + ?Sized,
    Wr: Writer + ?Sized,
{
    match source.fetch(document).await {
        Ok(text) => {
            let scenarios = parser.parse(&text);
            tracing::debug!(count = scenarios.len(), "parsed");
            for scenario in &scenarios {
                _ = runner.run(scenario, writer).await;
            }
        }
        Err(e) => {
            tracing::warn!("{e}");
            writer.handle_event(Event::error("", document, e)).await;
        }
    }
    writer.handle_event(Event::complete(document)).await;
}

/// Reorders the `pending` documents by repeated uniform removal.
fn shuffle(mut pending: Vec<String>, seed: Option<u64>) -> Vec<String> {
    let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let mut order = Vec::with_capacity(pending.len());
    while !pending.is_empty() {
        order.push(pending.remove(rng.gen_range(0..pending.len())));
    }
    order
}
