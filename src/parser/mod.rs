// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for parsing specification documents into [`Scenario`]s.

pub mod state;

use derive_more::{Display, Error};

use crate::{scenario::Scenario, Keyword, Keywords};

#[doc(inline)]
pub use self::state::State;

/// Grammar error: a line appeared where the parser had no handler for it.
#[derive(Clone, Debug, Display, Error, Eq, PartialEq)]
#[display(
    fmt = "Unexpected line {} in {} state: `{}`",
    line_number,
    state,
    line
)]
pub struct Error {
    /// Offending line, verbatim.
    pub line: String,

    /// `1`-based number of the offending line.
    pub line_number: usize,

    /// Name of the [`State`] the parser was in.
    pub state: &'static str,
}

/// Default line-by-line parser of specification documents.
///
/// A document is parsed in full into an ordered [`Vec`] of [`Scenario`]
/// records sharing the feature header. Grammar errors never abort parsing:
/// they are recorded against the current [`Scenario`], and the parser moves
/// on to the next line.
#[derive(Clone, Debug, Default)]
pub struct Basic {
    /// Vocabulary to recognize lines with.
    keywords: Keywords,

    /// Lower-cased tags excluding a scenario from execution.
    tags_to_exclude: Vec<String>,
}

impl Basic {
    /// Creates a new [`Basic`] parser recognizing the given [`Keywords`].
    #[must_use]
    pub fn new(keywords: Keywords) -> Self {
        Self {
            keywords,
            tags_to_exclude: Vec::new(),
        }
    }

    /// Excludes scenarios carrying any of the given `tags` (with or without a
    /// leading `@`, in any case).
    #[must_use]
    pub fn exclude_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        for tag in tags {
            let tag = crate::scenario::normalize_tag(tag.as_ref());
            if !tag.is_empty() && !self.tags_to_exclude.contains(&tag) {
                self.tags_to_exclude.push(tag);
            }
        }
        self
    }

    /// Returns the [`Keywords`] this [`Basic`] parser recognizes.
    #[must_use]
    pub const fn keywords(&self) -> &Keywords {
        &self.keywords
    }

    /// Returns the tags excluding a scenario from execution.
    #[must_use]
    pub fn tags_to_exclude(&self) -> &[String] {
        &self.tags_to_exclude
    }

    /// Parses the given document `text` into [`Scenario`] records, in order.
    ///
    /// The last record is always included, even if it's only a feature
    /// header without any scenario.
    #[must_use]
    pub fn parse(&self, text: &str) -> Vec<Scenario> {
        let mut scenarios = Vec::new();
        let mut record = Scenario::new(self.tags_to_exclude.clone());
        let mut state = State::default();

        for (n, line) in text.lines().enumerate() {
            let keyword = self.keywords.classify(line);
            if line.trim().is_empty() || keyword == Some(Keyword::Comment) {
                continue;
            }

            if state.is_new_scenario(keyword)
                || restarts_after_error(state, keyword, &record)
            {
                let next = record.carried_over();
                scenarios.push(std::mem::replace(&mut record, next));
                state = State::Feature;
            }

            match state.transition(line, keyword, &mut record, &self.keywords) {
                Ok(next) => {
                    if next != state {
                        tracing::trace!(line = n + 1, from = %state, to = %next, "transition");
                    }
                    state = next;
                }
                Err(state::Unexpected) => {
                    let err = Error {
                        line: line.to_owned(),
                        line_number: n + 1,
                        state: state.name(),
                    };
                    tracing::warn!(
                        feature = %record.feature_title,
                        "{err}",
                    );
                    record.errors.push(err);
                }
            }
        }
        scenarios.push(record);

        scenarios
    }
}

/// Checks whether a scenario header or a tag line should start a new record,
/// because the current one is already broken and can't reach a state
/// detecting it.
///
/// Tags open the new record too, so they apply to the scenario following
/// the broken one.
fn restarts_after_error(
    state: State,
    keyword: Option<Keyword>,
    record: &Scenario,
) -> bool {
    record.has_errors()
        && matches!(
            keyword,
            Some(Keyword::Scenario | Keyword::ScenarioOutline | Keyword::Tag),
        )
        && !matches!(state, State::Initialized | State::Feature)
}
