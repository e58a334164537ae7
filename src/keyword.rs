// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Fixed keyword vocabulary of specification documents.
//!
//! [`Keywords`] is an immutable value: build it once and hand it to the
//! [`parser`] and the [`runner`] explicitly.
//!
//! [`parser`]: crate::parser
//! [`runner`]: crate::runner

use derive_more::Display;

/// Kind of a line, as recognized by its leading keyword.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Keyword {
    /// `Feature:` header.
    #[display(fmt = "Feature")]
    Feature,

    /// `Scenario Outline:` header.
    #[display(fmt = "Scenario Outline")]
    ScenarioOutline,

    /// `Scenario:` header.
    #[display(fmt = "Scenario")]
    Scenario,

    /// `Examples:` header of an outline's data table.
    #[display(fmt = "Examples")]
    Examples,

    /// `@tag` line.
    #[display(fmt = "Tag")]
    Tag,

    /// `|`-delimited table line.
    #[display(fmt = "Table")]
    Table,

    /// `Given ` step.
    #[display(fmt = "Given")]
    Given,

    /// `When ` step.
    #[display(fmt = "When")]
    When,

    /// `Then ` step.
    #[display(fmt = "Then")]
    Then,

    /// `And ` step, extending the preceding step kind.
    #[display(fmt = "And")]
    And,

    /// `#` comment.
    #[display(fmt = "Comment")]
    Comment,
}

/// Recognizer of the fixed [`Keyword`] vocabulary.
///
/// Membership is decided by exact, case-sensitive prefix match, including the
/// trailing separator where the keyword declares one (`"Given "`,
/// `"Scenario:"`). `Scenario Outline:` is checked before `Scenario:`.
#[derive(Clone, Debug)]
pub struct Keywords {
    /// Prefixes in matching order.
    prefixes: Vec<(Keyword, &'static str)>,

    /// Opening and closing delimiters of a `<token>` placeholder.
    token: (&'static str, &'static str),
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            prefixes: vec![
                (Keyword::Feature, "Feature:"),
                (Keyword::ScenarioOutline, "Scenario Outline:"),
                (Keyword::Scenario, "Scenario:"),
                (Keyword::Examples, "Examples:"),
                (Keyword::Tag, "@"),
                (Keyword::Table, "|"),
                (Keyword::Given, "Given "),
                (Keyword::When, "When "),
                (Keyword::Then, "Then "),
                (Keyword::And, "And "),
                (Keyword::Comment, "#"),
            ],
            token: ("<", ">"),
        }
    }
}

impl Keywords {
    /// Creates the English [`Keywords`] table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the declared prefix of the given [`Keyword`].
    #[must_use]
    pub fn text(&self, kind: Keyword) -> &'static str {
        self.prefixes
            .iter()
            .find_map(|(k, text)| (*k == kind).then_some(*text))
            .unwrap_or_default()
    }

    /// Classifies the given `line` by its leading keyword.
    ///
    /// Leading whitespace is ignored. Returns [`None`] for free text.
    #[must_use]
    pub fn classify(&self, line: &str) -> Option<Keyword> {
        let line = line.trim_start();
        self.prefixes
            .iter()
            .find_map(|(kind, text)| line.starts_with(text).then_some(*kind))
    }

    /// Checks whether the given `line` starts with the `kind` keyword.
    #[must_use]
    pub fn is(&self, line: &str, kind: Keyword) -> bool {
        line.trim_start().starts_with(self.text(kind))
    }

    /// Removes the `kind` keyword prefix from the given `line` and trims the
    /// rest.
    ///
    /// The `line` is returned trimmed, but otherwise intact, if it doesn't
    /// start with the `kind` keyword.
    #[must_use]
    pub fn strip<'l>(&self, line: &'l str, kind: Keyword) -> &'l str {
        let line = line.trim();
        line.strip_prefix(self.text(kind)).unwrap_or(line).trim()
    }

    /// Returns opening and closing delimiters of a `<token>` placeholder.
    #[must_use]
    pub const fn token_delimiters(&self) -> (&'static str, &'static str) {
        self.token
    }
}
