// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Scenario`] record accumulated while parsing, and `<token>` substitution.

use std::borrow::Cow;

use linked_hash_map::LinkedHashMap;

use crate::{parser, step::Role, Keywords};

/// Row of an `Examples:` table, mapping header names to cell values in header
/// order.
pub type Row = LinkedHashMap<String, String>;

/// Parse record of a single scenario.
///
/// Created empty by the [`parser`], mutated line by line, and frozen once
/// parsing of its document completes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scenario {
    /// Title of the owning feature.
    pub feature_title: String,

    /// Free-text lines following the feature title.
    pub feature_description: Vec<String>,

    /// Title of this scenario.
    ///
    /// [`None`] means no concrete scenario was produced, e.g. a feature
    /// header with no scenario yet.
    pub scenario_title: Option<String>,

    /// Whether this scenario was declared with `Scenario Outline:`.
    pub outline: bool,

    /// Lower-cased tags without the leading `@`, in order of appearance.
    pub tags: Vec<String>,

    /// Externally supplied tags excluding a scenario from execution.
    pub tags_to_exclude: Vec<String>,

    /// `Given` lines (and their `And` extensions), keyword-stripped.
    pub givens: Vec<String>,

    /// `When` lines (and their `And` extensions), keyword-stripped.
    pub whens: Vec<String>,

    /// `Then` lines (and their `And` extensions), keyword-stripped.
    pub thens: Vec<String>,

    /// Header names of the `Examples:` table.
    pub table_headers: Vec<String>,

    /// Rows of the `Examples:` table.
    pub table_rows: Vec<Row>,

    /// Grammar errors encountered while parsing this scenario.
    pub errors: Vec<parser::Error>,
}

impl Scenario {
    /// Creates an empty [`Scenario`] record excluded by the given tags.
    #[must_use]
    pub fn new(tags_to_exclude: Vec<String>) -> Self {
        Self {
            tags_to_exclude,
            ..Self::default()
        }
    }

    /// Creates the next record of the same document, carrying forward the
    /// feature title, description and excluded tags.
    #[must_use]
    pub fn carried_over(&self) -> Self {
        Self {
            feature_title: self.feature_title.clone(),
            feature_description: self.feature_description.clone(),
            tags_to_exclude: self.tags_to_exclude.clone(),
            ..Self::default()
        }
    }

    /// Adds a tag, lower-casing it and stripping the leading `@`.
    ///
    /// Returns whether the tag excludes this [`Scenario`].
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = normalize_tag(tag);
        let excluded = self.tags_to_exclude.contains(&tag);
        if !tag.is_empty() && !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        excluded
    }

    /// Returns the first tag of this [`Scenario`] that excludes it, if any.
    #[must_use]
    pub fn excluded_by(&self) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| self.tags_to_exclude.contains(t))
            .map(String::as_str)
    }

    /// Checks whether this [`Scenario`] carries an excluded tag.
    #[must_use]
    pub fn is_excluded(&self) -> bool {
        self.excluded_by().is_some()
    }

    /// Checks whether any grammar error was encountered while parsing.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the number of times this [`Scenario`] runs: once per table
    /// row, or once for a scenario without rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.table_rows.len().max(1)
    }

    /// Returns the rows this [`Scenario`] runs with.
    ///
    /// A scenario without rows yields a single implicit empty [`Row`].
    pub fn rows(&self) -> impl Iterator<Item = Cow<'_, Row>> + '_ {
        let implicit = self
            .table_rows
            .is_empty()
            .then(|| Cow::Owned(Row::new()));
        implicit
            .into_iter()
            .chain(self.table_rows.iter().map(Cow::Borrowed))
    }

    /// Iterates over step lines in execution order, along with the [`Role`]
    /// each of them requires.
    pub fn steps(&self) -> impl Iterator<Item = (Role, &str)> + '_ {
        with_role(Role::GIVEN, &self.givens)
            .chain(with_role(Role::WHEN, &self.whens))
            .chain(with_role(Role::THEN, &self.thens))
    }
}

/// Pairs every line with the given [`Role`].
fn with_role(role: Role, lines: &[String]) -> impl Iterator<Item = (Role, &str)> {
    lines.iter().map(move |l| (role, l.as_str()))
}

/// Lower-cases the given `tag` and strips its leading `@`.
#[must_use]
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().trim_start_matches('@').to_lowercase()
}

/// Substitutes every `<token>` placeholder of the given `line`, whose name is
/// a column of the `row`, with that column's value.
///
/// Unknown placeholders are left intact.
#[must_use]
pub fn substitute<'l>(line: &'l str, row: &Row, keywords: &Keywords) -> Cow<'l, str> {
    let (open, close) = keywords.token_delimiters();
    if row.is_empty() || !line.contains(open) {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(start) = rest.find(open) {
        let (before, tail) = rest.split_at(start);
        out.push_str(before);

        let after_open = tail.get(open.len()..).unwrap_or_default();
        let value = after_open
            .find(close)
            .and_then(|end| Some((after_open.get(..end)?, end)))
            .and_then(|(name, end)| Some((row.get(name)?, end)));

        if let Some((value, end)) = value {
            out.push_str(value);
            rest = after_open
                .get(end + close.len()..)
                .unwrap_or_default();
        } else {
            out.push_str(open);
            rest = after_open;
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}
