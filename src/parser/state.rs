// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Grammatical positions of the [`Basic`] parser.
//!
//! [`Basic`]: super::Basic

use std::fmt;

use crate::{scenario::Scenario, Keyword, Keywords};

/// Grammatical position the parser is at.
///
/// Every [`State`] handles only the [`Keyword`]s legal at its position, see
/// [`State::transition()`]. Anything else is a grammar error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
    /// Nothing parsed yet, expecting `Feature:`.
    Initialized,

    /// Inside a feature header, before its scenario.
    Feature,

    /// Inside a scenario excluded by one of its tags.
    ExcludedScenario {
        /// Whether the excluded scenario's own header was already swallowed.
        seen_scenario: bool,
    },

    /// Right after a scenario header, expecting `Given `.
    Scenario,

    /// Among `Given ` lines.
    Given,

    /// Among `When ` lines.
    When,

    /// Among `Then ` lines.
    Then,

    /// Right after `Examples:`, expecting the table header.
    Example,

    /// Among table rows.
    Table,
}

impl Default for State {
    fn default() -> Self {
        Self::Initialized
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Line the current [`State`] has no handler for.
///
/// The [`Scenario`] record is left as it was before the line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Unexpected;

impl State {
    /// Returns the name of this [`State`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Initialized => "Initialized",
            Self::Feature => "Feature",
            Self::ExcludedScenario { .. } => "ExcludedScenario",
            Self::Scenario => "Scenario",
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::Example => "Example",
            Self::Table => "Table",
        }
    }

    /// Checks whether the line of the given `keyword` starts an additional
    /// scenario of the same document.
    ///
    /// Only a finished scenario (or a swallowed excluded one) may be followed
    /// by another one.
    #[must_use]
    pub fn is_new_scenario(self, keyword: Option<Keyword>) -> bool {
        let starts_scenario = matches!(
            keyword,
            Some(Keyword::Scenario | Keyword::ScenarioOutline | Keyword::Tag),
        );
        match self {
            Self::Then
            | Self::Table
            | Self::ExcludedScenario {
                seen_scenario: true,
            } => starts_scenario,
            _ => false,
        }
    }

    /// Applies the `line` of the given `keyword` to the `record`, returning
    /// the next [`State`].
    ///
    /// # Errors
    ///
    /// If this [`State`] has no handler for the `keyword`.
    pub fn transition(
        self,
        line: &str,
        keyword: Option<Keyword>,
        record: &mut Scenario,
        keywords: &Keywords,
    ) -> Result<Self, Unexpected> {
        use Keyword as K;

        let text = |kind| keywords.strip(line, kind).to_owned();

        Ok(match (self, keyword) {
            (Self::Initialized, Some(K::Feature)) => {
                record.feature_title = text(K::Feature);
                Self::Feature
            }

            (Self::Feature, None) => {
                record.feature_description.push(line.trim().to_owned());
                Self::Feature
            }
            (Self::Feature, Some(K::Tag)) => {
                let excluded = line
                    .split_whitespace()
                    .map(|tag| record.add_tag(tag))
                    .fold(false, |acc, ex| acc || ex);
                if excluded {
                    Self::ExcludedScenario {
                        seen_scenario: false,
                    }
                } else {
                    Self::Feature
                }
            }
            (Self::Feature, Some(kind @ (K::Scenario | K::ScenarioOutline))) => {
                record.scenario_title = Some(text(kind));
                record.outline = kind == K::ScenarioOutline;
                Self::Scenario
            }

            (Self::ExcludedScenario { seen_scenario }, kind) => {
                let header = matches!(
                    kind,
                    Some(K::Scenario | K::ScenarioOutline),
                );
                if header && !seen_scenario {
                    if let Some(kind) = kind {
                        record.scenario_title = Some(text(kind));
                        record.outline = kind == K::ScenarioOutline;
                    }
                }
                Self::ExcludedScenario {
                    seen_scenario: seen_scenario || header,
                }
            }

            (Self::Scenario, Some(K::Given)) => {
                record.givens.push(text(K::Given));
                Self::Given
            }

            (Self::Given, Some(K::And)) => {
                record.givens.push(text(K::And));
                Self::Given
            }
            (Self::Given, Some(K::When)) => {
                record.whens.push(text(K::When));
                Self::When
            }
            (Self::Given | Self::When, Some(K::Then)) => {
                record.thens.push(text(K::Then));
                Self::Then
            }

            (Self::When, Some(K::And)) => {
                record.whens.push(text(K::And));
                Self::When
            }

            (Self::Then, Some(K::And)) => {
                record.thens.push(text(K::And));
                Self::Then
            }
            (Self::Then, Some(K::Examples)) => Self::Example,

            (Self::Example, Some(K::Table)) => {
                record.table_headers = cells(line).map(str::to_owned).collect();
                Self::Table
            }

            (Self::Table, Some(K::Table)) => {
                let row = record
                    .table_headers
                    .iter()
                    .cloned()
                    .zip(cells(line).map(str::to_owned))
                    .collect();
                record.table_rows.push(row);
                Self::Table
            }

            _ => return Err(Unexpected),
        })
    }
}

/// Splits a `|`-delimited table line into trimmed cells.
fn cells(line: &str) -> impl Iterator<Item = &str> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);
    line.split('|').map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::{cells, State, Unexpected};
    use crate::{scenario::Scenario, Keywords};

    fn feed(state: State, line: &str, record: &mut Scenario) -> Result<State, Unexpected> {
        let kw = Keywords::new();
        state.transition(line, kw.classify(line), record, &kw)
    }

    #[test]
    fn walks_through_plain_scenario() {
        let mut sc = Scenario::default();
        let mut state = State::default();

        for line in [
            "Feature: Calculator",
            "  In order to avoid mistakes",
            "  Scenario: Add two numbers",
            "    Given I am using a calculator",
            "    And it is switched on",
            "    When I enter \"5\"",
            "    And I enter \"7\"",
            "    Then the result is \"12\"",
            "    And nothing else happens",
        ] {
            state = feed(state, line, &mut sc).unwrap();
        }

        assert_eq!(state, State::Then);
        assert_eq!(sc.feature_title, "Calculator");
        assert_eq!(sc.feature_description, ["In order to avoid mistakes"]);
        assert_eq!(sc.scenario_title.as_deref(), Some("Add two numbers"));
        assert_eq!(sc.givens, ["I am using a calculator", "it is switched on"]);
        assert_eq!(sc.whens, [r#"I enter "5""#, r#"I enter "7""#]);
        assert_eq!(sc.thens, [r#"the result is "12""#, "nothing else happens"]);
        assert!(!sc.outline);
    }

    #[test]
    fn collects_examples_table() {
        let mut sc = Scenario::default();
        let mut state = State::Feature;

        for line in [
            "Scenario Outline: Add",
            "Given a calculator",
            "When I add \"<a>\"",
            "Then I get \"<b>\"",
            "Examples:",
            "| a | b  |",
            "| 1 | 1  |",
            "|2|  2 |",
        ] {
            state = feed(state, line, &mut sc).unwrap();
        }

        assert_eq!(state, State::Table);
        assert!(sc.outline);
        assert_eq!(sc.table_headers, ["a", "b"]);
        assert_eq!(sc.table_rows.len(), 2);
        assert_eq!(sc.table_rows[1].get("a").map(String::as_str), Some("2"));
        assert_eq!(sc.table_rows[1].get("b").map(String::as_str), Some("2"));
    }

    #[test]
    fn excluding_tag_swallows_scenario() {
        let mut sc = Scenario::new(vec!["skip".into()]);

        let state = feed(State::Feature, "@slow @Skip", &mut sc).unwrap();
        assert_eq!(
            state,
            State::ExcludedScenario {
                seen_scenario: false,
            },
        );
        assert!(!state.is_new_scenario(Some(crate::Keyword::Tag)));

        let state = feed(state, "Scenario: Skipped", &mut sc).unwrap();
        let state = feed(state, "Then whatever", &mut sc).unwrap();
        let state = feed(state, "| x |", &mut sc).unwrap();

        assert_eq!(state, State::ExcludedScenario { seen_scenario: true });
        assert!(state.is_new_scenario(Some(crate::Keyword::Scenario)));
        assert_eq!(sc.scenario_title.as_deref(), Some("Skipped"));
        assert!(sc.thens.is_empty());
        assert!(sc.is_excluded());
    }

    #[test]
    fn rejects_then_right_after_scenario() {
        let mut sc = Scenario::default();

        let state = feed(State::Feature, "Scenario: Broken", &mut sc).unwrap();

        assert_eq!(feed(state, "Then too early", &mut sc), Err(Unexpected));
        assert!(sc.thens.is_empty());
    }

    #[test]
    fn rejects_unhandled_keywords() {
        let mut sc = Scenario::default();

        assert_eq!(feed(State::Initialized, "Scenario: x", &mut sc), Err(Unexpected));
        assert_eq!(feed(State::Given, "Given again", &mut sc), Err(Unexpected));
        assert_eq!(feed(State::When, "When again", &mut sc), Err(Unexpected));
        assert_eq!(feed(State::Then, "When late", &mut sc), Err(Unexpected));
        assert_eq!(feed(State::Example, "Given x", &mut sc), Err(Unexpected));
        assert_eq!(feed(State::Scenario, "free text", &mut sc), Err(Unexpected));
    }

    #[test]
    fn detects_next_scenario_only_when_finished() {
        use crate::Keyword as K;

        for kind in [K::Scenario, K::ScenarioOutline, K::Tag] {
            assert!(State::Then.is_new_scenario(Some(kind)));
            assert!(State::Table.is_new_scenario(Some(kind)));
            assert!(!State::Given.is_new_scenario(Some(kind)));
            assert!(!State::Feature.is_new_scenario(Some(kind)));
        }
        assert!(!State::Then.is_new_scenario(Some(K::And)));
        assert!(!State::Table.is_new_scenario(None));
    }

    #[test]
    fn splits_table_cells() {
        assert_eq!(cells("| a | b c |").collect::<Vec<_>>(), ["a", "b c"]);
        assert_eq!(cells("  |x|").collect::<Vec<_>>(), ["x"]);
        assert_eq!(cells("|a||").collect::<Vec<_>>(), ["a", ""]);
    }
}
