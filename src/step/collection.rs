// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Step registry and matching.

use regex::Regex;

use crate::expression;

use super::{Args, Implementation, Role, RoleMismatch, Step};

/// Registry of [`Step`] definitions.
///
/// Lookup is first-match-wins in registration order, not best-match: two
/// overlapping patterns shadow each other depending on which one was added
/// first.
#[derive(Clone, Debug, Default)]
pub struct Collection {
    steps: Vec<Step>,
}

impl Collection {
    /// Creates a new empty [`Collection`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a [`Step`] definition.
    #[must_use]
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Adds a [`Step`] matching the given `regex` for the given `role`.
    #[must_use]
    pub fn with(
        self,
        role: Role,
        regex: Regex,
        implementation: Implementation,
    ) -> Self {
        self.step(Step::new(regex, role, implementation))
    }

    /// Returns the number of registered [`Step`]s.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Checks whether no [`Step`]s are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterates over registered [`Step`]s in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    /// Returns the first [`Step`] matching the given `line` whose [`Role`]
    /// accepts the `required` one, along with the extracted parameters.
    ///
    /// Returns [`None`] if no [`Step`] matches the `line` textually.
    ///
    /// # Errors
    ///
    /// If some [`Step`]s match the `line` textually, but none of them accepts
    /// the `required` [`Role`].
    pub fn find(
        &self,
        line: &str,
        required: Role,
    ) -> Result<Option<Execution<'_>>, RoleMismatch> {
        let mut candidates = Vec::new();

        for step in &self.steps {
            let Some(captures) = step.pattern.captures(line) else {
                continue;
            };
            if !step.role.accepts(required) {
                candidates.push((step.pattern.as_str().to_owned(), step.role));
                continue;
            }

            let parameters = captures
                .iter()
                .skip(1)
                .enumerate()
                .map(|(i, m)| {
                    let slot = step.slots.get(i).copied().flatten();
                    expression::coerce(m.map_or("", |m| m.as_str()), slot)
                })
                .collect();
            return Ok(Some(Execution { step, parameters }));
        }

        if candidates.is_empty() {
            Ok(None)
        } else {
            Err(RoleMismatch {
                condition: line.to_owned(),
                required,
                candidates,
            })
        }
    }
}

/// Matched [`Step`] along with its extracted parameters, living for a single
/// step invocation.
#[derive(Clone, Debug)]
pub struct Execution<'s> {
    step: &'s Step,
    parameters: Args,
}

impl<'s> Execution<'s> {
    /// Returns the matched [`Step`].
    #[must_use]
    pub const fn step(&self) -> &'s Step {
        self.step
    }

    /// Returns the [`Implementation`] to invoke.
    #[must_use]
    pub const fn implementation(&self) -> &'s Implementation {
        &self.step.implementation
    }

    /// Checks whether the matched [`Step`] completes asynchronously.
    #[must_use]
    pub const fn is_async(&self) -> bool {
        self.step.is_async()
    }

    /// Returns the extracted, ordered, typed parameters.
    #[must_use]
    pub const fn parameters(&self) -> &Args {
        &self.parameters
    }

    /// Splits this [`Execution`] into its [`Implementation`] and parameters.
    #[must_use]
    pub fn into_parts(self) -> (&'s Implementation, Args) {
        (&self.step.implementation, self.parameters)
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use super::Collection;
    use crate::{
        expression::{BOOLEAN, NUMBER, STRING},
        step::{Implementation, Role, Value},
    };

    fn re(s: &str) -> Regex {
        Regex::new(s).unwrap()
    }

    fn noop() -> Implementation {
        Implementation::sync(|_, _| ())
    }

    #[test]
    fn extracts_numeric_parameters() {
        let steps = Collection::new().with(
            Role::WHEN,
            re(&format!("^I enter {NUMBER} into the calculator$")),
            noop(),
        );

        let exec = steps
            .find(r#"I enter "42" into the calculator"#, Role::WHEN)
            .unwrap()
            .unwrap();

        assert_eq!(exec.parameters().as_slice(), [Value::Number(42.0)]);
        assert!(!exec.is_async());
    }

    #[test]
    fn coerces_each_slot_positionally() {
        let steps = Collection::new().with(
            Role::ANY,
            re(&format!("^{STRING} is {BOOLEAN} and (\\w+) {NUMBER}$")),
            noop(),
        );

        let exec = steps
            .find(r#""say \"hi\"" is "TRUE" and raw "-1.5""#, Role::THEN)
            .unwrap()
            .unwrap();

        assert_eq!(
            exec.parameters().as_slice(),
            [
                Value::from(r#"say "hi""#),
                Value::Bool(true),
                Value::from("raw"),
                Value::Number(-1.5),
            ],
        );
    }

    #[test]
    fn unquotes_generic_groups() {
        let steps = Collection::new().with(Role::ANY, re("^name is (.+)$"), noop());

        let exec = steps.find(r#"name is "Bob""#, Role::GIVEN).unwrap().unwrap();

        assert_eq!(exec.parameters().as_slice(), [Value::from("Bob")]);
    }

    #[test]
    fn first_match_wins() {
        let steps = Collection::new()
            .with(Role::ANY, re("a (.+)"), noop())
            .with(Role::ANY, re("^a thing$"), noop());

        let exec = steps.find("a thing", Role::GIVEN).unwrap().unwrap();

        assert_eq!(exec.step().pattern().as_str(), "a (.+)");
    }

    #[test]
    fn skips_textual_matches_with_wrong_role() {
        let steps = Collection::new()
            .with(Role::GIVEN, re("^a thing$"), noop())
            .with(Role::THEN, re("^a thing$"), noop())
            .with(Role::ANY, re("^a (thing)$"), noop());

        let exec = steps.find("a thing", Role::THEN).unwrap().unwrap();

        assert_eq!(exec.step().role(), Role::THEN);
    }

    #[test]
    fn reports_role_mismatch_distinctly() {
        let steps = Collection::new()
            .with(Role::GIVEN, re("^a thing$"), noop())
            .with(Role::THEN, re("^a thing$"), noop());

        let err = steps.find("a thing", Role::WHEN).unwrap_err();

        assert_eq!(err.required, Role::WHEN);
        assert_eq!(
            err.candidates,
            [
                ("^a thing$".to_owned(), Role::GIVEN),
                ("^a thing$".to_owned(), Role::THEN),
            ],
        );
    }

    #[test]
    fn not_found_is_neutral() {
        let steps = Collection::new().with(Role::ANY, re("^a thing$"), noop());

        assert!(steps.find("another thing", Role::GIVEN).unwrap().is_none());
        assert!(Collection::new().is_empty());
        assert_eq!(steps.len(), 1);
    }
}
