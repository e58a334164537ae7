// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of step matching and execution.

use std::{any::Any, fmt, sync::Arc};

use derive_more::{Display, Error};

use crate::expression;

use super::Role;

/// No [`Step`] matches a condition's text at all.
///
/// [`Step`]: super::Step
#[derive(Clone, Debug, Display, Error, PartialEq)]
#[display(
    fmt = "No step definition found for `{}`. Implement it with:\n\n{}",
    condition,
    snippet
)]
pub struct Unmatched {
    /// Condition text, with placeholders already substituted.
    pub condition: String,

    /// [`Role`] the condition required.
    pub role: Role,

    /// Ready-to-paste registration stub for the condition.
    pub snippet: String,
}

impl Unmatched {
    /// Creates a new [`Unmatched`] error, generating its stub.
    #[must_use]
    pub fn new(condition: impl Into<String>, role: Role) -> Self {
        let condition = condition.into();
        let snippet = expression::snippet(&condition, role);
        Self {
            condition,
            role,
            snippet,
        }
    }
}

/// A condition's text matches some [`Step`]s, but none of them accepts the
/// required [`Role`].
///
/// [`Step`]: super::Step
#[derive(Clone, Debug, Error, PartialEq)]
pub struct RoleMismatch {
    /// Condition text, with placeholders already substituted.
    pub condition: String,

    /// [`Role`] the condition required.
    pub required: Role,

    /// Patterns matching the text, along with their [`Role`]s.
    pub candidates: Vec<(String, Role)>,
}

impl fmt::Display for RoleMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` matches step definitions, but none of them accepts the \
             {} role. Possible matches:",
            self.condition, self.required,
        )?;
        for (pattern, role) in &self.candidates {
            write!(f, "\n{pattern} ({role})")?;
        }
        Ok(())
    }
}

/// Failure of a matched step implementation.
#[derive(Clone, Debug, Display, Error)]
pub enum Failed {
    /// Implementation returned an error.
    #[display(fmt = "{:#}", _0)]
    Error(#[error(not(source))] Arc<anyhow::Error>),

    /// Implementation panicked.
    #[display(fmt = "Step panicked: {}", _0)]
    Panic(#[error(not(source))] String),
}

impl From<anyhow::Error> for Failed {
    fn from(err: anyhow::Error) -> Self {
        Self::Error(Arc::new(err))
    }
}

impl Failed {
    /// Creates a [`Failed::Panic`] out of a [`catch_unwind()`] payload.
    ///
    /// [`catch_unwind()`]: std::panic::catch_unwind()
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send + 'static)) -> Self {
        Self::Panic(coerce_panic(payload))
    }
}

/// Coerces a [`catch_unwind()`] payload into a [`String`].
///
/// [`catch_unwind()`]: std::panic::catch_unwind()
fn coerce_panic(payload: &(dyn Any + Send + 'static)) -> String {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else {
        "(Could not resolve panic payload)".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use std::panic;

    use super::{Failed, RoleMismatch, Unmatched};
    use crate::step::Role;

    #[test]
    fn unmatched_carries_snippet() {
        let err = Unmatched::new(r#"I enter "5" into the calculator"#, Role::WHEN);

        assert!(err.snippet.starts_with(".when("), "{}", err.snippet);
        assert!(err.to_string().contains("Implement it with:"));
        assert!(err.to_string().contains(&err.snippet));
    }

    #[test]
    fn role_mismatch_lists_candidates() {
        let err = RoleMismatch {
            condition: "a thing".into(),
            required: Role::WHEN,
            candidates: vec![
                ("^a thing$".into(), Role::GIVEN),
                ("thing".into(), Role::THEN),
            ],
        };
        let msg = err.to_string();

        assert!(msg.contains("accepts the When role"), "{msg}");
        assert!(msg.contains("\n^a thing$ (Given)"), "{msg}");
        assert!(msg.contains("\nthing (Then)"), "{msg}");
    }

    #[test]
    fn coerces_panic_payloads() {
        let payload = panic::catch_unwind(|| panic!("boom {}", 1)).unwrap_err();
        assert_eq!(
            Failed::from_panic(payload.as_ref()).to_string(),
            "Step panicked: boom 1",
        );

        let payload = panic::catch_unwind(|| panic!("static")).unwrap_err();
        assert_eq!(
            Failed::from_panic(payload.as_ref()).to_string(),
            "Step panicked: static",
        );

        let payload =
            panic::catch_unwind(|| panic::panic_any(42_u8)).unwrap_err();
        assert_eq!(
            Failed::from_panic(payload.as_ref()).to_string(),
            "Step panicked: (Could not resolve panic payload)",
        );
    }

    #[test]
    fn displays_error_chain() {
        let err = anyhow::anyhow!("inner").context("outer");
        assert_eq!(Failed::from(err).to_string(), "outer: inner");
    }
}
