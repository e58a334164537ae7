// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Key occurrences in the lifecycle of a run, passed to a [`Writer`].
//!
//! [`Writer`]: crate::Writer

use crate::Error;

/// Run event.
#[derive(Clone, Debug)]
pub enum Event {
    /// One scenario row finished.
    Summary {
        /// Title of the owning feature.
        feature: String,

        /// Title of the scenario.
        scenario: String,

        /// Whether every line of the row succeeded.
        passed: bool,
    },

    /// A single line (or a whole document) failed.
    Error {
        /// Title of the owning feature, empty if it's unknown.
        feature: String,

        /// Offending condition, grammar line or document path.
        condition: String,

        /// The failure itself.
        error: Error,
    },

    /// Informational note, neither a pass nor a failure.
    Information(String),

    /// A document was processed completely.
    Complete {
        /// Path of the document.
        document: String,
    },

    /// Every supplied document was processed.
    Finished,
}

impl Event {
    /// Constructs an [`Event::Summary`].
    #[must_use]
    pub fn summary(
        feature: impl Into<String>,
        scenario: impl Into<String>,
        passed: bool,
    ) -> Self {
        Self::Summary {
            feature: feature.into(),
            scenario: scenario.into(),
            passed,
        }
    }

    /// Constructs an [`Event::Error`].
    #[must_use]
    pub fn error(
        feature: impl Into<String>,
        condition: impl Into<String>,
        error: impl Into<Error>,
    ) -> Self {
        Self::Error {
            feature: feature.into(),
            condition: condition.into(),
            error: error.into(),
        }
    }

    /// Constructs an [`Event::Information`].
    #[must_use]
    pub fn information(message: impl Into<String>) -> Self {
        Self::Information(message.into())
    }

    /// Constructs an [`Event::Complete`].
    #[must_use]
    pub fn complete(document: impl Into<String>) -> Self {
        Self::Complete {
            document: document.into(),
        }
    }

    /// Checks whether this [`Event`] signals a failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::Error { .. } | Self::Summary { passed: false, .. },
        )
    }
}
