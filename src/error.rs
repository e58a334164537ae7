// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Consolidated error type of a run.

use derive_more::{Display, Error, From};

use crate::{future::Elapsed, parser, source, step};

/// Failure reported to a [`Writer`] via an [`Event::Error`].
///
/// None of these abort a run: each one degrades only its own line, scenario
/// row or document to "failed".
///
/// [`Event::Error`]: crate::Event::Error
/// [`Writer`]: crate::Writer
#[derive(Clone, Debug, Display, Error, From)]
pub enum Error {
    /// A line appeared where the parser had no handler for it.
    #[display(fmt = "Grammar error: {}", _0)]
    Grammar(parser::Error),

    /// No step definition matches a condition's text.
    #[display(fmt = "{}", _0)]
    Unmatched(step::Unmatched),

    /// A condition's text matches step definitions of other roles only.
    #[display(fmt = "{}", _0)]
    RoleMismatch(step::RoleMismatch),

    /// A matched step implementation failed.
    #[display(fmt = "{}", _0)]
    Step(step::Failed),

    /// An asynchronous step didn't complete in time.
    #[display(fmt = "{}", _0)]
    Timeout(Elapsed),

    /// A document couldn't be retrieved.
    #[display(fmt = "Failed to fetch document: {}", _0)]
    Fetch(source::Error),
}

impl Error {
    /// Checks whether this [`Error`] was caused by a step line (as opposed to
    /// a grammar or a document one).
    #[must_use]
    pub const fn is_step_error(&self) -> bool {
        matches!(
            self,
            Self::Unmatched(_)
                | Self::RoleMismatch(_)
                | Self::Step(_)
                | Self::Timeout(_),
        )
    }
}
