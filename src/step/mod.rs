// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Definitions for a [`Collection`] which is used to store [`Step`]
//! implementations and corresponding [`Regex`] patterns.
//!
//! - [`collection`]: registry and first-match-wins lookup
//! - [`error`]: matching and execution errors
//! - [`role`]: Given/When/Then [`Role`] bitmask
//! - [`value`]: typed parameters passed to implementations

pub mod collection;
pub mod error;
pub mod role;
pub mod value;

use std::{fmt, rc::Rc};

use futures::{future::LocalBoxFuture, FutureExt as _};
use regex::Regex;

use crate::{
    expression::{self, Slot},
    World,
};

#[doc(inline)]
pub use self::{
    collection::{Collection, Execution},
    error::{Failed, RoleMismatch, Unmatched},
    role::Role,
    value::{ArgError, Args, Value},
};

/// Result of a step implementation.
pub type Outcome = Result<(), anyhow::Error>;

/// Synchronous step implementation.
pub type SyncFn = Rc<dyn Fn(&mut World, Args) -> Outcome>;

/// Asynchronous step implementation.
///
/// Resolving the returned [`Future`] is the step's completion signal.
///
/// [`Future`]: std::future::Future
pub type AsyncFn =
    Rc<dyn for<'w> Fn(&'w mut World, Args) -> LocalBoxFuture<'w, Outcome>>;

/// Value a step implementation may return.
pub trait IntoOutcome {
    /// Converts this value into an [`Outcome`].
    ///
    /// # Errors
    ///
    /// If this value represents a step failure.
    fn into_outcome(self) -> Outcome;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Outcome {
        Ok(())
    }
}

impl<E: Into<anyhow::Error>> IntoOutcome for Result<(), E> {
    fn into_outcome(self) -> Outcome {
        self.map_err(Into::into)
    }
}

/// Callable part of a [`Step`].
#[derive(Clone)]
pub enum Implementation {
    /// Runs to completion when called.
    Sync(SyncFn),

    /// Completes when the returned [`Future`] resolves.
    ///
    /// [`Future`]: std::future::Future
    Async(AsyncFn),
}

impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync(func) => write!(f, "Sync({:p})", Rc::as_ptr(func)),
            Self::Async(func) => write!(f, "Async({:p})", Rc::as_ptr(func)),
        }
    }
}

impl Implementation {
    /// Wraps a synchronous `step` function.
    pub fn sync<F, O>(step: F) -> Self
    where
        F: Fn(&mut World, Args) -> O + 'static,
        O: IntoOutcome,
    {
        Self::Sync(Rc::new(move |world: &mut World, args: Args| {
            step(world, args).into_outcome()
        }))
    }

    /// Wraps an asynchronous `step` function.
    pub fn r#async<F, O>(step: F) -> Self
    where
        F: for<'w> Fn(&'w mut World, Args) -> LocalBoxFuture<'w, O> + 'static,
        O: IntoOutcome + 'static,
    {
        Self::Async(async_fn(move |world, args| {
            step(world, args).map(O::into_outcome).boxed_local()
        }))
    }
}

/// Pins down the higher-ranked signature of an [`AsyncFn`] closure.
fn async_fn<F>(f: F) -> AsyncFn
where
    F: for<'w> Fn(&'w mut World, Args) -> LocalBoxFuture<'w, Outcome> + 'static,
{
    Rc::new(f)
}

/// Step definition: a matching [`Regex`], the [`Role`] it is restricted to,
/// and its [`Implementation`].
#[derive(Clone, Debug)]
pub struct Step {
    pattern: Regex,
    role: Role,
    implementation: Implementation,

    /// [`Slot`] of every capturing group of the `pattern`.
    slots: Vec<Option<Slot>>,
}

impl Step {
    /// Creates a new [`Step`] definition.
    #[must_use]
    pub fn new(pattern: Regex, role: Role, implementation: Implementation) -> Self {
        let slots = expression::slots(&pattern);
        Self {
            pattern,
            role,
            implementation,
            slots,
        }
    }

    /// Returns the matching [`Regex`] of this [`Step`].
    #[must_use]
    pub const fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Returns the [`Role`] this [`Step`] is restricted to.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the [`Implementation`] of this [`Step`].
    #[must_use]
    pub const fn implementation(&self) -> &Implementation {
        &self.implementation
    }

    /// Checks whether this [`Step`] completes asynchronously.
    #[must_use]
    pub const fn is_async(&self) -> bool {
        matches!(self.implementation, Implementation::Async(_))
    }

    /// Returns the [`Slot`] of every capturing group, starting from group `1`.
    #[must_use]
    pub fn slots(&self) -> &[Option<Slot>] {
        &self.slots
    }
}
