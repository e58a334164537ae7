// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for outputting [`Event`]s.

pub mod basic;
pub mod console;
pub mod out;
pub mod summarized;
pub mod tap;

use async_trait::async_trait;
use sealed::sealed;

use crate::{cli, Event};

#[doc(inline)]
pub use self::{
    basic::Basic,
    console::Console,
    out::Coloring,
    summarized::{Stats, Summarized},
    tap::Tap,
};

/// Writer of [`Event`]s to some output.
#[async_trait(?Send)]
pub trait Writer {
    /// Handles the given [`Event`].
    async fn handle_event(&mut self, ev: Event);

    /// Applies the given [`cli::Opts`] to this [`Writer`].
    ///
    /// Does nothing by default.
    fn apply_cli(&mut self, opts: &cli::Opts) {
        _ = opts;
    }
}

/// [`Writer`] that also can output an arbitrary text additionally to the
/// [`Event`]s.
#[async_trait(?Send)]
pub trait Arbitrary: Writer {
    /// Writes `val` to some output.
    async fn write(&mut self, val: String);
}

/// Extension of [`Writer`] allowing its summarization.
#[sealed]
pub trait Ext: Writer + Sized {
    /// Wraps this [`Writer`] to print a summary at the end of an output.
    ///
    /// See [`Summarized`] for more information.
    #[must_use]
    fn summarized(self) -> Summarized<Self>;
}

#[sealed]
impl<T: Writer + Sized> Ext for T {
    fn summarized(self) -> Summarized<Self> {
        Summarized::new(self)
    }
}
