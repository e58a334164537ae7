// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for executing parsed [`Scenario`]s.
//!
//! # Order guarantees
//!
//! Nothing runs concurrently: scenario rows run one after another, and
//! within a row every `Given`, `When` and `Then` line runs strictly in
//! source order. An asynchronous step is awaited to completion before the
//! next line starts.
//!
//! [`Scenario`]: crate::Scenario

pub mod basic;

use std::time::Duration;

use smart_default::SmartDefault;

#[doc(inline)]
pub use self::basic::{Basic, RowOutcome};

/// Configuration of a run.
#[derive(Clone, Copy, Debug, Eq, PartialEq, SmartDefault)]
pub struct Config {
    /// Time an asynchronous step is allowed to take before it's considered
    /// failed.
    #[default(None)]
    pub timeout: Option<Duration>,

    /// Whether documents run in a randomized order.
    #[default(false)]
    pub random: bool,

    /// Seed of the randomized order.
    ///
    /// [`None`] seeds it from the OS.
    #[default(None)]
    pub seed: Option<u64>,
}
