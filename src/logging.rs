// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`tracing`] initialization.
//!
//! Logs are diagnostics of the runner itself (parser transitions, matched
//! steps, timings) and never replace [`Event`]s passed to a [`Writer`].
//!
//! [`Event`]: crate::Event
//! [`Writer`]: crate::Writer

use std::io;

use tracing::Level;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt as _,
    util::SubscriberInitExt as _, Layer as _,
};

/// Initializes a global [`tracing`] subscriber writing logs up to the given
/// `level` into [`io::Stderr`].
///
/// Returns `false` if a global subscriber was already set.
pub fn init(level: Level) -> bool {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(layer.with_filter(LevelFilter::from_level(level)))
        .try_init()
        .is_ok()
}
