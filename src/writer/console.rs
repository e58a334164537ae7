// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Writer`] switching its format via CLI options.

use async_trait::async_trait;

use crate::{
    cli::{self, Format},
    writer::{Arbitrary, Basic, Tap},
    Event, Writer,
};

/// [`io::Stdout`] [`Writer`] of a [`Format`] chosen by [`cli::Opts`].
///
/// [`io::Stdout`]: std::io::Stdout
#[derive(Debug)]
pub enum Console {
    /// [`Format::Basic`] output.
    Basic(Basic),

    /// [`Format::Tap`] output.
    Tap(Tap),
}

impl Default for Console {
    fn default() -> Self {
        Self::Basic(Basic::stdout())
    }
}

impl Console {
    /// Returns the [`Format`] of this [`Console`].
    #[must_use]
    pub const fn format(&self) -> Format {
        match self {
            Self::Basic(_) => Format::Basic,
            Self::Tap(_) => Format::Tap,
        }
    }
}

#[async_trait(?Send)]
impl Writer for Console {
    async fn handle_event(&mut self, ev: Event) {
        match self {
            Self::Basic(w) => w.handle_event(ev).await,
            Self::Tap(w) => w.handle_event(ev).await,
        }
    }

    fn apply_cli(&mut self, opts: &cli::Opts) {
        if opts.format != self.format() {
            *self = match opts.format {
                Format::Basic => Self::Basic(Basic::stdout()),
                Format::Tap => Self::Tap(Tap::stdout()),
            };
        }
        match self {
            Self::Basic(w) => w.apply_cli(opts),
            Self::Tap(w) => w.apply_cli(opts),
        }
    }
}

#[async_trait(?Send)]
impl Arbitrary for Console {
    async fn write(&mut self, val: String) {
        match self {
            Self::Basic(w) => w.write(val).await,
            Self::Tap(w) => w.write(val).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Console;
    use crate::{
        cli::{Format, Opts},
        Writer as _,
    };

    #[test]
    fn switches_format_by_cli() {
        let mut w = Console::default();
        assert_eq!(w.format(), Format::Basic);

        w.apply_cli(&Opts {
            format: Format::Tap,
            ..Opts::default()
        });
        assert_eq!(w.format(), Format::Tap);

        w.apply_cli(&Opts::default());
        assert_eq!(w.format(), Format::Basic);
    }
}
