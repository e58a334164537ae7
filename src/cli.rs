// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI (command line interface) options of a [`Suite`].
//!
//! [`Suite`]: crate::Suite

use std::{str::FromStr, time::Duration};

pub use clap::Parser;

use crate::writer::Coloring;

/// Root CLI of a [`Suite`] run.
///
/// # Example
///
/// ```rust
/// # use std::time::Duration;
/// use stepwise::cli::{self, Format, Parser as _};
///
/// let opts = cli::Opts::try_parse_from([
///     "specs", "-x", "wip", "--exclude-tags", "slow", "--timeout", "250ms",
///     "--format", "tap",
/// ])
/// .unwrap();
///
/// assert_eq!(opts.exclude_tags, ["wip", "slow"]);
/// assert_eq!(opts.timeout, Some(Duration::from_millis(250)));
/// assert_eq!(opts.format, Format::Tap);
/// ```
///
/// [`Suite`]: crate::Suite
#[derive(Clone, Debug, Default, Parser)]
#[command(
    name = "stepwise",
    about = "Run Given/When/Then specification documents"
)]
pub struct Opts {
    /// Tags excluding a scenario from execution.
    #[arg(short = 'x', long = "exclude-tags", value_name = "tag")]
    pub exclude_tags: Vec<String>,

    /// Run documents in a randomized order.
    #[arg(long)]
    pub random: bool,

    /// Seed making the randomized order reproducible.
    #[arg(long, value_name = "int", requires = "random")]
    pub seed: Option<u64>,

    /// Time an asynchronous step is allowed to take, e.g. `5s` or `250ms`.
    #[arg(long, value_name = "duration", value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Output format.
    #[arg(long, value_name = "basic|tap", default_value = "basic")]
    pub format: Format,

    /// Coloring policy for a console output.
    #[arg(long, value_name = "auto|always|never", default_value = "auto")]
    pub color: Coloring,

    /// Level of diagnostic logs written into stderr.
    #[arg(long, value_name = "level")]
    pub log_level: Option<tracing::Level>,
}

/// Possible output formats.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Format {
    /// [`writer::Basic`] console output.
    ///
    /// [`writer::Basic`]: crate::writer::Basic
    #[default]
    Basic,

    /// [`writer::Tap`] output.
    ///
    /// [`writer::Tap`]: crate::writer::Tap
    Tap,
}

impl FromStr for Format {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "tap" => Ok(Self::Tap),
            _ => Err("possible options: basic, tap"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{Coloring, Format, Opts, Parser as _};

    #[test]
    fn parses_every_option() {
        let opts = Opts::try_parse_from([
            "stepwise",
            "-x",
            "skip",
            "-x",
            "wip",
            "--random",
            "--seed",
            "7",
            "--timeout",
            "2s",
            "--format",
            "TAP",
            "--color",
            "never",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(opts.exclude_tags, ["skip", "wip"]);
        assert!(opts.random);
        assert_eq!(opts.seed, Some(7));
        assert_eq!(opts.timeout, Some(Duration::from_secs(2)));
        assert_eq!(opts.format, Format::Tap);
        assert_eq!(opts.color, Coloring::Never);
        assert_eq!(opts.log_level, Some(tracing::Level::DEBUG));
    }

    #[test]
    fn defaults_match_parsed_defaults() {
        let opts = Opts::try_parse_from(["stepwise"]).unwrap();

        assert!(opts.exclude_tags.is_empty());
        assert!(!opts.random);
        assert_eq!(opts.format, Opts::default().format);
        assert_eq!(opts.color, Opts::default().color);
        assert_eq!(opts.timeout, None);
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Opts::try_parse_from(["stepwise", "--format", "json"]).is_err());
        assert!(Opts::try_parse_from(["stepwise", "--seed", "1"]).is_err());
    }
}
