// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for writing output.

use std::{borrow::Cow, io, str, str::FromStr};

use console::Style;
use derive_more::{Deref, DerefMut, Display, From, Into};

/// Possible policies of a [`console`] output coloring.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Coloring {
    /// Letting [`console::colors_enabled()`] to decide, whether output should
    /// be colored.
    #[default]
    Auto,

    /// Forcing of a colored output.
    Always,

    /// Forcing of a non-colored output.
    Never,
}

impl FromStr for Coloring {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            _ => Err("possible options: auto, always, never"),
        }
    }
}

/// [`Style`]s for terminal output.
#[derive(Clone, Debug)]
pub struct Styles {
    /// [`Style`] for rendering passed scenarios.
    pub ok: Style,

    /// [`Style`] for rendering informational notes.
    pub info: Style,

    /// [`Style`] for rendering errors and failed scenarios.
    pub err: Style,

    /// [`Style`] for rendering feature headers.
    pub header: Style,

    /// [`Style`] for rendering __bold__.
    pub bold: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            ok: Style::new().green(),
            info: Style::new().cyan(),
            err: Style::new().red(),
            header: Style::new().blue(),
            bold: Style::new().bold(),
        }
    }
}

impl Styles {
    /// Creates new [`Styles`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the given [`Coloring`] to these [`Styles`].
    pub fn apply_coloring(&mut self, color: Coloring) {
        let force = match color {
            Coloring::Auto => return,
            Coloring::Always => true,
            Coloring::Never => false,
        };
        for style in [
            &mut self.ok,
            &mut self.info,
            &mut self.err,
            &mut self.header,
            &mut self.bold,
        ] {
            *style = style.clone().force_styling(force);
        }
    }

    /// Colors the `input` with [`Styles::ok`] color.
    #[must_use]
    pub fn ok<'a>(&self, input: impl Into<Cow<'a, str>>) -> String {
        self.ok.apply_to(input.into()).to_string()
    }

    /// Colors the `input` with [`Styles::info`] color.
    #[must_use]
    pub fn info<'a>(&self, input: impl Into<Cow<'a, str>>) -> String {
        self.info.apply_to(input.into()).to_string()
    }

    /// Colors the `input` with [`Styles::err`] color.
    #[must_use]
    pub fn err<'a>(&self, input: impl Into<Cow<'a, str>>) -> String {
        self.err.apply_to(input.into()).to_string()
    }

    /// Colors the `input` with [`Styles::header`] color.
    #[must_use]
    pub fn header<'a>(&self, input: impl Into<Cow<'a, str>>) -> String {
        self.header.apply_to(input.into()).to_string()
    }

    /// Makes the `input` __bold__.
    #[must_use]
    pub fn bold<'a>(&self, input: impl Into<Cow<'a, str>>) -> String {
        self.bold.apply_to(input.into()).to_string()
    }
}

/// [`io::Write`] extension for easier manipulation with strings.
pub trait WriteStrExt: io::Write {
    /// Writes the given `string` into this writer.
    ///
    /// # Errors
    ///
    /// If this writer fails to write the given `string`.
    fn write_str(&mut self, string: impl AsRef<str>) -> io::Result<()> {
        self.write_all(string.as_ref().as_bytes())
    }

    /// Writes the given `string` into this writer followed by a newline.
    ///
    /// # Errors
    ///
    /// If this writer fails to write the given `string`.
    fn write_line(&mut self, string: impl AsRef<str>) -> io::Result<()> {
        self.write_str(string.as_ref())
            .and_then(|()| self.write_str("\n"))
    }
}

impl<T: io::Write + ?Sized> WriteStrExt for T {}

/// Indents every line of the given `text` by `n` spaces.
#[must_use]
pub fn indent(text: &str, n: usize) -> String {
    let pad = " ".repeat(n);
    text.lines()
        .map(|l| if l.is_empty() { String::new() } else { format!("{pad}{l}") })
        .collect::<Vec<_>>()
        .join("\n")
}

/// [`String`] wrapper implementing [`io::Write`].
#[derive(
    Clone,
    Debug,
    Default,
    Deref,
    DerefMut,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct WritableString(pub String);

impl io::Write for WritableString {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.push_str(
            str::from_utf8(buf)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
        );
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{indent, Coloring, Styles, WritableString, WriteStrExt as _};

    #[test]
    fn parses_coloring() {
        assert_eq!("ALWAYS".parse(), Ok(Coloring::Always));
        assert_eq!("never".parse(), Ok(Coloring::Never));
        assert_eq!("auto".parse(), Ok(Coloring::Auto));
        assert!("rainbow".parse::<Coloring>().is_err());
    }

    #[test]
    fn never_coloring_is_plain() {
        let mut styles = Styles::new();
        styles.apply_coloring(Coloring::Never);

        assert_eq!(styles.err("boom"), "boom");
        assert_eq!(styles.ok("fine"), "fine");
    }

    #[test]
    fn always_coloring_is_escaped() {
        let mut styles = Styles::new();
        styles.apply_coloring(Coloring::Always);

        assert_ne!(styles.err("boom"), "boom");
        assert!(styles.err("boom").contains("boom"));
    }

    #[test]
    fn writes_lines() {
        let mut out = WritableString::default();
        out.write_line("a").unwrap();
        out.write_str("b").unwrap();

        assert_eq!(out.0, "a\nb");
    }

    #[test]
    fn indents_non_empty_lines() {
        assert_eq!(indent("a\n\nb", 2), "  a\n\n  b");
    }
}
