// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Typed step parameters.

use derive_more::{Deref, Display, Error, From, Into};

/// Parameter extracted from a matched step line.
#[derive(Clone, Debug, Display, From, PartialEq)]
pub enum Value {
    /// Boolean-shaped literal (`"true"` or `"false"`, any case).
    #[display(fmt = "{}", _0)]
    Bool(bool),

    /// Numeric-shaped literal.
    #[display(fmt = "{}", _0)]
    Number(f64),

    /// Any other literal, unquoted and unescaped.
    #[display(fmt = "{}", _0)]
    Text(String),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl Value {
    /// Returns the contained [`bool`], if this is [`Value::Bool`].
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        if let Self::Bool(b) = self {
            Some(*b)
        } else {
            None
        }
    }

    /// Returns the contained number, if this is [`Value::Number`].
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        if let Self::Number(n) = self {
            Some(*n)
        } else {
            None
        }
    }

    /// Returns the contained text, if this is [`Value::Text`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s)
        } else {
            None
        }
    }

    /// Human-readable name of this [`Value`]'s kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
        }
    }
}

/// Ordered parameters passed to a step implementation.
#[derive(Clone, Debug, Default, Deref, From, Into, PartialEq)]
pub struct Args(Vec<Value>);

impl FromIterator<Value> for Args {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Args {
    /// Returns the `index`th parameter as a number.
    ///
    /// # Errors
    ///
    /// If there is no such parameter, or it isn't a [`Value::Number`].
    pub fn number(&self, index: usize) -> Result<f64, ArgError> {
        let value = self.value(index)?;
        value.as_f64().ok_or(ArgError::Type {
            index,
            expected: "number",
            actual: value.kind(),
        })
    }

    /// Returns the `index`th parameter as a [`bool`].
    ///
    /// # Errors
    ///
    /// If there is no such parameter, or it isn't a [`Value::Bool`].
    pub fn boolean(&self, index: usize) -> Result<bool, ArgError> {
        let value = self.value(index)?;
        value.as_bool().ok_or(ArgError::Type {
            index,
            expected: "boolean",
            actual: value.kind(),
        })
    }

    /// Returns the `index`th parameter as text.
    ///
    /// # Errors
    ///
    /// If there is no such parameter, or it isn't a [`Value::Text`].
    pub fn text(&self, index: usize) -> Result<&str, ArgError> {
        let value = self.value(index)?;
        value.as_str().ok_or(ArgError::Type {
            index,
            expected: "string",
            actual: value.kind(),
        })
    }

    fn value(&self, index: usize) -> Result<&Value, ArgError> {
        self.0.get(index).ok_or(ArgError::Missing(index))
    }
}

/// Error of accessing [`Args`] with a wrong index or type.
#[derive(Clone, Copy, Debug, Display, Error, PartialEq)]
pub enum ArgError {
    /// No parameter at the index.
    #[display(fmt = "missing step argument #{}", _0)]
    Missing(#[error(not(source))] usize),

    /// Parameter has another type.
    #[display(
        fmt = "step argument #{} is a {}, expected a {}",
        index,
        actual,
        expected
    )]
    Type {
        /// Index of the parameter.
        index: usize,

        /// Requested kind.
        expected: &'static str,

        /// Kind of the stored [`Value`].
        actual: &'static str,
    },
}
