// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Role`] a step definition is restricted to.

use std::{fmt, ops::BitOr};

/// Given/When/Then classification of a step, stored as a bitmask.
///
/// A step definition with role `R` accepts a line requiring role `Q` when
/// `R & Q == Q`, so [`Role::ANY`] accepts every line.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Role(u8);

impl Role {
    /// No role at all. Accepts only lines requiring no role.
    pub const NONE: Self = Self(0);

    /// [Given] steps.
    ///
    /// [Given]: https://cucumber.io/docs/gherkin/reference#given
    pub const GIVEN: Self = Self(0b001);

    /// [When] steps.
    ///
    /// [When]: https://cucumber.io/docs/gherkin/reference#when
    pub const WHEN: Self = Self(0b010);

    /// [Then] steps.
    ///
    /// [Then]: https://cucumber.io/docs/gherkin/reference#then
    pub const THEN: Self = Self(0b100);

    /// Any of [`Role::GIVEN`], [`Role::WHEN`] or [`Role::THEN`].
    pub const ANY: Self = Self(0b111);

    /// Returns the raw bits of this [`Role`].
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Checks whether a definition with this [`Role`] may execute a line
    /// requiring the `required` one.
    #[must_use]
    pub const fn accepts(self, required: Self) -> bool {
        self.0 & required.0 == required.0
    }

    /// Returns the name of a builder method registering this [`Role`].
    pub(crate) const fn method(self) -> &'static str {
        match self.0 {
            0b001 => "given",
            0b010 => "when",
            0b100 => "then",
            _ => "step",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::ANY
    }
}

impl BitOr for Role {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::ANY {
            return write!(f, "Any");
        }
        let names = [(Self::GIVEN, "Given"), (Self::WHEN, "When"), (Self::THEN, "Then")]
            .into_iter()
            .filter_map(|(role, name)| self.accepts(role).then_some(name))
            .collect::<Vec<_>>();
        if names.is_empty() {
            write!(f, "None")
        } else {
            write!(f, "{}", names.join("|"))
        }
    }
}
