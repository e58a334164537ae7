// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Fixed regular expressions for quoted step literals.
//!
//! A step pattern declares the type of a quoted argument by using one of the
//! three [`Slot`] sub-patterns verbatim, e.g.
//! `I enter "([-+]?\d+(?:\.\d+)?)" into the calculator` declares a numeric
//! argument. Extracted literals are coerced into [`Value`]s according to the
//! [`Slot`] found at their capturing group's position.

use std::{borrow::Cow, fmt};

use itertools::Itertools as _;
use lazy_regex::regex;
use regex::Regex;

use crate::step::{Role, Value};

/// Sub-pattern of a quoted boolean literal.
pub const BOOLEAN: &str = r#""((?i:true|false))""#;

/// Sub-pattern of a quoted numeric literal.
pub const NUMBER: &str = r#""([-+]?\d+(?:\.\d+)?)""#;

/// Sub-pattern of any quoted literal, honoring `\"` escapes.
pub const STRING: &str = r#""((?:[^"\\]|\\.)*)""#;

/// Shape of a quoted argument slot in a step pattern.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Slot {
    /// [`BOOLEAN`] slot.
    Boolean,

    /// [`NUMBER`] slot.
    Number,

    /// [`STRING`] slot.
    String,
}

impl Slot {
    /// All the [`Slot`]s, most specific first.
    pub const ALL: [Self; 3] = [Self::Boolean, Self::Number, Self::String];

    /// Returns the fixed sub-pattern of this [`Slot`].
    #[must_use]
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::Boolean => BOOLEAN,
            Self::Number => NUMBER,
            Self::String => STRING,
        }
    }

    /// Infers the [`Slot`] an unquoted `literal` fits best.
    #[must_use]
    pub fn infer(literal: &str) -> Self {
        if regex!(r"^(?i:true|false)$").is_match(literal) {
            Self::Boolean
        } else if regex!(r"^[-+]?\d+(?:\.\d+)?$").is_match(literal) {
            Self::Number
        } else {
            Self::String
        }
    }

    /// Coerces the raw captured text into a [`Value`].
    ///
    /// Falls back to [`Value::Text`] when the text doesn't fit this [`Slot`].
    #[must_use]
    pub fn coerce(self, raw: &str) -> Value {
        let text = unquote(raw);
        match self {
            Self::Number => text
                .parse::<f64>()
                .map_or_else(|_| Value::Text(text.into_owned()), Value::Number),
            Self::Boolean if text.eq_ignore_ascii_case("true") => {
                Value::Bool(true)
            }
            Self::Boolean if text.eq_ignore_ascii_case("false") => {
                Value::Bool(false)
            }
            Self::Boolean | Self::String => Value::Text(text.into_owned()),
        }
    }
}

/// Coerces the raw captured text into a [`Value`] of the given [`Slot`], or
/// leaves it as unquoted [`Value::Text`] if there is no [`Slot`].
#[must_use]
pub fn coerce(raw: &str, slot: Option<Slot>) -> Value {
    slot.map_or_else(|| Value::Text(unquote(raw).into_owned()), |s| s.coerce(raw))
}

/// Quoted literal found in a step line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Literal<'t> {
    /// Byte range of the literal, quotes included.
    pub span: (usize, usize),

    /// Literal text between the quotes, still escaped.
    pub inner: &'t str,
}

/// Finds every `"quoted"` literal in the given `text`, in order.
pub fn literals(text: &str) -> impl Iterator<Item = Literal<'_>> + '_ {
    regex!(r#""((?:[^"\\]|\\.)*)""#)
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1)?;
            Some(Literal {
                span: (whole.start(), whole.end()),
                inner: inner.as_str(),
            })
        })
}

/// Strips a single layer of surrounding quotes (if any) and unescapes escaped
/// quotes.
#[must_use]
pub fn unquote(raw: &str) -> Cow<'_, str> {
    let inner = ['"', '\'']
        .into_iter()
        .find_map(|q| {
            (raw.len() >= 2 && raw.starts_with(q) && raw.ends_with(q))
                .then(|| raw.get(1..raw.len() - 1))
                .flatten()
        })
        .unwrap_or(raw);

    if inner.contains("\\\"") || inner.contains("\\'") {
        Cow::Owned(inner.replace("\\\"", "\"").replace("\\'", "'"))
    } else {
        Cow::Borrowed(inner)
    }
}

/// Discovers the [`Slot`] of every capturing group of the given `re`.
///
/// The returned [`Vec`] is indexed by capturing group, starting from group
/// `1`. Groups not written as one of the fixed [`Slot`] sub-patterns are
/// [`None`].
#[must_use]
pub fn slots(re: &Regex) -> Vec<Option<Slot>> {
    let source = re.as_str();
    let mut slots = vec![None; re.captures_len().saturating_sub(1)];

    for slot in Slot::ALL {
        for (at, _) in source.match_indices(slot.pattern()) {
            // The slot's group opens right after its leading quote.
            let group = groups_before(source, at + 1);
            if let Some(s) = slots.get_mut(group).filter(|s| s.is_none()) {
                *s = Some(slot);
            }
        }
    }
    slots
}

/// Counts capturing groups opened in `source` before the `end` byte offset.
fn groups_before(source: &str, end: usize) -> usize {
    let bytes = source.as_bytes();
    let end = end.min(bytes.len());
    let (mut count, mut i, mut in_class) = (0, 0, false);

    while i < end {
        match bytes.get(i) {
            Some(b'\\') => i += 1,
            Some(b'[') if !in_class => in_class = true,
            Some(b']') if in_class => in_class = false,
            Some(b'(') if !in_class => {
                let rest = bytes.get(i + 1..).unwrap_or_default();
                let named = rest.starts_with(b"?P<")
                    || (rest.starts_with(b"?<")
                        && !rest.starts_with(b"?<=")
                        && !rest.starts_with(b"?<!"));
                if named || !rest.starts_with(b"?") {
                    count += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    count
}

/// Generates a ready-to-paste registration stub for an unmatched `condition`.
///
/// Every quoted literal is replaced with the [`Slot`] sub-pattern of its
/// inferred type, and the rest of the text is escaped.
#[must_use]
pub fn snippet(condition: &str, role: Role) -> String {
    let pattern = pattern_for(condition);
    format!(
        ".{method}(Regex::new({re})?, |world: &mut World, args: Args| {{\n    \
             todo!(\"implement: {escaped}\")\n\
         }})",
        method = role.method(),
        re = RawLiteral(&pattern),
        escaped = condition.escape_default(),
    )
}

/// Builds an anchored pattern matching the given `condition`.
#[must_use]
pub fn pattern_for(condition: &str) -> String {
    let mut last = 0;
    let mut parts = Vec::new();
    for lit in literals(condition) {
        parts.push(regex::escape(condition.get(last..lit.span.0).unwrap_or_default()));
        parts.push(Slot::infer(&unquote(lit.inner)).pattern().to_owned());
        last = lit.span.1;
    }
    parts.push(regex::escape(condition.get(last..).unwrap_or_default()));

    format!("^{}$", parts.iter().join(""))
}

/// Raw string literal rendering of a text, with enough `#`s to hold it.
struct RawLiteral<'s>(&'s str);

impl fmt::Display for RawLiteral<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hashes = (0..)
            .map(|n| "#".repeat(n))
            .find(|h| !self.0.contains(&format!("\"{h}")))
            .unwrap_or_default();
        write!(f, "r{hashes}\"{}\"{hashes}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use super::{
        coerce, literals, pattern_for, slots, snippet, unquote, Slot, BOOLEAN,
        NUMBER, STRING,
    };
    use crate::step::{Role, Value};

    #[test]
    fn infers_literal_shapes() {
        assert_eq!(Slot::infer("42"), Slot::Number);
        assert_eq!(Slot::infer("-4.5"), Slot::Number);
        assert_eq!(Slot::infer("TRUE"), Slot::Boolean);
        assert_eq!(Slot::infer("false"), Slot::Boolean);
        assert_eq!(Slot::infer("42 cats"), Slot::String);
        assert_eq!(Slot::infer(""), Slot::String);
    }

    #[test]
    fn unquotes_single_layer() {
        assert_eq!(unquote(r#""hi""#), "hi");
        assert_eq!(unquote(r#"""hi"""#), r#""hi""#);
        assert_eq!(unquote("'hi'"), "hi");
        assert_eq!(unquote("hi"), "hi");
        assert_eq!(unquote("\""), "\"");
        assert_eq!(unquote(r#"say \"hi\""#), r#"say "hi""#);
    }

    #[test]
    fn coerces_by_slot() {
        assert_eq!(coerce("42", Some(Slot::Number)), Value::Number(42.0));
        assert_eq!(coerce("True", Some(Slot::Boolean)), Value::Bool(true));
        assert_eq!(coerce("FALSE", Some(Slot::Boolean)), Value::Bool(false));
        assert_eq!(coerce("42", Some(Slot::String)), Value::from("42"));
        assert_eq!(coerce("42", None), Value::from("42"));
        assert_eq!(coerce("x", Some(Slot::Number)), Value::from("x"));
    }

    #[test]
    fn finds_quoted_literals() {
        let found = literals(r#"I say "hi \"there\"" and "5""#)
            .map(|l| l.inner)
            .collect::<Vec<_>>();

        assert_eq!(found, [r#"hi \"there\""#, "5"]);
    }

    #[test]
    fn discovers_slots_by_group_position() {
        let re = Regex::new(&format!(
            "^(a|b) {NUMBER} (?:x|y) {STRING} (\\w+) {BOOLEAN}$"
        ))
        .unwrap();

        assert_eq!(
            slots(&re),
            [
                None,
                Some(Slot::Number),
                Some(Slot::String),
                None,
                Some(Slot::Boolean),
            ],
        );
    }

    #[test]
    fn ignores_parens_in_classes_and_escapes() {
        let re = Regex::new(&format!(r"^[(]\( (?P<n>x) {NUMBER}$")).unwrap();

        assert_eq!(slots(&re), [None, Some(Slot::Number)]);
    }

    #[test]
    fn builds_matching_pattern() {
        let line = r#"I enter "5" and "yes" with "true" (twice)"#;
        let pattern = pattern_for(line);
        let re = Regex::new(&pattern).unwrap();

        assert!(re.is_match(line), "{pattern}");
        assert_eq!(
            slots(&re),
            [Some(Slot::Number), Some(Slot::String), Some(Slot::Boolean)],
        );
    }

    #[test]
    fn snippet_is_registration_stub() {
        let stub = snippet(r#"the result should be "12""#, Role::THEN);

        assert!(stub.starts_with(".then(Regex::new(r#\"^the result"), "{stub}");
        assert!(stub.contains(NUMBER), "{stub}");
        assert!(stub.contains("todo!"), "{stub}");
        assert!(snippet("x", Role::ANY).starts_with(".step("));
    }
}
