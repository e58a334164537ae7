// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Given/When/Then specification runner.
//!
//! Plain-text specification documents are parsed line by line into
//! [`Scenario`]s, every step line is matched against a [`step::Collection`]
//! of regular expressions, and the matched implementations are executed
//! against a fresh [`World`] per scenario row. Results are reported to a
//! [`Writer`].
//!
//! ```rust
//! # use futures::executor::block_on;
//! # use regex::Regex;
//! use stepwise::{expression::NUMBER, source, step::Args, Suite, World};
//!
//! let document = "\
//! Feature: Calculator
//!   Scenario: Adding
//!     Given I am using a calculator
//!     When I enter \"5\" into the calculator
//!     And I enter \"7\" into the calculator
//!     Then the result should be \"12\" on the screen
//! ";
//!
//! let suite = Suite::new()
//!     .with_source(source::Memory::new().with("calc.feature", document))
//!     .given(Regex::new("^I am using a calculator$").unwrap(), |w: &mut World, _| {
//!         w.insert("total", 0.0_f64);
//!     })
//!     .when(
//!         Regex::new(&format!("^I enter {NUMBER} into the calculator$")).unwrap(),
//!         |w: &mut World, args: Args| -> anyhow::Result<()> {
//!             let n = args.number(0)?;
//!             *w.get_mut::<f64>("total").ok_or_else(|| anyhow::anyhow!("no calculator"))? += n;
//!             Ok(())
//!         },
//!     )
//!     .then(
//!         Regex::new(&format!("^the result should be {NUMBER} on the screen$")).unwrap(),
//!         |w: &mut World, args: Args| {
//!             assert_eq!(w.get::<f64>("total"), args.get(0).and_then(|v| v.as_f64()).as_ref());
//!         },
//!     );
//!
//! let writer = block_on(suite.run(["calc.feature"]));
//! assert!(!writer.execution_has_failed());
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    trivial_casts,
    trivial_numeric_casts
)]
#![forbid(non_ascii_idents, unsafe_code)]
#![warn(
    clippy::as_conversions,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::unwrap_used,
    missing_debug_implementations,
    missing_docs,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]

pub mod cli;
pub mod error;
pub mod event;
pub mod expression;
pub mod future;
pub mod keyword;
pub mod logging;
pub mod parser;
pub mod runner;
pub mod scenario;
pub mod source;
pub mod step;
pub mod suite;
pub mod world;
pub mod writer;

#[doc(inline)]
pub use self::{
    error::Error,
    event::Event,
    keyword::{Keyword, Keywords},
    scenario::Scenario,
    source::Source,
    step::{Args, Role, Value},
    suite::Suite,
    world::World,
    writer::Writer,
};
