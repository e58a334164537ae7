#![allow(dead_code)]

use async_trait::async_trait;
use regex::Regex;
use stepwise::{expression::NUMBER, Error, Event, World, Writer};

/// [`Writer`] collecting every [`Event`] it receives.
#[derive(Debug, Default)]
pub struct Collect(pub Vec<Event>);

#[async_trait(?Send)]
impl Writer for Collect {
    async fn handle_event(&mut self, ev: Event) {
        self.0.push(ev);
    }
}

impl Collect {
    /// `(scenario, passed)` of every summary, in order.
    pub fn summaries(&self) -> Vec<(&str, bool)> {
        self.0
            .iter()
            .filter_map(|ev| match ev {
                Event::Summary {
                    scenario, passed, ..
                } => Some((scenario.as_str(), *passed)),
                _ => None,
            })
            .collect()
    }

    /// `(condition, error)` of every reported error, in order.
    pub fn errors(&self) -> Vec<(&str, &Error)> {
        self.0
            .iter()
            .filter_map(|ev| match ev {
                Event::Error {
                    condition, error, ..
                } => Some((condition.as_str(), error)),
                _ => None,
            })
            .collect()
    }

    /// Completed documents, in order.
    pub fn completed(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter_map(|ev| match ev {
                Event::Complete { document } => Some(document.as_str()),
                _ => None,
            })
            .collect()
    }
}

pub fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

/// Pattern with a single quoted number slot in place of `{}`.
pub fn numeric(pattern: &str) -> Regex {
    re(&pattern.replace("{}", NUMBER))
}

pub fn total(world: &World) -> f64 {
    world.get::<f64>("total").copied().unwrap_or_default()
}
