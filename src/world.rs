// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Dynamic execution context shared by the steps of one scenario row.

use std::{any::Any, collections::HashMap, fmt};

use itertools::Itertools as _;

/// Untyped key/value storage threaded through every step of a single
/// scenario row.
///
/// Every row starts with a fresh, empty [`World`], so nothing leaks between
/// rows, scenarios or documents. There is no schema: steps agree on keys and
/// value types by convention.
#[derive(Default)]
pub struct World {
    values: HashMap<String, Box<dyn Any>>,
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("keys", &self.values.keys().sorted().collect::<Vec<_>>())
            .finish()
    }
}

impl World {
    /// Creates an empty [`World`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the `value` under the `key`, returning whether it replaced a
    /// previous one.
    pub fn insert<T: Any>(&mut self, key: impl Into<String>, value: T) -> bool {
        self.values.insert(key.into(), Box::new(value)).is_some()
    }

    /// Returns the value stored under the `key`, if it has type `T`.
    #[must_use]
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.values.get(key)?.downcast_ref()
    }

    /// Returns the mutable value stored under the `key`, if it has type `T`.
    #[must_use]
    pub fn get_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.values.get_mut(key)?.downcast_mut()
    }

    /// Removes the value stored under the `key`, if it has type `T`.
    ///
    /// A value of another type is kept in place.
    pub fn remove<T: Any>(&mut self, key: &str) -> Option<T> {
        if !self.values.get(key)?.is::<T>() {
            return None;
        }
        self.values.remove(key)?.downcast().ok().map(|b| *b)
    }

    /// Checks whether anything is stored under the `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Checks whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::World;

    #[test]
    fn stores_values_of_any_type() {
        let mut world = World::new();
        assert!(world.is_empty());

        assert!(!world.insert("total", 5.0_f64));
        assert!(!world.insert("name", String::from("calc")));

        assert_eq!(world.get::<f64>("total"), Some(&5.0));
        assert_eq!(world.get::<String>("name").map(String::as_str), Some("calc"));
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn typed_access_is_checked() {
        let mut world = World::new();
        _ = world.insert("total", 5_u32);

        assert_eq!(world.get::<f64>("total"), None);
        assert_eq!(world.remove::<f64>("total"), None);
        assert!(world.contains("total"));
        assert_eq!(world.remove::<u32>("total"), Some(5));
        assert!(!world.contains("total"));
    }

    #[test]
    fn mutates_in_place() {
        let mut world = World::new();
        _ = world.insert("items", vec![1]);

        world.get_mut::<Vec<i32>>("items").unwrap().push(2);
        assert!(world.insert("items", vec![0]));

        assert_eq!(world.get::<Vec<i32>>("items"), Some(&vec![0]));
        assert_eq!(format!("{world:?}"), r#"World { keys: ["items"] }"#);
    }
}
