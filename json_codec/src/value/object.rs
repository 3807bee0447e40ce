use std::{fmt, sync::Arc};

use ahash::RandomState;
use indexmap::{IndexMap, map};

use super::Value;
use crate::error::ValueError;

type Members = IndexMap<String, Value, RandomState>;

/// Mapping from unique string keys to values.
///
/// Iteration follows insertion order. Replacing an existing key keeps its
/// position and erasing a key keeps the order of the rest. Storage is shared
/// between clones and copied on write like [`Array`](super::Array).
#[derive(Clone, Default)]
pub struct Object {
    members: Arc<Members>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: Arc::new(Members::with_capacity_and_hasher(
                capacity,
                RandomState::new(),
            )),
        }
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Inserts or replaces the value for `key`, returning the previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.make_mut().insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.members.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        if !self.has(key) {
            return None;
        }
        self.make_mut().get_mut(key)
    }

    /// Like [`Object::get`], but a missing key is an error.
    pub fn try_get(&self, key: &str) -> Result<&Value, ValueError> {
        self.get(key).ok_or_else(|| ValueError::KeyNotFound {
            key: key.to_string(),
        })
    }

    pub fn has(&self, key: &str) -> bool {
        self.members.contains_key(key)
    }

    /// Removes `key` if present.
    pub fn erase(&mut self, key: &str) -> Option<Value> {
        if !self.has(key) {
            return None;
        }
        self.make_mut().shift_remove(key)
    }

    pub fn clear(&mut self) {
        match Arc::get_mut(&mut self.members) {
            Some(members) => members.clear(),
            None => self.members = Arc::default(),
        }
    }

    pub fn iter(&self) -> map::Iter<'_, String, Value> {
        self.members.iter()
    }

    pub fn keys(&self) -> map::Keys<'_, String, Value> {
        self.members.keys()
    }

    /// Key-wise equality, ignoring order.
    pub fn equals(&self, other: &Object) -> bool {
        if self.ptr_eq(other) {
            return true;
        }

        self.size() == other.size()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|found| value.equals(found)))
    }

    pub fn deep_clone(&self) -> Self {
        self.iter()
            .map(|(key, value)| (key.clone(), value.deep_clone()))
            .collect()
    }

    pub(crate) fn ptr_eq(&self, other: &Object) -> bool {
        Arc::ptr_eq(&self.members, &other.members)
    }

    fn make_mut(&mut self) -> &mut Members {
        Arc::make_mut(&mut self.members)
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut members = Members::default();
        for (key, value) in iter {
            members.insert(key.into(), value.into());
        }

        Self {
            members: Arc::new(members),
        }
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
