use std::{fmt, slice, sync::Arc};

use super::Value;
use crate::error::ValueError;

/// Ordered sequence of values.
///
/// Storage is shared between clones and copied on the first write through a
/// shared handle, so pushing an array into itself stores a snapshot.
#[derive(Clone, Default)]
pub struct Array {
    items: Arc<Vec<Value>>,
}

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Arc::new(Vec::with_capacity(capacity)),
        }
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn at(&self, index: usize) -> Result<&Value, ValueError> {
        self.items.get(index).ok_or(ValueError::IndexOutOfBounds {
            index,
            len: self.size(),
        })
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut Value, ValueError> {
        let len = self.size();
        self.make_mut()
            .get_mut(index)
            .ok_or(ValueError::IndexOutOfBounds { index, len })
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn push_back(&mut self, value: impl Into<Value>) {
        self.make_mut().push(value.into());
    }

    /// Inserts `value` before `index`; `index == size()` appends.
    pub fn insert(&mut self, index: usize, value: impl Into<Value>) -> Result<(), ValueError> {
        let len = self.size();
        if index > len {
            return Err(ValueError::IndexOutOfBounds { index, len });
        }

        self.make_mut().insert(index, value.into());
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Value, ValueError> {
        let len = self.size();
        if index >= len {
            return Err(ValueError::IndexOutOfBounds { index, len });
        }

        Ok(self.make_mut().remove(index))
    }

    pub fn clear(&mut self) {
        // Dropping our reference is enough if the storage is shared
        match Arc::get_mut(&mut self.items) {
            Some(items) => items.clear(),
            None => self.items = Arc::default(),
        }
    }

    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    pub fn equals(&self, other: &Array) -> bool {
        if self.ptr_eq(other) {
            return true;
        }

        self.size() == other.size() && self.iter().zip(other.iter()).all(|(a, b)| a.equals(b))
    }

    pub fn deep_clone(&self) -> Self {
        self.iter().map(Value::deep_clone).collect()
    }

    pub(crate) fn ptr_eq(&self, other: &Array) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    fn make_mut(&mut self) -> &mut Vec<Value> {
        Arc::make_mut(&mut self.items)
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<V: Into<Value>> FromIterator<V> for Array {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            items: Arc::new(iter.into_iter().map(Into::into).collect()),
        }
    }
}

impl From<Vec<Value>> for Array {
    fn from(items: Vec<Value>) -> Self {
        Self {
            items: Arc::new(items),
        }
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
