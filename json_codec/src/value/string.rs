use std::{borrow::Borrow, fmt, ops::Deref, sync::Arc};

use crate::{error::ValueError, utf8};

/// Immutable, validated UTF-8 payload of a string value.
///
/// Cloning shares the underlying buffer.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct JsonString(Arc<str>);

impl JsonString {
    pub fn new(value: impl Into<Arc<str>>) -> Self {
        Self(value.into())
    }

    /// Builds a string from raw bytes, rejecting anything that is not valid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ValueError> {
        Self::from_utf8(bytes.to_vec())
    }

    pub fn from_utf8(bytes: Vec<u8>) -> Result<Self, ValueError> {
        if !utf8::validate(&bytes) {
            return Err(ValueError::InvalidUtf8);
        }

        let value = String::from_utf8(bytes).map_err(|_| ValueError::InvalidUtf8)?;
        Ok(Self(value.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Copies the text into a buffer no other handle shares.
    pub fn deep_clone(&self) -> Self {
        Self(Arc::from(self.as_str()))
    }

    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for JsonString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for JsonString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for JsonString {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for JsonString {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for JsonString {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl PartialEq<str> for JsonString {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for JsonString {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Debug for JsonString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for JsonString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
