//! Raw input typing.
//!
//! Extractors accept anything that may or may not hold text. Values that are
//! not text fail with [`MonparseError::InvalidInputType`].

use serde_json::Value;

use crate::error::{MonparseError, Result};

/// A raw value that may be viewed as text.
pub trait RawText {
    /// Borrow the value as text.
    fn as_text(&self) -> Result<&str>;
}

fn invalid(found: &str) -> MonparseError {
    MonparseError::InvalidInputType {
        found: found.to_string(),
    }
}

impl RawText for str {
    fn as_text(&self) -> Result<&str> {
        Ok(self)
    }
}

impl RawText for String {
    fn as_text(&self) -> Result<&str> {
        Ok(self.as_str())
    }
}

impl RawText for [u8] {
    fn as_text(&self) -> Result<&str> {
        std::str::from_utf8(self).map_err(|_| invalid("bytes"))
    }
}

impl RawText for Vec<u8> {
    fn as_text(&self) -> Result<&str> {
        self.as_slice().as_text()
    }
}

impl RawText for Value {
    fn as_text(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s.as_str()),
            Value::Null => Err(invalid("null")),
            Value::Bool(_) => Err(invalid("bool")),
            Value::Number(_) => Err(invalid("number")),
            Value::Array(_) => Err(invalid("array")),
            Value::Object(_) => Err(invalid("object")),
        }
    }
}

impl<T: RawText + ?Sized> RawText for &T {
    fn as_text(&self) -> Result<&str> {
        (**self).as_text()
    }
}

impl<T: RawText> RawText for Option<T> {
    fn as_text(&self) -> Result<&str> {
        match self {
            Some(value) => value.as_text(),
            None => Err(invalid("none")),
        }
    }
}
