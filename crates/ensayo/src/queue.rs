//! Positional parameter queue.
//!
//! One queue lives for one top-level `generate` call and is shared by every
//! recursion level: a value consumed while building a nested model is gone
//! for the fields visited after it.

use crate::field::FieldValue;

/// Build a `Vec<FieldValue>` from plain values.
///
/// ```ignore
/// let roles: Roles = ensayo::generate_with(params!["PROJECT_ADMIN", format!("p:{id}")])?;
/// let settings: ServerAuthSettings = ensayo::generate_with(params![false])?;
/// ```
#[macro_export]
macro_rules! params {
    ($($value:expr),* $(,)?) => {{
        let values: ::std::vec::Vec<$crate::FieldValue> =
            ::std::vec![$($crate::FieldValue::from($value)),*];
        values
    }};
}

/// Immutable parameter list with a read cursor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterQueue {
    values: Vec<FieldValue>,
    cursor: usize,
}

impl ParameterQueue {
    /// Create a queue from anything convertible to field values
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            cursor: 0,
        }
    }

    /// Whether every value has been consumed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cursor >= self.values.len()
    }

    /// Values not yet consumed
    #[must_use]
    pub fn remaining(&self) -> &[FieldValue] {
        self.values.get(self.cursor..).unwrap_or_default()
    }

    /// Number of values consumed so far
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.cursor.min(self.values.len())
    }

    /// Take the front value
    pub fn pop_front(&mut self) -> Option<FieldValue> {
        let value = self.values.get(self.cursor).cloned()?;
        self.cursor += 1;
        Some(value)
    }
}
