//! Parameter slots of a prepared statement.

use oxide_query_core::SqlValue;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};

use crate::error::{QueryError, Result};

/// SQLite's default limit on the length of a string or blob.
pub const MAX_LENGTH: usize = 1_000_000_000;

/// Values for every parameter slot of one statement execution.
///
/// Slots are one-based, like SQL parameter indices. Unfilled slots hold
/// [`SqlValue::Null`].
#[derive(Debug, Clone, PartialEq)]
pub struct Bindings {
    values: Vec<SqlValue>,
}

impl Bindings {
    /// Creates bindings for a statement with `count` parameters, all NULL.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            values: vec![SqlValue::Null; count],
        }
    }

    /// Returns the number of parameter slots.
    #[must_use]
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Returns the bound values in slot order.
    #[must_use]
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Binds `value` to the one-based `slot`.
    ///
    /// Zero blobs longer than [`MAX_LENGTH`] are rejected here, before
    /// [`Bindings::apply`] would allocate them.
    pub fn bind(&mut self, slot: usize, value: SqlValue) -> Result<()> {
        if let SqlValue::ZeroBlob(length) = value {
            if length > MAX_LENGTH {
                return Err(QueryError::TooBig { slot, length });
            }
        }

        let count = self.count();
        let target = slot
            .checked_sub(1)
            .and_then(|index| self.values.get_mut(index))
            .ok_or(QueryError::ParameterOutOfRange { slot, count })?;
        *target = value;
        Ok(())
    }

    /// Resets every slot after the first `offset` to NULL.
    pub fn clear_from(&mut self, offset: usize) {
        for value in self.values.iter_mut().skip(offset) {
            *value = SqlValue::Null;
        }
    }

    /// Binds all slots, in order, to `query`.
    ///
    /// A zero blob is bound as an explicit zero-filled blob of its length.
    /// Text parsed from tokens is always UTF-8, so binding it as a string
    /// loses nothing.
    #[must_use]
    pub fn apply<'q>(
        &self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        self.values.iter().fold(query, |query, value| match value {
            SqlValue::Null => query.bind(None::<i64>),
            SqlValue::Integer(n) => query.bind(*n),
            SqlValue::Float(x) => query.bind(*x),
            SqlValue::Text(bytes) => query.bind(String::from_utf8_lossy(bytes).into_owned()),
            SqlValue::Blob(bytes) => query.bind(bytes.clone()),
            SqlValue::ZeroBlob(len) => query.bind(vec![0_u8; *len]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_all_null() {
        let bindings = Bindings::new(3);
        assert_eq!(bindings.count(), 3);
        assert_eq!(bindings.values(), &[SqlValue::Null, SqlValue::Null, SqlValue::Null]);
    }

    #[test]
    fn test_bind_slots() {
        let mut bindings = Bindings::new(2);
        bindings.bind(1, SqlValue::Integer(7)).unwrap();
        bindings.bind(2, SqlValue::text("x")).unwrap();
        assert_eq!(
            bindings.values(),
            &[SqlValue::Integer(7), SqlValue::text("x")]
        );
    }

    #[test]
    fn test_bind_out_of_range() {
        let mut bindings = Bindings::new(1);
        assert!(matches!(
            bindings.bind(2, SqlValue::Null),
            Err(QueryError::ParameterOutOfRange { slot: 2, count: 1 })
        ));
        assert!(matches!(
            bindings.bind(0, SqlValue::Null),
            Err(QueryError::ParameterOutOfRange { slot: 0, count: 1 })
        ));
    }

    #[test]
    fn test_zero_blob_length_limit() {
        let mut bindings = Bindings::new(2);
        bindings.bind(1, SqlValue::ZeroBlob(MAX_LENGTH)).unwrap();
        assert!(matches!(
            bindings.bind(2, SqlValue::ZeroBlob(MAX_LENGTH + 1)),
            Err(QueryError::TooBig {
                slot: 2,
                length: 1_000_000_001
            })
        ));
        assert_eq!(bindings.values()[1], SqlValue::Null);
    }

    #[test]
    fn test_clear_from_keeps_prefix() {
        let mut bindings = Bindings::new(3);
        for slot in 1..=3 {
            bindings.bind(slot, SqlValue::Integer(1)).unwrap();
        }
        bindings.clear_from(1);
        assert_eq!(
            bindings.values(),
            &[SqlValue::Integer(1), SqlValue::Null, SqlValue::Null]
        );
    }
}
