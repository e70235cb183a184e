//! Base implementation of records.
use crate::error::HistEnvError;
use std::collections::{hash_map::Iter, HashMap};

/// Values that can be stored in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A single floating-point value.
    Scalar(f32),
}

/// A container of named scalar values.
#[derive(Debug, Clone, Default)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Inserts a key-value pair into the record.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over the key-value pairs in the record.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Gets a scalar value from the record.
    pub fn get_scalar(&self, k: &str) -> Result<f32, HistEnvError> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            None => Err(HistEnvError::RecordKeyError(k.to_string())),
        }
    }

    /// Returns `true` if the record contains no key-value pairs.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod test {
    use super::{Record, RecordValue};
    use crate::error::HistEnvError;

    #[test]
    fn test_get_values() {
        let mut record = Record::from_slice(&[
            ("episode_reward", RecordValue::Scalar(1.5)),
            ("episode_length", RecordValue::Scalar(3.0)),
        ]);
        record.insert("episode_reward", RecordValue::Scalar(2.5));

        assert_eq!(record.len(), 2);
        assert_eq!(record.get_scalar("episode_reward").unwrap(), 2.5);
        assert_eq!(record.get("episode_length"), Some(&RecordValue::Scalar(3.0)));
        assert_eq!(record.iter().count(), 2);
        assert_eq!(
            record.get_scalar("missing"),
            Err(HistEnvError::RecordKeyError("missing".into()))
        );
        assert!(Record::empty().is_empty());
    }
}
