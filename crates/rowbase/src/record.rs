use rowbase_core::{
    schema::Field,
    stmt::{Row, Value},
};

use indexmap::IndexMap;
use tracing::debug;

/// The attribute values of one row.
///
/// Reading an attribute that was never set yields nothing rather than an
/// error. Field descriptors are not stored here; they live on the model's
/// [`TableSchema`](rowbase_core::TableSchema).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Record {
        Record::default()
    }

    /// Sets `key` and returns the record, for building records inline.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Record {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns the value of `key`, or `Value::Null` when it is unset.
    pub fn value(&self, key: &str) -> Value {
        self.values.get(key).cloned().unwrap_or_default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Record {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.shift_remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Returns the value of `key`, resolving the field's default when the
    /// attribute is unset or null.
    ///
    /// A resolved default is written back, so later reads see the same value
    /// even when the default comes from a factory.
    pub fn get_or_default(&mut self, key: &str, field: &Field) -> Value {
        match self.values.get(key) {
            Some(value) if !value.is_null() => value.clone(),
            _ => match field.default_value() {
                Some(value) => {
                    debug!("using default value for {key}: {value}");
                    self.values.insert(key.to_string(), value.clone());
                    value
                }
                None => Value::Null,
            },
        }
    }

    pub fn into_row(self) -> Row {
        self.values
    }
}

impl From<Row> for Record {
    fn from(values: Row) -> Record {
        Record { values }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Record {
        Record {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
