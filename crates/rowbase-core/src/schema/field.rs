use crate::stmt::Value;

use std::{fmt, sync::Arc};

/// Describes one mapped column of a model.
///
/// Descriptors are plain metadata: nothing checks that `default` matches
/// `sql_type`.
#[derive(Debug, Clone)]
pub struct Field {
    /// Column name. When `None`, the attribute name is used.
    pub name: Option<String>,

    /// SQL column type, e.g. `varchar(100)` or `bigint`.
    pub sql_type: String,

    /// True if the field is the model's primary key
    pub primary_key: bool,

    /// Value used by `save` when the attribute is unset
    pub default: FieldDefault,
}

/// How a field resolves a value when a record leaves it unset.
#[derive(Clone, Default)]
pub enum FieldDefault {
    /// No default; the attribute stays unset.
    #[default]
    None,

    /// A fixed value.
    Value(Value),

    /// A zero-argument factory, invoked once per resolution.
    Factory(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl Field {
    pub fn new(
        name: Option<String>,
        sql_type: impl Into<String>,
        primary_key: bool,
        default: FieldDefault,
    ) -> Field {
        Field {
            name,
            sql_type: sql_type.into(),
            primary_key,
            default,
        }
    }

    /// A `varchar(100)` column with no default.
    pub fn string() -> Field {
        Field::new(None, "varchar(100)", false, FieldDefault::None)
    }

    /// A `boolean` column defaulting to `false`.
    pub fn boolean() -> Field {
        Field::new(None, "boolean", false, FieldDefault::Value(Value::Bool(false)))
    }

    /// A `bigint` column defaulting to `0`.
    pub fn integer() -> Field {
        Field::new(None, "bigint", false, FieldDefault::Value(Value::I64(0)))
    }

    /// A `real` column defaulting to `0.0`.
    pub fn float() -> Field {
        Field::new(None, "real", false, FieldDefault::Value(Value::F64(0.0)))
    }

    /// A `text` column with no default.
    pub fn text() -> Field {
        Field::new(None, "text", false, FieldDefault::None)
    }

    /// Sets the column name.
    pub fn name(mut self, name: impl Into<String>) -> Field {
        self.name = Some(name.into());
        self
    }

    /// Overrides the SQL column type.
    pub fn ddl(mut self, sql_type: impl Into<String>) -> Field {
        self.sql_type = sql_type.into();
        self
    }

    /// Marks the field as the primary key.
    pub fn primary_key(mut self) -> Field {
        self.primary_key = true;
        self
    }

    /// Sets a fixed default value.
    pub fn default(mut self, value: impl Into<Value>) -> Field {
        self.default = FieldDefault::Value(value.into());
        self
    }

    /// Sets a default factory, called each time a default is needed.
    pub fn default_with<F>(mut self, factory: F) -> Field
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = FieldDefault::Factory(Arc::new(factory));
        self
    }

    /// Removes any default.
    pub fn no_default(mut self) -> Field {
        self.default = FieldDefault::None;
        self
    }

    /// Returns the column name, falling back to `attr`.
    pub fn column_name<'a>(&'a self, attr: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(attr)
    }

    /// Resolves the default, invoking the factory if there is one.
    pub fn default_value(&self) -> Option<Value> {
        match &self.default {
            FieldDefault::None => None,
            FieldDefault::Value(value) => Some(value.clone()),
            FieldDefault::Factory(factory) => Some(factory()),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Field, {}:{}>",
            self.sql_type,
            self.name.as_deref().unwrap_or("None")
        )
    }
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDefault::None => f.write_str("None"),
            FieldDefault::Value(value) => f.debug_tuple("Value").field(value).finish(),
            FieldDefault::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}
