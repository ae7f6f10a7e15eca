use super::{Db, RowCountPolicy, Shared};
use crate::{Model, Result};

use indexmap::IndexMap;
use rowbase_core::{Error, TableSchema};
use tokio::sync::RwLock;

use std::sync::Arc;

#[derive(Default)]
pub struct Builder {
    /// Schema reflectors of the registered models, in registration order
    models: Vec<fn() -> Result<TableSchema>>,

    row_count_policy: RowCountPolicy,
}

impl Builder {
    pub fn register<T: Model>(&mut self) -> &mut Self {
        self.models.push(T::schema);
        self
    }

    /// Sets how `save`, `update` and `remove` react when a statement does not
    /// affect exactly one row.
    pub fn row_count_policy(&mut self, policy: RowCountPolicy) -> &mut Self {
        self.row_count_policy = policy;
        self
    }

    /// Reflects every registered model and returns a handle without a pool.
    ///
    /// Models are keyed by name, so two models sharing a name are rejected.
    ///
    /// Call [`Db::init_pool`] before issuing statements.
    pub fn build(&mut self) -> Result<Db> {
        let mut schemas = IndexMap::with_capacity(self.models.len());

        for reflect in &self.models {
            let schema = reflect()?;

            if schemas.contains_key(&schema.name) {
                return Err(Error::invalid_schema(format!(
                    "model `{}` registered more than once",
                    schema.name
                )));
            }

            schemas.insert(schema.name.clone(), Arc::new(schema));
        }

        Ok(Db {
            shared: Arc::new(Shared {
                schemas,
                pool: RwLock::new(None),
                row_count_policy: self.row_count_policy,
            }),
        })
    }
}
