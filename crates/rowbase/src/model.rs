use crate::{Db, FindAll, Record};

use rowbase_core::{schema::Field, stmt::Value, Result, TableSchema};

/// A typed view over one [`Record`], mapped to one table.
///
/// Implementations are usually generated with [`model!`](crate::model!).
/// The model must be registered with [`Db::builder`] before use; the
/// declaration is reflected into a [`TableSchema`] once, at build time.
#[async_trait::async_trait]
pub trait Model: Sized + Send + Sync + 'static {
    /// Model name, also the registry key
    const NAME: &'static str;

    /// Table override. The model name is used when `None`.
    const TABLE: Option<&'static str>;

    /// Declared `(attribute, field)` pairs, in declaration order.
    fn fields() -> Vec<(&'static str, Field)>;

    fn from_record(record: Record) -> Self;

    fn as_record(&self) -> &Record;

    fn as_record_mut(&mut self) -> &mut Record;

    fn schema() -> Result<TableSchema> {
        TableSchema::reflect(Self::NAME, Self::TABLE, Self::fields())
    }

    async fn find(db: &Db, pk: Value) -> Result<Option<Self>> {
        db.find::<Self>(pk).await
    }

    async fn find_all(db: &Db, query: FindAll) -> Result<Vec<Self>> {
        db.find_all::<Self>(query).await
    }

    async fn find_number(
        db: &Db,
        select: &str,
        filter: Option<&str>,
        args: Vec<Value>,
    ) -> Result<Option<Value>> {
        db.find_number::<Self>(select, filter, args).await
    }

    async fn save(&mut self, db: &Db) -> Result<()> {
        db.save(self).await
    }

    async fn update(&self, db: &Db) -> Result<()> {
        db.update(self).await
    }

    async fn remove(&self, db: &Db) -> Result<()> {
        db.remove(self).await
    }
}
