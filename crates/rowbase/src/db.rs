mod builder;
pub use builder::Builder;

mod pool;
pub use pool::{Pool, PoolConnection};

use crate::{FindAll, Model, Record};

use indexmap::IndexMap;
use rowbase_core::{
    driver::{
        operation::{Execute, Query, Transaction},
        Connection, Driver,
    },
    sql::{rewrite_placeholders, Ident},
    stmt::{Row, Value},
    ConnectOptions, Error, Result, TableSchema,
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use std::sync::Arc;

/// Shared state between all `Db` clones.
pub(crate) struct Shared {
    /// Reflected schemas, keyed by model name
    schemas: IndexMap<String, Arc<TableSchema>>,

    /// `None` until `init_pool`, and again after `close`
    pool: RwLock<Option<Pool>>,

    row_count_policy: RowCountPolicy,
}

/// A database handle: the registered schemas plus the connection pool.
///
/// Cloning is cheap and clones share the pool.
#[derive(Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

/// What a write does when it does not affect exactly one row.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RowCountPolicy {
    /// Log a warning and report success.
    #[default]
    Warn,

    /// Fail with a condition-failed error.
    Strict,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Creates the connection pool.
    ///
    /// A handle owns at most one pool: initializing again closes the previous
    /// pool once the new one is ready.
    pub async fn init_pool(&self, driver: impl Driver, options: &ConnectOptions) -> Result<()> {
        options.validate()?;

        info!(
            host = %options.host,
            port = options.port,
            db = options.db.as_deref(),
            minsize = options.minsize,
            maxsize = options.maxsize,
            "create database connection pool..."
        );

        let pool = Pool::new(driver, options).await?;

        if let Some(previous) = self.shared.pool.write().await.replace(pool) {
            previous.close();
            info!("closed previous connection pool");
        }

        Ok(())
    }

    /// Creates the connection pool with the MySQL driver.
    #[cfg(feature = "mysql")]
    pub async fn connect(&self, options: &ConnectOptions) -> Result<()> {
        let driver = rowbase_driver_mysql::MySQL::new(options)?;
        self.init_pool(driver, options).await
    }

    /// Closes the connection pool. Statements issued afterwards fail until
    /// the pool is initialized again.
    pub async fn close(&self) {
        if let Some(pool) = self.shared.pool.write().await.take() {
            pool.close();
            info!("closed connection pool");
        }
    }

    /// Returns a handle to the current pool.
    pub async fn pool(&self) -> Result<Pool> {
        self.shared
            .pool
            .read()
            .await
            .clone()
            .ok_or_else(Error::pool_not_initialized)
    }

    pub fn row_count_policy(&self) -> RowCountPolicy {
        self.shared.row_count_policy
    }

    /// Returns the reflected schema of `M`.
    pub fn schema<M: Model>(&self) -> Result<&Arc<TableSchema>> {
        self.shared
            .schemas
            .get(M::NAME)
            .ok_or_else(|| Error::model_not_registered(M::NAME))
    }

    /// Iterates the reflected schemas in registration order.
    pub fn schemas(&self) -> impl Iterator<Item = &Arc<TableSchema>> + '_ {
        self.shared.schemas.values()
    }

    /// Runs a query and returns its rows, at most `limit` of them when given.
    /// A limit of zero fetches every row, like `None`.
    ///
    /// `sql` uses `?` placeholders; `args` are bound positionally.
    pub async fn select(&self, sql: &str, args: Vec<Value>, limit: Option<usize>) -> Result<Vec<Row>> {
        info!("SQL: {sql}");
        let limit = limit.filter(|&limit| limit > 0);

        let mut connection = self.pool().await?.get().await?;
        let sql = rewrite_placeholders(sql, connection.capability().placeholder).into_owned();

        let rows = connection
            .exec(
                Query {
                    sql,
                    params: args,
                    limit,
                }
                .into(),
            )
            .await?
            .rows
            .into_values()?;

        info!("rows returned: {}", rows.len());
        Ok(rows)
    }

    /// Runs a write statement and returns the affected-row count.
    ///
    /// Without `autocommit`, the statement runs in its own transaction, which
    /// is rolled back if any step fails.
    pub async fn execute(&self, sql: &str, args: Vec<Value>, autocommit: bool) -> Result<u64> {
        info!("SQL: {sql}");

        let mut connection = self.pool().await?.get().await?;
        let sql = rewrite_placeholders(sql, connection.capability().placeholder).into_owned();
        let op = Execute { sql, params: args };

        if autocommit {
            return exec_count(&mut connection, op).await;
        }

        let res = async {
            connection.exec(Transaction::Start.into()).await?;
            let count = exec_count(&mut connection, op).await?;
            connection.exec(Transaction::Commit.into()).await?;
            Ok::<_, Error>(count)
        }
        .await;

        match res {
            Ok(count) => Ok(count),
            Err(err) => {
                connection.exec(Transaction::Rollback.into()).await?;
                Err(err)
            }
        }
    }

    /// Loads the record of `M` with the given primary key.
    pub async fn find<M: Model>(&self, pk: Value) -> Result<Option<M>> {
        let schema = self.schema::<M>()?;
        let sql = format!(
            "{} where {}=?",
            schema.templates.select,
            Ident(schema.primary_key_column())
        );

        let rows = self.select(&sql, vec![pk], Some(1)).await?;
        Ok(rows.into_iter().next().map(load::<M>))
    }

    /// Loads every record of `M` matching `query`.
    pub async fn find_all<M: Model>(&self, query: FindAll) -> Result<Vec<M>> {
        let schema = self.schema::<M>()?;
        let (sql, args) = query.build(&schema.templates.select)?;

        let rows = self.select(&sql, args, None).await?;
        Ok(rows.into_iter().map(load::<M>).collect())
    }

    /// Evaluates one aggregate expression, such as `count(id)`, over the
    /// table of `M`. Returns `None` when the query yields no row.
    pub async fn find_number<M: Model>(
        &self,
        select: &str,
        filter: Option<&str>,
        args: Vec<Value>,
    ) -> Result<Option<Value>> {
        let schema = self.schema::<M>()?;
        let mut sql = format!("select {select} _num_ from {}", Ident(&schema.table));

        if let Some(filter) = filter {
            sql.push_str(" where ");
            sql.push_str(filter);
        }

        let rows = self.select(&sql, args, Some(1)).await?;
        Ok(rows
            .into_iter()
            .next()
            .map(|mut row| row.shift_remove("_num_").unwrap_or_default()))
    }

    /// Inserts `model`, first filling unset attributes with their defaults.
    pub async fn save<M: Model>(&self, model: &mut M) -> Result<()> {
        let schema = self.schema::<M>()?;
        let record = model.as_record_mut();

        let mut args = Vec::with_capacity(schema.mappings.len());
        for attr in &schema.fields {
            args.push(record.get_or_default(attr, &schema.mappings[attr]));
        }
        args.push(record.get_or_default(&schema.primary_key, schema.primary_key_field()));

        let rows = self.execute(&schema.templates.insert, args, true).await?;
        self.check_affected(schema, rows, "failed to insert record")
    }

    /// Writes every attribute of `model` to the row with its primary key.
    ///
    /// A model without non-key fields has nothing to write, so no statement
    /// is issued.
    pub async fn update<M: Model>(&self, model: &M) -> Result<()> {
        let schema = self.schema::<M>()?;
        let record = model.as_record();

        if schema.fields.is_empty() {
            debug!(model = %schema.name, "no fields to update");
            return Ok(());
        }

        let args = schema
            .fields
            .iter()
            .chain(std::iter::once(&schema.primary_key))
            .map(|attr| record.value(attr))
            .collect();

        let rows = self.execute(&schema.templates.update, args, true).await?;
        self.check_affected(schema, rows, "failed to update by primary key")
    }

    /// Deletes the row with `model`'s primary key.
    pub async fn remove<M: Model>(&self, model: &M) -> Result<()> {
        let schema = self.schema::<M>()?;
        let args = vec![model.as_record().value(&schema.primary_key)];

        let rows = self.execute(&schema.templates.delete, args, true).await?;
        self.check_affected(schema, rows, "failed to remove by primary key")
    }

    fn check_affected(&self, schema: &TableSchema, rows: u64, message: &str) -> Result<()> {
        if rows == 1 {
            return Ok(());
        }

        match self.shared.row_count_policy {
            RowCountPolicy::Warn => {
                warn!(model = %schema.name, "{message}: affected rows: {rows}");
                Ok(())
            }
            RowCountPolicy::Strict => Err(Error::condition_failed(format!(
                "{message}: affected rows: {rows} (model: {})",
                schema.name
            ))),
        }
    }
}

async fn exec_count(connection: &mut Box<dyn Connection>, op: Execute) -> Result<u64> {
    let count = connection.exec(op.into()).await?.rows.into_count()?;
    info!("affected rows: {count}");
    Ok(count)
}

fn load<M: Model>(row: Row) -> M {
    M::from_record(Record::from(row))
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("models", &self.shared.schemas.keys().collect::<Vec<_>>())
            .field("row_count_policy", &self.shared.row_count_policy)
            .finish_non_exhaustive()
    }
}
