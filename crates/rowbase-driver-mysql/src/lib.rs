mod value;

use mysql_async::{prelude::Queryable, Conn, Opts, OptsBuilder, Params};
use rowbase_core::{
    async_trait,
    driver::{
        operation::{Execute, Query, Transaction},
        Capability, Driver, Operation, Response,
    },
    stmt::{Row, Value},
    ConnectOptions, Error, Result,
};
use tracing::debug;

/// Opens MySQL connections from [`ConnectOptions`].
#[derive(Debug, Clone)]
pub struct MySQL {
    opts: Opts,
}

impl MySQL {
    pub fn new(options: &ConnectOptions) -> Result<Self> {
        options.validate()?;

        let init = vec![
            format!("SET NAMES {}", options.charset),
            format!("SET autocommit={}", u8::from(options.autocommit)),
        ];

        let opts = OptsBuilder::default()
            .ip_or_hostname(options.host.clone())
            .tcp_port(options.port)
            .user(Some(options.required_user()?))
            .pass(Some(options.required_password()?))
            .db_name(Some(options.required_db()?))
            .init(init)
            // Report matched rows, so an update that rewrites identical values
            // still counts as one affected row.
            .client_found_rows(true);

        Ok(Self { opts: opts.into() })
    }

    pub fn from_url(url: &str) -> Result<Self> {
        Self::new(&ConnectOptions::from_url(url)?)
    }
}

#[async_trait]
impl Driver for MySQL {
    fn capability(&self) -> &'static Capability {
        &Capability::MYSQL
    }

    async fn connect(&self) -> Result<Box<dyn rowbase_core::Connection>> {
        let conn = Conn::new(self.opts.clone()).await.map_err(Error::driver)?;
        debug!(id = conn.id(), "opened mysql connection");
        Ok(Box::new(Connection::new(conn)))
    }
}

#[derive(Debug)]
pub struct Connection {
    conn: Conn,
}

impl Connection {
    pub fn new(conn: Conn) -> Self {
        Self { conn }
    }

    async fn query(&mut self, op: Query) -> Result<Vec<Row>> {
        let params = params(op.params)?;
        let mut result = self
            .conn
            .exec_iter(op.sql.as_str(), params)
            .await
            .map_err(Error::driver)?;

        let mut rows = Vec::new();
        while op.limit.map_or(true, |limit| rows.len() < limit) {
            let Some(row) = result.next().await.map_err(Error::driver)? else {
                break;
            };
            rows.push(value::load_row(row));
        }

        // Discard whatever the limit left unread.
        result.drop_result().await.map_err(Error::driver)?;
        Ok(rows)
    }

    async fn execute(&mut self, op: Execute) -> Result<u64> {
        let params = params(op.params)?;
        let result = self
            .conn
            .exec_iter(op.sql.as_str(), params)
            .await
            .map_err(Error::driver)?;

        let count = result.affected_rows();
        result.drop_result().await.map_err(Error::driver)?;
        Ok(count)
    }

    async fn transaction(&mut self, op: Transaction) -> Result<()> {
        let sql = match op {
            Transaction::Start => Capability::MYSQL.begin,
            Transaction::Commit => "COMMIT",
            Transaction::Rollback => "ROLLBACK",
        };
        self.conn.query_drop(sql).await.map_err(Error::driver)
    }
}

impl From<Conn> for Connection {
    fn from(conn: Conn) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl rowbase_core::Connection for Connection {
    fn capability(&self) -> &'static Capability {
        &Capability::MYSQL
    }

    async fn exec(&mut self, op: Operation) -> Result<Response> {
        match op {
            Operation::Query(op) => self.query(op).await.map(Response::values),
            Operation::Execute(op) => self.execute(op).await.map(Response::count),
            Operation::Transaction(op) => {
                self.transaction(op).await?;
                Ok(Response::count(0))
            }
        }
    }
}

fn params(values: Vec<Value>) -> Result<Params> {
    if values.is_empty() {
        return Ok(Params::Empty);
    }

    values
        .into_iter()
        .map(value::to_mysql)
        .collect::<Result<Vec<_>>>()
        .map(Params::Positional)
}
