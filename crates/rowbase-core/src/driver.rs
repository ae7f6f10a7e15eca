mod capability;
pub use capability::Capability;

mod response;
pub use response::{Response, Rows};

pub mod operation;
pub use operation::Operation;

use crate::async_trait;

use std::fmt::Debug;

/// Opens connections to a database. Pools call [`Driver::connect`] whenever
/// they need a new connection.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Describes the driver's SQL dialect.
    fn capability(&self) -> &'static Capability;

    /// Opens a new connection.
    async fn connect(&self) -> crate::Result<Box<dyn Connection>>;
}

/// A single, exclusively owned database connection.
#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// Describes the connection's SQL dialect.
    fn capability(&self) -> &'static Capability;

    /// Execute a database operation
    async fn exec(&mut self, op: Operation) -> crate::Result<Response>;
}
