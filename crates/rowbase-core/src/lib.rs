#[macro_use]
mod macros;

mod config;
pub use config::ConnectOptions;

pub mod driver;
pub use driver::{Connection, Driver};

mod error;
pub use error::Error;

pub mod schema;
pub use schema::{Field, TableSchema};

pub mod sql;

pub mod stmt;
pub use stmt::{Row, Value};

/// A Result type alias that uses Rowbase's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
