pub mod db;
pub use db::{Db, RowCountPolicy};

#[macro_use]
mod macros;

mod model;
pub use model::Model;

mod record;
pub use record::Record;

pub mod stmt;
pub use stmt::FindAll;

pub use rowbase_core::{
    bail, err, row,
    schema::{Field, FieldDefault, TableSchema},
    stmt::{Row, Value},
    ConnectOptions, Error, Result,
};

pub use async_trait::async_trait;

/// Drivers shipped with rowbase.
pub mod driver {
    pub use rowbase_core::driver::*;

    #[cfg(feature = "mysql")]
    pub use rowbase_driver_mysql::MySQL;
}
