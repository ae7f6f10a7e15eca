mod field;
pub use field::{Field, FieldDefault};

mod table;
pub use table::{TableSchema, Templates};
