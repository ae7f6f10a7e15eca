use super::Operation;

use crate::stmt::Value;

#[derive(Debug, Clone)]
pub struct Query {
    /// SQL text, already using the driver's native placeholders
    pub sql: String,

    /// Positional parameters
    pub params: Vec<Value>,

    /// When set, stop fetching after this many rows
    pub limit: Option<usize>,
}

impl From<Query> for Operation {
    fn from(value: Query) -> Self {
        Self::Query(value)
    }
}
