use super::Operation;

use crate::stmt::Value;

#[derive(Debug, Clone)]
pub struct Execute {
    /// SQL text, already using the driver's native placeholders
    pub sql: String,

    /// Positional parameters
    pub params: Vec<Value>,
}

impl From<Execute> for Operation {
    fn from(value: Execute) -> Self {
        Self::Execute(value)
    }
}
