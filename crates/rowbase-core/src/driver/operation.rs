mod execute;
pub use execute::Execute;

mod query;
pub use query::Query;

mod transaction;
pub use transaction::Transaction;

#[derive(Debug, Clone)]
pub enum Operation {
    /// Run a statement that returns rows
    Query(Query),

    /// Run a statement that modifies rows, returning the affected-row count
    Execute(Execute),

    /// Execute a transaction lifecycle op
    Transaction(Transaction),
}

impl Operation {
    /// Returns the SQL text carried by the operation, if any.
    pub fn sql(&self) -> Option<&str> {
        match self {
            Operation::Query(op) => Some(&op.sql),
            Operation::Execute(op) => Some(&op.sql),
            Operation::Transaction(_) => None,
        }
    }

    pub fn is_transaction(&self) -> bool {
        matches!(self, Operation::Transaction(_))
    }
}
