use rowbase_core::{stmt::Value, Error, Result};

/// Options of a [`Model::find_all`](crate::Model::find_all) query.
///
/// ```
/// # use rowbase::FindAll;
/// let query = FindAll::new()
///     .filter("`user_id`=?")
///     .arg("u1")
///     .order_by("`created_at` desc")
///     .limit((0, 10));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FindAll {
    filter: Option<String>,
    args: Vec<Value>,
    order_by: Option<String>,
    limit: Option<Value>,
}

impl FindAll {
    pub fn new() -> FindAll {
        FindAll::default()
    }

    /// Raw SQL condition appended after `where`.
    pub fn filter(mut self, clause: impl Into<String>) -> FindAll {
        self.filter = Some(clause.into());
        self
    }

    pub fn arg(mut self, value: impl Into<Value>) -> FindAll {
        self.args.push(value.into());
        self
    }

    pub fn args<I>(mut self, values: I) -> FindAll
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.args.extend(values.into_iter().map(Into::into));
        self
    }

    /// Raw SQL appended after `order by`.
    pub fn order_by(mut self, clause: impl Into<String>) -> FindAll {
        self.order_by = Some(clause.into());
        self
    }

    /// Either a row count, or an `(offset, count)` pair.
    ///
    /// The shape is checked when the query runs.
    pub fn limit(mut self, limit: impl Into<Value>) -> FindAll {
        self.limit = Some(limit.into());
        self
    }

    /// Appends the clauses to `select` and returns the statement with its
    /// arguments.
    pub(crate) fn build(self, select: &str) -> Result<(String, Vec<Value>)> {
        let mut sql = String::from(select);
        let mut args = self.args;

        if let Some(filter) = &self.filter {
            sql.push_str(" where ");
            sql.push_str(filter);
        }

        if let Some(order_by) = &self.order_by {
            sql.push_str(" order by ");
            sql.push_str(order_by);
        }

        match self.limit {
            None => {}
            Some(limit) if is_row_count(&limit) => {
                sql.push_str(" limit ?");
                args.push(limit);
            }
            Some(Value::List(pair)) if pair.len() == 2 && pair.iter().all(is_row_count) => {
                sql.push_str(" limit ?, ?");
                args.extend(pair);
            }
            Some(limit) => return Err(Error::invalid_limit(limit.to_string())),
        }

        Ok((sql, args))
    }
}

fn is_row_count(value: &Value) -> bool {
    match value {
        Value::I64(value) => *value >= 0,
        Value::U64(_) => true,
        _ => false,
    }
}
