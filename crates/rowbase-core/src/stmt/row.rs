use indexmap::IndexMap;

/// One result row, mapping column name to value in result-set column order.
pub type Row = IndexMap<String, super::Value>;
