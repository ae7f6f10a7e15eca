/// Builds a [`Row`](crate::stmt::Row) from `column => value` pairs, keeping
/// the given column order.
#[macro_export]
macro_rules! row {
    () => {
        $crate::stmt::Row::new()
    };
    (
        $( $column:expr => $value:expr ),+ $(,)?
    ) => {{
        let mut row = $crate::stmt::Row::new();
        $( row.insert(::std::string::String::from($column), $crate::stmt::Value::from($value)); )+
        row
    }};
}
