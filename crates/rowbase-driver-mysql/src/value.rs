use mysql_async::{
    consts::{ColumnFlags, ColumnType},
    Column, Value as MyValue,
};
use rowbase_core::{
    err,
    stmt::{Row, Value},
    Result,
};

/// Converts a rowbase value into a bound MySQL parameter.
pub(crate) fn to_mysql(value: Value) -> Result<MyValue> {
    Ok(match value {
        Value::Bool(value) => MyValue::Int(i64::from(value)),
        Value::I64(value) => MyValue::Int(value),
        Value::U64(value) => MyValue::UInt(value),
        Value::F64(value) => MyValue::Double(value),
        Value::String(value) => MyValue::Bytes(value.into_bytes()),
        Value::Bytes(value) => MyValue::Bytes(value),
        Value::Null => MyValue::NULL,
        Value::List(items) => {
            return Err(err!(
                "cannot bind a list of {} values as one parameter",
                items.len()
            ))
        }
    })
}

/// Converts a fetched row into a column-name keyed map.
pub(crate) fn load_row(mut row: mysql_async::Row) -> Row {
    let columns = row.columns();
    let mut loaded = Row::with_capacity(columns.len());

    for (index, column) in columns.iter().enumerate() {
        let value = row.take::<MyValue, usize>(index).unwrap_or(MyValue::NULL);
        loaded.insert(column.name_str().into_owned(), from_mysql(column, value));
    }

    loaded
}

fn from_mysql(column: &Column, value: MyValue) -> Value {
    // MySQL has no boolean type; `boolean` columns are `tinyint(1)`.
    let is_bool =
        column.column_type() == ColumnType::MYSQL_TYPE_TINY && column.column_length() == 1;

    match value {
        MyValue::NULL => Value::Null,
        MyValue::Int(value) if is_bool => Value::Bool(value != 0),
        MyValue::UInt(value) if is_bool => Value::Bool(value != 0),
        MyValue::Int(value) => Value::I64(value),
        MyValue::UInt(value) => Value::U64(value),
        MyValue::Float(value) => Value::F64(f64::from(value)),
        MyValue::Double(value) => Value::F64(value),
        MyValue::Bytes(bytes) if column.flags().contains(ColumnFlags::BINARY_FLAG)
            && column.character_set() == BINARY_CHARSET =>
        {
            Value::Bytes(bytes)
        }
        MyValue::Bytes(bytes) => match String::from_utf8(bytes) {
            Ok(text) => Value::String(text),
            Err(err) => Value::Bytes(err.into_bytes()),
        },
        MyValue::Date(year, month, day, hour, minute, second, micros) => {
            let mut text = format!(
                "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
            );
            if micros > 0 {
                text.push_str(&format!(".{micros:06}"));
            }
            Value::String(text)
        }
        MyValue::Time(negative, days, hours, minutes, seconds, micros) => {
            let hours = u32::from(hours) + days * 24;
            let mut text = format!(
                "{}{hours:02}:{minutes:02}:{seconds:02}",
                if negative { "-" } else { "" }
            );
            if micros > 0 {
                text.push_str(&format!(".{micros:06}"));
            }
            Value::String(text)
        }
    }
}

/// Collation id of the `binary` character set.
const BINARY_CHARSET: u16 = 63;
