//! Evaluates the statement shapes rowbase generates against in-memory tables.
//!
//! Supported: the four schema templates, `find_all` clauses (`where` with
//! `and`-joined equality tests, `order by` one column, `limit ?` and
//! `limit ?, ?`), and `count(..) _num_` aggregates.

use indexmap::IndexMap;
use rowbase::{bail, Error, Result, Row, Value};

use std::{cmp::Ordering, io, vec};

pub(crate) type Tables = IndexMap<String, Vec<Row>>;

type Params = vec::IntoIter<Value>;

pub(crate) fn query(
    tables: &Tables,
    sql: &str,
    params: Vec<Value>,
    limit: Option<usize>,
) -> Result<Vec<Row>> {
    let sql = normalize(sql);
    let mut params = params.into_iter();

    let Some(rest) = sql.strip_prefix("select ") else {
        bail!("unsupported query: {sql}");
    };
    let Some((list, rest)) = rest.split_once(" from ") else {
        bail!("query has no `from`: {sql}");
    };
    let (table, rest) = split_ident(rest)?;
    let (rest, limit_clause) = split_clause(rest, " limit ");
    let (rest, order_clause) = split_clause(rest, " order by ");
    let (rest, where_clause) = split_clause(rest, " where ");

    if !rest.trim().is_empty() {
        bail!("unsupported query clause `{rest}`: {sql}");
    }

    let conditions = match where_clause {
        Some(clause) => conditions(clause, &mut params)?,
        None => vec![],
    };

    let mut rows: Vec<Row> = tables
        .get(&table)
        .into_iter()
        .flatten()
        .filter(|row| matches(row, &conditions))
        .cloned()
        .collect();

    if let Some(clause) = order_clause {
        let (column, rest) = split_ident(clause)?;
        let descending = match rest.trim() {
            "" | "asc" => false,
            "desc" => true,
            other => bail!("unsupported ordering `{other}`"),
        };

        rows.sort_by(|a, b| compare(a.get(&column), b.get(&column)));
        if descending {
            rows.reverse();
        }
    }

    if let Some(clause) = limit_clause {
        let (offset, count) = match clause.trim() {
            "?" => (0, count(next_param(&mut params)?)?),
            "?, ?" => {
                let offset = count(next_param(&mut params)?)?;
                (offset, count(next_param(&mut params)?)?)
            }
            other => bail!("unsupported limit `{other}`"),
        };
        rows = rows.into_iter().skip(offset).take(count).collect();
    }

    if params.len() > 0 {
        bail!("{} unused parameters: {sql}", params.len());
    }

    if let Some(expr) = list.strip_suffix(" _num_") {
        if !expr.starts_with("count(") {
            bail!("unsupported aggregate `{expr}`");
        }
        let mut row = Row::new();
        row.insert("_num_".to_string(), Value::I64(rows.len() as i64));
        return Ok(vec![row]);
    }

    let columns = list
        .split(", ")
        .map(|item| match item.split_once(" as ") {
            Some((column, alias)) => Ok((unquote(column)?, unquote(alias)?)),
            None => Ok((unquote(item)?, unquote(item)?)),
        })
        .collect::<Result<Vec<_>>>()?;

    let mut rows: Vec<Row> = rows
        .into_iter()
        .map(|row| {
            columns
                .iter()
                .map(|(column, alias)| {
                    (alias.clone(), row.get(column).cloned().unwrap_or_default())
                })
                .collect()
        })
        .collect();

    if let Some(limit) = limit {
        rows.truncate(limit);
    }

    Ok(rows)
}

pub(crate) fn execute(tables: &mut Tables, sql: &str, params: Vec<Value>) -> Result<u64> {
    let sql = normalize(sql);
    let mut params = params.into_iter();

    let count = if let Some(rest) = sql.strip_prefix("insert into ") {
        insert(tables, rest, &mut params)?
    } else if let Some(rest) = sql.strip_prefix("update ") {
        update(tables, rest, &mut params)?
    } else if let Some(rest) = sql.strip_prefix("delete from ") {
        delete(tables, rest, &mut params)?
    } else {
        bail!("unsupported statement: {sql}");
    };

    if params.len() > 0 {
        bail!("{} unused parameters: {sql}", params.len());
    }

    Ok(count)
}

fn insert(tables: &mut Tables, rest: &str, params: &mut Params) -> Result<u64> {
    let (table, rest) = split_ident(rest)?;
    let Some(rest) = rest.trim_start().strip_prefix('(') else {
        bail!("insert has no column list");
    };
    let Some((columns, values)) = rest.split_once(") values (") else {
        bail!("insert has no values");
    };

    let columns = columns
        .split(", ")
        .map(unquote)
        .collect::<Result<Vec<_>>>()?;

    if values.trim_end_matches(')').split(", ").count() != columns.len() {
        bail!("insert column and value counts differ");
    }

    let mut row = Row::new();
    for column in columns {
        row.insert(column, next_param(params)?);
    }

    let rows = tables.entry(table).or_default();

    // Templates list the primary key last.
    if let Some((key, value)) = row.last() {
        if rows.iter().any(|existing| existing.get(key).is_some_and(|v| same(v, value))) {
            return Err(Error::driver(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Duplicate entry '{value}' for key 'PRIMARY'"),
            )));
        }
    }

    rows.push(row);
    Ok(1)
}

fn update(tables: &mut Tables, rest: &str, params: &mut Params) -> Result<u64> {
    let (table, rest) = split_ident(rest)?;
    let Some(rest) = rest.trim_start().strip_prefix("set ") else {
        bail!("update has no `set`");
    };
    let (assignments, where_clause) = split_clause(rest, " where ");

    let assignments = assignments
        .split(", ")
        .map(|assignment| {
            let Some((column, "?")) = assignment.split_once('=') else {
                bail!("unsupported assignment `{assignment}`");
            };
            Ok((unquote(column)?, next_param(params)?))
        })
        .collect::<Result<Vec<_>>>()?;

    let conditions = match where_clause {
        Some(clause) => conditions(clause, params)?,
        None => vec![],
    };

    let mut count = 0;
    for row in tables.get_mut(&table).into_iter().flatten() {
        if matches(row, &conditions) {
            for (column, value) in &assignments {
                row.insert(column.clone(), value.clone());
            }
            count += 1;
        }
    }

    Ok(count)
}

fn delete(tables: &mut Tables, rest: &str, params: &mut Params) -> Result<u64> {
    let (table, rest) = split_ident(rest)?;
    let conditions = match rest.trim_start().strip_prefix("where ") {
        Some(clause) => conditions(clause, params)?,
        None => vec![],
    };

    let Some(rows) = tables.get_mut(&table) else {
        return Ok(0);
    };

    let before = rows.len();
    rows.retain(|row| !matches(row, &conditions));
    Ok((before - rows.len()) as u64)
}

fn conditions(clause: &str, params: &mut Params) -> Result<Vec<(String, Value)>> {
    clause
        .split(" and ")
        .map(|term| {
            let Some((column, "?")) = term.trim().split_once('=') else {
                bail!("unsupported condition `{term}`");
            };
            Ok((unquote(column)?, next_param(params)?))
        })
        .collect()
}

fn matches(row: &Row, conditions: &[(String, Value)]) -> bool {
    conditions
        .iter()
        .all(|(column, expected)| row.get(column).is_some_and(|value| same(value, expected)))
}

fn same(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::I64(a), Value::U64(b)) | (Value::U64(b), Value::I64(a)) => {
            u64::try_from(*a).is_ok_and(|a| a == *b)
        }
        _ => a == b,
    }
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::I64(a)), Some(Value::I64(b))) => a.cmp(b),
        (Some(Value::U64(a)), Some(Value::U64(b))) => a.cmp(b),
        (Some(Value::F64(a)), Some(Value::F64(b))) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn next_param(params: &mut Params) -> Result<Value> {
    match params.next() {
        Some(value) => Ok(value),
        None => bail!("not enough parameters"),
    }
}

fn count(value: Value) -> Result<usize> {
    match value {
        Value::I64(n) if n >= 0 => Ok(n as usize),
        Value::U64(n) => Ok(n as usize),
        other => bail!("limit parameter is not a row count: {other}"),
    }
}

/// Splits a leading backtick-quoted identifier off `s`.
fn split_ident(s: &str) -> Result<(String, &str)> {
    let s = s.trim_start();
    let Some(rest) = s.strip_prefix('`') else {
        bail!("expected a quoted identifier: {s}");
    };
    let Some(end) = rest.find('`') else {
        bail!("unterminated identifier: {s}");
    };
    Ok((rest[..end].to_string(), &rest[end + 1..]))
}

fn unquote(s: &str) -> Result<String> {
    let (ident, rest) = split_ident(s)?;
    if !rest.trim().is_empty() {
        bail!("unexpected text after identifier: {s}");
    }
    Ok(ident)
}

fn split_clause<'a>(s: &'a str, keyword: &str) -> (&'a str, Option<&'a str>) {
    match s.find(keyword) {
        Some(at) => (&s[..at], Some(&s[at + keyword.len()..])),
        None => (s, None),
    }
}

/// Turns numbered `$n` markers back into `?`.
fn normalize(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut chars = sql.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek().is_some_and(char::is_ascii_digit) {
            while chars.peek().is_some_and(char::is_ascii_digit) {
                chars.next();
            }
            out.push('?');
        } else {
            out.push(c);
        }
    }

    out
}
