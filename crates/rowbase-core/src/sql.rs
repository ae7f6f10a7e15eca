//! SQL text helpers shared by the schema templates and the drivers.

use std::{borrow::Cow, fmt};

/// A backtick-quoted SQL identifier.
pub struct Ident<S>(pub S);

impl<S: AsRef<str>> fmt::Display for Ident<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("`")?;
        for c in self.0.as_ref().chars() {
            if c == '`' {
                f.write_str("``")?;
            } else {
                write!(f, "{c}")?;
            }
        }
        f.write_str("`")
    }
}

/// Joins displayable items with `", "`.
pub struct Comma<I>(pub I);

impl<I> fmt::Display for Comma<I>
where
    I: IntoIterator + Clone,
    I::Item: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.clone().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

/// Returns `n` portable placeholders separated by commas: `?, ?, ?`.
pub fn placeholders(n: usize) -> String {
    Comma(std::iter::repeat("?").take(n)).to_string()
}

/// Parameter marker syntax expected by a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `?`, used by MySQL.
    QuestionMark,

    /// `$1`, `$2`, ..., used by PostgreSQL.
    Dollar,

    /// `?1`, `?2`, ..., numbered SQLite parameters.
    NumberedQuestionMark,
}

/// Rewrites every portable `?` placeholder into the driver's native marker.
///
/// Question marks inside quoted string literals and quoted identifiers are
/// left untouched.
pub fn rewrite_placeholders(sql: &str, placeholder: Placeholder) -> Cow<'_, str> {
    if placeholder == Placeholder::QuestionMark || !sql.contains('?') {
        return Cow::Borrowed(sql);
    }

    let mut out = String::with_capacity(sql.len() + 8);
    let mut quote: Option<char> = None;
    let mut index = 0;

    for c in sql.chars() {
        match quote {
            Some(q) => {
                // A doubled quote re-enters the quoted state on the next char.
                if c == q {
                    quote = None;
                }
                out.push(c);
            }
            None => match c {
                '\'' | '"' | '`' => {
                    quote = Some(c);
                    out.push(c);
                }
                '?' => {
                    index += 1;
                    match placeholder {
                        Placeholder::QuestionMark => out.push('?'),
                        Placeholder::Dollar => {
                            out.push('$');
                            out.push_str(&index.to_string());
                        }
                        Placeholder::NumberedQuestionMark => {
                            out.push('?');
                            out.push_str(&index.to_string());
                        }
                    }
                }
                _ => out.push(c),
            },
        }
    }

    Cow::Owned(out)
}
