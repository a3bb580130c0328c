// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Ordered lists of parameterized statements.
//!
//! Serializers append statements with numbered placeholders (`?1`, `?2`, ..)
//! to a [`Script`]. The script is executed in a single transaction, and can be
//! rendered with its parameters inlined for inspection.

use rusqlite::params_from_iter;
use rusqlite::types::Value as SqlValue;
use tracing::debug;

use crate::connection::OptDb;
use crate::error::Result;

/// One statement and the values bound to its placeholders.
#[derive(Debug, Clone, PartialEq)]
struct Statement {
    sql: &'static str,
    params: Vec<SqlValue>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    statements: Vec<Statement>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<I>(&mut self, sql: &'static str, params: I)
    where
        I: IntoIterator,
        I::Item: Into<SqlValue>,
    {
        self.statements.push(Statement {
            sql,
            params: params.into_iter().map(Into::into).collect(),
        });
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Run every statement inside one transaction.
    ///
    /// Returns the number of rows changed. Nothing is committed if any
    /// statement fails.
    pub fn execute(&self, db: &mut OptDb) -> Result<usize> {
        let tx = db.conn.transaction()?;
        let mut changed = 0;
        for statement in &self.statements {
            let mut stmt = tx.prepare_cached(statement.sql)?;
            changed += stmt.execute(params_from_iter(statement.params.iter()))?;
        }
        tx.commit()?;
        debug!(
            "executed {} statements, {} rows changed",
            self.statements.len(),
            changed
        );
        Ok(changed)
    }

    /// The script as plain SQL text with every parameter inlined.
    ///
    /// The output is itself an executable script.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for statement in &self.statements {
            out.push_str(&inline_params(statement.sql, &statement.params));
            out.push_str(";\n\n");
        }
        out
    }
}

/// Replace `?N` placeholders outside of quoted text with literals.
fn inline_params(sql: &str, params: &[SqlValue]) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut chars = sql.trim().chars().peekable();
    let mut quoted = false;
    while let Some(c) = chars.next() {
        if c == '\'' {
            quoted = !quoted;
        }
        if c != '?' || quoted {
            out.push(c);
            continue;
        }
        let mut digits = String::new();
        while let Some(d) = chars.next_if(char::is_ascii_digit) {
            digits.push(d);
        }
        match digits.parse::<usize>().ok().and_then(|n| params.get(n.wrapping_sub(1))) {
            Some(value) => out.push_str(&literal(value)),
            None => {
                out.push('?');
                out.push_str(&digits);
            }
        }
    }
    out
}

/// An SQL literal for a bound value.
pub fn literal(value: &SqlValue) -> String {
    match value {
        SqlValue::Null => "NULL".to_owned(),
        SqlValue::Integer(i) => i.to_string(),
        SqlValue::Real(r) if r.is_nan() => "NULL".to_owned(),
        SqlValue::Real(r) if r.is_infinite() => {
            if *r > 0.0 { "9e999" } else { "-9e999" }.to_owned()
        }
        SqlValue::Real(r) => format!("{r:?}"),
        SqlValue::Text(s) => quote_text(s),
        SqlValue::Blob(bytes) => format!("X'{}'", hex::encode(bytes)),
    }
}

/// A text parameter.
pub fn text(s: &str) -> SqlValue {
    SqlValue::Text(s.to_owned())
}

/// Quote text as an SQL string literal, doubling embedded quotes.
pub fn quote_text(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::null(SqlValue::Null, "NULL")]
    #[case::int(SqlValue::Integer(-3), "-3")]
    #[case::real(SqlValue::Real(2.0), "2.0")]
    #[case::tiny(SqlValue::Real(1e-7), "1e-7")]
    #[case::nan(SqlValue::Real(f64::NAN), "NULL")]
    #[case::inf(SqlValue::Real(f64::NEG_INFINITY), "-9e999")]
    #[case::text(SqlValue::Text("b's".into()), "'b''s'")]
    #[case::blob(SqlValue::Blob(vec![0xde, 0xad]), "X'dead'")]
    fn test_literal(#[case] value: SqlValue, #[case] expected: &str) {
        assert_eq!(literal(&value), expected);
    }

    #[test]
    fn test_render_inlines_numbered_params() {
        let mut script = Script::new();
        script.push(
            "INSERT INTO t (a, b, c) VALUES (?2, ?1, '?1')",
            [text("x"), SqlValue::Integer(7)],
        );
        assert_eq!(script.render(), "INSERT INTO t (a, b, c) VALUES (7, 'x', '?1');\n\n");
    }

    #[test]
    fn test_execute_is_atomic() {
        let mut db = OptDb::open_memory().unwrap();
        let mut script = Script::new();
        script.push(
            "INSERT INTO files (file_location, md5_checksum, file_kind, file_type) VALUES (?1, ?2, ?3, ?4)",
            ["a", "0", "model", ".toml"].map(text),
        );
        script.push("INSERT INTO no_such_table VALUES (?1)", [SqlValue::Integer(1)]);
        assert!(script.execute(&mut db).is_err());
        assert_eq!(db.count_rows("files").unwrap(), 0);
    }
}
