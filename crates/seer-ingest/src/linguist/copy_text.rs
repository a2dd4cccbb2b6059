//! PostgreSQL `COPY ... FROM STDIN` text-format encoding
//!
//! One line per row, fields separated by tabs, `\N` for NULL. Backslash, tab,
//! newline and carriage return inside a value are backslash-escaped. Arrays
//! are written as quoted array literals, then escaped like any other value.

use std::fmt::Write as _;

use super::models::{CatalogRow, Nullable};

/// A single field value as it goes over the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyValue<'a> {
    Null,
    Int(i32),
    Bool(bool),
    Text(&'a str),
    TextArray(&'a [String]),
}

impl<'a> From<&'a Nullable<String>> for CopyValue<'a> {
    fn from(value: &'a Nullable<String>) -> Self {
        value
            .as_option()
            .map_or(CopyValue::Null, |v| CopyValue::Text(v.as_str()))
    }
}

impl<'a> From<&'a Option<Vec<String>>> for CopyValue<'a> {
    fn from(value: &'a Option<Vec<String>>) -> Self {
        value
            .as_deref()
            .map_or(CopyValue::Null, CopyValue::TextArray)
    }
}

impl CatalogRow {
    /// Field values in [`LANGUAGE_COLUMNS`](super::models::LANGUAGE_COLUMNS) order
    pub fn copy_values(&self) -> [CopyValue<'_>; 16] {
        [
            CopyValue::Int(self.id),
            CopyValue::Text(&self.name),
            (&self.fs_name).into(),
            self.category
                .as_option()
                .map_or(CopyValue::Null, |t| CopyValue::Text(t.as_str())),
            (&self.aliases).into(),
            (&self.ace_mode).into(),
            (&self.codemirror_mode).into(),
            (&self.codemirror_mime_type).into(),
            self.wrap
                .as_option()
                .map_or(CopyValue::Null, |w| CopyValue::Bool(*w)),
            (&self.extensions).into(),
            (&self.filenames).into(),
            (&self.interpreters).into(),
            CopyValue::Int(self.language_id),
            (&self.color).into(),
            (&self.tm_scope).into(),
            (&self.group).into(),
        ]
    }
}

/// Append one encoded row, including its trailing newline, to `out`
pub fn encode_row(row: &CatalogRow, out: &mut String) {
    for (position, value) in row.copy_values().iter().enumerate() {
        if position > 0 {
            out.push('\t');
        }
        encode_value(value, out);
    }
    out.push('\n');
}

fn encode_value(value: &CopyValue<'_>, out: &mut String) {
    match value {
        CopyValue::Null => out.push_str("\\N"),
        CopyValue::Int(n) => {
            let _ = write!(out, "{}", n);
        }
        CopyValue::Bool(b) => out.push(if *b { 't' } else { 'f' }),
        CopyValue::Text(s) => escape_into(s, out),
        CopyValue::TextArray(items) => escape_into(&array_literal(items), out),
    }
}

/// `{"a","b"}` with every element quoted, so empty strings, commas, braces
/// and the word NULL survive as plain text
fn array_literal(items: &[String]) -> String {
    let mut literal = String::from("{");
    for (position, item) in items.iter().enumerate() {
        if position > 0 {
            literal.push(',');
        }
        literal.push('"');
        for c in item.chars() {
            if c == '"' || c == '\\' {
                literal.push('\\');
            }
            literal.push(c);
        }
        literal.push('"');
    }
    literal.push('}');
    literal
}

fn escape_into(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
}

/// Double-quote an identifier; `type` and `group` are keywords
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// `COPY "table" ("col", ...) FROM STDIN`
pub fn copy_statement(table: &str, columns: &[&str]) -> String {
    let columns = columns
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ");
    format!("COPY {} ({}) FROM STDIN", quote_ident(table), columns)
}
