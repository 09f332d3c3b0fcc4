//! Minimal CSV reading and writing
//!
//! Comma-separated, double-quote quoting, quotes escaped by doubling.
//! The reader is best-effort: malformed input degrades to whatever fields
//! can be extracted, it never fails. Only the underlying stream can fail.

use std::io::{Read, Write};

/// Parse an entire CSV stream into rows of fields
///
/// Handles quoted fields (including embedded commas, quotes and
/// newlines), `\r\n` line endings and a missing trailing newline. Rows
/// that are completely empty (blank lines) are dropped.
pub fn read_rows<R: Read>(mut source: R) -> std::io::Result<Vec<Vec<String>>> {
    let mut text = String::new();
    source.read_to_string(&mut text)?;

    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        // Doubled quote inside a quoted field
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => row.push(std::mem::take(&mut field)),
                '\r' => {
                    // Part of \r\n, or stray - either way not field content
                }
                '\n' => {
                    row.push(std::mem::take(&mut field));
                    push_row(&mut rows, std::mem::take(&mut row));
                }
                _ => field.push(c),
            }
        }
    }

    // Final row without trailing newline
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        push_row(&mut rows, row);
    }

    Ok(rows)
}

fn push_row(rows: &mut Vec<Vec<String>>, row: Vec<String>) {
    // A blank line parses as one empty field - drop it
    if row.len() == 1 && row[0].is_empty() {
        return;
    }
    rows.push(row);
}

/// Write one CSV row
///
/// Every field is double-quote wrapped, internal quotes are doubled and
/// embedded newlines are replaced with a space.
pub fn write_row<W: Write>(sink: &mut W, fields: &[&str]) -> std::io::Result<()> {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            sink.write_all(b",")?;
        }
        sink.write_all(b"\"")?;
        sink.write_all(escape_field(field).as_bytes())?;
        sink.write_all(b"\"")?;
    }
    sink.write_all(b"\n")?;
    Ok(())
}

fn escape_field(field: &str) -> String {
    field
        .replace('\r', " ")
        .replace('\n', " ")
        .replace('"', "\"\"")
}
