//! Reading the `;`-delimited product report into header-keyed rows.

use std::collections::HashMap;
use std::path::Path;

use crate::error::IngestError;

/// One source row keyed by column header. A missing key means the row was
/// shorter than the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    /// Builds a record from `(header, value)` pairs. Later duplicates win.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields.get(header).map(String::as_str)
    }
}

/// Reads and parses the report at `path`.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, since
/// legacy exports occasionally mix encodings.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if the file cannot be read and
/// [`IngestError::Csv`] if the content is not a parseable table.
pub fn read_table(path: &Path) -> Result<Vec<RawRecord>, IngestError> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_table(&String::from_utf8_lossy(&bytes))
}

/// Parses report text: first row is the header, `;` separates cells, cells are
/// trimmed, blank lines are skipped and a leading byte-order mark is ignored.
/// A line of bare delimiters is kept as a row of empty cells.
///
/// # Errors
///
/// - [`IngestError::UnclosedQuote`] if a quoted cell runs to the end of input.
/// - [`IngestError::RecordLength`] if a row has more or fewer cells than the header.
/// - [`IngestError::Csv`] if the header or a row cannot be decoded.
pub fn parse_table(content: &str) -> Result<Vec<RawRecord>, IngestError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    if let Some(line) = unclosed_quote_line(content) {
        return Err(IngestError::UnclosedQuote { line });
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() == 1 && record.get(0).is_some_and(str::is_empty) {
            continue;
        }
        if record.len() != headers.len() {
            return Err(IngestError::RecordLength {
                line: record.position().map_or(0, csv::Position::line),
                expected: headers.len(),
                found: record.len(),
            });
        }
        rows.push(RawRecord::from_pairs(headers.iter().zip(record.iter())));
    }

    tracing::debug!(
        columns = headers.len(),
        rows = rows.len(),
        "parsed product table"
    );

    Ok(rows)
}

/// Returns the 1-based line where a quoted cell opens and never closes.
///
/// Follows the reader's quoting rules: a quote opens a quoted cell only at the
/// start of a cell, `""` inside it is an escaped quote, and quotes in the
/// middle of an unquoted cell are literal.
fn unclosed_quote_line(content: &str) -> Option<u64> {
    #[derive(Clone, Copy)]
    enum State {
        CellStart,
        Unquoted,
        Quoted,
        QuoteInQuoted,
    }

    let mut state = State::CellStart;
    let mut line = 1u64;
    let mut opened_at = 0u64;

    for c in content.chars() {
        state = match (state, c) {
            (State::CellStart, '"') => {
                opened_at = line;
                State::Quoted
            }
            (State::Quoted, '"') => State::QuoteInQuoted,
            (State::Quoted, _) | (State::QuoteInQuoted, '"') => State::Quoted,
            (_, ';' | '\n' | '\r') => State::CellStart,
            _ => State::Unquoted,
        };
        if c == '\n' {
            line += 1;
        }
    }

    matches!(state, State::Quoted).then_some(opened_at)
}
