//! Sparse table parsing.
//!
//! Columnar output where rows are ragged or have empty cells cannot be cut
//! with fixed-width slices. Instead every whitespace-delimited token of a
//! row is assigned to the header column whose starting offset is the
//! closest one at or before the token's own offset. Tokens that land in the
//! same column merge into one value; columns that receive nothing are left
//! out of that row's record.
//!
//! Offsets are character columns, not byte positions.

use command_output_core::RawRecord;

use crate::normalize::normalize_field_name;

/// One header column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Normalized field name.
    pub name: String,
    /// Character offset where the header label starts.
    pub offset: usize,
}

/// A whitespace-delimited token with its character column and byte span.
#[derive(Debug, Clone, Copy)]
struct Token {
    column: usize,
    start: usize,
    end: usize,
}

fn tokenize(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current: Option<Token> = None;

    for (column, (byte_idx, ch)) in line.char_indices().enumerate() {
        if ch.is_whitespace() {
            if let Some(token) = current.take() {
                tokens.push(token);
            }
            continue;
        }
        match current.as_mut() {
            Some(token) => token.end = byte_idx + ch.len_utf8(),
            None => {
                current = Some(Token {
                    column,
                    start: byte_idx,
                    end: byte_idx + ch.len_utf8(),
                })
            }
        }
    }
    tokens.extend(current);
    tokens
}

/// Header-driven parser for sparse columnar rows.
///
/// # Examples
///
/// ```
/// use command_output_engine::table::SparseTable;
///
/// let table = SparseTable::from_header("NAME   AGE   CITY");
/// let row = table.parse_row("Bob    30");
///
/// assert_eq!(row.get("name").map(String::as_str), Some("Bob"));
/// assert_eq!(row.get("age").map(String::as_str), Some("30"));
/// assert!(!row.contains_key("city"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseTable {
    columns: Vec<Column>,
}

impl SparseTable {
    /// Derives columns from a header line by splitting on whitespace runs.
    pub fn from_header(header: &str) -> Self {
        let columns = tokenize(header)
            .into_iter()
            .map(|token| Column {
                name: normalize_field_name(&header[token.start..token.end]),
                offset: token.column,
            })
            .collect();
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Maps one data row onto the header columns.
    pub fn parse_row(&self, line: &str) -> RawRecord {
        let mut spans: Vec<Option<(usize, usize)>> = vec![None; self.columns.len()];

        for token in tokenize(line) {
            let Some(idx) = self.column_for(token.column) else {
                continue;
            };
            spans[idx] = Some(match spans[idx] {
                Some((start, _)) => (start, token.end),
                None => (token.start, token.end),
            });
        }

        self.columns
            .iter()
            .zip(spans)
            .filter_map(|(column, span)| {
                span.map(|(start, end)| (column.name.clone(), line[start..end].to_string()))
            })
            .collect()
    }

    /// Parses every non-empty row.
    pub fn parse_rows<'l>(&self, rows: impl IntoIterator<Item = &'l str>) -> Vec<RawRecord> {
        rows.into_iter()
            .filter(|row| !row.trim().is_empty())
            .map(|row| self.parse_row(row))
            .filter(|record| !record.is_empty())
            .collect()
    }

    /// Index of the last column starting at or before `offset`; tokens left
    /// of the first column belong to the first column.
    fn column_for(&self, offset: usize) -> Option<usize> {
        if self.columns.is_empty() {
            return None;
        }
        let idx = self
            .columns
            .partition_point(|column| column.offset <= offset);
        Some(idx.saturating_sub(1))
    }
}

/// Rewrites single spaces inside header labels as `_` so multi-word labels
/// survive whitespace splitting. Offsets are unchanged.
///
/// ```
/// use command_output_engine::table::join_multiword_headers;
///
/// assert_eq!(
///     join_multiword_headers("TaskName      Next Run Time   Status"),
///     "TaskName      Next_Run_Time   Status"
/// );
/// ```
pub fn join_multiword_headers(header: &str) -> String {
    let chars: Vec<char> = header.chars().collect();
    chars
        .iter()
        .enumerate()
        .map(|(idx, &ch)| {
            let inner_space = ch == ' '
                && idx > 0
                && chars.get(idx - 1).is_some_and(|c| !c.is_whitespace())
                && chars.get(idx + 1).is_some_and(|c| !c.is_whitespace());
            if inner_space { '_' } else { ch }
        })
        .collect()
}
