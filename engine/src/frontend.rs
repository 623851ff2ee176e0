//! Pluggable front ends that cut normalized output into raw records.
//!
//! Built-in layouts map to [`KeyValueFrontend`] and [`SparseTableFrontend`].
//! Converters whose output fits neither (a single `uptime` line, `schtasks`
//! folder blocks) implement [`Frontend`] themselves.

use command_output_core::{ConverterSpec, Layout, RawRecord};

use crate::error::{EngineError, Result};
use crate::normalize::is_separator_line;
use crate::records::{KeyValueConfig, KeyValueScanner};
use crate::table::SparseTable;

/// Strategy for turning normalized output text into raw records.
///
/// Implementations must be pure: the same text always yields the same
/// records, and unrecognizable text yields an empty list, never a panic.
pub trait Frontend: Send + Sync {
    fn name(&self) -> &'static str;
    fn records(&self, text: &str) -> Vec<RawRecord>;
}

/// Selects the built-in front end for a converter layout.
///
/// # Errors
///
/// Returns [`EngineError::CustomLayout`] for [`Layout::Custom`], which needs
/// a front end supplied in code.
pub fn builtin_frontend(spec: &ConverterSpec) -> Result<Box<dyn Frontend>> {
    match &spec.layout {
        Layout::KeyValue {
            delimiter,
            primary_key,
        } => {
            let mut config = KeyValueConfig::new(delimiter, primary_key);
            if let Some(rule) = spec.continuation_field() {
                config = config.with_continuation(&rule.name);
            }
            Ok(Box::new(KeyValueFrontend { config }))
        }
        Layout::SparseTable { blank_line_blocks } => Ok(Box::new(SparseTableFrontend {
            blank_line_blocks: *blank_line_blocks,
        })),
        Layout::Custom { frontend } => Err(EngineError::CustomLayout(frontend.clone())),
    }
}

/// `Field: value` records split by primary-key boundaries.
#[derive(Debug, Clone)]
pub struct KeyValueFrontend {
    pub config: KeyValueConfig,
}

impl Frontend for KeyValueFrontend {
    fn name(&self) -> &'static str {
        "key_value"
    }

    fn records(&self, text: &str) -> Vec<RawRecord> {
        KeyValueScanner::new(&self.config, text.lines()).collect()
    }
}

/// Header + rows tables, optionally one table per blank-line block.
#[derive(Debug, Clone, Copy, Default)]
pub struct SparseTableFrontend {
    pub blank_line_blocks: bool,
}

impl SparseTableFrontend {
    fn parse_block<'l>(lines: impl IntoIterator<Item = &'l str>) -> Vec<RawRecord> {
        let mut lines = lines
            .into_iter()
            .filter(|line| !line.trim().is_empty() && !is_separator_line(line));
        let Some(header) = lines.next() else {
            return Vec::new();
        };
        SparseTable::from_header(header).parse_rows(lines)
    }
}

impl Frontend for SparseTableFrontend {
    fn name(&self) -> &'static str {
        "sparse_table"
    }

    fn records(&self, text: &str) -> Vec<RawRecord> {
        if !self.blank_line_blocks {
            return Self::parse_block(text.lines());
        }
        blank_line_blocks(text)
            .into_iter()
            .flat_map(Self::parse_block)
            .collect()
    }
}

/// Splits text into groups of consecutive non-blank lines.
pub fn blank_line_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(line);
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

#[cfg(test)]
mod tests {
    use command_output_core::FieldRule;

    use super::*;

    #[test]
    fn test_builtin_frontend_for_layouts() {
        let spec = ConverterSpec::new("kv")
            .with_layout(Layout::key_value(": ", "name"))
            .with_field(FieldRule::continuation("description"));
        assert_eq!(builtin_frontend(&spec).unwrap().name(), "key_value");

        let spec = ConverterSpec::new("table");
        assert_eq!(builtin_frontend(&spec).unwrap().name(), "sparse_table");

        let spec = ConverterSpec::new("custom").with_layout(Layout::custom("uptime"));
        assert!(matches!(
            builtin_frontend(&spec),
            Err(EngineError::CustomLayout(name)) if name == "uptime"
        ));
    }

    #[test]
    fn test_sparse_table_skips_separator_rows() {
        let text = "NAME   AGE\n====   ===\nBob    30\nAmy    41\n";
        let records = SparseTableFrontend::default().records(text);

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("name").map(String::as_str), Some("Amy"));
    }

    #[test]
    fn test_sparse_table_blank_line_blocks_use_own_headers() {
        let text = "A   B\n1   2\n\nX       Y\n7       8\n";
        let frontend = SparseTableFrontend {
            blank_line_blocks: true,
        };
        let records = frontend.records(text);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("b").map(String::as_str), Some("2"));
        assert_eq!(records[1].get("y").map(String::as_str), Some("8"));
    }

    #[test]
    fn test_blank_line_blocks() {
        let blocks = blank_line_blocks("\n\na\nb\n   \n\nc\n");
        assert_eq!(blocks, vec![vec!["a", "b"], vec!["c"]]);
    }
}
