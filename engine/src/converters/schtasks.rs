//! `schtasks` converter.
//!
//! Output is a sequence of blank-line separated blocks, one per task folder:
//!
//! ```text
//! Folder: \Microsoft\Windows\AppID
//! TaskName                                 Next Run Time          Status
//! ======================================== ====================== ===============
//! PolicyConverter                          N/A                    Disabled
//! ```
//!
//! Folders without visible tasks print an `INFO:` line instead of a table.
//! Every row carries the folder it was listed under.

use command_output_core::{ConverterSpec, FieldRule, Layout, Platform, RawRecord};
use tracing::trace;

use crate::converter::Converter;
use crate::error::Result;
use crate::frontend::{Frontend, blank_line_blocks};
use crate::normalize::is_separator_line;
use crate::table::{SparseTable, join_multiword_headers};

const FOLDER_PREFIX: &str = "Folder:";
const INFO_PREFIX: &str = "INFO:";
const HEADER_PREFIX: &str = "TaskName";

pub fn spec() -> ConverterSpec {
    ConverterSpec::new("schtasks")
        .with_description("`schtasks` command parser")
        .compatible_with(&[Platform::Win32])
        .with_magic_command("schtasks")
        .with_layout(Layout::custom("schtasks"))
        .with_field(FieldRule::plain("taskname"))
        .with_field(FieldRule::timestamp("next_run_time").with_prefix("next_run"))
        .with_field(FieldRule::plain("status"))
        .with_field(FieldRule::plain("folder"))
}

pub fn converter() -> Result<Converter> {
    Converter::with_frontend(spec(), Box::new(SchtasksFrontend))
}

/// Folder blocks, each with its own sparse table.
#[derive(Debug, Default, Clone, Copy)]
pub struct SchtasksFrontend;

impl SchtasksFrontend {
    fn parse_block(lines: &[&str]) -> Vec<RawRecord> {
        let mut folder: Option<String> = None;
        let mut table: Option<SparseTable> = None;
        let mut records = Vec::new();

        for line in lines {
            if let Some(name) = line.trim_start().strip_prefix(FOLDER_PREFIX) {
                folder = Some(name.trim().to_string());
                continue;
            }
            if line.trim_start().starts_with(INFO_PREFIX) || is_separator_line(line) {
                continue;
            }
            if line.trim_start().starts_with(HEADER_PREFIX) {
                table = Some(SparseTable::from_header(&join_multiword_headers(line)));
                continue;
            }

            let Some(table) = &table else {
                trace!(line, "Dropping schtasks row before header");
                continue;
            };
            let mut record = table.parse_row(line);
            if record.is_empty() {
                continue;
            }
            if let Some(folder) = &folder {
                record.insert("folder", folder.clone());
            }
            records.push(record);
        }

        records
    }
}

impl Frontend for SchtasksFrontend {
    fn name(&self) -> &'static str {
        "schtasks"
    }

    fn records(&self, text: &str) -> Vec<RawRecord> {
        blank_line_blocks(text)
            .iter()
            .flat_map(|block| Self::parse_block(block))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use command_output_core::Value;

    use super::*;

    const OUTPUT: &str = r"
Folder: \
TaskName                                 Next Run Time          Status
======================================== ====================== ===============
Adobe Acrobat Update Task                10/20/2026 10:00:00 AM Ready
OneDrive Standalone Update Task          N/A                    Disabled

Folder: \Microsoft
INFO: There are no scheduled tasks presently available at your access level.
";

    #[test]
    fn test_rows_carry_folder() {
        let records = SchtasksFrontend.records(OUTPUT);

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].keys().collect::<Vec<_>>(),
            vec!["taskname", "next_run_time", "status", "folder"]
        );
        assert_eq!(
            records[0].get("taskname").map(String::as_str),
            Some("Adobe Acrobat Update Task")
        );
        assert_eq!(records[1].get("folder").map(String::as_str), Some("\\"));
    }

    #[test]
    fn test_not_applicable_run_time_is_null() {
        let converter = converter().unwrap();
        let typed = converter.process(&converter.parse_raw(OUTPUT)).unwrap();

        assert!(typed[0].get("next_run_epoch").is_some_and(|v| !v.is_null()));
        assert_eq!(typed[0].get("next_run_epoch_utc"), Some(&Value::Null));
        assert_eq!(typed[1].get("next_run_time"), Some(&Value::from("N/A")));
        assert_eq!(typed[1].get("next_run_epoch"), Some(&Value::Null));
    }

    #[test]
    fn test_info_only_output_is_empty() {
        let text = "Folder: \\Microsoft\nINFO: There are no scheduled tasks presently available.\n";
        assert!(SchtasksFrontend.records(text).is_empty());
    }
}
