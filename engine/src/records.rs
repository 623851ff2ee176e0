//! Key/value record scanning.
//!
//! Cuts `Field: value` style output (e.g. `rpm -qia`) into records. Two
//! pieces of state drive it:
//!
//! - **Record boundaries.** A line declaring the primary-key field opens a
//!   new record, unless its value equals the previous record's key value, in
//!   which case the line is a repeat of the same logical entry and the fields
//!   merge (later values win).
//! - **Continuation accumulation.** The continuation trigger field (e.g.
//!   `Description :`) switches on a buffer that captures every following
//!   line verbatim until the next record boundary; the buffer is then stored
//!   under the trigger's name, joined with single spaces.
//!
//! [`KeyValueScanner`] is a lazy iterator: a record is yielded only once it
//! is closed, either by the next boundary or by the end of input.

use command_output_core::RawRecord;
use tracing::trace;

use crate::normalize::normalize_field_name;

/// Static configuration of a [`KeyValueScanner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValueConfig {
    pub delimiter: String,
    /// Normalized name of the field that opens a record.
    pub primary_key: String,
    /// Normalized name of the continuation trigger field.
    pub continuation: Option<String>,
}

impl KeyValueConfig {
    pub fn new(delimiter: &str, primary_key: &str) -> Self {
        Self {
            delimiter: delimiter.to_string(),
            primary_key: primary_key.to_string(),
            continuation: None,
        }
    }

    pub fn with_continuation(mut self, field: &str) -> Self {
        self.continuation = Some(field.to_string());
        self
    }

    /// Splits a line on the first delimiter into a normalized field name and
    /// a trimmed value.
    pub fn split_field(&self, line: &str) -> Option<(String, String)> {
        let (name, value) = line.split_once(self.delimiter.as_str())?;
        let name = normalize_field_name(name);
        if name.is_empty() {
            return None;
        }
        Some((name, value.trim().to_string()))
    }

    /// Returns `true` if the line declares the continuation trigger, either
    /// with a value or as a bare `Name :` line.
    fn is_trigger(&self, line: &str, field: Option<&(String, String)>) -> bool {
        let Some(trigger) = &self.continuation else {
            return false;
        };
        if let Some((name, _)) = field {
            return name == trigger;
        }
        let bare_delimiter = self.delimiter.trim_end();
        !bare_delimiter.is_empty()
            && line
                .trim_end()
                .strip_suffix(bare_delimiter)
                .is_some_and(|name| normalize_field_name(name) == *trigger)
    }
}

/// Lazily yields records from key/value lines.
///
/// Empty lines are skipped. Lines without the delimiter are dropped unless
/// a continuation buffer is open.
///
/// # Examples
///
/// ```
/// use command_output_engine::records::{KeyValueConfig, KeyValueScanner};
///
/// let text = "\
/// Name    : make
/// Version : 3.82
/// Name    : bash
/// Version : 4.2";
///
/// let config = KeyValueConfig::new(": ", "name");
/// let records: Vec<_> = KeyValueScanner::new(&config, text.lines()).collect();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].get("version").map(String::as_str), Some("4.2"));
/// ```
pub struct KeyValueScanner<'a, I> {
    config: &'a KeyValueConfig,
    lines: I,
    last_primary: Option<String>,
    current: RawRecord,
    accumulating: bool,
    buffer: Vec<String>,
    finished: bool,
}

impl<'a, I> KeyValueScanner<'a, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    pub fn new(config: &'a KeyValueConfig, lines: I) -> Self {
        Self {
            config,
            lines,
            last_primary: None,
            current: RawRecord::new(),
            accumulating: false,
            buffer: Vec::new(),
            finished: false,
        }
    }

    /// Closes the current record, storing any pending continuation text.
    fn finalize(&mut self) -> Option<RawRecord> {
        if self.accumulating {
            if let Some(trigger) = &self.config.continuation {
                self.current.insert(trigger.clone(), self.buffer.join(" "));
            }
        }
        self.accumulating = false;
        self.buffer.clear();

        if self.current.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.current))
    }

    /// Feeds one line, returning a record if the line closed one.
    fn feed(&mut self, line: &str) -> Option<RawRecord> {
        let field = self.config.split_field(line);
        let mut closed = None;

        if let Some((name, value)) = &field {
            if *name == self.config.primary_key
                && self.last_primary.as_deref() != Some(value.as_str())
            {
                closed = self.finalize();
                self.last_primary = Some(value.clone());
            }
        }

        if self.config.is_trigger(line, field.as_ref()) {
            self.accumulating = true;
            self.buffer.clear();
            return closed;
        }

        match field {
            Some((name, value)) => self.current.insert(name, value),
            None if !self.accumulating => trace!(line, "Dropping line without delimiter"),
            None => {}
        }

        if self.accumulating {
            self.buffer.push(line.to_string());
        }

        closed
    }
}

impl<I> Iterator for KeyValueScanner<'_, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = RawRecord;

    fn next(&mut self) -> Option<RawRecord> {
        if self.finished {
            return None;
        }
        while let Some(line) = self.lines.next() {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            if let Some(record) = self.feed(line) {
                return Some(record);
            }
        }
        self.finished = true;
        self.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(config: &KeyValueConfig, text: &str) -> Vec<RawRecord> {
        KeyValueScanner::new(config, text.lines()).collect()
    }

    fn get<'r>(record: &'r RawRecord, key: &str) -> Option<&'r str> {
        record.get(key).map(String::as_str)
    }

    #[test]
    fn test_repeated_primary_key_merges_into_one_record() {
        let config = KeyValueConfig::new(": ", "name");
        let text = "\
Name : make
Size : 1
Name : make
Size : 2
Arch : x86_64";

        let records = scan(&config, text);
        assert_eq!(records.len(), 1);
        assert_eq!(get(&records[0], "size"), Some("2"));
        assert_eq!(get(&records[0], "arch"), Some("x86_64"));
    }

    #[test]
    fn test_record_is_finalized_at_end_of_input() {
        let config = KeyValueConfig::new(": ", "name");
        let records = scan(&config, "Name : a\nVersion : 1\nName : b\nVersion : 2");
        assert_eq!(records.len(), 2);
        assert_eq!(get(&records[1], "name"), Some("b"));
        assert_eq!(get(&records[1], "version"), Some("2"));
    }

    #[test]
    fn test_continuation_lines_are_joined() {
        let config = KeyValueConfig::new(": ", "name").with_continuation("description");
        let text = "\
Name        : make
Summary     : A GNU tool
Description :
A GNU tool for controlling the generation
of executables and other non-source files
of a program from the program's source files.
Name        : bash
Description :
The GNU Bourne Again shell.";

        let records = scan(&config, text);
        assert_eq!(records.len(), 2);
        assert_eq!(
            get(&records[0], "description"),
            Some(
                "A GNU tool for controlling the generation of executables and other \
                 non-source files of a program from the program's source files."
            )
        );
        assert_eq!(
            get(&records[1], "description"),
            Some("The GNU Bourne Again shell.")
        );
    }

    #[test]
    fn test_continuation_does_not_leak_into_next_record() {
        let config = KeyValueConfig::new(": ", "name").with_continuation("description");
        let text = "Name : a\nDescription :\nfirst\nName : b\nVersion : 2";

        let records = scan(&config, text);
        assert_eq!(records.len(), 2);
        assert_eq!(get(&records[0], "description"), Some("first"));
        assert!(!records[1].contains_key("description"));
    }

    #[test]
    fn test_trigger_value_is_discarded() {
        let config = KeyValueConfig::new(": ", "name").with_continuation("description");
        let records = scan(&config, "Name : a\nDescription : inline\nwrapped text");
        assert_eq!(get(&records[0], "description"), Some("wrapped text"));
    }

    #[test]
    fn test_field_lines_inside_continuation_are_kept_both_ways() {
        let config = KeyValueConfig::new(": ", "name").with_continuation("description");
        let records = scan(&config, "Name : a\nDescription :\nNote: see docs");

        assert_eq!(get(&records[0], "note"), Some("see docs"));
        assert_eq!(get(&records[0], "description"), Some("Note: see docs"));
    }

    #[test]
    fn test_malformed_lines_and_empty_input() {
        let config = KeyValueConfig::new(": ", "name");
        assert!(scan(&config, "").is_empty());
        assert!(scan(&config, "no delimiter here\n\n   \n").is_empty());

        let records = scan(&config, "garbage\nName : a\nmore garbage");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 1);
    }

    #[test]
    fn test_scanner_is_lazy() {
        let config = KeyValueConfig::new(": ", "name");
        let text = "Name : a\nName : b\nName : c";
        let mut scanner = KeyValueScanner::new(&config, text.lines());

        assert_eq!(scanner.next().and_then(|r| r.get("name").cloned()), Some("a".to_string()));
        assert_eq!(scanner.next().and_then(|r| r.get("name").cloned()), Some("b".to_string()));
        assert_eq!(scanner.next().and_then(|r| r.get("name").cloned()), Some("c".to_string()));
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }
}
