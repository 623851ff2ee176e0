//! Conversion of free-form command output into typed records.
//!
//! This crate turns the text printed by tools such as `uptime`, `rpm -qi` and
//! `schtasks` into ordered records, first as raw strings and then, after a
//! typed pass driven by a declarative [`ConverterSpec`], as integers, floats,
//! derived durations and epoch timestamps.
//!
//! # Main entry points
//!
//! - [`convert`]: look up a built-in converter by name and run it.
//! - [`converter::Converter`]: one engine instance for any
//!   [`ConverterSpec`], built in code or loaded with [`config::load_spec`].
//! - [`registry::Registry`]: built-in converters by name or literal command.
//!
//! The building blocks are public too: [`records::KeyValueScanner`] (record
//! boundaries and continuation lines), [`table::SparseTable`],
//! [`duration::decompose_duration`], [`timestamp::parse_timestamp`] and the
//! [`coerce`] helpers.
//!
//! # Example
//!
//! ```
//! use command_output_core::Value;
//! use command_output_engine::{ParseOptions, convert};
//! use command_output_engine::diagnostics::CollectingSink;
//!
//! let output = "16:52:09 up 3 days,  2:54,  2 users,  load average: 0.00, 0.01, 0.05";
//! let mut sink = CollectingSink::new();
//!
//! let records = convert("uptime", output, ParseOptions::default().quiet(), &mut sink)
//!     .unwrap()
//!     .into_typed()
//!     .unwrap();
//!
//! assert_eq!(records[0].get("uptime_total_seconds"), Some(&Value::Integer(269_640)));
//! assert_eq!(records[0].get("load_15m"), Some(&Value::Float(0.05)));
//! ```
//!
//! # Logging
//!
//! The crate logs through `tracing` and never installs a subscriber.
//! Per-parse summaries are emitted at `debug`, dropped lines at `trace`.
//! Advisories go to the [`diagnostics::DiagnosticSink`] passed by the caller.
//!
//! [`ConverterSpec`]: command_output_core::ConverterSpec

pub mod coerce;
pub mod config;
pub mod converter;
pub mod converters;
pub mod diagnostics;
pub mod duration;
pub mod error;
pub mod frontend;
pub mod normalize;
pub mod records;
pub mod registry;
pub mod table;
pub mod timestamp;

pub use converter::{Converter, ParseOptions, Parsed};
pub use error::{EngineError, Result};

use diagnostics::DiagnosticSink;
use registry::Registry;

/// Runs the built-in converter `name` over `text`.
///
/// # Errors
///
/// [`EngineError::UnknownConverter`] for a name that is not built in, plus
/// any error from [`Converter::parse`].
pub fn convert(
    name: &str,
    text: &str,
    options: ParseOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<Parsed> {
    let registry = Registry::builtin()?;
    registry.converter(name)?.parse(text, options, sink)
}
