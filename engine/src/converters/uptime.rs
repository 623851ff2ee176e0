//! `uptime` converter.
//!
//! ```text
//! 16:52:09 up 3 days,  2:54,  2 users,  load average: 0.00, 0.01, 0.05
//! 11:35  up 1 day, 29 min, 1 user, load averages: 1.39 1.61 1.68
//! ```
//!
//! The line is tokenized as `time up <uptime...> users user(s), load
//! average(s): l1 l5 l15`; everything between `up` and the user count is the
//! uptime text.

use command_output_core::{ConverterSpec, FieldRule, Layout, Platform, RawRecord};
use tracing::trace;

use crate::converter::Converter;
use crate::error::Result;
use crate::frontend::Frontend;

/// Tokens after the uptime text: users, `user(s),`, `load`, `average(s):`
/// and the three loads.
const TRAILING_TOKENS: usize = 7;

pub fn spec() -> ConverterSpec {
    ConverterSpec::new("uptime")
        .with_description("`uptime` command parser")
        .with_version("1.3")
        .compatible_with(&[
            Platform::Linux,
            Platform::Darwin,
            Platform::Cygwin,
            Platform::Aix,
            Platform::FreeBsd,
        ])
        .with_magic_command("uptime")
        .with_layout(Layout::custom("uptime"))
        .with_field(FieldRule::clock_time("time"))
        .with_field(FieldRule::duration("uptime"))
        .with_field(FieldRule::integer("users"))
        .with_field(FieldRule::float("load_1m"))
        .with_field(FieldRule::float("load_5m"))
        .with_field(FieldRule::float("load_15m"))
}

pub fn converter() -> Result<Converter> {
    Converter::with_frontend(spec(), Box::new(UptimeFrontend))
}

/// Single-line tokenizer for `uptime` output.
#[derive(Debug, Default, Clone, Copy)]
pub struct UptimeFrontend;

impl Frontend for UptimeFrontend {
    fn name(&self) -> &'static str {
        "uptime"
    }

    fn records(&self, text: &str) -> Vec<RawRecord> {
        let Some(line) = text.lines().find(|line| !line.trim().is_empty()) else {
            return Vec::new();
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 2 + TRAILING_TOKENS {
            trace!(line, "Too few tokens for uptime output");
            return Vec::new();
        }

        let users_idx = tokens.len() - TRAILING_TOKENS;
        let loads = &tokens[tokens.len() - 3..];

        let mut record = RawRecord::new();
        record.insert("time", tokens[0].to_string());
        record.insert(
            "uptime",
            tokens[2..users_idx].join(" ").trim_end_matches(',').to_string(),
        );
        record.insert("users", tokens[users_idx].to_string());
        record.insert("load_1m", loads[0].trim_end_matches(',').to_string());
        record.insert("load_5m", loads[1].trim_end_matches(',').to_string());
        record.insert("load_15m", loads[2].to_string());
        vec![record]
    }
}
