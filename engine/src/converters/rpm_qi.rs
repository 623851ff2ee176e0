//! `rpm -qi` / `rpm -qia` converter.
//!
//! Fully declarative: key/value layout split on `": "`, a new package starts
//! at every changed `Name` line, and `Description :` collects the wrapped
//! text that follows it.

use command_output_core::{ConverterSpec, FieldRule, Layout, Platform};

use crate::converter::Converter;
use crate::error::Result;

pub fn spec() -> ConverterSpec {
    ConverterSpec::new("rpm_qi")
        .with_description("`rpm -qi` command parser")
        .compatible_with(&[Platform::Linux])
        .with_magic_command("rpm -qi")
        .with_magic_command("rpm -qia")
        .with_magic_command("rpm -qai")
        .with_layout(Layout::key_value(": ", "name"))
        .with_field(FieldRule::continuation("description"))
        .with_field(FieldRule::integer("epoch"))
        .with_field(FieldRule::integer("size"))
        .with_field(FieldRule::timestamp("build_date").with_prefix("build"))
}

pub fn converter() -> Result<Converter> {
    Converter::new(spec())
}
