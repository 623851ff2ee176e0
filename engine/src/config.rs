//! YAML loading and saving of converter specs.
//!
//! Built-in converters build their specs in code; everything else can be
//! described in a file and loaded here.
//!
//! # Example YAML
//!
//! ```yaml
//! name: rpm_qi
//! description: "`rpm -qi` command parser"
//! compatible: [linux]
//! magic_commands: ["rpm -qi", "rpm -qia"]
//! layout:
//!   type: key_value
//!   delimiter: ": "
//!   primary_key: name
//! fields:
//!   - name: description
//!     kind: continuation
//!   - name: size
//!     kind: integer
//!   - name: build_date
//!     kind: timestamp
//!     prefix: build
//! ```

use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use command_output_core::{ConverterSpec, validate_spec};
use tracing::debug;

use crate::error::{EngineError, Result};

/// Loads and validates a spec from a YAML file.
///
/// # Errors
///
/// Returns [`EngineError::Io`] if the file cannot be read,
/// [`EngineError::Yaml`] if parsing fails, or [`EngineError::InvalidSpec`]
/// with the first validation error.
pub fn load_spec(path: impl AsRef<Path>) -> Result<ConverterSpec> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);
    let spec: ConverterSpec = serde_yaml::from_reader(reader)?;
    debug!(path = %path.display(), converter = %spec.name, "Loaded converter spec");
    validated(spec)
}

/// Parses and validates a spec from YAML text.
///
/// ```
/// use command_output_engine::config::spec_from_yaml;
///
/// let spec = spec_from_yaml(
///     "name: ps\ncompatible: [linux]\nlayout:\n  type: sparse_table\n",
/// )
/// .unwrap();
/// assert_eq!(spec.version, "1.0");
/// ```
pub fn spec_from_yaml(yaml: &str) -> Result<ConverterSpec> {
    validated(serde_yaml::from_str(yaml)?)
}

/// Writes a spec as YAML.
///
/// # Errors
///
/// Returns [`EngineError::Io`] if the file cannot be written, or
/// [`EngineError::Yaml`] if serialization fails.
pub fn save_spec(spec: &ConverterSpec, path: impl AsRef<Path>) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_yaml::to_writer(&mut writer, spec)?;
    writer.flush()?;
    Ok(())
}

fn validated(spec: ConverterSpec) -> Result<ConverterSpec> {
    match validate_spec(&spec).into_iter().next() {
        Some(error) => Err(EngineError::InvalidSpec(error)),
        None => Ok(spec),
    }
}
