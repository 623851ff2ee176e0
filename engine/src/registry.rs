//! Lookup of converters by name or literal command.
//!
//! Command lookup is an exact match against each converter's `magic_commands`
//! (after trimming surrounding whitespace). Argument parsing is the caller's
//! concern.

use tracing::debug;

use crate::converter::Converter;
use crate::converters;
use crate::error::{EngineError, Result};

/// Immutable set of converters.
///
/// # Examples
///
/// ```
/// use command_output_engine::registry::Registry;
///
/// let registry = Registry::builtin().unwrap();
/// assert_eq!(registry.by_command("rpm -qia").map(|c| c.name()), Some("rpm_qi"));
/// assert!(registry.get("uptime").is_some());
/// assert!(registry.converter("ls").is_err());
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    converters: Vec<Converter>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in converter.
    pub fn builtin() -> Result<Self> {
        let registry = Self {
            converters: converters::all()?,
        };
        debug!(converters = registry.len(), "Built-in registry ready");
        Ok(registry)
    }

    /// Adds a converter. A later registration with the same name shadows
    /// the earlier one for [`Registry::get`].
    pub fn register(&mut self, converter: Converter) {
        self.converters.push(converter);
    }

    pub fn get(&self, name: &str) -> Option<&Converter> {
        self.converters.iter().rev().find(|c| c.name() == name)
    }

    /// Like [`Registry::get`] but fails with [`EngineError::UnknownConverter`].
    pub fn converter(&self, name: &str) -> Result<&Converter> {
        self.get(name)
            .ok_or_else(|| EngineError::UnknownConverter(name.to_string()))
    }

    pub fn by_command(&self, command: &str) -> Option<&Converter> {
        let command = command.trim();
        self.converters.iter().rev().find(|c| {
            c.spec()
                .magic_commands
                .iter()
                .any(|magic| magic == command)
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Converter> {
        self.converters.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.converters.iter().map(Converter::name).collect()
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}
