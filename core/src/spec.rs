//! Declarative converter specifications.
//!
//! A [`ConverterSpec`] is the whole per-command configuration the engine
//! needs: which platforms the source command runs on, which literal command
//! invocations it is registered under, how the output is cut into records
//! ([`Layout`]) and how each field is classified ([`FieldRule`]).
//!
//! Specs are plain serde data so they can live in YAML files as well as in
//! code.
//!
//! # Example
//!
//! ```
//! use command_output_core::*;
//!
//! let spec = ConverterSpec::new("rpm_qi")
//!     .with_description("`rpm -qi` command parser")
//!     .compatible_with(&[Platform::Linux])
//!     .with_magic_command("rpm -qi")
//!     .with_layout(Layout::key_value(": ", "name"))
//!     .with_field(FieldRule::integer("size"))
//!     .with_field(FieldRule::timestamp("build_date").with_prefix("build"))
//!     .with_field(FieldRule::continuation("description"));
//!
//! assert_eq!(spec.continuation_field().map(|f| f.name.as_str()), Some("description"));
//! assert_eq!(
//!     spec.field("build_date").unwrap().derived_keys(),
//!     vec!["build_epoch", "build_epoch_utc"]
//! );
//! assert!(validate_spec(&spec).is_empty());
//! ```

use serde::{Deserialize, Serialize};

/// Host platform a command's output format is known from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    Darwin,
    Cygwin,
    Win32,
    Aix,
    #[serde(rename = "freebsd")]
    FreeBsd,
}

impl Platform {
    /// Resolves the platform this binary was compiled for, if it is one of
    /// the known platforms.
    pub fn current() -> Option<Self> {
        if cfg!(target_os = "linux") {
            Some(Self::Linux)
        } else if cfg!(target_os = "macos") {
            Some(Self::Darwin)
        } else if cfg!(target_os = "cygwin") {
            Some(Self::Cygwin)
        } else if cfg!(target_os = "windows") {
            Some(Self::Win32)
        } else if cfg!(target_os = "aix") {
            Some(Self::Aix)
        } else if cfg!(target_os = "freebsd") {
            Some(Self::FreeBsd)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Darwin => "darwin",
            Self::Cygwin => "cygwin",
            Self::Win32 => "win32",
            Self::Aix => "aix",
            Self::FreeBsd => "freebsd",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static classification of one field.
///
/// The classification is configuration, never discovered from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Kept as a string (the default).
    #[default]
    Plain,
    /// Replaced by an integer, or null when unparseable.
    Integer,
    /// Replaced by a float, or null when unparseable.
    Float,
    /// Elapsed time such as `3 days,  2:54`; adds day/hour/minute/total keys.
    Duration,
    /// Date/time string; adds naive and UTC epoch keys.
    Timestamp,
    /// Wall-clock `HH:MM[:SS]`; adds hour/minute/second keys.
    ClockTime,
    /// Value spans the following raw lines up to the next record boundary.
    Continuation,
}

/// What to do when deriving values from a field fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivationPolicy {
    /// Surface the failure to the caller.
    #[default]
    Fail,
    /// Store null in every derived key and report a diagnostic instead.
    Null,
}

/// Classification rule for one field.
///
/// # Examples
///
/// ```
/// use command_output_core::{FieldKind, FieldRule};
///
/// let rule = FieldRule::duration("uptime");
/// assert_eq!(rule.kind, FieldKind::Duration);
/// assert_eq!(rule.derived_keys()[3], "uptime_total_seconds");
///
/// let rule = FieldRule::timestamp("build_date").with_prefix("build");
/// assert_eq!(rule.derived_keys(), vec!["build_epoch", "build_epoch_utc"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Normalized field name (lowercase, `_`-separated).
    pub name: String,
    pub kind: FieldKind,
    /// Prefix for derived keys; the field name when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default)]
    pub on_error: DerivationPolicy,
}

impl FieldRule {
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            prefix: None,
            on_error: DerivationPolicy::default(),
        }
    }

    pub fn plain(name: &str) -> Self {
        Self::new(name, FieldKind::Plain)
    }

    pub fn integer(name: &str) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub fn float(name: &str) -> Self {
        Self::new(name, FieldKind::Float)
    }

    pub fn duration(name: &str) -> Self {
        Self::new(name, FieldKind::Duration)
    }

    pub fn timestamp(name: &str) -> Self {
        Self::new(name, FieldKind::Timestamp)
    }

    pub fn clock_time(name: &str) -> Self {
        Self::new(name, FieldKind::ClockTime)
    }

    pub fn continuation(name: &str) -> Self {
        Self::new(name, FieldKind::Continuation)
    }

    /// Sets the prefix used for derived keys.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    /// Downgrades derivation failures to nulls.
    pub fn null_on_error(mut self) -> Self {
        self.on_error = DerivationPolicy::Null;
        self
    }

    /// Returns the prefix for derived keys.
    pub fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or(&self.name)
    }

    /// Returns the synthetic keys the typed pass adds for this rule, in the
    /// order they are inserted.
    pub fn derived_keys(&self) -> Vec<String> {
        let suffixes: &[&str] = match self.kind {
            FieldKind::Duration => &["days", "hours", "minutes", "total_seconds"],
            FieldKind::Timestamp => &["epoch", "epoch_utc"],
            FieldKind::ClockTime => &["hour", "minute", "second"],
            FieldKind::Plain | FieldKind::Integer | FieldKind::Float | FieldKind::Continuation => {
                &[]
            }
        };
        let prefix = self.prefix();
        suffixes
            .iter()
            .map(|suffix| format!("{prefix}_{suffix}"))
            .collect()
    }
}

/// How raw text is cut into records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Layout {
    /// `Key: value` lines; a changed primary key value starts a new record.
    KeyValue {
        /// Separator between field name and value (first occurrence wins).
        delimiter: String,
        /// Normalized name of the field that opens a record.
        primary_key: String,
    },
    /// Whitespace-aligned columns under a header line.
    SparseTable {
        /// Treat every blank-line separated block as its own table.
        #[serde(default)]
        blank_line_blocks: bool,
    },
    /// Front end supplied in code by the converter.
    Custom {
        /// Name of the front end, for diagnostics.
        frontend: String,
    },
}

impl Layout {
    pub fn key_value(delimiter: &str, primary_key: &str) -> Self {
        Self::KeyValue {
            delimiter: delimiter.to_string(),
            primary_key: primary_key.to_string(),
        }
    }

    pub fn custom(frontend: &str) -> Self {
        Self::Custom {
            frontend: frontend.to_string(),
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::SparseTable {
            blank_line_blocks: false,
        }
    }
}

/// Complete configuration for one converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterSpec {
    /// Converter name (e.g. `rpm_qi`).
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_version")]
    pub version: String,
    /// Platforms the source command is expected to run on.
    pub compatible: Vec<Platform>,
    /// Literal command invocations this converter is registered under.
    #[serde(default)]
    pub magic_commands: Vec<String>,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub fields: Vec<FieldRule>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl ConverterSpec {
    /// Creates an empty spec with the default layout and no field rules.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            version: default_version(),
            compatible: Vec::new(),
            magic_commands: Vec::new(),
            layout: Layout::default(),
            fields: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn compatible_with(mut self, platforms: &[Platform]) -> Self {
        self.compatible.extend_from_slice(platforms);
        self
    }

    pub fn with_magic_command(mut self, command: &str) -> Self {
        self.magic_commands.push(command.to_string());
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_field(mut self, rule: FieldRule) -> Self {
        self.fields.push(rule);
        self
    }

    /// Finds the rule for a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.name == name)
    }

    /// Returns the field flagged as continuation-eligible, if any.
    pub fn continuation_field(&self) -> Option<&FieldRule> {
        self.fields
            .iter()
            .find(|rule| rule.kind == FieldKind::Continuation)
    }

    pub fn is_compatible(&self, platform: Platform) -> bool {
        self.compatible.contains(&platform)
    }
}
