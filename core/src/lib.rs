//! Core record, value and converter specification types.
//!
//! This crate defines the data shared by every command-output converter:
//!
//! - [`RawRecord`]: ordered field → string mapping cut out of command
//!   output by a front end.
//! - [`TypedRecord`]: the same record after the typed pass, holding
//!   [`Value`]s (string, integer, float or null).
//! - [`ConverterSpec`]: declarative per-command configuration: compatible
//!   [`Platform`]s, literal command names, the record [`Layout`] and the
//!   [`FieldRule`] classification table.
//!
//! Validation ([`validate_spec`]) catches specs the engine cannot run, such
//! as duplicate field rules, two continuation fields or derived keys that
//! would overwrite a declared field.
//!
//! # Example
//!
//! ```
//! use command_output_core::*;
//!
//! let spec = ConverterSpec::new("uptime")
//!     .with_description("`uptime` command parser")
//!     .compatible_with(&[Platform::Linux, Platform::Darwin])
//!     .with_magic_command("uptime")
//!     .with_layout(Layout::custom("uptime"))
//!     .with_field(FieldRule::duration("uptime"))
//!     .with_field(FieldRule::integer("users"));
//!
//! assert!(spec.is_compatible(Platform::Darwin));
//! assert!(!spec.is_compatible(Platform::Win32));
//! assert!(validate_spec(&spec).is_empty());
//! ```

mod spec;
mod types;
mod validate;

pub use spec::*;
pub use types::*;
pub use validate::{ValidationError, validate_spec};
