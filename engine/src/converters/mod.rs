//! Built-in converters.
//!
//! Each module exposes `spec()` (the declarative configuration) and
//! `converter()` (a ready engine instance). Converters with a custom layout
//! also export their front end.

pub mod rpm_qi;
pub mod schtasks;
pub mod uptime;

use crate::converter::Converter;
use crate::error::Result;

/// Builds every built-in converter.
pub fn all() -> Result<Vec<Converter>> {
    Ok(vec![
        rpm_qi::converter()?,
        schtasks::converter()?,
        uptime::converter()?,
    ])
}
