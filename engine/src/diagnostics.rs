//! Non-fatal diagnostics emitted while converting output.
//!
//! The engine never prints. Advisories go to a [`DiagnosticSink`] passed in
//! by the caller, so a CLI can log them and a test can collect them.

use std::fmt;

use command_output_core::Platform;
use serde::Serialize;
use tracing::warn;

/// One advisory produced during a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The host platform is not one the source command is known to run on.
    Incompatible {
        converter: String,
        /// Host platform name, `unknown` when it is not a known platform.
        platform: String,
        compatible: Vec<Platform>,
    },
    /// A derivation failed and was downgraded to nulls.
    DerivationFailed { field: String, reason: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incompatible {
                converter,
                platform,
                compatible,
            } => {
                let names: Vec<&str> = compatible.iter().map(|p| p.as_str()).collect();
                write!(
                    f,
                    "{converter} converter is not compatible with your OS ({platform}); compatible platforms: {}",
                    names.join(", ")
                )
            }
            Self::DerivationFailed { field, reason } => {
                write!(f, "could not derive values from field '{field}': {reason}")
            }
        }
    }
}

/// Receiver for [`Diagnostic`]s.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing` at `warn` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        warn!(%diagnostic, "Conversion advisory");
    }
}

/// Keeps diagnostics in memory.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incompatible_message_lists_platforms() {
        let diagnostic = Diagnostic::Incompatible {
            converter: "schtasks".to_string(),
            platform: "linux".to_string(),
            compatible: vec![Platform::Win32],
        };

        assert_eq!(
            diagnostic.to_string(),
            "schtasks converter is not compatible with your OS (linux); compatible platforms: win32"
        );
    }

    #[test]
    fn test_collecting_sink_keeps_order() {
        let mut sink = CollectingSink::new();
        sink.emit(Diagnostic::DerivationFailed {
            field: "uptime".to_string(),
            reason: "first".to_string(),
        });
        sink.emit(Diagnostic::DerivationFailed {
            field: "uptime".to_string(),
            reason: "second".to_string(),
        });

        assert_eq!(sink.diagnostics.len(), 2);
        assert!(sink.warnings()[1].ends_with("second"));
    }
}
