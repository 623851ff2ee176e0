//! Configuration-driven converter engine.
//!
//! A [`Converter`] pairs a validated [`ConverterSpec`] with a [`Frontend`].
//! Conversion runs in two stages:
//!
//! 1. **Raw stage**: output is normalized and the front end cuts it into
//!    [`RawRecord`]s (every value a string).
//! 2. **Typed stage**: each raw record is copied into a new
//!    [`TypedRecord`] and the field rules are applied: integers and floats
//!    replace their string (null when unparseable), durations, timestamps
//!    and clock times add derived keys next to the source string.
//!
//! Raw mode stops after stage 1 and never touches the field rules.

use command_output_core::{
    ConverterSpec, DerivationPolicy, FieldKind, FieldRule, Platform, RawRecord, TypedRecord,
    Value, validate_spec,
};
use serde::Serialize;
use tracing::debug;

use crate::coerce::{coerce_float, coerce_int};
use crate::diagnostics::{CollectingSink, Diagnostic, DiagnosticSink};
use crate::duration::decompose_duration;
use crate::error::{EngineError, Result};
use crate::frontend::{Frontend, builtin_frontend};
use crate::normalize::normalize_output;
use crate::timestamp::parse_timestamp;

/// Options for [`Converter::parse`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Return raw records and skip the typed stage.
    pub raw: bool,
    /// Suppress the compatibility advisory.
    pub quiet: bool,
}

impl ParseOptions {
    pub fn raw() -> Self {
        Self {
            raw: true,
            quiet: false,
        }
    }

    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }
}

/// Result of [`Converter::parse`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Parsed {
    Raw(Vec<RawRecord>),
    Typed(Vec<TypedRecord>),
}

impl Parsed {
    pub fn len(&self) -> usize {
        match self {
            Self::Raw(records) => records.len(),
            Self::Typed(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_typed(self) -> Option<Vec<TypedRecord>> {
        match self {
            Self::Typed(records) => Some(records),
            Self::Raw(_) => None,
        }
    }

    pub fn into_raw(self) -> Option<Vec<RawRecord>> {
        match self {
            Self::Raw(records) => Some(records),
            Self::Typed(_) => None,
        }
    }
}

/// One engine instance per command.
///
/// # Examples
///
/// ```
/// use command_output_core::{ConverterSpec, FieldRule, Layout, Platform, Value};
/// use command_output_engine::converter::{Converter, ParseOptions};
/// use command_output_engine::diagnostics::CollectingSink;
///
/// let spec = ConverterSpec::new("pkg")
///     .compatible_with(&[Platform::Linux, Platform::Darwin, Platform::Win32])
///     .with_layout(Layout::key_value(": ", "name"))
///     .with_field(FieldRule::integer("size"));
/// let converter = Converter::new(spec).unwrap();
///
/// let mut sink = CollectingSink::new();
/// let parsed = converter
///     .parse("Name : make\nSize : 1160660\n", ParseOptions::default().quiet(), &mut sink)
///     .unwrap();
///
/// let records = parsed.into_typed().unwrap();
/// assert_eq!(records[0].get("size"), Some(&Value::Integer(1_160_660)));
/// assert!(sink.is_empty());
/// ```
pub struct Converter {
    spec: ConverterSpec,
    frontend: Box<dyn Frontend>,
}

impl std::fmt::Debug for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("spec", &self.spec)
            .field("frontend", &self.frontend.name())
            .finish()
    }
}

impl Converter {
    /// Builds a converter using the built-in front end for its layout.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidSpec`] if validation fails,
    /// [`EngineError::CustomLayout`] for a `custom` layout.
    pub fn new(spec: ConverterSpec) -> Result<Self> {
        check_spec(&spec)?;
        let frontend = builtin_frontend(&spec)?;
        Ok(Self { spec, frontend })
    }

    /// Builds a converter with a front end supplied in code.
    pub fn with_frontend(spec: ConverterSpec, frontend: Box<dyn Frontend>) -> Result<Self> {
        check_spec(&spec)?;
        Ok(Self { spec, frontend })
    }

    pub fn spec(&self) -> &ConverterSpec {
        &self.spec
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Full conversion honoring [`ParseOptions`].
    ///
    /// Emits [`Diagnostic::Incompatible`] first unless `options.quiet` is set
    /// or the host platform is in the compatible list.
    ///
    /// # Errors
    ///
    /// Only the typed stage can fail, see [`Converter::process_with`].
    pub fn parse(
        &self,
        text: &str,
        options: ParseOptions,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Parsed> {
        if !options.quiet {
            self.check_compatibility(Platform::current(), sink);
        }

        let raw = self.parse_raw(text);
        if options.raw {
            return Ok(Parsed::Raw(raw));
        }
        self.process_with(&raw, sink).map(Parsed::Typed)
    }

    /// Raw stage only.
    pub fn parse_raw(&self, text: &str) -> Vec<RawRecord> {
        let normalized = normalize_output(text);
        let records = self.frontend.records(&normalized);
        debug!(
            converter = %self.spec.name,
            frontend = self.frontend.name(),
            records = records.len(),
            "Parsed raw records"
        );
        records
    }

    /// Typed stage, discarding diagnostics.
    pub fn process(&self, raw: &[RawRecord]) -> Result<Vec<TypedRecord>> {
        self.process_with(raw, &mut CollectingSink::new())
    }

    /// Typed stage.
    ///
    /// # Errors
    ///
    /// [`EngineError::Duration`] when a duration field cannot be decomposed
    /// and its rule uses [`DerivationPolicy::Fail`].
    pub fn process_with(
        &self,
        raw: &[RawRecord],
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Vec<TypedRecord>> {
        raw.iter()
            .map(|record| self.process_record(record, sink))
            .collect()
    }

    /// Emits an advisory when `platform` is not in the compatible list.
    pub fn check_compatibility(&self, platform: Option<Platform>, sink: &mut dyn DiagnosticSink) {
        if platform.is_some_and(|p| self.spec.is_compatible(p)) {
            return;
        }
        sink.emit(Diagnostic::Incompatible {
            converter: self.spec.name.clone(),
            platform: platform.map_or("unknown", Platform::as_str).to_string(),
            compatible: self.spec.compatible.clone(),
        });
    }

    fn process_record(
        &self,
        raw: &RawRecord,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<TypedRecord> {
        let mut typed = TypedRecord::from(raw);

        for rule in &self.spec.fields {
            let Some(value) = raw.get(&rule.name) else {
                continue;
            };
            match rule.kind {
                FieldKind::Plain | FieldKind::Continuation => {}
                FieldKind::Integer => typed.insert(rule.name.clone(), coerce_int(value).into()),
                FieldKind::Float => typed.insert(rule.name.clone(), coerce_float(value).into()),
                FieldKind::Duration => apply_duration(&mut typed, rule, value, sink)?,
                FieldKind::Timestamp => {
                    let ts = parse_timestamp(value);
                    let keys = rule.derived_keys();
                    typed.insert(keys[0].clone(), ts.naive.into());
                    typed.insert(keys[1].clone(), ts.utc.into());
                }
                FieldKind::ClockTime => apply_clock_time(&mut typed, rule, value),
            }
        }

        Ok(typed)
    }
}

fn check_spec(spec: &ConverterSpec) -> Result<()> {
    match validate_spec(spec).into_iter().next() {
        Some(error) => Err(EngineError::InvalidSpec(error)),
        None => Ok(()),
    }
}

fn apply_duration(
    typed: &mut TypedRecord,
    rule: &FieldRule,
    value: &str,
    sink: &mut dyn DiagnosticSink,
) -> Result<()> {
    let keys = rule.derived_keys();
    match decompose_duration(value) {
        Ok(duration) => {
            let parts = [
                duration.days,
                duration.hours,
                duration.minutes,
                duration.total_seconds,
            ];
            for (key, part) in keys.into_iter().zip(parts) {
                typed.insert(key, Value::Integer(part));
            }
            Ok(())
        }
        Err(source) if rule.on_error == DerivationPolicy::Null => {
            sink.emit(Diagnostic::DerivationFailed {
                field: rule.name.clone(),
                reason: source.to_string(),
            });
            for key in keys {
                typed.insert(key, Value::Null);
            }
            Ok(())
        }
        Err(source) => Err(EngineError::Duration {
            field: rule.name.clone(),
            source,
        }),
    }
}

/// Splits `HH:MM[:SS]`; a component that is missing or not an integer
/// becomes null.
fn apply_clock_time(typed: &mut TypedRecord, rule: &FieldRule, value: &str) {
    let parts: Vec<&str> = value.split(':').collect();
    for (idx, key) in rule.derived_keys().into_iter().enumerate() {
        let component = parts.get(idx).and_then(|part| coerce_int(part).ok());
        typed.insert(key, component.into());
    }
}
