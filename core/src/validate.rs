//! Converter specification validation.
//!
//! Catches structural mistakes in a [`ConverterSpec`] (duplicate rules,
//! an ambiguous continuation field, an unusable key/value layout, derived
//! keys that would clobber another field) before an engine is built from it.
//!
//! # Examples
//!
//! ```
//! use command_output_core::*;
//!
//! let spec = ConverterSpec::new("uptime")
//!     .compatible_with(&[Platform::Linux])
//!     .with_field(FieldRule::duration("uptime"));
//! assert!(validate_spec(&spec).is_empty());
//!
//! // Invalid: the derived `uptime_days` key collides with a declared field
//! let bad = spec.clone().with_field(FieldRule::integer("uptime_days"));
//! assert!(!validate_spec(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{ConverterSpec, FieldKind, Layout};

/// Converter specification errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Converter name is empty or whitespace-only.
    #[error("converter name cannot be empty")]
    EmptyConverterName,
    /// The compatible platform list is empty.
    #[error("converter must declare at least one compatible platform")]
    NoCompatiblePlatforms,
    /// A field rule has an empty name.
    #[error("field rule name cannot be empty")]
    EmptyFieldName,
    /// Two rules classify the same field.
    #[error("duplicate field rule: {0}")]
    DuplicateField(String),
    /// More than one field is flagged as continuation-eligible.
    #[error("only one continuation field is allowed, found another: {0}")]
    MultipleContinuationFields(String),
    /// Key/value layout with an empty delimiter.
    #[error("key/value delimiter cannot be empty")]
    EmptyDelimiter,
    /// Key/value layout with an empty primary key.
    #[error("key/value primary key cannot be empty")]
    EmptyPrimaryKey,
    /// The primary key field is also the continuation trigger.
    #[error("primary key cannot be a continuation field: {0}")]
    PrimaryKeyIsContinuation(String),
    /// The same literal command is registered twice.
    #[error("duplicate magic command: {0}")]
    DuplicateMagicCommand(String),
    /// A field or primary key name is not in normalized form, so it would
    /// never match a key cut out of the output.
    #[error("name must be lowercase with '_' separators: {0}")]
    UnnormalizedName(String),
    /// A derived key collides with a declared field or another derived key.
    #[error("derived key collides with another field: {0}")]
    DerivedKeyCollision(String),
}

/// Validates a converter specification.
///
/// Returns the first problem found (the list is empty for a valid spec),
/// checking metadata first, then field rules, then the layout.
pub fn validate_spec(spec: &ConverterSpec) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if spec.name.trim().is_empty() {
        errors.push(ValidationError::EmptyConverterName);
        return errors;
    }

    if spec.compatible.is_empty() {
        errors.push(ValidationError::NoCompatiblePlatforms);
        return errors;
    }

    let mut seen_commands: HashSet<&str> = HashSet::new();
    for command in &spec.magic_commands {
        if !seen_commands.insert(command.as_str()) {
            errors.push(ValidationError::DuplicateMagicCommand(command.clone()));
            return errors;
        }
    }

    errors.extend(validate_fields(spec));
    if !errors.is_empty() {
        return errors;
    }

    errors.extend(validate_layout(spec));
    errors
}

fn validate_fields(spec: &ConverterSpec) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut continuation: Option<&str> = None;

    for rule in &spec.fields {
        let name = rule.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::EmptyFieldName);
            return errors;
        }
        if !is_normalized_name(&rule.name) {
            errors.push(ValidationError::UnnormalizedName(rule.name.clone()));
            return errors;
        }
        if !seen.insert(name) {
            errors.push(ValidationError::DuplicateField(name.to_string()));
            return errors;
        }
        if rule.kind == FieldKind::Continuation {
            if continuation.is_some() {
                errors.push(ValidationError::MultipleContinuationFields(
                    name.to_string(),
                ));
                return errors;
            }
            continuation = Some(name);
        }
    }

    let mut derived: HashSet<String> = HashSet::new();
    for rule in &spec.fields {
        for key in rule.derived_keys() {
            if seen.contains(key.as_str()) || !derived.insert(key.clone()) {
                errors.push(ValidationError::DerivedKeyCollision(key));
                return errors;
            }
        }
    }

    errors
}

fn validate_layout(spec: &ConverterSpec) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Layout::KeyValue {
        delimiter,
        primary_key,
    } = &spec.layout
    {
        if delimiter.is_empty() {
            errors.push(ValidationError::EmptyDelimiter);
            return errors;
        }
        if primary_key.trim().is_empty() {
            errors.push(ValidationError::EmptyPrimaryKey);
            return errors;
        }
        if !is_normalized_name(primary_key) {
            errors.push(ValidationError::UnnormalizedName(primary_key.clone()));
            return errors;
        }
        if spec
            .continuation_field()
            .is_some_and(|rule| rule.name == *primary_key)
        {
            errors.push(ValidationError::PrimaryKeyIsContinuation(
                primary_key.clone(),
            ));
        }
    }

    errors
}

/// Returns `true` if `name` is already a record key: no surrounding or
/// inner whitespace, no `-`, no uppercase letters and no `__` runs.
fn is_normalized_name(name: &str) -> bool {
    !name.chars().any(|ch| ch.is_whitespace() || ch == '-' || ch.is_uppercase())
        && !name.contains("__")
}
