// Copyright 2026 the Backfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised by backing field access.

use alloc::string::String;
use core::fmt;

/// An error raised while reading or writing a backing field.
///
/// Accessors check for these conditions in a fixed order: suppression
/// first, then a blank name, then (for typed accessors) the absence of
/// any field of the requested type, then the name lookup itself, and
/// finally (for generic access) the stored type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldError {
    /// The requested field name was empty or all white-space.
    BlankName,
    /// No writable backing field with the requested name and type exists
    /// on the owner type.
    NotFound {
        /// Name of the owner type.
        owner: &'static str,
        /// The field name that was looked up.
        name: String,
        /// Name of the requested value type.
        requested: &'static str,
    },
    /// The owner type declares no backing field of the requested type at
    /// all, so the lookup was rejected before consulting the name.
    NoFieldOfType {
        /// Name of the owner type.
        owner: &'static str,
        /// Name of the requested value type.
        requested: &'static str,
    },
    /// The field exists but holds a value of a different type.
    TypeMismatch {
        /// Name of the owner type.
        owner: &'static str,
        /// The field name that was looked up.
        name: String,
        /// Name of the requested value type.
        requested: &'static str,
        /// Name of the type the field actually holds.
        actual: &'static str,
    },
    /// Backing field storage is suppressed for the owner type.
    Suppressed {
        /// Name of the owner type.
        owner: &'static str,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankName => write!(
                f,
                "the field name must not be empty or consist only of white-space characters"
            ),
            Self::NotFound {
                owner,
                name,
                requested,
            } => write!(
                f,
                "cannot find a writable backing field named '{name}' of type '{requested}' on owner type '{owner}'"
            ),
            Self::NoFieldOfType { owner, requested } => write!(
                f,
                "there are no backing fields of type '{requested}' on owner type '{owner}'"
            ),
            Self::TypeMismatch {
                owner,
                name,
                requested,
                actual,
            } => write!(
                f,
                "the backing field '{name}' on owner type '{owner}' holds a '{actual}' value and cannot be accessed as '{requested}'"
            ),
            Self::Suppressed { owner } => write!(
                f,
                "backing field storage is suppressed for owner type '{owner}'"
            ),
        }
    }
}

impl core::error::Error for FieldError {}
