// Copyright 2026 the Backfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fluent continuation that threads change notification through a
//! chain of writes.

use core::fmt;

use backfield_store::{BackingFields, Field, FieldError};

use crate::command::Command;
use crate::sink::ChangedSink;

/// An error raised by a fluent chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FluentError {
    /// The underlying storage access failed.
    Field(FieldError),
    /// An `affects_command` step named a command without a notifier.
    MissingNotifier,
}

impl From<FieldError> for FluentError {
    fn from(err: FieldError) -> Self {
        Self::Field(err)
    }
}

impl fmt::Display for FluentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(err) => err.fmt(f),
            Self::MissingNotifier => write!(
                f,
                "cannot refresh the command's executability because it does not expose a notifier"
            ),
        }
    }
}

impl core::error::Error for FluentError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Field(err) => Some(err),
            Self::MissingNotifier => None,
        }
    }
}

/// One step of a fluent write chain.
///
/// A chain starts at
/// [`ModelCore::when`](crate::ModelCore::when) or
/// [`ModelCore::set`](crate::ModelCore::set) and stays
/// [`Active`](Self::Active) for as long as its steps keep changing
/// things. A false condition or a write that leaves the stored value
/// untouched cuts the chain over to [`Inert`](Self::Inert), and every
/// later step on an inert chain is a no-op: no storage access, no
/// notification, no capability probe, no error. Each step consumes the
/// action and returns its successor, so a chain reads as one expression:
///
/// ```rust
/// use backfield_fluent::ModelCore;
/// use backfield_store::backing_fields;
///
/// struct Player;
///
/// backing_fields! {
///     Player {
///         name: String,
///         score: u32,
///         rank: u32,
///     }
/// }
///
/// let mut core: ModelCore<Player> = ModelCore::new();
/// let action = core
///     .when(true)
///     .set(250_u32, "score")
///     .and_then(|action| action.affects("rank"))
///     .unwrap();
/// assert!(action.was_updated());
/// ```
#[derive(Debug)]
pub enum FluentAction<'a> {
    /// The chain is live: writes hit storage and raise notifications.
    Active {
        /// The owner's slot storage.
        fields: &'a mut BackingFields,
        /// The owner's change-notification sink.
        changed: &'a ChangedSink,
    },
    /// The chain has been cut short; every later step is a no-op.
    Inert,
}

impl FluentAction<'_> {
    /// Writes `value` to the field named `name`.
    ///
    /// On an active chain, a write that changes the stored value raises
    /// a notification for `name` and keeps the chain active; a write
    /// that leaves it untouched raises nothing and cuts the chain to
    /// inert. On an inert chain nothing happens at all, even for names
    /// that do not exist.
    pub fn set<T: Field>(self, value: T, name: &str) -> Result<Self, FluentError> {
        match self {
            Self::Inert => Ok(Self::Inert),
            Self::Active { fields, changed } => {
                if fields.set(value, name)? {
                    changed.raise(name);
                    Ok(Self::Active { fields, changed })
                } else {
                    Ok(Self::Inert)
                }
            }
        }
    }

    /// Raises a notification for the dependent field named `name`.
    ///
    /// The dependent name is raised as given, without a storage lookup;
    /// computed values live outside storage. Blank names are rejected on
    /// an active chain.
    pub fn affects(self, name: &str) -> Result<Self, FluentError> {
        if let Self::Active { changed, .. } = &self {
            if name.trim().is_empty() {
                return Err(FieldError::BlankName.into());
            }
            changed.raise(name);
        }
        Ok(self)
    }

    /// Refreshes the executability of `command`, if one is given.
    ///
    /// On an active chain, a command without a
    /// [notifier](Command::notifier) is an error: the caller declared a
    /// dependency the command cannot honor. An inert chain never probes
    /// the capability.
    pub fn affects_command(self, command: Option<&dyn Command>) -> Result<Self, FluentError> {
        if let Self::Active { .. } = &self {
            if let Some(command) = command {
                match command.notifier() {
                    Some(notifier) => notifier.refresh_can_execute(),
                    None => return Err(FluentError::MissingNotifier),
                }
            }
        }
        Ok(self)
    }

    /// Whether the chain is still active, which after a
    /// [`set`](Self::set) means the last write changed the stored value.
    #[must_use]
    pub fn was_updated(&self) -> bool {
        matches!(self, Self::Active { .. })
    }
}
