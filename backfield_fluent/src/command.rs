// Copyright 2026 the Backfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Command collaborators and the executability-refresh capability.

/// An invokable operation owned by a model.
///
/// Only [`notifier`](Self::notifier) matters to the fluent protocol:
/// [`FluentAction::affects_command`](crate::FluentAction::affects_command)
/// asks a command for its notifier so dependent executability can be
/// refreshed after a field change. Execution itself happens outside this
/// crate, driven by whoever dispatches commands.
pub trait Command {
    /// Runs the command.
    fn execute(&mut self);

    /// Whether the command may currently run.
    fn can_execute(&self) -> bool {
        true
    }

    /// The refresh capability, for commands whose
    /// [`can_execute`](Self::can_execute) depends on model state.
    ///
    /// Returning `None` declares that executability never needs
    /// refreshing. A command returning `None` cannot be named in an
    /// `affects_command` step.
    fn notifier(&self) -> Option<&dyn CommandNotifier> {
        None
    }
}

/// The capability to re-evaluate a command's executability.
///
/// Invoked with no arguments; the notifier itself knows which
/// subscribers care.
pub trait CommandNotifier {
    /// Tells interested parties to query
    /// [`can_execute`](Command::can_execute) again.
    fn refresh_can_execute(&self);
}
