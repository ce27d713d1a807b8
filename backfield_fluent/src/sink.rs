// Copyright 2026 the Backfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The change-notification boundary.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

type Subscriber = Box<dyn Fn(&str) + Send + Sync>;

/// An ordered list of change subscribers.
///
/// Subscribers are plain closures taking the changed field's name. They
/// are invoked synchronously, on the raising thread, in registration
/// order. Whatever sits on the other side of this boundary (a UI
/// binding layer, a test recorder, a log) is the subscriber's business.
#[derive(Default)]
pub struct ChangedSink {
    subscribers: Vec<Subscriber>,
}

impl ChangedSink {
    /// Creates a sink with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Appends a subscriber.
    pub fn subscribe(&mut self, subscriber: impl Fn(&str) + Send + Sync + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Invokes every subscriber with `name`, in registration order.
    pub fn raise(&self, name: &str) {
        for subscriber in &self.subscribers {
            subscriber(name);
        }
    }

    /// The number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Whether the sink has no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl fmt::Debug for ChangedSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangedSink")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
