// Copyright 2026 the Backfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backfield Fluent: Change notification as a fluent chain.
//!
//! This crate puts a notification protocol on top of
//! [`backfield_store`]: models embed a [`ModelCore`], write through it,
//! and subscribers hear about exactly the writes that changed something.
//! Dependent notifications ride along as chain steps instead of
//! hand-written re-raises.
//!
//! ## Core Concepts
//!
//! ### The Chain
//!
//! Every write starts a [`FluentAction`] chain. A chain stays active
//! while its steps keep changing things; a false [`when`](ModelCore::when)
//! condition or a write that leaves the stored value untouched cuts it
//! to inert, and inert steps do nothing at all. That one rule gives
//! change-only notification, conditional writes, and dependent-property
//! fan-out the same shape:
//!
//! - `set(value, name)` - write, raise on change
//! - `affects(name)` - raise for a dependent computed property
//! - `affects_command(command)` - refresh a command's executability
//!
//! ### The Boundary
//!
//! Subscribers are closures on a [`ChangedSink`], called synchronously
//! in registration order with the changed field's name. Commands
//! participate through the [`Command`] trait and opt into refreshes by
//! exposing a [`CommandNotifier`].
//!
//! ## Quick Start
//!
//! ```rust
//! use backfield_fluent::ModelCore;
//! use backfield_store::backing_fields;
//!
//! struct Player;
//!
//! backing_fields! {
//!     Player {
//!         name: String = String::from("anonymous"),
//!         score: u32,
//!         rank: u32,
//!     }
//! }
//!
//! let mut core: ModelCore<Player> = ModelCore::new();
//! core.subscribe(|name| println!("{name} changed"));
//!
//! // Raises "score", then "rank".
//! core.set_u32(250, "score")?.affects("rank")?;
//!
//! // Unchanged write: raises nothing, and the chain goes inert.
//! let action = core.set_u32(250, "score")?;
//! assert!(!action.was_updated());
//!
//! // Conditional write that never happens.
//! core.when(false).set(0_u32, "score")?;
//! assert_eq!(core.get_u32("score")?, 250);
//! # Ok::<(), Box<dyn core::error::Error>>(())
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod action;
mod command;
mod model;
mod sink;

pub use action::{FluentAction, FluentError};
pub use command::{Command, CommandNotifier};
pub use model::{FluentModel, FluentModelExt, ModelCore};
pub use sink::ChangedSink;
