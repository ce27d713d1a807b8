// Copyright 2026 the Backfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backfield Store: Per-owner-type backing field storage.
//!
//! This crate stores named, typed field values for owner types without
//! the owner declaring one struct field per property. Each owner type
//! describes its layout once, as a [`Shape`]; each instance then carries
//! a compact slot array laid out by that shape.
//!
//! ## Core Concepts
//!
//! ### Shapes
//!
//! A [`Shape`] is built once per owner type and records slot order,
//! names, kinds, and seed values. The [`backing_fields!`] macro derives
//! it from a field list and caches it in a static behind [`FieldSpec`]:
//!
//! - `name: Type` declares a slot seeded with the type's zero value
//! - `name: Type = expr` seeds a different default
//! - `#[skip]` leaves a field out of the layout
//! - `#[suppress]` on the owner opts the whole type out of storage
//!
//! ### Typed Dispatch
//!
//! [`BackingFields`] exposes a typed accessor pair per scalar kind
//! (`get_i32`/`set_i32` and friends) that touches only slots of that
//! kind, plus generic [`get`](BackingFields::get) and
//! [`set`](BackingFields::set) for everything else. Writes report
//! whether they changed the stored value.
//!
//! ## Quick Start
//!
//! ```rust
//! use backfield_store::{backing_fields, BackingFields};
//!
//! struct Person;
//!
//! backing_fields! {
//!     Person {
//!         name: String = String::from("n/a"),
//!         age: i32 = 18,
//!         active: bool,
//!     }
//! }
//!
//! let mut fields = BackingFields::for_owner::<Person>();
//!
//! // Slots start at their seeds.
//! assert_eq!(fields.get_i32("age").unwrap(), 18);
//!
//! // Writes report whether the stored value changed.
//! assert!(fields.set_i32(21, "age").unwrap());
//! assert!(!fields.set_i32(21, "age").unwrap());
//!
//! // Typed string access borrows the stored text.
//! assert_eq!(fields.get_text("name").unwrap(), "n/a");
//! ```
//!
//! Custom field types implement [`Field`] by naming their zero value and
//! go through the generic accessors:
//!
//! ```rust
//! use backfield_store::{backing_fields, BackingFields, Field};
//!
//! #[derive(Clone, PartialEq)]
//! enum Status {
//!     Idle,
//!     Busy,
//! }
//!
//! impl Field for Status {
//!     fn zero() -> Self {
//!         Status::Idle
//!     }
//! }
//!
//! struct Worker;
//!
//! backing_fields! {
//!     Worker {
//!         status: Status,
//!     }
//! }
//!
//! let mut fields = BackingFields::for_owner::<Worker>();
//! assert!(fields.set(Status::Busy, "status").unwrap());
//! assert!(matches!(fields.get::<Status>("status"), Ok(Status::Busy)));
//! ```
//!
//! ## Memory Optimizations
//!
//! | Optimization | Description |
//! |--------------|-------------|
//! | **Shared shapes** | Layout and seeds stored once per owner type |
//! | **Inline storage** | `SmallVec` keeps small slot arrays off the heap |
//! | **Unboxed scalars** | Scalar kinds live directly in the slot array |
//! | **Bounded lookup** | Names resolve through a fixed-size hash map |
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod error;
mod fields;
mod kind;
mod macros;
mod shape;
mod value;

pub use error::FieldError;
pub use fields::BackingFields;
pub use kind::FieldKind;
pub use shape::{FieldDescriptor, FieldSpec, Shape, ShapeBuilder};
pub use value::{ErasedValue, Field, FieldValue};

#[doc(hidden)]
pub mod __private {
    pub use alloc::boxed::Box;
    pub use once_cell::race::OnceBox;
}
