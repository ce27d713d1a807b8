// Copyright 2026 the Backfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-owner-type slot layouts.
//!
//! A [`Shape`] is the immutable description of every backing field an
//! owner type declares: slot order, names, kinds, and seed values. It is
//! built once per owner type and shared by every
//! [`BackingFields`](crate::BackingFields) instance for that type.

use alloc::vec::Vec;
use core::fmt;

use backfield_map::{CreateError, FixedSizeMap};

use crate::{Field, FieldKind, FieldValue};

/// A single slot in a [`Shape`].
#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    name: &'static str,
    seed: FieldValue,
}

impl FieldDescriptor {
    /// The field name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The storage kind of the slot.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.seed.kind()
    }

    /// The value the slot starts out holding.
    #[must_use]
    pub fn seed(&self) -> &FieldValue {
        &self.seed
    }
}

/// The immutable slot layout for one owner type.
#[derive(Debug)]
pub struct Shape {
    owner: &'static str,
    suppressed: bool,
    slots: Vec<FieldDescriptor>,
    by_name: FixedSizeMap<u16>,
    scalar_mask: u16,
}

impl Shape {
    /// Builds the shape of an owner type that opted out of backing field
    /// storage.
    ///
    /// Every accessor on a [`BackingFields`](crate::BackingFields) built
    /// from such a shape fails with
    /// [`FieldError::Suppressed`](crate::FieldError::Suppressed).
    #[must_use]
    pub fn suppressed(owner: &'static str) -> Self {
        Self::build_inner(owner, Vec::new(), true)
    }

    fn build_inner(owner: &'static str, slots: Vec<FieldDescriptor>, suppressed: bool) -> Self {
        assert!(
            slots.len() <= usize::from(u16::MAX),
            "owner type '{owner}' declares too many backing fields"
        );
        #[expect(
            clippy::cast_possible_truncation,
            reason = "slot count checked against u16::MAX above"
        )]
        let entries = slots
            .iter()
            .enumerate()
            .map(|(index, slot)| (slot.name, index as u16));
        let by_name = match FixedSizeMap::from_entries(entries) {
            Ok(map) => map,
            Err(CreateError::Duplicate { key }) => {
                panic!("backing field '{key}' is declared more than once on owner type '{owner}'")
            }
            Err(CreateError::BlankKey) => {
                panic!("backing field names on owner type '{owner}' must not be blank")
            }
        };
        let mut scalar_mask = 0_u16;
        for slot in &slots {
            if let Some(index) = slot.kind().scalar_index() {
                scalar_mask |= 1 << index;
            }
        }
        Self {
            owner,
            suppressed,
            slots,
            by_name,
            scalar_mask,
        }
    }

    /// Name of the owner type this shape describes.
    #[must_use]
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    /// Whether the owner type opted out of backing field storage.
    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// The number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the shape has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The slots, in declaration order.
    #[must_use]
    pub fn slots(&self) -> &[FieldDescriptor] {
        &self.slots
    }

    pub(crate) fn slot_index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).map(|&index| usize::from(index))
    }

    pub(crate) fn has_scalar(&self, kind: FieldKind) -> bool {
        kind.scalar_index()
            .is_some_and(|index| self.scalar_mask & (1 << index) != 0)
    }
}

/// Builds a [`Shape`] one field at a time.
///
/// Most owner types never touch the builder directly; the
/// [`backing_fields!`](crate::backing_fields) macro drives it from a
/// field list. It is public for owner types whose layout is assembled
/// programmatically.
///
/// # Panics
///
/// [`build`](Self::build) panics if two fields share a name or a field
/// name is blank. Slot layouts are static data, so a bad one is a bug in
/// the owner type, not a runtime condition.
pub struct ShapeBuilder {
    owner: &'static str,
    slots: Vec<FieldDescriptor>,
}

impl ShapeBuilder {
    /// Starts a shape for the owner type named `owner`.
    #[must_use]
    pub fn new(owner: &'static str) -> Self {
        Self {
            owner,
            slots: Vec::new(),
        }
    }

    /// Declares a field seeded with `T`'s zero value.
    #[must_use]
    pub fn field<T: Field>(self, name: &'static str) -> Self {
        self.field_with(name, T::zero())
    }

    /// Declares a field seeded with `default`.
    #[must_use]
    pub fn field_with<T: Field>(mut self, name: &'static str, default: T) -> Self {
        self.slots.push(FieldDescriptor {
            name,
            seed: default.into_value(),
        });
        self
    }

    /// Finishes the shape.
    #[must_use]
    pub fn build(self) -> Shape {
        Shape::build_inner(self.owner, self.slots, false)
    }
}

impl fmt::Debug for ShapeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeBuilder")
            .field("owner", &self.owner)
            .field("slots", &self.slots)
            .finish()
    }
}

/// An owner type with a statically known slot layout.
///
/// Implementations are normally generated by
/// [`backing_fields!`](crate::backing_fields), which caches the shape in
/// a static so that every instance of the owner type shares one layout.
pub trait FieldSpec: 'static {
    /// The shared slot layout for this owner type.
    fn shape() -> &'static Shape;
}
