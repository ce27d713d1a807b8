// Copyright 2026 the Backfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance slot storage and its typed and generic accessors.

use alloc::string::String;
use core::any;
use core::fmt;

use smallvec::SmallVec;

use crate::{Field, FieldError, FieldKind, FieldSpec, FieldValue, Shape};

/// Slot arrays up to this many fields in length live inline.
const INLINE_SLOTS: usize = 8;

/// One owner instance's backing field values.
///
/// Construction seeds every slot from its shape's declared default. Every
/// write reports whether it changed the stored value, so callers can
/// gate change notification on the return value alone.
///
/// ## Quick Start
///
/// ```rust
/// use backfield_store::{backing_fields, BackingFields};
///
/// struct Person;
///
/// backing_fields! {
///     Person {
///         name: String = String::from("n/a"),
///         age: i32 = 18,
///         active: bool,
///     }
/// }
///
/// let mut fields = BackingFields::for_owner::<Person>();
/// assert_eq!(fields.get_i32("age").unwrap(), 18);
/// assert!(fields.set_i32(21, "age").unwrap());
/// assert!(!fields.set_i32(21, "age").unwrap());
/// assert_eq!(fields.get_text("name").unwrap(), "n/a");
/// ```
///
/// The typed accessor pairs only consider slots of their own kind. A
/// lookup for a name that exists with a different kind reports
/// [`FieldError::NotFound`], the same as a name that does not exist at
/// all. The generic [`get`](Self::get) and [`set`](Self::set) consider
/// every slot and report [`FieldError::TypeMismatch`] when the name
/// resolves but the type does not.
pub struct BackingFields {
    shape: &'static Shape,
    slots: SmallVec<[FieldValue; INLINE_SLOTS]>,
}

impl BackingFields {
    /// Creates storage for one instance laid out by `shape`, with every
    /// slot seeded from its declared default.
    #[must_use]
    pub fn new(shape: &'static Shape) -> Self {
        let slots = shape
            .slots()
            .iter()
            .map(|slot| slot.seed().clone())
            .collect();
        Self { shape, slots }
    }

    /// Creates storage for one instance of the owner type `O`.
    #[must_use]
    pub fn for_owner<O: FieldSpec>() -> Self {
        Self::new(O::shape())
    }

    /// The slot layout this storage follows.
    #[must_use]
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Reads the field named `name` as a `T`.
    ///
    /// This is the slow path: it considers slots of every kind and
    /// reports [`FieldError::TypeMismatch`] when the name resolves to a
    /// slot holding a different type. Prefer the typed accessors for the
    /// scalar kinds.
    pub fn get<T: Field>(&self, name: &str) -> Result<T, FieldError> {
        let index = self.locate(name, any::type_name::<T>())?;
        let slot = &self.slots[index];
        match T::from_value(slot) {
            Some(value) => Ok(value.clone()),
            None => Err(FieldError::TypeMismatch {
                owner: self.shape.owner(),
                name: String::from(name),
                requested: any::type_name::<T>(),
                actual: slot.kind().name(),
            }),
        }
    }

    /// Writes `value` to the field named `name`, returning whether the
    /// stored value changed.
    ///
    /// Like [`get`](Self::get), this considers slots of every kind and
    /// reports [`FieldError::TypeMismatch`] on a kind conflict.
    pub fn set<T: Field>(&mut self, value: T, name: &str) -> Result<bool, FieldError> {
        let index = self.locate(name, any::type_name::<T>())?;
        match T::from_value(&self.slots[index]) {
            Some(current) if *current == value => Ok(false),
            Some(_) => {
                self.slots[index] = value.into_value();
                Ok(true)
            }
            None => Err(FieldError::TypeMismatch {
                owner: self.shape.owner(),
                name: String::from(name),
                requested: any::type_name::<T>(),
                actual: self.slots[index].kind().name(),
            }),
        }
    }

    /// Reads the `String` field named `name`, borrowing the stored text.
    pub fn get_text(&self, name: &str) -> Result<&str, FieldError> {
        let index = self.locate_scalar(name, FieldKind::Text)?;
        match &self.slots[index] {
            FieldValue::Text(value) => Ok(value),
            _ => Err(typed_miss(self.shape, name, FieldKind::Text)),
        }
    }

    /// Writes `value` to the `String` field named `name`, returning
    /// whether the stored text changed.
    ///
    /// An unchanged write compares without allocating.
    pub fn set_text(&mut self, value: &str, name: &str) -> Result<bool, FieldError> {
        let index = self.locate_scalar(name, FieldKind::Text)?;
        match &mut self.slots[index] {
            FieldValue::Text(current) => {
                if current == value {
                    Ok(false)
                } else {
                    *current = String::from(value);
                    Ok(true)
                }
            }
            _ => Err(typed_miss(self.shape, name, FieldKind::Text)),
        }
    }

    /// Checks everything ahead of the name lookup for the generic
    /// accessors, then resolves the name.
    fn locate(&self, name: &str, requested: &'static str) -> Result<usize, FieldError> {
        if self.shape.is_suppressed() {
            return Err(FieldError::Suppressed {
                owner: self.shape.owner(),
            });
        }
        if name.trim().is_empty() {
            return Err(FieldError::BlankName);
        }
        self.shape.slot_index(name).ok_or_else(|| FieldError::NotFound {
            owner: self.shape.owner(),
            name: String::from(name),
            requested,
        })
    }

    /// Like [`locate`](Self::locate), but rejects the request up front
    /// when the owner type declares no field of the requested kind.
    fn locate_scalar(&self, name: &str, kind: FieldKind) -> Result<usize, FieldError> {
        if self.shape.is_suppressed() {
            return Err(FieldError::Suppressed {
                owner: self.shape.owner(),
            });
        }
        if name.trim().is_empty() {
            return Err(FieldError::BlankName);
        }
        if !self.shape.has_scalar(kind) {
            return Err(FieldError::NoFieldOfType {
                owner: self.shape.owner(),
                requested: kind.name(),
            });
        }
        self.shape.slot_index(name).ok_or_else(|| FieldError::NotFound {
            owner: self.shape.owner(),
            name: String::from(name),
            requested: kind.name(),
        })
    }
}

/// The error for a typed accessor that resolved `name` to a slot of the
/// wrong kind. Typed accessors only see slots of their own kind, so this
/// reads as not-found rather than as a type mismatch.
fn typed_miss(shape: &Shape, name: &str, kind: FieldKind) -> FieldError {
    FieldError::NotFound {
        owner: shape.owner(),
        name: String::from(name),
        requested: kind.name(),
    }
}

macro_rules! scalar_accessors {
    ($($kind:ident: $ty:ty => $get:ident, $set:ident;)*) => {
        impl BackingFields {
            $(
                #[doc = concat!("Reads the `", stringify!($ty), "` field named `name`.")]
                pub fn $get(&self, name: &str) -> Result<$ty, FieldError> {
                    let index = self.locate_scalar(name, FieldKind::$kind)?;
                    match self.slots[index] {
                        FieldValue::$kind(value) => Ok(value),
                        _ => Err(typed_miss(self.shape, name, FieldKind::$kind)),
                    }
                }

                #[doc = concat!(
                    "Writes `value` to the `", stringify!($ty),
                    "` field named `name`, returning whether the stored value changed."
                )]
                pub fn $set(&mut self, value: $ty, name: &str) -> Result<bool, FieldError> {
                    let index = self.locate_scalar(name, FieldKind::$kind)?;
                    match &mut self.slots[index] {
                        FieldValue::$kind(current) => {
                            if *current == value {
                                Ok(false)
                            } else {
                                *current = value;
                                Ok(true)
                            }
                        }
                        _ => Err(typed_miss(self.shape, name, FieldKind::$kind)),
                    }
                }
            )*
        }
    };
}

scalar_accessors! {
    Bool: bool => get_bool, set_bool;
    I8: i8 => get_i8, set_i8;
    U8: u8 => get_u8, set_u8;
    I16: i16 => get_i16, set_i16;
    U16: u16 => get_u16, set_u16;
    I32: i32 => get_i32, set_i32;
    U32: u32 => get_u32, set_u32;
    I64: i64 => get_i64, set_i64;
    U64: u64 => get_u64, set_u64;
    Char: char => get_char, set_char;
    F32: f32 => get_f32, set_f32;
    F64: f64 => get_f64, set_f64;
}

impl fmt::Debug for BackingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackingFields")
            .field("owner", &self.shape.owner())
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Shape, ShapeBuilder};
    use alloc::string::ToString;
    use once_cell::race::OnceBox;

    #[derive(Clone, Debug, PartialEq)]
    enum Status {
        Idle,
        Busy,
    }

    impl Field for Status {
        fn zero() -> Self {
            Self::Idle
        }
    }

    fn sensor_shape() -> &'static Shape {
        static SHAPE: OnceBox<Shape> = OnceBox::new();
        SHAPE.get_or_init(|| {
            alloc::boxed::Box::new(
                ShapeBuilder::new("Sensor")
                    .field_with("label", "unset".to_string())
                    .field_with::<f64>("reading", 1.5)
                    .field::<u32>("samples")
                    .field::<bool>("online")
                    .field::<Status>("status")
                    .build(),
            )
        })
    }

    fn suppressed_shape() -> &'static Shape {
        static SHAPE: OnceBox<Shape> = OnceBox::new();
        SHAPE.get_or_init(|| alloc::boxed::Box::new(Shape::suppressed("Opaque")))
    }

    #[test]
    fn slots_start_at_their_seeds() {
        let fields = BackingFields::new(sensor_shape());
        assert_eq!(fields.get_text("label").unwrap(), "unset");
        assert_eq!(fields.get_f64("reading").unwrap(), 1.5);
        assert_eq!(fields.get_u32("samples").unwrap(), 0);
        assert!(!fields.get_bool("online").unwrap());
        assert_eq!(fields.get::<Status>("status").unwrap(), Status::Idle);
    }

    #[test]
    fn typed_set_reports_change_and_idempotence() {
        let mut fields = BackingFields::new(sensor_shape());
        assert!(fields.set_u32(3, "samples").unwrap());
        assert!(!fields.set_u32(3, "samples").unwrap());
        assert!(fields.set_u32(4, "samples").unwrap());
        assert_eq!(fields.get_u32("samples").unwrap(), 4);
    }

    #[test]
    fn text_set_reports_change_and_idempotence() {
        let mut fields = BackingFields::new(sensor_shape());
        assert!(fields.set_text("probe-a", "label").unwrap());
        assert!(!fields.set_text("probe-a", "label").unwrap());
        assert_eq!(fields.get_text("label").unwrap(), "probe-a");
    }

    #[test]
    fn generic_set_works_for_custom_types() {
        let mut fields = BackingFields::new(sensor_shape());
        assert!(fields.set(Status::Busy, "status").unwrap());
        assert!(!fields.set(Status::Busy, "status").unwrap());
        assert_eq!(fields.get::<Status>("status").unwrap(), Status::Busy);
    }

    #[test]
    fn generic_access_reaches_scalar_slots() {
        let mut fields = BackingFields::new(sensor_shape());
        assert!(fields.set(7_u32, "samples").unwrap());
        assert_eq!(fields.get::<u32>("samples").unwrap(), 7);
    }

    #[test]
    fn typed_accessor_misses_wrong_kind_slot() {
        let fields = BackingFields::new(sensor_shape());
        // "online" exists, but not as a u32.
        assert!(matches!(
            fields.get_u32("online"),
            Err(FieldError::NotFound { .. })
        ));
    }

    #[test]
    fn typed_accessor_rejects_undeclared_kind_before_name_lookup() {
        let fields = BackingFields::new(sensor_shape());
        // No i64 slot exists anywhere on the shape, even under this name.
        assert!(matches!(
            fields.get_i64("samples"),
            Err(FieldError::NoFieldOfType { .. })
        ));
        assert!(matches!(
            fields.get_i64("missing"),
            Err(FieldError::NoFieldOfType { .. })
        ));
    }

    #[test]
    fn generic_mismatch_names_both_types() {
        let fields = BackingFields::new(sensor_shape());
        match fields.get::<bool>("samples") {
            Err(FieldError::TypeMismatch {
                requested, actual, ..
            }) => {
                assert_eq!(requested, "bool");
                assert_eq!(actual, "u32");
            }
            other => panic!("expected a type mismatch, got {other:?}"),
        }
    }

    #[test]
    fn unknown_name_reports_not_found() {
        let mut fields = BackingFields::new(sensor_shape());
        assert!(matches!(
            fields.get_bool("missing"),
            Err(FieldError::NotFound { .. })
        ));
        assert!(matches!(
            fields.set(Status::Busy, "missing"),
            Err(FieldError::NotFound { .. })
        ));
    }

    #[test]
    fn blank_name_is_rejected_before_lookup() {
        let mut fields = BackingFields::new(sensor_shape());
        assert_eq!(fields.get_bool(""), Err(FieldError::BlankName));
        assert_eq!(fields.set_bool(true, " \t"), Err(FieldError::BlankName));
        assert_eq!(fields.get::<u32>("   "), Err(FieldError::BlankName));
    }

    #[test]
    fn suppressed_shape_rejects_everything_first() {
        let mut fields = BackingFields::new(suppressed_shape());
        assert!(matches!(
            fields.get_bool("anything"),
            Err(FieldError::Suppressed { .. })
        ));
        // Suppression outranks even a blank name.
        assert!(matches!(
            fields.set_i32(1, ""),
            Err(FieldError::Suppressed { .. })
        ));
        assert!(matches!(
            fields.get::<u32>(""),
            Err(FieldError::Suppressed { .. })
        ));
    }

    #[test]
    fn instances_do_not_share_values() {
        let mut a = BackingFields::new(sensor_shape());
        let b = BackingFields::new(sensor_shape());
        a.set_u32(9, "samples").unwrap();
        assert_eq!(a.get_u32("samples").unwrap(), 9);
        assert_eq!(b.get_u32("samples").unwrap(), 0);
    }

    #[test]
    fn every_scalar_accessor_pair_round_trips() {
        static SHAPE: OnceBox<Shape> = OnceBox::new();
        let shape = SHAPE.get_or_init(|| {
            alloc::boxed::Box::new(
                ShapeBuilder::new("Everything")
                    .field::<bool>("a")
                    .field::<i8>("b")
                    .field::<u8>("c")
                    .field::<i16>("d")
                    .field::<u16>("e")
                    .field::<i32>("f")
                    .field::<u32>("g")
                    .field::<i64>("h")
                    .field::<u64>("i")
                    .field::<char>("j")
                    .field::<f32>("k")
                    .field::<f64>("l")
                    .build(),
            )
        });
        let mut fields = BackingFields::new(shape);
        assert!(fields.set_bool(true, "a").unwrap());
        assert!(fields.set_i8(-1, "b").unwrap());
        assert!(fields.set_u8(2, "c").unwrap());
        assert!(fields.set_i16(-3, "d").unwrap());
        assert!(fields.set_u16(4, "e").unwrap());
        assert!(fields.set_i32(-5, "f").unwrap());
        assert!(fields.set_u32(6, "g").unwrap());
        assert!(fields.set_i64(-7, "h").unwrap());
        assert!(fields.set_u64(8, "i").unwrap());
        assert!(fields.set_char('x', "j").unwrap());
        assert!(fields.set_f32(1.25, "k").unwrap());
        assert!(fields.set_f64(-2.5, "l").unwrap());
        assert!(fields.get_bool("a").unwrap());
        assert_eq!(fields.get_i8("b").unwrap(), -1);
        assert_eq!(fields.get_u8("c").unwrap(), 2);
        assert_eq!(fields.get_i16("d").unwrap(), -3);
        assert_eq!(fields.get_u16("e").unwrap(), 4);
        assert_eq!(fields.get_i32("f").unwrap(), -5);
        assert_eq!(fields.get_u32("g").unwrap(), 6);
        assert_eq!(fields.get_i64("h").unwrap(), -7);
        assert_eq!(fields.get_u64("i").unwrap(), 8);
        assert_eq!(fields.get_char("j").unwrap(), 'x');
        assert_eq!(fields.get_f32("k").unwrap(), 1.25);
        assert_eq!(fields.get_f64("l").unwrap(), -2.5);
    }

    #[test]
    fn case_sensitive_names() {
        let fields = BackingFields::new(sensor_shape());
        assert!(matches!(
            fields.get_u32("Samples"),
            Err(FieldError::NotFound { .. })
        ));
    }
}
