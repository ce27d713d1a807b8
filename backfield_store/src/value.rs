// Copyright 2026 the Backfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot values and the [`Field`] trait that types stored in slots
//! implement.

use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};
use core::fmt;

use crate::FieldKind;

/// Object-safe backing for [`ErasedValue`].
trait ErasedFieldValue: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn clone_boxed(&self) -> Box<dyn ErasedFieldValue>;
    fn eq_erased(&self, other: &dyn Any) -> bool;
}

impl<T: Clone + PartialEq + Send + Sync + 'static> ErasedFieldValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_boxed(&self) -> Box<dyn ErasedFieldValue> {
        Box::new(self.clone())
    }

    fn eq_erased(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<Self>().is_some_and(|other| self == other)
    }
}

/// A type-erased field value.
///
/// Wraps any `Clone + PartialEq + Send + Sync + 'static` value so that
/// non-scalar field types can live in the same slot array as the scalar
/// kinds. Equality compares the erased values when their types match and
/// is `false` otherwise.
pub struct ErasedValue {
    type_id: TypeId,
    type_name: &'static str,
    inner: Box<dyn ErasedFieldValue>,
}

impl ErasedValue {
    /// Erases `value`.
    #[must_use]
    pub fn new<T: Clone + PartialEq + Send + Sync + 'static>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: core::any::type_name::<T>(),
            inner: Box::new(value),
        }
    }

    /// The [`TypeId`] of the erased value.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Human-readable name of the erased type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether the erased value is a `T`.
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Borrows the erased value as a `T`, if it is one.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.as_any().downcast_ref()
    }
}

impl Clone for ErasedValue {
    fn clone(&self) -> Self {
        Self {
            type_id: self.type_id,
            type_name: self.type_name,
            inner: self.inner.clone_boxed(),
        }
    }
}

impl PartialEq for ErasedValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.inner.eq_erased(other.inner.as_any())
    }
}

impl fmt::Debug for ErasedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// A single slot's value, unboxed for the scalar kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// A `bool` value.
    Bool(bool),
    /// An `i8` value.
    I8(i8),
    /// A `u8` value.
    U8(u8),
    /// An `i16` value.
    I16(i16),
    /// A `u16` value.
    U16(u16),
    /// An `i32` value.
    I32(i32),
    /// A `u32` value.
    U32(u32),
    /// An `i64` value.
    I64(i64),
    /// A `u64` value.
    U64(u64),
    /// A `char` value.
    Char(char),
    /// An `f32` value.
    F32(f32),
    /// An `f64` value.
    F64(f64),
    /// A `String` value.
    Text(String),
    /// Any other value, type-erased.
    Other(ErasedValue),
}

impl FieldValue {
    /// The kind of this value.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Bool(_) => FieldKind::Bool,
            Self::I8(_) => FieldKind::I8,
            Self::U8(_) => FieldKind::U8,
            Self::I16(_) => FieldKind::I16,
            Self::U16(_) => FieldKind::U16,
            Self::I32(_) => FieldKind::I32,
            Self::U32(_) => FieldKind::U32,
            Self::I64(_) => FieldKind::I64,
            Self::U64(_) => FieldKind::U64,
            Self::Char(_) => FieldKind::Char,
            Self::F32(_) => FieldKind::F32,
            Self::F64(_) => FieldKind::F64,
            Self::Text(_) => FieldKind::Text,
            Self::Other(value) => FieldKind::Other {
                type_id: value.type_id(),
                type_name: value.type_name(),
            },
        }
    }
}

/// A type that can be stored in a backing field slot.
///
/// The scalar types (`bool`, the fixed-width integers, `char`, `f32`,
/// `f64`, and `String`) have dedicated implementations that map onto the
/// unboxed [`FieldValue`] variants. Any other `Clone + PartialEq + Send +
/// Sync + 'static` type only has to name its zero value; the provided
/// methods route it through [`FieldValue::Other`].
///
/// ```rust
/// use backfield_store::Field;
///
/// #[derive(Clone, PartialEq)]
/// enum Status {
///     Idle,
///     Busy,
/// }
///
/// impl Field for Status {
///     fn zero() -> Self {
///         Status::Idle
///     }
/// }
/// ```
pub trait Field: Clone + PartialEq + Send + Sync + 'static {
    /// The value a slot of this type holds before anything is written to
    /// it, unless the slot declares its own default.
    #[must_use]
    fn zero() -> Self;

    /// The storage kind slots of this type use.
    #[must_use]
    fn kind() -> FieldKind {
        FieldKind::Other {
            type_id: TypeId::of::<Self>(),
            type_name: core::any::type_name::<Self>(),
        }
    }

    /// Moves `self` into a slot value.
    #[must_use]
    fn into_value(self) -> FieldValue {
        FieldValue::Other(ErasedValue::new(self))
    }

    /// Borrows `self` back out of a slot value, if the kinds agree.
    #[must_use]
    fn from_value(value: &FieldValue) -> Option<&Self> {
        match value {
            FieldValue::Other(erased) => erased.downcast_ref(),
            _ => None,
        }
    }
}

macro_rules! scalar_field {
    ($($ty:ty => $variant:ident, $zero:expr;)*) => {
        $(
            impl Field for $ty {
                fn zero() -> Self {
                    $zero
                }

                fn kind() -> FieldKind {
                    FieldKind::$variant
                }

                fn into_value(self) -> FieldValue {
                    FieldValue::$variant(self)
                }

                fn from_value(value: &FieldValue) -> Option<&Self> {
                    match value {
                        FieldValue::$variant(value) => Some(value),
                        _ => None,
                    }
                }
            }
        )*
    };
}

scalar_field! {
    bool => Bool, false;
    i8 => I8, 0;
    u8 => U8, 0;
    i16 => I16, 0;
    u16 => U16, 0;
    i32 => I32, 0;
    u32 => U32, 0;
    i64 => I64, 0;
    u64 => U64, 0;
    char => Char, '\0';
    f32 => F32, 0.0;
    f64 => F64, 0.0;
    String => Text, String::new();
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::ToString;

    #[derive(Clone, Debug, PartialEq)]
    struct Point {
        x: f64,
        y: f64,
    }

    impl Field for Point {
        fn zero() -> Self {
            Self { x: 0.0, y: 0.0 }
        }
    }

    #[test]
    fn scalar_round_trips_through_its_variant() {
        let value = 42_i32.into_value();
        assert_eq!(value, FieldValue::I32(42));
        assert_eq!(i32::from_value(&value), Some(&42));
        assert_eq!(value.kind(), FieldKind::I32);
    }

    #[test]
    fn scalar_rejects_foreign_variant() {
        let value = FieldValue::Bool(true);
        assert_eq!(i32::from_value(&value), None);
    }

    #[test]
    fn text_maps_onto_the_text_variant() {
        let value = "hello".to_string().into_value();
        assert_eq!(value.kind(), FieldKind::Text);
        assert_eq!(String::from_value(&value).map(String::as_str), Some("hello"));
    }

    #[test]
    fn custom_type_erases_and_downcasts() {
        let point = Point { x: 1.0, y: 2.0 };
        let value = point.clone().into_value();
        assert!(!value.kind().is_scalar());
        assert_eq!(Point::from_value(&value), Some(&point));
        assert_eq!(i32::from_value(&value), None);
    }

    #[test]
    fn erased_equality_requires_matching_types() {
        let a = ErasedValue::new(Point { x: 1.0, y: 2.0 });
        let b = ErasedValue::new(Point { x: 1.0, y: 2.0 });
        let c = ErasedValue::new(Point { x: 3.0, y: 4.0 });
        let d = ErasedValue::new(7_u64);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn erased_debug_names_the_type() {
        let value = ErasedValue::new(Point { x: 0.0, y: 0.0 });
        assert!(format!("{value:?}").contains("Point"));
    }

    #[test]
    fn zero_values_match_the_natural_defaults() {
        assert!(!bool::zero());
        assert_eq!(char::zero(), '\0');
        assert_eq!(String::zero(), "");
        assert_eq!(Point::zero(), Point { x: 0.0, y: 0.0 });
    }
}
