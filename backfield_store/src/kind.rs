// Copyright 2026 the Backfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed set of storage kinds a backing field can have.

use core::any::TypeId;
use core::fmt;

/// The storage kind of a backing field.
///
/// The twelve numeric and character kinds plus [`Text`](Self::Text) form
/// the scalar set, each with its own unboxed slot representation and a
/// dedicated typed accessor pair on
/// [`BackingFields`](crate::BackingFields). Every other field type is
/// carried as [`Other`](Self::Other) and accessed through the generic
/// accessors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A `bool` slot.
    Bool,
    /// An `i8` slot.
    I8,
    /// A `u8` slot.
    U8,
    /// An `i16` slot.
    I16,
    /// A `u16` slot.
    U16,
    /// An `i32` slot.
    I32,
    /// A `u32` slot.
    U32,
    /// An `i64` slot.
    I64,
    /// A `u64` slot.
    U64,
    /// A `char` slot.
    Char,
    /// An `f32` slot.
    F32,
    /// An `f64` slot.
    F64,
    /// A `String` slot.
    Text,
    /// A type-erased slot for any other field type.
    Other {
        /// The concrete type stored in the slot.
        type_id: TypeId,
        /// Human-readable name of the stored type, for diagnostics.
        type_name: &'static str,
    },
}

impl FieldKind {
    /// The number of scalar kinds, which bounds the per-shape presence
    /// mask.
    pub const SCALAR_COUNT: u32 = 13;

    /// Returns this kind's index into the scalar presence mask, or
    /// `None` for [`Other`](Self::Other).
    #[must_use]
    pub(crate) fn scalar_index(self) -> Option<u32> {
        match self {
            Self::Bool => Some(0),
            Self::I8 => Some(1),
            Self::U8 => Some(2),
            Self::I16 => Some(3),
            Self::U16 => Some(4),
            Self::I32 => Some(5),
            Self::U32 => Some(6),
            Self::I64 => Some(7),
            Self::U64 => Some(8),
            Self::Char => Some(9),
            Self::F32 => Some(10),
            Self::F64 => Some(11),
            Self::Text => Some(12),
            Self::Other { .. } => None,
        }
    }

    /// Whether this kind is one of the scalar kinds.
    #[must_use]
    pub fn is_scalar(self) -> bool {
        self.scalar_index().is_some()
    }

    /// A human-readable name for this kind.
    ///
    /// Scalar kinds report their Rust type name; [`Other`](Self::Other)
    /// reports the name of the erased type.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::U8 => "u8",
            Self::I16 => "i16",
            Self::U16 => "u16",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::I64 => "i64",
            Self::U64 => "u64",
            Self::Char => "char",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Text => "String",
            Self::Other { type_name, .. } => type_name,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn scalar_indices_are_distinct_and_bounded() {
        let kinds = [
            FieldKind::Bool,
            FieldKind::I8,
            FieldKind::U8,
            FieldKind::I16,
            FieldKind::U16,
            FieldKind::I32,
            FieldKind::U32,
            FieldKind::I64,
            FieldKind::U64,
            FieldKind::Char,
            FieldKind::F32,
            FieldKind::F64,
            FieldKind::Text,
        ];
        let mut seen = 0_u16;
        for kind in kinds {
            let index = kind.scalar_index().unwrap();
            assert!(index < FieldKind::SCALAR_COUNT);
            assert_eq!(seen & (1 << index), 0, "scalar index reused");
            seen |= 1 << index;
        }
        assert_eq!(seen.count_ones(), FieldKind::SCALAR_COUNT);
    }

    #[test]
    fn other_is_not_scalar() {
        let kind = FieldKind::Other {
            type_id: TypeId::of::<Option<i32>>(),
            type_name: "core::option::Option<i32>",
        };
        assert!(!kind.is_scalar());
        assert_eq!(kind.scalar_index(), None);
    }

    #[test]
    fn display_uses_type_names() {
        assert_eq!(FieldKind::Text.to_string(), "String");
        assert_eq!(FieldKind::I32.to_string(), "i32");
    }
}
