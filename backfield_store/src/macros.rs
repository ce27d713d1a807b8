// Copyright 2026 the Backfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`backing_fields!`](crate::backing_fields) declaration macro.

/// Declares the backing field layout of an owner type.
///
/// Expands to a [`FieldSpec`](crate::FieldSpec) implementation whose
/// shape is built on first use and shared by every instance of the owner
/// type afterwards. Each field is `name: Type`, optionally with
/// `= expression` to seed a default other than the type's zero value.
/// A field marked `#[skip]` is left out of the layout entirely, and an
/// owner marked `#[suppress]` opts out of backing field storage: its
/// shape is empty and every accessor fails with
/// [`FieldError::Suppressed`](crate::FieldError::Suppressed).
///
/// ```rust
/// use backfield_store::{backing_fields, BackingFields};
///
/// struct Track;
///
/// backing_fields! {
///     Track {
///         title: String = String::from("untitled"),
///         plays: u64,
///         #[skip]
///         waveform: Vec<f32>,
///         favorite: bool,
///     }
/// }
///
/// let mut fields = BackingFields::for_owner::<Track>();
/// assert_eq!(fields.get_text("title").unwrap(), "untitled");
/// assert!(fields.set_u64(1, "plays").unwrap());
/// ```
#[macro_export]
macro_rules! backing_fields {
    // A suppressed owner may still list fields; they are not analyzed.
    (#[suppress] $owner:ty { $($fields:tt)* }) => {
        $crate::backing_fields!(#[suppress] $owner);
    };
    (#[suppress] $owner:ty) => {
        impl $crate::FieldSpec for $owner {
            fn shape() -> &'static $crate::Shape {
                static SHAPE: $crate::__private::OnceBox<$crate::Shape> =
                    $crate::__private::OnceBox::new();
                SHAPE.get_or_init(|| {
                    $crate::__private::Box::new($crate::Shape::suppressed(::core::stringify!(
                        $owner
                    )))
                })
            }
        }
    };
    ($owner:ty { $($fields:tt)* }) => {
        impl $crate::FieldSpec for $owner {
            fn shape() -> &'static $crate::Shape {
                static SHAPE: $crate::__private::OnceBox<$crate::Shape> =
                    $crate::__private::OnceBox::new();
                SHAPE.get_or_init(|| {
                    let builder = $crate::ShapeBuilder::new(::core::stringify!($owner));
                    let builder = $crate::__backing_fields_body!(builder; $($fields)*);
                    $crate::__private::Box::new(builder.build())
                })
            }
        }
    };
}

/// Folds one field declaration at a time into a
/// [`ShapeBuilder`](crate::ShapeBuilder) expression.
#[doc(hidden)]
#[macro_export]
macro_rules! __backing_fields_body {
    ($builder:expr;) => {
        $builder
    };
    ($builder:expr; #[skip] $name:ident : $ty:ty , $($rest:tt)*) => {
        $crate::__backing_fields_body!($builder; $($rest)*)
    };
    ($builder:expr; #[skip] $name:ident : $ty:ty) => {
        $builder
    };
    ($builder:expr; $name:ident : $ty:ty = $default:expr , $($rest:tt)*) => {
        $crate::__backing_fields_body!(
            $builder.field_with::<$ty>(::core::stringify!($name), $default);
            $($rest)*
        )
    };
    ($builder:expr; $name:ident : $ty:ty = $default:expr) => {
        $builder.field_with::<$ty>(::core::stringify!($name), $default)
    };
    ($builder:expr; $name:ident : $ty:ty , $($rest:tt)*) => {
        $crate::__backing_fields_body!(
            $builder.field::<$ty>(::core::stringify!($name));
            $($rest)*
        )
    };
    ($builder:expr; $name:ident : $ty:ty) => {
        $builder.field::<$ty>(::core::stringify!($name))
    };
}
