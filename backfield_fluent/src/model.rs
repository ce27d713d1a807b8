// Copyright 2026 the Backfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The owner base that models embed.

use core::fmt;
use core::marker::PhantomData;

use backfield_store::{BackingFields, Field, FieldError, FieldSpec};

use crate::action::FluentAction;
use crate::sink::ChangedSink;

/// The storage-and-notification core of one model instance.
///
/// A model embeds a `ModelCore` for its own owner type and delegates to
/// it, either directly or through [`FluentModel`]. The core owns the
/// instance's [`BackingFields`], seeded from `O`'s shape, and the
/// [`ChangedSink`] its chains raise into; the two live and die with the
/// model.
///
/// Every write path reports through the sink exactly when it changes a
/// stored value. The fluent entry points [`when`](Self::when) and
/// [`set`](Self::set) start a [`FluentAction`] chain for writes that
/// carry dependent notifications with them.
pub struct ModelCore<O: FieldSpec> {
    fields: BackingFields,
    changed: ChangedSink,
    owner: PhantomData<fn() -> O>,
}

impl<O: FieldSpec> ModelCore<O> {
    /// Creates a core with every field at its seed and no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: BackingFields::for_owner::<O>(),
            changed: ChangedSink::new(),
            owner: PhantomData,
        }
    }

    /// The instance's slot storage.
    #[must_use]
    pub fn fields(&self) -> &BackingFields {
        &self.fields
    }

    /// Appends a change subscriber.
    pub fn subscribe(&mut self, subscriber: impl Fn(&str) + Send + Sync + 'static) {
        self.changed.subscribe(subscriber);
    }

    /// Raises a change notification for `name` as given, without
    /// touching storage.
    pub fn raise_changed(&self, name: &str) {
        self.changed.raise(name);
    }

    /// Starts a fluent chain that is active when `condition` holds.
    pub fn when(&mut self, condition: bool) -> FluentAction<'_> {
        if condition {
            let Self {
                fields, changed, ..
            } = self;
            FluentAction::Active {
                fields,
                changed: &*changed,
            }
        } else {
            FluentAction::Inert
        }
    }

    /// Starts a fluent chain that is active when `condition()` holds.
    ///
    /// The closure is evaluated exactly once, up front.
    pub fn when_with(&mut self, condition: impl FnOnce() -> bool) -> FluentAction<'_> {
        let active = condition();
        self.when(active)
    }

    /// Reads the field named `name` as a `T`.
    pub fn get<T: Field>(&self, name: &str) -> Result<T, FieldError> {
        self.fields.get(name)
    }

    /// Writes `value` to the field named `name`, raising a notification
    /// when the stored value changes.
    ///
    /// Returns the continuation of the write: active if the value
    /// changed, inert otherwise, so dependent notifications chain on.
    pub fn set<T: Field>(&mut self, value: T, name: &str) -> Result<FluentAction<'_>, FieldError> {
        let Self {
            fields, changed, ..
        } = self;
        if fields.set(value, name)? {
            changed.raise(name);
            Ok(FluentAction::Active {
                fields,
                changed: &*changed,
            })
        } else {
            Ok(FluentAction::Inert)
        }
    }

    /// Reads the `String` field named `name`, borrowing the stored text.
    pub fn get_text(&self, name: &str) -> Result<&str, FieldError> {
        self.fields.get_text(name)
    }

    /// Writes `value` to the `String` field named `name`, raising a
    /// notification when the stored text changes.
    pub fn set_text(&mut self, value: &str, name: &str) -> Result<FluentAction<'_>, FieldError> {
        let Self {
            fields, changed, ..
        } = self;
        if fields.set_text(value, name)? {
            changed.raise(name);
            Ok(FluentAction::Active {
                fields,
                changed: &*changed,
            })
        } else {
            Ok(FluentAction::Inert)
        }
    }
}

macro_rules! delegate_scalars {
    ($($ty:ty => $get:ident, $set:ident;)*) => {
        impl<O: FieldSpec> ModelCore<O> {
            $(
                #[doc = concat!("Reads the `", stringify!($ty), "` field named `name`.")]
                pub fn $get(&self, name: &str) -> Result<$ty, FieldError> {
                    self.fields.$get(name)
                }

                #[doc = concat!(
                    "Writes `value` to the `", stringify!($ty),
                    "` field named `name`, raising a notification when the stored value changes."
                )]
                pub fn $set(&mut self, value: $ty, name: &str) -> Result<FluentAction<'_>, FieldError> {
                    let Self { fields, changed, .. } = self;
                    if fields.$set(value, name)? {
                        changed.raise(name);
                        Ok(FluentAction::Active { fields, changed: &*changed })
                    } else {
                        Ok(FluentAction::Inert)
                    }
                }
            )*
        }
    };
}

delegate_scalars! {
    bool => get_bool, set_bool;
    i8 => get_i8, set_i8;
    u8 => get_u8, set_u8;
    i16 => get_i16, set_i16;
    u16 => get_u16, set_u16;
    i32 => get_i32, set_i32;
    u32 => get_u32, set_u32;
    i64 => get_i64, set_i64;
    u64 => get_u64, set_u64;
    char => get_char, set_char;
    f32 => get_f32, set_f32;
    f64 => get_f64, set_f64;
}

impl<O: FieldSpec> Default for ModelCore<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: FieldSpec> fmt::Debug for ModelCore<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelCore")
            .field("fields", &self.fields)
            .field("changed", &self.changed)
            .finish_non_exhaustive()
    }
}

/// A model that embeds a [`ModelCore`].
///
/// Implementing this trait is the whole integration: the blanket
/// [`FluentModelExt`] then puts the fluent surface on the model itself.
///
/// ```rust
/// use backfield_fluent::{FluentModel, FluentModelExt, ModelCore};
/// use backfield_store::backing_fields;
///
/// struct Person {
///     core: ModelCore<Person>,
/// }
///
/// backing_fields! {
///     Person {
///         name: String = String::from("n/a"),
///         age: i32,
///     }
/// }
///
/// impl FluentModel for Person {
///     type Owner = Person;
///
///     fn model_core(&self) -> &ModelCore<Person> {
///         &self.core
///     }
///
///     fn model_core_mut(&mut self) -> &mut ModelCore<Person> {
///         &mut self.core
///     }
/// }
///
/// let mut person = Person {
///     core: ModelCore::new(),
/// };
/// person.set(30_i32, "age").unwrap();
/// assert_eq!(person.get::<i32>("age").unwrap(), 30);
/// ```
pub trait FluentModel {
    /// The owner type whose shape lays out the model's fields.
    type Owner: FieldSpec;

    /// Borrows the embedded core.
    fn model_core(&self) -> &ModelCore<Self::Owner>;

    /// Mutably borrows the embedded core.
    fn model_core_mut(&mut self) -> &mut ModelCore<Self::Owner>;
}

/// Convenience methods for every [`FluentModel`].
pub trait FluentModelExt: FluentModel {
    /// Reads the field named `name` as a `T`.
    fn get<T: Field>(&self, name: &str) -> Result<T, FieldError> {
        self.model_core().get(name)
    }

    /// Writes `value` to the field named `name`, raising a notification
    /// when the stored value changes.
    fn set<T: Field>(&mut self, value: T, name: &str) -> Result<FluentAction<'_>, FieldError> {
        self.model_core_mut().set(value, name)
    }

    /// Starts a fluent chain that is active when `condition` holds.
    fn when(&mut self, condition: bool) -> FluentAction<'_> {
        self.model_core_mut().when(condition)
    }

    /// Starts a fluent chain that is active when `condition()` holds.
    fn when_with(&mut self, condition: impl FnOnce() -> bool) -> FluentAction<'_> {
        self.model_core_mut().when_with(condition)
    }

    /// Appends a change subscriber.
    fn subscribe(&mut self, subscriber: impl Fn(&str) + Send + Sync + 'static) {
        self.model_core_mut().subscribe(subscriber);
    }

    /// Raises a change notification for `name` as given.
    fn raise_changed(&self, name: &str) {
        self.model_core().raise_changed(name);
    }
}

impl<M: FluentModel> FluentModelExt for M {}
