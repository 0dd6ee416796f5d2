//! Generatable models and their compile-time identity.
//!
//! A model is a plain struct whose field table is written by
//! `#[derive(Model)]`. The generator only ever talks to the trait below; it
//! never looks at concrete types.

use crate::field::{FieldDescriptor, FieldValue};
use crate::generator::{generate_erased, GenerateFn};
use crate::result::EnsayoResult;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A data-carrying type the generator can build and fill in.
///
/// Normally implemented with `#[derive(Model)]`:
///
/// ```ignore
/// #[derive(Debug, Clone, Default, Model)]
/// pub struct BuildType {
///     #[ensayo(param, random)]
///     pub id: Option<String>,
///     #[ensayo(random)]
///     pub name: Option<String>,
///     pub project: Option<Rc<Project>>,
/// }
/// ```
pub trait Model: Any + fmt::Debug + Sized {
    /// Identity used for exact-type reuse-pool matching
    const TAG: ModelTag;

    /// Field descriptors in declaration order
    const FIELDS: &'static [FieldDescriptor];

    /// Build the empty instance the generator fills in.
    ///
    /// # Errors
    ///
    /// Returns [`EnsayoError::Construction`](crate::EnsayoError::Construction)
    /// if the model cannot be instantiated.
    fn construct() -> EnsayoResult<Self>;

    /// Write `value` into the field at `index` of [`Model::FIELDS`].
    ///
    /// # Errors
    ///
    /// Returns [`EnsayoError::FieldAccess`](crate::EnsayoError::FieldAccess)
    /// if the index is not writable or the value kind does not fit the field.
    fn write_field(&mut self, index: usize, value: FieldValue) -> EnsayoResult<()>;

    /// Field descriptors in declaration order
    fn describe() -> &'static [FieldDescriptor] {
        Self::FIELDS
    }
}

/// Identity of a model type.
///
/// Equality compares the runtime [`TypeId`], so two types that share a name
/// and module path (for example structs local to different functions) never
/// match each other.
#[derive(Clone, Copy)]
pub struct ModelTag {
    name: &'static str,
    path: &'static str,
    type_id: fn() -> TypeId,
}

impl ModelTag {
    /// Tag for `T` with a display name and the type path used in logs
    #[must_use]
    pub const fn of<T: 'static>(name: &'static str, path: &'static str) -> Self {
        Self {
            name,
            path,
            type_id: TypeId::of::<T>,
        }
    }

    /// Display name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Type path as written at the derive site
    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Runtime identity of the tagged type
    #[must_use]
    pub fn runtime_id(&self) -> TypeId {
        (self.type_id)()
    }
}

impl PartialEq for ModelTag {
    fn eq(&self, other: &Self) -> bool {
        self.runtime_id() == other.runtime_id()
    }
}

impl Eq for ModelTag {}

impl Hash for ModelTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.runtime_id().hash(state);
    }
}

impl fmt::Debug for ModelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelTag")
            .field("name", &self.name)
            .field("path", &self.path)
            .finish()
    }
}

impl fmt::Display for ModelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Type-erased handle to a model type, stored in field descriptors of
/// nested fields so the generator can recurse without knowing the type.
#[derive(Clone, Copy)]
pub struct ModelType {
    tag: ModelTag,
    generate: GenerateFn,
}

impl ModelType {
    /// Handle for `T`
    #[must_use]
    pub const fn of<T: Model>() -> Self {
        Self {
            tag: T::TAG,
            generate: generate_erased::<T>,
        }
    }

    /// The model's tag
    #[must_use]
    pub const fn tag(&self) -> ModelTag {
        self.tag
    }

    pub(crate) const fn generate_fn(&self) -> GenerateFn {
        self.generate
    }
}

impl PartialEq for ModelType {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
    }
}

impl Eq for ModelType {}

impl fmt::Debug for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModelType").field(&self.tag.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_identity_follows_type() {
        let a = ModelTag::of::<u8>("Project", "harness::models::Project");
        let b = ModelTag::of::<u8>("Project", "harness::legacy::Project");
        let c = ModelTag::of::<u16>("Project", "harness::models::Project");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.path(), c.path());
    }

    #[test]
    fn test_tag_usable_in_const() {
        const TAG: ModelTag = ModelTag::of::<String>("Role", "ensayo::models::Role");
        assert_eq!(TAG.runtime_id(), TypeId::of::<String>());
    }

    #[test]
    fn test_tag_display_uses_name() {
        let tag = ModelTag::of::<u8>("NewProjectDescription", "ensayo::models::Project");
        assert_eq!(tag.to_string(), "NewProjectDescription");
    }
}
