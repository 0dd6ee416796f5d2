//! Field descriptors, policy tags and the values written into fields.

use crate::model::{Model, ModelType};
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Policy markers attached to a field with `#[ensayo(...)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PolicyTags {
    skip: bool,
    param: bool,
    random: bool,
}

impl PolicyTags {
    /// Create a tag set
    #[must_use]
    pub const fn new(skip: bool, param: bool, random: bool) -> Self {
        Self {
            skip,
            param,
            random,
        }
    }

    /// Field is never written
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        self.skip
    }

    /// Field accepts positional parameters
    #[must_use]
    pub const fn is_param(&self) -> bool {
        self.param
    }

    /// Field is filled from the random provider
    #[must_use]
    pub const fn is_random(&self) -> bool {
        self.random
    }
}

/// Declared type of a field, as far as generation is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredType {
    /// String scalar
    Str,
    /// Integer scalar
    Int,
    /// Boolean scalar
    Bool,
    /// Nested model
    Model(ModelType),
    /// Sequence of a nested model
    ModelList(ModelType),
    /// Anything else, by type name
    Other(&'static str),
}

impl DeclaredType {
    /// Model type of a nested or list field
    #[must_use]
    pub const fn model_type(&self) -> Option<ModelType> {
        match self {
            Self::Model(model) | Self::ModelList(model) => Some(*model),
            _ => None,
        }
    }

    /// Human-readable type description for error messages
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Str => "string".to_string(),
            Self::Int => "integer".to_string(),
            Self::Bool => "boolean".to_string(),
            Self::Model(model) => model.tag().name().to_string(),
            Self::ModelList(model) => format!("list of {}", model.tag().name()),
            Self::Other(name) => (*name).to_string(),
        }
    }
}

/// One entry of a model's field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    declared: DeclaredType,
    policy: PolicyTags,
}

impl FieldDescriptor {
    /// Create a descriptor
    #[must_use]
    pub const fn new(name: &'static str, declared: DeclaredType, policy: PolicyTags) -> Self {
        Self {
            name,
            declared,
            policy,
        }
    }

    /// Field name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Declared type
    #[must_use]
    pub const fn declared(&self) -> DeclaredType {
        self.declared
    }

    /// Policy markers
    #[must_use]
    pub const fn policy(&self) -> PolicyTags {
        self.policy
    }
}

/// A value the generator writes into a field.
///
/// Positional parameters are `FieldValue`s too; the [`params!`](crate::params)
/// macro converts plain Rust values.
#[derive(Clone)]
pub enum FieldValue {
    /// String scalar
    Str(String),
    /// Integer scalar
    Int(i64),
    /// Boolean scalar
    Bool(bool),
    /// Shared model instance
    Model(Rc<dyn Any>),
    /// Sequence of shared model instances
    ModelList(Vec<Rc<dyn Any>>),
}

impl FieldValue {
    /// Kind name for error messages
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
            Self::Bool(_) => "boolean",
            Self::Model(_) => "model",
            Self::ModelList(_) => "model list",
        }
    }

    fn mismatch(&self, expected: &str) -> String {
        format!("expected {expected}, found {}", self.kind())
    }

    /// Unwrap a string value
    pub fn into_string(self) -> Result<String, String> {
        match self {
            Self::Str(value) => Ok(value),
            other => Err(other.mismatch("string")),
        }
    }

    /// Unwrap an integer value
    pub fn into_i64(self) -> Result<i64, String> {
        match self {
            Self::Int(value) => Ok(value),
            other => Err(other.mismatch("integer")),
        }
    }

    /// Unwrap a boolean value
    pub fn into_bool(self) -> Result<bool, String> {
        match self {
            Self::Bool(value) => Ok(value),
            other => Err(other.mismatch("boolean")),
        }
    }

    /// Unwrap a model instance of type `T`
    pub fn into_model<T: Model>(self) -> Result<Rc<T>, String> {
        match self {
            Self::Model(instance) => downcast::<T>(instance),
            other => Err(other.mismatch(T::TAG.name())),
        }
    }

    /// Unwrap a list of model instances of type `T`
    pub fn into_model_list<T: Model>(self) -> Result<Vec<Rc<T>>, String> {
        match self {
            Self::ModelList(items) => items.into_iter().map(downcast::<T>).collect(),
            other => Err(other.mismatch(&format!("list of {}", T::TAG.name()))),
        }
    }
}

fn downcast<T: Model>(instance: Rc<dyn Any>) -> Result<Rc<T>, String> {
    instance
        .downcast::<T>()
        .map_err(|_| format!("expected {}, found another model", T::TAG.name()))
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => f.debug_tuple("Str").field(value).finish(),
            Self::Int(value) => f.debug_tuple("Int").field(value).finish(),
            Self::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Self::Model(_) => f.write_str("Model(..)"),
            Self::ModelList(items) => write!(f, "ModelList(len={})", items.len()),
        }
    }
}

impl PartialEq for FieldValue {
    /// Scalars compare by value, models by identity
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Model(a), Self::Model(b)) => Rc::ptr_eq(a, b),
            (Self::ModelList(a), Self::ModelList(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| Rc::ptr_eq(x, y))
            }
            _ => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Model> From<Rc<T>> for FieldValue {
    fn from(value: Rc<T>) -> Self {
        Self::Model(value)
    }
}

/// Rust field types the derive macro can describe and assign.
///
/// Scalars are usually `Option<_>` so that an untouched field stays `None`.
/// Nested models are shared through `Rc` so a pooled instance can sit in
/// several fields at once.
pub trait FieldType {
    /// How the generator sees this type
    const DECLARED: DeclaredType;

    /// Store `value` in `slot`, or describe why it does not fit
    fn assign(slot: &mut Self, value: FieldValue) -> Result<(), String>;
}

impl FieldType for Option<String> {
    const DECLARED: DeclaredType = DeclaredType::Str;

    fn assign(slot: &mut Self, value: FieldValue) -> Result<(), String> {
        *slot = Some(value.into_string()?);
        Ok(())
    }
}

impl FieldType for String {
    const DECLARED: DeclaredType = DeclaredType::Str;

    fn assign(slot: &mut Self, value: FieldValue) -> Result<(), String> {
        *slot = value.into_string()?;
        Ok(())
    }
}

impl FieldType for Option<i64> {
    const DECLARED: DeclaredType = DeclaredType::Int;

    fn assign(slot: &mut Self, value: FieldValue) -> Result<(), String> {
        *slot = Some(value.into_i64()?);
        Ok(())
    }
}

impl FieldType for i64 {
    const DECLARED: DeclaredType = DeclaredType::Int;

    fn assign(slot: &mut Self, value: FieldValue) -> Result<(), String> {
        *slot = value.into_i64()?;
        Ok(())
    }
}

impl FieldType for Option<i32> {
    const DECLARED: DeclaredType = DeclaredType::Int;

    fn assign(slot: &mut Self, value: FieldValue) -> Result<(), String> {
        let wide = value.into_i64()?;
        let narrow = i32::try_from(wide).map_err(|_| format!("{wide} does not fit in i32"))?;
        *slot = Some(narrow);
        Ok(())
    }
}

impl FieldType for Option<bool> {
    const DECLARED: DeclaredType = DeclaredType::Bool;

    fn assign(slot: &mut Self, value: FieldValue) -> Result<(), String> {
        *slot = Some(value.into_bool()?);
        Ok(())
    }
}

impl FieldType for bool {
    const DECLARED: DeclaredType = DeclaredType::Bool;

    fn assign(slot: &mut Self, value: FieldValue) -> Result<(), String> {
        *slot = value.into_bool()?;
        Ok(())
    }
}

impl FieldType for Option<f64> {
    const DECLARED: DeclaredType = DeclaredType::Other("f64");

    fn assign(_slot: &mut Self, value: FieldValue) -> Result<(), String> {
        Err(value.mismatch("f64"))
    }
}

impl<T: Model> FieldType for Option<Rc<T>> {
    const DECLARED: DeclaredType = DeclaredType::Model(ModelType::of::<T>());

    fn assign(slot: &mut Self, value: FieldValue) -> Result<(), String> {
        *slot = Some(value.into_model::<T>()?);
        Ok(())
    }
}

impl<T: Model> FieldType for Vec<Rc<T>> {
    const DECLARED: DeclaredType = DeclaredType::ModelList(ModelType::of::<T>());

    fn assign(slot: &mut Self, value: FieldValue) -> Result<(), String> {
        *slot = value.into_model_list::<T>()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod field_value_tests {
        use super::*;

        #[test]
        fn test_conversions() {
            assert_eq!(FieldValue::from("p:proj1"), FieldValue::Str("p:proj1".into()));
            assert_eq!(FieldValue::from(7_i32), FieldValue::Int(7));
            assert_eq!(FieldValue::from(false), FieldValue::Bool(false));
        }

        #[test]
        fn test_mismatch_message() {
            let err = FieldValue::Int(3).into_string().unwrap_err();
            assert_eq!(err, "expected string, found integer");
        }

        #[test]
        fn test_debug_hides_model_payload() {
            let value = FieldValue::ModelList(Vec::new());
            assert_eq!(format!("{value:?}"), "ModelList(len=0)");
        }
    }

    mod field_type_tests {
        use super::*;

        #[test]
        fn test_assign_optional_string() {
            let mut slot: Option<String> = None;
            <Option<String> as FieldType>::assign(&mut slot, "guest".into()).unwrap();
            assert_eq!(slot.as_deref(), Some("guest"));
        }

        #[test]
        fn test_assign_i32_range_checked() {
            let mut slot: Option<i32> = None;
            let err = <Option<i32> as FieldType>::assign(&mut slot, FieldValue::Int(i64::MAX));
            assert!(err.is_err());
            assert!(slot.is_none());
        }

        #[test]
        fn test_assign_bool_rejects_string() {
            let mut slot: Option<bool> = Some(true);
            let err = <Option<bool> as FieldType>::assign(&mut slot, "false".into());
            assert_eq!(err.unwrap_err(), "expected boolean, found string");
            assert_eq!(slot, Some(true));
        }

        #[test]
        fn test_declared_scalars() {
            assert_eq!(<Option<String> as FieldType>::DECLARED, DeclaredType::Str);
            assert_eq!(<i64 as FieldType>::DECLARED, DeclaredType::Int);
            assert_eq!(<Option<bool> as FieldType>::DECLARED, DeclaredType::Bool);
            assert_eq!(<Option<f64> as FieldType>::DECLARED.describe(), "f64");
        }
    }

    mod policy_tags_tests {
        use super::*;

        #[test]
        fn test_default_has_no_markers() {
            let tags = PolicyTags::default();
            assert!(!tags.is_skip());
            assert!(!tags.is_param());
            assert!(!tags.is_random());
        }
    }
}
