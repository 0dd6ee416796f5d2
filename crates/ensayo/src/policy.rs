//! Field policy classification.
//!
//! Precedence, highest first:
//!
//! ```text
//! Skip > PositionalOverride (parameter left) > RandomScalar
//!      > NestedObject > NestedObjectList > None
//! ```
//!
//! A `param` field with no parameter left falls through as if it were
//! untagged, which lets one field be both overridable and generated.

use crate::field::{DeclaredType, FieldDescriptor};

/// How the generator fills one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Left untouched
    Skip,
    /// Takes the next positional parameter
    PositionalOverride,
    /// Filled from the random provider
    RandomScalar,
    /// Reused from the pool or generated recursively
    NestedObject,
    /// Same as `NestedObject`, wrapped in a one-element list
    NestedObjectList,
    /// No policy applies; left at its default
    None,
}

/// Classify `field` given whether any positional parameter is still queued.
#[must_use]
pub fn classify(field: &FieldDescriptor, parameters_left: bool) -> Policy {
    let tags = field.policy();

    if tags.is_skip() {
        return Policy::Skip;
    }
    if tags.is_param() && parameters_left {
        return Policy::PositionalOverride;
    }
    if tags.is_random() {
        return Policy::RandomScalar;
    }
    match field.declared() {
        DeclaredType::Model(_) => Policy::NestedObject,
        DeclaredType::ModelList(_) => Policy::NestedObjectList,
        _ => Policy::None,
    }
}
