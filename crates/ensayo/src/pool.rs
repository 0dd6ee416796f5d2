//! Reuse pool of already-generated models.
//!
//! Later entities of a fixture set point at earlier ones through the pool:
//! generating a `BuildType` with a pooled `Project` attaches that exact
//! project instead of inventing a new one.

use crate::model::{Model, ModelTag};
use std::any::{Any, TypeId};
use std::fmt;
use std::rc::Rc;

struct PoolEntry {
    tag: ModelTag,
    type_id: TypeId,
    instance: Rc<dyn Any>,
}

/// Ordered collection of `(tag, instance)` pairs.
///
/// Lookups match the exact runtime type, first match wins. They never
/// remove or modify an entry, so one pooled instance can be attached to any
/// number of fields.
#[derive(Default)]
pub struct ReusePool {
    entries: Vec<PoolEntry>,
}

impl ReusePool {
    /// Create an empty pool
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shared instance
    pub fn add<T: Model>(&mut self, instance: Rc<T>) {
        self.entries.push(PoolEntry {
            tag: T::TAG,
            type_id: TypeId::of::<T>(),
            instance,
        });
    }

    /// Append an owned instance and hand back the shared handle
    pub fn add_value<T: Model>(&mut self, value: T) -> Rc<T> {
        let shared = Rc::new(value);
        self.add(Rc::clone(&shared));
        shared
    }

    /// Builder-style [`ReusePool::add`]
    #[must_use]
    pub fn with<T: Model>(mut self, instance: Rc<T>) -> Self {
        self.add(instance);
        self
    }

    /// First instance of the type `tag` stands for
    #[must_use]
    pub fn find(&self, tag: ModelTag) -> Option<Rc<dyn Any>> {
        let wanted = tag.runtime_id();
        self.entries
            .iter()
            .find(|entry| entry.type_id == wanted)
            .map(|entry| Rc::clone(&entry.instance))
    }

    /// First instance of type `T`
    #[must_use]
    pub fn find_as<T: Model>(&self) -> Option<Rc<T>> {
        self.find(T::TAG)
            .and_then(|instance| instance.downcast::<T>().ok())
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the pool has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tags of all entries, in insertion order
    pub fn tags(&self) -> impl Iterator<Item = ModelTag> + '_ {
        self.entries.iter().map(|entry| entry.tag)
    }
}

impl fmt::Debug for ReusePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.tags().map(|tag| tag.name()))
            .finish()
    }
}
