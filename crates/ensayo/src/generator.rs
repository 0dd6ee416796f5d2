//! Recursive test-data generator.
//!
//! One `generate` call builds one fully populated model:
//!
//! ```text
//! construct() ──► for each field in declared order
//!                   Skip / None          → untouched
//!                   PositionalOverride   → next parameter
//!                   RandomScalar         → random string / integer
//!                   NestedObject(List)   → pool hit, else recurse
//! ```
//!
//! The parameter queue and the random source are borrowed by every
//! recursion level of the call. The pool is only ever read.

use crate::field::{DeclaredType, FieldDescriptor, FieldValue};
use crate::model::{Model, ModelType};
use crate::policy::{classify, Policy};
use crate::pool::ReusePool;
use crate::queue::ParameterQueue;
use crate::random::{RandomData, RandomSource, Seed};
use crate::result::{EnsayoError, EnsayoResult};
use std::any::Any;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, debug_span, trace, warn};

/// Type-erased entry point stored in [`ModelType`]
pub(crate) type GenerateFn = fn(&mut Generation<'_>) -> EnsayoResult<Rc<dyn Any>>;

/// State of one top-level generation call
pub(crate) struct Generation<'a> {
    pool: &'a ReusePool,
    params: &'a mut ParameterQueue,
    random: &'a mut dyn RandomSource,
    depth: usize,
}

impl Generation<'_> {
    fn build<T: Model>(&mut self) -> EnsayoResult<T> {
        let span = debug_span!("generate", model = T::TAG.name(), depth = self.depth);
        let _enter = span.enter();

        let mut instance = T::construct()?;

        for (index, field) in T::FIELDS.iter().enumerate() {
            let policy = classify(field, !self.params.is_empty());
            trace!(field = field.name(), ?policy, "classified");

            let value = match policy {
                Policy::Skip | Policy::None => continue,
                Policy::PositionalOverride => match self.params.pop_front() {
                    Some(value) => value,
                    None => continue,
                },
                Policy::RandomScalar => self.random_value::<T>(field)?,
                Policy::NestedObject | Policy::NestedObjectList => {
                    let Some(model) = field.declared().model_type() else {
                        continue;
                    };
                    let nested = self.resolve(model)?;
                    if policy == Policy::NestedObjectList {
                        FieldValue::ModelList(vec![nested])
                    } else {
                        FieldValue::Model(nested)
                    }
                }
            };

            instance.write_field(index, value)?;
        }

        Ok(instance)
    }

    fn random_value<T: Model>(&mut self, field: &FieldDescriptor) -> EnsayoResult<FieldValue> {
        match field.declared() {
            DeclaredType::Str => Ok(FieldValue::Str(self.random.string())),
            DeclaredType::Int => Ok(FieldValue::Int(self.random.integer())),
            other => Err(EnsayoError::unsupported_scalar(
                T::TAG.name(),
                field.name(),
                other.describe(),
            )),
        }
    }

    fn resolve(&mut self, model: ModelType) -> EnsayoResult<Rc<dyn Any>> {
        if let Some(pooled) = self.pool.find(model.tag()) {
            debug!(model = model.tag().name(), "reusing pooled instance");
            return Ok(pooled);
        }

        self.depth += 1;
        let generated = (model.generate_fn())(self);
        self.depth -= 1;
        generated
    }
}

/// Build `T` inside an ongoing generation and erase its type
pub(crate) fn generate_erased<T: Model>(
    generation: &mut Generation<'_>,
) -> EnsayoResult<Rc<dyn Any>> {
    let instance: Rc<dyn Any> = Rc::new(generation.build::<T>()?);
    Ok(instance)
}

/// Test-data generator owning a random source.
///
/// # Example
///
/// ```ignore
/// let mut generator = Generator::seeded(Seed::from_u64(42));
/// let project: Project = generator.generate()?;
/// let pool = ReusePool::new().with(Rc::new(project));
/// let build_type: BuildType = generator.generate_pooled(&pool, params![])?;
/// ```
pub struct Generator {
    random: Box<dyn RandomSource>,
}

impl Generator {
    /// Generator with an entropy-seeded random source
    #[must_use]
    pub fn new() -> Self {
        Self::with_random(RandomData::from_entropy())
    }

    /// Generator whose random values are reproducible from `seed`
    #[must_use]
    pub fn seeded(seed: Seed) -> Self {
        Self::with_random(RandomData::new(seed))
    }

    /// Generator with a custom random source
    #[must_use]
    pub fn with_random(random: impl RandomSource + 'static) -> Self {
        Self {
            random: Box::new(random),
        }
    }

    /// Generate `T` with no parameters and an empty pool.
    ///
    /// # Errors
    ///
    /// Returns a construction, field-access or unsupported-scalar error from
    /// any level of the recursion.
    pub fn generate<T: Model>(&mut self) -> EnsayoResult<T> {
        self.generate_pooled(&ReusePool::new(), Vec::<FieldValue>::new())
    }

    /// Generate `T` with positional parameters and an empty pool.
    ///
    /// # Errors
    ///
    /// See [`Generator::generate`].
    pub fn generate_with<T, I>(&mut self, params: I) -> EnsayoResult<T>
    where
        T: Model,
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        self.generate_pooled(&ReusePool::new(), params)
    }

    /// Generate `T`, reusing pooled instances for nested fields.
    ///
    /// Parameters left over after every field has been visited are dropped.
    ///
    /// # Errors
    ///
    /// See [`Generator::generate`].
    pub fn generate_pooled<T, I>(&mut self, pool: &ReusePool, params: I) -> EnsayoResult<T>
    where
        T: Model,
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        let mut params = ParameterQueue::new(params);
        let mut generation = Generation {
            pool,
            params: &mut params,
            random: self.random.as_mut(),
            depth: 0,
        };
        let instance = generation.build::<T>()?;

        if !params.is_empty() {
            warn!(
                model = T::TAG.name(),
                consumed = params.consumed(),
                leftover = params.remaining().len(),
                "unconsumed parameters ignored"
            );
        }

        Ok(instance)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator").finish_non_exhaustive()
    }
}

/// Generate `T` with an entropy-seeded [`Generator`].
///
/// # Errors
///
/// See [`Generator::generate`].
pub fn generate<T: Model>() -> EnsayoResult<T> {
    Generator::new().generate()
}

/// Generate `T` from positional parameters.
///
/// # Errors
///
/// See [`Generator::generate`].
pub fn generate_with<T, I>(params: I) -> EnsayoResult<T>
where
    T: Model,
    I: IntoIterator,
    I::Item: Into<FieldValue>,
{
    Generator::new().generate_with(params)
}

/// Generate `T` against a reuse pool.
///
/// # Errors
///
/// See [`Generator::generate`].
pub fn generate_pooled<T, I>(pool: &ReusePool, params: I) -> EnsayoResult<T>
where
    T: Model,
    I: IntoIterator,
    I::Item: Into<FieldValue>,
{
    Generator::new().generate_pooled(pool, params)
}
