//! Ensayo: Test-Data Generation for Build-Server Test Suites
//!
//! Ensayo (Spanish: "rehearsal") builds fully populated request models for
//! API and UI tests. Each model declares, per field, whether the generator
//! skips it, fills it from a positional parameter, fills it with a random
//! value, or builds a nested model for it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      ENSAYO Generation                           │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  #[derive(Model)]      ┌────────────┐      ┌──────────────┐      │
//! │  FIELDS table ────────►│ classify() │─────►│ Generator    │      │
//! │                        └────────────┘      │  params ◄─┐  │      │
//! │  ReusePool ───────────────────────────────►│  pool      │  │      │
//! │  RandomSource ────────────────────────────►│  recurse ──┘  │      │
//! │                                            └──────────────┘      │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use ensayo::{generate_pooled, generate_with, params, models::*, ReusePool};
//! use std::rc::Rc;
//!
//! let role: Role = generate_with(params!["PROJECT_ADMIN", "p:proj1"])?;
//!
//! let project: Rc<Project> = Rc::new(ensayo::generate()?);
//! let pool = ReusePool::new().with(Rc::clone(&project));
//! let build_type: BuildType = generate_pooled(&pool, params![])?;
//! assert!(Rc::ptr_eq(build_type.project.as_ref().unwrap(), &project));
//! ```

// The derive macro emits `::ensayo::` paths, which must resolve in this crate too
extern crate self as ensayo;

/// REST endpoints and request-layer interfaces
#[allow(clippy::must_use_candidate)]
pub mod api;

/// Harness configuration from YAML and environment
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
pub mod config;

/// Log subscriber setup
pub mod logging;

/// Build-server REST models
#[allow(clippy::struct_field_names)]
pub mod models;

mod field;
mod generator;
mod model;
mod policy;
mod pool;
mod queue;
mod random;
mod result;
mod session;

pub use ensayo_derive::Model;
pub use field::{DeclaredType, FieldDescriptor, FieldType, FieldValue, PolicyTags};
pub use generator::{generate, generate_pooled, generate_with, Generator};
pub use model::{Model, ModelTag, ModelType};
pub use policy::{classify, Policy};
pub use pool::ReusePool;
pub use queue::ParameterQueue;
pub use random::{RandomData, RandomSource, Seed, RANDOM_LENGTH, TEST_PREFIX};
pub use result::{EnsayoError, EnsayoResult};
pub use session::{Session, TestData};

/// Prelude for test suites
pub mod prelude {
    pub use crate::api::{CrudRequester, Endpoint, EntityTracker, HttpMethod};
    pub use crate::models::*;
    pub use crate::params;
    pub use crate::{
        generate, generate_pooled, generate_with, EnsayoError, EnsayoResult, Generator, Model,
        ReusePool, Seed, Session, TestData,
    };
}
