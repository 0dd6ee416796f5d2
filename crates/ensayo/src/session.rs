//! Multi-entity test data.
//!
//! A session generates entities one after another and pools each result, so
//! an entity generated later is attached to the ones generated before it.

use crate::field::FieldValue;
use crate::generator::Generator;
use crate::model::Model;
use crate::models::{BuildType, Project, User};
use crate::pool::ReusePool;
use crate::result::EnsayoResult;
use std::rc::Rc;
use tracing::debug;

/// Ordered generation with a growing reuse pool.
#[derive(Debug)]
pub struct Session<'g> {
    generator: &'g mut Generator,
    pool: ReusePool,
}

impl<'g> Session<'g> {
    /// Session with an empty pool
    pub fn new(generator: &'g mut Generator) -> Self {
        Self::with_pool(generator, ReusePool::new())
    }

    /// Session continuing from an existing pool
    pub fn with_pool(generator: &'g mut Generator, pool: ReusePool) -> Self {
        Self { generator, pool }
    }

    /// Generate `T` against the pool, then pool it.
    ///
    /// # Errors
    ///
    /// Propagates any generation failure; the pool is unchanged on error.
    pub fn generate<T: Model>(&mut self) -> EnsayoResult<Rc<T>> {
        self.generate_with(Vec::<FieldValue>::new())
    }

    /// [`Session::generate`] with positional parameters.
    ///
    /// # Errors
    ///
    /// Propagates any generation failure; the pool is unchanged on error.
    pub fn generate_with<T, I>(&mut self, params: I) -> EnsayoResult<Rc<T>>
    where
        T: Model,
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        let instance: T = self.generator.generate_pooled(&self.pool, params)?;
        debug!(model = T::TAG.name(), pooled = self.pool.len() + 1, "session entity");
        Ok(self.pool.add_value(instance))
    }

    /// Entities generated so far, in order
    pub fn pool(&self) -> &ReusePool {
        &self.pool
    }

    /// End the session, keeping the pool
    pub fn into_pool(self) -> ReusePool {
        self.pool
    }
}

/// Standard per-test bundle: a user, a project, and a build type inside it.
#[derive(Debug, Clone)]
pub struct TestData {
    pub user: User,
    pub project: Rc<Project>,
    pub build_type: Rc<BuildType>,
}

impl TestData {
    /// Generate the bundle in dependency order.
    ///
    /// # Errors
    ///
    /// Propagates any generation failure.
    pub fn generate(generator: &mut Generator) -> EnsayoResult<Self> {
        let mut session = Session::new(generator);
        let user = session.generate::<User>()?;
        let project = session.generate::<Project>()?;
        let build_type = session.generate::<BuildType>()?;
        drop(session);

        Ok(Self {
            user: Rc::unwrap_or_clone(user),
            project,
            build_type,
        })
    }

    /// Pool holding this bundle's project and build type, for generating
    /// more entities that belong to the same project
    pub fn pool(&self) -> ReusePool {
        ReusePool::new()
            .with(Rc::clone(&self.project))
            .with(Rc::clone(&self.build_type))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::Roles;
    use crate::random::Seed;

    fn generator() -> Generator {
        Generator::seeded(Seed::from_u64(31))
    }

    mod session_tests {
        use super::*;

        #[test]
        fn test_each_entity_pooled() {
            let mut generator = generator();
            let mut session = Session::new(&mut generator);
            let project = session.generate::<Project>().unwrap();
            let build_type = session.generate::<BuildType>().unwrap();

            assert!(Rc::ptr_eq(build_type.project.as_ref().unwrap(), &project));
            assert_eq!(session.pool().len(), 2);
        }

        #[test]
        fn test_failed_generation_leaves_pool_unchanged() {
            let mut generator = generator();
            let mut session = Session::new(&mut generator);
            assert!(session.generate_with::<Toggle, _>(["no"]).is_err());
            assert!(session.into_pool().is_empty());
        }

        #[test]
        fn test_with_pool_continues() {
            let mut generator = generator();
            let project = Rc::new(Project::default());
            let pool = ReusePool::new().with(Rc::clone(&project));
            let mut session = Session::with_pool(&mut generator, pool);

            let build_type = session.generate_with::<BuildType, _>(["fixedId"]).unwrap();
            assert_eq!(build_type.id.as_deref(), Some("fixedId"));
            assert!(Rc::ptr_eq(build_type.project.as_ref().unwrap(), &project));
        }

        #[derive(Debug, Default, crate::Model)]
        struct Toggle {
            #[ensayo(param)]
            enabled: Option<bool>,
        }
    }

    mod test_data_tests {
        use super::*;

        #[test]
        fn test_build_type_belongs_to_project() {
            let data = TestData::generate(&mut generator()).unwrap();
            assert!(Rc::ptr_eq(data.build_type.project.as_ref().unwrap(), &data.project));
        }

        #[test]
        fn test_user_is_mutable() {
            let mut data = TestData::generate(&mut generator()).unwrap();
            let project_id = data.project.id.clone().unwrap();
            let roles: Roles = generator()
                .generate_with(["PROJECT_ADMIN".to_string(), format!("p:{project_id}")])
                .unwrap();
            data.user.roles = Some(Rc::new(roles));

            let role = &data.user.roles.as_ref().unwrap().role[0];
            assert_eq!(role.scope.as_deref(), Some(format!("p:{project_id}").as_str()));
        }

        #[test]
        fn test_pool_generates_duplicate_id() {
            let data = TestData::generate(&mut generator()).unwrap();
            let existing = data.build_type.id.clone().unwrap();
            let duplicate: BuildType = generator()
                .generate_pooled(&data.pool(), [existing.clone()])
                .unwrap();

            assert_eq!(duplicate.id, Some(existing));
            assert!(Rc::ptr_eq(duplicate.project.as_ref().unwrap(), &data.project));
        }
    }
}
