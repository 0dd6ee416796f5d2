//! REST endpoints and the interfaces of the request layer.
//!
//! No transport lives here. An HTTP client implements [`CrudRequester`] for
//! each model it sends, and test cleanup implements [`EntityTracker`].

use crate::model::{Model, ModelTag};
use crate::models::{BuildType, Project, ServerAuthSettings, User};
use crate::result::EnsayoResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP verb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Method name as sent on the wire
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build-server REST endpoint and the model it exchanges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    BuildTypes,
    Projects,
    Users,
    AuthSettings,
}

impl Endpoint {
    /// Every endpoint, in cleanup order (dependents first)
    pub const ALL: [Self; 4] = [Self::BuildTypes, Self::Projects, Self::Users, Self::AuthSettings];

    /// Path relative to the server base URL
    #[must_use]
    pub const fn url(self) -> &'static str {
        match self {
            Self::BuildTypes => "/app/rest/buildTypes",
            Self::Projects => "/app/rest/projects",
            Self::Users => "/app/rest/users",
            Self::AuthSettings => "/app/rest/server/authSettings",
        }
    }

    /// Tag of the model sent to and returned by this endpoint
    #[must_use]
    pub const fn model_tag(self) -> ModelTag {
        match self {
            Self::BuildTypes => BuildType::TAG,
            Self::Projects => Project::TAG,
            Self::Users => User::TAG,
            Self::AuthSettings => ServerAuthSettings::TAG,
        }
    }

    /// Supported verbs. Auth settings are a singleton: read and replace only.
    #[must_use]
    pub const fn methods(self) -> &'static [HttpMethod] {
        match self {
            Self::AuthSettings => &[HttpMethod::Get, HttpMethod::Put],
            _ => &[
                HttpMethod::Get,
                HttpMethod::Post,
                HttpMethod::Put,
                HttpMethod::Delete,
            ],
        }
    }

    /// Whether the endpoint accepts `method`
    #[must_use]
    pub fn supports(self, method: HttpMethod) -> bool {
        self.methods().contains(&method)
    }

    /// URL addressing one entity, `<url>/id:<id>`
    #[must_use]
    pub fn entity_url(self, id: &str) -> String {
        format!("{}/id:{id}", self.url())
    }

    /// Endpoint exchanging the model with `tag`
    #[must_use]
    pub fn for_model(tag: ModelTag) -> Option<Self> {
        Self::ALL.into_iter().find(|endpoint| endpoint.model_tag() == tag)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url())
    }
}

/// Create/read/update/delete calls for one model type.
pub trait CrudRequester<T: Model> {
    /// Endpoint this requester talks to
    fn endpoint(&self) -> Endpoint;

    /// Send `model` and return the server's view of it
    fn create(&mut self, model: &T) -> EnsayoResult<T>;

    /// Fetch the entity at `locator`
    fn read(&mut self, locator: &str) -> EnsayoResult<T>;

    /// Replace the entity at `locator` with `model`
    fn update(&mut self, locator: &str, model: &T) -> EnsayoResult<T>;

    /// Remove the entity at `locator`
    fn delete(&mut self, locator: &str) -> EnsayoResult<()>;
}

/// Bookkeeping of entities created during a test, for cleanup afterwards.
pub trait EntityTracker {
    /// Remember an entity for cleanup
    fn track(&mut self, endpoint: Endpoint, id: String);

    /// Tracked entities in creation order
    fn tracked(&self) -> Vec<(Endpoint, String)>;
}
