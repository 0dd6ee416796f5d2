//! Build-server REST models.
//!
//! Wire names are camelCase and unset options are omitted, matching the
//! server's JSON. Nested models are `Rc`-shared so one pooled project can be
//! referenced from several build types at once.

use crate::Model;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Server user account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Model)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[ensayo(param, random)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[ensayo(random)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[ensayo(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Rc<Roles>>,
}

/// Role assignments of a user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Model)]
#[serde(default)]
pub struct Roles {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub role: Vec<Rc<Role>>,
}

/// One role grant. Scope `g` is global, `p:<projectId>` is per project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Model)]
#[serde(rename_all = "camelCase", default)]
pub struct Role {
    #[ensayo(param)]
    pub role_id: Option<String>,
    #[ensayo(param)]
    pub scope: Option<String>,
}

impl Default for Role {
    fn default() -> Self {
        Self {
            role_id: Some("SYSTEM_ADMIN".to_string()),
            scope: Some("g".to_string()),
        }
    }
}

/// Project description accepted by `POST /app/rest/projects`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Model)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[ensayo(random)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[ensayo(random)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[ensayo(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locator: Option<String>,
    #[ensayo(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_project: Option<ParentProject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy_all_associated_settings: Option<bool>,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            id: None,
            name: None,
            locator: None,
            parent_project: Some(ParentProject::default()),
            copy_all_associated_settings: Some(true),
        }
    }
}

/// Reference to the parent of a new project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentProject {
    pub locator: String,
}

impl Default for ParentProject {
    fn default() -> Self {
        Self {
            locator: "_Root".to_string(),
        }
    }
}

/// Build configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Model)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildType {
    #[ensayo(param, random)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[ensayo(random)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Rc<Project>>,
    #[ensayo(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Steps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Model)]
#[serde(default)]
pub struct Steps {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub step: Vec<Rc<Step>>,
}

/// Build step; runner type defaults to the command-line runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Model)]
#[serde(default)]
pub struct Step {
    #[ensayo(random)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub step_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Rc<Properties>>,
}

impl Default for Step {
    fn default() -> Self {
        Self {
            name: None,
            step_type: Some("simpleRunner".to_string()),
            properties: None,
        }
    }
}

/// Server-wide authentication settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Model)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerAuthSettings {
    pub guest_username: Option<String>,
    #[ensayo(param)]
    pub per_project_permissions: Option<bool>,
    pub two_factor_authentication_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modules: Option<Rc<Modules>>,
}

impl Default for ServerAuthSettings {
    fn default() -> Self {
        Self {
            guest_username: Some("guest".to_string()),
            per_project_permissions: Some(true),
            two_factor_authentication_type: Some("OPTIONAL".to_string()),
            modules: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Model)]
#[serde(default)]
pub struct Modules {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub module: Vec<Rc<Module>>,
}

/// Authentication module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Model)]
#[serde(default)]
pub struct Module {
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Rc<Properties>>,
}

impl Default for Module {
    fn default() -> Self {
        Self {
            name: Some("HTTP-Basic".to_string()),
            properties: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Model)]
#[serde(default)]
pub struct Properties {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub property: Vec<Rc<Property>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Model)]
#[serde(default)]
pub struct Property {
    #[ensayo(param)]
    pub name: Option<String>,
    #[ensayo(param)]
    pub value: Option<bool>,
}

impl Default for Property {
    fn default() -> Self {
        Self {
            name: Some("usersCanChangeOwnPasswords".to_string()),
            value: Some(true),
        }
    }
}
