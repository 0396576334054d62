//! Route tables loaded from JSON.
//!
//! ```json
//! {
//!   "routes": [
//!     {
//!       "name": "user.show",
//!       "methods": ["GET"],
//!       "path": "/users/:id[/:tab=profile]",
//!       "host": ":tenant.example.com",
//!       "secure": true,
//!       "constraints": { "id": "\\d+" }
//!     }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::route::{Method, Route, RouteCollection};

/// A route table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Route definitions, registered in order.
    #[serde(default)]
    pub routes: Vec<RouteDefinition>,
}

/// One route of a route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
    /// Name for reverse URL lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// HTTP methods; GET when omitted.
    #[serde(default = "default_methods")]
    pub methods: Vec<Method>,
    /// Raw path pattern.
    pub path: String,
    /// Raw host pattern; any host when omitted.
    #[serde(default)]
    pub host: String,
    /// Whether URLs use `https`.
    #[serde(default)]
    pub secure: bool,
    /// Per-variable regex overrides.
    #[serde(default)]
    pub constraints: HashMap<String, String>,
}

fn default_methods() -> Vec<Method> {
    vec![Method::Get]
}

impl RouteDefinition {
    /// Converts this definition into an uncompiled route.
    #[must_use]
    pub fn into_route(self) -> Route {
        let mut route = Route::new(self.methods, self.path)
            .host(self.host)
            .secure(self.secure);
        if let Some(name) = self.name {
            route = route.name(name);
        }
        for (variable, regex) in self.constraints {
            route = route.where_var(variable, regex);
        }
        route
    }
}

impl RouteConfig {
    /// Parses a route table from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Config`](crate::RouterError::Config) if the JSON
    /// is malformed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a route table from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Io`](crate::RouterError::Io) if the file cannot
    /// be read and [`RouterError::Config`](crate::RouterError::Config) if it is
    /// malformed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Compiles every route into a collection.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed route or duplicate route name.
    pub fn into_collection(self) -> Result<RouteCollection> {
        let mut collection = RouteCollection::new();
        for definition in self.routes {
            collection.add(definition.into_route())?;
        }
        Ok(collection)
    }
}
