//! Route definitions and the collection they are registered in.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compiler::{CompiledPattern, PatternCompiler};
use crate::error::{Result, RouterError};
use crate::generator::{UrlGenerator, UrlValues};

/// HTTP request methods.
///
/// Route tables spell methods in any case; they are written back uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Method {
    /// GET method
    Get,
    /// POST method
    Post,
    /// PUT method
    Put,
    /// PATCH method
    Patch,
    /// DELETE method
    Delete,
    /// HEAD method
    Head,
    /// OPTIONS method
    Options,
}

impl Method {
    /// Returns the method as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl FromStr for Method {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            _ => Err(RouterError::InvalidMethod(s.to_string())),
        }
    }
}

impl TryFrom<String> for Method {
    type Error = RouterError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single route definition.
///
/// Routes are plain data until [`compile`](Self::compile)d; once compiled
/// their patterns never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Optional route name for reverse URL lookup.
    name: Option<String>,
    /// HTTP methods this route answers to.
    methods: Vec<Method>,
    /// Raw path pattern.
    path: String,
    /// Raw host pattern, empty for any host.
    host: String,
    /// Per-variable regex overrides.
    constraints: HashMap<String, String>,
    /// Whether URLs for this route use `https`.
    secure: bool,
}

impl Route {
    /// Creates a new route.
    pub fn new(methods: impl IntoIterator<Item = Method>, path: impl Into<String>) -> Self {
        Self {
            name: None,
            methods: methods.into_iter().collect(),
            path: path.into(),
            host: String::new(),
            constraints: HashMap::new(),
            secure: false,
        }
    }

    /// Creates a GET route.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new([Method::Get], path)
    }

    /// Creates a POST route.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new([Method::Post], path)
    }

    /// Creates a PUT route.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new([Method::Put], path)
    }

    /// Creates a PATCH route.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new([Method::Patch], path)
    }

    /// Creates a DELETE route.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new([Method::Delete], path)
    }

    /// Sets the route name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the host pattern.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Marks the route as served over `https`.
    #[must_use]
    pub const fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Constrains a variable to a regex fragment, e.g. `\d+`.
    #[must_use]
    pub fn where_var(mut self, variable: impl Into<String>, regex: impl Into<String>) -> Self {
        self.constraints.insert(variable.into(), regex.into());
        self
    }

    /// Returns the route name.
    #[must_use]
    pub fn route_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the name used in diagnostics: the route name, or the raw path.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.path)
    }

    /// Returns the HTTP methods.
    #[must_use]
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Returns the raw path pattern.
    #[must_use]
    pub fn raw_path(&self) -> &str {
        &self.path
    }

    /// Returns the raw host pattern.
    #[must_use]
    pub fn raw_host(&self) -> &str {
        &self.host
    }

    /// Returns the variable constraints.
    #[must_use]
    pub const fn constraints(&self) -> &HashMap<String, String> {
        &self.constraints
    }

    /// Returns whether the route is served over `https`.
    #[must_use]
    pub const fn is_secure(&self) -> bool {
        self.secure
    }

    /// Compiles the path and host patterns.
    ///
    /// Path and host are compiled independently, so the same variable name may
    /// appear in both.
    ///
    /// # Errors
    ///
    /// Returns an error if either pattern is malformed.
    pub fn compile(self) -> Result<CompiledRoute> {
        let compiler = PatternCompiler::new();
        let path = compiler.compile(&self.path, &self.constraints)?;
        let host = compiler.compile(&self.host, &self.constraints)?;

        Ok(CompiledRoute {
            route: self,
            path,
            host,
        })
    }
}

/// A route together with its compiled patterns.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    route: Route,
    path: CompiledPattern,
    host: CompiledPattern,
}

impl CompiledRoute {
    /// Returns the route definition.
    #[must_use]
    pub const fn route(&self) -> &Route {
        &self.route
    }

    /// Returns the compiled path pattern.
    #[must_use]
    pub const fn path(&self) -> &CompiledPattern {
        &self.path
    }

    /// Returns the compiled host pattern.
    #[must_use]
    pub const fn host(&self) -> &CompiledPattern {
        &self.host
    }

    /// Returns whether the route answers to a method.
    #[must_use]
    pub fn allows(&self, method: Method) -> bool {
        self.route.methods.contains(&method)
    }
}

/// Registered routes, indexed by name.
#[derive(Debug, Clone, Default)]
pub struct RouteCollection {
    /// Registered routes, in registration order.
    routes: Vec<CompiledRoute>,
    /// Named routes for reverse URL lookup.
    named_routes: HashMap<String, usize>,
}

impl RouteCollection {
    /// Creates a new empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles and registers a route.
    ///
    /// # Errors
    ///
    /// Returns an error if the route is malformed or its name is already
    /// taken. Nothing is registered in that case.
    pub fn add(&mut self, route: Route) -> Result<&CompiledRoute> {
        if let Some(name) = route.route_name() {
            if self.named_routes.contains_key(name) {
                return Err(RouterError::DuplicateRouteName(name.to_string()));
            }
        }

        let compiled = route.compile()?;
        debug!(
            name = ?compiled.route.route_name(),
            path = compiled.route.raw_path(),
            host = compiled.route.raw_host(),
            "registered route"
        );

        let index = self.routes.len();
        if let Some(name) = compiled.route.route_name() {
            self.named_routes.insert(name.to_string(), index);
        }
        self.routes.push(compiled);
        Ok(&self.routes[index])
    }

    /// Looks up a named route.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CompiledRoute> {
        self.named_routes.get(name).map(|&i| &self.routes[i])
    }

    /// Returns the routes answering to a method.
    pub fn for_method(&self, method: Method) -> impl Iterator<Item = &CompiledRoute> {
        self.routes.iter().filter(move |r| r.allows(method))
    }

    /// Returns all routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CompiledRoute> {
        self.routes.iter()
    }

    /// Returns the number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns whether no route is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Generates a URL for a named route.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::RouteNotFound`] for unknown names and
    /// [`RouterError::UrlGeneration`] if the values do not satisfy the route.
    pub fn url_for(&self, name: &str, values: impl Into<UrlValues>) -> Result<String> {
        let route = self
            .get(name)
            .ok_or_else(|| RouterError::RouteNotFound(name.to_string()))?;
        UrlGenerator::new().generate_route(route, &mut values.into())
    }
}

impl<'a> IntoIterator for &'a RouteCollection {
    type Item = &'a CompiledRoute;
    type IntoIter = std::slice::Iter<'a, CompiledRoute>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
