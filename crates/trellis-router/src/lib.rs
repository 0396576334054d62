//! # trellis-router
//!
//! Route pattern compilation and URL generation.
//!
//! This crate provides:
//! - A compiler from route patterns to anchored, named-capture regexes
//! - Optional segments, inline default values and per-variable constraints
//! - URL generation validated against the same compiled regex
//! - Named routes with host patterns and `https` routes
//! - Route tables loaded from JSON
//!
//! ## Pattern Syntax
//!
//! | Syntax | Meaning |
//! |--------|---------|
//! | `/users` | Literal text |
//! | `:id` | Variable, matching `[^/:]+` unless constrained |
//! | `:page=1` | Variable with a default value |
//! | `[/:page]` | Optional segment (may nest) |
//!
//! The same syntax is used for hosts, e.g. `:tenant.example.com`. An empty
//! pattern matches anything.
//!
//! ## Quick Start
//!
//! ```
//! use trellis_router::{Route, RouteCollection, UrlValues};
//!
//! let mut routes = RouteCollection::new();
//! routes
//!     .add(
//!         Route::get("/users/:id[/:tab=profile]")
//!             .name("user.show")
//!             .host(":tenant.example.com")
//!             .where_var("id", r"\d+")
//!             .secure(true),
//!     )
//!     .unwrap();
//!
//! let route = routes.get("user.show").unwrap();
//! let params = route.path().captures("/users/42").unwrap();
//! assert_eq!(params.get("id"), Some("42"));
//! assert_eq!(params.get("tab"), Some("profile"));
//!
//! let url = routes
//!     .url_for("user.show", UrlValues::positional(["acme", "42"]))
//!     .unwrap();
//! assert_eq!(url, "https://acme.example.com/users/42");
//! ```
//!
//! ## Compiling Patterns Directly
//!
//! ```
//! use trellis_router::{PatternCompiler, UrlGenerator, UrlValues};
//!
//! let compiled = PatternCompiler::new()
//!     .compile("/posts/:id", &[("id", r"\d+")])
//!     .unwrap();
//! assert_eq!(compiled.as_str(), r"^\/posts\/(?P<id>\d+)$");
//!
//! let generator = UrlGenerator::new();
//! let mut values = UrlValues::positional(["abc"]);
//! assert!(generator
//!     .generate(compiled.raw(), compiled.regex(), "post", &mut values)
//!     .is_err());
//! ```

mod compiler;
mod config;
mod error;
mod generator;
mod lexer;
mod params;
mod route;

pub use compiler::{
    CompiledPattern, ConstraintLookup, DEFAULT_VARIABLE_REGEX, NoConstraints, PatternCompiler,
};
pub use config::{RouteConfig, RouteDefinition};
pub use error::{PatternSyntaxError, Result, RouterError};
pub use generator::{MAX_SUBSTITUTIONS, UrlGenerator, UrlValues};
pub use lexer::{Lexer, MAX_VARIABLE_NAME_LENGTH, Token};
pub use params::PathParams;
pub use route::{CompiledRoute, Method, Route, RouteCollection};
