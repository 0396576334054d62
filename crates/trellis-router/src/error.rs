//! Error types for route compilation and URL generation.

use thiserror::Error;

/// A raw route pattern that cannot be compiled.
///
/// Every variant carries the offending pattern so that the route responsible
/// can be identified from the message alone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternSyntaxError {
    /// A `:` is not followed by a valid variable name.
    #[error(
        "invalid variable definition at byte {position} of \"{pattern}\": \
         variable name can't be empty or start with a digit"
    )]
    InvalidVariable {
        /// The raw pattern.
        pattern: String,
        /// Byte offset of the `:` that starts the definition.
        position: usize,
    },

    /// A variable name is longer than a named capture group allows.
    #[error(
        "variable name \"{name}\" in \"{pattern}\" exceeds the maximum length of {max} characters"
    )]
    VariableNameTooLong {
        /// The raw pattern.
        pattern: String,
        /// The variable name.
        name: String,
        /// The maximum supported length.
        max: usize,
    },

    /// The same variable name is declared twice.
    #[error("variable \"{name}\" is used more than once in \"{pattern}\"")]
    DuplicateVariable {
        /// The raw pattern.
        pattern: String,
        /// The repeated variable name.
        name: String,
    },

    /// An optional group was opened but never closed.
    #[error("route pattern has unclosed brackets: \"{pattern}\"")]
    UnclosedBrackets {
        /// The raw pattern.
        pattern: String,
    },

    /// An optional group was closed without being opened.
    #[error("route pattern has unopened brackets: \"{pattern}\"")]
    UnopenedBrackets {
        /// The raw pattern.
        pattern: String,
    },
}

/// Router-specific errors.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The route definition is malformed.
    #[error("malformed route pattern: {0}")]
    Pattern(#[from] PatternSyntaxError),

    /// A custom variable constraint produced an invalid regex.
    #[error("invalid variable constraint in pattern \"{pattern}\": {source}")]
    InvalidConstraint {
        /// The raw pattern.
        pattern: String,
        /// The regex engine's complaint.
        source: regex::Error,
    },

    /// A generated URL does not satisfy the route's own pattern.
    #[error("generated URL part \"{url}\" does not satisfy the pattern of route \"{route}\"")]
    UrlGeneration {
        /// The route name (or raw pattern for unnamed routes).
        route: String,
        /// The generated string that failed validation.
        url: String,
    },

    /// Route name not found.
    #[error("route not found: {0}")]
    RouteNotFound(String),

    /// Two routes were registered under the same name.
    #[error("duplicate route name: {0}")]
    DuplicateRouteName(String),

    /// An HTTP method name could not be parsed.
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// A route table could not be deserialized.
    #[error("invalid route configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// IO error while reading a route table.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RouterError {
    /// Returns whether this error was raised while compiling a pattern.
    #[must_use]
    pub const fn is_pattern_error(&self) -> bool {
        matches!(self, Self::Pattern(_) | Self::InvalidConstraint { .. })
    }
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
