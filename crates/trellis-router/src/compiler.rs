//! Compilation of raw route patterns into anchored regexes.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use regex::Regex;
use tracing::debug;

use crate::error::{PatternSyntaxError, Result, RouterError};
use crate::lexer::{Lexer, Token};
use crate::params::PathParams;

/// Fragment used for variables without a custom constraint.
pub const DEFAULT_VARIABLE_REGEX: &str = "[^/:]+";

/// Regex that an empty pattern compiles to.
const MATCH_ANYTHING: &str = "^.*$";

/// Supplies custom regex fragments for route variables.
///
/// Returning `None` makes the compiler fall back to
/// [`DEFAULT_VARIABLE_REGEX`].
pub trait ConstraintLookup {
    /// Returns the regex fragment a variable must match, if any.
    fn constraint(&self, name: &str) -> Option<&str>;
}

/// A lookup that never constrains anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConstraints;

impl ConstraintLookup for NoConstraints {
    fn constraint(&self, _name: &str) -> Option<&str> {
        None
    }
}

impl<S: BuildHasher> ConstraintLookup for HashMap<String, String, S> {
    fn constraint(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl ConstraintLookup for BTreeMap<String, String> {
    fn constraint(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<'a> ConstraintLookup for [(&'a str, &'a str)] {
    fn constraint(&self, name: &str) -> Option<&str> {
        self.iter().find(|(var, _)| *var == name).map(|(_, re)| *re)
    }
}

impl<'a, const N: usize> ConstraintLookup for [(&'a str, &'a str); N] {
    fn constraint(&self, name: &str) -> Option<&str> {
        self.as_slice().constraint(name)
    }
}

/// Scan state for a single compilation.
#[derive(Default)]
struct Scan {
    regex: String,
    depth: usize,
    defaults: HashMap<String, String>,
    variables: Vec<String>,
}

impl Scan {
    fn push_literal(&mut self, c: char) {
        if c == '/' {
            self.regex.push_str("\\/");
        } else {
            let mut buf = [0; 4];
            self.regex.push_str(&regex::escape(c.encode_utf8(&mut buf)));
        }
    }

    fn push_variable<C>(
        &mut self,
        pattern: &str,
        name: &str,
        default: Option<&str>,
        constraints: &C,
    ) -> std::result::Result<(), PatternSyntaxError>
    where
        C: ConstraintLookup + ?Sized,
    {
        if self.defaults.contains_key(name) {
            return Err(PatternSyntaxError::DuplicateVariable {
                pattern: pattern.to_string(),
                name: name.to_string(),
            });
        }

        self.defaults
            .insert(name.to_string(), default.unwrap_or_default().to_string());
        self.variables.push(name.to_string());

        let fragment = constraints
            .constraint(name)
            .unwrap_or(DEFAULT_VARIABLE_REGEX);
        self.regex.push_str("(?P<");
        self.regex.push_str(name);
        self.regex.push('>');
        self.regex.push_str(fragment);
        self.regex.push(')');
        Ok(())
    }
}

/// Compiles raw route patterns.
///
/// The compiler holds no state: every call to [`compile`](Self::compile)
/// scans with its own cursor and seen-name set, so one instance can be shared
/// freely between threads.
///
/// # Example
///
/// ```
/// use trellis_router::{NoConstraints, PatternCompiler};
///
/// let compiled = PatternCompiler::new()
///     .compile("/foo[/:bar]", &NoConstraints)
///     .unwrap();
/// assert_eq!(compiled.as_str(), r"^\/foo(?:\/(?P<bar>[^/:]+))?$");
/// assert!(compiled.is_match("/foo"));
/// assert!(compiled.is_match("/foo/42"));
/// assert!(!compiled.is_match("/foo/"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternCompiler;

impl PatternCompiler {
    /// Creates a new compiler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Compiles a raw path or host pattern.
    ///
    /// An empty pattern compiles to a regex matching anything.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Pattern`] for malformed patterns (invalid,
    /// overlong or duplicate variable names, unbalanced brackets) and
    /// [`RouterError::InvalidConstraint`] when a custom constraint does not
    /// form a valid regex.
    pub fn compile<C>(&self, raw: &str, constraints: &C) -> Result<CompiledPattern>
    where
        C: ConstraintLookup + ?Sized,
    {
        if raw.is_empty() {
            return CompiledPattern::build(raw, MATCH_ANYTHING.to_string(), Scan::default());
        }

        let mut scan = Scan::default();

        for token in Lexer::new(raw) {
            match token? {
                Token::Literal(c) => scan.push_literal(c),
                Token::Variable { name, default } => {
                    scan.push_variable(raw, name, default, constraints)?;
                }
                Token::OptionalStart => {
                    scan.regex.push_str("(?:");
                    scan.depth += 1;
                }
                Token::OptionalEnd => {
                    // A `]` that closes nothing can never be balanced later on.
                    if scan.depth == 0 {
                        return Err(PatternSyntaxError::UnopenedBrackets {
                            pattern: raw.to_string(),
                        }
                        .into());
                    }
                    scan.regex.push_str(")?");
                    scan.depth -= 1;
                }
            }
        }

        if scan.depth > 0 {
            return Err(PatternSyntaxError::UnclosedBrackets {
                pattern: raw.to_string(),
            }
            .into());
        }

        let source = format!("^{}$", scan.regex);
        CompiledPattern::build(raw, source, scan)
    }
}

/// A compiled path or host pattern.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// The raw pattern this was compiled from.
    raw: String,
    /// Anchored regex with one named group per variable.
    regex: Regex,
    /// Declared default per variable, empty when none was declared.
    defaults: HashMap<String, String>,
    /// Variable names in order of appearance.
    variables: Vec<String>,
}

impl CompiledPattern {
    fn build(raw: &str, source: String, scan: Scan) -> Result<Self> {
        let regex = Regex::new(&source).map_err(|source| RouterError::InvalidConstraint {
            pattern: raw.to_string(),
            source,
        })?;

        debug!(pattern = raw, regex = regex.as_str(), "compiled route pattern");

        Ok(Self {
            raw: raw.to_string(),
            regex,
            defaults: scan.defaults,
            variables: scan.variables,
        })
    }

    /// Returns the raw pattern.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the compiled regex.
    #[must_use]
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Returns the compiled regex source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns the default value of every variable.
    #[must_use]
    pub const fn defaults(&self) -> &HashMap<String, String> {
        &self.defaults
    }

    /// Returns the default value of a variable.
    #[must_use]
    pub fn default_value(&self, name: &str) -> Option<&str> {
        self.defaults.get(name).map(String::as_str)
    }

    /// Returns the variable names in order of appearance.
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Returns whether the whole subject matches this pattern.
    #[must_use]
    pub fn is_match(&self, subject: &str) -> bool {
        self.regex.is_match(subject)
    }

    /// Matches a subject and extracts its variables.
    ///
    /// Variables that did not participate in the match (or matched nothing)
    /// take their declared default, if it is non-empty.
    #[must_use]
    pub fn captures(&self, subject: &str) -> Option<PathParams> {
        let caps = self.regex.captures(subject)?;

        let params = self
            .variables
            .iter()
            .filter_map(|name| {
                let value = caps
                    .name(name)
                    .map(|m| m.as_str())
                    .filter(|v| !v.is_empty())
                    .or_else(|| self.default_value(name).filter(|d| !d.is_empty()))?;
                Some((name.as_str(), value))
            })
            .collect();

        Some(params)
    }
}
