//! URL generation from raw route patterns.

use std::collections::{HashMap, VecDeque};

use regex::Regex;
use tracing::warn;

use crate::error::{PatternSyntaxError, Result, RouterError};
use crate::lexer::{Lexer, Token};
use crate::route::CompiledRoute;

/// Upper bound on the number of variable markers filled in one pattern.
///
/// Markers past this bound stay unfilled even when values remain, and
/// positional values meant for them are not consumed. A pattern that needs
/// them then fails validation like any other missing value.
pub const MAX_SUBSTITUTIONS: usize = 1000;

/// Values to substitute into a pattern's variable markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlValues {
    /// Each marker, left to right, consumes the value at the front.
    Positional(VecDeque<String>),
    /// Each marker takes the value registered under its own name.
    Named(HashMap<String, String>),
}

impl UrlValues {
    /// Creates positional values.
    pub fn positional<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Positional(values.into_iter().map(Into::into).collect())
    }

    /// Creates named values.
    pub fn named<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Named(
            values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns how many values are left.
    ///
    /// Positional values shrink as markers consume them. Named values are
    /// looked up, never consumed, so their count stays the same.
    #[must_use]
    pub fn remaining(&self) -> usize {
        match self {
            Self::Positional(values) => values.len(),
            Self::Named(values) => values.len(),
        }
    }

    fn take(&mut self, name: &str) -> Option<String> {
        match self {
            Self::Positional(values) => values.pop_front(),
            Self::Named(values) => values.get(name).cloned(),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for UrlValues {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::positional(iter)
    }
}

/// A raw pattern as a tree of literal text, markers and optional groups.
#[derive(Debug)]
enum Segment<'a> {
    Literal(String),
    Variable(&'a str),
    Optional(Vec<Segment<'a>>),
}

fn parse(raw: &str) -> std::result::Result<Vec<Segment<'_>>, PatternSyntaxError> {
    let mut stack: Vec<Vec<Segment<'_>>> = vec![Vec::new()];

    for token in Lexer::new(raw) {
        match token? {
            Token::Literal(c) => {
                let current = stack.last_mut().ok_or_else(|| unopened(raw))?;
                if let Some(Segment::Literal(text)) = current.last_mut() {
                    text.push(c);
                } else {
                    current.push(Segment::Literal(c.to_string()));
                }
            }
            Token::Variable { name, .. } => {
                stack
                    .last_mut()
                    .ok_or_else(|| unopened(raw))?
                    .push(Segment::Variable(name));
            }
            Token::OptionalStart => stack.push(Vec::new()),
            Token::OptionalEnd => {
                if stack.len() < 2 {
                    return Err(unopened(raw));
                }
                let group = stack.pop().ok_or_else(|| unopened(raw))?;
                stack
                    .last_mut()
                    .ok_or_else(|| unopened(raw))?
                    .push(Segment::Optional(group));
            }
        }
    }

    if stack.len() > 1 {
        return Err(PatternSyntaxError::UnclosedBrackets {
            pattern: raw.to_string(),
        });
    }
    Ok(stack.pop().unwrap_or_default())
}

fn unopened(raw: &str) -> PatternSyntaxError {
    PatternSyntaxError::UnopenedBrackets {
        pattern: raw.to_string(),
    }
}

/// Takes a value for every marker, left to right, until values run out.
fn fill(segments: &[Segment<'_>], values: &mut UrlValues, filled: &mut Vec<Option<String>>) {
    for segment in segments {
        match segment {
            Segment::Literal(_) => {}
            Segment::Variable(name) => {
                let value = if filled.len() < MAX_SUBSTITUTIONS {
                    values.take(name)
                } else {
                    None
                };
                filled.push(value);
            }
            Segment::Optional(inner) => fill(inner, values, filled),
        }
    }
}

/// Writes the filled pattern, returning whether every direct marker had a
/// value.
///
/// An optional group is written only when all of its own markers are filled;
/// nested groups decide for themselves. Unfilled markers outside any group are
/// dropped.
fn render(
    segments: &[Segment<'_>],
    filled: &[Option<String>],
    next: &mut usize,
    out: &mut String,
) -> bool {
    let mut complete = true;

    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Variable(_) => {
                match filled.get(*next).and_then(Option::as_deref) {
                    Some(value) => out.push_str(value),
                    None => complete = false,
                }
                *next += 1;
            }
            Segment::Optional(inner) => {
                let mut group = String::new();
                if render(inner, filled, next, &mut group) {
                    out.push_str(&group);
                }
            }
        }
    }

    complete
}

/// Generates URLs from raw route patterns.
///
/// Output is always validated against the pattern's compiled regex, so a
/// generated URL is one the same route would match.
///
/// # Example
///
/// ```
/// use trellis_router::{NoConstraints, PatternCompiler, UrlGenerator, UrlValues};
///
/// let compiled = PatternCompiler::new()
///     .compile("/archive[/:year[/:month]]", &NoConstraints)
///     .unwrap();
/// let mut values = UrlValues::positional(["2024"]);
/// let url = UrlGenerator::new()
///     .generate(compiled.raw(), compiled.regex(), "archive", &mut values)
///     .unwrap();
/// assert_eq!(url, "/archive/2024");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlGenerator;

impl UrlGenerator {
    /// Creates a new generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Fills a raw pattern with values and validates the result.
    ///
    /// Positional values are consumed from the front of `values`, one per
    /// marker, so the leftovers can be passed on to another pattern.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Pattern`] if the raw pattern is malformed and
    /// [`RouterError::UrlGeneration`] if the generated string does not match
    /// `regex`.
    pub fn generate(
        &self,
        raw: &str,
        regex: &Regex,
        route_name: &str,
        values: &mut UrlValues,
    ) -> Result<String> {
        let segments = parse(raw)?;

        let mut filled = Vec::new();
        fill(&segments, values, &mut filled);

        let mut url = String::with_capacity(raw.len());
        render(&segments, &filled, &mut 0, &mut url);

        if regex.is_match(&url) {
            Ok(url)
        } else {
            warn!(route = route_name, url = %url, "generated URL does not satisfy route pattern");
            Err(RouterError::UrlGeneration {
                route: route_name.to_string(),
                url,
            })
        }
    }

    /// Generates the full URL of a compiled route.
    ///
    /// The host consumes values first and the path takes the rest. A non-empty
    /// host is prefixed with `https://` for secure routes and `http://`
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::UrlGeneration`] if either the host or the path
    /// fails its route's pattern.
    pub fn generate_route(&self, route: &CompiledRoute, values: &mut UrlValues) -> Result<String> {
        let name = route.route().display_name();

        let host = self.generate(
            route.route().raw_host(),
            route.host().regex(),
            name,
            values,
        )?;
        let path = self.generate(
            route.route().raw_path(),
            route.path().regex(),
            name,
            values,
        )?;

        if host.is_empty() {
            return Ok(path);
        }

        let scheme = if route.route().is_secure() {
            "https"
        } else {
            "http"
        };
        Ok(format!("{scheme}://{host}{path}"))
    }
}
